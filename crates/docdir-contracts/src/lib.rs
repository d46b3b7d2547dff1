//! # docdir-contracts
//!
//! Shared types for the docdir doctor directory.
//!
//! All crates in the workspace import from here. No filtering, matching, or
//! network logic lives in this crate — only data definitions, the
//! query-parameter state object, configuration, and error types.

pub mod config;
pub mod doctor;
pub mod error;
pub mod query;
pub mod suggest;

#[cfg(test)]
mod tests {
    use super::*;
    use config::DirectoryConfig;
    use doctor::Doctor;
    use error::DirectoryError;
    use query::{ConsultMode, QueryParams, SortKey};
    use suggest::{SearchCategory, SuggestionSet};

    // ── Doctor deserialization ───────────────────────────────────────────────

    #[test]
    fn doctor_deserializes_full_feed_record() {
        let json = r#"{
            "id": "111578",
            "name": "Dr. Ananya Rao",
            "name_initials": "AR",
            "photo": "https://example.org/ar.jpg",
            "doctor_introduction": "Consultant neurologist.",
            "specialities": [{ "name": "Neurologist" }, { "name": "General Physician" }],
            "fees": "₹ 600",
            "experience": "13 Years of experience",
            "languages": ["English", "Hindi"],
            "clinic": {
                "name": "Apollo Clinic",
                "address": {
                    "locality": "Indiranagar",
                    "city": "Bangalore",
                    "address_line1": "100 Feet Road",
                    "logo_url": "https://example.org/logo.png"
                }
            },
            "video_consult": true,
            "in_clinic": false
        }"#;

        let doctor: Doctor = serde_json::from_str(json).unwrap();
        assert_eq!(doctor.id, "111578");
        assert_eq!(doctor.clinic_id(), "Apollo Clinic");
        assert_eq!(doctor.clinic.address.locality, "Indiranagar");
        assert!(doctor.has_speciality("Neurologist"));
        assert!(!doctor.has_speciality("neurologist"));
        assert!(doctor.video_consult);
        assert!(!doctor.in_clinic);
        assert_eq!(doctor.languages.len(), 2);
    }

    #[test]
    fn doctor_sparse_record_uses_defaults() {
        let doctor: Doctor = serde_json::from_str(r#"{ "id": 7, "name": "Dr. Sparse" }"#).unwrap();

        // Numeric ids are accepted and stringified.
        assert_eq!(doctor.id, "7");
        assert!(doctor.specialities.is_empty());
        assert_eq!(doctor.fees, "");
        assert_eq!(doctor.experience, "");
        assert_eq!(doctor.clinic_id(), "");
        assert!(!doctor.video_consult);
        assert!(doctor.photo.is_none());
    }

    #[test]
    fn doctor_null_fields_fall_back_without_dropping_the_feed() {
        let json = r#"[
            { "id": "1", "name": "Dr. Good", "fees": "₹ 400", "clinic": { "name": "Sunrise" } },
            { "id": "2", "name": "Dr. Nulls", "fees": null, "experience": null,
              "clinic": null, "specialities": null, "languages": null,
              "video_consult": null, "in_clinic": null }
        ]"#;

        let doctors: Vec<Doctor> = serde_json::from_str(json).unwrap();
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].fees, "₹ 400");
        assert_eq!(doctors[0].clinic_id(), "Sunrise");

        let sparse = &doctors[1];
        assert_eq!(sparse.fees, "");
        assert_eq!(sparse.experience, "");
        assert_eq!(sparse.clinic, Default::default());
        assert!(sparse.specialities.is_empty());
        assert!(sparse.languages.is_empty());
        assert!(!sparse.video_consult);
        assert!(!sparse.in_clinic);
    }

    #[test]
    fn doctor_numeric_text_fields_are_stringified() {
        let json = r#"{ "id": 9, "name": "Dr. Numbers", "fees": 500, "experience": 12,
                        "clinic": { "name": "City Care", "address": { "locality": null } },
                        "video_consult": "yes" }"#;

        let doctor: Doctor = serde_json::from_str(json).unwrap();
        assert_eq!(doctor.fees, "500");
        assert_eq!(doctor.experience, "12");
        assert_eq!(doctor.clinic_id(), "City Care");
        assert_eq!(doctor.clinic.address.locality, "");
        assert!(!doctor.video_consult);
    }

    // ── QueryParams ──────────────────────────────────────────────────────────

    #[test]
    fn query_params_set_replaces_in_place() {
        let mut params = QueryParams::new();
        params.set("search", "rao");
        params.set("sort", "fees");
        params.set("search", "iyer");

        let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["search", "sort"]);
        assert_eq!(params.get("search"), Some("iyer"));
    }

    #[test]
    fn query_params_empty_value_deletes() {
        let mut params = QueryParams::new();
        params.set("mode", "video");
        params.set("mode", "");

        assert!(params.is_empty());
        assert_eq!(params.get("mode"), None);
    }

    #[test]
    fn query_params_parse_decodes_and_strips_question_mark() {
        let params = QueryParams::parse("?symptom=back%20pain&sort=experience&mode=video");

        assert_eq!(params.get("symptom"), Some("back pain"));
        assert_eq!(params.sort(), Some(SortKey::Experience));
        assert_eq!(params.get("mode").and_then(ConsultMode::parse), Some(ConsultMode::Video));
    }

    #[test]
    fn query_params_parse_keeps_first_of_repeated_keys() {
        let params = QueryParams::parse("?sort=fees&mode=video&sort=experience");
        assert_eq!(params.sort(), Some(SortKey::Fees));
        assert_eq!(params.to_query_string(), "sort=fees&mode=video");

        let params = QueryParams::parse("sort=&sort=fees&mode=clinic");
        assert_eq!(params.sort(), None);
        assert_eq!(params.to_query_string(), "mode=clinic");
    }

    #[test]
    fn query_params_query_string_encodes_values() {
        let mut params = QueryParams::new();
        params.set("clinic", "Sunrise & Co");
        params.set("specialties", "Dentist,Dermatologist");

        let qs = params.to_query_string();
        assert_eq!(qs, "clinic=Sunrise+%26+Co&specialties=Dentist%2CDermatologist");
        assert_eq!(QueryParams::parse(&qs), params);
        assert_eq!(params.to_string(), format!("?{qs}"));
    }

    #[test]
    fn query_params_specialties_skips_empty_segments() {
        let params = QueryParams::parse("specialties=Dentist,,Cardiologist,");
        assert_eq!(params.specialties(), vec!["Dentist", "Cardiologist"]);
        assert!(QueryParams::new().specialties().is_empty());
    }

    #[test]
    fn sort_key_rejects_unknown_values() {
        assert_eq!(SortKey::parse("fees"), Some(SortKey::Fees));
        assert_eq!(SortKey::parse("rating"), None);
        assert_eq!(QueryParams::parse("sort=rating").sort(), None);
    }

    // ── SuggestionSet ────────────────────────────────────────────────────────

    #[test]
    fn suggestion_set_flattens_in_display_order() {
        let set = SuggestionSet {
            symptoms: vec!["Headache".into()],
            doctors: vec!["Dr. Head".into()],
            specialists: vec![],
            clinics: vec!["Head Start Clinic".into()],
        };

        let flat = set.flatten();
        assert_eq!(set.len(), 3);
        assert_eq!(flat[0].category, SearchCategory::Symptoms);
        assert_eq!(flat[1].category, SearchCategory::Doctors);
        assert_eq!(flat[2].category, SearchCategory::Clinics);
        assert_eq!(flat[2].label, "Head Start Clinic");
        assert!(SuggestionSet::default().is_empty());
    }

    // ── DirectoryConfig ──────────────────────────────────────────────────────

    #[test]
    fn config_empty_document_yields_defaults() {
        let cfg = DirectoryConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, DirectoryConfig::default());
        assert_eq!(cfg.debounce_ms, 300);
        assert_eq!(cfg.suggestion_cap, 3);
        assert_eq!(cfg.symptom_max_list, 5);
    }

    #[test]
    fn config_overrides_selected_keys() {
        let cfg = DirectoryConfig::from_toml_str(
            r#"
            doctors_url = "http://localhost:9000/doctors.json"
            debounce_ms = 50
            mapping_path = "custom.toml"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.doctors_url, "http://localhost:9000/doctors.json");
        assert_eq!(cfg.debounce_ms, 50);
        assert_eq!(cfg.mapping_path.as_deref(), Some(std::path::Path::new("custom.toml")));
        assert_eq!(cfg.symptoms_url, config::DEFAULT_SYMPTOMS_URL);
    }

    #[test]
    fn config_parse_error_is_config_error() {
        match DirectoryConfig::from_toml_str("debounce_ms = \"soon\"") {
            Err(DirectoryError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse config TOML"), "got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── DirectoryError display messages ──────────────────────────────────────

    #[test]
    fn error_fetch_display() {
        let err = DirectoryError::Fetch {
            url: "https://example.org/doctors.json".to_string(),
            reason: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("example.org/doctors.json"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn error_decode_display() {
        let err = DirectoryError::Decode {
            reason: "expected array".to_string(),
        };
        assert!(err.to_string().contains("could not decode response"));
    }
}
