//! # docdir-remote
//!
//! Implementations of the `DoctorSource` and `SymptomSource` traits.
//!
//! - [`http`] — reqwest clients for the remote doctor feed and the
//!   clinical-tables symptom search.
//! - [`fixtures`] — hardcoded, fictional data for offline runs and tests.
//! - [`sources`] — chooses between the two for the front-ends.

pub mod fixtures;
pub mod http;
pub mod sources;

pub use fixtures::{StaticDoctorSource, StaticSymptomSource};
pub use http::{HttpDoctorSource, HttpSymptomSource};
pub use sources::Sources;

#[cfg(test)]
mod tests {
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use serde_json::json;

    use docdir_contracts::{config::DirectoryConfig, error::DirectoryError};
    use docdir_core::traits::{DoctorSource, SymptomSource};

    use crate::{
        fixtures::{sample_doctors, StaticSymptomSource},
        http::{build_client, parse_symptom_response, HttpDoctorSource, HttpSymptomSource},
        sources::Sources,
    };

    fn client() -> reqwest::Client {
        build_client(&DirectoryConfig::default()).unwrap()
    }

    // ── Doctor feed ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn doctor_feed_happy_path() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/doctors.json")).respond_with(
                json_encoded(json!([
                    {
                        "id": "1",
                        "name": "Dr. Test",
                        "specialities": [{ "name": "Dentist" }],
                        "fees": "₹ 400",
                        "experience": "8 Years of experience",
                        "clinic": { "name": "Test Clinic", "address": { "locality": "Here" } },
                        "video_consult": true,
                        "in_clinic": false
                    }
                ])),
            ),
        );

        let source = HttpDoctorSource::new(server.url_str("/doctors.json"), client());
        let doctors = source.fetch_doctors().await.unwrap();

        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].name, "Dr. Test");
        assert!(doctors[0].has_speciality("Dentist"));
    }

    #[tokio::test]
    async fn doctor_feed_server_error_is_fetch_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/doctors.json"))
                .respond_with(status_code(503).body("down")),
        );

        let source = HttpDoctorSource::new(server.url_str("/doctors.json"), client());
        match source.fetch_doctors().await {
            Err(DirectoryError::Fetch { url, reason }) => {
                assert!(url.ends_with("/doctors.json"));
                assert!(reason.contains("503"), "unexpected reason: {reason}");
            }
            other => panic!("expected Fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn doctor_feed_bad_body_is_decode_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/doctors.json"))
                .respond_with(json_encoded(json!({ "doctors": [] }))),
        );

        let source = HttpDoctorSource::new(server.url_str("/doctors.json"), client());
        assert!(matches!(
            source.fetch_doctors().await,
            Err(DirectoryError::Decode { .. })
        ));
    }

    // ── Symptom search ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn symptom_search_sends_terms_and_max_list() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/search"),
                request::query(url_decoded(contains(("terms", "head ache")))),
                request::query(url_decoded(contains(("maxList", "5")))),
            ])
            .respond_with(json_encoded(json!([
                2,
                ["1", "2"],
                null,
                [["Headache"], ["Tension headache"]]
            ]))),
        );

        let source = HttpSymptomSource::new(server.url_str("/search"), 5, client());
        let terms = source.search_symptoms("head ache").await.unwrap();
        assert_eq!(terms, vec!["Headache", "Tension headache"]);
    }

    #[tokio::test]
    async fn symptom_search_empty_query_makes_no_request() {
        // No expectations registered: any request would fail the server's
        // verification when it is dropped.
        let server = Server::run();
        let source = HttpSymptomSource::new(server.url_str("/search"), 5, client());
        assert!(source.search_symptoms("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn symptom_search_server_error_is_fetch_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/search"))
                .respond_with(status_code(500)),
        );

        let source = HttpSymptomSource::new(server.url_str("/search"), 5, client());
        assert!(matches!(
            source.search_symptoms("cough").await,
            Err(DirectoryError::Fetch { .. })
        ));
    }

    // ── Response parsing ─────────────────────────────────────────────────────

    #[test]
    fn parse_accepts_boolean_flag_and_plain_strings() {
        let body = json!([true, [], null, ["Fever", "Fever with chills"]]);
        assert_eq!(parse_symptom_response(&body).unwrap(), vec!["Fever", "Fever with chills"]);
    }

    #[test]
    fn parse_non_success_is_empty() {
        assert!(parse_symptom_response(&json!([false, [], null, ["Fever"]])).unwrap().is_empty());
        assert!(parse_symptom_response(&json!([0, [], null, []])).unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_non_array_body() {
        assert!(matches!(
            parse_symptom_response(&json!({ "error": "bad" })),
            Err(DirectoryError::Decode { .. })
        ));
        assert!(matches!(
            parse_symptom_response(&json!([1, []])),
            Err(DirectoryError::Decode { .. })
        ));
    }

    // ── Fixtures ─────────────────────────────────────────────────────────────

    #[test]
    fn sample_doctors_parse() {
        let doctors = sample_doctors().unwrap();
        assert_eq!(doctors.len(), 8);
        assert!(doctors.iter().all(|d| !d.specialities.is_empty()));
    }

    #[tokio::test]
    async fn static_symptom_source_caps_results() {
        let source = StaticSymptomSource::sample(2);
        let terms = source.search_symptoms("HEADACHE").await.unwrap();
        assert_eq!(terms, vec!["Headache", "Migraine headache"]);
        assert!(source.search_symptoms("").await.unwrap().is_empty());
    }

    // ── Source selection ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn offline_sources_serve_fixtures() {
        let sources = Sources::from_config(&DirectoryConfig::default(), true).unwrap();
        assert_eq!(sources.doctors.fetch_doctors().await.unwrap().len(), 8);
        assert_eq!(
            sources.symptoms.search_symptoms("fever").await.unwrap(),
            vec!["Fever"]
        );
    }

    #[tokio::test]
    async fn online_sources_use_configured_urls() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/feed.json"))
                .respond_with(json_encoded(json!([]))),
        );

        let cfg = DirectoryConfig {
            doctors_url: server.url_str("/feed.json"),
            ..DirectoryConfig::default()
        };
        let sources = Sources::from_config(&cfg, false).unwrap();
        assert!(sources.doctors.fetch_doctors().await.unwrap().is_empty());
    }
}
