//! Display model for one doctor card.
//!
//! Both front-ends render from this so the fallbacks for missing fields are
//! decided in one place.

use docdir_contracts::doctor::Doctor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCard {
    /// Shown instead of a photo: first letter of the name, or `D`.
    pub avatar: String,
    pub photo: Option<String>,
    pub name: String,
    pub specialty: String,
    pub clinic: Option<String>,
    pub locality: Option<String>,
    pub experience: String,
    pub fee: String,
    pub video_consult: bool,
    pub in_clinic: bool,
}

impl DoctorCard {
    pub fn from_doctor(doctor: &Doctor) -> Self {
        let name = doctor.name.trim();
        let avatar = name.chars().next().map(String::from).unwrap_or_else(|| "D".to_string());

        let years = doctor
            .experience
            .split(' ')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("0");

        Self {
            avatar,
            photo: doctor.photo.clone().filter(|p| !p.is_empty()),
            name: if name.is_empty() {
                "Doctor Name Not Available".to_string()
            } else {
                name.to_string()
            },
            specialty: doctor
                .specialities
                .first()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Specialty Not Listed".to_string()),
            clinic: non_empty(&doctor.clinic.name),
            locality: non_empty(&doctor.clinic.address.locality),
            experience: format!("{years} yrs exp."),
            fee: non_empty(&doctor.fees).unwrap_or_else(|| "₹0".to_string()),
            video_consult: doctor.video_consult,
            in_clinic: doctor.in_clinic,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
