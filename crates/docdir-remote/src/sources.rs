//! Picks the live or offline implementation of each source.

use std::sync::Arc;

use tracing::info;

use docdir_contracts::{config::DirectoryConfig, error::DirectoryResult};
use docdir_core::traits::{DoctorSource, SymptomSource};

use crate::{
    fixtures::{StaticDoctorSource, StaticSymptomSource},
    http::{build_client, HttpDoctorSource, HttpSymptomSource},
};

/// The two sources a front-end needs, behind their traits.
#[derive(Clone)]
pub struct Sources {
    pub doctors: Arc<dyn DoctorSource>,
    pub symptoms: Arc<dyn SymptomSource>,
}

impl Sources {
    /// Build HTTP sources from `cfg`, or the built-in fixtures when `offline`.
    /// Both HTTP sources share one client.
    pub fn from_config(cfg: &DirectoryConfig, offline: bool) -> DirectoryResult<Self> {
        if offline {
            info!("using offline fixture sources");
            return Ok(Self {
                doctors: Arc::new(StaticDoctorSource::sample()?),
                symptoms: Arc::new(StaticSymptomSource::sample(cfg.symptom_max_list)),
            });
        }

        let client = build_client(cfg)?;
        info!(doctors_url = %cfg.doctors_url, symptoms_url = %cfg.symptoms_url, "using HTTP sources");
        Ok(Self {
            doctors: Arc::new(HttpDoctorSource::new(cfg.doctors_url.clone(), client.clone())),
            symptoms: Arc::new(HttpSymptomSource::new(
                cfg.symptoms_url.clone(),
                cfg.symptom_max_list,
                client,
            )),
        })
    }
}
