use serde_json::Value;
use sponge_common::Result;

use crate::network::NetworkResults;
use crate::params::{ElementLevel, QueryParams};
use crate::query::{DbVersion, Query};

/// Default disease: compare cancer types only.
pub const PAN_CANCER: &str = "Pan-cancer";

/// `networkResults`: similarity scores and MDS coordinates between the
/// network of a cancer type and the other type (or subtype) networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkResultsQuery {
    pub disease_name: String,
    pub level: ElementLevel,
    pub sponge_db_version: Option<u32>,
}

impl Default for NetworkResultsQuery {
    fn default() -> Self {
        Self {
            disease_name: PAN_CANCER.to_string(),
            level: ElementLevel::Gene,
            sponge_db_version: None,
        }
    }
}

impl NetworkResultsQuery {
    pub fn new(disease_name: impl Into<String>) -> Self {
        Self {
            disease_name: disease_name.into(),
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: ElementLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.sponge_db_version = Some(version);
        self
    }
}

impl Query for NetworkResultsQuery {
    type Output = NetworkResults;

    fn path(&self) -> &'static str {
        "networkResults"
    }

    fn params(&self) -> Result<QueryParams> {
        Ok(QueryParams::new()
            .with("disease_name", self.disease_name.as_str())
            .with("level", self.level.as_str()))
    }

    fn db_version(&self) -> DbVersion {
        DbVersion::from_override(self.sponge_db_version)
    }

    fn decode(&self, body: Value) -> Result<NetworkResults> {
        NetworkResults::from_json(&body)
    }
}
