use serde_json::Value;
use sponge_common::{FlatTable, Result};

use crate::params::QueryParams;
use crate::query::{decode_table, DbVersion, Query};

/// `getOverallCounts`: shared miRNAs and significant/insignificant
/// interaction counts per dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverallCounts {
    pub sponge_db_version: Option<u32>,
}

impl OverallCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.sponge_db_version = Some(version);
        self
    }
}

impl Query for OverallCounts {
    type Output = FlatTable;

    fn path(&self) -> &'static str {
        "getOverallCounts"
    }

    fn params(&self) -> Result<QueryParams> {
        Ok(QueryParams::new())
    }

    fn db_version(&self) -> DbVersion {
        DbVersion::from_override(self.sponge_db_version)
    }

    fn decode(&self, body: Value) -> Result<FlatTable> {
        decode_table(body)
    }
}
