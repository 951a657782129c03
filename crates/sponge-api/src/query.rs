//! The descriptor every endpoint implements.

use serde_json::Value;
use sponge_common::{FlatTable, Result};

use crate::params::QueryParams;

/// How a query carries `sponge_db_version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbVersion {
    /// The endpoint takes no version parameter.
    Unversioned,
    /// Send the client's configured default.
    Configured,
    /// Send this version.
    Pinned(u32),
}

impl DbVersion {
    pub fn from_override(version: Option<u32>) -> Self {
        version.map_or(DbVersion::Configured, DbVersion::Pinned)
    }
}

/// One SPONGE API endpoint: where it lives, what it sends, how its body decodes.
pub trait Query {
    type Output;

    /// Path relative to the API base URL.
    fn path(&self) -> &'static str;

    /// Build the outgoing parameters. All local validation happens here,
    /// so an error means nothing was sent.
    fn params(&self) -> Result<QueryParams>;

    fn db_version(&self) -> DbVersion {
        DbVersion::Unversioned
    }

    fn decode(&self, body: Value) -> Result<Self::Output>;
}

/// Decoder for the list-of-records endpoints.
pub fn decode_table(body: Value) -> Result<FlatTable> {
    FlatTable::from_json(&body)
}
