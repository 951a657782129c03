//! SPONGE-web API client.
//!
//! Every query goes through `SpongeClient::run`: validate parameters,
//! add the schema version, one GET, classify the status, decode.

use sponge_common::{ClientConfig, HttpTransport, Result, Transport};
use tracing::{debug, instrument};

use crate::query::{DbVersion, Query};

pub const VERSION_PARAM: &str = "sponge_db_version";

pub struct SpongeClient {
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl SpongeClient {
    /// Client over HTTP with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Client configured from sponge.toml / SPONGE_API_* variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::load()?)
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Box::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute one query.
    #[instrument(skip(self, query), fields(endpoint = query.path()))]
    pub fn run<Q: Query>(&self, query: &Q) -> Result<Q::Output> {
        let mut params = query.params()?;
        match query.db_version() {
            DbVersion::Unversioned => {}
            DbVersion::Configured => params.set(VERSION_PARAM, self.config.api_version.to_string()),
            DbVersion::Pinned(v) => params.set(VERSION_PARAM, v.to_string()),
        }

        let url = self.config.endpoint_url(query.path());
        debug!(url = %url, params = params.len(), "Querying SPONGE API");

        let response = self
            .transport
            .get(&url, &self.config.headers, params.as_pairs())?;
        let body = response.into_json(query.path())?;
        query.decode(body)
    }
}

impl std::fmt::Debug for SpongeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpongeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
