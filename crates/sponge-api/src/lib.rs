//! Typed queries against the SPONGE-web ceRNA database.
//!
//! Each endpoint is a small descriptor implementing [`Query`]; a
//! [`SpongeClient`] runs it as one blocking GET and decodes the body into a
//! [`FlatTable`], [`NetworkResults`] or [`EnrichmentPlot`].
//!
//! # Example
//!
//! ```rust,no_run
//! use sponge_api::queries::{Comparison, DifferentialExpressionGene, NetworkResultsQuery};
//! use sponge_api::SpongeClient;
//!
//! fn main() -> sponge_common::Result<()> {
//!     let client = SpongeClient::from_env()?;
//!
//!     let query = DifferentialExpressionGene::new(
//!         Comparison::new("liver", "thymoma", "disease", "disease"),
//!     )
//!     .with_gene_symbols(["CYP2E1"]);
//!     let table = client.run(&query)?;
//!     println!("{} rows, columns {:?}", table.len(), table.columns());
//!
//!     let network = client.run(&NetworkResultsQuery::new("Breast invasive carcinoma"))?;
//!     println!("{} cancer types", network.cancer_type.scores.labels.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod enrichment;
pub mod network;
pub mod params;
pub mod queries;
pub mod query;

pub use client::SpongeClient;
pub use enrichment::{EnrichmentPlot, Raster};
pub use network::{DistanceTable, MdsPoint, NetworkBundle, NetworkResults, ScoreMatrix};
pub use params::{ElementLevel, GeneType, QueryParams};
pub use query::{DbVersion, Query};
pub use sponge_common::{ClientConfig, FlatTable, Result, SpongeError};
