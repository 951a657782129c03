//! Figures for SPONGE results.
//!
//! Everything renders to standalone SVG documents. Score matrices become
//! violet heatmaps (triangular by default), MDS coordinates become an
//! annotated scatter plot, and GSEA enrichment PNGs are embedded as-is.
//!
//! ```no_run
//! use sponge_api::{queries::NetworkResultsQuery, SpongeClient};
//!
//! # fn main() -> sponge_api::Result<()> {
//! let sponge = SpongeClient::from_env()?;
//! let results = sponge.run(&NetworkResultsQuery::default())?;
//! sponge_plot::plot_heatmap(&results.cancer_type.scores, "Cancer types", true)
//!     .save("types.svg")?;
//! sponge_plot::render_mds(&results.cancer_type.distances, sponge_plot::scatter::DEFAULT_TITLE)
//!     .save("types_mds.svg")?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod figure;
pub mod heatmap;
pub mod image;
pub mod scatter;

pub use color::{Gradient, VIOLET};
pub use figure::Figure;
pub use heatmap::{plot_heatmap, render_heatmap, render_heatmap_with, HeatmapGrid};
pub use image::enrichment_figure;
pub use scatter::render_mds;
