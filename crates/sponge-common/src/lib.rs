//! Shared errors, configuration, tables and HTTP transport
//! for the SPONGE-web client crates.

pub mod config;
pub mod error;
pub mod table;
pub mod transport;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{Result, SpongeError};
pub use table::FlatTable;
pub use transport::{ApiResponse, HttpTransport, MockTransport, Outcome, RecordedRequest, Transport};
