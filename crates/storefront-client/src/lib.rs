pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::CatalogClient;
pub use error::ClientError;
pub use types::{CategoryRecord, ErrorPayload};
