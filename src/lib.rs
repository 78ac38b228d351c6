//! Source adapters normalizing third-party manga catalogs into one canonical
//! schema.

pub mod chapters;
pub mod config;
pub mod error;
pub mod helpers;
pub mod http_client;
pub mod models;
pub mod pagination;
pub mod sources;
pub mod taxonomy;

pub use error::{Result, SourceError};
pub use sources::{Source, SourceRegistry};
