pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use crate::config::CatalogConfig;
pub use crate::error::{PipelineStep, ProcessingError, Result};
pub use crate::processors::{CatalogNormalizer, Catalogs, NormalizationReport};
