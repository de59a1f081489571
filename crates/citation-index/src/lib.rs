//! Citation Index - legal references for review findings
//!
//! This crate provides:
//! - Static ADGM rule tables keyed by topic and document label
//! - Reference text loading from a directory of `*.txt` files
//! - An optional BM25 keyword index over those texts (`similarity` feature)
//! - The `CitationProvider` strategy and start-up selection

pub mod config;
pub mod document;
pub mod provider;
pub mod rules;
pub mod search;

use std::path::PathBuf;

use thiserror::Error;

// Re-export commonly used types
pub use config::CitationConfig;
pub use document::{load_reference_dir, ReferenceDocument};
pub use provider::{select_provider, Citation, CitationProvider, StaticRuleProvider};

#[cfg(feature = "similarity")]
pub use provider::IndexedProvider;

/// Errors raised while preparing a provider. Lookups themselves never fail.
#[derive(Debug, Error)]
pub enum CitationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No reference texts found in {0}")]
    NoReferences(PathBuf),

    #[error("Reference index error: {0}")]
    Index(String),
}
