//! Configuration for citation lookup
//!
//! Controls where reference texts are loaded from and how confident an index
//! match must be before it is preferred over the static rules.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default directory scanned for `*.txt` reference files
pub const DEFAULT_REFS_DIR: &str = "legal_refs";

/// Index matches below this normalized confidence fall back to the default rule
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.08;

/// Characters of a reference text quoted in a citation
pub const DEFAULT_EXCERPT_CHARS: usize = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationConfig {
    /// Directory holding reference texts
    pub refs_dir: PathBuf,
    /// Minimum normalized confidence for an index match
    pub min_confidence: f32,
    /// Length of the quoted excerpt
    pub excerpt_chars: usize,
}

impl Default for CitationConfig {
    fn default() -> Self {
        Self {
            refs_dir: PathBuf::from(DEFAULT_REFS_DIR),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl CitationConfig {
    /// Configuration reading references from `dir`
    pub fn with_refs_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            refs_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Expected variables:
    /// - ADGM_REFS_DIR: reference directory (default: "legal_refs")
    /// - ADGM_MIN_CONFIDENCE: float in [0, 1] (default: 0.08)
    /// - ADGM_EXCERPT_CHARS: excerpt length (default: 600)
    pub fn from_env() -> Result<Self> {
        let refs_dir = std::env::var("ADGM_REFS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_REFS_DIR));

        let min_confidence = match std::env::var("ADGM_MIN_CONFIDENCE") {
            Ok(raw) => {
                let value: f32 = raw
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid ADGM_MIN_CONFIDENCE: {}", raw))?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(anyhow!("ADGM_MIN_CONFIDENCE must be within [0, 1]: {}", raw));
                }
                value
            }
            Err(_) => DEFAULT_MIN_CONFIDENCE,
        };

        let excerpt_chars = match std::env::var("ADGM_EXCERPT_CHARS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid ADGM_EXCERPT_CHARS: {}", raw))?,
            Err(_) => DEFAULT_EXCERPT_CHARS,
        };

        Ok(Self {
            refs_dir,
            min_confidence,
            excerpt_chars,
        })
    }
}
