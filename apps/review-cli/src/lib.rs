//! Command-line review of ADGM document uploads
//!
//! The binary wires the engine to the filesystem; this library holds the
//! pieces worth testing on their own: report output and the archive bundle.

pub mod bundle;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

/// Report file written into the output directory
pub const REPORT_FILE_NAME: &str = "review_report.json";

/// Write `value` as pretty JSON to `{output_dir}/review_report.json`
pub fn write_report<T: Serialize>(output_dir: &Path, value: &T) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    let path = output_dir.join(REPORT_FILE_NAME);
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}
