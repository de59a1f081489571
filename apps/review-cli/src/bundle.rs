//! Zip bundle of the reviewed documents

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// `reviewed_docs_{YYYYmmdd_HHMMSS}.zip`
pub fn bundle_name<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("reviewed_docs_{}.zip", at.format("%Y%m%d_%H%M%S"))
}

/// Zip every file into `output_dir`, each stored under its file name.
///
/// Files that no longer exist are skipped with a warning.
pub fn bundle_reviewed<Tz: TimeZone>(
    files: &[PathBuf],
    output_dir: &Path,
    at: &DateTime<Tz>,
) -> Result<PathBuf>
where
    Tz::Offset: std::fmt::Display,
{
    let path = output_dir.join(bundle_name(at));
    let archive = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(archive);

    let mut added = 0usize;
    for file in files {
        let Some(name) = file.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        let mut contents = Vec::new();
        match File::open(file).and_then(|mut f| f.read_to_end(&mut contents)) {
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "skipping file missing from bundle");
                continue;
            }
        }
        zip.start_file(name, options)?;
        zip.write_all(&contents)?;
        added += 1;
    }
    zip.finish()?;

    tracing::info!(path = %path.display(), files = added, "bundle written");
    Ok(path)
}
