use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::core::host::CsvSource;
use crate::core::timeline::TimelineDocument;

pub fn load_timeline<P: AsRef<Path>>(path: P) -> Result<TimelineDocument>
{
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read timeline {}", path.display()))?;

    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse timeline {}", path.display()))
}

/// Write `doc` as pretty JSON, replacing `path` atomically
pub fn save_timeline<P: AsRef<Path>>(
    doc: &TimelineDocument,
    path: P,
) -> Result<()>
{
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    // Stage next to the target so the rename stays on one filesystem
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;

    serde_json::to_writer_pretty(&mut tmp, doc).context("Failed to serialize timeline")?;
    tmp.write_all(b"\n")
        .context("Failed to write timeline")?;

    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

/// CSV chooser backed by a path given up front
#[derive(Debug, Clone)]
pub struct PathCsvSource
{
    path: PathBuf,
}

impl PathCsvSource
{
    pub fn new(path: impl Into<PathBuf>) -> Self
    {
        Self { path: path.into() }
    }
}

impl CsvSource for PathCsvSource
{
    fn open_csv(&mut self) -> std::io::Result<Option<String>>
    {
        let text = fs::read_to_string(&self.path)?;

        // Spreadsheet exports often lead with a BOM
        let text = match text.strip_prefix('\u{feff}')
        {
            Some(rest) => rest.to_string(),
            None => text,
        };

        Ok(Some(text))
    }
}
