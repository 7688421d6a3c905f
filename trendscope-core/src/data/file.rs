//! File import — bars from a CSV or JSON file.
//!
//! CSV needs a header row with `time,open,high,low,close` and optionally
//! `volume`; an empty volume cell reads as missing. JSON is an array of bar
//! objects with the same field names. Loaded series are validated for order.

use std::path::{Path, PathBuf};

use super::provider::{validate_bars, BarSource, DataError};
use crate::domain::Bar;

/// Supported file formats, picked by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(DataError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Bars read from a single file. The symbol passed to `load` is ignored.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BarSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self, _symbol: &str) -> Result<Vec<Bar>, DataError> {
        let format = FileFormat::from_path(&self.path)?;
        let content = std::fs::read_to_string(&self.path).map_err(|source| DataError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let bars = match format {
            FileFormat::Csv => parse_csv(&content)?,
            FileFormat::Json => parse_json(&content)?,
        };
        validate_bars(&bars)?;
        Ok(bars)
    }
}

/// Parse bars from CSV text with a header row.
pub fn parse_csv(content: &str) -> Result<Vec<Bar>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let bars = reader.deserialize().collect::<Result<Vec<Bar>, _>>()?;
    Ok(bars)
}

/// Parse bars from a JSON array.
pub fn parse_json(content: &str) -> Result<Vec<Bar>, DataError> {
    Ok(serde_json::from_str(content)?)
}

/// Serialize bars as CSV with a header row.
pub fn write_csv(bars: &[Bar]) -> Result<String, DataError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["time", "open", "high", "low", "close", "volume"])?;
    for b in bars {
        wtr.write_record([
            b.time.to_string(),
            b.open.to_string(),
            b.high.to_string(),
            b.low.to_string(),
            b.close.to_string(),
            b.volume.map(|v| v.to_string()).unwrap_or_default(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| DataError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
