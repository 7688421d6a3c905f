//! Bar source trait and structured error types.
//!
//! The `BarSource` trait abstracts over where bars come from (synthetic
//! generation, CSV or JSON files) so the CLI can swap implementations and
//! tests can supply fixed series. The pipeline itself never loads data.

use thiserror::Error;

use crate::domain::Bar;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file format '{0}' (expected .csv or .json)")]
    UnsupportedFormat(String),

    #[error("no bars in source")]
    Empty,

    #[error("bar {index} is not after bar {} (time {time})", .index - 1)]
    OutOfOrder { index: usize, time: i64 },
}

/// Trait for bar sources.
pub trait BarSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Load bars for a symbol, oldest first.
    fn load(&self, symbol: &str) -> Result<Vec<Bar>, DataError>;
}

/// Check a bar series is non-empty with strictly increasing timestamps.
pub fn validate_bars(bars: &[Bar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::Empty);
    }
    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].time <= pair[0].time {
            return Err(DataError::OutOfOrder {
                index: i + 1,
                time: pair[1].time,
            });
        }
    }
    Ok(())
}
