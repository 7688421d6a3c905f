//! Bar sources: synthetic generation and file import.
//!
//! These sit outside the analysis pipeline; they produce the `Vec<Bar>` the
//! pipeline consumes.

pub mod file;
pub mod provider;
pub mod synthetic;

pub use file::{parse_csv, parse_json, write_csv, FileFormat, FileSource};
pub use provider::{validate_bars, BarSource, DataError};
pub use synthetic::SyntheticSource;
