//! Domain types for TrendScope

pub mod bar;

pub use bar::{closes, Bar};
