//! Deterministic synthetic bars for demos and tests.
//!
//! A random walk seeded from the BLAKE3 hash of the symbol, so the same
//! symbol always yields the same series.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{BarSource, DataError};
use crate::domain::Bar;

/// Random-walk bar generator.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    pub bars: usize,
    pub interval_secs: i64,
    pub start_time: i64,
    pub start_price: f64,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self {
            bars: 120,
            interval_secs: 86_400,
            start_time: 1_704_153_600, // 2024-01-02T00:00:00Z
            start_price: 100.0,
        }
    }
}

impl SyntheticSource {
    pub fn with_bars(bars: usize) -> Self {
        Self {
            bars,
            ..Self::default()
        }
    }

    /// Generate the series for `symbol`.
    pub fn generate(&self, symbol: &str) -> Vec<Bar> {
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::with_capacity(self.bars);
        let mut price = self.start_price;

        for i in 0..self.bars {
            let daily_return: f64 = rng.gen_range(-0.03..0.03);
            let open = price;
            let close = price * (1.0 + daily_return);
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
            let volume = rng.gen_range(500_000.0..5_000_000.0_f64).round();

            bars.push(Bar {
                time: self.start_time + i as i64 * self.interval_secs,
                open,
                high,
                low,
                close,
                volume: Some(volume),
            });

            price = close;
        }

        bars
    }
}

impl BarSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn load(&self, symbol: &str) -> Result<Vec<Bar>, DataError> {
        if self.bars == 0 {
            return Err(DataError::Empty);
        }
        Ok(self.generate(symbol))
    }
}
