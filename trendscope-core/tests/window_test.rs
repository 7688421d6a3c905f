//! Trailing-window locality tests.
//!
//! Invariant: every stage reads a bounded tail of the series. RSI uses the
//! last 15 closes, the pattern the last 2 bars, the EMAs the last 26 closes
//! and the slope the last 12. So the full report over a long history must be
//! identical to the report over just its last 26 bars, and any change before
//! that tail must not move the result.

use trendscope_core::{run_analysis, run_pipeline, Bar};

/// Longest tail any stage reads.
const TAIL: usize = 26;

/// Generate N bars of synthetic OHLCV data with realistic variation.
fn make_test_bars(n: usize) -> Vec<Bar> {
    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price += change;
        price = f64::max(price, 10.0); // floor at 10

        let open = price - 0.5;
        let close = price + 0.3;
        bars.push(Bar {
            time: 1_704_153_600 + i as i64 * 86_400,
            open,
            high: open.max(close) + 2.0,
            low: open.min(close) - 2.0,
            close,
            volume: Some(1000.0 + i as f64 * 100.0),
        });
    }

    bars
}

#[test]
fn report_depends_only_on_trailing_window() {
    let bars = make_test_bars(200);
    let full = run_analysis(&bars);
    let tail = run_analysis(&bars[bars.len() - TAIL..]);
    assert_eq!(full, tail);
}

#[test]
fn narrative_depends_only_on_trailing_window() {
    let bars = make_test_bars(120);
    let (_, full) = run_pipeline(&bars);
    let (_, tail) = run_pipeline(&bars[bars.len() - TAIL..]);
    assert_eq!(full, tail);
}

#[test]
fn rewriting_old_history_changes_nothing() {
    let bars = make_test_bars(100);
    let mut rewritten = bars.clone();
    for bar in rewritten.iter_mut().take(100 - TAIL) {
        bar.open *= 3.0;
        bar.close *= 0.25;
        bar.high = bar.open.max(bar.close);
        bar.low = bar.open.min(bar.close);
    }
    assert_eq!(run_analysis(&bars), run_analysis(&rewritten));
}

#[test]
fn the_latest_bar_matters() {
    let bars = make_test_bars(60);
    let mut bumped = bars.clone();
    if let Some(last) = bumped.last_mut() {
        last.close *= 1.5;
        last.high = last.high.max(last.close);
    }
    assert_ne!(run_analysis(&bars), run_analysis(&bumped));
}
