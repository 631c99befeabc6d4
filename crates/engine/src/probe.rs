//! Wall-clock performance probe for pattern tuning.
//!
//! Advisory only: the result never affects validation or evaluation.
//! The fixed iteration count bounds worst-case latency; wrapping a call
//! in a deadline is the host's job.

use regex::RegexBuilder;
use serde::Serialize;
use std::time::Instant;

use crate::error::{EngineError, Result};

/// Repetitions per test string.
pub const PROBE_ITERATIONS: u32 = 1000;

/// Mean per-match latency and its coarse rating.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport {
    pub avg_time_ms: f64,
    pub rating: SpeedRating,
}

/// Coarse latency rating: `>1ms` slow, `>0.1ms` acceptable, else fast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedRating {
    Slow,
    Acceptable,
    Fast,
}

impl SpeedRating {
    fn from_avg_ms(avg_ms: f64) -> Self {
        if avg_ms > 1.0 {
            SpeedRating::Slow
        } else if avg_ms > 0.1 {
            SpeedRating::Acceptable
        } else {
            SpeedRating::Fast
        }
    }
}

/// Run `pattern` against each test string [`PROBE_ITERATIONS`] times and
/// report the mean per-match duration.
pub fn measure_pattern(pattern: &str, test_strings: &[String]) -> Result<ProbeReport> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| EngineError::Pattern(e.to_string()))?;

    let mut total_ms = 0.0;
    for s in test_strings {
        let start = Instant::now();
        for _ in 0..PROBE_ITERATIONS {
            re.is_match(s);
        }
        total_ms += start.elapsed().as_secs_f64() * 1000.0;
    }

    let runs = test_strings.len() as f64 * f64::from(PROBE_ITERATIONS);
    let avg_time_ms = if test_strings.is_empty() {
        0.0
    } else {
        total_ms / runs
    };

    Ok(ProbeReport {
        avg_time_ms,
        rating: SpeedRating::from_avg_ms(avg_time_ms),
    })
}
