//! Boundary search for discrete step functions of time.
//!
//! Sign ingress, tithi and nakshatra ends are all discontinuities of a
//! piecewise-constant function of the Julian Day. [`find_transition`] bisects a
//! bracket known to contain at most one of them.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Precision and termination bound of [`find_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Bracket width at which bisection stops, in days.
    pub tolerance_days: f64,
    /// Hard cap on bisection steps, independent of the tolerance.
    pub max_iterations: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            // ~8.6 seconds
            tolerance_days: 1e-4,
            max_iterations: 50,
        }
    }
}

impl SearchConfig {
    pub fn new(tolerance_days: f64, max_iterations: u32) -> Self {
        Self { tolerance_days, max_iterations }
    }

    pub fn with_tolerance(mut self, tolerance_days: f64) -> Self {
        self.tolerance_days = tolerance_days;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Locates the jump of `f` inside `[lo, hi]`.
///
/// Returns `Ok(None)` when `f(lo) == f(hi)`: the bracket is taken to be
/// transition-free and the caller must shift or widen it. Otherwise returns
/// the midpoint of the final bracket, which lies within
/// `config.tolerance_days` of the discontinuity unless the iteration cap was
/// hit first.
///
/// Errors from `f` propagate unchanged.
pub fn find_transition<T, E, F>(mut f: F, lo: f64, hi: f64, config: &SearchConfig) -> Result<Option<f64>, E>
where
    T: PartialEq,
    F: FnMut(f64) -> Result<T, E>,
{
    let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let at_lo = f(lo)?;
    if at_lo == f(hi)? {
        return Ok(None);
    }

    let mut iterations = 0;
    while hi - lo > config.tolerance_days && iterations < config.max_iterations {
        let mid = (lo + hi) / 2.0;
        if f(mid)? == at_lo {
            lo = mid;
        } else {
            hi = mid;
        }
        iterations += 1;
    }
    trace!(lo, hi, iterations, "bisection finished");

    Ok(Some((lo + hi) / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_at(boundary: f64) -> impl FnMut(f64) -> Result<u8, ()> {
        move |jd| Ok(if jd < boundary { 0 } else { 1 })
    }

    #[test]
    fn test_finds_boundary_within_tolerance() {
        let cfg = SearchConfig::default();
        let boundary = 2460779.123456;
        let found = find_transition(step_at(boundary), boundary - 0.7, boundary + 0.3, &cfg)
            .unwrap()
            .unwrap();
        assert!((found - boundary).abs() <= cfg.tolerance_days, "found {found}, expected {boundary}");
    }

    #[test]
    fn test_no_transition_returns_none() {
        let result = find_transition(|_| Ok::<_, ()>(7u8), 0.0, 1.0, &SearchConfig::default()).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_iteration_cap_terminates() {
        // A tolerance of zero is never reached; the cap ends the loop.
        let cfg = SearchConfig::new(0.0, 10);
        let mut calls = 0;
        let found = find_transition(
            |jd| {
                calls += 1;
                Ok::<_, ()>(jd >= 0.3)
            },
            0.0,
            1.0,
            &cfg,
        )
        .unwrap();
        assert!(found.is_some());
        // two endpoint evaluations plus one per iteration
        assert_eq!(calls, 12);
    }

    #[test]
    fn test_errors_propagate() {
        let result = find_transition(|_| Err::<u8, _>("ephemeris down"), 0.0, 1.0, &SearchConfig::default());
        assert_eq!(result, Err("ephemeris down"));
    }

    #[test]
    fn test_reversed_bracket() {
        let cfg = SearchConfig::default();
        let found = find_transition(step_at(0.25), 1.0, 0.0, &cfg).unwrap().unwrap();
        assert!((found - 0.25).abs() <= cfg.tolerance_days);
    }
}
