// src/search/time.rs
// Time budget computation and the in-search polling clock.
//
// `TimeManager::new` keeps the donor's simple fixed-budget/hard-deadline
// model (used by `go movetime`, perft, and tests). `TimeManager::from_clock`
// adds the skew-logistic move-importance allocator: time pressure follows a
// bell curve that peaks around move 40 and tapers off in both directions, so
// the engine spends a larger share of its clock in the middlegame than in a
// book-like opening or a simplified endgame.

use std::time::{Duration, Instant};

/// Ratio of the remaining clock the engine may use as a hard ceiling for one move.
const T_MAX_RATIO: f64 = 7.3;
/// Ratio of the increment the engine may "steal" into the hard ceiling.
const T_STEAL_RATIO: f64 = 0.34;

fn move_importance(ply: u32) -> f64 {
    let x = (ply as f64 - 64.5) / 6.85;
    (1.0 + x.exp()).powf(-0.171)
}

fn allocate(
    remaining: Duration,
    increment: Duration,
    ply: u32,
    max_ratio: f64,
    steal_ratio: f64,
) -> Duration {
    let importance = move_importance(ply);
    let remaining_ms = remaining.as_millis() as f64;
    let inc_ms = increment.as_millis() as f64;

    let budget = importance * (remaining_ms / max_ratio.max(1.0) + inc_ms * steal_ratio);
    let ceiling = remaining_ms.max(0.0);
    Duration::from_millis(budget.clamp(0.0, ceiling) as u64)
}

pub struct TimeManager {
    pub start_time: Instant,
    pub allotted: Option<Duration>,
    /// Soft budget: iterative deepening should not *start* a new depth once exceeded.
    pub optimum: Option<Duration>,
    /// Hard budget: in-search polling aborts once exceeded.
    pub maximum: Option<Duration>,
    pub stop_signal: bool,
}

impl TimeManager {
    /// A fixed hard deadline with no soft/optimum distinction (movetime, perft, tests).
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            start_time: Instant::now(),
            allotted: limit,
            optimum: limit,
            maximum: limit,
            stop_signal: false,
        }
    }

    /// Derive optimum/maximum budgets from a UCI `go wtime/winc`-style clock reading.
    pub fn from_clock(remaining: Duration, increment: Duration, ply: u32) -> Self {
        let optimum = allocate(remaining, increment, ply, 1.0, 0.0);
        let maximum = allocate(remaining, increment, ply, T_MAX_RATIO, T_STEAL_RATIO);
        Self {
            start_time: Instant::now(),
            allotted: Some(maximum),
            optimum: Some(optimum),
            maximum: Some(maximum),
            stop_signal: false,
        }
    }

    #[inline(always)]
    pub fn check_time(&mut self) {
        if self.stop_signal {
            return;
        }
        if let Some(limit) = self.maximum {
            if self.start_time.elapsed() >= limit {
                self.stop_signal = true;
            }
        }
    }

    /// True once the soft (optimum) budget for the current move has elapsed;
    /// iterative deepening should not begin another depth after this.
    #[inline(always)]
    pub fn past_optimum(&self) -> bool {
        match self.optimum {
            Some(limit) => self.start_time.elapsed() >= limit,
            None => false,
        }
    }

    #[inline(always)]
    pub fn allocated_time(&self) -> Option<Duration> {
        self.allotted
    }

    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_importance_peaks_near_ply_64() {
        let early = move_importance(1);
        let mid = move_importance(64);
        let late = move_importance(200);
        assert!(mid > early);
        assert!(mid > late);
    }

    #[test]
    fn maximum_never_exceeds_remaining_clock() {
        let remaining = Duration::from_millis(1000);
        let tm = TimeManager::from_clock(remaining, Duration::from_millis(0), 20);
        assert!(tm.maximum.unwrap() <= remaining);
    }

    #[test]
    fn optimum_is_never_larger_than_maximum() {
        let remaining = Duration::from_secs(60);
        let inc = Duration::from_millis(500);
        let tm = TimeManager::from_clock(remaining, inc, 40);
        assert!(tm.optimum.unwrap() <= tm.maximum.unwrap());
    }

    #[test]
    fn fixed_budget_has_no_soft_hard_distinction() {
        let tm = TimeManager::new(Some(Duration::from_millis(200)));
        assert_eq!(tm.optimum, tm.maximum);
    }

    #[test]
    fn check_time_sets_stop_signal_after_deadline() {
        let mut tm = TimeManager::new(Some(Duration::from_millis(0)));
        tm.check_time();
        assert!(tm.stop_signal);
    }
}
