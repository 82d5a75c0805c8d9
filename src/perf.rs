//! Performance instrumentation for the interaction hot paths.
//!
//! Pointer moves arrive at display rate and each one runs the full filter
//! pipeline, so these paths carry timing hooks:
//!
//! - **Scoped timers**: RAII timing for a block, logged when over a threshold
//! - **Operation statistics**: rolling average and p95 per operation
//! - **Conditional compilation**: `profile_scope!` compiles to nothing unless
//!   the `profiling` feature is on
//!
//! ## Usage
//!
//! ```ignore
//! use crate::profile_scope;
//!
//! fn pointer_move(&mut self) {
//!     profile_scope!("pointer_move");
//!     // ...
//! }
//! ```

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::warn;

// ============================================================================
// Constants
// ============================================================================

/// Frame budget at 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Number of samples kept per operation
const STATS_SAMPLE_COUNT: usize = 100;

/// Global flag to enable/disable profiling at runtime
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Runtime Profiling Control
// ============================================================================

/// Enable or disable profiling at runtime.
/// Only affects code compiled with the `profiling` feature.
pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

// ============================================================================
// Operation Statistics
// ============================================================================

/// Rolling timing statistics for one operation.
///
/// `average` and `p95` cover the last `STATS_SAMPLE_COUNT` samples; `count`,
/// `min_ms` and `max_ms` cover every sample since the last reset.
#[derive(Debug, Clone, Default)]
pub struct OperationStats {
    window: VecDeque<f64>,
    window_total: f64,
    count: u64,
    extremes: Option<(f64, f64)>,
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        if self.window.len() == STATS_SAMPLE_COUNT {
            self.window_total -= self.window.pop_front().unwrap_or_default();
        }
        self.window.push_back(ms);
        self.window_total += ms;
        self.count += 1;
        self.extremes = Some(match self.extremes {
            Some((lo, hi)) => (lo.min(ms), hi.max(ms)),
            None => (ms, ms),
        });
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max_ms(&self) -> f64 {
        self.extremes.map_or(0.0, |(_, hi)| hi)
    }

    pub fn min_ms(&self) -> f64 {
        self.extremes.map_or(0.0, |(lo, _)| lo)
    }

    pub fn average(&self) -> f64 {
        match self.window.len() {
            0 => 0.0,
            n => self.window_total / n as f64,
        }
    }

    /// 95th percentile of the window (nearest rank, rounded down).
    pub fn p95(&self) -> f64 {
        let mut sorted: Vec<f64> = self.window.iter().copied().collect();
        sorted.sort_by(f64::total_cmp);
        let rank = (sorted.len() * 95) / 100;
        sorted
            .get(rank)
            .or_else(|| sorted.last())
            .copied()
            .unwrap_or_default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that logs its duration on drop when over the threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

// Thread-local depth tracking for nested scopes
#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Timer with the frame budget as threshold.
    pub fn with_default_threshold(name: &'static str) -> Self {
        Self::new(name, TARGET_FRAME_MS)
    }

    /// Timer for profiling builds (1ms threshold).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            if is_profiling_enabled() && elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        log_if_slow(self.name, elapsed_ms, self.threshold_ms);
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Run `f` and return its result with the elapsed time, using `clock`
/// (milliseconds) as the time source.
///
/// The engine passes [`Surface::now`](crate::Surface::now) so timing works on
/// hosts without a native monotonic clock.
#[inline]
pub fn measure<T>(clock: impl Fn() -> f64, f: impl FnOnce() -> T) -> (T, f64) {
    let start = clock();
    let result = f();
    (result, (clock() - start).max(0.0))
}

/// Warn when `elapsed_ms` exceeds the threshold.
#[inline]
pub fn log_if_slow(name: &str, elapsed_ms: f64, threshold_ms: f64) {
    if elapsed_ms > threshold_ms {
        warn!(operation = name, elapsed_ms, threshold_ms, "slow operation");
    }
}
