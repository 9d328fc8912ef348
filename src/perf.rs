//! Tick timing and profiling instrumentation.
//!
//! `TickMonitor` keeps rolling averages of the graphics and physics ticks
//! and warns about ticks that blow their budget. The `profile_scope!` and
//! `profile_function!` macros time hot paths (ray picking, drag dispatch,
//! ticks) and compile to nothing unless the `profiling` feature is on:
//!
//! ```ignore
//! fn pick() {
//!     profile_function!();
//!     {
//!         profile_scope!("ray_trace");
//!         // ...
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, warn};

/// Budget of one graphics tick at 60 Hz.
pub const TARGET_TICK_MS: f64 = 16.67;

/// Samples kept for rolling averages
const SAMPLE_COUNT: usize = 60;

/// A tick slower than this multiple of the target is reported
const WARN_THRESHOLD: f64 = 2.0;

// ============================================================================
// Profiling Macros
// ============================================================================

/// Time the enclosing scope under `name`. Compiles away without the
/// `profiling` feature.
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

/// Time the enclosing function.
#[macro_export]
macro_rules! profile_function {
    () => {
        $crate::profile_scope!($crate::function_name!());
    };
}

/// Path of the enclosing function.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        &name[..name.len() - 3]
    }};
}

pub use profile_function;
pub use profile_scope;

// ============================================================================
// Tick Monitor
// ============================================================================

/// Which simulation a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Graphics,
    Physics,
}

#[derive(Debug, Default)]
struct TickSeries {
    samples: VecDeque<f64>,
    started: Option<Instant>,
    slow: u64,
    total: u64,
}

impl TickSeries {
    fn push(&mut self, ms: f64) {
        if self.samples.len() >= SAMPLE_COUNT {
            self.samples.pop_front();
        }
        self.samples.push_back(ms);
        self.total += 1;
    }

    fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    fn max(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }
}

/// Rolling tick statistics for the simulation loop.
#[derive(Debug, Default)]
pub struct TickMonitor {
    graphics: TickSeries,
    physics: TickSeries,
}

impl TickMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    fn series(&self, kind: TickKind) -> &TickSeries {
        match kind {
            TickKind::Graphics => &self.graphics,
            TickKind::Physics => &self.physics,
        }
    }

    fn series_mut(&mut self, kind: TickKind) -> &mut TickSeries {
        match kind {
            TickKind::Graphics => &mut self.graphics,
            TickKind::Physics => &mut self.physics,
        }
    }

    pub fn begin_tick(&mut self, kind: TickKind) {
        self.series_mut(kind).started = Some(Instant::now());
    }

    /// Close the tick opened by `begin_tick`. Returns its length in ms, or
    /// `None` if no tick was open.
    pub fn end_tick(&mut self, kind: TickKind) -> Option<f64> {
        let start = self.series_mut(kind).started.take()?;
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        self.record(kind, ms);
        Some(ms)
    }

    /// Record a tick measured elsewhere.
    pub fn record(&mut self, kind: TickKind, ms: f64) {
        let series = self.series_mut(kind);
        series.push(ms);
        if ms > TARGET_TICK_MS * WARN_THRESHOLD {
            series.slow += 1;
            warn!(
                ?kind,
                tick_ms = format!("{:.2}", ms),
                target_ms = format!("{:.2}", TARGET_TICK_MS),
                "Slow tick"
            );
        }
    }

    pub fn average_tick_time(&self, kind: TickKind) -> f64 {
        self.series(kind).average()
    }

    pub fn max_tick_time(&self, kind: TickKind) -> f64 {
        self.series(kind).max()
    }

    pub fn tick_count(&self, kind: TickKind) -> u64 {
        self.series(kind).total
    }

    pub fn slow_tick_percentage(&self, kind: TickKind) -> f64 {
        let series = self.series(kind);
        if series.total == 0 {
            return 0.0;
        }
        series.slow as f64 / series.total as f64 * 100.0
    }

    /// Graphics ticks per second implied by the average tick time.
    pub fn estimated_rate(&self) -> f64 {
        let avg = self.graphics.average();
        if avg <= 0.0 {
            return 0.0;
        }
        1000.0 / avg
    }

    /// Summarise the graphics tick if it runs over budget.
    pub fn log_summary_if_slow(&self) {
        let avg = self.graphics.average();
        if avg > TARGET_TICK_MS {
            warn!(
                avg_tick_ms = format!("{:.2}", avg),
                max_tick_ms = format!("{:.2}", self.graphics.max()),
                slow_percentage = format!("{:.1}%", self.slow_tick_percentage(TickKind::Graphics)),
                physics_avg_ms = format!("{:.2}", self.physics.average()),
                "Simulation below target rate"
            );
        } else {
            debug!(avg_tick_ms = format!("{:.2}", avg), "tick timing nominal");
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// Logs a warning on drop if the scope ran longer than its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer with a 1ms threshold, used by `profile_scope!`.
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
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        }
    }
}

/// Run `f` and return its result with the elapsed time in ms.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}
