//! Unit tests for perf module.

use worldhost::perf::{ScopedTimer, TARGET_TICK_MS, TickKind, TickMonitor, measure};

#[test]
fn test_begin_end_tick() {
    let mut monitor = TickMonitor::new();
    monitor.begin_tick(TickKind::Graphics);
    let ms = monitor.end_tick(TickKind::Graphics);

    assert!(ms.is_some_and(|ms| ms >= 0.0));
    assert_eq!(monitor.tick_count(TickKind::Graphics), 1);
    assert_eq!(monitor.tick_count(TickKind::Physics), 0);
}

#[test]
fn test_end_without_begin() {
    let mut monitor = TickMonitor::new();
    assert_eq!(monitor.end_tick(TickKind::Physics), None);
    assert_eq!(monitor.tick_count(TickKind::Physics), 0);
}

#[test]
fn test_rolling_window_keeps_recent_samples() {
    let mut monitor = TickMonitor::new();
    for _ in 0..100 {
        monitor.record(TickKind::Graphics, 1.0);
    }
    for _ in 0..60 {
        monitor.record(TickKind::Graphics, 3.0);
    }
    assert_eq!(monitor.tick_count(TickKind::Graphics), 160);
    assert!((monitor.average_tick_time(TickKind::Graphics) - 3.0).abs() < 1e-9);
    assert!((monitor.max_tick_time(TickKind::Graphics) - 3.0).abs() < 1e-9);
}

#[test]
fn test_reset() {
    let mut monitor = TickMonitor::new();
    monitor.record(TickKind::Graphics, TARGET_TICK_MS * 4.0);
    monitor.reset();
    assert_eq!(monitor.tick_count(TickKind::Graphics), 0);
    assert_eq!(monitor.slow_tick_percentage(TickKind::Graphics), 0.0);
    assert_eq!(monitor.estimated_rate(), 0.0);
}

#[test]
fn test_scoped_timer() {
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert_eq!(timer.name(), "test_op");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_measure_returns_result() {
    let (value, ms) = measure(|| 6 * 7);
    assert_eq!(value, 42);
    assert!(ms >= 0.0);
}
