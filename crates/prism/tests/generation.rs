//! Geometry generation through the chart frame loop.

use prism::prelude::*;
use prism_test_utils::{MockGenerationBackend, MockMode, fixtures};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn bar_chart() -> Chart {
    let mut chart = Chart::bar(BarChartConfig::default());
    chart
        .load(ChartInput::Grid(fixtures::grid_points(3, 4)))
        .unwrap();
    chart
}

fn with_backend(backend: &MockGenerationBackend, poll_budget: u32) -> Chart {
    let mut chart = bar_chart();
    chart
        .enable_generation(Box::new(backend.clone()), GenerationConfig { poll_budget })
        .unwrap();
    chart
}

// ====================
// Scripted Backend Tests
// ====================

#[test]
fn test_result_arrives_after_delay() {
    let backend = MockGenerationBackend::deliver_after(3);
    let mut chart = with_backend(&backend, 10);

    chart.tick(0.016, true).unwrap();
    assert_eq!(chart.generation_status(), Some(GenerationStatus::Pending));
    chart.tick(0.016, true).unwrap();
    chart.tick(0.016, true).unwrap();
    assert!(chart.generated().is_none());

    chart.tick(0.016, true).unwrap();
    assert_eq!(chart.generation_status(), Some(GenerationStatus::Ready));
    let response = chart.generated().unwrap();
    assert_eq!(response.vertices.len(), 12 * 24);
    assert_eq!(response.indices.len(), 12 * 36);
    assert_eq!(backend.count_submits(), 1, "one request outstanding at a time");
}

#[test]
fn test_invalid_results_are_not_ready() {
    let backend = MockGenerationBackend::invalid_first(2);
    let mut chart = with_backend(&backend, 10);

    for _ in 0..3 {
        chart.tick(0.016, true).unwrap();
        assert!(chart.generated().is_none());
    }
    chart.tick(0.016, true).unwrap();
    assert!(chart.generated().is_some_and(|r| r.valid));
}

#[test]
fn test_rebuild_discards_stale_result() {
    let backend = MockGenerationBackend::deliver_after(2);
    let mut chart = with_backend(&backend, 10);

    chart.tick(0.016, true).unwrap();
    chart.rebuild().unwrap();
    chart.tick(0.016, true).unwrap();
    chart.tick(0.016, true).unwrap();
    assert!(chart.generated().is_none(), "the stale result is dropped");
    assert_eq!(backend.submitted_ids(), vec![0, 1]);

    chart.tick(0.016, true).unwrap();
    chart.tick(0.016, true).unwrap();
    assert!(chart.generated().is_some());
}

#[test]
fn test_timeout_then_retry() {
    let backend = MockGenerationBackend::stalled();
    let mut chart = with_backend(&backend, 3);

    chart.tick(0.016, true).unwrap();
    chart.tick(0.016, true).unwrap();
    chart.tick(0.016, true).unwrap();
    let err = chart.tick(0.016, true).unwrap_err();
    assert!(matches!(
        err,
        ChartError::GenerationTimedOut {
            request_id: 0,
            frames: 3
        }
    ));
    assert_eq!(chart.generation_status(), Some(GenerationStatus::TimedOut));
    assert!(
        chart.animation().elapsed() > 0.0,
        "animation still advanced on the failing frame"
    );

    backend.set_mode(MockMode::Immediate);
    assert!(chart.retry_generation());
    chart.tick(0.016, true).unwrap();
    chart.tick(0.016, true).unwrap();
    assert_eq!(chart.generation_status(), Some(GenerationStatus::Ready));
    assert_eq!(backend.submitted_ids(), vec![0, 1]);
}

#[test]
fn test_refused_submit_is_reported() {
    let backend = MockGenerationBackend::new(MockMode::RejectSubmits);
    let mut chart = with_backend(&backend, 10);
    assert!(chart.tick(0.016, true).is_err());
    assert_eq!(chart.generation_status(), Some(GenerationStatus::Idle));
}

// ====================
// Thread Pool Backend Tests
// ====================

#[test]
fn test_cpu_backend_through_chart() {
    let pool = Arc::new(TaskPool::new(2).unwrap());
    let mut chart = bar_chart();
    chart
        .enable_generation(Box::new(CpuBoxBackend::new(pool)), GenerationConfig::default())
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while chart.generated().is_none() {
        assert!(Instant::now() < deadline, "generation never completed");
        chart.tick(0.016, true).unwrap();
        std::thread::sleep(Duration::from_millis(1));
    }

    let section = chart.take_generated().unwrap().to_section();
    assert_eq!(section.triangle_count(), 12 * 12);
    assert!(section.is_consistent());
}
