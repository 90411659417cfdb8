//! Build a bar chart from JSON, run its build-in animation and hand the
//! box grid to the worker pool.
//!
//! Run with `cargo run -p prism --example bar_chart`.

use prism::core::{config::Config, logging, profiling};
use prism::prelude::*;
use std::sync::Arc;

const DATA: &str = "[[0, 0, 12.0], [0, 1, 30.0], [0, 2, 18.5], [1, 0, 7.5], [1, 1, 22.0], [1, 2, 41.0]]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    Config::default().apply();

    let pool = Arc::new(TaskPool::default_threads()?);
    let mut chart = Chart::bar(BarChartConfig::default());
    chart.load(ChartInput::Grid(decode_tuples(DATA)?))?;
    chart.enable_generation(Box::new(CpuBoxBackend::new(pool)), GenerationConfig::default())?;

    for frame in 0..120 {
        profiling::new_frame();
        chart.tick(1.0 / 60.0, true)?;
        let dirty = chart.take_dirty();
        if frame % 30 == 0 {
            tracing::info!(
                "frame {}: progress {:.2}, {} sections to upload",
                frame,
                chart.animation().progress(),
                dirty.len()
            );
        }
        std::thread::sleep(std::time::Duration::from_millis(2));
    }

    chart.pointer_move(Some(Vec3::new(28.0, 15.0, 0.0)));
    if let Some(section) = chart.hovered() {
        let label = chart.states()[section].label.as_ref().map(|l| l.text.as_str());
        tracing::info!("hovering section {} ({:?})", section, label);
    }

    for ticks in chart.axis_ticks() {
        tracing::info!("{:?} axis: {}", ticks.axis, ticks.labels.join(", "));
    }

    match chart.generated() {
        Some(response) => tracing::info!(
            "generated {} vertices on the worker pool",
            response.vertices.len()
        ),
        None => tracing::warn!("generation still pending: {:?}", chart.generation_status()),
    }
    Ok(())
}
