//! Record payloads driving every chart kind.

use prism::prelude::*;
use prism_test_utils::fixtures;

fn sales() -> Vec<prism::charts::Record> {
    decode_records(fixtures::SALES_RECORDS_JSON).unwrap()
}

// ====================
// Grid Charts
// ====================

#[test]
fn test_bar_chart_from_records() {
    let mut chart = Chart::bar(BarChartConfig {
        lod: prism::charts::LodConfig::single(),
        ..Default::default()
    });
    chart
        .load(ChartInput::Records {
            records: sales(),
            mapping: PropertyMapping::default().with_axes("Month", "Team", "Sales"),
        })
        .unwrap();

    // Feb, Jan, Mar by North, South
    assert_eq!(chart.store().len(), 3 * 2 + 1);
    assert!(chart.store().section(1).unwrap().is_empty(), "Feb has no South entry");
    assert!(!chart.store().section(5).unwrap().is_empty());

    let rows = chart
        .axis_ticks()
        .into_iter()
        .find(|t| t.axis == ChartAxis::Row)
        .unwrap();
    assert_eq!(rows.labels, vec!["Feb", "Jan", "Mar"]);
}

#[test]
fn test_line_chart_selects_whole_rows() {
    let mut chart = Chart::line(LineChartConfig::default());
    chart
        .load(ChartInput::Records {
            records: sales(),
            mapping: PropertyMapping::default().with_axes("Month", "Team", "Sales"),
        })
        .unwrap();

    // Jan is row 1 with both teams
    assert!(chart.click(Vec3::new(1.0, 14.0, 0.0)));
    assert!(chart.is_unit_selected(1));
    let lit: Vec<bool> = chart.states().iter().map(|s| s.highlighted).collect();
    assert_eq!(lit, vec![false, true, true, false, false]);
}

// ====================
// Pie Charts
// ====================

#[test]
fn test_pie_chart_sums_categories() {
    let mut chart = Chart::pie(PieChartConfig::default());
    chart
        .load(ChartInput::Records {
            records: sales(),
            mapping: PropertyMapping::default().with_category("Team", "Sales"),
        })
        .unwrap();

    let labels: Vec<String> = chart.states()[..2]
        .iter()
        .map(|s| s.label.as_ref().unwrap().text.clone())
        .collect();
    assert_eq!(labels, vec!["North: 20.50", "South: 19.25"]);
}
