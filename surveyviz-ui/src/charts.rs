//! Chart rendering to embeddable SVG markup
//!
//! Aggregates are counted here (value-frequency per categorical column)
//! and drawn with plotters' SVG backend, so the reporting page can inline
//! the markup directly without any client-side chart code.

use plotters::element::Pie;
use plotters::prelude::*;
use std::collections::BTreeMap;
use surveyviz_common::{Error, Result};

const CHART_SIZE: (u32, u32) = (640, 420);

/// Slice colors, cycled when a column has more distinct values
const PALETTE: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

/// Count value frequencies, ordered by value for stable output
fn tally(values: &[&str]) -> (Vec<String>, Vec<i64>) {
    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .unzip()
}

fn draw_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Internal(format!("failed to render chart: {}", e))
}

/// Render a bar chart of value frequencies for one categorical column
pub fn histogram_svg(title: &str, values: &[&str]) -> Result<String> {
    let (labels, counts) = tally(values);
    if labels.is_empty() {
        return Err(Error::InvalidInput("no values to chart".to_string()));
    }
    let max = counts.iter().copied().max().unwrap_or(0);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(70)
            .y_label_area_size(40)
            .build_cartesian_2d((0..labels.len()).into_segmented(), 0..max + 1)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(counts.iter().enumerate().map(|(i, count)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i), 0),
                        (SegmentValue::Exact(i + 1), *count),
                    ],
                    PALETTE[0].filled(),
                )
            }))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    Ok(svg)
}

/// Render a pie chart of the value distribution for one categorical column
pub fn pie_svg(title: &str, values: &[&str]) -> Result<String> {
    let (labels, counts) = tally(values);
    if labels.is_empty() {
        return Err(Error::InvalidInput("no values to chart".to_string()));
    }

    let sizes: Vec<f64> = counts.iter().map(|c| *c as f64).collect();
    let colors: Vec<RGBColor> = (0..labels.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let root = root.titled(title, ("sans-serif", 22)).map_err(draw_err)?;

        let (width, height) = CHART_SIZE;
        let center = ((width / 2) as i32, (height / 2) as i32);
        let radius = f64::from(width.min(height)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
        root.draw(&pie).map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_and_orders() {
        let (labels, counts) = tally(&["b", "a", "b", "c", "b", "a"]);
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert_eq!(counts, vec![2, 3, 1]);
    }

    #[test]
    fn test_histogram_produces_svg() {
        let svg = histogram_svg("Produktivitāte", &["7", "5", "7", "9"]).expect("histogram");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Produktivitāte"));
    }

    #[test]
    fn test_pie_produces_svg() {
        let svg = pie_svg("Žanri", &["Roks", "Klasika", "Roks"]).expect("pie");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Žanri"));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(histogram_svg("x", &[]).is_err());
        assert!(pie_svg("x", &[]).is_err());
    }
}
