use chrono::{DateTime, Utc};
use plotters::element::Pie;
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};

use super::styles::{ChartStyle, ChartTheme};
use crate::types::LanguageHistogram;
use crate::utils::{monthly_commit_counts, top_languages};

pub type PlotError = Box<dyn Error + Send + Sync>;

const COMMIT_CHART_SIZE: (u32, u32) = (900, 350);
const LANGUAGE_CHART_SIZE: (u32, u32) = (600, 600);

// Same ordering as the usual ten-colour categorical palette
const SLICE_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Render commits per calendar month as a line chart with markers.
///
/// Returns `Ok(None)` without touching the filesystem when `dates` is empty.
pub fn build_commit_frequency_chart(
    dates: &[DateTime<Utc>],
    out_path: &Path,
) -> Result<Option<PathBuf>, PlotError> {
    let monthly = monthly_commit_counts(dates);
    if monthly.is_empty() {
        return Ok(None);
    }

    let months: Vec<String> = monthly.keys().cloned().collect();
    let points: Vec<(f64, f64)> = monthly
        .values()
        .enumerate()
        .map(|(i, count)| (i as f64, *count as f64))
        .collect();
    let max_count = points.iter().map(|(_, y)| *y).fold(1.0, f64::max);

    let theme = ChartTheme::default();
    let style = ChartStyle::default();

    let root = BitMapBackend::new(out_path, COMMIT_CHART_SIZE).into_drawing_area();
    root.fill(&theme.background_color)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Commits per Month",
            ("sans-serif", style.caption_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size)
        .build_cartesian_2d(
            -0.5f64..(months.len() as f64 - 0.5),
            0f64..(max_count * 1.15),
        )?;

    // Only whole positions carry a month; anything in between stays blank
    let x_label_formatter = |x: &f64| {
        let idx = x.round();
        if idx < 0.0 || (x - idx).abs() > 1e-6 {
            return String::new();
        }
        months.get(idx as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_labels(months.len().min(8) + 1)
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&|y: &f64| format!("{:.0}", y))
        .y_desc("Commits")
        .label_style(
            ("sans-serif", style.font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .draw()?;

    let line_style = ShapeStyle::from(&theme.line_color).stroke_width(style.line_width);
    chart.draw_series(LineSeries::new(points.clone(), line_style))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), style.marker_size, theme.line_color.filled())),
    )?;

    root.present()?;
    Ok(Some(out_path.to_path_buf()))
}

/// Render the language histogram as a percentage pie.
///
/// The `limit` largest languages get their own slice, the remainder is
/// shown as "Other". Returns `Ok(None)` when there is nothing to draw.
pub fn build_language_pie(
    languages: &LanguageHistogram,
    limit: usize,
    out_path: &Path,
) -> Result<Option<PathBuf>, PlotError> {
    let items = top_languages(languages, limit);
    let total: u64 = items.iter().map(|(_, size)| size).sum();
    if total == 0 {
        return Ok(None);
    }

    let theme = ChartTheme::default();
    let style = ChartStyle::default();

    let root = BitMapBackend::new(out_path, LANGUAGE_CHART_SIZE).into_drawing_area();
    root.fill(&theme.background_color)?;
    let root = root.titled(
        "Language Usage (by bytes)",
        ("sans-serif", style.caption_size)
            .into_font()
            .color(&theme.text_color),
    )?;

    let (width, height) = root.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.32;

    let sizes: Vec<f64> = items.iter().map(|(_, size)| *size as f64).collect();
    let labels: Vec<&str> = items.iter().map(|(name, _)| name.as_str()).collect();
    let colors: Vec<RGBColor> = (0..items.len())
        .map(|i| SLICE_COLORS[i % SLICE_COLORS.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(140.0);
    pie.label_style(
        ("sans-serif", style.font_size)
            .into_font()
            .color(&theme.text_color),
    );
    pie.percentages(("sans-serif", style.font_size - 2).into_font().color(&BLACK));
    root.draw(&pie)?;

    root.present()?;
    Ok(Some(out_path.to_path_buf()))
}
