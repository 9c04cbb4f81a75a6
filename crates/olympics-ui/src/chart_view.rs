//! Chart views for the dashboard TUI.
//!
//! Line charts for per-edition series, a scatter of weight against height,
//! and an age histogram, all drawn with ratatui's canvas-backed widgets.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use olympics_core::models::{Medal, MedalOutcome};
use olympics_data::aggregator::{
    AgeDistribution, AthleteProfile, Dimension, SexSplit, TimePoint, YearCount,
};

use crate::themes::Theme;

/// Width in years of one age-histogram bin.
pub const AGE_BIN_WIDTH: u32 = 5;

/// Points to draw per medal outcome in the scatter; the rest are skipped.
const SCATTER_LIMIT: usize = 5_000;

/// `[min, max]` of `values`, widened so a flat series still has a range.
pub fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        return [min - 1.0, max + 1.0];
    }
    [min, max]
}

fn axis_labels(range: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (range[0] + range[1]) / 2.0;
    [range[0], mid, range[1]]
        .iter()
        .map(|v| Span::raw(format!("{:.0}", v)))
        .collect()
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
}

fn line_dataset<'a>(name: &'a str, data: &'a [(f64, f64)], style: Style) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(style)
        .data(data)
}

fn render_lines(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[(&str, Vec<(f64, f64)>, Style)],
    theme: &Theme,
) {
    let x = bounds(series.iter().flat_map(|(_, d, _)| d.iter().map(|p| p.0)));
    let y = bounds(
        series
            .iter()
            .flat_map(|(_, d, _)| d.iter().map(|p| p.1))
            .chain(std::iter::once(0.0)),
    );
    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(name, data, style)| line_dataset(name, data, *style))
        .collect();

    let chart = Chart::new(datasets)
        .block(bordered(title))
        .x_axis(
            Axis::default()
                .title("Edition")
                .style(theme.label)
                .bounds(x)
                .labels(axis_labels(x)),
        )
        .y_axis(
            Axis::default()
                .style(theme.label)
                .bounds(y)
                .labels(axis_labels(y)),
        );
    frame.render_widget(chart, area);
}

// ── Series ───────────────────────────────────────────────────────────────────

/// Distinct nations / events / athletes per edition.
pub fn render_time_series(
    frame: &mut Frame,
    area: Rect,
    dimension: Dimension,
    points: &[TimePoint],
    theme: &Theme,
) {
    let data: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.edition as f64, p.count as f64))
        .collect();
    let title = format!("{} over the years", dimension.label());
    render_lines(
        frame,
        area,
        &title,
        &[(dimension.label(), data, theme.series_style(dimension))],
        theme,
    );
}

/// Medals won by one country per edition.
pub fn render_yearwise(frame: &mut Frame, area: Rect, title: &str, years: &[YearCount], theme: &Theme) {
    let data: Vec<(f64, f64)> = years
        .iter()
        .map(|y| (y.year as f64, y.medals as f64))
        .collect();
    render_lines(frame, area, title, &[("Medals", data, theme.medal_gold)], theme);
}

/// Male and female participation per edition.
pub fn render_men_vs_women(frame: &mut Frame, area: Rect, splits: &[SexSplit], theme: &Theme) {
    let male: Vec<(f64, f64)> = splits
        .iter()
        .map(|s| (s.year as f64, s.male as f64))
        .collect();
    let female: Vec<(f64, f64)> = splits
        .iter()
        .map(|s| (s.year as f64, s.female as f64))
        .collect();
    render_lines(
        frame,
        area,
        "Men vs Women participation",
        &[
            ("Male", male, theme.series_male),
            ("Female", female, theme.series_female),
        ],
        theme,
    );
}

// ── Athletes ─────────────────────────────────────────────────────────────────

/// `(weight, height)` points of athletes with both measurements, per outcome.
pub fn scatter_points(profiles: &[AthleteProfile]) -> Vec<(MedalOutcome, Vec<(f64, f64)>)> {
    let outcomes = [
        MedalOutcome::NoMedal,
        MedalOutcome::Won(Medal::Bronze),
        MedalOutcome::Won(Medal::Silver),
        MedalOutcome::Won(Medal::Gold),
    ];
    outcomes
        .into_iter()
        .map(|outcome| {
            let points = profiles
                .iter()
                .filter(|p| p.medal == outcome)
                .filter_map(|p| Some((p.weight?.0, p.height?.0)))
                .take(SCATTER_LIMIT)
                .collect();
            (outcome, points)
        })
        .collect()
}

/// Weight (x) against height (y), coloured by medal.
pub fn render_weight_v_height(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    profiles: &[AthleteProfile],
    theme: &Theme,
) {
    let groups = scatter_points(profiles);
    let names: Vec<String> = groups.iter().map(|(o, _)| o.to_string()).collect();

    let x = bounds(groups.iter().flat_map(|(_, d)| d.iter().map(|p| p.0)));
    let y = bounds(groups.iter().flat_map(|(_, d)| d.iter().map(|p| p.1)));

    let datasets: Vec<Dataset> = groups
        .iter()
        .zip(&names)
        .map(|((outcome, data), name)| {
            Dataset::default()
                .name(name.as_str())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(theme.outcome_style(*outcome))
                .data(data)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(bordered(title))
        .x_axis(
            Axis::default()
                .title("Weight (kg)")
                .style(theme.label)
                .bounds(x)
                .labels(axis_labels(x)),
        )
        .y_axis(
            Axis::default()
                .title("Height (cm)")
                .style(theme.label)
                .bounds(y)
                .labels(axis_labels(y)),
        );
    frame.render_widget(chart, area);
}

/// Histogram of athlete ages in [`AGE_BIN_WIDTH`]-year bins.
pub fn render_age_histogram(frame: &mut Frame, area: Rect, ages: &AgeDistribution, theme: &Theme) {
    let bins = AgeDistribution::histogram(&ages.overall, AGE_BIN_WIDTH);
    let labels: Vec<String> = bins.iter().map(|b| b.start.to_string()).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(&bins)
        .map(|(label, bin)| (label.as_str(), bin.count as u64))
        .collect();

    fn median(values: &[u32]) -> String {
        values
            .get(values.len() / 2)
            .map_or_else(|| "-".to_string(), |v| v.to_string())
    }
    let title = format!(
        "Age distribution (median: all {} · gold {} · silver {} · bronze {})",
        median(&ages.overall),
        median(&ages.gold),
        median(&ages.silver),
        median(&ages.bronze),
    );

    let chart = BarChart::default()
        .block(bordered(&title))
        .data(data.as_slice())
        .bar_width(3)
        .bar_gap(1)
        .bar_style(theme.series_athletes)
        .value_style(theme.bold)
        .label_style(theme.label);
    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
