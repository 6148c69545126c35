//! SVG line charts of tickets sold against hours until kick-off.
//!
//! The x axis runs backwards: the left edge is the start of the window, the
//! right edge is kick-off. Samples outside the window are not drawn.

use std::fmt::{self, Write as _};

use write_model::History;

use super::html::escape;

pub(crate) const EVENT_WINDOW_HOURS: u32 = 300;
pub(crate) const OVERVIEW_WINDOW_HOURS: u32 = 600;

const EVENT_COLOR: &str = "#d9534f";
// tableau-colorblind10
static PALETTE: [&str; 10] = [
    "#006ba4", "#ff800e", "#ababab", "#595959", "#5f9ed1", "#c85200", "#898989", "#a2c8ec",
    "#ffbc79", "#cfcfcf",
];

const MARGIN_BOTTOM: f64 = 50.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const LEGEND_WIDTH: f64 = 260.0;
const X_TICKS: u32 = 6;

struct Series {
    color: &'static str,
    label: String,
    // (hours until kick-off, sold), oldest first
    points: Vec<(f64, u64)>,
}

impl Series {
    fn new(history: &History, window_hours: u32, color: &'static str) -> Self {
        let starts_at = history.event().starts_at();
        let window = f64::from(window_hours);
        let points = history
            .samples()
            .iter()
            .filter_map(|sample| {
                let hours = sample.observed_at().hours_until(starts_at);
                (0.0..=window)
                    .contains(&hours)
                    .then(|| (hours, u64::from(u32::from(sample.sold()))))
            })
            .collect();
        Self {
            color,
            label: history.event().title().to_owned(),
            points,
        }
    }
}

pub(crate) struct LineChart {
    height: f64,
    legend: bool,
    series: Vec<Series>,
    title: String,
    width: f64,
    x_label: &'static str,
    x_max: u32,
    y_label: &'static str,
}

/// Chart of a single event over the last `EVENT_WINDOW_HOURS` before kick-off.
pub(crate) fn event_chart(history: &History) -> LineChart {
    LineChart {
        height: 320.0,
        legend: false,
        series: vec![Series::new(history, EVENT_WINDOW_HOURS, EVENT_COLOR)],
        title: history.event().title().to_owned(),
        width: 640.0,
        x_label: "Hours Until Match",
        x_max: EVENT_WINDOW_HOURS,
        y_label: "Tickets Sold",
    }
}

pub(crate) fn overview_chart(histories: &[&History]) -> LineChart {
    LineChart {
        height: 500.0,
        legend: true,
        series: histories
            .iter()
            .zip(PALETTE.iter().cycle())
            .map(|(history, color)| Series::new(history, OVERVIEW_WINDOW_HOURS, *color))
            .collect(),
        title: "Ticket Sales Over Time".to_owned(),
        width: 1000.0,
        x_label: "Hours Until Match",
        x_max: OVERVIEW_WINDOW_HOURS,
        y_label: "Tickets Sold (Online Available)",
    }
}

/// Tick spacing for the y axis: 1, 2 or 5 times a power of ten, giving at
/// most about five intervals up to `max`.
fn y_step(max: u64) -> u64 {
    let raw = (max / 5).max(1);
    let mut magnitude = 1;
    while magnitude * 10 <= raw {
        magnitude *= 10;
    }
    [1, 2, 5, 10]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10 * magnitude)
}

impl LineChart {
    fn plot_right(&self) -> f64 {
        let legend = if self.legend { LEGEND_WIDTH } else { 0.0 };
        self.width - MARGIN_RIGHT - legend
    }

    fn plot_bottom(&self) -> f64 {
        self.height - MARGIN_BOTTOM
    }

    fn x(&self, hours: f64) -> f64 {
        let x_max = f64::from(self.x_max);
        MARGIN_LEFT + (x_max - hours) / x_max * (self.plot_right() - MARGIN_LEFT)
    }

    fn y(&self, sold: u64, y_max: u64) -> f64 {
        self.plot_bottom() - sold as f64 / y_max as f64 * (self.plot_bottom() - MARGIN_TOP)
    }

    fn y_scale(&self) -> (u64, u64) {
        let max = self
            .series
            .iter()
            .flat_map(|series| series.points.iter().map(|(_, sold)| *sold))
            .max()
            .unwrap_or_default();
        let step = y_step(max);
        let y_max = (max.div_ceil(step) * step).max(step);
        (step, y_max)
    }
}

impl fmt::Display for LineChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = (self.width, self.height);
        let (left, right) = (MARGIN_LEFT, self.plot_right());
        let (top, bottom) = (MARGIN_TOP, self.plot_bottom());
        let (y_step, y_max) = self.y_scale();

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}" font-family="sans-serif" font-size="12">"#
        )?;
        writeln!(f, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
        writeln!(
            f,
            r#"<text x="{:.1}" y="24" text-anchor="middle" font-size="16">{}</text>"#,
            (left + right) / 2.0,
            escape(&self.title)
        )?;

        for i in 0..=X_TICKS {
            let hours = self.x_max * i / X_TICKS;
            let x = self.x(f64::from(hours));
            writeln!(
                f,
                r##"<line x1="{x:.1}" y1="{top:.1}" x2="{x:.1}" y2="{bottom:.1}" stroke="#dddddd" stroke-dasharray="4 4"/>"##
            )?;
            writeln!(
                f,
                r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle">{hours}</text>"#,
                bottom + 16.0
            )?;
        }
        let mut sold = 0;
        while sold <= y_max {
            let y = self.y(sold, y_max);
            writeln!(
                f,
                r##"<line x1="{left:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="#dddddd" stroke-dasharray="4 4"/>"##
            )?;
            writeln!(
                f,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{sold}</text>"#,
                left - 6.0,
                y + 4.0
            )?;
            sold += y_step;
        }
        writeln!(
            f,
            r##"<rect x="{left:.1}" y="{top:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="#333333"/>"##,
            right - left,
            bottom - top
        )?;
        writeln!(
            f,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            (left + right) / 2.0,
            height - 12.0,
            self.x_label
        )?;
        writeln!(
            f,
            r#"<text x="16" y="{:.1}" text-anchor="middle" transform="rotate(-90 16 {:.1})">{}</text>"#,
            (top + bottom) / 2.0,
            (top + bottom) / 2.0,
            self.y_label
        )?;

        for series in &self.series {
            let mut points = String::new();
            for (hours, sold) in &series.points {
                if !points.is_empty() {
                    points.push(' ');
                }
                write!(points, "{:.1},{:.1}", self.x(*hours), self.y(*sold, y_max))?;
            }
            match series.points.as_slice() {
                [] => {}
                [(hours, sold)] => writeln!(
                    f,
                    r#"<circle cx="{:.1}" cy="{:.1}" r="2" fill="{}"/>"#,
                    self.x(*hours),
                    self.y(*sold, y_max),
                    series.color
                )?,
                _ => writeln!(
                    f,
                    r#"<polyline fill="none" stroke="{}" stroke-width="1.5" points="{points}"/>"#,
                    series.color
                )?,
            }
        }

        if self.legend {
            for (index, series) in self.series.iter().enumerate() {
                let y = top + 18.0 * index as f64;
                writeln!(
                    f,
                    r#"<rect x="{:.1}" y="{:.1}" width="12" height="12" fill="{}"/>"#,
                    right + 12.0,
                    y,
                    series.color
                )?;
                writeln!(
                    f,
                    r#"<text x="{:.1}" y="{:.1}" font-size="11">{}</text>"#,
                    right + 30.0,
                    y + 10.0,
                    escape(&series.label)
                )?;
            }
        }
        writeln!(f, "</svg>")
    }
}
