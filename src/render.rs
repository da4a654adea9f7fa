//! Plain-text rendering of a submission for the `predict` subcommand.

use std::fmt::Write as _;

use crate::classifier::{Gauge, PredictionReport};
use crate::submission::SubmissionOutcome;
use crate::types::{BandColor, ClassificationBand};

/// Width of the text gauge bar, in cells.
const BAR_WIDTH: usize = 30;

const fn marker(color: BandColor) -> &'static str {
    match color {
        BandColor::Red => "[RED]",
        BandColor::Orange => "[ORANGE]",
        BandColor::Green => "[GREEN]",
    }
}

/// `[#########|.......|..........]` with band boundaries marked by `|`.
fn bar(gauge: &Gauge) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let cell = |fraction: f64| -> usize { (fraction * BAR_WIDTH as f64).round() as usize };
    let filled = cell(gauge.fraction());
    let medium = cell(gauge.position(gauge.medium));
    let good = cell(gauge.position(gauge.good));

    let mut out = String::with_capacity(BAR_WIDTH + 2);
    out.push('[');
    for i in 0..BAR_WIDTH {
        let c = if (i == medium || i == good) && i != 0 {
            '|'
        } else if i < filled {
            '#'
        } else {
            '.'
        };
        out.push(c);
    }
    out.push(']');
    out
}

pub fn render_gauge(gauge: &Gauge) -> String {
    format!(
        "{:<22} {:>8.2} / {:<5} {} {:<6}\n    {} {}",
        gauge.title,
        gauge.value,
        gauge.max,
        bar(gauge),
        gauge.band,
        marker(gauge.color),
        gauge.message
    )
}

pub fn render_report(report: &PredictionReport) -> String {
    let mut out = String::new();
    if let Some(advisory) = &report.advisory {
        let _ = writeln!(out, "{} {}", marker(BandColor::Orange), advisory.message);
    }
    let _ = writeln!(
        out,
        "{} {}",
        marker(report.headline.color),
        report.headline.message
    );
    let _ = writeln!(out);
    for gauge in &report.gauges {
        let _ = writeln!(out, "{}", render_gauge(gauge));
    }
    out
}

/// Render any terminal outcome.
pub fn render_outcome(outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::Succeeded(report) => render_report(report),
        SubmissionOutcome::Rejected(err) => {
            format!("{} {}\n", marker(ClassificationBand::Low.color()), err)
        }
        SubmissionOutcome::Failed { error, advisory } => {
            let mut out = String::new();
            if let Some(a) = advisory {
                let _ = writeln!(out, "{} {}", marker(BandColor::Orange), a.message);
            }
            let color = if error.is_timeout() {
                BandColor::Orange
            } else {
                BandColor::Red
            };
            let _ = writeln!(out, "{} {}", marker(color), error);
            out
        }
    }
}
