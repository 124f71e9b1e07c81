//! Shipment Report

use std::io;

use serde::Serialize;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{Alignment, Style, Theme, object::Columns},
};
use thiserror::Error;

use crate::solvers::{PackAllocation, SolveResult};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// Encoding the report as JSON failed.
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Human and machine readable view of a solve result.
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentReport<'a> {
    requested: i64,
    shipped: u64,
    surplus: u64,
    pack_count: u64,
    packs: &'a [PackAllocation],
}

impl<'a> ShipmentReport<'a> {
    /// Build a report for the given result.
    pub fn from_result(result: &'a SolveResult) -> Self {
        Self {
            requested: result.requested,
            shipped: result.total,
            surplus: result.surplus(),
            pack_count: result.pack_count(),
            packs: &result.packs,
        }
    }

    /// Write the report as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        if self.packs.is_empty() {
            writeln!(out, "\n Nothing to ship.")?;
        } else {
            writeln!(out, "\n{}", self.table())?;
        }

        self.write_summary(&mut out)
    }

    /// Write the report as a single JSON document.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if encoding or writing fails.
    pub fn write_json(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        serde_json::to_writer(&mut out, self)?;
        writeln!(out)?;

        Ok(())
    }

    fn table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Pack Size", "Count", "Units"]);

        for pack in self.packs {
            builder.push_record([
                pack.size.to_string(),
                pack.count.to_string(),
                pack.units().to_string(),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Columns::new(0..3), Alignment::right());

        table.to_string()
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReportError> {
        let lines = [
            (" Requested:", self.requested.to_string()),
            (" Shipped:", self.shipped.to_string()),
            (" Surplus:", self.surplus.to_string()),
            (" Packs:", self.pack_count.to_string()),
        ];

        let label_width = lines
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        let value_width = lines
            .iter()
            .map(|(_, value)| value.len())
            .max()
            .unwrap_or(0);

        for (label, value) in &lines {
            writeln!(out, "{label:<label_width$} {value:>value_width$}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn result() -> SolveResult {
        SolveResult {
            requested: 12001,
            total: 12250,
            packs: smallvec![
                PackAllocation::new(5000, 2),
                PackAllocation::new(2000, 1),
                PackAllocation::new(250, 1),
            ],
        }
    }

    fn has_line(text: &str, words: &[&str]) -> bool {
        text.lines()
            .any(|line| line.split_whitespace().eq(words.iter().copied()))
    }

    #[test]
    fn write_to_renders_packs_and_summary() -> TestResult {
        let result = result();
        let mut out = Vec::new();

        ShipmentReport::from_result(&result).write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Pack Size"));
        assert!(text.contains("10000"), "units column for the 5000 packs");
        assert!(has_line(&text, &["Shipped:", "12250"]));
        assert!(has_line(&text, &["Surplus:", "249"]));
        assert!(has_line(&text, &["Packs:", "4"]));

        Ok(())
    }

    #[test]
    fn write_to_empty_result() -> TestResult {
        let result = SolveResult::empty(0);
        let mut out = Vec::new();

        ShipmentReport::from_result(&result).write_to(&mut out)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Nothing to ship."));
        assert!(!text.contains("Pack Size"));

        Ok(())
    }

    #[test]
    fn write_json_encodes_all_fields() -> TestResult {
        let result = result();
        let mut out = Vec::new();

        ShipmentReport::from_result(&result).write_json(&mut out)?;

        let value: serde_json::Value = serde_json::from_slice(&out)?;

        assert_eq!(value["requested"], 12001);
        assert_eq!(value["shipped"], 12250);
        assert_eq!(value["surplus"], 249);
        assert_eq!(value["pack_count"], 4);
        assert_eq!(value["packs"][0]["size"], 5000);
        assert_eq!(value["packs"][0]["count"], 2);

        Ok(())
    }
}
