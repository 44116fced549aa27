//! Text output formatter for human-readable display
//!
//! This module provides:
//! - A column-aligned table of measurements, slowest first
//! - Non-deduplicated total time and size lines

use crate::domain::AggregateReport;
use crate::output::humanize::{format_bytes, format_duration};
use crate::output::OutputFormatter;
use colored::Colorize;
use std::io::Write;

const HEADERS: [&str; 4] = ["Dependency", "Time", "Size", "# Deps"];

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Render every record as a row of display cells
    fn rows(&self, report: &AggregateReport) -> Vec<[String; 4]> {
        report
            .records
            .iter()
            .map(|record| {
                [
                    record.name.clone(),
                    format_duration(record.duration),
                    format_bytes(record.size),
                    record.sub_dependencies.to_string(),
                ]
            })
            .collect()
    }

    /// Width of each column, header included
    fn column_widths(rows: &[[String; 4]]) -> [usize; 4] {
        let mut widths = HEADERS.map(str::len);
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }

    fn write_row(
        &self,
        cells: &[String; 4],
        widths: &[usize; 4],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(writer, "{}", line.trim_end())
    }

    /// Header, rule and one row per record
    fn format_table(
        &self,
        report: &AggregateReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let rows = self.rows(report);
        let widths = Self::column_widths(&rows);

        let header = HEADERS.map(String::from);
        if self.color {
            let line = header
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(writer, "{}", line.trim_end().bold())?;
        } else {
            self.write_row(&header, &widths, writer)?;
        }

        let rule_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        let rule = "-".repeat(rule_width);
        if self.color {
            writeln!(writer, "{}", rule.dimmed())?;
        } else {
            writeln!(writer, "{}", rule)?;
        }

        for row in &rows {
            self.write_row(row, &widths, writer)?;
        }
        Ok(())
    }

    /// Non-deduplicated total time and size
    fn format_totals(
        &self,
        report: &AggregateReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let time = format_duration(report.total_duration);
        let size = format_bytes(report.total_size);

        if self.color {
            writeln!(writer, "Total time (non-deduped): {}", time.bold())?;
            writeln!(writer, "Total size (non-deduped): {}", size.bold())?;
        } else {
            writeln!(writer, "Total time (non-deduped): {}", time)?;
            writeln!(writer, "Total size (non-deduped): {}", size)?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &AggregateReport, writer: &mut dyn Write) -> std::io::Result<()> {
        self.format_table(report, writer)?;
        self.format_totals(report, writer)
    }
}
