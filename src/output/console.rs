//! Human-readable console summary.
//!
//! Renders the statistics, the per-extension breakdown, every potential
//! duplicate group of both modes and the list of skipped files. Headings are
//! styled with `yansi`; styling follows the global `yansi` switch so
//! `--no-color` and `NO_COLOR` produce plain text.

use std::fmt::Display;
use std::io::{self, Write};

use bytesize::ByteSize;
use yansi::Paint;

use crate::audit::AuditReport;
use crate::duplicates::{DuplicateGroup, DuplicateMode, GroupingStats};

/// Placeholder for statistics that are undefined on an empty scan.
pub const NOT_AVAILABLE: &str = "N/A";

/// Console renderer for one audit report.
pub struct ConsoleReport<'a> {
    report: &'a AuditReport,
}

impl<'a> ConsoleReport<'a> {
    /// Create a renderer for `report`.
    #[must_use]
    pub fn new(report: &'a AuditReport) -> Self {
        Self { report }
    }

    /// Write the full summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write_summary(writer)?;
        self.write_extensions(writer)?;
        write_groups(
            writer,
            DuplicateMode::Size,
            &self.report.size_groups,
            &self.report.size_stats(),
        )?;
        write_groups(
            writer,
            DuplicateMode::Name,
            &self.report.name_groups,
            &self.report.name_stats(),
        )?;
        self.write_skipped(writer)
    }

    fn write_summary<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let stats = &self.report.statistics;
        let total_bytes: u64 = self.report.records.iter().map(|r| r.size_bytes).sum();

        writeln!(w, "{}", "Folder Audit Summary".bold().underline())?;
        writeln!(w, "  Folder:         {}", self.report.root.display())?;
        writeln!(w, "  Files included: {}", stats.total_count)?;
        writeln!(
            w,
            "  Total size:     {} KB ({})",
            stats.total_size_kb,
            ByteSize::b(total_bytes)
        )?;
        writeln!(w, "  Mean size:      {}", format_kb(stats.mean_size_kb))?;
        writeln!(w, "  Median size:    {}", format_kb(stats.median_size_kb))?;
        writeln!(
            w,
            "  Scan time:      {:.2?}",
            self.report.scan_duration
        )?;
        writeln!(w)
    }

    fn write_extensions<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let extensions = &self.report.statistics.extensions;
        writeln!(w, "{}", "Extension Breakdown".bold())?;
        if extensions.is_empty() {
            writeln!(w, "  (no files)")?;
            return writeln!(w);
        }

        let width = extensions
            .iter()
            .map(|e| e.label().len())
            .max()
            .unwrap_or(0);
        for ext in extensions {
            writeln!(
                w,
                "  {:<width$}  {:>6} files  {:>12} KB  {:>10.2} MB",
                ext.label(),
                ext.count,
                ext.total_size_kb.to_string(),
                ext.total_size_kb.as_mib(),
            )?;
        }
        writeln!(w)
    }

    fn write_skipped<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if self.report.errors.is_empty() {
            return Ok(());
        }
        writeln!(
            w,
            "{} {}",
            "Skipped files:".yellow().bold(),
            self.report.errors.len()
        )?;
        for error in &self.report.errors {
            writeln!(w, "  {error}")?;
        }
        Ok(())
    }
}

fn write_groups<W: Write, K: Display>(
    w: &mut W,
    mode: DuplicateMode,
    groups: &[DuplicateGroup<K>],
    stats: &GroupingStats,
) -> io::Result<()> {
    let heading = format!("Potential Duplicates ({mode})");
    writeln!(w, "{}", heading.bold())?;
    if groups.is_empty() {
        writeln!(w, "  None found")?;
        return writeln!(w);
    }

    writeln!(
        w,
        "  {} groups, {} of {} files",
        stats.duplicate_groups, stats.potential_duplicates, stats.total_files
    )?;
    for group in groups {
        writeln!(w, "  {} ({} files)", group.key.cyan(), group.len())?;
        for file in &group.files {
            writeln!(w, "    {}  {} KB", file.path.display(), file.size_kb)?;
        }
    }
    writeln!(w)
}

fn format_kb(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |kb| format!("{kb:.2} KB"))
}
