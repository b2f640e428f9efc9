use super::sink::{ViewData, ViewSink, ViewSlot};
use crate::error::Result;
use crate::model::{MonthlyCount, Report, ReportOutput, ViewOutput, SCHEMA_VERSION};
use chrono::{DateTime, Utc};
use console::Style;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Presentation settings for the terminal summary.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub color: bool,
    /// Rows shown per view; longer series show their most recent rows.
    pub rows: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { color: true, rows: 10 }
    }
}

/// Writes each view to `<dir>/<slot>_<name>.json`.
pub struct JsonDirSink {
    dir: PathBuf,
    generated_at: DateTime<Utc>,
    written: Vec<PathBuf>,
}

impl JsonDirSink {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            generated_at: Utc::now(),
            written: Vec::new(),
        })
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ViewSink for JsonDirSink {
    fn emit(&mut self, slot: ViewSlot, data: ViewData<'_>) -> Result<()> {
        let output = ViewOutput {
            version: SCHEMA_VERSION,
            generated_at: self.generated_at,
            slot: slot.number(),
            name: slot.name(),
            data: &data,
        };
        let path = self.dir.join(format!("{}.json", slot.file_stem()));
        fs::write(&path, serde_json::to_string_pretty(&output)?)?;
        self.written.push(path);
        Ok(())
    }
}

/// Styled plain-text rendering of each view.
pub struct TerminalSink<W: Write> {
    out: W,
    options: RenderOptions,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn style(&self, style: Style) -> Style {
        style.force_styling(self.options.color)
    }

    /// Headline numbers printed before the views.
    pub fn summary(&mut self, report: &Report) -> Result<()> {
        let bold = self.style(Style::new().bold());
        let cyan = self.style(Style::new().cyan());
        let dim = self.style(Style::new().dim());

        writeln!(self.out, "{}", bold.apply_to("Repository Evolution Report"))?;
        writeln!(self.out, "{}", "─".repeat(50))?;
        writeln!(self.out, "Total commits: {}", cyan.apply_to(report.total_commits))?;
        if let (Some(first), Some(last)) = (report.first_commit, report.last_commit) {
            writeln!(
                self.out,
                "Date range: {} to {}",
                dim.apply_to(first.format("%Y-%m-%d")),
                dim.apply_to(last.format("%Y-%m-%d"))
            )?;
        }
        Ok(())
    }

    fn monthly_bars(&mut self, months: &[MonthlyCount]) -> Result<()> {
        let max = months.iter().map(|m| m.commits).max().unwrap_or(1).max(1);
        let green = self.style(Style::new().green());
        let (skipped, shown) = tail(months, self.options.rows);
        for m in shown {
            writeln!(
                self.out,
                "{} {:<20} {:>6}",
                m.month,
                green.apply_to(bar(m.commits, max, 20)),
                m.commits
            )?;
        }
        self.more(skipped, "earlier months")
    }

    fn more(&mut self, skipped: usize, what: &str) -> Result<()> {
        if skipped > 0 {
            writeln!(self.out, "... and {skipped} {what}")?;
        }
        Ok(())
    }
}

impl<W: Write> ViewSink for TerminalSink<W> {
    fn emit(&mut self, slot: ViewSlot, data: ViewData<'_>) -> Result<()> {
        let bold = self.style(Style::new().bold());
        writeln!(self.out)?;
        writeln!(self.out, "{}", bold.apply_to(format!("{}. {}", slot.number(), slot.title())))?;

        if data.is_empty() {
            writeln!(self.out, "No data to display")?;
            return Ok(());
        }

        match data {
            ViewData::Monthly(months) => self.monthly_bars(months)?,
            ViewData::MaybeMonthly(Some(months)) => self.monthly_bars(months)?,
            ViewData::MaybeMonthly(None) => {}
            ViewData::Ranking(ranks) => {
                let cyan = self.style(Style::new().cyan());
                for (i, r) in ranks.iter().take(self.options.rows).enumerate() {
                    writeln!(self.out, "{:>2}. {:<32} {:>10}", i + 1, r.author, cyan.apply_to(r.value))?;
                }
            }
            ViewData::Churn(buckets) => {
                let green = self.style(Style::new().green());
                let red = self.style(Style::new().red());
                let (skipped, shown) = tail(buckets, self.options.rows);
                for b in shown {
                    writeln!(
                        self.out,
                        "{} {:>10} {:>10}",
                        b.month,
                        green.apply_to(format!("+{}", b.insertions)),
                        red.apply_to(format!("-{}", b.deletions))
                    )?;
                }
                self.more(skipped, "earlier months")?;
            }
            ViewData::Growth(points) => {
                let peak = points.iter().map(|p| p.cumulative).max().unwrap_or(0);
                let cyan = self.style(Style::new().cyan());
                let (skipped, shown) = tail(points, self.options.rows);
                for p in shown {
                    writeln!(self.out, "{} {:>12}", p.day, cyan.apply_to(p.cumulative))?;
                }
                self.more(skipped, "earlier days")?;
                writeln!(self.out, "Peak size: {peak} lines")?;
            }
            ViewData::Terms(terms) => {
                let yellow = self.style(Style::new().yellow());
                let line = terms
                    .iter()
                    .take(self.options.rows)
                    .map(|t| format!("{}({})", t.term, t.count))
                    .collect::<Vec<_>>()
                    .join("  ");
                writeln!(self.out, "{}", yellow.apply_to(line))?;
                self.more(terms.len().saturating_sub(self.options.rows), "more terms")?;
            }
        }
        Ok(())
    }
}

/// Print the whole report as one JSON document.
pub fn output_json<W: Write>(mut out: W, report: &Report, artifact: &Path) -> Result<()> {
    let output = ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        artifact: artifact.to_string_lossy().to_string(),
        report: report.clone(),
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn tail<T>(items: &[T], rows: usize) -> (usize, &[T]) {
    let skipped = items.len().saturating_sub(rows);
    (skipped, &items[skipped..])
}

fn bar(value: u64, max: u64, width: usize) -> String {
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.min(width))
}
