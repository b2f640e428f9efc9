use crate::analysis;
use crate::cli::{CommonArgs, ReportArgs};
use crate::miner::{self, MiningOptions, MiningSummary};
use crate::report::{emit_all, output_json, JsonDirSink, RenderOptions, TerminalSink};
use anyhow::Context;
use console::style;
use std::io;
use std::path::Path;

pub fn exec_mine(common: &CommonArgs, repo: &Path) -> anyhow::Result<MiningSummary> {
    let options = MiningOptions {
        progress: !common.quiet,
    };
    let summary = miner::mine(repo, &common.artifact, &options).context("Mining stage failed")?;

    match &summary.artifact {
        Some(path) => eprintln!(
            "{} {} commits ({} without line statistics) -> {}",
            style("Mined").green().bold(),
            summary.records,
            summary.degraded,
            path.display()
        ),
        None => eprintln!(
            "{} no commits found in {}, nothing written",
            style("Warning:").yellow().bold(),
            summary.repository.display()
        ),
    }

    Ok(summary)
}

pub fn exec_report(common: &CommonArgs, args: &ReportArgs) -> anyhow::Result<()> {
    let report = analysis::analyze(&common.artifact).context("Aggregation stage failed")?;

    match JsonDirSink::new(&args.out_dir) {
        Ok(mut files) => {
            let failures = emit_all(&report, &mut files);
            tracing::info!(
                "Wrote {} view files to {} ({failures} failed)",
                files.written().len(),
                args.out_dir.display()
            );
        }
        Err(e) => tracing::warn!("cannot write views to {}: {e}", args.out_dir.display()),
    }

    let stdout = io::stdout();
    if args.json {
        output_json(stdout.lock(), &report, &common.artifact)?;
    } else {
        let options = RenderOptions {
            color: !args.no_color && console::colors_enabled(),
            rows: args.rows,
        };
        {
            let mut terminal = TerminalSink::new(stdout.lock(), options);
            terminal.summary(&report)?;
            emit_all(&report, &mut terminal);
        }
        println!("\nView data written to {}", args.out_dir.display());
    }

    Ok(())
}

pub fn exec_run(common: &CommonArgs, repo: &Path, args: &ReportArgs) -> anyhow::Result<()> {
    eprintln!("{}", "=".repeat(60));
    eprintln!("{} {}", style("GitPulse").bold(), repo.display());
    eprintln!("{}", "=".repeat(60));

    let summary = exec_mine(common, repo)?;
    if summary.artifact.is_none() {
        return Ok(());
    }
    exec_report(common, args)?;

    eprintln!("{}", "=".repeat(60));
    eprintln!("Done. Views are in {}", args.out_dir.display());
    Ok(())
}
