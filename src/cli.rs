use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitpulse")]
#[command(about = "Mine a git history into a commit table and report how the project evolved")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, default_value = "./data/commits.csv", help = "Path of the intermediate commit table")]
    pub artifact: PathBuf,

    #[arg(long, short, global = true, help = "Only log warnings and hide progress bars")]
    pub quiet: bool,
}

#[derive(Args, Clone)]
pub struct ReportArgs {
    #[arg(long, default_value = "./report_images", help = "Directory that receives one file per view")]
    pub out_dir: PathBuf,

    #[arg(long, help = "Print the whole report as JSON instead of the summary")]
    pub json: bool,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(long, default_value_t = 10, help = "Rows shown per view in the summary")]
    pub rows: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk every branch and write one row per commit to the commit table
    Mine {
        #[arg(long, default_value = ".", help = "Path to git repository")]
        repo: PathBuf,
    },
    /// Compute the seven views from an existing commit table
    Report {
        #[clap(flatten)]
        report: ReportArgs,
    },
    /// Mine, then report
    Run {
        #[arg(long, default_value = ".", help = "Path to git repository")]
        repo: PathBuf,

        #[clap(flatten)]
        report: ReportArgs,
    },
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Mine { repo } => crate::pipeline::exec_mine(&self.common, &repo).map(|_| ()),
            Commands::Report { report } => crate::pipeline::exec_report(&self.common, &report),
            Commands::Run { repo, report } => crate::pipeline::exec_run(&self.common, &repo, &report),
        }
    }
}
