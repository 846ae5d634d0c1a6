use std::env;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::*;

mod fsutil;
mod indexer;
mod listing;
mod options;
mod reporting;
mod stack;
pub mod walk;

use indexer::Indexer;
use options::IndexOptions;
use reporting::{anyhow, Result, ResultNote};

/// Write static index.html listings into a directory tree.
#[derive(Parser, Debug)]
#[command(name = "dirindex", version)]
struct DirIndexCLI {
    /// Suppress informational output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
    /// Print traversal progress and increase logging verbosity (can be repeated)
    #[arg(short='v', long="verbose", action=clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    index: IndexOptions,

    /// The directory to index [default: current directory]
    #[arg(name = "DIR")]
    dir: Option<PathBuf>,
}

impl DirIndexCLI {
    fn init_logging(&self) -> Result<()> {
        let mut verbose: usize = 2;
        if self.verbose > 0 {
            verbose += self.verbose as usize;
        } else if self.quiet {
            verbose -= 1;
        }

        stderrlog::new()
            .module(module_path!())
            .verbosity(verbose)
            .init()?;
        Ok(())
    }

    /// Resolve the options and root directory for this run.
    fn resolve(&self) -> Result<(PathBuf, IndexOptions)> {
        let dir = match &self.dir {
            Some(d) => d.clone(),
            None => env::current_dir()?,
        };
        let root = fs::canonicalize(&dir).with_path_action("cannot index", &dir)?;
        if !root.is_dir() {
            return Err(anyhow!("cannot index {}: not a directory", root.display()));
        }

        let mut options = self.index.clone();
        options.verbose = self.verbose > 0;
        Ok((root, options))
    }
}

fn main() -> Result<()> {
    let cli = DirIndexCLI::parse();
    cli.init_logging()?;
    debug!("starting dirindex");
    let (root, options) = cli.resolve()?;
    let indexer = Indexer::new(&root, options)?;
    info!("indexing {}", indexer.root().display());
    let summary = indexer.run();
    debug!(
        "finished: {} listings written, {} directories skipped",
        summary.indexed, summary.failed
    );
    Ok(())
}
