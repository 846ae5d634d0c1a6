//! Indexing options.
use clap::Args;

use crate::walk::WalkOptions;

pub const DEFAULT_OUTPUT_FILE: &str = "index.html";
pub const DEFAULT_FILTER: &str = "*";

#[derive(Args, Debug, Clone)]
pub struct IndexOptions {
    /// Descend into subdirectories
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Only list entries whose names match this glob
    #[arg(long = "filter", default_value = DEFAULT_FILTER)]
    pub filter: String,

    /// Name of the listing file written into each directory
    #[arg(long = "output-file", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    #[command(flatten)]
    pub walk: WalkOptions,

    /// Print each directory as it is traversed.
    #[arg(skip)]
    pub verbose: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        IndexOptions {
            recursive: false,
            filter: DEFAULT_FILTER.to_string(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            walk: WalkOptions::default(),
            verbose: false,
        }
    }
}
