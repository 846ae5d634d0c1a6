use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct WalkOptions {
    /// Do not descend into symbolic links to directories when recursing
    #[arg(long = "no-follow")]
    pub no_follow: bool,

    /// Include hidden files and directories
    #[arg(long = "include-hidden")]
    pub include_hidden: bool,
}
