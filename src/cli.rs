use clap::Parser;
use std::path::PathBuf;

/// Migrate Terraform configuration and state from the metal/packet providers to equinix
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the Terraform files to migrate
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Where to copy the original files (defaults to `<dir>_backup`)
    #[arg(short, long)]
    pub backup_dir: Option<PathBuf>,

    /// Config file to use instead of the one in the XDG config directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show the changes as a diff without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Leave files with malformed provider blocks untouched instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,
}
