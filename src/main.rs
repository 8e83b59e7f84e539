use anyhow::{Result, anyhow};
use clap::Parser;
use console::style;
use equinix_migrate::cli::Cli;
use equinix_migrate::config;
use equinix_migrate::migrate::{self, MigrationOptions};
use std::process::ExitCode;

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref(), cli.quiet)?;

    let options = MigrationOptions {
        dir: cli.dir,
        backup_dir: cli.backup_dir,
        dry_run: cli.dry_run,
        keep_going: cli.keep_going,
        quiet: cli.quiet,
    };

    if options.dry_run {
        println!("{}", style("Dry run: no files will be written.").yellow());
    }

    let report = migrate::run(&config, &options)?;
    println!("{}", style(report.summary()).bold());

    if !report.failed.is_empty() {
        return Err(anyhow!(
            "{} file(s) could not be migrated and were left unchanged",
            report.failed.len()
        ));
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
