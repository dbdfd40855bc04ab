use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use colored::*;
use sheetrename_core::checks::registry;
use sheetrename_core::config::DEFAULT_CONFIG_FILE;
use sheetrename_core::split::{page_count, plan_split};
use sheetrename_core::{RenamerConfig, SplitOptions, SplitPart, split_pdf};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdfsplit")]
#[command(about = "Split a PDF into parts of N pages", long_about = None)]
#[command(version)]
struct Cli {
    /// PDF to split
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Pages per part (defaults to the config value, then 1)
    #[arg(short, long, value_name = "PAGES")]
    pages: Option<usize>,

    /// Where to write the parts (defaults to a folder next to FILE)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// List the parts without writing them
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<RenamerConfig> {
    let config = match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            RenamerConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => {
            let default_config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_config_path.exists() {
                debug!(path = %default_config_path.display(), "loading config");
                RenamerConfig::from_file(&default_config_path).with_context(|| {
                    format!(
                        "Failed to load config from {}",
                        default_config_path.display()
                    )
                })?
            } else {
                debug!("no config file, using defaults");
                RenamerConfig::default()
            }
        }
    };

    config
        .validate(
            &registry::get_all_valid_tokens(),
            &registry::mandatory_check_ids(),
        )
        .context("Invalid configuration")?;
    Ok(config)
}

fn print_parts(parts: &[SplitPart]) {
    for part in parts {
        let pages = if part.first_page == part.last_page {
            format!("page {}", part.first_page)
        } else {
            format!("pages {}-{}", part.first_page, part.last_page)
        };
        println!("  {:>4}  {:<14} {}", part.index, pages, part.path.display());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    let mut options = SplitOptions::from_config(&config.split);
    if let Some(pages) = cli.pages {
        if pages == 0 {
            bail!("--pages must be at least 1");
        }
        options.pages_per_part = pages;
    }
    if let Some(dir) = &cli.output_dir {
        options = options.with_output_dir(dir);
    }

    debug!(
        pages_per_part = options.pages_per_part,
        output_dir = %options.output_dir(&cli.file).display(),
        "split options"
    );
    println!("{}", format!("Splitting: {}", cli.file.display()).bold());

    if cli.dry_run {
        let total = page_count(&cli.file)
            .with_context(|| format!("Failed to read PDF: {}", cli.file.display()))?;
        let parts = plan_split(&cli.file, total, &options);
        print_parts(&parts);
        println!(
            "{}",
            format!("Dry run: {} pages into {} parts", total, parts.len()).yellow()
        );
        return Ok(());
    }

    let report = split_pdf(&cli.file, &options)
        .with_context(|| format!("Failed to split PDF: {}", cli.file.display()))?;
    print_parts(&report.parts);
    println!(
        "{}",
        format!(
            "✓ Wrote {} parts from {} pages",
            report.parts.len(),
            report.total_pages
        )
        .green()
        .bold()
    );
    Ok(())
}
