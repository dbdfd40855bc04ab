use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use sheetrename_core::checks::registry;
use sheetrename_core::config::DEFAULT_CONFIG_FILE;
use sheetrename_core::{Error, NamingTemplate, RenamerConfig, Renamer, Severity};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod formatter;

#[derive(Parser)]
#[command(name = "sheetrename")]
#[command(about = "Rename a folder of PDFs from the rows of a spreadsheet", long_about = None)]
#[command(version)]
struct Cli {
    /// Spreadsheet with one row per file (xlsx, xlsm, xlsb, xls, ods)
    #[arg(short, long, value_name = "FILE")]
    spreadsheet: PathBuf,

    /// Folder holding the files to rename
    #[arg(long, value_name = "DIR", required_unless_present = "list_columns")]
    folder: Option<PathBuf>,

    /// Columns used to build the new names, in order
    #[arg(long, value_name = "COLUMN", num_args = 1..)]
    columns: Vec<String>,

    /// Name template, e.g. "{Invoice} - {Client}"
    #[arg(short, long, value_name = "TEMPLATE", conflicts_with = "separator")]
    template: Option<String>,

    /// Text placed between columns when no template is given; one value
    /// per gap, or a single value for every gap
    #[arg(long, value_name = "SEP", num_args = 1..)]
    separator: Vec<String>,

    /// Sheet to read instead of the first one
    #[arg(long, value_name = "NAME")]
    sheet: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print the spreadsheet's column names and exit
    #[arg(long)]
    list_columns: bool,

    /// Split the folder's only PDF into parts of this many pages and rename
    /// the parts instead
    #[arg(long, value_name = "PAGES")]
    split_pages: Option<usize>,

    /// Show the plan and issues without renaming anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
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

fn load_config(cli: &Cli) -> Result<RenamerConfig> {
    let mut config = if let Some(config_path) = &cli.config {
        debug!(path = %config_path.display(), "loading config");
        RenamerConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Fall back to a config in the current directory when present
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
    };

    // Command line flags win over the file
    if let Some(sheet) = &cli.sheet {
        config.reader.sheet = Some(sheet.clone());
    }
    if let [separator] = cli.separator.as_slice() {
        config.naming.separator = separator.clone();
    }

    let valid_tokens = registry::get_all_valid_tokens();
    config
        .validate(&valid_tokens, &registry::mandatory_check_ids())
        .context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let renamer = Renamer::with_config(config);

    let table = renamer
        .load_table(&cli.spreadsheet, &cli.columns)
        .with_context(|| format!("Failed to read spreadsheet: {}", cli.spreadsheet.display()))?;

    if cli.list_columns {
        match cli.format {
            OutputFormat::Human => formatter::print_columns(&cli.spreadsheet, &table),
            OutputFormat::Json => formatter::print_columns_json(&cli.spreadsheet, &table)?,
        }
        return Ok(());
    }

    let Some(folder) = &cli.folder else {
        bail!("--folder is required unless --list-columns is given");
    };

    let scanned = renamer
        .scan(folder)
        .with_context(|| format!("Failed to scan folder: {}", folder.display()))?;
    // Parts are only written once the plan over them passes the checks
    let files = match cli.split_pages {
        Some(pages) => renamer
            .preview_split(&scanned, pages)
            .context("Failed to plan the split")?,
        None => {
            if scanned.len() == 1 && scanned.extension == "pdf" && table.len() > 1 {
                formatter::print_split_hint(&scanned.entries[0].path);
            }
            scanned.clone()
        }
    };

    let template = if cli.template.is_none() && cli.separator.len() > 1 {
        NamingTemplate::interleave(&cli.columns, &cli.separator)
            .map(|t| t.with_max_length(renamer.config().naming.max_name_length))
    } else {
        renamer.template(cli.template.as_deref(), &cli.columns)
    }
    .context("Invalid name template")?;
    let mut plan = renamer
        .plan(&files, &table, &template)
        .context("Failed to build rename plan")?;
    let issues = renamer.check(&plan).context("Failed to check rename plan")?;
    let blocked = issues.iter().any(|i| i.severity == Severity::Error);

    let report = if cli.dry_run || blocked {
        None
    } else {
        if let Some(pages) = cli.split_pages {
            let parts = renamer
                .split_single(&scanned, pages)
                .context("Failed to split PDF")?;
            plan = renamer
                .plan(&parts, &table, &template)
                .context("Failed to build rename plan")?;
        }
        match renamer.apply(&plan) {
            Ok(report) => Some(report),
            // The folder changed between the check and the rename
            Err(Error::Validation(late)) => {
                formatter::print_issues(&late);
                std::process::exit(1);
            }
            Err(Error::Interrupted { renamed, source }) => {
                formatter::print_renamed(&renamed);
                return Err(*source).context("Rename stopped partway");
            }
            Err(e) => return Err(e).context("Rename failed"),
        }
    };

    match cli.format {
        OutputFormat::Human => formatter::print_human(&plan, &issues, report.as_ref()),
        OutputFormat::Json => formatter::print_json(&plan, &issues, report.as_ref())?,
    }

    // Exit with appropriate code
    let exit_code = if blocked { 1 } else { 0 };
    std::process::exit(exit_code);
}
