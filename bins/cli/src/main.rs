//! Ledgerlens command-line interface.
//!
//! Reads trial balances exported as JSON, classifies them and prints the
//! results or the rendered statements as JSON on stdout. Logs go to stderr.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use ledgerlens_core::classification::{
    ClassificationRule, Classifier, LedgerRow, RuleTable, SavedMappings,
};
use ledgerlens_core::reports::{
    LabelCatalog, ReportService, StatementStructure, note_config_summary, validate_note_config,
};
use ledgerlens_shared::types::Constitution;
use ledgerlens_shared::{AppConfig, AppError};

#[derive(Parser)]
#[command(name = "ledgerlens")]
#[command(about = "Classify trial balances and build Schedule III statements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify trial balance rows and print them with a reclassification summary
    Classify(ClassifyArgs),

    /// Classify both periods and print the Balance Sheet and P&L
    Report {
        #[command(flatten)]
        inputs: ClassifyArgs,

        /// Prior period trial balance (JSON array of rows)
        #[arg(long)]
        previous: Option<PathBuf>,

        /// Entity constitution (company, llp, partnership, ...)
        #[arg(long, env = "LEDGERLENS_CONSTITUTION")]
        constitution: Option<String>,
    },

    /// Print the configured note number ranges
    Notes,
}

#[derive(Args)]
struct ClassifyArgs {
    /// Current period trial balance (JSON array of rows)
    input: PathBuf,

    /// Saved manual mappings, a JSON object keyed by `ledger|group`
    #[arg(long)]
    saved: Option<PathBuf>,

    /// User-defined rules, replacing the configured file
    #[arg(long)]
    user_rules: Option<PathBuf>,

    /// Group mapping table, replacing the configured table
    #[arg(long)]
    mapping_table: Option<PathBuf>,
}

/// Inputs shared by every classification run.
struct Engine {
    classifier: Classifier,
    saved: SavedMappings,
    user_rules: Vec<ClassificationRule>,
}

impl Engine {
    fn load(args: &ClassifyArgs, config: &AppConfig) -> anyhow::Result<Self> {
        let rules = match args
            .mapping_table
            .as_ref()
            .or(config.rules.mapping_table_path.as_ref())
        {
            Some(path) => {
                let raw = read_file(path)?;
                let table = RuleTable::from_json(&raw)
                    .map_err(AppError::from)
                    .with_context(|| format!("loading mapping table {}", path.display()))?;
                info!(
                    path = %path.display(),
                    rules = table.mapping_rules().len(),
                    "Loaded mapping table"
                );
                table
            }
            None => RuleTable::standard(),
        };

        let user_rules = match args
            .user_rules
            .as_ref()
            .or(config.rules.user_rules_path.as_ref())
        {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };

        let saved = match &args.saved {
            Some(path) => read_json(path)?,
            None => SavedMappings::new(),
        };

        Ok(Self {
            classifier: Classifier::new(Arc::new(rules)),
            saved,
            user_rules,
        })
    }

    fn classify(&self, path: &Path) -> anyhow::Result<Vec<LedgerRow>> {
        let rows: Vec<LedgerRow> = read_json(path)?;
        Ok(self
            .classifier
            .classify_all(&rows, &self.saved, &self.user_rules))
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => return fail(&AppError::from(err).into()),
    };
    init_tracing(&config);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Classify(inputs) => {
            let engine = Engine::load(&inputs, config)?;
            let rows = engine.classify(&inputs.input)?;
            let reclassifications = engine.classifier.reclassification_summary(&rows);
            print_json(&serde_json::json!({
                "rows": rows,
                "reclassifications": reclassifications,
            }))
        }
        Commands::Report {
            inputs,
            previous,
            constitution,
        } => {
            let engine = Engine::load(&inputs, config)?;
            let current = engine.classify(&inputs.input)?;
            let previous = match previous {
                Some(path) => engine.classify(&path)?,
                None => Vec::new(),
            };
            let constitution = constitution
                .as_deref()
                .map_or(config.engagement.constitution, Constitution::from_code);

            let statements = ReportService::build(
                &current,
                &previous,
                &StatementStructure::schedule_iii(),
                &LabelCatalog::standard(),
                &config.engagement.note_numbering,
                constitution,
            )
            .map_err(AppError::from)?;
            print_json(&statements)
        }
        Commands::Notes => {
            let notes = &config.engagement.note_numbering;
            validate_note_config(notes).map_err(AppError::from)?;
            println!("{}", note_config_summary(notes));
            Ok(())
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).map_err(|err| {
        let message = format!("{}: {err}", path.display());
        let err = if err.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound(message)
        } else {
            AppError::InvalidInput(message)
        };
        anyhow::Error::from(err)
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = read_file(path)?;
    let value = serde_json::from_str(&raw)
        .map_err(AppError::from)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(value)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Internal(err.to_string()))?;
    println!("{out}");
    Ok(())
}

fn fail(err: &anyhow::Error) -> ExitCode {
    let (code, exit) = err
        .downcast_ref::<AppError>()
        .map_or(("INTERNAL_ERROR", 70), |app| (app.error_code(), app.exit_code()));
    eprintln!(
        "{}",
        serde_json::json!({ "error": code, "message": format!("{err:#}") })
    );
    ExitCode::from(u8::try_from(exit).unwrap_or(1))
}
