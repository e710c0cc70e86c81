//! dynform CLI
//!
//! Command-line tool for checking, rendering, validating and submitting
//! schema-driven forms.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_dynform::{FormConfig, FormController, FormData, FormSettings, SubmitOutcome};

/// Schema-driven forms from the command line.
#[derive(Parser)]
#[command(name = "dynform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (JSON). Built-in defaults are used when omitted.
    #[arg(short, long, env = "DYNFORM_SETTINGS")]
    settings: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a schema, check it and print its fields.
    Check {
        /// Schema file (JSON).
        schema: PathBuf,
    },

    /// Print the form as HTML.
    Render {
        /// Schema file (JSON).
        schema: PathBuf,

        /// Values to fill in before rendering (JSON object).
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Validate values against a schema and print the error map.
    Validate {
        /// Schema file (JSON).
        schema: PathBuf,

        /// Values to validate (JSON object).
        data: PathBuf,
    },

    /// Validate and submit values with the simulated handler.
    Submit {
        /// Schema file (JSON).
        schema: PathBuf,

        /// Values to submit (JSON object).
        data: PathBuf,
    },
}

fn load_controller(schema: &Path, settings: &FormSettings) -> anyhow::Result<FormController> {
    let config = FormConfig::from_path(schema)
        .with_context(|| format!("failed to load schema {}", schema.display()))?;
    Ok(FormController::new(config)?.with_settings(settings.clone()))
}

fn load_data(path: &Path) -> anyhow::Result<FormData> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let data = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON object of field values", path.display()))?;
    Ok(data)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = match &cli.settings {
        Some(path) => FormSettings::from_path(path)
            .with_context(|| format!("failed to load settings {}", path.display()))?,
        None => FormSettings::default(),
    };

    match cli.command {
        Commands::Check { schema } => {
            let controller = load_controller(&schema, &settings)?;
            let config = controller.config();

            println!("\n{}", config.title);
            println!("{:-<60}", "");
            for section in &config.sections {
                println!("[{}] {}", section.name, section.title);
                for field in &section.fields {
                    let marker = if field.required { " *" } else { "" };
                    println!("  {:<24} {:<10}{}", field.name, field.field_type, marker);
                }
            }
            println!();
            info!(
                sections = config.sections.len(),
                fields = config.fields().count(),
                "schema is valid"
            );
        }

        Commands::Render { schema, data } => {
            let mut controller = load_controller(&schema, &settings)?;
            if let Some(path) = data {
                controller.fill(load_data(&path)?)?;
            }
            println!("{}", controller.render());
        }

        Commands::Validate { schema, data } => {
            let mut controller = load_controller(&schema, &settings)?;
            controller.fill(load_data(&data)?)?;

            let valid = controller.validate();
            println!("{}", serde_json::to_string_pretty(controller.errors())?);
            if !valid {
                bail!("{} field(s) failed validation", controller.errors().len());
            }
            info!("all fields are valid");
        }

        Commands::Submit { schema, data } => {
            let mut controller = load_controller(&schema, &settings)?;
            controller.fill(load_data(&data)?)?;

            match controller.submit().await {
                SubmitOutcome::Succeeded => println!("{}", settings.success_title),
                SubmitOutcome::Invalid { focus } => {
                    println!("{}", serde_json::to_string_pretty(controller.errors())?);
                    bail!(
                        "submission blocked by validation, first field: {}",
                        focus.unwrap_or_default()
                    );
                }
                SubmitOutcome::Failed(err) => bail!(err),
                SubmitOutcome::Busy => bail!("a submission is already in flight"),
            }
        }
    }

    Ok(())
}
