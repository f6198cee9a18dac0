mod client;
mod config;
mod downloads;
mod errors;
mod form;
mod handler;
mod models;
mod page;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::GenerateClient;
use crate::config::Config;
use crate::downloads::save_downloads;
use crate::form::{is_resume_field, parse_field, FormData, RESUME_FIELDS};
use crate::handler::{FormSubmissionHandler, SubmitOutcome};
use crate::page::PageHandles;

/// Submit a resume form to the generator service and show the result.
#[derive(Debug, Parser)]
#[command(version, after_help = field_help())]
struct Cli {
    /// Base URL of the resume service [env: RESUME_API_URL]
    #[arg(long)]
    api_url: Option<String>,

    /// Form field as NAME=VALUE; repeatable
    #[arg(short = 'f', long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// More form fields as NAME=VALUE, after the flagged ones
    #[arg(value_parser = parse_field)]
    extra_fields: Vec<(String, String)>,

    /// How to print the page
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Fetch the PDF and DOCX into this directory after a successful run
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Html,
}

fn field_help() -> String {
    format!(
        "Form fields: {}\nskills and languages take comma-separated values.",
        RESUME_FIELDS.join(", ")
    )
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr; stdout carries the rendered page
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api_url = config.resolve_api_url(cli.api_url)?;

    let form: FormData = cli.fields.into_iter().chain(cli.extra_fields).collect();
    if form.is_empty() {
        warn!("No form fields given; the server will report the required ones as missing");
    }
    for (name, _) in form.iter() {
        if !is_resume_field(name) {
            warn!("'{name}' is not a resume form field; sending it anyway");
        }
    }

    let client = Arc::new(GenerateClient::new(&api_url).context("Failed to build HTTP client")?);
    info!("Submitting resume form to {api_url}");

    let page = Arc::new(Mutex::new(PageHandles::new()));
    let handler = FormSubmissionHandler::new(client.clone(), page);

    let outcome = handler.submit(&form).await?;
    let snapshot = handler.page_snapshot();

    match cli.format {
        Format::Text => print!("{}", render::page_text(&snapshot)),
        Format::Html => print!("{}", render::page_html(&snapshot)),
    }

    if outcome != SubmitOutcome::Generated {
        return Ok(ExitCode::FAILURE);
    }

    if let Some(dir) = cli.download_dir {
        let saved = save_downloads(client.as_ref(), &snapshot, &dir)
            .await
            .with_context(|| format!("Failed to download resume files into {}", dir.display()))?;
        for path in saved {
            eprintln!("Saved {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
