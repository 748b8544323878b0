//! Process command - extract transaction data from a single receipt file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use retex_core::models::config::RetexConfig;
use retex_core::models::record::TransactionRecord;
use retex_core::{decode_content, ExtractorManager, OcrEngine};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, HTML, image, or plain text)
    #[arg(required = true)]
    input: PathBuf,

    /// Source URL the receipt was downloaded from (enables
    /// URL-based transaction id recovery)
    #[arg(short, long, default_value = "")]
    url: String,

    /// Declared media type (default: guessed from the file extension)
    #[arg(short, long)]
    media_type: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory for OCR (overrides config)
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = if let Some(path) = config_path {
        RetexConfig::from_file(std::path::Path::new(path))?
    } else {
        RetexConfig::default()
    };

    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    info!("Processing file: {}", args.input.display());
    let content = fs::read(&args.input)?;

    let text = match extension.as_str() {
        "png" | "jpg" | "jpeg" | "tiff" | "bmp" => {
            let engine = OcrEngine::from_config(config.ocr.clone())?;
            engine.decode_image(&content)?
        }
        _ => {
            let media_type = args
                .media_type
                .clone()
                .unwrap_or_else(|| guess_media_type(&extension).to_string());
            decode_content(&content, &media_type, &config.decode)?
        }
    };

    let manager = ExtractorManager::new();
    let record = manager.extract_transaction(&text, &args.url);

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&record)?,
        OutputFormat::Text => format_text(&record),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!("Wrote result to {}", output_path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn guess_media_type(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "html" | "htm" => "text/html",
        _ => "text/plain",
    }
}

fn format_text(record: &TransactionRecord) -> String {
    let mut lines = Vec::new();

    if record.is_valid {
        lines.push(format!("{}", style("Transaction verified").green().bold()));
    } else {
        lines.push(format!("{}", style("Transaction not verified").red().bold()));
        if let Some(error) = &record.error {
            lines.push(format!("  error: {}", error));
        }
    }

    lines.push(format!("  extractor: {}", record.extractor_used));

    let fields = [
        ("transaction id", &record.transaction_id),
        ("amount (ETB)", &record.amount),
        ("date", &record.date),
        ("payer", &record.payer_name),
        ("receiver", &record.receiver),
        ("account", &record.account),
        ("receiver account", &record.receiver_account),
        ("receiver bank", &record.receiver_bank),
        ("type", &record.transaction_type),
        ("charge", &record.charge),
        ("branch", &record.branch),
    ];

    for (label, value) in fields {
        if let Some(value) = value {
            lines.push(format!("  {}: {}", label, value));
        }
    }

    lines.join("\n")
}
