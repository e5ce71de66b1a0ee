//! Parse command - extract fields from the front and back of one card.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use idcard_core::models::config::UploadConfig;
use idcard_core::{
    analyze_id_card, extract_text_lines, CardAnalysis, CardParser, Field, IdCardParser,
    IdCardResult, PureOcrEngine, RawText,
};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Front side: detection dump (.json) or image (.png, .jpg)
    #[arg(long, required = true)]
    front: PathBuf,

    /// Back side: detection dump (.json) or image (.png, .jpg)
    #[arg(long, required = true)]
    back: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Show per-field confidence scores
    #[arg(long)]
    show_confidence: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Parsed card as written by the CLI: both sides plus newline-joined raw text.
#[derive(Debug, Serialize)]
pub struct CardResponse {
    #[serde(flatten)]
    pub result: IdCardResult,
    pub raw_text: JoinedText,
}

#[derive(Debug, Serialize)]
pub struct JoinedText {
    pub front: String,
    pub back: String,
}

impl From<CardAnalysis> for CardResponse {
    fn from(analysis: CardAnalysis) -> Self {
        let (front, back) = analysis.raw_text.joined();
        Self {
            result: analysis.result,
            raw_text: JoinedText { front, back },
        }
    }
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(model_dir) = &args.model_dir {
        config.ocr.model_dir = model_dir.clone();
    }

    for input in [&args.front, &args.back] {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    let analysis = match (input_kind(&args.front)?, input_kind(&args.back)?) {
        (InputKind::Detections, InputKind::Detections) => {
            info!("Parsing detection dumps");
            let front = read_detections(&args.front)?;
            let back = read_detections(&args.back)?;
            analyze_detections(&front, &back)
        }
        (InputKind::Image, InputKind::Image) => {
            let front = read_upload("front_image", &args.front, &config.upload)?;
            let back = read_upload("back_image", &args.back, &config.upload)?;

            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
            );
            pb.set_message("Loading OCR models...");

            let engine = PureOcrEngine::from_config(&config.ocr)?;

            pb.set_message("Recognizing text...");
            let analysis = analyze_id_card(&engine, &front, &back)?;
            pb.finish_and_clear();
            analysis
        }
        _ => anyhow::bail!("Front and back must both be detection dumps or both be images"),
    };

    let response = CardResponse::from(analysis);
    let output = format_response(&response, args.format, args.show_confidence)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_confidence {
        let missing = response.result.missing_fields();
        eprintln!();
        eprintln!(
            "{} Recognized {}/{} fields",
            style("ℹ").blue(),
            Field::ALL.len() - missing.len(),
            Field::ALL.len()
        );
        if !missing.is_empty() {
            let names: Vec<_> = missing.iter().map(|f| f.key()).collect();
            eprintln!("{} Missing: {}", style("⚠").yellow(), names.join(", "));
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

#[derive(Debug, PartialEq)]
enum InputKind {
    Detections,
    Image,
}

fn input_kind(path: &Path) -> anyhow::Result<InputKind> {
    match extension(path).as_str() {
        "json" => Ok(InputKind::Detections),
        "png" | "jpg" | "jpeg" => Ok(InputKind::Image),
        other => anyhow::bail!("Unsupported file format: {}", other),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Read a raw detection dump (a JSON array, nested as the recognizer emits it).
pub fn read_detections(path: &Path) -> anyhow::Result<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    let detections: Vec<Value> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid detection dump {}: {}", path.display(), e))?;
    debug!("Read {} detections from {}", detections.len(), path.display());
    Ok(detections)
}

fn read_upload(field: &str, path: &Path, upload: &UploadConfig) -> anyhow::Result<Vec<u8>> {
    let data = fs::read(path)?;
    upload.validate(field, &extension(path), &data)?;
    Ok(data)
}

/// Parse both sides from raw detections, keeping their display text.
pub fn analyze_detections(front: &[Value], back: &[Value]) -> CardAnalysis {
    CardAnalysis {
        result: IdCardParser::new().parse(front, back),
        raw_text: RawText {
            front: extract_text_lines(front),
            back: extract_text_lines(back),
        },
    }
}

pub fn format_response(
    response: &CardResponse,
    format: OutputFormat,
    show_confidence: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Csv => format_csv(&response.result),
        OutputFormat::Text => Ok(format_text(&response.result, show_confidence)),
    }
}

fn side(field: Field) -> &'static str {
    if Field::FRONT.contains(&field) {
        "front"
    } else {
        "back"
    }
}

fn format_csv(result: &IdCardResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["side", "field", "value", "confidence"])?;

    for field in Field::ALL {
        let extracted = result.field(field);
        wtr.write_record([
            side(field),
            field.key(),
            extracted.value.as_deref().unwrap_or(""),
            &extracted
                .confidence
                .map(|c| format!("{:.4}", c))
                .unwrap_or_default(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &IdCardResult, show_confidence: bool) -> String {
    let mut output = String::new();

    for (title, fields) in [("Front:", &Field::FRONT[..]), ("Back:", &Field::BACK[..])] {
        output.push_str(title);
        output.push('\n');
        for field in fields {
            let extracted = result.field(*field);
            let value = extracted.value.as_deref().unwrap_or("-");
            match extracted.confidence {
                Some(confidence) if show_confidence => output.push_str(&format!(
                    "  {:<18} {} ({:.1}%)\n",
                    field.key(),
                    value,
                    confidence * 100.0
                )),
                _ => output.push_str(&format!("  {:<18} {}\n", field.key(), value)),
            }
        }
    }

    output
}
