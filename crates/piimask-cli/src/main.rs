//! piimask CLI
//!
//! Classifies and redacts PII in a `record_id,data_json` CSV file.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use piimask_core::{AadharMask, Pipeline, RedactionPolicy, ShortValueMask};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "piimask")]
#[command(about = "Detect and redact PII in tabular records", long_about = None)]
struct Cli {
    /// Input CSV with `record_id,data_json` columns
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output CSV (default: redacted_output_<input stem>.csv next to the input)
    #[arg(short, long, value_name = "FILE", env = "PIIMASK_OUTPUT")]
    output: Option<PathBuf>,

    /// How to mask one-character name parts
    #[arg(long, value_enum, default_value_t = ShortValues::MaskAll)]
    short_values: ShortValues,

    /// Layout of the masked aadhar digits
    #[arg(long, value_enum, default_value_t = AadharLayout::FixedWidth)]
    aadhar_mask: AadharLayout,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "PIIMASK_LOG_FORMAT")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum ShortValues {
    MaskAll,
    KeepFirst,
}

#[derive(Clone, Copy, ValueEnum)]
enum AadharLayout {
    FixedWidth,
    Proportional,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Cli {
    fn policy(&self) -> RedactionPolicy {
        RedactionPolicy::builder()
            .short_value(match self.short_values {
                ShortValues::MaskAll => ShortValueMask::MaskAll,
                ShortValues::KeepFirst => ShortValueMask::KeepFirst,
            })
            .aadhar_mask(match self.aadhar_mask {
                AadharLayout::FixedWidth => AadharMask::FixedWidth,
                AadharLayout::Proportional => AadharMask::Proportional,
            })
            .build()
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string());
    input.with_file_name(format!("redacted_output_{stem}.csv"))
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Json => {
            let subscriber = FmtSubscriber::builder()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    let output = cli.output_path();
    let pipeline = Pipeline::new(cli.policy());
    let summary = piimask_core::process_file(&pipeline, &cli.input, &output)
        .with_context(|| format!("failed to process {}", cli.input.display()))?;

    tracing::info!(
        input = %cli.input.display(),
        output = %output.display(),
        records = summary.total,
        pii = summary.pii,
        decode_failures = summary.decode_failures,
        "Processing complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_uses_input_stem() {
        assert_eq!(
            default_output_path(Path::new("/data/iscp_pii_dataset.csv")),
            PathBuf::from("/data/redacted_output_iscp_pii_dataset.csv")
        );
    }

    #[test]
    fn test_cli_parses_policy_flags() {
        let cli = Cli::try_parse_from([
            "piimask",
            "in.csv",
            "--short-values",
            "keep-first",
            "--aadhar-mask",
            "proportional",
            "-o",
            "out.csv",
        ])
        .unwrap();
        let policy = cli.policy();
        assert_eq!(policy.short_value(), ShortValueMask::KeepFirst);
        assert_eq!(policy.aadhar_mask(), AadharMask::Proportional);
        assert_eq!(cli.output_path(), PathBuf::from("out.csv"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["piimask", "in.csv"]).unwrap();
        assert_eq!(cli.policy(), RedactionPolicy::default());
    }
}
