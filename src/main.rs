mod analysis;
mod ast;
mod findings;
mod lexer;
mod parse;
mod report;
#[cfg(test)]
mod test_harness;

use std::fs;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// CLI arguments for nullflow execution.
#[derive(Parser, Debug)]
#[command(
    name = "nullflow",
    about = "Fast, deterministic nullability diagnostics for Java source files.",
    version
)]
struct Cli {
    #[arg(value_name = "INPUT")]
    input: PathBuf,
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
    #[arg(long)]
    quiet: bool,
    #[arg(long)]
    timing: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    if !cli.input.exists() {
        anyhow::bail!("input not found: {}", cli.input.display());
    }

    let started_at = Instant::now();
    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let parse_started_at = Instant::now();
    let unit = parse::parse_unit(&source);
    let parse_duration_ms = parse_started_at.elapsed().as_millis();
    let analysis_started_at = Instant::now();
    let findings = analysis::analyze_unit(&unit);
    let analysis_duration_ms = analysis_started_at.elapsed().as_millis();
    info!(
        "analyzed {} with {} findings",
        cli.input.display(),
        findings.len()
    );

    let mut writer = output_writer(&cli.output)?;
    report::write(&mut writer, &findings, &source)?;

    // --quiet wins over --timing
    if cli.timing && !cli.quiet {
        eprintln!(
            "timing: total_ms={} parse_ms={} analysis_ms={} findings={}",
            started_at.elapsed().as_millis(),
            parse_duration_ms,
            analysis_duration_ms,
            findings.len()
        );
    }

    Ok(())
}

fn output_writer(output: &Path) -> Result<Box<dyn Write>> {
    if output == Path::new("-") {
        return Ok(Box::new(io::stdout()));
    }
    Ok(Box::new(
        File::create(output).with_context(|| format!("failed to open {}", output.display()))?,
    ))
}

/// Initialize logging facade with stderr output.
fn init_logging(quiet: bool) {
    let default_filter = if quiet { "error" } else { "nullflow=info,warn" };
    let init_result = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    let _ = init_result;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cli_for(input: &Path, output: &Path) -> Cli {
        Cli {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            quiet: true,
            timing: false,
        }
    }

    #[test]
    fn run_writes_a_report_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("Test.java");
        let output = dir.path().join("report.json");
        fs::write(
            &input,
            "public class Test {\n    void check() {\n        String test = \"\";\n        if (test != null) {\n        }\n    }\n}\n",
        )
        .expect("write input");

        run(cli_for(&input, &output)).expect("run succeeds");

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).expect("read report"))
                .expect("report is valid JSON");
        assert_eq!(report[0]["kind"], "REDUNDANT_NOT_NULL_CHECK");
        assert_eq!(report[0]["sourceLine"], 4);
        assert_eq!(report[0]["offendingCode"], "test != null");
    }

    #[test]
    fn clean_input_produces_an_empty_report() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("Test.java");
        let output = dir.path().join("report.json");
        fs::write(&input, "public class Test {\n    void check() {\n    }\n}\n")
            .expect("write input");

        run(cli_for(&input, &output)).expect("run succeeds");

        assert_eq!(fs::read_to_string(&output).expect("read report"), "[]\n");
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = run(cli_for(
            &dir.path().join("absent.java"),
            &dir.path().join("report.json"),
        ));
        assert!(result.is_err());
    }
}
