use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use tokio::io::AsyncReadExt;

use phoenix_scan_console::client::config::ClientConfig;
use phoenix_scan_console::client::error::RETRY_HINT;
use phoenix_scan_console::client::formatters::render_html_report;
use phoenix_scan_console::client::models::report::{ScanReport, NO_WARNINGS_MESSAGE};
use phoenix_scan_console::client::services::scan_api::HttpScanBackend;
use phoenix_scan_console::client::services::scan_console::{ScanConsole, ScanView};
use phoenix_scan_console::common::models::{Language, RiskLevel, ScanInput};

const EXIT_SCAN_FAILED: u8 = 1;
const EXIT_EMPTY_INPUT: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "phoenix-scan", version, about = "Scan source code for dangerous operations")]
struct Cli {
    /// Source file to scan. Reads code from stdin when omitted.
    file: Option<PathBuf>,

    /// Language hint sent with pasted code (auto, python, js, ...)
    #[arg(short, long, default_value = "auto")]
    language: Language,

    /// Upload FILE as multipart instead of sending its text
    #[arg(long, requires = "file")]
    upload: bool,

    /// Also write a standalone HTML report to OUT
    #[arg(long, value_name = "OUT")]
    html: Option<PathBuf>,

    /// Print the raw scan result as JSON
    #[arg(long)]
    json: bool,

    /// Backend base URL; overrides SCAN_API_URL and SCAN_FILE_API_URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

/// Prints controller output to the terminal. Status and errors go to stderr.
struct TerminalView {
    color: bool,
    quiet: bool,
    empty_input: bool,
}

impl TerminalView {
    fn new(json: bool) -> Self {
        Self {
            color: !json && std::env::var_os("NO_COLOR").is_none(),
            quiet: json,
            empty_input: false,
        }
    }

    fn paint(&self, text: &str, level: &RiskLevel) -> String {
        if !self.color {
            return text.to_string();
        }
        match level {
            RiskLevel::Critical => text.red().bold().to_string(),
            RiskLevel::High => text.bright_red().to_string(),
            RiskLevel::Medium => text.yellow().to_string(),
            RiskLevel::Low => text.blue().to_string(),
            RiskLevel::Safe => text.green().to_string(),
            RiskLevel::Unknown(_) => text.to_string(),
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn print_report(&self, report: &ScanReport) {
        let badge = self.paint(&format!("⟦{}⟧", report.badge.text), &report.badge.level);
        let mut header = format!("{} Risk score: {}", badge, self.bold(&report.score.target().to_string()));
        if let Some(lang) = &report.language {
            header.push_str(&format!("  {}", self.dim(&format!("Language: {}", lang))));
        }
        println!("{}", header);
        println!();

        println!("{}", self.bold("Warnings"));
        if report.warnings.is_empty() {
            let msg = if self.color {
                NO_WARNINGS_MESSAGE.green().to_string()
            } else {
                NO_WARNINGS_MESSAGE.to_string()
            };
            println!("  {}", msg);
        }
        for w in &report.warnings {
            println!(
                "  {} {}  {}",
                self.paint("▲", &w.risk),
                self.bold(&format!("Line {}", w.line)),
                self.dim(&w.code)
            );
            println!("    {} {}", self.paint(&w.category, &w.risk), w.explanation);
        }

        if let Some(preview) = &report.preview {
            println!();
            println!("{}", self.bold("Code preview"));
            for line in &preview.lines {
                match &line.risk {
                    Some(risk) => println!("{} {} {}", self.paint("▶", risk), self.dim(&line.gutter()), self.paint(&line.text, risk)),
                    None => println!("  {} {}", self.dim(&line.gutter()), line.text),
                }
            }
        }

        if !report.summary.is_empty() {
            println!();
            println!("{}", self.bold("Risk summary"));
            for group in &report.summary.groups {
                let level = RiskLevel::parse(&group.risk);
                println!("  {}", self.paint(&format!("{} ({})", group.risk, group.total), &level));
                for (category, count) in &group.categories {
                    println!("    • {} ({})", category, count);
                }
            }
        }
    }
}

impl ScanView for TerminalView {
    fn reset_results(&mut self) {}

    fn show_status(&mut self, message: &str) {
        eprintln!("{}", self.dim(message));
    }

    fn show_error(&mut self, message: &str) {
        let mark = if self.color { "✖".red().to_string() } else { "✖".to_string() };
        eprintln!("{} {}", mark, message);
        eprintln!("{}", RETRY_HINT);
    }

    fn shake_input(&mut self) {
        self.empty_input = true;
        eprintln!("Nothing to scan: pass a FILE or pipe code on stdin.");
    }

    fn set_scan_enabled(&mut self, enabled: bool) {
        log::debug!("scan control enabled={}", enabled);
    }

    fn render_result(&mut self, report: &ScanReport) {
        if !self.quiet {
            self.print_report(report);
        }
    }
}

async fn read_input(cli: &Cli) -> anyhow::Result<Option<ScanInput>> {
    if cli.upload {
        // clap guarantees FILE is present with --upload
        return Ok(cli.file.clone().map(|path| ScanInput::File { path }));
    }
    let code = match &cli.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("cannot read code from stdin")?;
            buf
        }
    };
    Ok(ScanInput::resolve(&code, None, cli.language))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();
    env_logger::init();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(base) = &cli.base_url {
        config = config.with_base_url(base);
    }
    config.validate().map_err(anyhow::Error::msg)?;

    let input = read_input(&cli).await?;
    let backend = HttpScanBackend::new(&config)?;
    let mut console = ScanConsole::new(&config);
    let mut view = TerminalView::new(cli.json);

    let Some(outcome) = console.run_scan(&backend, input, &mut view).await else {
        return Ok(if view.empty_input {
            ExitCode::from(EXIT_EMPTY_INPUT)
        } else {
            ExitCode::from(EXIT_SCAN_FAILED)
        });
    };

    let result = match &outcome.result {
        Ok(result) => result,
        Err(_) => return Ok(ExitCode::from(EXIT_SCAN_FAILED)),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    }

    if let Some(out) = &cli.html {
        let subject = cli
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdin".to_string());
        let html = render_html_report(result, outcome.source.as_deref(), &subject);
        tokio::fs::write(out, html)
            .await
            .with_context(|| format!("cannot write {}", out.display()))?;
        eprintln!("HTML report written to {}", out.display());
    }

    Ok(ExitCode::SUCCESS)
}
