//! vlint CLI - one-shot lint driver.
//!
//! Stands in for the editor integration layer: feeds documents to the
//! [`LintManager`], drains its event channel for progress and failure
//! reporting, and prints the resulting diagnostics.
//!
//! Diagnostics go to stdout; logs and tool failures go to stderr so the
//! output stays pipeable.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use vlint_config::LintConfig;
use vlint_lint::{LintEvent, LintManager};

const USAGE: &str = "\
Usage: vlint [OPTIONS] FILES...

Lint Verilog/SystemVerilog files with the configured external tools.

Options:
  --config PATH   Read configuration from PATH instead of vlint.toml
  --tool NAME     Run a single tool instead of all enabled tools
  -h, --help      Print this help
";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    config: Option<PathBuf>,
    tool: Option<String>,
    files: Vec<PathBuf>,
    help: bool,
}

fn parse_cli_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--config" => {
                let value = args.next().context("--config requires a path")?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--tool" => {
                let value = args.next().context("--tool requires a tool name")?;
                parsed.tool = Some(value);
            }
            other if other.starts_with('-') => bail!("unknown option: {other}"),
            other => parsed.files.push(PathBuf::from(other)),
        }
    }
    Ok(parsed)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn load_config(args: &CliArgs) -> Result<LintConfig> {
    if let Some(path) = &args.config {
        return LintConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()));
    }
    Ok(LintConfig::load()
        .context("loading vlint.toml")?
        .unwrap_or_default())
}

async fn run(args: CliArgs) -> Result<bool> {
    let config = load_config(&args)?;
    let workspace_root = env::current_dir().ok();
    let (manager, mut event_rx) = LintManager::new(config, workspace_root);

    if let Some(tool) = &args.tool
        && !manager.tool_names().contains(&tool.as_str())
    {
        bail!(
            "unknown tool '{tool}' (registered tools: {})",
            manager.tool_names().join(", ")
        );
    }

    let reporter = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                LintEvent::ToolFailed { tool, error, .. } => {
                    eprintln!("vlint: {tool}: {error}");
                }
                LintEvent::ToolStarted { document, tool } => {
                    eprintln!("vlint: running {tool} on {}", document.display());
                }
                LintEvent::Updated { .. }
                | LintEvent::Cleared { .. }
                | LintEvent::ToolFinished { .. } => {}
            }
        }
    });

    for file in &args.files {
        match &args.tool {
            Some(tool) => {
                manager.lint_with_tool(file, tool).await?;
            }
            None => manager.lint_document(file).await,
        }
    }

    let snapshot = manager.snapshot();
    drop(manager);
    let _ = reporter.await;

    let mut has_errors = false;
    for (_, diagnostics) in &snapshot {
        for diagnostic in diagnostics {
            has_errors |= diagnostic.severity().is_error();
            println!("{diagnostic}");
        }
    }
    Ok(has_errors)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = match parse_cli_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("vlint: {e}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    if args.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    if args.files.is_empty() {
        eprintln!("vlint: no input files\n\n{USAGE}");
        return ExitCode::from(2);
    }

    match run(args).await {
        Ok(true) => ExitCode::FAILURE,
        Ok(false) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("vlint: {e:#}");
            ExitCode::from(2)
        }
    }
}
