//! a11y-hook CLI - accessibility audit for JSX-like markup
//!
//! Renders each document through the hooked markup host and prints the
//! failures recorded for it.

use a11y_hook::config::Config;
use a11y_hook::output::{audit, JsonFormatter, OutputFormatter, Summary, TextFormatter};
use a11y_hook::{builtin_rules, install, LogChannel, MarkupHost, Options, Rule, Severity};
use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use glob::glob;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "a11y-hook",
    version,
    about = "Accessibility audit for UI component trees",
    long_about = "Runs the accessibility rule catalog over every node of JSX-like markup files."
)]
struct Cli {
    /// Files or glob patterns to audit
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target device tags (comma-separated, e.g. 'mobile')
    #[arg(short, long, value_delimiter = ',')]
    device: Option<Vec<String>>,

    /// Only report nodes with these ids (comma-separated)
    #[arg(long, value_delimiter = ',')]
    only_id: Option<Vec<String>>,

    /// Only report nodes with these tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    only_tag: Option<Vec<String>>,

    /// Disable specific rules or patterns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Option<Vec<String>>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// List available rules and exit
    #[arg(long)]
    list_rules: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if cli.list_rules {
        println!("{}", "Available rules:".bold());
        println!();
        for rule in builtin_rules() {
            print_rule(&rule);
        }
        return Ok(0);
    }

    if cli.files.is_empty() {
        bail!("No files specified\n\nUsage: a11y-hook [OPTIONS] <FILES>...");
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_default().unwrap_or_default(),
    };

    config.merge(Config {
        device: cli.device.unwrap_or_default(),
        rules: a11y_hook::config::RulesConfig {
            disabled: cli.disable.unwrap_or_default(),
            ..Default::default()
        },
        filter: a11y_hook::config::FilterConfig {
            tags: cli.only_tag.unwrap_or_default(),
            ids: cli.only_id.unwrap_or_default(),
        },
    });

    let files = expand_patterns(&cli.files)?;
    if files.is_empty() {
        bail!("No files found to audit");
    }

    let mut host = MarkupHost::new();
    let handle = install(
        &mut host,
        Options::from_config(config).with_channel(LogChannel),
    );

    let mut reports = Vec::with_capacity(files.len());
    for path in files {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        reports.push(audit(&mut host, &handle, path, &content));
    }

    let output = match cli.format {
        Format::Text => {
            let mut formatter = TextFormatter::new();
            if cli.no_color {
                formatter = formatter.without_color();
            }
            formatter.format(&reports)
        }
        Format::Json => JsonFormatter::new().pretty().format(&reports),
    };
    print!("{}", output);
    if matches!(cli.format, Format::Json) {
        println!();
    }

    Ok(Summary::from_reports(&reports).exit_code())
}

fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let paths = glob(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))?;
        files.extend(paths.flatten().filter(|p| p.is_file()));
    }
    Ok(files)
}

fn print_rule(rule: &Rule) {
    let severity = match rule.severity {
        Severity::Error => "error".red(),
        Severity::Warning => "warning".yellow(),
        Severity::Info => "info".blue(),
    };

    println!("  {} [{}]", rule.id.cyan(), severity);
    if let Some(desc) = &rule.description {
        println!("      {}", desc);
    }
    if !rule.exempt_devices.is_empty() {
        println!("      Exempt on: {}", rule.exempt_devices.join(", "));
    }
    if !rule.tags.is_empty() {
        println!("      Tags: {}", rule.tags.join(", "));
    }
    if let Some(docs) = &rule.docs {
        println!("      Docs: {}", docs.dimmed());
    }
}
