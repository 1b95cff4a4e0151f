use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use go_perf::config::CONFIG_FILE_NAME;
use go_perf::discovery::DiscoveryOptions;
use go_perf::{Config, Engine, FailurePolicy, Impact};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "go-perf")]
#[command(about = "Preventive performance analysis for Go")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze Go source code for performance issues
    #[command(visible_alias = "a")]
    Analyze {
        /// Go file or directory to analyze
        path: PathBuf,

        /// Output format (overrides go-perf.toml)
        #[arg(short, long)]
        output: Option<OutputFormat>,

        /// Show descriptions and suggestions for each issue
        #[arg(short, long)]
        verbose: bool,

        /// Minimum impact to report
        #[arg(long, default_value = "low")]
        min_impact: Impact,

        /// Fail if any issue meets this impact
        #[arg(long)]
        fail_on: Option<Impact>,

        /// Abort on the first file that cannot be read
        #[arg(long)]
        fail_fast: bool,
    },
    /// Quick performance check (high-impact issues only)
    #[command(visible_alias = "c")]
    Check {
        /// Go file or directory to check
        path: PathBuf,
    },
    /// List structural rules and fallback patterns
    Rules,
    /// Initialize go-perf.toml config
    Init {
        /// Directory to create the config in
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Console,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            output,
            verbose,
            min_impact,
            fail_on,
            fail_fast,
        } => {
            go_perf::logging::init_tracing(if verbose { "info" } else { "warn" });
            let config = Config::load_or_default(&path)?;
            let format = match output {
                Some(format) => format,
                None => parse_format(&config.output.format)?,
            };
            run_analyze(
                &path,
                &config,
                AnalyzeOptions {
                    format,
                    verbose,
                    min_impact,
                    fail_on,
                    fail_fast,
                },
            )
        }
        Commands::Check { path } => {
            go_perf::logging::init_tracing("warn");
            let config = Config::load_or_default(&path)?;
            run_check(&path, &config)
        }
        Commands::Rules => run_list_rules(),
        Commands::Init { path } => run_init(&path),
    }
}

struct AnalyzeOptions {
    format: OutputFormat,
    verbose: bool,
    min_impact: Impact,
    fail_on: Option<Impact>,
    fail_fast: bool,
}

fn parse_format(name: &str) -> Result<OutputFormat> {
    match name {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        other => anyhow::bail!("Unknown output format: {}", other),
    }
}

fn apply_color_mode(config: &Config) {
    match config.output.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {}
    }
}

fn build_engine(config: &Config, fail_fast: bool) -> Engine {
    let policy = if fail_fast || config.analysis.fail_fast {
        FailurePolicy::FailFast
    } else {
        FailurePolicy::Isolate
    };
    Engine::new()
        .failure_policy(policy)
        .discovery_options(DiscoveryOptions::with_excludes(
            config.analysis.exclude.clone(),
        ))
}

fn run_analyze(path: &Path, config: &Config, opts: AnalyzeOptions) -> Result<()> {
    apply_color_mode(config);

    if matches!(opts.format, OutputFormat::Console) {
        use colored::Colorize;
        println!("{} {}", "go-perf - Analyzing:".bold(), path.display());
        println!("{}", "=".repeat(41));
    }

    let engine = build_engine(config, opts.fail_fast);
    let mut results = engine
        .analyze_path(path)
        .with_context(|| format!("analysis failed for {}", path.display()))?;

    for result in &mut results {
        result.issues.retain(|i| i.impact >= opts.min_impact);
    }

    match opts.format {
        OutputFormat::Console => go_perf::reporter::console::report(&results, opts.verbose),
        OutputFormat::Json => go_perf::reporter::json::report(&results)?,
    }

    if let Some(threshold) = opts.fail_on {
        let failing = results
            .iter()
            .flat_map(|r| r.issues.iter())
            .filter(|i| i.impact >= threshold)
            .count();
        if failing > 0 {
            anyhow::bail!(
                "Found {} issue(s) at or above {} impact",
                failing,
                threshold
            );
        }
    }

    Ok(())
}

fn run_check(path: &Path, config: &Config) -> Result<()> {
    apply_color_mode(config);
    println!("Quick check: {}", path.display());

    let results = build_engine(config, false)
        .analyze_path(path)
        .with_context(|| format!("check failed for {}", path.display()))?;
    let (high, _, _) = go_perf::reporter::console::count_by_impact(&results);

    use colored::Colorize;
    if high > 0 {
        println!(
            "{}",
            format!("Found {} high-impact performance issues", high).yellow()
        );
        println!("Run 'go-perf analyze' for details");
    } else {
        println!("{}", "No critical performance issues detected".green());
    }

    Ok(())
}

fn run_list_rules() -> Result<()> {
    use go_perf::rules::registry;

    println!("Structural rules (files that parse):\n");
    for rule in registry::all_rules() {
        println!(
            "  {:<22} [{}] {}",
            rule.id(),
            rule.impact(),
            rule.description()
        );
    }

    println!("\nFallback patterns (files with syntax errors):\n");
    for pattern in go_perf::default_patterns() {
        println!(
            "  {:<22} [{}] {}",
            pattern.id, pattern.impact, pattern.description
        );
    }
    Ok(())
}

fn run_init(path: &Path) -> Result<()> {
    let config_path = path.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }
    std::fs::write(&config_path, Config::default_toml())
        .with_context(|| format!("cannot write {}", config_path.display()))?;
    println!("Created {}", config_path.display());
    Ok(())
}
