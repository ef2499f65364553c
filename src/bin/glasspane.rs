use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "glasspane", version)]
struct Cli {
    /// Log controller decisions (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an interaction script against a page model.
    Run(RunArgs),
    /// Print the perceived brightness and tone of a CSS color.
    Brightness(BrightnessArgs),
    /// Validate page, config and script files without running anything.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Page model JSON.
    #[arg(long)]
    page: PathBuf,

    /// Interaction script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Behavior config JSON (defaults to the stock landing page).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Parser, Debug)]
struct BrightnessArgs {
    /// Color such as `#1a1a2e` or `rgb(20, 20, 20)`.
    color: String,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Page model JSON.
    #[arg(long)]
    page: Option<PathBuf>,

    /// Behavior config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interaction script JSON.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Brightness(args) => cmd_brightness(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "glasspane=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn read_page(path: &Path) -> anyhow::Result<glasspane::PageModel> {
    glasspane::PageModel::from_path(path)
        .with_context(|| format!("load page '{}'", path.display()))
}

fn read_config(path: Option<&Path>) -> anyhow::Result<glasspane::PageConfig> {
    match path {
        Some(p) => glasspane::PageConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(glasspane::PageConfig::landing()),
    }
}

fn read_script(path: &Path) -> anyhow::Result<glasspane::Script> {
    glasspane::Script::from_path(path)
        .with_context(|| format!("load script '{}'", path.display()))
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let page = read_page(&args.page)?;
    let config = read_config(args.config.as_deref())?;
    let script = read_script(&args.script)?;

    let doc = page.build()?;
    let mut session = glasspane::PageSession::new(doc, page.initial_viewport(), &config)?;
    let reports = script.replay(&mut session)?;

    match args.format {
        Format::Json => {
            let out = serde_json::to_string_pretty(&reports).context("serialize reports")?;
            println!("{out}");
        }
        Format::Text => {
            for r in &reports {
                let s = &r.snapshot;
                let theme = s
                    .header_theme
                    .map_or("-", |t| t.flag());
                println!(
                    "#{:<3} {:<28} t={}ms y={} header={} section={} nav={} animated={} menu={}{}",
                    r.index,
                    r.step,
                    s.time_ms,
                    s.scroll_y,
                    theme,
                    s.current_section.as_deref().unwrap_or("-"),
                    s.nav_section.as_deref().unwrap_or("-"),
                    s.animated.len(),
                    if s.menu_open { "open" } else { "closed" },
                    r.note
                        .as_deref()
                        .map(|n| format!(" ({n})"))
                        .unwrap_or_default(),
                );
            }
        }
    }
    Ok(())
}

fn cmd_brightness(args: BrightnessArgs) -> anyhow::Result<()> {
    let color: glasspane::CssColor = args
        .color
        .parse()
        .with_context(|| format!("parse color '{}'", args.color))?;
    match color.rgb() {
        Some(rgb) => {
            let b = glasspane::yiq_brightness(rgb);
            let tone = glasspane::Tone::classify(b);
            println!("{b:.3} {}", if tone == glasspane::Tone::Dark { "dark" } else { "light" });
        }
        None => println!("transparent"),
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    if args.page.is_none() && args.config.is_none() && args.script.is_none() {
        anyhow::bail!("nothing to check: pass --page, --config or --script");
    }
    if let Some(p) = &args.page {
        let page = read_page(p)?;
        let doc = page.build()?;
        eprintln!("page ok: {} nodes", doc.len());
    }
    if let Some(p) = &args.config {
        read_config(Some(p))?;
        eprintln!("config ok");
    }
    if let Some(p) = &args.script {
        let script = read_script(p)?;
        eprintln!("script ok: {} steps", script.steps.len());
    }
    Ok(())
}
