//! Entry point for the documentation viewer.
//!
//! Loads `conf/viewer.toml`, builds the paged document from the configured
//! docs root and then either prints an outline, writes static HTML, or
//! replays a navigation script against the synchronizer.

use anyhow::{Context, Result};
use clap::Parser;
use docs_viewer::config::{ViewerConfig, load_config, serialize_config};
use docs_viewer::content::open_source;
use docs_viewer::document::{Document, build_document};
use docs_viewer::export::render_html;
use docs_viewer::measure::TextMeasure;
use docs_viewer::menu::build_menu;
use docs_viewer::nav::{NavConfig, Navigator};
use docs_viewer::script::{ReplaySession, parse_script};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

#[derive(Parser)]
#[command(name = "docs-viewer")]
#[command(version, about = "Paged documentation viewer", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = "conf/viewer.toml")]
    config: PathBuf,

    /// Docs directory or http(s) base URL; overrides the config
    #[arg(short, long)]
    docs: Option<String>,

    /// Initial URL fragment, e.g. `#chapter=1.1`
    #[arg(short, long)]
    fragment: Option<String>,

    /// Write the rendered document as HTML to this file
    #[arg(long, value_name = "OUT")]
    html: Option<PathBuf>,

    /// Replay a navigation script and print the resulting effects
    #[arg(long, value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() {
    let cli = Cli::parse();
    let reload_handle = init_tracing();
    if let Err(err) = run(cli, &reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, reload_handle: &ReloadHandle) -> Result<()> {
    let mut config = load_config(&cli.config);
    if let Some(docs) = cli.docs.clone() {
        config.docs_root = docs;
    }
    set_log_level(reload_handle, config.log_level.as_filter_str());

    if cli.dump_config {
        print!("{}", serialize_config(&config)?);
        return Ok(());
    }

    info!(
        docs = %config.docs_root,
        manifest = %config.manifest_file,
        level = %config.log_level,
        "Starting docs viewer"
    );

    let source = open_source(&config.docs_root);
    let measure = TextMeasure::from_config(&config);
    let document = build_document(
        source.as_ref(),
        &config.manifest_file,
        &measure,
        &config.page_content_budget(),
    );
    if !document.status.is_ready() {
        warn!(status = %document.status, "Nothing to display");
    }

    let navigator = Navigator::new(
        NavConfig::from_config(&config),
        document.visible_ids(),
        cli.fragment.as_deref(),
    );

    if let Some(out) = &cli.html {
        let menu = build_menu(&document.chapters);
        let html = render_html(&document, &menu, navigator.current_chapter());
        fs::write(out, html).with_context(|| format!("Failed to write {}", out.display()))?;
        info!(path = %out.display(), pages = document.page_count(), "Wrote HTML");
    }

    match &cli.replay {
        Some(script) => replay(document, &measure, &config, navigator, script),
        None => {
            if cli.html.is_none() {
                print_outline(&document, &navigator);
            }
            Ok(())
        }
    }
}

fn replay(
    document: Document,
    measure: &TextMeasure,
    config: &ViewerConfig,
    navigator: Navigator,
    script: &Path,
) -> Result<()> {
    let text = fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let commands = parse_script(&text)
        .with_context(|| format!("Invalid script {}", script.display()))?;

    let mut session = ReplaySession::new(document, measure, config.clone(), navigator);
    for step in session.run(commands) {
        println!("{:>4}  {:?}", step.line, step.command);
        for effect in &step.effects {
            println!("        -> {effect:?}");
        }
    }
    println!(
        "current={} fragment={} scroll_top={:.0}",
        session.state().current_chapter_id.as_deref().unwrap_or("-"),
        session.fragment().unwrap_or("-"),
        session.scroll_top()
    );
    Ok(())
}

fn print_outline(document: &Document, navigator: &Navigator) {
    println!("{}", document.status);
    for section in &document.sections {
        let marker = if navigator.current_chapter() == Some(section.spec.id.as_str()) {
            '*'
        } else {
            ' '
        };
        println!(
            "{marker} {:<6} {:<40} {:>3} page(s)",
            section.spec.id,
            section.spec.title,
            section.pages.len()
        );
    }
    for diagnostic in &document.diagnostics {
        println!("! {:<6} {}", diagnostic.chapter_id, diagnostic.message);
    }
    if !document.revision.is_empty() {
        println!("revision {}", document.revision);
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    }
}
