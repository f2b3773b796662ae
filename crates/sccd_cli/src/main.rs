//! `sccd`: open a site page against a site root on disk.
//!
//! # Responsibility
//! - Render one registered page (sections, chrome, clicks) and print the
//!   mounted document with its page report.
//! - List the page registry.

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::warn;
use sccd_core::{
    default_log_level, init_logging, AnimationMode, FsFetcher, Page, PageLocation, PageRegistry,
    PageReport, PageServices, SiteConfig,
};
use serde::Serialize;
use std::path::PathBuf;
use std::rc::Rc;

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_SETTLE_MS: u64 = 1000;

#[derive(Parser, Debug)]
#[command(name = "sccd", version, about = "Render SCCD site pages from their JSON content")]
struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(long, global = true, help = "Site root holding pages/, data/ and components/")]
    site_root: Option<PathBuf>,
    #[arg(long, global = true, help = "Config file (defaults to <site-root>/sccd.json when present)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Land every transition immediately")]
    instant: bool,
    #[arg(long, global = true, help = "Write rolling logs into this directory")]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true, help = "trace|debug|info|warn|error")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open a page and print the mounted document.
    Render {
        page: String,
        #[arg(long, help = "Raw query string, e.g. \"id=3\"")]
        query: Option<String>,
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,
        #[arg(long = "click", help = "Element id to click after open; repeatable")]
        clicks: Vec<String>,
        #[arg(long, help = "Viewport width to resize to after the clicks")]
        resize: Option<u32>,
        #[arg(long, default_value_t = DEFAULT_SETTLE_MS, help = "Milliseconds of animation to run before printing")]
        settle_ms: u64,
        #[arg(long, help = "Print only the page report")]
        report_only: bool,
    },
    /// List registered pages and their sections.
    Pages,
}

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Serialize)]
struct RenderOut<'a> {
    report: &'a PageReport,
    missed_clicks: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

#[derive(Serialize)]
struct PageEntry {
    page: String,
    sections: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    start_logging(&cli, &config)?;

    match &cli.command {
        Commands::Render {
            page,
            query,
            width,
            clicks,
            resize,
            settle_ms,
            report_only,
        } => {
            let registry = PageRegistry::site_default();
            let location = PageLocation::for_page(&config.pages_dir, page, query.as_deref())
                .with_context(|| format!("invalid page address: {page}"))?;
            let key = registry.resolve(&location.path())?;
            let shell = registry.shell_for(&key)?;
            let fetcher = Rc::new(FsFetcher::new(config.site_root.clone()));
            let services = PageServices::new(fetcher, location, *width, config.clone());
            let mut opened = Page::open(&registry, shell, services)?;

            let mut missed_clicks = Vec::new();
            for id in clicks {
                if !opened.click(id) {
                    warn!("event=click_missed module=cli element={}", id);
                    missed_clicks.push(id.clone());
                }
                opened.advance(*settle_ms);
            }
            if let Some(width) = resize {
                opened.resize(*width);
                opened.flush_resize();
            }
            opened.advance(*settle_ms);

            if cli.json {
                let out = RenderOut {
                    report: opened.report(),
                    missed_clicks,
                    html: (!report_only).then(|| opened.to_html()),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut { ok: true, data: out })?
                );
            } else {
                if !report_only {
                    println!("{}", opened.to_html());
                }
                for id in &missed_clicks {
                    eprintln!("no element with id `{id}` to click");
                }
                println!("{}", opened.report());
            }
        }
        Commands::Pages => {
            let registry = PageRegistry::site_default();
            let mut entries = Vec::with_capacity(registry.len());
            for page in registry.page_ids() {
                let sections = registry.section_ids(&page)?;
                entries.push(PageEntry { page, sections });
            }
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut { ok: true, data: &entries })?
                );
            } else {
                for entry in &entries {
                    println!("{}\t{}", entry.page, entry.sections.join(","));
                }
            }
        }
    }
    Ok(())
}

/// Config file, then flags on top.
fn load_config(cli: &Cli) -> anyhow::Result<SiteConfig> {
    let mut config = match (&cli.config, &cli.site_root) {
        (Some(path), _) => SiteConfig::load(path)?,
        (None, Some(root)) => SiteConfig::discover(root)?,
        (None, None) => SiteConfig::discover(&PathBuf::from("."))?,
    };
    if let Some(root) = &cli.site_root {
        config.site_root = root.clone();
    }
    if cli.instant {
        config.animations = AnimationMode::Instant;
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = Some(level.clone());
    }
    Ok(config)
}

fn start_logging(cli: &Cli, config: &SiteConfig) -> anyhow::Result<()> {
    let Some(log_dir) = &config.log_dir else {
        return Ok(());
    };
    let level = config.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, log_dir).with_context(|| format!("failed to start logging in {}", log_dir.display()))?;
    log::info!("event=cli_start module=cli status=ok command={}", command_name(&cli.command));
    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Render { .. } => "render",
        Commands::Pages => "pages",
    }
}
