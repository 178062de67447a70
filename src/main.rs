use clap::{Parser, Subcommand};
use msdl_core::{config::Config, present, search, Query};
use msdl_data::CatalogSource;

#[derive(Parser)]
#[command(
    name = "msdl",
    about = "msdl — browse and search Microsoft system download catalogs"
)]
struct Cli {
    /// Path or http:// URL of the catalog summary JSON (overrides config).
    #[arg(long, short = 'c')]
    catalog: Option<String>,

    /// Write debug logs to /tmp/msdl-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog and print matches without starting the TUI.
    Search {
        /// Query text, at least two characters.
        query: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/msdl-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("msdl debug log started — tail -f /tmp/msdl-debug.log");
    }

    let mut config = Config::load().unwrap_or_else(|_| Config::defaults());
    if let Some(catalog) = cli.catalog {
        config.data.catalog = catalog;
    }
    let source = CatalogSource::parse(&config.data.catalog);

    match cli.command {
        Some(Commands::Search { query }) => headless_search(&source, &query),
        None => msdl_tui::run(config, source),
    }
}

/// One-shot search: load, match, present, print. Exercises the same pipeline
/// as the TUI without a terminal.
fn headless_search(source: &CatalogSource, input: &str) -> anyhow::Result<()> {
    let Some(query) = Query::parse(input) else {
        anyhow::bail!(
            "query must be at least {} characters",
            msdl_core::MIN_QUERY_LEN
        );
    };
    let catalog = source.load()?;
    let records = search(&catalog, &query);
    let presented = present(&records, &query);

    for fragment in &presented.fragments {
        if fragment.is_informational() {
            println!("{}", fragment.display_title);
            continue;
        }
        let kind = fragment.kind.map(|k| k.label()).unwrap_or("?");
        println!(
            "{}  [{} · {}]  {}",
            fragment.display_title,
            fragment.system_name,
            kind,
            fragment.highlighted.text()
        );
        if let Some(target) = &fragment.target {
            println!("    -> {}", target.detail_path());
        }
    }
    Ok(())
}
