use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use geonorm::batch;
use geonorm::config::ResolverConfig;
use geonorm::country::{reference, CountryNameResolver, NominatimGeocoder};
use geonorm::server::{self, DynGeocoder};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// geonorm — resolve free-text locations to canonical country names
///
/// Tries the ISO 3166 reference table first, then falls back to
/// OpenStreetMap Nominatim and keeps the last segment of the address.
///
/// Examples:
///   geonorm resolve Germany DEU "Beijing, China"
///   geonorm batch contributors.json
///   geonorm --offline batch locations.txt
///   geonorm serve --port 8080
#[derive(Parser)]
#[command(name = "geonorm", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalOpts {
    /// Config file (default: ~/.geonorm/config.json if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Never call the geocoder; reference table and cache only.
    #[arg(long, global = true)]
    offline: bool,

    /// Return geocoded country segments without checking them
    /// against the reference table.
    #[arg(long, global = true)]
    no_validate: bool,

    /// Persist geocoder results (`--cache=PATH`). Bare `--cache` uses ~/.geonorm/cache.json.
    #[arg(long, global = true, num_args = 0..=1, require_equals = true, default_missing_value = "")]
    cache: Option<String>,

    /// Language requested from the geocoder.
    #[arg(long, global = true)]
    language: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one or more locations.
    Resolve {
        #[arg(required = true)]
        locations: Vec<String>,

        /// Print JSON instead of tab-separated lines.
        #[arg(long)]
        json: bool,
    },
    /// Resolve a file of locations (JSON array or one per line; "-" for stdin)
    /// and print per-country counts.
    Batch {
        file: PathBuf,

        /// Write the JSON report here instead of stdout.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Serve the resolver over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, short = 'p', default_value_t = 8080)]
        port: u16,
    },
    /// List the reference country table.
    Countries,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("geonorm=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = build_config(&cli.global)?;

    match cli.command {
        Command::Resolve { locations, json } => {
            let mut resolver = CountryNameResolver::from_config(&cfg);
            let mut rows = Vec::with_capacity(locations.len());
            for location in &locations {
                let resolution = resolver.resolve(Some(location));
                rows.push(serde_json::json!({
                    "location": location,
                    "country": resolution.country(),
                    "source": resolution.source(),
                }));
                if !json {
                    println!("{}\t{}", location, resolution.country().unwrap_or("-"));
                }
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            }
        }
        Command::Batch { file, output } => {
            let text = read_input(&file)?;
            let records = batch::parse_input(&text)?;
            let mut resolver = CountryNameResolver::from_config(&cfg);
            let report = batch::run(&mut resolver, records);

            eprintln!(
                "  {} records, {} resolved, {} unresolved",
                report.total, report.resolved, report.unresolved
            );
            for c in report.countries.iter().take(10) {
                eprintln!("  {:>6}  {}", c.count, c.country);
            }

            let json = serde_json::to_string_pretty(&report)?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("cannot write {}", path.display()))?,
                None => println!("{}", json),
            }
        }
        Command::Serve { host, port } => {
            let geocoder: DynGeocoder = Box::new(NominatimGeocoder::from_config(&cfg));
            let resolver = CountryNameResolver::with_config(geocoder, &cfg);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime
                .block_on(server::start(&host, port, resolver))
                .with_context(|| format!("server on {}:{} failed", host, port))?;
        }
        Command::Countries => {
            for c in reference::all() {
                println!("{}\t{}\t{}\t{}", c.alpha2, c.alpha3, c.numeric, c.name);
            }
        }
    }

    Ok(())
}

fn build_config(opts: &GlobalOpts) -> Result<ResolverConfig> {
    let mut cfg = ResolverConfig::load(opts.config.as_deref())?;
    if opts.offline {
        cfg.offline = true;
    }
    if opts.no_validate {
        cfg.validate_geocoded = false;
    }
    if let Some(path) = &opts.cache {
        cfg.cache_path = Some(if path.is_empty() {
            ResolverConfig::default_cache_path()
        } else {
            PathBuf::from(path)
        });
    }
    if let Some(lang) = &opts.language {
        cfg.language = lang.clone();
    }
    tracing::debug!(?cfg, "effective config");
    Ok(cfg)
}

fn read_input(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(file).with_context(|| format!("cannot read {}", file.display()))
}
