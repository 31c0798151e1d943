mod cli;
mod display;

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use inondable_core::{Coordinate, Geometry, SERVICE_AREA, format_geometry};
use inondable_lookup::{EligibilityAggregator, EvaluationSession, HttpRecordSource, LookupConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing::level_filters::LevelFilter;

use cli::{CheckArgs, Cli, Commands, FormatGeometryArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("inondable v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Check(args) => check(&cli.lookup.to_config(), args).await,
        Commands::Watch => watch(&cli.lookup.to_config()).await,
        Commands::FormatGeometry(args) => print_geometry(args),
    }
}

fn aggregator(config: &LookupConfig) -> EligibilityAggregator {
    let source = Arc::new(HttpRecordSource::new(&config.base_url));
    EligibilityAggregator::new(source, config)
}

fn click_coordinate(lat: f64, lon: f64) -> anyhow::Result<Coordinate> {
    let coordinate = Coordinate::new(lat, lon).context("invalid click coordinate")?;
    if !SERVICE_AREA.contains(&coordinate) {
        warn!(%coordinate, "coordinate is outside the service area, datasets will likely be empty");
    }
    Ok(coordinate)
}

async fn check(config: &LookupConfig, args: CheckArgs) -> anyhow::Result<()> {
    let coordinate = click_coordinate(args.lat, args.lon)?;
    let result = aggregator(config)
        .evaluate(coordinate, args.secondary_zone)
        .await;

    display::warn_degraded(&result);
    if args.json {
        display::print_json(&coordinate, &result)
    } else {
        display::print_result(&coordinate, &result)
    }
}

/// Parse `LAT LON [secondary]`.
fn parse_click(line: &str) -> anyhow::Result<(Coordinate, bool)> {
    let mut parts = line.split_whitespace();
    let lat: f64 = parts
        .next()
        .context("missing latitude")?
        .parse()
        .context("latitude is not a number")?;
    let lon: f64 = parts
        .next()
        .context("missing longitude")?
        .parse()
        .context("longitude is not a number")?;
    let secondary = match parts.next() {
        None => false,
        Some("secondary") => true,
        Some(other) => anyhow::bail!("unexpected click context: {other}"),
    };
    Ok((click_coordinate(lat, lon)?, secondary))
}

/// Stand-in for the map: every stdin line is a click, results are printed as
/// they are published. Superseded clicks are never printed.
async fn watch(config: &LookupConfig) -> anyhow::Result<()> {
    let session = EvaluationSession::new(Arc::new(aggregator(config)));
    let mut rx = session.subscribe();

    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let Some(published) = rx.borrow_and_update().clone() else {
                continue;
            };
            display::warn_degraded(&published.result);
            if let Err(e) = display::print_result(&published.coordinate, &published.result) {
                eprintln!("error: {e:#}");
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_click(&line) {
            Ok((coordinate, secondary)) => {
                session.click(coordinate, secondary);
            }
            Err(e) => eprintln!("error: {e:#}"),
        }
    }

    // Let the last click finish before shutting down.
    let last = session.latest_ticket();
    if last > 0 {
        let mut done = session.subscribe();
        done.wait_for(|p| p.as_ref().is_some_and(|p| p.ticket == last))
            .await
            .context("evaluation session closed")?;
    }
    drop(session);
    printer.await.context("printer task failed")?;
    Ok(())
}

fn print_geometry(args: FormatGeometryArgs) -> anyhow::Result<()> {
    let json = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    let geometry = Geometry::from_json_str(&json).context("parsing GeoJSON geometry")?;
    println!("{}", format_geometry(&geometry));
    Ok(())
}
