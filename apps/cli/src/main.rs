#![deny(warnings)]

//! Headless CLI running purchase strategies against the cookie catalogue.
//!
//! ```text
//! cli [--strategy NAME]... [--duration SECS] [--catalogue FILE.yaml] [--history] [--json]
//! ```

use anyhow::{bail, Context, Result};
use clicker_ai::ReferenceStrategy;
use clicker_core::{Catalogue, CatalogueConfig, SIM_TIME};
use clicker_runtime::{run_strategy_with, RunReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
struct Args {
    strategies: Vec<ReferenceStrategy>,
    duration: f64,
    catalogue: Option<String>,
    history: bool,
    json: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut strategies: Vec<ReferenceStrategy> = Vec::new();
    let mut duration = SIM_TIME;
    let mut catalogue = None;
    let mut history = false;
    let mut json = false;
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--strategy" => {
                let name = it.next().context("--strategy needs a name")?;
                strategies.push(name.parse::<ReferenceStrategy>()?);
            }
            "--duration" => {
                let secs = it.next().context("--duration needs a value")?;
                duration = secs
                    .parse::<f64>()
                    .with_context(|| format!("invalid duration: {secs}"))?;
            }
            "--catalogue" => catalogue = Some(it.next().context("--catalogue needs a path")?),
            "--history" => history = true,
            "--json" => json = true,
            other => bail!("unknown argument: {other}"),
        }
    }
    if strategies.is_empty() {
        strategies = ReferenceStrategy::ALL.to_vec();
    }
    Ok(Args {
        strategies,
        duration,
        catalogue,
        history,
        json,
    })
}

fn load_catalogue(path: Option<&str>) -> Result<Catalogue> {
    let Some(path) = path else {
        return Ok(Catalogue::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config = CatalogueConfig::from_yaml_str(&text)?;
    Ok(Catalogue::from_config(config)?)
}

fn print_text(report: &RunReport) {
    println!("{report}");
    if let Some(history) = &report.history {
        for record in history {
            println!(
                "  {:>16} {:<22} {:>20} {:>24}",
                record.time,
                record.item.as_deref().unwrap_or("-"),
                record.cost,
                record.total_cookies
            );
        }
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    info!(?args, "starting CLI");

    let template = load_catalogue(args.catalogue.as_deref())?;
    info!(items = template.len(), growth = template.growth_factor(), "catalogue loaded");

    let mut reports = Vec::with_capacity(args.strategies.len());
    for strategy in &args.strategies {
        let report = run_strategy_with(&template, strategy.label(), args.duration, strategy)?;
        reports.push(if args.history {
            report
        } else {
            report.without_history()
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        reports.iter().for_each(print_text);
    }
    Ok(())
}
