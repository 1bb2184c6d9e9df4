mod promote;
mod prompt;
mod report;

use crate::promote::{PromotionRank, PromotionSet, Thresholds, classify};
use anyhow::{Context, Result};
use log::{info, warn};
use startgg_api::Region;
use startgg_api::client::{ApiError, StartggApi, select_day3_phase, select_qualifier_event};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    if let Err(err) = run().await {
        if let Some(api_err) = err.downcast_ref::<ApiError>()
            && api_err.is_auth()
        {
            eprintln!("{api_err}");
            eprintln!(
                "This is most likely a missing or invalid start.gg API token. \
                 Provide one via the STARTGG_TOKEN environment variable."
            );
            std::process::exit(1);
        }
        return Err(err);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let token = std::env::var("STARTGG_TOKEN")
        .context("STARTGG_TOKEN environment variable is not set")?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    let remove_alternates = prompt::read_remove_alternates(&mut input, &mut output)?;
    let slug = prompt::read_slug(&mut input, &mut output)?;

    let region = Region::from_slug(&slug);
    match region {
        Region::Unknown => {
            warn!("could not infer a region from \"{slug}\"; defaulting to NA thresholds")
        }
        _ => info!("region inferred from slug: {}", region.label()),
    }

    let api = StartggApi::new(token);

    let events = api.tournament_events(&slug).await?;
    for event in &events {
        info!("event {}: {}", event.id, event.name);
    }
    let event = select_qualifier_event(&events)?;

    let phases = api.event_phases(event.id).await?;
    for phase in &phases {
        info!("phase {}: {}", phase.id, phase.name);
    }
    let phase = select_day3_phase(&phases)?;

    let thresholds = Thresholds::for_region(region);
    let mut promotions = PromotionSet::new();

    // First pass over the wide Day 3 pool, split at the Rank A cutoff.
    let day3 = api
        .phase_standings(phase.id, thresholds.pool, region)
        .await?;
    classify(
        &day3,
        PromotionRank::BPlus,
        thresholds.cutoff as usize,
        remove_alternates,
        &mut promotions,
    );

    // Second pass over the Main Event pool; everyone here earns Rank X and
    // is pulled out of whichever tier the first pass put them in.
    let finals = api
        .phase_standings(phase.id, thresholds.finals_pool, region)
        .await?;
    classify(
        &finals,
        PromotionRank::A,
        thresholds.finals_pool as usize,
        remove_alternates,
        &mut promotions,
    );

    report::print_console(&promotions);
    let path = report::default_output_path();
    report::write_report(&path, &promotions)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("gg-promotions {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "gg-promotions - start.gg rank promotion list builder

Usage:
  gg-promotions
  gg-promotions --help
  gg-promotions --version

Environment:
  STARTGG_TOKEN   start.gg API token, sent as a bearer token

Prompts for the tournament slug and whether to drop alternates, pulls the
Day 3 qualifier standings, and writes Promotions.txt to the desktop."
}
