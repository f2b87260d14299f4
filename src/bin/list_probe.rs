//! List probe
//!
//! Pages through one list view against a live backend and prints each row
//! as JSON. Useful to check filters and paging before wiring a screen.
//!
//! ```text
//! list_probe --env dev --view routing-slips --pages 3
//! ```

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use fas_list_sync::config::{AppConfig, ListConfig};
use fas_list_sync::pagination::LoadOutcome;
use fas_list_sync::transport::{RestClient, Transport};
use fas_list_sync::views::{self, ListView, ShortNamePartition};

fn arg_value(names: &[&str]) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| names.contains(&a.as_str()))
        .and_then(|i| args.get(i + 1).cloned())
}

async fn page_through<T>(view: ListView<T>, lists: &ListConfig, max_pages: u32) -> usize
where
    T: DeserializeOwned + Serialize + Clone + Send + Sync + 'static,
{
    let name = view.name();
    let table = view.orchestrator(lists);
    let mut outcome = table.get_next(true).await;
    let mut pages = 1;
    loop {
        if let LoadOutcome::Failed { page } = outcome {
            tracing::error!(view = name, page, "Probe stopped on failed page");
            break;
        }
        if pages >= max_pages || !outcome.dispatched() {
            break;
        }
        outcome = table.get_next(false).await;
        pages += 1;
    }

    let rows = table.results();
    for row in &rows {
        match serde_json::to_string(row) {
            Ok(line) => println!("{}", line),
            Err(e) => tracing::warn!(view = name, error = %e, "Row not printable"),
        }
    }
    tracing::info!(
        view = name,
        rows = rows.len(),
        phase = %table.phase(),
        "Probe finished"
    );
    rows.len()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = arg_value(&["--env", "-e"]).unwrap_or_else(|| "dev".to_string());
    let view = arg_value(&["--view"]).unwrap_or_else(|| "routing-slips".to_string());
    let max_pages = match arg_value(&["--pages"]) {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("--pages expects a number, got {raw:?}"))?,
        None => 1,
    };

    let config = AppConfig::load(&env)?;
    let _log_guard = fas_list_sync::logging::init_logging(&config)?;
    tracing::info!(env = %env, view = %view, max_pages, "Starting list probe");

    let transport: Arc<dyn Transport> =
        Arc::new(RestClient::new(&config.api).context("building HTTP client")?);
    let lists = &config.lists;

    let rows = match view.as_str() {
        "routing-slips" => {
            page_through(views::routing_slip_search(transport), lists, max_pages).await
        }
        "summaries" => {
            page_through(views::eft_short_name_summaries(transport), lists, max_pages).await
        }
        "linked" | "unlinked" => {
            let partition = if view == "linked" {
                ShortNamePartition::Linked
            } else {
                ShortNamePartition::Unlinked
            };
            page_through(views::eft_short_names(transport, partition), lists, max_pages).await
        }
        "refunds" => page_through(views::refund_requests(transport), lists, max_pages).await,
        other => anyhow::bail!(
            "unknown view {other:?}; expected routing-slips, summaries, linked, unlinked or refunds"
        ),
    };

    eprintln!("{} rows", rows);
    Ok(())
}
