//! Free-text product search.

use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use savekaro_browse::{SearchBox, SearchState};
use savekaro_catalog::catalog::Product;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::SearchArgs;
use crate::context::Context;
use crate::output::Output;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    if args.interactive {
        return interactive(args.limit, ctx).await;
    }

    let query = match args.query {
        Some(query) if !query.trim().is_empty() => query,
        _ => bail!("Nothing to search for. Pass a query or use --interactive"),
    };

    let api = ctx.products_api()?;
    let spinner = ctx.output.spinner(&format!("Searching for \"{}\"", query.trim()));
    let results = api.search(&query).await;
    spinner.finish_and_clear();

    let results = results.with_context(|| format!("Search for \"{}\" failed", query.trim()))?;
    print_results(&ctx.output, &query, &results, args.limit);
    Ok(())
}

/// One query per stdin line, debounced the way the header search box is.
async fn interactive(limit: Option<usize>, ctx: &Context) -> Result<()> {
    let delay = ctx.config.search.debounce();
    let mut search_box = SearchBox::new(ctx.products_api()?, delay);

    let mut updates = search_box.subscribe();
    let output = ctx.output.clone();
    let printer = tokio::spawn(async move {
        let mut shown: Vec<Product> = Vec::new();
        while updates.changed().await.is_ok() {
            let state: SearchState = updates.borrow_and_update().clone();
            if state.loading || state.results == shown {
                continue;
            }
            if !state.query.trim().is_empty() {
                print_results(&output, &state.query, &state.results, limit);
            }
            shown = state.results;
        }
    });

    ctx.output.info("Type to search, one query per line. Ctrl-D to quit.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        search_box.input(&line);
    }

    // Let the last query run before shutting down.
    let mut state = search_box.subscribe();
    tokio::time::sleep(delay + Duration::from_millis(50)).await;
    let _ = state.wait_for(|s| !s.loading).await;
    tokio::task::yield_now().await;

    search_box.clear();
    drop(search_box);
    printer.abort();
    Ok(())
}

fn print_results(output: &Output, query: &str, results: &[Product], limit: Option<usize>) {
    let shown = &results[..limit.unwrap_or(results.len()).min(results.len())];

    if output.is_json() {
        output.json(&serde_json::json!({
            "query": query,
            "total": results.len(),
            "results": shown,
        }));
        return;
    }

    output.header(&format!("Results for \"{}\"", query.trim()));
    if results.is_empty() {
        output.info("No products found");
        return;
    }
    for (i, product) in shown.iter().enumerate() {
        output.product_row(i + 1, product);
    }
    if shown.len() < results.len() {
        output.info(&format!("Showing {} of {} results", shown.len(), results.len()));
    }
}
