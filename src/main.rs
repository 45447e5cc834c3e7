use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;

use file_search::cli::Cli;
use file_search::core::{ResultSet, SearchEngine, SearchEvent};
use file_search::export;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let shown_dir =
        std::fs::canonicalize(&cli.directory).unwrap_or_else(|_| cli.directory.clone());
    println!("Searching in: {}", shown_dir.display());
    println!("Keywords: {:?}", cli.keywords);
    match &cli.extensions {
        Some(exts) => println!("Extensions: {}", exts.join(" ")),
        None => println!("Extensions: All"),
    }
    println!(
        "Match mode: {}",
        if cli.match_any {
            "Any keyword"
        } else {
            "All keywords"
        }
    );
    println!("Case sensitive: {}", cli.case_sensitive);
    println!("Content search: {}", cli.content);
    println!("{}", "-".repeat(60));

    if !cli.directory.is_dir() {
        println!(
            "Error: Directory '{}' does not exist.",
            cli.directory.display()
        );
        return Ok(());
    }

    let params = cli.to_parameters();
    let engine = SearchEngine::new();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let cancel = Arc::new(AtomicBool::new(false));

    // Ctrl-C requests cancellation; the engine stops at the next file.
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Cancellation requested");
            signal_cancel.store(true, Ordering::Relaxed);
        }
    });

    let engine_cancel = cancel.clone();
    let engine_task = tokio::spawn(async move { engine.run(params, event_tx, engine_cancel).await });

    let mut results = ResultSet::new();
    let mut progress_shown = false;
    while let Some(event) = event_rx.recv().await {
        match event {
            SearchEvent::Progress { scanned, total } => {
                if scanned % 500 == 0 || scanned == total {
                    eprint!("\rScanned {scanned}/{total} files");
                    progress_shown = true;
                }
            }
            SearchEvent::Match(record) => results.push(record),
            SearchEvent::Complete { .. } => {}
        }
    }
    if progress_shown {
        eprintln!();
    }

    let outcome = engine_task.await??;
    if let Some(err) = &outcome.pattern_error {
        eprintln!("Invalid regex pattern: {err}");
    }

    results.sort_by(cli.sort.into());

    if cli.json {
        println!("{}", export::to_json(results.records())?);
    } else if results.is_empty() {
        println!("No matching files found.");
    } else {
        println!("Found matching files:");
        for record in results.records() {
            println!(
                "  {} ({} KB, {})",
                record.path.display(),
                record.size / 1024,
                record.modified.format("%Y-%m-%d %H:%M")
            );
        }
        println!();
        println!("{} file(s) found.", results.len());
    }

    if outcome.cancelled {
        println!(
            "Search cancelled after scanning {} file(s).",
            outcome.scanned
        );
    }

    if let Some(path) = &cli.export {
        export::export_csv(results.records(), path)?;
        println!("Results exported to {}", path.display());
    }

    Ok(())
}
