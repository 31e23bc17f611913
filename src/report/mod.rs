//! Collection storage report
//!
//! Linear pipeline, each stage finishing before the next starts:
//! - walk the collection (every page held in memory)
//! - `aggregate` - fold objects into counts and totals
//! - `storage_names` - resolve display names for the storages seen
//! - `display` - render and print the fixed-order report

mod aggregate;
mod display;
mod storage_names;
mod units;

use anyhow::{Context, Result};
use iconik::{Client, WalkOptions, WalkProgress};

use crate::ui;

use aggregate::AggregateState;
use storage_names::StorageNames;

/// Walk, aggregate and resolve names for one collection.
pub fn collect<F>(
    client: &Client,
    collection_id: &str,
    options: &WalkOptions,
    on_page: F,
) -> Result<(AggregateState, StorageNames)>
where
    F: FnMut(&WalkProgress),
{
    let objects = client
        .walk_collection(collection_id, options, on_page)
        .with_context(|| format!("Failed to list contents of collection {}", collection_id))?;
    log::info!("Fetched {} objects", objects.len());

    let state = AggregateState::from_objects(&objects);
    drop(objects);

    let names = StorageNames::resolve(client, state.storage_bytes.keys().map(String::as_str));
    Ok((state, names))
}

/// Generate and print the report for `collection_id`.
pub fn run(client: &Client, collection_id: &str, options: &WalkOptions, quiet: bool) -> Result<()> {
    let spinner = ui::spinner("Searching collection...", quiet);
    let result = collect(client, collection_id, options, |progress| {
        spinner.set_message(match progress.total {
            Some(total) => format!(
                "Fetched {}/{} objects ({} pages)",
                progress.objects, total, progress.pages
            ),
            None => format!(
                "Fetched {} objects ({} pages)",
                progress.objects, progress.pages
            ),
        });
    });
    spinner.finish_and_clear();
    let (state, names) = result?;

    display::print(&display::render(collection_id, &state, &names));

    if state.skipped_files > 0 {
        ui::warn(&format!(
            "{} files had no storage or an unreadable size and were left out of storage totals",
            state.skipped_files
        ));
    }
    if state.malformed_durations > 0 {
        ui::warn(&format!(
            "{} objects had an unreadable duration and were counted as zero",
            state.malformed_durations
        ));
    }
    let unresolved = state
        .storage_bytes
        .keys()
        .filter(|id| !names.is_resolved(id))
        .count();
    if unresolved > 0 {
        ui::warn(&format!(
            "{} storage names could not be resolved, showing storage IDs instead",
            unresolved
        ));
    }

    Ok(())
}
