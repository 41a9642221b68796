//! Catalog commands (show, rename, set-status)
//!
//! Nothing is persisted: rename and set-status print the catalog or record
//! as it would look after the change.

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::{ContentCatalog, ContentId, ContentRecord, Schedule};

/// Show the record for a content ID, or the blank record it would start from
pub fn show(output: &Output, schedule: &Schedule, id_str: &str) -> Result<()> {
    let id: ContentId = id_str.parse()?;
    let stored = schedule.catalog().contains(&id);
    let record = schedule.catalog().lookup_or_default(&id, None, None);

    output.verbose_ctx("show", &format!("{} stored={}", id, stored));

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "stored": stored,
            "record": record,
        }));
    } else {
        print_record(output, &id, &record);
        if !stored {
            println!();
            println!("(no record yet, showing defaults)");
        }
    }

    Ok(())
}

/// Preview the catalog after a rename
pub fn rename(
    output: &Output,
    schedule: &Schedule,
    old_str: &str,
    new_str: &str,
    cascade: bool,
) -> Result<()> {
    let old: ContentId = old_str.parse()?;

    let renamed = schedule
        .catalog()
        .rename(&old, new_str, cascade)
        .with_context(|| format!("Cannot rename {} to {}", old, new_str.trim()))?;

    if output.is_json() {
        output.data(&renamed);
    } else {
        output.success(&format!(
            "Renamed {} -> {}{}",
            old,
            new_str.trim(),
            if cascade { " (cascade)" } else { "" }
        ));
        println!();
        print_catalog(output, &renamed);
    }

    Ok(())
}

/// Preview a status change
pub fn set_status(output: &Output, schedule: &Schedule, id_str: &str, status: &str) -> Result<()> {
    let id: ContentId = id_str.parse()?;
    let record = schedule.catalog().lookup_or_default(&id, None, None);

    let updated = record
        .with_status(status)
        .with_context(|| format!("Status of {} unchanged", id))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "record": updated,
        }));
    } else {
        output.success(&format!(
            "{}: {} -> {}",
            id,
            record.status.label(),
            updated.status.label()
        ));
    }

    Ok(())
}

fn print_record(output: &Output, id: &ContentId, record: &ContentRecord) {
    output.field("ID", &id.to_string());
    output.field("Title", &record.title);
    output.field("Status", record.status.label());
    if let Some(description) = &record.description {
        output.field("Description", description);
    }
    if let Some(notes) = &record.notes {
        output.field("Notes", notes);
    }
    if let Some(site) = record.site {
        output.field("Site", &site.to_string());
    }
    if let Some(date) = record.date {
        output.field("Date", &date.to_string());
    }
}

fn print_catalog(output: &Output, catalog: &ContentCatalog) {
    if catalog.is_empty() {
        println!("Catalog is empty.");
        return;
    }

    output.header(&format!("{:<10} {:<13} TITLE", "ID", "STATUS"), 50);
    for (id, record) in catalog {
        println!(
            "{:<10} {:<13} {}",
            id.to_string(),
            record.status.to_string(),
            record.title
        );
    }
}
