//! Calendar query commands (sites, derive, calendar)

use anyhow::{bail, Result};
use chrono::NaiveDate;

use super::output::Output;
use crate::domain::{format_days, Schedule, SiteFilter};

/// List configured sites
pub fn sites(output: &Output, schedule: &Schedule) -> Result<()> {
    let sites = schedule.sites();
    output.verbose_ctx("sites", &format!("Found {} sites", sites.len()));

    if output.is_json() {
        let items: Vec<_> = sites
            .iter()
            .map(|s| {
                serde_json::json!({
                    "id": s.id,
                    "name": s.name,
                    "update_days": s.update_days,
                    "base_sequence": s.base_sequence,
                })
            })
            .collect();
        output.data(&items);
    } else if sites.is_empty() {
        println!("No sites configured.");
    } else {
        output.header(
            &format!("{:<6} {:<20} {:<16} BASE", "ID", "NAME", "DAYS"),
            50,
        );
        for site in sites {
            println!(
                "{:<6} {:<20} {:<16} {}",
                site.id,
                site.name,
                format_days(&site.update_days),
                site.base_sequence
            );
        }
    }

    Ok(())
}

/// Derive the content ID for one site and date
pub fn derive(output: &Output, schedule: &Schedule, site_id: u32, date: NaiveDate) -> Result<()> {
    let Some(site) = schedule.site(site_id) else {
        bail!("Site not found: {}", site_id);
    };

    let id = schedule.derive(site_id, date);

    if output.is_json() {
        output.data(&serde_json::json!({
            "site": site.id,
            "date": date,
            "policy": schedule.policy(),
            "content_id": id,
        }));
    } else {
        match id {
            Some(id) => println!("{}", id),
            None => println!(
                "No update scheduled for {} on {} ({})",
                site.name,
                date,
                date.format("%A")
            ),
        }
    }

    Ok(())
}

/// Show every scheduled update in the displayed month
pub fn month(output: &Output, schedule: &Schedule) -> Result<()> {
    if let SiteFilter::Only(id) = schedule.filter() {
        if schedule.site(id).is_none() {
            bail!("Site not found: {}", id);
        }
    }

    let entries = schedule.month_entries();
    output.verbose_ctx("calendar", &format!("Derived {} entries", entries.len()));

    if output.is_json() {
        let items: Vec<_> = entries
            .iter()
            .map(|e| {
                let record = schedule.catalog().get(&e.content_id);
                serde_json::json!({
                    "date": e.date,
                    "site": e.site_id,
                    "site_name": e.site_name,
                    "content_id": e.content_id,
                    "status": schedule.status_of(&e.content_id),
                    "title": record.map(|r| r.title.as_str()),
                })
            })
            .collect();
        output.data(&items);
        return Ok(());
    }

    println!("{} (policy: {})", schedule.month().label(), schedule.policy());
    if entries.is_empty() {
        println!("No updates scheduled.");
        return Ok(());
    }

    output.header(
        &format!("{:<16} {:<8} {:<12} {:<13} TITLE", "DATE", "ID", "SITE", "STATUS"),
        70,
    );
    for entry in &entries {
        let title = schedule
            .catalog()
            .get(&entry.content_id)
            .map(|r| r.title.as_str())
            .unwrap_or("");
        println!(
            "{:<16} {:<8} {:<12} {:<13} {}",
            entry.date.format("%a %Y-%m-%d").to_string(),
            entry.content_id.to_string(),
            entry.site_name,
            schedule.status_of(&entry.content_id).to_string(),
            title
        );
    }

    Ok(())
}
