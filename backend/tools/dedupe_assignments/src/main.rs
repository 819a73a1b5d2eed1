//! Finds courses that still carry more than one trainer assignment and, with
//! `--apply`, removes every record except the one the console shows.

use std::collections::HashSet;

use admin_console::admin_api::{AdminApi, AdminHttpClient};
use admin_console::config::ConsoleConfig;
use admin_console::services::{resolve_trainer, superseded_assignments};
use dotenvy::dotenv;

fn is_dry_run() -> bool {
    !std::env::args().any(|a| a == "--apply")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let config = ConsoleConfig::new_from_env()?;
    let api = AdminHttpClient::from_config(&config)?;

    let listing = api.fetch_courses_with_trainers().await?;
    let mut seen = HashSet::new();
    let course_ids: Vec<i64> = listing
        .iter()
        .map(|c| c.id)
        .filter(|id| seen.insert(*id))
        .collect();

    let dry_run = is_dry_run();

    let mut removed = 0;
    let mut affected = 0;

    for course_id in &course_ids {
        let assignments = api.fetch_assignments_by_course(*course_id).await?;
        let stale = superseded_assignments(*course_id, &assignments);
        if stale.is_empty() {
            continue;
        }

        affected += 1;
        let kept = resolve_trainer(*course_id, &assignments).unwrap_or_default();

        for record in stale {
            if dry_run {
                println!(
                    "[DRY RUN] Would remove trainer {} from course {} (keeping {})",
                    record.trainer_id, course_id, kept
                );
            } else {
                api.remove_assignment(*course_id, record.trainer_id).await?;
                println!(
                    "Removed trainer {} from course {} (kept {})",
                    record.trainer_id, course_id, kept
                );
            }
            removed += 1;
        }
    }

    println!(
        "Courses with duplicate trainers: {} / {}, records {}: {}",
        affected,
        course_ids.len(),
        if dry_run { "to remove" } else { "removed" },
        removed
    );

    Ok(())
}
