//! Backup, restore and reset commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pulsequest::engine::EventsService;

/// Write a full progress snapshot to a file, or stdout when no path is
/// given
pub fn export_command(service: &EventsService, out: Option<PathBuf>) -> Result<()> {
    let snapshot = service.export_progress();
    match out {
        Some(path) => {
            std::fs::write(&path, &snapshot)
                .with_context(|| format!("Failed to write backup: {}", path.display()))?;
            println!("Progress exported to {}", path.display());
        }
        None => println!("{snapshot}"),
    }
    Ok(())
}

/// Restore progress from a backup file
pub fn import_command(service: &mut EventsService, file: &Path) -> Result<()> {
    let data = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read backup: {}", file.display()))?;

    if service.import_progress(&data) {
        println!("Progress imported.");
    } else {
        println!("Import failed: not a valid progress snapshot. Existing progress kept.");
    }
    Ok(())
}

/// Clear all progress. Requires --yes; the catalog cache is kept.
pub fn reset_command(service: &mut EventsService, yes: bool) -> Result<()> {
    if !yes {
        println!("This clears all progress. Re-run with --yes to confirm.");
        return Ok(());
    }
    service.reset_progress();
    println!("All progress cleared.");
    Ok(())
}

/// Force-regenerate the catalog cache
pub fn regen_command(service: &mut EventsService) -> Result<()> {
    service.regenerate_catalog();
    println!("Catalog regenerated ({} events).", service.catalog().len());
    Ok(())
}
