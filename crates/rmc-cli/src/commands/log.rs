use rmc_core::error::RmcError;
use rmc_core::weightment::WeightmentLog;
use std::path::Path;
use uuid::Uuid;

use crate::output;

pub fn list(log_file: &Path, output_format: &str) -> Result<(), RmcError> {
    let log = WeightmentLog::load(log_file)?;
    let entries = log.newest_first();

    match output_format {
        "json" => output::json::print(&entries)?,
        _ => {
            if entries.is_empty() {
                println!("No entries saved yet.");
            }
            for (i, entry) in entries.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                output::table::print_entry(entry);
            }
        }
    }
    Ok(())
}

pub fn delete(log_file: &Path, ids: &[String]) -> Result<(), RmcError> {
    let ids = ids
        .iter()
        .map(|s| {
            Uuid::parse_str(s.trim())
                .map_err(|e| RmcError::InvalidEntryId(format!("'{}': {}", s, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut log = WeightmentLog::load(log_file)?;
    let removed = log.delete_many(&ids)?;
    log.save(log_file)?;
    eprintln!("Deleted {} entr{}", removed, if removed == 1 { "y" } else { "ies" });
    Ok(())
}
