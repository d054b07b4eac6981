use chrono::Utc;
use rmc_core::error::RmcError;
use rmc_core::values;
use rmc_core::weightment::{TareRegistry, WeightmentInput, WeightmentLog};
use std::path::PathBuf;

use crate::output;

#[allow(clippy::too_many_arguments)]
pub fn run(
    recipe_file: PathBuf,
    tare_file: PathBuf,
    tm_number: &str,
    miller_number: &str,
    quantity: &str,
    gross_wt: &str,
    log_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), RmcError> {
    let input = WeightmentInput::from_text(tm_number, miller_number, quantity, gross_wt)?;
    let book = rmc_core::recipes::load_recipe_book(&recipe_file)?;
    let tares = TareRegistry::load(&tare_file)?;

    let entry = rmc_core::record_weightment(&book, &tares, &input, Utc::now())?;

    if let Some(path) = log_file {
        let mut log = WeightmentLog::load(&path)?;
        log.add(entry.clone());
        log.save(&path)?;
        eprintln!("Entry {} saved to {} ({} total)", entry.id, path.display(), log.len());
    }

    match output_format {
        "json" => output::json::print(&entry)?,
        _ => output::table::print_entry(&entry),
    }

    Ok(())
}

pub fn deviation(
    recipe_file: PathBuf,
    tm_number: &str,
    quantity: &str,
    net_wt: &str,
    output_format: &str,
) -> Result<(), RmcError> {
    let quantity = values::parse_required("quantity", quantity)?;
    let net_wt = values::parse_required("net weight", net_wt)?;
    let book = rmc_core::recipes::load_recipe_book(&recipe_file)?;
    let recipe = book.get(tm_number)?;

    let dev = rmc_core::compute_deviation(recipe, quantity, net_wt)?;

    match output_format {
        "json" => output::json::print(&dev)?,
        _ => output::table::print_deviation(recipe, quantity, net_wt, &dev),
    }

    Ok(())
}
