use rmc_core::error::RmcError;
use rmc_core::moisture::MoistureReading;
use rmc_core::sheet::SheetOptions;
use std::path::PathBuf;

use crate::output;

pub fn run(
    recipe_file: PathBuf,
    tm_numbers: Vec<String>,
    moisture: [(&str, String); 3],
    output_format: &str,
    precision: u32,
    show_zero: bool,
) -> Result<(), RmcError> {
    let book = rmc_core::recipes::load_recipe_book(&recipe_file)?;
    let reading = MoistureReading::from_inputs(moisture.iter().map(|(k, v)| (*k, v.as_str())));
    let options = SheetOptions {
        precision,
        show_zero,
        ..SheetOptions::default()
    };

    let run = rmc_core::correct_selection(&book, &tm_numbers, &reading, &options)?;

    match output_format {
        "json" => output::json::print(&run)?,
        _ => output::table::print_sheets(&run),
    }

    Ok(())
}
