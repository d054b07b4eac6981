use rmc_core::error::RmcError;
use rmc_core::recipes;
use std::path::Path;

pub fn list(file: &Path) -> Result<(), RmcError> {
    let book = recipes::load_recipe_book(file)?;
    println!("{} trial mix recipe(s):\n", book.len());
    for recipe in book.iter() {
        let ssd: Vec<String> = recipe
            .ssd_moisture
            .iter()
            .map(|(agg, pct)| format!("{agg} {pct}%"))
            .collect();
        println!(
            "  TM {:<6} {:<6} {:>9} kg/m³  SSD: {}",
            recipe.id,
            recipe.grade,
            recipe.total_mass(),
            if ssd.is_empty() { "-".to_string() } else { ssd.join(", ") }
        );
    }
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), RmcError> {
    let book = recipes::load_recipe_book(file)?;
    println!("Valid recipe book: {} recipe(s)", book.len());
    Ok(())
}
