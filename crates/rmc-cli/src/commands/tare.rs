use rmc_core::error::RmcError;
use rmc_core::values;
use rmc_core::weightment::TareRegistry;
use std::path::Path;

pub fn set(tare_file: &Path, miller_number: &str, weight: &str) -> Result<(), RmcError> {
    let weight = values::parse_required("tare weight", weight)?;
    let mut tares = if tare_file.exists() {
        TareRegistry::load(tare_file)?
    } else {
        TareRegistry::new()
    };
    tares.set(miller_number, weight)?;
    tares.save(tare_file)?;
    eprintln!(
        "Tare weight for miller {} set to {} kg",
        miller_number.trim(),
        weight
    );
    Ok(())
}

pub fn list(tare_file: &Path) -> Result<(), RmcError> {
    let tares = TareRegistry::load(tare_file)?;
    if tares.is_empty() {
        println!("No tare weights recorded.");
        return Ok(());
    }
    println!("  {:<10}  {:>12}", "Miller", "Tare (kg)");
    for (miller, weight) in tares.iter() {
        println!("  {:<10}  {:>12}", miller, weight);
    }
    Ok(())
}
