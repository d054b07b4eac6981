use rmc_core::error::RmcError;
use serde::Serialize;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), RmcError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
