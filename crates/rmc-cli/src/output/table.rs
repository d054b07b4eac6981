use rmc_core::model::{Deviation, MixRecipe};
use rmc_core::weightment::WeightmentEntry;
use rmc_core::CorrectionRun;
use rust_decimal::Decimal;

pub fn print_sheets(run: &CorrectionRun) {
    for (i, (sheet, corrected)) in run.sheets.iter().zip(&run.corrected).enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== TM: {} (Grade: {}) ===\n", sheet.tm_number, sheet.grade);

        let width = sheet
            .rows
            .iter()
            .map(|r| r.component.len())
            .max()
            .unwrap_or(9)
            .max("Component".len());

        println!(
            "  {:<width$}  {:>17}  {:>14}",
            "Component",
            "Original Wt (SSD)",
            "Corrected Wt",
            width = width
        );
        println!("  {}", "-".repeat(width + 35));
        for row in &sheet.rows {
            println!(
                "  {:<width$}  {:>17}  {:>14}",
                row.component,
                row.original,
                row.corrected,
                width = width
            );
        }
        println!("  {}", "-".repeat(width + 35));
        println!(
            "  {:<width$}  {:>17}  {:>14}",
            "Total",
            sheet.total_original,
            sheet.total_corrected,
            width = width
        );

        let terms: Vec<String> = corrected
            .water_corrections
            .iter()
            .filter(|(_, v)| !v.is_zero())
            .map(|(agg, v)| format!("{} {:+}", agg, v.round_dp(2)))
            .collect();
        if !terms.is_empty() {
            println!("\n  Free water: {}", terms.join(", "));
        }
    }
}

pub fn print_entry(entry: &WeightmentEntry) {
    println!("TM No: {} | Miller No: {}", entry.tm_number, entry.miller_number);
    println!("  Grade:           {}", entry.grade);
    println!("  Quantity:        {:.2} cum", entry.quantity);
    println!("  Gross Wt:        {:.2} kg", entry.gross_wt);
    println!("  Tare Wt:         {:.2} kg", entry.tare_wt);
    println!("  Net Wt:          {:.2} kg", entry.net_wt);
    println!("  Theoretical Qty: {:.2} kg", entry.deviation.theoretical_qty);
    println!("  Error:           {:.2} kg", entry.deviation.error);
    println!("  Error %:         {}", percent(&entry.deviation));
    println!(
        "  Time:            {}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  Id:              {}", entry.id);
}

pub fn print_deviation(recipe: &MixRecipe, quantity: Decimal, net_wt: Decimal, dev: &Deviation) {
    println!("TM {} (Grade: {})", recipe.id, recipe.grade);
    println!("  Yield:           {:.2} kg/m³", recipe.total_mass());
    println!("  Quantity:        {:.2} cum", quantity);
    println!("  Net Wt:          {:.2} kg", net_wt);
    println!("  Theoretical Qty: {:.2} kg", dev.theoretical_qty);
    println!("  Error:           {:.2} kg", dev.error);
    println!("  Error %:         {}", percent(dev));
}

fn percent(dev: &Deviation) -> String {
    match dev.error_percent {
        Some(v) => format!("{:.2}%", v),
        None if dev.theoretical_qty.is_zero() => "undefined (theoretical quantity is 0)".to_string(),
        None => "undefined".to_string(),
    }
}
