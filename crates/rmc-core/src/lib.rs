pub mod consumption;
pub mod error;
pub mod model;
pub mod moisture;
pub mod recipes;
pub mod sheet;
pub mod values;
pub mod weightment;

use error::RmcError;
use model::{CorrectedRecipe, MixRecipe};
use moisture::MoistureReading;
use recipes::RecipeBook;
use serde::{Deserialize, Serialize};
use sheet::{BatchSheet, SheetOptions};

pub use consumption::{compute_deviation, theoretical_yield};
pub use moisture::correct;
pub use weightment::record_weightment;

/// One correction run: a single moisture reading applied to every selected mix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionRun {
    pub reading: MoistureReading,
    pub corrected: Vec<CorrectedRecipe>,
    pub sheets: Vec<BatchSheet>,
}

/// Main API entry point: correct the selected trial mixes for one reading.
///
/// Selection order is kept and repeated TM numbers are corrected once.
/// Fails with `MissingRecipe` before correcting anything if a TM number is
/// not in the book.
pub fn correct_selection<S: AsRef<str>>(
    book: &RecipeBook,
    tm_numbers: &[S],
    reading: &MoistureReading,
    options: &SheetOptions,
) -> Result<CorrectionRun, RmcError> {
    let mut selected: Vec<&MixRecipe> = Vec::new();
    for tm in tm_numbers {
        let recipe = book.get(tm.as_ref())?;
        if !selected.iter().any(|r| r.id == recipe.id) {
            selected.push(recipe);
        }
    }

    if reading.is_empty() {
        tracing::warn!("no moisture readings given, treating all aggregates as 0%");
    }

    let mut corrected = Vec::with_capacity(selected.len());
    let mut sheets = Vec::with_capacity(selected.len());
    for recipe in selected {
        let result = moisture::correct(recipe, reading);
        sheets.push(sheet::batch_sheet(recipe, &result, options));
        corrected.push(result);
    }

    tracing::debug!("corrected {} trial mix(es)", corrected.len());

    Ok(CorrectionRun {
        reading: reading.clone(),
        corrected,
        sheets,
    })
}
