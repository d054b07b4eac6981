pub mod log;
pub mod tare;

pub use log::WeightmentLog;
pub use tare::TareRegistry;

use crate::consumption;
use crate::error::RmcError;
use crate::model::Deviation;
use crate::recipes::RecipeBook;
use crate::values;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operator input for one weighed transit mixer load.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightmentInput {
    pub tm_number: String,
    pub miller_number: String,
    /// Claimed batched volume (m³).
    pub quantity: Decimal,
    /// Weighbridge gross mass (kg).
    pub gross_wt: Decimal,
}

impl WeightmentInput {
    /// Validate raw form fields. Every field is required and the two
    /// weights must be numeric.
    pub fn from_text(
        tm_number: &str,
        miller_number: &str,
        quantity: &str,
        gross_wt: &str,
    ) -> Result<Self, RmcError> {
        let tm_number = tm_number.trim();
        if tm_number.is_empty() {
            return Err(RmcError::MissingField("TM number"));
        }
        let miller_number = miller_number.trim();
        if miller_number.is_empty() {
            return Err(RmcError::MissingField("miller number"));
        }
        Ok(Self {
            tm_number: tm_number.to_string(),
            miller_number: miller_number.to_string(),
            quantity: values::parse_required("quantity", quantity)?,
            gross_wt: values::parse_required("gross weight", gross_wt)?,
        })
    }
}

/// A recorded batch consumption check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightmentEntry {
    pub id: Uuid,
    pub tm_number: String,
    pub grade: String,
    pub miller_number: String,
    pub quantity: Decimal,
    pub gross_wt: Decimal,
    pub tare_wt: Decimal,
    pub net_wt: Decimal,
    #[serde(flatten)]
    pub deviation: Deviation,
    pub timestamp: DateTime<Utc>,
}

/// Build a weightment entry, rejecting unknown TM numbers and millers
/// without a recorded tare weight.
pub fn record_weightment(
    book: &RecipeBook,
    tares: &TareRegistry,
    input: &WeightmentInput,
    timestamp: DateTime<Utc>,
) -> Result<WeightmentEntry, RmcError> {
    if input.tm_number.trim().is_empty() {
        return Err(RmcError::MissingField("TM number"));
    }
    if input.miller_number.trim().is_empty() {
        return Err(RmcError::MissingField("miller number"));
    }

    let recipe = book.get(&input.tm_number)?;
    let tare_wt = tares.get(&input.miller_number)?;

    let net_wt = input
        .gross_wt
        .checked_sub(tare_wt)
        .ok_or(RmcError::Overflow("net weight"))?;
    let deviation = consumption::compute_deviation(recipe, input.quantity, net_wt)?;

    let entry = WeightmentEntry {
        id: Uuid::new_v4(),
        tm_number: recipe.id.clone(),
        grade: recipe.grade.clone(),
        miller_number: input.miller_number.trim().to_string(),
        quantity: input.quantity,
        gross_wt: input.gross_wt,
        tare_wt,
        net_wt,
        deviation,
        timestamp,
    };
    tracing::info!(
        tm = %entry.tm_number,
        miller = %entry.miller_number,
        net_wt = %entry.net_wt,
        error = %entry.deviation.error,
        "weightment recorded"
    );
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MixRecipe;
    use rust_decimal_macros::dec;

    fn setup() -> (RecipeBook, TareRegistry) {
        let book: RecipeBook = [MixRecipe::new("101", "M25")
            .with_component("Cement", dec!(400))
            .with_component("Sand", dec!(800))
            .with_component("20mm", dec!(1020))
            .with_component("Water", dec!(180))]
        .into_iter()
        .collect();
        let mut tares = TareRegistry::new();
        tares.set("7", dec!(9800)).unwrap();
        (book, tares)
    }

    #[test]
    fn test_record_computes_net_and_deviation() {
        let (book, tares) = setup();
        let input = WeightmentInput::from_text("101", "7", "5", "21600").unwrap();
        let entry = record_weightment(&book, &tares, &input, Utc::now()).unwrap();
        assert_eq!(entry.tare_wt, dec!(9800));
        assert_eq!(entry.net_wt, dec!(11800));
        assert_eq!(entry.deviation.theoretical_qty, dec!(12000));
        assert_eq!(entry.deviation.error, dec!(200));
        assert_eq!(entry.grade, "M25");
    }

    #[test]
    fn test_unknown_tm_rejected() {
        let (book, tares) = setup();
        let input = WeightmentInput::from_text("999", "7", "5", "21600").unwrap();
        assert!(matches!(
            record_weightment(&book, &tares, &input, Utc::now()),
            Err(RmcError::MissingRecipe { .. })
        ));
    }

    #[test]
    fn test_miller_without_tare_rejected() {
        let (book, tares) = setup();
        let input = WeightmentInput::from_text("101", "8", "5", "21600").unwrap();
        assert!(matches!(
            record_weightment(&book, &tares, &input, Utc::now()),
            Err(RmcError::MissingTareWeight { .. })
        ));
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(matches!(
            WeightmentInput::from_text("", "7", "5", "21600"),
            Err(RmcError::MissingField("TM number"))
        ));
        assert!(matches!(
            WeightmentInput::from_text("101", "7", " ", "21600"),
            Err(RmcError::MissingField("quantity"))
        ));
        assert!(matches!(
            WeightmentInput::from_text("101", "7", "5", "heavy"),
            Err(RmcError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_overflowing_quantity_rejected() {
        let (book, tares) = setup();
        let input = WeightmentInput::from_text(
            "101",
            "7",
            "79228162514264337593543950335",
            "21600",
        )
        .unwrap();
        assert!(matches!(
            record_weightment(&book, &tares, &input, Utc::now()),
            Err(RmcError::Overflow("theoretical quantity"))
        ));
    }

    #[test]
    fn test_entry_json_has_flat_deviation_fields() {
        let (book, tares) = setup();
        let input = WeightmentInput::from_text("101", "7", "5", "21600").unwrap();
        let entry = record_weightment(&book, &tares, &input, Utc::now()).unwrap();
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("theoretical_qty").is_some());
        assert!(value.get("error_percent").is_some());
        let back: WeightmentEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
