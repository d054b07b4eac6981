use crate::model::{CorrectedRecipe, MixRecipe};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The order components are listed in on a plant batch sheet.
pub const COMPONENT_ORDER: &[&str] = &[
    "Cement",
    "GGBS",
    "Flyash",
    "UGGBS",
    "20mm",
    "10mm",
    "Sand",
    "Water",
    "ADMIXTURE",
    "CI",
    "CRYSTALLINE",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOptions {
    /// Decimal places for displayed weights.
    pub precision: u32,
    /// List components whose reference weight is zero.
    pub show_zero: bool,
    pub component_order: Vec<String>,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            precision: 2,
            show_zero: false,
            component_order: COMPONENT_ORDER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    pub component: String,
    /// Reference (SSD) weight.
    pub original: Decimal,
    pub corrected: Decimal,
}

/// Side-by-side reference and corrected weights for one trial mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSheet {
    pub tm_number: String,
    pub grade: String,
    pub rows: Vec<SheetRow>,
    pub total_original: Decimal,
    pub total_corrected: Decimal,
}

/// Lay out a corrected recipe as batch sheet rows.
///
/// Components named in `options.component_order` come first in that order,
/// followed by any others (brand variants, extra admixtures) by name.
pub fn batch_sheet(
    recipe: &MixRecipe,
    corrected: &CorrectedRecipe,
    options: &SheetOptions,
) -> BatchSheet {
    let mut names: Vec<&str> = options
        .component_order
        .iter()
        .map(String::as_str)
        .filter(|name| recipe.components.contains_key(*name))
        .collect();
    for name in recipe.components.keys() {
        if !names.contains(&name.as_str()) {
            names.push(name.as_str());
        }
    }

    let rows = names
        .into_iter()
        .filter_map(|name| {
            let original = recipe.component(name)?;
            if original.is_zero() && !options.show_zero {
                return None;
            }
            let value = corrected.component(name).unwrap_or(original);
            Some(SheetRow {
                component: name.to_string(),
                original: original.round_dp(options.precision),
                corrected: value.round_dp(options.precision),
            })
        })
        .collect();

    BatchSheet {
        tm_number: recipe.id.clone(),
        grade: recipe.grade.clone(),
        rows,
        total_original: recipe.total_mass().round_dp(options.precision),
        total_corrected: corrected.total_mass().round_dp(options.precision),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Aggregate;
    use crate::moisture::{correct, MoistureReading};
    use rust_decimal_macros::dec;

    fn make_recipe() -> MixRecipe {
        MixRecipe::new("101", "M25")
            .with_component("Water", dec!(180))
            .with_component("Sand", dec!(800))
            .with_component("Cement", dec!(400))
            .with_component("GGBS", dec!(0))
            .with_component("GGBS(JSW)", dec!(45))
            .with_component("ADMIXTURE", dec!(3.333))
            .with_ssd(Aggregate::Sand, dec!(1.5))
    }

    #[test]
    fn test_rows_follow_plant_order() {
        let recipe = make_recipe();
        let corrected = correct(&recipe, &MoistureReading::new().with(Aggregate::Sand, dec!(4)));
        let sheet = batch_sheet(&recipe, &corrected, &SheetOptions::default());
        let names: Vec<&str> = sheet.rows.iter().map(|r| r.component.as_str()).collect();
        assert_eq!(names, vec!["Cement", "Sand", "Water", "ADMIXTURE", "GGBS(JSW)"]);
    }

    #[test]
    fn test_corrected_values_rounded() {
        let recipe = make_recipe();
        let corrected = correct(&recipe, &MoistureReading::new().with(Aggregate::Sand, dec!(4)));
        let sheet = batch_sheet(&recipe, &corrected, &SheetOptions::default());
        let sand = sheet.rows.iter().find(|r| r.component == "Sand").unwrap();
        assert_eq!(sand.corrected, dec!(820));
        let admix = sheet.rows.iter().find(|r| r.component == "ADMIXTURE").unwrap();
        assert_eq!(admix.original, dec!(3.33));
        assert_eq!(sheet.total_original, sheet.total_corrected);
    }

    #[test]
    fn test_show_zero_lists_unused_components() {
        let recipe = make_recipe();
        let corrected = correct(&recipe, &MoistureReading::new());
        let options = SheetOptions {
            show_zero: true,
            ..SheetOptions::default()
        };
        let sheet = batch_sheet(&recipe, &corrected, &options);
        assert!(sheet.rows.iter().any(|r| r.component == "GGBS"));
    }
}
