use crate::model::{Aggregate, CorrectedRecipe, MixRecipe, WATER};
use crate::moisture::MoistureReading;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Correct a recipe's aggregate and water weights for measured field moisture.
///
/// For each aggregate the free water it carries beyond its SSD condition is
/// `(reading - ssd) * weight / 100`. That water is added to the aggregate's
/// batch weight and taken off the mix water, so the total mass is unchanged.
/// A term that cannot be computed is 0 and leaves its component untouched.
pub fn correct(recipe: &MixRecipe, reading: &MoistureReading) -> CorrectedRecipe {
    let mut components = recipe.components.clone();
    let mut water_corrections = BTreeMap::new();

    let Some(water) = recipe.component(WATER) else {
        tracing::warn!(
            "recipe {} has no {} component, skipping moisture correction",
            recipe.id,
            WATER
        );
        for aggregate in Aggregate::ALL {
            water_corrections.insert(aggregate, Decimal::ZERO);
        }
        return CorrectedRecipe {
            tm_number: recipe.id.clone(),
            components,
            water_corrections,
            total_water_correction: Decimal::ZERO,
        };
    };

    let mut total = Decimal::ZERO;
    let mut corrected_water = water;
    for aggregate in Aggregate::ALL {
        let mut term = water_correction(recipe, reading, aggregate);
        let applied = apply_term(&components, aggregate, term, total, corrected_water);
        let (weight, new_total, new_water) = match applied {
            Some(applied) => applied,
            None => {
                tracing::warn!(
                    "recipe {}: applying the correction for {} overflowed, using 0",
                    recipe.id,
                    aggregate
                );
                term = Decimal::ZERO;
                (None, total, corrected_water)
            }
        };
        tracing::debug!(tm = %recipe.id, %aggregate, %term, "water correction");
        if let Some(weight) = weight {
            components.insert(aggregate.key().to_string(), weight);
        }
        total = new_total;
        corrected_water = new_water;
        water_corrections.insert(aggregate, term);
    }

    if corrected_water < Decimal::ZERO {
        tracing::warn!(
            "recipe {}: aggregates carry more free water than the mix allows ({} {})",
            recipe.id,
            WATER,
            corrected_water
        );
    }
    components.insert(WATER.to_string(), corrected_water);

    CorrectedRecipe {
        tm_number: recipe.id.clone(),
        components,
        water_corrections,
        total_water_correction: total,
    }
}

/// New aggregate weight, running total and mix water after adding `term`,
/// `None` if any of them overflows.
fn apply_term(
    components: &BTreeMap<String, Decimal>,
    aggregate: Aggregate,
    term: Decimal,
    total: Decimal,
    water: Decimal,
) -> Option<(Option<Decimal>, Decimal, Decimal)> {
    let weight = match components.get(aggregate.key()) {
        Some(weight) => Some(weight.checked_add(term)?),
        None => None,
    };
    Some((weight, total.checked_add(term)?, water.checked_sub(term)?))
}

/// Free water carried by one aggregate, 0 when any input is missing or the
/// arithmetic overflows.
fn water_correction(recipe: &MixRecipe, reading: &MoistureReading, aggregate: Aggregate) -> Decimal {
    let (Some(weight), Some(ssd)) = (
        recipe.component(aggregate.key()),
        recipe.ssd_moisture.get(&aggregate).copied(),
    ) else {
        return Decimal::ZERO;
    };

    reading
        .get(aggregate)
        .checked_sub(ssd)
        .and_then(|delta| delta.checked_mul(weight))
        .and_then(|v| v.checked_div(HUNDRED))
        .unwrap_or_else(|| {
            tracing::warn!(
                "recipe {}: correction term for {} overflowed, using 0",
                recipe.id,
                aggregate
            );
            Decimal::ZERO
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_recipe() -> MixRecipe {
        MixRecipe::new("101", "M25")
            .with_component("Sand", dec!(800))
            .with_component("10mm", dec!(600))
            .with_component("20mm", dec!(400))
            .with_component("Water", dec!(180))
            .with_component("Cement", dec!(400))
            .with_ssd(Aggregate::Sand, dec!(2))
            .with_ssd(Aggregate::TenMm, dec!(1))
            .with_ssd(Aggregate::TwentyMm, dec!(1))
    }

    #[test]
    fn test_wet_sand_moves_water_into_sand() {
        let reading = MoistureReading::new()
            .with(Aggregate::Sand, dec!(5))
            .with(Aggregate::TenMm, dec!(1))
            .with(Aggregate::TwentyMm, dec!(1));
        let corrected = correct(&make_recipe(), &reading);

        assert_eq!(corrected.water_corrections[&Aggregate::Sand], dec!(24));
        assert_eq!(corrected.total_water_correction, dec!(24));
        assert_eq!(corrected.component("Water"), Some(dec!(156)));
        assert_eq!(corrected.component("Sand"), Some(dec!(824)));
        assert_eq!(corrected.component("10mm"), Some(dec!(600)));
        assert_eq!(corrected.component("20mm"), Some(dec!(400)));
        assert_eq!(corrected.component("Cement"), Some(dec!(400)));
        assert_eq!(corrected.total_mass(), dec!(2380));
    }

    #[test]
    fn test_dry_aggregate_adds_water() {
        let reading = MoistureReading::new()
            .with(Aggregate::Sand, dec!(2))
            .with(Aggregate::TenMm, dec!(0))
            .with(Aggregate::TwentyMm, dec!(1));
        let corrected = correct(&make_recipe(), &reading);

        assert_eq!(corrected.component("10mm"), Some(dec!(594)));
        assert_eq!(corrected.component("Water"), Some(dec!(186)));
    }

    #[test]
    fn test_reference_moisture_is_identity() {
        let recipe = make_recipe();
        let reading = MoistureReading::new()
            .with(Aggregate::Sand, dec!(2))
            .with(Aggregate::TenMm, dec!(1))
            .with(Aggregate::TwentyMm, dec!(1));
        let corrected = correct(&recipe, &reading);
        assert_eq!(corrected.components, recipe.components);
        assert_eq!(corrected.total_water_correction, Decimal::ZERO);
    }

    #[test]
    fn test_empty_reading_treated_as_zero() {
        let recipe = make_recipe();
        let corrected = correct(&recipe, &MoistureReading::new());
        // Sand: (0-2)*800/100 = -16, 10mm: -6, 20mm: -4
        assert_eq!(corrected.component("Sand"), Some(dec!(784)));
        assert_eq!(corrected.component("10mm"), Some(dec!(594)));
        assert_eq!(corrected.component("20mm"), Some(dec!(396)));
        assert_eq!(corrected.component("Water"), Some(dec!(206)));
        assert_eq!(corrected.total_mass(), recipe.total_mass());
    }

    #[test]
    fn test_missing_ssd_leaves_aggregate_unchanged() {
        let mut recipe = make_recipe();
        recipe.ssd_moisture.remove(&Aggregate::TwentyMm);
        let reading = MoistureReading::new().with(Aggregate::TwentyMm, dec!(6));
        let corrected = correct(&recipe, &reading);
        assert_eq!(corrected.water_corrections[&Aggregate::TwentyMm], Decimal::ZERO);
        assert_eq!(corrected.component("20mm"), Some(dec!(400)));
    }

    #[test]
    fn test_missing_aggregate_is_not_added() {
        let recipe = MixRecipe::new("9", "M20")
            .with_component("Sand", dec!(900))
            .with_component("Water", dec!(190))
            .with_ssd(Aggregate::Sand, dec!(1));
        let reading = MoistureReading::new()
            .with(Aggregate::Sand, dec!(3))
            .with(Aggregate::TenMm, dec!(4));
        let corrected = correct(&recipe, &reading);
        assert!(!corrected.components.contains_key("10mm"));
        assert_eq!(corrected.component("Sand"), Some(dec!(918)));
        assert_eq!(corrected.component("Water"), Some(dec!(172)));
    }

    #[test]
    fn test_recipe_without_water_is_not_corrected() {
        let recipe = MixRecipe::new("3", "M10")
            .with_component("Sand", dec!(800))
            .with_ssd(Aggregate::Sand, dec!(2));
        let reading = MoistureReading::new().with(Aggregate::Sand, dec!(8));
        let corrected = correct(&recipe, &reading);
        assert_eq!(corrected.components, recipe.components);
        assert_eq!(corrected.total_water_correction, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_term_is_zero() {
        let recipe = MixRecipe::new("4", "M10")
            .with_component("Sand", Decimal::MAX)
            .with_component("Water", dec!(180))
            .with_ssd(Aggregate::Sand, dec!(0));
        let reading = MoistureReading::new().with(Aggregate::Sand, dec!(50));
        let corrected = correct(&recipe, &reading);
        assert_eq!(corrected.water_corrections[&Aggregate::Sand], Decimal::ZERO);
        assert_eq!(corrected.component("Sand"), Some(Decimal::MAX));
    }

    #[test]
    fn test_overflowing_aggregate_sum_keeps_reference_weight() {
        // MAX * 1 / 100 fits, MAX + that term does not.
        let recipe = MixRecipe::new("4", "M10")
            .with_component("Sand", Decimal::MAX)
            .with_component("Water", dec!(180))
            .with_ssd(Aggregate::Sand, dec!(0));
        let reading = MoistureReading::new().with(Aggregate::Sand, dec!(1));
        let corrected = correct(&recipe, &reading);
        assert_eq!(corrected.water_corrections[&Aggregate::Sand], Decimal::ZERO);
        assert_eq!(corrected.total_water_correction, Decimal::ZERO);
        assert_eq!(corrected.component("Sand"), Some(Decimal::MAX));
        assert_eq!(corrected.component("Water"), Some(dec!(180)));
    }

    #[test]
    fn test_overflowing_water_offset_keeps_reference_weights() {
        let recipe = MixRecipe::new("5", "M10")
            .with_component("Sand", dec!(800))
            .with_component("10mm", dec!(600))
            .with_component("Water", Decimal::MIN)
            .with_ssd(Aggregate::Sand, dec!(0))
            .with_ssd(Aggregate::TenMm, dec!(1));
        let reading = MoistureReading::new()
            .with(Aggregate::Sand, dec!(5))
            .with(Aggregate::TenMm, dec!(1));
        let corrected = correct(&recipe, &reading);
        assert_eq!(corrected.water_corrections[&Aggregate::Sand], Decimal::ZERO);
        assert_eq!(corrected.component("Sand"), Some(dec!(800)));
        assert_eq!(corrected.component("10mm"), Some(dec!(600)));
        assert_eq!(corrected.component("Water"), Some(Decimal::MIN));
    }

    #[test]
    fn test_brand_variants_pass_through() {
        let recipe = make_recipe()
            .with_component("GGBS(Tata)", dec!(60))
            .with_component("GGBS(JSW)", dec!(40));
        let reading = MoistureReading::new().with(Aggregate::Sand, dec!(4));
        let corrected = correct(&recipe, &reading);
        assert_eq!(corrected.component("GGBS(Tata)"), Some(dec!(60)));
        assert_eq!(corrected.component("GGBS(JSW)"), Some(dec!(40)));
    }
}
