use crate::error::RmcError;
use crate::model::{Deviation, MixRecipe};
use rust_decimal::Decimal;

/// Nominal mass of one cubic metre of the mix.
///
/// Always taken from the reference (uncorrected) recipe: moisture changes the
/// water/aggregate split, not the total a batch should weigh.
pub fn theoretical_yield(recipe: &MixRecipe) -> Decimal {
    recipe.total_mass()
}

/// Compare a weighed net mass against the mass expected for `quantity` m³.
///
/// `error` is positive when the batch came out lighter than expected.
/// `error_percent` is `None` only when the theoretical quantity is zero; any
/// overflow along the way is an [`RmcError::Overflow`].
pub fn compute_deviation(
    recipe: &MixRecipe,
    quantity: Decimal,
    net_wt: Decimal,
) -> Result<Deviation, RmcError> {
    let theoretical_qty = recipe
        .checked_total_mass()
        .and_then(|mass| mass.checked_mul(quantity))
        .ok_or(RmcError::Overflow("theoretical quantity"))?;
    let error = theoretical_qty
        .checked_sub(net_wt)
        .ok_or(RmcError::Overflow("deviation error"))?;
    let error_percent = if theoretical_qty.is_zero() {
        tracing::warn!(
            "TM {}: theoretical quantity is zero, error percent undefined",
            recipe.id
        );
        None
    } else {
        let percent = error
            .checked_div(theoretical_qty)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(RmcError::Overflow("error percent"))?;
        Some(percent)
    };

    Ok(Deviation {
        theoretical_qty,
        error,
        error_percent,
    })
}
