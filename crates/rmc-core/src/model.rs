use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Component key carrying the free mix water.
pub const WATER: &str = "Water";

/// An aggregate whose batch weight is corrected for field moisture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Aggregate {
    Sand,
    TenMm,
    TwentyMm,
}

impl Aggregate {
    pub const ALL: [Aggregate; 3] = [Aggregate::Sand, Aggregate::TenMm, Aggregate::TwentyMm];

    /// The component key used in recipes and readings.
    pub fn key(self) -> &'static str {
        match self {
            Aggregate::Sand => "Sand",
            Aggregate::TenMm => "10mm",
            Aggregate::TwentyMm => "20mm",
        }
    }

    pub fn from_key(s: &str) -> Option<Aggregate> {
        match s.trim() {
            "Sand" | "sand" => Some(Aggregate::Sand),
            "10mm" | "10MM" => Some(Aggregate::TenMm),
            "20mm" | "20MM" => Some(Aggregate::TwentyMm),
            _ => None,
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Aggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Aggregate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Aggregate::from_key(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown aggregate '{s}' (expected 'Sand', '10mm' or '20mm')"
            ))
        })
    }
}

/// A trial mix recipe. Weights are per cubic metre of concrete with
/// aggregates at saturated-surface-dry condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixRecipe {
    /// Trial mix (TM) number.
    pub id: String,
    #[serde(default)]
    pub grade: String,
    pub components: BTreeMap<String, Decimal>,
    /// Reference moisture (%) at which the aggregate weights were defined.
    #[serde(rename = "SSD_moisture", default)]
    pub ssd_moisture: BTreeMap<Aggregate, Decimal>,
}

impl MixRecipe {
    pub fn new(id: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            grade: grade.into(),
            components: BTreeMap::new(),
            ssd_moisture: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, name: impl Into<String>, weight: Decimal) -> Self {
        self.components.insert(name.into(), weight);
        self
    }

    pub fn with_ssd(mut self, aggregate: Aggregate, moisture_pct: Decimal) -> Self {
        self.ssd_moisture.insert(aggregate, moisture_pct);
        self
    }

    pub fn component(&self, name: &str) -> Option<Decimal> {
        self.components.get(name).copied()
    }

    /// Sum of all component weights: nominal mass of one cubic metre.
    ///
    /// Saturates at the `Decimal` range; see [`MixRecipe::checked_total_mass`].
    pub fn total_mass(&self) -> Decimal {
        saturating_sum(&self.components)
    }

    /// Sum of all component weights, `None` if it overflows.
    pub fn checked_total_mass(&self) -> Option<Decimal> {
        checked_sum(&self.components)
    }
}

/// Component weights after moisture correction, with the terms that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedRecipe {
    pub tm_number: String,
    pub components: BTreeMap<String, Decimal>,
    /// Free water carried by each aggregate relative to its SSD condition.
    pub water_corrections: BTreeMap<Aggregate, Decimal>,
    pub total_water_correction: Decimal,
}

impl CorrectedRecipe {
    pub fn component(&self, name: &str) -> Option<Decimal> {
        self.components.get(name).copied()
    }

    pub fn total_mass(&self) -> Decimal {
        saturating_sum(&self.components)
    }

    pub fn checked_total_mass(&self) -> Option<Decimal> {
        checked_sum(&self.components)
    }
}

fn checked_sum(components: &BTreeMap<String, Decimal>) -> Option<Decimal> {
    components
        .values()
        .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))
}

fn saturating_sum(components: &BTreeMap<String, Decimal>) -> Decimal {
    components
        .values()
        .fold(Decimal::ZERO, |acc, w| acc.saturating_add(*w))
}

/// Difference between the expected and the weighed net mass of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    pub theoretical_qty: Decimal,
    pub error: Decimal,
    /// `None` when the theoretical quantity is zero.
    pub error_percent: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_aggregate_keys_round_trip() {
        for agg in Aggregate::ALL {
            assert_eq!(Aggregate::from_key(agg.key()), Some(agg));
        }
        assert_eq!(Aggregate::from_key("Cement"), None);
    }

    #[test]
    fn test_recipe_deserializes_ssd_keys() {
        let json = r#"{
            "id": "7",
            "grade": "M25",
            "components": { "Sand": 800, "10mm": 600, "Water": 180 },
            "SSD_moisture": { "Sand": 2, "10mm": 1.5 }
        }"#;
        let recipe: MixRecipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.ssd_moisture[&Aggregate::TenMm], dec!(1.5));
        assert_eq!(recipe.total_mass(), dec!(1580));
    }

    #[test]
    fn test_unknown_ssd_key_rejected() {
        let json = r#"{ "id": "7", "components": {}, "SSD_moisture": { "Gravel": 2 } }"#;
        assert!(serde_json::from_str::<MixRecipe>(json).is_err());
    }

    #[test]
    fn test_total_mass_saturates_instead_of_panicking() {
        let recipe = MixRecipe::new("9", "M25")
            .with_component("Sand", Decimal::MAX)
            .with_component("Water", dec!(180));
        assert_eq!(recipe.checked_total_mass(), None);
        assert_eq!(recipe.total_mass(), Decimal::MAX);
    }
}
