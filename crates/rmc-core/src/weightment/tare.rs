use crate::error::RmcError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A stored tare weight: a bare number or a `{ "tareWeight": n }` document.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TareValue {
    Plain(Decimal),
    Document {
        #[serde(rename = "tareWeight")]
        tare_weight: Decimal,
    },
}

/// Empty weight of each transit mixer (miller), keyed by miller number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TareRegistry {
    weights: BTreeMap<String, Decimal>,
}

impl TareRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or replace the tare weight of a miller.
    pub fn set(&mut self, miller_number: &str, tare_wt: Decimal) -> Result<(), RmcError> {
        let miller_number = miller_number.trim();
        if miller_number.is_empty() {
            return Err(RmcError::MissingField("miller number"));
        }
        if tare_wt <= Decimal::ZERO {
            return Err(RmcError::InvalidTareWeight {
                miller_number: miller_number.to_string(),
                value: tare_wt,
            });
        }
        tracing::info!("tare weight for miller {} set to {}", miller_number, tare_wt);
        self.weights.insert(miller_number.to_string(), tare_wt);
        Ok(())
    }

    pub fn get(&self, miller_number: &str) -> Result<Decimal, RmcError> {
        self.weights
            .get(miller_number.trim())
            .copied()
            .ok_or_else(|| RmcError::MissingTareWeight {
                miller_number: miller_number.to_string(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.weights.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self, RmcError> {
        let raw: BTreeMap<String, TareValue> = serde_json::from_str(json)?;
        let mut registry = TareRegistry::new();
        for (miller, value) in raw {
            let tare = match value {
                TareValue::Plain(v) => v,
                TareValue::Document { tare_weight } => tare_weight,
            };
            registry.set(&miller, tare)?;
        }
        Ok(registry)
    }

    pub fn load(path: &Path) -> Result<Self, RmcError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), RmcError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_set_and_get() {
        let mut tares = TareRegistry::new();
        tares.set("14", dec!(9850)).unwrap();
        assert_eq!(tares.get(" 14").unwrap(), dec!(9850));
    }

    #[test]
    fn test_update_replaces() {
        let mut tares = TareRegistry::new();
        tares.set("14", dec!(9850)).unwrap();
        tares.set("14", dec!(9900)).unwrap();
        assert_eq!(tares.get("14").unwrap(), dec!(9900));
        assert_eq!(tares.len(), 1);
    }

    #[test]
    fn test_unknown_miller() {
        let tares = TareRegistry::new();
        assert!(matches!(
            tares.get("3"),
            Err(RmcError::MissingTareWeight { .. })
        ));
    }

    #[test]
    fn test_zero_tare_rejected() {
        let mut tares = TareRegistry::new();
        assert!(matches!(
            tares.set("3", Decimal::ZERO),
            Err(RmcError::InvalidTareWeight { .. })
        ));
        assert!(tares.is_empty());
    }

    #[test]
    fn test_json_accepts_both_shapes() {
        let json = r#"{ "11": 9700, "12": { "tareWeight": "9810.5" } }"#;
        let tares = TareRegistry::from_json_str(json).unwrap();
        assert_eq!(tares.get("11").unwrap(), dec!(9700));
        assert_eq!(tares.get("12").unwrap(), dec!(9810.5));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tares.json");
        let mut tares = TareRegistry::new();
        tares.set("5", dec!(10120)).unwrap();
        tares.save(&path).unwrap();
        assert_eq!(TareRegistry::load(&path).unwrap(), tares);
    }
}
