use crate::model::Aggregate;
use crate::values;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field moisture (%) measured on the aggregate stockpiles for one correction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoistureReading {
    values: BTreeMap<Aggregate, Decimal>,
}

impl MoistureReading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, aggregate: Aggregate, moisture_pct: Decimal) -> Self {
        self.set(aggregate, moisture_pct);
        self
    }

    pub fn set(&mut self, aggregate: Aggregate, moisture_pct: Decimal) {
        self.values.insert(aggregate, moisture_pct);
    }

    /// Build a reading from raw operator input keyed by component name.
    ///
    /// Blank or non-numeric text reads as 0. Keys that are not moisture
    /// correctable aggregates are ignored.
    pub fn from_inputs<'a, I>(inputs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut reading = Self::new();
        for (key, text) in inputs {
            match Aggregate::from_key(key) {
                Some(aggregate) => reading.set(aggregate, values::parse_or_zero(text)),
                None => tracing::debug!("ignoring moisture input for '{}'", key),
            }
        }
        reading
    }

    /// Measured moisture for `aggregate`, 0 when absent.
    pub fn get(&self, aggregate: Aggregate) -> Decimal {
        self.values.get(&aggregate).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
