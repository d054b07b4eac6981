pub mod book;

pub use book::RecipeBook;

use crate::error::RmcError;
use crate::model::{Aggregate, MixRecipe};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Upper bound on a single component weight in kg per m³.
pub const MAX_COMPONENT_WEIGHT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Recipe fields as stored under a TM number.
#[derive(Debug, Deserialize)]
struct RecipeData {
    #[serde(default)]
    grade: String,
    components: BTreeMap<String, Decimal>,
    #[serde(rename = "SSD_moisture", default)]
    ssd_moisture: BTreeMap<Aggregate, Decimal>,
}

#[derive(Debug, Deserialize)]
struct RecipeRecord {
    id: String,
    data: RecipeData,
}

/// A recipe book file: either the upload list of `{ id, data }` records or
/// an object keyed by TM number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeFile {
    Records(Vec<RecipeRecord>),
    Keyed(BTreeMap<String, RecipeData>),
}

impl RecipeData {
    fn into_recipe(self, id: String) -> MixRecipe {
        MixRecipe {
            id: id.trim().to_string(),
            grade: self.grade,
            components: self.components,
            ssd_moisture: self.ssd_moisture,
        }
    }
}

/// Load a recipe book from a JSON file.
pub fn load_recipe_book(path: &Path) -> Result<RecipeBook, RmcError> {
    let content = std::fs::read_to_string(path).map_err(|e| RmcError::RecipeLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_recipe_book(&content, path)
}

/// Parse a recipe book from a JSON string.
pub fn parse_recipe_book(json: &str, source: &Path) -> Result<RecipeBook, RmcError> {
    let file: RecipeFile = serde_json::from_str(json).map_err(|e| RmcError::RecipeLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    let book = build_book(file)?;
    tracing::info!("loaded {} recipe(s) from {}", book.len(), source.display());
    Ok(book)
}

/// Parse a recipe book from a JSON string (no file path context).
pub fn parse_recipe_book_str(json: &str) -> Result<RecipeBook, RmcError> {
    let file: RecipeFile = serde_json::from_str(json).map_err(RmcError::Json)?;
    build_book(file)
}

fn build_book(file: RecipeFile) -> Result<RecipeBook, RmcError> {
    let recipes: Vec<MixRecipe> = match file {
        RecipeFile::Records(records) => records
            .into_iter()
            .map(|r| r.data.into_recipe(r.id))
            .collect(),
        RecipeFile::Keyed(map) => map
            .into_iter()
            .map(|(id, data)| data.into_recipe(id))
            .collect(),
    };

    let mut book = RecipeBook::new();
    for recipe in recipes {
        validate_recipe(&recipe)?;
        if book.contains(&recipe.id) {
            return Err(RmcError::RecipeInvalid(format!(
                "duplicate TM number '{}'",
                recipe.id
            )));
        }
        book.insert(recipe);
    }
    Ok(book)
}

/// Validate that a recipe is well-formed.
pub fn validate_recipe(recipe: &MixRecipe) -> Result<(), RmcError> {
    if recipe.id.trim().is_empty() {
        return Err(RmcError::RecipeInvalid("TM number must not be empty".into()));
    }

    if recipe.components.is_empty() {
        return Err(RmcError::RecipeInvalid(format!(
            "TM {} has no components",
            recipe.id
        )));
    }

    for (name, weight) in &recipe.components {
        if name.trim().is_empty() {
            return Err(RmcError::RecipeInvalid(format!(
                "TM {} has a component with an empty name",
                recipe.id
            )));
        }
        if *weight < Decimal::ZERO {
            return Err(RmcError::RecipeInvalid(format!(
                "TM {} component '{}' has negative weight {}",
                recipe.id, name, weight
            )));
        }
        if *weight > MAX_COMPONENT_WEIGHT {
            return Err(RmcError::RecipeInvalid(format!(
                "TM {} component '{}' weight {} exceeds {} kg",
                recipe.id, name, weight, MAX_COMPONENT_WEIGHT
            )));
        }
    }

    for (aggregate, moisture) in &recipe.ssd_moisture {
        if *moisture < Decimal::ZERO || *moisture > Decimal::ONE_HUNDRED {
            return Err(RmcError::RecipeInvalid(format!(
                "TM {} SSD moisture for '{}' must be between 0 and 100, got {}",
                recipe.id, aggregate, moisture
            )));
        }
        if !recipe.components.contains_key(aggregate.key()) {
            return Err(RmcError::RecipeInvalid(format!(
                "TM {} has SSD moisture for '{}' but no such component",
                recipe.id, aggregate
            )));
        }
    }

    Ok(())
}
