use crate::error::RmcError;
use crate::model::MixRecipe;
use serde::Serialize;
use std::collections::BTreeMap;

/// The plant's trial mix recipes, keyed by TM number.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecipeBook {
    recipes: BTreeMap<String, MixRecipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recipe, returning the one it replaced.
    pub fn insert(&mut self, recipe: MixRecipe) -> Option<MixRecipe> {
        self.recipes.insert(recipe.id.clone(), recipe)
    }

    pub fn get(&self, tm_number: &str) -> Result<&MixRecipe, RmcError> {
        self.recipes
            .get(tm_number.trim())
            .ok_or_else(|| RmcError::MissingRecipe {
                tm_number: tm_number.to_string(),
            })
    }

    pub fn contains(&self, tm_number: &str) -> bool {
        self.recipes.contains_key(tm_number.trim())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MixRecipe> {
        self.recipes.values()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl FromIterator<MixRecipe> for RecipeBook {
    fn from_iter<T: IntoIterator<Item = MixRecipe>>(iter: T) -> Self {
        let mut book = RecipeBook::new();
        for recipe in iter {
            book.insert(recipe);
        }
        book
    }
}
