//! Namespaced item identifiers.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Namespace assumed when the user types a bare path.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

static ITEM_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:([a-z0-9_.-]+):)?([a-z0-9_.-]+(?:/[a-z0-9_.-]+)*)$")
        .expect("Invalid item id regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    #[error("Invalid item id: '{0}'")]
    InvalidItemId(String),

    #[error("Recipe has no output item")]
    MissingOutput,

    #[error("Recipe has no ingredients")]
    MissingIngredients,

    #[error("Output count must be between 1 and 64")]
    InvalidCount,
}

/// `namespace:path`, e.g. `minecraft:diamond_pickaxe`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    namespace: String,
    path: String,
}

impl ItemId {
    /// Parse user input. A missing namespace becomes `minecraft:`.
    pub fn parse(input: &str) -> Result<Self, RecipeError> {
        let trimmed = input.trim();
        let captures = ITEM_ID_REGEX
            .captures(trimmed)
            .ok_or_else(|| RecipeError::InvalidItemId(trimmed.to_string()))?;
        let namespace = captures
            .get(1)
            .map_or(DEFAULT_NAMESPACE, |m| m.as_str());
        let path = captures
            .get(2)
            .map(|m| m.as_str())
            .ok_or_else(|| RecipeError::InvalidItemId(trimmed.to_string()))?;
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment, for short labels in the grid.
    pub fn short_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl std::str::FromStr for ItemId {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
