//! # Recipe Input
//!
//! Turns recipe text and recipe files into raw ingredient lines. A recipe
//! file is plain text with one ingredient per line; its file stem becomes
//! the recipe id.

use crate::engine_errors::EngineError;
use crate::ingredient_model::RawIngredientLine;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Split recipe text into raw lines, skipping blank ones
pub fn lines_from_text(text: &str, recipe_id: Option<&str>) -> Vec<RawIngredientLine> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| RawIngredientLine::new(line, recipe_id))
        .collect()
}

/// Read a recipe file, using its stem as the recipe id
pub fn load_recipe_file(path: &Path) -> Result<Vec<RawIngredientLine>, EngineError> {
    let recipe_id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| EngineError::Io(format!("cannot derive a recipe id from {}", path.display())))?;

    debug!("Reading recipe '{}' from {}", recipe_id, path.display());
    let text = fs::read_to_string(path)
        .map_err(|e| EngineError::Io(format!("{}: {}", path.display(), e)))?;

    let lines = lines_from_text(&text, Some(recipe_id));
    info!("Loaded {} ingredient lines for recipe '{}'", lines.len(), recipe_id);
    Ok(lines)
}
