use anyhow::{Context, Result};
use grocery_engine::engine::GroceryEngine;
use grocery_engine::engine_config::EngineConfig;
use grocery_engine::recipe_input::load_recipe_file;
use log::info;
use std::env;
use std::path::PathBuf;

const USAGE: &str = "usage: grocery-engine [--scale <multiplier>] <recipe-file>...";

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    info!("Starting grocery list builder");

    let (multiplier, files) = parse_args(env::args().skip(1))?;

    let config = EngineConfig::from_env().context("Invalid engine configuration")?;
    let engine = GroceryEngine::new(config)?;

    let mut ingredients = Vec::new();
    for path in &files {
        let lines = load_recipe_file(path)?;
        let parsed = engine.parse_all(&lines);
        let parsed = match multiplier {
            Some(m) => engine.scaler().scale_all(&parsed, m),
            None => parsed,
        };
        ingredients.extend(parsed);
    }

    let groceries = engine.consolidate(&ingredients);
    info!(
        "Built grocery list with {} items from {} recipes",
        groceries.len(),
        files.len()
    );

    println!("{}", serde_json::to_string_pretty(&groceries)?);
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Option<f64>, Vec<PathBuf>)> {
    let mut multiplier = None;
    let mut files = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--scale" {
            let value = args.next().context(USAGE)?;
            let value: f64 = value
                .parse()
                .with_context(|| format!("--scale expects a number, got '{value}'"))?;
            multiplier = Some(value);
        } else {
            files.push(PathBuf::from(arg));
        }
    }

    if files.is_empty() {
        anyhow::bail!(USAGE);
    }

    Ok((multiplier, files))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let (multiplier, files) = parse_args(args(&["--scale", "1.5", "a.txt", "b.txt"])).unwrap();
        assert_eq!(multiplier, Some(1.5));
        assert_eq!(files, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--scale"])).is_err());
        assert!(parse_args(args(&["--scale", "lots", "a.txt"])).is_err());
    }
}
