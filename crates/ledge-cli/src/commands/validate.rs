//! Level validation command

use anyhow::{Context, Result};
use ledge_level::load_level;

pub fn run(path: &str, format: &str) -> Result<()> {
    let level = load_level(path).with_context(|| format!("Invalid level: {}", path))?;
    let summary = level.summary();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Level OK: {}", path);
    println!("  hero spawn : ({}, {})", summary.hero.x, summary.hero.y);
    println!("  platforms  : {}", summary.platforms);
    println!("  enemy walls: {}", summary.walls);
    println!("  coins      : {}", summary.coins);
    println!("  spiders    : {}", summary.spiders);
    println!("  decorations: {}", summary.decorations);
    println!(
        "  key / door : {} / {}",
        if summary.has_key { "yes" } else { "no" },
        if summary.has_door { "yes" } else { "no" }
    );
    if !summary.has_door {
        println!("  note: without a door the level never completes");
    }

    Ok(())
}
