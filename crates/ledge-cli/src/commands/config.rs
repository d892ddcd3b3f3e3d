//! Tuning inspection command

use anyhow::{Context, Result};
use ledge_policy::Tuning;
use std::path::Path;

pub fn run(file: Option<&str>) -> Result<()> {
    let tuning = match file {
        Some(path) => Tuning::load_from_file(Path::new(path))
            .with_context(|| format!("Invalid tuning file: {}", path))?,
        None => {
            if let Some(global) = Tuning::global_config_path() {
                println!("# global : {}", global.display());
            }
            println!("# project: .ledge/config.toml");
            Tuning::load().context("Failed to load tuning")?
        }
    };

    print!("{}", tuning.to_toml_string()?);
    Ok(())
}
