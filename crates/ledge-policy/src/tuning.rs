//! Layered gameplay tuning
//!
//! Tuning is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `LEDGE_{FIELD}` (e.g. `LEDGE_HERO_SPEED`)
//! 2. Project-local: `.ledge/config.toml`
//! 3. Global: `~/.ledge/config.toml`

use ledge_core::{LedgeError, Result};
use ledge_runtime::{actions, InputState, Key};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Speeds, timings and key bindings the policy runs with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Horizontal hero speed in px/s
    pub hero_speed: f32,
    /// Upward speed given by a jump, px/s
    pub jump_speed: f32,
    /// Upward speed given by stomping a spider, px/s
    pub bounce_speed: f32,
    /// Spider patrol speed, px/s
    pub spider_speed: f32,
    /// World gravity, forwarded to the host's physics
    pub gravity: f32,
    /// Seconds a spider plays its death animation before removal
    pub spider_death_duration: f32,
    /// Frame length used when a frame does not report its own dt
    pub fixed_timestep: f32,
    /// Action name -> keys; replaces the built-in binding for that action
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: BTreeMap<String, Vec<Key>>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hero_speed: 200.0,
            jump_speed: 600.0,
            bounce_speed: 200.0,
            spider_speed: 100.0,
            gravity: 1200.0,
            spider_death_duration: 1.0,
            fixed_timestep: 1.0 / 60.0,
            bindings: BTreeMap::new(),
        }
    }
}

/// One config file; every field optional so layers can be partial
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TuningFile {
    hero_speed: Option<f32>,
    jump_speed: Option<f32>,
    bounce_speed: Option<f32>,
    spider_speed: Option<f32>,
    gravity: Option<f32>,
    spider_death_duration: Option<f32>,
    fixed_timestep: Option<f32>,
    #[serde(default)]
    bindings: BTreeMap<String, Vec<Key>>,
}

impl Tuning {
    /// Load tuning with layered precedence: defaults < global < project < env vars
    pub fn load() -> Result<Self> {
        let global = Self::global_config_path();
        let project = PathBuf::from(".ledge/config.toml");
        Self::load_layers(
            global.as_deref(),
            Some(project.as_path()),
            |name| std::env::var(name).ok(),
        )
    }

    /// Load a single file on top of the defaults, then apply env overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut tuning = Self::default();
        tuning.merge(Self::load_file(path)?);
        tuning.apply_env_overrides(|name| std::env::var(name).ok())?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Layered load with an injectable environment lookup. Missing files are skipped.
    pub fn load_layers(
        global: Option<&Path>,
        project: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut tuning = Self::default();

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading tuning layer");
                tuning.merge(Self::load_file(path)?);
            }
        }

        tuning.apply_env_overrides(env)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ledge").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<TuningFile> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            LedgeError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    fn merge(&mut self, file: TuningFile) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if let Some(v) = file.$field { self.$field = v; })*
            };
        }
        take!(
            hero_speed,
            jump_speed,
            bounce_speed,
            spider_speed,
            gravity,
            spider_death_duration,
            fixed_timestep
        );
        self.bindings.extend(file.bindings);
    }

    fn apply_env_overrides(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        let fields = [
            ("LEDGE_HERO_SPEED", &mut self.hero_speed),
            ("LEDGE_JUMP_SPEED", &mut self.jump_speed),
            ("LEDGE_BOUNCE_SPEED", &mut self.bounce_speed),
            ("LEDGE_SPIDER_SPEED", &mut self.spider_speed),
            ("LEDGE_GRAVITY", &mut self.gravity),
        ];
        for (var, field) in fields {
            let Some(raw) = env(var) else { continue };
            *field = raw.trim().parse().map_err(|_| {
                LedgeError::ConfigError(format!("{var} must be a number, got '{raw}'"))
            })?;
        }
        Ok(())
    }

    /// Reject values the policy cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("hero_speed", self.hero_speed),
            ("jump_speed", self.jump_speed),
            ("bounce_speed", self.bounce_speed),
            ("spider_speed", self.spider_speed),
            ("fixed_timestep", self.fixed_timestep),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LedgeError::ConfigError(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !(self.spider_death_duration.is_finite() && self.spider_death_duration >= 0.0) {
            return Err(LedgeError::ConfigError(format!(
                "spider_death_duration must be zero or more, got {}",
                self.spider_death_duration
            )));
        }
        if !self.gravity.is_finite() {
            return Err(LedgeError::ConfigError("gravity must be finite".into()));
        }
        if let Some(action) = self.bindings.keys().find(|a| !actions::ALL.contains(&a.as_str())) {
            return Err(LedgeError::ConfigError(format!(
                "unknown action '{action}' in bindings; valid actions: {}",
                actions::ALL.join(", ")
            )));
        }
        Ok(())
    }

    /// Install the configured bindings into an input state
    pub fn apply_bindings(&self, input: &mut InputState) {
        for (action, keys) in &self.bindings {
            input.bind_action(action.clone(), keys.clone());
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir_name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(dir_name);
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("config.toml");
        fs::write(&path, content).expect("write failed");
        path
    }

    #[test]
    fn test_defaults() {
        let t = Tuning::default();
        assert_eq!(t.hero_speed, 200.0);
        assert_eq!(t.jump_speed, 600.0);
        assert_eq!(t.bounce_speed, 200.0);
        assert_eq!(t.spider_speed, 100.0);
        assert_eq!(t.gravity, 1200.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_missing_layers_give_defaults() {
        let t = Tuning::load_layers(
            Some(Path::new("/nonexistent/global.toml")),
            None,
            no_env,
        )
        .unwrap();
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn test_project_overrides_global() {
        let global = write_config("ledge_tuning_global", "hero_speed = 150.0\ngravity = 900.0\n");
        let project = write_config("ledge_tuning_project", "hero_speed = 250.0\n");

        let t = Tuning::load_layers(Some(&global), Some(&project), no_env).unwrap();
        assert_eq!(t.hero_speed, 250.0);
        assert_eq!(t.gravity, 900.0);
        assert_eq!(t.jump_speed, 600.0);

        let _ = fs::remove_file(&global);
        let _ = fs::remove_file(&project);
    }

    #[test]
    fn test_env_overrides_files() {
        let project = write_config("ledge_tuning_env", "spider_speed = 80.0\n");
        let env = |name: &str| (name == "LEDGE_SPIDER_SPEED").then(|| "120".to_string());

        let t = Tuning::load_layers(None, Some(&project), env).unwrap();
        assert_eq!(t.spider_speed, 120.0);

        let _ = fs::remove_file(&project);
    }

    #[test]
    fn test_bad_env_value() {
        let env = |name: &str| (name == "LEDGE_JUMP_SPEED").then(|| "high".to_string());
        let err = Tuning::load_layers(None, None, env).unwrap_err();
        assert!(matches!(err, LedgeError::ConfigError(_)));
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let project = write_config("ledge_tuning_invalid", "hero_speed = 0.0\n");
        let err = Tuning::load_layers(None, Some(&project), no_env).unwrap_err();
        assert!(matches!(err, LedgeError::ConfigError(_)));
        let _ = fs::remove_file(&project);
    }

    #[test]
    fn test_bindings_from_file() {
        let project = write_config(
            "ledge_tuning_bindings",
            "[bindings]\njump = [\"Space\"]\n",
        );
        let t = Tuning::load_layers(None, Some(&project), no_env).unwrap();

        let mut input = InputState::new();
        t.apply_bindings(&mut input);
        assert_eq!(input.bindings(actions::JUMP), &[Key::Space]);
        assert_eq!(input.bindings(actions::MOVE_LEFT), &[Key::Left, Key::A]);

        let _ = fs::remove_file(&project);
    }

    #[test]
    fn test_unknown_setting_rejected() {
        let project = write_config("ledge_tuning_typo", "hero_sped = 250.0\n");
        let err = Tuning::load_layers(None, Some(&project), no_env).unwrap_err();
        assert!(matches!(err, LedgeError::ConfigError(msg) if msg.contains("hero_sped")));
        let _ = fs::remove_file(&project);
    }

    #[test]
    fn test_unknown_binding_action_rejected() {
        let project = write_config(
            "ledge_tuning_bad_action",
            "[bindings]\ndash = [\"S\"]\n",
        );
        let err = Tuning::load_layers(None, Some(&project), no_env).unwrap_err();
        assert!(matches!(err, LedgeError::ConfigError(msg) if msg.contains("dash")));
        let _ = fs::remove_file(&project);
    }

    #[test]
    fn test_toml_output_parses_back() {
        let text = Tuning::default().to_toml_string().unwrap();
        let file: TuningFile = toml::from_str(&text).unwrap();
        assert_eq!(file.hero_speed, Some(200.0));
    }
}
