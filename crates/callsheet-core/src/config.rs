use crate::error::Result;
use crate::paths;
use crate::types::PlayCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// AgentConfig
// ---------------------------------------------------------------------------

/// Settings for the external completion endpoint. The API key itself stays
/// out of the config file; only the environment variable name is recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout_secs() -> u64 {
    90
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub project: String,
    #[serde(default = "default_template_team")]
    pub template_team: String,
    /// Per-category regeneration targets. Categories absent here fall back
    /// to `PlayCategory::default_target`.
    #[serde(default)]
    pub targets: BTreeMap<PlayCategory, usize>,
    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_template_team() -> String {
    "default".to_string()
}

impl Config {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            template_team: default_template_team(),
            targets: BTreeMap::new(),
            agent: AgentConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(crate::error::CallsheetError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::config_path(root), data.as_bytes())
    }

    /// Effective regeneration target for a category: configured value clamped
    /// to `[min_target, cap]`, or the built-in default.
    pub fn target_for(&self, category: PlayCategory) -> usize {
        self.targets
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_target())
            .clamp(category.min_target(), category.cap())
    }

    /// Full resolved target map for all categories.
    pub fn resolved_targets(&self) -> BTreeMap<PlayCategory, usize> {
        PlayCategory::all()
            .iter()
            .map(|&c| (c, self.target_for(c)))
            .collect()
    }

    /// Surface out-of-range configured targets without failing the load.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        for (&cat, &n) in &self.targets {
            if n > cat.cap() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "target {n} for {cat} exceeds cap {}; clamping",
                        cat.cap()
                    ),
                });
            }
            if n < cat.min_target() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "target {n} for {cat} is below minimum {}; clamping",
                        cat.min_target()
                    ),
                });
            }
        }
        if self.template_team.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "template_team must not be empty".to_string(),
            });
        }
        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::new("varsity");
        config.targets.insert(PlayCategory::RunGame, 18);
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.project, "varsity");
        assert_eq!(loaded.template_team, "default");
        assert_eq!(loaded.target_for(PlayCategory::RunGame), 18);
    }

    #[test]
    fn load_without_init_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(crate::error::CallsheetError::NotInitialized)
        ));
    }

    #[test]
    fn targets_clamp_to_bounds() {
        let mut config = Config::new("t");
        config.targets.insert(PlayCategory::RunGame, 99);
        config.targets.insert(PlayCategory::RpoGame, 1);
        assert_eq!(config.target_for(PlayCategory::RunGame), 20);
        assert_eq!(config.target_for(PlayCategory::RpoGame), 5);
        // unconfigured categories use defaults
        assert_eq!(
            config.target_for(PlayCategory::ShotPlays),
            PlayCategory::ShotPlays.default_target()
        );
    }

    #[test]
    fn validate_flags_out_of_range_targets() {
        let mut config = Config::new("t");
        config.targets.insert(PlayCategory::QuickGame, 25);
        config.targets.insert(PlayCategory::RpoGame, 2);
        let warnings = config.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.level == WarnLevel::Warning));
    }

    #[test]
    fn agent_defaults_fill_in() {
        let yaml = "project: solo\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.agent.model, "gpt-4o");
        assert_eq!(config.agent.timeout_secs, 90);
        assert_eq!(config.agent.api_key_env, "OPENAI_API_KEY");
    }
}
