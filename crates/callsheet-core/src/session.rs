use crate::paths;
use crate::types::PlayCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Explicit session context: the selected team/opponent and per-coach
/// preferences. Persisted as `.callsheet/session.yaml`; not authoritative
/// and safe to lose. Core operations take ids as parameters — this exists
/// so the CLI and UI can remember what the coach was looking at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    /// Preferred motion rate for generated plans, in percent.
    #[serde(default = "default_motion_pct")]
    pub motion_pct: f64,
    /// Per-category play-count targets chosen in the UI. Overrides config
    /// defaults for regeneration triggered from this session.
    #[serde(default)]
    pub targets: BTreeMap<PlayCategory, usize>,
}

fn default_motion_pct() -> f64 {
    25.0
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            team: None,
            opponent: None,
            motion_pct: default_motion_pct(),
            targets: BTreeMap::new(),
        }
    }
}

impl SessionContext {
    /// Load the session; a missing file yields the default context.
    pub fn load(root: &Path) -> crate::error::Result<Self> {
        let path = paths::session_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let session: SessionContext = serde_yaml::from_str(&data)?;
        Ok(session)
    }

    pub fn save(&self, root: &Path) -> crate::error::Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::session_path(root), data.as_bytes())
    }

    /// Session targets where set, falling back to the given config map.
    pub fn effective_targets(
        &self,
        config_targets: &BTreeMap<PlayCategory, usize>,
    ) -> BTreeMap<PlayCategory, usize> {
        let mut merged = config_targets.clone();
        for (&cat, &n) in &self.targets {
            merged.insert(cat, n);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_session_is_default() {
        let dir = TempDir::new().unwrap();
        let session = SessionContext::load(dir.path()).unwrap();
        assert!(session.team.is_none());
        assert_eq!(session.motion_pct, 25.0);
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut session = SessionContext::default();
        session.team = Some("eagles".to_string());
        session.opponent = Some("central".to_string());
        session.targets.insert(PlayCategory::RunGame, 18);
        session.save(dir.path()).unwrap();

        let loaded = SessionContext::load(dir.path()).unwrap();
        assert_eq!(loaded.team.as_deref(), Some("eagles"));
        assert_eq!(loaded.targets[&PlayCategory::RunGame], 18);
    }

    #[test]
    fn effective_targets_overlay_config() {
        let mut session = SessionContext::default();
        session.targets.insert(PlayCategory::RunGame, 18);

        let config = BTreeMap::from([
            (PlayCategory::RunGame, 15),
            (PlayCategory::QuickGame, 12),
        ]);
        let merged = session.effective_targets(&config);
        assert_eq!(merged[&PlayCategory::RunGame], 18);
        assert_eq!(merged[&PlayCategory::QuickGame], 12);
    }
}
