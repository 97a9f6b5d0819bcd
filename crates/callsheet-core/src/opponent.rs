use crate::error::{CallsheetError, Result};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An opponent on a team's schedule. Scouting reports and play pools hang
/// off the (team, opponent) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opponent {
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Opponent {
    pub fn create(
        root: &Path,
        team: &str,
        slug: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let slug = slug.into();
        paths::validate_slug(&slug)?;

        // Owning team must exist.
        crate::team::Team::load(root, team)?;

        if paths::opponent_dir(root, team, &slug).exists() {
            return Err(CallsheetError::OpponentExists(slug));
        }

        let now = Utc::now();
        let opponent = Self {
            slug,
            name: name.into(),
            created_at: now,
            updated_at: now,
        };
        opponent.save(root, team)?;
        Ok(opponent)
    }

    pub fn load(root: &Path, team: &str, slug: &str) -> Result<Self> {
        let manifest = paths::opponent_manifest(root, team, slug);
        if !manifest.exists() {
            return Err(CallsheetError::OpponentNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&manifest)?;
        let opponent: Opponent = serde_yaml::from_str(&data)?;
        Ok(opponent)
    }

    pub fn save(&self, root: &Path, team: &str) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(
            &paths::opponent_manifest(root, team, &self.slug),
            data.as_bytes(),
        )
    }

    pub fn list(root: &Path, team: &str) -> Result<Vec<Self>> {
        let dir = paths::opponents_dir(root, team);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut opponents = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                let slug = entry.file_name().to_string_lossy().into_owned();
                match Self::load(root, team, &slug) {
                    Ok(o) => opponents.push(o),
                    Err(CallsheetError::OpponentNotFound(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        opponents.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(opponents)
    }

    /// Delete this opponent and its scouting report, play pool and game plan.
    pub fn delete(root: &Path, team: &str, slug: &str) -> Result<()> {
        let dir = paths::opponent_dir(root, team, slug);
        if !dir.exists() {
            return Err(CallsheetError::OpponentNotFound(slug.to_string()));
        }
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Team;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let dir = TempDir::new().unwrap();
        Team::create(dir.path(), "eagles", "Eagles", None).unwrap();
        dir
    }

    #[test]
    fn opponent_create_load() {
        let dir = setup();
        Opponent::create(dir.path(), "eagles", "central", "Central High").unwrap();
        let loaded = Opponent::load(dir.path(), "eagles", "central").unwrap();
        assert_eq!(loaded.name, "Central High");
    }

    #[test]
    fn opponent_requires_team() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Opponent::create(dir.path(), "ghost", "central", "Central"),
            Err(CallsheetError::TeamNotFound(_))
        ));
    }

    #[test]
    fn opponent_duplicate_fails() {
        let dir = setup();
        Opponent::create(dir.path(), "eagles", "central", "Central").unwrap();
        assert!(matches!(
            Opponent::create(dir.path(), "eagles", "central", "Central"),
            Err(CallsheetError::OpponentExists(_))
        ));
    }

    #[test]
    fn opponent_delete_removes_scoped_files() {
        let dir = setup();
        Opponent::create(dir.path(), "eagles", "central", "Central").unwrap();
        crate::io::atomic_write(
            &crate::paths::playpool_path(dir.path(), "eagles", "central"),
            b"plays: []",
        )
        .unwrap();

        Opponent::delete(dir.path(), "eagles", "central").unwrap();
        assert!(!crate::paths::opponent_dir(dir.path(), "eagles", "central").exists());
    }

    #[test]
    fn list_empty_without_opponents_dir() {
        let dir = setup();
        assert!(Opponent::list(dir.path(), "eagles").unwrap().is_empty());
    }
}
