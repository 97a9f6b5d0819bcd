use crate::error::{CallsheetError, Result};
use crate::journal::{OpJournal, OpKind};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// A coach attached to a team. Email is the identity key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub email: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub added_at: DateTime<Utc>,
}

fn default_role() -> String {
    "coach".to_string()
}

impl Profile {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            role: default_role(),
            added_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            name: name.into(),
            profiles: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn create(
        root: &Path,
        slug: impl Into<String>,
        name: impl Into<String>,
        head_coach: Option<Profile>,
    ) -> Result<Self> {
        let slug = slug.into();
        paths::validate_slug(&slug)?;

        if paths::team_dir(root, &slug).exists() {
            return Err(CallsheetError::TeamExists(slug));
        }

        let mut team = Self::new(slug, name);
        if let Some(p) = head_coach {
            team.profiles.push(p);
        }
        team.save(root)?;
        Ok(team)
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        let manifest = paths::team_manifest(root, slug);
        if !manifest.exists() {
            return Err(CallsheetError::TeamNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&manifest)?;
        let team: Team = serde_yaml::from_str(&data)?;
        Ok(team)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::team_manifest(root, &self.slug), data.as_bytes())
    }

    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let teams_dir = root.join(paths::TEAMS_DIR);
        if !teams_dir.exists() {
            return Ok(Vec::new());
        }

        let mut teams = Vec::new();
        for entry in std::fs::read_dir(&teams_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                let slug = entry.file_name().to_string_lossy().into_owned();
                match Self::load(root, &slug) {
                    Ok(t) => teams.push(t),
                    Err(CallsheetError::TeamNotFound(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        teams.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(teams)
    }

    // -----------------------------------------------------------------------
    // Profiles
    // -----------------------------------------------------------------------

    pub fn add_profile(&mut self, profile: Profile) {
        self.profiles.retain(|p| p.email != profile.email);
        self.profiles.push(profile);
        self.updated_at = Utc::now();
    }

    /// Remove a profile by email; returns the number of profiles remaining.
    /// The caller decides whether an empty team triggers the delete cascade.
    pub fn remove_profile(&mut self, email: &str) -> Result<usize> {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.email != email);
        if self.profiles.len() == before {
            return Err(CallsheetError::ProfileNotFound(email.to_string()));
        }
        self.updated_at = Utc::now();
        Ok(self.profiles.len())
    }
}

// ---------------------------------------------------------------------------
// Delete cascade
// ---------------------------------------------------------------------------

/// Delete a team and everything scoped to it: terminology, each opponent's
/// scouting report, play pool and game plan, then the team directory.
///
/// Runs as a journaled multi-step operation. Steps that complete before a
/// failure stay recorded in the journal; there is no rollback.
pub fn delete_cascade(root: &Path, slug: &str, journal: &OpJournal) -> Result<()> {
    // Load first so a bad slug fails before the journal records anything.
    let team = Team::load(root, slug)?;

    let mut op = journal.begin(
        OpKind::TeamDelete,
        slug,
        format!("delete team '{}'", team.name),
        &["delete_terminology", "delete_opponents", "delete_team_dir"],
    )?;

    crate::io::remove_if_present(&paths::terminology_path(root, slug))?;
    journal.complete_step(&mut op, "delete_terminology")?;

    let opponents_dir = paths::opponents_dir(root, slug);
    if opponents_dir.exists() {
        std::fs::remove_dir_all(&opponents_dir)?;
    }
    journal.complete_step(&mut op, "delete_opponents")?;

    std::fs::remove_dir_all(paths::team_dir(root, slug))?;
    journal.complete_step(&mut op, "delete_team_dir")?;

    journal.finish(&mut op)?;
    tracing::info!(team = %slug, "team deleted (cascade)");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn journal(dir: &TempDir) -> OpJournal {
        OpJournal::open(&dir.path().join("journal.redb")).unwrap()
    }

    #[test]
    fn team_create_load() {
        let dir = TempDir::new().unwrap();
        let team = Team::create(
            dir.path(),
            "eagles",
            "Eagles Varsity",
            Some(Profile::new("hc@eagles.test", "Pat Shields")),
        )
        .unwrap();
        assert_eq!(team.slug, "eagles");
        assert_eq!(team.profiles.len(), 1);

        let loaded = Team::load(dir.path(), "eagles").unwrap();
        assert_eq!(loaded.name, "Eagles Varsity");
        assert_eq!(loaded.profiles[0].role, "coach");
    }

    #[test]
    fn team_create_duplicate_fails() {
        let dir = TempDir::new().unwrap();
        Team::create(dir.path(), "eagles", "Eagles", None).unwrap();
        assert!(matches!(
            Team::create(dir.path(), "eagles", "Eagles Again", None),
            Err(CallsheetError::TeamExists(_))
        ));
    }

    #[test]
    fn team_create_rejects_bad_slug() {
        let dir = TempDir::new().unwrap();
        assert!(Team::create(dir.path(), "Bad Slug", "X", None).is_err());
    }

    #[test]
    fn remove_profile_reports_remaining() {
        let dir = TempDir::new().unwrap();
        let mut team = Team::create(dir.path(), "eagles", "Eagles", None).unwrap();
        team.add_profile(Profile::new("a@x.test", "A"));
        team.add_profile(Profile::new("b@x.test", "B"));

        assert_eq!(team.remove_profile("a@x.test").unwrap(), 1);
        assert!(matches!(
            team.remove_profile("a@x.test"),
            Err(CallsheetError::ProfileNotFound(_))
        ));
        assert_eq!(team.remove_profile("b@x.test").unwrap(), 0);
    }

    #[test]
    fn add_profile_replaces_same_email() {
        let dir = TempDir::new().unwrap();
        let mut team = Team::create(dir.path(), "eagles", "Eagles", None).unwrap();
        team.add_profile(Profile::new("a@x.test", "Old Name"));
        team.add_profile(Profile::new("a@x.test", "New Name"));
        assert_eq!(team.profiles.len(), 1);
        assert_eq!(team.profiles[0].name, "New Name");
    }

    #[test]
    fn delete_cascade_removes_everything() {
        let dir = TempDir::new().unwrap();
        let j = journal(&dir);
        Team::create(dir.path(), "eagles", "Eagles", None).unwrap();
        crate::io::atomic_write(
            &paths::scouting_path(dir.path(), "eagles", "central"),
            b"placeholder: true",
        )
        .unwrap();
        crate::io::atomic_write(
            &paths::terminology_path(dir.path(), "eagles"),
            b"entries: []",
        )
        .unwrap();

        delete_cascade(dir.path(), "eagles", &j).unwrap();
        assert!(!paths::team_dir(dir.path(), "eagles").exists());
        assert!(matches!(
            Team::load(dir.path(), "eagles"),
            Err(CallsheetError::TeamNotFound(_))
        ));

        // All steps should be recorded as done.
        let ops = j.list_recent(10).unwrap();
        assert_eq!(ops.len(), 1);
        assert!(ops[0].is_finished());
    }

    #[test]
    fn delete_cascade_unknown_team_leaves_no_journal_entry() {
        let dir = TempDir::new().unwrap();
        let j = journal(&dir);
        assert!(delete_cascade(dir.path(), "ghost", &j).is_err());
        assert!(j.list_recent(10).unwrap().is_empty());
    }

    #[test]
    fn list_sorted_by_creation() {
        let dir = TempDir::new().unwrap();
        Team::create(dir.path(), "alpha", "Alpha", None).unwrap();
        Team::create(dir.path(), "bravo", "Bravo", None).unwrap();
        let teams = Team::list(dir.path()).unwrap();
        assert_eq!(teams.len(), 2);
        assert!(teams[0].created_at <= teams[1].created_at);
    }
}
