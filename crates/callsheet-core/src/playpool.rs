use crate::error::{CallsheetError, Result};
use crate::paths;
use crate::types::PlayCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Play
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Play {
    pub id: Uuid,
    pub category: PlayCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_shift: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_concept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_screen_concept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen_direction: Option<String>,
    /// Comma-separated lists of defensive looks this play is built to exploit.
    #[serde(default)]
    pub front_beaters: String,
    #[serde(default)]
    pub coverage_beaters: String,
    #[serde(default)]
    pub blitz_beaters: String,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub is_favorite: bool,
    /// A coach-supplied call string that overrides the derived one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customized_edit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl Play {
    pub fn new(category: PlayCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category,
            formation: None,
            tag: None,
            strength: None,
            motion_shift: None,
            concept: None,
            run_concept: None,
            run_direction: None,
            pass_screen_concept: None,
            screen_direction: None,
            front_beaters: String::new(),
            coverage_beaters: String::new(),
            blitz_beaters: String::new(),
            is_enabled: true,
            is_locked: false,
            is_favorite: false,
            customized_edit: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// A fresh pool row drawn from a master template play: new identity,
    /// flags reset, no customized call.
    pub fn from_template(template: &Play) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            is_enabled: true,
            is_locked: false,
            is_favorite: false,
            customized_edit: None,
            created_at: now,
            updated_at: now,
            ..template.clone()
        }
    }

    /// The human-readable call string. Total over any `Play`: prefers a
    /// non-empty `customized_edit`, else joins the non-empty descriptive
    /// fields with single spaces.
    pub fn format_call(&self) -> String {
        if let Some(custom) = &self.customized_edit {
            if !custom.trim().is_empty() {
                return custom.clone();
            }
        }
        [
            &self.formation,
            &self.tag,
            &self.strength,
            &self.motion_shift,
            &self.concept,
            &self.run_concept,
            &self.run_direction,
            &self.pass_screen_concept,
            &self.screen_direction,
        ]
        .into_iter()
        .filter_map(|f| f.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Whether this play's `front_beaters` list names the given front.
    /// Comparison is on trimmed comma-separated items, case-insensitive.
    pub fn beats_front(&self, front: &str) -> bool {
        self.front_beaters
            .split(',')
            .map(str::trim)
            .any(|b| !b.is_empty() && b.eq_ignore_ascii_case(front.trim()))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// PlayPool
// ---------------------------------------------------------------------------

/// The candidate play set for one (team, opponent), or the template team's
/// master library. Carries a monotonic revision for optimistic writes.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayPool {
    #[serde(default)]
    pub revision: u64,
    #[serde(default)]
    pub plays: Vec<Play>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PlayPool {
    /// Load the pool for a (team, opponent); a missing file is an empty pool.
    pub fn load(root: &Path, team: &str, opponent: &str) -> Result<Self> {
        Self::load_path(&paths::playpool_path(root, team, opponent))
    }

    pub fn save(&self, root: &Path, team: &str, opponent: &str) -> Result<()> {
        self.save_path(&paths::playpool_path(root, team, opponent))
    }

    /// The master template library owned by the template team.
    pub fn load_master(root: &Path, template_team: &str) -> Result<Self> {
        Self::load_path(&paths::master_pool_path(root, template_team))
    }

    pub fn save_master(&self, root: &Path, template_team: &str) -> Result<()> {
        self.save_path(&paths::master_pool_path(root, template_team))
    }

    pub fn load_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        let pool: PlayPool = serde_yaml::from_str(&data)?;
        Ok(pool)
    }

    pub fn save_path(&self, path: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(path, data.as_bytes())
    }

    /// Reject a write based on a stale revision. `None` keeps the legacy
    /// last-writer-wins behavior.
    pub fn check_revision(&self, basis: Option<u64>) -> Result<()> {
        if let Some(basis) = basis {
            if basis != self.revision {
                return Err(CallsheetError::StaleRevision {
                    current: self.revision,
                    basis,
                });
            }
        }
        Ok(())
    }

    pub fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Some(Utc::now());
    }

    pub fn plays_in(&self, category: PlayCategory) -> impl Iterator<Item = &Play> {
        self.plays.iter().filter(move |p| p.category == category)
    }

    /// The active view for a category: locked plays first, then unlocked in
    /// stored order, truncated at the category cap. Locked plays are always
    /// included, even beyond the cap; unlocked plays past the cap are hidden
    /// but never deleted here.
    pub fn active_view(&self, category: PlayCategory) -> Vec<&Play> {
        let cap = category.cap();
        let mut view: Vec<&Play> = self
            .plays_in(category)
            .filter(|p| p.is_locked)
            .collect();
        for play in self.plays_in(category).filter(|p| !p.is_locked) {
            if view.len() >= cap {
                break;
            }
            view.push(play);
        }
        view
    }

    // -----------------------------------------------------------------------
    // Row mutations
    // -----------------------------------------------------------------------

    fn play_mut(&mut self, id: Uuid) -> Result<&mut Play> {
        self.plays
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CallsheetError::PlayNotFound(id.to_string()))
    }

    pub fn set_locked(&mut self, id: Uuid, locked: bool) -> Result<()> {
        let play = self.play_mut(id)?;
        play.is_locked = locked;
        play.touch();
        self.touch();
        Ok(())
    }

    pub fn set_enabled(&mut self, id: Uuid, enabled: bool) -> Result<()> {
        let play = self.play_mut(id)?;
        play.is_enabled = enabled;
        play.touch();
        self.touch();
        Ok(())
    }

    pub fn set_favorite(&mut self, id: Uuid, favorite: bool) -> Result<()> {
        let play = self.play_mut(id)?;
        play.is_favorite = favorite;
        play.touch();
        self.touch();
        Ok(())
    }

    /// Set or clear the coach's customized call string.
    pub fn edit_call(&mut self, id: Uuid, customized: Option<String>) -> Result<()> {
        let play = self.play_mut(id)?;
        play.customized_edit = customized.filter(|s| !s.trim().is_empty());
        play.touch();
        self.touch();
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Play> {
        let idx = self
            .plays
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CallsheetError::PlayNotFound(id.to_string()))?;
        let play = self.plays.remove(idx);
        self.touch();
        Ok(play)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
