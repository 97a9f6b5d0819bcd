use crate::error::{CallsheetError, Result};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// DefensiveLook
// ---------------------------------------------------------------------------

/// A named front, coverage or blitz with its observed usage rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DefensiveLook {
    pub name: String,
    /// Usage share in percent (0-100). Sums are not enforced.
    #[serde(default)]
    pub usage_pct: f64,
}

impl DefensiveLook {
    pub fn new(name: impl Into<String>, usage_pct: f64) -> Self {
        Self {
            name: name.into(),
            usage_pct,
        }
    }
}

// ---------------------------------------------------------------------------
// ScoutingReport
// ---------------------------------------------------------------------------

/// One report per (team, opponent). Read-only input to the play selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoutingReport {
    #[serde(default)]
    pub fronts: Vec<DefensiveLook>,
    #[serde(default)]
    pub coverages: Vec<DefensiveLook>,
    #[serde(default)]
    pub blitzes: Vec<DefensiveLook>,
    /// Overall blitz rate in percent.
    #[serde(default)]
    pub blitz_pct: f64,
    /// How often the defense adjusts to motion, in percent.
    #[serde(default)]
    pub motion_pct: f64,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScoutingReport {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            fronts: Vec::new(),
            coverages: Vec::new(),
            blitzes: Vec::new(),
            blitz_pct: 0.0,
            motion_pct: 0.0,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Load the report, failing with `NoScoutingReport` when absent.
    /// Absence is a valid state; callers that can render an empty state
    /// should use [`ScoutingReport::try_load`] instead.
    pub fn load(root: &Path, team: &str, opponent: &str) -> Result<Self> {
        Self::try_load(root, team, opponent)?.ok_or_else(|| CallsheetError::NoScoutingReport {
            team: team.to_string(),
            opponent: opponent.to_string(),
        })
    }

    pub fn try_load(root: &Path, team: &str, opponent: &str) -> Result<Option<Self>> {
        let path = paths::scouting_path(root, team, opponent);
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&path)?;
        let report: ScoutingReport = serde_yaml::from_str(&data)?;
        Ok(Some(report))
    }

    pub fn save(&self, root: &Path, team: &str, opponent: &str) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::scouting_path(root, team, opponent), data.as_bytes())
    }

    pub fn front_pct(&self, name: &str) -> f64 {
        self.fronts
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.usage_pct)
            .unwrap_or(0.0)
    }
}

impl Default for ScoutingReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_report_is_a_typed_error() {
        let dir = TempDir::new().unwrap();
        let err = ScoutingReport::load(dir.path(), "eagles", "central").unwrap_err();
        assert!(matches!(err, CallsheetError::NoScoutingReport { .. }));
        assert!(ScoutingReport::try_load(dir.path(), "eagles", "central")
            .unwrap()
            .is_none());
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut report = ScoutingReport::new();
        report.fronts.push(DefensiveLook::new("3-4", 40.0));
        report.fronts.push(DefensiveLook::new("4-3", 60.0));
        report.coverages.push(DefensiveLook::new("Cover 3", 55.0));
        report.blitz_pct = 28.0;
        report.notes = "Heavy pressure on 3rd and long".to_string();
        report.save(dir.path(), "eagles", "central").unwrap();

        let loaded = ScoutingReport::load(dir.path(), "eagles", "central").unwrap();
        assert_eq!(loaded.fronts.len(), 2);
        assert_eq!(loaded.front_pct("4-3"), 60.0);
        assert_eq!(loaded.blitz_pct, 28.0);
    }

    #[test]
    fn front_pct_is_case_insensitive_and_total() {
        let mut report = ScoutingReport::new();
        report.fronts.push(DefensiveLook::new("Bear", 15.0));
        assert_eq!(report.front_pct("bear"), 15.0);
        assert_eq!(report.front_pct("okie"), 0.0);
    }
}
