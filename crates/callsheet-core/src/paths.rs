use crate::error::{CallsheetError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CALLSHEET_DIR: &str = ".callsheet";
pub const TEAMS_DIR: &str = ".callsheet/teams";

pub const CONFIG_FILE: &str = ".callsheet/config.yaml";
pub const SESSION_FILE: &str = ".callsheet/session.yaml";
pub const JOURNAL_FILE: &str = ".callsheet/journal.redb";
pub const HELP_VIDEOS_FILE: &str = ".callsheet/help-videos.yaml";

pub const MANIFEST_FILE: &str = "manifest.yaml";
pub const TERMINOLOGY_FILE: &str = "terminology.yaml";
pub const MASTER_POOL_FILE: &str = "master-pool.yaml";
pub const SCOUTING_FILE: &str = "scouting.yaml";
pub const PLAYPOOL_FILE: &str = "playpool.yaml";
pub const GAMEPLAN_FILE: &str = "gameplan.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn callsheet_dir(root: &Path) -> PathBuf {
    root.join(CALLSHEET_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn session_path(root: &Path) -> PathBuf {
    root.join(SESSION_FILE)
}

pub fn journal_path(root: &Path) -> PathBuf {
    root.join(JOURNAL_FILE)
}

pub fn help_videos_path(root: &Path) -> PathBuf {
    root.join(HELP_VIDEOS_FILE)
}

pub fn team_dir(root: &Path, team: &str) -> PathBuf {
    root.join(TEAMS_DIR).join(team)
}

pub fn team_manifest(root: &Path, team: &str) -> PathBuf {
    team_dir(root, team).join(MANIFEST_FILE)
}

pub fn terminology_path(root: &Path, team: &str) -> PathBuf {
    team_dir(root, team).join(TERMINOLOGY_FILE)
}

/// The template team's master play library that regeneration draws from.
pub fn master_pool_path(root: &Path, template_team: &str) -> PathBuf {
    team_dir(root, template_team).join(MASTER_POOL_FILE)
}

pub fn opponents_dir(root: &Path, team: &str) -> PathBuf {
    team_dir(root, team).join("opponents")
}

pub fn opponent_dir(root: &Path, team: &str, opponent: &str) -> PathBuf {
    opponents_dir(root, team).join(opponent)
}

pub fn opponent_manifest(root: &Path, team: &str, opponent: &str) -> PathBuf {
    opponent_dir(root, team, opponent).join(MANIFEST_FILE)
}

pub fn scouting_path(root: &Path, team: &str, opponent: &str) -> PathBuf {
    opponent_dir(root, team, opponent).join(SCOUTING_FILE)
}

pub fn playpool_path(root: &Path, team: &str, opponent: &str) -> PathBuf {
    opponent_dir(root, team, opponent).join(PLAYPOOL_FILE)
}

pub fn gameplan_path(root: &Path, team: &str, opponent: &str) -> PathBuf {
    opponent_dir(root, team, opponent).join(GAMEPLAN_FILE)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(CallsheetError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        for slug in ["central-high", "a", "week-3-rival", "x1"] {
            validate_slug(slug).unwrap_or_else(|_| panic!("expected valid: {slug}"));
        }
    }

    #[test]
    fn invalid_slugs() {
        for slug in [
            "",
            "-starts-with-dash",
            "ends-with-dash-",
            "has spaces",
            "UPPER",
            "a_b",
        ] {
            assert!(validate_slug(slug).is_err(), "expected invalid: {slug}");
        }
    }

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.callsheet/config.yaml")
        );
        assert_eq!(
            team_manifest(root, "eagles"),
            PathBuf::from("/tmp/proj/.callsheet/teams/eagles/manifest.yaml")
        );
        assert_eq!(
            scouting_path(root, "eagles", "central"),
            PathBuf::from("/tmp/proj/.callsheet/teams/eagles/opponents/central/scouting.yaml")
        );
        assert_eq!(
            master_pool_path(root, "default"),
            PathBuf::from("/tmp/proj/.callsheet/teams/default/master-pool.yaml")
        );
    }
}
