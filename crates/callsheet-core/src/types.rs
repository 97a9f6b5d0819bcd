use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PlayCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayCategory {
    RunGame,
    RpoGame,
    QuickGame,
    DropbackGame,
    ShotPlays,
    ScreenGame,
}

impl PlayCategory {
    pub fn all() -> &'static [PlayCategory] {
        &[
            PlayCategory::RunGame,
            PlayCategory::RpoGame,
            PlayCategory::QuickGame,
            PlayCategory::DropbackGame,
            PlayCategory::ShotPlays,
            PlayCategory::ScreenGame,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlayCategory::RunGame => "run_game",
            PlayCategory::RpoGame => "rpo_game",
            PlayCategory::QuickGame => "quick_game",
            PlayCategory::DropbackGame => "dropback_game",
            PlayCategory::ShotPlays => "shot_plays",
            PlayCategory::ScreenGame => "screen_game",
        }
    }

    /// Hard ceiling on active plays per category.
    pub fn cap(self) -> usize {
        20
    }

    /// Floor applied to configured targets. Only the RPO game carries one.
    pub fn min_target(self) -> usize {
        match self {
            PlayCategory::RpoGame => 5,
            _ => 0,
        }
    }

    /// Target pool size used when no per-category target is configured.
    pub fn default_target(self) -> usize {
        match self {
            PlayCategory::RunGame => 15,
            PlayCategory::RpoGame => 8,
            PlayCategory::QuickGame => 12,
            PlayCategory::DropbackGame => 12,
            PlayCategory::ShotPlays => 6,
            PlayCategory::ScreenGame => 8,
        }
    }
}

impl fmt::Display for PlayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlayCategory {
    type Err = crate::error::CallsheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "run_game" => Ok(PlayCategory::RunGame),
            "rpo_game" => Ok(PlayCategory::RpoGame),
            "quick_game" => Ok(PlayCategory::QuickGame),
            "dropback_game" => Ok(PlayCategory::DropbackGame),
            "shot_plays" => Ok(PlayCategory::ShotPlays),
            "screen_game" => Ok(PlayCategory::ScreenGame),
            _ => Err(crate::error::CallsheetError::InvalidCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TermCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermCategory {
    Formations,
    FormTags,
    Shifts,
    ToMotions,
    FromMotions,
    RunGame,
    PassProtections,
    QuickGame,
    DropbackGame,
    ScreenGame,
    ShotPlays,
    ConceptTags,
}

impl TermCategory {
    pub fn all() -> &'static [TermCategory] {
        &[
            TermCategory::Formations,
            TermCategory::FormTags,
            TermCategory::Shifts,
            TermCategory::ToMotions,
            TermCategory::FromMotions,
            TermCategory::RunGame,
            TermCategory::PassProtections,
            TermCategory::QuickGame,
            TermCategory::DropbackGame,
            TermCategory::ScreenGame,
            TermCategory::ShotPlays,
            TermCategory::ConceptTags,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TermCategory::Formations => "formations",
            TermCategory::FormTags => "form_tags",
            TermCategory::Shifts => "shifts",
            TermCategory::ToMotions => "to_motions",
            TermCategory::FromMotions => "from_motions",
            TermCategory::RunGame => "run_game",
            TermCategory::PassProtections => "pass_protections",
            TermCategory::QuickGame => "quick_game",
            TermCategory::DropbackGame => "dropback_game",
            TermCategory::ScreenGame => "screen_game",
            TermCategory::ShotPlays => "shot_plays",
            TermCategory::ConceptTags => "concept_tags",
        }
    }
}

impl fmt::Display for TermCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TermCategory {
    type Err = crate::error::CallsheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| crate::error::CallsheetError::InvalidCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
