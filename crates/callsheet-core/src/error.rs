use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallsheetError {
    #[error("not initialized: run 'callsheet init'")]
    NotInitialized,

    #[error("team not found: {0}")]
    TeamNotFound(String),

    #[error("team already exists: {0}")]
    TeamExists(String),

    #[error("opponent not found: {0}")]
    OpponentNotFound(String),

    #[error("opponent already exists: {0}")]
    OpponentExists(String),

    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    #[error("the template team cannot be modified this way")]
    TemplateTeamProtected,

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("no scouting report for {team} vs {opponent}")]
    NoScoutingReport { team: String, opponent: String },

    #[error("play not found: {0}")]
    PlayNotFound(String),

    #[error("concept '{concept}' is not in the template library for {category}")]
    UnknownConcept { category: String, concept: String },

    #[error("stale revision: pool was at {current}, write was based on {basis}")]
    StaleRevision { current: u64, basis: u64 },

    #[error("journal error: {0}")]
    Journal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CallsheetError>;
