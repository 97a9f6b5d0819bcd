use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A tutorial video shown in the help section. Read-only registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HelpVideo {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct HelpRegistry {
    #[serde(default)]
    videos: Vec<HelpVideo>,
}

/// All registered help videos; a missing registry file is an empty list.
pub fn list(root: &Path) -> Result<Vec<HelpVideo>> {
    let path = paths::help_videos_path(root);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = std::fs::read_to_string(&path)?;
    let registry: HelpRegistry = serde_yaml::from_str(&data)?;
    Ok(registry.videos)
}

pub fn save_all(root: &Path, videos: Vec<HelpVideo>) -> Result<()> {
    let registry = HelpRegistry { videos };
    let data = serde_yaml::to_string(&registry)?;
    crate::io::atomic_write(&paths::help_videos_path(root), data.as_bytes())
}
