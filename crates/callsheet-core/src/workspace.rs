//! Project initialization: data directories, config, the template team and
//! its starter libraries (terminology + master play pool + help videos).

use crate::config::Config;
use crate::error::Result;
use crate::help::HelpVideo;
use crate::paths;
use crate::playpool::{Play, PlayPool};
use crate::team::Team;
use crate::terminology::{TermEntry, TermSet};
use crate::types::{PlayCategory, TermCategory};
use std::path::Path;

/// Whether `root` already holds an initialized project.
pub fn is_initialized(root: &Path) -> bool {
    paths::config_path(root).exists()
}

/// Initialize a project at `root`. Idempotent on the config file: calling
/// init on an existing project only fills in missing seed data.
pub fn init(root: &Path, project: &str) -> Result<Config> {
    crate::io::ensure_dir(&paths::callsheet_dir(root))?;
    crate::io::ensure_dir(&root.join(paths::TEAMS_DIR))?;

    let config = match Config::load(root) {
        Ok(existing) => existing,
        Err(_) => {
            let config = Config::new(project);
            config.save(root)?;
            config
        }
    };

    if Team::load(root, &config.template_team).is_err() {
        Team::create(root, config.template_team.clone(), "Template Library", None)?;
    }
    seed_template_terminology(root, &config.template_team)?;
    seed_master_pool(root, &config.template_team)?;
    seed_help_videos(root)?;

    tracing::info!(project = %config.project, "callsheet initialized");
    Ok(config)
}

fn seed_template_terminology(root: &Path, template_team: &str) -> Result<()> {
    let existing = TermSet::load(root, template_team)?;
    if !existing.entries.is_empty() {
        return Ok(());
    }

    let seed: &[(TermCategory, &[(&str, &str)])] = &[
        (
            TermCategory::Formations,
            &[
                ("trips", "Trips"),
                ("doubles", "Doubles"),
                ("bunch", "Bunch"),
                ("empty", "Empty"),
                ("i_form", "I"),
            ],
        ),
        (
            TermCategory::FormTags,
            &[("nasty", "Nasty"), ("wing", "Wing"), ("flex", "Flex")],
        ),
        (TermCategory::Shifts, &[("jet", "Jet"), ("trade", "Trade")]),
        (
            TermCategory::ToMotions,
            &[("zip", "Zip"), ("zoom", "Zoom")],
        ),
        (
            TermCategory::FromMotions,
            &[("orbit", "Orbit"), ("return", "Return")],
        ),
        (
            TermCategory::RunGame,
            &[
                ("inside_zone", "Zone"),
                ("outside_zone", "Stretch"),
                ("power", "Power"),
                ("counter", "Counter"),
                ("iso", "Iso"),
                ("trap", "Trap"),
            ],
        ),
        (
            TermCategory::PassProtections,
            &[("half_slide", "50"), ("full_slide", "60"), ("turnback", "70")],
        ),
        (
            TermCategory::QuickGame,
            &[("hitch", "Hitch"), ("slant", "Slant"), ("stick", "Stick")],
        ),
        (
            TermCategory::DropbackGame,
            &[
                ("curl_flat", "Curl"),
                ("four_verts", "Verts"),
                ("mesh", "Mesh"),
                ("shallow_cross", "Drive"),
            ],
        ),
        (
            TermCategory::ScreenGame,
            &[("bubble", "Bubble"), ("tunnel", "Tunnel"), ("slow", "Slow")],
        ),
        (
            TermCategory::ShotPlays,
            &[("post_wheel", "Wheel Shot"), ("double_move", "Sluggo")],
        ),
        (
            TermCategory::ConceptTags,
            &[("alert", "Alert"), ("check", "Check")],
        ),
    ];

    let mut set = TermSet::default();
    for (category, pairs) in seed {
        for (concept, label) in *pairs {
            set.entries.push(TermEntry::new(*category, *concept, *label));
        }
    }
    set.save(root, template_team)
}

fn seed_master_pool(root: &Path, template_team: &str) -> Result<()> {
    let existing = PlayPool::load_master(root, template_team)?;
    if !existing.plays.is_empty() {
        return Ok(());
    }

    // (formation, concept, front beaters, coverage beaters)
    let runs: &[(&str, &str, &str)] = &[
        ("Gun Trips", "Inside Zone", "4-3, Nickel"),
        ("Gun Doubles", "Outside Zone", "3-4, Okie"),
        ("I Rt", "Power", "4-3, Bear"),
        ("Gun Bunch", "Counter", "3-4, 4-3"),
        ("I Lt", "Iso", "Nickel, Dime"),
        ("Gun Empty", "QB Draw", "Dime"),
    ];
    let passes: &[(PlayCategory, &str, &str, &str)] = &[
        (PlayCategory::QuickGame, "Gun Trips", "Stick", "Cover 3, Cover 1"),
        (PlayCategory::QuickGame, "Gun Doubles", "Slant", "Cover 2"),
        (PlayCategory::QuickGame, "Gun Bunch", "Hitch", "Cover 3"),
        (PlayCategory::DropbackGame, "Gun Trips", "Mesh", "Cover 1, Man"),
        (PlayCategory::DropbackGame, "Gun Doubles", "Four Verts", "Cover 3"),
        (PlayCategory::DropbackGame, "Gun Empty", "Curl Flat", "Cover 2"),
        (PlayCategory::ShotPlays, "Gun Trips", "Post Wheel", "Cover 1"),
        (PlayCategory::ShotPlays, "I Rt", "PA Cross Shot", "Cover 3"),
        (PlayCategory::ScreenGame, "Gun Doubles", "Bubble", "Cover 3, Cover 4"),
        (PlayCategory::ScreenGame, "Gun Trips", "Tunnel", "Cover 2"),
        (PlayCategory::RpoGame, "Gun Trips", "Zone Bubble", "Cover 3"),
        (PlayCategory::RpoGame, "Gun Doubles", "Zone Slant", "Cover 1"),
        (PlayCategory::RpoGame, "Gun Bunch", "Power Pop", "Cover 2"),
        (PlayCategory::RpoGame, "Gun Empty", "Draw Stick", "Cover 3"),
        (PlayCategory::RpoGame, "Gun Trips", "Stretch Now", "Cover 4"),
    ];

    let mut master = PlayPool::default();
    for (formation, concept, fronts) in runs {
        master.plays.push(Play {
            formation: Some(formation.to_string()),
            run_concept: Some(concept.to_string()),
            front_beaters: fronts.to_string(),
            ..Play::new(PlayCategory::RunGame)
        });
    }
    for (category, formation, concept, coverages) in passes {
        master.plays.push(Play {
            formation: Some(formation.to_string()),
            concept: Some(concept.to_string()),
            coverage_beaters: coverages.to_string(),
            ..Play::new(*category)
        });
    }
    master.save_master(root, template_team)
}

fn seed_help_videos(root: &Path) -> Result<()> {
    if !crate::help::list(root)?.is_empty() {
        return Ok(());
    }
    crate::help::save_all(
        root,
        vec![
            HelpVideo {
                id: "getting-started".to_string(),
                title: "Setting up your team".to_string(),
                url: "https://videos.callsheet.dev/getting-started".to_string(),
                category: "setup".to_string(),
            },
            HelpVideo {
                id: "scouting-basics".to_string(),
                title: "Entering a scouting report".to_string(),
                url: "https://videos.callsheet.dev/scouting-basics".to_string(),
                category: "scouting".to_string(),
            },
            HelpVideo {
                id: "pool-regeneration".to_string(),
                title: "Locking plays and rebuilding your pool".to_string(),
                url: "https://videos.callsheet.dev/pool-regeneration".to_string(),
                category: "playpool".to_string(),
            },
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_config_template_and_seeds() {
        let dir = TempDir::new().unwrap();
        let config = init(dir.path(), "varsity").unwrap();
        assert!(is_initialized(dir.path()));
        assert_eq!(config.project, "varsity");

        Team::load(dir.path(), "default").unwrap();
        let terms = TermSet::load(dir.path(), "default").unwrap();
        assert!(!terms.entries.is_empty());

        let master = PlayPool::load_master(dir.path(), "default").unwrap();
        for cat in PlayCategory::all() {
            assert!(
                master.plays_in(*cat).count() > 0,
                "no seed plays for {cat}"
            );
        }
        assert!(!crate::help::list(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), "varsity").unwrap();
        let master_before = PlayPool::load_master(dir.path(), "default").unwrap();

        let config = init(dir.path(), "renamed").unwrap();
        // Existing config wins; seeds are not duplicated.
        assert_eq!(config.project, "varsity");
        let master_after = PlayPool::load_master(dir.path(), "default").unwrap();
        assert_eq!(master_before.plays.len(), master_after.plays.len());
    }
}
