pub mod config;
pub mod gameplan;
pub mod init;
pub mod journal;
pub mod opponent;
pub mod pool;
pub mod scouting;
pub mod session;
pub mod team;
pub mod terminology;
pub mod ui;
pub mod videos;

use anyhow::{anyhow, Result};
use callsheet_core::session::SessionContext;
use std::path::Path;

/// The team to operate on: an explicit `--team` flag wins, else the session
/// selection.
pub fn resolve_team(root: &Path, explicit: Option<&str>) -> Result<String> {
    if let Some(team) = explicit {
        return Ok(team.to_string());
    }
    let session = SessionContext::load(root)?;
    session
        .team
        .ok_or_else(|| anyhow!("no team selected; pass --team or run `callsheet session set`"))
}

/// The (team, opponent) pair to operate on, from flags or the session.
pub fn resolve_matchup(
    root: &Path,
    team: Option<&str>,
    opponent: Option<&str>,
) -> Result<(String, String)> {
    let team = resolve_team(root, team)?;
    if let Some(opponent) = opponent {
        return Ok((team, opponent.to_string()));
    }
    let session = SessionContext::load(root)?;
    let opponent = session.opponent.ok_or_else(|| {
        anyhow!("no opponent selected; pass --opponent or run `callsheet session set`")
    })?;
    Ok((team, opponent))
}
