use crate::playpool::{Play, PlayPool};
use crate::scouting::ScoutingReport;
use crate::types::PlayCategory;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// RegenSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFill {
    pub category: PlayCategory,
    pub target: usize,
    pub locked_kept: usize,
    pub drawn: usize,
    /// Draws the master pool could not supply. Under-fill is not an error.
    pub unmet: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegenSummary {
    pub fills: Vec<CategoryFill>,
}

impl RegenSummary {
    pub fn total_drawn(&self) -> usize {
        self.fills.iter().map(|f| f.drawn).sum()
    }
}

// ---------------------------------------------------------------------------
// Target clamping
// ---------------------------------------------------------------------------

/// Clamp requested targets to `[min_target, cap]` per category.
pub fn clamp_targets(requested: &BTreeMap<PlayCategory, usize>) -> BTreeMap<PlayCategory, usize> {
    requested
        .iter()
        .map(|(&cat, &n)| (cat, n.clamp(cat.min_target(), cat.cap())))
        .collect()
}

// ---------------------------------------------------------------------------
// Regeneration
// ---------------------------------------------------------------------------

/// Rebuild `pool` in place against the scouting report.
///
/// Per category in `targets`: locked plays are kept unconditionally (even
/// when they already exceed the target); all unlocked plays are discarded
/// and the shortfall is drawn from the master library. The run game draws
/// weighted by front usage; every other category draws uniformly. Categories
/// not named in `targets` are left untouched.
///
/// Destructive to unlocked rows — there is no undo. The pool revision bumps
/// exactly once.
pub fn regenerate<R: Rng>(
    pool: &mut PlayPool,
    master: &PlayPool,
    report: &ScoutingReport,
    targets: &BTreeMap<PlayCategory, usize>,
    rng: &mut R,
) -> RegenSummary {
    let targets = clamp_targets(targets);
    let mut summary = RegenSummary::default();

    for (&category, &target) in &targets {
        let locked: Vec<Play> = pool
            .plays
            .iter()
            .filter(|p| p.category == category && p.is_locked)
            .cloned()
            .collect();

        // Drop the category's unlocked rows regardless; locked rows at or
        // above target mean nothing gets drawn back.
        pool.plays
            .retain(|p| p.category != category || p.is_locked);

        let shortfall = target.saturating_sub(locked.len());
        if shortfall == 0 {
            summary.fills.push(CategoryFill {
                category,
                target,
                locked_kept: locked.len(),
                drawn: 0,
                unmet: 0,
            });
            continue;
        }

        let mut candidates: Vec<&Play> = master.plays_in(category).collect();
        candidates.shuffle(rng);

        let drawn = if category == PlayCategory::RunGame {
            weighted_run_draw(&mut candidates, report, shortfall, rng)
        } else {
            candidates.drain(..shortfall.min(candidates.len())).collect()
        };

        let unmet = shortfall - drawn.len();
        if unmet > 0 {
            tracing::warn!(
                category = %category,
                unmet,
                "master pool exhausted; category under-filled"
            );
        }

        summary.fills.push(CategoryFill {
            category,
            target,
            locked_kept: locked.len(),
            drawn: drawn.len(),
            unmet,
        });

        pool.plays.extend(drawn.iter().map(|p| Play::from_template(p)));
    }

    pool.touch();
    summary
}

/// Run-game draw weighted by front usage: each front claims
/// `ceil(shortfall * usage_pct / 100)` plays whose beater list names it,
/// capped so the combined weighted draw never exceeds the shortfall. Any
/// remainder tops up uniformly from the leftover run candidates.
fn weighted_run_draw<'a, R: Rng>(
    candidates: &mut Vec<&'a Play>,
    report: &ScoutingReport,
    shortfall: usize,
    rng: &mut R,
) -> Vec<&'a Play> {
    let mut drawn: Vec<&Play> = Vec::with_capacity(shortfall);

    for front in &report.fronts {
        if drawn.len() >= shortfall {
            break;
        }
        let quota = ((shortfall as f64) * front.usage_pct / 100.0).ceil() as usize;
        let quota = quota.min(shortfall - drawn.len());

        for _ in 0..quota {
            let Some(idx) = pick_index(candidates, rng, |p| p.beats_front(&front.name)) else {
                break; // no more beaters for this front
            };
            drawn.push(candidates.swap_remove(idx));
        }
    }

    // Top up with unweighted draws from whatever run plays remain.
    while drawn.len() < shortfall && !candidates.is_empty() {
        let idx = rng.gen_range(0..candidates.len());
        drawn.push(candidates.swap_remove(idx));
    }

    drawn
}

/// Index of a uniformly random candidate matching `pred`, if any.
fn pick_index<R: Rng, F: Fn(&Play) -> bool>(
    candidates: &[&Play],
    rng: &mut R,
    pred: F,
) -> Option<usize> {
    let matching: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, p)| pred(p))
        .map(|(i, _)| i)
        .collect();
    matching.choose(rng).copied()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
