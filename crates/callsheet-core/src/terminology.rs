use crate::error::{CallsheetError, Result};
use crate::journal::{OpJournal, OpKind};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// TermEntry / TermSet
// ---------------------------------------------------------------------------

use crate::types::TermCategory;

/// One vocabulary row: a shared concept key with the team's display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TermEntry {
    pub category: TermCategory,
    pub concept: String,
    pub label: String,
    /// True when `label` differs from the template label.
    #[serde(default)]
    pub customized: bool,
}

impl TermEntry {
    pub fn new(
        category: TermCategory,
        concept: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            category,
            concept: concept.into(),
            label: label.into(),
            customized: false,
        }
    }
}

/// A team's full terminology manifest. The template team's set is the
/// library every other team copies from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TermSet {
    #[serde(default)]
    pub revision: u64,
    #[serde(default)]
    pub entries: Vec<TermEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TermSet {
    /// Load a team's terminology; a missing file is an empty set.
    pub fn load(root: &Path, team: &str) -> Result<Self> {
        let path = paths::terminology_path(root, team);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let set: TermSet = serde_yaml::from_str(&data)?;
        Ok(set)
    }

    pub fn save(&self, root: &Path, team: &str) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::terminology_path(root, team), data.as_bytes())
    }

    pub fn entries_for(&self, category: TermCategory) -> Vec<&TermEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn concepts_for(&self, category: TermCategory) -> Vec<&str> {
        self.entries_for(category)
            .into_iter()
            .map(|e| e.concept.as_str())
            .collect()
    }

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

    fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Some(Utc::now());
    }
}

// ---------------------------------------------------------------------------
// Save (overlay-and-replace)
// ---------------------------------------------------------------------------

/// Replace a team's terminology for one category with the selected subset of
/// the template library, overlaying any label overrides the coach made.
///
/// Full replace, not a diff: after this returns, the team's concept set for
/// `category` equals exactly `selected`. Concurrent saves race unless a
/// basis revision is supplied. Journaled step by step; a mid-way failure
/// leaves the journal record showing how far the save got.
pub fn save_category(
    root: &Path,
    template_team: &str,
    team: &str,
    category: TermCategory,
    selected: &[String],
    overrides: &HashMap<String, String>,
    basis: Option<u64>,
    journal: &OpJournal,
) -> Result<TermSet> {
    if team == template_team {
        return Err(CallsheetError::TemplateTeamProtected);
    }
    crate::team::Team::load(root, team)?;

    // Reject a stale basis before the operation is journaled; an expected
    // conflict is not a partial write.
    let mut set = TermSet::load(root, team)?;
    set.check_revision(basis)?;

    let mut op = journal.begin(
        OpKind::TerminologySave,
        team,
        format!("save {category} ({} concepts)", selected.len()),
        &["fetch_template", "replace_category", "persist"],
    )?;

    // Fetch the template rows for every selected concept; an unknown
    // concept aborts before the team's rows are touched.
    let template = TermSet::load(root, template_team)?;
    let mut merged: Vec<TermEntry> = Vec::with_capacity(selected.len());
    for concept in selected {
        let Some(base) = template
            .entries
            .iter()
            .find(|e| e.category == category && &e.concept == concept)
        else {
            journal.fail(&mut op, format!("unknown concept '{concept}'"))?;
            return Err(CallsheetError::UnknownConcept {
                category: category.to_string(),
                concept: concept.clone(),
            });
        };
        let mut entry = base.clone();
        if let Some(label) = overrides.get(concept) {
            if label != &entry.label {
                entry.label = label.clone();
                entry.customized = true;
            }
        }
        merged.push(entry);
    }
    journal.complete_step(&mut op, "fetch_template")?;

    set.entries.retain(|e| e.category != category);
    set.entries.extend(merged);
    set.touch();
    journal.complete_step(&mut op, "replace_category")?;

    set.save(root, team)?;
    journal.complete_step(&mut op, "persist")?;
    journal.finish(&mut op)?;

    tracing::info!(team = %team, category = %category, "terminology saved");
    Ok(set)
}

// ---------------------------------------------------------------------------
// Restore
// ---------------------------------------------------------------------------

/// Delete all of a team's terminology across every category. Subsequent
/// reads fall back to the template set (see [`resolved_for`]).
pub fn restore(root: &Path, template_team: &str, team: &str, journal: &OpJournal) -> Result<()> {
    if team == template_team {
        return Err(CallsheetError::TemplateTeamProtected);
    }
    crate::team::Team::load(root, team)?;

    let mut op = journal.begin(
        OpKind::TerminologyRestore,
        team,
        "restore to template defaults",
        &["delete_terminology"],
    )?;

    crate::io::remove_if_present(&paths::terminology_path(root, team))?;
    journal.complete_step(&mut op, "delete_terminology")?;
    journal.finish(&mut op)?;

    tracing::info!(team = %team, "terminology restored to template defaults");
    Ok(())
}

// ---------------------------------------------------------------------------
// Read-layer fallback
// ---------------------------------------------------------------------------

/// A team's effective vocabulary for a category: its own entries when any
/// exist, else the template team's.
pub fn resolved_for(
    root: &Path,
    template_team: &str,
    team: &str,
    category: TermCategory,
) -> Result<Vec<TermEntry>> {
    let own = TermSet::load(root, team)?;
    let entries: Vec<TermEntry> = own
        .entries_for(category)
        .into_iter()
        .cloned()
        .collect();
    if !entries.is_empty() {
        return Ok(entries);
    }
    let template = TermSet::load(root, template_team)?;
    Ok(template
        .entries_for(category)
        .into_iter()
        .cloned()
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::team::Team;
    use tempfile::TempDir;

    const TEMPLATE: &str = "default";

    fn setup() -> (TempDir, OpJournal) {
        let dir = TempDir::new().unwrap();
        let journal = OpJournal::open(&dir.path().join("journal.redb")).unwrap();
        Team::create(dir.path(), TEMPLATE, "Template", None).unwrap();
        Team::create(dir.path(), "eagles", "Eagles", None).unwrap();

        let mut template = TermSet::default();
        template.entries.extend([
            TermEntry::new(TermCategory::RunGame, "inside_zone", "Zone"),
            TermEntry::new(TermCategory::RunGame, "power", "Power"),
            TermEntry::new(TermCategory::RunGame, "counter", "Counter"),
            TermEntry::new(TermCategory::Formations, "trips", "Trips"),
        ]);
        template.save(dir.path(), TEMPLATE).unwrap();
        (dir, journal)
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn save_is_exact_overlay_and_replace() {
        let (dir, j) = setup();
        let overrides = HashMap::from([("power".to_string(), "Dagger".to_string())]);

        let set = save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["inside_zone", "power"]),
            &overrides,
            None,
            &j,
        )
        .unwrap();

        // Exactly the selected concepts, no extras, no omissions.
        let mut concepts = set.concepts_for(TermCategory::RunGame);
        concepts.sort_unstable();
        assert_eq!(concepts, vec!["inside_zone", "power"]);

        let power = set
            .entries
            .iter()
            .find(|e| e.concept == "power")
            .unwrap();
        assert_eq!(power.label, "Dagger");
        assert!(power.customized);

        let zone = set
            .entries
            .iter()
            .find(|e| e.concept == "inside_zone")
            .unwrap();
        assert_eq!(zone.label, "Zone");
        assert!(!zone.customized);
    }

    #[test]
    fn save_replaces_prior_selection() {
        let (dir, j) = setup();
        save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["inside_zone", "power", "counter"]),
            &HashMap::new(),
            None,
            &j,
        )
        .unwrap();

        let set = save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["counter"]),
            &HashMap::new(),
            None,
            &j,
        )
        .unwrap();
        assert_eq!(set.concepts_for(TermCategory::RunGame), vec!["counter"]);
    }

    #[test]
    fn save_leaves_other_categories_alone() {
        let (dir, j) = setup();
        save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::Formations,
            &strings(&["trips"]),
            &HashMap::new(),
            None,
            &j,
        )
        .unwrap();
        let set = save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["power"]),
            &HashMap::new(),
            None,
            &j,
        )
        .unwrap();
        assert_eq!(set.concepts_for(TermCategory::Formations), vec!["trips"]);
    }

    #[test]
    fn save_rejects_unknown_concept_and_journals_the_failure() {
        let (dir, j) = setup();
        let err = save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["wishbone_option"]),
            &HashMap::new(),
            None,
            &j,
        )
        .unwrap_err();
        assert!(matches!(err, CallsheetError::UnknownConcept { .. }));

        // Team's set untouched, journal records the failed op.
        assert!(TermSet::load(dir.path(), "eagles").unwrap().entries.is_empty());
        let stuck = j.unfinished().unwrap();
        assert_eq!(stuck.len(), 1);
        assert_eq!(stuck[0].completed_steps(), 0);
    }

    #[test]
    fn save_with_stale_revision_conflicts() {
        let (dir, j) = setup();
        let set = save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["power"]),
            &HashMap::new(),
            None,
            &j,
        )
        .unwrap();

        // A second writer based on the pre-save revision loses.
        let err = save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["counter"]),
            &HashMap::new(),
            Some(set.revision - 1),
            &j,
        )
        .unwrap_err();
        assert!(matches!(err, CallsheetError::StaleRevision { .. }));

        // Basing on the current revision succeeds.
        save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["counter"]),
            &HashMap::new(),
            Some(set.revision),
            &j,
        )
        .unwrap();
    }

    #[test]
    fn stale_revision_rejection_leaves_no_unfinished_operation() {
        let (dir, j) = setup();
        let set = save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["power"]),
            &HashMap::new(),
            None,
            &j,
        )
        .unwrap();

        save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["counter"]),
            &HashMap::new(),
            Some(set.revision - 1),
            &j,
        )
        .unwrap_err();

        // The conflict never began an operation, so nothing is left running.
        assert!(j.unfinished().unwrap().is_empty());
    }

    #[test]
    fn save_into_template_team_is_protected() {
        let (dir, j) = setup();
        assert!(matches!(
            save_category(
                dir.path(),
                TEMPLATE,
                TEMPLATE,
                TermCategory::RunGame,
                &strings(&["power"]),
                &HashMap::new(),
                None,
                &j,
            ),
            Err(CallsheetError::TemplateTeamProtected)
        ));
    }

    #[test]
    fn restore_deletes_all_rows_and_reads_fall_back() {
        let (dir, j) = setup();
        save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["power"]),
            &HashMap::new(),
            None,
            &j,
        )
        .unwrap();

        restore(dir.path(), TEMPLATE, "eagles", &j).unwrap();

        // The team's own set is empty...
        let own = TermSet::load(dir.path(), "eagles").unwrap();
        assert!(own.entries.is_empty());

        // ...and resolution falls back to the full template library.
        let resolved =
            resolved_for(dir.path(), TEMPLATE, "eagles", TermCategory::RunGame).unwrap();
        assert_eq!(resolved.len(), 3);
    }

    #[test]
    fn restore_of_template_team_is_protected() {
        let (dir, j) = setup();
        assert!(matches!(
            restore(dir.path(), TEMPLATE, TEMPLATE, &j),
            Err(CallsheetError::TemplateTeamProtected)
        ));
    }

    #[test]
    fn resolved_prefers_own_entries() {
        let (dir, j) = setup();
        save_category(
            dir.path(),
            TEMPLATE,
            "eagles",
            TermCategory::RunGame,
            &strings(&["power"]),
            &HashMap::from([("power".to_string(), "Hammer".to_string())]),
            None,
            &j,
        )
        .unwrap();

        let resolved =
            resolved_for(dir.path(), TEMPLATE, "eagles", TermCategory::RunGame).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].label, "Hammer");
    }
}
