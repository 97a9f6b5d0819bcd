//! Operation journal for multi-step writes.
//!
//! Terminology save/restore and the team-delete cascade touch several files
//! with no cross-file atomicity. Each such operation is recorded here as an
//! ordered step list; steps are marked done as they complete, so a failure
//! leaves an inspectable record of exactly how far the operation got. There
//! is no automatic rollback — `unfinished()` surfaces stuck operations for
//! an operator or a later reconciliation pass.
//!
//! # Table design
//!
//! A single `OPERATIONS` table uses a 24-byte composite key:
//! ```text
//! [ timestamp_ms: u64 big-endian (8 bytes) | uuid: 16 bytes ]
//! ```
//! Byte ordering equals creation-time ordering, so listing is a plain scan.

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{Database, ReadableTable, TableDefinition};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CallsheetError, Result};

// ---------------------------------------------------------------------------
// Table definition
// ---------------------------------------------------------------------------

/// Key: 24-byte composite (timestamp_ms big-endian ++ uuid bytes)
/// Value: JSON-encoded Operation
const OPERATIONS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("operations");

fn op_key(ts: DateTime<Utc>, id: Uuid) -> [u8; 24] {
    let mut key = [0u8; 24];
    let ms = ts.timestamp_millis().max(0) as u64;
    key[..8].copy_from_slice(&ms.to_be_bytes());
    key[8..].copy_from_slice(id.as_bytes());
    key
}

// ---------------------------------------------------------------------------
// Operation model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    TerminologySave,
    TerminologyRestore,
    TeamDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OpStatus {
    Running,
    Finished,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub id: Uuid,
    pub kind: OpKind,
    pub team: String,
    pub detail: String,
    pub steps: Vec<Step>,
    pub status: OpStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Operation {
    pub fn is_finished(&self) -> bool {
        self.status == OpStatus::Finished
    }

    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.status == StepStatus::Done)
            .count()
    }
}

// ---------------------------------------------------------------------------
// OpJournal
// ---------------------------------------------------------------------------

pub struct OpJournal {
    db: Database,
}

impl OpJournal {
    /// Open or create the journal database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path).map_err(|e| CallsheetError::Journal(e.to_string()))?;
        // Ensure the table exists before any reads
        let wt = db
            .begin_write()
            .map_err(|e| CallsheetError::Journal(e.to_string()))?;
        wt.open_table(OPERATIONS)
            .map_err(|e| CallsheetError::Journal(e.to_string()))?;
        wt.commit()
            .map_err(|e| CallsheetError::Journal(e.to_string()))?;
        Ok(Self { db })
    }

    /// Record the start of a multi-step operation with all steps pending.
    pub fn begin(
        &self,
        kind: OpKind,
        team: &str,
        detail: impl Into<String>,
        step_names: &[&str],
    ) -> Result<Operation> {
        let now = Utc::now();
        let op = Operation {
            id: Uuid::new_v4(),
            kind,
            team: team.to_string(),
            detail: detail.into(),
            steps: step_names
                .iter()
                .map(|&name| Step {
                    name: name.to_string(),
                    status: StepStatus::Pending,
                    completed_at: None,
                })
                .collect(),
            status: OpStatus::Running,
            created_at: now,
            updated_at: now,
        };
        self.put(&op)?;
        Ok(op)
    }

    /// Mark a named step done and persist the updated record.
    pub fn complete_step(&self, op: &mut Operation, name: &str) -> Result<()> {
        let now = Utc::now();
        let step = op
            .steps
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| CallsheetError::Journal(format!("unknown step: {name}")))?;
        step.status = StepStatus::Done;
        step.completed_at = Some(now);
        op.updated_at = now;
        self.put(op)
    }

    pub fn finish(&self, op: &mut Operation) -> Result<()> {
        op.status = OpStatus::Finished;
        op.updated_at = Utc::now();
        self.put(op)
    }

    pub fn fail(&self, op: &mut Operation, reason: impl Into<String>) -> Result<()> {
        op.status = OpStatus::Failed {
            reason: reason.into(),
        };
        op.updated_at = Utc::now();
        self.put(op)
    }

    /// Newest-first listing, truncated to `limit`.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<Operation>> {
        let mut ops = self.list_all()?;
        ops.truncate(limit);
        Ok(ops)
    }

    /// Operations still `Running` or `Failed` — candidates for operator
    /// attention after a crash or a partial write.
    pub fn unfinished(&self) -> Result<Vec<Operation>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|op| !op.is_finished())
            .collect())
    }

    fn put(&self, op: &Operation) -> Result<()> {
        let key = op_key(op.created_at, op.id);
        let value = serde_json::to_vec(op).map_err(|e| CallsheetError::Journal(e.to_string()))?;
        let wt = self
            .db
            .begin_write()
            .map_err(|e| CallsheetError::Journal(e.to_string()))?;
        {
            let mut table = wt
                .open_table(OPERATIONS)
                .map_err(|e| CallsheetError::Journal(e.to_string()))?;
            table
                .insert(key.as_slice(), value.as_slice())
                .map_err(|e| CallsheetError::Journal(e.to_string()))?;
        }
        wt.commit()
            .map_err(|e| CallsheetError::Journal(e.to_string()))?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Operation>> {
        let rt = self
            .db
            .begin_read()
            .map_err(|e| CallsheetError::Journal(e.to_string()))?;
        let table = rt
            .open_table(OPERATIONS)
            .map_err(|e| CallsheetError::Journal(e.to_string()))?;

        let mut ops = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| CallsheetError::Journal(e.to_string()))?
        {
            let (_, v) = entry.map_err(|e| CallsheetError::Journal(e.to_string()))?;
            let op: Operation = serde_json::from_slice(v.value())
                .map_err(|e| CallsheetError::Journal(e.to_string()))?;
            ops.push(op);
        }
        ops.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(ops)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_tmp() -> (TempDir, OpJournal) {
        let dir = TempDir::new().unwrap();
        let journal = OpJournal::open(&dir.path().join("journal.redb")).unwrap();
        (dir, journal)
    }

    #[test]
    fn begin_records_pending_steps() {
        let (_dir, j) = open_tmp();
        let op = j
            .begin(
                OpKind::TerminologySave,
                "eagles",
                "save run_game terms",
                &["fetch_template", "replace_category", "persist"],
            )
            .unwrap();
        assert_eq!(op.steps.len(), 3);
        assert_eq!(op.completed_steps(), 0);
        assert_eq!(op.status, OpStatus::Running);
    }

    #[test]
    fn complete_and_finish_roundtrip() {
        let (_dir, j) = open_tmp();
        let mut op = j
            .begin(OpKind::TeamDelete, "eagles", "delete", &["a", "b"])
            .unwrap();
        j.complete_step(&mut op, "a").unwrap();
        j.complete_step(&mut op, "b").unwrap();
        j.finish(&mut op).unwrap();

        let listed = j.list_recent(10).unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_finished());
        assert_eq!(listed[0].completed_steps(), 2);
    }

    #[test]
    fn complete_unknown_step_fails() {
        let (_dir, j) = open_tmp();
        let mut op = j
            .begin(OpKind::TeamDelete, "eagles", "delete", &["a"])
            .unwrap();
        assert!(j.complete_step(&mut op, "nope").is_err());
    }

    #[test]
    fn unfinished_surfaces_failed_and_running() {
        let (_dir, j) = open_tmp();
        let mut failed = j
            .begin(OpKind::TerminologySave, "eagles", "save", &["a", "b"])
            .unwrap();
        j.complete_step(&mut failed, "a").unwrap();
        j.fail(&mut failed, "disk full").unwrap();

        let _running = j
            .begin(OpKind::TerminologyRestore, "eagles", "restore", &["x"])
            .unwrap();

        let mut done = j
            .begin(OpKind::TeamDelete, "hawks", "delete", &["y"])
            .unwrap();
        j.complete_step(&mut done, "y").unwrap();
        j.finish(&mut done).unwrap();

        let stuck = j.unfinished().unwrap();
        assert_eq!(stuck.len(), 2);
        let reasons: Vec<_> = stuck
            .iter()
            .filter_map(|op| match &op.status {
                OpStatus::Failed { reason } => Some(reason.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(reasons, vec!["disk full"]);
        // The failed op still shows which step had completed.
        let failed_op = stuck
            .iter()
            .find(|op| matches!(op.status, OpStatus::Failed { .. }))
            .unwrap();
        assert_eq!(failed_op.completed_steps(), 1);
    }

    #[test]
    fn list_recent_is_newest_first_and_truncated() {
        let (_dir, j) = open_tmp();
        for i in 0..5 {
            j.begin(OpKind::TeamDelete, "t", format!("op {i}"), &["s"])
                .unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        let recent = j.list_recent(3).unwrap();
        assert_eq!(recent.len(), 3);
        assert!(recent[0].created_at >= recent[1].created_at);
        assert_eq!(recent[0].detail, "op 4");
    }

    #[test]
    fn empty_journal_lists_nothing() {
        let (_dir, j) = open_tmp();
        assert!(j.list_recent(10).unwrap().is_empty());
        assert!(j.unfinished().unwrap().is_empty());
    }
}
