use crate::output::{print_json, print_table};
use callsheet_core::journal::{OpJournal, Operation};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum JournalSubcommand {
    /// List recent multi-step operations, newest first
    List {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// List operations still running or failed
    Unfinished,
}

fn render(ops: &[Operation], json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&ops)?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = ops
        .iter()
        .map(|op| {
            vec![
                op.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                format!("{:?}", op.kind),
                op.team.clone(),
                format!("{}/{}", op.completed_steps(), op.steps.len()),
                match &op.status {
                    callsheet_core::journal::OpStatus::Running => "running".to_string(),
                    callsheet_core::journal::OpStatus::Finished => "finished".to_string(),
                    callsheet_core::journal::OpStatus::Failed { reason } => {
                        format!("failed: {reason}")
                    }
                },
            ]
        })
        .collect();
    print_table(&["WHEN", "KIND", "TEAM", "STEPS", "STATUS"], rows);
    Ok(())
}

pub fn run(root: &Path, subcmd: JournalSubcommand, json: bool) -> anyhow::Result<()> {
    let journal = OpJournal::open(&callsheet_core::paths::journal_path(root))?;
    match subcmd {
        JournalSubcommand::List { limit } => render(&journal.list_recent(limit)?, json),
        JournalSubcommand::Unfinished => render(&journal.unfinished()?, json),
    }
}
