use crate::output::{print_json, print_table};
use std::path::Path;

/// List help videos, optionally filtered by category.
pub fn run(root: &Path, category: Option<&str>, json: bool) -> anyhow::Result<()> {
    let mut videos = callsheet_core::help::list(root)?;
    if let Some(category) = category {
        videos.retain(|v| v.category == category);
    }
    if json {
        print_json(&videos)?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = videos
        .iter()
        .map(|v| vec![v.category.clone(), v.title.clone(), v.url.clone()])
        .collect();
    print_table(&["CATEGORY", "TITLE", "URL"], rows);
    Ok(())
}
