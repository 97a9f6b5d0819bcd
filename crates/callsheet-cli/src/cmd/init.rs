use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, project: Option<&str>) -> anyhow::Result<()> {
    let name = match project {
        Some(p) => p.to_string(),
        None => root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "callsheet".to_string()),
    };

    let already = callsheet_core::workspace::is_initialized(root);
    let config =
        callsheet_core::workspace::init(root, &name).context("failed to initialize project")?;

    if already {
        println!("Project '{}' already initialized; seed data refreshed.", config.project);
    } else {
        println!("Initialized callsheet project '{}'", config.project);
        println!("Template team '{}' seeded with starter terminology and plays.", config.template_team);
        println!("Next: callsheet team create <slug> --name <name>");
    }
    Ok(())
}
