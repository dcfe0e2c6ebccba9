//! Level scaffolding command

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tread_physics::LevelFile;

pub fn run(path: &str, force: bool) -> Result<()> {
    let target = Path::new(path);

    if target.exists() && !force {
        anyhow::bail!("'{}' already exists (use --force to overwrite)", path);
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory '{}'", parent.display()))?;
    }

    let room = LevelFile::default_room();
    room.save(target)
        .with_context(|| format!("writing level '{}'", path))?;

    println!(
        "Created level '{}' at {} ({} obstacles)",
        room.level.name,
        path,
        room.obstacles.len()
    );
    Ok(())
}
