use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use paddock_core::GameContent;

/// Load game content from a JSON file and validate it.
pub fn load_content(path: &Path) -> Result<GameContent> {
    let content: GameContent = serde_json::from_str(
        &std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
    )
    .with_context(|| format!("parsing {}", path.display()))?;
    validate_content(&content)?;
    Ok(content)
}

/// Rejects content the rules cannot run on: an empty or duplicated starter
/// roster, non-positive costs, or a calendar that cannot advance.
pub fn validate_content(content: &GameContent) -> Result<()> {
    if content.starter_components.is_empty() {
        bail!("content '{}' has no starter components", content.content_version);
    }

    let mut names = HashSet::new();
    for def in &content.starter_components {
        if def.name.trim().is_empty() {
            bail!("starter component with a blank name");
        }
        if !names.insert(def.name.as_str()) {
            bail!("starter component '{}' is listed twice", def.name);
        }
        if def.upgrade_cost <= 0 {
            bail!("starter component '{}' has non-positive upgrade_cost", def.name);
        }
    }

    let c = &content.constants;
    if c.time_acceleration <= 0.0 || c.seconds_per_day == 0 {
        bail!("calendar constants must be positive");
    }
    if c.research_duration_days == 0 {
        bail!("research_duration_days must be at least 1");
    }
    if c.starting_money < 0 {
        bail!("starting_money must not be negative");
    }
    Ok(())
}
