use std::{fs, path::Path};

use anyhow::{Context, Result};
use cursendus_core::GameSnapshot;

/// Reads a game snapshot stored as JSON.
pub(crate) fn load(path: &Path) -> Result<GameSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read game file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("game file {} is not a snapshot", path.display()))
}

/// Writes the snapshot as pretty-printed JSON, replacing the file.
pub(crate) fn save(path: &Path, snapshot: &GameSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("failed to serialise snapshot")?;
    fs::write(path, json).with_context(|| format!("failed to write game file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursendus_core::{GameConfig, GameId, NullLogger, PlayerId};
    use cursendus_system_command_parser::CommandParser;
    use cursendus_world::{query, Collaborators, Game};

    #[test]
    fn saved_snapshot_loads_back() {
        let game = Game::new(
            GameId::new("stored"),
            PlayerId::new("a@example.com"),
            PlayerId::new("b@example.com"),
            &GameConfig::default(),
            Collaborators::new(CommandParser::new()).with_logger(NullLogger),
        )
        .expect("default configuration is valid");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("stored.json");

        save(&path, &query::snapshot(&game)).expect("snapshot saved");

        assert_eq!(load(&path).expect("snapshot loads"), query::snapshot(&game));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = load(&dir.path().join("absent.json")).expect_err("nothing to load");

        assert!(error.to_string().contains("absent.json"));
    }
}
