use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::config::CONFIG_TEMPLATE;
use crate::domain::projection::default_top_prompt;
use crate::domain::{AppError, STORYGRID_DIR, StoryboardState};
use crate::adapters::slot_claims_filesystem::{DEFAULT_CLAIM_TTL, FilesystemSlotClaims};
use crate::ports::{SlotClaims, StoryboardStore};

const STATE_DIR: &str = "state";
const GRID_FILE: &str = "grid.json";
const SCENE_FILE: &str = "scene.json";
const SHOTS_FILE: &str = "shots.json";
const TOP_PROMPT_FILE: &str = "top_prompt.txt";
const PREFERENCES_FILE: &str = "preferences.json";
const CREDENTIAL_FILE: &str = "credential";
const CONFIG_FILE: &str = "config.toml";
const CLAIMS_DIR: &str = "claims";

/// Filesystem-based storyboard store rooted at `<root>/.storygrid/`.
#[derive(Debug, Clone)]
pub struct FilesystemStoryboardStore {
    root: PathBuf,
    claim_ttl: Duration,
}

impl FilesystemStoryboardStore {
    /// Create a store for the given root directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root, claim_ttl: DEFAULT_CLAIM_TTL }
    }

    /// Age after which a slot claim left by another process no longer counts.
    pub fn with_claim_ttl(mut self, ttl: Duration) -> Self {
        self.claim_ttl = ttl;
        self
    }

    /// Create a store for the current directory.
    pub fn current() -> Result<Self, AppError> {
        let cwd = std::env::current_dir()?;
        Ok(Self::new(cwd))
    }

    pub fn storygrid_path(&self) -> PathBuf {
        self.root.join(STORYGRID_DIR)
    }

    fn state_path(&self, file: &str) -> PathBuf {
        self.storygrid_path().join(STATE_DIR).join(file)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
    let Some(content) = read_optional(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| AppError::parse_error(path.display().to_string(), e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::parse_error(path.display().to_string(), e))?;
    fs::write(path, format!("{}\n", content))?;
    Ok(())
}

impl StoryboardStore for FilesystemStoryboardStore {
    fn exists(&self) -> bool {
        self.storygrid_path().exists()
    }

    fn initialize(&self, state: &StoryboardState) -> Result<(), AppError> {
        if self.exists() {
            return Err(AppError::StoryboardExists);
        }
        fs::create_dir_all(self.storygrid_path().join(STATE_DIR))?;
        fs::write(self.storygrid_path().join(CONFIG_FILE), CONFIG_TEMPLATE)?;
        self.save(state)
    }

    fn load(&self) -> Result<StoryboardState, AppError> {
        if !self.exists() {
            return Err(AppError::StoryboardNotFound);
        }

        let defaults = StoryboardState::default();
        let grid = read_json(&self.state_path(GRID_FILE))?.unwrap_or(defaults.grid);
        let top_prompt = read_optional(&self.state_path(TOP_PROMPT_FILE))?
            .map(|content| content.strip_suffix('\n').unwrap_or(&content).to_string())
            .unwrap_or_else(|| default_top_prompt(&grid));

        Ok(StoryboardState {
            top_prompt,
            grid,
            scene: read_json(&self.state_path(SCENE_FILE))?.unwrap_or(defaults.scene),
            slots: read_json(&self.state_path(SHOTS_FILE))?.unwrap_or_default(),
            preferences: read_json(&self.state_path(PREFERENCES_FILE))?
                .unwrap_or(defaults.preferences),
        })
    }

    fn save(&self, state: &StoryboardState) -> Result<(), AppError> {
        fs::create_dir_all(self.storygrid_path().join(STATE_DIR))?;
        write_json(&self.state_path(GRID_FILE), &state.grid)?;
        write_json(&self.state_path(SCENE_FILE), &state.scene)?;
        write_json(&self.state_path(SHOTS_FILE), &state.slots)?;
        write_json(&self.state_path(PREFERENCES_FILE), &state.preferences)?;
        fs::write(self.state_path(TOP_PROMPT_FILE), format!("{}\n", state.top_prompt))?;
        Ok(())
    }

    fn read_credential(&self) -> Result<Option<String>, AppError> {
        let content = read_optional(&self.storygrid_path().join(CREDENTIAL_FILE))?;
        Ok(content.map(|key| key.trim().to_string()).filter(|key| !key.is_empty()))
    }

    fn write_credential(&self, credential: Option<&str>) -> Result<(), AppError> {
        let path = self.storygrid_path().join(CREDENTIAL_FILE);
        match credential {
            Some(key) => {
                fs::write(&path, format!("{}\n", key.trim()))?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
                }
            }
            None => {
                if path.exists() {
                    fs::remove_file(&path)?;
                }
            }
        }
        Ok(())
    }

    fn read_config(&self) -> Result<Option<String>, AppError> {
        read_optional(&self.storygrid_path().join(CONFIG_FILE))
    }

    fn claims(&self) -> Arc<dyn SlotClaims> {
        let dir = self.storygrid_path().join(CLAIMS_DIR);
        Arc::new(FilesystemSlotClaims::new(dir, self.claim_ttl))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use tempfile::TempDir;

    use super::*;
    use crate::domain::{GridSpec, Language, SceneDescription};

    fn store() -> (TempDir, FilesystemStoryboardStore) {
        let dir = TempDir::new().unwrap();
        let store = FilesystemStoryboardStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn initialize_writes_state_and_config() {
        let (_dir, store) = store();
        store.initialize(&StoryboardState::default()).unwrap();

        assert!(store.exists());
        assert!(store.read_config().unwrap().unwrap().contains("[gemini]"));
        assert_eq!(store.load().unwrap(), StoryboardState::default());
    }

    #[test]
    fn initialize_twice_fails() {
        let (_dir, store) = store();
        store.initialize(&StoryboardState::default()).unwrap();
        let err = store.initialize(&StoryboardState::default()).unwrap_err();
        assert!(matches!(err, AppError::StoryboardExists));
    }

    #[test]
    fn load_without_init_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(store.load(), Err(AppError::StoryboardNotFound)));
    }

    #[test]
    fn round_trips_edited_state() {
        let (_dir, store) = store();
        store.initialize(&StoryboardState::default()).unwrap();

        let mut state = store.load().unwrap();
        state.change_grid(GridSpec::from_catalog("2x3").unwrap());
        state.scene = SceneDescription::new("neon alley", "霓虹小巷");
        state.set_shot_text(4, Language::Zh, "雨滴");
        state.preferences.language = Language::En;
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn top_prompt_keeps_its_own_trailing_newlines() {
        let (_dir, store) = store();
        store.initialize(&StoryboardState::default()).unwrap();

        let mut state = store.load().unwrap();
        state.set_top_prompt(Some("Line one\nLine two\n\n"));
        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap().top_prompt, "Line one\nLine two\n\n");
    }

    #[test]
    fn missing_parts_fall_back_independently() {
        let (_dir, store) = store();
        let mut state = StoryboardState::default();
        state.change_grid(GridSpec::from_catalog("2x2").unwrap());
        store.initialize(&state).unwrap();

        fs::remove_file(store.state_path(SHOTS_FILE)).unwrap();
        fs::remove_file(store.state_path(TOP_PROMPT_FILE)).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.grid.label, "2x2");
        assert!(loaded.slots.is_empty());
        assert!(loaded.top_prompt.contains("2x2"));
    }

    #[test]
    fn corrupt_part_reports_file() {
        let (_dir, store) = store();
        store.initialize(&StoryboardState::default()).unwrap();
        fs::write(store.state_path(SCENE_FILE), "{not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(err.to_string().contains(SCENE_FILE));
    }

    #[test]
    fn credential_set_and_clear() {
        let (_dir, store) = store();
        store.initialize(&StoryboardState::default()).unwrap();
        assert_eq!(store.read_credential().unwrap(), None);

        store.write_credential(Some(" key-123 ")).unwrap();
        assert_eq!(store.read_credential().unwrap().as_deref(), Some("key-123"));

        store.write_credential(None).unwrap();
        assert_eq!(store.read_credential().unwrap(), None);
        store.write_credential(None).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn credential_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = store();
        store.initialize(&StoryboardState::default()).unwrap();
        store.write_credential(Some("key-123")).unwrap();

        let path = store.storygrid_path().join(CREDENTIAL_FILE);
        let mode = fs::metadata(path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn claims_live_under_storygrid_dir() {
        let (_dir, store) = store();
        store.initialize(&StoryboardState::default()).unwrap();

        store.claims().acquire(&BTreeSet::from([2])).unwrap();
        assert!(store.storygrid_path().join(CLAIMS_DIR).join("slot-2").exists());
        assert_eq!(store.clone().claims().held().unwrap(), BTreeSet::from([2]));
    }
}
