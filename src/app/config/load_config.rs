use crate::domain::{AppError, StoryboardConfig};
use crate::ports::StoryboardStore;

/// Load `.storygrid/config.toml`, falling back to defaults when it is absent.
pub fn load_config<S: StoryboardStore>(store: &S) -> Result<StoryboardConfig, AppError> {
    match store.read_config()? {
        Some(content) => parse_config_content(&content),
        None => Ok(StoryboardConfig::default()),
    }
}

fn parse_config_content(content: &str) -> Result<StoryboardConfig, AppError> {
    let config: StoryboardConfig = toml::from_str(content)?;

    if config.gemini.model.trim().is_empty() {
        return Err(AppError::config_error("gemini.model must not be empty"));
    }
    if config.gemini.timeout_secs == 0 {
        return Err(AppError::config_error("gemini.timeout_secs must be at least 1"));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStoryboardStore;

    #[test]
    fn missing_config_uses_defaults() {
        let config = load_config(&MemoryStoryboardStore::new()).unwrap();
        assert_eq!(config.gemini.model, "gemini-3-pro-preview");
    }

    #[test]
    fn overrides_are_applied() {
        let store = MemoryStoryboardStore::new()
            .with_config("[gemini]\nmodel = \"gemini-2.5-flash\"\ntimeout_secs = 30\n");
        let config = load_config(&store).unwrap();
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.timeout_secs, 30);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let store = MemoryStoryboardStore::new().with_config("[gemini]\ntimeout_secs = 0\n");
        let err = load_config(&store).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let store = MemoryStoryboardStore::new().with_config("[gemini]\nmodle = \"typo\"\n");
        let err = load_config(&store).unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }
}
