mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/lendscore/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("lendscore")
}

/// Get the default config file path (~/.config/lendscore/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file.
///
/// With no explicit path, a missing default config file is not an error:
/// the built-in scoring weights apply. An explicitly given path must exist.
///
/// # Errors
///
/// Returns an error if an explicit config file does not exist, the file
/// cannot be read, or the YAML cannot be parsed.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("lendscore-test-{}-{}", std::process::id(), name));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_explicit_path_errors() {
        let result = load_config(Some(PathBuf::from("/nonexistent/config.yaml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_loads_scoring_overrides() {
        let path = write_temp_config(
            "overrides.yaml",
            "scoring:\n  base_score: 40\n",
        );
        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.effective_scoring().base_score, Some(40.0));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_malformed_yaml_errors() {
        let path = write_temp_config("malformed.yaml", "scoring: [not: a map");
        let result = load_config(Some(path.clone()));
        assert!(result.is_err());
        let _ = fs::remove_file(path);
    }
}
