use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration loaded from the TOML config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    pub base_url: Option<String>,
    /// Default sender name for `compose`.
    pub sender: Option<String>,
    /// Default template for `compose`.
    pub template: Option<String>,
}

/// Returns the config file path: $XDG_CONFIG_HOME/emolink/config.toml
/// or the platform config dir (e.g. ~/.config/emolink/config.toml).
pub fn config_path(getenv: &dyn Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let base = match getenv("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::config_dir()?,
    };
    Some(base.join("emolink").join("config.toml"))
}

/// Load config from the standard path. Returns default Config if the file
/// doesn't exist; warns on stderr if it can't be read or parsed.
pub fn load_config(getenv: &dyn Fn(&str) -> Option<String>, stderr: &mut dyn Write) -> Config {
    match config_path(getenv) {
        Some(path) if path.exists() => load_config_from_path(&path, stderr),
        _ => Config::default(),
    }
}

/// Parse the TOML file at the given path.
fn load_config_from_path(path: &Path, stderr: &mut dyn Write) -> Config {
    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(config) => config,
            Err(e) => {
                let _ = writeln!(
                    stderr,
                    "warning: failed to parse {}: {}",
                    path.display(),
                    e
                );
                Config::default()
            }
        },
        Err(e) => {
            let _ = writeln!(
                stderr,
                "warning: failed to read {}: {}",
                path.display(),
                e
            );
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::create_dir_all(dir.join("emolink"));
        let path = dir.join("emolink").join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn path_honors_xdg_config_home() {
        let getenv = |k: &str| (k == "XDG_CONFIG_HOME").then(|| "/tmp/xdg".to_string());
        assert_eq!(
            config_path(&getenv),
            Some(PathBuf::from("/tmp/xdg/emolink/config.toml"))
        );
    }

    #[test]
    fn load_missing_file() {
        let config =
            load_config_from_path(Path::new("/nonexistent/config.toml"), &mut Vec::new());
        assert!(config.base_url.is_none());
        assert!(config.sender.is_none());
        assert!(config.template.is_none());
    }

    #[test]
    fn load_valid_toml() {
        let (dir, path) = temp_config(
            "emolink_config_valid",
            "base_url = \"https://cards.example.com/\"\nsender = \"John\"\ntemplate = \"apology\"\n",
        );
        let config = load_config_from_path(&path, &mut Vec::new());
        assert_eq!(config.base_url.as_deref(), Some("https://cards.example.com/"));
        assert_eq!(config.sender.as_deref(), Some("John"));
        assert_eq!(config.template.as_deref(), Some("apology"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_partial_toml() {
        let (dir, path) = temp_config("emolink_config_partial", "sender = \"Alice\"\n");
        let config = load_config_from_path(&path, &mut Vec::new());
        assert!(config.base_url.is_none());
        assert_eq!(config.sender.as_deref(), Some("Alice"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml_warns() {
        let (dir, path) = temp_config("emolink_config_invalid", "not valid [[ toml !!!");
        let mut stderr = Vec::new();
        let config = load_config_from_path(&path, &mut stderr);
        assert!(config.base_url.is_none());
        let warning = String::from_utf8(stderr).unwrap();
        assert!(warning.contains("warning: failed to parse"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_config_via_env() {
        let (dir, _) = temp_config("emolink_config_env", "base_url = \"https://x.test/\"\n");
        let dir_str = dir.to_string_lossy().to_string();
        let getenv = move |k: &str| (k == "XDG_CONFIG_HOME").then(|| dir_str.clone());
        let config = load_config(&getenv, &mut Vec::new());
        assert_eq!(config.base_url.as_deref(), Some("https://x.test/"));
        let _ = fs::remove_dir_all(&dir);
    }
}
