//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/site/dist/posts/   ← cwd
/// /home/user/site/preheat.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_upward(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
fn find_upward(start: &Path, config_name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_absolute_config() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("preheat.toml");
        fs::write(&config, "").unwrap();

        assert_eq!(find_config_file(&config), Some(config));
        assert_eq!(find_config_file(&dir.path().join("missing.toml")), None);
    }

    #[test]
    fn test_find_upward_from_nested_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("dist/posts");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("preheat.toml"), "").unwrap();

        assert_eq!(
            find_upward(&nested, Path::new("preheat.toml")),
            Some(dir.path().join("preheat.toml"))
        );
        assert_eq!(find_upward(&nested, Path::new("other-name.toml")), None);
    }
}
