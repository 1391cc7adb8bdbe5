//! Subcommand implementations.

pub mod check;
pub mod run;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use tidepool::config::{CONFIG_FILE, Config};

/// Loads `explicit`, or `tidepool.toml` next to the markup when present.
fn load_config(explicit: Option<&Path>, markup: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path).wrap_err_with(|| format!("loading {}", path.display()));
    }
    let beside_markup = markup
        .parent()
        .map_or_else(|| PathBuf::from(CONFIG_FILE), |dir| dir.join(CONFIG_FILE));
    Ok(Config::load_or_default(&beside_markup)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_found_beside_the_markup() {
        let directory = tempfile::tempdir().expect("temp dir");
        let markup = directory.path().join("ui.xml");
        assert_eq!(
            load_config(None, &markup).expect("defaults"),
            Config::default()
        );

        std::fs::write(directory.path().join(CONFIG_FILE), "[window]\nwidth = 99")
            .expect("write config");
        assert_eq!(load_config(None, &markup).expect("loads").window.width, 99);
    }

    #[test]
    fn explicit_config_must_exist() {
        let directory = tempfile::tempdir().expect("temp dir");
        let missing = directory.path().join("other.toml");
        assert!(load_config(Some(&missing), Path::new("ui.xml")).is_err());
    }
}
