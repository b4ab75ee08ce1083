//! Round configuration loader.

use std::path::Path;

use oni_core::{GeneratorTuning, RoundConfig};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Top-level config file: `[round]` and `[generator]` tables, each
/// optional and defaulting to the shipped values.
#[derive(Debug, Clone, Deserialize)]
struct ConfigToml {
    #[serde(default)]
    round: RoundConfig,
    #[serde(default)]
    generator: GeneratorTuning,
}

/// Loader for round configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load round config and generator tuning from a TOML file.
    pub fn load(path: &Path) -> LoadResult<(RoundConfig, GeneratorTuning)> {
        let content = read_file(path)?;
        let config: ConfigToml = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.round.width == 0 || config.round.height == 0 {
            anyhow::bail!("Config {} has a zero-sized board", path.display());
        }
        Ok((config.round, config.generator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("oni-config-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn full_config_round_trips() {
        let path = write_config(
            "full.toml",
            r#"
                [round]
                width = 12
                height = 12
                player_spawn = { x = 5, y = 5 }
                exit = { x = 5, y = 5 }
                item_threshold = 10
                adversary_count = 3
                normal_interval_ms = 150
                slow_interval_ms = 600
                adversary_interval_ms = [400, 600]
                rope_extend_ms = 1000
                min_spawn_distance = 3

                [generator]
                obstacle_min = 4
                obstacle_max = 8
                item_count = 15
                slow_base_pct = 10
                slow_spread_pct = 40
            "#,
        );

        let (round, tuning) = ConfigLoader::load(&path).unwrap();
        assert_eq!(round.width, 12);
        assert_eq!(round.adversary_count, 3);
        assert_eq!(round.adversary_interval_ms, (400, 600));
        assert_eq!(tuning.item_count, 15);
    }

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let path = write_config("empty.toml", "");
        let (round, tuning) = ConfigLoader::load(&path).unwrap();
        assert_eq!(round, RoundConfig::default());
        assert_eq!(tuning, GeneratorTuning::default());
    }

    #[test]
    fn zero_sized_board_is_rejected() {
        let path = write_config(
            "zero.toml",
            r#"
                [round]
                width = 0
                height = 10
                player_spawn = { x = 0, y = 0 }
                exit = { x = 0, y = 0 }
                item_threshold = 1
                adversary_count = 0
                normal_interval_ms = 150
                slow_interval_ms = 600
                adversary_interval_ms = [400, 600]
                rope_extend_ms = 1000
                min_spawn_distance = 0
            "#,
        );
        assert!(ConfigLoader::load(&path).is_err());
    }
}
