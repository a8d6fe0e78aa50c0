use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::layout::is_valid_symbol;
use crate::model::Board;

/// Moves are typed as two single digits, so at most nine containers are
/// addressable.
pub const MAX_CONTAINERS: usize = 9;

/// Startup configuration for a session, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of distinct block types, one filled container each.
    pub types: usize,
    /// Blocks per container, and blocks per type.
    pub capacity: usize,
    /// Containers that start empty.
    pub empty: usize,
    /// Characters used for block types, in order.
    pub symbols: String,
    /// Fixed seed for a reproducible deal.
    pub seed: Option<u64>,
    /// Explicit starting board; replaces the random deal.
    pub layout: Option<String>,
    /// Colored terminal output.
    pub color: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            types: 5,
            capacity: 10,
            empty: 2,
            symbols: "ABCDEFGH".to_string(),
            seed: None,
            layout: None,
            color: true,
        }
    }
}

impl GameConfig {
    /// Read configuration from a TOML file. Values are not validated yet,
    /// since command-line flags may still override them.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        debug!(path = %path.display(), "read config");
        Ok(config)
    }

    /// Validate all fields. Runs once flags are merged in, and again in
    /// [`GameConfig::build_board`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Validation(
                "capacity must be at least 1".to_string(),
            ));
        }
        if let Some(layout) = &self.layout {
            let board = Board::from_layout(layout, self.capacity)?;
            if board.len() > MAX_CONTAINERS {
                return Err(ConfigError::Validation(format!(
                    "layout has {} containers, at most {MAX_CONTAINERS} are supported",
                    board.len()
                )));
            }
            return Ok(());
        }

        if self.types == 0 {
            return Err(ConfigError::Validation(
                "types must be at least 1".to_string(),
            ));
        }
        if self.empty == 0 {
            return Err(ConfigError::Validation(
                "empty must be at least 1, otherwise no move is ever possible".to_string(),
            ));
        }
        if self.types + self.empty > MAX_CONTAINERS {
            return Err(ConfigError::Validation(format!(
                "types + empty must be at most {MAX_CONTAINERS}, got {}",
                self.types + self.empty
            )));
        }

        let symbols = self.symbol_list();
        if let Some(bad) = symbols.iter().copied().find(|c| !is_valid_symbol(*c)) {
            return Err(ConfigError::Validation(format!(
                "'{bad}' cannot be used as a block symbol"
            )));
        }
        let mut distinct = symbols.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() != symbols.len() {
            return Err(ConfigError::Validation(
                "symbols must not repeat".to_string(),
            ));
        }
        if symbols.len() < self.types {
            return Err(ConfigError::Validation(format!(
                "{} types need at least {} symbols, got {}",
                self.types,
                self.types,
                symbols.len()
            )));
        }
        Ok(())
    }

    pub fn symbol_list(&self) -> Vec<char> {
        self.symbols.chars().collect()
    }

    /// Builds the starting board: the layout when one is given, otherwise a
    /// random deal seeded from `seed` or from the OS.
    pub fn build_board(&self) -> Result<Board<char>, ConfigError> {
        self.validate()?;
        if let Some(layout) = &self.layout {
            info!("using configured layout");
            return Ok(Board::from_layout(layout, self.capacity)?);
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let types: Vec<char> = self.symbol_list().into_iter().take(self.types).collect();
        Ok(Board::generate(&types, self.capacity, self.empty, &mut rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_zero_empty_containers() {
        let config = GameConfig {
            empty: 0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_too_many_containers() {
        let config = GameConfig {
            types: 8,
            empty: 2,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "config validation error: types + empty must be at most 9, got 10"
        );
    }

    #[test]
    fn test_rejects_short_or_repeated_symbols() {
        let short = GameConfig {
            symbols: "AB".to_string(),
            ..GameConfig::default()
        };
        assert!(short.validate().is_err());

        let repeated = GameConfig {
            types: 2,
            symbols: "AA".to_string(),
            ..GameConfig::default()
        };
        assert!(repeated.validate().is_err());

        let reserved = GameConfig {
            types: 2,
            symbols: "A,".to_string(),
            ..GameConfig::default()
        };
        assert!(reserved.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("capacity = 4\nseed = 3\n").unwrap();
        assert_eq!(config.capacity, 4);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.types, 5);
        assert!(config.color);
    }

    #[test]
    fn test_read_defers_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "empty = 0").unwrap();
        let config = GameConfig::read(file.path()).unwrap();
        assert_eq!(config.empty, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_board_from_seed() {
        let config = GameConfig {
            types: 3,
            capacity: 4,
            empty: 2,
            seed: Some(11),
            ..GameConfig::default()
        };
        let board = config.build_board().unwrap();
        assert_eq!(board.len(), 5);
        assert_eq!(board, config.build_board().unwrap());
        for symbol in ['A', 'B', 'C'] {
            assert_eq!(board.count_of(&symbol), 4);
        }
        assert_eq!(board.count_of(&'D'), 0);
    }

    #[test]
    fn test_build_board_from_layout() {
        let config = GameConfig {
            capacity: 2,
            layout: Some("AB,BA,".to_string()),
            ..GameConfig::default()
        };
        assert_eq!(config.build_board().unwrap().layout(), "AB,BA,");
    }

    #[test]
    fn test_layout_errors_surface_as_config_errors() {
        let config = GameConfig {
            capacity: 2,
            layout: Some("AB,B,".to_string()),
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Layout(_))
        ));
    }
}
