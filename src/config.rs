//! World constants and the validated startup configuration.

use crate::error::ConfigError;

/// Width of the world in cells.
pub const WORLD_WIDTH: u32 = 1024;

/// Height of the world in cells.
pub const WORLD_HEIGHT: u32 = WORLD_WIDTH;

/// On-screen size of one cell in pixels at zoom level 1.
pub const BASE_CELL_SIZE: u32 = 8;

/// Frames per second the scheduler paces to.
pub const TARGET_FPS: u32 = 120;

/// Initial window size handed to the viewport.
pub const WINDOW_WIDTH: u32 = 512;
pub const WINDOW_HEIGHT: u32 = 512;

/// Startup configuration. Fixed for the lifetime of an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// World width in cells.
    pub width: u32,
    /// World height in cells.
    pub height: u32,
    /// Target frame rate of the scheduler.
    pub target_fps: u32,
    /// Initial on-screen cell size in pixels.
    pub cell_size: u32,
    /// Worker threads for the compute pool; 0 lets rayon decide.
    pub worker_threads: usize,
    /// Seed for the randomness field; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            target_fps: TARGET_FPS,
            cell_size: BASE_CELL_SIZE,
            worker_threads: 0,
            seed: None,
        }
    }
}

impl Config {
    /// Config for a world of the given size, everything else default.
    pub fn with_world(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyWorld {
                width: self.width,
                height: self.height,
            });
        }
        if self.target_fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        Ok(())
    }

    /// Number of cells in one grid.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = Config::default();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 1024);
        assert_eq!(config.target_fps, 120);
        assert_eq!(config.cell_size, 8);
        assert!(config.validate().is_ok());
        assert_eq!(config.cell_count(), 1024 * 1024);
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        assert!(matches!(
            Config::with_world(0, 8).validate(),
            Err(ConfigError::EmptyWorld { width: 0, height: 8 })
        ));

        let config = Config {
            target_fps: 0,
            ..Config::with_world(8, 8)
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroFrameRate)));

        let config = Config {
            cell_size: 0,
            ..Config::with_world(8, 8)
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCellSize)));
    }
}
