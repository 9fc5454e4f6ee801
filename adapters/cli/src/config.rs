//! Command-line flags, the optional TOML file, and their merged result.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use clap::{ArgAction, Parser};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;

/// Top-down movement prototype on a procedurally walled tile map.
#[derive(Debug, Parser)]
#[command(name = "deltaball", version)]
pub(crate) struct CliArgs {
    /// Seed for map generation; a random seed is drawn when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Initial window width in pixels.
    #[arg(long, value_name = "PX")]
    pub(crate) width: Option<u32>,
    /// Initial window height in pixels.
    #[arg(long, value_name = "PX")]
    pub(crate) height: Option<u32>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    pub(crate) vsync: Option<bool>,
    /// Log frame rate and frame timing once per second.
    #[arg(long)]
    pub(crate) show_fps: bool,
    /// Start with the debug overlay visible (toggle with F3).
    #[arg(long)]
    pub(crate) debug_overlay: bool,
    /// TOML file providing defaults for any of the options above.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
}

/// Settings read from a TOML config file. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) seed: Option<u64>,
    pub(crate) window_width: Option<u32>,
    pub(crate) window_height: Option<u32>,
    pub(crate) vsync: Option<bool>,
    pub(crate) show_fps: Option<bool>,
    pub(crate) debug_overlay: Option<bool>,
}

impl FileConfig {
    /// Reads and parses the config file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Errors raised while assembling the game configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("window dimensions must be positive (received {width}x{height})")]
    InvalidWindowSize { width: u32, height: u32 },
}

/// Fully resolved settings for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GameConfig {
    pub(crate) seed: u64,
    pub(crate) window_width: u32,
    pub(crate) window_height: u32,
    pub(crate) vsync: bool,
    pub(crate) show_fps: bool,
    pub(crate) debug_overlay: bool,
}

impl GameConfig {
    /// Merges flags over file values over defaults.
    ///
    /// `random_seed` is only called when neither source names a seed.
    pub(crate) fn resolve<R>(
        args: &CliArgs,
        file: FileConfig,
        random_seed: R,
    ) -> Result<Self, ConfigError>
    where
        R: FnOnce() -> u64,
    {
        let window_width = args
            .width
            .or(file.window_width)
            .unwrap_or(DEFAULT_WINDOW_WIDTH);
        let window_height = args
            .height
            .or(file.window_height)
            .unwrap_or(DEFAULT_WINDOW_HEIGHT);
        if window_width == 0 || window_height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: window_width,
                height: window_height,
            });
        }

        Ok(Self {
            seed: args.seed.or(file.seed).unwrap_or_else(random_seed),
            window_width,
            window_height,
            vsync: args.vsync.or(file.vsync).unwrap_or(true),
            show_fps: args.show_fps || file.show_fps.unwrap_or(false),
            debug_overlay: args.debug_overlay || file.debug_overlay.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("deltaball").chain(argv.iter().copied()))
            .expect("arguments parse")
    }

    fn no_random_seed() -> u64 {
        panic!("a seed was provided, so no random seed should be drawn")
    }

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let config = GameConfig::resolve(&args(&[]), FileConfig::default(), || 99)
            .expect("defaults are valid");

        assert_eq!(
            config,
            GameConfig {
                seed: 99,
                window_width: 1280,
                window_height: 720,
                vsync: true,
                show_fps: false,
                debug_overlay: false,
            }
        );
    }

    #[test]
    fn flags_parse_into_arguments() {
        let parsed = args(&[
            "--seed",
            "42",
            "--width",
            "800",
            "--height",
            "600",
            "--vsync",
            "false",
            "--show-fps",
            "--debug-overlay",
            "--config",
            "deltaball.toml",
        ]);

        assert_eq!(parsed.seed, Some(42));
        assert_eq!(parsed.width, Some(800));
        assert_eq!(parsed.height, Some(600));
        assert_eq!(parsed.vsync, Some(false));
        assert!(parsed.show_fps);
        assert!(parsed.debug_overlay);
        assert_eq!(parsed.config, Some(PathBuf::from("deltaball.toml")));
    }

    #[test]
    fn file_values_fill_in_missing_flags() {
        let file = FileConfig::parse(
            r#"
                seed = 7
                window_width = 1024
                window_height = 768
                vsync = false
                show_fps = true
                debug_overlay = true
            "#,
        )
        .expect("valid toml");

        let config =
            GameConfig::resolve(&args(&[]), file, no_random_seed).expect("file values are valid");

        assert_eq!(config.seed, 7);
        assert_eq!((config.window_width, config.window_height), (1024, 768));
        assert!(!config.vsync);
        assert!(config.show_fps);
        assert!(config.debug_overlay);
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig {
            seed: Some(7),
            window_width: Some(1024),
            vsync: Some(false),
            ..FileConfig::default()
        };

        let config = GameConfig::resolve(
            &args(&["--seed", "8", "--width", "640", "--vsync", "true"]),
            file,
            no_random_seed,
        )
        .expect("valid settings");

        assert_eq!(config.seed, 8);
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, 720);
        assert!(config.vsync);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::parse("fullscreen = true").is_err());
    }

    #[test]
    fn zero_sized_windows_are_rejected() {
        let error = GameConfig::resolve(&args(&["--height", "0"]), FileConfig::default(), || 1)
            .expect_err("zero height is invalid");

        assert_eq!(
            error.to_string(),
            "window dimensions must be positive (received 1280x0)"
        );
    }

    #[test]
    fn missing_files_report_their_path() {
        let path = Path::new("definitely/not/here/deltaball.toml");
        let error = FileConfig::load(path).expect_err("file does not exist");

        assert!(matches!(error, ConfigError::Read { .. }));
        assert!(error.to_string().contains("definitely/not/here/deltaball.toml"));
    }
}
