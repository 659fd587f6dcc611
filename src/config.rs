use crate::dial::geometry::Padding;
use derive_more::{AsRef, Deref, From, Into};
use directories::ProjectDirs;
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// Which tick layout and sizing rule the widget uses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Fixed tick count, radius scaled from the surface.
    #[default]
    #[strum(serialize = "clock", serialize = "a", serialize = "count")]
    Clock,
    /// Fixed tick increment in degrees, radius fills the padded surface.
    #[strum(serialize = "dial", serialize = "b", serialize = "degree")]
    Dial,
}

/// One tick per tenth of a degree.
pub const MAX_TICKS: usize = 3600;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickLayout {
    Count { count: i32, major_interval: i32 },
    Degree { degree: f64, major_interval: i32 },
}

impl TickLayout {
    /// Degrees between two neighbouring ticks, and the engine's per-tick step.
    pub fn step_degrees(&self) -> f64 {
        match *self {
            Self::Count { count, .. } if count > 0 => 360.0 / count as f64,
            Self::Count { .. } => 0.0,
            Self::Degree { degree, .. } => degree,
        }
    }

    /// Number of ticks drawn around the circle, at most [`MAX_TICKS`]. Zero for
    /// unusable layouts.
    pub fn total(&self) -> usize {
        let total = match *self {
            Self::Count { count, .. } => count.max(0) as usize,
            Self::Degree { degree, .. } if degree > 0.0 && degree.is_finite() => {
                (360.0 / degree).floor() as usize
            }
            Self::Degree { .. } => 0,
        };
        total.min(MAX_TICKS)
    }

    pub fn is_major(&self, index: usize) -> bool {
        let interval = match *self {
            Self::Count { major_interval, .. } | Self::Degree { major_interval, .. } => {
                major_interval
            }
        };
        interval > 0 && index % interval as usize == 0
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Deref, From, Into, AsRef, SerializeDisplay, DeserializeFromStr,
)]
pub struct Color(Srgba<f64>);

impl Color {
    pub fn transparent() -> Self {
        Self(Srgba::new(0.0, 0.0, 0.0, 0.0))
    }

    pub fn red() -> Self {
        Self(Srgba::new(1.0, 0.0, 0.0, 1.0))
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Srgba::<u8>::new(r, g, b, a).into_format())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("unknown color name '{0}'")]
    UnknownName(String),
    #[error("invalid hex color '{0}'")]
    InvalidHex(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }
        let name = s.to_ascii_lowercase();
        if name == "transparent" {
            return Ok(Self::transparent());
        }
        palette::named::from_str(&name)
            .map(|c| Self::rgba(c.red, c.green, c.blue, u8::MAX))
            .ok_or(ColorParseError::UnknownName(name))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize, width: usize| {
        u8::from_str_radix(&hex[i * width..(i + 1) * width], 16)
            .ok()
            .map(|v| if width == 1 { v * 17 } else { v })
    };
    match hex.len() {
        3 => Some(Color::rgba(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?, u8::MAX)),
        6 => Some(Color::rgba(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, u8::MAX)),
        8 => Some(Color::rgba(
            channel(0, 2)?,
            channel(1, 2)?,
            channel(2, 2)?,
            channel(3, 2)?,
        )),
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c: Srgba<u8> = self.0.into_format();
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            c.red, c.green, c.blue, c.alpha
        )
    }
}

/// Drawing and timing parameters of one widget. Never mutated after construction.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub variant: Variant,

    pub frame_color: Color,
    pub frame_cover_color: Color,
    pub frame_stroke_width: f64,
    /// Fraction of half the shorter surface side used as radius. Clock only.
    pub frame_radius_scale: f64,

    pub calibration_color: Color,
    pub calibration_scale: f64,
    pub calibration2_scale: f64,
    pub calibration_stroke_width: f64,
    pub calibration2_stroke_width: f64,

    pub calibration_count: i32,
    pub calibration2_interval: i32,
    pub calibration_degree: f64,
    pub calibration_degree_interval: i32,

    /// Milliseconds between ticks while running.
    pub run_interval: u64,
    /// Milliseconds between ticks while coasting to a stop.
    pub stop_run_interval: u64,

    /// Surface padding. Dial only.
    pub padding: Padding,
    pub autostart: bool,
    pub min_width: i32,
    pub min_height: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::Clock,
            frame_color: Color::transparent(),
            frame_cover_color: Color::red(),
            frame_stroke_width: 15.0,
            frame_radius_scale: 1.0,
            calibration_color: Color::red(),
            calibration_scale: 0.3,
            calibration2_scale: 0.5,
            calibration_stroke_width: 2.0,
            calibration2_stroke_width: 3.0,
            calibration_count: 60,
            calibration2_interval: 5,
            calibration_degree: 6.0,
            calibration_degree_interval: 5,
            run_interval: 1000,
            stop_run_interval: 50,
            padding: Padding::default(),
            autostart: true,
            min_width: 240,
            min_height: 240,
        }
    }
}

impl Config {
    pub fn tick_layout(&self) -> TickLayout {
        match self.variant {
            Variant::Clock => TickLayout::Count {
                count: self.calibration_count,
                major_interval: self.calibration2_interval,
            },
            Variant::Dial => TickLayout::Degree {
                degree: self.calibration_degree,
                major_interval: self.calibration_degree_interval,
            },
        }
    }

    pub fn run_interval(&self) -> Duration {
        Duration::from_millis(self.run_interval)
    }

    pub fn stop_run_interval(&self) -> Duration {
        Duration::from_millis(self.stop_run_interval)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "dial", "dial").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("DIAL").try_parsing(true))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_deserialization() {
        let cases = vec![
            ("\"clock\"", Variant::Clock),
            ("\"Clock\"", Variant::Clock),
            ("\"COUNT\"", Variant::Clock),
            ("\"a\"", Variant::Clock),
            ("\"dial\"", Variant::Dial),
            ("\"B\"", Variant::Dial),
            ("\"degree\"", Variant::Dial),
        ];

        for (json, expected) in cases {
            let deserialized: Variant = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!("red".parse::<Color>(), Ok(Color::red()));
        assert_eq!("Transparent".parse::<Color>(), Ok(Color::transparent()));
        assert_eq!("#f00".parse::<Color>(), Ok(Color::red()));
        assert_eq!("#ff0000".parse::<Color>(), Ok(Color::red()));
        assert_eq!("#00000000".parse::<Color>(), Ok(Color::transparent()));
        assert_eq!(
            "#zz0000".parse::<Color>(),
            Err(ColorParseError::InvalidHex("#zz0000".to_string()))
        );
        assert!(matches!(
            "not-a-color".parse::<Color>(),
            Err(ColorParseError::UnknownName(_))
        ));
    }

    #[test]
    fn test_color_display_round_trips_alpha() {
        let c = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.to_string(), "#12345678");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r##"{ "variant": "dial", "frame_cover_color": "#00ff00", "calibration_degree": 10.0 }"##;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.variant, Variant::Dial);
        assert_eq!(config.frame_cover_color, Color::rgba(0, 255, 0, 255));
        assert_eq!(config.frame_stroke_width, 15.0);
        assert_eq!(config.run_interval(), Duration::from_millis(1000));
        assert_eq!(config.stop_run_interval(), Duration::from_millis(50));
        assert_eq!(
            config.tick_layout(),
            TickLayout::Degree {
                degree: 10.0,
                major_interval: 5
            }
        );
    }

    #[test]
    fn test_tick_layout_counts() {
        let clock = TickLayout::Count {
            count: 60,
            major_interval: 5,
        };
        assert_eq!(clock.total(), 60);
        assert_eq!(clock.step_degrees(), 6.0);
        assert_eq!((0..60).filter(|&i| clock.is_major(i)).count(), 12);

        let dial = TickLayout::Degree {
            degree: 7.0,
            major_interval: 5,
        };
        assert_eq!(dial.total(), 51);

        let broken = TickLayout::Count {
            count: 0,
            major_interval: 5,
        };
        assert_eq!(broken.total(), 0);
        assert_eq!(broken.step_degrees(), 0.0);

        let dense = TickLayout::Degree {
            degree: 1e-9,
            major_interval: 5,
        };
        assert_eq!(dense.total(), MAX_TICKS);

        let huge = TickLayout::Count {
            count: i32::MAX,
            major_interval: 5,
        };
        assert_eq!(huge.total(), MAX_TICKS);

        let negative = TickLayout::Degree {
            degree: -6.0,
            major_interval: 5,
        };
        assert_eq!(negative.total(), 0);
    }
}
