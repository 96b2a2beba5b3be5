use crate::error::{Result, ViewerError};
use clap::Parser;
use std::ffi::OsString;

pub const DEFAULT_RESOLUTION: usize = 8;
pub const SURFACE_COLOR: [f64; 3] = [0.8, 0.1, 0.1];
pub const DEFAULT_ROTATE_X: f64 = 30.0;
pub const DEFAULT_ROTATE_Y: f64 = -45.0;
pub const BACKGROUND_COLOR: [f64; 3] = [0.1, 0.2, 0.4];
pub const DEFAULT_ZOOM: f64 = 1.5;
pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 300;
pub const DEFAULT_TITLE: &str = "Cylinder";

const MIN_RESOLUTION: usize = 3;
const MAX_RESOLUTION: usize = 512;

/// Command line overrides. Every flag defaults to the fixed demo scene.
#[derive(Parser, Debug)]
#[command(version, about = "Interactive 3D cylinder viewer")]
pub struct Args {
    /// Number of circumferential facets of the cylinder
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    pub resolution: usize,

    /// First rotation, about the actor's X axis, in degrees
    #[arg(long, default_value_t = DEFAULT_ROTATE_X, allow_negative_numbers = true)]
    pub rotate_x: f64,

    /// Second rotation, about the actor's Y axis, in degrees
    #[arg(long, default_value_t = DEFAULT_ROTATE_Y, allow_negative_numbers = true)]
    pub rotate_y: f64,

    /// Zoom applied after the camera is fitted to the scene
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: f64,

    /// Window width in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Window title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,
}

/// Scene and window settings used to build the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub resolution: usize,
    pub surface_color: [f64; 3],
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub background: [f64; 3],
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            resolution: DEFAULT_RESOLUTION,
            surface_color: SURFACE_COLOR,
            rotate_x: DEFAULT_ROTATE_X,
            rotate_y: DEFAULT_ROTATE_Y,
            background: BACKGROUND_COLOR,
            zoom: DEFAULT_ZOOM,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl From<Args> for ViewerConfig {
    fn from(args: Args) -> Self {
        ViewerConfig {
            resolution: args.resolution,
            rotate_x: args.rotate_x,
            rotate_y: args.rotate_y,
            zoom: args.zoom,
            width: args.width,
            height: args.height,
            title: args.title,
            ..ViewerConfig::default()
        }
    }
}

impl ViewerConfig {
    /// Reads overrides from `args`. Unknown flags or rejected values leave the
    /// fixed scene in place, so the window always opens.
    pub fn from_command_line<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = match Args::try_parse_from(args) {
            Ok(args) => args,
            Err(err) => {
                if !err.use_stderr() {
                    // --help and --version
                    let _ = err.print();
                } else {
                    tracing::warn!(kind = ?err.kind(), "ignoring command line arguments");
                }
                return ViewerConfig::default();
            }
        };

        let config = ViewerConfig::from(args);
        match config.validate() {
            Ok(()) => config,
            Err(err) => {
                tracing::warn!(%err, "falling back to the default scene");
                ViewerConfig::default()
            }
        }
    }

    /// Checks that every value is accepted by the renderer
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(ViewerError::InvalidConfig(format!(
                "resolution must be between {} and {}, got {}",
                MIN_RESOLUTION, MAX_RESOLUTION, self.resolution
            )));
        }
        for (name, color) in [("surface", self.surface_color), ("background", self.background)] {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(ViewerError::InvalidConfig(format!(
                    "{} color components must lie in [0, 1], got {:?}",
                    name, color
                )));
            }
        }
        if !self.rotate_x.is_finite() || !self.rotate_y.is_finite() {
            return Err(ViewerError::InvalidConfig(
                "rotation angles must be finite".to_string(),
            ));
        }
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(ViewerError::InvalidConfig(format!(
                "zoom must be a positive number, got {}",
                self.zoom
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ViewerError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_gives_the_fixed_scene() {
        let args = Args::try_parse_from(["cylinder-viewer"]).unwrap();
        let config = ViewerConfig::from(args);
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.resolution, 8);
        assert_eq!(config.surface_color, [0.8, 0.1, 0.1]);
        assert_eq!((config.width, config.height), (300, 300));
        assert_eq!(config.title, "Cylinder");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_are_parsed() {
        let args = Args::try_parse_from([
            "cylinder-viewer",
            "--resolution",
            "16",
            "--rotate-y",
            "-10",
            "--width",
            "640",
        ])
        .unwrap();
        let config = ViewerConfig::from(args);
        assert_eq!(config.resolution, 16);
        assert_eq!(config.rotate_y, -10.0);
        assert_eq!(config.width, 640);
        assert_eq!(config.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn stray_argument_keeps_the_fixed_scene() {
        let config = ViewerConfig::from_command_line(["cylinder-viewer", "-psn_0_1"]);
        assert_eq!(config, ViewerConfig::default());

        let config = ViewerConfig::from_command_line(["cylinder-viewer", "extra"]);
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn rejected_values_keep_the_fixed_scene() {
        let config = ViewerConfig::from_command_line(["cylinder-viewer", "--zoom", "0"]);
        assert_eq!(config, ViewerConfig::default());

        let config = ViewerConfig::from_command_line(["cylinder-viewer", "--resolution", "2"]);
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn valid_overrides_survive_the_command_line() {
        let config = ViewerConfig::from_command_line(["cylinder-viewer", "--resolution", "12"]);
        assert_eq!(config.resolution, 12);
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = ViewerConfig {
            resolution: 2,
            ..ViewerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ViewerError::InvalidConfig(_))));

        config.resolution = 8;
        config.zoom = 0.0;
        assert!(config.validate().is_err());

        config.zoom = 1.5;
        config.height = 0;
        assert!(config.validate().is_err());

        config.height = 300;
        config.surface_color = [1.2, 0.0, 0.0];
        assert!(config.validate().is_err());
    }
}
