//! Application configuration: a TOML file with `[field]` and `[display]`
//! tables, overridden by command-line flags.

use gesture_field::FieldConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::error::{AppError, Result};

/// Window and rendering options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub title:         String,
    /// Per-frame multiplier of the particle trail layer.
    pub trail_fade:    f32,
    /// Brightness of the hand underlay beneath the particles.
    pub underlay_dim:  f32,
    pub show_skeleton: bool,
    /// Simulated hand size as a fraction of the frame height.
    pub hand_size:     f32,
    /// Target frame rate of the window.
    pub fps:           u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            title:         "Hand Gesture Particles".to_string(),
            trail_fade:    0.88,
            underlay_dim:  0.3,
            show_skeleton: true,
            hand_size:     0.2,
            fps:           60,
        }
    }
}

/// Configuration for the full application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub field:   FieldConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let cfg: AppConfig = toml::from_str(&text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok(cfg)
    }

    /// File (if any) plus command-line overrides, validated.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut cfg = match &cli.config {
            Some(path) => AppConfig::load(path)?,
            None       => AppConfig::default(),
        };
        cfg.apply_overrides(cli);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(n) = cli.particles {
            self.field.particle_count = n;
        }
        if let Some(seed) = cli.seed {
            self.field.seed = Some(seed);
        }
        if let Some(w) = cli.width {
            self.field.width = w as f32;
        }
        if let Some(h) = cli.height {
            self.field.height = h as f32;
        }
        if cli.no_skeleton {
            self.display.show_skeleton = false;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.field.validate()?;
        let f = &self.field;
        if f.width.fract() != 0.0 || f.height.fract() != 0.0 {
            return Err(AppError::Config(format!(
                "frame size must be whole pixels, got {}x{}",
                f.width, f.height
            )));
        }
        let d = &self.display;
        if !(0.0..=1.0).contains(&d.trail_fade) {
            return Err(AppError::Config(format!("trail_fade must lie in [0, 1], got {}", d.trail_fade)));
        }
        if !(0.0..=1.0).contains(&d.underlay_dim) {
            return Err(AppError::Config(format!("underlay_dim must lie in [0, 1], got {}", d.underlay_dim)));
        }
        if !(d.hand_size > 0.0 && d.hand_size <= 1.0) {
            return Err(AppError::Config(format!("hand_size must lie in (0, 1], got {}", d.hand_size)));
        }
        if d.fps == 0 {
            return Err(AppError::Config("fps must be at least 1".to_string()));
        }
        if d.fps > 240 {
            warn!(fps = d.fps, "frame rate above 240 is unlikely to be reached");
        }
        Ok(())
    }

    /// Window size in pixels; `validate` guarantees whole numbers.
    pub fn window_size(&self) -> (usize, usize) {
        (self.field.width as usize, self.field.height as usize)
    }

    /// Time between frames at the configured rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.display.fps.max(1) as f64)
    }

    /// Simulated hand size in pixels.
    pub fn hand_size_px(&self) -> f32 {
        self.display.hand_size * self.field.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_reference_run() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.window_size(), (1280, 720));
        assert_eq!(cfg.field.particle_count, 800);
        assert_eq!(cfg.display.trail_fade, 0.88);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config(
            r#"
            [field]
            particle_count = 250
            seed = 9

            [display]
            show_skeleton = false
            "#,
        );
        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.field.particle_count, 250);
        assert_eq!(cfg.field.seed, Some(9));
        assert_eq!(cfg.field.width, 1280.0);
        assert!(!cfg.display.show_skeleton);
        assert_eq!(cfg.display.fps, 60);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[field]\nparticles = 10\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::ConfigParse { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn cli_overrides_file() {
        let file = write_config("[field]\nparticle_count = 250\n");
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            particles: Some(50),
            width: Some(640),
            height: Some(360),
            no_skeleton: true,
            ..Cli::default()
        };
        let cfg = AppConfig::resolve(&cli).unwrap();
        assert_eq!(cfg.field.particle_count, 50);
        assert_eq!(cfg.window_size(), (640, 360));
        assert!(!cfg.display.show_skeleton);
        assert!((cfg.hand_size_px() - 72.0).abs() < 1e-3);
    }

    #[test]
    fn invalid_values_surface_as_errors() {
        let cli = Cli { particles: Some(0), ..Cli::default() };
        assert!(matches!(AppConfig::resolve(&cli), Err(AppError::Field(_))));

        let mut cfg = AppConfig::default();
        cfg.display.trail_fade = 1.5;
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn fractional_frame_size_is_rejected() {
        let file = write_config("[field]\nwidth = 1280.4\n");
        let cfg = AppConfig::load(file.path()).unwrap();
        assert!(matches!(cfg.validate(), Err(AppError::Config(_))));

        let cli = Cli { config: Some(file.path().to_path_buf()), width: Some(1280), ..Cli::default() };
        let cfg = AppConfig::resolve(&cli).unwrap();
        assert_eq!(cfg.window_size(), (1280, 720));
    }

    #[test]
    fn unreachable_fps_warns() {
        use tracing_subscriber::prelude::*;

        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("config.log");
        let file = std::fs::File::create(&log_path).unwrap();
        let subscriber = tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false));

        let mut cfg = AppConfig::default();
        cfg.display.fps = 500;
        tracing::subscriber::with_default(subscriber, || {
            assert!(cfg.validate().is_ok());
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("WARN"));
        assert!(content.contains("frame rate above 240"));
    }

    #[test]
    fn frame_interval_follows_fps() {
        let mut cfg = AppConfig::default();
        cfg.display.fps = 30;
        let ms = cfg.frame_interval().as_secs_f64() * 1000.0;
        assert!((ms - 33.333).abs() < 0.01, "interval {} ms", ms);
    }
}
