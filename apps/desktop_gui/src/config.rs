use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use clap::Parser;
use client_core::DEFAULT_DATASET_URL;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "directory.toml";

#[derive(Parser, Debug, Default)]
#[command(name = "practitioner-directory", about = "Browse and filter the practitioner directory")]
pub struct CliArgs {
    /// Listing to load instead of the configured one.
    #[arg(long)]
    pub dataset_url: Option<String>,
    /// Path to a TOML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Show initials instead of downloading practitioner photos.
    #[arg(long)]
    pub no_photos: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub dataset_url: Option<String>,
    pub photos: Option<bool>,
    pub window_width: Option<f32>,
    pub window_height: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub dataset_url: String,
    pub photos_enabled: bool,
    pub window_size: [f32; 2],
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            photos_enabled: true,
            window_size: [1200.0, 800.0],
        }
    }
}

impl StartupConfig {
    /// Defaults, then config file, then environment, then command line.
    pub fn load(args: &CliArgs) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_file_path(args.config.as_deref()) {
            let file_config = read_file_config(&path)?;
            tracing::info!(path = %path.display(), "loaded directory config file");
            config.apply_file(file_config);
        }
        config.apply_env(|name| std::env::var(name).ok());
        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(url) = file.dataset_url {
            self.dataset_url = url;
        }
        if let Some(photos) = file.photos {
            self.photos_enabled = photos;
        }
        if let Some(width) = file.window_width {
            self.window_size[0] = width.clamp(640.0, 3840.0);
        }
        if let Some(height) = file.window_height {
            self.window_size[1] = height.clamp(480.0, 2160.0);
        }
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for name in ["DIRECTORY_DATASET_URL", "APP__DATASET_URL"] {
            if let Some(url) = lookup(name).filter(|v| !v.trim().is_empty()) {
                self.dataset_url = url;
            }
        }
    }

    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(url) = &args.dataset_url {
            self.dataset_url = url.clone();
        }
        if args.no_photos {
            self.photos_enabled = false;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let parsed = url::Url::parse(self.dataset_url.trim())
            .with_context(|| format!("invalid dataset url '{}'", self.dataset_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "dataset url '{}' must use http or https, got '{}'",
                self.dataset_url,
                parsed.scheme()
            );
        }
        Ok(())
    }
}

fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("practitioner_directory").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    #[test]
    fn defaults_point_at_the_public_listing() {
        let config = StartupConfig::default();
        assert_eq!(config.dataset_url, DEFAULT_DATASET_URL);
        assert!(config.photos_enabled);
        config.validate().expect("default url is valid");
    }

    #[test]
    fn later_layers_override_earlier_ones() {
        let mut config = StartupConfig::default();
        config.apply_file(FileConfig {
            dataset_url: Some("https://file.example/doctors.json".into()),
            photos: Some(false),
            window_width: Some(10_000.0),
            window_height: None,
        });
        assert_eq!(config.dataset_url, "https://file.example/doctors.json");
        assert!(!config.photos_enabled);
        assert_eq!(config.window_size, [3840.0, 800.0]);

        config.apply_env(|name| {
            (name == "APP__DATASET_URL").then(|| "https://env.example/doctors.json".to_string())
        });
        assert_eq!(config.dataset_url, "https://env.example/doctors.json");

        config.apply_args(&CliArgs {
            dataset_url: Some("http://127.0.0.1:9000/doctors.json".into()),
            config: None,
            no_photos: false,
        });
        assert_eq!(config.dataset_url, "http://127.0.0.1:9000/doctors.json");
        config.validate().expect("cli url is valid");
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut config = StartupConfig::default();
        config.apply_env(|_| Some("   ".to_string()));
        assert_eq!(config.dataset_url, DEFAULT_DATASET_URL);
    }

    #[test]
    fn rejects_non_http_dataset_urls() {
        let mut config = StartupConfig::default();
        config.dataset_url = "ftp://example.test/doctors.json".into();
        assert!(config.validate().is_err());
        config.dataset_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_config_file_is_read() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let temp_root = std::env::temp_dir().join(format!("practitioner_directory_cfg_{suffix}"));
        fs::create_dir_all(&temp_root).expect("temp root");
        let path = temp_root.join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "dataset_url = \"https://cfg.example/list.json\"\nphotos = false\n",
        )
        .expect("write config");

        let config = StartupConfig::load(&CliArgs {
            dataset_url: None,
            config: Some(path),
            no_photos: false,
        })
        .expect("load config");
        assert!(!config.photos_enabled);

        fs::remove_dir_all(temp_root).expect("cleanup");
    }

    #[test]
    fn unreadable_config_file_is_an_error() {
        let err = StartupConfig::load(&CliArgs {
            dataset_url: None,
            config: Some(PathBuf::from("/definitely/not/here/directory.toml")),
            no_photos: false,
        })
        .expect_err("missing file");
        assert!(err.to_string().contains("failed to read config file"));
    }
}
