//! Configuration loading and layering.
//!
//! Priority: CLI args > environment variables > config file > defaults.
//! The config file is `fardel.config.json` in the working directory unless
//! an explicit path is given; environment variables use the `FARDEL_`
//! prefix (`FARDEL_OUT_DIR`, `FARDEL_LINKING`, ...).

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format as _, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use fardel_bundler::BundleOptions;

use crate::cli::{BuildArgs, CheckArgs, Linking};
use crate::error::{ConfigError, Result};

/// Resolved build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FardelConfig {
    /// Entry module path.
    pub entry: Option<String>,
    /// Output directory.
    pub out_dir: PathBuf,
    /// Artifact file name.
    pub file_name: String,
    /// Linking policy.
    pub linking: Linking,
}

impl Default for FardelConfig {
    fn default() -> Self {
        Self {
            entry: None,
            out_dir: PathBuf::from("dist"),
            file_name: "bundle.js".to_string(),
            linking: Linking::PerImport,
        }
    }
}

impl FardelConfig {
    /// Load configuration from defaults, config file, and environment.
    ///
    /// CLI arguments are applied afterwards via [`FardelConfig::apply_build_args`]
    /// or [`FardelConfig::apply_check_args`], so they win over every other
    /// source.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = config_path.map(Path::to_path_buf).or_else(|| {
            let default_path = Path::new("fardel.config.json");
            default_path.exists().then(|| default_path.to_path_buf())
        });
        if let Some(path) = config_file {
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(Env::prefixed("FARDEL_"));

        figment.extract().map_err(|e| {
            ConfigError::Invalid {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Overlay `fardel build` arguments.
    pub fn apply_build_args(&mut self, args: &BuildArgs) {
        if let Some(entry) = &args.entry {
            self.entry = Some(entry.clone());
        }
        if let Some(out_dir) = &args.out_dir {
            self.out_dir = out_dir.clone();
        }
        if let Some(file_name) = &args.file_name {
            self.file_name = file_name.clone();
        }
        if let Some(linking) = args.linking {
            self.linking = linking;
        }
    }

    /// Overlay `fardel check` arguments.
    pub fn apply_check_args(&mut self, args: &CheckArgs) {
        if let Some(entry) = &args.entry {
            self.entry = Some(entry.clone());
        }
        if let Some(linking) = args.linking {
            self.linking = linking;
        }
    }

    /// The configured entry, or the error telling the user to provide one.
    pub fn require_entry(&self) -> Result<&str> {
        self.entry.as_deref().ok_or_else(|| {
            ConfigError::MissingEntry.into()
        })
    }

    /// Translate into bundler options.
    pub fn bundle_options(&self, entry: &str) -> BundleOptions {
        BundleOptions::new(entry)
            .out_dir(&self.out_dir)
            .file_name(&self.file_name)
            .mode(self.linking.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = FardelConfig::default();
        assert_eq!(config.out_dir, PathBuf::from("dist"));
        assert_eq!(config.file_name, "bundle.js");
        assert_eq!(config.linking, Linking::PerImport);
        assert!(config.entry.is_none());
    }

    #[test]
    fn build_args_override_everything() {
        let mut config = FardelConfig::default();
        config.entry = Some("from-config.js".to_string());

        let args = BuildArgs {
            entry: Some("from-cli.js".to_string()),
            out_dir: Some(PathBuf::from("out")),
            file_name: None,
            linking: Some(Linking::Shared),
            config: None,
        };
        config.apply_build_args(&args);

        assert_eq!(config.entry.as_deref(), Some("from-cli.js"));
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(config.file_name, "bundle.js");
        assert_eq!(config.linking, Linking::Shared);
    }

    #[test]
    fn missing_entry_is_reported() {
        let config = FardelConfig::default();
        assert!(config.require_entry().is_err());
    }

    #[test]
    fn linking_round_trips_through_serde() {
        let json = serde_json::to_string(&Linking::PerImport).unwrap();
        assert_eq!(json, "\"per-import\"");
        let back: Linking = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Linking::PerImport);
    }
}
