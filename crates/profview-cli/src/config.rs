// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use profview_app::{FieldSchema, ProfileError, RawFieldSpec, SectionDef};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_NAME: &str = "profview.log";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub sections: Vec<SectionDef>,
    #[serde(default)]
    pub fields: Vec<RawFieldSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            ui: Ui::default(),
            log: Log::default(),
            sections: Vec::new(),
            fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    pub csv_path: Option<String>,
    pub photo_root: Option<String>,
    pub max_photo_size: Option<i64>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            csv_path: None,
            photo_root: None,
            max_photo_size: Some(profview_data::MAX_PHOTO_SIZE as i64),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub show_roster: Option<bool>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            show_roster: Some(true),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub path: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("PROFVIEW_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set PROFVIEW_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(profview_data::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [data], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(csv_path) = &self.data.csv_path {
            profview_data::validate_data_path(csv_path)?;
        }

        if let Some(max_size) = self.data.max_photo_size
            && max_size <= 0
        {
            bail!(
                "data.max_photo_size in {} must be positive, got {}",
                path.display(),
                max_size
            );
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!("log.level {level:?} in {} is not a valid filter", path.display())
            })?;
        }

        Ok(())
    }

    /// Field layout for this run; the built-in faculty layout unless overridden.
    pub fn schema(&self) -> Result<FieldSchema, ProfileError> {
        if self.fields.is_empty() {
            if !self.sections.is_empty() {
                return Err(ProfileError::configuration(
                    "[[sections]] declared without any [[fields]]",
                ));
            }
            return Ok(FieldSchema::faculty());
        }
        FieldSchema::from_raw(self.sections.clone(), self.fields.clone())
    }

    pub fn data_path(&self) -> PathBuf {
        match &self.data.csv_path {
            Some(path) => PathBuf::from(path),
            None => profview_data::default_data_path(),
        }
    }

    pub fn photo_root(&self) -> Option<PathBuf> {
        self.data.photo_root.as_ref().map(PathBuf::from)
    }

    pub fn max_photo_size(&self) -> u64 {
        self.data
            .max_photo_size
            .and_then(|size| u64::try_from(size).ok())
            .unwrap_or(profview_data::MAX_PHOTO_SIZE)
    }

    pub fn show_roster(&self) -> bool {
        self.ui.show_roster.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.log.path {
            return Ok(PathBuf::from(path));
        }
        let data_root = dirs::data_local_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [log].path to a writable file")
        })?;
        Ok(data_root.join(profview_data::APP_NAME).join(LOG_FILE_NAME))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# profview config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Optional. Default is $PROFVIEW_DATA_PATH or ./{}\n# csv_path = \"/absolute/path/to/profiles.csv\"\n# Optional. Relative photo paths resolve against this directory (default: the CSV's directory)\n# photo_root = \"/absolute/path/to/photos\"\nmax_photo_size = {}\n\n[ui]\nshow_roster = true\n\n[log]\nlevel = \"{}\"\n# path = \"/absolute/path/to/profview.log\"\n\n# Optional. Replaces the built-in faculty layout.\n# [[sections]]\n# key = \"contact\"\n# title = \"Contact Info\"\n#\n# [[fields]]\n# field = \"office_location\"\n# label = \"Office\"\n# mode = \"single-line\"\n# section = \"contact\"\n# collapsible = false\n",
            path.display(),
            profview_data::DEFAULT_DATA_FILE,
            profview_data::MAX_PHOTO_SIZE,
            DEFAULT_LOG_LEVEL,
        )
    }
}
