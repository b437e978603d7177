use anyhow::{Context, Result, anyhow, bail};
use derivative::Derivative;
use derive_setters::Setters;
use log::debug;
use once_cell::sync::Lazy;
use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

static CONFIG: Lazy<Mutex<Config>> = Lazy::new(|| Mutex::new(Config::default()));

#[derive(Serialize, Deserialize, Default, Debug, Clone, Setters)]
#[setters(prefix = "with_")]
pub struct Config {
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(skip)]
    pub is_first_run: bool,

    #[serde(default)]
    pub image: Image,

    #[serde(default)]
    pub display: Display,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct Image {
    #[derivative(Default(value = "PathBuf::from(\"img/input.png\")"))]
    pub input: PathBuf,

    #[derivative(Default(value = "PathBuf::from(\"filtered.png\")"))]
    pub output: PathBuf,

    // false writes the output only once the input stream ends
    #[serde(default = "true_func")]
    #[derivative(Default(value = "true"))]
    pub save_every_change: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct Display {
    #[serde(default = "true_func")]
    #[derivative(Default(value = "true"))]
    pub echo_labels: bool,
}

impl Config {
    /// Resolve the config path and load the file, creating it with defaults
    /// when missing.
    pub fn init(&mut self, config_path: Option<&Path>) -> Result<()> {
        self.config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => {
                let app_dirs = AppDirs::new(Some(APP_NAME), true)
                    .ok_or_else(|| anyhow!("no config directory for {APP_NAME}"))?;
                app_dirs.config_dir.join(format!("{APP_NAME}.toml"))
            }
        };

        if let Some(dir) = self.config_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        self.load().with_context(|| "load config file failed")?;
        debug!("{:?}", self);
        Ok(())
    }

    fn load(&mut self) -> Result<()> {
        let parsed = fs::read_to_string(&self.config_path)
            .ok()
            .map(|text| toml::from_str::<Config>(&text));

        match parsed {
            Some(Ok(mut c)) => {
                c.config_path = self.config_path.clone();
                c.is_first_run = false;
                *self = c;
                Ok(())
            }
            Some(Err(e)) => {
                log::warn!("invalid config {}: {e}", self.config_path.display());
                self.is_first_run = true;
                _ = fs::copy(
                    &self.config_path,
                    format!("{}.bak", self.config_path.display()),
                );
                self.save()
            }
            None => {
                self.is_first_run = true;
                self.save()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        match toml::to_string_pretty(self) {
            Ok(text) => Ok(fs::write(&self.config_path, text)
                .with_context(|| "save config failed".to_string())?),
            Err(e) => bail!(format!("convert config to toml format failed. {e:?}")),
        }
    }
}

fn true_func() -> bool {
    true
}

/// Load the global configuration. Called once at startup.
pub fn init(config_path: Option<&Path>) -> Result<()> {
    CONFIG
        .lock()
        .map_err(|_| anyhow!("config lock poisoned"))?
        .init(config_path)
}

pub fn all() -> Config {
    CONFIG.lock().unwrap_or_else(|e| e.into_inner()).clone()
}
