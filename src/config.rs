use crate::core::get_config_dir;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub launcher: LauncherConfig,
}

/// How the external runtime is started.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Runtime executable that interprets the scripts
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_train_script")]
    pub train_script: String,
    #[serde(default = "default_serve_script")]
    pub serve_script: String,
    /// Environment variable restricting which GPUs the child can see
    #[serde(default = "default_device_env")]
    pub device_env: String,
    /// GPU index the training run is pinned to with `--multi`
    #[serde(default = "default_pinned_device")]
    pub pinned_device: u32,
    /// Working directory for the child (None = inherit)
    #[serde(default)]
    pub workdir: Option<PathBuf>,
}

fn default_program() -> String {
    "th".to_string()
}

fn default_train_script() -> String {
    "script/main.lua".to_string()
}

fn default_serve_script() -> String {
    "script/server.lua".to_string()
}

fn default_device_env() -> String {
    "CUDA_VISIBLE_DEVICES".to_string()
}

fn default_pinned_device() -> u32 {
    4
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            train_script: default_train_script(),
            serve_script: default_serve_script(),
            device_env: default_device_env(),
            pinned_device: default_pinned_device(),
            workdir: None,
        }
    }
}

/// Load configuration. Later layers win: defaults, then
/// `<config_dir>/ganrun/ganrun.toml`, then `config_path`, then `GANRUN_*` variables.
pub fn load_config(config_path: Option<&PathBuf>) -> Result<Config, config::ConfigError> {
    let mut config_vec = vec![];

    // Default config file
    if let Ok(default_config_path) = get_config_dir().map(|d| d.join("ganrun.toml")) {
        if default_config_path.exists() {
            config_vec.push(default_config_path);
        }
    }

    // User-provided config file
    if let Some(config_path) = config_path {
        if config_path.exists() {
            config_vec.push(config_path.clone());
        } else {
            eprintln!("Warning: Config file {config_path:?} not found.");
        }
    }

    let settings = config::Config::builder();
    let settings = config_vec.iter().fold(settings, |s, path| {
        s.add_source(config::File::from(path.as_path()))
    });

    settings
        .add_source(
            config::Environment::with_prefix("GANRUN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
