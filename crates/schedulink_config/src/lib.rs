//! Configuration for Schedulink.
//!
//! Values are layered in this order, later sources winning:
//!
//! 1. built-in defaults ([`AppConfig::default`])
//! 2. `config/default.{toml,yaml,json}` (optional)
//! 3. `config/{RUN_ENV}.{toml,yaml,json}` (optional, `RUN_ENV` defaults to `debug`)
//! 4. environment variables prefixed with `SCHEDULINK`, using `__` as the
//!    nesting separator, e.g. `SCHEDULINK__SERVER__PORT=9000`
//!
//! A `.env` file is read once before the environment is consulted.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod models;
pub use models::*;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "SCHEDULINK";

/// Separator between nested keys in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Loads the application configuration from files and the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env)
}

/// Loads configuration from an explicit directory and run environment.
///
/// Split out of [`load_config`] so callers (and tests) can point at a
/// directory other than `./config`.
pub fn load_config_from(config_dir: &std::path::Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!("config: default_path: {}", default_path.display());
    debug!("config: env_path: {}", env_path.display());

    let defaults = AppConfig::default();
    let builder = Config::builder()
        .set_default("server.host", defaults.server.host)?
        .set_default("server.port", i64::from(defaults.server.port))?
        .set_default("use_database", defaults.use_database)?
        .set_default("cors_allow_any", defaults.cors_allow_any)?
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures the dotenv file is loaded into the process environment exactly once.
///
/// The file named by `DOTENV_OVERRIDE` is used when set, otherwise `.env`.
/// A missing file is not an error. Returns the path that was consulted.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
