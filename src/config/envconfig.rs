use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Config structs loaded from `APP_`-prefixed variables, with `__`
/// separating nested sections (`APP_DATABASE__URL`).
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Reads `.env` (the manifest's first, then the working directory's) and
    /// the process environment.
    fn from_env() -> Result<Self> {
        let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_filename(manifest_env).or_else(|_| dotenvy::dotenv());
        Self::load(None)
    }

    /// Same as [`EnvConfig::from_env`] but reads only `vars`.
    fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: config_rs::Map<String, String> = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::load(Some(vars))
    }

    fn load(vars: Option<config_rs::Map<String, String>>) -> Result<Self> {
        let environment = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(vars);

        let cfg: Self = config_rs::Config::builder()
            .add_source(environment)
            .build()
            .context("failed to read config variables")?
            .try_deserialize()
            .context("failed to deserialize config variables")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
