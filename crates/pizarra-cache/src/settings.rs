//! Cache settings loaded from files and environment variables.

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use pizarra_core::{PizarraError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Prefijo de las variables de entorno (`PIZARRA_CACHE_STALE_TIME_SECONDS`).
pub const ENV_PREFIX: &str = "PIZARRA_CACHE";

/// Stale time por defecto: 5 minutos.
pub const DEFAULT_STALE_TIME_SECONDS: u64 = 300;

/// Configuracion del cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Edad (en segundos) a partir de la cual una entry se considera stale
    /// (default: 300 = 5 minutos)
    pub stale_time_seconds: u64,
    /// Emitir metricas al facade de `metrics` (default: true)
    pub metrics_enabled: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stale_time_seconds: DEFAULT_STALE_TIME_SECONDS,
            metrics_enabled: true,
        }
    }
}

impl CacheSettings {
    /// Retorna el stale time como `Duration`.
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_seconds)
    }

    /// Carga la configuracion desde un archivo opcional y las variables de
    /// entorno con prefijo `PIZARRA_CACHE_`. El entorno tiene prioridad.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pizarra_cache::CacheSettings;
    /// use std::path::Path;
    ///
    /// # fn main() -> pizarra_core::Result<()> {
    /// let settings = CacheSettings::load(Some(Path::new("pizarra.toml")))?;
    /// println!("stale after {:?}", settings.stale_time());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Parsea la configuracion desde un string TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()
            .map_err(|e| PizarraError::settings_with_cause("<inline toml>", e))?;

        Self::from_config(config, "<inline toml>")
    }

    fn load_from(path: Option<&Path>, env: Environment) -> Result<Self> {
        let source_name = match path {
            Some(path) => path.display().to_string(),
            None => ENV_PREFIX.to_string(),
        };

        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(env.try_parsing(true))
            .build()
            .map_err(|e| PizarraError::settings_with_cause(source_name.as_str(), e))?;

        Self::from_config(config, &source_name)
    }

    fn from_config(config: Config, source_name: &str) -> Result<Self> {
        let settings: Self = config
            .try_deserialize()
            .map_err(|e| PizarraError::settings_with_cause(source_name, e))?;

        settings.validate()?;

        debug!(
            source = %source_name,
            stale_time_seconds = settings.stale_time_seconds,
            metrics_enabled = settings.metrics_enabled,
            "Cache settings loaded"
        );

        Ok(settings)
    }

    /// Valida los valores cargados.
    pub fn validate(&self) -> Result<()> {
        if self.stale_time_seconds == 0 {
            return Err(PizarraError::invalid_setting(
                "stale_time_seconds",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
