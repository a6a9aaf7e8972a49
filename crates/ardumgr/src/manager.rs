//! Entry point for an installation
//!
//! The [Manager] owns the runtime configuration every platform is layered on and loads platforms
//! the first time they are asked for.
use crate::alias::Alias;
use crate::flat_config::LoadError;
use crate::layered_config::{LayeredConfig, RUNTIME_OS};
use crate::platform::PlatformConfig;
use crate::programmer::{Programmer, ResolveError, Selection};
use crate::source::{DirectorySource, PlatformSource};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Operating systems os specific keys are suffixed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeOs {
    Linux,
    Windows,
    Macosx,
}

impl RuntimeOs {
    pub const ALL: [RuntimeOs; 3] = [RuntimeOs::Linux, RuntimeOs::Windows, RuntimeOs::Macosx];

    /// The os this binary was built for
    pub fn host() -> Self {
        if cfg!(windows) {
            RuntimeOs::Windows
        } else if cfg!(target_os = "macos") {
            RuntimeOs::Macosx
        } else {
            RuntimeOs::Linux
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeOs::Linux => "linux",
            RuntimeOs::Windows => "windows",
            RuntimeOs::Macosx => "macosx",
        }
    }
}

impl std::fmt::Display for RuntimeOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuntimeOs {
    type Err = UnknownOs;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|os| os.as_str() == s)
            .ok_or_else(|| UnknownOs(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown os {0:?}, expected one of: linux, windows, macosx")]
pub struct UnknownOs(pub String);

/// Runtime configuration of the installation at `home`
///
/// This is the bottom layer of every platform.
pub fn runtime_config(home: &Path, os: RuntimeOs) -> LayeredConfig {
    let mut config = LayeredConfig::new();
    config.set(Alias::HomePath.key(), home);
    config.set(RUNTIME_OS, os.as_str());
    config.set("runtime.hardware.path", home.join("hardware"));
    config
}

#[derive(Debug)]
pub struct Manager<S = DirectorySource> {
    config: Arc<LayeredConfig>,
    source: S,
    platforms: IndexMap<String, PlatformConfig>,
}

impl Manager<DirectorySource> {
    /// Manager for the installation at `home`, platforms are read from `<home>/hardware/arduino`
    pub fn open(home: impl Into<PathBuf>, os: RuntimeOs) -> Self {
        let home = home.into();
        tracing::debug!(home=%home.display(), %os, "opening installation");

        let source = DirectorySource::for_installation(&home);
        Self::new(runtime_config(&home, os), source)
    }
}

impl<S: PlatformSource> Manager<S> {
    pub fn new(config: LayeredConfig, source: S) -> Self {
        Self {
            config: Arc::new(config),
            source,
            platforms: Default::default(),
        }
    }

    pub fn config(&self) -> &LayeredConfig {
        &self.config
    }

    pub fn platform_ids(&self) -> Result<Vec<String>, LoadError> {
        self.source.platform_ids()
    }

    /// Platform `id`, loaded on first access
    pub fn platform(&mut self, id: &str) -> Result<&PlatformConfig, ManagerError> {
        if !self.platforms.contains_key(id) {
            let available = self.source.platform_ids()?;
            if !available.iter().any(|known| known == id) {
                return Err(ManagerError::UnknownPlatform {
                    id: id.to_string(),
                    available,
                });
            }

            tracing::debug!(platform = id, "loading platform");
            let platform = PlatformConfig::load(Arc::clone(&self.config), id, &self.source)?;
            self.platforms.insert(id.to_string(), platform);
        }

        Ok(&self.platforms[id])
    }

    pub fn resolve(
        &mut self,
        platform_id: &str,
        selection: Selection,
    ) -> Result<Programmer, ManagerError> {
        let platform = self.platform(platform_id)?;
        Ok(Programmer::resolve(platform, selection)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ManagerError {
    #[error("Unknown platform {id}, available: {}", available.join(", "))]
    UnknownPlatform { id: String, available: Vec<String> },
    #[error("Unable to load platform")]
    Load(#[from] LoadError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
