//! Configuration of one platform
use crate::flat_config::{self, LoadError};
use crate::layered_config::LayeredConfig;
use crate::source::{PlatformFile, PlatformSource};
use indexmap::IndexSet;
use std::sync::Arc;

/// A platform's definitions layered on top of the manager's runtime configuration
///
/// Read-only once loaded. Resolutions work on a [LayeredConfig::snapshot] of it.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    id: String,
    config: LayeredConfig,
}

impl PlatformConfig {
    /// Load `platform.txt`, `boards.txt` (under `boards`) and `programmers.txt` (under
    /// `programmers`)
    ///
    /// Every file is optional.
    pub fn load(
        manager_config: Arc<LayeredConfig>,
        platform_id: &str,
        source: &dyn PlatformSource,
    ) -> Result<Self, LoadError> {
        let mut config = LayeredConfig::with_base(manager_config);

        if let Some(path) = source.platform_path(platform_id) {
            config.set("runtime.platform.path", path);
        }

        for file in PlatformFile::ALL {
            let Some(text) = source.read(platform_id, file)? else {
                tracing::debug!(platform = platform_id, %file, "no such file, skipped");
                continue;
            };

            let entries = flat_config::parse(&text, file.prefix()).map_err(|source| {
                LoadError::Parse {
                    origin: format!("{file} of platform {platform_id}"),
                    source,
                }
            })?;

            tracing::debug!(platform = platform_id, %file, entries = entries.len(), "loaded");
            config.merge(entries);
        }

        config.set("target_platform", platform_id);

        Ok(Self {
            id: platform_id.to_string(),
            config,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &LayeredConfig {
        &self.config
    }

    pub fn boards(&self) -> IndexSet<String> {
        self.config.get_children("boards")
    }

    pub fn programmers(&self) -> IndexSet<String> {
        self.config.get_children("programmers")
    }

    pub fn tools(&self) -> IndexSet<String> {
        self.config.get_children("tools")
    }

    /// Cpus selectable for `board`
    ///
    /// Empty when the board has a single cpu and offers no selection.
    pub fn board_supported_cpus(&self, board: &str) -> IndexSet<String> {
        self.config
            .get_children(&format!("boards.{board}.menu.cpu"))
    }
}
