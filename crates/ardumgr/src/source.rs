//! where platform definition files come from
//!
//! A platform is described by up to three files. [PlatformSource] hands out their text by platform
//! id; how the files are found is up to the implementation.
//! - [DirectorySource] reads `<root>/<platform id>/<file name>` from disk
//! - [MemorySource] holds the text in memory
use crate::flat_config::{self, LoadError};
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Definition files of a platform, in load order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFile {
    Platform,
    Boards,
    Programmers,
}

impl PlatformFile {
    pub const ALL: [PlatformFile; 3] = [
        PlatformFile::Platform,
        PlatformFile::Boards,
        PlatformFile::Programmers,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            PlatformFile::Platform => "platform.txt",
            PlatformFile::Boards => "boards.txt",
            PlatformFile::Programmers => "programmers.txt",
        }
    }

    /// Namespace the file's keys are loaded under
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            PlatformFile::Platform => None,
            PlatformFile::Boards => Some("boards"),
            PlatformFile::Programmers => Some("programmers"),
        }
    }
}

impl std::fmt::Display for PlatformFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

pub trait PlatformSource {
    /// Ids of all known platforms
    fn platform_ids(&self) -> Result<Vec<String>, LoadError>;

    /// Directory of a platform, if it has one
    fn platform_path(&self, _platform_id: &str) -> Option<PathBuf> {
        None
    }

    /// Text of one definition file, `None` when the platform does not have it
    fn read(&self, platform_id: &str, file: PlatformFile) -> Result<Option<String>, LoadError>;
}

/// Platforms as sub-directories of a root directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Platforms of an installation: `<home>/hardware/arduino/<platform id>`
    pub fn for_installation(home: &Path) -> Self {
        Self::new(home.join("hardware").join("arduino"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PlatformSource for DirectorySource {
    fn platform_ids(&self) -> Result<Vec<String>, LoadError> {
        let io_error = |source: std::io::Error| LoadError::Io {
            path: self.root.clone(),
            source,
        };

        let mut ids = vec![];
        for dir_entry in std::fs::read_dir(&self.root).map_err(io_error)? {
            let dir_entry = dir_entry.map_err(io_error)?;
            if !dir_entry.file_type().map_err(io_error)?.is_dir() {
                continue;
            }

            ids.push(dir_entry.file_name().to_string_lossy().into_owned());
        }

        ids.sort();
        Ok(ids)
    }

    fn platform_path(&self, platform_id: &str) -> Option<PathBuf> {
        Some(self.root.join(platform_id))
    }

    fn read(&self, platform_id: &str, file: PlatformFile) -> Result<Option<String>, LoadError> {
        flat_config::read_optional(&self.root.join(platform_id).join(file.file_name()))
    }
}

/// Platforms held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    platforms: IndexMap<String, IndexMap<PlatformFile, String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a platform without any files
    pub fn with_platform(mut self, platform_id: impl Into<String>) -> Self {
        self.platforms.entry(platform_id.into()).or_default();
        self
    }

    pub fn with_file(
        mut self,
        platform_id: impl Into<String>,
        file: PlatformFile,
        text: impl Into<String>,
    ) -> Self {
        self.platforms
            .entry(platform_id.into())
            .or_default()
            .insert(file, text.into());
        self
    }
}

impl PlatformSource for MemorySource {
    fn platform_ids(&self) -> Result<Vec<String>, LoadError> {
        Ok(self.platforms.keys().cloned().collect())
    }

    fn read(&self, platform_id: &str, file: PlatformFile) -> Result<Option<String>, LoadError> {
        Ok(self
            .platforms
            .get(platform_id)
            .and_then(|files| files.get(&file))
            .cloned())
    }
}
