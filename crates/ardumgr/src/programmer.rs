//! Resolving the upload parameters of a board
//!
//! [Programmer::resolve] validates a [Selection] against the platform and merges, in this order,
//! into a snapshot of the platform configuration:
//! 1. the selection itself (`programmer`, `board`, `custom_cpu`, `serial.port`)
//! 2. the board subtree `boards.<board>.*`
//! 3. the cpu subtree `boards.<board>.menu.cpu.<cpu>.*`
//! 4. the tool subtree `tools.<upload.tool>.*` with `.params.` collapsed
//!
//! Later steps overwrite earlier ones. Nothing is returned unless every step succeeds.
use crate::alias::Alias;
use crate::layered_config::{LayeredConfig, LookupError};
use crate::platform::PlatformConfig;
use indexmap::IndexMap;

/// What to upload with and to
#[derive(derive_new::new, Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Programmer id as declared in `programmers.txt`
    #[new(into)]
    pub programmer: String,
    /// Board id as declared in `boards.txt`
    #[new(into)]
    pub board: String,
    /// Required when the board offers a cpu menu, forbidden otherwise
    #[new(default)]
    pub cpu: Option<String>,
    #[new(default)]
    pub serial_port: Option<String>,
}

impl Selection {
    pub fn with_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = Some(cpu.into());
        self
    }

    pub fn with_serial_port(mut self, serial_port: impl Into<String>) -> Self {
        self.serial_port = Some(serial_port.into());
        self
    }
}

/// Fully resolved parameters for one upload
#[derive(Debug, Clone)]
pub struct Programmer {
    selection: Selection,
    config: LayeredConfig,
}

impl Programmer {
    #[tracing::instrument(level = "debug", skip(platform), fields(platform = platform.id()))]
    pub fn resolve(platform: &PlatformConfig, selection: Selection) -> Result<Self, ResolveError> {
        let board = selection.board.as_str();
        validate_cpu(platform, board, selection.cpu.as_deref())?;

        let mut config = platform.config().snapshot();

        config.set(Alias::Programmer.key(), selection.programmer.as_str());
        config.set(Alias::Board.key(), board);
        if let Some(cpu) = &selection.cpu {
            config.set(Alias::Cpu.key(), cpu);
        }
        if let Some(serial_port) = selection.serial_port.as_deref().filter(|p| !p.is_empty()) {
            config.set(Alias::SerialPort.key(), serial_port);
        }

        let board_subtree = config.get_subtree(&format!("boards.{board}"));
        tracing::trace!(entries = board_subtree.len(), "merge board");
        config.merge(board_subtree);

        if let Some(cpu) = &selection.cpu {
            let cpu_subtree = config.get_subtree(&format!("boards.{board}.menu.cpu.{cpu}"));
            tracing::trace!(entries = cpu_subtree.len(), "merge cpu");
            config.merge(cpu_subtree);
        }

        let upload_tool = config.get("upload.tool")?.to_string();
        let tool_subtree = config.get_tool_subtree(&upload_tool);
        tracing::trace!(tool = %upload_tool, entries = tool_subtree.len(), "merge tool");
        config.merge(tool_subtree);

        Ok(Self { selection, config })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &LayeredConfig {
        &self.config
    }

    /// All parameters as one flat mapping
    pub fn parameters(&self) -> IndexMap<String, String> {
        self.config.to_flat()
    }

    /// The upload command line with all placeholders resolved
    pub fn upload_pattern(&self) -> Result<String, LookupError> {
        self.config.get_expanded("upload.pattern")
    }
}

fn validate_cpu(
    platform: &PlatformConfig,
    board: &str,
    cpu: Option<&str>,
) -> Result<(), ResolveError> {
    let available_cpus = platform.board_supported_cpus(board);

    match cpu {
        None if !available_cpus.is_empty() => Err(ResolveError::CpuRequired {
            board: board.to_string(),
            choices: available_cpus.into_iter().collect(),
        }),
        Some(_) if available_cpus.is_empty() => Err(ResolveError::CpuNotApplicable {
            board: board.to_string(),
        }),
        Some(cpu) if !available_cpus.contains(cpu) => Err(ResolveError::UnsupportedCpu {
            board: board.to_string(),
            cpu: cpu.to_string(),
        }),
        _ => Ok(()),
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Board {board} requires a cpu, choose one of: {}", choices.join(", "))]
    CpuRequired { board: String, choices: Vec<String> },
    #[error("Board {board} does not support cpu {cpu}")]
    UnsupportedCpu { board: String, cpu: String },
    #[error("Board {board} has a single cpu, a cpu can not be selected")]
    CpuNotApplicable { board: String },
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
