//! ardumgr cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arduino installation directory
    #[clap(long = "home", env = "ARDUMGR_HOME", global(true))]
    pub home: Option<PathBuf>,

    /// Operating system used for os specific keys
    ///
    /// Defaults to the os ardumgr runs on.
    #[clap(long = "os", global(true))]
    pub os: Option<ardumgr::manager::RuntimeOs>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List platforms of the installation
    Platforms,

    /// List boards of a platform
    Boards(PlatformArgs),

    /// List programmers of a platform
    Programmers(PlatformArgs),

    /// List tools of a platform
    Tools(PlatformArgs),

    /// List selectable cpus of a board
    Cpus(CpusCommand),

    /// Print the resolved upload parameters
    Resolve(ResolveCommand),

    /// Print the upload command line with all placeholders resolved
    UploadPattern(SelectionArgs),
}

#[derive(Parser, Debug)]
pub struct PlatformArgs {
    /// Platform id, e.g. avr
    #[clap(short = 'p', long = "platform")]
    pub platform: String,
}

#[derive(Parser, Debug)]
pub struct CpusCommand {
    #[clap(flatten)]
    pub platform: PlatformArgs,

    /// Board id, e.g. mega
    #[clap(short = 'b', long = "board")]
    pub board: String,
}

#[derive(Parser, Debug)]
pub struct SelectionArgs {
    #[clap(flatten)]
    pub platform: PlatformArgs,

    /// Board id, e.g. mega
    #[clap(short = 'b', long = "board")]
    pub board: String,

    /// Programmer id, e.g. avrispmkii
    #[clap(short = 'P', long = "programmer")]
    pub programmer: String,

    /// Cpu id, required for boards with a cpu menu
    #[clap(short = 'c', long = "cpu")]
    pub cpu: Option<String>,

    /// Serial port the board is connected to
    #[clap(short = 's', long = "port")]
    pub serial_port: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ResolveCommand {
    #[clap(flatten)]
    pub selection: SelectionArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
