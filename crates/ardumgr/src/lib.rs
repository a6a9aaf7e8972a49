//! # ardumgr - Arduino installation manager
//!
//! Resolves the parameters needed to upload to a board from the definition files of an Arduino
//! installation.
//!
//! ## Introduction for developers
//!
//! Read this to understand how `ardumgr` works internally.
//!
//! ### Definition files
//!
//! Every platform of an installation (`hardware/arduino/<platform>/`) ships up to three files with
//! one `key=value` pair per line:
//!
//! | file              | loaded under  | example key                         |
//! |-------------------|---------------|-------------------------------------|
//! | `platform.txt`    | (no prefix)   | `tools.avrdude.cmd.path`            |
//! | `boards.txt`      | `boards`      | `boards.mega.menu.cpu.atmega2560`   |
//! | `programmers.txt` | `programmers` | `programmers.avrisp.protocol`       |
//!
//! Parsing is done by [flat_config]. Where the files come from is abstracted by
//! [source::PlatformSource].
//!
//! ### Layers
//!
//! All keys live in [layered_config::LayeredConfig]s. A layer reads through to its base layer, so
//! nothing is copied when a platform builds on the runtime configuration:
//!
//! 1. manager: `runtime.os`, `runtime.ide.path`, ... (see [manager::runtime_config])
//! 2. platform: the three files of one platform ([platform::PlatformConfig])
//! 3. programmer: a snapshot of the platform layer with the selection merged in
//!    ([programmer::Programmer])
//!
//! Assigning one of the `ardumgr.*` preferences also assigns the keys the recipes use, see
//! [alias].
//!
//! ### Lookup
//!
//! - [layered_config::LayeredConfig::get]: plain lookup through all layers
//! - [layered_config::LayeredConfig::get_overridden]: prefers `<key>.<runtime.os>`
//! - [layered_config::LayeredConfig::get_expanded]: resolves `{placeholder}`s recursively and
//!   reports loops
//!
//! ### Resolution
//!
//! Given a board (and cpu, if the board has a cpu menu) [programmer::Programmer::resolve] flattens
//! the board, cpu and upload tool subtrees into the top level namespace, e.g.
//!
//! ```text
//! boards.mega.menu.cpu.atmega2560.build.mcu=atmega2560  ->  build.mcu=atmega2560
//! tools.avrdude.upload.params.verbose=-v                ->  upload.verbose=-v
//! ```
//!
//! The result is what an upload tool is invoked with, most notably `upload.pattern`.
pub mod alias;
pub mod flat_config;
pub mod layered_config;
pub mod manager;
pub mod platform;
pub mod programmer;
pub mod source;
pub mod value;
