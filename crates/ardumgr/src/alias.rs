//! `ardumgr.*` preference keys
//!
//! The recipes of an installation refer to keys like `runtime.ide.path` or `serial.port`.
//! Users and callers set the matching `ardumgr.*` preference instead, and assigning one writes the
//! key the recipes expect next to it.
//!
//! | alias                 | derived key        | derived value              |
//! |-----------------------|--------------------|----------------------------|
//! | `ardumgr.home_path`   | `runtime.ide.path` | value                      |
//! | `ardumgr.package`     | `target_package`   | value                      |
//! | `ardumgr.programmer`  | `programmer`       | `arduino:<value>`          |
//! | `ardumgr.board`       | `board`            | value                      |
//! | `ardumgr.board`       | `custom_cpu`       | `<value>_<ardumgr.cpu>`    |
//! | `ardumgr.cpu`         | `custom_cpu`       | `<ardumgr.board>_<value>`  |
//! | `ardumgr.serial_port` | `serial.port`      | value                      |
//!
//! `custom_cpu` is only written once both board and cpu are known, whichever comes last.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alias {
    HomePath,
    Package,
    Programmer,
    Board,
    Cpu,
    SerialPort,
}

impl Alias {
    pub const ALL: [Alias; 6] = [
        Alias::HomePath,
        Alias::Package,
        Alias::Programmer,
        Alias::Board,
        Alias::Cpu,
        Alias::SerialPort,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Alias::HomePath => "ardumgr.home_path",
            Alias::Package => "ardumgr.package",
            Alias::Programmer => "ardumgr.programmer",
            Alias::Board => "ardumgr.board",
            Alias::Cpu => "ardumgr.cpu",
            Alias::SerialPort => "ardumgr.serial_port",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|alias| alias.key() == key)
    }

    /// Keys to write when this alias is assigned `value`
    ///
    /// `lookup` resolves keys already present in the store.
    pub fn derive<'a>(
        self,
        value: &str,
        lookup: impl Fn(&str) -> Option<&'a str>,
    ) -> Vec<(&'static str, String)> {
        match self {
            Alias::HomePath => vec![("runtime.ide.path", value.to_string())],
            Alias::Package => vec![("target_package", value.to_string())],
            Alias::Programmer => vec![("programmer", format!("arduino:{value}"))],
            Alias::Board => {
                let mut derived = vec![("board", value.to_string())];
                if let Some(cpu) = lookup(Alias::Cpu.key()) {
                    derived.push(("custom_cpu", format!("{value}_{cpu}")));
                }
                derived
            }
            Alias::Cpu => lookup(Alias::Board.key())
                .map(|board| ("custom_cpu", format!("{board}_{value}")))
                .into_iter()
                .collect(),
            Alias::SerialPort => vec![("serial.port", value.to_string())],
        }
    }
}

impl std::fmt::Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
