//! Layered key/value store
//!
//! A [LayeredConfig] holds its own entries and optionally reads through to a base layer. A key of
//! this layer always shadows the same key of any layer below it. Layers never write to their base:
//! the base is shared read-only via [Arc], so a chain is built bottom-up and can not form a cycle.
//!
//! ```text
//! programmer layer   board=mega, upload.speed=115200, ...
//!        |
//! platform layer     boards.mega.name=..., tools.avrdude.path=..., ...
//!        |
//! manager layer      runtime.os=linux, runtime.ide.path=/opt/arduino, ...
//! ```
use crate::alias::Alias;
use crate::value::Value;
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// Key naming the host operating system, see [LayeredConfig::get_overridden]
pub const RUNTIME_OS: &str = "runtime.os";

/// Artifact of `boards.txt` (`menu.cpu=Processor`), never a board
const BOARDS_MENU_CPU: &str = "boards.menu.cpu";

#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    entries: IndexMap<String, String>,
    base: Option<Arc<LayeredConfig>>,
}

impl LayeredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// New empty layer reading through to `base`
    pub fn with_base(base: Arc<LayeredConfig>) -> Self {
        Self {
            entries: Default::default(),
            base: Some(base),
        }
    }

    pub fn base(&self) -> Option<&LayeredConfig> {
        self.base.as_deref()
    }

    /// Independent copy of this layer
    ///
    /// Entries are copied, the base is shared. Writes to the snapshot are never visible here.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Entries of this layer only
    pub fn layer_entries(&self) -> &IndexMap<String, String> {
        &self.entries
    }

    /// Assign `value` to `key` in this layer
    ///
    /// Assigning an `ardumgr.*` preference also writes its derived keys, see [crate::alias].
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into().into_string();

        if let Some(alias) = Alias::from_key(&key) {
            let derived = alias.derive(&value, |other| self.lookup(other));
            for (derived_key, derived_value) in derived {
                tracing::trace!(%alias, key = derived_key, value = %derived_value, "derived key");
                self.entries.insert(derived_key.to_string(), derived_value);
            }
        }

        self.entries.insert(key, value);
    }

    /// [LayeredConfig::set] every pair in order
    pub fn merge<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// This layer followed by all of its ancestors
    fn layers(&self) -> impl Iterator<Item = &LayeredConfig> {
        std::iter::successors(Some(self), |layer| layer.base.as_deref())
    }

    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.layers()
            .find_map(|layer| layer.entries.get(key))
            .map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Result<&str, LookupError> {
        self.lookup(key).ok_or_else(|| LookupError::KeyNotFound {
            key: key.to_string(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Lookup preferring the variant for the current os
    ///
    /// Definition files express os specific values as siblings (`cmd.path`,
    /// `cmd.path.windows`, ...). With `runtime.os=windows` this returns `cmd.path.windows` when
    /// present and `cmd.path` otherwise.
    pub fn get_overridden(&self, key: &str) -> Result<&str, LookupError> {
        let os = self.get(RUNTIME_OS)?;
        if let Some(value) = self.lookup(&format!("{key}.{os}")) {
            return Ok(value);
        }

        self.get(key)
    }

    /// Os specific value of `key` with all `{placeholder}`s resolved
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn get_expanded(&self, key: &str) -> Result<String, LookupError> {
        let text = self.get_overridden(key)?;
        self.expand_text(text, &mut vec![key.to_string()])
    }

    /// Resolve all `{placeholder}`s of `text`
    ///
    /// Placeholders are looked up with [LayeredConfig::get_overridden] and expanded in turn.
    pub fn expand(&self, text: &str) -> Result<String, LookupError> {
        self.expand_text(text, &mut Vec::new())
    }

    /// `stack` holds the keys currently being expanded
    ///
    /// Substituted text can form new placeholders with its surroundings, so passes repeat until
    /// none are left.
    fn expand_text(&self, text: &str, stack: &mut Vec<String>) -> Result<String, LookupError> {
        let mut expanded = self.expand_pass(text, stack)?;
        while has_placeholder(&expanded) {
            expanded = self.expand_pass(&expanded, stack)?;
        }

        Ok(expanded)
    }

    fn expand_pass(&self, text: &str, stack: &mut Vec<String>) -> Result<String, LookupError> {
        let mut expanded = String::with_capacity(text.len());

        for segment in Segments::new(text) {
            let field = match segment {
                Segment::Literal(literal) => {
                    expanded.push_str(literal);
                    continue;
                }
                Segment::Placeholder(field) => field,
            };

            if let Some(start) = stack.iter().position(|key| key == field) {
                let mut keys = stack[start..].to_vec();
                keys.push(field.to_string());
                tracing::debug!(?keys, "placeholder loop");
                return Err(LookupError::ExpansionCycle { keys });
            }

            let value = self.get_overridden(field)?;
            stack.push(field.to_string());
            let value = self.expand_text(value, stack)?;
            stack.pop();

            expanded.push_str(&value);
        }

        Ok(expanded)
    }

    /// All keys below `prefix`, with `prefix.` removed
    ///
    /// The display name (`name`) and the option menus (`menu.*`) of the subtree are left out.
    pub fn get_subtree(&self, prefix: &str) -> IndexMap<String, String> {
        let prefix = format!("{prefix}.");

        self.iter()
            .filter_map(|(key, value)| {
                let rest = key.strip_prefix(prefix.as_str())?;
                if rest == "name" || rest.starts_with("menu.") {
                    return None;
                }

                Some((rest.to_string(), value.to_string()))
            })
            .collect()
    }

    /// Subtree of `tools.<tool>` with `.params.` collapsed
    ///
    /// `tools.avrdude.upload.params.verbose` becomes `upload.verbose`.
    pub fn get_tool_subtree(&self, tool: &str) -> IndexMap<String, String> {
        self.get_subtree(&format!("tools.{tool}"))
            .into_iter()
            .map(|(key, value)| (key.replace(".params.", "."), value))
            .collect()
    }

    /// Distinct first segments of all keys below `prefix`, in order of appearance
    ///
    /// Ancestor layers are included, so a base layer contributes children too.
    pub fn get_children(&self, prefix: &str) -> IndexSet<String> {
        let prefix = format!("{prefix}.");

        self.keys()
            .filter(|key| *key != BOARDS_MENU_CPU)
            .filter_map(|key| {
                let rest = key.strip_prefix(prefix.as_str())?;
                let child = rest.split('.').next()?;
                (!child.is_empty()).then(|| child.to_string())
            })
            .collect()
    }

    /// Effective entries: this layer in insertion order, then every ancestor's entries that are
    /// not shadowed
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            layers: self.layers().collect(),
            depth: 0,
            current: self.entries.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    /// Number of effective entries
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.layers().all(|layer| layer.entries.is_empty())
    }

    /// Effective entries as one flat mapping
    pub fn to_flat(&self) -> IndexMap<String, String> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

pub struct Iter<'a> {
    layers: Vec<&'a LayeredConfig>,
    depth: usize,
    current: indexmap::map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.current.next() {
                let shadowed = self.layers[..self.depth]
                    .iter()
                    .any(|layer| layer.entries.contains_key(key));
                if shadowed {
                    continue;
                }

                return Some((key.as_str(), value.as_str()));
            }

            self.depth += 1;
            let layer: &'a LayeredConfig = *self.layers.get(self.depth)?;
            self.current = layer.entries.iter();
        }
    }
}

impl serde::ser::Serialize for LayeredConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut ser = serializer.serialize_map(None)?;
        for (key, value) in self.iter() {
            ser.serialize_entry(key, value)?;
        }
        ser.end()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },
    #[error("Placeholder loop detected: {}", keys.join(" -> "))]
    ExpansionCycle { keys: Vec<String> },
}

#[derive(Debug, PartialEq)]
enum Segment<'t> {
    Literal(&'t str),
    Placeholder(&'t str),
}

/// Splits text into literals and `{placeholder}`s
///
/// A placeholder name is non-empty and contains neither braces nor whitespace. Every other brace
/// is literal text.
struct Segments<'t> {
    rest: &'t str,
}

impl<'t> Segments<'t> {
    fn new(text: &'t str) -> Self {
        Self { rest: text }
    }
}

impl<'t> Iterator for Segments<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.rest;
        if text.is_empty() {
            return None;
        }

        if let Some(name) = placeholder_at(text) {
            self.rest = &text[name.len() + 2..];
            return Some(Segment::Placeholder(name));
        }

        let end = text
            .match_indices('{')
            .map(|(index, _)| index)
            .filter(|index| *index > 0)
            .find(|index| placeholder_at(&text[*index..]).is_some())
            .unwrap_or(text.len());

        let (literal, rest) = text.split_at(end);
        self.rest = rest;
        Some(Segment::Literal(literal))
    }
}

/// Name of the placeholder `text` starts with
fn placeholder_at(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('{')?;
    let end = inner.find(|c: char| c == '{' || c == '}' || c.is_whitespace())?;
    if end == 0 || !inner[end..].starts_with('}') {
        return None;
    }

    Some(&inner[..end])
}

fn has_placeholder(text: &str) -> bool {
    text.match_indices('{')
        .any(|(index, _)| placeholder_at(&text[index..]).is_some())
}

/// Utility macro to create a [LayeredConfig]
///
/// Create from a single document
/// ```
/// # use ardumgr::layered_config;
/// let config = layered_config!("runtime.os=linux\nname=Arduino AVR Boards");
/// assert_eq!(config.get("name").unwrap(), "Arduino AVR Boards");
/// ```
///
/// Create from multiple documents, each loaded under a prefix (`""` for none)
/// ```
/// # use ardumgr::layered_config;
/// let config = layered_config! {
///   "" => "upload.tool=avrdude",
///   "boards" => "uno.name=Arduino Uno"
/// };
/// assert!(config.contains("boards.uno.name"));
/// ```
///
/// # Panic
/// Panics on invalid input
///
/// ```should_panic
/// # use ardumgr::layered_config;
/// layered_config!("not a key value pair");
/// ```
#[macro_export]
macro_rules! layered_config {
    // single document without prefix
    { $text:expr } => {{
        let mut config = $crate::layered_config::LayeredConfig::new();
        config.merge($crate::flat_config::parse($text, None).expect("document must parse"));
        config
    }};
    // multiple documents with prefixes
    { $($prefix:expr => $text:expr),+ $(,)? } => {{
        let mut config = $crate::layered_config::LayeredConfig::new();
        $(
            config.merge(
                $crate::flat_config::parse($text, Some($prefix)).expect("document must parse"),
            );
        )+
        config
    }};
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> Arc<LayeredConfig> {
        Arc::new(layered_config!(
            "runtime.os=linux\nruntime.ide.path=/opt/arduino\nshared=base"
        ))
    }

    fn child(text: &str) -> LayeredConfig {
        let mut config = LayeredConfig::with_base(base());
        config.merge(crate::flat_config::parse(text, None).expect("must parse"));
        config
    }

    #[test]
    fn get_missing_key() {
        let config = LayeredConfig::new();
        assert_eq!(
            config.get("upload.tool"),
            Err(LookupError::KeyNotFound {
                key: "upload.tool".to_string()
            })
        );
        assert!(!config.contains("upload.tool"));
    }

    #[test]
    fn child_shadows_base() {
        let config = child("shared=child");

        assert_eq!(config.get("shared"), Ok("child"));
        assert_eq!(config.get("runtime.ide.path"), Ok("/opt/arduino"));
        assert_eq!(config.base().unwrap().get("shared"), Ok("base"));
        assert!(config.contains("runtime.os"));
    }

    #[test]
    fn set_never_touches_base() {
        let base = base();
        let mut config = LayeredConfig::with_base(Arc::clone(&base));
        config.set("runtime.os", "windows");

        assert_eq!(config.get("runtime.os"), Ok("windows"));
        assert_eq!(base.get("runtime.os"), Ok("linux"));
    }

    #[test]
    fn set_coerces_values() {
        let mut config = LayeredConfig::new();
        config.set("missing", None::<String>);
        config.set("speed", 57600u32);
        config.set("verify", false);

        assert_eq!(config.get("missing"), Ok(""));
        assert_eq!(config.get("speed"), Ok("57600"));
        assert_eq!(config.get("verify"), Ok("false"));
    }

    #[test]
    fn snapshot_is_independent() {
        let config = child("a=1");
        let mut snapshot = config.snapshot();
        snapshot.set("a", "2");
        snapshot.set("b", "3");

        assert_eq!(config.get("a"), Ok("1"));
        assert!(!config.contains("b"));
        assert_eq!(snapshot.get("runtime.os"), Ok("linux"));
    }

    #[test]
    fn overridden_prefers_os_variant() {
        let config = child("cmd.path=avrdude\ncmd.path.linux=avrdude-linux\ncmd.path.windows=avrdude.exe");
        assert_eq!(config.get_overridden("cmd.path"), Ok("avrdude-linux"));

        let mut windows = config.snapshot();
        windows.set(RUNTIME_OS, "windows");
        assert_eq!(windows.get_overridden("cmd.path"), Ok("avrdude.exe"));

        let mut macosx = config.snapshot();
        macosx.set(RUNTIME_OS, "macosx");
        assert_eq!(macosx.get_overridden("cmd.path"), Ok("avrdude"));
    }

    #[test]
    fn overridden_requires_runtime_os() {
        let config = layered_config!("cmd.path=avrdude");
        assert_eq!(
            config.get_overridden("cmd.path"),
            Err(LookupError::KeyNotFound {
                key: RUNTIME_OS.to_string()
            })
        );
    }

    #[test]
    fn overridden_missing() {
        let config = child("");
        assert_eq!(
            config.get_overridden("cmd.path"),
            Err(LookupError::KeyNotFound {
                key: "cmd.path".to_string()
            })
        );
    }

    #[test]
    fn expand_nested() {
        let config = child(
            "path={runtime.ide.path}/hardware/tools/avr\n\
             cmd.path={path}/bin/avrdude\n\
             cmd.path.windows={path}/bin/avrdude.exe\n\
             pattern=\"{cmd.path}\" -p{build.mcu} {build.mcu}\n\
             build.mcu=atmega328p",
        );

        assert_eq!(
            config.get_expanded("pattern").as_deref(),
            Ok("\"/opt/arduino/hardware/tools/avr/bin/avrdude\" -patmega328p atmega328p")
        );

        let mut windows = config.snapshot();
        windows.set(RUNTIME_OS, "windows");
        assert_eq!(
            windows.get_expanded("cmd.path").as_deref(),
            Ok("/opt/arduino/hardware/tools/avr/bin/avrdude.exe")
        );
    }

    #[test]
    fn expand_is_idempotent() {
        let config = child("plain=no placeholders here\nref={plain}");

        assert_eq!(config.get_expanded("plain").as_deref(), Ok("no placeholders here"));

        let once = config.get_expanded("ref").expect("must expand");
        assert_eq!(config.expand(&once), Ok(once.clone()));
    }

    #[test]
    fn expand_missing_placeholder() {
        let config = child("pattern=-P{serial.port}");
        assert_eq!(
            config.get_expanded("pattern"),
            Err(LookupError::KeyNotFound {
                key: "serial.port".to_string()
            })
        );
    }

    #[test]
    fn expand_literal_braces() {
        let config = child("a=x\nliteral={} { a} {a b} }{ {a} {a");
        assert_eq!(
            config.get_expanded("literal").as_deref(),
            Ok("{} { a} {a b} }{ x {a")
        );
    }

    #[test]
    fn expand_placeholder_formed_by_substitution() {
        let config = child("open={\nc=avrdude\na={open}c}\nnested={{c}}\navrdude=-v");

        let expanded = config.get_expanded("a").expect("must expand");
        assert_eq!(expanded, "avrdude");
        assert_eq!(config.expand(&expanded), Ok(expanded.clone()));

        assert_eq!(config.get_expanded("nested").as_deref(), Ok("-v"));
    }

    #[test]
    fn expand_cycle_formed_by_substitution() {
        let config = child("open={\nloop={open}loop}");
        assert_eq!(
            config.get_expanded("loop"),
            Err(LookupError::ExpansionCycle {
                keys: vec!["loop".to_string(), "loop".to_string()]
            })
        );
    }

    #[test]
    fn expand_cycle() {
        let config = child("a={b}\nb=-{c}-\nc={a}");
        assert_eq!(
            config.get_expanded("a"),
            Err(LookupError::ExpansionCycle {
                keys: vec![
                    "a".to_string(),
                    "b".to_string(),
                    "c".to_string(),
                    "a".to_string()
                ]
            })
        );

        let config = child("self=x{self}");
        assert_eq!(
            config.get_expanded("self"),
            Err(LookupError::ExpansionCycle {
                keys: vec!["self".to_string(), "self".to_string()]
            })
        );
    }

    #[test]
    fn expand_cycle_below_entry_key() {
        let config = child("entry={a}\na={b}\nb={a}");
        assert_eq!(
            config.get_expanded("entry"),
            Err(LookupError::ExpansionCycle {
                keys: vec!["a".to_string(), "b".to_string(), "a".to_string()]
            })
        );
    }

    #[test]
    fn repeated_placeholder_is_no_cycle() {
        let config = child("a={b}{b}\nb={c}\nc=x");
        assert_eq!(config.get_expanded("a").as_deref(), Ok("xx"));
    }

    #[test]
    fn subtree_excludes_name_and_menu() {
        let config = layered_config! {
            "boards" => "mega.name=Arduino Mega\n\
                         mega.upload.tool=avrdude\n\
                         mega.menu.cpu.atmega2560=ATmega2560\n\
                         mega.menu.cpu.atmega2560.build.mcu=atmega2560\n\
                         mega.build.name=mega\n\
                         megaavr.upload.tool=other"
        };

        let subtree = config.get_subtree("boards.mega");
        let keys: Vec<_> = subtree.keys().map(String::as_str).collect();
        assert_eq!(keys, ["upload.tool", "build.name"]);

        let cpu = config.get_subtree("boards.mega.menu.cpu.atmega2560");
        assert_eq!(cpu.len(), 1);
        assert_eq!(cpu["build.mcu"], "atmega2560");
    }

    #[test]
    fn subtree_sees_base() {
        let mut config = child("tools.avrdude.path=child");
        config.set("tools.avrdude.cmd", "avrdude");
        let base_layer = Arc::new(config);

        let mut top = LayeredConfig::with_base(base_layer);
        top.set("tools.avrdude.path", "top");

        let subtree = top.get_subtree("tools.avrdude");
        assert_eq!(subtree["path"], "top");
        assert_eq!(subtree["cmd"], "avrdude");
        assert_eq!(subtree.len(), 2);
    }

    #[test]
    fn tool_subtree_collapses_params() {
        let config = layered_config!(
            "tools.avrdude.upload.params.verbose=true\n\
             tools.avrdude.upload.params.quiet=-q -q\n\
             tools.avrdude.program.params.noverify=-V\n\
             tools.avrdude.cmd.path=avrdude"
        );

        let subtree = config.get_tool_subtree("avrdude");
        assert_eq!(subtree["upload.verbose"], "true");
        assert_eq!(subtree["upload.quiet"], "-q -q");
        assert_eq!(subtree["program.noverify"], "-V");
        assert_eq!(subtree["cmd.path"], "avrdude");
        assert!(!subtree.contains_key("upload.params.verbose"));
    }

    #[test]
    fn children() {
        let config = layered_config! {
            "boards" => "menu.cpu=Processor\n\
                         uno.name=Arduino Uno\n\
                         mega.name=Arduino Mega\n\
                         mega.menu.cpu.atmega2560=ATmega2560\n\
                         mega.menu.cpu.atmega2560.build.mcu=atmega2560\n\
                         mega.menu.cpu.atmega1280=ATmega1280\n\
                         uno.upload.tool=avrdude"
        };

        let boards: Vec<_> = config.get_children("boards").into_iter().collect();
        assert_eq!(boards, ["uno", "mega"]);

        let cpus: Vec<_> = config
            .get_children("boards.mega.menu.cpu")
            .into_iter()
            .collect();
        assert_eq!(cpus, ["atmega2560", "atmega1280"]);

        assert!(config.get_children("boards.uno.menu.cpu").is_empty());
    }

    #[test]
    fn children_include_base() {
        let mut base = LayeredConfig::new();
        base.set("tools.bossac.cmd", "bossac");
        let mut config = LayeredConfig::with_base(Arc::new(base));
        config.set("tools.avrdude.cmd", "avrdude");

        let tools: Vec<_> = config.get_children("tools").into_iter().collect();
        assert_eq!(tools, ["avrdude", "bossac"]);
    }

    #[test]
    fn iter_skips_shadowed() {
        let config = child("shared=child\nown=1");

        let entries: Vec<_> = config.iter().collect();
        assert_eq!(
            entries,
            [
                ("shared", "child"),
                ("own", "1"),
                ("runtime.os", "linux"),
                ("runtime.ide.path", "/opt/arduino"),
            ]
        );
        assert_eq!(config.len(), 4);
        assert!(!config.is_empty());
        assert!(LayeredConfig::with_base(Arc::new(LayeredConfig::new())).is_empty());
    }

    #[test]
    fn board_and_cpu_in_either_order() {
        let mut board_first = LayeredConfig::new();
        board_first.set("ardumgr.board", "mega");
        assert!(!board_first.contains("custom_cpu"));
        board_first.set("ardumgr.cpu", "atmega2560");

        let mut cpu_first = LayeredConfig::new();
        cpu_first.set("ardumgr.cpu", "atmega2560");
        assert!(!cpu_first.contains("custom_cpu"));
        cpu_first.set("ardumgr.board", "mega");

        for config in [board_first, cpu_first] {
            assert_eq!(config.get("custom_cpu"), Ok("mega_atmega2560"));
            assert_eq!(config.get("board"), Ok("mega"));
            assert_eq!(config.get("ardumgr.board"), Ok("mega"));
            assert_eq!(config.get("ardumgr.cpu"), Ok("atmega2560"));
        }
    }

    #[test]
    fn aliases_keep_literal_key() {
        let mut config = LayeredConfig::new();
        config.set("ardumgr.home_path", "/opt/arduino");
        config.set("ardumgr.package", "arduino");
        config.set("ardumgr.programmer", "avrisp");
        config.set("ardumgr.serial_port", "/dev/ttyUSB0");

        assert_eq!(config.get("runtime.ide.path"), Ok("/opt/arduino"));
        assert_eq!(config.get("target_package"), Ok("arduino"));
        assert_eq!(config.get("programmer"), Ok("arduino:avrisp"));
        assert_eq!(config.get("serial.port"), Ok("/dev/ttyUSB0"));
        assert_eq!(config.get("ardumgr.programmer"), Ok("avrisp"));
    }

    #[test]
    fn alias_sees_base() {
        let mut base = LayeredConfig::new();
        base.set("ardumgr.board", "mega");
        let mut config = LayeredConfig::with_base(Arc::new(base));
        config.set("ardumgr.cpu", "atmega1280");

        assert_eq!(config.get("custom_cpu"), Ok("mega_atmega1280"));
    }

    #[test]
    fn serialize_effective_entries() {
        let config = child("shared=child");
        let json = serde_json::to_string(&config).expect("must serialize");
        assert_eq!(
            json,
            r#"{"shared":"child","runtime.os":"linux","runtime.ide.path":"/opt/arduino"}"#
        );
    }

    #[test]
    fn segments() {
        let segments: Vec<_> = Segments::new("-C{config.path} {x").collect();
        assert_eq!(
            segments,
            [
                Segment::Literal("-C"),
                Segment::Placeholder("config.path"),
                Segment::Literal(" {x"),
            ]
        );
    }
}
