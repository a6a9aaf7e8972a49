//! value representation
//!
//! Every value stored in a [crate::layered_config::LayeredConfig] is text. [Value] is what
//! [crate::layered_config::LayeredConfig::set] accepts, and it decides how other types turn into
//! that text:
//! - strings are taken as they are
//! - booleans and integers use their `Display` form
//! - paths are rendered lossy (invalid utf-8 sequences are replaced)
//! - `None` becomes the empty string
//!
//! There is no way to store "no value". Absence is only ever a missing key.
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Value(String);

impl Value {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value(value.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value(value.to_string())
    }
}

macro_rules! value_from_integer {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value(value.to_string())
                }
            }
        )+
    };
}

value_from_integer!(i32, i64, u16, u32, u64, usize);

impl From<&Path> for Value {
    fn from(value: &Path) -> Self {
        Value(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        value.as_path().into()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
