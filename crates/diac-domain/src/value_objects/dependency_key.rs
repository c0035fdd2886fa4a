//! Dependency key value object

use crate::constants::{ANY_NAME, KEY_TOKEN_ESCAPE, KEY_TOKEN_PATH, KEY_TOKEN_SEPARATOR};
use std::fmt::Write;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one binding: an interface plus a qualifier name
///
/// Keys compare, order and hash by value. The qualifier defaults to
/// [`ANY_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyKey {
    /// Interface or type identity
    pub interface: String,
    /// Qualifier name
    #[serde(default)]
    pub name: String,
}

impl DependencyKey {
    /// Key for `interface` with any qualifier
    pub fn new<S: Into<String>>(interface: S) -> Self {
        Self {
            interface: interface.into(),
            name: ANY_NAME.to_string(),
        }
    }

    /// Key for `interface` qualified by `name`
    pub fn named<S: Into<String>, N: Into<String>>(interface: S, name: N) -> Self {
        Self {
            interface: interface.into(),
            name: name.into(),
        }
    }

    /// Whether the qualifier is the "any" sentinel
    pub fn is_any(&self) -> bool {
        self.name == ANY_NAME
    }

    /// Storage-safe and code-safe token for this key
    ///
    /// ASCII letters and digits are kept, `::` becomes `.`, and every other
    /// byte is written as `_XX` (uppercase hex). The interface and the
    /// qualifier are joined by `-`, which never occurs inside either part, so
    /// distinct keys always get distinct tokens.
    pub fn token(&self) -> String {
        let mut token = encode(&self.interface);
        token.push(KEY_TOKEN_SEPARATOR);
        token.push_str(&encode(&self.name));
        token
    }
}

fn encode(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("::") {
            encoded.push(KEY_TOKEN_PATH);
            rest = tail;
            continue;
        }
        if c.is_ascii_alphanumeric() {
            encoded.push(c);
        } else {
            let mut bytes = [0; 4];
            for byte in c.encode_utf8(&mut bytes).bytes() {
                let _ = write!(encoded, "{KEY_TOKEN_ESCAPE}{byte:02X}");
            }
        }
        rest = &rest[c.len_utf8()..];
    }
    encoded
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            write!(f, "{}", self.interface)
        } else {
            write!(f, "{}#{}", self.interface, self.name)
        }
    }
}

impl From<&str> for DependencyKey {
    fn from(interface: &str) -> Self {
        Self::new(interface)
    }
}
