//! Name expressions used to select objects

use std::fmt;

use crate::error::{Error, Result};

/// Name selector carried by lookups and dependency descriptors.
///
/// | Text | Variant | Matches |
/// |------|---------|---------|
/// | `""` | [`NameExpr::Unnamed`] | objects registered without a name |
/// | `"mailer"` | [`NameExpr::Exact`] | that name or an identical alias |
/// | `"mail*"` | [`NameExpr::Pattern`] | any name or alias the glob accepts |
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameExpr {
    /// The unnamed default object
    #[default]
    Unnamed,
    /// A literal name
    Exact(String),
    /// A glob over names and aliases
    Pattern(glob::Pattern),
}

const GLOB_META: [char; 3] = ['*', '?', '['];

impl NameExpr {
    /// Parse a selector. Text containing `*`, `?` or `[` is a glob.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::Unnamed);
        }
        if text.contains(GLOB_META) {
            return glob::Pattern::new(text)
                .map(Self::Pattern)
                .map_err(|e| Error::unsupported_shape("name expression", format!("'{text}': {e}")));
        }
        Ok(Self::Exact(text.to_owned()))
    }

    /// Whether an object with `name` and `aliases` is selected
    pub fn matches(&self, name: &str, aliases: &[String]) -> bool {
        match self {
            Self::Unnamed => name.is_empty(),
            Self::Exact(expected) => name == expected || aliases.iter().any(|a| a == expected),
            Self::Pattern(pattern) => {
                pattern.matches(name) || aliases.iter().any(|a| pattern.matches(a))
            }
        }
    }

    /// Source text of the selector
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unnamed => "",
            Self::Exact(name) => name,
            Self::Pattern(pattern) => pattern.as_str(),
        }
    }
}

impl fmt::Display for NameExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
