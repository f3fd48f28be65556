//! Composite keys of the quantities map.
//!
//! Panels are keyed by catalog id *and* the building element that consumes
//! them, because the same product can be quoted for walls and roof with
//! independent quantities. On the wire the key is the string `id@@USAGE`;
//! every other material is keyed by its bare catalog id.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const SEPARATOR: &str = "@@";

/// Building element a panel line is quoted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Usage {
    Exterior,
    Interior,
    Piso,
    Techo,
}

impl Usage {
    pub const ALL: [Usage; 4] = [Usage::Exterior, Usage::Interior, Usage::Piso, Usage::Techo];

    /// Wire tag used after `@@`
    pub fn tag(&self) -> &'static str {
        match self {
            Usage::Exterior => "EXTERIOR",
            Usage::Interior => "INTERIOR",
            Usage::Piso => "PISO",
            Usage::Techo => "TECHO",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Usage> {
        Usage::ALL.into_iter().find(|u| u.tag() == tag)
    }

    /// Suffix appended to budget line names
    pub fn label(&self) -> &'static str {
        match self {
            Usage::Exterior => " (Perimetral)",
            Usage::Interior => " (Tabiquería)",
            Usage::Piso => " (Piso)",
            Usage::Techo => " (Cubierta)",
        }
    }

    /// Catalog id suffix of the panel family selectable for this usage
    pub fn panel_suffix(&self) -> &'static str {
        match self {
            Usage::Exterior => "-E",
            Usage::Interior => "-I",
            Usage::Piso => "-P",
            Usage::Techo => "-T",
        }
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Quantities-map key: a catalog id, optionally tagged with a usage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaterialKey {
    pub catalog_id: String,
    pub usage: Option<Usage>,
}

impl MaterialKey {
    /// Key for a non-panel material
    pub fn plain(catalog_id: impl Into<String>) -> Self {
        MaterialKey {
            catalog_id: catalog_id.into(),
            usage: None,
        }
    }

    /// Key for a panel consumed by `usage`
    pub fn panel(catalog_id: impl Into<String>, usage: Usage) -> Self {
        MaterialKey {
            catalog_id: catalog_id.into(),
            usage: Some(usage),
        }
    }
}

impl fmt::Display for MaterialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.usage {
            Some(usage) => write!(f, "{}{}{}", self.catalog_id, SEPARATOR, usage.tag()),
            None => write!(f, "{}", self.catalog_id),
        }
    }
}

impl FromStr for MaterialKey {
    type Err = Infallible;

    /// Never fails: a key whose tag is not a known usage is kept whole as a
    /// plain id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((id, tag)) = s.rsplit_once(SEPARATOR) {
            if let Some(usage) = Usage::from_tag(tag) {
                return Ok(MaterialKey::panel(id, usage));
            }
        }
        Ok(MaterialKey::plain(s))
    }
}

impl From<&str> for MaterialKey {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(key) => key,
            Err(never) => match never {},
        }
    }
}

impl Serialize for MaterialKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MaterialKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(MaterialKey::from(raw.as_str()))
    }
}
