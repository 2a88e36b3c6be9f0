//! Category - the fixed set of emergency scenarios

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emergency scenario; each owns exactly one persisted checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fire,
    Earthquake,
    Flood,
    Hurricane,
    PowerOutage,
}

impl Category {
    /// Display order used by the home and profile screens
    pub const ALL: [Category; 5] = [
        Category::Fire,
        Category::Earthquake,
        Category::Flood,
        Category::Hurricane,
        Category::PowerOutage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fire => "fire",
            Category::Earthquake => "earthquake",
            Category::Flood => "flood",
            Category::Hurricane => "hurricane",
            Category::PowerOutage => "poweroutage",
        }
    }

    /// Unknown names yield `None`, never an error
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }

    pub fn storage_key(&self) -> String {
        format!("{}_checklist", self.as_str())
    }

    /// Prefix shared by every item id in this category
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Category::PowerOutage => "power",
            other => other.as_str(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Fire => "Fire Emergency",
            Category::Earthquake => "Earthquake",
            Category::Flood => "Flood",
            Category::Hurricane => "Hurricane",
            Category::PowerOutage => "Power Outage",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
