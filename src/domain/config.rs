use std::{collections::BTreeSet, path::Path};

use serde::{Deserialize, Serialize};

use super::menu::{MenuItem, MenuKey};

/// The hand-authored menu/route definition artifact.
///
/// Defined once per deployment and static for the process lifetime; the
/// *filtered* view is recomputed per render by the caller. The file is
/// versioned TOML so the format can evolve without breaking existing
/// deployments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct MenuConfig {
    /// Ordered top-level menu items.
    items: Vec<MenuItem>,
}

impl MenuConfig {
    /// Creates a config from an ordered item sequence.
    #[must_use]
    pub const fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The ordered top-level menu items.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Loads the menu definition from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read menu file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse menu file: {e}"))
    }

    /// Saves the menu definition to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the definition cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize menu: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write menu file: {e}"))
    }

    /// Checks the structural invariants of the tree.
    ///
    /// Returns every issue found, in tree order. An empty result means the
    /// definition is well-formed. Role names are already enforced at parse
    /// time by the closed [`Role`](super::role::Role) enum.
    #[must_use]
    pub fn validate(&self) -> Vec<MenuIssue> {
        let mut issues = Vec::new();
        let mut seen = BTreeSet::new();

        for item in &self.items {
            check_item(item, false, &mut seen, &mut issues);
        }

        issues
    }
}

fn check_item(
    item: &MenuItem,
    is_child: bool,
    seen: &mut BTreeSet<MenuKey>,
    issues: &mut Vec<MenuIssue>,
) {
    if !seen.insert(item.key.clone()) {
        issues.push(MenuIssue::DuplicateKey {
            key: item.key.clone(),
        });
    }

    if item.link.is_none() && item.children.is_empty() {
        issues.push(MenuIssue::Unreachable {
            key: item.key.clone(),
        });
    }

    if is_child && !item.children.is_empty() {
        issues.push(MenuIssue::NestedTooDeep {
            key: item.key.clone(),
        });
    }

    for child in &item.children {
        check_item(child, true, seen, issues);
    }
}

/// A structural problem in the menu definition.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MenuIssue {
    /// Two items share a key.
    #[error("duplicate menu key '{key}'")]
    DuplicateKey {
        /// The repeated key.
        key: MenuKey,
    },

    /// An item has neither a link nor children, so it can never navigate
    /// anywhere.
    #[error("menu item '{key}' has no link and no children")]
    Unreachable {
        /// The offending item's key.
        key: MenuKey,
    },

    /// A child item has children of its own; the tree is one level deep.
    #[error("menu item '{key}' nests children below the first level")]
    NestedTooDeep {
        /// The offending item's key.
        key: MenuKey,
    },
}

/// The serialized versions of the menu definition.
///
/// This allows for future changes to the file format and to the domain type
/// without breaking existing deployments.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "item")]
        items: Vec<MenuItem>,
    },
}

impl From<Versions> for MenuConfig {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { items } => Self { items },
        }
    }
}

impl From<MenuConfig> for Versions {
    fn from(config: MenuConfig) -> Self {
        Self::V1 {
            items: config.items,
        }
    }
}
