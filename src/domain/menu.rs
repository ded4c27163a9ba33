//! The navigation menu tree and its role-based filtering.
//!
//! The menu is a static, hand-authored tree of [`MenuItem`] nodes, one level
//! of nesting deep. Filtering never mutates the input: each call returns a
//! fresh tree containing only the items the given principal may see.

use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::role::{Principal, RoleSet};

/// A validated, non-empty menu item key.
///
/// Keys identify menu items uniquely across the whole tree and never carry
/// display meaning.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MenuKey(NonEmptyString);

impl MenuKey {
    /// Creates a key from a string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidKeyError`] if the string is empty.
    pub fn new(s: String) -> Result<Self, InvalidKeyError> {
        NonEmptyString::new(s).map(Self).map_err(|_| InvalidKeyError)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for MenuKey {
    type Error = InvalidKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for MenuKey {
    type Error = InvalidKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for MenuKey {
    type Err = InvalidKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl From<MenuKey> for String {
    fn from(key: MenuKey) -> Self {
        key.0.to_string()
    }
}

impl AsRef<str> for MenuKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for MenuKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for MenuKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a menu key is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("menu keys must be non-empty")]
pub struct InvalidKeyError;

/// A node in the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Unique identifier for the item.
    pub key: MenuKey,

    /// Display label. Irrelevant to the filtering logic.
    pub label: String,

    /// Display icon name, if any. Irrelevant to the filtering logic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Roles permitted to see this item. Empty means unrestricted.
    #[serde(default, skip_serializing_if = "RoleSet::is_empty")]
    pub roles: RoleSet,

    /// Route path this item navigates to. Absent only for parents that act
    /// purely as dropdown containers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Child items. At most one level of nesting: children never have
    /// children of their own.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Whether a principal holding `roles` may see this item.
    ///
    /// An item with no role restriction is visible to any authenticated
    /// principal; otherwise one shared role suffices.
    #[must_use]
    pub fn visible_to(&self, roles: &RoleSet) -> bool {
        self.roles.is_empty() || self.roles.intersects(roles)
    }
}

/// Reduces a menu tree to the items the given principal may see.
///
/// An absent principal, or one whose normalized role set is empty, sees an
/// empty menu. A visible parent whose filtered children come up empty is
/// dropped even when its own role check passed: a dropdown with nothing
/// inside it is not shown. Relative ordering is preserved at every level,
/// and the input tree is never mutated.
///
/// Filtering an already-filtered tree with the same principal returns the
/// identical tree.
#[must_use]
#[instrument(level = "debug", skip_all, fields(items = items.len()))]
pub fn filter_menu(items: &[MenuItem], principal: Option<&Principal>) -> Vec<MenuItem> {
    let Some(roles) = principal.map(Principal::roles) else {
        return Vec::new();
    };
    if roles.is_empty() {
        return Vec::new();
    }
    filter_level(items, roles)
}

fn filter_level(items: &[MenuItem], roles: &RoleSet) -> Vec<MenuItem> {
    items
        .iter()
        .filter(|item| item.visible_to(roles))
        .filter_map(|item| {
            if item.children.is_empty() {
                return Some(item.clone());
            }
            let children = filter_level(&item.children, roles);
            if children.is_empty() {
                return None;
            }
            Some(MenuItem {
                children,
                ..item.clone()
            })
        })
        .collect()
}

/// Returns the key trail of the menu item active for `path`.
///
/// The trail runs from the top-level item down to the matched item, so a
/// matched child yields `[parent key, child key]` and a matched top-level
/// item yields a single key. An exact link match wins; otherwise the longest
/// link that is a prefix of `path` on a `/` boundary does. Returns an empty
/// trail when nothing matches.
#[must_use]
pub fn active_trail<'a>(items: &'a [MenuItem], path: &str) -> Vec<&'a MenuKey> {
    best_match(items, path).map_or_else(Vec::new, |(_, trail)| trail)
}

/// Looks up the role restriction of the menu item matching `path`.
///
/// Used to feed the route guard from the same hand-authored artifact that
/// drives the menu. Returns `None` when no item matches; an empty set on a
/// matched item means the route admits any authenticated principal.
#[must_use]
pub fn route_roles<'a>(items: &'a [MenuItem], path: &str) -> Option<&'a RoleSet> {
    best_match(items, path).map(|(item, _)| &item.roles)
}

/// Match quality for a link against a path. Exact beats any prefix; longer
/// prefixes beat shorter ones.
fn link_match(link: &str, path: &str) -> Option<usize> {
    if link == path {
        return Some(usize::MAX);
    }
    let remainder = path.strip_prefix(link)?;
    remainder.starts_with('/').then(|| link.len())
}

fn best_match<'a>(items: &'a [MenuItem], path: &str) -> Option<(&'a MenuItem, Vec<&'a MenuKey>)> {
    let mut best: Option<(usize, &MenuItem, Vec<&MenuKey>)> = None;

    let mut consider = |quality: usize, item: &'a MenuItem, trail: Vec<&'a MenuKey>| {
        if best.as_ref().is_none_or(|(held, _, _)| quality > *held) {
            best = Some((quality, item, trail));
        }
    };

    for item in items {
        if let Some(quality) = item.link.as_deref().and_then(|link| link_match(link, path)) {
            consider(quality, item, vec![&item.key]);
        }
        for child in &item.children {
            if let Some(quality) = child.link.as_deref().and_then(|link| link_match(link, path)) {
                consider(quality, child, vec![&item.key, &child.key]);
            }
        }
    }

    best.map(|(_, item, trail)| (item, trail))
}
