//! Roles and role-bearing principals.
//!
//! Roles are modelled as a closed enum rather than free-form strings so that
//! a typo in a configuration file or a session payload fails at parse time
//! instead of silently granting no access.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A role held by a principal on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A learner enrolled (or enrolling) in courses.
    Student,
    /// A guardian of one or more students.
    Parent,
    /// A course instructor.
    Teacher,
    /// Manages a single institution's courses and teachers.
    MosqueAdmin,
    /// Cross-institution oversight: approvals and system-wide statistics.
    MinistryAdmin,
}

impl Role {
    /// All roles, in canonical order.
    pub const ALL: [Self; 5] = [
        Self::Student,
        Self::Parent,
        Self::Teacher,
        Self::MosqueAdmin,
        Self::MinistryAdmin,
    ];

    /// Returns the wire name of the role (`snake_case`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Parent => "parent",
            Self::Teacher => "teacher",
            Self::MosqueAdmin => "mosque_admin",
            Self::MinistryAdmin => "ministry_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRoleError(s.to_string()))
    }
}

/// Error returned when a string does not name a known role.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown role '{0}': expected one of student, parent, teacher, mosque_admin, ministry_admin")]
pub struct UnknownRoleError(String);

/// An ordered set of roles.
///
/// Used both for the roles a principal holds and for the roles a menu item
/// or route admits. An empty set means different things in the two positions:
/// a principal with no roles sees nothing, while an item restricted to no
/// roles is unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Creates an empty role set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns `true` if the set contains no roles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of roles in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set contains the given role.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Adds a role to the set.
    ///
    /// Returns `true` if the role was not already present.
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    /// Returns `true` if the two sets share at least one role.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.0.iter().any(|role| other.0.contains(role))
    }

    /// Iterates over the roles in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        std::iter::once(role).collect()
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a Role;
    type IntoIter = std::collections::btree_set::Iter<'a, Role>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for role in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{role}")?;
            first = false;
        }
        Ok(())
    }
}

/// A role-bearing principal, as consumed by the navigation and guard logic.
///
/// Normalization happens at the serde boundary: both the current
/// `{ "roles": [...] }` shape and the legacy singular `{ "role": "..." }`
/// shape deserialize into a canonical [`RoleSet`]. Duplicate roles collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PrincipalWire")]
pub struct Principal {
    /// The roles held by this principal. May be empty.
    roles: RoleSet,
}

impl Principal {
    /// Creates a principal holding the given roles.
    pub fn new<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// Creates a principal from a legacy singular role.
    #[must_use]
    pub fn from_legacy_role(role: Role) -> Self {
        Self { roles: role.into() }
    }

    /// The normalized role set.
    #[must_use]
    pub const fn roles(&self) -> &RoleSet {
        &self.roles
    }
}

/// The wire shape a principal may arrive in.
///
/// The legacy singular `role` field predates multi-role accounts and is
/// still emitted by older session payloads. Both fields are accepted and
/// unioned; either value failing to parse as a [`Role`] is an error.
#[derive(Debug, Deserialize)]
struct PrincipalWire {
    #[serde(default)]
    roles: Vec<Role>,
    #[serde(default)]
    role: Option<Role>,
}

impl From<PrincipalWire> for Principal {
    fn from(wire: PrincipalWire) -> Self {
        Self::new(wire.roles.into_iter().chain(wire.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "studnet".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRoleError("studnet".to_string()));
    }

    #[test]
    fn role_serde_uses_snake_case() {
        let json = serde_json::to_string(&Role::MosqueAdmin).unwrap();
        assert_eq!(json, "\"mosque_admin\"");

        let role: Role = serde_json::from_str("\"ministry_admin\"").unwrap();
        assert_eq!(role, Role::MinistryAdmin);
    }

    #[test]
    fn duplicate_roles_collapse() {
        let principal = Principal::new([Role::Student, Role::Student, Role::Parent]);
        assert_eq!(principal.roles().len(), 2);
    }

    #[test]
    fn intersects_requires_a_common_role() {
        let held: RoleSet = [Role::Teacher].into_iter().collect();
        let allowed: RoleSet = [Role::Student, Role::Parent].into_iter().collect();
        assert!(!held.intersects(&allowed));

        let held: RoleSet = [Role::Teacher, Role::Student].into_iter().collect();
        assert!(held.intersects(&allowed));
    }

    #[test]
    fn deserializes_current_shape() {
        let principal: Principal =
            serde_json::from_str(r#"{ "roles": ["student", "parent"] }"#).unwrap();
        assert!(principal.roles().contains(Role::Student));
        assert!(principal.roles().contains(Role::Parent));
        assert_eq!(principal.roles().len(), 2);
    }

    #[test]
    fn deserializes_legacy_singular_role() {
        let principal: Principal = serde_json::from_str(r#"{ "role": "teacher" }"#).unwrap();
        assert_eq!(principal.roles().len(), 1);
        assert!(principal.roles().contains(Role::Teacher));
    }

    #[test]
    fn missing_roles_normalize_to_empty_set() {
        let principal: Principal = serde_json::from_str("{}").unwrap();
        assert!(principal.roles().is_empty());
    }

    #[test]
    fn legacy_typo_fails_loudly() {
        let result = serde_json::from_str::<Principal>(r#"{ "role": "techer" }"#);
        assert!(result.is_err());
    }
}
