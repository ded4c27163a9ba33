//! Domain models for the course platform core.
//!
//! This module contains the two logic components the UI layer calls into:
//! schedule derivation and role-based menu/route authorization, along with
//! the types they operate on.

mod config;
pub use config::{MenuConfig, MenuIssue};

/// The route guard and its per-navigation state machine.
pub mod guard;
pub use guard::{AuthState, RouteDecision, evaluate_route, is_route_allowed};

/// The navigation menu tree and role-based filtering.
pub mod menu;
pub use menu::{MenuItem, MenuKey, active_trail, filter_menu, route_roles};

/// Roles, role sets, and principal normalization.
pub mod role;
pub use role::{Principal, Role, RoleSet, UnknownRoleError};

/// Course schedule derivation.
pub mod schedule;
pub use schedule::{CourseSchedule, ScheduleDerivation, ScheduleError, WeeklySlot};
