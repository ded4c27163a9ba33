//! Course-schedule derivation and role-based navigation.
//!
//! The reusable core of a community-education platform: given a course's
//! date range and weekly meeting pattern, derive its duration in weeks and
//! total session count; given a principal's roles and the static navigation
//! tree, decide what they see and where they may go. Both components are
//! pure and synchronous; all I/O stays with the caller.

pub mod domain;
pub use domain::{
    AuthState, CourseSchedule, MenuConfig, MenuItem, MenuKey, Principal, Role, RoleSet,
    RouteDecision, ScheduleDerivation, ScheduleError, WeeklySlot, evaluate_route, filter_menu,
    is_route_allowed,
};
