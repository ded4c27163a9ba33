//! Terminal capability detection and domain-aware output styling.

use madrasa::{RoleSet, RouteDecision};
use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Detects terminal width, returning None if not available
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(w, _)| w.0)
}

/// Check if terminal is narrow (< 60 columns)
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|w| w < 60)
}

fn paint<C: owo_colors::Color>(text: &str) -> String {
    if supports_color() {
        text.fg::<C>().to_string()
    } else {
        text.to_string()
    }
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as an error (red)
    fn error(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        paint::<css::Green>(self)
    }

    fn warning(&self) -> String {
        paint::<css::Orange>(self)
    }

    fn error(&self) -> String {
        paint::<css::Red>(self)
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

/// The display label for a guard decision.
pub const fn decision_label(decision: RouteDecision) -> &'static str {
    match decision {
        RouteDecision::Pending => "pending",
        RouteDecision::RedirectToLogin => "redirect to login",
        RouteDecision::RedirectToUnauthorized => "redirect to unauthorized",
        RouteDecision::Allow => "allow",
    }
}

/// Paints a guard decision in its conventional color: green for allow,
/// red for either redirect, dimmed while auth is unresolved.
pub fn paint_decision(decision: RouteDecision) -> String {
    let label = decision_label(decision);
    match decision {
        RouteDecision::Allow => label.success(),
        RouteDecision::Pending => label.dim(),
        RouteDecision::RedirectToLogin | RouteDecision::RedirectToUnauthorized => label.error(),
    }
}

/// The bracketed role summary shown beside a restricted menu item.
///
/// Unrestricted items get no summary rather than an empty pair of brackets.
pub fn roles_summary(roles: &RoleSet) -> Option<String> {
    if roles.is_empty() {
        None
    } else {
        Some(format!("[{roles}]"))
    }
}

/// Paints a role restriction amber, matching how the course forms flag
/// role-gated fields.
pub fn paint_roles(roles: &RoleSet) -> Option<String> {
    roles_summary(roles).map(|summary| summary.warning())
}

#[cfg(test)]
mod tests {
    use madrasa::Role;

    use super::*;

    #[test]
    fn decision_labels_distinguish_the_two_redirects() {
        assert_eq!(decision_label(RouteDecision::Allow), "allow");
        assert_eq!(decision_label(RouteDecision::Pending), "pending");
        assert_eq!(
            decision_label(RouteDecision::RedirectToLogin),
            "redirect to login"
        );
        assert_eq!(
            decision_label(RouteDecision::RedirectToUnauthorized),
            "redirect to unauthorized"
        );
    }

    #[test]
    fn roles_summary_lists_roles_in_canonical_order() {
        let roles: RoleSet = [Role::MosqueAdmin, Role::Student].into_iter().collect();
        assert_eq!(roles_summary(&roles).unwrap(), "[student, mosque_admin]");
    }

    #[test]
    fn unrestricted_items_get_no_summary() {
        assert_eq!(roles_summary(&RoleSet::new()), None);
    }
}
