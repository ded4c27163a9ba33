use std::path::Path;

use clap::Parser;
use madrasa::{
    AuthState, MenuConfig, Principal, Role, RoleSet, RouteDecision, domain::menu::route_roles,
    evaluate_route,
};

use super::terminal::paint_decision;

/// Command arguments for `madrasa allow`.
///
/// Exits successfully only when the guard renders an `allow` decision.
#[derive(Debug, Parser)]
#[command(about = "Evaluate the route guard for a path")]
pub struct Allow {
    /// Route path to test
    path: String,

    /// Roles held by the user (repeatable); omit for an unauthenticated
    /// visitor
    #[arg(long = "role", value_name = "ROLE", value_parser = super::parse_role)]
    roles: Vec<Role>,

    /// Treat the auth status as not yet resolved
    #[arg(long, conflicts_with = "roles")]
    unresolved: bool,
}

impl Allow {
    pub fn run(self, menu_path: &Path) -> anyhow::Result<()> {
        let config = MenuConfig::load(menu_path).map_err(|e| anyhow::anyhow!(e))?;

        let allowed = match route_roles(config.items(), &self.path) {
            Some(roles) => roles.clone(),
            None => {
                // A path outside the menu carries no restriction of its
                // own: any authenticated principal.
                tracing::warn!(path = %self.path, "path not found in menu definition");
                RoleSet::new()
            }
        };

        let state = if self.unresolved {
            AuthState::Unknown
        } else if self.roles.is_empty() {
            AuthState::Unauthenticated
        } else {
            AuthState::Authenticated(Principal::new(self.roles.iter().copied()))
        };

        let decision = evaluate_route(&state, &allowed);
        println!("{}", paint_decision(decision));

        match decision {
            RouteDecision::Allow => Ok(()),
            RouteDecision::Pending => {
                anyhow::bail!("auth status unresolved: no decision may be rendered")
            }
            RouteDecision::RedirectToLogin => {
                anyhow::bail!("route '{}' denied: unauthenticated", self.path)
            }
            RouteDecision::RedirectToUnauthorized => {
                anyhow::bail!("route '{}' denied: insufficient role", self.path)
            }
        }
    }
}
