//! Role-keyed route guard
//!
//! The app has two entry views: inspectors land on the map, coordinators
//! on the dashboard. Anyone without a session goes to the login screen.

use shared::Role;

pub const LOGIN_ROUTE: &str = "/login";
pub const MAP_ROUTE: &str = "/app/map";
pub const DASHBOARD_ROUTE: &str = "/app/dashboard";

/// Route the user should land on after app start
pub fn landing_route(role: Option<Role>) -> &'static str {
    match role {
        None => LOGIN_ROUTE,
        Some(Role::Inspector) => MAP_ROUTE,
        Some(Role::Coordinator) => DASHBOARD_ROUTE,
    }
}
