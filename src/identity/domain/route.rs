//! Application views and the roles allowed to open them.

use super::{ParseRouteError, Role};
use crate::location::domain::StoreId;
use std::fmt;

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Anyone, signed in or not.
    Public,
    /// Any signed-in user.
    AnyAuthenticated,
    /// Signed-in users holding one of the listed roles.
    Roles(&'static [Role]),
}

const MANAGER_ONLY: &[Role] = &[Role::Manager];
const FIELD_ROLES: &[Role] = &[Role::Employee, Role::ThirdParty];
const EVERY_ROLE: &[Role] = &Role::ALL;

/// Navigable application view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in form.
    Login,
    /// Root path; forwards to the role's landing route.
    Home,
    /// Manager overview of locations, appliances, and inspections.
    ManagerDashboard,
    /// AMC and maintenance notifications.
    Notifications,
    /// Appliance registration form.
    AddAppliance,
    /// Location registration form.
    AddLocation,
    /// Appliance-to-location mapping form.
    MapAppliance,
    /// Employee location assignment.
    AssignLocation,
    /// Technician dashboard with today's visits and history.
    EmployeeDashboard,
    /// Checklist for one store.
    EmployeeInspection(StoreId),
}

impl Route {
    /// Returns the access policy guarding this route.
    #[must_use]
    pub const fn policy(self) -> AccessPolicy {
        match self {
            Self::Login => AccessPolicy::Public,
            Self::Home => AccessPolicy::AnyAuthenticated,
            Self::ManagerDashboard
            | Self::AddAppliance
            | Self::AddLocation
            | Self::MapAppliance
            | Self::AssignLocation => AccessPolicy::Roles(MANAGER_ONLY),
            Self::Notifications => AccessPolicy::Roles(EVERY_ROLE),
            Self::EmployeeDashboard | Self::EmployeeInspection(_) => {
                AccessPolicy::Roles(FIELD_ROLES)
            }
        }
    }

    /// Route a user lands on after signing in.
    #[must_use]
    pub const fn landing_for(role: Role) -> Self {
        match role {
            Role::Manager => Self::ManagerDashboard,
            Role::Employee | Role::ThirdParty => Self::EmployeeDashboard,
        }
    }

    /// Returns the URL path of the route.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::Home => "/".to_owned(),
            Self::ManagerDashboard => "/manager".to_owned(),
            Self::Notifications => "/notifications".to_owned(),
            Self::AddAppliance => "/add-appliance".to_owned(),
            Self::AddLocation => "/add-location".to_owned(),
            Self::MapAppliance => "/map-appliance".to_owned(),
            Self::AssignLocation => "/assign-location".to_owned(),
            Self::EmployeeDashboard => "/employee".to_owned(),
            Self::EmployeeInspection(store_id) => format!("/employee/inspection/{store_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl TryFrom<&str> for Route {
    type Error = ParseRouteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let normalized = match trimmed.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => trimmed,
        };

        let route = match normalized {
            "/login" => Self::Login,
            "/" => Self::Home,
            "/manager" => Self::ManagerDashboard,
            "/notifications" => Self::Notifications,
            "/add-appliance" => Self::AddAppliance,
            "/add-location" => Self::AddLocation,
            "/map-appliance" => Self::MapAppliance,
            "/assign-location" => Self::AssignLocation,
            "/employee" => Self::EmployeeDashboard,
            other => {
                let store_id = other
                    .strip_prefix("/employee/inspection/")
                    .and_then(|raw| raw.parse::<u64>().ok())
                    .and_then(|raw| StoreId::new(raw).ok())
                    .ok_or_else(|| ParseRouteError(value.to_owned()))?;
                Self::EmployeeInspection(store_id)
            }
        };
        Ok(route)
    }
}
