//! Role-based access policy
//!
//! Roles are flat: `honbu` does not imply `manager` or any other role. Each
//! route group declares its own allowed set ([`route_roles`]); a profile
//! passes when it holds at least one of them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{AppError, ErrorCode};
use crate::models::Profile;
use crate::models::roles::{EMPLOYEE, HONBU, MANAGER, STORE, STORE_ADMIN};

/// `true` iff `required` is empty or intersects the profile's roles
pub fn can_access<S: AsRef<str>>(profile: &Profile, required: &[S]) -> bool {
    required.is_empty() || required.iter().any(|r| profile.roles.contains(r.as_ref()))
}

/// Session as seen by a gated view or route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Profile lookup still in flight
    Loading,
    SignedOut,
    SignedIn(Profile),
}

/// Outcome of a gate check. The three non-granted states render differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Loading,
    Unauthenticated,
    Denied,
    Granted,
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

pub fn evaluate<S: AsRef<str>>(session: &SessionState, required: &[S]) -> AccessDecision {
    match session {
        SessionState::Loading => AccessDecision::Loading,
        SessionState::SignedOut => AccessDecision::Unauthenticated,
        SessionState::SignedIn(profile) if can_access(profile, required) => {
            AccessDecision::Granted
        }
        SessionState::SignedIn(_) => AccessDecision::Denied,
    }
}

/// Route groups with an explicit allowed-role set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteGroup {
    /// Dashboard, profile, settings, tasks
    Authenticated,
    ShiftsRead,
    ShiftsWrite,
    Employees,
    /// Report analytics, task stats, user management, account actions
    HeadOffice,
    /// Report submission and a store's own reports
    StoreReports,
}

const SHIFTS_READ: &[&str] = &[HONBU, STORE_ADMIN, MANAGER, EMPLOYEE];
const SHIFTS_WRITE: &[&str] = &[HONBU, STORE_ADMIN, MANAGER];
const EMPLOYEES: &[&str] = &[HONBU, STORE_ADMIN, MANAGER];
const HEAD_OFFICE: &[&str] = &[HONBU];
const STORE_REPORTS: &[&str] = &[STORE, MANAGER];

pub fn route_roles(group: RouteGroup) -> &'static [&'static str] {
    match group {
        RouteGroup::Authenticated => &[],
        RouteGroup::ShiftsRead => SHIFTS_READ,
        RouteGroup::ShiftsWrite => SHIFTS_WRITE,
        RouteGroup::Employees => EMPLOYEES,
        RouteGroup::HeadOffice => HEAD_OFFICE,
        RouteGroup::StoreReports => STORE_REPORTS,
    }
}

/// Parse a comma separated role list (`?roles=honbu,manager`)
pub fn parse_role_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check that `profile` may act on store-scoped data of `store`.
///
/// Head office reaches every store; everyone else only their own.
pub fn ensure_store_scope(profile: &Profile, store: &str) -> Result<(), AppError> {
    if profile.is_honbu() {
        return Ok(());
    }
    match profile.store.as_deref() {
        None => Err(AppError::new(ErrorCode::NoStoreAssigned)),
        Some(own) if own == store => Ok(()),
        Some(_) => Err(AppError::new(ErrorCode::StoreAccessDenied).with_detail("store", store)),
    }
}

/// The profile's own store, or a validation error when none is assigned
pub fn assigned_store(profile: &Profile) -> Result<&str, AppError> {
    profile
        .store
        .as_deref()
        .ok_or_else(|| AppError::new(ErrorCode::NoStoreAssigned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn profile(roles: &[&str], store: Option<&str>) -> Profile {
        Profile {
            uid: "u-1".into(),
            email: "a@b.c".into(),
            username: "a".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            store: store.map(str::to_string),
            region: None,
            notifications: true,
            created_at: None,
        }
    }

    const NONE: &[&str] = &[];

    #[test]
    fn test_empty_requirement_passes_any_profile() {
        assert!(can_access(&profile(&["manager"], None), NONE));
        assert!(can_access(&profile(&[], None), NONE));
    }

    #[test]
    fn test_honbu_requirement() {
        assert!(!can_access(&profile(&["manager"], None), &["honbu"]));
        assert!(can_access(&profile(&["manager", "honbu"], None), &["honbu"]));
    }

    #[test]
    fn test_no_role_hierarchy() {
        let head_office = profile(&["honbu"], None);
        assert!(!can_access(&head_office, &["manager"]));
        assert!(!can_access(&head_office, route_roles(RouteGroup::StoreReports)));
        assert!(can_access(&head_office, route_roles(RouteGroup::ShiftsWrite)));
    }

    #[test]
    fn test_route_table() {
        let employee = profile(&["employee"], Some("Mitte"));
        assert!(can_access(&employee, route_roles(RouteGroup::ShiftsRead)));
        assert!(!can_access(&employee, route_roles(RouteGroup::ShiftsWrite)));
        assert!(!can_access(&employee, route_roles(RouteGroup::Employees)));

        let store = profile(&["store"], Some("Mitte"));
        assert!(can_access(&store, route_roles(RouteGroup::StoreReports)));
        assert!(!can_access(&store, route_roles(RouteGroup::HeadOffice)));
        assert!(can_access(&store, route_roles(RouteGroup::Authenticated)));
    }

    #[test]
    fn test_evaluate_keeps_states_distinct() {
        assert_eq!(evaluate(&SessionState::Loading, &["honbu"]), AccessDecision::Loading);
        assert_eq!(evaluate(&SessionState::Loading, NONE), AccessDecision::Loading);
        assert_eq!(
            evaluate(&SessionState::SignedOut, NONE),
            AccessDecision::Unauthenticated
        );
        let manager = SessionState::SignedIn(profile(&["manager"], None));
        assert_eq!(evaluate(&manager, &["honbu"]), AccessDecision::Denied);
        assert_eq!(evaluate(&manager, NONE), AccessDecision::Granted);
    }

    #[test]
    fn test_store_scope() {
        assert!(ensure_store_scope(&profile(&["honbu"], None), "Kreuzberg").is_ok());
        assert!(ensure_store_scope(&profile(&["manager"], Some("Mitte")), "Mitte").is_ok());

        let err = ensure_store_scope(&profile(&["manager"], Some("Mitte")), "Kreuzberg")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreAccessDenied);
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        let err = ensure_store_scope(&profile(&["manager"], None), "Mitte").unwrap_err();
        assert_eq!(err.code, ErrorCode::NoStoreAssigned);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_parse_role_list() {
        let roles = parse_role_list(" honbu, ,manager,honbu");
        assert_eq!(roles.len(), 2);
        assert!(roles.contains("manager"));
    }
}
