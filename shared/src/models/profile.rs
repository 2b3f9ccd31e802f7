//! User Profile Model
//!
//! A profile is the role/store record attached to an authenticated identity.
//! Persisted records are loose (older ones carry a singular `role` string,
//! sometimes combining roles with `+`); they are read as [`StoredProfile`] and
//! normalized into [`Profile`] before anything else looks at them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::util::email_local_part;

/// Known role names. Roles are plain strings; unknown names are kept as-is.
pub mod roles {
    /// Head office, cross-store visibility
    pub const HONBU: &str = "honbu";
    pub const MANAGER: &str = "manager";
    pub const STORE: &str = "store";
    pub const STORE_ADMIN: &str = "store-admin";
    pub const EMPLOYEE: &str = "employee";
    pub const STAFF: &str = "staff";

    /// Role given to an identity that has no stored profile yet
    pub const DEFAULT: &str = STORE;

    pub const ALL: [&str; 6] = [HONBU, MANAGER, STORE, STORE_ADMIN, EMPLOYEE, STAFF];
}

/// Authenticated identity as handed over by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

/// Profile record exactly as persisted, before normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    /// Legacy singular role, may be `"employee+manager"`
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub notifications: Option<bool>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<i64>,
}

/// Normalized profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub uid: String,
    pub email: String,
    pub username: String,
    pub roles: BTreeSet<String>,
    pub store: Option<String>,
    pub region: Option<String>,
    pub notifications: bool,
    pub created_at: Option<i64>,
}

impl Profile {
    /// Profile synthesized for an identity without a stored record
    pub fn default_for(identity: &Identity) -> Self {
        Self {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            username: email_local_part(&identity.email).to_string(),
            roles: BTreeSet::from([roles::DEFAULT.to_string()]),
            store: None,
            region: None,
            notifications: true,
            created_at: None,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    pub fn is_honbu(&self) -> bool {
        self.has_role(roles::HONBU)
    }
}

/// Union roles from the array field and the legacy `role` string.
///
/// Names are trimmed, empties dropped, duplicates collapse.
pub fn normalize_roles(list: Option<&[String]>, legacy: Option<&str>) -> BTreeSet<String> {
    let from_list = list.into_iter().flatten().map(String::as_str);
    let from_legacy = legacy.into_iter().flat_map(|r| r.split('+'));
    from_list
        .chain(from_legacy)
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl StoredProfile {
    /// Normalize into a [`Profile`] for `identity`.
    ///
    /// A record that yields no roles at all falls back to the default role.
    pub fn normalize(self, identity: &Identity) -> Profile {
        let mut role_set = normalize_roles(self.roles.as_deref(), self.role.as_deref());
        if role_set.is_empty() {
            role_set.insert(roles::DEFAULT.to_string());
        }
        let email = non_blank(self.email).unwrap_or_else(|| identity.email.clone());
        let username =
            non_blank(self.username).unwrap_or_else(|| email_local_part(&email).to_string());
        Profile {
            uid: identity.uid.clone(),
            email,
            username,
            roles: role_set,
            store: non_blank(self.store),
            region: non_blank(self.region),
            notifications: self.notifications.unwrap_or(true),
            created_at: self.created_at,
        }
    }
}

/// Resolve the profile for an authenticated identity.
///
/// Pure: the lookup happened before; `None` means no record exists.
pub fn resolve_profile(identity: &Identity, stored: Option<StoredProfile>) -> Profile {
    match stored {
        Some(record) => record.normalize(identity),
        None => Profile::default_for(identity),
    }
}

/// Create/update payload for the user-management endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpsert {
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub store: Option<String>,
    pub region: Option<String>,
}

impl ProfileUpsert {
    pub fn role_set(&self) -> BTreeSet<String> {
        normalize_roles(Some(&self.roles), None)
    }
}

/// Self-service settings update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub store: Option<String>,
    pub notifications: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new("u-1", "mia@coffeebloom.de")
    }

    #[test]
    fn test_missing_record_gets_default_profile() {
        let profile = resolve_profile(&identity(), None);
        assert_eq!(profile.uid, "u-1");
        assert_eq!(profile.username, "mia");
        assert_eq!(profile.roles, BTreeSet::from(["store".to_string()]));
        assert_eq!(profile.store, None);
        assert_eq!(profile.region, None);
        assert!(profile.notifications);
    }

    #[test]
    fn test_legacy_combined_role_is_split() {
        let stored = StoredProfile {
            role: Some("employee+manager".into()),
            ..Default::default()
        };
        let profile = resolve_profile(&identity(), Some(stored));
        assert!(profile.has_role("employee"));
        assert!(profile.has_role("manager"));
        assert_eq!(profile.roles.len(), 2);
    }

    #[test]
    fn test_array_and_legacy_roles_union() {
        let stored = StoredProfile {
            roles: Some(vec![" honbu ".into(), "manager".into(), "".into()]),
            role: Some("manager".into()),
            store: Some("Mitte".into()),
            ..Default::default()
        };
        let profile = stored.normalize(&identity());
        assert_eq!(
            profile.roles,
            BTreeSet::from(["honbu".to_string(), "manager".to_string()])
        );
        assert!(profile.is_honbu());
        assert_eq!(profile.store.as_deref(), Some("Mitte"));
    }

    #[test]
    fn test_blank_fields_normalize_to_none() {
        let stored = StoredProfile {
            roles: Some(vec![]),
            store: Some("  ".into()),
            notifications: Some(false),
            ..Default::default()
        };
        let profile = stored.normalize(&identity());
        assert_eq!(profile.store, None);
        assert!(!profile.notifications);
        assert_eq!(profile.roles, BTreeSet::from(["store".to_string()]));
    }

    #[test]
    fn test_stored_profile_accepts_loose_json() {
        let stored: StoredProfile =
            serde_json::from_str(r#"{"role":"store","createdAt":1700000000000}"#).unwrap();
        assert_eq!(stored.role.as_deref(), Some("store"));
        assert_eq!(stored.created_at, Some(1_700_000_000_000));
        assert!(stored.roles.is_none());
    }

    #[test]
    fn test_unknown_roles_are_kept() {
        let roles = normalize_roles(Some(&["auditor".to_string()]), Some("store"));
        assert!(roles.contains("auditor"));
        assert!(roles.contains("store"));
    }
}
