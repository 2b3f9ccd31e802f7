//! User directory listing (search, filter, sort, page)

use serde::{Deserialize, Serialize};

use crate::models::Profile;

pub const DEFAULT_PAGE_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// `GET /users` query string
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserQuery {
    /// Case-insensitive email substring
    pub q: Option<String>,
    pub role: Option<String>,
    pub store: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
    /// 1-based
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl UserQuery {
    fn matches(&self, profile: &Profile) -> bool {
        let q_ok = self
            .q
            .as_deref()
            .filter(|q| !q.is_empty())
            .is_none_or(|q| profile.email.to_lowercase().contains(&q.to_lowercase()));
        let role_ok = self
            .role
            .as_deref()
            .filter(|r| !r.is_empty())
            .is_none_or(|r| profile.has_role(r));
        let store_ok = self
            .store
            .as_deref()
            .filter(|s| !s.is_empty())
            .is_none_or(|s| profile.store.as_deref().unwrap_or_default() == s);
        q_ok && role_ok && store_ok
    }

    pub fn apply(&self, profiles: Vec<Profile>) -> Page<Profile> {
        let mut filtered: Vec<Profile> = profiles.into_iter().filter(|p| self.matches(p)).collect();
        filtered.sort_by(|a, b| match self.sort {
            SortOrder::Asc => a.email.cmp(&b.email),
            SortOrder::Desc => b.email.cmp(&a.email),
        });

        let page_size = self.page_size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE);
        let total = filtered.len() as u64;
        let total_pages = (total.div_ceil(u64::from(page_size)) as u32).max(1);
        let page = self.page.unwrap_or(1).clamp(1, total_pages);
        let start = ((page - 1) * page_size) as usize;
        let data = filtered
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Page {
            data,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str, roles: &[&str], store: Option<&str>) -> Profile {
        Profile {
            uid: email.into(),
            email: email.into(),
            username: email.into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            store: store.map(str::to_string),
            region: None,
            notifications: true,
            created_at: None,
        }
    }

    fn directory() -> Vec<Profile> {
        vec![
            profile("zoe@cb.de", &["store"], Some("Mitte")),
            profile("anna@cb.de", &["honbu"], None),
            profile("max@cb.de", &["manager", "store"], Some("Kreuzberg")),
            profile("lena@other.de", &["employee"], Some("Mitte")),
        ]
    }

    #[test]
    fn test_filters_combine() {
        let query = UserQuery {
            q: Some("CB.DE".into()),
            role: Some("store".into()),
            ..Default::default()
        };
        let page = query.apply(directory());
        let emails: Vec<_> = page.data.iter().map(|p| p.email.as_str()).collect();
        assert_eq!(emails, vec!["max@cb.de", "zoe@cb.de"]);

        let by_store = UserQuery {
            store: Some("Mitte".into()),
            sort: SortOrder::Desc,
            ..Default::default()
        };
        let emails: Vec<_> = by_store
            .apply(directory())
            .data
            .into_iter()
            .map(|p| p.email)
            .collect();
        assert_eq!(emails, vec!["zoe@cb.de", "lena@other.de"]);
    }

    #[test]
    fn test_paging() {
        let many: Vec<_> = (0..19)
            .map(|i| profile(&format!("u{i:02}@cb.de"), &["store"], None))
            .collect();
        let page = UserQuery::default().apply(many.clone());
        assert_eq!(page.page_size, 8);
        assert_eq!(page.total, 19);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 8);

        let last = UserQuery {
            page: Some(9),
            ..Default::default()
        }
        .apply(many);
        assert_eq!(last.page, 3);
        assert_eq!(last.data.len(), 3);
        assert_eq!(last.data[0].email, "u16@cb.de");
    }

    #[test]
    fn test_empty_directory_has_one_page() {
        let page = UserQuery::default().apply(vec![]);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.data.is_empty());
    }
}
