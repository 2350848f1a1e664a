use crate::data::models::{
    ContactSubmission, Deal, Message, Notification, PlatformStats, Role, UserRecord,
};
use crate::error::FixtureError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUNDLED_FIXTURE: &str = include_str!("../../data/platform-data.json");

static BUNDLED: OnceCell<PlatformData> = OnceCell::new();

/// The static dataset standing in for a backend. Loaded once, never written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformData {
    pub users: UserDirectory,
    pub messages: Vec<Message>,
    pub notifications: Vec<Notification>,
    pub deals: Vec<Deal>,
    pub contact_submissions: Vec<ContactSubmission>,
    pub platform_stats: PlatformStats,
}

impl PlatformData {
    pub fn from_json(text: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let text = fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_json(&text)?;
        log::info!(
            "Loaded fixture {} ({} users, {} messages)",
            path.display(),
            data.users.len(),
            data.messages.len()
        );
        Ok(data)
    }

    /// The dataset compiled into the binary.
    pub fn bundled() -> Result<Self, FixtureError> {
        BUNDLED
            .get_or_try_init(|| Self::from_json(BUNDLED_FIXTURE))
            .cloned()
    }

    pub fn notifications_for(&self, user_id: &str) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| n.user_id == user_id).collect()
    }
}

/// Read-only table of every account in the fixture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory(Vec<UserRecord>);

impl UserDirectory {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserRecord> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[UserRecord] {
        &self.0
    }

    pub fn find_by_credentials(&self, email: &str, password: &str) -> Option<&UserRecord> {
        self.0.iter().find(|u| u.matches_credentials(email, password))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&UserRecord> {
        self.0.iter().find(|u| u.id() == id)
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &UserRecord> {
        self.0.iter().filter(move |u| u.role() == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_fixture_parses() {
        let data = PlatformData::bundled().unwrap();
        assert!(!data.users.is_empty());
        assert!(!data.messages.is_empty());
        assert!(!data.deals.is_empty());
        assert!(data.platform_stats.total_users > 0);
        for role in Role::ALL {
            assert!(data.users.with_role(role).next().is_some(), "no {role} in fixture");
        }
    }

    #[test]
    fn demo_accounts_are_present() {
        let data = PlatformData::bundled().unwrap();
        let admin = data.users.find_by_credentials("admin@imeer.ai", "Admin123").unwrap();
        assert_eq!(admin.role(), Role::Admin);
        let investor = data.users.find_by_credentials("investor@imeer.ai", "investor").unwrap();
        assert_eq!(investor.role(), Role::Investor);
        let founder = data
            .users
            .find_by_credentials("entrepreneur@imeer.ai", "entrepreneur")
            .unwrap();
        assert_eq!(founder.role(), Role::Entrepreneur);
        assert!(!founder.user.as_entrepreneur().unwrap().startups.is_empty());
    }

    #[test]
    fn bundled_copies_are_independent() {
        let mut first = PlatformData::bundled().unwrap();
        first.messages.clear();
        let second = PlatformData::bundled().unwrap();
        assert!(!second.messages.is_empty());
    }

    #[test]
    fn notifications_outlive_the_id_they_were_filtered_by() {
        let data = PlatformData::bundled().unwrap();
        let found = {
            let id = String::from("admin-1");
            data.notifications_for(&id)
        };
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|n| n.user_id == "admin-1"));
        assert!(data.notifications_for("nobody").is_empty());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let data = PlatformData::from_json(r#"{ "users": [] }"#).unwrap();
        assert!(data.messages.is_empty());
        assert!(data.contact_submissions.is_empty());
        assert_eq!(data.platform_stats, PlatformStats::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = PlatformData::load(Path::new("/nonexistent/platform-data.json")).unwrap_err();
        assert!(matches!(err, FixtureError::Read { .. }));
    }
}
