use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PLACEHOLDER_AVATAR: &str = "/placeholder.svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Investor,
    Entrepreneur,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Investor, Role::Entrepreneur];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Investor => "investor",
            Role::Entrepreneur => "entrepreneur",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Startup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub funding_goal: String,
    #[serde(default)]
    pub current_funding: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_range: Option<String>,
    #[serde(default)]
    pub investment_fields: Vec<String>,
    #[serde(default)]
    pub preferred_stage: Vec<String>,
    #[serde(default)]
    pub portfolio_companies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_investments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_exits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrepreneurProfile {
    #[serde(default)]
    pub industry: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_needed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default)]
    pub startups: Vec<Startup>,
}

/// Role-specific part of a user, selected by the `role` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum RoleProfile {
    Admin(AdminProfile),
    Investor(InvestorProfile),
    Entrepreneur(EntrepreneurProfile),
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Admin(_) => Role::Admin,
            RoleProfile::Investor(_) => Role::Investor,
            RoleProfile::Entrepreneur(_) => Role::Entrepreneur,
        }
    }
}

/// Never carries a password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(flatten)]
    pub profile: RoleProfile,
}

impl SessionUser {
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    pub fn avatar_or_placeholder(&self) -> &str {
        if self.avatar.trim().is_empty() {
            PLACEHOLDER_AVATAR
        } else {
            &self.avatar
        }
    }

    pub fn as_investor(&self) -> Option<&InvestorProfile> {
        match &self.profile {
            RoleProfile::Investor(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_entrepreneur(&self) -> Option<&EntrepreneurProfile> {
        match &self.profile {
            RoleProfile::Entrepreneur(p) => Some(p),
            _ => None,
        }
    }

    /// Shallow merge: every field set on the patch replaces the current value.
    /// A profile of a different role is ignored. Returns whether anything changed.
    pub fn apply(&mut self, patch: UserPatch) -> bool {
        let before = self.clone();
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(verified) = patch.verified {
            self.verified = verified;
        }
        if let Some(profile) = patch.profile {
            if profile.role() == self.role() {
                self.profile = profile;
            } else {
                log::warn!(
                    "Ignoring {} profile update for {} user {}",
                    profile.role(),
                    self.role(),
                    self.id
                );
            }
        }
        *self != before
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub verified: Option<bool>,
    pub profile: Option<RoleProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(flatten)]
    pub user: SessionUser,
    pub password: String,
}

impl UserRecord {
    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn role(&self) -> Role {
        self.user.role()
    }

    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.user.email == email && self.password == password
    }

    pub fn redact(&self) -> SessionUser {
        self.user.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    File,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    #[serde(rename = "message")]
    pub body: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
}

impl Message {
    pub fn involves_pair(&self, a: &str, b: &str) -> bool {
        (self.sender_id == a && self.receiver_id == b) || (self.sender_id == b && self.receiver_id == a)
    }

    pub fn is_unread_for(&self, user_id: &str) -> bool {
        self.receiver_id == user_id && !self.read
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub action_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Completed,
    Pending,
    Negotiating,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub investor_id: String,
    pub entrepreneur_id: String,
    pub amount: String,
    #[serde(default)]
    pub equity: String,
    pub status: DealStatus,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub platform_fee: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
    Responded,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub status: ContactStatus,
}

impl ContactSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformStats {
    pub total_users: u32,
    pub total_investors: u32,
    pub total_entrepreneurs: u32,
    pub total_deals: u32,
    pub completed_deals: u32,
    pub total_funding: String,
    pub platform_revenue: String,
    pub monthly_growth: String,
    pub success_rate: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor_json() -> serde_json::Value {
        serde_json::json!({
            "id": "investor-9",
            "email": "ivy@fund.io",
            "password": "pw",
            "role": "investor",
            "name": "Ivy",
            "investmentFields": ["AI"],
            "totalInvestments": 3
        })
    }

    #[test]
    fn record_selects_profile_by_role() {
        let record: UserRecord = serde_json::from_value(investor_json()).unwrap();
        assert_eq!(record.role(), Role::Investor);
        let investor = record.user.as_investor().unwrap();
        assert_eq!(investor.investment_fields, vec!["AI".to_string()]);
        assert_eq!(investor.total_investments, Some(3));
        assert!(!record.user.verified);
    }

    #[test]
    fn redacted_user_serializes_without_password() {
        let record: UserRecord = serde_json::from_value(investor_json()).unwrap();
        let json = serde_json::to_value(record.redact()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "investor");
        assert_eq!(json["investmentFields"][0], "AI");
    }

    #[test]
    fn credentials_are_case_sensitive() {
        let record: UserRecord = serde_json::from_value(investor_json()).unwrap();
        assert!(record.matches_credentials("ivy@fund.io", "pw"));
        assert!(!record.matches_credentials("IVY@fund.io", "pw"));
        assert!(!record.matches_credentials("ivy@fund.io", "PW"));
    }

    #[test]
    fn patch_ignores_profile_of_another_role() {
        let mut user = serde_json::from_value::<UserRecord>(investor_json()).unwrap().redact();
        let changed = user.apply(UserPatch {
            profile: Some(RoleProfile::Admin(AdminProfile::default())),
            ..Default::default()
        });
        assert!(!changed);
        assert_eq!(user.role(), Role::Investor);

        let changed = user.apply(UserPatch {
            bio: Some("Seed investor".into()),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(user.bio, "Seed investor");
        assert_eq!(user.name, "Ivy");
    }

    #[test]
    fn empty_avatar_falls_back_to_placeholder() {
        let mut user = serde_json::from_value::<UserRecord>(investor_json()).unwrap().redact();
        assert_eq!(user.avatar_or_placeholder(), PLACEHOLDER_AVATAR);
        user.avatar = "/ivy.png".into();
        assert_eq!(user.avatar_or_placeholder(), "/ivy.png");
    }

    #[test]
    fn unknown_deal_status_is_tolerated() {
        let status: DealStatus = serde_json::from_str("\"on-hold\"").unwrap();
        assert_eq!(status, DealStatus::Unknown);
    }
}
