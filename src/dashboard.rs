//! View models behind the three dashboards. Everything here is read-only
//! filtering over the fixture and the message store.

use crate::data::{
    ContactSubmission, Deal, Notification, PlatformData, PlatformStats, Role, SessionUser,
    UserRecord,
};
use crate::messaging::MessageStore;
use crate::utils::contains_ignore_case;

/// Directory entries shown under "Recent Users".
const RECENT_USERS: std::ops::Range<usize> = 1..5;

#[derive(Debug, Clone, PartialEq)]
pub struct DealRow<'a> {
    pub deal: &'a Deal,
    pub investor: Option<&'a UserRecord>,
    pub entrepreneur: Option<&'a UserRecord>,
}

impl DealRow<'_> {
    pub fn parties(&self) -> String {
        fn name(record: Option<&UserRecord>) -> &str {
            record.map(|r| r.user.name.as_str()).unwrap_or("Unknown")
        }
        format!("{} → {}", name(self.investor), name(self.entrepreneur))
    }
}

#[derive(Debug, Clone)]
pub struct AdminDashboard<'a> {
    pub stats: &'a PlatformStats,
    pub recent_users: Vec<&'a UserRecord>,
    pub managed_users: Vec<&'a UserRecord>,
    pub deals: Vec<DealRow<'a>>,
    pub notifications: Vec<&'a Notification>,
    pub pending: usize,
    pub contact_submissions: &'a [ContactSubmission],
}

impl<'a> AdminDashboard<'a> {
    pub fn build(data: &'a PlatformData, admin: &SessionUser) -> Self {
        let users = data.users.as_slice();
        let recent_users = users
            .get(RECENT_USERS.start..RECENT_USERS.end.min(users.len()))
            .unwrap_or_default()
            .iter()
            .collect();
        let managed_users = users.iter().filter(|u| u.role() != Role::Admin).collect();
        let deals = data
            .deals
            .iter()
            .map(|deal| DealRow {
                deal,
                investor: data.users.find_by_id(&deal.investor_id),
                entrepreneur: data.users.find_by_id(&deal.entrepreneur_id),
            })
            .collect();
        let notifications = data.notifications_for(&admin.id);
        let pending = notifications.iter().filter(|n| !n.read).count();
        Self {
            stats: &data.platform_stats,
            recent_users,
            managed_users,
            deals,
            notifications,
            pending,
            contact_submissions: &data.contact_submissions,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvestorDashboard<'a> {
    pub profile: Option<&'a UserRecord>,
    pub entrepreneurs: Vec<&'a UserRecord>,
    pub unread_messages: usize,
}

impl<'a> InvestorDashboard<'a> {
    pub fn build(data: &'a PlatformData, investor: &SessionUser, messages: &MessageStore, query: &str) -> Self {
        let entrepreneurs = data
            .users
            .with_role(Role::Entrepreneur)
            .filter(|u| entrepreneur_matches(u, query))
            .collect();
        Self {
            profile: data.users.find_by_id(&investor.id),
            entrepreneurs,
            unread_messages: messages.get_unread_count(&investor.id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EntrepreneurDashboard<'a> {
    pub profile: Option<&'a UserRecord>,
    pub investors: Vec<&'a UserRecord>,
    pub unread_messages: usize,
}

impl<'a> EntrepreneurDashboard<'a> {
    pub fn build(data: &'a PlatformData, founder: &SessionUser, messages: &MessageStore, query: &str) -> Self {
        let investors = data
            .users
            .with_role(Role::Investor)
            .filter(|u| investor_matches(u, query))
            .collect();
        Self {
            profile: data.users.find_by_id(&founder.id),
            investors,
            unread_messages: messages.get_unread_count(&founder.id),
        }
    }

    pub fn startups(&self) -> &'a [crate::data::models::Startup] {
        self.profile
            .and_then(|p| p.user.as_entrepreneur())
            .map(|e| e.startups.as_slice())
            .unwrap_or_default()
    }
}

/// Name, company or industry.
pub fn entrepreneur_matches(record: &UserRecord, query: &str) -> bool {
    let user = &record.user;
    contains_ignore_case(&user.name, query)
        || contains_ignore_case(&user.company, query)
        || user
            .as_entrepreneur()
            .is_some_and(|e| contains_ignore_case(&e.industry, query))
}

/// Name, company or any investment field.
pub fn investor_matches(record: &UserRecord, query: &str) -> bool {
    let user = &record.user;
    contains_ignore_case(&user.name, query)
        || contains_ignore_case(&user.company, query)
        || user.as_investor().is_some_and(|i| {
            i.investment_fields
                .iter()
                .any(|field| contains_ignore_case(field, query))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PlatformData, MessageStore) {
        let data = PlatformData::bundled().unwrap();
        let messages = MessageStore::new(data.messages.clone());
        (data, messages)
    }

    fn session(data: &PlatformData, id: &str) -> SessionUser {
        data.users.find_by_id(id).unwrap().redact()
    }

    #[test]
    fn admin_view_resolves_deals_and_pending_notifications() {
        let (data, _) = setup();
        let admin = session(&data, "admin-1");
        let view = AdminDashboard::build(&data, &admin);

        assert_eq!(view.recent_users.len(), 4);
        assert_eq!(view.recent_users[0].id(), data.users.as_slice()[1].id());
        assert!(view.managed_users.iter().all(|u| u.role() != Role::Admin));
        assert_eq!(view.deals.len(), data.deals.len());
        assert_eq!(view.deals[0].parties(), "Sarah Johnson → Areeba Khan");
        assert!(view.notifications.iter().all(|n| n.user_id == "admin-1"));
        assert_eq!(view.pending, 2);
        assert_eq!(view.contact_submissions.len(), 2);
    }

    #[test]
    fn admin_view_outlives_the_session_user() {
        let (data, _) = setup();
        let view = {
            let admin = session(&data, "admin-1");
            AdminDashboard::build(&data, &admin)
        };
        assert_eq!(view.pending, 2);
        assert_eq!(view.deals[1].parties(), "Sarah Johnson → David Okafor");
    }

    #[test]
    fn deals_with_unknown_parties_resolve_to_none() {
        let (mut data, _) = setup();
        data.deals[0].investor_id = "ghost".into();
        let admin = session(&data, "admin-1");
        let view = AdminDashboard::build(&data, &admin);
        assert!(view.deals[0].investor.is_none());
        assert!(view.deals[0].parties().starts_with("Unknown →"));
    }

    #[test]
    fn investor_search_covers_name_company_and_industry() {
        let (data, messages) = setup();
        let investor = session(&data, "investor-1");

        let all = InvestorDashboard::build(&data, &investor, &messages, "");
        assert_eq!(all.entrepreneurs.len(), data.users.with_role(Role::Entrepreneur).count());
        assert_eq!(all.unread_messages, messages.get_unread_count("investor-1"));
        assert_eq!(all.profile.unwrap().id(), "investor-1");

        let by_industry = InvestorDashboard::build(&data, &investor, &messages, "cleantech");
        assert_eq!(by_industry.entrepreneurs.len(), 1);
        assert_eq!(by_industry.entrepreneurs[0].id(), "entrepreneur-2");

        let by_company = InvestorDashboard::build(&data, &investor, &messages, "MEDISYNC");
        assert_eq!(by_company.entrepreneurs[0].id(), "entrepreneur-3");

        let none = InvestorDashboard::build(&data, &investor, &messages, "quantum");
        assert!(none.entrepreneurs.is_empty());
    }

    #[test]
    fn entrepreneur_search_covers_investment_fields() {
        let (data, messages) = setup();
        let founder = session(&data, "entrepreneur-1");

        let view = EntrepreneurDashboard::build(&data, &founder, &messages, "biotech");
        assert_eq!(view.investors.len(), 1);
        assert_eq!(view.investors[0].id(), "investor-2");
        assert_eq!(view.unread_messages, 1);
        assert_eq!(view.startups().len(), 2);

        let view = EntrepreneurDashboard::build(&data, &founder, &messages, "horizon");
        assert_eq!(view.investors[0].id(), "investor-1");
    }
}
