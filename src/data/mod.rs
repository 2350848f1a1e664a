pub mod fixture;
pub mod models;

pub use fixture::{PlatformData, UserDirectory};
pub use models::{
    ContactSubmission, Deal, DealStatus, Message, MessageKind, Notification, PlatformStats, Role,
    RoleProfile, SessionUser, UserPatch, UserRecord,
};
