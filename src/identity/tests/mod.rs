//! Unit tests for identity, sessions, and route access.


use crate::identity::domain::{
    EmailAddress, PasswordDigest, Role, Session, User, UserId, UserProfile,
};
use crate::location::domain::LocationId;
use mockable::DefaultClock;

pub(super) fn profile(id: u64, role: Role, locations: &[&str]) -> UserProfile {
    UserProfile {
        id: UserId::new(id).expect("valid user id"),
        name: format!("User {id}"),
        email: EmailAddress::new(format!("user{id}@example.com")).expect("valid email"),
        role,
        assigned_location_ids: locations
            .iter()
            .map(|raw| LocationId::new(*raw).expect("valid location id"))
            .collect(),
    }
}

pub(super) fn user(id: u64, role: Role, password: &str) -> User {
    let digest = PasswordDigest::from_plaintext(password).expect("non-empty password");
    User::new(profile(id, role, &[]), digest).expect("valid user")
}

pub(super) fn session_for(role: Role) -> Session {
    Session::open(profile(1, role, &[]), &DefaultClock)
}
