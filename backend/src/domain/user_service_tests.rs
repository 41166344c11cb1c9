//! Tests for the account service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockPasswordHasher, MockUserRepository, PasswordHashError, UserPersistenceError,
};
use crate::domain::{ErrorCode, Password};
use rstest::rstest;

const STORED_HASH: &str = "$argon2id$stored";

fn registration(email: &str) -> Registration {
    Registration::new(
        EmailAddress::new(email).expect("valid email"),
        Password::new("testpass123").expect("valid password"),
    )
}

fn account(email: &str, active: bool) -> UserAccount {
    let user = User::from_parts(
        UserId::random(),
        EmailAddress::new(email).expect("valid email"),
        active,
        false,
        false,
    );
    UserAccount::from_parts(user, PasswordHash::new(STORED_HASH))
}

fn hashing_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|password| Ok(PasswordHash::new(format!("hashed:{}", password.expose()))));
    hasher
}

fn service(
    users: MockUserRepository,
    hasher: MockPasswordHasher,
) -> UserAccountService<MockUserRepository, MockPasswordHasher> {
    UserAccountService::new(Arc::new(users), Arc::new(hasher))
}

#[rstest]
#[tokio::test]
async fn register_stores_hashed_password() {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .withf(|account| {
            account.password_hash().as_str() == "hashed:testpass123"
                && account.user().email().as_ref() == "test@example.com"
        })
        .times(1)
        .return_once(|_| Ok(()));

    let user = service(users, hashing_hasher())
        .register(registration("test@EXAMPLE.com"))
        .await
        .expect("registration succeeds");
    assert!(user.is_active());
    assert!(!user.is_staff());
}

#[rstest]
#[tokio::test]
async fn register_superuser_sets_flags() {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .withf(|account| account.user().is_superuser() && account.user().is_staff())
        .times(1)
        .return_once(|_| Ok(()));

    let user = service(users, hashing_hasher())
        .register_superuser(registration("admin@example.com"))
        .await
        .expect("registration succeeds");
    assert!(user.is_superuser());
    assert!(user.is_staff());
}

#[rstest]
#[tokio::test]
async fn duplicate_email_conflicts() {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::duplicate_email("test@example.com")));

    let error = service(users, hashing_hasher())
        .register(registration("test@example.com"))
        .await
        .expect_err("duplicate");
    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(Some(true), true, None)]
#[case(Some(false), true, Some(ErrorCode::Unauthorized))]
#[case(Some(true), false, Some(ErrorCode::Unauthorized))]
#[case(None, true, Some(ErrorCode::Unauthorized))]
#[tokio::test]
async fn authenticate_requires_known_active_user_with_matching_password(
    #[case] password_matches: Option<bool>,
    #[case] active: bool,
    #[case] expected: Option<ErrorCode>,
) {
    let stored = account("cook@example.com", active);
    let stored_id = stored.user().id().clone();
    let mut users = MockUserRepository::new();
    let known = password_matches.is_some();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(known.then_some(stored)));
    let mut hasher = MockPasswordHasher::new();
    let (expected_hash, matches) = match password_matches {
        Some(matches) => (STORED_HASH, matches),
        None => (UNKNOWN_USER_HASH, false),
    };
    hasher
        .expect_verify()
        .withf(move |password, hash| {
            password.expose() == "testpass123" && hash.as_str() == expected_hash
        })
        .times(1)
        .return_once(move |_, _| Ok(matches));

    let credentials =
        LoginCredentials::try_from_parts("cook@example.com", "testpass123").expect("credentials");
    let result = service(users, hasher).authenticate(&credentials).await;
    match (expected, result) {
        (None, Ok(id)) => assert_eq!(id, stored_id),
        (Some(code), Err(err)) => {
            assert_eq!(err.code(), code);
            assert_eq!(err.message(), INVALID_CREDENTIALS);
        }
        (expected, result) => panic!("expected {expected:?}, got {result:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn unknown_email_is_unauthorized_even_if_dummy_verification_fails() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .times(1)
        .return_once(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .times(1)
        .return_once(|_, _| Err(PasswordHashError::hash("unsupported params")));

    let credentials =
        LoginCredentials::try_from_parts("ghost@example.com", "testpass123").expect("credentials");
    let error = service(users, hasher)
        .authenticate(&credentials)
        .await
        .expect_err("unknown email");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), INVALID_CREDENTIALS);
}

#[rstest]
fn unknown_user_hash_parses_and_never_matches() {
    use crate::outbound::security::Argon2PasswordHasher;

    let hasher = Argon2PasswordHasher::new();
    let password = Password::new("testpass123").expect("valid password");
    let matches = hasher
        .verify(&password, &PasswordHash::new(UNKNOWN_USER_HASH))
        .expect("well-formed PHC string");
    assert!(!matches);
}

#[rstest]
#[tokio::test]
async fn hashing_failures_abort_registration() {
    let mut users = MockUserRepository::new();
    users.expect_insert().never();
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .return_once(|_| Err(PasswordHashError::hash("out of memory")));

    let error = service(users, hasher)
        .register(registration("test@example.com"))
        .await
        .expect_err("hashing failed");
    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn profile_of_deleted_user_requires_login() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let error = service(users, MockPasswordHasher::new())
        .fetch_profile(&UserId::random())
        .await
        .expect_err("missing user");
    assert_eq!(error.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn connection_failures_are_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::connection("refused")));

    let error = service(users, MockPasswordHasher::new())
        .fetch_profile(&UserId::random())
        .await
        .expect_err("unavailable");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
