//! Tests for user identity and account construction.

use super::*;
use rstest::rstest;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

fn hash() -> PasswordHash {
    PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA")
}

#[rstest]
#[case("test1@EXAMPLE.com", "test1@example.com")]
#[case("Test2@example.com", "Test2@example.com")]
#[case("TEST3@EXAMPLE.COM", "TEST3@example.com")]
#[case("test4@example.COM", "test4@example.com")]
#[case("  spaced@Example.org  ", "spaced@example.org")]
fn email_domain_is_lowercased(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("cook@", UserValidationError::InvalidEmail)]
fn invalid_emails_are_rejected(#[case] raw: &str, #[case] expected: UserValidationError) {
    let err = EmailAddress::new(raw).expect_err("invalid email");
    assert_eq!(err, expected);
}

#[rstest]
fn overlong_email_is_rejected() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    let err = EmailAddress::new(raw).expect_err("too long");
    assert_eq!(err, UserValidationError::EmailTooLong { max: EMAIL_MAX });
}

#[rstest]
fn local_part_may_contain_at_signs() {
    let email = EmailAddress::new("\"odd@local\"@Example.COM").expect("valid email");
    assert_eq!(email.as_ref(), "\"odd@local\"@example.com");
}

#[rstest]
fn new_accounts_are_active_regular_users() {
    let email = EmailAddress::new("cook@example.com").expect("valid email");
    let account = UserAccount::new(email.clone(), hash());
    let user = account.user();
    assert_eq!(user.email(), &email);
    assert!(user.is_active());
    assert!(!user.is_staff());
    assert!(!user.is_superuser());
}

#[rstest]
fn superusers_have_staff_and_superuser_flags() {
    let email = EmailAddress::new("admin@example.com").expect("valid email");
    let account = UserAccount::superuser(email, hash());
    assert!(account.user().is_active());
    assert!(account.user().is_staff());
    assert!(account.user().is_superuser());
}

#[rstest]
fn accounts_get_distinct_identifiers() {
    let email = EmailAddress::new("cook@example.com").expect("valid email");
    let first = UserAccount::new(email.clone(), hash());
    let second = UserAccount::new(email, hash());
    assert_ne!(first.user().id(), second.user().id());
}

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_bad_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_round_trips_through_uuid() {
    let id = UserId::new(VALID_ID).expect("valid id");
    assert_eq!(UserId::from_uuid(*id.as_uuid()), id);
    assert_eq!(id.to_string(), VALID_ID);
}

#[rstest]
fn password_hash_debug_is_redacted() {
    assert_eq!(format!("{:?}", hash()), "PasswordHash(<redacted>)");
}
