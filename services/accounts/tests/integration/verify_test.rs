use chrono::{Duration, Utc};

use murmur_accounts::error::AccountsServiceError;
use murmur_accounts::usecase::username::CheckUsernameUseCase;
use murmur_accounts::usecase::verify::{VerifyAccountInput, VerifyAccountUseCase};

use crate::helpers::{MockAccountRepo, unverified_account, verified_account};

fn verify_input(username: &str, code: &str) -> VerifyAccountInput {
    VerifyAccountInput {
        username: username.to_owned(),
        code: code.to_owned(),
    }
}

#[tokio::test]
async fn should_verify_with_correct_code() {
    let account = unverified_account("alice", "a@x.com", "482913");
    let repo = MockAccountRepo::new(vec![account.clone()]);
    let accounts = repo.accounts_handle();

    let id = VerifyAccountUseCase { accounts: repo }
        .execute(verify_input("alice", "482913"))
        .await
        .unwrap();

    assert_eq!(id, account.id);
    assert!(accounts.lock().unwrap()[0].is_verified);
}

#[tokio::test]
async fn should_reject_wrong_code_and_leave_account_unverified() {
    let repo = MockAccountRepo::new(vec![unverified_account("alice", "a@x.com", "482913")]);
    let accounts = repo.accounts_handle();

    let result = VerifyAccountUseCase { accounts: repo }
        .execute(verify_input("alice", "111111"))
        .await;

    assert!(
        matches!(result, Err(AccountsServiceError::IncorrectCode)),
        "expected IncorrectCode, got {result:?}"
    );
    assert!(!accounts.lock().unwrap()[0].is_verified);
}

#[tokio::test]
async fn should_reject_expired_code_and_leave_account_unverified() {
    let mut account = unverified_account("alice", "a@x.com", "482913");
    account.verification_code_expiry = Utc::now() - Duration::seconds(1);
    let repo = MockAccountRepo::new(vec![account]);
    let accounts = repo.accounts_handle();

    let result = VerifyAccountUseCase { accounts: repo }
        .execute(verify_input("alice", "482913"))
        .await;

    assert!(
        matches!(result, Err(AccountsServiceError::CodeExpired)),
        "expected CodeExpired, got {result:?}"
    );
    assert!(!accounts.lock().unwrap()[0].is_verified);
}

#[tokio::test]
async fn should_report_expiry_even_when_code_is_wrong() {
    let mut account = unverified_account("alice", "a@x.com", "482913");
    account.verification_code_expiry = Utc::now() - Duration::minutes(5);
    let repo = MockAccountRepo::new(vec![account]);

    let result = VerifyAccountUseCase { accounts: repo }
        .execute(verify_input("alice", "111111"))
        .await;

    assert!(matches!(result, Err(AccountsServiceError::CodeExpired)));
}

#[tokio::test]
async fn should_pick_the_candidate_whose_code_matches() {
    // Two pending sign-ups share a username under different emails
    let first = unverified_account("alice", "a@x.com", "111111");
    let second = unverified_account("alice", "b@y.com", "222222");
    let repo = MockAccountRepo::new(vec![first.clone(), second.clone()]);
    let accounts = repo.accounts_handle();

    let id = VerifyAccountUseCase { accounts: repo }
        .execute(verify_input("alice", "222222"))
        .await
        .unwrap();

    assert_eq!(id, second.id);
    let accounts = accounts.lock().unwrap();
    assert!(!accounts.iter().find(|a| a.id == first.id).unwrap().is_verified);
    assert!(accounts.iter().find(|a| a.id == second.id).unwrap().is_verified);
}

#[tokio::test]
async fn should_lose_the_verified_username_race() {
    let first = unverified_account("alice", "a@x.com", "111111");
    let second = unverified_account("alice", "b@y.com", "222222");
    let repo = MockAccountRepo::new(vec![first, second]);
    let uc = VerifyAccountUseCase { accounts: repo };

    uc.execute(verify_input("alice", "111111")).await.unwrap();
    let result = uc.execute(verify_input("alice", "222222")).await;

    assert!(
        matches!(result, Err(AccountsServiceError::UsernameTaken)),
        "expected UsernameTaken, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_username() {
    let result = VerifyAccountUseCase {
        accounts: MockAccountRepo::empty(),
    }
    .execute(verify_input("nobody", "123456"))
    .await;

    assert!(matches!(result, Err(AccountsServiceError::AccountNotFound)));
}

#[tokio::test]
async fn should_return_already_verified_when_only_verified_owner_exists() {
    let repo = MockAccountRepo::new(vec![verified_account("alice", "a@x.com")]);

    let result = VerifyAccountUseCase { accounts: repo }
        .execute(verify_input("alice", "123456"))
        .await;

    assert!(matches!(result, Err(AccountsServiceError::AlreadyVerified)));
}

#[tokio::test]
async fn should_reject_malformed_code() {
    let repo = MockAccountRepo::new(vec![unverified_account("alice", "a@x.com", "482913")]);

    let result = VerifyAccountUseCase { accounts: repo }
        .execute(verify_input("alice", "48291"))
        .await;

    match result {
        Err(AccountsServiceError::Validation(msg)) => {
            assert_eq!(msg, "Verification code must be 6 digits");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── username availability ────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_username_available_when_only_unverified_holders_exist() {
    let repo = MockAccountRepo::new(vec![unverified_account("alice", "a@x.com", "111111")]);

    let available = CheckUsernameUseCase { accounts: repo }
        .execute("alice")
        .await
        .unwrap();

    assert!(available);
}

#[tokio::test]
async fn should_report_username_unavailable_when_verified_owner_exists() {
    let repo = MockAccountRepo::new(vec![verified_account("alice", "a@x.com")]);

    let available = CheckUsernameUseCase { accounts: repo }
        .execute("alice")
        .await
        .unwrap();

    assert!(!available);
}

#[tokio::test]
async fn should_reject_invalid_username_in_availability_check() {
    let result = CheckUsernameUseCase {
        accounts: MockAccountRepo::empty(),
    }
    .execute("a")
    .await;

    assert!(matches!(result, Err(AccountsServiceError::Validation(_))));
}
