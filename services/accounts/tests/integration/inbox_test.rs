use uuid::Uuid;

use murmur_accounts::error::AccountsServiceError;
use murmur_accounts::usecase::inbox::{
    DeleteMessageUseCase, GetAcceptanceUseCase, ListMessagesUseCase, SendMessageInput,
    SendMessageUseCase, SetAcceptanceUseCase,
};

use crate::helpers::{
    MockAccountRepo, MockMessageRepo, message_for, unverified_account, verified_account,
};

const CONTENT: &str = "You gave a great talk today!";

fn send(username: &str, content: &str) -> SendMessageInput {
    SendMessageInput {
        username: username.to_owned(),
        content: content.to_owned(),
    }
}

#[tokio::test]
async fn should_toggle_acceptance() {
    let account = verified_account("alice", "a@x.com");
    let repo = MockAccountRepo::new(vec![account.clone()]);

    let stored = SetAcceptanceUseCase {
        accounts: repo.clone(),
    }
    .execute(account.id, false)
    .await
    .unwrap();
    assert!(!stored);

    let current = GetAcceptanceUseCase { accounts: repo }
        .execute(account.id)
        .await
        .unwrap();
    assert!(!current);
}

#[tokio::test]
async fn should_return_not_found_when_toggling_missing_account() {
    let result = SetAcceptanceUseCase {
        accounts: MockAccountRepo::empty(),
    }
    .execute(Uuid::now_v7(), true)
    .await;

    assert!(matches!(result, Err(AccountsServiceError::AccountNotFound)));
}

#[tokio::test]
async fn should_deliver_message_to_accepting_verified_owner() {
    let account = verified_account("alice", "a@x.com");
    let messages = MockMessageRepo::empty();
    let stored = messages.messages_handle();

    let sent = SendMessageUseCase {
        accounts: MockAccountRepo::new(vec![account.clone()]),
        messages,
    }
    .execute(send("alice", CONTENT))
    .await
    .unwrap();

    assert_eq!(sent.account_id, account.id);
    let stored = stored.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].content, CONTENT);
}

#[tokio::test]
async fn should_store_trimmed_content() {
    let messages = MockMessageRepo::empty();
    let stored = messages.messages_handle();
    let padded = format!("   {}   ", "x".repeat(300));

    SendMessageUseCase {
        accounts: MockAccountRepo::new(vec![verified_account("alice", "a@x.com")]),
        messages,
    }
    .execute(send("alice", &padded))
    .await
    .unwrap();

    assert_eq!(stored.lock().unwrap()[0].content, "x".repeat(300));
}

#[tokio::test]
async fn should_refuse_message_when_not_accepting() {
    let mut account = verified_account("alice", "a@x.com");
    account.is_accepting_messages = false;
    let messages = MockMessageRepo::empty();
    let stored = messages.messages_handle();

    let result = SendMessageUseCase {
        accounts: MockAccountRepo::new(vec![account]),
        messages,
    }
    .execute(send("alice", CONTENT))
    .await;

    assert!(
        matches!(result, Err(AccountsServiceError::NotAcceptingMessages)),
        "expected NotAcceptingMessages, got {result:?}"
    );
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_deliver_to_unverified_username() {
    let result = SendMessageUseCase {
        accounts: MockAccountRepo::new(vec![unverified_account("alice", "a@x.com", "123456")]),
        messages: MockMessageRepo::empty(),
    }
    .execute(send("alice", CONTENT))
    .await;

    assert!(matches!(result, Err(AccountsServiceError::AccountNotFound)));
}

#[tokio::test]
async fn should_reject_short_and_long_content() {
    let uc = SendMessageUseCase {
        accounts: MockAccountRepo::new(vec![verified_account("alice", "a@x.com")]),
        messages: MockMessageRepo::empty(),
    };

    match uc.execute(send("alice", "too short")).await {
        Err(AccountsServiceError::Validation(msg)) => {
            assert_eq!(msg, "Content must be at least 10 characters");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    match uc.execute(send("alice", &"x".repeat(301))).await {
        Err(AccountsServiceError::Validation(msg)) => {
            assert_eq!(msg, "Content must not be longer than 300 characters");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn should_list_own_messages_newest_first() {
    let owner = Uuid::now_v7();
    let other = Uuid::now_v7();
    let repo = MockMessageRepo::new(vec![
        message_for(owner, "older message here", 60),
        message_for(other, "someone else's message", 30),
        message_for(owner, "newer message here", 10),
    ]);

    let listed = ListMessagesUseCase { messages: repo }
        .execute(owner)
        .await
        .unwrap();

    let contents: Vec<&str> = listed.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["newer message here", "older message here"]);
}

#[tokio::test]
async fn should_delete_only_own_message() {
    let owner = Uuid::now_v7();
    let intruder = Uuid::now_v7();
    let message = message_for(owner, "delete me please", 0);
    let repo = MockMessageRepo::new(vec![message.clone()]);
    let stored = repo.messages_handle();
    let uc = DeleteMessageUseCase { messages: repo };

    let result = uc.execute(intruder, message.id).await;
    assert!(
        matches!(result, Err(AccountsServiceError::MessageNotFound)),
        "expected MessageNotFound, got {result:?}"
    );
    assert_eq!(stored.lock().unwrap().len(), 1);

    uc.execute(owner, message.id).await.unwrap();
    assert!(stored.lock().unwrap().is_empty());

    let again = uc.execute(owner, message.id).await;
    assert!(matches!(again, Err(AccountsServiceError::MessageNotFound)));
}
