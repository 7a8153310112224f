//! Account lifecycle against the in-memory store: registration, the shared
//! handle namespace, uniqueness rollback, and deletion cascades.

use std::sync::Arc;

use videx_core::api_types::{CreateChannelRequest, CreateUserRequest, UpdateUserRequest};
use videx_core::services::{ChannelService, UserService};
use videx_core::store::{AccountStore, MemoryStore};
use videx_core::Error;
use videx_model::{ChannelRole, Handle};

fn store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::new())
}

fn user_body(handle: &str, email: &str) -> CreateUserRequest {
    CreateUserRequest {
        handle: handle.to_string(),
        display_name: format!("{handle} display"),
        email: email.to_string(),
        avatar: None,
    }
}

fn channel_body(handle: &str) -> CreateChannelRequest {
    CreateChannelRequest {
        handle: handle.to_string(),
        display_name: format!("{handle} channel"),
        avatar: None,
    }
}

#[tokio::test]
async fn registration_round_trips_through_the_store() {
    let store = store();
    let users = UserService::new(store.clone());

    let alice = users
        .register(user_body("alice", "alice@example.com"))
        .await
        .unwrap();

    let fetched = store.user(&alice.id).await.unwrap().unwrap();
    assert_eq!(fetched.public.handle.as_str(), "alice");
    assert_eq!(fetched.private.email.as_str(), "alice@example.com");
    assert!(fetched.channels.is_empty());
}

#[tokio::test]
async fn duplicate_handle_is_a_conflict_with_no_partial_record() {
    let store = store();
    let users = UserService::new(store.clone());

    users
        .register(user_body("alice", "alice@example.com"))
        .await
        .unwrap();
    let err = users
        .register(user_body("alice", "second@example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HandleInUse(ref v) if v == "alice"));
    assert_eq!(err.status(), 400);
    assert_eq!(err.code(), "HANDLE_IN_USE");

    // The loser left nothing behind: its email is free for the next
    // registration.
    assert_eq!(store.users().await.unwrap().len(), 1);
    users
        .register(user_body("bob", "second@example.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn handle_uniqueness_ignores_case() {
    let users = UserService::new(store());

    users
        .register(user_body("AliceSmith", "one@example.com"))
        .await
        .unwrap();
    let err = users
        .register(user_body("alicesmith", "two@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "HANDLE_IN_USE");
}

#[tokio::test]
async fn duplicate_email_rolls_the_handle_reservation_back() {
    let store = store();
    let users = UserService::new(store.clone());

    users
        .register(user_body("alice", "shared@example.com"))
        .await
        .unwrap();
    let err = users
        .register(user_body("bob", "shared@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::EmailInUse));
    assert_eq!(err.code(), "EMAIL_IN_USE");

    // "bob" must not be burned by the failed attempt.
    users
        .register(user_body("bob", "bob@example.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn users_and_channels_share_one_handle_namespace() {
    let store = store();
    let users = UserService::new(store.clone());
    let channels = ChannelService::new(store.clone());

    let founder = users
        .register(user_body("studio", "studio@example.com"))
        .await
        .unwrap();

    let err = channels
        .create(founder.id, channel_body("Studio"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HandleInUse(_)));

    // A free handle works, and resolves to the channel afterwards.
    let channel = channels
        .create(founder.id, channel_body("studio-films"))
        .await
        .unwrap();
    let resolved = store
        .resolve_handle(&Handle::new("STUDIO-FILMS").unwrap())
        .await
        .unwrap();
    assert_eq!(
        resolved,
        Some(videx_model::AccountID::Channel(channel.id))
    );
}

#[tokio::test]
async fn updating_a_handle_frees_the_old_one() {
    let store = store();
    let users = UserService::new(store.clone());

    let alice = users
        .register(user_body("alice", "alice@example.com"))
        .await
        .unwrap();
    users
        .update(
            alice.id,
            alice.id,
            UpdateUserRequest {
                handle: Some("alice-prime".to_string()),
                ..UpdateUserRequest::default()
            },
        )
        .await
        .unwrap();

    // Old handle is reusable, new one is taken.
    users
        .register(user_body("alice", "fresh@example.com"))
        .await
        .unwrap();
    let err = users
        .register(user_body("alice-prime", "other@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "HANDLE_IN_USE");
}

#[tokio::test]
async fn accounts_are_managed_by_their_owner_only() {
    let users = UserService::new(store());

    let alice = users
        .register(user_body("alice", "alice@example.com"))
        .await
        .unwrap();
    let mallory = users
        .register(user_body("mallory", "mallory@example.com"))
        .await
        .unwrap();

    let err = users
        .update(
            mallory.id,
            alice.id,
            UpdateUserRequest {
                display_name: Some("Hijacked".to_string()),
                ..UpdateUserRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));

    let err = users.delete(mallory.id, alice.id).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden(_)));
}

#[tokio::test]
async fn deleting_a_sole_channel_owner_is_refused() {
    let store = store();
    let users = UserService::new(store.clone());
    let channels = ChannelService::new(store.clone());

    let alice = users
        .register(user_body("alice", "alice@example.com"))
        .await
        .unwrap();
    channels
        .create(alice.id, channel_body("workshop"))
        .await
        .unwrap();

    let err = users.delete(alice.id, alice.id).await.unwrap_err();
    assert!(matches!(err, Error::LastOwner));

    // Nothing was torn down by the refused delete.
    assert!(store.user(&alice.id).await.unwrap().is_some());
}

#[tokio::test]
async fn deletion_strips_the_user_from_every_channel() {
    let store = store();
    let users = UserService::new(store.clone());
    let channels = ChannelService::new(store.clone());

    let alice = users
        .register(user_body("alice", "alice@example.com"))
        .await
        .unwrap();
    let bob = users
        .register(user_body("bob", "bob@example.com"))
        .await
        .unwrap();

    let workshop = channels
        .create(alice.id, channel_body("workshop"))
        .await
        .unwrap();
    channels
        .invite(
            alice.id,
            workshop.id,
            videx_core::api_types::RoleRequest {
                user: bob.id,
                role: ChannelRole::Moderator,
            },
        )
        .await
        .unwrap();
    channels
        .accept_invite(bob.id, workshop.id, ChannelRole::Moderator)
        .await
        .unwrap();

    users.delete(bob.id, bob.id).await.unwrap();

    let fresh = store.channel(&workshop.id).await.unwrap().unwrap();
    assert!(fresh.moderators.is_empty(), "moderator list should be swept");
    assert!(store.user(&bob.id).await.unwrap().is_none());

    // Bob's handle and email are free again.
    users
        .register(user_body("bob", "bob@example.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn display_name_rules_apply_on_register_and_update() {
    let users = UserService::new(store());

    let err = users
        .register(CreateUserRequest {
            handle: "carol".to_string(),
            display_name: "   ".to_string(),
            email: "carol@example.com".to_string(),
            avatar: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));

    let carol = users
        .register(user_body("carol", "carol@example.com"))
        .await
        .unwrap();
    let err = users
        .update(
            carol.id,
            carol.id,
            UpdateUserRequest {
                display_name: Some("x".repeat(200)),
                ..UpdateUserRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));
}
