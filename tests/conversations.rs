mod common;

use campuslink::connections::lifecycle::{self, Action};
use campuslink::connections::store;
use campuslink::conversations;
use campuslink::profiles::UNKNOWN_USER;
use sqlx::SqlitePool;

async fn accepted_connection(pool: &SqlitePool, sender: &str, receiver: &str) -> String {
    let conn = store::create(pool, sender, receiver).await.unwrap();
    lifecycle::transition(pool, &conn.id, receiver, Action::Accept)
        .await
        .unwrap();
    conn.id
}

#[tokio::test]
async fn accepted_connection_yields_symmetric_entries() {
    let pool = common::pool().await;
    common::seed_profile(&pool, "alice", Some("Alice Kurian"), None).await;
    common::seed_profile(&pool, "bob", Some("Bob Mathew"), None).await;

    let connection_id = accepted_connection(&pool, "alice", "bob").await;

    let for_alice = conversations::build_conversations(&pool, "alice").await.unwrap();
    assert_eq!(for_alice.len(), 1);
    assert_eq!(for_alice[0].connection_id, connection_id);
    assert_eq!(for_alice[0].peer_id, "bob");
    assert_eq!(for_alice[0].peer.full_name, "Bob Mathew");

    let for_bob = conversations::build_conversations(&pool, "bob").await.unwrap();
    assert_eq!(for_bob.len(), 1);
    assert_eq!(for_bob[0].connection_id, connection_id);
    assert_eq!(for_bob[0].peer.full_name, "Alice Kurian");
}

#[tokio::test]
async fn pending_and_rejected_connections_are_excluded() {
    let pool = common::pool().await;
    common::seed_profile(&pool, "alice", Some("Alice Kurian"), None).await;
    common::seed_profile(&pool, "bob", Some("Bob Mathew"), None).await;
    common::seed_profile(&pool, "carol", Some("Carol D'Souza"), None).await;

    store::create(&pool, "alice", "bob").await.unwrap();
    let rejected = store::create(&pool, "carol", "alice").await.unwrap();
    lifecycle::transition(&pool, &rejected.id, "alice", Action::Reject)
        .await
        .unwrap();

    let entries = conversations::build_conversations(&pool, "alice").await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn unresolvable_peer_gets_a_placeholder_without_dropping_the_entry() {
    let pool = common::pool().await;
    common::seed_profile(&pool, "alice", Some("Alice Kurian"), None).await;
    common::seed_profile(&pool, "bob", Some("Bob Mathew"), None).await;
    // carol has a connection but was never provisioned a profile row

    accepted_connection(&pool, "alice", "bob").await;
    accepted_connection(&pool, "carol", "alice").await;

    let entries = conversations::build_conversations(&pool, "alice").await.unwrap();
    assert_eq!(entries.len(), 2);

    let bob = entries.iter().find(|e| e.peer_id == "bob").unwrap();
    assert_eq!(bob.peer.full_name, "Bob Mathew");

    let carol = entries.iter().find(|e| e.peer_id == "carol").unwrap();
    assert_eq!(carol.peer.full_name, UNKNOWN_USER);
    assert!(carol.peer.avatar_url.is_none());
}

#[tokio::test]
async fn entries_come_back_in_connection_creation_order() {
    let pool = common::pool().await;
    common::seed_profile(&pool, "alice", Some("Alice Kurian"), None).await;

    // seed accepted rows with explicit timestamps, newest pair first
    for (id, peer, created_at) in [("c-3", "dan", 300), ("c-1", "bob", 100), ("c-2", "carol", 200)] {
        sqlx::query(
            "INSERT INTO connections (id,sender_id,receiver_id,status,created_at) VALUES (?,?,'alice','accepted',?)",
        )
        .bind(id)
        .bind(peer)
        .bind(created_at)
        .execute(&pool)
        .await
        .unwrap();
    }

    let entries = conversations::build_conversations(&pool, "alice").await.unwrap();
    let order: Vec<&str> = entries.iter().map(|e| e.connection_id.as_str()).collect();
    assert_eq!(order, vec!["c-1", "c-2", "c-3"]);
}

#[tokio::test]
async fn legacy_profile_shapes_resolve_in_entries() {
    let pool = common::pool().await;
    common::seed_profile(&pool, "alice", Some("Alice Kurian"), None).await;
    common::seed_profile(
        &pool,
        "bob",
        None,
        Some(r#"{"personalInfo": {"name": "Bob Mathew"}, "skills": [{"name": "ml"}, "rust"]}"#),
    )
    .await;

    accepted_connection(&pool, "alice", "bob").await;

    let entries = conversations::build_conversations(&pool, "alice").await.unwrap();
    assert_eq!(entries[0].peer.full_name, "Bob Mathew");
    assert_eq!(entries[0].peer.skills, vec!["ml", "rust"]);
}
