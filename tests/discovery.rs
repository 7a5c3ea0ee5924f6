mod common;

use std::collections::HashSet;

use campuslink::profiles::{self, SearchType};

#[tokio::test]
async fn empty_query_returns_directory_minus_exclusions() {
    let pool = common::pool().await;
    common::seed_profile(&pool, "alice", Some("Alice Kurian"), None).await;
    common::seed_profile(&pool, "bob", Some("Bob Mathew"), None).await;
    common::seed_profile(&pool, "carol", Some("Carol D'Souza"), None).await;

    // alice searching, already connected to bob
    let exclude: HashSet<String> = ["alice", "bob"].map(str::to_owned).into();
    let results = profiles::search(&pool, "", SearchType::Name, &exclude)
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "carol");
}

#[tokio::test]
async fn skill_search_sees_through_legacy_entries() {
    let pool = common::pool().await;
    common::seed_profile(&pool, "bob", Some("Bob Mathew"), Some(r#"{"skills": [{"name": "Rust"}]}"#))
        .await;
    common::seed_profile(&pool, "carol", Some("Carol D'Souza"), Some(r#"{"skills": ["python"]}"#))
        .await;

    let results = profiles::search(&pool, "RUST", SearchType::Skill, &HashSet::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "bob");
}

#[tokio::test]
async fn branch_and_year_search_use_profile_attributes() {
    let pool = common::pool().await;
    common::seed_profile(&pool, "bob", Some("Bob Mathew"), Some(r#"{"branch": "CSE", "year": "3"}"#))
        .await;
    common::seed_profile(&pool, "carol", Some("Carol D'Souza"), Some(r#"{"branch": "ECE", "year": "2"}"#))
        .await;

    let by_branch = profiles::search(&pool, "cse", SearchType::Branch, &HashSet::new())
        .await
        .unwrap();
    assert_eq!(by_branch.len(), 1);
    assert_eq!(by_branch[0].id, "bob");

    let by_year = profiles::search(&pool, "2", SearchType::Year, &HashSet::new())
        .await
        .unwrap();
    assert_eq!(by_year.len(), 1);
    assert_eq!(by_year[0].id, "carol");
}
