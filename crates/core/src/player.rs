//! Player directory: character search, account lookup and single-character
//! lookup.
//!
//! Rows come back from the store as [`CharacterRecord`]s with their JSON
//! columns still in stored form. They are turned into [`CharacterView`]s
//! here, which is the only place the [`normalize`](crate::normalize) codec
//! is applied on the read side.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::normalize::normalize;
use crate::store::{StoreHandle, SEARCH_LIMIT};
use crate::types::JsonMap;

/// One search hit as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterMatch {
    pub user_id: String,
    pub name: String,
}

/// A character row with JSON columns in their stored form.
///
/// `info` has already been resolved from whichever of
/// [`INFO_FIELDS`](crate::normalize::INFO_FIELDS) is present.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterRecord {
    pub citizenid: String,
    pub user_id: String,
    pub name: String,
    pub money: Option<Value>,
    pub job: Option<Value>,
    pub info: Option<Value>,
}

/// Search result entry: one per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSearchResult {
    /// Account identifier.
    pub id: String,
    /// Name of the first matching character on the account.
    pub name: String,
}

/// A character with every JSON column re-materialized as an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterView {
    pub citizenid: String,
    pub user_id: String,
    pub name: String,
    pub money: JsonMap,
    pub job: JsonMap,
    pub info: JsonMap,
}

impl From<CharacterRecord> for CharacterView {
    fn from(record: CharacterRecord) -> Self {
        Self {
            citizenid: record.citizenid,
            user_id: record.user_id,
            name: record.name,
            money: normalize(record.money),
            job: normalize(record.job),
            info: normalize(record.info),
        }
    }
}

/// All characters under one account.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub user_id: String,
    pub characters: Vec<CharacterView>,
}

/// Keep the first match per account, preserving store order.
pub fn dedupe_by_account(matches: Vec<CharacterMatch>) -> Vec<PlayerSearchResult> {
    let mut seen = HashSet::new();
    matches
        .into_iter()
        .filter(|m| seen.insert(m.user_id.clone()))
        .map(|m| PlayerSearchResult {
            id: m.user_id,
            name: m.name,
        })
        .collect()
}

/// Read-side queries over characters.
#[derive(Clone)]
pub struct PlayerDirectory {
    store: StoreHandle,
}

impl PlayerDirectory {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Case-insensitive substring search over account identifiers and
    /// character names.
    ///
    /// An empty query returns nothing rather than listing every player.
    /// Whitespace is part of the needle.
    pub async fn search(&self, query: &str) -> Result<Vec<PlayerSearchResult>, CoreError> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let matches = self.store.search_characters(&needle, SEARCH_LIMIT).await?;
        Ok(dedupe_by_account(matches))
    }

    pub async fn account(&self, user_id: &str) -> Result<AccountView, CoreError> {
        let records = self.store.characters_by_account(user_id).await?;
        if records.is_empty() {
            return Err(CoreError::not_found("Account", user_id));
        }

        Ok(AccountView {
            user_id: user_id.to_string(),
            characters: records.into_iter().map(CharacterView::from).collect(),
        })
    }

    pub async fn character(&self, citizenid: &str) -> Result<CharacterView, CoreError> {
        self.store
            .character_by_citizenid(citizenid)
            .await?
            .map(CharacterView::from)
            .ok_or_else(|| CoreError::not_found("Character", citizenid))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;
    use crate::error::StoreError;
    use crate::memory::InMemoryStore;

    fn character(citizenid: &str, user_id: &str, name: &str) -> CharacterRecord {
        CharacterRecord {
            citizenid: citizenid.to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            money: Some(json!(r#"{"cash":100,"bank":2500}"#)),
            job: Some(json!(r#"{"name":"unemployed"}"#)),
            info: Some(json!(r#"{"firstname":"Sam"}"#)),
        }
    }

    fn directory(store: &Arc<InMemoryStore>) -> PlayerDirectory {
        PlayerDirectory::new(store.clone().into_handle(Duration::from_secs(1)))
    }

    // -- dedupe_by_account -------------------------------------------------

    #[test]
    fn dedupe_keeps_first_character_per_account() {
        let matches = vec![
            CharacterMatch { user_id: "license:a".into(), name: "Alice".into() },
            CharacterMatch { user_id: "license:b".into(), name: "Bob".into() },
            CharacterMatch { user_id: "license:a".into(), name: "Alicia".into() },
        ];
        let results = dedupe_by_account(matches);
        assert_eq!(
            results,
            vec![
                PlayerSearchResult { id: "license:a".into(), name: "Alice".into() },
                PlayerSearchResult { id: "license:b".into(), name: "Bob".into() },
            ]
        );
    }

    // -- search --------------------------------------------------------------

    #[tokio::test]
    async fn empty_query_returns_nothing() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_character(character("ABC123", "license:a", "Alice"));
        let dir = directory(&store);

        assert!(dir.search("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn whitespace_is_matched_as_a_substring() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_character(character("ABC123", "license:a", "Alex Mercer"));
        store.insert_character(character("DEF456", "license:b", "Solo"));
        let dir = directory(&store);

        let results = dir.search(" ").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Alex Mercer");

        assert!(dir.search(" alex").await.unwrap().is_empty());
        assert_eq!(dir.search("X M").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_matches_name_and_account_case_insensitively() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_character(character("ABC123", "license:aaa", "Alice Smith"));
        store.insert_character(character("DEF456", "license:bbb", "Bob Jones"));
        let dir = directory(&store);

        let by_name = dir.search("SMITH").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, "license:aaa");
        assert_eq!(by_name[0].name, "Alice Smith");

        let by_account = dir.search("BBB").await.unwrap();
        assert_eq!(by_account.len(), 1);
        assert_eq!(by_account[0].name, "Bob Jones");
    }

    #[tokio::test]
    async fn search_collapses_characters_on_one_account() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_character(character("C1", "license:x", "Officer One"));
        store.insert_character(character("C2", "license:x", "Officer Two"));
        store.insert_character(character("C3", "license:y", "Officer Three"));
        let dir = directory(&store);

        let results = dir.search("officer").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Officer One");
        assert_eq!(results[1].id, "license:y");
    }

    #[tokio::test]
    async fn search_is_capped_and_unique() {
        let store = Arc::new(InMemoryStore::new());
        for i in 0..30 {
            store.insert_character(character(
                &format!("CID{i}"),
                &format!("license:{}", i % 25),
                &format!("Citizen {i}"),
            ));
        }
        let dir = directory(&store);

        let results = dir.search("citizen").await.unwrap();
        assert!(results.len() <= 20);
        let unique: HashSet<_> = results.iter().map(|r| r.id.clone()).collect();
        assert_eq!(unique.len(), results.len());
    }

    #[tokio::test]
    async fn search_treats_like_wildcards_literally() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_character(character("C1", "license:a", "Alice"));
        let dir = directory(&store);

        assert!(dir.search("%").await.unwrap().is_empty());
        assert!(dir.search("_").await.unwrap().is_empty());
    }

    // -- account -------------------------------------------------------------

    #[tokio::test]
    async fn account_returns_every_character() {
        let store = Arc::new(InMemoryStore::new());
        store.insert_character(character("C1", "license:x", "One"));
        store.insert_character(character("C2", "license:x", "Two"));
        store.insert_character(character("C3", "license:y", "Three"));
        let dir = directory(&store);

        let account = dir.account("license:x").await.unwrap();
        assert_eq!(account.user_id, "license:x");
        assert_eq!(account.characters.len(), 2);
        assert_eq!(account.characters[0].money.get("bank"), Some(&json!(2500)));
    }

    #[tokio::test]
    async fn unknown_account_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let dir = directory(&store);

        let err = dir.account("license:missing").await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Account", .. });
    }

    // -- character -----------------------------------------------------------

    #[tokio::test]
    async fn character_columns_are_normalized() {
        let store = Arc::new(InMemoryStore::new());
        let mut record = character("ABC123", "license:a", "Alice");
        record.money = Some(json!("{broken"));
        record.job = None;
        record.info = Some(json!({"firstname": "Alice"}));
        store.insert_character(record);
        let dir = directory(&store);

        let view = dir.character("ABC123").await.unwrap();
        assert!(view.money.is_empty());
        assert!(view.job.is_empty());
        assert_eq!(view.info.get("firstname"), Some(&json!("Alice")));
    }

    #[tokio::test]
    async fn unknown_character_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let dir = directory(&store);

        let err = dir.character("NOPE").await.unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Character", .. });
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let store = Arc::new(InMemoryStore::new());
        store.set_unavailable(true);
        let dir = directory(&store);

        let err = dir.search("alice").await.unwrap_err();
        assert_matches!(err, CoreError::Store(StoreError::Unavailable(_)));
    }

    #[test]
    fn character_view_serializes_camel_case() {
        let view = CharacterView::from(character("ABC123", "license:a", "Alice"));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["userId"], "license:a");
        assert_eq!(json["citizenid"], "ABC123");
        assert_eq!(json["info"]["firstname"], "Sam");
    }
}
