//! Unit tests for the document store backends

use super::*;
use crate::error::LeagueError;
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("fields must be an object"),
    }
}

#[cfg(test)]
mod memory_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_document() {
        let store = MemoryStore::new();
        assert!(store.get("players/1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_only_direct_children() {
        let store = MemoryStore::new();
        store.insert("fantasyTeams/Paul", &json!({"waivers": 1})).unwrap();
        store.insert("fantasyTeams/Mick", &json!({"waivers": 2})).unwrap();
        store
            .insert("matchups/2024/weeks/week1/games/g1", &json!({}))
            .unwrap();

        let teams = store.list("fantasyTeams").await.unwrap();
        let ids: Vec<_> = teams.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["Mick", "Paul"]);

        let games = store.list("matchups/2024/weeks/week1/games").await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, "g1");
    }

    #[tokio::test]
    async fn test_update_fields_merges_and_counts() {
        let store = MemoryStore::new();
        store
            .insert(
                "fantasyTeams/Paul",
                &json!({"roster": ["1"], "waivers": 3, "division": "blue"}),
            )
            .unwrap();

        store
            .update_fields(
                "fantasyTeams/Paul",
                fields(json!({"roster": ["2"], "waivers": 2})),
            )
            .await
            .unwrap();

        let doc = store.get("fantasyTeams/Paul").await.unwrap().unwrap();
        assert_eq!(doc, json!({"roster": ["2"], "waivers": 2, "division": "blue"}));
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_update_fields_missing_document() {
        let store = MemoryStore::new();
        let result = store
            .update_fields("fantasyTeams/Nobody", fields(json!({"waivers": 1})))
            .await;

        assert!(matches!(result, Err(LeagueError::NotFound { .. })));
        assert_eq!(store.writes(), 0);
    }
}

#[cfg(test)]
mod sqlite_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = SqliteStore::new_in_memory().unwrap();
        store
            .put("players/123", &json!({"roster": {"name": "A", "position": "WR"}}))
            .unwrap();

        let doc = store.get("players/123").await.unwrap().unwrap();
        assert_eq!(doc["roster"]["position"], "WR");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_by_collection() {
        let store = SqliteStore::new_in_memory().unwrap();
        store.put("defense/KC", &json!({})).unwrap();
        store.put("defense/SF", &json!({})).unwrap();
        store.put("players/1", &json!({})).unwrap();

        let defenses = store.list("defense").await.unwrap();
        assert_eq!(defenses.len(), 2);
        assert_eq!(defenses[0].id, "KC");
        assert_eq!(defenses[1].id, "SF");
    }

    #[tokio::test]
    async fn test_update_fields_preserves_other_fields() {
        let store = SqliteStore::new_in_memory().unwrap();
        store
            .put(
                "fantasyTeams/Mick",
                &json!({"roster": ["1", "2"], "irList": [], "waivers": 4, "division": "blue"}),
            )
            .unwrap();

        store
            .update_fields(
                "fantasyTeams/Mick",
                fields(json!({"irList": ["2"], "waivers": 3})),
            )
            .await
            .unwrap();

        let doc = store.get("fantasyTeams/Mick").await.unwrap().unwrap();
        assert_eq!(doc["roster"], json!(["1", "2"]));
        assert_eq!(doc["irList"], json!(["2"]));
        assert_eq!(doc["waivers"], 3);
        assert_eq!(doc["division"], "blue");
    }

    #[tokio::test]
    async fn test_update_fields_missing_document() {
        let store = SqliteStore::new_in_memory().unwrap();
        let result = store
            .update_fields("fantasyTeams/Ghost", fields(json!({"waivers": 1})))
            .await;
        assert!(matches!(result, Err(LeagueError::NotFound { .. })));
    }

    #[test]
    fn test_put_rejects_collection_path() {
        let store = SqliteStore::new_in_memory().unwrap();
        assert!(store.put("players", &json!({})).is_err());
    }

    #[tokio::test]
    async fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("league.db");

        {
            let store = SqliteStore::open(&db_path).unwrap();
            store.put("currentDate/when", &json!({"year": 2024, "week": 5})).unwrap();
        }

        let reopened = SqliteStore::open(&db_path).unwrap();
        let doc = reopened.get("currentDate/when").await.unwrap().unwrap();
        assert_eq!(doc["week"], 5);
    }
}

#[cfg(test)]
mod http_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/currentDate/when"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"year": 2024, "week": 7})),
            )
            .mount(&mock_server)
            .await;

        let store = HttpStore::new(mock_server.uri(), Some("secret")).unwrap();
        let doc = store.get("currentDate/when").await.unwrap().unwrap();
        assert_eq!(doc["week"], 7);
    }

    #[tokio::test]
    async fn test_get_missing_document_is_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/players/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let store = HttpStore::new(mock_server.uri(), None).unwrap();
        assert!(store.get("players/404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_collection() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fantasyTeams"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "Paul", "data": {"roster": ["1"], "waivers": 2}},
                {"id": "Mick", "data": {"roster": [], "waivers": 5}}
            ])))
            .mount(&mock_server)
            .await;

        let store = HttpStore::new(mock_server.uri(), None).unwrap();
        let docs = store.list("fantasyTeams").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "Paul");
        assert_eq!(docs[1].data["waivers"], 5);
    }

    #[tokio::test]
    async fn test_update_fields_sends_patch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/fantasyTeams/Paul"))
            .and(body_json(json!({"waivers": 1})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = HttpStore::new(mock_server.uri(), None).unwrap();
        store
            .update_fields("fantasyTeams/Paul", fields(json!({"waivers": 1})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_fields_missing_document() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/fantasyTeams/Ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let store = HttpStore::new(mock_server.uri(), None).unwrap();
        let result = store
            .update_fields("fantasyTeams/Ghost", fields(json!({"waivers": 1})))
            .await;
        assert!(matches!(result, Err(LeagueError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_server_error_surfaces() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/players/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let store = HttpStore::new(mock_server.uri(), None).unwrap();
        let result = store.get("players/1").await;
        assert!(matches!(result, Err(LeagueError::Http(_))));
    }
}
