//! Integration tests for the games vertical slice
//!
//! Tests catalog operations including:
//! - CRUD round trips through a real SQLite file
//! - Filtering by status and title, pagination
//! - Status and provider-reference constraints
//! - Statistics


use replay_core::{types::*, CatalogStore, ReplayError};
use test_helpers::*;

#[tokio::test]
async fn test_create_and_get_game() {
    let test_db = TestDb::new().await;
    let input = sample_game("Chrono Trigger");

    let created = test_db
        .catalog
        .create_game(input.clone())
        .await
        .expect("Failed to create game");

    assert_eq!(created.title, input.title);
    assert_eq!(created.summary, input.summary);
    assert_eq!(created.release_date, input.release_date);
    assert_eq!(created.cover_image, input.cover_image);
    assert_eq!(created.platforms, input.platforms);
    assert_eq!(created.genres, input.genres);
    assert_eq!(created.developers, input.developers);
    assert_eq!(created.publishers, input.publishers);
    assert_eq!(created.rating, input.rating);
    assert_eq!(created.status, GameStatus::WantToPlay);
    assert!(created.source_provider.is_none());
    assert_eq!(created.created_at, created.updated_at);

    let retrieved = test_db.catalog.get_game(&created.id).await.unwrap();
    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_created_ids_are_unique() {
    let test_db = TestDb::new().await;

    let a = test_db
        .catalog
        .create_game(NewGame::titled("Same Title"))
        .await
        .unwrap();
    let b = test_db
        .catalog
        .create_game(NewGame::titled("Same Title"))
        .await
        .unwrap();

    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn test_create_with_source_reference() {
    let test_db = TestDb::new().await;

    let mut game = NewGame::titled("Chrono Trigger");
    game.source_provider = Some(Provider::Igdb);
    game.source_id = Some("1942".to_string());

    let created = test_db.catalog.create_game(game).await.unwrap();
    assert_eq!(created.source_provider, Some(Provider::Igdb));
    assert_eq!(created.source_id.as_deref(), Some("1942"));
}

#[tokio::test]
async fn test_create_rejects_provider_without_source_id() {
    let test_db = TestDb::new().await;

    let mut game = NewGame::titled("Chrono Trigger");
    game.source_provider = Some(Provider::MobyGames);

    let err = test_db.catalog.create_game(game).await.unwrap_err();
    assert!(matches!(err, ReplayError::InvalidInput(_)));

    let all = test_db.catalog.list_games(&ListFilter::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_database_rejects_unknown_status() {
    let test_db = TestDb::new().await;

    let result = sqlx::query(
        "INSERT INTO games (id, title, status, created_at, updated_at) VALUES ('x', 'Bad', 'beaten', 0, 0)",
    )
    .execute(test_db.pool())
    .await;

    assert!(result.is_err(), "CHECK constraint should reject unknown status");
}

#[tokio::test]
async fn test_get_missing_game_is_not_found() {
    let test_db = TestDb::new().await;

    let err = test_db
        .catalog
        .get_game(&GameId::new("does-not-exist"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_update_status_and_notes() {
    let test_db = TestDb::new().await;
    let created = test_db
        .catalog
        .create_game(sample_game("Earthbound"))
        .await
        .unwrap();

    let updated = test_db
        .catalog
        .update_game(
            &created.id,
            GameUpdate {
                status: Some(GameStatus::Playing),
                notes: Some(Some("Reached Onett".to_string())),
                ..GameUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.status, GameStatus::Playing);
    assert_eq!(updated.notes.as_deref(), Some("Reached Onett"));
    // Untouched fields keep their values
    assert_eq!(updated.title, "Earthbound");
    assert_eq!(updated.platforms, created.platforms);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let retrieved = test_db.catalog.get_game(&created.id).await.unwrap();
    assert_eq!(retrieved, updated);
}

#[tokio::test]
async fn test_update_replaces_lists() {
    let test_db = TestDb::new().await;
    let created = test_db
        .catalog
        .create_game(sample_game("Tetris"))
        .await
        .unwrap();

    let updated = test_db
        .catalog
        .update_game(
            &created.id,
            GameUpdate {
                platforms: Some(vec!["Game Boy".to_string(), "NES".to_string()]),
                ..GameUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.platforms, vec!["Game Boy", "NES"]);
    assert_eq!(updated.genres, created.genres);
}

#[tokio::test]
async fn test_invalid_update_leaves_entry_unchanged() {
    let test_db = TestDb::new().await;
    let created = test_db
        .catalog
        .create_game(sample_game("Secret of Mana"))
        .await
        .unwrap();

    let err = test_db
        .catalog
        .update_game(
            &created.id,
            GameUpdate {
                title: Some("   ".to_string()),
                status: Some(GameStatus::Completed),
                ..GameUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ReplayError::InvalidInput(_)));

    let retrieved = test_db.catalog.get_game(&created.id).await.unwrap();
    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn test_update_null_clears_optional_fields() {
    let test_db = TestDb::new().await;
    let mut game = sample_game("Mother 3");
    game.notes = Some("chapter 4".to_string());
    let created = test_db.catalog.create_game(game).await.unwrap();

    let update: GameUpdate =
        serde_json::from_str(r#"{"notes": null, "rating": null, "release_date": null}"#).unwrap();
    let updated = test_db.catalog.update_game(&created.id, update).await.unwrap();

    assert!(updated.notes.is_none());
    assert!(updated.rating.is_none());
    assert!(updated.release_date.is_none());
    // Fields missing from the update are kept
    assert_eq!(updated.summary, created.summary);
    assert_eq!(updated.cover_image, created.cover_image);
    assert_eq!(updated.title, "Mother 3");
}

#[tokio::test]
async fn test_update_missing_game_is_not_found() {
    let test_db = TestDb::new().await;

    let err = test_db
        .catalog
        .update_game(&GameId::new("missing"), GameUpdate::status(GameStatus::Dropped))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let test_db = TestDb::new().await;
    let created = test_db
        .catalog
        .create_game(NewGame::titled("Final Fantasy VI"))
        .await
        .unwrap();

    test_db.catalog.delete_game(&created.id).await.unwrap();

    let err = test_db.catalog.get_game(&created.id).await.unwrap_err();
    assert!(err.is_not_found());

    let err = test_db.catalog.delete_game(&created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_filters_by_status() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_game(pool, "Super Metroid", GameStatus::Completed).await;
    create_test_game(pool, "Zelda", GameStatus::Playing).await;
    create_test_game(pool, "Mega Man X", GameStatus::Completed).await;

    let completed = test_db
        .catalog
        .list_games(&ListFilter::with_status(GameStatus::Completed))
        .await
        .unwrap();

    let titles: Vec<_> = completed.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Super Metroid", "Mega Man X"]);
}

#[tokio::test]
async fn test_list_search_is_case_insensitive_and_literal() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_game(pool, "The Legend of Zelda", GameStatus::WantToPlay).await;
    create_test_game(pool, "Zelda II", GameStatus::WantToPlay).await;
    create_test_game(pool, "100% Orange Juice", GameStatus::WantToPlay).await;
    create_test_game(pool, "Metroid", GameStatus::WantToPlay).await;

    let zelda = test_db
        .catalog
        .list_games(&ListFilter {
            search: Some("zelda".to_string()),
            ..ListFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(zelda.len(), 2);

    let percent = test_db
        .catalog
        .list_games(&ListFilter {
            search: Some("%".to_string()),
            ..ListFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].title, "100% Orange Juice");
}

#[tokio::test]
async fn test_list_pagination() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    for i in 0..5 {
        create_test_game(pool, &format!("Game {}", i), GameStatus::WantToPlay).await;
    }

    let page = test_db
        .catalog
        .list_games(&ListFilter {
            offset: 1,
            limit: 2,
            ..ListFilter::default()
        })
        .await
        .unwrap();

    let titles: Vec<_> = page.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Game 1", "Game 2"]);
}

#[tokio::test]
async fn test_list_rejects_zero_limit() {
    let test_db = TestDb::new().await;

    let err = test_db
        .catalog
        .list_games(&ListFilter {
            limit: 0,
            ..ListFilter::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ReplayError::InvalidInput(_)));
}

#[tokio::test]
async fn test_stats_on_empty_catalog() {
    let test_db = TestDb::new().await;

    let stats = test_db.catalog.stats().await.unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.by_status.len(), GameStatus::ALL.len());
    assert!(stats.by_platform.is_empty());
}

#[tokio::test]
async fn test_stats_count_each_platform_listing() {
    let test_db = TestDb::new().await;

    let mut game = NewGame::titled("Tetris");
    game.platforms = vec!["Game Boy".to_string(), "Game Boy".to_string()];
    test_db.catalog.create_game(game).await.unwrap();

    let stats = test_db.catalog.stats().await.unwrap();
    assert_eq!(stats.total, 1);
    assert_eq!(stats.by_platform.get("Game Boy"), Some(&2));
}

#[tokio::test]
async fn test_stats_group_by_status_and_platform() {
    let test_db = TestDb::new().await;

    let mut snes = sample_game("Chrono Trigger");
    snes.platforms = vec!["SNES".to_string(), "PlayStation".to_string()];
    test_db.catalog.create_game(snes).await.unwrap();

    let mut ps = sample_game("Final Fantasy VII");
    ps.platforms = vec!["PlayStation".to_string()];
    ps.status = GameStatus::Completed;
    test_db.catalog.create_game(ps).await.unwrap();

    let mut none = NewGame::titled("Homebrew");
    none.status = GameStatus::Dropped;
    test_db.catalog.create_game(none).await.unwrap();

    let stats = test_db.catalog.stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.count(GameStatus::WantToPlay), 1);
    assert_eq!(stats.count(GameStatus::Completed), 1);
    assert_eq!(stats.count(GameStatus::Dropped), 1);
    assert_eq!(stats.count(GameStatus::Playing), 0);
    assert_eq!(stats.by_platform.get("PlayStation"), Some(&2));
    assert_eq!(stats.by_platform.get("SNES"), Some(&1));
}
