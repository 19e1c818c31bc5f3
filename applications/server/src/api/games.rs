/// Games API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use replay_core::{
    GameId, GameUpdate, LibraryEntry, LibraryStats, ListFilter, NewGame, Provider,
    ProviderRecord, ReferenceItem, ReferenceKind,
};
use replay_providers::SearchQuery;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub platform_id: Option<u64>,
}

fn default_search_limit() -> u32 {
    SearchQuery::DEFAULT_LIMIT
}

impl From<SearchParams> for SearchQuery {
    fn from(params: SearchParams) -> Self {
        SearchQuery {
            text: params.query,
            limit: params.limit,
            offset: params.offset,
            platform_id: params.platform_id,
        }
    }
}

/// GET /games
/// List entries, optionally filtered by status or title
pub async fn list_games(
    State(app_state): State<AppState>,
    filter: std::result::Result<Query<ListFilter>, QueryRejection>,
) -> Result<Json<Vec<LibraryEntry>>> {
    let Query(filter) = filter?;
    let games = app_state.catalog.list_games(&filter).await?;
    Ok(Json(games))
}

/// GET /games/:id
pub async fn get_game(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<LibraryEntry>> {
    let game = app_state.catalog.get_game(&GameId::new(id)).await?;
    Ok(Json(game))
}

/// POST /games
/// Create an entry from manually supplied fields
pub async fn create_game(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<NewGame>, JsonRejection>,
) -> Result<(StatusCode, Json<LibraryEntry>)> {
    let Json(game) = payload?;
    let created = app_state.catalog.create_game(game).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /games/:id
/// Update the supplied fields, leaving the rest unchanged
pub async fn update_game(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<GameUpdate>, JsonRejection>,
) -> Result<Json<LibraryEntry>> {
    let Json(update) = payload?;
    let updated = app_state
        .catalog
        .update_game(&GameId::new(id), update)
        .await?;
    Ok(Json(updated))
}

/// DELETE /games/:id
pub async fn delete_game(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<serde_json::Value>> {
    app_state.catalog.delete_game(&GameId::new(id)).await?;
    Ok(Json(json!({ "success": true })))
}

/// GET /games/search/:provider
/// Search a provider by title without touching the catalog
pub async fn search_provider(
    Path(provider): Path<String>,
    State(app_state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<ProviderRecord>>> {
    let provider: Provider = provider.parse()?;
    let Query(params) = params?;

    let query = SearchQuery::from(params);
    query.validate()?;

    let client = app_state.providers.get(provider)?;
    let results = client.search(&query).await?;
    Ok(Json(results))
}

/// POST /games/import/:provider/:external_id
/// Import a provider record as a new entry
pub async fn import_game(
    Path((provider, external_id)): Path<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<(StatusCode, Json<LibraryEntry>)> {
    let provider: Provider = provider.parse()?;
    let entry = app_state.importer.import(provider, &external_id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /games/stats/summary
pub async fn stats(State(app_state): State<AppState>) -> Result<Json<LibraryStats>> {
    let stats = app_state.catalog.stats().await?;
    Ok(Json(stats))
}

/// GET /games/reference/:provider/:kind
/// Provider reference lists used to build search filters
pub async fn reference_list(
    Path((provider, kind)): Path<(String, String)>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ReferenceItem>>> {
    let provider: Provider = provider.parse()?;
    let kind: ReferenceKind = kind.parse()?;

    let client = app_state.providers.get(provider)?;
    let items = client.reference(kind).await?;
    Ok(Json(items))
}
