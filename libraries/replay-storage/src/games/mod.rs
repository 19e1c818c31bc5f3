//! Library entries slice
//!
//! List columns (platforms, genres, ...) are stored as JSON arrays, dates as
//! `YYYY-MM-DD` text and timestamps as unix seconds.

use chrono::{DateTime, NaiveDate, Utc};
use replay_core::{error::Result, types::*, ReplayError};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};

const COLUMNS: &str = "id, title, summary, release_date, cover_image, platforms, genres, \
                       developers, publishers, rating, status, notes, source_provider, \
                       source_id, created_at, updated_at";

/// Insert a new entry and return it as stored
pub async fn create(pool: &SqlitePool, game: NewGame) -> Result<LibraryEntry> {
    game.validate()?;

    let id = GameId::generate();
    let now = Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO games (
            id, title, summary, release_date, cover_image, platforms, genres,
            developers, publishers, rating, status, notes, source_provider,
            source_id, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(game.title)
    .bind(game.summary)
    .bind(game.release_date.map(|d| d.format("%Y-%m-%d").to_string()))
    .bind(game.cover_image)
    .bind(encode_list(&game.platforms)?)
    .bind(encode_list(&game.genres)?)
    .bind(encode_list(&game.developers)?)
    .bind(encode_list(&game.publishers)?)
    .bind(game.rating)
    .bind(game.status.as_str())
    .bind(game.notes)
    .bind(game.source_provider.map(|p| p.as_str()))
    .bind(game.source_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| ReplayError::storage("Failed to retrieve created game"))
}

/// Get entry by ID
pub async fn get_by_id(pool: &SqlitePool, id: &GameId) -> Result<Option<LibraryEntry>> {
    let row = sqlx::query(&format!("SELECT {} FROM games WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(entry_from_row).transpose()
}

/// List entries matching the filter, in insertion order
pub async fn list(pool: &SqlitePool, filter: &ListFilter) -> Result<Vec<LibraryEntry>> {
    filter.validate()?;

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {} FROM games WHERE 1 = 1", COLUMNS));

    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }

    if let Some(search) = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query
            .push(" AND title LIKE ")
            .push_bind(format!("%{}%", escape_like(search)))
            .push(" ESCAPE '\\'");
    }

    query
        .push(" ORDER BY rowid LIMIT ")
        .push_bind(i64::from(filter.limit))
        .push(" OFFSET ")
        .push_bind(i64::from(filter.offset));

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(entry_from_row).collect()
}

/// Apply the present fields of `update`
///
/// Absent fields keep their stored value; an explicit `null` on an optional
/// field clears it. Returns `None` when no entry has the given id.
pub async fn update(
    pool: &SqlitePool,
    id: &GameId,
    update: GameUpdate,
) -> Result<Option<LibraryEntry>> {
    update.validate()?;

    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE games SET updated_at = ");
    query.push_bind(Utc::now().timestamp());

    if let Some(title) = update.title {
        query.push(", title = ").push_bind(title);
    }
    if let Some(summary) = update.summary {
        query.push(", summary = ").push_bind(summary);
    }
    if let Some(release_date) = update.release_date {
        query
            .push(", release_date = ")
            .push_bind(release_date.map(|d| d.format("%Y-%m-%d").to_string()));
    }
    if let Some(cover_image) = update.cover_image {
        query.push(", cover_image = ").push_bind(cover_image);
    }
    for (column, items) in [
        ("platforms", &update.platforms),
        ("genres", &update.genres),
        ("developers", &update.developers),
        ("publishers", &update.publishers),
    ] {
        if let Some(items) = items {
            query
                .push(format!(", {} = ", column))
                .push_bind(encode_list(items)?);
        }
    }
    if let Some(rating) = update.rating {
        query.push(", rating = ").push_bind(rating);
    }
    if let Some(status) = update.status {
        query.push(", status = ").push_bind(status.as_str());
    }
    if let Some(notes) = update.notes {
        query.push(", notes = ").push_bind(notes);
    }

    query.push(" WHERE id = ").push_bind(id.as_str().to_string());

    let mut tx = pool.begin().await?;

    let result = query.build().execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let row = sqlx::query(&format!("SELECT {} FROM games WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
    let entry = entry_from_row(&row)?;

    tx.commit().await?;

    Ok(Some(entry))
}

/// Delete an entry; returns whether a row was removed
pub async fn delete(pool: &SqlitePool, id: &GameId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM games WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Counts grouped by status and by platform, read from one snapshot
pub async fn stats(pool: &SqlitePool) -> Result<LibraryStats> {
    let mut tx = pool.begin().await?;

    let status_rows = sqlx::query("SELECT status, COUNT(*) AS count FROM games GROUP BY status")
        .fetch_all(&mut *tx)
        .await?;

    let platform_rows = sqlx::query(
        r#"
        SELECT p.value AS platform, COUNT(*) AS count
        FROM games g, json_each(g.platforms) AS p
        GROUP BY p.value
        "#,
    )
    .fetch_all(&mut *tx)
    .await?;

    tx.commit().await?;

    let status_counts = status_rows
        .iter()
        .map(|row| -> Result<(GameStatus, u64)> {
            let status = parse_status(&row.try_get::<String, _>("status")?)?;
            Ok((status, row.try_get::<i64, _>("count")? as u64))
        })
        .collect::<Result<Vec<_>>>()?;

    let platform_counts = platform_rows
        .iter()
        .map(|row| -> Result<(String, u64)> {
            Ok((
                row.try_get::<String, _>("platform")?,
                row.try_get::<i64, _>("count")? as u64,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LibraryStats::from_counts(status_counts, platform_counts))
}

fn entry_from_row(row: &SqliteRow) -> Result<LibraryEntry> {
    let release_date = row
        .try_get::<Option<String>, _>("release_date")?
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|_| ReplayError::storage(format!("Invalid release date: {}", s)))
        })
        .transpose()?;

    let source_provider = row
        .try_get::<Option<String>, _>("source_provider")?
        .map(|s| {
            s.parse::<Provider>()
                .map_err(|_| ReplayError::storage(format!("Invalid provider: {}", s)))
        })
        .transpose()?;

    Ok(LibraryEntry {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        summary: row.try_get("summary")?,
        release_date,
        cover_image: row.try_get("cover_image")?,
        platforms: decode_list(&row.try_get::<String, _>("platforms")?)?,
        genres: decode_list(&row.try_get::<String, _>("genres")?)?,
        developers: decode_list(&row.try_get::<String, _>("developers")?)?,
        publishers: decode_list(&row.try_get::<String, _>("publishers")?)?,
        rating: row.try_get("rating")?,
        status: parse_status(&row.try_get::<String, _>("status")?)?,
        notes: row.try_get("notes")?,
        source_provider,
        source_id: row.try_get("source_id")?,
        created_at: timestamp(row.try_get("created_at")?)?,
        updated_at: timestamp(row.try_get("updated_at")?)?,
    })
}

fn parse_status(s: &str) -> Result<GameStatus> {
    s.parse()
        .map_err(|_| ReplayError::storage(format!("Invalid status: {}", s)))
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| ReplayError::storage("Invalid timestamp"))
}

fn encode_list(items: &[String]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

fn decode_list(json: &str) -> Result<Vec<String>> {
    Ok(serde_json::from_str(json)?)
}

/// Escape `LIKE` wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
