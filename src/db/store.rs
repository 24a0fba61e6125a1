use std::path::{Path, PathBuf};

use rusqlite::{params, OptionalExtension, Row, TransactionBehavior};
use tokio_rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::{Episode, NewEpisode, NewPodcast, Podcast};

use super::schema::SCHEMA;

/// Handle to the catalog database.
///
/// Holds only the database location. Every unit of work goes through a
/// [`Session`] obtained from [`Store::session`], which owns its own
/// connection for as long as the session value lives.
#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    /// Open (creating if needed) the database file and ensure the tables exist.
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let store = Self { db_path };
        let session = store.session().await?;
        session
            .conn
            .call(|conn| {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await?;
        session.close().await?;

        tracing::debug!("Opened catalog at {}", store.db_path.display());
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Acquire a fresh connection scoped to one operation.
    pub async fn session(&self) -> Result<Session> {
        let conn = Connection::open(&self.db_path).await?;
        Ok(Session { conn })
    }
}

/// A scoped connection to the catalog. Dropping it releases the connection.
pub struct Session {
    conn: Connection,
}

impl Session {
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }

    // Podcast operations

    pub async fn list_podcasts(&self) -> Result<Vec<Podcast>> {
        let podcasts = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT p.id, p.title, e.id, e.title, e.podcast_id, e.is_played
                       FROM podcast p
                       LEFT JOIN episode e ON e.podcast_id = p.id
                       ORDER BY p.id, e.id"#,
                )?;
                let rows = stmt
                    .query_map([], joined_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(group_podcasts(rows))
            })
            .await?;
        Ok(podcasts)
    }

    pub async fn create_podcast(&self, podcast: NewPodcast) -> Result<Podcast> {
        let title = podcast.title.clone();
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO podcast (title) VALUES (?1)",
                    params![podcast.title],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        tracing::debug!("Created podcast {} ({})", id, title);
        Ok(Podcast {
            id,
            title,
            episodes: Vec::new(),
        })
    }

    /// Delete a podcast and return it as it was just before deletion.
    ///
    /// Episodes pointing at the podcast are left untouched.
    pub async fn delete_podcast(&self, podcast_id: i64) -> Result<Podcast> {
        let snapshot = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let Some(podcast) = load_podcast(&tx, podcast_id)? else {
                    return Ok(None);
                };
                tx.execute("DELETE FROM podcast WHERE id = ?1", params![podcast_id])?;
                tx.commit()?;
                Ok(Some(podcast))
            })
            .await?;

        let podcast = snapshot.ok_or_else(|| AppError::not_found("Podcast", podcast_id))?;
        tracing::debug!(
            "Deleted podcast {} leaving {} episodes",
            podcast.id,
            podcast.episodes.len()
        );
        Ok(podcast)
    }

    // Episode operations

    pub async fn list_episodes(&self) -> Result<Vec<Episode>> {
        self.query_episodes("SELECT id, title, podcast_id, is_played FROM episode ORDER BY id")
            .await
    }

    pub async fn list_played_episodes(&self) -> Result<Vec<Episode>> {
        self.query_episodes(
            "SELECT id, title, podcast_id, is_played FROM episode WHERE is_played = 1 ORDER BY id",
        )
        .await
    }

    /// Insert an episode under an existing podcast. New episodes start unplayed.
    pub async fn create_episode(&self, episode: NewEpisode) -> Result<Episode> {
        let podcast_id = episode.podcast_id;
        let inserted = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let exists: bool = tx.query_row(
                    "SELECT EXISTS(SELECT 1 FROM podcast WHERE id = ?1)",
                    params![episode.podcast_id],
                    |row| row.get(0),
                )?;
                if !exists {
                    return Ok(None);
                }
                tx.execute(
                    "INSERT INTO episode (title, podcast_id, is_played) VALUES (?1, ?2, 0)",
                    params![episode.title, episode.podcast_id],
                )?;
                let id = tx.last_insert_rowid();
                tx.commit()?;
                Ok(Some(Episode {
                    id,
                    title: episode.title,
                    podcast_id: episode.podcast_id,
                    is_played: false,
                }))
            })
            .await?;

        let episode = inserted.ok_or(AppError::Referential { podcast_id })?;
        tracing::debug!("Created episode {} under podcast {}", episode.id, podcast_id);
        Ok(episode)
    }

    pub async fn set_episode_played(&self, episode_id: i64, played: bool) -> Result<Episode> {
        let updated = self
            .conn
            .call(move |conn| {
                let episode = conn
                    .query_row(
                        r#"UPDATE episode SET is_played = ?1 WHERE id = ?2
                           RETURNING id, title, podcast_id, is_played"#,
                        params![played, episode_id],
                        episode_from_row,
                    )
                    .optional()?;
                Ok(episode)
            })
            .await?;

        let episode = updated.ok_or_else(|| AppError::not_found("Episode", episode_id))?;
        tracing::debug!("Episode {} played = {}", episode.id, episode.is_played);
        Ok(episode)
    }

    /// Delete an episode and return it as it was just before deletion.
    pub async fn delete_episode(&self, episode_id: i64) -> Result<Episode> {
        let snapshot = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let episode = tx
                    .query_row(
                        "SELECT id, title, podcast_id, is_played FROM episode WHERE id = ?1",
                        params![episode_id],
                        episode_from_row,
                    )
                    .optional()?;
                if episode.is_some() {
                    tx.execute("DELETE FROM episode WHERE id = ?1", params![episode_id])?;
                    tx.commit()?;
                }
                Ok(episode)
            })
            .await?;

        let episode = snapshot.ok_or_else(|| AppError::not_found("Episode", episode_id))?;
        tracing::debug!("Deleted episode {}", episode.id);
        Ok(episode)
    }

    async fn query_episodes(&self, sql: &'static str) -> Result<Vec<Episode>> {
        let episodes = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql)?;
                let episodes = stmt
                    .query_map([], episode_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(episodes)
            })
            .await?;
        Ok(episodes)
    }
}

fn load_podcast(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<Option<Podcast>> {
    let title: Option<String> = conn
        .query_row(
            "SELECT title FROM podcast WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    let Some(title) = title else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        "SELECT id, title, podcast_id, is_played FROM episode WHERE podcast_id = ?1 ORDER BY id",
    )?;
    let episodes = stmt
        .query_map(params![id], episode_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Some(Podcast {
        id,
        title,
        episodes,
    }))
}

fn episode_from_row(row: &Row) -> rusqlite::Result<Episode> {
    Ok(Episode {
        id: row.get(0)?,
        title: row.get(1)?,
        podcast_id: row.get(2)?,
        is_played: row.get(3)?,
    })
}

type JoinedRow = (i64, String, Option<Episode>);

// podcast columns 0..2, nullable episode columns 2..6
fn joined_row(row: &Row) -> rusqlite::Result<JoinedRow> {
    let episode = match row.get::<_, Option<i64>>(2)? {
        Some(id) => Some(Episode {
            id,
            title: row.get(3)?,
            podcast_id: row.get(4)?,
            is_played: row.get(5)?,
        }),
        None => None,
    };
    Ok((row.get(0)?, row.get(1)?, episode))
}

/// Fold join rows (sorted by podcast id) into podcasts with their episodes.
fn group_podcasts(rows: Vec<JoinedRow>) -> Vec<Podcast> {
    let mut podcasts: Vec<Podcast> = Vec::new();
    for (id, title, episode) in rows {
        if podcasts.last().map_or(true, |p| p.id != id) {
            podcasts.push(Podcast {
                id,
                title,
                episodes: Vec::new(),
            });
        }
        if let (Some(episode), Some(podcast)) = (episode, podcasts.last_mut()) {
            podcast.episodes.push(episode);
        }
    }
    podcasts
}
