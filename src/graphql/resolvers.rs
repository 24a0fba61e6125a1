//! One function per named operation.
//!
//! Each resolver opens its own session, makes a single store call and
//! converts the result into response records. The session is dropped when
//! the function returns, whether or not the call succeeded.

use crate::db::Store;
use crate::error::Result;
use crate::models::{NewEpisode, NewPodcast};

use super::types::{EpisodeRecord, PodcastRecord};

// Queries

pub async fn list_podcasts(store: &Store) -> Result<Vec<PodcastRecord>> {
    let session = store.session().await?;
    let podcasts = session.list_podcasts().await?;
    Ok(podcasts.into_iter().map(Into::into).collect())
}

pub async fn list_episodes(store: &Store) -> Result<Vec<EpisodeRecord>> {
    let session = store.session().await?;
    let episodes = session.list_episodes().await?;
    Ok(episodes.into_iter().map(Into::into).collect())
}

pub async fn list_played_episodes(store: &Store) -> Result<Vec<EpisodeRecord>> {
    let session = store.session().await?;
    let episodes = session.list_played_episodes().await?;
    Ok(episodes.into_iter().map(Into::into).collect())
}

// Mutations

pub async fn create_podcast(store: &Store, title: String) -> Result<PodcastRecord> {
    let session = store.session().await?;
    let podcast = session.create_podcast(NewPodcast { title }).await?;
    Ok(podcast.into())
}

pub async fn create_episode(store: &Store, title: String, podcast_id: i64) -> Result<EpisodeRecord> {
    let session = store.session().await?;
    let episode = session
        .create_episode(NewEpisode { title, podcast_id })
        .await?;
    Ok(episode.into())
}

pub async fn set_episode_played(
    store: &Store,
    episode_id: i64,
    played: bool,
) -> Result<EpisodeRecord> {
    let session = store.session().await?;
    let episode = session.set_episode_played(episode_id, played).await?;
    Ok(episode.into())
}

pub async fn delete_podcast(store: &Store, podcast_id: i64) -> Result<PodcastRecord> {
    let session = store.session().await?;
    let snapshot = session.delete_podcast(podcast_id).await?;
    Ok(snapshot.into())
}

pub async fn delete_episode(store: &Store, episode_id: i64) -> Result<EpisodeRecord> {
    let session = store.session().await?;
    let snapshot = session.delete_episode(episode_id).await?;
    Ok(snapshot.into())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn temp_store() -> (TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("catalog.db")).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn worked_example() {
        let (_dir, store) = temp_store().await;

        let podcast = create_podcast(&store, "Tech Talk".to_string()).await.unwrap();
        assert_eq!(podcast.id, 1);

        let episode = create_episode(&store, "Ep1".to_string(), podcast.id)
            .await
            .unwrap();
        assert_eq!(episode.id, 1);
        assert!(!episode.is_played);

        let played = set_episode_played(&store, episode.id, true).await.unwrap();
        let expected = EpisodeRecord {
            id: 1,
            title: "Ep1".to_string(),
            podcast_id: 1,
            is_played: true,
        };
        assert_eq!(played, expected);
        assert_eq!(list_played_episodes(&store).await.unwrap(), vec![expected]);
    }

    #[tokio::test]
    async fn listed_podcast_carries_episode_records() {
        let (_dir, store) = temp_store().await;

        let podcast = create_podcast(&store, "Tech Talk".to_string()).await.unwrap();
        let episode = create_episode(&store, "Ep1".to_string(), podcast.id)
            .await
            .unwrap();

        let podcasts = list_podcasts(&store).await.unwrap();
        assert_eq!(podcasts.len(), 1);
        assert_eq!(podcasts[0].episodes, vec![episode.clone()]);
        assert_eq!(list_episodes(&store).await.unwrap(), vec![episode]);
    }

    #[tokio::test]
    async fn failed_mutation_surfaces_error() {
        let (_dir, store) = temp_store().await;

        let err = delete_episode(&store, 1).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        let err = delete_podcast(&store, 1).await.unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
        let err = create_episode(&store, "Ep1".to_string(), 1).await.unwrap_err();
        assert_eq!(err.code(), "REFERENTIAL");
    }
}
