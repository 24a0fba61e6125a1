use async_graphql::SimpleObject;

use crate::models::{Episode, Podcast};

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Episode")]
pub struct EpisodeRecord {
    pub id: i64,
    pub title: String,
    pub podcast_id: i64,
    pub is_played: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
#[graphql(name = "Podcast")]
pub struct PodcastRecord {
    pub id: i64,
    pub title: String,
    pub episodes: Vec<EpisodeRecord>,
}

impl From<Episode> for EpisodeRecord {
    fn from(episode: Episode) -> Self {
        Self {
            id: episode.id,
            title: episode.title,
            podcast_id: episode.podcast_id,
            is_played: episode.is_played,
        }
    }
}

impl From<Podcast> for PodcastRecord {
    fn from(podcast: Podcast) -> Self {
        Self {
            id: podcast.id,
            title: podcast.title,
            episodes: podcast.episodes.into_iter().map(Into::into).collect(),
        }
    }
}
