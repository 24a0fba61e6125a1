use serde::{Deserialize, Serialize};

use super::Episode;

/// A podcast together with the episodes that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podcast {
    pub id: i64,
    pub title: String,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone)]
pub struct NewPodcast {
    pub title: String,
}
