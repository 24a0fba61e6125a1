use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: i64,
    pub title: String,
    pub podcast_id: i64,
    pub is_played: bool,
}

#[derive(Debug, Clone)]
pub struct NewEpisode {
    pub title: String,
    pub podcast_id: i64,
}
