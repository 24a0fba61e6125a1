mod episode;
mod podcast;

pub use episode::{Episode, NewEpisode};
pub use podcast::{NewPodcast, Podcast};
