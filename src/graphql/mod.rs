//! GraphQL surface of the catalog.
//!
//! `async-graphql` parses and executes documents; this module supplies the
//! response records, the resolvers that call into the store, and the root
//! objects binding resolver functions to field names.
//!
//! ## Schema
//!
//! - **Queries**: `listPodcasts`, `listEpisodes`, `listPlayedEpisodes`
//! - **Mutations**: `createPodcast`, `createEpisode`, `setEpisodePlayed`,
//!   `markEpisodePlayed`, `deletePodcast`, `deleteEpisode`

pub mod resolvers;
mod schema;
mod types;

pub use schema::{build_schema, sdl, CatalogSchema, MutationRoot, QueryRoot};
pub use types::{EpisodeRecord, PodcastRecord};
