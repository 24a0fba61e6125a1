use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};

use crate::db::Store;
use crate::error::Result;

use super::resolvers;
use super::types::{EpisodeRecord, PodcastRecord};

pub type CatalogSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema around an injected store handle.
pub fn build_schema(store: Store) -> CatalogSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

fn extend<T>(result: Result<T>) -> async_graphql::Result<T> {
    result.map_err(|e| {
        if e.is_client_error() {
            tracing::debug!("Rejected request: {}", e);
        } else {
            tracing::error!("Catalog operation failed: {}", e);
        }
        e.extend()
    })
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All podcasts with their episodes.
    async fn list_podcasts(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<PodcastRecord>> {
        extend(resolvers::list_podcasts(ctx.data::<Store>()?).await)
    }

    /// All episodes.
    async fn list_episodes(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<EpisodeRecord>> {
        extend(resolvers::list_episodes(ctx.data::<Store>()?).await)
    }

    /// Episodes marked as played.
    async fn list_played_episodes(
        &self,
        ctx: &Context<'_>,
    ) -> async_graphql::Result<Vec<EpisodeRecord>> {
        extend(resolvers::list_played_episodes(ctx.data::<Store>()?).await)
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_podcast(
        &self,
        ctx: &Context<'_>,
        title: String,
    ) -> async_graphql::Result<PodcastRecord> {
        extend(resolvers::create_podcast(ctx.data::<Store>()?, title).await)
    }

    /// Fails with code `REFERENTIAL` when the podcast does not exist.
    async fn create_episode(
        &self,
        ctx: &Context<'_>,
        title: String,
        podcast_id: i64,
    ) -> async_graphql::Result<EpisodeRecord> {
        extend(resolvers::create_episode(ctx.data::<Store>()?, title, podcast_id).await)
    }

    async fn set_episode_played(
        &self,
        ctx: &Context<'_>,
        episode_id: i64,
        #[graphql(default = true)] played: bool,
    ) -> async_graphql::Result<EpisodeRecord> {
        extend(resolvers::set_episode_played(ctx.data::<Store>()?, episode_id, played).await)
    }

    /// Shorthand for `setEpisodePlayed(episodeId, played: true)`.
    async fn mark_episode_played(
        &self,
        ctx: &Context<'_>,
        episode_id: i64,
    ) -> async_graphql::Result<EpisodeRecord> {
        extend(resolvers::set_episode_played(ctx.data::<Store>()?, episode_id, true).await)
    }

    /// Returns the podcast as it was before deletion. Its episodes are kept.
    async fn delete_podcast(
        &self,
        ctx: &Context<'_>,
        podcast_id: i64,
    ) -> async_graphql::Result<PodcastRecord> {
        extend(resolvers::delete_podcast(ctx.data::<Store>()?, podcast_id).await)
    }

    /// Returns the episode as it was before deletion.
    async fn delete_episode(
        &self,
        ctx: &Context<'_>,
        episode_id: i64,
    ) -> async_graphql::Result<EpisodeRecord> {
        extend(resolvers::delete_episode(ctx.data::<Store>()?, episode_id).await)
    }
}

/// Schema definition language for the catalog, without a backing store.
pub fn sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}
