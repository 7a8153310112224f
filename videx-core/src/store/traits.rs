//! Storage ports.
//!
//! Services talk to storage through these traits only, so backends can be
//! swapped without touching the graph logic. The in-memory backend in
//! [`crate::store::memory`] is the reference implementation.

use async_trait::async_trait;
use videx_model::{
    AccountID, Channel, ChannelID, Handle, Playlist, PlaylistID, Show, ShowID, User, UserID,
    Video, VideoID,
};

use crate::store::error::StoreResult;

/// Narrowing filters for content queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentFilter {
    /// Restrict results to a single channel.
    pub channel: Option<ChannelID>,
}

impl ContentFilter {
    /// Everything the store holds.
    pub fn all() -> Self {
        ContentFilter::default()
    }

    /// Only content owned by `channel`.
    pub fn channel(channel: ChannelID) -> Self {
        ContentFilter {
            channel: Some(channel),
        }
    }

    /// Whether content owned by `channel` passes this filter.
    pub fn matches(&self, channel: ChannelID) -> bool {
        self.channel.is_none_or(|wanted| wanted == channel)
    }
}

/// Persistence port for user and channel accounts.
///
/// Uniqueness is the backend's responsibility: inserts and updates must
/// reject handle or email collisions atomically, leaving no partial record.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new user.
    async fn insert_user(&self, user: User) -> StoreResult<()>;
    /// Fetches a user by id.
    async fn user(&self, id: &UserID) -> StoreResult<Option<User>>;
    /// Fetches a user by handle, case-insensitively.
    async fn user_by_handle(&self, handle: &Handle) -> StoreResult<Option<User>>;
    /// Replaces a stored user. Fails with `NotFound` when absent.
    async fn update_user(&self, user: User) -> StoreResult<()>;
    /// Deletes a user and releases its unique values.
    async fn delete_user(&self, id: &UserID) -> StoreResult<()>;
    /// Every stored user.
    async fn users(&self) -> StoreResult<Vec<User>>;

    /// Persists a new channel.
    async fn insert_channel(&self, channel: Channel) -> StoreResult<()>;
    /// Fetches a channel by id.
    async fn channel(&self, id: &ChannelID) -> StoreResult<Option<Channel>>;
    /// Fetches a channel by handle, case-insensitively.
    async fn channel_by_handle(&self, handle: &Handle) -> StoreResult<Option<Channel>>;
    /// Replaces a stored channel. Fails with `NotFound` when absent.
    async fn update_channel(&self, channel: Channel) -> StoreResult<()>;
    /// Deletes a channel and releases its handle.
    async fn delete_channel(&self, id: &ChannelID) -> StoreResult<()>;
    /// Every stored channel.
    async fn channels(&self) -> StoreResult<Vec<Channel>>;

    /// Resolves a handle to whichever account holds it.
    async fn resolve_handle(&self, handle: &Handle) -> StoreResult<Option<AccountID>>;
}

/// Persistence port for videos, shows, and playlists.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Persists a new video.
    async fn insert_video(&self, video: Video) -> StoreResult<()>;
    /// Fetches a video by id.
    async fn video(&self, id: &VideoID) -> StoreResult<Option<Video>>;
    /// Replaces a stored video. Fails with `NotFound` when absent.
    async fn update_video(&self, video: Video) -> StoreResult<()>;
    /// Deletes a video.
    async fn delete_video(&self, id: &VideoID) -> StoreResult<()>;
    /// Videos passing the filter.
    async fn videos(&self, filter: ContentFilter) -> StoreResult<Vec<Video>>;

    /// Persists a new show.
    async fn insert_show(&self, show: Show) -> StoreResult<()>;
    /// Fetches a show by id.
    async fn show(&self, id: &ShowID) -> StoreResult<Option<Show>>;
    /// Replaces a stored show. Fails with `NotFound` when absent.
    async fn update_show(&self, show: Show) -> StoreResult<()>;
    /// Deletes a show.
    async fn delete_show(&self, id: &ShowID) -> StoreResult<()>;
    /// Shows passing the filter.
    async fn shows(&self, filter: ContentFilter) -> StoreResult<Vec<Show>>;

    /// Persists a new playlist.
    async fn insert_playlist(&self, playlist: Playlist) -> StoreResult<()>;
    /// Fetches a playlist by id.
    async fn playlist(&self, id: &PlaylistID) -> StoreResult<Option<Playlist>>;
    /// Replaces a stored playlist. Fails with `NotFound` when absent.
    async fn update_playlist(&self, playlist: Playlist) -> StoreResult<()>;
    /// Deletes a playlist.
    async fn delete_playlist(&self, id: &PlaylistID) -> StoreResult<()>;
    /// Playlists passing the filter.
    async fn playlists(&self, filter: ContentFilter) -> StoreResult<Vec<Playlist>>;
}
