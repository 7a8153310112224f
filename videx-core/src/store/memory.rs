//! In-memory reference backend.
//!
//! Documents live in [`DashMap`]s keyed by id, with two side indexes
//! enforcing the uniqueness rules: one mapping normalized handles to the
//! account that holds them (users and channels share the namespace), one
//! mapping normalized emails to users. Index slots are reserved through the
//! entry API before the document is written, and released again if a later
//! reservation in the same write fails, so a rejected write never leaves a
//! partial record.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use videx_model::{
    AccountID, Channel, ChannelID, EmailAddress, Handle, Playlist, PlaylistID, Show, ShowID,
    User, UserID, Video, VideoID,
};

use crate::store::error::{StoreError, StoreResult, UniqueConstraint};
use crate::store::traits::{AccountStore, ContentFilter, ContentStore};

/// Concurrent in-memory store for accounts and content.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<UserID, User>,
    channels: DashMap<ChannelID, Channel>,
    videos: DashMap<VideoID, Video>,
    shows: DashMap<ShowID, Show>,
    playlists: DashMap<PlaylistID, Playlist>,
    /// Normalized handle -> account holding it.
    handles: DashMap<String, AccountID>,
    /// Normalized email -> user holding it.
    emails: DashMap<String, UserID>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn reserve_handle(&self, handle: &Handle, owner: AccountID) -> StoreResult<()> {
        match self.handles.entry(handle.normalized()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                constraint: UniqueConstraint::Handle,
                value: handle.as_str().to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(owner);
                Ok(())
            }
        }
    }

    fn release_handle(&self, handle: &Handle) {
        self.handles.remove(&handle.normalized());
    }

    fn reserve_email(&self, email: &EmailAddress, owner: UserID) -> StoreResult<()> {
        match self.emails.entry(email.normalized()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate {
                constraint: UniqueConstraint::Email,
                value: email.as_str().to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(owner);
                Ok(())
            }
        }
    }

    fn release_email(&self, email: &EmailAddress) {
        self.emails.remove(&email.normalized());
    }

    fn check_owners(channel: &Channel) -> StoreResult<()> {
        if channel.owners.is_empty() {
            return Err(StoreError::Check(format!(
                "channel {} has no owners",
                channel.id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(StoreError::Check(format!("user {} already stored", user.id)));
        }
        self.reserve_handle(&user.public.handle, AccountID::User(user.id))?;
        if let Err(err) = self.reserve_email(&user.private.email, user.id) {
            self.release_handle(&user.public.handle);
            return Err(err);
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn user(&self, id: &UserID) -> StoreResult<Option<User>> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn user_by_handle(&self, handle: &Handle) -> StoreResult<Option<User>> {
        let holder = self.handles.get(&handle.normalized()).map(|e| *e.value());
        let Some(AccountID::User(id)) = holder else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_user(&self, user: User) -> StoreResult<()> {
        let old = self
            .users
            .get(&user.id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(format!("user {}", user.id)))?;

        let handle_changed = old.public.handle.normalized() != user.public.handle.normalized();
        let email_changed = old.private.email.normalized() != user.private.email.normalized();

        if handle_changed {
            self.reserve_handle(&user.public.handle, AccountID::User(user.id))?;
        }
        if email_changed {
            if let Err(err) = self.reserve_email(&user.private.email, user.id) {
                if handle_changed {
                    self.release_handle(&user.public.handle);
                }
                return Err(err);
            }
        }
        if handle_changed {
            self.release_handle(&old.public.handle);
        }
        if email_changed {
            self.release_email(&old.private.email);
        }
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn delete_user(&self, id: &UserID) -> StoreResult<()> {
        let Some((_, user)) = self.users.remove(id) else {
            return Err(StoreError::NotFound(format!("user {id}")));
        };
        self.release_handle(&user.public.handle);
        self.release_email(&user.private.email);
        Ok(())
    }

    async fn users(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn insert_channel(&self, channel: Channel) -> StoreResult<()> {
        Self::check_owners(&channel)?;
        if self.channels.contains_key(&channel.id) {
            return Err(StoreError::Check(format!(
                "channel {} already stored",
                channel.id
            )));
        }
        self.reserve_handle(&channel.public.handle, AccountID::Channel(channel.id))?;
        self.channels.insert(channel.id, channel);
        Ok(())
    }

    async fn channel(&self, id: &ChannelID) -> StoreResult<Option<Channel>> {
        Ok(self.channels.get(id).map(|entry| entry.value().clone()))
    }

    async fn channel_by_handle(&self, handle: &Handle) -> StoreResult<Option<Channel>> {
        let holder = self.handles.get(&handle.normalized()).map(|e| *e.value());
        let Some(AccountID::Channel(id)) = holder else {
            return Ok(None);
        };
        Ok(self.channels.get(&id).map(|entry| entry.value().clone()))
    }

    async fn update_channel(&self, channel: Channel) -> StoreResult<()> {
        Self::check_owners(&channel)?;
        let old = self
            .channels
            .get(&channel.id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::NotFound(format!("channel {}", channel.id)))?;

        if old.public.handle.normalized() != channel.public.handle.normalized() {
            self.reserve_handle(&channel.public.handle, AccountID::Channel(channel.id))?;
            self.release_handle(&old.public.handle);
        }
        self.channels.insert(channel.id, channel);
        Ok(())
    }

    async fn delete_channel(&self, id: &ChannelID) -> StoreResult<()> {
        let Some((_, channel)) = self.channels.remove(id) else {
            return Err(StoreError::NotFound(format!("channel {id}")));
        };
        self.release_handle(&channel.public.handle);
        Ok(())
    }

    async fn channels(&self) -> StoreResult<Vec<Channel>> {
        Ok(self
            .channels
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn resolve_handle(&self, handle: &Handle) -> StoreResult<Option<AccountID>> {
        Ok(self.handles.get(&handle.normalized()).map(|e| *e.value()))
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn insert_video(&self, video: Video) -> StoreResult<()> {
        match self.videos.entry(video.id()) {
            Entry::Occupied(_) => Err(StoreError::Check(format!(
                "video {} already stored",
                video.id()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(video);
                Ok(())
            }
        }
    }

    async fn video(&self, id: &VideoID) -> StoreResult<Option<Video>> {
        Ok(self.videos.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_video(&self, video: Video) -> StoreResult<()> {
        match self.videos.entry(video.id()) {
            Entry::Occupied(mut slot) => {
                slot.insert(video);
                Ok(())
            }
            Entry::Vacant(_) => Err(StoreError::NotFound(format!("video {}", video.id()))),
        }
    }

    async fn delete_video(&self, id: &VideoID) -> StoreResult<()> {
        match self.videos.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(format!("video {id}"))),
        }
    }

    async fn videos(&self, filter: ContentFilter) -> StoreResult<Vec<Video>> {
        Ok(self
            .videos
            .iter()
            .filter(|entry| filter.matches(entry.value().channel()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn insert_show(&self, show: Show) -> StoreResult<()> {
        match self.shows.entry(show.id()) {
            Entry::Occupied(_) => Err(StoreError::Check(format!(
                "show {} already stored",
                show.id()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(show);
                Ok(())
            }
        }
    }

    async fn show(&self, id: &ShowID) -> StoreResult<Option<Show>> {
        Ok(self.shows.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_show(&self, show: Show) -> StoreResult<()> {
        match self.shows.entry(show.id()) {
            Entry::Occupied(mut slot) => {
                slot.insert(show);
                Ok(())
            }
            Entry::Vacant(_) => Err(StoreError::NotFound(format!("show {}", show.id()))),
        }
    }

    async fn delete_show(&self, id: &ShowID) -> StoreResult<()> {
        match self.shows.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(format!("show {id}"))),
        }
    }

    async fn shows(&self, filter: ContentFilter) -> StoreResult<Vec<Show>> {
        Ok(self
            .shows
            .iter()
            .filter(|entry| filter.matches(entry.value().channel()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn insert_playlist(&self, playlist: Playlist) -> StoreResult<()> {
        match self.playlists.entry(playlist.id) {
            Entry::Occupied(_) => Err(StoreError::Check(format!(
                "playlist {} already stored",
                playlist.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(playlist);
                Ok(())
            }
        }
    }

    async fn playlist(&self, id: &PlaylistID) -> StoreResult<Option<Playlist>> {
        Ok(self.playlists.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_playlist(&self, playlist: Playlist) -> StoreResult<()> {
        match self.playlists.entry(playlist.id) {
            Entry::Occupied(mut slot) => {
                slot.insert(playlist);
                Ok(())
            }
            Entry::Vacant(_) => Err(StoreError::NotFound(format!("playlist {}", playlist.id))),
        }
    }

    async fn delete_playlist(&self, id: &PlaylistID) -> StoreResult<()> {
        match self.playlists.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(format!("playlist {id}"))),
        }
    }

    async fn playlists(&self, filter: ContentFilter) -> StoreResult<Vec<Playlist>> {
        Ok(self
            .playlists
            .iter()
            .filter(|entry| filter.matches(entry.value().info.channel))
            .map(|entry| entry.value().clone())
            .collect())
    }
}
