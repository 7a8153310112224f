//! Direct fetches of single entities in browsable form.
//!
//! These are the public read endpoints: the entity is fetched, expanded one
//! level, and projected for top-level context so credits stay visible.
//! Unlisted and scheduled content resolves here even though listings hide
//! it; knowing the identifier is the capability.

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use videx_model::{
    AccountID, ChannelID, IdOrHandle, PlaylistID, ShowID, UserID, VideoID,
};

use crate::browse::{
    BrowsableAccount, BrowsableChannel, BrowsablePlaylist, BrowsableShow, BrowsableUser,
    BrowsableVideo, BrowseContext, Expander,
};
use crate::error::{Error, Result};
use crate::store::{AccountStore, ContentStore};

/// Single-entity browsable reads.
pub struct BrowseService {
    accounts: Arc<dyn AccountStore>,
    content: Arc<dyn ContentStore>,
}

impl fmt::Debug for BrowseService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowseService")
            .field("accounts", &Arc::strong_count(&self.accounts))
            .field("content", &Arc::strong_count(&self.content))
            .finish()
    }
}

impl BrowseService {
    pub fn new(accounts: Arc<dyn AccountStore>, content: Arc<dyn ContentStore>) -> Self {
        BrowseService { accounts, content }
    }

    fn expander(&self) -> Expander<'_> {
        Expander::new(self.accounts.as_ref(), self.content.as_ref())
    }

    /// Fetches a video with its references expanded and credits resolved.
    pub async fn video(&self, id: VideoID) -> Result<BrowsableVideo> {
        let video = self
            .content
            .video(&id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("video {id}")))?;
        let form = self.expander().video(&video).await?;
        Ok(form.project(BrowseContext::TopLevel))
    }

    /// Fetches a show with its episode cards expanded.
    pub async fn show(&self, id: ShowID) -> Result<BrowsableShow> {
        let show = self
            .content
            .show(&id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("show {id}")))?;
        let form = self.expander().show(&show).await?;
        Ok(form.project(BrowseContext::TopLevel))
    }

    /// Fetches a playlist with its member cards expanded.
    pub async fn playlist(&self, id: PlaylistID) -> Result<BrowsablePlaylist> {
        let playlist = self
            .content
            .playlist(&id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("playlist {id}")))?;
        let form = self.expander().playlist(&playlist).await?;
        Ok(form.project(BrowseContext::TopLevel))
    }

    /// Fetches a channel's public face with its staff lists expanded.
    pub async fn channel(&self, id: ChannelID) -> Result<BrowsableChannel> {
        let channel = self
            .accounts
            .channel(&id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("channel {id}")))?;
        self.expander().channel(&channel).await
    }

    /// Fetches a user's public face with its membership lists expanded.
    pub async fn user(&self, id: UserID) -> Result<BrowsableUser> {
        let user = self
            .accounts
            .user(&id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user {id}")))?;
        self.expander().user(&user).await
    }

    /// Resolves a raw path segment to whichever account it names.
    ///
    /// A segment that parses as a UUID is tried as a user id, then a channel
    /// id. Anything else is treated as a handle and resolved through the
    /// shared handle namespace.
    pub async fn account(&self, selector: &str) -> Result<BrowsableAccount> {
        let parsed = IdOrHandle::parse(selector)
            .map_err(|_| Error::InvalidIdentifier(selector.to_string()))?;

        match parsed {
            IdOrHandle::Id(id) => {
                if let Some(user) = self.accounts.user(&UserID(id)).await? {
                    let form = self.expander().user(&user).await?;
                    return Ok(BrowsableAccount::User(form));
                }
                if let Some(channel) = self.accounts.channel(&ChannelID(id)).await? {
                    let form = self.expander().channel(&channel).await?;
                    return Ok(BrowsableAccount::Channel(form));
                }
                Err(Error::NotFound(format!("account {id}")))
            }
            IdOrHandle::Handle(handle) => {
                debug!(handle = %handle, "resolving account by handle");
                match self.accounts.resolve_handle(&handle).await? {
                    Some(AccountID::User(id)) => self.user(id).await.map(BrowsableAccount::User),
                    Some(AccountID::Channel(id)) => {
                        self.channel(id).await.map(BrowsableAccount::Channel)
                    }
                    None => Err(Error::NotFound(format!("account @{handle}"))),
                }
            }
        }
    }
}
