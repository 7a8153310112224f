//! Public cursor listings over the content graph.
//!
//! Every listing walks the same pipeline: fetch the domain, drop entities
//! that are not publicly listable right now, paginate with the configured
//! fill strategy, then expand the page into nested browsable forms. A
//! dangling required reference drops the affected entry rather than failing
//! the page.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use videx_contracts::listing::Listable;
use videx_model::{Channel, ChannelID, ListingOrder, Playlist, Show, Video};

use crate::api_types::ListingQuery;
use crate::browse::{
    BrowsablePlaylist, BrowsableShow, BrowsableVideo, BrowseContext, ChannelReference, Expander,
};
use crate::config::ListingConfig;
use crate::error::{Error, Result};
use crate::listing::{paginate, paginate_with, Cursor, Page};
use crate::store::{AccountStore, ContentFilter, ContentStore};

/// Paginated public listings.
pub struct ListingService {
    accounts: Arc<dyn AccountStore>,
    content: Arc<dyn ContentStore>,
    config: ListingConfig,
}

impl fmt::Debug for ListingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListingService")
            .field("accounts", &Arc::strong_count(&self.accounts))
            .field("content", &Arc::strong_count(&self.content))
            .field("config", &self.config)
            .finish()
    }
}

impl ListingService {
    /// A listing service with default limits and cyclic fill.
    pub fn new(accounts: Arc<dyn AccountStore>, content: Arc<dyn ContentStore>) -> Self {
        ListingService {
            accounts,
            content,
            config: ListingConfig::default(),
        }
    }

    /// Swaps in loaded listing configuration.
    pub fn with_config(mut self, config: ListingConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolves a raw query into a cursor and an effective limit.
    fn params(&self, query: &ListingQuery) -> Result<(Cursor, usize)> {
        let cursor = match query.cursor.as_deref() {
            Some(raw) => Cursor::parse(raw)?,
            None => Cursor::Beginning,
        };
        Ok((cursor, self.config.clamp(query.limit)))
    }

    fn filter(channel: Option<ChannelID>) -> ContentFilter {
        match channel {
            Some(channel) => ContentFilter::channel(channel),
            None => ContentFilter::all(),
        }
    }

    fn expander(&self) -> Expander<'_> {
        Expander::new(self.accounts.as_ref(), self.content.as_ref())
    }

    /// Videos visible in public listings, optionally scoped to one channel.
    /// Episodes, unlisted videos, and unreleased schedules never appear.
    pub async fn videos(
        &self,
        query: &ListingQuery,
        channel: Option<ChannelID>,
    ) -> Result<Page<BrowsableVideo>> {
        let (cursor, limit) = self.params(query)?;
        let now = Utc::now();
        let mut videos = self.content.videos(Self::filter(channel)).await?;
        videos.retain(|video| video.listable_at(now));

        let fill = self.config.fill.strategy::<Video>();
        let page = paginate(videos, &cursor, limit, fill.as_ref());

        let expander = self.expander();
        let mut content = Vec::with_capacity(page.content.len());
        for video in &page.content {
            match expander.video(video).await {
                Ok(form) => content.push(form.project(BrowseContext::Nested)),
                Err(Error::NotFound(reference)) => {
                    warn!(video = %video.id(), %reference, "dropping listing entry with a dangling reference");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(Page {
            content,
            cursor: page.cursor,
            limit: page.limit,
        })
    }

    /// Shows visible in public listings, optionally scoped to one channel.
    pub async fn shows(
        &self,
        query: &ListingQuery,
        channel: Option<ChannelID>,
    ) -> Result<Page<BrowsableShow>> {
        let (cursor, limit) = self.params(query)?;
        let now = Utc::now();
        let mut shows = self.content.shows(Self::filter(channel)).await?;
        shows.retain(|show| show.listable_at(now));

        let fill = self.config.fill.strategy::<Show>();
        let page = paginate(shows, &cursor, limit, fill.as_ref());

        let expander = self.expander();
        let mut content = Vec::with_capacity(page.content.len());
        for show in &page.content {
            match expander.show(show).await {
                Ok(form) => content.push(form.project(BrowseContext::Nested)),
                Err(Error::NotFound(reference)) => {
                    warn!(show = %show.id(), %reference, "dropping listing entry with a dangling reference");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(Page {
            content,
            cursor: page.cursor,
            limit: page.limit,
        })
    }

    /// Playlists visible in public listings, optionally scoped to one
    /// channel.
    pub async fn playlists(
        &self,
        query: &ListingQuery,
        channel: Option<ChannelID>,
    ) -> Result<Page<BrowsablePlaylist>> {
        let (cursor, limit) = self.params(query)?;
        let now = Utc::now();
        let mut playlists = self.content.playlists(Self::filter(channel)).await?;
        playlists.retain(|playlist| playlist.listable_at(now));

        let fill = self.config.fill.strategy::<Playlist>();
        let page = paginate(playlists, &cursor, limit, fill.as_ref());

        let expander = self.expander();
        let mut content = Vec::with_capacity(page.content.len());
        for playlist in &page.content {
            match expander.playlist(playlist).await {
                Ok(form) => content.push(form.project(BrowseContext::Nested)),
                Err(Error::NotFound(reference)) => {
                    warn!(playlist = %playlist.id, %reference, "dropping listing entry with a dangling reference");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(Page {
            content,
            cursor: page.cursor,
            limit: page.limit,
        })
    }

    /// All channels as public references. Channels have no listability
    /// gates; the reference shape already carries only public fields.
    pub async fn channels(&self, query: &ListingQuery) -> Result<Page<ChannelReference>> {
        let (cursor, limit) = self.params(query)?;
        let channels = self.accounts.channels().await?;

        let fill = self.config.fill.strategy::<Channel>();
        let page = paginate_with(
            channels,
            |channel| ListingOrder::from(channel.id),
            &cursor,
            limit,
            fill.as_ref(),
        );
        Ok(page.map(|channel| ChannelReference::from(&channel)))
    }
}
