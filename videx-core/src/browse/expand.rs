//! One-level reference expansion.
//!
//! The expander resolves an entity's direct references against the stores
//! and builds its complete browsable form (credits included; callers apply
//! the context rule afterwards). Expansion never recurses: everything it
//! embeds is a reference or a card, both of which hold raw ids.
//!
//! Dangling references are handled per slot. A missing owning channel or
//! container makes the whole projection unresolvable, which surfaces as
//! `NotFound`; a missing entry in a list (credit member, staff member,
//! collection episode) just drops that slot.

use tracing::warn;
use videx_contracts::content_like::HasCredits;
use videx_model::{Channel, ChannelID, Playlist, Show, User, UserID, Video, VideoID};

use crate::browse::forms::{
    BrowsableChannel, BrowsableCredits, BrowsablePlaylist, BrowsableSeason, BrowsableShow,
    BrowsableUser, BrowsableVideo, ChannelReference, PlaylistReference, ShowReference, UserReference,
    VideoCard,
};
use crate::error::{Error, Result};
use crate::store::{AccountStore, ContentStore};

/// Expands stored entities into browsable forms.
pub struct Expander<'a> {
    accounts: &'a dyn AccountStore,
    content: &'a dyn ContentStore,
}

impl<'a> Expander<'a> {
    /// An expander reading through the given stores.
    pub fn new(accounts: &'a dyn AccountStore, content: &'a dyn ContentStore) -> Self {
        Expander { accounts, content }
    }

    async fn channel_ref(&self, id: ChannelID) -> Result<Option<ChannelReference>> {
        Ok(self
            .accounts
            .channel(&id)
            .await?
            .map(|channel| ChannelReference::from(&channel)))
    }

    async fn required_channel(&self, id: ChannelID) -> Result<ChannelReference> {
        self.channel_ref(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("channel {id}")))
    }

    async fn user_ref(&self, id: UserID) -> Result<Option<UserReference>> {
        Ok(self
            .accounts
            .user(&id)
            .await?
            .map(|user| UserReference::from(&user)))
    }

    async fn video_card(&self, id: VideoID) -> Result<Option<VideoCard>> {
        Ok(self
            .content
            .video(&id)
            .await?
            .map(|video| VideoCard::from(&video)))
    }

    async fn user_refs(&self, ids: &[UserID]) -> Result<Vec<UserReference>> {
        let mut refs = Vec::with_capacity(ids.len());
        for id in ids {
            match self.user_ref(*id).await? {
                Some(reference) => refs.push(reference),
                None => warn!(user = %id, "dropping dangling user reference"),
            }
        }
        Ok(refs)
    }

    async fn channel_refs(&self, ids: &[ChannelID]) -> Result<Vec<ChannelReference>> {
        let mut refs = Vec::with_capacity(ids.len());
        for id in ids {
            match self.channel_ref(*id).await? {
                Some(reference) => refs.push(reference),
                None => warn!(channel = %id, "dropping dangling channel reference"),
            }
        }
        Ok(refs)
    }

    async fn video_cards(&self, ids: &[VideoID]) -> Result<Vec<VideoCard>> {
        let mut cards = Vec::with_capacity(ids.len());
        for id in ids {
            match self.video_card(*id).await? {
                Some(card) => cards.push(card),
                None => warn!(video = %id, "dropping dangling video reference"),
            }
        }
        Ok(cards)
    }

    async fn credits(&self, entity: &impl HasCredits) -> Result<BrowsableCredits> {
        let credits = entity.credits();
        Ok(BrowsableCredits {
            collaborators: self.user_refs(&credits.collaborators).await?,
            contributors: self.user_refs(&credits.contributors).await?,
            sponsors: self.channel_refs(&credits.sponsors).await?,
        })
    }

    /// Expands a video into its complete browsable form.
    pub async fn video(&self, video: &Video) -> Result<BrowsableVideo> {
        let channel = self.required_channel(video.channel()).await?;
        let credits = Some(self.credits(video).await?);

        let mut form = BrowsableVideo {
            id: video.id(),
            title: video.title().to_string(),
            description: String::new(),
            views: video.views(),
            promotions: None,
            channel,
            credits,
            thumbnail: video.thumbnail().cloned(),
            media: video.media().clone(),
            tags: None,
            explicit: false,
            unlisted: video.unlisted(),
            created_at: video.created_at(),
            release_date: video.release_date(),
            playlist: None,
            categories: None,
            show: None,
            sequence: None,
        };

        match video {
            Video::Basic(v) => {
                form.description = v.info.description.clone();
                form.promotions = Some(v.info.promotions);
                form.tags = Some(v.info.tags.clone());
                form.explicit = v.info.explicit;
                form.sequence = v.sequence.clone();
            }
            Video::Serial(v) => {
                form.description = v.info.description.clone();
                form.promotions = Some(v.info.promotions);
                form.tags = Some(v.info.tags.clone());
                form.explicit = v.info.explicit;
                form.categories = Some(v.categories.clone());
                let playlist = self
                    .content
                    .playlist(&v.playlist)
                    .await?
                    .ok_or_else(|| Error::NotFound(format!("playlist {}", v.playlist)))?;
                form.playlist = Some(PlaylistReference::from(&playlist));
            }
            Video::Episodic(v) => {
                form.description = v.info.description.clone();
                form.explicit = v.info.explicit;
                let show = self
                    .content
                    .show(&v.show)
                    .await?
                    .ok_or_else(|| Error::NotFound(format!("show {}", v.show)))?;
                form.show = Some(ShowReference::from(&show));
            }
        }

        Ok(form)
    }

    /// Expands a show into its complete browsable form, episodes reduced to
    /// cards in their stored order.
    pub async fn show(&self, show: &Show) -> Result<BrowsableShow> {
        let info = show.info();
        let channel = self.required_channel(info.channel).await?;
        let credits = Some(self.credits(show).await?);

        let (seasons, episodes) = match show {
            Show::Seasoned(s) => {
                let mut seasons = Vec::with_capacity(s.seasons.len());
                for season in &s.seasons {
                    seasons.push(BrowsableSeason {
                        title: season.title.clone(),
                        episodes: self.video_cards(&season.episodes).await?,
                    });
                }
                (Some(seasons), None)
            }
            Show::Episodic(s) => (None, Some(self.video_cards(&s.episodes).await?)),
        };

        Ok(BrowsableShow {
            id: show.id(),
            title: info.title.clone(),
            description: info.description.clone(),
            views: info.views,
            promotions: info.promotions,
            channel,
            credits,
            thumbnail: info.thumbnail.clone(),
            tags: info.tags.clone(),
            explicit: info.explicit,
            unlisted: info.unlisted,
            created_at: info.created_at,
            seasons,
            episodes,
        })
    }

    /// Expands a playlist into its complete browsable form.
    pub async fn playlist(&self, playlist: &Playlist) -> Result<BrowsablePlaylist> {
        let channel = self.required_channel(playlist.info.channel).await?;
        let credits = Some(self.credits(playlist).await?);

        Ok(BrowsablePlaylist {
            id: playlist.id,
            title: playlist.info.title.clone(),
            description: playlist.info.description.clone(),
            views: playlist.info.views,
            channel,
            credits,
            thumbnail: playlist.info.thumbnail.clone(),
            tags: playlist.info.tags.clone(),
            explicit: playlist.info.explicit,
            unlisted: playlist.info.unlisted,
            created_at: playlist.info.created_at,
            videos: self.video_cards(&playlist.videos).await?,
        })
    }

    /// Expands a channel into its complete browsable form: public face plus
    /// staff lists as user references.
    pub async fn channel(&self, channel: &Channel) -> Result<BrowsableChannel> {
        Ok(BrowsableChannel {
            id: channel.id,
            handle: channel.public.handle.clone(),
            display_name: channel.public.display_name.clone(),
            avatar: channel.public.avatar.clone(),
            verified: channel.public.verified,
            trusted: channel.public.trusted,
            banned: channel.public.banned,
            created_at: channel.created_at,
            owners: self.user_refs(&channel.owners).await?,
            collaborators: self.user_refs(&channel.collaborators).await?,
            contributors: self.user_refs(&channel.contributors).await?,
            admins: self.user_refs(&channel.admins).await?,
            moderators: self.user_refs(&channel.moderators).await?,
        })
    }

    /// Expands a user into its complete browsable form: public face plus
    /// memberships as channel references.
    pub async fn user(&self, user: &User) -> Result<BrowsableUser> {
        Ok(BrowsableUser {
            id: user.id,
            handle: user.public.handle.clone(),
            display_name: user.public.display_name.clone(),
            avatar: user.public.avatar.clone(),
            verified: user.public.verified,
            trusted: user.public.trusted,
            banned: user.public.banned,
            created_at: user.created_at,
            channels: self.channel_refs(&user.channels).await?,
            collaborations: self.channel_refs(&user.collaborations).await?,
            contributions: self.channel_refs(&user.contributions).await?,
            administering: self.channel_refs(&user.administering).await?,
            moderating: self.channel_refs(&user.moderating).await?,
        })
    }
}
