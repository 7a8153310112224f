//! Browsable output shapes.
//!
//! A browsable form is a projection of a stored entity with its references
//! expanded exactly one level: owning channels become channel references,
//! credit lists become account references, collection members become video
//! cards. Nothing inside an expanded reference is expanded further, so the
//! graph's cycles (channel -> video -> channel) can never recurse.
//!
//! Context controls one thing: credits. They are carried on top-level
//! fetches and stripped entirely from nested (listing) projections, where
//! the serializer omits the key rather than writing `null`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use videx_model::{
    Channel, ChannelID, Handle, MediaHandle, Playlist, PlaylistID, SequenceLinks, Show, ShowID,
    User, UserID, Video, VideoID,
};

/// Where a projection will be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseContext {
    /// Direct fetch of the entity itself.
    TopLevel,
    /// Inside a listing or another entity's expansion.
    Nested,
}

/// Public face of a channel as seen inside other entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelReference {
    pub id: ChannelID,
    pub handle: Handle,
    pub display_name: String,
    pub avatar: Option<MediaHandle>,
    pub verified: bool,
    pub trusted: bool,
    pub banned: bool,
}

impl From<&Channel> for ChannelReference {
    fn from(channel: &Channel) -> Self {
        ChannelReference {
            id: channel.id,
            handle: channel.public.handle.clone(),
            display_name: channel.public.display_name.clone(),
            avatar: channel.public.avatar.clone(),
            verified: channel.public.verified,
            trusted: channel.public.trusted,
            banned: channel.public.banned,
        }
    }
}

/// Public face of a user as seen inside other entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReference {
    pub id: UserID,
    pub handle: Handle,
    pub display_name: String,
    pub avatar: Option<MediaHandle>,
    pub verified: bool,
    pub trusted: bool,
    pub banned: bool,
}

impl From<&User> for UserReference {
    fn from(user: &User) -> Self {
        UserReference {
            id: user.id,
            handle: user.public.handle.clone(),
            display_name: user.public.display_name.clone(),
            avatar: user.public.avatar.clone(),
            verified: user.public.verified,
            trusted: user.public.trusted,
            banned: user.public.banned,
        }
    }
}

/// Thin pointer to a playlist, embedded in its member videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistReference {
    pub id: PlaylistID,
    pub title: String,
    pub thumbnail: Option<MediaHandle>,
    pub channel: ChannelID,
}

impl From<&Playlist> for PlaylistReference {
    fn from(playlist: &Playlist) -> Self {
        PlaylistReference {
            id: playlist.id,
            title: playlist.info.title.clone(),
            thumbnail: playlist.info.thumbnail.clone(),
            channel: playlist.info.channel,
        }
    }
}

/// Thin pointer to a show, embedded in its episodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowReference {
    pub id: ShowID,
    pub title: String,
    pub thumbnail: Option<MediaHandle>,
    pub channel: ChannelID,
}

impl From<&Show> for ShowReference {
    fn from(show: &Show) -> Self {
        ShowReference {
            id: show.id(),
            title: show.info().title.clone(),
            thumbnail: show.info().thumbnail.clone(),
            channel: show.channel(),
        }
    }
}

/// Reduced video shape embedded inside collections. References stay raw
/// ids here; cards sit one level below the expansion boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCard {
    pub id: VideoID,
    pub title: String,
    pub description: String,
    pub views: u64,
    pub channel: ChannelID,
    pub thumbnail: Option<MediaHandle>,
    pub media: MediaHandle,
    pub release_date: DateTime<Utc>,
    pub explicit: bool,
}

impl From<&Video> for VideoCard {
    fn from(video: &Video) -> Self {
        let explicit = match video {
            Video::Basic(v) => v.info.explicit,
            Video::Serial(v) => v.info.explicit,
            Video::Episodic(v) => v.info.explicit,
        };
        let description = match video {
            Video::Basic(v) => v.info.description.clone(),
            Video::Serial(v) => v.info.description.clone(),
            Video::Episodic(v) => v.info.description.clone(),
        };
        VideoCard {
            id: video.id(),
            title: video.title().to_string(),
            description,
            views: video.views(),
            channel: video.channel(),
            thumbnail: video.thumbnail().cloned(),
            media: video.media().clone(),
            release_date: video.release_date(),
            explicit,
        }
    }
}

/// Credit lists with their members expanded to references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsableCredits {
    pub collaborators: Vec<UserReference>,
    pub contributors: Vec<UserReference>,
    pub sponsors: Vec<ChannelReference>,
}

/// Fully expanded video projection.
///
/// Variant-dependent fields are optional and omitted from the wire when
/// absent: a basic video carries `tags` and maybe `sequence`, a serial
/// video carries `playlist` and `categories`, an episode carries `show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsableVideo {
    pub id: VideoID,
    pub title: String,
    pub description: String,
    pub views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotions: Option<u64>,
    pub channel: ChannelReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<BrowsableCredits>,
    pub thumbnail: Option<MediaHandle>,
    pub media: MediaHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub explicit: bool,
    pub unlisted: bool,
    pub created_at: DateTime<Utc>,
    pub release_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist: Option<PlaylistReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<ShowReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<SequenceLinks>,
}

impl BrowsableVideo {
    /// Applies the context rule: nested projections carry no credits.
    pub fn project(mut self, context: BrowseContext) -> Self {
        if context == BrowseContext::Nested {
            self.credits = None;
        }
        self
    }
}

/// One season of a seasoned show, episodes reduced to cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsableSeason {
    pub title: Option<String>,
    pub episodes: Vec<VideoCard>,
}

/// Fully expanded show projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsableShow {
    pub id: ShowID,
    pub title: String,
    pub description: String,
    pub views: u64,
    pub promotions: u64,
    pub channel: ChannelReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<BrowsableCredits>,
    pub thumbnail: Option<MediaHandle>,
    pub tags: Vec<String>,
    pub explicit: bool,
    pub unlisted: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<BrowsableSeason>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<Vec<VideoCard>>,
}

impl BrowsableShow {
    /// Applies the context rule: nested projections carry no credits.
    pub fn project(mut self, context: BrowseContext) -> Self {
        if context == BrowseContext::Nested {
            self.credits = None;
        }
        self
    }
}

/// Fully expanded playlist projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsablePlaylist {
    pub id: PlaylistID,
    pub title: String,
    pub description: String,
    pub views: u64,
    pub channel: ChannelReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<BrowsableCredits>,
    pub thumbnail: Option<MediaHandle>,
    pub tags: Vec<String>,
    pub explicit: bool,
    pub unlisted: bool,
    pub created_at: DateTime<Utc>,
    pub videos: Vec<VideoCard>,
}

impl BrowsablePlaylist {
    /// Applies the context rule: nested projections carry no credits.
    pub fn project(mut self, context: BrowseContext) -> Self {
        if context == BrowseContext::Nested {
            self.credits = None;
        }
        self
    }
}

/// Fully expanded channel projection: public face plus staff lists.
///
/// Private channel state (settings, pending invites) never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsableChannel {
    pub id: ChannelID,
    pub handle: Handle,
    pub display_name: String,
    pub avatar: Option<MediaHandle>,
    pub verified: bool,
    pub trusted: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub owners: Vec<UserReference>,
    pub collaborators: Vec<UserReference>,
    pub contributors: Vec<UserReference>,
    pub admins: Vec<UserReference>,
    pub moderators: Vec<UserReference>,
}

/// Fully expanded user projection: public face plus channel memberships.
///
/// Private user state (email, settings, pending invites) never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowsableUser {
    pub id: UserID,
    pub handle: Handle,
    pub display_name: String,
    pub avatar: Option<MediaHandle>,
    pub verified: bool,
    pub trusted: bool,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
    pub channels: Vec<ChannelReference>,
    pub collaborations: Vec<ChannelReference>,
    pub contributions: Vec<ChannelReference>,
    pub administering: Vec<ChannelReference>,
    pub moderating: Vec<ChannelReference>,
}

/// Account fetched by id or handle: the two kinds share one namespace, so
/// one fetch can surface either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BrowsableAccount {
    User(BrowsableUser),
    Channel(BrowsableChannel),
}
