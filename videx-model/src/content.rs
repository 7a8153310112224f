use chrono::{DateTime, Utc};

use crate::ids::{ChannelID, UserID, VideoID};
use crate::media::MediaHandle;

/// Credit lists naming the accounts behind a piece of content.
///
/// Credits are only surfaced on direct fetches of the owning entity; listing
/// and nested projections strip them entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credits {
    pub collaborators: Vec<UserID>,
    pub contributors: Vec<UserID>,
    pub sponsors: Vec<ChannelID>,
}

impl Credits {
    pub fn is_empty(&self) -> bool {
        self.collaborators.is_empty() && self.contributors.is_empty() && self.sponsors.is_empty()
    }
}

/// Detail block shared by standalone videos, shows, and playlists.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentInfo {
    pub title: String,
    pub description: String,
    pub views: u64,
    pub promotions: u64,
    pub channel: ChannelID,
    pub credits: Credits,
    pub thumbnail: Option<MediaHandle>,
    pub tags: Vec<String>,
    pub explicit: bool,
    pub unlisted: bool,
    pub created_at: DateTime<Utc>,
}

/// Detail block for episodic videos: no tags, not independently promotable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeInfo {
    pub title: String,
    pub description: String,
    pub views: u64,
    pub channel: ChannelID,
    pub credits: Credits,
    pub thumbnail: Option<MediaHandle>,
    pub explicit: bool,
    pub unlisted: bool,
    pub created_at: DateTime<Utc>,
}

/// Optional hand-authored ordering links between basic videos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceLinks {
    pub next: Option<VideoID>,
    pub previous: Option<VideoID>,
}
