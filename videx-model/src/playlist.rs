use chrono::{DateTime, Utc};

use crate::content::{ContentInfo, Credits};
use crate::error::ModelError;
use crate::ids::{ChannelID, PlaylistID, VideoID};
use crate::media::MediaHandle;

/// Unordered collection of basic/serial videos.
///
/// Membership is mirrored on the video side: a listed video becomes serial
/// and names this playlist. Episodes never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Playlist {
    pub id: PlaylistID,
    pub info: ContentInfo,
    pub videos: Vec<VideoID>,
}

impl Playlist {
    pub fn contains(&self, video: &VideoID) -> bool {
        self.videos.contains(video)
    }

    /// Add a video id. Returns false when it was already a member.
    pub fn add_video(&mut self, video: VideoID) -> bool {
        if self.contains(&video) {
            return false;
        }
        self.videos.push(video);
        true
    }

    /// Remove a video id. Returns false when it was not a member.
    pub fn remove_video(&mut self, video: &VideoID) -> bool {
        let before = self.videos.len();
        self.videos.retain(|v| v != video);
        self.videos.len() != before
    }
}

/// Playlist submission as it arrives at the write boundary. Membership is
/// managed through the add/remove operations, so drafts start empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaylistDraft {
    pub title: String,
    pub description: String,
    pub channel: ChannelID,
    pub thumbnail: Option<MediaHandle>,
    pub tags: Vec<String>,
    pub explicit: bool,
    pub unlisted: bool,
}

impl PlaylistDraft {
    pub fn build(self, id: PlaylistID, created_at: DateTime<Utc>) -> Result<Playlist, ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::InvalidContent(
                "playlist title cannot be empty".to_string(),
            ));
        }

        Ok(Playlist {
            id,
            info: ContentInfo {
                title: self.title,
                description: self.description,
                views: 0,
                promotions: 0,
                channel: self.channel,
                credits: Credits::default(),
                thumbnail: self.thumbnail,
                tags: self.tags,
                explicit: self.explicit,
                unlisted: self.unlisted,
                created_at,
            },
            videos: Vec::new(),
        })
    }
}
