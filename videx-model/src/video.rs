use chrono::{DateTime, Utc};

use crate::content::{ContentInfo, Credits, EpisodeInfo, SequenceLinks};
use crate::error::ModelError;
use crate::ids::{ChannelID, PlaylistID, ShowID, VideoID};
use crate::media::MediaHandle;

/// Standalone video, optionally hand-linked into a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicVideo {
    pub id: VideoID,
    pub info: ContentInfo,
    pub media: MediaHandle,
    pub release_date: DateTime<Utc>,
    pub sequence: Option<SequenceLinks>,
}

/// Video that belongs to exactly one playlist.
///
/// `categories` mirrors the owning playlist's tags; playlist writes keep the
/// copy in sync.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialVideo {
    pub id: VideoID,
    pub info: ContentInfo,
    pub media: MediaHandle,
    pub release_date: DateTime<Utc>,
    pub playlist: PlaylistID,
    pub categories: Vec<String>,
}

/// Video that belongs to exactly one show.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeVideo {
    pub id: VideoID,
    pub info: EpisodeInfo,
    pub media: MediaHandle,
    pub release_date: DateTime<Utc>,
    pub show: ShowID,
}

/// A video in exactly one of its three shapes.
///
/// Membership is part of the variant, never a probed optional field: a video
/// is basic, or in one playlist, or in one show.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Video {
    Basic(BasicVideo),
    Serial(SerialVideo),
    Episodic(EpisodeVideo),
}

impl Video {
    pub fn id(&self) -> VideoID {
        match self {
            Video::Basic(v) => v.id,
            Video::Serial(v) => v.id,
            Video::Episodic(v) => v.id,
        }
    }

    pub fn channel(&self) -> ChannelID {
        match self {
            Video::Basic(v) => v.info.channel,
            Video::Serial(v) => v.info.channel,
            Video::Episodic(v) => v.info.channel,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Video::Basic(v) => &v.info.title,
            Video::Serial(v) => &v.info.title,
            Video::Episodic(v) => &v.info.title,
        }
    }

    pub fn media(&self) -> &MediaHandle {
        match self {
            Video::Basic(v) => &v.media,
            Video::Serial(v) => &v.media,
            Video::Episodic(v) => &v.media,
        }
    }

    pub fn thumbnail(&self) -> Option<&MediaHandle> {
        match self {
            Video::Basic(v) => v.info.thumbnail.as_ref(),
            Video::Serial(v) => v.info.thumbnail.as_ref(),
            Video::Episodic(v) => v.info.thumbnail.as_ref(),
        }
    }

    pub fn release_date(&self) -> DateTime<Utc> {
        match self {
            Video::Basic(v) => v.release_date,
            Video::Serial(v) => v.release_date,
            Video::Episodic(v) => v.release_date,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Video::Basic(v) => v.info.created_at,
            Video::Serial(v) => v.info.created_at,
            Video::Episodic(v) => v.info.created_at,
        }
    }

    pub fn views(&self) -> u64 {
        match self {
            Video::Basic(v) => v.info.views,
            Video::Serial(v) => v.info.views,
            Video::Episodic(v) => v.info.views,
        }
    }

    pub fn credits(&self) -> &Credits {
        match self {
            Video::Basic(v) => &v.info.credits,
            Video::Serial(v) => &v.info.credits,
            Video::Episodic(v) => &v.info.credits,
        }
    }

    pub fn unlisted(&self) -> bool {
        match self {
            Video::Basic(v) => v.info.unlisted,
            Video::Serial(v) => v.info.unlisted,
            Video::Episodic(v) => v.info.unlisted,
        }
    }

    pub fn is_episodic(&self) -> bool {
        matches!(self, Video::Episodic(_))
    }

    /// Episodes are surfaced through their show only, never promoted on
    /// their own.
    pub fn is_promotable(&self) -> bool {
        !self.is_episodic()
    }

    pub fn record_view(&mut self) {
        match self {
            Video::Basic(v) => v.info.views += 1,
            Video::Serial(v) => v.info.views += 1,
            Video::Episodic(v) => v.info.views += 1,
        }
    }

    /// Count a promotion. Returns false when the variant is not promotable.
    pub fn promote(&mut self) -> bool {
        match self {
            Video::Basic(v) => {
                v.info.promotions += 1;
                true
            }
            Video::Serial(v) => {
                v.info.promotions += 1;
                true
            }
            Video::Episodic(_) => false,
        }
    }
}

/// Unclassified video submission as it arrives at the write boundary.
///
/// `playlist` and `show` presence picks the variant; naming both is a client
/// error, never coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoDraft {
    pub title: String,
    pub description: String,
    pub channel: ChannelID,
    pub media: MediaHandle,
    pub thumbnail: Option<MediaHandle>,
    pub tags: Vec<String>,
    pub explicit: bool,
    pub unlisted: bool,
    pub release_date: Option<DateTime<Utc>>,
    pub playlist: Option<PlaylistID>,
    pub show: Option<ShowID>,
    pub season: Option<u32>,
    pub sequence: Option<SequenceLinks>,
}

impl VideoDraft {
    /// Classify the draft into its video variant.
    ///
    /// A missing `release_date` means "visible immediately" and defaults to
    /// `created_at`. Serial `categories` start empty; the caller copies the
    /// owning playlist's tags in once it has resolved the playlist.
    pub fn classify(
        self,
        id: VideoID,
        created_at: DateTime<Utc>,
    ) -> Result<Video, ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::InvalidContent(
                "video title cannot be empty".to_string(),
            ));
        }

        let release_date = self.release_date.unwrap_or(created_at);

        match (self.playlist, self.show) {
            (Some(_), Some(_)) => Err(ModelError::AmbiguousVariant(
                "video names both a playlist and a show".to_string(),
            )),
            (Some(playlist), None) => {
                if self.season.is_some() {
                    return Err(ModelError::InvalidContent(
                        "season index requires a show".to_string(),
                    ));
                }
                if self.sequence.is_some() {
                    return Err(ModelError::InvalidContent(
                        "sequence links are only valid on standalone videos".to_string(),
                    ));
                }
                Ok(Video::Serial(SerialVideo {
                    id,
                    info: self.content_info(created_at),
                    media: self.media,
                    release_date,
                    playlist,
                    categories: Vec::new(),
                }))
            }
            (None, Some(show)) => {
                if !self.tags.is_empty() {
                    return Err(ModelError::InvalidContent(
                        "episodes cannot carry tags".to_string(),
                    ));
                }
                if self.sequence.is_some() {
                    return Err(ModelError::InvalidContent(
                        "sequence links are only valid on standalone videos".to_string(),
                    ));
                }
                Ok(Video::Episodic(EpisodeVideo {
                    id,
                    info: EpisodeInfo {
                        title: self.title,
                        description: self.description,
                        views: 0,
                        channel: self.channel,
                        credits: Credits::default(),
                        thumbnail: self.thumbnail,
                        explicit: self.explicit,
                        unlisted: self.unlisted,
                        created_at,
                    },
                    media: self.media,
                    release_date,
                    show,
                }))
            }
            (None, None) => {
                if self.season.is_some() {
                    return Err(ModelError::InvalidContent(
                        "season index requires a show".to_string(),
                    ));
                }
                Ok(Video::Basic(BasicVideo {
                    id,
                    info: self.content_info(created_at),
                    media: self.media,
                    release_date,
                    sequence: self.sequence,
                }))
            }
        }
    }

    fn content_info(&self, created_at: DateTime<Utc>) -> ContentInfo {
        ContentInfo {
            title: self.title.clone(),
            description: self.description.clone(),
            views: 0,
            promotions: 0,
            channel: self.channel,
            credits: Credits::default(),
            thumbnail: self.thumbnail.clone(),
            tags: self.tags.clone(),
            explicit: self.explicit,
            unlisted: self.unlisted,
            created_at,
        }
    }
}
