//! Wire-facing request and response shapes.
//!
//! Transports wrap service results in [`ApiResponse`] and deserialize
//! request bodies into the DTOs here. Bodies are strict: unknown fields are
//! rejected rather than ignored, so client typos fail loudly instead of
//! silently dropping data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use videx_model::{
    ChannelID, ChannelRole, ChannelSettings, MediaHandle, PlaylistDraft, PlaylistID, Season,
    SequenceLinks, ShowDraft, ShowID, UserID, UserSettings, VideoDraft, VideoID,
};

use crate::error::{Error, ErrorBody};

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// `"success"` or `"error"`.
    pub status: String,
    /// Payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error body, present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    /// Optional human-readable note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful envelope around `data`.
    pub fn success(data: T) -> Self {
        ApiResponse {
            status: "success".to_string(),
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// A failure envelope carrying the error's wire body.
    pub fn error(err: &Error) -> Self {
        ApiResponse {
            status: "error".to_string(),
            data: None,
            error: Some(err.body()),
            message: None,
        }
    }

    /// Attaches a human-readable note.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Query parameters accepted by every listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingQuery {
    /// Resume position; absent means the beginning.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Requested page size; absent means the configured default.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Body for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub handle: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<MediaHandle>,
}

/// Body for updating a user's own account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<MediaHandle>,
    #[serde(default)]
    pub settings: Option<UserSettings>,
}

/// Body for founding a channel. The acting user becomes sole owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateChannelRequest {
    pub handle: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar: Option<MediaHandle>,
}

/// Body for updating a channel's public face or settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateChannelRequest {
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<MediaHandle>,
    #[serde(default)]
    pub settings: Option<ChannelSettings>,
}

/// Body naming a user and a role, shared by the invite, withdraw, and
/// removal operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleRequest {
    pub user: UserID,
    pub role: ChannelRole,
}

/// Body for uploading a video. Naming `playlist` xor `show` picks the
/// serial or episodic variant; naming neither uploads a standalone video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateVideoRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub channel: ChannelID,
    pub media: MediaHandle,
    #[serde(default)]
    pub thumbnail: Option<MediaHandle>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub explicit: bool,
    /// Absent means "use the channel's `default_unlisted` setting".
    #[serde(default)]
    pub unlisted: Option<bool>,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub playlist: Option<PlaylistID>,
    #[serde(default)]
    pub show: Option<ShowID>,
    #[serde(default)]
    pub season: Option<u32>,
    #[serde(default)]
    pub sequence: Option<SequenceLinks>,
}

impl CreateVideoRequest {
    /// The unclassified draft this body describes. `default_unlisted` is the
    /// owning channel's setting, applied when the body left `unlisted` out.
    pub fn into_draft(self, default_unlisted: bool) -> VideoDraft {
        VideoDraft {
            title: self.title,
            description: self.description,
            channel: self.channel,
            media: self.media,
            thumbnail: self.thumbnail,
            tags: self.tags,
            explicit: self.explicit,
            unlisted: self.unlisted.unwrap_or(default_unlisted),
            release_date: self.release_date,
            playlist: self.playlist,
            show: self.show,
            season: self.season,
            sequence: self.sequence,
        }
    }
}

/// Body for editing video metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateVideoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<MediaHandle>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub explicit: Option<bool>,
    #[serde(default)]
    pub unlisted: Option<bool>,
    #[serde(default)]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sequence: Option<SequenceLinks>,
}

/// Body for creating a show. Exactly one of `seasons` / `episodes` must be
/// present (empty is fine) to pick the structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateShowRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub channel: ChannelID,
    #[serde(default)]
    pub thumbnail: Option<MediaHandle>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub unlisted: bool,
    #[serde(default)]
    pub seasons: Option<Vec<Season>>,
    #[serde(default)]
    pub episodes: Option<Vec<VideoID>>,
}

impl CreateShowRequest {
    /// The unclassified draft this body describes.
    pub fn into_draft(self) -> ShowDraft {
        ShowDraft {
            title: self.title,
            description: self.description,
            channel: self.channel,
            thumbnail: self.thumbnail,
            tags: self.tags,
            explicit: self.explicit,
            unlisted: self.unlisted,
            seasons: self.seasons,
            episodes: self.episodes,
        }
    }
}

/// Body for editing show metadata or regrouping its seasons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateShowRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<MediaHandle>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub explicit: Option<bool>,
    #[serde(default)]
    pub unlisted: Option<bool>,
    /// Regrouped seasons. Must contain exactly the episodes the show
    /// already has, in whatever new arrangement.
    #[serde(default)]
    pub seasons: Option<Vec<Season>>,
}

/// Body for creating a playlist. Membership is managed through the
/// add/remove operations afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePlaylistRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub channel: ChannelID,
    #[serde(default)]
    pub thumbnail: Option<MediaHandle>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub unlisted: bool,
}

impl CreatePlaylistRequest {
    /// The draft this body describes.
    pub fn into_draft(self) -> PlaylistDraft {
        PlaylistDraft {
            title: self.title,
            description: self.description,
            channel: self.channel,
            thumbnail: self.thumbnail,
            tags: self.tags,
            explicit: self.explicit,
            unlisted: self.unlisted,
        }
    }
}

/// Body for editing playlist metadata. Changing `tags` rewrites the
/// category snapshot on every member video.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePlaylistRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<MediaHandle>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub explicit: Option<bool>,
    #[serde(default)]
    pub unlisted: Option<bool>,
}

/// Body naming a video for playlist membership operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaylistVideoRequest {
    pub video: VideoID,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error_keys() {
        let response = ApiResponse::success(7u32);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], 7);
        assert!(json.get("error").is_none());
        assert!(json.get("message").is_none());
    }

    #[test]
    fn error_envelope_carries_the_wire_body() {
        let err = Error::HandleInUse("alice".to_string());
        let response: ApiResponse<()> = ApiResponse::error(&err);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"]["code"], "HANDLE_IN_USE");
        assert_eq!(json["error"]["status"], 400);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = r#"{"handle": "alice", "display_name": "Alice",
                      "email": "a@example.com", "admin": true}"#;
        assert!(serde_json::from_str::<CreateUserRequest>(raw).is_err());
    }

    #[test]
    fn optional_body_fields_default() {
        let raw = r#"{"handle": "alice", "display_name": "Alice",
                      "email": "a@example.com"}"#;
        let body: CreateUserRequest = serde_json::from_str(raw).unwrap();
        assert!(body.avatar.is_none());
    }

    #[test]
    fn listing_query_defaults_to_the_beginning() {
        let query: ListingQuery = serde_json::from_str("{}").unwrap();
        assert!(query.cursor.is_none());
        assert!(query.limit.is_none());
    }
}
