use crate::error::ModelError;
use crate::handle::Handle;
use crate::ids::{ChannelID, PlaylistID, ShowID, UserID, VideoID};
use uuid::Uuid;

/// Simple enum for content entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ContentKind {
    Video,
    Show,
    Playlist,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Video => write!(f, "Video"),
            ContentKind::Show => write!(f, "Show"),
            ContentKind::Playlist => write!(f, "Playlist"),
        }
    }
}

/// Identifier for any content entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentID {
    Video(VideoID),
    Show(ShowID),
    Playlist(PlaylistID),
}

impl ContentID {
    pub fn as_uuid(&self) -> &Uuid {
        match self {
            ContentID::Video(id) => id.as_uuid(),
            ContentID::Show(id) => id.as_uuid(),
            ContentID::Playlist(id) => id.as_uuid(),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentID::Video(_) => ContentKind::Video,
            ContentID::Show(_) => ContentKind::Show,
            ContentID::Playlist(_) => ContentKind::Playlist,
        }
    }
}

impl std::fmt::Display for ContentID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentID::Video(id) => write!(f, "Video({})", id.as_str()),
            ContentID::Show(id) => write!(f, "Show({})", id.as_str()),
            ContentID::Playlist(id) => write!(f, "Playlist({})", id.as_str()),
        }
    }
}

impl From<VideoID> for ContentID {
    fn from(id: VideoID) -> Self {
        ContentID::Video(id)
    }
}

impl From<ShowID> for ContentID {
    fn from(id: ShowID) -> Self {
        ContentID::Show(id)
    }
}

impl From<PlaylistID> for ContentID {
    fn from(id: PlaylistID) -> Self {
        ContentID::Playlist(id)
    }
}

/// Identifier for any account entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccountID {
    User(UserID),
    Channel(ChannelID),
}

impl AccountID {
    pub fn as_uuid(&self) -> &Uuid {
        match self {
            AccountID::User(id) => id.as_uuid(),
            AccountID::Channel(id) => id.as_uuid(),
        }
    }
}

impl std::fmt::Display for AccountID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountID::User(id) => write!(f, "User({})", id.as_str()),
            AccountID::Channel(id) => write!(f, "Channel({})", id.as_str()),
        }
    }
}

impl From<UserID> for AccountID {
    fn from(id: UserID) -> Self {
        AccountID::User(id)
    }
}

impl From<ChannelID> for AccountID {
    fn from(id: ChannelID) -> Self {
        AccountID::Channel(id)
    }
}

/// Account fetch selector: a raw path segment is an identifier when it parses
/// as a UUID and a handle otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IdOrHandle {
    Id(Uuid),
    Handle(Handle),
}

impl IdOrHandle {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if let Ok(id) = Uuid::parse_str(raw) {
            return Ok(IdOrHandle::Id(id));
        }
        Handle::new(raw).map(IdOrHandle::Handle)
    }
}

impl std::fmt::Display for IdOrHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdOrHandle::Id(id) => write!(f, "{id}"),
            IdOrHandle::Handle(handle) => write!(f, "{handle}"),
        }
    }
}
