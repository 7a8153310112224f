use crate::error::ModelError;
use uuid::Uuid;

/// Strongly typed ID for user accounts
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserID(pub Uuid);

impl Default for UserID {
    fn default() -> Self {
        Self::new()
    }
}

impl UserID {
    pub fn new() -> Self {
        UserID(Uuid::now_v7())
    }

    pub fn from_string(id: &str) -> Result<Self, ModelError> {
        id.parse()
            .map(UserID)
            .map_err(|_| ModelError::InvalidIdentifier(format!("not a user id: {id}")))
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for UserID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for channels
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelID(pub Uuid);

impl Default for ChannelID {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelID {
    pub fn new() -> Self {
        ChannelID(Uuid::now_v7())
    }

    pub fn from_string(id: &str) -> Result<Self, ModelError> {
        id.parse()
            .map(ChannelID)
            .map_err(|_| ModelError::InvalidIdentifier(format!("not a channel id: {id}")))
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for ChannelID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ChannelID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for videos
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoID(pub Uuid);

impl Default for VideoID {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoID {
    pub fn new() -> Self {
        VideoID(Uuid::now_v7())
    }

    pub fn from_string(id: &str) -> Result<Self, ModelError> {
        id.parse()
            .map(VideoID)
            .map_err(|_| ModelError::InvalidIdentifier(format!("not a video id: {id}")))
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for VideoID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for VideoID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for shows
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowID(pub Uuid);

impl Default for ShowID {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowID {
    pub fn new() -> Self {
        ShowID(Uuid::now_v7())
    }

    pub fn from_string(id: &str) -> Result<Self, ModelError> {
        id.parse()
            .map(ShowID)
            .map_err(|_| ModelError::InvalidIdentifier(format!("not a show id: {id}")))
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for ShowID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ShowID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for playlists
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaylistID(pub Uuid);

impl Default for PlaylistID {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistID {
    pub fn new() -> Self {
        PlaylistID(Uuid::now_v7())
    }

    pub fn from_string(id: &str) -> Result<Self, ModelError> {
        id.parse()
            .map(PlaylistID)
            .map_err(|_| ModelError::InvalidIdentifier(format!("not a playlist id: {id}")))
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for PlaylistID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for PlaylistID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position of an entity in listing order.
///
/// Identifiers are allocated time-ordered (UUIDv7), so the identifier value
/// doubles as the listing sort key. [`ListingOrder::BEGINNING`] is the nil
/// UUID: it sorts below every allocated identifier and never names a real
/// entity, which makes it the natural "start of the collection" cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListingOrder(pub Uuid);

impl ListingOrder {
    pub const BEGINNING: ListingOrder = ListingOrder(Uuid::nil());

    pub fn is_beginning(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ListingOrder {
    fn default() -> Self {
        Self::BEGINNING
    }
}

impl From<Uuid> for ListingOrder {
    fn from(id: Uuid) -> Self {
        ListingOrder(id)
    }
}

impl From<VideoID> for ListingOrder {
    fn from(id: VideoID) -> Self {
        ListingOrder(id.0)
    }
}

impl From<ShowID> for ListingOrder {
    fn from(id: ShowID) -> Self {
        ListingOrder(id.0)
    }
}

impl From<PlaylistID> for ListingOrder {
    fn from(id: PlaylistID) -> Self {
        ListingOrder(id.0)
    }
}

impl From<ChannelID> for ListingOrder {
    fn from(id: ChannelID) -> Self {
        ListingOrder(id.0)
    }
}

impl From<UserID> for ListingOrder {
    fn from(id: UserID) -> Self {
        ListingOrder(id.0)
    }
}

impl std::fmt::Display for ListingOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
