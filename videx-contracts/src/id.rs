use uuid::Uuid;

use videx_model::content_id::{AccountID, ContentID, ContentKind};
use videx_model::ids::{ListingOrder, PlaylistID, ShowID, VideoID};

const UUID_STR_LEN: usize = 36;

fn uuid_to_str(uuid: Uuid, buffer: &mut [u8; 45]) -> &str {
    let encoded: &mut str =
        uuid.hyphenated().encode_lower(&mut buffer[..UUID_STR_LEN]);
    encoded
}

/// Uniform access to typed content identifiers.
pub trait ContentIdLike {
    type ContentId: ContentIdLike;

    fn as_ref(&self) -> &Self;
    fn to_content_id(self) -> Self::ContentId;

    fn as_str<'a>(&self, buffer: &'a mut [u8; 45]) -> &'a str;
    fn to_string_buf(&self, buffer: &mut [u8; 45]) -> String {
        String::from(self.as_str(buffer))
    }

    fn as_uuid(&self) -> &Uuid;
    fn to_uuid(self) -> Uuid;

    fn sub_eq(&self, other: &impl ContentIdLike) -> bool;

    /// Listing sort key: the UUIDv7 identifier value itself.
    fn order(&self) -> ListingOrder {
        ListingOrder(*self.as_uuid())
    }

    fn kind(&self) -> ContentKind;
}

impl ContentIdLike for ContentID {
    type ContentId = ContentID;

    fn as_ref(&self) -> &Self {
        self
    }

    fn to_content_id(self) -> Self::ContentId {
        self
    }

    fn as_str<'a>(&self, buffer: &'a mut [u8; 45]) -> &'a str {
        match &self {
            ContentID::Video(video_id) => uuid_to_str(video_id.to_uuid(), buffer),
            ContentID::Show(show_id) => uuid_to_str(show_id.to_uuid(), buffer),
            ContentID::Playlist(playlist_id) => {
                uuid_to_str(playlist_id.to_uuid(), buffer)
            }
        }
    }

    fn as_uuid(&self) -> &Uuid {
        match &self {
            ContentID::Video(video_id) => video_id.as_uuid(),
            ContentID::Show(show_id) => show_id.as_uuid(),
            ContentID::Playlist(playlist_id) => playlist_id.as_uuid(),
        }
    }

    fn to_uuid(self) -> Uuid {
        match self {
            ContentID::Video(video_id) => video_id.to_uuid(),
            ContentID::Show(show_id) => show_id.to_uuid(),
            ContentID::Playlist(playlist_id) => playlist_id.to_uuid(),
        }
    }

    fn sub_eq(&self, other: &impl ContentIdLike) -> bool {
        self.as_uuid() == other.as_uuid()
    }

    fn kind(&self) -> ContentKind {
        match &self {
            ContentID::Video(_) => ContentKind::Video,
            ContentID::Show(_) => ContentKind::Show,
            ContentID::Playlist(_) => ContentKind::Playlist,
        }
    }
}

impl ContentIdLike for VideoID {
    type ContentId = ContentID;

    fn as_ref(&self) -> &Self {
        self
    }

    fn to_content_id(self) -> Self::ContentId {
        ContentID::Video(self)
    }

    fn as_str<'a>(&self, buffer: &'a mut [u8; 45]) -> &'a str {
        uuid_to_str(self.to_uuid(), buffer)
    }

    fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    fn to_uuid(self) -> Uuid {
        self.0
    }

    fn sub_eq(&self, other: &impl ContentIdLike) -> bool {
        self.as_uuid() == other.as_uuid()
    }

    fn kind(&self) -> ContentKind {
        ContentKind::Video
    }
}

impl ContentIdLike for ShowID {
    type ContentId = ContentID;

    fn as_ref(&self) -> &Self {
        self
    }

    fn to_content_id(self) -> Self::ContentId {
        ContentID::Show(self)
    }

    fn as_str<'a>(&self, buffer: &'a mut [u8; 45]) -> &'a str {
        uuid_to_str(self.to_uuid(), buffer)
    }

    fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    fn to_uuid(self) -> Uuid {
        self.0
    }

    fn sub_eq(&self, other: &impl ContentIdLike) -> bool {
        self.as_uuid() == other.as_uuid()
    }

    fn kind(&self) -> ContentKind {
        ContentKind::Show
    }
}

impl ContentIdLike for PlaylistID {
    type ContentId = ContentID;

    fn as_ref(&self) -> &Self {
        self
    }

    fn to_content_id(self) -> Self::ContentId {
        ContentID::Playlist(self)
    }

    fn as_str<'a>(&self, buffer: &'a mut [u8; 45]) -> &'a str {
        uuid_to_str(self.to_uuid(), buffer)
    }

    fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    fn to_uuid(self) -> Uuid {
        self.0
    }

    fn sub_eq(&self, other: &impl ContentIdLike) -> bool {
        self.as_uuid() == other.as_uuid()
    }

    fn kind(&self) -> ContentKind {
        ContentKind::Playlist
    }
}

/// Uniform access to typed account identifiers.
pub trait AccountIdLike {
    fn as_uuid(&self) -> &Uuid;

    fn order(&self) -> ListingOrder {
        ListingOrder(*self.as_uuid())
    }

    fn sub_eq(&self, other: &impl AccountIdLike) -> bool {
        self.as_uuid() == other.as_uuid()
    }
}

impl AccountIdLike for AccountID {
    fn as_uuid(&self) -> &Uuid {
        match &self {
            AccountID::User(user_id) => user_id.as_uuid(),
            AccountID::Channel(channel_id) => channel_id.as_uuid(),
        }
    }
}
