//! Core data model definitions shared across Videx crates.
#![allow(missing_docs)]

pub use ::chrono;
pub use ::uuid;

pub mod account;
pub mod content;
pub mod content_id;
pub mod email;
pub mod error;
pub mod handle;
pub mod ids;
pub mod invites;
pub mod media;
pub mod playlist;
pub mod prelude;
pub mod show;
pub mod video;

// Intentionally curated re-exports for downstream consumers.
pub use account::{
    AccountPublic, Channel, ChannelPrivate, ChannelSettings, User, UserPrivate,
    UserSettings,
};
pub use content::{ContentInfo, Credits, EpisodeInfo, SequenceLinks};
pub use content_id::{AccountID, ContentID, ContentKind, IdOrHandle};
pub use email::EmailAddress;
pub use error::{ModelError, Result as ModelResult};
pub use handle::Handle;
pub use ids::{ChannelID, ListingOrder, PlaylistID, ShowID, UserID, VideoID};
pub use invites::{ChannelRole, InviteLists, ReceivedInvites, SentInvites};
pub use media::{MediaHandle, MediaKind};
pub use playlist::{Playlist, PlaylistDraft};
pub use show::{EpisodicShow, Season, SeasonedShow, Show, ShowDraft};
pub use video::{BasicVideo, EpisodeVideo, SerialVideo, Video, VideoDraft};
