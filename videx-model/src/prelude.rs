//! Consumer-focused snapshot of the model surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in videx-core or other downstream layers.

pub use super::account::{
    AccountPublic, Channel, ChannelPrivate, ChannelSettings, User, UserPrivate,
    UserSettings,
};
pub use super::content::{ContentInfo, Credits, EpisodeInfo, SequenceLinks};
pub use super::content_id::{AccountID, ContentID, ContentKind, IdOrHandle};
pub use super::email::EmailAddress;
pub use super::error::{ModelError, Result as ModelResult};
pub use super::handle::Handle;
pub use super::ids::{
    ChannelID, ListingOrder, PlaylistID, ShowID, UserID, VideoID,
};
pub use super::invites::{
    ChannelRole, InviteLists, ReceivedInvites, SentInvites,
};
pub use super::media::{MediaHandle, MediaKind};
pub use super::playlist::{Playlist, PlaylistDraft};
pub use super::show::{EpisodicShow, Season, SeasonedShow, Show, ShowDraft};
pub use super::video::{BasicVideo, EpisodeVideo, SerialVideo, Video, VideoDraft};
