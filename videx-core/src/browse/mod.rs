//! Browsable projections: one-level expansion of graph entities.

pub mod expand;
pub mod forms;

pub use expand::Expander;
pub use forms::{
    BrowsableAccount, BrowsableChannel, BrowsableCredits, BrowsablePlaylist, BrowsableSeason,
    BrowsableShow, BrowsableUser, BrowsableVideo, BrowseContext, ChannelReference,
    PlaylistReference, ShowReference, UserReference, VideoCard,
};
