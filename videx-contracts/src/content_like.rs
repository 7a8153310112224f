use super::id::ContentIdLike;
use videx_model::content::Credits;
use videx_model::content_id::ContentID;
use videx_model::ids::{ChannelID, PlaylistID, ShowID, VideoID};
use videx_model::media::MediaHandle;
use videx_model::playlist::Playlist;
use videx_model::show::Show;
use videx_model::video::Video;

// ===== Content Trait System =====
//
// This trait system provides a clean interface for working with content
// entities without the need for repetitive pattern matching over the video
// and show variants.

/// Common interface for all content entity types
pub trait ContentOps: Send + Sync {
    type Id: ContentIdLike;

    fn id(&self) -> Self::Id;

    /// Get the unique content ID
    fn content_id(&self) -> ContentID;

    /// Get the owning channel
    fn channel(&self) -> ChannelID;

    /// Get the display title
    fn title(&self) -> &str;
}

/// Specialized trait for content that can be watched
pub trait Watchable: ContentOps {
    /// Get the uploaded media reference
    fn media(&self) -> &MediaHandle;
}

/// Access to the credit lists of a content entity.
///
/// Projections call this on direct fetches only; listing output never
/// carries credits.
pub trait HasCredits {
    fn credits(&self) -> &Credits;
}

/// Specialized trait for content that contains other content
pub trait Collection: ContentOps {
    /// Get the number of child items if known
    fn child_count(&self) -> Option<usize>;

    /// Get the child video ids in presentation order
    fn child_ids(&self) -> Vec<VideoID>;
}

// ===== ContentOps Implementations =====

impl ContentOps for Video {
    type Id = VideoID;

    fn id(&self) -> Self::Id {
        Video::id(self)
    }

    fn content_id(&self) -> ContentID {
        ContentID::Video(Video::id(self))
    }

    fn channel(&self) -> ChannelID {
        Video::channel(self)
    }

    fn title(&self) -> &str {
        Video::title(self)
    }
}

impl ContentOps for Show {
    type Id = ShowID;

    fn id(&self) -> Self::Id {
        Show::id(self)
    }

    fn content_id(&self) -> ContentID {
        ContentID::Show(Show::id(self))
    }

    fn channel(&self) -> ChannelID {
        Show::channel(self)
    }

    fn title(&self) -> &str {
        Show::title(self)
    }
}

impl ContentOps for Playlist {
    type Id = PlaylistID;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn content_id(&self) -> ContentID {
        ContentID::Playlist(self.id)
    }

    fn channel(&self) -> ChannelID {
        self.info.channel
    }

    fn title(&self) -> &str {
        &self.info.title
    }
}

// ===== Watchable Implementations =====

impl Watchable for Video {
    fn media(&self) -> &MediaHandle {
        Video::media(self)
    }
}

// ===== HasCredits Implementations =====

impl HasCredits for Video {
    fn credits(&self) -> &Credits {
        Video::credits(self)
    }
}

impl HasCredits for Show {
    fn credits(&self) -> &Credits {
        &self.info().credits
    }
}

impl HasCredits for Playlist {
    fn credits(&self) -> &Credits {
        &self.info.credits
    }
}

// ===== Collection Implementations =====

impl Collection for Show {
    fn child_count(&self) -> Option<usize> {
        Some(self.episode_ids().len())
    }

    fn child_ids(&self) -> Vec<VideoID> {
        self.episode_ids()
    }
}

impl Collection for Playlist {
    fn child_count(&self) -> Option<usize> {
        Some(self.videos.len())
    }

    fn child_ids(&self) -> Vec<VideoID> {
        self.videos.clone()
    }
}
