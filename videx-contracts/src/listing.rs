use super::content_like::ContentOps;
use videx_model::chrono::{DateTime, Utc};
use videx_model::ids::ListingOrder;
use videx_model::playlist::Playlist;
use videx_model::show::Show;
use videx_model::video::Video;

/// Contract the cursor listing engine paginates over.
///
/// Ordering comes from the identifier (UUIDv7, allocation-ordered), so a
/// listing is "oldest first" without any per-entity sort field.
pub trait Listable: ContentOps {
    /// Listing sort key, derived from the identifier.
    fn order(&self) -> ListingOrder;

    fn unlisted(&self) -> bool;

    fn release_date(&self) -> DateTime<Utc>;

    /// Whether this entity may ever appear in top-level listings.
    /// Episodes are reachable through their show only.
    fn standalone(&self) -> bool {
        true
    }

    /// Visible in public listings at `now`: standalone, not unlisted, and
    /// past its release date. Scheduled content stays hidden until release.
    fn listable_at(&self, now: DateTime<Utc>) -> bool {
        self.standalone() && !self.unlisted() && self.release_date() <= now
    }
}

impl Listable for Video {
    fn order(&self) -> ListingOrder {
        ListingOrder::from(Video::id(self))
    }

    fn unlisted(&self) -> bool {
        Video::unlisted(self)
    }

    fn release_date(&self) -> DateTime<Utc> {
        Video::release_date(self)
    }

    fn standalone(&self) -> bool {
        !self.is_episodic()
    }
}

impl Listable for Show {
    fn order(&self) -> ListingOrder {
        ListingOrder::from(Show::id(self))
    }

    fn unlisted(&self) -> bool {
        self.info().unlisted
    }

    fn release_date(&self) -> DateTime<Utc> {
        // Shows have no scheduled-release machinery; visible from creation.
        self.info().created_at
    }
}

impl Listable for Playlist {
    fn order(&self) -> ListingOrder {
        ListingOrder::from(self.id)
    }

    fn unlisted(&self) -> bool {
        self.info.unlisted
    }

    fn release_date(&self) -> DateTime<Utc> {
        self.info.created_at
    }
}
