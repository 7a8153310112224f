//! Opaque listing cursors.
//!
//! A cursor is the listing order of the last entity a client has seen,
//! carried on the wire as a UUID string. The nil UUID is the `BEGIN`
//! sentinel: clients send it (or omit the cursor entirely) to start from
//! the top, and servers return it when a listing is exhausted, so resuming
//! an exhausted listing is idempotent.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use uuid::Uuid;
use videx_model::ListingOrder;

use crate::error::Error;

/// Position inside a listing, decoded from the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Start of the listing. Wire form is the nil UUID.
    #[default]
    Beginning,
    /// Resume strictly after the entity with this listing order.
    After(ListingOrder),
}

impl Cursor {
    /// Decodes a wire cursor. The nil UUID decodes to [`Cursor::Beginning`];
    /// anything that is not a UUID is rejected.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let uuid =
            Uuid::parse_str(raw.trim()).map_err(|_| Error::InvalidCursor(raw.to_string()))?;
        if uuid.is_nil() {
            Ok(Cursor::Beginning)
        } else {
            Ok(Cursor::After(ListingOrder(uuid)))
        }
    }

    /// Builds a cursor pointing after `order`. A nil order collapses to
    /// [`Cursor::Beginning`].
    pub fn after(order: ListingOrder) -> Self {
        if order.is_beginning() {
            Cursor::Beginning
        } else {
            Cursor::After(order)
        }
    }

    /// The listing order this cursor resumes after.
    pub fn order(&self) -> ListingOrder {
        match self {
            Cursor::Beginning => ListingOrder::BEGINNING,
            Cursor::After(order) => *order,
        }
    }

    /// Whether this cursor points at the start of the listing.
    pub fn is_beginning(&self) -> bool {
        matches!(self, Cursor::Beginning)
    }

    /// Wire form of this cursor.
    pub fn encode(&self) -> String {
        self.order().to_string()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CursorVisitor;

        impl Visitor<'_> for CursorVisitor {
            type Value = Cursor;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a UUID listing cursor")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Cursor, E> {
                Cursor::parse(value).map_err(|_| E::custom("invalid listing cursor"))
            }
        }

        deserializer.deserialize_str(CursorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use videx_model::VideoID;

    #[test]
    fn nil_uuid_decodes_to_beginning() {
        let cursor = Cursor::parse("00000000-0000-0000-0000-000000000000").unwrap();
        assert_eq!(cursor, Cursor::Beginning);
        assert!(cursor.is_beginning());
    }

    #[test]
    fn round_trips_through_wire_form() {
        let order = ListingOrder::from(VideoID::new());
        let cursor = Cursor::after(order);
        let decoded = Cursor::parse(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
        assert_eq!(decoded.order(), order);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            Cursor::parse("not-a-cursor"),
            Err(Error::InvalidCursor(_))
        ));
        assert!(matches!(Cursor::parse(""), Err(Error::InvalidCursor(_))));
    }

    #[test]
    fn beginning_encodes_as_nil() {
        assert_eq!(
            Cursor::Beginning.encode(),
            "00000000-0000-0000-0000-000000000000"
        );
    }
}
