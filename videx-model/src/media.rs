use std::fmt::Display;
use std::fmt::Formatter;

/// Simple enum for uploaded media kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MediaKind {
    /// Video stream payload
    Video,
    /// Image payload (thumbnails, avatars)
    Image,
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => write!(f, "Video"),
            MediaKind::Image => write!(f, "Image"),
        }
    }
}

/// Opaque reference to an uploaded file.
///
/// The upload collaborator hands back a content-address digest; the model
/// stores it verbatim and never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaHandle {
    pub digest: String,
    pub media_type: MediaKind,
}

impl MediaHandle {
    pub fn new(digest: impl Into<String>, media_type: MediaKind) -> Self {
        Self {
            digest: digest.into(),
            media_type,
        }
    }
}

impl Display for MediaHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.digest, self.media_type)
    }
}
