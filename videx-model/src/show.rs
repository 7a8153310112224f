use chrono::{DateTime, Utc};

use crate::content::{ContentInfo, Credits};
use crate::error::ModelError;
use crate::ids::{ChannelID, ShowID, VideoID};
use crate::media::MediaHandle;

/// Ordered run of episodes within a seasoned show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Season {
    pub title: Option<String>,
    pub episodes: Vec<VideoID>,
}

/// Show whose episodes are grouped into ordered seasons.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonedShow {
    pub id: ShowID,
    pub info: ContentInfo,
    pub seasons: Vec<Season>,
}

/// Show with a single flat run of episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodicShow {
    pub id: ShowID,
    pub info: ContentInfo,
    pub episodes: Vec<VideoID>,
}

/// A show in exactly one of its two structures: seasons or a flat episode
/// run, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Show {
    Seasoned(SeasonedShow),
    Episodic(EpisodicShow),
}

impl Show {
    pub fn id(&self) -> ShowID {
        match self {
            Show::Seasoned(s) => s.id,
            Show::Episodic(s) => s.id,
        }
    }

    pub fn channel(&self) -> ChannelID {
        self.info().channel
    }

    pub fn title(&self) -> &str {
        &self.info().title
    }

    pub fn info(&self) -> &ContentInfo {
        match self {
            Show::Seasoned(s) => &s.info,
            Show::Episodic(s) => &s.info,
        }
    }

    pub fn info_mut(&mut self) -> &mut ContentInfo {
        match self {
            Show::Seasoned(s) => &mut s.info,
            Show::Episodic(s) => &mut s.info,
        }
    }

    /// All episode ids in presentation order, seasons flattened.
    pub fn episode_ids(&self) -> Vec<VideoID> {
        match self {
            Show::Seasoned(s) => s
                .seasons
                .iter()
                .flat_map(|season| season.episodes.iter().copied())
                .collect(),
            Show::Episodic(s) => s.episodes.clone(),
        }
    }

    pub fn contains_episode(&self, video: &VideoID) -> bool {
        match self {
            Show::Seasoned(s) => s
                .seasons
                .iter()
                .any(|season| season.episodes.contains(video)),
            Show::Episodic(s) => s.episodes.contains(video),
        }
    }

    /// Append an episode.
    ///
    /// For seasoned shows the episode lands in the given season index, or in
    /// the last season when none is given. Idempotent for episodes already
    /// attached.
    pub fn attach_episode(
        &mut self,
        video: VideoID,
        season: Option<usize>,
    ) -> Result<(), ModelError> {
        if self.contains_episode(&video) {
            return Ok(());
        }
        match self {
            Show::Seasoned(s) => {
                let index = match season {
                    Some(index) => index,
                    None => s.seasons.len().saturating_sub(1),
                };
                let Some(target) = s.seasons.get_mut(index) else {
                    return Err(ModelError::InvalidContent(format!(
                        "show has no season {index}"
                    )));
                };
                target.episodes.push(video);
                Ok(())
            }
            Show::Episodic(s) => {
                if season.is_some() {
                    return Err(ModelError::InvalidContent(
                        "show has no seasons".to_string(),
                    ));
                }
                s.episodes.push(video);
                Ok(())
            }
        }
    }

    /// Drop an episode wherever it appears. Returns true when something was
    /// removed.
    pub fn detach_episode(&mut self, video: &VideoID) -> bool {
        match self {
            Show::Seasoned(s) => {
                let mut removed = false;
                for season in &mut s.seasons {
                    let before = season.episodes.len();
                    season.episodes.retain(|e| e != video);
                    removed |= season.episodes.len() != before;
                }
                removed
            }
            Show::Episodic(s) => {
                let before = s.episodes.len();
                s.episodes.retain(|e| e != video);
                s.episodes.len() != before
            }
        }
    }
}

/// Unclassified show submission as it arrives at the write boundary.
///
/// Exactly one of `seasons` / `episodes` must be present; an empty vector
/// still counts as present.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowDraft {
    pub title: String,
    pub description: String,
    pub channel: ChannelID,
    pub thumbnail: Option<MediaHandle>,
    pub tags: Vec<String>,
    pub explicit: bool,
    pub unlisted: bool,
    pub seasons: Option<Vec<Season>>,
    pub episodes: Option<Vec<VideoID>>,
}

impl ShowDraft {
    pub fn classify(self, id: ShowID, created_at: DateTime<Utc>) -> Result<Show, ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::InvalidContent(
                "show title cannot be empty".to_string(),
            ));
        }

        let info = ContentInfo {
            title: self.title,
            description: self.description,
            views: 0,
            promotions: 0,
            channel: self.channel,
            credits: Credits::default(),
            thumbnail: self.thumbnail,
            tags: self.tags,
            explicit: self.explicit,
            unlisted: self.unlisted,
            created_at,
        };

        match (self.seasons, self.episodes) {
            (Some(_), Some(_)) => Err(ModelError::AmbiguousVariant(
                "show declares both seasons and a flat episode run".to_string(),
            )),
            (Some(seasons), None) => Ok(Show::Seasoned(SeasonedShow { id, info, seasons })),
            (None, Some(episodes)) => Ok(Show::Episodic(EpisodicShow { id, info, episodes })),
            (None, None) => Err(ModelError::InvalidContent(
                "show must declare seasons or a flat episode run".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ShowDraft {
        ShowDraft {
            title: "Build log".to_string(),
            description: String::new(),
            channel: ChannelID::new(),
            thumbnail: None,
            tags: Vec::new(),
            explicit: false,
            unlisted: false,
            seasons: None,
            episodes: None,
        }
    }

    #[test]
    fn seasons_present_classifies_as_seasoned() {
        let mut d = draft();
        d.seasons = Some(vec![Season::default()]);
        let show = d.classify(ShowID::new(), Utc::now()).unwrap();
        assert!(matches!(show, Show::Seasoned(_)));
    }

    #[test]
    fn empty_seasons_vector_still_counts_as_seasoned() {
        let mut d = draft();
        d.seasons = Some(Vec::new());
        assert!(d.classify(ShowID::new(), Utc::now()).is_ok());
    }

    #[test]
    fn episodes_present_classifies_as_episodic() {
        let mut d = draft();
        d.episodes = Some(Vec::new());
        let show = d.classify(ShowID::new(), Utc::now()).unwrap();
        assert!(matches!(show, Show::Episodic(_)));
    }

    #[test]
    fn declaring_both_structures_is_rejected() {
        let mut d = draft();
        d.seasons = Some(Vec::new());
        d.episodes = Some(Vec::new());
        let err = d.classify(ShowID::new(), Utc::now()).unwrap_err();
        assert!(matches!(err, ModelError::AmbiguousVariant(_)));
    }

    #[test]
    fn declaring_neither_structure_is_rejected() {
        assert!(draft().classify(ShowID::new(), Utc::now()).is_err());
    }

    #[test]
    fn attach_lands_in_requested_season() {
        let mut d = draft();
        d.seasons = Some(vec![Season::default(), Season::default()]);
        let mut show = d.classify(ShowID::new(), Utc::now()).unwrap();

        let episode = VideoID::new();
        show.attach_episode(episode, Some(0)).unwrap();
        assert!(show.contains_episode(&episode));

        let Show::Seasoned(s) = &show else {
            panic!("expected seasoned show")
        };
        assert_eq!(s.seasons[0].episodes, vec![episode]);
        assert!(s.seasons[1].episodes.is_empty());
    }

    #[test]
    fn attach_defaults_to_last_season() {
        let mut d = draft();
        d.seasons = Some(vec![Season::default(), Season::default()]);
        let mut show = d.classify(ShowID::new(), Utc::now()).unwrap();

        let episode = VideoID::new();
        show.attach_episode(episode, None).unwrap();

        let Show::Seasoned(s) = &show else {
            panic!("expected seasoned show")
        };
        assert_eq!(s.seasons[1].episodes, vec![episode]);
    }

    #[test]
    fn attach_rejects_out_of_range_season() {
        let mut d = draft();
        d.seasons = Some(vec![Season::default()]);
        let mut show = d.classify(ShowID::new(), Utc::now()).unwrap();
        assert!(show.attach_episode(VideoID::new(), Some(3)).is_err());
    }

    #[test]
    fn detach_removes_across_seasons() {
        let mut d = draft();
        d.episodes = Some(Vec::new());
        let mut show = d.classify(ShowID::new(), Utc::now()).unwrap();

        let episode = VideoID::new();
        show.attach_episode(episode, None).unwrap();
        assert!(show.detach_episode(&episode));
        assert!(!show.contains_episode(&episode));
        assert!(!show.detach_episode(&episode));
    }
}
