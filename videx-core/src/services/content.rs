//! Content lifecycle: videos, shows, and playlists.
//!
//! Variant moves (a basic video joining a playlist, an upload landing in a
//! show) touch the video and its container together. The pattern matches
//! the rest of the crate: validate against clones first, write the video,
//! then the container, and compensate the video write if the container
//! write fails.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};
use videx_model::{
    BasicVideo, Channel, ChannelID, ContentID, ContentInfo, MediaHandle, Playlist, PlaylistID,
    SerialVideo, Show, ShowID, UserID, Video, VideoID,
};

use crate::api_types::{
    CreatePlaylistRequest, CreateShowRequest, CreateVideoRequest, PlaylistVideoRequest,
    UpdatePlaylistRequest, UpdateShowRequest, UpdateVideoRequest,
};
use crate::error::{Error, Result};
use crate::rbac::{Action, Authorizer};
use crate::services::forbidden;
use crate::store::{AccountStore, ContentStore};

/// Container write queued behind a video write.
enum ContainerWrite {
    Playlist(Playlist),
    Show(Show),
}

/// Content creation, editing, membership moves, and counters.
pub struct ContentService {
    accounts: Arc<dyn AccountStore>,
    content: Arc<dyn ContentStore>,
    authorizer: Authorizer,
}

impl fmt::Debug for ContentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentService")
            .field("accounts", &Arc::strong_count(&self.accounts))
            .field("content", &Arc::strong_count(&self.content))
            .finish()
    }
}

impl ContentService {
    /// A content service with the standard staff grants.
    pub fn new(accounts: Arc<dyn AccountStore>, content: Arc<dyn ContentStore>) -> Self {
        ContentService {
            accounts,
            content,
            authorizer: Authorizer::standard(),
        }
    }

    /// Swaps in a custom grant table.
    pub fn with_authorizer(mut self, authorizer: Authorizer) -> Self {
        self.authorizer = authorizer;
        self
    }

    async fn require_channel(&self, id: &ChannelID) -> Result<Channel> {
        self.accounts
            .channel(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("channel {id}")))
    }

    async fn require_video(&self, id: &VideoID) -> Result<Video> {
        self.content
            .video(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("video {id}")))
    }

    async fn require_show(&self, id: &ShowID) -> Result<Show> {
        self.content
            .show(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("show {id}")))
    }

    async fn require_playlist(&self, id: &PlaylistID) -> Result<Playlist> {
        self.content
            .playlist(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("playlist {id}")))
    }

    fn authorize(&self, actor: &UserID, channel: &Channel, action: Action) -> Result<()> {
        if self.authorizer.allowed(actor, channel, action) {
            Ok(())
        } else {
            Err(forbidden(action))
        }
    }

    async fn rollback_video(&self, id: &VideoID) {
        if let Err(undo) = self.content.delete_video(id).await {
            error!(video = %id, error = %undo, "video rollback failed");
        }
    }

    /// Uploads a video. `playlist` xor `show` in the body picks the serial
    /// or episodic variant, and the container is updated in the same
    /// operation; naming both is rejected.
    pub async fn create_video(&self, actor: UserID, body: CreateVideoRequest) -> Result<Video> {
        let channel = self.require_channel(&body.channel).await?;
        self.authorize(&actor, &channel, Action::CreateContent)?;

        let season = body.season.map(|s| s as usize);
        let draft = body.into_draft(channel.private.settings.default_unlisted);
        let id = VideoID::new();
        let mut video = draft.classify(id, Utc::now())?;

        let container = match &mut video {
            Video::Basic(_) => None,
            Video::Serial(serial) => {
                let mut playlist = self.require_playlist(&serial.playlist).await?;
                if playlist.info.channel != serial.info.channel {
                    return Err(Error::InvalidBody(
                        "playlist belongs to a different channel".to_string(),
                    ));
                }
                serial.categories = playlist.info.tags.clone();
                playlist.add_video(id);
                Some(ContainerWrite::Playlist(playlist))
            }
            Video::Episodic(episode) => {
                let mut show = self.require_show(&episode.show).await?;
                if show.channel() != episode.info.channel {
                    return Err(Error::InvalidBody(
                        "show belongs to a different channel".to_string(),
                    ));
                }
                // Season bounds are checked before anything is written.
                show.attach_episode(id, season)?;
                Some(ContainerWrite::Show(show))
            }
        };

        self.content.insert_video(video.clone()).await?;
        if let Some(write) = container {
            let outcome = match write {
                ContainerWrite::Playlist(playlist) => self.content.update_playlist(playlist).await,
                ContainerWrite::Show(show) => self.content.update_show(show).await,
            };
            if let Err(err) = outcome {
                warn!(video = %id, error = %err, "rolling back video upload");
                self.rollback_video(&id).await;
                return Err(err.into());
            }
        }

        let kind = match &video {
            Video::Basic(_) => "basic",
            Video::Serial(_) => "serial",
            Video::Episodic(_) => "episodic",
        };
        info!(video = %id, channel = %channel.id, kind, "created video");
        Ok(video)
    }

    /// Creates a show. Episode lists must start empty; episodes arrive by
    /// uploading videos into the show.
    pub async fn create_show(&self, actor: UserID, body: CreateShowRequest) -> Result<Show> {
        let channel = self.require_channel(&body.channel).await?;
        self.authorize(&actor, &channel, Action::CreateContent)?;

        let prefilled = body.episodes.as_ref().is_some_and(|eps| !eps.is_empty())
            || body
                .seasons
                .as_ref()
                .is_some_and(|seasons| seasons.iter().any(|s| !s.episodes.is_empty()));
        if prefilled {
            return Err(Error::InvalidBody(
                "episodes are attached by uploading videos into the show".to_string(),
            ));
        }

        let show = body.into_draft().classify(ShowID::new(), Utc::now())?;
        self.content.insert_show(show.clone()).await?;
        info!(show = %show.id(), channel = %channel.id, "created show");
        Ok(show)
    }

    /// Creates an empty playlist.
    pub async fn create_playlist(
        &self,
        actor: UserID,
        body: CreatePlaylistRequest,
    ) -> Result<Playlist> {
        let channel = self.require_channel(&body.channel).await?;
        self.authorize(&actor, &channel, Action::CreateContent)?;

        let playlist = body.into_draft().build(PlaylistID::new(), Utc::now())?;
        self.content.insert_playlist(playlist.clone()).await?;
        info!(playlist = %playlist.id, channel = %channel.id, "created playlist");
        Ok(playlist)
    }

    /// Edits video metadata. Variant rules hold on update exactly as they
    /// do on upload: episodes take no tags, only standalone videos take
    /// sequence links.
    pub async fn update_video(
        &self,
        actor: UserID,
        id: VideoID,
        body: UpdateVideoRequest,
    ) -> Result<Video> {
        let mut video = self.require_video(&id).await?;
        let channel = self.require_channel(&video.channel()).await?;
        self.authorize(&actor, &channel, Action::UpdateContent)?;

        if let Some(title) = &body.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidBody("video title cannot be empty".to_string()));
            }
        }
        if body.tags.is_some() && video.is_episodic() {
            return Err(Error::InvalidBody("episodes cannot carry tags".to_string()));
        }
        if body.sequence.is_some() && !matches!(video, Video::Basic(_)) {
            return Err(Error::InvalidBody(
                "sequence links are only valid on standalone videos".to_string(),
            ));
        }

        match &mut video {
            Video::Basic(v) => {
                patch_info(
                    &mut v.info,
                    &body.title,
                    &body.description,
                    &body.thumbnail,
                    &body.tags,
                    body.explicit,
                    body.unlisted,
                );
                if let Some(release) = body.release_date {
                    v.release_date = release;
                }
                if let Some(sequence) = body.sequence {
                    v.sequence = Some(sequence);
                }
            }
            Video::Serial(v) => {
                patch_info(
                    &mut v.info,
                    &body.title,
                    &body.description,
                    &body.thumbnail,
                    &body.tags,
                    body.explicit,
                    body.unlisted,
                );
                if let Some(release) = body.release_date {
                    v.release_date = release;
                }
            }
            Video::Episodic(v) => {
                if let Some(title) = &body.title {
                    v.info.title = title.clone();
                }
                if let Some(description) = &body.description {
                    v.info.description = description.clone();
                }
                if let Some(thumbnail) = &body.thumbnail {
                    v.info.thumbnail = Some(thumbnail.clone());
                }
                if let Some(explicit) = body.explicit {
                    v.info.explicit = explicit;
                }
                if let Some(unlisted) = body.unlisted {
                    v.info.unlisted = unlisted;
                }
                if let Some(release) = body.release_date {
                    v.release_date = release;
                }
            }
        }

        self.content.update_video(video.clone()).await?;
        debug!(video = %id, "updated video");
        Ok(video)
    }

    /// Edits show metadata, optionally regrouping seasons. A regroup must
    /// keep exactly the episodes the show already has.
    pub async fn update_show(
        &self,
        actor: UserID,
        id: ShowID,
        body: UpdateShowRequest,
    ) -> Result<Show> {
        let mut show = self.require_show(&id).await?;
        let channel = self.require_channel(&show.channel()).await?;
        self.authorize(&actor, &channel, Action::UpdateContent)?;

        if let Some(title) = &body.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidBody("show title cannot be empty".to_string()));
            }
        }

        patch_info(
            show.info_mut(),
            &body.title,
            &body.description,
            &body.thumbnail,
            &body.tags,
            body.explicit,
            body.unlisted,
        );

        if let Some(new_seasons) = body.seasons {
            let Show::Seasoned(seasoned) = &mut show else {
                return Err(Error::InvalidBody("show has no seasons".to_string()));
            };
            let mut current: Vec<VideoID> = seasoned
                .seasons
                .iter()
                .flat_map(|s| s.episodes.iter().copied())
                .collect();
            let mut proposed: Vec<VideoID> = new_seasons
                .iter()
                .flat_map(|s| s.episodes.iter().copied())
                .collect();
            current.sort();
            proposed.sort();
            if current != proposed {
                return Err(Error::InvalidBody(
                    "season regrouping must keep the same episodes".to_string(),
                ));
            }
            seasoned.seasons = new_seasons;
        }

        self.content.update_show(show.clone()).await?;
        debug!(show = %id, "updated show");
        Ok(show)
    }

    /// Edits playlist metadata. A tag change rewrites the category
    /// snapshot on every member video.
    pub async fn update_playlist(
        &self,
        actor: UserID,
        id: PlaylistID,
        body: UpdatePlaylistRequest,
    ) -> Result<Playlist> {
        let mut playlist = self.require_playlist(&id).await?;
        let channel = self.require_channel(&playlist.info.channel).await?;
        self.authorize(&actor, &channel, Action::UpdateContent)?;

        if let Some(title) = &body.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidBody(
                    "playlist title cannot be empty".to_string(),
                ));
            }
        }

        let tags_changed = body
            .tags
            .as_ref()
            .is_some_and(|tags| *tags != playlist.info.tags);
        patch_info(
            &mut playlist.info,
            &body.title,
            &body.description,
            &body.thumbnail,
            &body.tags,
            body.explicit,
            body.unlisted,
        );

        self.content.update_playlist(playlist.clone()).await?;

        if tags_changed {
            let mut first_failure: Option<Error> = None;
            for member in &playlist.videos {
                let Some(mut video) = self.content.video(member).await? else {
                    continue;
                };
                let Video::Serial(serial) = &mut video else {
                    continue;
                };
                if serial.playlist != playlist.id {
                    continue;
                }
                serial.categories = playlist.info.tags.clone();
                if let Err(err) = self.content.update_video(video).await {
                    warn!(video = %member, error = %err, "category sync failed");
                    if first_failure.is_none() {
                        first_failure = Some(err.into());
                    }
                }
            }
            if let Some(err) = first_failure {
                return Err(err);
            }
            debug!(playlist = %id, members = playlist.videos.len(), "synced member categories");
        }

        debug!(playlist = %id, "updated playlist");
        Ok(playlist)
    }

    /// Deletes a video, detaching it from its container first.
    pub async fn delete_video(&self, actor: UserID, id: VideoID) -> Result<()> {
        let video = self.require_video(&id).await?;
        let channel = self.require_channel(&video.channel()).await?;
        self.authorize(&actor, &channel, Action::DeleteContent)?;

        match &video {
            Video::Basic(_) => {}
            Video::Serial(serial) => {
                if let Some(mut playlist) = self.content.playlist(&serial.playlist).await? {
                    if playlist.remove_video(&id) {
                        self.content.update_playlist(playlist).await?;
                    }
                }
            }
            Video::Episodic(episode) => {
                if let Some(mut show) = self.content.show(&episode.show).await? {
                    if show.detach_episode(&id) {
                        self.content.update_show(show).await?;
                    }
                }
            }
        }

        self.content.delete_video(&id).await?;
        info!(video = %id, "deleted video");
        Ok(())
    }

    /// Deletes a show together with its episodes, which have no surface of
    /// their own to fall back to.
    pub async fn delete_show(&self, actor: UserID, id: ShowID) -> Result<()> {
        let show = self.require_show(&id).await?;
        let channel = self.require_channel(&show.channel()).await?;
        self.authorize(&actor, &channel, Action::DeleteContent)?;

        let episodes = show.episode_ids();
        for episode in &episodes {
            match self.content.delete_video(episode).await {
                Ok(()) => {}
                Err(crate::store::StoreError::NotFound(_)) => {}
                Err(err) => return Err(err.into()),
            }
        }

        self.content.delete_show(&id).await?;
        info!(show = %id, episodes = episodes.len(), "deleted show");
        Ok(())
    }

    /// Deletes a playlist. Member videos revert to standalone and keep
    /// their own metadata; only the membership and category snapshot go.
    pub async fn delete_playlist(&self, actor: UserID, id: PlaylistID) -> Result<()> {
        let playlist = self.require_playlist(&id).await?;
        let channel = self.require_channel(&playlist.info.channel).await?;
        self.authorize(&actor, &channel, Action::DeleteContent)?;

        for member in &playlist.videos {
            let Some(video) = self.content.video(member).await? else {
                continue;
            };
            let Video::Serial(serial) = video else {
                continue;
            };
            if serial.playlist != playlist.id {
                continue;
            }
            self.content.update_video(detach_serial(serial)).await?;
        }

        self.content.delete_playlist(&id).await?;
        info!(playlist = %id, "deleted playlist");
        Ok(())
    }

    /// Counts one view. No authorization: views come from the public
    /// surface.
    pub async fn record_view(&self, id: ContentID) -> Result<u64> {
        match id {
            ContentID::Video(id) => {
                let mut video = self.require_video(&id).await?;
                video.record_view();
                let views = video.views();
                self.content.update_video(video).await?;
                Ok(views)
            }
            ContentID::Show(id) => {
                let mut show = self.require_show(&id).await?;
                show.info_mut().views += 1;
                let views = show.info().views;
                self.content.update_show(show).await?;
                Ok(views)
            }
            ContentID::Playlist(id) => {
                let mut playlist = self.require_playlist(&id).await?;
                playlist.info.views += 1;
                let views = playlist.info.views;
                self.content.update_playlist(playlist).await?;
                Ok(views)
            }
        }
    }

    /// Counts one promotion. Episodes are promoted through their show and
    /// playlists per video, so both are refused.
    pub async fn promote(&self, actor: UserID, id: ContentID) -> Result<()> {
        match id {
            ContentID::Video(id) => {
                let mut video = self.require_video(&id).await?;
                let channel = self.require_channel(&video.channel()).await?;
                self.authorize(&actor, &channel, Action::Promote)?;
                if !video.promote() {
                    return Err(Error::NotPromotable(
                        "episodes are promoted through their show".to_string(),
                    ));
                }
                self.content.update_video(video).await?;
            }
            ContentID::Show(id) => {
                let mut show = self.require_show(&id).await?;
                let channel = self.require_channel(&show.channel()).await?;
                self.authorize(&actor, &channel, Action::Promote)?;
                show.info_mut().promotions += 1;
                self.content.update_show(show).await?;
            }
            ContentID::Playlist(_) => {
                return Err(Error::NotPromotable(
                    "playlists are promoted per video".to_string(),
                ));
            }
        }
        debug!(content = %id, "recorded promotion");
        Ok(())
    }

    /// Moves a standalone video into a playlist: the video becomes serial,
    /// adopting the playlist's tags as its category snapshot.
    pub async fn add_playlist_video(
        &self,
        actor: UserID,
        id: PlaylistID,
        request: PlaylistVideoRequest,
    ) -> Result<Playlist> {
        let mut playlist = self.require_playlist(&id).await?;
        let channel = self.require_channel(&playlist.info.channel).await?;
        self.authorize(&actor, &channel, Action::UpdateContent)?;

        let video = self.require_video(&request.video).await?;
        let basic = match video {
            Video::Serial(serial) if serial.playlist == playlist.id => {
                // Already a member; converge the membership list if needed.
                if playlist.add_video(request.video) {
                    self.content.update_playlist(playlist.clone()).await?;
                }
                return Ok(playlist);
            }
            Video::Serial(_) => {
                return Err(Error::InvalidBody(
                    "video already belongs to a playlist".to_string(),
                ));
            }
            Video::Episodic(_) => {
                return Err(Error::InvalidBody(
                    "episodes cannot join playlists".to_string(),
                ));
            }
            Video::Basic(basic) => basic,
        };

        if basic.info.channel != playlist.info.channel {
            return Err(Error::InvalidBody(
                "video belongs to a different channel".to_string(),
            ));
        }
        if basic.sequence.is_some() {
            return Err(Error::InvalidBody(
                "video carries sequence links; remove them first".to_string(),
            ));
        }

        let restore = Video::Basic(basic.clone());
        let serial = Video::Serial(SerialVideo {
            id: basic.id,
            info: basic.info,
            media: basic.media,
            release_date: basic.release_date,
            playlist: playlist.id,
            categories: playlist.info.tags.clone(),
        });

        self.content.update_video(serial).await?;
        playlist.add_video(request.video);
        if let Err(err) = self.content.update_playlist(playlist.clone()).await {
            warn!(playlist = %id, video = %request.video, error = %err, "compensating failed playlist add");
            if let Err(undo) = self.content.update_video(restore).await {
                error!(video = %request.video, error = %undo, "playlist add compensation failed");
            }
            return Err(err.into());
        }

        info!(playlist = %id, video = %request.video, "added video to playlist");
        Ok(playlist)
    }

    /// Removes a video from a playlist, reverting it to standalone. No-op
    /// when the video was not a member.
    pub async fn remove_playlist_video(
        &self,
        actor: UserID,
        id: PlaylistID,
        request: PlaylistVideoRequest,
    ) -> Result<Playlist> {
        let mut playlist = self.require_playlist(&id).await?;
        let channel = self.require_channel(&playlist.info.channel).await?;
        self.authorize(&actor, &channel, Action::UpdateContent)?;

        let mut restore: Option<Video> = None;
        if let Some(Video::Serial(serial)) = self.content.video(&request.video).await? {
            if serial.playlist == playlist.id {
                restore = Some(Video::Serial(serial.clone()));
                self.content.update_video(detach_serial(serial)).await?;
            }
        }

        if playlist.remove_video(&request.video) {
            if let Err(err) = self.content.update_playlist(playlist.clone()).await {
                warn!(playlist = %id, video = %request.video, error = %err, "compensating failed playlist removal");
                if let Some(previous) = restore {
                    if let Err(undo) = self.content.update_video(previous).await {
                        error!(video = %request.video, error = %undo, "playlist removal compensation failed");
                    }
                }
                return Err(err.into());
            }
            info!(playlist = %id, video = %request.video, "removed video from playlist");
        }
        Ok(playlist)
    }
}

/// Reverts a serial video to its standalone shape. The category snapshot
/// goes away with the membership; sequence links never survive a variant
/// move.
fn detach_serial(serial: SerialVideo) -> Video {
    Video::Basic(BasicVideo {
        id: serial.id,
        info: serial.info,
        media: serial.media,
        release_date: serial.release_date,
        sequence: None,
    })
}

#[allow(clippy::too_many_arguments)]
fn patch_info(
    info: &mut ContentInfo,
    title: &Option<String>,
    description: &Option<String>,
    thumbnail: &Option<MediaHandle>,
    tags: &Option<Vec<String>>,
    explicit: Option<bool>,
    unlisted: Option<bool>,
) {
    if let Some(title) = title {
        info.title = title.clone();
    }
    if let Some(description) = description {
        info.description = description.clone();
    }
    if let Some(thumbnail) = thumbnail {
        info.thumbnail = Some(thumbnail.clone());
    }
    if let Some(tags) = tags {
        info.tags = tags.clone();
    }
    if let Some(explicit) = explicit {
        info.explicit = explicit;
    }
    if let Some(unlisted) = unlisted {
        info.unlisted = unlisted;
    }
}
