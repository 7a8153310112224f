//! Content lifecycle: variant classification on upload, playlist
//! membership transitions, category synchronization, promotion rules,
//! and container cascade on delete.

use std::sync::Arc;

use videx_core::api_types::{
    CreateChannelRequest, CreatePlaylistRequest, CreateShowRequest, CreateUserRequest,
    CreateVideoRequest, PlaylistVideoRequest, UpdatePlaylistRequest, UpdateShowRequest,
    UpdateVideoRequest,
};
use videx_core::services::{ChannelService, ContentService, UserService};
use videx_core::store::{AccountStore, ContentStore, MemoryStore};
use videx_core::Error;
use videx_model::{
    ChannelID, ContentID, MediaHandle, MediaKind, Season, SequenceLinks, Show, UserID, Video,
    VideoID,
};

struct Fixture {
    store: Arc<MemoryStore>,
    content: ContentService,
    owner: UserID,
    channel: ChannelID,
}

impl Fixture {
    async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let users = UserService::new(store.clone());
        let channels = ChannelService::new(store.clone());
        let owner = users
            .register(CreateUserRequest {
                handle: "alice".to_string(),
                display_name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                avatar: None,
            })
            .await
            .unwrap()
            .id;
        let channel = channels
            .create(
                owner,
                CreateChannelRequest {
                    handle: "workshop".to_string(),
                    display_name: "Workshop".to_string(),
                    avatar: None,
                },
            )
            .await
            .unwrap()
            .id;
        Fixture {
            content: ContentService::new(store.clone(), store.clone()),
            store,
            owner,
            channel,
        }
    }

    fn video_body(&self, title: &str) -> CreateVideoRequest {
        CreateVideoRequest {
            title: title.to_string(),
            description: String::new(),
            channel: self.channel,
            media: MediaHandle::new(format!("media-{title}"), MediaKind::Video),
            thumbnail: None,
            tags: Vec::new(),
            explicit: false,
            unlisted: None,
            release_date: None,
            playlist: None,
            show: None,
            season: None,
            sequence: None,
        }
    }

    fn show_body(&self, title: &str, seasons: Option<Vec<Season>>) -> CreateShowRequest {
        CreateShowRequest {
            title: title.to_string(),
            description: String::new(),
            channel: self.channel,
            thumbnail: None,
            tags: Vec::new(),
            explicit: false,
            unlisted: false,
            seasons,
            episodes: None,
        }
    }

    fn playlist_body(&self, title: &str, tags: Vec<&str>) -> CreatePlaylistRequest {
        CreatePlaylistRequest {
            title: title.to_string(),
            description: String::new(),
            channel: self.channel,
            thumbnail: None,
            tags: tags.into_iter().map(str::to_string).collect(),
            explicit: false,
            unlisted: false,
        }
    }
}

#[tokio::test]
async fn uploads_classify_into_the_three_variants() {
    let fx = Fixture::new().await;

    let basic = fx
        .content
        .create_video(fx.owner, fx.video_body("standalone"))
        .await
        .unwrap();
    assert!(matches!(basic, Video::Basic(_)));

    let playlist = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("mix", vec!["lofi", "chill"]))
        .await
        .unwrap();
    let mut body = fx.video_body("track one");
    body.playlist = Some(playlist.id);
    let serial = fx.content.create_video(fx.owner, body).await.unwrap();
    let Video::Serial(serial) = serial else {
        panic!("playlist upload should classify as serial");
    };
    assert_eq!(
        serial.categories,
        vec!["lofi".to_string(), "chill".to_string()],
        "serial videos adopt the playlist tags as categories"
    );
    let playlist = fx.store.playlist(&playlist.id).await.unwrap().unwrap();
    assert!(
        playlist.contains(&serial.id),
        "the playlist should list its new member"
    );

    let show = fx
        .content
        .create_show(fx.owner, fx.show_body("series", None))
        .await
        .unwrap();
    let mut body = fx.video_body("pilot");
    body.show = Some(show.id());
    let episode = fx.content.create_video(fx.owner, body).await.unwrap();
    assert!(matches!(episode, Video::Episodic(_)));
    let show = fx.store.show(&show.id()).await.unwrap().unwrap();
    assert!(
        show.contains_episode(&episode.id()),
        "the show should list its new episode"
    );
}

#[tokio::test]
async fn naming_both_containers_is_ambiguous() {
    let fx = Fixture::new().await;
    let playlist = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("mix", vec![]))
        .await
        .unwrap();
    let show = fx
        .content
        .create_show(fx.owner, fx.show_body("series", None))
        .await
        .unwrap();

    let mut body = fx.video_body("torn");
    body.playlist = Some(playlist.id);
    body.show = Some(show.id());
    let err = fx.content.create_video(fx.owner, body).await.unwrap_err();
    assert!(matches!(err, Error::AmbiguousVariant(_)));

    let videos = fx.store.videos(Default::default()).await.unwrap();
    assert!(videos.is_empty(), "no video record should survive the reject");
}

#[tokio::test]
async fn seasons_target_shows_only() {
    let fx = Fixture::new().await;

    // A season index without a show makes no sense.
    let mut body = fx.video_body("lost");
    body.season = Some(1);
    let err = fx.content.create_video(fx.owner, body).await.unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));

    // A season index against an episodic show has nothing to address.
    let show = fx
        .content
        .create_show(fx.owner, fx.show_body("flat", None))
        .await
        .unwrap();
    let mut body = fx.video_body("misplaced");
    body.show = Some(show.id());
    body.season = Some(0);
    let err = fx.content.create_video(fx.owner, body).await.unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));

    // A valid index lands the episode in that season.
    let seasons = vec![
        Season {
            title: Some("One".to_string()),
            episodes: Vec::new(),
        },
        Season {
            title: Some("Two".to_string()),
            episodes: Vec::new(),
        },
    ];
    let show = fx
        .content
        .create_show(fx.owner, fx.show_body("seasoned", Some(seasons)))
        .await
        .unwrap();
    let mut body = fx.video_body("premiere");
    body.show = Some(show.id());
    body.season = Some(0);
    let episode = fx.content.create_video(fx.owner, body).await.unwrap();

    let show = fx.store.show(&show.id()).await.unwrap().unwrap();
    let Show::Seasoned(seasoned) = show else {
        panic!("show should have kept its seasons");
    };
    assert_eq!(seasoned.seasons[0].episodes, vec![episode.id()]);
    assert!(seasoned.seasons[1].episodes.is_empty());
}

#[tokio::test]
async fn episodes_carry_no_tags() {
    let fx = Fixture::new().await;
    let show = fx
        .content
        .create_show(fx.owner, fx.show_body("series", None))
        .await
        .unwrap();

    let mut body = fx.video_body("tagged");
    body.show = Some(show.id());
    body.tags = vec!["drama".to_string()];
    let err = fx.content.create_video(fx.owner, body).await.unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));

    // The same rule holds on update.
    let mut body = fx.video_body("pilot");
    body.show = Some(show.id());
    let episode = fx.content.create_video(fx.owner, body).await.unwrap();
    let err = fx
        .content
        .update_video(
            fx.owner,
            episode.id(),
            UpdateVideoRequest {
                tags: Some(vec!["drama".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));
}

#[tokio::test]
async fn unset_visibility_falls_back_to_the_channel_default() {
    let fx = Fixture::new().await;
    let mut channel = fx.store.channel(&fx.channel).await.unwrap().unwrap();
    channel.private.settings.default_unlisted = true;
    fx.store.update_channel(channel).await.unwrap();

    let defaulted = fx
        .content
        .create_video(fx.owner, fx.video_body("draft"))
        .await
        .unwrap();
    assert!(defaulted.unlisted(), "None should inherit the channel default");

    let mut body = fx.video_body("public");
    body.unlisted = Some(false);
    let explicit = fx.content.create_video(fx.owner, body).await.unwrap();
    assert!(!explicit.unlisted(), "an explicit flag overrides the default");
}

#[tokio::test]
async fn shows_are_created_empty() {
    let fx = Fixture::new().await;
    let mut body = fx.show_body("prefilled", None);
    body.episodes = Some(vec![VideoID::new()]);

    let err = fx.content.create_show(fx.owner, body).await.unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));

    // Season scaffolding without episodes is fine.
    let seasons = vec![Season {
        title: None,
        episodes: Vec::new(),
    }];
    fx.content
        .create_show(fx.owner, fx.show_body("scaffold", Some(seasons)))
        .await
        .unwrap();
}

#[tokio::test]
async fn joining_a_playlist_promotes_basic_to_serial() {
    let fx = Fixture::new().await;
    let playlist = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("mix", vec!["synth"]))
        .await
        .unwrap();
    let video = fx
        .content
        .create_video(fx.owner, fx.video_body("loner"))
        .await
        .unwrap();

    fx.content
        .add_playlist_video(
            fx.owner,
            playlist.id,
            PlaylistVideoRequest { video: video.id() },
        )
        .await
        .unwrap();

    let joined = fx.store.video(&video.id()).await.unwrap().unwrap();
    let Video::Serial(serial) = joined else {
        panic!("joining a playlist should reclassify the video as serial");
    };
    assert_eq!(serial.playlist, playlist.id);
    assert_eq!(serial.categories, vec!["synth".to_string()]);
    let playlist = fx.store.playlist(&playlist.id).await.unwrap().unwrap();
    assert_eq!(playlist.videos, vec![video.id()]);
}

#[tokio::test]
async fn sequence_links_block_playlist_membership() {
    let fx = Fixture::new().await;
    let playlist = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("mix", vec![]))
        .await
        .unwrap();
    let mut body = fx.video_body("chained");
    body.sequence = Some(SequenceLinks {
        next: Some(VideoID::new()),
        previous: None,
    });
    let video = fx.content.create_video(fx.owner, body).await.unwrap();

    let err = fx
        .content
        .add_playlist_video(
            fx.owner,
            playlist.id,
            PlaylistVideoRequest { video: video.id() },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));
    assert!(matches!(
        fx.store.video(&video.id()).await.unwrap().unwrap(),
        Video::Basic(_)
    ));
}

#[tokio::test]
async fn leaving_a_playlist_demotes_serial_to_basic() {
    let fx = Fixture::new().await;
    let playlist = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("mix", vec!["synth"]))
        .await
        .unwrap();
    let mut body = fx.video_body("track");
    body.playlist = Some(playlist.id);
    let video = fx.content.create_video(fx.owner, body).await.unwrap();

    fx.content
        .remove_playlist_video(
            fx.owner,
            playlist.id,
            PlaylistVideoRequest { video: video.id() },
        )
        .await
        .unwrap();

    let left = fx.store.video(&video.id()).await.unwrap().unwrap();
    let Video::Basic(basic) = left else {
        panic!("leaving the playlist should reclassify the video as basic");
    };
    assert!(basic.sequence.is_none());
    let playlist = fx.store.playlist(&playlist.id).await.unwrap().unwrap();
    assert!(playlist.videos.is_empty());
}

#[tokio::test]
async fn a_video_joins_at_most_one_playlist() {
    let fx = Fixture::new().await;
    let first = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("first", vec![]))
        .await
        .unwrap();
    let second = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("second", vec![]))
        .await
        .unwrap();
    let mut body = fx.video_body("claimed");
    body.playlist = Some(first.id);
    let video = fx.content.create_video(fx.owner, body).await.unwrap();

    let err = fx
        .content
        .add_playlist_video(
            fx.owner,
            second.id,
            PlaylistVideoRequest { video: video.id() },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));

    // Re-adding to its own playlist converges without complaint.
    fx.content
        .add_playlist_video(
            fx.owner,
            first.id,
            PlaylistVideoRequest { video: video.id() },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn playlist_tag_updates_flow_into_member_categories() {
    let fx = Fixture::new().await;
    let playlist = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("mix", vec!["old"]))
        .await
        .unwrap();
    let mut body = fx.video_body("member");
    body.playlist = Some(playlist.id);
    let video = fx.content.create_video(fx.owner, body).await.unwrap();

    fx.content
        .update_playlist(
            fx.owner,
            playlist.id,
            UpdatePlaylistRequest {
                tags: Some(vec!["fresh".to_string(), "new".to_string()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let Video::Serial(serial) = fx.store.video(&video.id()).await.unwrap().unwrap() else {
        panic!("member should still be serial");
    };
    assert_eq!(
        serial.categories,
        vec!["fresh".to_string(), "new".to_string()],
        "member categories should track the playlist tags"
    );
}

#[tokio::test]
async fn season_regrouping_conserves_the_episode_set() {
    let fx = Fixture::new().await;
    let seasons = vec![Season {
        title: None,
        episodes: Vec::new(),
    }];
    let show = fx
        .content
        .create_show(fx.owner, fx.show_body("seasoned", Some(seasons)))
        .await
        .unwrap();
    let mut first = fx.video_body("one");
    first.show = Some(show.id());
    let first = fx.content.create_video(fx.owner, first).await.unwrap();
    let mut second = fx.video_body("two");
    second.show = Some(show.id());
    let second = fx.content.create_video(fx.owner, second).await.unwrap();

    // Splitting the episodes across two seasons keeps the set intact.
    let regrouped = vec![
        Season {
            title: Some("One".to_string()),
            episodes: vec![first.id()],
        },
        Season {
            title: Some("Two".to_string()),
            episodes: vec![second.id()],
        },
    ];
    let updated = fx
        .content
        .update_show(
            fx.owner,
            show.id(),
            UpdateShowRequest {
                seasons: Some(regrouped),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let Show::Seasoned(seasoned) = updated else {
        panic!("regrouped show should stay seasoned");
    };
    assert_eq!(seasoned.seasons.len(), 2);

    // Dropping an episode through regrouping is refused.
    let lossy = vec![Season {
        title: None,
        episodes: vec![first.id()],
    }];
    let err = fx
        .content
        .update_show(
            fx.owner,
            show.id(),
            UpdateShowRequest {
                seasons: Some(lossy),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBody(_)));
}

#[tokio::test]
async fn promotion_rules_follow_the_variant() {
    let fx = Fixture::new().await;
    let video = fx
        .content
        .create_video(fx.owner, fx.video_body("promoted"))
        .await
        .unwrap();
    fx.content
        .promote(fx.owner, ContentID::Video(video.id()))
        .await
        .unwrap();

    let show = fx
        .content
        .create_show(fx.owner, fx.show_body("series", None))
        .await
        .unwrap();
    fx.content
        .promote(fx.owner, ContentID::Show(show.id()))
        .await
        .unwrap();
    let show = fx.store.show(&show.id()).await.unwrap().unwrap();
    assert_eq!(show.info().promotions, 1);

    let mut body = fx.video_body("pilot");
    body.show = Some(show.id());
    let episode = fx.content.create_video(fx.owner, body).await.unwrap();
    let err = fx
        .content
        .promote(fx.owner, ContentID::Video(episode.id()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotPromotable(_)));

    let playlist = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("mix", vec![]))
        .await
        .unwrap();
    let err = fx
        .content
        .promote(fx.owner, ContentID::Playlist(playlist.id))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotPromotable(_)));
}

#[tokio::test]
async fn views_count_without_an_acting_user() {
    let fx = Fixture::new().await;
    let video = fx
        .content
        .create_video(fx.owner, fx.video_body("watched"))
        .await
        .unwrap();

    assert_eq!(
        fx.content
            .record_view(ContentID::Video(video.id()))
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        fx.content
            .record_view(ContentID::Video(video.id()))
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn deleting_a_video_detaches_it_from_its_container() {
    let fx = Fixture::new().await;
    let playlist = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("mix", vec![]))
        .await
        .unwrap();
    let mut body = fx.video_body("gone");
    body.playlist = Some(playlist.id);
    let video = fx.content.create_video(fx.owner, body).await.unwrap();

    fx.content.delete_video(fx.owner, video.id()).await.unwrap();
    assert!(fx.store.video(&video.id()).await.unwrap().is_none());
    let playlist = fx.store.playlist(&playlist.id).await.unwrap().unwrap();
    assert!(
        playlist.videos.is_empty(),
        "the playlist should not keep a dangling member"
    );
}

#[tokio::test]
async fn deleting_a_show_takes_its_episodes_down() {
    let fx = Fixture::new().await;
    let show = fx
        .content
        .create_show(fx.owner, fx.show_body("series", None))
        .await
        .unwrap();
    let mut body = fx.video_body("pilot");
    body.show = Some(show.id());
    let episode = fx.content.create_video(fx.owner, body).await.unwrap();

    fx.content.delete_show(fx.owner, show.id()).await.unwrap();
    assert!(fx.store.show(&show.id()).await.unwrap().is_none());
    assert!(
        fx.store.video(&episode.id()).await.unwrap().is_none(),
        "episodes cannot outlive their show"
    );
}

#[tokio::test]
async fn deleting_a_playlist_releases_its_members() {
    let fx = Fixture::new().await;
    let playlist = fx
        .content
        .create_playlist(fx.owner, fx.playlist_body("mix", vec!["synth"]))
        .await
        .unwrap();
    let mut body = fx.video_body("survivor");
    body.playlist = Some(playlist.id);
    let video = fx.content.create_video(fx.owner, body).await.unwrap();

    fx.content
        .delete_playlist(fx.owner, playlist.id)
        .await
        .unwrap();
    assert!(fx.store.playlist(&playlist.id).await.unwrap().is_none());

    let survivor = fx.store.video(&video.id()).await.unwrap().unwrap();
    assert!(
        matches!(survivor, Video::Basic(_)),
        "members should revert to standalone when the playlist goes"
    );
}
