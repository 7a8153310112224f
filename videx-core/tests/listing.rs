//! Cursor listings end to end: cyclic padding, page chaining, visibility
//! gates, channel scoping, and limit clamping.

use std::sync::Arc;

use chrono::{Duration, Utc};
use videx_core::api_types::{
    CreateChannelRequest, CreateShowRequest, CreateUserRequest, CreateVideoRequest, ListingQuery,
};
use videx_core::config::{FillMode, ListingConfig};
use videx_core::services::{ChannelService, ContentService, ListingService, UserService};
use videx_core::store::MemoryStore;
use videx_core::Error;
use videx_model::{ChannelID, MediaHandle, MediaKind, UserID, VideoID};

struct Fixture {
    store: Arc<MemoryStore>,
    content: ContentService,
    owner: UserID,
    channel: ChannelID,
}

impl Fixture {
    async fn new() -> Self {
        // `RUST_LOG=videx_core=debug cargo test` surfaces the engine's logs.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

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

    fn listings(&self) -> ListingService {
        ListingService::new(self.store.clone(), self.store.clone())
    }

    fn listings_with(&self, config: ListingConfig) -> ListingService {
        self.listings().with_config(config)
    }

    async fn upload(&self, title: &str) -> VideoID {
        self.upload_to(self.channel, title, |_| {}).await
    }

    async fn upload_to(
        &self,
        channel: ChannelID,
        title: &str,
        tweak: impl FnOnce(&mut CreateVideoRequest),
    ) -> VideoID {
        let mut body = CreateVideoRequest {
            title: title.to_string(),
            description: String::new(),
            channel,
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
        };
        tweak(&mut body);
        self.content
            .create_video(self.owner, body)
            .await
            .unwrap()
            .id()
    }
}

fn query(cursor: Option<String>, limit: Option<usize>) -> ListingQuery {
    ListingQuery { cursor, limit }
}

fn short_fill() -> ListingConfig {
    ListingConfig {
        fill: FillMode::Short,
        ..ListingConfig::default()
    }
}

#[tokio::test]
async fn a_short_listing_pads_cyclically_to_the_limit() {
    let fx = Fixture::new().await;
    let v1 = fx.upload("one").await;
    let v2 = fx.upload("two").await;
    let v3 = fx.upload("three").await;

    let page = fx
        .listings()
        .videos(&query(None, Some(5)), None)
        .await
        .unwrap();

    let ids: Vec<VideoID> = page.content.iter().map(|v| v.id).collect();
    assert_eq!(
        ids,
        vec![v1, v2, v3, v1, v2],
        "an underfilled page repeats its window cyclically"
    );
    assert!(
        page.cursor.is_beginning(),
        "a padded page is still the end of the listing"
    );
    assert_eq!(page.limit, 5);
}

#[tokio::test]
async fn pages_chain_through_the_returned_cursor() {
    let fx = Fixture::new().await;
    let mut uploaded = Vec::new();
    for title in ["a", "b", "c", "d", "e"] {
        uploaded.push(fx.upload(title).await);
    }
    let listings = fx.listings();

    let first = listings.videos(&query(None, Some(2)), None).await.unwrap();
    let ids: Vec<VideoID> = first.content.iter().map(|v| v.id).collect();
    assert_eq!(ids, uploaded[..2]);
    assert!(!first.cursor.is_beginning());

    let second = listings
        .videos(&query(Some(first.cursor.encode()), Some(2)), None)
        .await
        .unwrap();
    let ids: Vec<VideoID> = second.content.iter().map(|v| v.id).collect();
    assert_eq!(ids, uploaded[2..4]);

    let third = listings
        .videos(&query(Some(second.cursor.encode()), Some(2)), None)
        .await
        .unwrap();
    let ids: Vec<VideoID> = third.content.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![uploaded[4], uploaded[4]]);
    assert!(third.cursor.is_beginning());
}

#[tokio::test]
async fn resuming_an_exhausted_listing_restarts_identically() {
    let fx = Fixture::new().await;
    fx.upload("solo").await;
    let listings = fx.listings();

    let page = listings.videos(&query(None, Some(3)), None).await.unwrap();
    assert!(page.cursor.is_beginning());

    let again = listings
        .videos(&query(Some(page.cursor.encode()), Some(3)), None)
        .await
        .unwrap();
    let first: Vec<VideoID> = page.content.iter().map(|v| v.id).collect();
    let repeat: Vec<VideoID> = again.content.iter().map(|v| v.id).collect();
    assert_eq!(repeat, first);
    assert!(again.cursor.is_beginning());
}

#[tokio::test]
async fn hidden_content_never_lists() {
    let fx = Fixture::new().await;
    let visible = fx.upload("visible").await;
    fx.upload_to(fx.channel, "secret", |body| body.unlisted = Some(true))
        .await;
    fx.upload_to(fx.channel, "scheduled", |body| {
        body.release_date = Some(Utc::now() + Duration::days(7));
    })
    .await;
    let show = fx
        .content
        .create_show(
            fx.owner,
            CreateShowRequest {
                title: "series".to_string(),
                description: String::new(),
                channel: fx.channel,
                thumbnail: None,
                tags: Vec::new(),
                explicit: false,
                unlisted: false,
                seasons: None,
                episodes: None,
            },
        )
        .await
        .unwrap();
    fx.upload_to(fx.channel, "pilot", |body| body.show = Some(show.id()))
        .await;

    let page = fx
        .listings_with(short_fill())
        .videos(&ListingQuery::default(), None)
        .await
        .unwrap();

    let ids: Vec<VideoID> = page.content.iter().map(|v| v.id).collect();
    assert_eq!(
        ids,
        vec![visible],
        "unlisted, scheduled, and episodic videos stay out of listings"
    );

    // The show itself lists; its episodes surface only through it.
    let shows = fx
        .listings_with(short_fill())
        .shows(&ListingQuery::default(), None)
        .await
        .unwrap();
    assert_eq!(shows.content.len(), 1);
    assert_eq!(shows.content[0].id, show.id());
}

#[tokio::test]
async fn scoping_to_a_channel_narrows_the_listing() {
    let fx = Fixture::new().await;
    let channels = ChannelService::new(fx.store.clone());
    let second = channels
        .create(
            fx.owner,
            CreateChannelRequest {
                handle: "annex".to_string(),
                display_name: "Annex".to_string(),
                avatar: None,
            },
        )
        .await
        .unwrap()
        .id;

    let home = fx.upload("home").await;
    let away = fx.upload_to(second, "away", |_| {}).await;

    let listings = fx.listings_with(short_fill());
    let scoped = listings
        .videos(&ListingQuery::default(), Some(second))
        .await
        .unwrap();
    let ids: Vec<VideoID> = scoped.content.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![away]);

    let global = listings
        .videos(&ListingQuery::default(), None)
        .await
        .unwrap();
    let ids: Vec<VideoID> = global.content.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![home, away]);
}

#[tokio::test]
async fn an_unparseable_cursor_is_rejected() {
    let fx = Fixture::new().await;
    fx.upload("any").await;

    let err = fx
        .listings()
        .videos(&query(Some("not-a-cursor".to_string()), None), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidCursor(_)));
}

#[tokio::test]
async fn limits_clamp_to_the_configured_bounds() {
    let fx = Fixture::new().await;
    fx.upload("one").await;
    fx.upload("two").await;
    let listings = fx.listings_with(ListingConfig {
        default_limit: 4,
        max_limit: 6,
        fill: FillMode::Cycle,
    });

    let defaulted = listings.videos(&query(None, None), None).await.unwrap();
    assert_eq!(defaulted.limit, 4);
    assert_eq!(defaulted.content.len(), 4);

    let oversized = listings.videos(&query(None, Some(50)), None).await.unwrap();
    assert_eq!(oversized.limit, 6, "requests cannot exceed the ceiling");

    let undersized = listings.videos(&query(None, Some(0)), None).await.unwrap();
    assert_eq!(undersized.limit, 1, "a zero limit is raised to one entity");
    assert_eq!(undersized.content.len(), 1);
}

#[tokio::test]
async fn channels_list_without_visibility_gates() {
    let fx = Fixture::new().await;
    let channels = ChannelService::new(fx.store.clone());
    let second = channels
        .create(
            fx.owner,
            CreateChannelRequest {
                handle: "annex".to_string(),
                display_name: "Annex".to_string(),
                avatar: None,
            },
        )
        .await
        .unwrap()
        .id;

    let page = fx
        .listings_with(short_fill())
        .channels(&ListingQuery::default())
        .await
        .unwrap();

    let ids: Vec<ChannelID> = page.content.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![fx.channel, second]);
    assert_eq!(page.content[0].handle.as_str(), "workshop");
}
