//! # Videx Core
//!
//! Core library for the Videx platform, providing the content graph
//! operations, browsable projections, and the cursor listing engine on top
//! of the data model in `videx-model`.
//!
//! ## Overview
//!
//! `videx-core` is where the platform's behavior lives:
//!
//! - **Account Lifecycle**: User registration and channel founding, with
//!   handle and email uniqueness enforced as a single namespace
//! - **Role Management**: Invite/accept flows for the five channel roles,
//!   with cross-document writes converged by compensation
//! - **Content Lifecycle**: Upload-time variant classification of videos,
//!   show and playlist membership moves, view and promotion counters
//! - **Browsable Projection**: One-level reference expansion with
//!   context-dependent credit visibility
//! - **Cursor Listings**: Deterministic pagination with swappable
//!   fill strategies for underfilled pages
//! - **Storage Ports**: Trait-based store interface with a concurrent
//!   in-memory reference backend
//!
//! ## Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`api_types`]: Request bodies, query shapes, and the response envelope
//! - [`browse`]: Browsable forms and the reference expander
//! - [`config`]: Layered configuration loading (defaults, TOML file, env)
//! - [`error`]: The error taxonomy and its wire mapping
//! - [`listing`]: Cursors, pages, fill strategies, and the pagination engine
//! - [`rbac`]: Role-based permission resolution
//! - [`services`]: The operation surface consumed by transport layers
//! - [`store`]: Storage ports and the in-memory backend
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use videx_core::api_types::{CreateUserRequest, ListingQuery};
//! use videx_core::services::{ListingService, UserService};
//! use videx_core::store::MemoryStore;
//!
//! async fn bootstrap() -> Result<(), videx_core::Error> {
//!     let store = Arc::new(MemoryStore::new());
//!     let users = UserService::new(store.clone());
//!     let listings = ListingService::new(store.clone(), store.clone());
//!
//!     let alice = users
//!         .register(CreateUserRequest {
//!             handle: "alice".to_string(),
//!             display_name: "Alice".to_string(),
//!             email: "alice@example.com".to_string(),
//!             avatar: None,
//!         })
//!         .await?;
//!     println!("registered {}", alice.public.handle);
//!
//!     let page = listings.videos(&ListingQuery::default(), None).await?;
//!     println!("{} videos listed", page.content.len());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

/// Request, query, and response shapes shared with transport layers
pub mod api_types;

/// Browsable projections: reference expansion and context-aware forms
pub mod browse;

/// Configuration loading and listing behaviour knobs
pub mod config;

/// Error taxonomy and wire mapping
pub mod error;

/// Cursor listing engine
pub mod listing;

/// Role-based permission resolution
pub mod rbac;

/// Operation surface over the content graph
pub mod services;

/// Storage ports and the in-memory backend
pub mod store;

pub use config::{ConfigLoader, ListingConfig, VidexConfig};
pub use error::{Error, Result};
pub use listing::{Cursor, Page};
pub use services::{
    BrowseService, ChannelService, ContentService, ListingService, UserService,
};
