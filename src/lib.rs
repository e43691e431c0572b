//! Playlist Manager - desktop client for the playlist service
//!
//! Mirrors the server's track catalog and liked-track collection into
//! on-screen lists and issues the removal / playlist-creation requests.

pub mod api;
pub mod artist;
pub mod track;

pub use api::{Api, ApiError};
pub use artist::PendingArtists;
pub use track::Track;
