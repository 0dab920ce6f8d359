//! # profilehub-sources
//!
//! HTTP fetchers for the two tracked identity providers:
//!
//! - **social**: profile, avatar thumbnail and relationship counts from a
//!   Roblox-shaped public API
//! - **presence**: user record from a Discord-shaped REST API, plus live
//!   status from a presence-sharing service
//!
//! Both fetchers convert every failure into documented defaults; nothing
//! they return is an error.

pub mod client;
pub mod dto;
pub mod presence;
pub mod social;

pub use client::build_http_client;
pub use presence::PresenceFetcher;
pub use social::SocialFetcher;
