//! # Gazette
//!
//! A terminal reader for the Hacker News front page.
//!
//! ## Architecture
//!
//! ```text
//! Feed client → App state machine → Viewer
//!                  ↑        ↓
//!        events (mpsc)   commands (tokio tasks)
//! ```
//!
//! - [`fetcher`]: HTTP fetching and the feed client
//! - [`converter`]: HTML to styled display text
//! - [`tui`]: State machine, widgets and the event loop
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: TOML configuration
//! - [`domain`]: The feed [`Entry`](domain::Entry)

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the feed
/// client, content fetcher and text converter.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/gazette/config.toml`, supporting:
/// - Custom colors (named, hex or palette index)
/// - Feed endpoint, entry limit and timeout
/// - Article wrap width
pub mod config;

/// Converts fetched markup into themed lines for the viewer.
pub mod converter;

/// Core domain models.
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for retrieving raw bodies
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`FeedClient`](fetcher::feed::FeedClient): Index and item lookups
pub mod fetcher;

/// Terminal user interface.
///
/// Loading screen, story list and article viewer, driven by
/// [`App::update`](tui::app::App::update).
///
/// Keybindings: j/k navigate, / filters, Enter reads, o opens in browser,
/// q goes back or quits.
pub mod tui;
