//! Model module - Application state and data types
//!
//! This module contains the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (modes, panes)
//! - `song`: Song metadata and the shared-song handle
//! - `buffer`: Ordered song collections with observation hooks
//! - `browse`: The library browse listing
//! - `mpd_client`: MPD protocol client
//! - `app_model`: Main application model shared by handlers and the screen

mod types;
mod song;
mod buffer;
mod browse;
mod mpd_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{EntryLine, Mode, Pane};

pub use song::{SharedSong, Song};

pub use buffer::{BufferEvent, BufferObserver, SongBuffer};

pub use browse::BrowseBuffer;

pub use mpd_client::{MpdClient, MpdCommand};

pub use app_model::AppModel;
