//! Song metadata

use std::sync::Arc;

/// One playable unit as reported by the daemon's database.
///
/// Songs are shared between the browse listing and the queue, so they are
/// always handled through [`Arc<Song>`]; the `uri` is the identity the
/// protocol understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Song {
    pub uri: String,
    pub artist: String,
    pub title: String,
    pub album: String,
    pub duration_secs: u32,
}

impl Song {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            artist: String::new(),
            title: String::new(),
            album: String::new(),
            duration_secs: 0,
        }
    }

    /// Display label for the list panes, falling back to the uri when the
    /// daemon had no tags for the file.
    pub fn display(&self) -> String {
        if self.artist.is_empty() && self.title.is_empty() {
            self.uri.clone()
        } else if self.artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.artist, self.title)
        }
    }

    pub fn duration_display(&self) -> String {
        format!("{}:{:02}", self.duration_secs / 60, self.duration_secs % 60)
    }

    /// True when the query matches any tag or the uri, case-insensitively.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.uri.to_lowercase().contains(&query)
            || self.artist.to_lowercase().contains(&query)
            || self.title.to_lowercase().contains(&query)
            || self.album.to_lowercase().contains(&query)
    }
}

/// Shared handle used everywhere a song can live in more than one collection.
pub type SharedSong = Arc<Song>;
