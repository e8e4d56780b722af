//! Library browse listing

use crate::model::buffer::SongBuffer;
use crate::model::mpd_client::{MpdClient, MpdCommand};
use crate::model::song::SharedSong;

/// The browsable library view.
///
/// Entries are shared handles, so a song added to the queue stays the same
/// allocation in both collections; dropping it from one never invalidates
/// the other.
pub struct BrowseBuffer {
    songs: SongBuffer,
}

impl BrowseBuffer {
    pub fn new(library: Vec<SharedSong>) -> Self {
        Self {
            songs: SongBuffer::from_songs(library),
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn get(&self, at: usize) -> Option<&SharedSong> {
        self.songs.get(at)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedSong> {
        self.songs.iter()
    }

    /// Copies the song at `position` into the queue and asks the daemon to
    /// enqueue it.
    ///
    /// Out-of-range positions are a silent no-op. The local queue mirror is
    /// updated unconditionally once the position resolves; the remote
    /// request is fire-and-forget and is not rolled back if the daemon
    /// rejects it.
    pub fn add_to_queue(&self, client: &MpdClient, queue: &mut SongBuffer, position: usize) {
        if let Some(song) = self.songs.get(position) {
            queue.add(song.clone());
            client.send(MpdCommand::Add(song.uri.clone()));
        }
    }

    /// Finds the next song matching `query`, scanning forward from `start`
    /// and wrapping around. Matching is a case-insensitive substring test
    /// over uri and tags.
    pub fn search_from(&self, start: usize, query: &str) -> Option<usize> {
        if self.songs.is_empty() || query.is_empty() {
            return None;
        }
        let len = self.songs.len();
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&at| self.songs.get(at).is_some_and(|song| song.matches(query)))
    }
}
