//! Ordered song collections with add/remove observation hooks

use crate::model::song::SharedSong;

/// Mutation kinds an observer can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferEvent {
    Add,
    Remove,
}

/// Callback invoked with the affected song after a buffer mutation.
pub type BufferObserver = Box<dyn FnMut(&SharedSong)>;

/// An ordered, position-indexed collection of shared songs.
///
/// Positions are stable indices used by callers; out-of-range access is
/// always a no-op or `None`, never a panic. Observers registered for an
/// event kind run synchronously, in registration order, after the
/// structural change has happened (so remove observers see the shrunk
/// buffer).
#[derive(Default)]
pub struct SongBuffer {
    songs: Vec<SharedSong>,
    on_add: Vec<BufferObserver>,
    on_remove: Vec<BufferObserver>,
}

impl SongBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_songs(songs: Vec<SharedSong>) -> Self {
        Self {
            songs,
            on_add: Vec::new(),
            on_remove: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, at: usize) -> Option<&SharedSong> {
        self.songs.get(at)
    }

    /// Appends a song, then notifies add observers.
    pub fn add(&mut self, song: SharedSong) {
        self.songs.push(song.clone());
        for observer in &mut self.on_add {
            observer(&song);
        }
    }

    /// Removes the song at `at`, then notifies remove observers.
    ///
    /// Out-of-range positions are ignored.
    pub fn remove(&mut self, at: usize) -> Option<SharedSong> {
        if at >= self.songs.len() {
            return None;
        }
        let removed = self.songs.remove(at);
        for observer in &mut self.on_remove {
            observer(&removed);
        }
        Some(removed)
    }

    /// Removes every song, notifying remove observers for each, last first.
    pub fn clear(&mut self) {
        while !self.songs.is_empty() {
            self.remove(self.songs.len() - 1);
        }
    }

    pub fn register_observer(&mut self, event: BufferEvent, observer: BufferObserver) {
        match event {
            BufferEvent::Add => self.on_add.push(observer),
            BufferEvent::Remove => self.on_remove.push(observer),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedSong> {
        self.songs.iter()
    }
}
