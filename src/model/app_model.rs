//! Application state shared by the mode handlers and the screen

use crate::model::browse::BrowseBuffer;
use crate::model::buffer::{BufferEvent, SongBuffer};
use crate::model::mpd_client::{MpdClient, MpdCommand};
use crate::model::song::SharedSong;
use crate::model::types::{EntryLine, Pane};

/// Everything the handlers mutate and the screen draws.
///
/// All access happens on the dispatch thread; the buffers themselves are
/// not synchronized.
pub struct AppModel {
    pub browse: BrowseBuffer,
    pub queue: SongBuffer,
    pub focus: Pane,
    pub browse_selected: usize,
    pub queue_selected: usize,
    /// Set while a sub-mode is collecting a line; drawn with its prefix.
    pub entry: Option<EntryLine>,
    pub entry_text: String,
    pub last_search: Option<String>,
    pub status: Option<String>,
}

impl AppModel {
    pub fn new(library: Vec<SharedSong>) -> Self {
        let mut queue = SongBuffer::new();
        queue.register_observer(
            BufferEvent::Add,
            Box::new(|song| tracing::debug!(uri = %song.uri, "queued")),
        );
        queue.register_observer(
            BufferEvent::Remove,
            Box::new(|song| tracing::debug!(uri = %song.uri, "dequeued")),
        );

        Self {
            browse: BrowseBuffer::new(library),
            queue,
            focus: Pane::Browse,
            browse_selected: 0,
            queue_selected: 0,
            entry: None,
            entry_text: String::new(),
            last_search: None,
            status: None,
        }
    }

    fn focused_len(&self) -> usize {
        match self.focus {
            Pane::Browse => self.browse.len(),
            Pane::Queue => self.queue.len(),
        }
    }

    fn focused_selected_mut(&mut self) -> &mut usize {
        match self.focus {
            Pane::Browse => &mut self.browse_selected,
            Pane::Queue => &mut self.queue_selected,
        }
    }

    pub fn move_selection_up(&mut self) {
        let selected = self.focused_selected_mut();
        *selected = selected.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let len = self.focused_len();
        let selected = self.focused_selected_mut();
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.other();
    }

    /// Copies the selected browse entry into the queue, locally and on the
    /// daemon.
    pub fn add_selected_to_queue(&mut self, client: &MpdClient) {
        self.browse
            .add_to_queue(client, &mut self.queue, self.browse_selected);
    }

    /// Adds the browse entry at `position` to the queue (`:add` command).
    pub fn add_position_to_queue(&mut self, client: &MpdClient, position: usize) {
        self.browse.add_to_queue(client, &mut self.queue, position);
    }

    /// Starts playback at the selected queue position.
    pub fn play_queue_selection(&self, client: &MpdClient) {
        if self.queue_selected < self.queue.len() {
            client.send(MpdCommand::Play(Some(self.queue_selected)));
        }
    }

    /// Drops the selected queue entry from the mirror and the daemon.
    pub fn remove_queue_selection(&mut self, client: &MpdClient) {
        let position = self.queue_selected;
        if self.queue.remove(position).is_some() {
            client.send(MpdCommand::Delete(position));
            self.queue_selected = position.min(self.queue.len().saturating_sub(1));
        }
    }

    pub fn clear_queue(&mut self, client: &MpdClient) {
        self.queue.clear();
        self.queue_selected = 0;
        client.send(MpdCommand::Clear);
    }

    /// Runs a search over the browse listing, starting after the current
    /// selection, and remembers the query for `n`.
    pub fn run_search(&mut self, query: &str) {
        self.last_search = Some(query.to_string());
        match self.browse.search_from(self.browse_selected + 1, query) {
            Some(at) => {
                self.browse_selected = at;
                self.focus = Pane::Browse;
                self.status = None;
            }
            None => {
                self.status = Some(format!("pattern not found: {}", query));
            }
        }
    }

    pub fn repeat_search(&mut self) {
        if let Some(query) = self.last_search.clone() {
            self.run_search(&query);
        }
    }
}
