//! `/` search term entry

use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent};

use super::InputHandler;
use crate::model::{AppModel, EntryLine};

/// Collects a search term while search mode is active; Enter runs the
/// search from the current browse selection and records the term for `n`.
pub struct SearchEntry {
    model: Arc<Mutex<AppModel>>,
}

impl SearchEntry {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }
}

impl InputHandler for SearchEntry {
    fn handle(&mut self, event: KeyEvent) -> bool {
        let mut model = self.model.lock().unwrap();
        match event.code {
            KeyCode::Char(c) => model.entry_text.push(c),
            KeyCode::Backspace => {
                model.entry_text.pop();
            }
            KeyCode::Enter => {
                let query = model.entry_text.clone();
                if !query.is_empty() {
                    model.run_search(&query);
                }
            }
            _ => {}
        }
        true
    }

    fn causes_mode_start(&self, event: KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('/'))
    }

    fn initialise_mode(&mut self) {
        let mut model = self.model.lock().unwrap();
        model.entry = Some(EntryLine::Search);
        model.entry_text.clear();
    }

    fn finalise_mode(&mut self) {
        let mut model = self.model.lock().unwrap();
        model.entry = None;
        model.entry_text.clear();
    }
}
