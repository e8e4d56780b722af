//! Normal mode key handling

use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent};

use super::InputHandler;
use crate::model::{AppModel, MpdClient, MpdCommand, Pane};

/// The normal-mode handler: navigation, queue edits, and playback keys.
pub struct Actions {
    model: Arc<Mutex<AppModel>>,
    client: MpdClient,
}

impl Actions {
    pub fn new(model: Arc<Mutex<AppModel>>, client: MpdClient) -> Self {
        Self { model, client }
    }
}

impl InputHandler for Actions {
    fn handle(&mut self, event: KeyEvent) -> bool {
        let mut model = self.model.lock().unwrap();

        match event.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('j') | KeyCode::Down => model.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => model.move_selection_up(),
            KeyCode::Tab => model.toggle_focus(),
            KeyCode::Enter => match model.focus {
                Pane::Browse => model.add_selected_to_queue(&self.client),
                Pane::Queue => model.play_queue_selection(&self.client),
            },
            KeyCode::Char('a') => {
                if model.focus == Pane::Browse {
                    model.add_selected_to_queue(&self.client);
                }
            }
            KeyCode::Char('d') => {
                if model.focus == Pane::Queue {
                    model.remove_queue_selection(&self.client);
                }
            }
            KeyCode::Char('p') => self.client.send(MpdCommand::Pause),
            KeyCode::Char('s') => self.client.send(MpdCommand::Stop),
            KeyCode::Char('>') => self.client.send(MpdCommand::Next),
            KeyCode::Char('<') => self.client.send(MpdCommand::Previous),
            KeyCode::Char('n') => model.repeat_search(),
            KeyCode::Esc => model.status = None,
            _ => {}
        }
        true
    }

    fn causes_mode_start(&self, event: KeyEvent) -> bool {
        // Committing or abandoning a sub-mode both land back in normal mode.
        matches!(event.code, KeyCode::Esc | KeyCode::Enter)
    }

    fn initialise_mode(&mut self) {}

    fn finalise_mode(&mut self) {}
}
