//! `:` line-command entry and execution

use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent};

use super::InputHandler;
use crate::model::{AppModel, EntryLine, MpdClient, MpdCommand};

/// Collects a command line while command mode is active and executes it on
/// Enter. `execute` is also the entry point for rc-file startup commands,
/// which run through a typed handle before this handler joins the mode
/// table.
pub struct CommandEntry {
    model: Arc<Mutex<AppModel>>,
    client: MpdClient,
}

impl CommandEntry {
    pub fn new(model: Arc<Mutex<AppModel>>, client: MpdClient) -> Self {
        Self { model, client }
    }

    /// Executes one command line. Returns false when the command asks the
    /// program to stop.
    ///
    /// Positions are zero-based, matching the protocol.
    pub fn execute(&self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return true;
        };
        let argument = parts.next();

        match command {
            "q" | "quit" => return false,
            "play" => {
                let position = argument.and_then(|a| a.parse().ok());
                self.client.send(MpdCommand::Play(position));
            }
            "pause" => self.client.send(MpdCommand::Pause),
            "stop" => self.client.send(MpdCommand::Stop),
            "next" => self.client.send(MpdCommand::Next),
            "prev" | "previous" => self.client.send(MpdCommand::Previous),
            "clear" => self.model.lock().unwrap().clear_queue(&self.client),
            "add" => {
                let mut model = self.model.lock().unwrap();
                match argument.and_then(|a| a.parse().ok()) {
                    Some(position) => model.add_position_to_queue(&self.client, position),
                    None => model.status = Some("add: position required".to_string()),
                }
            }
            _ => {
                let mut model = self.model.lock().unwrap();
                model.status = Some(format!("unknown command: {}", command));
            }
        }
        true
    }
}

impl InputHandler for CommandEntry {
    fn handle(&mut self, event: KeyEvent) -> bool {
        match event.code {
            KeyCode::Char(c) => self.model.lock().unwrap().entry_text.push(c),
            KeyCode::Backspace => {
                self.model.lock().unwrap().entry_text.pop();
            }
            KeyCode::Enter => {
                let line = self.model.lock().unwrap().entry_text.clone();
                return self.execute(&line);
            }
            _ => {}
        }
        true
    }

    fn causes_mode_start(&self, event: KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char(':'))
    }

    fn initialise_mode(&mut self) {
        let mut model = self.model.lock().unwrap();
        model.entry = Some(EntryLine::Command);
        model.entry_text.clear();
    }

    fn finalise_mode(&mut self) {
        let mut model = self.model.lock().unwrap();
        model.entry = None;
        model.entry_text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Song;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (CommandEntry, Arc<Mutex<AppModel>>, UnboundedReceiver<MpdCommand>) {
        let model = Arc::new(Mutex::new(AppModel::new(vec![
            Arc::new(Song::new("music/a.flac")),
            Arc::new(Song::new("music/b.flac")),
        ])));
        let (client, rx) = MpdClient::pair();
        (CommandEntry::new(model.clone(), client), model, rx)
    }

    #[test]
    fn quit_asks_the_loop_to_stop() {
        let (command, _model, _rx) = setup();
        assert!(!command.execute("quit"));
        assert!(!command.execute("q"));
        assert!(command.execute(""));
    }

    #[test]
    fn playback_commands_reach_the_client() {
        let (command, _model, mut rx) = setup();
        assert!(command.execute("play 1"));
        assert!(command.execute("play"));
        assert!(command.execute("pause"));

        assert_eq!(rx.try_recv().unwrap(), MpdCommand::Play(Some(1)));
        assert_eq!(rx.try_recv().unwrap(), MpdCommand::Play(None));
        assert_eq!(rx.try_recv().unwrap(), MpdCommand::Pause);
    }

    #[test]
    fn add_queues_a_browse_position() {
        let (command, model, mut rx) = setup();
        assert!(command.execute("add 1"));

        assert_eq!(model.lock().unwrap().queue.len(), 1);
        assert_eq!(
            rx.try_recv().unwrap(),
            MpdCommand::Add("music/b.flac".to_string()),
        );

        // Out of range falls through silently.
        assert!(command.execute("add 9"));
        assert_eq!(model.lock().unwrap().queue.len(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unknown_commands_only_set_the_status_line() {
        let (command, model, mut rx) = setup();
        assert!(command.execute("frobnicate"));

        let status = model.lock().unwrap().status.clone();
        assert_eq!(status.as_deref(), Some("unknown command: frobnicate"));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn the_entry_line_is_collected_and_executed_on_enter() {
        let (mut command, model, mut rx) = setup();
        command.initialise_mode();

        for c in "stopx".chars() {
            command.handle(key(KeyCode::Char(c)));
        }
        command.handle(key(KeyCode::Backspace));
        assert_eq!(model.lock().unwrap().entry_text, "stop");

        assert!(command.handle(key(KeyCode::Enter)));
        assert_eq!(rx.try_recv().unwrap(), MpdCommand::Stop);

        command.finalise_mode();
        let model = model.lock().unwrap();
        assert!(model.entry.is_none());
        assert!(model.entry_text.is_empty());
    }
}
