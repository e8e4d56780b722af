//! Controller module - modal input dispatch
//!
//! This module owns the mode state machine and the handlers that interpret
//! input while their mode is active. It is organized into submodules by
//! responsibility:
//!
//! - `handler`: The capability a mode handler implements
//! - `actions`: Normal mode key handling
//! - `command`: `:` line-command entry and execution
//! - `search`: `/` search term entry

mod handler;
mod actions;
mod command;
mod search;

pub use handler::InputHandler;
pub use actions::Actions;
pub use command::CommandEntry;
pub use search::SearchEntry;

use std::collections::BTreeMap;

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::model::Mode;
use crate::view::Screen;

const TABLE_INVARIANT: &str = "a handler is registered for every mode";

/// The modal dispatcher.
///
/// Owns the mode table and the current-mode pointer; every input event is
/// routed to the current handler and may additionally trigger a mode
/// change, decided by [`Vimpd::next_mode`].
pub struct Vimpd {
    handlers: BTreeMap<Mode, Box<dyn InputHandler>>,
    current_mode: Mode,
}

impl Vimpd {
    /// Builds the controller over a complete mode table.
    ///
    /// Panics when a mode has no handler; the table is fixed for the
    /// process lifetime and a hole in it is a programming error, not a
    /// recoverable condition.
    pub fn new(handlers: BTreeMap<Mode, Box<dyn InputHandler>>) -> Self {
        for mode in Mode::ALL {
            assert!(handlers.contains_key(&mode), "no handler registered for {:?}", mode);
        }
        Self {
            handlers,
            current_mode: Mode::Normal,
        }
    }

    pub fn current_mode(&self) -> Mode {
        self.current_mode
    }

    /// Runs the input loop until a handler asks to stop.
    pub fn run(&mut self, screen: &mut Screen) -> Result<()> {
        self.handlers
            .get_mut(&Mode::Normal)
            .expect(TABLE_INVARIANT)
            .initialise_mode();

        loop {
            let event = screen.wait_for_input()?;
            if !self.handle(event) {
                break;
            }
        }
        Ok(())
    }

    /// Dispatches one event and applies any mode change it demands.
    pub fn handle(&mut self, event: KeyEvent) -> bool {
        let handler = self
            .handlers
            .get_mut(&self.current_mode)
            .expect(TABLE_INVARIANT);

        // The event must reach the current handler before the mode changes.
        let result = handler.handle(event);

        let next = self.next_mode(event);
        if next != self.current_mode {
            let old = self.current_mode;
            self.current_mode = next;
            tracing::debug!(from = ?old, to = ?next, "mode change");
            self.handlers.get_mut(&old).expect(TABLE_INVARIANT).finalise_mode();
            self.handlers.get_mut(&next).expect(TABLE_INVARIANT).initialise_mode();
        }

        result
    }

    /// The mode the controller should be in after seeing `event`.
    fn next_mode(&self, event: KeyEvent) -> Mode {
        if self.current_mode != Mode::Normal {
            // Only a return to normal mode can interrupt a sub-mode.
            let normal = self.handlers.get(&Mode::Normal).expect(TABLE_INVARIANT);
            if normal.causes_mode_start(event) {
                Mode::Normal
            } else {
                self.current_mode
            }
        } else {
            // Handlers are consulted in ascending mode order; when several
            // claim the same event the last one visited wins.
            let mut next = Mode::Normal;
            for (mode, handler) in &self.handlers {
                if handler.causes_mode_start(event) {
                    next = *mode;
                }
            }
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Scripted {
        name: &'static str,
        starts_on: Vec<KeyCode>,
        keep_running: bool,
        log: Log,
    }

    impl Scripted {
        fn new(name: &'static str, starts_on: Vec<KeyCode>, log: &Log) -> Self {
            Self {
                name,
                starts_on,
                keep_running: true,
                log: log.clone(),
            }
        }
    }

    impl InputHandler for Scripted {
        fn handle(&mut self, _event: KeyEvent) -> bool {
            self.log.borrow_mut().push(format!("{}:handle", self.name));
            self.keep_running
        }

        fn causes_mode_start(&self, event: KeyEvent) -> bool {
            self.starts_on.contains(&event.code)
        }

        fn initialise_mode(&mut self) {
            self.log.borrow_mut().push(format!("{}:init", self.name));
        }

        fn finalise_mode(&mut self) {
            self.log.borrow_mut().push(format!("{}:fini", self.name));
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn controller(log: &Log) -> Vimpd {
        let mut handlers: BTreeMap<Mode, Box<dyn InputHandler>> = BTreeMap::new();
        handlers.insert(
            Mode::Normal,
            Box::new(Scripted::new("normal", vec![KeyCode::Esc, KeyCode::Enter], log)),
        );
        handlers.insert(
            Mode::Command,
            Box::new(Scripted::new("command", vec![KeyCode::Char(':')], log)),
        );
        handlers.insert(
            Mode::Search,
            Box::new(Scripted::new("search", vec![KeyCode::Char('/')], log)),
        );
        Vimpd::new(handlers)
    }

    #[test]
    fn colon_enters_command_mode_with_ordered_lifecycle_calls() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut vimpd = controller(&log);

        assert!(vimpd.handle(key(KeyCode::Char(':'))));

        assert_eq!(vimpd.current_mode(), Mode::Command);
        // The normal handler saw the event first, then was finalised, and
        // only then was the command handler initialised.
        assert_eq!(
            *log.borrow(),
            vec!["normal:handle", "normal:fini", "command:init"],
        );
    }

    #[test]
    fn unclaimed_events_cause_no_lifecycle_calls() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut vimpd = controller(&log);

        assert!(vimpd.handle(key(KeyCode::Char('x'))));

        assert_eq!(vimpd.current_mode(), Mode::Normal);
        assert_eq!(*log.borrow(), vec!["normal:handle"]);
    }

    #[test]
    fn escape_returns_to_normal_even_when_the_submode_claims_it() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut handlers: BTreeMap<Mode, Box<dyn InputHandler>> = BTreeMap::new();
        handlers.insert(
            Mode::Normal,
            Box::new(Scripted::new("normal", vec![KeyCode::Esc], &log)),
        );
        handlers.insert(
            Mode::Command,
            Box::new(Scripted::new(
                "command",
                vec![KeyCode::Char(':'), KeyCode::Esc],
                &log,
            )),
        );
        handlers.insert(
            Mode::Search,
            Box::new(Scripted::new("search", vec![KeyCode::Char('/')], &log)),
        );
        let mut vimpd = Vimpd::new(handlers);

        vimpd.handle(key(KeyCode::Char(':')));
        assert_eq!(vimpd.current_mode(), Mode::Command);
        log.borrow_mut().clear();

        vimpd.handle(key(KeyCode::Esc));

        assert_eq!(vimpd.current_mode(), Mode::Normal);
        assert_eq!(
            *log.borrow(),
            vec!["command:handle", "command:fini", "normal:init"],
        );
    }

    #[test]
    fn a_submode_cannot_interrupt_another_submode() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut vimpd = controller(&log);

        vimpd.handle(key(KeyCode::Char(':')));
        assert_eq!(vimpd.current_mode(), Mode::Command);
        log.borrow_mut().clear();

        // `/` starts search mode from normal, but not from command mode.
        vimpd.handle(key(KeyCode::Char('/')));

        assert_eq!(vimpd.current_mode(), Mode::Command);
        assert_eq!(*log.borrow(), vec!["command:handle"]);
    }

    #[test]
    fn the_last_handler_in_mode_order_wins_a_tie() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut handlers: BTreeMap<Mode, Box<dyn InputHandler>> = BTreeMap::new();
        handlers.insert(
            Mode::Normal,
            Box::new(Scripted::new("normal", vec![KeyCode::Esc], &log)),
        );
        handlers.insert(
            Mode::Command,
            Box::new(Scripted::new("command", vec![KeyCode::Char('!')], &log)),
        );
        handlers.insert(
            Mode::Search,
            Box::new(Scripted::new("search", vec![KeyCode::Char('!')], &log)),
        );
        let mut vimpd = Vimpd::new(handlers);

        vimpd.handle(key(KeyCode::Char('!')));

        assert_eq!(vimpd.current_mode(), Mode::Search);
    }

    #[test]
    fn the_handler_result_is_passed_through() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut handlers: BTreeMap<Mode, Box<dyn InputHandler>> = BTreeMap::new();
        let mut normal = Scripted::new("normal", vec![KeyCode::Esc], &log);
        normal.keep_running = false;
        handlers.insert(Mode::Normal, Box::new(normal));
        handlers.insert(
            Mode::Command,
            Box::new(Scripted::new("command", vec![KeyCode::Char(':')], &log)),
        );
        handlers.insert(
            Mode::Search,
            Box::new(Scripted::new("search", vec![KeyCode::Char('/')], &log)),
        );
        let mut vimpd = Vimpd::new(handlers);

        assert!(!vimpd.handle(key(KeyCode::Char('q'))));
    }

    #[test]
    #[should_panic(expected = "no handler registered")]
    fn an_incomplete_table_is_rejected() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut handlers: BTreeMap<Mode, Box<dyn InputHandler>> = BTreeMap::new();
        handlers.insert(
            Mode::Normal,
            Box::new(Scripted::new("normal", vec![KeyCode::Esc], &log)),
        );
        let _ = Vimpd::new(handlers);
    }
}
