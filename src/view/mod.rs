//! View module - UI rendering and input waiting
//!
//! Two song panes side by side (library browse on the left, queue on the
//! right) over a one-line status bar that doubles as the command/search
//! entry line. The screen also owns the blocking wait for the next key
//! press, redrawing while it waits.

use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::model::{AppModel, EntryLine, Pane, SharedSong};

pub struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    model: Arc<Mutex<AppModel>>,
}

impl Screen {
    /// Puts the terminal into raw mode on the alternate screen.
    pub fn new(model: Arc<Mutex<AppModel>>) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal, model })
    }

    /// Hands the terminal back to the shell.
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Redraws and blocks until the next key press event.
    pub fn wait_for_input(&mut self) -> Result<KeyEvent> {
        loop {
            {
                let model = self.model.lock().unwrap();
                self.terminal.draw(|frame| render(frame, &model))?;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        return Ok(key);
                    }
                }
            }
        }
    }
}

fn render(frame: &mut Frame, model: &AppModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Song panes
            Constraint::Length(1), // Status / entry line
        ])
        .split(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    render_song_list(
        frame,
        panes[0],
        " Library ",
        model.browse.iter(),
        model.browse_selected,
        model.focus == Pane::Browse,
    );
    render_song_list(
        frame,
        panes[1],
        " Queue ",
        model.queue.iter(),
        model.queue_selected,
        model.focus == Pane::Queue,
    );

    render_status_line(frame, chunks[1], model);
}

fn render_song_list<'a>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    songs: impl Iterator<Item = &'a SharedSong>,
    selected: usize,
    focused: bool,
) {
    let items: Vec<ListItem> = songs
        .map(|song| ListItem::new(format!("{}  [{}]", song.display(), song.duration_display())))
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .highlight_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_line(frame: &mut Frame, area: Rect, model: &AppModel) {
    let text = match model.entry {
        Some(EntryLine::Command) => format!(":{}", model.entry_text),
        Some(EntryLine::Search) => format!("/{}", model.entry_text),
        None => match &model.status {
            Some(status) => status.clone(),
            None => format!(
                "{} songs in library, {} queued",
                model.browse.len(),
                model.queue.len(),
            ),
        },
    };

    frame.render_widget(Paragraph::new(text), area);
}
