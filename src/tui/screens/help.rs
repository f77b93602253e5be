//! Help screen: keybindings and field notes for the swarm form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Row, Table};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

/// A titled group of `(key, meaning)` rows.
struct Section {
    title: &'static str,
    rows: &'static [(&'static str, &'static str)],
}

const FORM_KEYS: Section = Section {
    title: "Keys",
    rows: &[
        ("Tab / Shift-Tab", "next / previous field"),
        ("Left / Right", "choose option, move in class list"),
        ("Space", "toggle class or checkbox"),
        ("Enter", "start swarm"),
        ("Esc / Ctrl-C", "quit"),
        ("F1", "this help"),
    ],
};

const FORM_FIELDS: Section = Section {
    title: "Fields",
    rows: &[
        ("Run time", "20, 20s, 3m, 2h, 1h20m, 3h30m10s"),
        ("-", "set by the shape class"),
        ("*", "required parameter"),
    ],
};

/// State for the help screen: remembers which screen to return to.
#[derive(Debug, Clone)]
pub struct HelpState {
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    pub fn new() -> Self {
        Self {
            origin: Screen::SwarmForm,
        }
    }

    /// Screen that opened help.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    pub fn set_origin(&mut self, screen: Screen) {
        self.origin = screen;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

static FORM_SECTIONS: &[Section] = &[FORM_KEYS, FORM_FIELDS];

fn sections_for(origin: Screen) -> &'static [Section] {
    match origin {
        Screen::SwarmForm | Screen::Help => FORM_SECTIONS,
    }
}

fn table_rows(sections: &[Section]) -> Vec<Row<'static>> {
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut rows = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            rows.push(Row::new(["", ""]));
        }
        rows.push(Row::new([section.title, ""]).style(heading));
        rows.extend(section.rows.iter().map(|&(key, meaning)| {
            Row::new([key, meaning]).style(Style::default().fg(Color::Gray))
        }));
    }
    rows
}

/// Renders the help table for the origin screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" Help: {} ", state.origin().label()))
        .title_bottom(" Esc/q: back ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let table = Table::new(
        table_rows(sections_for(state.origin())),
        [Constraint::Length(18), Constraint::Min(0)],
    )
    .block(block);
    frame.render_widget(table, area);
}
