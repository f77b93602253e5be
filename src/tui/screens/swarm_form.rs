//! Start form: collects test parameters and submits a new swarm.

use std::ops::Range;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{SubmissionPayload, SwarmFormModel};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::form::{Form, ROW_HEIGHT, draw_form_rows};

/// Field index ranges for each section of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Sections {
    pickers: Range<usize>,
    core: Range<usize>,
    advanced: Range<usize>,
    custom: Range<usize>,
}

impl Sections {
    fn of(model: &SwarmFormModel) -> Self {
        let pickers = if model.class_pickers.is_some() { 0..2 } else { 0..0 };
        let core = pickers.end..pickers.end + 3;
        let advanced = core.end..core.end + 1;
        let custom = advanced.end..advanced.end + model.custom_parameters.len();
        Self {
            pickers,
            core,
            advanced,
            custom,
        }
    }
}

/// State for the start form screen.
#[derive(Debug, Clone)]
pub struct SwarmFormState {
    form: Form,
    sections: Sections,
    general_error: Option<String>,
}

impl SwarmFormState {
    /// Builds the form from a resolved view-model.
    pub fn new(model: SwarmFormModel) -> Self {
        let sections = Sections::of(&model);
        Self {
            form: Form::new(model.into_fields()),
            sections,
            general_error: None,
        }
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns `true` if the class pickers are part of the form.
    pub fn has_class_pickers(&self) -> bool {
        !self.sections.pickers.is_empty()
    }

    /// Returns `true` if the custom parameters section is part of the form.
    pub fn has_custom_parameters(&self) -> bool {
        !self.sections.custom.is_empty()
    }

    /// Sets a message not tied to any specific field.
    pub fn set_error(&mut self, msg: String) {
        self.general_error = Some(msg);
    }

    /// Returns the general error message, if any.
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Checks required fields and packages the form into a payload.
    fn submit(&mut self) -> Action {
        self.form.clear_errors();
        self.general_error = None;

        let missing: Vec<usize> = self
            .form
            .resolved()
            .enumerate()
            .filter(|(_, f)| f.required && !f.disabled && f.input.is_empty())
            .map(|(i, _)| i)
            .collect();
        for index in missing {
            self.form.set_error(index, "required".to_string());
        }
        if self.form.has_errors() {
            return Action::None;
        }

        Action::StartSwarm(SubmissionPayload::from_fields(self.form.resolved()))
    }
}

impl ScreenState for SwarmFormState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Left => {
                self.form.cycle_option(false);
                Action::None
            }
            KeyCode::Right => {
                self.form.cycle_option(true);
                Action::None
            }
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter => self.submit(),
            _ => Action::None,
        }
    }
}

fn rows_height(range: &Range<usize>) -> u16 {
    ROW_HEIGHT.saturating_mul(u16::try_from(range.len()).unwrap_or(u16::MAX))
}

fn heading(text: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
}

/// Renders the start form screen.
#[mutants::skip]
pub fn draw_swarm_form(state: &SwarmFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Start new load test ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = &state.sections;
    let custom_heading = if state.has_custom_parameters() { 1 } else { 0 };
    let [
        pickers_area,
        core_area,
        advanced_heading,
        advanced_area,
        custom_heading_area,
        custom_area,
        error_area,
        _spacer,
        footer_area,
    ] = Layout::vertical([
        Constraint::Length(rows_height(&sections.pickers)),
        Constraint::Length(rows_height(&sections.core)),
        Constraint::Length(1),
        Constraint::Length(rows_height(&sections.advanced)),
        Constraint::Length(custom_heading),
        Constraint::Length(rows_height(&sections.custom)),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let form = state.form();
    if state.has_class_pickers() {
        draw_form_rows(form, sections.pickers.clone(), frame, pickers_area);
    }
    draw_form_rows(form, sections.core.clone(), frame, core_area);
    frame.render_widget(heading("Advanced options"), advanced_heading);
    draw_form_rows(form, sections.advanced.clone(), frame, advanced_area);
    if state.has_custom_parameters() {
        frame.render_widget(heading("Custom parameters"), custom_heading_area);
        draw_form_rows(form, sections.custom.clone(), frame, custom_area);
    }

    if let Some(err) = state.general_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, error_area);
    }

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  \u{2190}/\u{2192}: choose  Space: toggle  Enter: start swarm  F1: help  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
