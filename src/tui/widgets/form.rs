//! Reusable form widget over resolved fields.

use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{FieldInput, ResolvedField};

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Field definition and current value.
    pub field: ResolvedField,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Highlighted option in a multi select.
    pub cursor: usize,
}

impl FormField {
    /// Wraps a resolved field with no error.
    pub fn new(field: ResolvedField) -> Self {
        Self {
            field,
            error: None,
            cursor: 0,
        }
    }

    /// Whether focus may land on this field.
    fn focusable(&self) -> bool {
        !self.field.disabled
    }
}

/// A multi-field form with focus management.
///
/// Disabled fields are drawn but skipped by focus and never edited.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Creates a new form. Focus starts on the first enabled field.
    pub fn new(fields: Vec<ResolvedField>) -> Self {
        let fields: Vec<FormField> = fields.into_iter().map(FormField::new).collect();
        let focus = fields.iter().position(FormField::focusable).unwrap_or(0);
        Self { fields, focus }
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to the next enabled field, wrapping around.
    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    /// Moves focus to the previous enabled field, wrapping around.
    pub fn focus_prev(&mut self) {
        self.step_focus(self.fields.len().saturating_sub(1));
    }

    fn step_focus(&mut self, step: usize) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        let mut next = self.focus;
        for _ in 0..len {
            next = (next + step) % len;
            if self.fields[next].focusable() {
                self.focus = next;
                return;
            }
        }
    }

    fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus).filter(|f| f.focusable())
    }

    /// Inserts a character at the end of the focused text field.
    ///
    /// On a checkbox or multi select, a space toggles instead.
    pub fn insert_char(&mut self, ch: char) {
        let Some(field) = self.focused_mut() else {
            return;
        };
        let cursor = field.cursor;
        match &mut field.field.input {
            FieldInput::Text(s) | FieldInput::Secret(s) => s.push(ch),
            FieldInput::Checkbox(on) if ch == ' ' => *on = !*on,
            FieldInput::MultiSelect { selected, .. } if ch == ' ' => {
                if let Some(on) = selected.get_mut(cursor) {
                    *on = !*on;
                }
            }
            _ => {}
        }
    }

    /// Deletes the last character from the focused text field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.focused_mut()
            && let FieldInput::Text(s) | FieldInput::Secret(s) = &mut field.field.input
        {
            s.pop();
        }
    }

    /// Cycles the focused select, or moves the multi select cursor.
    pub fn cycle_option(&mut self, forward: bool) {
        let Some(field) = self.focused_mut() else {
            return;
        };
        let len = match &field.field.input {
            FieldInput::Select { options, .. } | FieldInput::MultiSelect { options, .. } => {
                options.len()
            }
            _ => return,
        };
        if len == 0 {
            return;
        }
        let step = |i: usize| if forward { (i + 1) % len } else { (i + len - 1) % len };
        match &mut field.field.input {
            FieldInput::Select { selected, .. } => {
                *selected = Some(selected.map_or(0, step));
            }
            _ => field.cursor = step(field.cursor),
        }
    }

    /// Sets an error message on a field by index.
    pub fn set_error(&mut self, index: usize, error: String) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(error);
        }
    }

    /// Clears all field errors.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Returns the input of the field at `index`, if any.
    pub fn input(&self, index: usize) -> Option<&FieldInput> {
        self.fields.get(index).map(|f| &f.field.input)
    }

    /// Returns the text of the field at `index`, or an empty string for
    /// non-text fields and out-of-bounds indexes.
    pub fn value(&self, index: usize) -> &str {
        self.input(index).and_then(FieldInput::text).unwrap_or("")
    }

    /// Iterates over the resolved fields with their current values.
    pub fn resolved(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().map(|f| &f.field)
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

/// Height of one field row.
pub const ROW_HEIGHT: u16 = 3;

/// Renders the fields in `range` within the given area.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form_rows(form: &Form, range: Range<usize>, frame: &mut Frame, area: Rect) {
    let Some(fields) = form.fields.get(range.clone()) else {
        return;
    };
    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();
    let rows = Layout::vertical(constraints).split(area);

    for ((i, field), row) in range.zip(fields).zip(rows.iter()) {
        let is_focused = i == form.focus && field.focusable();

        let border_color = if field.error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let label = if field.field.required {
            format!("{} *", field.field.label)
        } else {
            field.field.label.clone()
        };

        let mut block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        if let Some(help) = &field.field.help {
            block = block.title_bottom(Line::from(help.as_str()).right_aligned());
        }

        let value_style = if field.field.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let mut spans = input_spans(field, is_focused, value_style);
        if is_focused && field.field.input.text().is_some() {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(block);
        frame.render_widget(paragraph, *row);

        // Draw error below the field if there's space
        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
            let err_area = Rect {
                x: row.x + 2,
                y: row.y + ROW_HEIGHT.saturating_sub(1),
                width: row.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(error_line, err_area);
        }
    }
}

fn input_spans(field: &FormField, is_focused: bool, style: Style) -> Vec<Span<'_>> {
    match &field.field.input {
        FieldInput::Text(s) => vec![Span::styled(s.as_str(), style)],
        FieldInput::Secret(s) => vec![Span::styled("*".repeat(s.chars().count()), style)],
        FieldInput::Checkbox(on) => vec![Span::styled(if *on { "[x]" } else { "[ ]" }, style)],
        FieldInput::Select { options, selected } => {
            let current = selected
                .and_then(|i| options.get(i))
                .map_or("(none)", String::as_str);
            vec![Span::styled(format!("< {current} >"), style)]
        }
        FieldInput::MultiSelect { options, selected } => options
            .iter()
            .zip(selected)
            .enumerate()
            .map(|(i, (name, on))| {
                let mark = if *on { "[x]" } else { "[ ]" };
                let style = if is_focused && i == field.cursor {
                    style.add_modifier(Modifier::REVERSED)
                } else {
                    style
                };
                Span::styled(format!("{mark} {name}  "), style)
            })
            .collect(),
    }
}
