//! Status bar widget: one-line swarm context plus the latest message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::SwarmState;

/// A transient message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Data passed to the status bar widget.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarContext {
    /// Current swarm state.
    pub state: SwarmState,
    /// Target host, if known.
    pub host: String,
    /// Users currently running, as last reported.
    pub num_users: Option<u64>,
    /// Requests still awaiting a reply.
    pub in_flight: usize,
    /// Latest message.
    pub message: Option<StatusMessage>,
}

/// Renders a one-line status bar.
///
/// Display format: `[RUNNING] https://example.com  10 users  (1 pending)  message`
/// with errors in red.
#[mutants::skip]
pub fn draw_status_bar(ctx: &StatusBarContext, frame: &mut Frame, area: Rect) {
    let cyan = Style::default().fg(Color::Cyan);
    let state_style = match ctx.state {
        SwarmState::Running | SwarmState::Spawning => Style::default().fg(Color::Green),
        SwarmState::Starting => Style::default().fg(Color::Yellow),
        SwarmState::Missing => Style::default().fg(Color::Red),
        _ => cyan,
    };

    let mut spans: Vec<Span> = vec![Span::styled(format!("[{}]", ctx.state), state_style)];
    if !ctx.host.is_empty() {
        spans.push(Span::styled(format!(" {}", ctx.host), cyan));
    }
    if let Some(n) = ctx.num_users {
        spans.push(Span::styled(format!("  {n} users"), cyan));
    }
    if ctx.in_flight > 0 {
        spans.push(Span::styled(
            format!("  ({} pending)", ctx.in_flight),
            Style::default().fg(Color::Yellow),
        ));
    }
    match &ctx.message {
        Some(StatusMessage::Info(msg)) => spans.push(Span::raw(format!("  {msg}"))),
        Some(StatusMessage::Error(msg)) => spans.push(Span::styled(
            format!("  {msg}"),
            Style::default().fg(Color::Red),
        )),
        None => {}
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render_status_bar(ctx: &StatusBarContext, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                draw_status_bar(ctx, frame, frame.area());
            })
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn renders_state_and_host() {
        let ctx = StatusBarContext {
            state: SwarmState::Running,
            host: "https://example.com".into(),
            num_users: Some(10),
            ..StatusBarContext::default()
        };
        let output = render_status_bar(&ctx, 60);
        assert!(output.contains("[RUNNING]"), "should show state");
        assert!(output.contains("https://example.com"), "should show host");
        assert!(output.contains("10 users"), "should show user count");
    }

    #[test]
    fn renders_pending_count() {
        let ctx = StatusBarContext {
            state: SwarmState::Starting,
            in_flight: 2,
            ..StatusBarContext::default()
        };
        let output = render_status_bar(&ctx, 60);
        assert!(output.contains("[STARTING]"));
        assert!(output.contains("(2 pending)"));
    }

    #[test]
    fn renders_error_message() {
        let ctx = StatusBarContext {
            message: Some(StatusMessage::Error("backend returned 500".into())),
            ..StatusBarContext::default()
        };
        let output = render_status_bar(&ctx, 60);
        assert!(output.contains("[READY]"));
        assert!(output.contains("backend returned 500"));
    }

    #[test]
    fn empty_context_omits_optional_parts() {
        let output = render_status_bar(&StatusBarContext::default(), 40);
        assert!(!output.contains("users"));
        assert!(!output.contains("pending"));
    }
}
