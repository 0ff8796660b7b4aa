//! Status bar rendering with keybindings and playback badges

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Playback position and mode shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub cursor: usize,
    pub total: usize,
    pub speed: f64,
    pub is_playing: bool,
}

/// Which badge the bar shows; playing wins over position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Playing,
    End,
    Start,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Playing => " ▶ PLAYING ",
            Badge::End => " END ",
            Badge::Start => " START ",
        }
    }

    fn color(self) -> Color {
        match self {
            Badge::Playing => DEFAULT_THEME.secondary,
            Badge::End => DEFAULT_THEME.error,
            Badge::Start => DEFAULT_THEME.success,
        }
    }
}

impl StatusRenderData<'_> {
    pub fn step_text(&self) -> String {
        if self.total == 0 {
            " Step 0/0 ".to_string()
        } else {
            format!(" Step {}/{} ", self.cursor + 1, self.total)
        }
    }

    pub fn badge(&self) -> Option<Badge> {
        if self.total == 0 {
            None
        } else if self.is_playing {
            Some(Badge::Playing)
        } else if self.cursor + 1 >= self.total {
            Some(Badge::End)
        } else if self.cursor == 0 {
            Some(Badge::Start)
        } else {
            None
        }
    }
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.current_line_bg);
    let sep_style = bar.fg(DEFAULT_THEME.comment);

    // Left side: position, speed and message
    let left_spans = vec![
        Span::styled(
            data.step_text(),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {:.2}x ", data.speed), bar.fg(DEFAULT_THEME.type_name)),
        Span::styled("|", sep_style),
        Span::styled(format!(" {} ", data.message), bar.fg(DEFAULT_THEME.fg)),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(bar)
            .alignment(Alignment::Left),
        layout[0],
    );

    // Right side: keybinds
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar.fg(DEFAULT_THEME.fg);

    let mut right_spans = Vec::new();
    for (key, desc) in [
        (" ←/→ ", " step "),
        (" ⎵ ", " play "),
        (" ↵ / ⌫ ", " end/start "),
        (" +/- ", " speed "),
        ("q", " quit "),
    ] {
        if !right_spans.is_empty() {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
    }

    if let Some(badge) = data.badge() {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            badge.label(),
            Style::default()
                .bg(badge.color())
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(bar)
            .alignment(Alignment::Right),
        layout[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(cursor: usize, total: usize, is_playing: bool) -> StatusRenderData<'static> {
        StatusRenderData {
            message: "",
            cursor,
            total,
            speed: 1.0,
            is_playing,
        }
    }

    #[test]
    fn badges_follow_position() {
        assert_eq!(data(0, 5, false).badge(), Some(Badge::Start));
        assert_eq!(data(2, 5, false).badge(), None);
        assert_eq!(data(4, 5, false).badge(), Some(Badge::End));
        assert_eq!(data(2, 5, true).badge(), Some(Badge::Playing));
        assert_eq!(data(0, 0, false).badge(), None);
    }

    #[test]
    fn step_text_is_one_based() {
        assert_eq!(data(0, 10, false).step_text(), " Step 1/10 ");
        assert_eq!(data(0, 0, false).step_text(), " Step 0/0 ");
    }
}
