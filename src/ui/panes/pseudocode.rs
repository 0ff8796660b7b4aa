//! Pseudocode pane with the current line indicator
//!
//! Lines are numbered from 1. A step whose line is `None` or points past the
//! end of the listing highlights nothing; line references are never
//! validated upstream.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn keyword_style(word: &str) -> Style {
    match word {
        "procedure" | "function" | "for" | "to" | "downto" | "while" | "if" | "else" | "return"
        | "and" | "or" | "not" | "do" | "break" | "each" | "in" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        w if w.chars().all(|c| c.is_ascii_digit()) => Style::default().fg(DEFAULT_THEME.number),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Split a pseudocode line into keyword-coloured spans
fn highlight_line(line: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut word = String::new();
    for c in line.chars() {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
            continue;
        }
        if !word.is_empty() {
            let style = keyword_style(&word);
            spans.push(Span::styled(std::mem::take(&mut word), style));
        }
        spans.push(Span::styled(c.to_string(), Style::default().fg(DEFAULT_THEME.fg)));
    }
    if !word.is_empty() {
        let style = keyword_style(&word);
        spans.push(Span::styled(word, style));
    }
    spans
}

/// Build the numbered listing, marking `current` (1-based) when it is in range
pub fn pseudocode_lines(code: &str, current: Option<usize>) -> Vec<Line<'static>> {
    code.lines()
        .enumerate()
        .map(|(idx, text)| {
            let line_num = idx + 1;
            let is_current = current == Some(line_num);
            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            let mut content = highlight_line(text);
            if is_current {
                for span in &mut content {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
            }
            spans.extend(content);
            Line::from(spans)
        })
        .collect()
}

/// Render the pseudocode pane
pub fn render_pseudocode_pane(frame: &mut Frame, area: Rect, code: &str, current: Option<usize>) {
    let block = Block::default()
        .title(" Pseudocode ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let lines = pseudocode_lines(code, current);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // keep the current line in view, roughly centred
    let offset = match current {
        Some(line) if line >= 1 && line <= lines.len() && lines.len() > visible_height => {
            (line - 1)
                .saturating_sub(visible_height / 2)
                .min(lines.len() - visible_height)
        }
        _ => 0,
    };

    let paragraph = Paragraph::new(lines).block(block).scroll((offset as u16, 0));
    frame.render_widget(paragraph, area);
}
