//! Narration, variable inspector and summary counters

use crate::trace::{Step, Summary};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// One `name = value` line per variable, in insertion order
pub fn variable_lines(step: &Step) -> Vec<Line<'static>> {
    if step.variables.is_empty() {
        return vec![Line::from(Span::styled(
            "(no variables)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))];
    }
    step.variables
        .iter()
        .map(|(name, value)| {
            Line::from(vec![
                Span::styled(name.to_string(), Style::default().fg(DEFAULT_THEME.type_name)),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.number)),
            ])
        })
        .collect()
}

/// Tracked counters only; untracked ones are not shown at all
pub fn summary_lines(summary: &Summary) -> Vec<Line<'static>> {
    summary
        .entries()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", label), Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(
                    value.to_string(),
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect()
}

fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
}

/// Render narration (top), variables (middle) and summary (bottom)
pub fn render_inspector_pane(frame: &mut Frame, area: Rect, step: Option<&Step>, summary: Option<Summary>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(6),
        ])
        .split(area);

    let narration = match step {
        Some(step) => Line::from(Span::styled(
            step.message.clone(),
            Style::default().fg(DEFAULT_THEME.fg).add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled("", Style::default())),
    };
    frame.render_widget(
        Paragraph::new(narration)
            .block(pane_block(" Narration "))
            .wrap(Wrap { trim: true }),
        rows[0],
    );

    let variables = step.map(variable_lines).unwrap_or_default();
    frame.render_widget(
        Paragraph::new(variables).block(pane_block(" Variables ")),
        rows[1],
    );

    let counters = summary.as_ref().map(summary_lines).unwrap_or_default();
    frame.render_widget(
        Paragraph::new(counters).block(pane_block(" Summary ")),
        rows[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::{ArrayView, Counter, Recorder};

    #[test]
    fn variables_keep_insertion_order() {
        let step = Step::new("m", ArrayView::capture(&[1]))
            .var("j", 3)
            .var("i", 1);
        let lines = variable_lines(&step);
        assert_eq!(lines[0].spans[0].content, "j");
        assert_eq!(lines[1].spans[0].content, "i");
    }

    #[test]
    fn untracked_counters_are_hidden() {
        let mut rec = Recorder::new();
        rec.track(&[Counter::Swaps]);
        rec.count(Counter::Comparisons);
        let lines = summary_lines(&rec.summary());
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| !l.spans[0].content.contains("Recursive")));
    }
}
