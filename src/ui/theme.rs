use crate::trace::HighlightType;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,
    pub secondary: Color,
    pub comment: Color,
    pub success: Color,
    pub error: Color,
    pub keyword: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub type_name: Color,
    pub visited: Color,
    pub candidate: Color,
}

impl Theme {
    /// Foreground colour for elements carrying `kind`
    pub fn highlight_color(&self, kind: HighlightType) -> Color {
        match kind {
            HighlightType::Compare | HighlightType::Candidate => self.candidate,
            HighlightType::Swap | HighlightType::Pivot => self.secondary,
            HighlightType::Found | HighlightType::Sorted => self.success,
            HighlightType::Visiting | HighlightType::Current | HighlightType::Mid => self.border_focused,
            HighlightType::Visited => self.visited,
            HighlightType::Path | HighlightType::Selected => self.keyword,
            HighlightType::Low | HighlightType::High => self.type_name,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(203, 166, 247),
    number: Color::Rgb(250, 179, 135),
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(88, 91, 112),
    current_line_bg: Color::Rgb(50, 50, 70),
    type_name: Color::Rgb(148, 226, 213),
    visited: Color::Rgb(116, 199, 236),
    candidate: Color::Rgb(245, 194, 231),
};
