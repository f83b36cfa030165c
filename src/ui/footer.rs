use crate::ui::screen::Focus;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const ALWAYS: &str = "Tab: Focus │ Click: Activate │ Ctrl+Q: Quit";

/// Key hints for the focused widget, followed by the global ones.
pub struct Footer {
    focus: Focus,
}

impl Footer {
    pub fn new(focus: Focus) -> Self {
        Self { focus }
    }

    fn focused_hints(&self) -> &'static str {
        match self.focus {
            Focus::SearchBox => "Type a title │ Enter: Search",
            Focus::SearchButton => "Enter: Search",
            Focus::Poster => "Enter: Add to history",
            Focus::History => "←/→: Select │ Enter: Restore",
        }
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let focused = format!(" {} │ ", self.focused_hints());
        let version = format!("v{VERSION} ");

        // Char counts, not bytes: the separators are multi-byte.
        let used = focused.chars().count() + ALWAYS.chars().count() + version.chars().count();
        let padding = (area.width.saturating_sub(2) as usize).saturating_sub(used);

        let dim = Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM);
        let line = Line::from(vec![
            Span::styled(focused, Style::default().fg(HEADER_TEXT)),
            Span::styled(ALWAYS, dim),
            Span::raw(" ".repeat(padding)),
            Span::styled(version, dim),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
