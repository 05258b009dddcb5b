use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Most important first; trailing hints are dropped on narrow terminals.
const HINTS: &[&str] = &[
    "Enter: Ask",
    "Esc: Quit",
    "Ctrl+L: Clear",
    "↑↓ PgUp/PgDn: Scroll",
    "Ctrl+U: Clear input",
];

const SEPARATOR: &str = " │ ";

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, area: Rect) -> Paragraph<'static> {
        let version = format!("v{} ", VERSION);
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;

        let hints = fit_hints(content_width.saturating_sub(version_width));
        let hints_width = hints.chars().count();
        let (padding, version) = match content_width.checked_sub(hints_width + version_width) {
            Some(padding) => (padding, version),
            None => (0, String::new()),
        };

        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);

        let line = Line::from(vec![
            Span::styled(hints, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(version, text_style),
        ]);

        Paragraph::new(line)
            .style(text_style)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}

/// Leading hints joined by separators, as many as fit in `width` chars.
/// The first hint is always kept.
fn fit_hints(width: usize) -> String {
    let mut line = String::new();
    for hint in HINTS {
        let sep = if line.is_empty() { " " } else { SEPARATOR };
        let grown = line.chars().count() + sep.chars().count() + hint.chars().count();
        if grown > width && !line.is_empty() {
            break;
        }
        line.push_str(sep);
        line.push_str(hint);
    }
    line
}
