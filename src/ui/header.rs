use crate::store::QueryPhase;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK, STATUS_PENDING,
};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header {
    user_id: String,
    host: String,
}

impl Header {
    pub fn new(user_id: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            host: host.into(),
        }
    }

    /// `confidence` is the answer's overall confidence percentage, if any.
    pub fn widget(&self, phase: QueryPhase, confidence: Option<u8>) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (dot, status, color) = match phase {
            QueryPhase::Idle => ("○", "Ready", HEADER_SEPARATOR),
            QueryPhase::Pending => ("●", "Thinking", STATUS_PENDING),
            QueryPhase::Fulfilled => ("●", "Answered", STATUS_OK),
            QueryPhase::Rejected => ("●", "Failed", STATUS_ERROR),
        };

        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled(
                "GastroAssist AI",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(dot, Style::default().fg(color)),
            Span::styled(format!(" {}", status), text_style),
        ];
        if let Some(confidence) = confidence {
            spans.push(Span::styled("  │  ", separator_style));
            spans.push(Span::styled(format!("Confidence {}%", confidence), text_style));
        }
        spans.push(Span::styled("  │  ", separator_style));
        spans.push(Span::styled(
            format!("{}@{}", self.user_id, self.host),
            text_style,
        ));

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
