use crate::api::AnswerPayload;
use crate::store::QueryState;
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{layout_regions, INPUT_ROWS};
use crate::ui::markdown::render_markdown;
use crate::ui::theme::{
    ACCENT, GLOBAL_BORDER, HEADER_TEXT, INPUT_BORDER, LINK_TEXT, MUTED_TEXT, STATUS_ERROR,
    STATUS_PENDING,
};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const PLACEHOLDER: &str = "e.g., What are the latest treatment options for GERD?";

/// Header, footer and input box, all fixed height.
const FIXED_ROWS: u16 = 3 + 3 + INPUT_ROWS + 2;

/// Rows the answer box keeps when a long error wants the space.
const MIN_ANSWER_ROWS: u16 = 3;

pub fn draw(frame: &mut Frame<'_>, app: &App, header: &Header) {
    let state = app.state();
    let area = frame.area();
    let regions = layout_regions(area, status_height(&state, area));

    let confidence = state.response().map(AnswerPayload::confidence_percent);
    frame.render_widget(header.widget(state.phase(), confidence), regions.header);

    draw_input(frame, app, state.loading, regions.input);
    draw_status(frame, app, &state, regions.status);
    draw_answer(frame, app, &state, regions.answer);

    frame.render_widget(Footer::new().widget(regions.footer), regions.footer);
}

fn status_height(state: &QueryState, area: Rect) -> u16 {
    if let Some(error) = state.error() {
        let rows = word_wrapped_rows(error, area.width.saturating_sub(2)).saturating_add(2);
        let room = area.height.saturating_sub(FIXED_ROWS + MIN_ANSWER_ROWS);
        rows.min(room.max(3))
    } else if state.loading {
        1
    } else {
        0
    }
}

fn draw_input(frame: &mut Frame<'_>, app: &App, loading: bool, area: Rect) {
    if area.height == 0 {
        return;
    }

    let (title, border) = if loading {
        (" Processing... ", Style::default().fg(GLOBAL_BORDER))
    } else {
        (
            " Ask a gastroenterology question ",
            Style::default().fg(INPUT_BORDER),
        )
    };
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.input().is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default().fg(MUTED_TEXT).add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(placeholder, inner);
    } else {
        let text_style = if loading {
            Style::default().fg(MUTED_TEXT)
        } else {
            Style::default().fg(HEADER_TEXT)
        };
        let (rows, _) = input_rows(app.input(), app.cursor(), inner.width, inner.height);
        let lines: Vec<Line> = rows
            .into_iter()
            .map(|row| Line::from(Span::styled(row, text_style)))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    if !loading && inner.width > 0 && inner.height > 0 {
        let (_, (col, row)) = input_rows(app.input(), app.cursor(), inner.width, inner.height);
        frame.set_cursor_position((inner.x + col, inner.y + row));
    }
}

/// Hard-wrap the question into rows of `width` chars and pick the rows that
/// keep the cursor visible. Returns the rows and the cursor's (col, row)
/// within them.
fn input_rows(input: &str, cursor: usize, width: u16, height: u16) -> (Vec<String>, (u16, u16)) {
    let width = usize::from(width.max(1));
    let height = usize::from(height.clamp(1, INPUT_ROWS));
    let chars: Vec<char> = input.chars().collect();

    let mut rows: Vec<String> = chars.chunks(width).map(|c| c.iter().collect()).collect();
    if rows.is_empty() {
        rows.push(String::new());
    }

    let cursor_row = cursor / width;
    let cursor_col = cursor % width;
    let first = cursor_row.saturating_sub(height - 1);
    let visible = rows.into_iter().skip(first).take(height).collect();

    (visible, (cursor_col as u16, (cursor_row - first) as u16))
}

fn draw_status(frame: &mut Frame<'_>, app: &App, state: &QueryState, area: Rect) {
    if area.height == 0 {
        return;
    }

    if let Some(error) = state.error() {
        let banner = Paragraph::new(Span::styled(
            error.to_string(),
            Style::default().fg(STATUS_ERROR),
        ))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(Span::styled(" Error ", Style::default().fg(STATUS_ERROR)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(STATUS_ERROR)),
        );
        frame.render_widget(Clear, area);
        frame.render_widget(banner, area);
        return;
    }

    if state.loading {
        let spinner = SPINNER_FRAMES[app.spinner_frame() % SPINNER_FRAMES.len()];
        let mut spans = vec![
            Span::styled(format!(" {} ", spinner), Style::default().fg(STATUS_PENDING)),
            Span::styled("Thinking...", Style::default().fg(HEADER_TEXT)),
        ];
        if state.is_stale() {
            spans.push(Span::styled(
                "  (showing previous answer)",
                Style::default().fg(MUTED_TEXT),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn draw_answer(frame: &mut Frame<'_>, app: &App, state: &QueryState, area: Rect) {
    if area.height == 0 {
        return;
    }

    let block = Block::default()
        .title(Span::styled(" Answer ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER));
    let inner = block.inner(area);

    let lines = match state.response() {
        Some(payload) => answer_lines(payload),
        None => vec![Line::from(Span::styled(
            "Type a question and press Enter.",
            Style::default().fg(MUTED_TEXT),
        ))],
    };

    let total = wrapped_height(&lines, inner.width);
    app.set_scroll_limit(total.saturating_sub(inner.height));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll(), 0))
        .block(block);
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// The answer as markdown, followed by its sources in received order.
pub fn answer_lines(payload: &AnswerPayload) -> Vec<Line<'static>> {
    let mut lines = render_markdown(&payload.answer);
    if payload.sources.is_empty() {
        return lines;
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Sources",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));

    for (idx, source) in payload.sources.iter().enumerate() {
        lines.push(Line::from(""));

        let title_style = match source.url {
            Some(_) => Style::default()
                .fg(LINK_TEXT)
                .add_modifier(Modifier::BOLD),
            None => Style::default()
                .fg(HEADER_TEXT)
                .add_modifier(Modifier::BOLD),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", idx + 1), Style::default().fg(MUTED_TEXT)),
            Span::styled(source.title.clone(), title_style),
        ]));

        if let Some(url) = source.url.as_deref().filter(|u| !u.is_empty()) {
            lines.push(Line::from(Span::styled(
                format!("    {}", url),
                Style::default()
                    .fg(LINK_TEXT)
                    .add_modifier(Modifier::UNDERLINED),
            )));
        }
        if !source.snippet.trim().is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", source.snippet.trim()),
                Style::default().fg(MUTED_TEXT),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("    Confidence: {}%", source.confidence_percent()),
            Style::default().fg(MUTED_TEXT).add_modifier(Modifier::DIM),
        )));
    }

    lines
}

/// Rows `lines` occupy once wrapped to `width`. Approximate for word wrap.
fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Rows `text` takes when word-wrapped to `width` the way `Wrap` does it.
/// Words longer than a row are broken across rows.
fn word_wrapped_rows(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut rows = 0usize;

    for line in text.lines() {
        rows += 1;
        let mut col = 0usize;
        for word in line.split_whitespace() {
            let len = Span::raw(word).width();
            if col > 0 && col + 1 + len <= width {
                col += 1 + len;
                continue;
            }
            if col > 0 {
                rows += 1;
            }
            let extra = len.saturating_sub(1) / width;
            rows += extra;
            col = len - extra * width;
        }
    }

    u16::try_from(rows.max(1)).unwrap_or(u16::MAX)
}
