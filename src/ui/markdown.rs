//! Minimal markdown to ratatui text.
//!
//! Handles what answers actually contain: headings, bullet and numbered
//! lists, block quotes, fenced code, and inline `**bold**`, `*italic*` and
//! `` `code` ``. Anything else is shown as written. Wrapping is left to the
//! `Paragraph` that displays the lines.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::ui::theme::{ACCENT, CODE_TEXT, HEADER_TEXT, MUTED_TEXT};

const BULLET: &str = "  • ";

pub fn render_markdown(source: &str) -> Vec<Line<'static>> {
    let base = Style::default().fg(HEADER_TEXT);
    let code = Style::default().fg(CODE_TEXT);
    let mut lines = Vec::new();
    let mut in_fence = false;

    for raw in source.lines() {
        let trimmed = raw.trim_start();

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            lines.push(Line::from(Span::styled(format!("    {}", raw), code)));
            continue;
        }

        if let Some((level, text)) = heading(trimmed) {
            let mut style = base.fg(ACCENT).add_modifier(Modifier::BOLD);
            if level == 1 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            lines.push(Line::from(inline_spans(text, style)));
            continue;
        }

        let indent = " ".repeat((raw.len() - trimmed.len()).min(8));

        if let Some(text) = bullet_item(trimmed) {
            let mut spans = vec![Span::styled(format!("{}{}", indent, BULLET), base.fg(ACCENT))];
            spans.extend(inline_spans(text, base));
            lines.push(Line::from(spans));
            continue;
        }

        if let Some((number, text)) = numbered_item(trimmed) {
            let mut spans = vec![Span::styled(
                format!("{}  {}. ", indent, number),
                base.fg(ACCENT),
            )];
            spans.extend(inline_spans(text, base));
            lines.push(Line::from(spans));
            continue;
        }

        if let Some(text) = trimmed.strip_prefix('>') {
            let quote = base.fg(MUTED_TEXT).add_modifier(Modifier::ITALIC);
            let mut spans = vec![Span::styled("  │ ", Style::default().fg(MUTED_TEXT))];
            spans.extend(inline_spans(text.trim_start(), quote));
            lines.push(Line::from(spans));
            continue;
        }

        lines.push(Line::from(inline_spans(raw.trim_end(), base)));
    }

    lines
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    line[level..].strip_prefix(' ').map(|text| (level, text.trim()))
}

fn bullet_item(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
}

fn numbered_item(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let text = line[digits..]
        .strip_prefix(". ")
        .or_else(|| line[digits..].strip_prefix(") "))?;
    Some((&line[..digits], text))
}

/// Split a line into spans, applying inline emphasis on top of `base`.
///
/// Markers without a closing partner are kept as literal text.
fn inline_spans(text: &str, base: Style) -> Vec<Span<'static>> {
    let markers = [
        ("**", base.add_modifier(Modifier::BOLD)),
        ("__", base.add_modifier(Modifier::BOLD)),
        ("`", base.fg(CODE_TEXT)),
        ("*", base.add_modifier(Modifier::ITALIC)),
        ("_", base.add_modifier(Modifier::ITALIC)),
    ];

    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    'outer: while let Some(ch) = rest.chars().next() {
        for (marker, style) in markers {
            let Some(after) = rest.strip_prefix(marker) else {
                continue;
            };
            // `_` inside words (snake_case, file_names) is not emphasis.
            if marker.starts_with('_') && plain.chars().last().is_some_and(char::is_alphanumeric) {
                continue;
            }
            if after.starts_with(char::is_whitespace) {
                continue;
            }
            let closing = after
                .find(marker)
                .filter(|end| *end > 0 && !after[..*end].ends_with(char::is_whitespace));
            if let Some(end) = closing {
                if !plain.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut plain), base));
                }
                spans.push(Span::styled(after[..end].to_string(), style));
                rest = &after[end + marker.len()..];
                continue 'outer;
            }
        }
        plain.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    if !plain.is_empty() || spans.is_empty() {
        spans.push(Span::styled(plain, base));
    }
    spans
}
