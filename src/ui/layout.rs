use ratatui::layout::Rect;

/// Rows of question text visible in the input box.
pub const INPUT_ROWS: u16 = 3;

/// Regions of the screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    pub input: Rect,
    pub status: Rect,
    pub answer: Rect,
    pub footer: Rect,
}

/// Split the screen. `status_height` is 0 when there is nothing to report.
pub fn layout_regions(area: Rect, status_height: u16) -> Regions {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let mut remaining = area.height.saturating_sub(header_height + footer_height);

    let input_height = (INPUT_ROWS + 2).min(remaining);
    remaining -= input_height;
    let status_height = status_height.min(remaining);
    remaining -= status_height;

    let mut y = area.y;
    let mut take = |height: u16| {
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        y += height;
        rect
    };

    let header = take(header_height);
    let input = take(input_height);
    let status = take(status_height);
    let answer = take(remaining);
    let footer = take(footer_height);

    Regions {
        header,
        input,
        status,
        answer,
        footer,
    }
}
