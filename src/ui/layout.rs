use ratatui::layout::{Position, Rect};

use crate::ui::poster::{POSTER_COLS, POSTER_ROWS};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const SEARCH_ROW_HEIGHT: u16 = 3;
const SEARCH_BUTTON_WIDTH: u16 = 12;
const HISTORY_HEIGHT: u16 = 5;

pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(HEADER_HEIGHT);
    let footer_height = FOOTER_HEIGHT.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Where each widget of the search screen lives for a given terminal size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub search_box: Rect,
    pub search_button: Rect,
    pub poster: Rect,
    pub details: Rect,
    pub history: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect) -> Self {
        let (header, body, footer) = layout_regions(area);

        let search_height = SEARCH_ROW_HEIGHT.min(body.height);
        let button_width = SEARCH_BUTTON_WIDTH.min(body.width);
        let search_box = Rect {
            x: body.x,
            y: body.y,
            width: body.width.saturating_sub(button_width),
            height: search_height,
        };
        let search_button = Rect {
            x: search_box.right(),
            y: body.y,
            width: button_width,
            height: search_height,
        };

        let remaining = body.height.saturating_sub(search_height);
        let history_height = HISTORY_HEIGHT.min(remaining);
        let history = Rect {
            x: body.x,
            y: body.y + body.height.saturating_sub(history_height),
            width: body.width,
            height: history_height,
        };

        let middle_height = remaining.saturating_sub(history_height);
        let middle_y = body.y + search_height;
        let poster = Rect {
            x: body.x,
            y: middle_y,
            width: (POSTER_COLS + 2).min(body.width),
            height: (POSTER_ROWS + 2).min(middle_height),
        };
        let details = Rect {
            x: poster.right(),
            y: middle_y,
            width: body.width.saturating_sub(poster.width),
            height: middle_height,
        };

        Self {
            header,
            search_box,
            search_button,
            poster,
            details,
            history,
            footer,
        }
    }
}

pub fn contains(area: Rect, col: u16, row: u16) -> bool {
    area.contains(Position::new(col, row))
}

pub fn centered_rect_by_size(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_cover_area() {
        let (header, body, footer) = layout_regions(Rect::new(0, 0, 80, 40));
        assert_eq!(header.height, 3);
        assert_eq!(footer.height, 3);
        assert_eq!(body.height, 34);
        assert_eq!(footer.y, 37);
    }

    #[test]
    fn widgets_do_not_overlap() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 100, 40));
        assert!(layout.search_box.right() <= layout.search_button.x);
        assert!(layout.search_box.bottom() <= layout.poster.y);
        assert!(layout.poster.right() <= layout.details.x);
        assert!(layout.poster.bottom() <= layout.history.y);
        assert!(layout.history.bottom() <= layout.footer.y);
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 5, 4));
        assert!(layout.search_button.width <= 5);
        assert_eq!(layout.history.height, 0);
    }

    #[test]
    fn centered_rect_is_clamped() {
        let rect = centered_rect_by_size(Rect::new(0, 0, 10, 10), 20, 4);
        assert_eq!(rect, Rect::new(0, 3, 10, 4));
    }
}
