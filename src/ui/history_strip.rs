//! Horizontal strip of recent searches.
//!
//! The backing list can be swapped at any time with [`HistoryStrip::submit_list`].
//! Activation always resolves to the entry object currently on screen, so a
//! click that lands after a list replacement can never pick up a neighbour.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::movies::MovieSearchResult;
use crate::ui::search::MovieSearchIntent;
use crate::ui::theme::{ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT};

const ITEM_WIDTH: u16 = 22;
const ITEM_GAP: u16 = 1;

#[derive(Debug, Default)]
pub struct HistoryStrip {
    entries: Vec<MovieSearchResult>,
    selected: Option<usize>,
}

impl HistoryStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MovieSearchResult] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the list wholesale.
    ///
    /// The selection stays on the same movie id when it is still present,
    /// otherwise it is clamped into the new list.
    pub fn submit_list(&mut self, entries: Vec<MovieSearchResult>) {
        let selected_id = self.selected_entry().map(|entry| entry.id.clone());
        self.entries = entries;

        self.selected = if self.entries.is_empty() {
            None
        } else if let Some(index) = selected_id
            .and_then(|id| self.entries.iter().position(|entry| entry.id == id))
        {
            Some(index)
        } else {
            self.selected.map(|index| index.min(self.entries.len() - 1))
        };
    }

    pub fn selected_entry(&self) -> Option<&MovieSearchResult> {
        self.selected.and_then(|index| self.entries.get(index))
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) if index + 1 < self.entries.len() => index + 1,
            Some(index) => index,
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |index| index.saturating_sub(1)));
    }

    /// Selection intent for the highlighted entry.
    pub fn activate_selected(&self) -> Option<MovieSearchIntent> {
        self.selected_entry()
            .map(|entry| MovieSearchIntent::RestoreFromHistoryRequested {
                entry: entry.clone(),
            })
    }

    /// Selection intent for the entry drawn at (`col`, `row`), which also
    /// becomes the highlighted entry.
    pub fn activate_at(&mut self, area: Rect, col: u16, row: u16) -> Option<MovieSearchIntent> {
        let entry = self.entry_at(area, col, row)?.clone();
        self.selected = self.entries.iter().position(|candidate| candidate == &entry);
        Some(MovieSearchIntent::RestoreFromHistoryRequested { entry })
    }

    pub fn entry_at(&self, area: Rect, col: u16, row: u16) -> Option<&MovieSearchResult> {
        let position = Position::new(col, row);
        self.item_areas(area)
            .into_iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, entry)| entry)
    }

    /// Screen rectangles of the visible entries, scrolled so the selection
    /// stays in view.
    pub fn item_areas(&self, area: Rect) -> Vec<(Rect, &MovieSearchResult)> {
        if area.width == 0 || area.height == 0 {
            return Vec::new();
        }

        let capacity = ((area.width + ITEM_GAP) / (ITEM_WIDTH + ITEM_GAP)).max(1) as usize;
        let first = match self.selected {
            Some(index) if index >= capacity => index + 1 - capacity,
            _ => 0,
        };

        self.entries
            .iter()
            .enumerate()
            .skip(first)
            .take(capacity)
            .filter_map(|(index, entry)| {
                let offset = (index - first) as u16 * (ITEM_WIDTH + ITEM_GAP);
                let x = area.x.checked_add(offset)?;
                if x >= area.right() {
                    return None;
                }
                let width = ITEM_WIDTH.min(area.right() - x);
                Some((Rect::new(x, area.y, width, area.height), entry))
            })
            .collect()
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        if self.entries.is_empty() {
            Paragraph::new(Line::styled(
                " No history yet. Activate the poster to add the current movie.",
                Style::default().fg(MUTED_TEXT),
            ))
            .render(area, buf);
            return;
        }

        let selected_id = self.selected_entry().map(|entry| entry.id.as_str());
        for (rect, entry) in self.item_areas(area) {
            let is_selected = focused && selected_id == Some(entry.id.as_str());
            let border_style = if is_selected {
                Style::default().fg(ACCENT)
            } else {
                Style::default().fg(GLOBAL_BORDER)
            };
            let mut text_style = Style::default().fg(HEADER_TEXT);
            if is_selected {
                text_style = text_style.bg(ACTIVE_HIGHLIGHT).add_modifier(Modifier::BOLD);
            }

            let inner_width = rect.width.saturating_sub(2) as usize;
            let lines = vec![
                Line::styled(truncate(&entry.title, inner_width), text_style),
                Line::styled(
                    truncate(&entry.rating_summary(), inner_width),
                    Style::default().fg(MUTED_TEXT),
                ),
            ];

            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border_style),
                )
                .render(rect, buf);
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}
