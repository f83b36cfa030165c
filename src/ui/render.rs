use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{centered_rect_by_size, layout_regions, ScreenLayout};
use crate::ui::poster::PosterView;
use crate::ui::screen::{Focus, MovieSearchScreen};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, POPUP_BORDER, STATUS_OK,
};
use ratatui::layout::{Alignment, Position};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(GLOBAL_BORDER)
    }
}

/// Draw the whole screen and return the layout used, for mouse hit-testing.
pub fn draw(frame: &mut Frame<'_>, screen: &MovieSearchScreen) -> ScreenLayout {
    let area = frame.area();
    let layout = ScreenLayout::compute(area);
    let widgets = screen.widgets();
    let focus = screen.focus();

    frame.render_widget(
        Header::new().widget(widgets.history.entries().len(), screen.is_active()),
        layout.header,
    );

    // Search box
    let search_block = Block::default()
        .title(" Search ")
        .borders(Borders::ALL)
        .border_style(border_style(focus == Focus::SearchBox));
    frame.render_widget(
        Paragraph::new(widgets.search_text.as_str())
            .style(Style::default().fg(HEADER_TEXT))
            .block(search_block),
        layout.search_box,
    );
    if focus == Focus::SearchBox && layout.search_box.width > 2 && layout.search_box.height > 2 {
        let typed = u16::try_from(widgets.search_text.chars().count()).unwrap_or(u16::MAX);
        let max_x = layout.search_box.right().saturating_sub(2);
        let x = layout
            .search_box
            .x
            .saturating_add(1)
            .saturating_add(typed)
            .min(max_x);
        frame.set_cursor_position(Position::new(x, layout.search_box.y + 1));
    }

    // Search button
    let mut button_style = Style::default().fg(HEADER_TEXT);
    if focus == Focus::SearchButton {
        button_style = button_style.bg(ACTIVE_HIGHLIGHT).add_modifier(Modifier::BOLD);
    }
    frame.render_widget(
        Paragraph::new("Search")
            .alignment(Alignment::Center)
            .style(button_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style(focus == Focus::SearchButton)),
            ),
        layout.search_button,
    );

    // Poster
    let mut poster_border = border_style(focus == Focus::Poster);
    if screen.poster_pulse_active() {
        poster_border = Style::default().fg(STATUS_OK).add_modifier(Modifier::BOLD);
    }
    let poster_block = Block::default()
        .borders(Borders::ALL)
        .border_style(poster_border);
    let poster_inner = poster_block.inner(layout.poster);
    frame.render_widget(poster_block, layout.poster);
    match &widgets.poster {
        PosterView::Empty => {}
        PosterView::Loading { .. } => {
            frame.render_widget(
                Paragraph::new(screen.spinner())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(ACCENT)),
                centered_rect_by_size(poster_inner, poster_inner.width, 1),
            );
        }
        PosterView::Ready { art, .. } => art.render(poster_inner, frame.buffer_mut()),
        PosterView::Unavailable { url, .. } => {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::styled("no preview", Style::default().fg(MUTED_TEXT)),
                    Line::from(""),
                    Line::styled(url.as_str(), Style::default().fg(MUTED_TEXT)),
                ])
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
                poster_inner,
            );
        }
    }

    // Title and rating
    let mut details = vec![
        Line::styled(
            widgets.title.as_str(),
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::styled("Rating: ", Style::default().fg(MUTED_TEXT)),
            Span::styled(widgets.rating.as_str(), Style::default().fg(HEADER_TEXT)),
        ]),
    ];
    if screen.poster_is_interactive() {
        details.push(Line::from(""));
        details.push(Line::styled(
            "Activate the poster to add it to history.",
            Style::default().fg(MUTED_TEXT),
        ));
    }
    frame.render_widget(
        Paragraph::new(details).wrap(Wrap { trim: true }),
        layout.details.inner(ratatui::layout::Margin::new(2, 1)),
    );

    // History strip
    let history_block = Block::default()
        .title(" Recent ")
        .borders(Borders::TOP)
        .border_style(border_style(focus == Focus::History));
    let history_inner = history_block.inner(layout.history);
    frame.render_widget(history_block, layout.history);
    widgets
        .history
        .render(history_inner, frame.buffer_mut(), focus == Focus::History);

    frame.render_widget(Footer::new(focus).widget(layout.footer), layout.footer);

    if let Some(toast) = screen.toast() {
        let (_, body, _) = layout_regions(area);
        let width = toast.message.chars().count() as u16 + 4;
        let popup = centered_rect_by_size(body, width, 3);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(toast.message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(HEADER_TEXT))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(POPUP_BORDER)),
                ),
            popup,
        );
    }

    layout
}

/// Inner area of the history strip, as drawn by [`draw`].
pub fn history_inner(layout: &ScreenLayout) -> ratatui::layout::Rect {
    Block::default().borders(Borders::TOP).inner(layout.history)
}
