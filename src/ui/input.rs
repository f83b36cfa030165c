use crate::ui::layout::{contains, ScreenLayout};
use crate::ui::render::history_inner;
use crate::ui::screen::{Focus, MovieSearchScreen};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Route one terminal event to the screen.
pub fn handle_event(screen: &mut MovieSearchScreen, event: Event, layout: &ScreenLayout) {
    match event {
        Event::Key(key) => handle_key(screen, key),
        Event::Mouse(mouse) => handle_mouse(screen, mouse, layout),
        Event::Paste(text) => screen.on_paste(&text),
        Event::FocusGained => screen.on_resume(),
        Event::FocusLost => screen.on_pause(),
        // Resize only needs the redraw the runtime does after every event.
        _ => {}
    }
}

pub fn handle_key(screen: &mut MovieSearchScreen, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') || key.code == KeyCode::Esc {
        screen.request_quit();
        return;
    }

    match key.code {
        KeyCode::Tab => {
            screen.focus_next();
            return;
        }
        KeyCode::BackTab => {
            screen.focus_previous();
            return;
        }
        _ => {}
    }

    match screen.focus() {
        Focus::SearchBox => match key.code {
            KeyCode::Enter => screen.on_search_clicked(),
            KeyCode::Backspace => screen.delete_char(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                screen.insert_char(ch)
            }
            _ => {}
        },
        Focus::SearchButton => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                screen.on_search_clicked();
            }
        }
        Focus::Poster => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                screen.on_poster_clicked();
            }
        }
        Focus::History => match key.code {
            KeyCode::Left => screen.history_select_previous(),
            KeyCode::Right => screen.history_select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => screen.on_history_activated(),
            _ => {}
        },
    }
}

pub fn handle_mouse(screen: &mut MovieSearchScreen, mouse: MouseEvent, layout: &ScreenLayout) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let (col, row) = (mouse.column, mouse.row);

    if contains(layout.search_box, col, row) {
        screen.set_focus(Focus::SearchBox);
    } else if contains(layout.search_button, col, row) {
        screen.set_focus(Focus::SearchButton);
        screen.on_search_clicked();
    } else if contains(layout.poster, col, row) {
        screen.set_focus(Focus::Poster);
        screen.on_poster_clicked();
    } else if contains(layout.history, col, row) {
        screen.on_history_clicked(history_inner(layout), col, row);
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
