use std::io;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::time::{interval, MissedTickBehavior};

use crate::config::Config;
use crate::movies::MovieRepository;
use crate::ui::input::handle_event;
use crate::ui::layout::ScreenLayout;
use crate::ui::render::draw;
use crate::ui::screen::MovieSearchScreen;
use crate::ui::search::MovieSearchViewModel;
use crate::ui::terminal_guard::setup_terminal;

/// Run the movie search screen until the user quits or the terminal goes away.
pub async fn run(config: Config, repository: Arc<dyn MovieRepository>) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let view_model = MovieSearchViewModel::spawn(repository);
    let mut screen = MovieSearchScreen::new(view_model.bindings(), &config.ui);
    screen.on_resume();

    let mut events = EventStream::new();
    let mut ticker = interval(config.ui.tick_rate());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut layout = ScreenLayout::default();
    loop {
        terminal.draw(|frame| layout = draw(frame, &screen))?;
        if screen.should_quit() {
            break;
        }

        tokio::select! {
            _ = screen.handle_next_event() => {}
            input = events.next() => match input {
                Some(Ok(event)) => handle_event(&mut screen, event, &layout),
                Some(Err(err)) => {
                    tracing::error!(error = %err, "terminal input failed");
                    break;
                }
                None => break,
            },
            _ = ticker.tick() => screen.on_tick(Instant::now()),
            _ = &mut ctrl_c => screen.request_quit(),
        }
    }

    tracing::info!("shutting down");
    screen.on_destroy();
    drop(view_model);
    drop(guard);
    Ok(())
}
