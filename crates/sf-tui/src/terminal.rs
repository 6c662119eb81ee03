//! Terminal ownership and the event loop.
//!
//! The loop redraws, waits for input no longer than the next chat reply is
//! due, routes the event through [`TuiApp::handle_event`], then delivers any
//! replies that came due in the meantime.

use std::io::{self, Stdout};
use std::time::Instant;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::TuiApp;
use crate::shared::draw_help_popup;
use crate::tabs::draw_tab_bar;

/// Raw mode, alternate screen and mouse capture, undone on drop so an
/// error in the loop still leaves a usable shell.
struct Screen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Screen {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            disable_raw_mode().ok();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                disable_raw_mode().ok();
                execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).ok();
                Err(e)
            }
        }
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .ok();
        self.terminal.show_cursor().ok();
    }
}

/// Take over the terminal and run the app until it quits.
pub fn run(mut app: TuiApp) -> Result<(), String> {
    let mut screen = Screen::enter().map_err(|e| format!("terminal error: {e}"))?;
    tracing::info!(tab = ?app.active_tab, "tui started");

    while !app.should_quit {
        screen
            .terminal
            .draw(|frame| draw(frame, &app))
            .map_err(|e| format!("draw error: {e}"))?;

        let timeout = app.poll_timeout(Instant::now());
        if event::poll(timeout).map_err(|e| format!("event error: {e}"))? {
            let event = event::read().map_err(|e| format!("event error: {e}"))?;
            app.handle_event(event);
        }
        app.tick(Instant::now());
    }

    tracing::info!("tui stopped");
    Ok(())
}

/// Tab bar on the first row, the active tab, and its key hints on the last.
fn draw(frame: &mut Frame, app: &TuiApp) {
    let [bar, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_tab_bar(frame, app.active_tab, bar);
    app.draw_active(frame, body);
    frame.render_widget(
        Paragraph::new(app.active_tab_ref().status_hint())
            .style(Style::default().fg(Color::Black).bg(Color::White)),
        status,
    );

    if app.show_help {
        draw_help_popup(frame);
    }
}
