//! Main TUI application state and logic

use crate::dispatch::AlgorithmSpec;
use crate::playback::{Clock, PlaybackEngine, SystemClock};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Multiplier change per `+`/`-` press
pub const SPEED_STEP: f64 = 0.25;

/// How long the event loop waits for input before polling the engine again
const INPUT_POLL: Duration = Duration::from_millis(50);

/// The main application state
pub struct App<C: Clock = SystemClock> {
    /// Playback over the loaded run; the only source of what is drawn
    pub engine: PlaybackEngine<C>,

    /// Registry entry of the algorithm being shown
    pub spec: &'static AlgorithmSpec,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl<C: Clock> App<C> {
    pub fn new(engine: PlaybackEngine<C>, spec: &'static AlgorithmSpec) -> Self {
        let status_message = if engine.is_playing() {
            "Playing...".to_string()
        } else {
            "Ready!".to_string()
        };
        App {
            engine,
            spec,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let was_playing = self.engine.is_playing();
            self.engine.poll();
            if was_playing && !self.engine.is_playing() {
                self.status_message = "Playback complete".to_string();
            }

            if event::poll(INPUT_POLL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Structure (top) | Pseudocode (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        let step = self.engine.current_step();

        super::panes::render_structure_pane(frame, left_rows[0], self.spec.name, step);
        super::panes::render_pseudocode_pane(
            frame,
            left_rows[1],
            self.spec.pseudocode,
            step.and_then(|s| s.line),
        );
        super::panes::render_inspector_pane(frame, columns[1], step, self.engine.summary());

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &super::panes::StatusRenderData {
                message: &self.status_message,
                cursor: self.engine.cursor(),
                total: self.engine.len(),
                speed: self.engine.speed(),
                is_playing: self.engine.is_playing(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.engine.toggle();
                self.status_message = if self.engine.is_playing() {
                    "Playing...".to_string()
                } else {
                    "Paused".to_string()
                };
            }
            KeyCode::Right => {
                self.engine.step_forward();
                self.status_message = "Stepped forward".to_string();
            }
            KeyCode::Left => {
                self.engine.step_backward();
                self.status_message = "Stepped backward".to_string();
            }
            KeyCode::Enter => {
                self.engine.pause();
                self.engine.jump_to_end();
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.engine.reset();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.engine.set_speed(self.engine.speed() + SPEED_STEP);
                self.status_message = format!("Speed {:.2}x", self.engine.speed());
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.engine.set_speed(self.engine.speed() - SPEED_STEP);
                self.status_message = format!("Speed {:.2}x", self.engine.speed());
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{lookup, Dispatcher, RawInput};
    use crate::playback::{ManualClock, PlaybackSettings};
    use crossterm::event::KeyModifiers;

    fn app() -> App<ManualClock> {
        let spec = lookup("bubble-sort").unwrap();
        let run = Dispatcher::with_seed(Some(1))
            .run(spec.id, &RawInput::sample(spec))
            .unwrap();
        let mut engine = PlaybackEngine::with_clock(PlaybackSettings::default(), ManualClock::new());
        engine.load(run);
        App::new(engine, spec)
    }

    fn press(app: &mut App<ManualClock>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn arrows_move_the_cursor() {
        let mut app = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.engine.cursor(), 1);
    }

    #[test]
    fn enter_and_backspace_jump() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.engine.cursor(), app.engine.len() - 1);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.engine.cursor(), 0);
    }

    #[test]
    fn space_toggles_playback() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.engine.is_playing());
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.engine.is_playing());
    }

    #[test]
    fn speed_keys_are_clamped() {
        let mut app = app();
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(app.engine.speed(), 3.0);
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.engine.speed(), 0.25);
    }

    #[test]
    fn q_quits() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
