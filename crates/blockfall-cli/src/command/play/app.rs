use std::time::Duration;

use blockfall_engine::{Command, Session, SessionConfig};
use blockfall_runtime::{App, RenderMode, Runtime};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::ui::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Game(Command),
    TogglePause,
    Quit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        match event.code {
            KeyCode::Char('h') | KeyCode::Left => Some(Self::Game(Command::MoveLeft)),
            KeyCode::Char('l') | KeyCode::Right => Some(Self::Game(Command::MoveRight)),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::Game(Command::SoftDrop)),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::Game(Command::Rotate)),
            KeyCode::Char('p') => Some(Self::TogglePause),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    fn bindings(paused: bool, game_over: bool) -> &'static [KeyBinding<'static>] {
        if game_over {
            &[(&["q", "Esc"], "Quit")]
        } else if paused {
            &[(&["p"], "Resume"), (&["q", "Esc"], "Quit")]
        } else {
            &[
                (&["h", "←"], "Left"),
                (&["l", "→"], "Right"),
                (&["j", "↓"], "Soft Drop"),
                (&["k", "↑"], "Rotate"),
                (&["p"], "Pause"),
                (&["q", "Esc"], "Quit"),
            ]
        }
    }
}

/// Interactive play: buffers key presses and feeds them to the session on each tick.
#[derive(Debug)]
pub struct PlayApp {
    session: Session,
    fps: f64,
    pending: Vec<Command>,
    paused: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(fps: f64, config: SessionConfig) -> Self {
        Self {
            session: Session::with_config(config),
            fps,
            pending: Vec::new(),
            paused: false,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn is_playing(&self) -> bool {
        !self.is_exiting && !self.paused && self.session.state().is_running()
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Game(command) if self.is_playing() => self.pending.push(command),
            Action::Game(_) => {}
            Action::TogglePause if self.session.state().is_running() => {
                self.paused = !self.paused;
                // Keys pressed before pausing must not leak into the resumed game
                self.pending.clear();
            }
            Action::TogglePause => {}
            Action::Quit => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(self.fps));
        runtime.set_render_mode(RenderMode::throttled_from_rate(self.fps));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: Event) {
        if let Some(event) = event.as_key_event()
            && let Some(action) = Action::from_key_event(&event)
        {
            self.handle_action(action);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let game_over = self.session.state().is_game_over();
        let session_display = SessionDisplay::new(&self.session).paused(self.paused);
        let help = KeyBindingDisplay::new(Action::bindings(self.paused, game_over));

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(23), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        if !self.is_playing() {
            return;
        }
        self.session.step(self.pending.drain(..), elapsed);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{GameOverRule, PieceSeed};
    use crossterm::event::KeyModifiers;

    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn app() -> PlayApp {
        PlayApp::new(
            60.0,
            SessionConfig {
                seed: Some(PieceSeed::from_bytes([3; 16])),
                game_over_rule: GameOverRule::LockAboveTop,
            },
        )
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_key_mapping() {
        let cases = [
            (KeyCode::Left, Some(Action::Game(Command::MoveLeft))),
            (KeyCode::Char('h'), Some(Action::Game(Command::MoveLeft))),
            (KeyCode::Right, Some(Action::Game(Command::MoveRight))),
            (KeyCode::Char('l'), Some(Action::Game(Command::MoveRight))),
            (KeyCode::Down, Some(Action::Game(Command::SoftDrop))),
            (KeyCode::Char('j'), Some(Action::Game(Command::SoftDrop))),
            (KeyCode::Up, Some(Action::Game(Command::Rotate))),
            (KeyCode::Char('k'), Some(Action::Game(Command::Rotate))),
            (KeyCode::Char('p'), Some(Action::TogglePause)),
            (KeyCode::Char('q'), Some(Action::Quit)),
            (KeyCode::Esc, Some(Action::Quit)),
            (KeyCode::Char('x'), None),
        ];
        for (code, expected) in cases {
            let event = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(Action::from_key_event(&event), expected, "{code:?}");
        }
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut event = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(Action::from_key_event(&event), None);
    }

    #[test]
    fn test_commands_wait_for_next_tick() {
        let mut app = app();
        let mut runtime = Runtime::new();
        let x = app.session().piece().x();

        app.handle_event(&mut runtime, key(KeyCode::Left));
        app.handle_event(&mut runtime, key(KeyCode::Left));
        assert_eq!(app.session().piece().x(), x);

        app.update(&mut runtime, FRAME);
        assert_eq!(app.session().piece().x(), x - 2);
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_pause_stops_time() {
        let mut app = app();
        let mut runtime = Runtime::new();

        app.handle_event(&mut runtime, key(KeyCode::Char('p')));
        app.update(&mut runtime, Duration::from_secs(10));
        assert_eq!(app.session().elapsed(), Duration::ZERO);
        assert_eq!(app.session().piece().y(), 0);

        // Input while paused is dropped
        app.handle_event(&mut runtime, key(KeyCode::Left));
        assert!(app.pending.is_empty());

        app.handle_event(&mut runtime, key(KeyCode::Char('p')));
        app.update(&mut runtime, FRAME);
        assert_eq!(app.session().elapsed(), FRAME);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        let mut runtime = Runtime::new();
        assert!(!app.should_exit());
        app.handle_event(&mut runtime, key(KeyCode::Char('q')));
        assert!(app.should_exit());
    }
}
