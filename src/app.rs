//! App: terminal init, main loop, key/mouse/resize handling.

use crate::GameConfig;
use crate::input::{Action, PointerEvent, key_to_action, mouse_to_pointer};
use crate::session::Session;
use crate::theme::Theme;
use crate::ui::{self, Flash};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// One scheduler pass per frame (~60 Hz).
const FRAME: Duration = Duration::from_millis(16);

pub struct App {
    theme: Theme,
    session: Session,
    /// Playfield rect in terminal cells; pointer coordinates are mapped through it.
    field: Rect,
    flash: Flash,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme) -> Self {
        // Real size is applied in `run` once the terminal is up.
        let field = ui::field_rect(Rect::new(0, 0, 80, 30));
        let (w, h) = ui::logical_size(field);
        Self {
            theme,
            session: Session::new(config, w, h, Instant::now()),
            field,
            flash: Flash::default(),
        }
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        self.field = ui::field_rect(Rect::new(0, 0, cols, rows));
        let (w, h) = ui::logical_size(self.field);
        self.session.resize(w, h);
    }

    fn on_pointer(&mut self, ev: PointerEvent, now: Instant) {
        match ev {
            PointerEvent::Down { pointer, col, row } => {
                let pos = ui::to_logical(self.field, col, row);
                // rejected grabs are already logged by the session
                let _ = self.session.pointer_down(pointer, pos);
            }
            PointerEvent::Move { pointer, col, row } => {
                let pos = ui::to_logical(self.field, col, row);
                self.session.pointer_move(pointer, pos);
            }
            PointerEvent::Up { pointer } => self.session.pointer_up(pointer, now),
        }
    }

    fn restart(&mut self, now: Instant) {
        self.session.restart(now);
        self.flash.clear();
    }

    fn toggle_pause(&mut self, now: Instant) {
        if self.session.is_paused() {
            self.session.resume(now);
        } else {
            self.session.pause(now);
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
            execute,
            terminal::{
                EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size,
            },
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange
        )?;

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let (cols, rows) = size()?;
        self.on_resize(cols, rows);
        self.restart(Instant::now());
        info!(cols, rows, "game started");

        let result = self.run_loop(&mut terminal);

        // No spawn or capture may outlive the loop.
        self.session.shutdown();
        info!(score = self.session.score(), "game closed");

        // Restore
        execute!(
            std::io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            self.session.tick(now);
            for r in self.session.drain_resolutions() {
                self.flash.trigger(r);
            }

            terminal.draw(|f| ui::draw(f, &self.session, &self.theme, &mut self.flash, now))?;
            self.flash.reap();

            let timeout = FRAME.saturating_sub(now.elapsed());
            if !event::poll(timeout)? {
                continue;
            }
            while event::poll(Duration::ZERO)? {
                let now = Instant::now();
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match key_to_action(key) {
                            Action::Quit => return Ok(()),
                            Action::Restart => self.restart(now),
                            Action::Pause => self.toggle_pause(now),
                            Action::None => {}
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Some(ev) = mouse_to_pointer(mouse) {
                            self.on_pointer(ev, now);
                        }
                    }
                    Event::Resize(cols, rows) => self.on_resize(cols, rows),
                    // button-up events can be lost while unfocused
                    Event::FocusLost => self.session.cancel_gestures(now),
                    other => debug!(?other, "ignored terminal event"),
                }
            }
        }
    }
}
