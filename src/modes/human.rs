use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::cell::Cell;
use std::io::{stderr, Stderr};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

use crate::animation::{Animator, Easing};
use crate::game::{EventQueue, GameEvent, GameOverReport, GameSession, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::render::{Overlay, Renderer};

const SCORE_FLASH: &str = "score_flash";
const PANEL_REVEAL: &str = "panel_reveal";

/// Interactive play in the terminal
pub struct HumanMode {
    session: GameSession,
    events: EventQueue,
    animator: Animator,
    score_flash: Rc<Cell<f64>>,
    panel_reveal: Rc<Cell<f64>>,
    last_report: Option<GameOverReport>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// Wrap a session; listeners such as the high score recorder should be
    /// subscribed before this.
    pub fn new(mut session: GameSession, renderer: Renderer) -> Self {
        let events = EventQueue::new();
        session.subscribe(events.clone());

        Self {
            session,
            events,
            animator: Animator::new(),
            score_flash: Rc::new(Cell::new(0.0)),
            panel_reveal: Rc::new(Cell::new(1.0)),
            last_report: None,
            renderer,
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The frame timer drives both the tick clock and the animations
        let mut frame_timer = interval(Duration::from_millis(16));
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let started = Instant::now();
        let mut last_frame = started;

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    let delta_ms = now.duration_since(last_frame).as_millis() as u64;
                    last_frame = now;

                    self.update(delta_ms, now.duration_since(started).as_secs_f64() * 1000.0);

                    let overlay = self.overlay();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.session.state(), &overlay);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(high_score = self.session.state().high_score, "quitting");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.session.submit_direction(direction);
                }
                KeyAction::StartOrPause => self.start_or_pause(),
                KeyAction::Restart => {
                    if self.session.restart() {
                        self.clear_effects();
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn start_or_pause(&mut self) {
        match self.session.phase() {
            Phase::NotStarted | Phase::GameOver => {
                if self.session.start() {
                    self.clear_effects();
                }
            }
            Phase::Running | Phase::Paused => {
                self.session.pause();
            }
        }
    }

    /// Advance the simulation, then start effects for whatever it reported
    fn update(&mut self, delta_ms: u64, now_ms: f64) {
        self.session.advance(delta_ms);

        for event in self.events.drain() {
            match event {
                GameEvent::FoodEaten { .. } => {
                    let flash = Rc::clone(&self.score_flash);
                    self.animator.schedule_at(
                        SCORE_FLASH,
                        now_ms,
                        1.0,
                        0.0,
                        400.0,
                        Easing::EaseOut,
                        move |value, _| flash.set(value),
                    );
                }
                GameEvent::GameOver(report) => {
                    self.last_report = Some(report);
                    self.panel_reveal.set(0.0);
                    let reveal = Rc::clone(&self.panel_reveal);
                    self.animator.schedule_at(
                        PANEL_REVEAL,
                        now_ms,
                        0.0,
                        1.0,
                        700.0,
                        Easing::Bounce,
                        move |value, _| reveal.set(value),
                    );
                }
                GameEvent::StateChanged { .. } => {}
            }
        }

        self.animator.advance(now_ms);
    }

    fn clear_effects(&mut self) {
        self.animator.cancel_all();
        self.score_flash.set(0.0);
        self.panel_reveal.set(1.0);
        self.last_report = None;
        self.events.drain();
    }

    fn overlay(&self) -> Overlay {
        Overlay {
            score_flash: self.score_flash.get(),
            panel_reveal: self.panel_reveal.get(),
            new_high_score: self
                .last_report
                .map_or(false, |report| report.is_new_high_score()),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
