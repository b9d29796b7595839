use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};
use tracing::{debug, info};

use crate::game::{GameConfig, TickOutcome};
use crate::input::{Command, InputEvent, InputRouter};
use crate::metrics::GameMetrics;
use crate::persistence::JsonFileStore;
use crate::render::{LatestSnapshot, Renderer};
use crate::session::{Phase, Session};

/// Approximate size of a terminal cell in device-independent pixels, used
/// to turn mouse drags into swipes
const CELL_WIDTH_PX: f32 = 8.0;
const CELL_HEIGHT_PX: f32 = 16.0;

pub struct HumanMode {
    session: Session<JsonFileStore, LatestSnapshot, StdRng>,
    metrics: GameMetrics,
    renderer: Renderer,
    router: InputRouter,
    should_quit: bool,
    notice: Option<String>,
}

impl HumanMode {
    /// Set up the session; a seed makes food placement repeatable
    pub fn new(config: GameConfig, store: JsonFileStore, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Session::with_rng(&config, store, LatestSnapshot::new(), rng)
            .context("Failed to set up game session")?;
        let notice = session.take_storage_warning();

        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            router: InputRouter::new(config.swipe_threshold),
            should_quit: false,
            notice,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The tick timer follows the session's timer and is rebuilt whenever
        // the session arms a new one
        let mut tick_timer: Option<Interval> = None;
        let mut armed_generation = 0;

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            self.sync_tick_timer(&mut tick_timer, &mut armed_generation);

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = next_tick(&mut tick_timer) => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    if let Some(snapshot) = self.session.display().latest() {
                        terminal.draw(|frame| {
                            self.renderer.render(frame, snapshot, &self.metrics, self.notice.as_deref());
                        }).context("Failed to draw frame")?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("quitting");
                break;
            }
        }

        Ok(())
    }

    /// Keep exactly one local interval in step with the session's timer
    fn sync_tick_timer(&self, tick_timer: &mut Option<Interval>, armed_generation: &mut u64) {
        let timer = self.session.timer();
        match timer.interval() {
            None => *tick_timer = None,
            Some(period) => {
                if tick_timer.is_none() || *armed_generation != timer.generation() {
                    let mut ticks = interval_at(Instant::now() + period, period);
                    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
                    *tick_timer = Some(ticks);
                    *armed_generation = timer.generation();
                    debug!(?period, generation = timer.generation(), "tick timer armed");
                }
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let input = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => InputEvent::KeyDown(key),
            Event::Mouse(mouse) => {
                let x = f32::from(mouse.column) * CELL_WIDTH_PX;
                let y = f32::from(mouse.row) * CELL_HEIGHT_PX;
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => InputEvent::SwipeStart { x, y },
                    MouseEventKind::Up(MouseButton::Left) => InputEvent::SwipeEnd { x, y },
                    _ => return,
                }
            }
            _ => return,
        };

        let Some(command) = self.router.route(input, self.session.phase()) else {
            return;
        };

        if command == Command::Quit {
            self.should_quit = true;
            return;
        }

        self.notice = None;
        let phase_before = self.session.phase();
        let runs_before = self.session.runs_started();
        self.session.apply(command);
        self.track_transition(phase_before, runs_before);
    }

    fn update_game(&mut self) {
        let phase_before = self.session.phase();
        let runs_before = self.session.runs_started();

        if let Some(TickOutcome::Moved { ate_food: true, .. }) = self.session.tick() {
            self.metrics.on_food_eaten();
        }

        self.track_transition(phase_before, runs_before);
    }

    /// Feed phase changes into the run clock and surface storage warnings
    fn track_transition(&mut self, phase_before: Phase, runs_before: u64) {
        let phase = self.session.phase();

        if self.session.runs_started() != runs_before {
            self.metrics.on_game_start();
            if phase == Phase::GameOver {
                self.metrics.on_game_over();
            }
        } else if phase != phase_before {
            match (phase_before, phase) {
                (Phase::Running, Phase::Paused) => self.metrics.on_pause(),
                (Phase::Paused, Phase::Running) => self.metrics.on_resume(),
                (Phase::Running, Phase::GameOver) => self.metrics.on_game_over(),
                _ => {}
            }
        }

        if let Some(warning) = self.session.take_storage_warning() {
            self.notice = Some(warning);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Wait for the next tick, or forever while no timer is armed
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(ticks) => {
            ticks.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
