//! The screen model: maps input to [`Session`] operations and search events
//! to cell colours.

use std::time::Instant;

use log::{error, info};
use pathgrid_core::config::{MAX_SPEED, MIN_SPEED, SPEED_STEP};
use pathgrid_core::{Config, Coord, GridError, MapGen, speed_to_delay};
use pathgrid_search::{Outcome, SchedulerEvent, SearchError, StepReport};
use pathgrid_term::{
    AttrMask, Canvas, Color, Effect, Glyph, Key, Model, MouseAction, Msg, Style,
};
use rand::rngs::StdRng;

use crate::colors::*;
use crate::session::{Session, SessionError};

/// Screen rows above the grid (status line).
pub const HEADER_ROWS: i32 = 1;
/// Screen rows below the grid (key help).
pub const FOOTER_ROWS: i32 = 1;

const ALGORITHM: &str = "Dijkstra";

const HELP_TEXT: &str = "LMB wall  RMB start/end  Enter run  c clear paths  \
                         x clear all  m maze  +/- speed  Esc cancel  q quit";

/// Search state painted over an empty cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    Empty,
    /// Discovered, waiting in the frontier.
    Open,
    /// Settled.
    Closed,
    /// On the reconstructed path.
    Path,
}

/// The pathgrid application model.
pub struct Visualizer {
    session: Session,
    overlay: Vec<Overlay>,
    mapgen: MapGen<StdRng>,
    wall_density: f64,
    cell_width: i32,
    speed: f64,
    status: String,
    fatal: Option<SessionError>,
}

impl Visualizer {
    /// `speed` is the initial animation speed shown in the status line; the
    /// step delay itself comes from `config`.
    pub fn new(config: &Config, speed: f64, rng: StdRng) -> Result<Self, SessionError> {
        let session = Session::new(config)?;
        let cells = session.grid().bounds().len();
        Ok(Self {
            session,
            overlay: vec![Overlay::Empty; cells],
            mapgen: MapGen::new(rng),
            wall_density: config.wall_density,
            cell_width: i32::from(config.cell_width.max(1)),
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            status: String::new(),
            fatal: None,
        })
    }

    /// Terminal size needed to show the whole grid, as `(width, height)`.
    pub fn screen_size(config: &Config) -> (u16, u16) {
        let width = config.cols.saturating_mul(usize::from(config.cell_width.max(1)));
        let height = config.rows.saturating_add((HEADER_ROWS + FOOTER_ROWS) as usize);
        (
            u16::try_from(width).unwrap_or(u16::MAX),
            u16::try_from(height).unwrap_or(u16::MAX),
        )
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The error that stopped the application, if any.
    #[inline]
    pub fn fatal(&self) -> Option<&SessionError> {
        self.fatal.as_ref()
    }

    /// Overlay at a grid coordinate; `Empty` outside the grid.
    pub fn overlay_at(&self, p: Coord) -> Overlay {
        self.session
            .grid()
            .bounds()
            .index(p)
            .map(|i| self.overlay[i])
            .unwrap_or_default()
    }

    /// Grid cell under a screen position.
    pub fn screen_to_cell(&self, pos: Coord) -> Option<Coord> {
        if pos.col < 0 {
            return None;
        }
        let p = Coord::new(pos.row - HEADER_ROWS, pos.col / self.cell_width);
        self.session.grid().contains(p).then_some(p)
    }

    // -- overlay --

    /// Paint `p` unless it is a wall or an endpoint, which keep their own
    /// colour.
    fn paint(&mut self, p: Coord, overlay: Overlay) {
        let grid = self.session.grid();
        let Some(cell) = grid.cell(p) else {
            return;
        };
        if cell.wall || cell.is_endpoint() {
            return;
        }
        if let Some(i) = grid.bounds().index(p) {
            self.overlay[i] = overlay;
        }
    }

    fn reset_overlay(&mut self) {
        self.overlay.fill(Overlay::Empty);
    }

    fn unpaint(&mut self, p: Coord) {
        if let Some(i) = self.session.grid().bounds().index(p) {
            self.overlay[i] = Overlay::Empty;
        }
    }

    fn paint_report(&mut self, report: &StepReport) {
        for d in &report.discovered {
            if !d.endpoint {
                self.paint(d.pos, Overlay::Open);
            }
        }
        if let Some(p) = report.settled {
            self.paint(p, Overlay::Closed);
        }
    }

    fn apply(&mut self, event: SchedulerEvent) {
        match event {
            SchedulerEvent::Step(report) => self.paint_report(&report),
            SchedulerEvent::Finished { report, outcome } => {
                self.paint_report(&report);
                match outcome {
                    Outcome::PathFound(path) => {
                        for &p in path.interior() {
                            self.paint(p, Overlay::Path);
                        }
                        self.status = format!("Path length: {}", path.length());
                    }
                    Outcome::NoPath => self.status = "No path found.".to_string(),
                }
            }
        }
    }

    // -- actions --

    fn report(&mut self, e: SessionError) {
        self.status = match e {
            SessionError::Busy => "Busy: search running".to_string(),
            SessionError::NotReady | SessionError::Search(SearchError::InvalidEndpoints { .. }) => {
                "Set start and end first.".to_string()
            }
            e => e.to_string(),
        };
    }

    fn run(&mut self, now: Instant) {
        match self.session.run(now) {
            Ok(_) => {
                self.reset_overlay();
                self.status = "Searching".to_string();
            }
            Err(e) => self.report(e),
        }
    }

    fn clear_paths(&mut self) {
        match self.session.clear_paths() {
            Ok(()) => {
                self.reset_overlay();
                self.status.clear();
            }
            Err(e) => self.report(e),
        }
    }

    fn clear_all(&mut self) {
        self.session.cancel();
        match self.session.clear_all() {
            Ok(()) => {
                self.reset_overlay();
                self.status.clear();
            }
            Err(e) => self.report(e),
        }
    }

    fn random_maze(&mut self) {
        match self.session.random_maze(&mut self.mapgen, self.wall_density) {
            Ok(walls) => {
                self.reset_overlay();
                self.status = format!("Random maze: {walls} walls");
            }
            Err(e) => self.report(e),
        }
    }

    fn change_speed(&mut self, delta: f64) {
        let speed = ((self.speed + delta) * 100.0).round() / 100.0;
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self.session.set_delay(speed_to_delay(self.speed));
    }

    fn cancel(&mut self) {
        if self.session.cancel() {
            self.status = "Search cancelled.".to_string();
        }
    }

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('q') => return Some(Effect::End),
            Key::Enter | Key::Char('r') => self.run(Instant::now()),
            Key::Char('c') => self.clear_paths(),
            Key::Char('x') => self.clear_all(),
            Key::Char('m') => self.random_maze(),
            Key::Char('+') | Key::Char('=') => self.change_speed(SPEED_STEP),
            Key::Char('-') | Key::Char('_') => self.change_speed(-SPEED_STEP),
            Key::Escape => self.cancel(),
            _ => {}
        }
        None
    }

    fn on_mouse(&mut self, action: MouseAction, pos: Coord) {
        let Some(p) = self.screen_to_cell(pos) else {
            return;
        };
        let result = match action {
            MouseAction::Main => self.session.toggle_wall(p).map(drop),
            MouseAction::Drag => self.session.paint_wall(p).map(drop),
            MouseAction::Secondary => self.session.cycle_endpoint(p).map(drop),
            MouseAction::Auxiliary | MouseAction::Release => return,
        };
        match result {
            Ok(()) => self.unpaint(p),
            // Clicks that would break a cell invariant are no-ops.
            Err(SessionError::Grid(GridError::Rejected { .. })) => {}
            Err(e) => self.report(e),
        }
    }

    fn on_tick(&mut self, now: Instant) -> Option<Effect> {
        match self.session.tick(now) {
            Ok(Some(event)) => self.apply(event),
            Ok(None) => {}
            Err(e) => {
                error!("search aborted: {e}");
                self.fatal = Some(e);
                return Some(Effect::End);
            }
        }
        None
    }

    // -- drawing --

    fn cell_color(&self, p: Coord) -> Color {
        let Some(cell) = self.session.grid().cell(p) else {
            return BG;
        };
        if cell.wall {
            WALL
        } else if cell.is_start {
            START
        } else if cell.is_end {
            END
        } else {
            match self.overlay_at(p) {
                Overlay::Empty => GRID,
                Overlay::Open => OPEN,
                Overlay::Closed => CLOSED,
                Overlay::Path => PATH,
            }
        }
    }

    fn status_line(&self) -> String {
        let mut line = format!(" {ALGORITHM}  speed {:.2}", self.speed);
        if !self.status.is_empty() {
            line.push_str("  ");
            line.push_str(&self.status);
        }
        line
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                let grid = self.session.grid();
                info!("pathgrid ready: {}", grid.bounds());
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::Tick(now) => self.on_tick(now),
            Msg::KeyDown { key, .. } => self.on_key(key),
            Msg::Mouse { action, pos, .. } => {
                self.on_mouse(action, pos);
                None
            }
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        let text = Style::default().with_fg(TEXT).with_bg(BG);
        canvas.fill(Glyph::new(' ', text));
        canvas.text(
            Coord::ORIGIN,
            &self.status_line(),
            text.with_attrs(AttrMask::BOLD),
        );

        for p in self.session.grid().bounds() {
            let glyph = Glyph::new(' ', Style::default().with_bg(self.cell_color(p)));
            let row = p.row + HEADER_ROWS;
            for dx in 0..self.cell_width {
                canvas.set(Coord::new(row, p.col * self.cell_width + dx), glyph);
            }
        }

        let footer = self.session.grid().rows() + HEADER_ROWS;
        canvas.text(
            Coord::new(footer, 0),
            HELP_TEXT,
            text.with_attrs(AttrMask::DIM),
        );
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.session.next_due()
    }
}
