//! The model/driver application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].
//!
//! Everything runs on the calling thread. Each iteration polls the driver
//! for input (waiting at most until the model's next deadline), appends a
//! [`Msg::Tick`], lets the model process every queued message in order,
//! then draws and flushes only the glyphs that changed.

use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use log::debug;

use crate::canvas::{Canvas, Frame};
use crate::messages::Msg;

/// Longest the loop waits for input when the model has no deadline.
const IDLE_POLL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token.
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// A side effect requested by [`Model::update`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Stop the application loop.
    End,
}

/// Application state driven by messages.
pub trait Model {
    /// Process a message, optionally returning a side effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the whole screen into `canvas`.
    fn draw(&self, canvas: &mut Canvas);

    /// The next instant at which the model wants a [`Msg::Tick`], if any.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }
}

/// Screen back-end.
pub trait Driver {
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input and push the resulting messages into
    /// `tx`. Must return early once `ctx.is_done()`.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn Error>>;

    /// Write changed glyphs to the screen.
    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>>;

    /// Restore the screen. Called exactly once when the loop ends, even on
    /// error.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Runs a [`Model`] against a [`Driver`].
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: u16,
    height: u16,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(model: M, driver: D, width: u16, height: u16) -> Self {
        Self {
            model,
            driver,
            width,
            height,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_parts(self) -> (M, D) {
        (self.model, self.driver)
    }

    /// Run until the model returns [`Effect::End`] or a driver call fails.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        // `prev` starts at a different size so the first flush is complete.
        let mut prev = Canvas::new(0, 0);
        let mut curr = Canvas::new(self.width, self.height);

        loop {
            self.process_pending(&rx, &ctx, &mut prev, &mut curr)?;
            if ctx.is_done() {
                break;
            }

            let now = Instant::now();
            let timeout = self
                .model
                .next_deadline()
                .map(|t| t.saturating_duration_since(now).min(IDLE_POLL))
                .unwrap_or(IDLE_POLL);
            self.driver.poll_msgs(&ctx, timeout, &tx)?;
            if ctx.is_done() {
                break;
            }
            tx.send(Msg::Tick(Instant::now())).ok();
        }
        debug!("app loop finished");
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev: &mut Canvas,
        curr: &mut Canvas,
    ) -> Result<(), Box<dyn Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { width, height } = msg {
                self.width = width;
                self.height = height;
                curr.resize(width, height);
            }
            if let Some(Effect::End) = self.model.update(msg) {
                ctx.cancel();
                return Ok(());
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr);
            let frame = Frame::diff(prev, curr);
            if !frame.is_empty() {
                self.driver.flush(&frame)?;
            }
            prev.clone_from(curr);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use pathgrid_core::Coord;

    use super::*;
    use crate::canvas::Glyph;
    use crate::messages::Key;
    use crate::style::Style;

    /// Replays scripted batches of messages, one batch per poll.
    #[derive(Default)]
    struct ScriptDriver {
        script: VecDeque<Vec<Msg>>,
        flushed: Vec<usize>,
        inited: bool,
        closed: bool,
    }

    impl Driver for ScriptDriver {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            self.inited = true;
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            _timeout: Duration,
            tx: &Sender<Msg>,
        ) -> Result<(), Box<dyn Error>> {
            let batch = self.script.pop_front().unwrap_or_else(|| vec![Msg::Quit]);
            for m in batch {
                tx.send(m).ok();
            }
            Ok(())
        }

        fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
            self.flushed.push(frame.glyphs.len());
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    /// Draws a counter of key presses in the top-left corner.
    #[derive(Default)]
    struct Counter {
        keys: usize,
        ticks: usize,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::KeyDown { key: Key::Char('q'), .. } | Msg::Quit => Some(Effect::End),
                Msg::KeyDown { .. } => {
                    self.keys += 1;
                    None
                }
                Msg::Tick(_) => {
                    self.ticks += 1;
                    None
                }
                _ => None,
            }
        }

        fn draw(&self, canvas: &mut Canvas) {
            canvas.fill(Glyph::default());
            let ch = char::from_digit(self.keys as u32 % 10, 10).unwrap_or('?');
            canvas.set(Coord::ORIGIN, Glyph::new(ch, Style::default()));
        }
    }

    #[test]
    fn runs_until_end_and_closes() {
        let driver = ScriptDriver {
            script: VecDeque::from(vec![
                vec![Msg::key(Key::Char('a'))],
                vec![],
                vec![Msg::key(Key::Char('q'))],
            ]),
            ..ScriptDriver::default()
        };
        let mut app = App::new(Counter::default(), driver, 4, 2);
        app.run().unwrap();
        let (model, driver) = app.into_parts();
        assert!(driver.inited);
        assert!(driver.closed);
        assert_eq!(model.keys, 1);
        assert_eq!(model.ticks, 2);
        // Full first frame, then only the counter glyph changed.
        assert_eq!(driver.flushed, vec![8, 1]);
    }

    #[test]
    fn resize_forces_full_redraw() {
        let driver = ScriptDriver {
            script: VecDeque::from(vec![vec![Msg::Screen {
                width: 3,
                height: 1,
            }]]),
            ..ScriptDriver::default()
        };
        let mut app = App::new(Counter::default(), driver, 4, 2);
        app.run().unwrap();
        let (_, driver) = app.into_parts();
        assert_eq!(driver.flushed, vec![8, 3]);
    }
}
