//! Crossterm terminal driver.

use std::error::Error;
use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::debug;
use pathgrid_core::Coord;

use crate::app::{Context, Driver};
use crate::canvas::Frame;
use crate::messages::{Key, ModMask, MouseAction, Msg};
use crate::style::{AttrMask, Color};

fn to_ct_color(c: Color) -> CtColor {
    match c.rgb() {
        Some((r, g, b)) => CtColor::Rgb { r, g, b },
        None => CtColor::Reset,
    }
}

fn to_mod_mask(mods: KeyModifiers) -> ModMask {
    let mut m = ModMask::NONE;
    if mods.contains(KeyModifiers::SHIFT) {
        m = m | ModMask::SHIFT;
    }
    if mods.contains(KeyModifiers::CONTROL) {
        m = m | ModMask::CTRL;
    }
    if mods.contains(KeyModifiers::ALT) {
        m = m | ModMask::ALT;
    }
    m
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Up => Some(Key::ArrowUp),
        KeyCode::Down => Some(Key::ArrowDown),
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        _ => None,
    }
}

/// Translate one crossterm event. Events with no counterpart yield `None`.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            to_key(code).map(|key| Msg::KeyDown {
                key,
                modifiers: to_mod_mask(modifiers),
            })
        }
        Event::Mouse(me) => {
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Down(MouseButton::Middle) => MouseAction::Auxiliary,
                MouseEventKind::Drag(MouseButton::Left) => MouseAction::Drag,
                MouseEventKind::Up(_) => MouseAction::Release,
                _ => return None,
            };
            Some(Msg::Mouse {
                action,
                pos: Coord::new(i32::from(me.row), i32::from(me.column)),
                modifiers: to_mod_mask(me.modifiers),
            })
        }
        Event::Resize(width, height) => Some(Msg::Screen { width, height }),
        _ => None,
    }
}

/// Terminal back-end using crossterm: raw mode, alternate screen, mouse
/// capture.
#[derive(Debug, Default)]
pub struct CrosstermDriver;

impl CrosstermDriver {
    pub fn new() -> Self {
        Self
    }

    /// Current terminal size as `(width, height)`.
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        debug!("terminal initialised");
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        timeout: Duration,
        tx: &Sender<Msg>,
    ) -> Result<(), Box<dyn Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            if let Some(msg) = to_msg(event::read()?) {
                tx.send(msg).ok();
            }
        }
        Ok(())
    }

    fn flush(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
        let mut stdout = io::stdout().lock();
        for fg in &frame.glyphs {
            let (Ok(x), Ok(y)) = (u16::try_from(fg.pos.col), u16::try_from(fg.pos.row)) else {
                continue;
            };
            let style = fg.glyph.style;
            queue!(
                stdout,
                cursor::MoveTo(x, y),
                SetForegroundColor(to_ct_color(style.fg)),
                SetBackgroundColor(to_ct_color(style.bg))
            )?;
            if style.attrs.contains(AttrMask::BOLD) {
                queue!(stdout, SetAttribute(Attribute::Bold))?;
            }
            if style.attrs.contains(AttrMask::DIM) {
                queue!(stdout, SetAttribute(Attribute::Dim))?;
            }
            queue!(stdout, Print(fg.glyph.ch))?;
            if !style.attrs.is_empty() {
                queue!(stdout, SetAttribute(Attribute::Reset))?;
            }
        }
        stdout.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
