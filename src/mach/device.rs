//! Collaborators the machine drives: graphics, audio, a file system, an
//! optional console sink and an optional tab switcher.
//!
//! Every call is synchronous and nothing returned from graphics or audio
//! feeds back into control flow.

use super::memfs::MemFs;
use crate::lang::ast::{FileMode, SetOption};
use crate::lang::Error;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

pub type Handle = i64;

pub trait Graphics {
    fn clear(&mut self);
    fn set_color(&mut self, foreground: i64, background: Option<i64>);
    fn set_flag(&mut self, flag: SetOption, on: bool);
    fn set_pixel(&mut self, x: f64, y: f64, color: Option<i64>);
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Option<i64>);
    fn draw_rect(&mut self, from: (f64, f64), to: (f64, f64), color: Option<i64>, filled: bool);
    fn draw_oval(&mut self, center: (f64, f64), radii: (f64, f64), color: Option<i64>, filled: bool);
    fn draw_circle(&mut self, center: (f64, f64), radius: f64, color: Option<i64>, filled: bool);
    fn draw_triangle(&mut self, points: [(f64, f64); 3], color: Option<i64>, filled: bool);
    fn draw_arc(&mut self, center: (f64, f64), radius: f64, angles: (f64, f64), color: Option<i64>);
    fn flood_fill(&mut self, at: (f64, f64), color: i64);
    /// Captures a block of pixels in an opaque text encoding.
    fn get_sprite(&mut self, from: (f64, f64), to: (f64, f64)) -> String;
    fn put_sprite(&mut self, sprite: &str, at: (f64, f64));
    fn turtle(&mut self, commands: &str);
}

pub trait Audio {
    fn set_tempo(&mut self, bpm: f64);
    fn set_volume(&mut self, level: f64);
    fn configure_voice(&mut self, index: i64, preset: &str, envelope: Option<[f64; 4]>);
    fn play(&mut self, voice: i64, music: &str);
    fn mute(&mut self, muted: bool);
}

/// A hierarchical byte store addressed by `/`-separated paths.
pub trait FileSystem {
    fn open(&mut self, path: &str, mode: FileMode) -> Result<Handle>;
    fn read_bytes(&mut self, handle: Handle, n: usize) -> Result<Vec<u8>>;
    fn write_bytes(&mut self, handle: Handle, bytes: &[u8]) -> Result<()>;
    fn seek(&mut self, handle: Handle, pos: u64) -> Result<()>;
    fn tell(&self, handle: Handle) -> Result<u64>;
    fn eof(&self, handle: Handle) -> Result<bool>;
    fn close(&mut self, handle: Handle) -> Result<()>;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&mut self, path: &str, bytes: &[u8]) -> Result<()>;
    fn list_dir(&self, path: &str) -> Result<Vec<String>>;
    fn mkdir(&mut self, path: &str) -> Result<()>;
    fn rmdir(&mut self, path: &str) -> Result<()>;
    fn copy(&mut self, from: &str, to: &str) -> Result<()>;
    fn rename(&mut self, from: &str, to: &str) -> Result<()>;
    fn delete(&mut self, path: &str) -> Result<()>;

    /// Reads through the next newline. `None` at end of file.
    fn read_line(&mut self, handle: Handle) -> Result<Option<String>> {
        if self.eof(handle)? {
            return Ok(None);
        }
        let mut bytes = vec![];
        loop {
            let b = self.read_bytes(handle, 1)?;
            match b.first() {
                None | Some(b'\n') => break,
                Some(b) => bytes.push(*b),
            }
        }
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

pub trait Console {
    fn print_output(&mut self, text: &str);
    fn print_error(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Console,
    Graphics,
    Help,
}

pub trait TabSwitch {
    fn request_switch(&mut self, target: Tab);
}

/// The collaborators one runtime owns.
pub struct Devices {
    pub graphics: Box<dyn Graphics>,
    pub audio: Box<dyn Audio>,
    pub files: Box<dyn FileSystem>,
    pub console: Option<Box<dyn Console>>,
    pub tabs: Option<Box<dyn TabSwitch>>,
}

impl Default for Devices {
    fn default() -> Devices {
        Devices {
            graphics: Box::new(NullGraphics),
            audio: Box::new(NullAudio),
            files: Box::new(MemFs::new()),
            console: None,
            tabs: None,
        }
    }
}

impl Devices {
    /// Devices that log every graphics, audio, console and tab call into
    /// `recorder`.
    pub fn recording(recorder: &Recorder) -> Devices {
        Devices {
            graphics: Box::new(recorder.clone()),
            audio: Box::new(recorder.clone()),
            files: Box::new(MemFs::new()),
            console: Some(Box::new(recorder.clone())),
            tabs: Some(Box::new(recorder.clone())),
        }
    }
}

/// Discards drawing.
pub struct NullGraphics;

impl Graphics for NullGraphics {
    fn clear(&mut self) {
        trace!("graphics clear");
    }
    fn set_color(&mut self, foreground: i64, background: Option<i64>) {
        trace!(foreground, ?background, "graphics color");
    }
    fn set_flag(&mut self, flag: SetOption, on: bool) {
        trace!(%flag, on, "graphics flag");
    }
    fn set_pixel(&mut self, x: f64, y: f64, _color: Option<i64>) {
        trace!(x, y, "graphics pset");
    }
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), _color: Option<i64>) {
        trace!(?from, ?to, "graphics line");
    }
    fn draw_rect(&mut self, from: (f64, f64), to: (f64, f64), _color: Option<i64>, _filled: bool) {
        trace!(?from, ?to, "graphics rectangle");
    }
    fn draw_oval(&mut self, center: (f64, f64), radii: (f64, f64), _color: Option<i64>, _filled: bool) {
        trace!(?center, ?radii, "graphics oval");
    }
    fn draw_circle(&mut self, center: (f64, f64), radius: f64, _color: Option<i64>, _filled: bool) {
        trace!(?center, radius, "graphics circle");
    }
    fn draw_triangle(&mut self, points: [(f64, f64); 3], _color: Option<i64>, _filled: bool) {
        trace!(?points, "graphics triangle");
    }
    fn draw_arc(&mut self, center: (f64, f64), radius: f64, angles: (f64, f64), _color: Option<i64>) {
        trace!(?center, radius, ?angles, "graphics arc");
    }
    fn flood_fill(&mut self, at: (f64, f64), color: i64) {
        trace!(?at, color, "graphics paint");
    }
    fn get_sprite(&mut self, from: (f64, f64), to: (f64, f64)) -> String {
        trace!(?from, ?to, "graphics get");
        String::new()
    }
    fn put_sprite(&mut self, _sprite: &str, at: (f64, f64)) {
        trace!(?at, "graphics put");
    }
    fn turtle(&mut self, commands: &str) {
        trace!(commands, "graphics turtle");
    }
}

/// Discards sound.
pub struct NullAudio;

impl Audio for NullAudio {
    fn set_tempo(&mut self, bpm: f64) {
        trace!(bpm, "audio tempo");
    }
    fn set_volume(&mut self, level: f64) {
        trace!(level, "audio volume");
    }
    fn configure_voice(&mut self, index: i64, preset: &str, _envelope: Option<[f64; 4]>) {
        trace!(index, preset, "audio voice");
    }
    fn play(&mut self, voice: i64, music: &str) {
        trace!(voice, music, "audio play");
    }
    fn mute(&mut self, muted: bool) {
        trace!(muted, "audio mute");
    }
}

/// ## Call recorder
///
/// Renders each collaborator call as one line of text. Clones share the
/// same log.

#[derive(Debug, Clone, Default)]
pub struct Recorder {
    log: Rc<RefCell<Vec<String>>>,
}

fn color_text(color: Option<i64>) -> String {
    match color {
        Some(c) => format!(" WITH {}", c),
        None => String::new(),
    }
}

fn fill_text(filled: bool) -> &'static str {
    if filled {
        " FILLED"
    } else {
        ""
    }
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, entry: String) {
        trace!(%entry, "recorded");
        self.log.borrow_mut().push(entry);
    }
}

impl Graphics for Recorder {
    fn clear(&mut self) {
        self.record("cls".into());
    }
    fn set_color(&mut self, foreground: i64, background: Option<i64>) {
        match background {
            Some(bg) => self.record(format!("color {} {}", foreground, bg)),
            None => self.record(format!("color {}", foreground)),
        }
    }
    fn set_flag(&mut self, flag: SetOption, on: bool) {
        self.record(format!("set {} {}", flag, on));
    }
    fn set_pixel(&mut self, x: f64, y: f64, color: Option<i64>) {
        self.record(format!("pset {} {}{}", x, y, color_text(color)));
    }
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), color: Option<i64>) {
        self.record(format!(
            "line {} {} {} {}{}",
            from.0,
            from.1,
            to.0,
            to.1,
            color_text(color)
        ));
    }
    fn draw_rect(&mut self, from: (f64, f64), to: (f64, f64), color: Option<i64>, filled: bool) {
        self.record(format!(
            "rect {} {} {} {}{}{}",
            from.0,
            from.1,
            to.0,
            to.1,
            color_text(color),
            fill_text(filled)
        ));
    }
    fn draw_oval(&mut self, center: (f64, f64), radii: (f64, f64), color: Option<i64>, filled: bool) {
        self.record(format!(
            "oval {} {} {} {}{}{}",
            center.0,
            center.1,
            radii.0,
            radii.1,
            color_text(color),
            fill_text(filled)
        ));
    }
    fn draw_circle(&mut self, center: (f64, f64), radius: f64, color: Option<i64>, filled: bool) {
        self.record(format!(
            "circle {} {} {}{}{}",
            center.0,
            center.1,
            radius,
            color_text(color),
            fill_text(filled)
        ));
    }
    fn draw_triangle(&mut self, p: [(f64, f64); 3], color: Option<i64>, filled: bool) {
        self.record(format!(
            "triangle {} {} {} {} {} {}{}{}",
            p[0].0,
            p[0].1,
            p[1].0,
            p[1].1,
            p[2].0,
            p[2].1,
            color_text(color),
            fill_text(filled)
        ));
    }
    fn draw_arc(&mut self, center: (f64, f64), radius: f64, angles: (f64, f64), color: Option<i64>) {
        self.record(format!(
            "arc {} {} {} {} {}{}",
            center.0,
            center.1,
            radius,
            angles.0,
            angles.1,
            color_text(color)
        ));
    }
    fn flood_fill(&mut self, at: (f64, f64), color: i64) {
        self.record(format!("paint {} {} {}", at.0, at.1, color));
    }
    fn get_sprite(&mut self, from: (f64, f64), to: (f64, f64)) -> String {
        self.record(format!("get {} {} {} {}", from.0, from.1, to.0, to.1));
        format!("sprite:{}x{}", (to.0 - from.0).abs() + 1.0, (to.1 - from.1).abs() + 1.0)
    }
    fn put_sprite(&mut self, sprite: &str, at: (f64, f64)) {
        self.record(format!("put {} {} {}", sprite, at.0, at.1));
    }
    fn turtle(&mut self, commands: &str) {
        self.record(format!("turtle {}", commands));
    }
}

impl Audio for Recorder {
    fn set_tempo(&mut self, bpm: f64) {
        self.record(format!("tempo {}", bpm));
    }
    fn set_volume(&mut self, level: f64) {
        self.record(format!("volume {}", level));
    }
    fn configure_voice(&mut self, index: i64, preset: &str, envelope: Option<[f64; 4]>) {
        match envelope {
            Some(e) => self.record(format!(
                "voice {} {} {} {} {} {}",
                index, preset, e[0], e[1], e[2], e[3]
            )),
            None => self.record(format!("voice {} {}", index, preset)),
        }
    }
    fn play(&mut self, voice: i64, music: &str) {
        self.record(format!("play {} {}", voice, music));
    }
    fn mute(&mut self, muted: bool) {
        self.record(format!("mute {}", muted));
    }
}

impl Console for Recorder {
    fn print_output(&mut self, text: &str) {
        self.record(format!("console {}", text));
    }
    fn print_error(&mut self, text: &str) {
        self.record(format!("console error {}", text));
    }
}

impl TabSwitch for Recorder {
    fn request_switch(&mut self, target: Tab) {
        self.record(format!("tab {:?}", target));
    }
}
