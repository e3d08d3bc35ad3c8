//! Sound effect cues.
//!
//! The scene only emits cues. A sink decides what a cue sounds like; the
//! terminal front end rings the bell, which the browser view also picks up.

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Quack,
}

impl SoundEffect {
    pub fn volume(self) -> f32 {
        match self {
            SoundEffect::Quack => 0.2,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect) -> io::Result<()>;
}

/// Plays every cue as an ASCII BEL on the wrapped writer.
pub struct TerminalBell<W: Write> {
    out: W,
    muted: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, muted: bool) -> Self {
        Self { out, muted }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, effect: SoundEffect) -> io::Result<()> {
        if self.muted || effect.volume() <= 0.0 {
            return Ok(());
        }
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}
