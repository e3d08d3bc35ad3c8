//! Sprite-sheet animation playback.

/// A named run of sprite-sheet frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub key: &'static str,
    pub frames: Vec<u16>,
    pub frame_rate: f64,
    /// Extra passes after the first one
    pub repeat: u32,
}

impl Animation {
    /// Frames `first..=last` of a sheet.
    pub fn from_range(key: &'static str, first: u16, last: u16, frame_rate: f64, repeat: u32) -> Self {
        Self {
            key,
            frames: (first..=last).collect(),
            frame_rate,
            repeat,
        }
    }

    /// Total play time of all passes, in seconds.
    pub fn duration(&self) -> f64 {
        if self.frame_rate <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 * (self.repeat as f64 + 1.0)) / self.frame_rate
    }
}

/// Plays one animation on a sprite. Holds the last frame once finished.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlayer {
    animation: Animation,
    elapsed: f64,
    playing: bool,
    current: u16,
}

impl AnimationPlayer {
    pub fn new(animation: Animation) -> Self {
        let current = animation.frames.first().copied().unwrap_or(0);
        Self {
            animation,
            elapsed: 0.0,
            playing: false,
            current,
        }
    }

    /// Restart from the first frame.
    pub fn play(&mut self) {
        self.elapsed = 0.0;
        self.playing = !self.animation.frames.is_empty();
        if let Some(first) = self.animation.frames.first() {
            self.current = *first;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_frame(&self) -> u16 {
        self.current
    }

    pub fn key(&self) -> &'static str {
        self.animation.key
    }

    pub fn advance(&mut self, dt: f64) {
        if !self.playing {
            return;
        }
        self.elapsed += dt;

        let frames = &self.animation.frames;
        if self.elapsed >= self.animation.duration() {
            self.playing = false;
            if let Some(last) = frames.last() {
                self.current = *last;
            }
            return;
        }

        let index = (self.elapsed * self.animation.frame_rate) as usize % frames.len();
        self.current = frames[index];
    }
}
