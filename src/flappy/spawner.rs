//! Pipe-pair geometry and the endless pipe stream.
//!
//! Pipes are positioned by their centers. The top pipe sits at `offset`, the
//! bottom pipe one pipe height plus the gap below it, so the gap spans
//! `[offset + h/2, offset + h/2 + gap]`.

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    #[error("pipe height and gap must be positive (pipe {pipe_height}, gap {gap})")]
    InvalidGeometry { pipe_height: f64, gap: f64 },
    #[error("pipe height {pipe_height} plus gap {gap} does not fit a {canvas_height}-unit canvas")]
    GapTooTall {
        canvas_height: f64,
        pipe_height: f64,
        gap: f64,
    },
    #[error("{pipe_height}-unit pipes cannot cover a {canvas_height}-unit canvas (offsets [{min}, {max}])")]
    PipesTooShort {
        canvas_height: f64,
        pipe_height: f64,
        min: i64,
        max: i64,
    },
}

/// Inclusive integer range of top-pipe center offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetRange {
    pub min: i64,
    pub max: i64,
}

impl OffsetRange {
    /// `max = h/2`, `min = -(h/2 - (canvas - h - gap))`, rounded inward.
    pub fn new(canvas_height: f64, pipe_height: f64, gap: f64) -> Result<Self, SpawnError> {
        if pipe_height <= 0.0 || gap <= 0.0 {
            return Err(SpawnError::InvalidGeometry { pipe_height, gap });
        }
        if pipe_height + gap > canvas_height {
            return Err(SpawnError::GapTooTall {
                canvas_height,
                pipe_height,
                gap,
            });
        }

        let half = pipe_height / 2.0;
        let max = half.floor() as i64;
        let min = (-(half - (canvas_height - pipe_height - gap))).ceil() as i64;
        if min > max {
            return Err(SpawnError::PipesTooShort {
                canvas_height,
                pipe_height,
                min,
                max,
            });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, offset: i64) -> bool {
        (self.min..=self.max).contains(&offset)
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Where one pipe pair and its score trigger start out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePairSpec {
    /// Position in the stream since the last restart (0-based)
    pub sequence: u64,
    pub offset: i64,
    pub x: f64,
    pub top_y: f64,
    pub bottom_y: f64,
    pub trigger_x: f64,
    pub trigger_y: f64,
    pub trigger_height: f64,
}

impl PipePairSpec {
    pub fn gap_top(&self, pipe_height: f64) -> f64 {
        self.top_y + pipe_height / 2.0
    }

    pub fn gap_bottom(&self, pipe_height: f64) -> f64 {
        self.bottom_y - pipe_height / 2.0
    }
}

/// Fixed geometry shared by every pair in the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    pub canvas_height: f64,
    pub spawn_x: f64,
    pub pipe_width: f64,
    pub pipe_height: f64,
    pub gap: f64,
}

/// Restartable, unbounded generator of pipe pairs.
#[derive(Debug, Clone)]
pub struct PipeSpawner<R> {
    geometry: PipeGeometry,
    range: OffsetRange,
    rng: R,
    sequence: u64,
}

impl<R: Rng> PipeSpawner<R> {
    pub fn new(geometry: PipeGeometry, rng: R) -> Result<Self, SpawnError> {
        let range = OffsetRange::new(geometry.canvas_height, geometry.pipe_height, geometry.gap)?;
        Ok(Self {
            geometry,
            range,
            rng,
            sequence: 0,
        })
    }

    pub fn range(&self) -> OffsetRange {
        self.range
    }

    /// Start the stream over. The RNG keeps going so rounds differ.
    pub fn restart(&mut self) {
        self.sequence = 0;
    }

    /// Lay out a pair at a given offset.
    pub fn layout(&self, sequence: u64, offset: i64) -> PipePairSpec {
        let g = &self.geometry;
        let top_y = offset as f64;
        PipePairSpec {
            sequence,
            offset,
            x: g.spawn_x,
            top_y,
            bottom_y: top_y + g.pipe_height + g.gap,
            trigger_x: g.spawn_x + g.pipe_width / 2.0,
            trigger_y: g.canvas_height / 2.0,
            trigger_height: g.canvas_height,
        }
    }
}

impl<R: Rng> Iterator for PipeSpawner<R> {
    type Item = PipePairSpec;

    fn next(&mut self) -> Option<PipePairSpec> {
        let offset = self.range.sample(&mut self.rng);
        let spec = self.layout(self.sequence, offset);
        self.sequence += 1;
        Some(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn geometry(canvas_height: f64) -> PipeGeometry {
        PipeGeometry {
            canvas_height,
            spawn_x: 852.0,
            pipe_width: 52.0,
            pipe_height: 320.0,
            gap: 150.0,
        }
    }

    #[test]
    fn test_reference_range() {
        // 600 canvas, 300 pipe, 150 gap -> [-0, 150]
        let range = OffsetRange::new(600.0, 300.0, 150.0).unwrap();
        assert_eq!(range, OffsetRange { min: 0, max: 150 });
    }

    #[test]
    fn test_default_range() {
        let range = OffsetRange::new(500.0, 320.0, 150.0).unwrap();
        assert_eq!(range, OffsetRange { min: -130, max: 160 });
    }

    #[test]
    fn test_every_offset_keeps_gap_on_screen() {
        for (canvas, pipe, gap) in [(600.0, 300.0, 150.0), (500.0, 320.0, 150.0), (470.0, 320.0, 150.0)] {
            let range = OffsetRange::new(canvas, pipe, gap).unwrap();
            for offset in range.min..=range.max {
                let gap_top = offset as f64 + pipe / 2.0;
                let gap_bottom = gap_top + gap;
                assert!(gap_top >= 0.0, "offset {offset} puts gap above canvas");
                assert!(gap_bottom <= canvas, "offset {offset} puts gap below canvas");
            }
        }
    }

    #[test]
    fn test_gap_too_tall() {
        assert!(matches!(
            OffsetRange::new(400.0, 320.0, 150.0),
            Err(SpawnError::GapTooTall { .. })
        ));
    }

    #[test]
    fn test_pipes_too_short() {
        assert!(matches!(
            OffsetRange::new(1000.0, 320.0, 150.0),
            Err(SpawnError::PipesTooShort { .. })
        ));
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            OffsetRange::new(500.0, 0.0, 150.0),
            Err(SpawnError::InvalidGeometry { .. })
        ));
        assert!(matches!(
            OffsetRange::new(500.0, 320.0, -1.0),
            Err(SpawnError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_stream_stays_in_range() {
        let spawner = PipeSpawner::new(geometry(500.0), ChaCha8Rng::seed_from_u64(42)).unwrap();
        let range = spawner.range();
        for spec in spawner.take(500) {
            assert!(range.contains(spec.offset));
            let gap_top = spec.gap_top(320.0);
            let gap_bottom = spec.gap_bottom(320.0);
            assert!((gap_bottom - gap_top - 150.0).abs() < 1e-9);
            assert!(gap_top >= 0.0 && gap_bottom <= 500.0);
        }
    }

    #[test]
    fn test_layout_positions() {
        let spawner = PipeSpawner::new(geometry(500.0), ChaCha8Rng::seed_from_u64(1)).unwrap();
        let spec = spawner.layout(0, 10);
        assert_eq!(spec.x, 852.0);
        assert_eq!(spec.top_y, 10.0);
        assert_eq!(spec.bottom_y, 480.0);
        assert_eq!(spec.trigger_x, 878.0);
        assert_eq!(spec.trigger_y, 250.0);
        assert_eq!(spec.trigger_height, 500.0);
    }

    #[test]
    fn test_sequence_and_restart() {
        let mut spawner = PipeSpawner::new(geometry(500.0), ChaCha8Rng::seed_from_u64(3)).unwrap();
        assert_eq!(spawner.next().map(|s| s.sequence), Some(0));
        assert_eq!(spawner.next().map(|s| s.sequence), Some(1));
        spawner.restart();
        assert_eq!(spawner.next().map(|s| s.sequence), Some(0));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a: Vec<i64> = PipeSpawner::new(geometry(500.0), ChaCha8Rng::seed_from_u64(9))
            .unwrap()
            .take(20)
            .map(|s| s.offset)
            .collect();
        let b: Vec<i64> = PipeSpawner::new(geometry(500.0), ChaCha8Rng::seed_from_u64(9))
            .unwrap()
            .take(20)
            .map(|s| s.offset)
            .collect();
        assert_eq!(a, b);
    }
}
