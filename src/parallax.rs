//! Pointer parallax for the aurora shapes
//!
//! Two pieces:
//! - [`ParallaxGate`] decides once, at install time, whether the effect runs.
//! - [`FrameCoalescer`] turns a burst of pointer-move events into at most one
//!   transform update per animation frame. The first event of a burst arms
//!   the frame and its sample is the one applied; events arriving while a
//!   frame is pending are dropped.

use crate::config::ParallaxSettings;
use thiserror::Error;

/// Why parallax stays off.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParallaxSkip {
    #[error("no decorative shapes")]
    NoShapes,

    #[error("viewport {width}px below breakpoint")]
    NarrowViewport { width: f64 },

    #[error("reduced motion requested")]
    ReducedMotion,
}

pub struct ParallaxGate;

impl ParallaxGate {
    /// `wide_enough` is the result of the `(min-width: …)` media query, so the
    /// browser's own notion of CSS pixels decides the breakpoint.
    pub fn evaluate(
        shape_count: usize,
        viewport_width: f64,
        wide_enough: bool,
        reduced_motion: bool,
    ) -> Result<(), ParallaxSkip> {
        if shape_count == 0 {
            return Err(ParallaxSkip::NoShapes);
        }
        if !wide_enough {
            return Err(ParallaxSkip::NarrowViewport {
                width: viewport_width,
            });
        }
        if reduced_motion {
            return Err(ParallaxSkip::ReducedMotion);
        }
        Ok(())
    }

    /// Media query matching the configured breakpoint.
    pub fn min_width_query(settings: &ParallaxSettings) -> String {
        format!("(min-width: {}px)", settings.min_viewport_width)
    }
}

/// Pointer position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Pointer position relative to the viewport center, in `[-0.5, 0.5]` when
/// the pointer is inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedOffset {
    pub x: f64,
    pub y: f64,
}

impl NormalizedOffset {
    pub fn from_pointer(sample: PointerSample, viewport: Viewport) -> Self {
        let norm = |v: f64, extent: f64| {
            if extent > 0.0 {
                v / extent - 0.5
            } else {
                0.0
            }
        };
        Self {
            x: norm(sample.x, viewport.width),
            y: norm(sample.y, viewport.height),
        }
    }
}

/// Translation for one shape, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTranslation {
    pub dx: f64,
    pub dy: f64,
}

impl ShapeTranslation {
    pub fn to_css(&self) -> String {
        format!("translate({}px, {}px)", self.dx, self.dy)
    }
}

/// Shape `index` moves `(index + 1) * speed_step` px per unit of offset.
pub fn shape_translation(
    index: usize,
    offset: NormalizedOffset,
    settings: &ParallaxSettings,
) -> ShapeTranslation {
    let speed = (index as f64 + 1.0) * settings.speed_step;
    ShapeTranslation {
        dx: offset.x * speed,
        dy: offset.y * speed,
    }
}

/// Reentrancy guard between pointer events and animation frames.
#[derive(Debug, Clone)]
pub struct FrameCoalescer {
    shape_count: usize,
    settings: ParallaxSettings,
    pending: Option<PointerSample>,
}

impl FrameCoalescer {
    pub fn new(shape_count: usize, settings: ParallaxSettings) -> Self {
        Self {
            shape_count,
            settings,
            pending: None,
        }
    }

    /// Record a pointer move. Returns `true` when the caller must request an
    /// animation frame; `false` means a frame is already pending and this
    /// event is dropped.
    pub fn pointer_moved(&mut self, sample: PointerSample) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(sample);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Called from the animation frame. Clears the guard and returns one
    /// translation per shape, or `None` if no frame was pending.
    pub fn frame(&mut self, viewport: Viewport) -> Option<Vec<ShapeTranslation>> {
        let sample = self.pending.take()?;
        let offset = NormalizedOffset::from_pointer(sample, viewport);
        Some(
            (0..self.shape_count)
                .map(|i| shape_translation(i, offset, &self.settings))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 800.0,
    };

    fn settings() -> ParallaxSettings {
        ParallaxSettings::default()
    }

    #[test]
    fn test_gate() {
        assert_eq!(ParallaxGate::evaluate(3, 1024.0, true, false), Ok(()));
        assert_eq!(
            ParallaxGate::evaluate(0, 1024.0, true, false),
            Err(ParallaxSkip::NoShapes)
        );
        assert_eq!(
            ParallaxGate::evaluate(3, 500.0, false, false),
            Err(ParallaxSkip::NarrowViewport { width: 500.0 })
        );
        assert_eq!(
            ParallaxGate::evaluate(3, 1024.0, true, true),
            Err(ParallaxSkip::ReducedMotion)
        );
    }

    #[test]
    fn test_skip_messages() {
        assert_eq!(ParallaxSkip::NoShapes.to_string(), "no decorative shapes");
        assert_eq!(
            ParallaxSkip::NarrowViewport { width: 500.0 }.to_string(),
            "viewport 500px below breakpoint"
        );
        assert_eq!(ParallaxSkip::ReducedMotion.to_string(), "reduced motion requested");
    }

    #[test]
    fn test_min_width_query() {
        assert_eq!(
            ParallaxGate::min_width_query(&settings()),
            "(min-width: 768px)"
        );
    }

    #[test]
    fn test_offsets_and_speed() {
        let offset = NormalizedOffset::from_pointer(
            PointerSample { x: 750.0, y: 200.0 },
            VIEWPORT,
        );
        assert_eq!(offset, NormalizedOffset { x: 0.25, y: -0.25 });

        let first = shape_translation(0, offset, &settings());
        let third = shape_translation(2, offset, &settings());
        assert_eq!(first, ShapeTranslation { dx: 3.75, dy: -3.75 });
        assert_eq!(third, ShapeTranslation { dx: 11.25, dy: -11.25 });
        assert_eq!(third.to_css(), "translate(11.25px, -11.25px)");
    }

    #[test]
    fn test_center_is_zero() {
        let offset = NormalizedOffset::from_pointer(
            PointerSample { x: 500.0, y: 400.0 },
            VIEWPORT,
        );
        let t = shape_translation(4, offset, &settings());
        assert_eq!(t.to_css(), "translate(0px, 0px)");
    }

    #[test]
    fn test_zero_viewport_does_not_divide() {
        let offset = NormalizedOffset::from_pointer(
            PointerSample { x: 10.0, y: 10.0 },
            Viewport {
                width: 0.0,
                height: 0.0,
            },
        );
        assert_eq!(offset, NormalizedOffset { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_burst_coalesces_to_one_update() {
        let mut coalescer = FrameCoalescer::new(3, settings());

        assert!(coalescer.pointer_moved(PointerSample { x: 750.0, y: 400.0 }));
        for i in 0..50 {
            let sample = PointerSample {
                x: i as f64,
                y: i as f64,
            };
            assert!(!coalescer.pointer_moved(sample), "event {} should drop", i);
        }
        assert!(coalescer.is_pending());

        let update = coalescer.frame(VIEWPORT).expect("one update");
        assert_eq!(update.len(), 3);
        // Sample that armed the frame wins
        assert_eq!(update[0], ShapeTranslation { dx: 3.75, dy: 0.0 });

        // Guard cleared; a second frame callback applies nothing
        assert!(!coalescer.is_pending());
        assert!(coalescer.frame(VIEWPORT).is_none());
    }

    #[test]
    fn test_next_burst_after_frame() {
        let mut coalescer = FrameCoalescer::new(1, settings());
        assert!(coalescer.pointer_moved(PointerSample { x: 0.0, y: 0.0 }));
        coalescer.frame(VIEWPORT);
        assert!(coalescer.pointer_moved(PointerSample { x: 1000.0, y: 800.0 }));
        let update = coalescer.frame(VIEWPORT).unwrap();
        assert_eq!(update[0], ShapeTranslation { dx: 7.5, dy: 7.5 });
    }
}
