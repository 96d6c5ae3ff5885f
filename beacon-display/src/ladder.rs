//! Signal-strength ladder widget
//!
//! Renders signal strength as the familiar ascending bar graphic: `n`
//! equal-width segments whose heights grow linearly left to right,
//! all standing on a shared bottom edge. Each render repaints every
//! segment from a caller-supplied predicate, so the widget itself
//! holds no per-render state and two renders with the same predicate
//! issue identical draw commands.
//!
//! The geometry uses only integer multiplication and addition — cheap
//! on hardware with no floating point and no allocator.

use crate::backend::{DisplayError, GraphicsBackend};

/// Ladder construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LadderError {
    /// Segment count of zero
    ZeroSegments,
}

/// Ascending signal-strength bar widget
///
/// Constructed once with its segment count and color scheme, placed
/// once with [`init`](SignalLadder::init), then rendered on demand.
/// Until `init` is called the segment pitch is zero and renders paint
/// nothing visible.
pub struct SignalLadder<C> {
    segments: u16,
    active: C,
    inactive: C,
    /// Region origin
    x: u16,
    y: u16,
    /// Per-segment pitch, derived from the region at init
    dx: u16,
    dy: u16,
}

impl<C: Copy> SignalLadder<C> {
    /// Create a ladder with `segments` bars
    ///
    /// Active segments are filled with `active`; inactive segments are
    /// filled with `inactive` and outlined with `active` so they stay
    /// visible as placeholders. A segment count of zero is rejected
    /// here rather than dividing by zero later.
    pub fn new(segments: u16, active: C, inactive: C) -> Result<Self, LadderError> {
        if segments == 0 {
            return Err(LadderError::ZeroSegments);
        }
        Ok(Self {
            segments,
            active,
            inactive,
            x: 0,
            y: 0,
            dx: 0,
            dy: 0,
        })
    }

    /// Place the ladder in a screen region
    ///
    /// Derives the segment pitch `dx = width / segments` and the height
    /// step `dy = height / segments` by integer division; remainder
    /// pixels are dropped, so the ladder may not exactly fill the
    /// region. That is an accepted visual approximation, not an error.
    pub fn init(&mut self, x: u16, y: u16, width: u16, height: u16) {
        self.x = x;
        self.y = y;
        self.dx = width / self.segments;
        self.dy = height / self.segments;
    }

    /// Number of segments
    pub fn segments(&self) -> u16 {
        self.segments
    }

    /// Repaint every segment from `active`
    ///
    /// The predicate maps segment index to "show as active" (typically
    /// "is the measured level at least this segment's threshold") and
    /// is queried exactly once per segment, in ascending index order.
    /// Segment `i` is `dx` wide and `(i + 1) * dy` tall; segments step
    /// rightward by `dx` and share the bottom edge at `y + n * dy`.
    /// Draw failures from the backend propagate unchanged.
    pub fn render<D, F>(&self, display: &mut D, mut active: F) -> Result<(), DisplayError>
    where
        D: GraphicsBackend<Color = C>,
        F: FnMut(u16) -> bool,
    {
        let bottom = self.y + self.segments * self.dy;
        let mut x = self.x;
        let mut height = self.dy;

        for i in 0..self.segments {
            let y = bottom - height;
            if active(i) {
                display.fill_rect(x, y, self.dx, height, self.active)?;
            } else {
                display.fill_rect(x, y, self.dx, height, self.inactive)?;
                display.draw_rect(x, y, self.dx, height, self.active)?;
            }
            x += self.dx;
            height += self.dy;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use proptest::prelude::*;

    const ACTIVE: u16 = 0x07E0;
    const INACTIVE: u16 = 0x2104;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Fill { x: u16, y: u16, w: u16, h: u16, color: u16 },
        Outline { x: u16, y: u16, w: u16, h: u16, color: u16 },
    }

    struct RecordingBackend {
        ops: Vec<Op, 64>,
        fail: bool,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                ops: Vec::new(),
                fail: false,
            }
        }

        fn fills(&self) -> impl Iterator<Item = (u16, u16, u16, u16, u16)> + '_ {
            self.ops.iter().filter_map(|op| match *op {
                Op::Fill { x, y, w, h, color } => Some((x, y, w, h, color)),
                Op::Outline { .. } => None,
            })
        }
    }

    impl GraphicsBackend for RecordingBackend {
        type Color = u16;

        fn fill_rect(
            &mut self,
            x: u16,
            y: u16,
            w: u16,
            h: u16,
            color: u16,
        ) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.ops.push(Op::Fill { x, y, w, h, color }).unwrap();
            Ok(())
        }

        fn draw_rect(
            &mut self,
            x: u16,
            y: u16,
            w: u16,
            h: u16,
            color: u16,
        ) -> Result<(), DisplayError> {
            if self.fail {
                return Err(DisplayError::Communication);
            }
            self.ops.push(Op::Outline { x, y, w, h, color }).unwrap();
            Ok(())
        }

        fn pixel_dimensions(&self) -> (u16, u16) {
            (240, 135)
        }
    }

    fn ladder(n: u16, x: u16, y: u16, w: u16, h: u16) -> SignalLadder<u16> {
        let mut ladder = SignalLadder::new(n, ACTIVE, INACTIVE).unwrap();
        ladder.init(x, y, w, h);
        ladder
    }

    #[test]
    fn test_rejects_zero_segments() {
        assert_eq!(
            SignalLadder::new(0, ACTIVE, INACTIVE).err(),
            Some(LadderError::ZeroSegments)
        );
    }

    #[test]
    fn test_reference_ladder_draw_sequence() {
        // 4 segments in a 40x40 region at (0, 40): dx = dy = 10,
        // shared bottom edge at y = 80. Segments 0 and 2 active.
        let ladder = ladder(4, 0, 40, 40, 40);
        let mut display = RecordingBackend::new();
        ladder.render(&mut display, |i| i % 2 == 0).unwrap();

        let expected = [
            Op::Fill { x: 0, y: 70, w: 10, h: 10, color: ACTIVE },
            Op::Fill { x: 10, y: 60, w: 10, h: 20, color: INACTIVE },
            Op::Outline { x: 10, y: 60, w: 10, h: 20, color: ACTIVE },
            Op::Fill { x: 20, y: 50, w: 10, h: 30, color: ACTIVE },
            Op::Fill { x: 30, y: 40, w: 10, h: 40, color: INACTIVE },
            Op::Outline { x: 30, y: 40, w: 10, h: 40, color: ACTIVE },
        ];
        assert_eq!(display.ops.as_slice(), &expected);
    }

    #[test]
    fn test_single_segment() {
        let ladder = ladder(1, 5, 10, 20, 30);
        let mut display = RecordingBackend::new();
        ladder.render(&mut display, |_| true).unwrap();

        assert_eq!(
            display.ops.as_slice(),
            &[Op::Fill { x: 5, y: 10, w: 20, h: 30, color: ACTIVE }]
        );
    }

    #[test]
    fn test_all_inactive_outlines_every_segment() {
        let ladder = ladder(5, 0, 0, 50, 50);
        let mut display = RecordingBackend::new();
        ladder.render(&mut display, |_| false).unwrap();

        // fill + outline per segment
        assert_eq!(display.ops.len(), 10);
        for pair in display.ops.chunks(2) {
            match (pair[0], pair[1]) {
                (
                    Op::Fill { x, y, w, h, color },
                    Op::Outline { x: ox, y: oy, w: ow, h: oh, color: oc },
                ) => {
                    assert_eq!(color, INACTIVE);
                    assert_eq!(oc, ACTIVE);
                    // outline covers exactly the filled rect
                    assert_eq!((x, y, w, h), (ox, oy, ow, oh));
                }
                other => panic!("unexpected op pair {:?}", other),
            }
        }
    }

    #[test]
    fn test_predicate_queried_once_per_segment_ascending() {
        let ladder = ladder(6, 0, 0, 60, 60);
        let mut display = RecordingBackend::new();
        let mut queried: Vec<u16, 8> = Vec::new();
        ladder
            .render(&mut display, |i| {
                queried.push(i).unwrap();
                i < 3
            })
            .unwrap();

        assert_eq!(queried.as_slice(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let ladder = ladder(4, 12, 40, 47, 40);
        let mut first = RecordingBackend::new();
        let mut second = RecordingBackend::new();
        ladder.render(&mut first, |i| i < 2).unwrap();
        ladder.render(&mut second, |i| i < 2).unwrap();

        assert_eq!(first.ops, second.ops);
    }

    #[test]
    fn test_remainder_pixels_dropped() {
        // 45 / 4 = 11: segments sit at x = 0, 11, 22, 33 and the
        // region's last pixel column goes unused
        let ladder = ladder(4, 0, 0, 45, 40);
        let mut display = RecordingBackend::new();
        ladder.render(&mut display, |_| true).unwrap();

        let xs: Vec<u16, 8> = display.fills().map(|(x, ..)| x).collect();
        assert_eq!(xs.as_slice(), &[0, 11, 22, 33]);
    }

    #[test]
    fn test_backend_error_propagates() {
        let ladder = ladder(4, 0, 40, 40, 40);
        let mut display = RecordingBackend::new();
        display.fail = true;

        assert_eq!(
            ladder.render(&mut display, |_| true),
            Err(DisplayError::Communication)
        );
    }

    proptest! {
        #[test]
        fn prop_segments_step_right_and_grow(
            n in 1u16..=12,
            pitch_x in 1u16..=16,
            pitch_y in 1u16..=16,
            x in 0u16..300,
            y in 0u16..300,
        ) {
            // Region sized to an exact multiple of the segment count,
            // so the derived pitch is (pitch_x, pitch_y)
            let ladder = ladder(n, x, y, n * pitch_x, n * pitch_y);
            let mut display = RecordingBackend::new();
            ladder.render(&mut display, |_| true).unwrap();

            let fills: Vec<_, 16> = display.fills().collect();
            prop_assert_eq!(fills.len(), n as usize);

            let bottom = y + n * pitch_y;
            for (i, &(fx, fy, fw, fh, _)) in fills.iter().enumerate() {
                let i = i as u16;
                prop_assert_eq!(fx, x + i * pitch_x);
                prop_assert_eq!(fw, pitch_x);
                prop_assert_eq!(fh, (i + 1) * pitch_y);
                // every segment stands on the shared bottom edge,
                // inside the requested region
                prop_assert_eq!(fy + fh, bottom);
                prop_assert!(fy >= y);
            }
        }
    }
}
