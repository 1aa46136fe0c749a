#![no_main]

use arbitrary::Arbitrary;
use dotcal_core::geometry::{DomRect, Size, Viewport};
use dotcal_tutorial::{Step, Tour, TourMsg, TourPhase, scheduler_tour};
use libfuzzer_sys::fuzz_target;
use web_time::{Duration, Instant};

#[derive(Debug, Arbitrary)]
enum Input {
    Open,
    Advance,
    Scroll,
    Close,
    Tick(u16),
    ExitComplete,
    /// Move one target by whole pixels.
    Shift { step: u8, top: i16, left: i16 },
}

#[derive(Debug, Arbitrary)]
struct Session {
    viewport: (u16, u16),
    content: (u16, u16),
    inputs: Vec<Input>,
}

fuzz_target!(|session: Session| {
    let viewport = Viewport::new(
        f64::from(session.viewport.0.max(1)),
        f64::from(session.viewport.1.max(1)),
    );
    let content = Size::new(f64::from(session.content.0), f64::from(session.content.1));
    let definitions = scheduler_tour();
    let total = definitions.len();
    let mut rects: Vec<Option<DomRect>> = (0..total)
        .map(|i| Some(DomRect::new(40.0 * i as f64, 24.0, 200.0, 40.0)))
        .collect();

    let mut tour = Tour::new(total);
    let mut now = Instant::now();

    for input in session.inputs.into_iter().take(512) {
        let msg = match input {
            Input::Open => TourMsg::Open,
            Input::Advance => TourMsg::Advance,
            Input::Scroll => TourMsg::Scroll,
            Input::Close => TourMsg::Close,
            Input::ExitComplete => TourMsg::ExitComplete,
            Input::Tick(ms) => {
                let delta = Duration::from_millis(u64::from(ms));
                now += delta;
                TourMsg::Tick(delta)
            }
            Input::Shift { step, top, left } => {
                let index = usize::from(step) % total;
                rects[index] = Some(DomRect::new(f64::from(top), f64::from(left), 200.0, 40.0));
                continue;
            }
        };
        let steps = Step::measure_all(&definitions, rects.iter().copied());
        let _ = tour.update(msg, &steps, viewport, now);

        // Post-conditions that must always hold:
        let step = tour.current_step();
        assert!((1..=total).contains(&step), "step {step} out of range");
        if tour.phase() == TourPhase::Closed {
            assert_eq!(step, 1, "closed tour must rest on the first step");
        }
        let frame = tour.frame(&steps, content, viewport);
        assert_eq!(frame.is_some(), tour.phase().is_visible());
        if let Some(frame) = frame {
            assert!(frame.origin.x.is_finite() && frame.origin.y.is_finite());
            assert!((0.0..=1.0).contains(&frame.opacity));
            assert_eq!(frame.arrow.placement, frame.placement);
        }
    }
});
