//! Owned starfield view: mount, feed events, dispose.

use glam::Vec2;
use log::{info, trace};

use crate::{
    canvas::{Bounds, Canvas},
    field::{FieldConfig, FrameOutcome, ParticleField},
    scheduler::FrameScheduler,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    Resized(Bounds),
    PointerMoved(Vec2),
    /// One animation frame, `now_ms` is a monotonic timestamp.
    Tick { now_ms: f64 },
}

pub struct StarfieldView<S: FrameScheduler> {
    field: ParticleField,
    pointer: Vec2,
    scheduler: S,
    frames: u64,
}

impl<S: FrameScheduler> StarfieldView<S> {
    pub fn mount(config: FieldConfig, bounds: Bounds, mut scheduler: S) -> Self {
        let field = ParticleField::new(config, bounds);
        info!(
            "Starfield mounted with {} particles ({}x{})",
            field.particles().len(),
            bounds.width,
            bounds.height
        );

        scheduler.request_next_tick();

        Self {
            field,
            pointer: Vec2::ZERO,
            scheduler,
            frames: 0,
        }
    }

    /// Returns the frame outcome for ticks, `None` for every other event.
    pub fn handle<C: Canvas + ?Sized>(
        &mut self,
        event: ViewEvent,
        canvas: &mut C,
    ) -> Option<FrameOutcome> {
        match event {
            ViewEvent::Resized(bounds) => {
                self.field.resize(bounds);
                None
            }
            ViewEvent::PointerMoved(position) => {
                self.pointer = position;
                None
            }
            ViewEvent::Tick { now_ms } => {
                let outcome = self.field.render(canvas, now_ms, self.pointer);
                match outcome {
                    FrameOutcome::Drawn => self.frames += 1,
                    FrameOutcome::Skipped => {
                        trace!("Skipped frame at {now_ms:.1}ms, no drawable area")
                    }
                }

                // Skipped frames keep the loop alive so a later resize can recover.
                self.scheduler.request_next_tick();
                Some(outcome)
            }
        }
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn dispose(mut self) {
        self.scheduler.cancel();
        info!("Starfield disposed after {} frames", self.frames);
    }
}

#[cfg(test)]
impl<S: FrameScheduler> StarfieldView<S> {
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::canvas::DrawList;

    use super::*;

    #[derive(Debug, Default)]
    struct Counts {
        requested: usize,
        cancelled: bool,
    }

    #[derive(Clone, Default)]
    struct CountingScheduler(Rc<RefCell<Counts>>);

    impl FrameScheduler for CountingScheduler {
        fn request_next_tick(&mut self) {
            let mut counts = self.0.borrow_mut();
            if !counts.cancelled {
                counts.requested += 1;
            }
        }

        fn cancel(&mut self) {
            self.0.borrow_mut().cancelled = true;
        }
    }

    fn config() -> FieldConfig {
        FieldConfig {
            particle_count: 40,
            seed: Some(99),
            ..Default::default()
        }
    }

    #[test]
    fn test_mount_requests_first_tick() {
        let scheduler = CountingScheduler::default();
        let view = StarfieldView::mount(config(), Bounds::new(800.0, 600.0), scheduler.clone());

        assert_eq!(scheduler.0.borrow().requested, 1);
        assert_eq!(view.field().particles().len(), 40);
        assert_eq!(view.pointer(), Vec2::ZERO);
    }

    #[test]
    fn test_tick_draws_and_reschedules() {
        let scheduler = CountingScheduler::default();
        let mut view = StarfieldView::mount(config(), Bounds::new(800.0, 600.0), scheduler.clone());
        let mut canvas = DrawList::new();

        for frame in 0..5 {
            let outcome = view.handle(ViewEvent::Tick { now_ms: frame as f64 * 16.0 }, &mut canvas);
            assert_eq!(outcome, Some(FrameOutcome::Drawn));
        }

        assert_eq!(view.frames_drawn(), 5);
        assert_eq!(scheduler.0.borrow().requested, 6);
        assert!(!canvas.is_empty());
    }

    #[test]
    fn test_skipped_frame_keeps_loop_alive() {
        let scheduler = CountingScheduler::default();
        let mut view = StarfieldView::mount(config(), Bounds::new(0.0, 0.0), scheduler.clone());
        let mut canvas = DrawList::new();

        let outcome = view.handle(ViewEvent::Tick { now_ms: 0.0 }, &mut canvas);
        assert_eq!(outcome, Some(FrameOutcome::Skipped));
        assert!(canvas.is_empty());
        assert_eq!(scheduler.0.borrow().requested, 2);

        // A later layout pass makes the surface drawable again.
        let bounds = Bounds::new(300.0, 200.0);
        view.handle(ViewEvent::Resized(bounds), &mut canvas);
        let outcome = view.handle(ViewEvent::Tick { now_ms: 16.0 }, &mut canvas);
        assert_eq!(outcome, Some(FrameOutcome::Drawn));
        assert!(view.field().particles().iter().all(|p| bounds.contains(p.position)));
    }

    #[test]
    fn test_events_do_not_draw() {
        let scheduler = CountingScheduler::default();
        let mut view = StarfieldView::mount(config(), Bounds::new(800.0, 600.0), scheduler);
        let mut canvas = DrawList::new();

        let moved = ViewEvent::PointerMoved(Vec2::new(5.0, 6.0));
        assert_eq!(view.handle(moved, &mut canvas), None);
        let resized = ViewEvent::Resized(Bounds::new(400.0, 300.0));
        assert_eq!(view.handle(resized, &mut canvas), None);
        assert!(canvas.is_empty());
        assert_eq!(view.pointer(), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_latest_pointer_wins() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut view = StarfieldView::mount(config(), bounds, CountingScheduler::default());
        let mut from_view = DrawList::new();

        view.handle(ViewEvent::PointerMoved(Vec2::new(10.0, 10.0)), &mut from_view);
        view.handle(ViewEvent::PointerMoved(Vec2::new(700.0, 20.0)), &mut from_view);
        view.handle(ViewEvent::Tick { now_ms: 500.0 }, &mut from_view);

        let mut direct = DrawList::new();
        view.field().render(&mut direct, 500.0, Vec2::new(700.0, 20.0));
        assert_eq!(from_view, direct);
    }

    #[test]
    fn test_dispose_cancels_ticks() {
        let scheduler = CountingScheduler::default();
        let mut view = StarfieldView::mount(config(), Bounds::new(800.0, 600.0), scheduler.clone());
        view.handle(ViewEvent::Tick { now_ms: 0.0 }, &mut DrawList::new());

        view.dispose();

        let mut handle = scheduler.clone();
        handle.request_next_tick();
        let counts = scheduler.0.borrow();
        assert!(counts.cancelled);
        assert_eq!(counts.requested, 2);
    }
}
