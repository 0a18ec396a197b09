//! Drag-to-scroll reviews strip.
//!
//! Any press pauses the auto-scroll animation; releasing schedules a
//! resume. A press that comes before a pending resume fires bumps the
//! generation, so the stale resume does nothing.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::CarouselConfig;
use crate::ui::{bind, Control, EventFlow, EventKind, Scheduler, Subscription, UiEvent};

pub trait CarouselView {
    /// Left edge of the carousel within the page.
    fn offset_left(&self) -> f64;
    fn scroll_left(&self) -> f64;
    fn set_scroll_left(&self, value: f64);
    /// Pause (`true`) or run the CSS animation.
    fn set_paused(&self, paused: bool);
}

#[derive(Debug, Clone)]
pub struct Carousel {
    drag_factor: f64,
    resume_delay: Duration,
    dragging: bool,
    paused: bool,
    start_x: f64,
    start_scroll: f64,
    generation: u64,
}

impl Carousel {
    pub fn new(drag_factor: f64, resume_delay: Duration) -> Self {
        Self {
            drag_factor,
            resume_delay,
            dragging: false,
            paused: false,
            start_x: 0.0,
            start_scroll: 0.0,
            generation: 0,
        }
    }

    pub fn from_config(config: &CarouselConfig) -> Self {
        Self::new(config.drag_factor, config.resume_delay())
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn resume_delay(&self) -> Duration {
        self.resume_delay
    }

    /// Start a gesture at `x` (carousel-relative) with the strip at `scroll_left`.
    ///
    /// Only mouse presses enter the dragging state; touch moves are always
    /// tracked while the finger is down.
    pub fn press(&mut self, x: f64, scroll_left: f64, mouse: bool) -> bool {
        if mouse {
            self.dragging = true;
        }
        self.start_x = x;
        self.start_scroll = scroll_left;
        self.generation += 1;
        let newly_paused = !self.paused;
        self.paused = true;
        newly_paused
    }

    /// Scroll position for a pointer now at `x` (carousel-relative).
    pub fn track(&self, x: f64) -> f64 {
        self.start_scroll - (x - self.start_x) * self.drag_factor
    }

    /// End the gesture and return the generation a resume must match.
    pub fn release(&mut self) -> u64 {
        self.dragging = false;
        self.generation
    }

    /// Resume the animation if nothing pressed since `generation`.
    pub fn resume(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.dragging || !self.paused {
            return false;
        }
        self.paused = false;
        true
    }
}

pub fn attach<C: Control>(
    carousel: &Rc<RefCell<Carousel>>,
    control: &C,
    view: Rc<dyn CarouselView>,
    scheduler: Rc<dyn Scheduler>,
) -> Subscription {
    let press = |mouse: bool| {
        let view = view.clone();
        move |carousel: &mut Carousel, event: &UiEvent| {
            if let UiEvent::Pointer { page_x } = event {
                if carousel.press(page_x - view.offset_left(), view.scroll_left(), mouse) {
                    view.set_paused(true);
                }
            }
            EventFlow::Continue
        }
    };

    let schedule_resume = {
        let carousel = Rc::downgrade(carousel);
        let view = view.clone();
        move |generation: u64, delay: Duration| {
            let carousel = carousel.clone();
            let view = view.clone();
            scheduler.schedule(
                delay,
                Box::new(move || {
                    let Some(carousel) = carousel.upgrade() else {
                        return;
                    };
                    if carousel.borrow_mut().resume(generation) {
                        view.set_paused(false);
                    }
                }),
            );
        }
    };
    let schedule_resume = Rc::new(schedule_resume);

    let release = |only_while_dragging: bool| {
        let schedule_resume = schedule_resume.clone();
        move |carousel: &mut Carousel, _: &UiEvent| {
            if !only_while_dragging || carousel.is_dragging() {
                let generation = carousel.release();
                schedule_resume(generation, carousel.resume_delay());
            }
            EventFlow::Continue
        }
    };

    let track = |mouse: bool| {
        let view = view.clone();
        move |carousel: &mut Carousel, event: &UiEvent| {
            if mouse && !carousel.is_dragging() {
                return EventFlow::Continue;
            }
            let UiEvent::Pointer { page_x } = event else {
                return EventFlow::Continue;
            };
            view.set_scroll_left(carousel.track(page_x - view.offset_left()));
            if mouse {
                EventFlow::PreventDefault
            } else {
                EventFlow::Continue
            }
        }
    };

    [
        bind(control, EventKind::MouseDown, carousel, press(true)),
        bind(control, EventKind::MouseLeave, carousel, release(true)),
        bind(control, EventKind::MouseUp, carousel, release(false)),
        bind(control, EventKind::MouseMove, carousel, track(true)),
        bind(control, EventKind::TouchStart, carousel, press(false)),
        bind(control, EventKind::TouchEnd, carousel, release(false)),
        bind(control, EventKind::TouchMove, carousel, track(false)),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::testing::{FakeControl, ManualScheduler};

    #[derive(Default)]
    struct Strip {
        offset_left: Cell<f64>,
        scroll_left: Cell<f64>,
        paused: RefCell<Vec<bool>>,
    }

    impl CarouselView for Strip {
        fn offset_left(&self) -> f64 {
            self.offset_left.get()
        }

        fn scroll_left(&self) -> f64 {
            self.scroll_left.get()
        }

        fn set_scroll_left(&self, value: f64) {
            self.scroll_left.set(value);
        }

        fn set_paused(&self, paused: bool) {
            self.paused.borrow_mut().push(paused);
        }
    }

    struct Fixture {
        strip: Rc<Strip>,
        scheduler: Rc<ManualScheduler>,
        carousel: Rc<RefCell<Carousel>>,
        control: FakeControl,
        _sub: Subscription,
    }

    fn fixture() -> Fixture {
        let strip = Rc::new(Strip::default());
        strip.offset_left.set(20.0);
        strip.scroll_left.set(300.0);
        let scheduler = ManualScheduler::new();
        let carousel = Rc::new(RefCell::new(Carousel::new(2.0, Duration::from_millis(3000))));
        let control = FakeControl::new();
        let sub = attach(&carousel, &control, strip.clone(), scheduler.clone());
        Fixture {
            strip,
            scheduler,
            carousel,
            control,
            _sub: sub,
        }
    }

    fn pointer(page_x: f64) -> UiEvent {
        UiEvent::Pointer { page_x }
    }

    #[test]
    fn test_mouse_drag_scrolls_twice_the_distance() {
        let f = fixture();
        f.control.emit(EventKind::MouseDown, pointer(120.0));
        assert!(f.carousel.borrow().is_dragging());
        assert_eq!(*f.strip.paused.borrow(), vec![true]);

        let flow = f.control.emit(EventKind::MouseMove, pointer(170.0));
        assert_eq!(flow, EventFlow::PreventDefault);
        assert_eq!(f.strip.scroll_left(), 200.0);

        f.control.emit(EventKind::MouseMove, pointer(70.0));
        assert_eq!(f.strip.scroll_left(), 400.0);
    }

    #[test]
    fn test_mouse_move_without_press_ignored() {
        let f = fixture();
        let flow = f.control.emit(EventKind::MouseMove, pointer(170.0));
        assert_eq!(flow, EventFlow::Continue);
        assert_eq!(f.strip.scroll_left(), 300.0);
    }

    #[test]
    fn test_release_resumes_after_delay() {
        let f = fixture();
        f.control.emit(EventKind::MouseDown, pointer(120.0));
        f.control.emit(EventKind::MouseUp, UiEvent::Release);
        assert!(!f.carousel.borrow().is_dragging());
        assert_eq!(f.scheduler.delays(), vec![Duration::from_millis(3000)]);
        assert!(f.carousel.borrow().is_paused());

        f.scheduler.run_all();
        assert!(!f.carousel.borrow().is_paused());
        assert_eq!(*f.strip.paused.borrow(), vec![true, false]);
    }

    #[test]
    fn test_leave_only_resumes_active_drag() {
        let f = fixture();
        f.control.emit(EventKind::MouseLeave, UiEvent::Release);
        assert_eq!(f.scheduler.pending(), 0);

        f.control.emit(EventKind::MouseDown, pointer(50.0));
        f.control.emit(EventKind::MouseLeave, UiEvent::Release);
        assert_eq!(f.scheduler.pending(), 1);
    }

    #[test]
    fn test_stale_resume_does_not_unpause_new_drag() {
        let f = fixture();
        f.control.emit(EventKind::MouseDown, pointer(50.0));
        f.control.emit(EventKind::MouseUp, UiEvent::Release);
        f.control.emit(EventKind::MouseDown, pointer(60.0));

        f.scheduler.run_next();
        assert!(f.carousel.borrow().is_paused());

        f.control.emit(EventKind::MouseUp, UiEvent::Release);
        f.scheduler.run_next();
        assert!(!f.carousel.borrow().is_paused());
        assert_eq!(*f.strip.paused.borrow(), vec![true, false]);
    }

    #[test]
    fn test_touch_tracks_without_drag_state() {
        let f = fixture();
        f.control.emit(EventKind::TouchStart, pointer(220.0));
        assert!(!f.carousel.borrow().is_dragging());

        let flow = f.control.emit(EventKind::TouchMove, pointer(200.0));
        assert_eq!(flow, EventFlow::Continue);
        assert_eq!(f.strip.scroll_left(), 340.0);

        f.control.emit(EventKind::TouchEnd, UiEvent::Release);
        assert_eq!(f.scheduler.pending(), 1);
    }
}
