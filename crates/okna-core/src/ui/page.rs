use std::time::Duration;

use futures::future::LocalBoxFuture;

/// Page-level geometry and scrolling.
pub trait Page {
    /// Current vertical scroll offset of the document.
    fn scroll_y(&self) -> f64;

    /// Height of the fixed header, or 0 when the page has none.
    fn header_height(&self) -> f64;

    /// Viewport-relative top of the element with `id`, if it exists.
    fn element_top(&self, id: &str) -> Option<f64>;

    /// Smooth-scroll the document to an absolute offset.
    fn scroll_to(&self, top: f64);

    /// Suppress or restore scrolling of the page body.
    fn set_scroll_locked(&self, locked: bool);
}

/// Fire-and-forget timers.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// Runs futures on the single UI thread.
pub trait Spawn {
    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>);
}
