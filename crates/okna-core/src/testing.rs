//! In-memory stand-ins for the DOM, shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;

use crate::error::OknaError;
use crate::theme::KeyValueStore;
use crate::ui::{Control, EventFlow, EventKind, Handler, Page, Scheduler, Spawn, Subscription, UiEvent};

type Listener = (u64, EventKind, Rc<RefCell<Handler>>);

/// A control whose events are fired by the test.
#[derive(Clone, Default)]
pub struct FakeControl {
    listeners: Rc<RefCell<Vec<Listener>>>,
    next_id: Rc<Cell<u64>>,
}

impl FakeControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener of `kind`.
    pub fn emit(&self, kind: EventKind, event: UiEvent) -> EventFlow {
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, h)| h.clone())
            .collect();

        let mut flow = EventFlow::Continue;
        for handler in handlers {
            let mut handler = handler.borrow_mut();
            if (&mut **handler)(&event) == EventFlow::PreventDefault {
                flow = EventFlow::PreventDefault;
            }
        }
        flow
    }

    pub fn click(&self) -> EventFlow {
        self.emit(EventKind::Click, UiEvent::Click)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Control for FakeControl {
    fn listen(&self, kind: EventKind, handler: Handler) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners
            .borrow_mut()
            .push((id, kind, Rc::new(RefCell::new(handler))));

        let listeners = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(i, _, _)| *i != id);
            }
        })
    }
}

/// Records scrolls and lock changes; geometry is set by the test.
#[derive(Default)]
pub struct FakePage {
    scroll_y: Cell<f64>,
    header_height: Cell<f64>,
    elements: RefCell<HashMap<String, f64>>,
    scrolls: RefCell<Vec<f64>>,
    locked: Cell<bool>,
    lock_changes: Cell<u32>,
}

impl FakePage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn set_scroll_y(&self, y: f64) {
        self.scroll_y.set(y);
    }

    pub fn set_header_height(&self, h: f64) {
        self.header_height.set(h);
    }

    pub fn add_element(&self, id: &str, top: f64) {
        self.elements.borrow_mut().insert(id.to_string(), top);
    }

    pub fn scrolls(&self) -> Vec<f64> {
        self.scrolls.borrow().clone()
    }

    pub fn locked(&self) -> bool {
        self.locked.get()
    }

    pub fn lock_changes(&self) -> u32 {
        self.lock_changes.get()
    }
}

impl Page for FakePage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn header_height(&self) -> f64 {
        self.header_height.get()
    }

    fn element_top(&self, id: &str) -> Option<f64> {
        self.elements.borrow().get(id).copied()
    }

    fn scroll_to(&self, top: f64) {
        self.scrolls.borrow_mut().push(top);
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.locked.set(locked);
        self.lock_changes.set(self.lock_changes.get() + 1);
    }
}

/// Timers that only run when the test says so.
#[derive(Default)]
pub struct ManualScheduler {
    tasks: RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.tasks.borrow().iter().map(|(d, _)| *d).collect()
    }

    /// Run every queued task in scheduling order.
    pub fn run_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for (_, task) in tasks {
            task();
        }
    }

    /// Run only the oldest queued task.
    pub fn run_next(&self) {
        let task = {
            let mut tasks = self.tasks.borrow_mut();
            if tasks.is_empty() {
                return;
            }
            tasks.remove(0).1
        };
        task();
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay, task));
    }
}

/// Collects spawned futures so the test can await them.
#[derive(Default)]
pub struct CollectSpawner {
    futures: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl CollectSpawner {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn take(&self) -> Vec<LocalBoxFuture<'static, ()>> {
        std::mem::take(&mut *self.futures.borrow_mut())
    }
}

impl Spawn for CollectSpawner {
    fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
        self.futures.borrow_mut().push(future);
    }
}

/// `localStorage` stand-in.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with(key: &str, value: &str) -> Rc<Self> {
        let store = Self::new();
        store.items.borrow_mut().insert(key.into(), value.into());
        store
    }

    pub fn fail_writes(&self) {
        self.fail_writes.set(true);
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), OknaError> {
        if self.fail_writes.get() {
            return Err(OknaError::Storage("quota exceeded".into()));
        }
        self.items.borrow_mut().insert(key.into(), value.into());
        Ok(())
    }
}
