use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::HtmlElement;

use crate::config::PortfolioConfig;
use crate::dom;
use crate::error::Result;

/// Offsets closer than this to the last value the carousel wrote are echoes
/// of its own scrolling, not user input.
const ECHO_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    pub step: f64,
    pub scroll_resume_ms: f64,
    pub pointer_resume_ms: f64,
}

impl From<&PortfolioConfig> for CarouselSettings {
    fn from(config: &PortfolioConfig) -> Self {
        Self {
            step: config.scroll_step,
            scroll_resume_ms: config.scroll_resume_ms,
            pointer_resume_ms: config.pointer_resume_ms,
        }
    }
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self::from(&PortfolioConfig::default())
    }
}

/// Offset after one frame of auto-advance. Wraps to the start once the
/// maximum scrollable offset is reached.
pub fn next_offset(current: f64, step: f64, scroll_width: f64, client_width: f64) -> f64 {
    let max_scroll = scroll_width - client_width;
    let advanced = current + step;
    if advanced >= max_scroll {
        0.0
    } else {
        advanced
    }
}

/// Debounced "user is interacting" flag. The pending deadline plays the
/// role of the resume timer: every event replaces it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InteractionGate {
    interacting: bool,
    resume_at: Option<f64>,
}

impl InteractionGate {
    pub fn hold_until(&mut self, deadline: f64) {
        self.interacting = true;
        self.resume_at = Some(deadline);
    }

    /// Interaction with no scheduled end.
    pub fn hold(&mut self) {
        self.interacting = true;
        self.resume_at = None;
    }

    pub fn release_at(&mut self, deadline: f64) {
        self.resume_at = Some(deadline);
    }

    pub fn is_interacting(&mut self, now: f64) -> bool {
        if let Some(deadline) = self.resume_at {
            if now >= deadline {
                self.interacting = false;
                self.resume_at = None;
            }
        }
        self.interacting
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    settings: CarouselSettings,
    gate: InteractionGate,
    last_written: Option<f64>,
}

impl CarouselState {
    pub fn new(settings: CarouselSettings) -> Self {
        Self {
            settings,
            gate: InteractionGate::default(),
            last_written: None,
        }
    }

    /// A scroll event observed at `offset`.
    pub fn on_scroll(&mut self, offset: f64, now: f64) {
        if self
            .last_written
            .is_some_and(|written| (offset - written).abs() < ECHO_TOLERANCE)
        {
            return;
        }
        self.gate.hold_until(now + self.settings.scroll_resume_ms);
    }

    pub fn on_pointer_enter(&mut self) {
        self.gate.hold();
    }

    pub fn on_pointer_leave(&mut self, now: f64) {
        self.gate.release_at(now + self.settings.pointer_resume_ms);
    }

    pub fn is_paused(&mut self, now: f64) -> bool {
        self.gate.is_interacting(now)
    }

    /// One animation frame. Returns the offset to write, or `None` while the
    /// user is interacting.
    ///
    /// The element stores whole pixels, so an `offset` within tolerance of
    /// the last write continues from the fractional position instead.
    pub fn tick(
        &mut self,
        now: f64,
        offset: f64,
        scroll_width: f64,
        client_width: f64,
    ) -> Option<f64> {
        if self.gate.is_interacting(now) {
            return None;
        }
        let position = match self.last_written {
            Some(written) if (offset - written).abs() < ECHO_TOLERANCE => written,
            _ => offset,
        };
        let next = next_offset(position, self.settings.step, scroll_width, client_width);
        self.last_written = Some(next);
        Some(next)
    }
}

struct Inner {
    container: HtmlElement,
    state: RefCell<CarouselState>,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
    running: Cell<bool>,
}

impl Inner {
    fn schedule(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |timestamp| {
            if let Some(inner) = weak.upgrade() {
                inner.on_frame(timestamp);
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn on_frame(self: &Rc<Self>, timestamp: f64) {
        self.frame.borrow_mut().take();
        if !self.running.get() {
            return;
        }

        let container = &self.container;
        let next = self.state.borrow_mut().tick(
            timestamp,
            f64::from(container.scroll_left()),
            f64::from(container.scroll_width()),
            f64::from(container.client_width()),
        );
        if let Some(offset) = next {
            container.set_scroll_left(offset as i32);
        }

        self.schedule();
    }
}

/// Handle to a running auto-scroll loop. Dropping it stops the loop.
pub struct AutoScroller {
    inner: Rc<Inner>,
}

impl AutoScroller {
    pub fn start(container: HtmlElement, settings: CarouselSettings) -> Result<Self> {
        let window = dom::window()?;
        let inner = Rc::new(Inner {
            container,
            state: RefCell::new(CarouselState::new(settings)),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            running: Cell::new(true),
        });

        let listeners = vec![
            {
                let weak = Rc::downgrade(&inner);
                let window = window.clone();
                EventListener::new(&inner.container, "scroll", move |_event| {
                    with_inner(&weak, |inner| {
                        let offset = f64::from(inner.container.scroll_left());
                        inner
                            .state
                            .borrow_mut()
                            .on_scroll(offset, dom::now_ms(&window));
                    });
                })
            },
            {
                let weak = Rc::downgrade(&inner);
                EventListener::new(&inner.container, "mouseenter", move |_event| {
                    with_inner(&weak, |inner| inner.state.borrow_mut().on_pointer_enter());
                })
            },
            {
                let weak = Rc::downgrade(&inner);
                EventListener::new(&inner.container, "mouseleave", move |_event| {
                    with_inner(&weak, |inner| {
                        inner
                            .state
                            .borrow_mut()
                            .on_pointer_leave(dom::now_ms(&window));
                    });
                })
            },
        ];
        *inner.listeners.borrow_mut() = listeners;

        inner.schedule();
        log::debug!("event=carousel_start status=ok step={}", settings.step);
        Ok(Self { inner })
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    /// Cancels the pending frame and detaches the interaction listeners.
    pub fn stop(&self) {
        if !self.inner.running.replace(false) {
            return;
        }
        self.inner.frame.borrow_mut().take();
        self.inner.listeners.borrow_mut().clear();
        log::debug!("event=carousel_stop status=ok");
    }
}

impl Drop for AutoScroller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn with_inner(weak: &Weak<Inner>, f: impl FnOnce(&Inner)) {
    if let Some(inner) = weak.upgrade() {
        f(&inner);
    }
}
