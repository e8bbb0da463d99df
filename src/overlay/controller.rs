use core::fmt;

use heapless::Deque;

use super::{
    counters::GestureCounters,
    host::{deliver, OverlayHost},
};
use crate::gesture::{
    GestureEffect, GestureInterpreter, GestureOutput, Point, PointerEvent, TimerToken,
};

pub const INPUT_QUEUE_CAPACITY: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayError {
    QueueFull { capacity: usize },
    OutOfOrder { last_ms: u64, t_ms: u64 },
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull { capacity } => {
                write!(f, "pointer queue full ({capacity} events pending)")
            }
            Self::OutOfOrder { last_ms, t_ms } => {
                write!(f, "pointer event at {t_ms} ms precedes last event at {last_ms} ms")
            }
        }
    }
}

impl std::error::Error for OverlayError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingTimer {
    token: TimerToken,
    deadline_ms: u64,
}

/// Serializes pointer events and long-press deadlines into one ordered stream
/// for the interpreter and forwards the resulting effects to the host.
pub struct OverlayController<H: OverlayHost> {
    interpreter: GestureInterpreter,
    host: H,
    queue: Deque<PointerEvent, INPUT_QUEUE_CAPACITY>,
    pending_timer: Option<PendingTimer>,
    last_event_ms: Option<u64>,
    counters: GestureCounters,
}

impl<H: OverlayHost> OverlayController<H> {
    pub fn new(interpreter: GestureInterpreter, host: H) -> Self {
        Self {
            interpreter,
            host,
            queue: Deque::new(),
            pending_timer: None,
            last_event_ms: None,
            counters: GestureCounters::default(),
        }
    }

    /// Queues one pointer event. Timestamps must not go backwards.
    pub fn push(&mut self, event: PointerEvent) -> Result<(), OverlayError> {
        if let Some(last_ms) = self.last_event_ms {
            if event.t_ms < last_ms {
                log::warn!(
                    "overlay: out-of-order event kind={} t_ms={} last_ms={}",
                    event.kind.label(),
                    event.t_ms,
                    last_ms
                );
                return Err(OverlayError::OutOfOrder {
                    last_ms,
                    t_ms: event.t_ms,
                });
            }
        }
        if self.queue.push_back(event).is_err() {
            log::warn!(
                "overlay: queue full capacity={} dropped kind={} t_ms={}",
                INPUT_QUEUE_CAPACITY,
                event.kind.label(),
                event.t_ms
            );
            return Err(OverlayError::QueueFull {
                capacity: INPUT_QUEUE_CAPACITY,
            });
        }
        self.last_event_ms = Some(event.t_ms);
        Ok(())
    }

    /// Drains the queue in order, then fires the long-press deadline if it is
    /// due at `now_ms`. A deadline equal to an event's timestamp fires first.
    /// Returns the number of pointer events processed.
    pub fn pump(&mut self, now_ms: u64) -> usize {
        let mut processed = 0;
        while let Some(event) = self.queue.pop_front() {
            self.fire_due_timer(event.t_ms);
            self.process_pointer(event);
            processed += 1;
        }
        self.fire_due_timer(now_ms);
        processed
    }

    pub fn dispatch(&mut self, event: PointerEvent) -> Result<usize, OverlayError> {
        self.push(event)?;
        Ok(self.pump(event.t_ms))
    }

    /// When the host should call [`Self::pump`] next if no pointer event
    /// arrives first.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending_timer.map(|pending| pending.deadline_ms)
    }

    /// Drops queued input and force-cancels any live gesture, e.g. when the
    /// overlay is hidden or the platform loses the pointer stream.
    pub fn reset(&mut self, now_ms: u64) {
        let dropped = self.queue.len();
        self.queue.clear();
        self.counters.record_reset();

        let t_ms = self.last_event_ms.map_or(now_ms, |last| last.max(now_ms));
        if !self.interpreter.is_idle() {
            let rest = self.interpreter.rest_position();
            self.process_pointer(PointerEvent::cancel(rest.x, rest.y, t_ms));
        }
        self.pending_timer = None;
        self.last_event_ms = Some(t_ms);
        log::info!("overlay: reset t_ms={} dropped={}", t_ms, dropped);
    }

    pub fn set_rest_position(&mut self, rest_position: Point) -> bool {
        self.interpreter.set_rest_position(rest_position)
    }

    pub fn interpreter(&self) -> &GestureInterpreter {
        &self.interpreter
    }

    pub fn counters(&self) -> GestureCounters {
        self.counters
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    fn process_pointer(&mut self, event: PointerEvent) {
        let before = self.interpreter.state();
        let output = self.interpreter.handle(event);
        self.counters.record_pointer(before, event.kind, &output);
        self.apply(&output);
    }

    fn fire_due_timer(&mut self, now_ms: u64) {
        let Some(pending) = self.pending_timer else {
            return;
        };
        if pending.deadline_ms > now_ms {
            return;
        }
        self.pending_timer = None;
        let output = self
            .interpreter
            .long_press_elapsed(pending.token, pending.deadline_ms);
        self.counters.record_timer(&output);
        self.apply(&output);
    }

    fn apply(&mut self, output: &GestureOutput) {
        for effect in &output.effects {
            match *effect {
                GestureEffect::ScheduleLongPress { token, deadline_ms } => {
                    self.pending_timer = Some(PendingTimer { token, deadline_ms });
                }
                GestureEffect::CancelLongPress { token } => {
                    if self
                        .pending_timer
                        .is_some_and(|pending| pending.token == token)
                    {
                        self.pending_timer = None;
                    }
                }
                other => {
                    deliver(&mut self.host, other);
                }
            }
        }
    }
}
