use std::time::{Duration, Instant};

use tracing::debug;

use julia_explorer_render::{render, PixelBuffer, RenderRequest};

/// Quiet period, in milliseconds, that must elapse after the last request.
pub const DEFAULT_DEBOUNCE_MS: u64 = 16;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    /// A request waits for its deadline.
    Pending {
        deadline: Instant,
    },
    Rendering,
}

impl SchedulerState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Pending { .. } => "Pending",
            Self::Rendering => "Rendering\u{2026}",
        }
    }
}

/// A finished render pass.
#[derive(Debug)]
pub struct RenderOutcome {
    /// Increases by one for every executed render.
    pub generation: u64,
    pub request: RenderRequest,
    /// `None` when the request had a zero-area buffer.
    pub buffer: Option<PixelBuffer>,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Debounces render requests so at most one is pending at a time.
///
/// Each [`request`](Self::request) replaces whatever was pending and restarts
/// the timer. The host calls [`poll`](Self::poll) from its frame callback;
/// once the deadline has passed the latest request is rendered there.
#[derive(Debug)]
pub struct RenderScheduler {
    delay: Duration,
    state: SchedulerState,
    pending: Option<RenderRequest>,
    generation: u64,
    superseded: u64,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl RenderScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: SchedulerState::Idle,
            pending: None,
            generation: 0,
            superseded: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of renders executed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of requests dropped because a newer one replaced them.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }

    pub fn pending(&self) -> Option<&RenderRequest> {
        self.pending.as_ref()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            SchedulerState::Pending { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Queue `request`, replacing any pending one, and restart the timer.
    pub fn request(&mut self, request: RenderRequest, now: Instant) {
        if self.pending.replace(request).is_some() {
            self.superseded += 1;
        }
        self.state = SchedulerState::Pending {
            deadline: now + self.delay,
        };
    }

    /// Drop the pending request, if any. Returns whether one was dropped.
    pub fn cancel(&mut self) -> bool {
        let dropped = self.pending.take().is_some();
        if dropped {
            self.superseded += 1;
            debug!("Pending render cancelled");
        }
        self.state = SchedulerState::Idle;
        dropped
    }

    /// Run the pending render if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<RenderOutcome> {
        self.poll_with(now, render)
    }

    /// [`poll`](Self::poll) with a caller-supplied render function.
    pub fn poll_with<F>(&mut self, now: Instant, render_fn: F) -> Option<RenderOutcome>
    where
        F: FnOnce(&RenderRequest) -> Option<PixelBuffer>,
    {
        match self.state {
            SchedulerState::Pending { deadline } if now >= deadline => self.run(render_fn),
            _ => None,
        }
    }

    /// Run the pending render now, ignoring the deadline.
    pub fn flush(&mut self) -> Option<RenderOutcome> {
        self.flush_with(render)
    }

    pub fn flush_with<F>(&mut self, render_fn: F) -> Option<RenderOutcome>
    where
        F: FnOnce(&RenderRequest) -> Option<PixelBuffer>,
    {
        match self.state {
            SchedulerState::Pending { .. } => self.run(render_fn),
            _ => None,
        }
    }

    fn run<F>(&mut self, render_fn: F) -> Option<RenderOutcome>
    where
        F: FnOnce(&RenderRequest) -> Option<PixelBuffer>,
    {
        let Some(request) = self.pending.take() else {
            self.state = SchedulerState::Idle;
            return None;
        };
        self.state = SchedulerState::Rendering;
        self.generation += 1;
        debug!(
            generation = self.generation,
            superseded = self.superseded,
            width = request.width,
            height = request.height,
            "Dispatching render"
        );
        let buffer = render_fn(&request);
        self.state = SchedulerState::Idle;
        Some(RenderOutcome {
            generation: self.generation,
            request,
            buffer,
        })
    }
}
