use chrono::{DateTime, TimeDelta, Utc};

/// Which edge of a burst runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Edge {
    /// Run once, `wait` after the last call of the burst.
    #[default]
    Trailing,
    /// Run on the first call of a burst; the burst ends after `wait` of quiet.
    Leading,
}

/// Debounce: calls keep pushing the deadline back until `wait` passes quietly.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait: TimeDelta,
    edge: Edge,
    deadline: Option<DateTime<Utc>>,
}

impl Debounce {
    pub fn new(wait: TimeDelta) -> Self {
        Self::with_edge(wait, Edge::Trailing)
    }

    pub fn with_edge(wait: TimeDelta, edge: Edge) -> Self {
        Self {
            wait,
            edge,
            deadline: None,
        }
    }

    /// Register a call. Returns `true` when it should run now (leading edge only).
    pub fn call(&mut self, now: DateTime<Utc>) -> bool {
        let starts_burst = self.deadline.is_none();
        self.deadline = Some(now + self.wait);
        self.edge == Edge::Leading && starts_burst
    }

    /// Close the burst if its quiet interval has elapsed. Returns `true` when
    /// the trailing run is due.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(at) if at <= now => {
                self.deadline = None;
                self.edge == Edge::Trailing
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
