use chrono::{DateTime, TimeDelta, Utc};

/// What happened to a throttled call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Run now.
    Immediate,
    /// A trailing run was armed for the given instant.
    Deferred(DateTime<Utc>),
    /// Folded into the already armed trailing run.
    Coalesced,
}

/// Leading + trailing throttle.
///
/// The first call of a window runs immediately. Calls inside the window arm
/// one trailing run at the end of the window; later calls fold into it.
#[derive(Debug, Clone)]
pub struct Throttle {
    window: TimeDelta,
    last_run: Option<DateTime<Utc>>,
    trailing_at: Option<DateTime<Utc>>,
}

impl Throttle {
    pub fn new(window: TimeDelta) -> Self {
        Self {
            window,
            last_run: None,
            trailing_at: None,
        }
    }

    pub fn window(&self) -> TimeDelta {
        self.window
    }

    pub fn call(&mut self, now: DateTime<Utc>) -> Admission {
        let remaining = match self.last_run {
            Some(last) => self.window - (now - last),
            None => TimeDelta::zero(),
        };

        if remaining <= TimeDelta::zero() {
            // an immediate run supersedes any armed trailing run
            self.trailing_at = None;
            self.last_run = Some(now);
            return Admission::Immediate;
        }

        match self.trailing_at {
            Some(_) => Admission::Coalesced,
            None => {
                let at = now + remaining;
                self.trailing_at = Some(at);
                Admission::Deferred(at)
            }
        }
    }

    /// Fire the trailing run if it is due.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.trailing_at {
            Some(at) if at <= now => {
                self.trailing_at = None;
                self.last_run = Some(now);
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.trailing_at
    }

    pub fn cancel(&mut self) {
        self.trailing_at = None;
    }
}
