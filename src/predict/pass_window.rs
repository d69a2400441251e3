use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

/// One predicted visibility window, in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PassWindow {
    #[serde(alias = "risetime")]
    pub rise_time: i64,
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WindowState {
    InPass,
    AwaitingRise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PassEvent {
    Rise,
    Fall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct TimeToEvent {
    pub event: PassEvent,
    pub remaining_seconds: u64,
}

impl TimeToEvent {
    pub fn label(&self) -> &'static str {
        match self.event {
            PassEvent::Rise => "time remaining until rise",
            PassEvent::Fall => "time remaining until fall",
        }
    }

    pub fn remaining(&self) -> Duration {
        Duration::from_secs(self.remaining_seconds)
    }
}

impl PassWindow {
    pub fn new(rise_time: i64, duration: u32) -> Self {
        Self {
            rise_time,
            duration,
        }
    }

    pub fn fall_time(&self) -> i64 {
        self.rise_time.saturating_add(i64::from(self.duration))
    }

    pub fn rise_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.rise_time, 0)
    }

    pub fn fall_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.fall_time(), 0)
    }

    /// Half-open: the rise instant is inside, the fall instant is not.
    pub fn contains(&self, instant: i64) -> bool {
        self.rise_time <= instant && instant < self.fall_time()
    }

    /// Both ends fall inside the range `chrono` can represent.
    pub fn is_representable(&self) -> bool {
        self.rise_at().is_some() && self.fall_at().is_some()
    }

    pub fn has_elapsed(&self, instant: i64) -> bool {
        instant >= self.fall_time()
    }

    pub fn state(&self, instant: i64) -> WindowState {
        if self.contains(instant) {
            WindowState::InPass
        } else {
            WindowState::AwaitingRise
        }
    }

    /// Time until the window closes while inside it, otherwise until it
    /// opens. A window already in the past reports zero.
    pub fn time_to_event(&self, instant: i64) -> TimeToEvent {
        let (event, remaining) = if self.contains(instant) {
            (PassEvent::Fall, self.fall_time().saturating_sub(instant))
        } else {
            (PassEvent::Rise, self.rise_time.saturating_sub(instant))
        };
        TimeToEvent {
            event,
            remaining_seconds: remaining.max(0) as u64,
        }
    }
}
