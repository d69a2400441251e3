use std::time::Duration;
use strum_macros::Display;

use super::output::OutputSink;
use super::shared::{SharedIntensity, MAX_INTENSITY};
use crate::shutdown::Shutdown;

pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SignalState {
    Idle,
    SteadyOn,
    Modulating,
}

impl SignalState {
    pub fn from_intensity(intensity: u8) -> Self {
        match intensity {
            0 => SignalState::Idle,
            i if i >= MAX_INTENSITY => SignalState::SteadyOn,
            _ => SignalState::Modulating,
        }
    }
}

/// One stretch of constant output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase {
    pub level: u8,
    pub duration: Duration,
}

/// Output phases for one period at the given intensity.
///
/// Partial intensities blink: the line is ON for `off_time` and then OFF for
/// `off_time`, where `off_time = period * (1 - intensity / 100)`. A weaker
/// signal therefore blinks faster rather than dimmer. This is the indicator's
/// intended behaviour, not duty-cycle PWM.
pub fn signal_plan(intensity: u8, period: Duration) -> Vec<Phase> {
    match SignalState::from_intensity(intensity) {
        SignalState::Idle => vec![Phase {
            level: 0,
            duration: period,
        }],
        SignalState::SteadyOn => vec![Phase {
            level: MAX_INTENSITY,
            duration: period,
        }],
        SignalState::Modulating => {
            let on_time = period * u32::from(intensity) / u32::from(MAX_INTENSITY);
            let off_time = period.saturating_sub(on_time);
            vec![
                Phase {
                    level: MAX_INTENSITY,
                    duration: off_time,
                },
                Phase {
                    level: 0,
                    duration: off_time,
                },
            ]
        }
    }
}

pub struct SignalLoop<O: OutputSink> {
    intensity: SharedIntensity,
    output: O,
    period: Duration,
}

impl<O: OutputSink> SignalLoop<O> {
    pub fn new(intensity: SharedIntensity, output: O, period: Duration) -> Self {
        Self {
            intensity,
            output,
            period,
        }
    }

    /// Runs until `shutdown` fires, then leaves the output off.
    pub async fn run(mut self, mut shutdown: Shutdown) {
        let mut state: Option<SignalState> = None;

        'periods: loop {
            let intensity = self.intensity.get();
            let next_state = SignalState::from_intensity(intensity);
            if state != Some(next_state) {
                log::debug!("Signal {} (intensity {})", next_state, intensity);
                state = Some(next_state);
            }

            for phase in signal_plan(intensity, self.period) {
                self.output.set_intensity(phase.level);
                if shutdown.sleep(phase.duration).await {
                    break 'periods;
                }
            }
        }

        self.output.set_intensity(0);
        log::debug!("Signal loop stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shutdown;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    #[derive(Clone)]
    struct Recorder {
        start: Instant,
        events: Arc<Mutex<Vec<(Duration, u8)>>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                events: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn events(&self) -> Vec<(Duration, u8)> {
            self.events.lock().unwrap().clone()
        }
    }

    impl OutputSink for Recorder {
        fn set_intensity(&mut self, intensity: u8) {
            self.events
                .lock()
                .unwrap()
                .push((self.start.elapsed(), intensity));
        }
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_states() {
        assert_eq!(SignalState::from_intensity(0), SignalState::Idle);
        assert_eq!(SignalState::from_intensity(1), SignalState::Modulating);
        assert_eq!(SignalState::from_intensity(99), SignalState::Modulating);
        assert_eq!(SignalState::from_intensity(100), SignalState::SteadyOn);
        assert_eq!(SignalState::SteadyOn.to_string(), "steady_on");
    }

    #[test]
    fn test_plan_idle_and_steady() {
        assert_eq!(
            signal_plan(0, ms(1000)),
            vec![Phase {
                level: 0,
                duration: ms(1000)
            }]
        );
        assert_eq!(
            signal_plan(100, ms(1000)),
            vec![Phase {
                level: 100,
                duration: ms(1000)
            }]
        );
    }

    #[test]
    fn test_plan_half_intensity_is_symmetric() {
        let plan = signal_plan(50, ms(1000));
        assert_eq!(
            plan,
            vec![
                Phase {
                    level: 100,
                    duration: ms(500)
                },
                Phase {
                    level: 0,
                    duration: ms(500)
                },
            ]
        );
    }

    #[test]
    fn test_plan_uses_off_time_for_both_phases() {
        // on_time = 200ms, off_time = 800ms
        let plan = signal_plan(20, ms(1000));
        assert_eq!(plan[0], Phase { level: 100, duration: ms(800) });
        assert_eq!(plan[1], Phase { level: 0, duration: ms(800) });

        // lower intensity, longer phases
        let faint = signal_plan(1, ms(1000));
        assert_eq!(faint[0].duration, ms(990));
        let strong = signal_plan(90, ms(1000));
        assert_eq!(strong[0].duration, ms(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_half_intensity_timing() {
        let intensity = SharedIntensity::new();
        intensity.set(50);
        let recorder = Recorder::new();
        let (trigger, shutdown) = shutdown::channel();

        let handle = tokio::spawn(SignalLoop::new(intensity, recorder.clone(), ms(1000)).run(shutdown));
        tokio::time::sleep(ms(2250)).await;
        trigger.trigger();
        handle.await.unwrap();

        let events = recorder.events();
        assert_eq!(
            &events[..5],
            &[
                (ms(0), 100),
                (ms(500), 0),
                (ms(1000), 100),
                (ms(1500), 0),
                (ms(2000), 100),
            ]
        );
        assert_eq!(events.last(), Some(&(ms(2250), 0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_follows_latest_intensity() {
        let intensity = SharedIntensity::new();
        let recorder = Recorder::new();
        let (trigger, shutdown) = shutdown::channel();

        let handle = tokio::spawn(
            SignalLoop::new(intensity.clone(), recorder.clone(), ms(1000)).run(shutdown),
        );
        tokio::time::sleep(ms(1500)).await;
        intensity.set(100);
        tokio::time::sleep(ms(1000)).await;
        trigger.trigger();
        handle.await.unwrap();

        let events = recorder.events();
        assert_eq!(events[0], (ms(0), 0));
        assert_eq!(events[1], (ms(1000), 0));
        // the change is picked up at the next period boundary
        assert_eq!(events[2], (ms(2000), 100));
        assert_eq!(events.last(), Some(&(ms(2500), 0)));
    }
}
