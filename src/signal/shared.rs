use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

pub const MAX_INTENSITY: u8 = 100;

/// Intensity handed from the tracker to the signal loop.
///
/// Only the tracker writes; the signal loop reads once per period and only
/// ever needs the latest value.
#[derive(Debug, Clone, Default)]
pub struct SharedIntensity {
    value: Arc<AtomicU8>,
}

impl SharedIntensity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u8 {
        self.value.load(Ordering::Acquire)
    }

    pub fn set(&self, intensity: u8) {
        self.value
            .store(intensity.min(MAX_INTENSITY), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(SharedIntensity::new().get(), 0);
    }

    #[test]
    fn test_clones_share_value() {
        let writer = SharedIntensity::new();
        let reader = writer.clone();
        writer.set(42);
        assert_eq!(reader.get(), 42);
    }

    #[test]
    fn test_clamped_to_max() {
        let intensity = SharedIntensity::new();
        intensity.set(250);
        assert_eq!(intensity.get(), MAX_INTENSITY);
    }

    #[test]
    fn test_cross_thread_visibility() {
        let writer = SharedIntensity::new();
        let reader = writer.clone();
        std::thread::spawn(move || writer.set(77)).join().unwrap();
        assert_eq!(reader.get(), 77);
    }
}
