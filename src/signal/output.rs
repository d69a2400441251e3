use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Physical or virtual indicator driven by the signal loop.
///
/// Implementations must not fail the caller: errors are logged and dropped.
pub trait OutputSink: Send {
    fn set_intensity(&mut self, intensity: u8);
}

impl OutputSink for Box<dyn OutputSink> {
    fn set_intensity(&mut self, intensity: u8) {
        (**self).set_intensity(intensity)
    }
}

/// Reports level changes through the logger; used when no hardware is wired.
#[derive(Debug, Default)]
pub struct LogOutput {
    last: Option<u8>,
}

impl LogOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for LogOutput {
    fn set_intensity(&mut self, intensity: u8) {
        if self.last != Some(intensity) {
            log::debug!("Indicator level {}", intensity);
            self.last = Some(intensity);
        }
    }
}

/// A sysfs GPIO line (`<base>/gpio<N>/value`). Any non-zero intensity drives
/// the line high.
#[derive(Debug)]
pub struct GpioOutput {
    value_path: PathBuf,
    warned: bool,
}

impl GpioOutput {
    pub fn new(base_path: &Path, pin: u32) -> Self {
        let line_dir = base_path.join(format!("gpio{}", pin));
        if let Err(e) = prepare_line(base_path, &line_dir, pin) {
            log::warn!("GPIO {} setup failed: {}", pin, e);
        }
        Self {
            value_path: line_dir.join("value"),
            warned: false,
        }
    }
}

fn prepare_line(base_path: &Path, line_dir: &Path, pin: u32) -> io::Result<()> {
    if !line_dir.exists() {
        fs::write(base_path.join("export"), pin.to_string())?;
    }
    fs::write(line_dir.join("direction"), "out")
}

impl OutputSink for GpioOutput {
    fn set_intensity(&mut self, intensity: u8) {
        let level = if intensity > 0 { "1" } else { "0" };
        match fs::write(&self.value_path, level) {
            Ok(()) => self.warned = false,
            Err(e) if !self.warned => {
                log::warn!("GPIO write to {} failed: {}", self.value_path.display(), e);
                self.warned = true;
            }
            Err(e) => log::debug!("GPIO write failed again: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("iss-beacon-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_gpio_writes_levels() {
        let base = scratch_dir("gpio-levels");
        fs::create_dir_all(base.join("gpio16")).unwrap();

        let mut output = GpioOutput::new(&base, 16);
        assert_eq!(fs::read_to_string(base.join("gpio16/direction")).unwrap(), "out");

        output.set_intensity(100);
        assert_eq!(fs::read_to_string(base.join("gpio16/value")).unwrap(), "1");
        output.set_intensity(0);
        assert_eq!(fs::read_to_string(base.join("gpio16/value")).unwrap(), "0");
        output.set_intensity(37);
        assert_eq!(fs::read_to_string(base.join("gpio16/value")).unwrap(), "1");

        let _ = fs::remove_dir_all(&base);
    }

    #[test]
    fn test_gpio_failures_are_swallowed() {
        let base = scratch_dir("gpio-missing").join("absent");
        let mut output = GpioOutput::new(&base, 5);
        output.set_intensity(100);
        output.set_intensity(0);
        assert!(output.warned);
    }

    #[test]
    fn test_log_output_tracks_last_level() {
        let mut output = LogOutput::new();
        output.set_intensity(100);
        output.set_intensity(100);
        assert_eq!(output.last, Some(100));
    }
}
