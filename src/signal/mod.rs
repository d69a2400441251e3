mod output;
mod shared;
mod signal_loop;

pub use output::{GpioOutput, LogOutput, OutputSink};
pub use shared::{SharedIntensity, MAX_INTENSITY};
pub use signal_loop::{SignalLoop, SignalState, DEFAULT_PERIOD};
