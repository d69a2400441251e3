mod pass_window;
mod source;

pub use pass_window::{PassEvent, PassWindow, TimeToEvent, WindowState};
pub use source::{OpenNotifyPassSource, PassPredictionSource};
