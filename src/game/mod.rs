//! Toolkit-free game core: sequence generation, playback timing and the
//! session state machine. Nothing in here touches GTK.

pub mod config;
pub mod error;
pub mod flasher;
pub mod level;
pub mod panel;
pub mod scheduler;
pub mod sequence;
pub mod session;

pub use panel::{PANEL_COUNT, PanelColor};
pub use sequence::{RandomSequence, SequenceSource};
pub use session::{Prompt, PromptKind, Screen, Session, SessionEvent};
