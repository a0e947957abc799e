// Animation playback: the clock advanced on the render thread and the
// command channel the UI uses to steer it.

pub mod clock;
pub mod control;

pub use clock::{AnimationClock, PlaybackState};
pub use control::{PlaybackCommand, PlaybackController, PlaybackInbox, channel};
