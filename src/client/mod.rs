//! Client side of the coffee API: submission state tracking and rendering.

pub mod render;
pub mod submitter;

pub use render::{format_confidence, render_state, render_suggestion};
pub use submitter::{SubmissionState, Submitter};
