//! Editor core: state aggregate, drag state and the event-driven state machine

mod drag;
mod events;
mod machine;
mod state;

pub use drag::*;
pub use events::*;
pub use machine::*;
pub use state::*;
