// Recording module for managing the session lifecycle

mod state;
pub use state::{CountdownTick, SessionController, SessionStateError, SessionStatus};

#[cfg(test)]
mod state_test;
