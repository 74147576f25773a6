// Session state management for the recording lifecycle

use crate::studio_constants::COUNTDOWN_START;
use serde::Serialize;

/// Session status representing where the recording lifecycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Not recording, ready to start
    #[default]
    Idle,
    /// Countdown running before recording begins
    Starting,
    /// Actively recording and scrolling
    Recording,
    /// Stop requested, waiting for the encoder to finalize
    Stopping,
    /// Encoder finalized, assembling the downloadable file
    Processing,
}

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStateError {
    /// Invalid state transition attempted
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },
}

impl std::fmt::Display for SessionStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionStateError::InvalidTransition { from, to } => {
                write!(f, "Invalid state transition from {:?} to {:?}", from, to)
            }
        }
    }
}

impl std::error::Error for SessionStateError {}

/// Outcome of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Countdown still running with this many seconds left
    Remaining(u8),
    /// Countdown reached zero and recording has begun
    Finished,
}

/// Controller for the session lifecycle and its countdown
///
/// Pure state machine: it performs no I/O and owns no timers. The studio
/// feeds it one-second ticks and completion callbacks.
#[derive(Debug)]
pub struct SessionController {
    status: SessionStatus,
    countdown: Option<u8>,
    countdown_start: u8,
}

impl SessionController {
    /// Create a new controller in Idle state
    pub fn new() -> Self {
        Self::with_countdown(COUNTDOWN_START)
    }

    /// Create a controller whose countdown starts from `seconds`
    ///
    /// A zero countdown is treated as one tick so that recording always begins
    /// on a timer tick rather than inside the start call.
    pub fn with_countdown(seconds: u8) -> Self {
        Self {
            status: SessionStatus::Idle,
            countdown: None,
            countdown_start: seconds.max(1),
        }
    }

    /// Get the current session status
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Seconds left on the countdown, present only while Starting
    pub fn countdown(&self) -> Option<u8> {
        self.countdown
    }

    /// Request a recording
    ///
    /// Transitions Idle -> Starting and arms the countdown.
    ///
    /// # Errors
    /// Returns error if not in Idle state
    #[must_use = "this returns a Result that should be handled"]
    pub fn start_recording(&mut self) -> Result<u8, SessionStateError> {
        self.ensure(SessionStatus::Idle, SessionStatus::Starting)?;
        self.countdown = Some(self.countdown_start);
        self.status = SessionStatus::Starting;
        Ok(self.countdown_start)
    }

    /// Advance the countdown by one second
    ///
    /// The tick that would bring the counter to zero clears it and moves the
    /// session to Recording.
    ///
    /// # Errors
    /// Returns error if not in Starting state
    #[must_use = "this returns a Result that should be handled"]
    pub fn tick_countdown(&mut self) -> Result<CountdownTick, SessionStateError> {
        self.ensure(SessionStatus::Starting, SessionStatus::Recording)?;
        let remaining = self.countdown.unwrap_or(1).saturating_sub(1);
        if remaining > 0 {
            self.countdown = Some(remaining);
            Ok(CountdownTick::Remaining(remaining))
        } else {
            self.countdown = None;
            self.status = SessionStatus::Recording;
            Ok(CountdownTick::Finished)
        }
    }

    /// Request the recording to stop
    ///
    /// Transitions Recording -> Stopping. The capture pipeline finalizes from here.
    ///
    /// # Errors
    /// Returns error if not in Recording state
    #[must_use = "this returns a Result that should be handled"]
    pub fn stop_recording(&mut self) -> Result<(), SessionStateError> {
        self.ensure(SessionStatus::Recording, SessionStatus::Stopping)?;
        self.status = SessionStatus::Stopping;
        Ok(())
    }

    /// Mark the encoder as finalized (Stopping -> Processing)
    #[must_use = "this returns a Result that should be handled"]
    pub fn begin_processing(&mut self) -> Result<(), SessionStateError> {
        self.ensure(SessionStatus::Stopping, SessionStatus::Processing)?;
        self.status = SessionStatus::Processing;
        Ok(())
    }

    /// Completion callback from the capture pipeline
    ///
    /// Returns to Idle from Stopping (nothing to finalize) or Processing.
    #[must_use = "this returns a Result that should be handled"]
    pub fn on_finished(&mut self) -> Result<(), SessionStateError> {
        if !matches!(
            self.status,
            SessionStatus::Stopping | SessionStatus::Processing
        ) {
            return Err(SessionStateError::InvalidTransition {
                from: self.status,
                to: SessionStatus::Idle,
            });
        }
        self.status = SessionStatus::Idle;
        Ok(())
    }

    /// Cancel a countdown in flight (Starting -> Idle)
    #[must_use = "this returns a Result that should be handled"]
    pub fn abort(&mut self) -> Result<(), SessionStateError> {
        self.ensure(SessionStatus::Starting, SessionStatus::Idle)?;
        self.countdown = None;
        self.status = SessionStatus::Idle;
        Ok(())
    }

    fn ensure(&self, expected: SessionStatus, to: SessionStatus) -> Result<(), SessionStateError> {
        if self.status != expected {
            return Err(SessionStateError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        Ok(())
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}
