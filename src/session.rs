//! Gesture session
//!
//! Polls a [`SampleSource`] until the sensor stops reporting valid gesture data and turns
//! the drained batches into a single [`Direction`].

use embedded_hal::blocking::delay::DelayMs;

use crate::gesture::{classify_batch, decode, Direction, GestureBuffer, SessionState};

/// Wait period in milliseconds between two FIFO polls.
pub const FIFO_PAUSE_TIME_MS: u32 = 30;

/// Anything that can report gesture FIFO status and hand out its rows.
pub trait SampleSource {
    type Error;

    /// Whether the sensor still holds valid gesture data.
    fn gesture_valid(&mut self) -> Result<bool, Self::Error>;

    /// Number of rows currently waiting in the FIFO.
    fn fifo_level(&mut self) -> Result<u8, Self::Error>;

    /// Drains `rows` rows into `buffer`.
    fn read_fifo(&mut self, rows: u8, buffer: &mut GestureBuffer) -> Result<(), Self::Error>;
}

/// Errors that end a session without a direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SessionError<E> {
    /// The sample source failed, the error is passed through as is.
    Source(E),
    /// The sensor kept reporting valid data beyond the given deadline.
    DeadlineExpired,
}

impl<E> From<E> for SessionError<E> {
    fn from(error: E) -> Self {
        SessionError::Source(error)
    }
}

/// Owns the batch buffer and accumulated state of one gesture detection session.
#[derive(Copy, Clone, Debug, Default)]
pub struct GestureSession {
    buffer: GestureBuffer,
    state: SessionState,
}

impl GestureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Buffer for the next batch. Call [`GestureSession::process_batch`] once it is filled.
    pub fn buffer_mut(&mut self) -> &mut GestureBuffer {
        &mut self.buffer
    }

    /// Drops the current batch and all accumulated state.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state.reset();
    }

    /// Classifies the buffered batch and clears the buffer.
    ///
    /// Returns `true` if the classifier committed a near/far decision, in which case the
    /// decoded direction is stored as the last motion.
    pub fn process_batch(&mut self) -> bool {
        let ready = classify_batch(&self.buffer, &mut self.state);
        if ready {
            self.state.last_motion = decode(&self.state);
            log::debug!("Gesture decision ready: {}", self.state.last_motion);
        }
        self.buffer.clear();
        ready
    }

    /// Resolves the best guess for the session and starts over.
    pub fn finish(&mut self) -> Direction {
        self.state.last_motion = decode(&self.state);
        let motion = self.state.last_motion;
        log::debug!("Gesture session finished: {}", motion);
        self.reset();
        motion
    }

    /// Accounts for the pause before the next poll.
    ///
    /// Returns `true` once `elapsed_ms` has reached `deadline_ms`, in which case the session
    /// state is discarded and no further poll should happen.
    pub fn poll_expired(&mut self, elapsed_ms: &mut u32, deadline_ms: Option<u32>) -> bool {
        if deadline_ms.is_some_and(|deadline| *elapsed_ms >= deadline) {
            log::debug!("Gesture session aborted after {} ms", elapsed_ms);
            self.reset();
            return true;
        }
        *elapsed_ms = elapsed_ms.saturating_add(FIFO_PAUSE_TIME_MS);
        false
    }

    /// Polls `source` until it stops reporting valid data and returns the detected motion.
    ///
    /// Leftovers of an earlier aborted session are discarded first. `deadline_ms` bounds the
    /// accumulated pause time between polls. Bus time is not accounted for. An expired
    /// deadline discards the session state.
    pub fn run<S, D>(
        &mut self,
        source: &mut S,
        delay: &mut D,
        deadline_ms: Option<u32>,
    ) -> Result<Direction, SessionError<S::Error>>
    where
        S: SampleSource,
        D: DelayMs<u32>,
    {
        self.reset();
        let mut elapsed_ms: u32 = 0;

        loop {
            if self.poll_expired(&mut elapsed_ms, deadline_ms) {
                return Err(SessionError::DeadlineExpired);
            }
            delay.delay_ms(FIFO_PAUSE_TIME_MS);

            if !source.gesture_valid()? {
                delay.delay_ms(FIFO_PAUSE_TIME_MS);
                return Ok(self.finish());
            }

            let rows = source.fifo_level()?;
            if rows > 0 {
                source.read_fifo(rows, &mut self.buffer)?;
                self.process_batch();
            }
        }
    }
}
