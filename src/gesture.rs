//! Gesture recognition engine
//!
//! Turns batches of raw four-channel photodiode samples drained from the gesture FIFO
//! into a single classified hand motion. Nothing in here touches the bus.

/// All four channels of a row must exceed this value for the row to be considered.
pub const GESTURE_THRESHOLD_OUT: u8 = 10;

/// Accumulated ratio delta needed to commit a swipe along one axis.
pub const GESTURE_SENSITIVITY_1: i32 = 50;

/// Per-batch ratio delta below which a batch is a near/far candidate.
pub const GESTURE_SENSITIVITY_2: i32 = 20;

/// Depth of the gesture FIFO in rows.
pub const GESTURE_FIFO_DEPTH: usize = 32;

/// Minimum number of zero-delta batches before a near/far event is committed.
const NEAR_COUNT_MIN: u32 = 10;

/// Minimum number of small non-zero-delta batches before a near/far event is committed.
const FAR_COUNT_MIN: u32 = 2;

/// Classified hand motion.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    Near,
    Far,
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Direction::None => "none",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Near => "near",
            Direction::Far => "far",
        };
        f.write_str(name)
    }
}

/// Committed near/far outcome of a session.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum StableState {
    #[default]
    None,
    Near,
    Far,
}

/// One row of the gesture FIFO.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Sample {
    pub up: u8,
    pub down: u8,
    pub left: u8,
    pub right: u8,
}

impl Sample {
    pub const fn new(up: u8, down: u8, left: u8, right: u8) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    fn above_threshold(&self) -> bool {
        self.up > GESTURE_THRESHOLD_OUT
            && self.down > GESTURE_THRESHOLD_OUT
            && self.left > GESTURE_THRESHOLD_OUT
            && self.right > GESTURE_THRESHOLD_OUT
    }

    /// Up/down and left/right ratios in percent, or `None` if a denominator is zero.
    fn ratios(&self) -> Option<(i32, i32)> {
        Some((
            percent_ratio(self.up, self.down)?,
            percent_ratio(self.left, self.right)?,
        ))
    }
}

/// `(a - b) * 100 / (a + b)`, truncated toward zero.
fn percent_ratio(a: u8, b: u8) -> Option<i32> {
    let (a, b) = (i32::from(a), i32::from(b));
    let sum = a + b;
    if sum == 0 {
        return None;
    }
    Some((a - b) * 100 / sum)
}

/// Samples of one polling batch.
#[derive(Copy, Clone, Debug)]
pub struct GestureBuffer {
    samples: [Sample; GESTURE_FIFO_DEPTH],
    len: usize,
}

impl Default for GestureBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureBuffer {
    pub const fn new() -> Self {
        Self {
            samples: [Sample::new(0, 0, 0, 0); GESTURE_FIFO_DEPTH],
            len: 0,
        }
    }

    /// Appends a row to the batch. Rows beyond the FIFO depth are dropped.
    pub fn push(&mut self, sample: Sample) {
        if self.len >= GESTURE_FIFO_DEPTH {
            log::warn!("Gesture buffer full, dropping sample {:?}", sample);
            return;
        }
        self.samples[self.len] = sample;
        self.len += 1;
    }

    /// Appends one row per complete U/D/L/R byte group of a FIFO burst.
    pub fn extend_from_fifo(&mut self, data: &[u8]) {
        for row in data.chunks_exact(4) {
            self.push(Sample::new(row[0], row[1], row[2], row[3]));
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples[..self.len]
    }
}

/// Accumulated state of one gesture detection session.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SessionState {
    pub ud_delta: i32,
    pub lr_delta: i32,
    pub ud_count: i8,
    pub lr_count: i8,
    pub near_count: u32,
    pub far_count: u32,
    pub stable_state: StableState,
    pub last_motion: Direction,
}

impl SessionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Maps an accumulated delta onto -1, 0 or 1.
fn axis_count(delta: i32) -> i8 {
    if delta >= GESTURE_SENSITIVITY_1 {
        1
    } else if delta <= -GESTURE_SENSITIVITY_1 {
        -1
    } else {
        0
    }
}

/// Folds one drained batch into the session state.
///
/// Returns `true` when a near/far decision has been committed. Batches of four rows or
/// fewer, or without any row above [`GESTURE_THRESHOLD_OUT`] on all channels, leave the
/// state untouched.
pub fn classify_batch(buffer: &GestureBuffer, state: &mut SessionState) -> bool {
    let samples = buffer.samples();
    if samples.len() <= 4 {
        return false;
    }

    let Some(first) = samples.iter().find(|s| s.above_threshold()) else {
        return false;
    };
    let Some(last) = samples.iter().rev().find(|s| s.above_threshold()) else {
        return false;
    };

    let (Some((ud_first, lr_first)), Some((ud_last, lr_last))) = (first.ratios(), last.ratios())
    else {
        return false;
    };

    let ud_delta = ud_last - ud_first;
    let lr_delta = lr_last - lr_first;

    state.ud_delta = state.ud_delta.saturating_add(ud_delta);
    state.lr_delta = state.lr_delta.saturating_add(lr_delta);

    state.ud_count = axis_count(state.ud_delta);
    state.lr_count = axis_count(state.lr_delta);

    log::trace!(
        "Batch of {} rows: ud_delta={} lr_delta={} (accumulated {} / {})",
        samples.len(),
        ud_delta,
        lr_delta,
        state.ud_delta,
        state.lr_delta
    );

    if ud_delta.abs() >= GESTURE_SENSITIVITY_2 || lr_delta.abs() >= GESTURE_SENSITIVITY_2 {
        return false;
    }

    let motionless = ud_delta == 0 && lr_delta == 0;

    if state.ud_count == 0 && state.lr_count == 0 {
        if motionless {
            state.near_count += 1;
        } else {
            state.far_count += 1;
        }

        if state.near_count >= NEAR_COUNT_MIN && state.far_count >= FAR_COUNT_MIN {
            state.stable_state = if motionless {
                StableState::Near
            } else {
                StableState::Far
            };
            return true;
        }
    } else {
        // A hand hovering after a partial swipe cancels the swipe but never commits near/far.
        if motionless {
            state.near_count += 1;
        }

        if state.near_count >= NEAR_COUNT_MIN {
            state.ud_count = 0;
            state.lr_count = 0;
            state.ud_delta = 0;
            state.lr_delta = 0;
        }
    }

    false
}

/// Resolves the accumulated state into a direction.
///
/// When both axes are committed the axis with the strictly larger accumulated delta wins,
/// ties go to the left/right axis.
pub fn decode(state: &SessionState) -> Direction {
    match state.stable_state {
        StableState::Near => return Direction::Near,
        StableState::Far => return Direction::Far,
        StableState::None => {}
    }

    let ud_dominant = state.ud_delta.unsigned_abs() > state.lr_delta.unsigned_abs();

    match (state.ud_count, state.lr_count) {
        (-1, 0) => Direction::Up,
        (1, 0) => Direction::Down,
        (0, 1) => Direction::Right,
        (0, -1) => Direction::Left,
        (-1, 1) if ud_dominant => Direction::Up,
        (-1, 1) => Direction::Right,
        (1, -1) if ud_dominant => Direction::Down,
        (1, -1) => Direction::Left,
        (-1, -1) if ud_dominant => Direction::Up,
        (-1, -1) => Direction::Left,
        (1, 1) if ud_dominant => Direction::Down,
        (1, 1) => Direction::Right,
        _ => Direction::None,
    }
}
