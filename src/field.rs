//! # Staged Value Cells
//!
//! Every decoded value lives in a [`Field`]: terms are decoded into a staged
//! copy while a sentence streams in, and the staged copy only becomes the
//! visible value once the sentence checksum has been verified.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Clock;

/// Age reported for a value that was never committed.
pub const INVALID_AGE: u32 = u32::MAX;

/// A two-phase value cell.
///
/// - `committed` only changes through [`Field::commit`],
/// - `staged` may be overwritten any number of times between commits,
/// - the `updated` flag is raised by a commit and lowered by reading the value,
/// - `valid` is raised by the first commit and stays raised.
///
/// Only the parser stages and commits; a host can read but never publish:
///
/// ```compile_fail
/// use nmea0183_stream::Field;
///
/// let mut field = Field::<u32>::default();
/// field.commit(0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone)]
pub struct Field<T> {
    committed: T,
    staged: T,
    valid: bool,
    updated: bool,
    last_commit_ms: u32,
}

impl<T> Field<T> {
    /// True once a value has been committed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True when a value was committed since the last read.
    pub fn is_updated(&self) -> bool {
        self.updated
    }

    /// Milliseconds since the last commit, or [`INVALID_AGE`] if there was none.
    pub fn age(&self, clock: &impl Clock) -> u32 {
        self.age_at(clock.now_ms())
    }

    /// Same as [`Field::age`] for an already sampled clock reading.
    pub fn age_at(&self, now_ms: u32) -> u32 {
        if self.valid {
            now_ms.wrapping_sub(self.last_commit_ms)
        } else {
            INVALID_AGE
        }
    }

    /// Reads the committed value by reference and clears the updated flag.
    pub fn value_ref(&mut self) -> &T {
        self.updated = false;
        &self.committed
    }

    /// The value that the next commit would publish.
    pub(crate) fn staged(&self) -> &T {
        &self.staged
    }

    /// Replaces the staged value.
    pub(crate) fn stage(&mut self, value: T) {
        self.staged = value;
    }

    pub(crate) fn staged_mut(&mut self) -> &mut T {
        &mut self.staged
    }
}

impl<T: Copy> Field<T> {
    /// Reads the committed value and clears the updated flag.
    pub fn value(&mut self) -> T {
        self.updated = false;
        self.committed
    }
}

impl<T: Clone> Field<T> {
    /// Publishes the staged value and stamps it with `now_ms`.
    pub(crate) fn commit(&mut self, now_ms: u32) {
        self.committed.clone_from(&self.staged);
        self.last_commit_ms = now_ms;
        self.valid = true;
        self.updated = true;
    }

    /// Drops the staged value, restaging the committed one.
    pub(crate) fn discard(&mut self) {
        self.staged.clone_from(&self.committed);
    }
}
