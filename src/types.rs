//! Core types for line identification and sampled line state.

use heapless::Vec;

/// An identifier for a monitored input line.
///
/// Lines are numbered from zero and form a closed, contiguous set of `N`
/// inputs fixed at compile time. The index doubles as the position in a
/// [`LineStates`] vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineId(pub usize);

impl From<usize> for LineId {
    fn from(id: usize) -> Self {
        LineId(id)
    }
}

impl From<LineId> for usize {
    fn from(id: LineId) -> Self {
        id.0
    }
}

/// The four-button front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Confirm, line 0.
    Ok,
    /// Back, line 1.
    Cancel,
    /// Previous item, line 2.
    Prev,
    /// Next item, line 3.
    Next,
}

impl Button {
    /// Number of panel buttons.
    pub const COUNT: usize = 4;

    /// All buttons in line order.
    pub const ALL: [Button; Button::COUNT] =
        [Button::Ok, Button::Cancel, Button::Prev, Button::Next];

    /// Line this button is wired to.
    #[inline]
    pub const fn line(self) -> LineId {
        LineId(self as usize)
    }

    /// Short upper-case label for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Button::Ok => "OK",
            Button::Cancel => "CANCEL",
            Button::Prev => "PREV",
            Button::Next => "NEXT",
        }
    }
}

impl From<Button> for LineId {
    fn from(button: Button) -> Self {
        button.line()
    }
}

impl TryFrom<LineId> for Button {
    type Error = LineError;

    fn try_from(id: LineId) -> Result<Self, Self::Error> {
        Button::ALL
            .get(id.0)
            .copied()
            .ok_or(LineError::OutOfRange {
                id,
                count: Button::COUNT,
            })
    }
}

/// Line addressing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// The line ID is not part of the monitored set.
    OutOfRange {
        /// The offending ID
        id: LineId,
        /// Number of monitored lines
        count: usize,
    },
}

impl core::fmt::Display for LineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LineError::OutOfRange { id, count } => {
                write!(f, "line {} is outside the {} monitored lines", id.0, count)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LineError {}

/// Snapshot of every monitored line, index-aligned with [`LineId`].
///
/// A fresh vector is produced by each sampling pass. `true` means the line
/// is asserted (button held).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineStates<const N: usize> {
    lines: [bool; N],
}

impl<const N: usize> LineStates<N> {
    /// Creates a vector with every line released.
    #[inline]
    pub const fn new() -> Self {
        Self { lines: [false; N] }
    }

    /// Creates a vector from raw line levels.
    #[inline]
    pub const fn from_array(lines: [bool; N]) -> Self {
        Self { lines }
    }

    /// Records the level of one line.
    ///
    /// # Errors
    /// * `OutOfRange` - `line` is not below `N`
    pub fn set(&mut self, line: LineId, asserted: bool) -> Result<(), LineError> {
        let slot = self
            .lines
            .get_mut(line.0)
            .ok_or(LineError::OutOfRange { id: line, count: N })?;
        *slot = asserted;
        Ok(())
    }

    /// Returns whether `line` is asserted.
    ///
    /// # Errors
    /// * `OutOfRange` - `line` is not below `N`
    pub fn is_asserted(&self, line: LineId) -> Result<bool, LineError> {
        self.lines
            .get(line.0)
            .copied()
            .ok_or(LineError::OutOfRange { id: line, count: N })
    }

    /// Iterates over asserted lines in index order.
    pub fn asserted(&self) -> impl Iterator<Item = LineId> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, asserted)| **asserted)
            .map(|(idx, _)| LineId(idx))
    }

    /// Returns `true` if no line is asserted.
    pub fn none_asserted(&self) -> bool {
        !self.lines.iter().any(|asserted| *asserted)
    }

    /// Classifies the snapshot as no press, a single press or a chord.
    pub fn classify(&self) -> Press<N> {
        let mut held = self.asserted();
        let Some(first) = held.next() else {
            return Press::Released;
        };
        let Some(second) = held.next() else {
            return Press::Single(first);
        };

        // Capacity is N and at most N lines can be asserted.
        let mut chord: LineSet<N> = Vec::new();
        for line in [first, second].into_iter().chain(held) {
            let _ = chord.push(line);
        }
        Press::Chord(chord)
    }
}

impl<const N: usize> Default for LineStates<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Asserted lines of one snapshot in index order.
pub type LineSet<const N: usize> = Vec<LineId, N>;

/// What a snapshot shows the user holding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press<const N: usize> {
    /// Nothing held.
    Released,

    /// Exactly one button held.
    Single(LineId),

    /// Two or more buttons held together, in index order.
    Chord(LineSet<N>),
}

impl<const N: usize> Press<N> {
    /// Lines involved in the press, in index order.
    pub fn lines(&self) -> &[LineId] {
        match self {
            Press::Released => &[],
            Press::Single(line) => core::slice::from_ref(line),
            Press::Chord(lines) => lines.as_slice(),
        }
    }

    /// Returns `true` for a multi-button press.
    #[inline]
    pub fn is_chord(&self) -> bool {
        matches!(self, Press::Chord(_))
    }
}
