//! Text report of the currently held buttons.
//!
//! The report format is a single line:
//!
//! ```text
//! Currently pressed button(s): 0, 3, \n
//! ```
//!
//! Every asserted line index is followed by `", "`, including the last one.
//! An all-released snapshot produces no report.

use core::fmt::{self, Write};

use crate::types::{LineId, LineSet, LineStates};

/// Prefix of every report line.
pub const REPORT_PREFIX: &str = "Currently pressed button(s): ";

/// Report of the asserted lines of one snapshot.
///
/// Renders through [`Display`](core::fmt::Display).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report<const N: usize> {
    pressed: LineSet<N>,
}

impl<const N: usize> Report<N> {
    /// Builds a report, or `None` when no line is asserted.
    pub fn from_states(states: &LineStates<N>) -> Option<Self> {
        let mut pressed = LineSet::<N>::new();
        for line in states.asserted() {
            // A snapshot never holds more than N asserted lines.
            let _ = pressed.push(line);
        }

        if pressed.is_empty() {
            None
        } else {
            Some(Self { pressed })
        }
    }

    /// Asserted lines in index order.
    #[inline]
    pub fn pressed(&self) -> &[LineId] {
        &self.pressed
    }
}

impl<const N: usize> fmt::Display for Report<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REPORT_PREFIX)?;
        for line in &self.pressed {
            write!(f, "{}, ", line.0)?;
        }
        f.write_char('\n')
    }
}

/// Writes the report for `states` to `sink`.
///
/// Writes nothing if no line is asserted. Returns `true` if a report was
/// written.
///
/// # Errors
/// Propagates the sink's write error.
pub fn write_report<W: Write, const N: usize>(
    states: &LineStates<N>,
    sink: &mut W,
) -> Result<bool, fmt::Error> {
    match Report::from_states(states) {
        Some(report) => {
            write!(sink, "{}", report)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
