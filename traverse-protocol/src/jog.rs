//! Jog command construction
//!
//! Builds the `$J=` relative-motion lines the pendant sends for each
//! jog-wheel detent. The pendant exposes three axes (selected by the
//! axis knob) and three step sizes (cycled by a button); the feed rate
//! is fixed.

use heapless::String;

/// Fixed jog feed rate in mm/min
pub const JOG_FEED_RATE: u16 = 100;

/// Maximum length of a formatted jog command
///
/// Worst case today is `$J=G91 F100 X-0.01` (18 bytes); the headroom
/// covers a wider feed rate field.
pub const MAX_JOG_CMD: usize = 24;

/// Machine axis addressed by a jog command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JogAxis {
    X,
    Y,
    Z,
}

impl JogAxis {
    /// G-code axis word
    pub fn as_str(self) -> &'static str {
        match self {
            JogAxis::X => "X",
            JogAxis::Y => "Y",
            JogAxis::Z => "Z",
        }
    }

    /// One step toward Z, clamped at Z
    ///
    /// The axis selector is a linear walk X-Y-Z in both directions,
    /// not a cycle: the pot's end positions pin the end axes.
    pub fn next(self) -> Self {
        match self {
            JogAxis::X => JogAxis::Y,
            JogAxis::Y => JogAxis::Z,
            JogAxis::Z => JogAxis::Z,
        }
    }

    /// One step toward X, clamped at X
    pub fn prev(self) -> Self {
        match self {
            JogAxis::X => JogAxis::X,
            JogAxis::Y => JogAxis::X,
            JogAxis::Z => JogAxis::Y,
        }
    }
}

/// Jog step distance per wheel detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JogStep {
    /// 0.01 mm
    Hundredth,
    /// 0.1 mm
    Tenth,
    /// 1 mm
    One,
}

impl JogStep {
    /// Distance as it appears in the G-code line
    pub fn as_str(self) -> &'static str {
        match self {
            JogStep::Hundredth => "0.01",
            JogStep::Tenth => "0.1",
            JogStep::One => "1",
        }
    }

    /// Next step size (wraps around), for the step-select button
    pub fn next(self) -> Self {
        match self {
            JogStep::Hundredth => JogStep::Tenth,
            JogStep::Tenth => JogStep::One,
            JogStep::One => JogStep::Hundredth,
        }
    }
}

/// Format a relative jog command for one wheel detent
///
/// Produces e.g. `$J=G91 F100 X0.1` for a positive detent on X at the
/// 0.1 mm step, or `$J=G91 F100 Z-0.01` for a negative detent on Z at
/// the 0.01 mm step. The line carries no terminator; the send loop
/// appends `\n` on the wire.
pub fn jog_command(axis: JogAxis, step: JogStep, positive: bool) -> String<MAX_JOG_CMD> {
    let mut cmd = String::new();
    // MAX_JOG_CMD is sized for the longest combination, pushes cannot fail
    let _ = cmd.push_str("$J=G91 F100 ");
    let _ = cmd.push_str(axis.as_str());
    if !positive {
        let _ = cmd.push('-');
    }
    let _ = cmd.push_str(step.as_str());
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_jog() {
        let cmd = jog_command(JogAxis::X, JogStep::Tenth, true);
        assert_eq!(cmd.as_str(), "$J=G91 F100 X0.1");
    }

    #[test]
    fn test_negative_jog() {
        let cmd = jog_command(JogAxis::Z, JogStep::Hundredth, false);
        assert_eq!(cmd.as_str(), "$J=G91 F100 Z-0.01");
    }

    #[test]
    fn test_all_combinations_fit() {
        for axis in [JogAxis::X, JogAxis::Y, JogAxis::Z] {
            for step in [JogStep::Hundredth, JogStep::Tenth, JogStep::One] {
                for positive in [true, false] {
                    let cmd = jog_command(axis, step, positive);
                    assert!(!cmd.is_empty());
                    assert!(cmd.len() <= MAX_JOG_CMD);
                    assert!(cmd.as_str().starts_with("$J=G91 F100 "));
                }
            }
        }
    }

    #[test]
    fn test_axis_walk_clamps_at_ends() {
        assert_eq!(JogAxis::X.next(), JogAxis::Y);
        assert_eq!(JogAxis::Y.next(), JogAxis::Z);
        assert_eq!(JogAxis::Z.next(), JogAxis::Z);

        assert_eq!(JogAxis::Z.prev(), JogAxis::Y);
        assert_eq!(JogAxis::Y.prev(), JogAxis::X);
        assert_eq!(JogAxis::X.prev(), JogAxis::X);
    }

    #[test]
    fn test_axis_walk_is_reversible_between_ends() {
        let mut axis = JogAxis::X;
        axis = axis.next();
        assert_eq!(axis.prev(), JogAxis::X);
        axis = axis.next();
        assert_eq!(axis, JogAxis::Z);
        assert_eq!(axis.prev().prev(), JogAxis::X);
    }

    #[test]
    fn test_step_cycle_wraps() {
        let mut step = JogStep::Hundredth;
        step = step.next();
        assert_eq!(step, JogStep::Tenth);
        step = step.next();
        assert_eq!(step, JogStep::One);
        step = step.next();
        assert_eq!(step, JogStep::Hundredth);
    }
}
