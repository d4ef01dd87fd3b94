//! Evaluation settings threaded through every operation.

use crate::CalcError;
use crate::number::DEFAULT_PRECISION;

/// How a bare number is read when it appears as an angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
  #[default]
  Degrees,
  Radians,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
  pub angle_mode: AngleMode,
  /// Allow exact symbolic results (`sqrt(2) / 2`) where a float would
  /// otherwise be needed.
  pub symbolic: bool,
  pub radix: u32,
  pub grouping: bool,
  pub precision: u32,
}

impl Default for Settings {
  fn default() -> Self {
    Settings {
      angle_mode: AngleMode::Degrees,
      symbolic: false,
      radix: 10,
      grouping: false,
      precision: DEFAULT_PRECISION,
    }
  }
}

impl Settings {
  pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
    self.angle_mode = angle_mode;
    self
  }

  pub fn with_symbolic(mut self, symbolic: bool) -> Self {
    self.symbolic = symbolic;
    self
  }

  pub fn with_radix(mut self, radix: u32) -> Result<Self, CalcError> {
    if !(2..=36).contains(&radix) {
      return Err(CalcError::InvalidRadix(radix));
    }
    self.radix = radix;
    Ok(self)
  }

  pub fn with_grouping(mut self, grouping: bool) -> Self {
    self.grouping = grouping;
    self
  }

  pub fn with_precision(mut self, precision: u32) -> Self {
    self.precision = precision.max(1);
    self
  }
}
