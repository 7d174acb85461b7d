//! Raw device value to UI value transforms.
//!
//! Linear rules are calibrated from a single observed `(raw, ui)` sample and
//! are therefore approximate; [`ScaleRule::resolve`] reports which path
//! produced a value so callers can flag low-confidence results.

/// One observed `(raw, ui)` pair used to derive a multiplicative factor.
///
/// # Examples
/// ```
/// use dnprobe_core::scale::LinearScale;
///
/// let scale = LinearScale::new(17967, 38.71);
/// assert_eq!(scale.apply(17967), 38.71);
/// assert_eq!(LinearScale::new(0, 5.0).apply(0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub reference_raw: i64,
    pub reference_ui: f64,
}

impl LinearScale {
    pub const fn new(reference_raw: i64, reference_ui: f64) -> Self {
        Self {
            reference_raw,
            reference_ui,
        }
    }

    /// `reference_ui / reference_raw`, or 1.0 when the reference raw is zero.
    pub fn factor(&self) -> f64 {
        if self.reference_raw == 0 {
            1.0
        } else {
            self.reference_ui / self.reference_raw as f64
        }
    }

    /// Scaled value rounded to two decimals.
    pub fn apply(&self, raw: i64) -> f64 {
        round2(raw as f64 * self.factor())
    }
}

/// Rule used when a lookup table has no entry for the raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    Passthrough,
    Linear(LinearScale),
}

/// Raw-to-UI transform applied per field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleRule {
    Passthrough,
    /// Passthrough limited to an inclusive range.
    Clamped { min: i64, max: i64 },
    Linear(LinearScale),
    LookupOverride {
        table: &'static [(i64, f64)],
        fallback: Fallback,
    },
}

/// How a scaled value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePath {
    Passthrough,
    Lookup,
    Linear,
}

impl ScalePath {
    /// Linear results come from a single calibration sample.
    pub fn is_approximate(self) -> bool {
        matches!(self, ScalePath::Linear)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled {
    pub value: f64,
    pub path: ScalePath,
}

impl ScaleRule {
    pub fn resolve(&self, raw: i64) -> Scaled {
        match self {
            ScaleRule::Passthrough => passthrough(raw),
            ScaleRule::Clamped { min, max } => passthrough(raw.clamp(*min, *max)),
            ScaleRule::Linear(scale) => linear(scale, raw),
            ScaleRule::LookupOverride { table, fallback } => {
                if let Some((_, ui)) = table.iter().find(|(key, _)| *key == raw) {
                    return Scaled {
                        value: *ui,
                        path: ScalePath::Lookup,
                    };
                }
                match fallback {
                    Fallback::Passthrough => passthrough(raw),
                    Fallback::Linear(scale) => linear(scale, raw),
                }
            }
        }
    }

    /// Apply the rule to a raw value.
    ///
    /// # Examples
    /// ```
    /// use dnprobe_core::scale::{Fallback, ScaleRule};
    ///
    /// let rule = ScaleRule::LookupOverride {
    ///     table: &[(76, 85.0)],
    ///     fallback: Fallback::Passthrough,
    /// };
    /// assert_eq!(rule.apply(76), 85.0);
    /// assert_eq!(rule.apply(50), 50.0);
    /// ```
    pub fn apply(&self, raw: i64) -> f64 {
        self.resolve(raw).value
    }
}

fn passthrough(raw: i64) -> Scaled {
    Scaled {
        value: raw as f64,
        path: ScalePath::Passthrough,
    }
}

fn linear(scale: &LinearScale, raw: i64) -> Scaled {
    Scaled {
        value: scale.apply(raw),
        path: ScalePath::Linear,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
