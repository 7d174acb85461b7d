//! Decodable fields of the preset binary and their calibration data.
//!
//! Offsets are relative to the start of the unwrapped preset payload. The
//! linear calibrations each come from one reference preset and should be
//! replaced as more samples are analysed.

use crate::field::FieldSpec;
use crate::scale::{Fallback, LinearScale, ScaleRule};

pub const ALGO_OFFSET: usize = 0x34;
pub const FDBK_OFFSET: usize = 0x36;
pub const MIX_OFFSET: usize = 0x38;
pub const HARM_OFFSET: usize = 0x3a;
pub const DTUN_OFFSET: usize = 0x3c;
pub const LFO1_SPEED_OFFSET: usize = 0x6a;
pub const LFO1_DEPTH_OFFSET: usize = 0x6e;
pub const LFO2_SPEED_OFFSET: usize = 0x7a;
pub const LFO2_DEPTH_OFFSET: usize = 0x7e;

pub const ALGO_MAX: i64 = 127;

pub const HARM_CALIBRATION: LinearScale = LinearScale::new(-3712, -14.50);
pub const DTUN_CALIBRATION: LinearScale = LinearScale::new(17967, 38.71);
pub const FDBK_OVERRIDES: &[(i64, f64)] = &[(76, 85.0)];

/// Output shape of a decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Decimal,
}

/// Verified transform from a raw value to its reported form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decode {
    pub rule: ScaleRule,
    pub kind: ValueKind,
}

/// One row of the offset table. `decode: None` marks a field whose raw value
/// is read for diagnostics only because no verified transform exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldEntry {
    pub name: &'static str,
    pub spec: FieldSpec,
    pub decode: Option<Decode>,
}

pub const ALGO: FieldEntry = FieldEntry {
    name: "algo",
    spec: FieldSpec::u8(ALGO_OFFSET),
    decode: Some(Decode {
        rule: ScaleRule::Clamped {
            min: 0,
            max: ALGO_MAX,
        },
        kind: ValueKind::Integer,
    }),
};

pub const FDBK: FieldEntry = FieldEntry {
    name: "fdbk",
    spec: FieldSpec::u8(FDBK_OFFSET),
    decode: Some(Decode {
        rule: ScaleRule::LookupOverride {
            table: FDBK_OVERRIDES,
            fallback: Fallback::Passthrough,
        },
        kind: ValueKind::Integer,
    }),
};

pub const MIX: FieldEntry = FieldEntry {
    name: "mix",
    spec: FieldSpec::i16(MIX_OFFSET),
    decode: Some(Decode {
        rule: ScaleRule::Passthrough,
        kind: ValueKind::Integer,
    }),
};

pub const HARM: FieldEntry = FieldEntry {
    name: "harm",
    spec: FieldSpec::i16(HARM_OFFSET),
    decode: Some(Decode {
        rule: ScaleRule::Linear(HARM_CALIBRATION),
        kind: ValueKind::Decimal,
    }),
};

pub const DTUN: FieldEntry = FieldEntry {
    name: "dtun",
    spec: FieldSpec::u16(DTUN_OFFSET),
    decode: Some(Decode {
        rule: ScaleRule::Linear(DTUN_CALIBRATION),
        kind: ValueKind::Decimal,
    }),
};

pub const LFO1_SPEED: FieldEntry = unverified("lfo1.speed", LFO1_SPEED_OFFSET);
pub const LFO1_DEPTH: FieldEntry = unverified("lfo1.depth", LFO1_DEPTH_OFFSET);
pub const LFO2_SPEED: FieldEntry = unverified("lfo2.speed", LFO2_SPEED_OFFSET);
pub const LFO2_DEPTH: FieldEntry = unverified("lfo2.depth", LFO2_DEPTH_OFFSET);

const fn unverified(name: &'static str, offset: usize) -> FieldEntry {
    FieldEntry {
        name,
        spec: FieldSpec::i16(offset),
        decode: None,
    }
}

pub const DECODED_FIELDS: [FieldEntry; 9] = [
    ALGO, FDBK, MIX, HARM, DTUN, LFO1_SPEED, LFO1_DEPTH, LFO2_SPEED, LFO2_DEPTH,
];

pub const MIN_LEN: usize = LFO2_DEPTH.spec.end();

#[cfg(test)]
mod tests {
    use super::{DECODED_FIELDS, LFO1_DEPTH, LFO1_SPEED, LFO2_DEPTH, LFO2_SPEED, MIN_LEN};

    #[test]
    fn min_len_covers_every_field() {
        let max_end = DECODED_FIELDS
            .iter()
            .map(|entry| entry.spec.end())
            .max()
            .unwrap();
        assert_eq!(MIN_LEN, max_end);
    }

    #[test]
    fn fields_do_not_overlap() {
        let mut spans: Vec<_> = DECODED_FIELDS
            .iter()
            .map(|entry| (entry.spec.offset, entry.spec.end()))
            .collect();
        spans.sort();
        for pair in spans.windows(2) {
            assert!(pair[0].1 <= pair[1].0, "overlap: {pair:?}");
        }
    }

    #[test]
    fn field_names_are_unique() {
        let mut names: Vec<_> = DECODED_FIELDS.iter().map(|entry| entry.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DECODED_FIELDS.len());
    }

    #[test]
    fn lfo_fields_are_diagnostic_only() {
        for entry in [LFO1_SPEED, LFO1_DEPTH, LFO2_SPEED, LFO2_DEPTH] {
            assert!(entry.decode.is_none(), "{} has a transform", entry.name);
        }
        let decoded = DECODED_FIELDS
            .iter()
            .filter(|entry| entry.decode.is_some())
            .count();
        assert_eq!(decoded, 5);
    }
}
