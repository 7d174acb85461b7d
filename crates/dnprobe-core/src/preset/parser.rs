use tracing::{debug, trace};

use super::error::PresetError;
use super::layout::{self, FieldEntry, ValueKind};
use super::record::{Confidence, ExtractionInfo, FieldDiagnostic, LfoRecord, Param, ParameterRecord, Value};
use super::reference;
use crate::field::FieldReader;

/// Decode a preset payload into a [`ParameterRecord`].
///
/// Fields in the offset table are read and scaled; everything else is
/// emitted as known-fixed or unknown. Any failed field read aborts the
/// decode instead of substituting a default.
///
/// # Errors
/// Returns `PresetError::Truncated` when the payload is shorter than the
/// offset table requires.
pub fn decode_preset(payload: &[u8]) -> Result<ParameterRecord, PresetError> {
    if payload.len() < layout::MIN_LEN {
        return Err(PresetError::Truncated {
            needed: layout::MIN_LEN,
            actual: payload.len(),
        });
    }

    let mut fields = FieldDecoder::new(payload);
    let algo = fields.decode(&layout::ALGO)?;
    let fdbk = fields.decode(&layout::FDBK)?;
    let mix = fields.decode(&layout::MIX)?;
    let harm = fields.decode(&layout::HARM)?;
    let dtun = fields.decode(&layout::DTUN)?;
    let lfo1 = LfoRecord {
        speed: fields.decode(&layout::LFO1_SPEED)?,
        depth: fields.decode(&layout::LFO1_DEPTH)?,
        ..reference::lfo1()
    };
    let lfo2 = LfoRecord {
        speed: fields.decode(&layout::LFO2_SPEED)?,
        depth: fields.decode(&layout::LFO2_DEPTH)?,
        ..reference::lfo2()
    };
    let extraction_info = fields.finish();
    debug!(
        fields = extraction_info.fields.len(),
        len = payload.len(),
        "decoded preset"
    );

    let triggers = reference::syn_triggers();
    Ok(ParameterRecord {
        algo,
        c: reference::operator_ratio(),
        a: reference::operator_ratio(),
        b: [reference::operator_ratio(), reference::operator_ratio()],
        harm,
        dtun,
        fdbk,
        mix,
        a_envelope: reference::a_envelope(),
        b_envelope: reference::b_envelope(),
        adel: triggers.adel,
        atrg: triggers.atrg,
        arst: triggers.arst,
        phrt: triggers.phrt,
        bdel: triggers.bdel,
        btrg: triggers.btrg,
        brst: triggers.brst,
        ratio_offset: reference::ratio_offset(),
        key_track: reference::key_track(),
        filter: reference::filter(),
        amp: reference::amp(),
        fx: reference::fx(),
        lfo1,
        lfo2,
        lfo3: LfoRecord::unknown(),
        extraction_info,
    })
}

struct FieldDecoder<'a> {
    reader: FieldReader<'a>,
    info: ExtractionInfo,
}

impl<'a> FieldDecoder<'a> {
    fn new(payload: &'a [u8]) -> Self {
        Self {
            reader: FieldReader::new(payload),
            info: ExtractionInfo::default(),
        }
    }

    fn decode(&mut self, entry: &FieldEntry) -> Result<Param, PresetError> {
        let raw = self
            .reader
            .read(entry.spec)
            .map_err(|source| PresetError::Field {
                name: entry.name,
                source,
            })?;
        trace!(field = entry.name, offset = entry.spec.offset, raw, "raw read");

        let (param, confidence) = match entry.decode {
            Some(decode) => {
                let scaled = decode.rule.resolve(raw);
                let value = match decode.kind {
                    ValueKind::Integer => Value::Int(scaled.value.round() as i64),
                    ValueKind::Decimal => Value::Float(scaled.value),
                };
                let confidence = if scaled.path.is_approximate() {
                    Confidence::Approximate
                } else {
                    Confidence::Exact
                };
                let param = Param::Derived {
                    value,
                    offset: entry.spec.offset,
                };
                (param, confidence)
            }
            None => (Param::Unknown, Confidence::Unverified),
        };

        self.info.fields.insert(
            entry.name.to_string(),
            FieldDiagnostic {
                offset: entry.spec.offset,
                width: entry.spec.width.len(),
                signed: entry.spec.signed,
                raw,
                confidence,
            },
        );
        Ok(param)
    }

    fn finish(self) -> ExtractionInfo {
        self.info
    }
}
