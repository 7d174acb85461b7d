//! Preset payload decoding.
//!
//! The decoder walks a fixed offset table (`layout`), reads raw values via
//! the field reader and scales them (`scale`). Parameters whose encoding is
//! not understood are emitted from `reference` as known-fixed values, and
//! the record keeps a raw-read side channel for refining the offset table.

pub mod error;
pub mod layout;
pub mod parser;
pub mod record;
mod reference;

pub use error::PresetError;
pub use parser::decode_preset;
pub use record::{
    AmpRecord, Confidence, EnvelopeRecord, ExtractionInfo, FieldDiagnostic, FilterRecord,
    FxRecord, KeyTrackRecord, LfoRecord, Param, ParamKind, ParameterRecord, RatioOffsetRecord,
    Value,
};
