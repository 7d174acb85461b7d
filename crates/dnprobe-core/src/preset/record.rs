//! Typed preset parameter record.
//!
//! Every parameter is a [`Param`] so consumers can tell values derived from
//! bytes apart from values asserted from the reference preset and from
//! values nobody knows how to read yet.

use std::collections::BTreeMap;

use serde::Serialize;

/// Scalar parameter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Label(String),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Value::Label(value) => Some(value),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => write!(f, "{value:.2}"),
            Value::Bool(true) => write!(f, "on"),
            Value::Bool(false) => write!(f, "off"),
            Value::Label(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Label(value.to_string())
    }
}

/// A parameter together with where its value came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Param {
    /// Read from the payload at `offset` and scaled.
    Derived { value: Value, offset: usize },
    /// Known-fixed: asserted from the reference preset, not read.
    Fixed { value: Value },
    /// No verified encoding; any raw read lives in the diagnostics.
    Unknown,
}

impl Param {
    pub fn fixed(value: impl Into<Value>) -> Self {
        Param::Fixed {
            value: value.into(),
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Param::Derived { value, .. } | Param::Fixed { value } => Some(value),
            Param::Unknown => None,
        }
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            Param::Derived { .. } => ParamKind::Derived,
            Param::Fixed { .. } => ParamKind::Fixed,
            Param::Unknown => ParamKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Derived,
    Fixed,
    Unknown,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Derived => "derived",
            ParamKind::Fixed => "fixed",
            ParamKind::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeRecord {
    pub atk: Param,
    pub dec: Param,
    pub end: Param,
    pub lev: Param,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioOffsetRecord {
    pub c: Param,
    pub a: Param,
    pub b1: Param,
    pub b2: Param,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyTrackRecord {
    pub a: Param,
    pub b1: Param,
    pub b2: Param,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterRecord {
    #[serde(rename = "type")]
    pub filter_type: Param,
    pub attack: Param,
    pub decay: Param,
    pub sustain: Param,
    pub release: Param,
    pub frequency: Param,
    pub resonance: Param,
    pub env_amount: Param,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmpRecord {
    pub attack: Param,
    pub decay: Param,
    pub sustain: Param,
    pub release: Param,
    pub reset: Param,
    pub mode: Param,
    pub pan: Param,
    pub volume: Param,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FxRecord {
    pub bit_reduction: Param,
    pub overdrive: Param,
    pub sample_rate_reduction: Param,
    pub sample_rate_routing: Param,
    pub delay: Param,
    pub reverb: Param,
    pub chorus: Param,
    pub overdrive_routing: Param,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LfoRecord {
    pub speed: Param,
    pub multiplier: Param,
    pub fade: Param,
    pub destination: Param,
    pub waveform: Param,
    pub start_phase: Param,
    pub mode: Param,
    pub depth: Param,
}

impl LfoRecord {
    pub fn unknown() -> Self {
        Self {
            speed: Param::Unknown,
            multiplier: Param::Unknown,
            fade: Param::Unknown,
            destination: Param::Unknown,
            waveform: Param::Unknown,
            start_phase: Param::Unknown,
            mode: Param::Unknown,
            depth: Param::Unknown,
        }
    }
}

/// Trust level of one raw read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Passthrough or exact lookup hit.
    Exact,
    /// Linear scale calibrated from a single sample.
    Approximate,
    /// Raw value only; no transform is known.
    Unverified,
}

/// Raw read recorded for offset-table refinement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDiagnostic {
    pub offset: usize,
    pub width: usize,
    pub signed: bool,
    pub raw: i64,
    pub confidence: Confidence,
}

/// Per-field raw reads keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtractionInfo {
    pub fields: BTreeMap<String, FieldDiagnostic>,
}

impl ExtractionInfo {
    pub fn get(&self, name: &str) -> Option<&FieldDiagnostic> {
        self.fields.get(name)
    }
}

/// Decoded preset. `b` holds the `[B1, B2]` ratio pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRecord {
    pub algo: Param,
    pub c: Param,
    pub a: Param,
    pub b: [Param; 2],
    pub harm: Param,
    pub dtun: Param,
    pub fdbk: Param,
    pub mix: Param,
    pub a_envelope: EnvelopeRecord,
    pub b_envelope: EnvelopeRecord,
    pub adel: Param,
    pub atrg: Param,
    pub arst: Param,
    pub phrt: Param,
    pub bdel: Param,
    pub btrg: Param,
    pub brst: Param,
    pub ratio_offset: RatioOffsetRecord,
    pub key_track: KeyTrackRecord,
    pub filter: FilterRecord,
    pub amp: AmpRecord,
    pub fx: FxRecord,
    pub lfo1: LfoRecord,
    pub lfo2: LfoRecord,
    pub lfo3: LfoRecord,
    #[serde(rename = "_extraction_info")]
    pub extraction_info: ExtractionInfo,
}

impl ParameterRecord {
    /// Every parameter with its dotted name, in record order.
    pub fn entries(&self) -> Vec<(String, &Param)> {
        let mut out: Vec<(String, &Param)> = Vec::new();
        let mut push = |name: &str, param| out.push((name.to_string(), param));

        push("algo", &self.algo);
        push("c", &self.c);
        push("a", &self.a);
        push("b1", &self.b[0]);
        push("b2", &self.b[1]);
        push("harm", &self.harm);
        push("dtun", &self.dtun);
        push("fdbk", &self.fdbk);
        push("mix", &self.mix);
        for (prefix, env) in [("a_envelope", &self.a_envelope), ("b_envelope", &self.b_envelope)] {
            push(format!("{prefix}.atk").as_str(), &env.atk);
            push(format!("{prefix}.dec").as_str(), &env.dec);
            push(format!("{prefix}.end").as_str(), &env.end);
            push(format!("{prefix}.lev").as_str(), &env.lev);
        }
        push("adel", &self.adel);
        push("atrg", &self.atrg);
        push("arst", &self.arst);
        push("phrt", &self.phrt);
        push("bdel", &self.bdel);
        push("btrg", &self.btrg);
        push("brst", &self.brst);
        push("ratio_offset.c", &self.ratio_offset.c);
        push("ratio_offset.a", &self.ratio_offset.a);
        push("ratio_offset.b1", &self.ratio_offset.b1);
        push("ratio_offset.b2", &self.ratio_offset.b2);
        push("key_track.a", &self.key_track.a);
        push("key_track.b1", &self.key_track.b1);
        push("key_track.b2", &self.key_track.b2);

        let filter = &self.filter;
        push("filter.type", &filter.filter_type);
        push("filter.attack", &filter.attack);
        push("filter.decay", &filter.decay);
        push("filter.sustain", &filter.sustain);
        push("filter.release", &filter.release);
        push("filter.frequency", &filter.frequency);
        push("filter.resonance", &filter.resonance);
        push("filter.env_amount", &filter.env_amount);

        let amp = &self.amp;
        push("amp.attack", &amp.attack);
        push("amp.decay", &amp.decay);
        push("amp.sustain", &amp.sustain);
        push("amp.release", &amp.release);
        push("amp.reset", &amp.reset);
        push("amp.mode", &amp.mode);
        push("amp.pan", &amp.pan);
        push("amp.volume", &amp.volume);

        let fx = &self.fx;
        push("fx.bit_reduction", &fx.bit_reduction);
        push("fx.overdrive", &fx.overdrive);
        push("fx.sample_rate_reduction", &fx.sample_rate_reduction);
        push("fx.sample_rate_routing", &fx.sample_rate_routing);
        push("fx.delay", &fx.delay);
        push("fx.reverb", &fx.reverb);
        push("fx.chorus", &fx.chorus);
        push("fx.overdrive_routing", &fx.overdrive_routing);

        for (prefix, lfo) in [("lfo1", &self.lfo1), ("lfo2", &self.lfo2), ("lfo3", &self.lfo3)] {
            push(format!("{prefix}.speed").as_str(), &lfo.speed);
            push(format!("{prefix}.multiplier").as_str(), &lfo.multiplier);
            push(format!("{prefix}.fade").as_str(), &lfo.fade);
            push(format!("{prefix}.destination").as_str(), &lfo.destination);
            push(format!("{prefix}.waveform").as_str(), &lfo.waveform);
            push(format!("{prefix}.start_phase").as_str(), &lfo.start_phase);
            push(format!("{prefix}.mode").as_str(), &lfo.mode);
            push(format!("{prefix}.depth").as_str(), &lfo.depth);
        }
        out
    }

    /// Count of parameters per source kind.
    pub fn kind_counts(&self) -> BTreeMap<ParamKind, usize> {
        let mut counts = BTreeMap::new();
        for (_, param) in self.entries() {
            *counts.entry(param.kind()).or_insert(0) += 1;
        }
        counts
    }
}
