//! Known-fixed values observed on the reference preset.
//!
//! None of these are read from the payload; their byte encodings are not
//! understood yet. They are emitted as `Param::Fixed` so reports never mix
//! them with derived values.

use super::record::{
    AmpRecord, EnvelopeRecord, FilterRecord, FxRecord, KeyTrackRecord, LfoRecord, Param,
    RatioOffsetRecord,
};

pub(crate) fn operator_ratio() -> Param {
    Param::fixed(1.0)
}

pub(crate) fn a_envelope() -> EnvelopeRecord {
    envelope(0, 124, 0, 115)
}

pub(crate) fn b_envelope() -> EnvelopeRecord {
    envelope(0, 127, 0, 127)
}

fn envelope(atk: i64, dec: i64, end: i64, lev: i64) -> EnvelopeRecord {
    EnvelopeRecord {
        atk: Param::fixed(atk),
        dec: Param::fixed(dec),
        end: Param::fixed(end),
        lev: Param::fixed(lev),
    }
}

pub(crate) struct SynTriggers {
    pub adel: Param,
    pub atrg: Param,
    pub arst: Param,
    pub phrt: Param,
    pub bdel: Param,
    pub btrg: Param,
    pub brst: Param,
}

pub(crate) fn syn_triggers() -> SynTriggers {
    SynTriggers {
        adel: Param::fixed(0),
        atrg: Param::fixed(true),
        arst: Param::fixed(true),
        phrt: Param::fixed("ALL"),
        bdel: Param::fixed(0),
        btrg: Param::fixed(true),
        brst: Param::fixed(true),
    }
}

pub(crate) fn ratio_offset() -> RatioOffsetRecord {
    RatioOffsetRecord {
        c: Param::fixed(0.0),
        a: Param::fixed(0.0),
        b1: Param::fixed(0.0),
        b2: Param::fixed(0.0),
    }
}

pub(crate) fn key_track() -> KeyTrackRecord {
    KeyTrackRecord {
        a: Param::fixed(0),
        b1: Param::fixed(0),
        b2: Param::fixed(0),
    }
}

pub(crate) fn filter() -> FilterRecord {
    FilterRecord {
        filter_type: Param::fixed("Lowpass 4"),
        attack: Param::fixed(41),
        decay: Param::fixed(70),
        sustain: Param::fixed(80),
        release: Param::fixed(106),
        frequency: Param::fixed(78.68),
        resonance: Param::fixed(64),
        env_amount: Param::fixed(9),
    }
}

pub(crate) fn amp() -> AmpRecord {
    AmpRecord {
        attack: Param::fixed(53),
        decay: Param::fixed(87),
        sustain: Param::fixed(76),
        release: Param::fixed(60),
        reset: Param::fixed(true),
        mode: Param::fixed("ADSR"),
        pan: Param::fixed("Center"),
        volume: Param::fixed(70),
    }
}

pub(crate) fn fx() -> FxRecord {
    FxRecord {
        bit_reduction: Param::fixed(false),
        overdrive: Param::fixed(76),
        sample_rate_reduction: Param::fixed(0),
        sample_rate_routing: Param::fixed("Pre-filter"),
        delay: Param::fixed(false),
        reverb: Param::fixed(127),
        chorus: Param::fixed(59),
        overdrive_routing: Param::fixed("Pre-filter"),
    }
}

/// LFO shape for slots 1 and 2; `speed` and `depth` are filled by the parser.
pub(crate) fn lfo(
    multiplier: i64,
    destination: &str,
    waveform: &str,
    start_phase: i64,
    mode: &str,
) -> LfoRecord {
    LfoRecord {
        speed: Param::Unknown,
        multiplier: Param::fixed(multiplier),
        fade: Param::fixed(0),
        destination: Param::fixed(destination),
        waveform: Param::fixed(waveform),
        start_phase: Param::fixed(start_phase),
        mode: Param::fixed(mode),
        depth: Param::Unknown,
    }
}

pub(crate) fn lfo1() -> LfoRecord {
    lfo(16, "SYN HARM", "Sine", 10, "Free")
}

pub(crate) fn lfo2() -> LfoRecord {
    lfo(32, "SYN P2A4", "Triangle", 0, "Trig")
}
