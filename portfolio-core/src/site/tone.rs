/// Frequency change scheduled relative to the tone start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneStep {
    pub frequency_hz: f32,
    pub at_secs: f64,
}

/// Gain starts at `start_gain` and ramps exponentially to `end_gain`, at
/// which point the oscillator stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneEnvelope {
    pub start_gain: f32,
    pub end_gain: f32,
    pub duration_secs: f64,
}

pub const ENVELOPE: ToneEnvelope = ToneEnvelope {
    start_gain: 0.1,
    end_gain: 0.01,
    duration_secs: 0.3,
};

const SUCCESS_STEPS: &[ToneStep] = &[
    ToneStep { frequency_hz: 800.0, at_secs: 0.0 },
    ToneStep { frequency_hz: 1000.0, at_secs: 0.1 },
    ToneStep { frequency_hz: 1200.0, at_secs: 0.2 },
];

const ERROR_STEPS: &[ToneStep] = &[
    ToneStep { frequency_hz: 400.0, at_secs: 0.0 },
    ToneStep { frequency_hz: 300.0, at_secs: 0.1 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

impl Tone {
    pub fn steps(self) -> &'static [ToneStep] {
        match self {
            Tone::Success => SUCCESS_STEPS,
            Tone::Error => ERROR_STEPS,
        }
    }

    pub fn envelope(self) -> ToneEnvelope {
        ENVELOPE
    }
}
