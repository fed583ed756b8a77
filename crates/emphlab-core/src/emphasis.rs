//! RC Pre-emphasis and De-emphasis Transfer Functions
//!
//! FM broadcast chains boost high audio frequencies before modulation
//! (pre-emphasis) and attenuate them after demodulation (de-emphasis) to
//! improve SNR. Both stages are a single-pole RC network characterized by
//! one time constant τ = R·C.
//!
//! This module is the analytic engine behind the lab's three views: it
//! converts circuit parameters into complex gain/phase at a probe
//! frequency and into a magnitude curve over a logarithmic sweep. It is
//! stateless; every call receives a fresh parameter snapshot.
//!
//! ## Transfer functions
//!
//! ```text
//! Pre-emphasis:  H(jω) = 1 + jωτ        (+6 dB/octave above f_c)
//! De-emphasis:   H(jω) = 1 / (1 + jωτ)  (-6 dB/octave above f_c)
//! Corner:        f_c = 1 / (2π·τ)       (the ±3 dB point)
//! ```
//!
//! The pre-emphasis branch is the raw differentiator stage the lab
//! demonstrates: gain grows without bound as frequency increases. No
//! band-limiting shelf zero is applied.
//!
//! ## Example
//!
//! ```rust
//! use emphlab_core::emphasis::{evaluate_at, corner_frequency, CircuitMode, CircuitParams};
//!
//! // 1 kΩ and 1 µF give τ = 1 ms, f_c ≈ 159.15 Hz
//! let params = CircuitParams::new(1000.0, 1.0);
//! let fc = corner_frequency(&params).unwrap();
//! assert!((fc - 159.1549).abs() < 1e-3);
//!
//! // At the corner the boost is √2 (+3.01 dB) with a 45° lead
//! let t = evaluate_at(CircuitMode::PreEmphasis, &params, fc).unwrap();
//! assert!((t.gain - std::f64::consts::SQRT_2).abs() < 1e-9);
//! assert!((t.phase_deg() - 45.0).abs() < 1e-6);
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::level::amplitude_to_db;

/// Error type for the transfer-function engine.
///
/// All failures are precondition violations on caller-supplied data; the
/// engine never retries and never substitutes defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmphasisError {
    /// A parameter violated the engine's preconditions.
    InvalidParameter(String),
}

impl std::fmt::Display for EmphasisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmphasisError::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
        }
    }
}

impl std::error::Error for EmphasisError {}

/// Circuit orientation: which side of the FM link the RC network sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitMode {
    /// Transmit-side high-pass stage, H(jω) = 1 + jωτ
    PreEmphasis,
    /// Receive-side low-pass stage, H(jω) = 1 / (1 + jωτ)
    DeEmphasis,
}

impl CircuitMode {
    /// The complementary mode.
    pub fn complement(&self) -> Self {
        match self {
            CircuitMode::PreEmphasis => CircuitMode::DeEmphasis,
            CircuitMode::DeEmphasis => CircuitMode::PreEmphasis,
        }
    }

    /// Educational descriptor for display beside the schematic.
    pub fn info(&self) -> CircuitInfo {
        match self {
            CircuitMode::PreEmphasis => CircuitInfo {
                name: "Pre-emphasis",
                full_name: "Pre-emphasis Filter (High-Pass)",
                description: "Boosts high frequencies before transmission to \
                              improve signal-to-noise ratio",
                filter_character: "High-Pass",
                slope_db_per_octave: 6,
                typical_use: "FM radio transmitters, audio recording systems",
            },
            CircuitMode::DeEmphasis => CircuitInfo {
                name: "De-emphasis",
                full_name: "De-emphasis Filter (Low-Pass)",
                description: "Attenuates high frequencies after reception to \
                              restore the original spectral balance",
                filter_character: "Low-Pass",
                slope_db_per_octave: -6,
                typical_use: "FM radio receivers, audio playback systems",
            },
        }
    }
}

/// Information about a circuit mode for display and education.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitInfo {
    /// Short name (e.g., "Pre-emphasis")
    pub name: &'static str,
    /// Full name with filter class
    pub full_name: &'static str,
    /// Brief description
    pub description: &'static str,
    /// Filter character ("High-Pass" / "Low-Pass")
    pub filter_character: &'static str,
    /// Asymptotic slope above the corner, in dB per octave
    pub slope_db_per_octave: i32,
    /// Where the circuit appears in real equipment
    pub typical_use: &'static str,
}

/// RC component values defining the network's single time constant.
///
/// Resistance is in ohms, capacitance in microfarads — the units the lab's
/// controls expose. Both must be strictly positive; the engine rejects
/// anything else rather than clamping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitParams {
    /// Resistance in ohms
    pub resistance_ohms: f64,
    /// Capacitance in microfarads
    pub capacitance_uf: f64,
}

impl CircuitParams {
    /// Create a parameter set. Validity is checked at evaluation time.
    pub fn new(resistance_ohms: f64, capacitance_uf: f64) -> Self {
        Self {
            resistance_ohms,
            capacitance_uf,
        }
    }

    /// Time constant τ = R·C in seconds.
    pub fn tau_seconds(&self) -> f64 {
        self.resistance_ohms * self.capacitance_uf * 1e-6
    }

    /// Check the strictly-positive precondition on both components.
    ///
    /// NaN fails both comparisons and is rejected along with zero and
    /// negative values.
    pub fn validate(&self) -> Result<(), EmphasisError> {
        if !(self.resistance_ohms > 0.0) {
            return Err(EmphasisError::InvalidParameter(format!(
                "resistance must be > 0 ohms, got {}",
                self.resistance_ohms
            )));
        }
        if !(self.capacitance_uf > 0.0) {
            return Err(EmphasisError::InvalidParameter(format!(
                "capacitance must be > 0 microfarads, got {}",
                self.capacitance_uf
            )));
        }
        Ok(())
    }
}

/// Complex gain at a single frequency: linear magnitude and phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferResult {
    /// Output/input amplitude ratio (linear, dimensionless)
    pub gain: f64,
    /// Phase shift in radians, in (-π, π]
    pub phase_rad: f64,
}

impl TransferResult {
    /// Gain in decibels: 20·log10(gain).
    pub fn gain_db(&self) -> f64 {
        amplitude_to_db(self.gain)
    }

    /// Phase in degrees, for display.
    pub fn phase_deg(&self) -> f64 {
        self.phase_rad.to_degrees()
    }
}

/// One sample of a frequency-response sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Frequency in Hz
    pub frequency_hz: f64,
    /// Magnitude in dB (20·log10)
    pub magnitude_db: f64,
}

/// Evaluate the transfer function at one frequency.
///
/// Returns the linear gain magnitude and phase shift of the selected
/// network at `frequency_hz`. At 0 Hz both modes pass with unity gain and
/// zero phase.
///
/// Preconditions: `params` strictly positive, `frequency_hz >= 0`.
pub fn evaluate_at(
    mode: CircuitMode,
    params: &CircuitParams,
    frequency_hz: f64,
) -> Result<TransferResult, EmphasisError> {
    params.validate()?;
    if !(frequency_hz >= 0.0) {
        return Err(EmphasisError::InvalidParameter(format!(
            "frequency must be >= 0 Hz, got {}",
            frequency_hz
        )));
    }

    let omega = 2.0 * PI * frequency_hz;
    // 1 + jωτ, shared by both orientations
    let h = Complex64::new(1.0, omega * params.tau_seconds());

    let result = match mode {
        CircuitMode::PreEmphasis => TransferResult {
            gain: h.norm(),
            phase_rad: h.arg(),
        },
        CircuitMode::DeEmphasis => TransferResult {
            gain: h.norm().recip(),
            phase_rad: -h.arg(),
        },
    };
    Ok(result)
}

/// Corner (-3 dB) frequency f_c = 1/(2π·τ) in Hz.
pub fn corner_frequency(params: &CircuitParams) -> Result<f64, EmphasisError> {
    params.validate()?;
    Ok(1.0 / (2.0 * PI * params.tau_seconds()))
}

/// Sweep the magnitude response over a logarithmic frequency axis.
///
/// Produces exactly `sample_count` points geometrically spaced from
/// `range_hz.0` to `range_hz.1` inclusive — evenly spaced in
/// log-frequency, the standard Bode-plot convention. The result is a pure
/// function of the inputs; identical arguments reproduce the identical
/// sequence.
///
/// Preconditions: `params` strictly positive, `0 < f_min < f_max`,
/// `sample_count >= 2`.
pub fn sweep_magnitude_db(
    mode: CircuitMode,
    params: &CircuitParams,
    range_hz: (f64, f64),
    sample_count: usize,
) -> Result<Vec<SweepPoint>, EmphasisError> {
    params.validate()?;
    let (f_min, f_max) = range_hz;
    if !(f_min > 0.0) {
        return Err(EmphasisError::InvalidParameter(format!(
            "sweep start must be > 0 Hz, got {}",
            f_min
        )));
    }
    if !(f_max > f_min) {
        return Err(EmphasisError::InvalidParameter(format!(
            "sweep range must satisfy f_min < f_max, got [{}, {}]",
            f_min, f_max
        )));
    }
    if sample_count < 2 {
        return Err(EmphasisError::InvalidParameter(format!(
            "sweep needs at least 2 samples, got {}",
            sample_count
        )));
    }

    let fc = 1.0 / (2.0 * PI * params.tau_seconds());
    let ratio = f_max / f_min;
    let last = (sample_count - 1) as f64;

    let mut points = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        let freq = f_min * ratio.powf(i as f64 / last);
        let x = freq / fc;
        let magnitude = match mode {
            CircuitMode::PreEmphasis => (1.0 + x * x).sqrt(),
            CircuitMode::DeEmphasis => (1.0 + x * x).sqrt().recip(),
        };
        points.push(SweepPoint {
            frequency_hz: freq,
            magnitude_db: amplitude_to_db(magnitude),
        });
    }
    Ok(points)
}
