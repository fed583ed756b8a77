//! Probe Waveform Synthesis — time-domain input/output traces
//!
//! Samples the sinusoidal probe signal and the network's steady-state
//! response to it, producing two equal-length tracks for the lab's
//! waveform and comparison views. The trace spans a fixed number of probe
//! cycles in normalized phase; the drive frequency enters only through
//! the transfer function, so changing frequency reshapes amplitude and
//! phase of the output track, not the number of drawn cycles.
//!
//! ```text
//! input[i]  = A · sin(θ_i)
//! output[i] = A · G · sin(θ_i + φ)       (G, φ) = H(jω) at the drive
//! θ_i spans [0, 2π·cycles]
//! ```
//!
//! ## Example
//!
//! ```rust
//! use emphlab_core::emphasis::{CircuitMode, CircuitParams};
//! use emphlab_core::time_response::{synthesize, DriveSignal};
//!
//! let params = CircuitParams::new(1000.0, 1.0);
//! let drive = DriveSignal { frequency_hz: 1000.0, amplitude: 1.0 };
//! let trace = synthesize(CircuitMode::DeEmphasis, &params, &drive, 512, 3.0).unwrap();
//! assert_eq!(trace.input.len(), 512);
//! // Well above the corner, the low-pass attenuates the probe
//! assert!(trace.transfer.gain < 0.2);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::emphasis::{evaluate_at, CircuitMode, CircuitParams, EmphasisError, TransferResult};

/// Sinusoidal probe applied to the network input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveSignal {
    /// Probe frequency in Hz (>= 0; zero gives a DC-gain trace)
    pub frequency_hz: f64,
    /// Probe amplitude in volts (>= 0)
    pub amplitude: f64,
}

impl Default for DriveSignal {
    fn default() -> Self {
        Self {
            frequency_hz: 1000.0,
            amplitude: 1.0,
        }
    }
}

impl DriveSignal {
    /// Check the non-negative preconditions on frequency and amplitude.
    pub fn validate(&self) -> Result<(), EmphasisError> {
        if !(self.frequency_hz >= 0.0) {
            return Err(EmphasisError::InvalidParameter(format!(
                "drive frequency must be >= 0 Hz, got {}",
                self.frequency_hz
            )));
        }
        if !(self.amplitude >= 0.0) {
            return Err(EmphasisError::InvalidParameter(format!(
                "drive amplitude must be >= 0, got {}",
                self.amplitude
            )));
        }
        Ok(())
    }
}

/// Sampled input and steady-state output tracks of one probe window.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeResponse {
    /// Input samples A·sin(θ)
    pub input: Vec<f64>,
    /// Output samples A·G·sin(θ + φ)
    pub output: Vec<f64>,
    /// The transfer value used: (G, φ) at the drive frequency
    pub transfer: TransferResult,
}

/// Synthesize input/output tracks for one probe window.
///
/// `sample_count` points cover `cycles` full periods of the probe
/// sinusoid. Pure function of its inputs; identical arguments reproduce
/// identical tracks.
///
/// Preconditions: `params` strictly positive, `drive` non-negative,
/// `sample_count >= 2`, `cycles > 0`.
pub fn synthesize(
    mode: CircuitMode,
    params: &CircuitParams,
    drive: &DriveSignal,
    sample_count: usize,
    cycles: f64,
) -> Result<TimeResponse, EmphasisError> {
    drive.validate()?;
    if sample_count < 2 {
        return Err(EmphasisError::InvalidParameter(format!(
            "trace needs at least 2 samples, got {}",
            sample_count
        )));
    }
    if !(cycles > 0.0) {
        return Err(EmphasisError::InvalidParameter(format!(
            "trace must span > 0 cycles, got {}",
            cycles
        )));
    }

    let transfer = evaluate_at(mode, params, drive.frequency_hz)?;

    let span = cycles * 2.0 * PI;
    let last = (sample_count - 1) as f64;
    let mut input = Vec::with_capacity(sample_count);
    let mut output = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        let theta = span * i as f64 / last;
        input.push(drive.amplitude * theta.sin());
        output.push(drive.amplitude * transfer.gain * (theta + transfer.phase_rad).sin());
    }

    Ok(TimeResponse {
        input,
        output,
        transfer,
    })
}
