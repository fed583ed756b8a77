//! # Emphasis Lab Core
//!
//! Analytic engine for an interactive FM pre-emphasis/de-emphasis
//! teaching lab. A single-pole RC network is solved in closed form —
//! no differential-equation stepping — and exposed as pure functions
//! that the lab's views sample on every frame:
//!
//! - **Point evaluation**: complex gain and phase at one probe frequency
//! - **Frequency sweep**: magnitude-vs-frequency curve over a log axis
//!   with the −3 dB corner marker
//! - **Probe traces**: sampled input/output sinusoids for the waveform
//!   and comparison views
//!
//! ## Signal Flow
//!
//! ```text
//! TX: audio → [pre-emphasis  H(jω) = 1 + jωτ      ] → FM modulator
//! RX: FM demod → [de-emphasis H(jω) = 1/(1 + jωτ) ] → audio
//!                 τ = R·C,  f_c = 1/(2π·τ)
//! ```
//!
//! The two networks are exact reciprocals: whatever the transmit side
//! boosts, the receive side attenuates by the same factor, which is the
//! property the lab lets students verify by flipping the circuit mode.
//!
//! ## Example
//!
//! ```rust
//! use emphlab_core::{evaluate_at, sweep_magnitude_db, CircuitMode, CircuitParams};
//!
//! let params = CircuitParams::new(1000.0, 1.0); // 1 kΩ, 1 µF → fc ≈ 159 Hz
//!
//! // Gain and phase at a 1 kHz probe
//! let t = evaluate_at(CircuitMode::DeEmphasis, &params, 1000.0).unwrap();
//! assert!(t.gain < 1.0 && t.phase_rad < 0.0);
//!
//! // Bode curve over five decades
//! let curve = sweep_magnitude_db(CircuitMode::DeEmphasis, &params, (1.0, 100_000.0), 256).unwrap();
//! assert_eq!(curve.len(), 256);
//! ```
//!
//! ## Architecture
//!
//! [`emphasis`] is the stateless core; [`time_response`] and
//! [`plot_scale`] adapt its outputs for display consumers; [`session`]
//! owns the mutable lab state and drives the explicit render loop;
//! [`config`] and [`logging`] cover the ambient plumbing. Renderers sit
//! behind the [`session::RenderSurface`] trait and receive numbers, not
//! pixels.

pub mod config;
pub mod emphasis;
pub mod level;
pub mod logging;
pub mod plot_scale;
pub mod session;
pub mod time_response;

pub use config::{ConfigError, LabConfig};
pub use emphasis::{
    corner_frequency, evaluate_at, sweep_magnitude_db, CircuitInfo, CircuitMode, CircuitParams,
    EmphasisError, SweepPoint, TransferResult,
};
pub use session::{FrameData, LabSession, LabSnapshot, RenderSurface};
pub use time_response::{DriveSignal, TimeResponse};
