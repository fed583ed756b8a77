//! Lab Session — parameter snapshots and the explicit render loop
//!
//! Owns the lab's current state (circuit mode, component values, probe
//! signal, running flag) and hands each consumer an immutable
//! [`LabSnapshot`] per frame instead of shared mutable globals. Mutators
//! validate against the configured control ranges and reject out-of-range
//! values, so the engine's preconditions always hold by the time it runs.
//!
//! The repaint cycle is an explicit loop: the host calls
//! [`LabSession::render_frame`] on its timer tick; while stopped the call
//! is a cheap no-op. Each rendered frame performs one point evaluation,
//! one probe-trace synthesis, and one magnitude sweep, and passes the
//! numbers to the [`RenderSurface`] — the session knows nothing about
//! pixels.
//!
//! ## Example
//!
//! ```rust
//! use emphlab_core::session::{FrameData, LabSession, RenderSurface};
//!
//! struct Counter(usize);
//! impl RenderSurface for Counter {
//!     fn render(&mut self, _frame: &FrameData) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut session = LabSession::default();
//! let mut surface = Counter(0);
//!
//! // Nothing renders until the simulation is started
//! assert!(!session.render_frame(&mut surface).unwrap());
//! session.start();
//! assert!(session.render_frame(&mut surface).unwrap());
//! assert_eq!(surface.0, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::LabConfig;
use crate::emphasis::{
    corner_frequency, evaluate_at, sweep_magnitude_db, CircuitMode, CircuitParams, EmphasisError,
    SweepPoint, TransferResult,
};
use crate::time_response::{synthesize, DriveSignal, TimeResponse};

/// Immutable per-frame view of the lab's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabSnapshot {
    /// Selected circuit orientation
    pub mode: CircuitMode,
    /// RC component values
    pub params: CircuitParams,
    /// Probe signal applied to the input
    pub drive: DriveSignal,
}

/// Numeric outputs of one rendered frame.
#[derive(Debug, Clone)]
pub struct FrameData {
    /// The parameters the frame was computed from
    pub snapshot: LabSnapshot,
    /// Gain/phase at the drive frequency
    pub transfer: TransferResult,
    /// Input/output probe tracks for the waveform and comparison views
    pub trace: TimeResponse,
    /// Magnitude curve for the Bode view
    pub response: Vec<SweepPoint>,
    /// Corner frequency marker position in Hz
    pub corner_hz: f64,
}

/// A display consumer of frame data. Agnostic to pixel coordinates,
/// color, and canvas size.
pub trait RenderSurface {
    /// Present one frame's numeric outputs.
    fn render(&mut self, frame: &FrameData);
}

/// The lab's stateful session: current snapshot plus run control.
#[derive(Debug, Clone)]
pub struct LabSession {
    config: LabConfig,
    snapshot: LabSnapshot,
    running: bool,
}

impl Default for LabSession {
    fn default() -> Self {
        Self::from_validated(LabConfig::default())
    }
}

impl LabSession {
    /// Create a session from a validated configuration.
    ///
    /// Control defaults become the initial snapshot. Fails if the
    /// configuration itself is invalid.
    pub fn new(config: LabConfig) -> Result<Self, crate::config::ConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: LabConfig) -> Self {
        let snapshot = LabSnapshot {
            mode: CircuitMode::PreEmphasis,
            params: CircuitParams::new(
                config.controls.resistance_ohms.default,
                config.controls.capacitance_uf.default,
            ),
            drive: DriveSignal {
                frequency_hz: config.controls.frequency_hz.default,
                amplitude: config.controls.amplitude_volts.default,
            },
        };
        Self {
            config,
            snapshot,
            running: false,
        }
    }

    /// Current parameter snapshot.
    pub fn snapshot(&self) -> LabSnapshot {
        self.snapshot
    }

    /// The session's configuration.
    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    /// Whether the simulation loop is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start the simulation loop.
    pub fn start(&mut self) {
        self.running = true;
        tracing::debug!(mode = ?self.snapshot.mode, "simulation started");
    }

    /// Stop the simulation loop.
    pub fn stop(&mut self) {
        self.running = false;
        tracing::debug!("simulation stopped");
    }

    /// Select the circuit orientation.
    pub fn set_mode(&mut self, mode: CircuitMode) {
        self.snapshot.mode = mode;
    }

    /// Switch to the complementary circuit.
    pub fn toggle_mode(&mut self) {
        self.snapshot.mode = self.snapshot.mode.complement();
    }

    /// Set resistance in ohms, rejecting values outside the control range.
    pub fn set_resistance(&mut self, ohms: f64) -> Result<(), EmphasisError> {
        let range = self.config.controls.resistance_ohms;
        if !range.contains(ohms) {
            tracing::warn!(value = ohms, min = range.min, max = range.max,
                "rejected out-of-range resistance");
            return Err(EmphasisError::InvalidParameter(format!(
                "resistance {} outside [{}, {}] ohms",
                ohms, range.min, range.max
            )));
        }
        self.snapshot.params.resistance_ohms = ohms;
        Ok(())
    }

    /// Set capacitance in microfarads, rejecting out-of-range values.
    pub fn set_capacitance(&mut self, microfarads: f64) -> Result<(), EmphasisError> {
        let range = self.config.controls.capacitance_uf;
        if !range.contains(microfarads) {
            tracing::warn!(value = microfarads, min = range.min, max = range.max,
                "rejected out-of-range capacitance");
            return Err(EmphasisError::InvalidParameter(format!(
                "capacitance {} outside [{}, {}] microfarads",
                microfarads, range.min, range.max
            )));
        }
        self.snapshot.params.capacitance_uf = microfarads;
        Ok(())
    }

    /// Set the probe frequency in Hz, rejecting out-of-range values.
    pub fn set_frequency(&mut self, hz: f64) -> Result<(), EmphasisError> {
        let range = self.config.controls.frequency_hz;
        if !range.contains(hz) {
            tracing::warn!(value = hz, min = range.min, max = range.max,
                "rejected out-of-range frequency");
            return Err(EmphasisError::InvalidParameter(format!(
                "frequency {} outside [{}, {}] Hz",
                hz, range.min, range.max
            )));
        }
        self.snapshot.drive.frequency_hz = hz;
        Ok(())
    }

    /// Set the probe amplitude in volts, rejecting out-of-range values.
    pub fn set_amplitude(&mut self, volts: f64) -> Result<(), EmphasisError> {
        let range = self.config.controls.amplitude_volts;
        if !range.contains(volts) {
            tracing::warn!(value = volts, min = range.min, max = range.max,
                "rejected out-of-range amplitude");
            return Err(EmphasisError::InvalidParameter(format!(
                "amplitude {} outside [{}, {}] volts",
                volts, range.min, range.max
            )));
        }
        self.snapshot.drive.amplitude = volts;
        Ok(())
    }

    /// Corner frequency of the current component values, in Hz.
    pub fn corner_frequency(&self) -> Result<f64, EmphasisError> {
        corner_frequency(&self.snapshot.params)
    }

    /// Compute one frame's numeric outputs from the current snapshot.
    ///
    /// Every view pulls from the same engine call here; there is no
    /// per-view reimplementation of the transfer function.
    pub fn compute_frame(&self) -> Result<FrameData, EmphasisError> {
        let snapshot = self.snapshot;
        let transfer = evaluate_at(snapshot.mode, &snapshot.params, snapshot.drive.frequency_hz)?;
        let trace = synthesize(
            snapshot.mode,
            &snapshot.params,
            &snapshot.drive,
            self.config.trace.samples,
            self.config.trace.cycles,
        )?;
        let response = sweep_magnitude_db(
            snapshot.mode,
            &snapshot.params,
            (self.config.sweep.f_min_hz, self.config.sweep.f_max_hz),
            self.config.sweep.points,
        )?;
        let corner_hz = corner_frequency(&snapshot.params)?;

        Ok(FrameData {
            snapshot,
            transfer,
            trace,
            response,
            corner_hz,
        })
    }

    /// Run one tick of the render loop.
    ///
    /// Returns `Ok(true)` when a frame was computed and handed to the
    /// surface, `Ok(false)` when the session is stopped.
    pub fn render_frame(&mut self, surface: &mut dyn RenderSurface) -> Result<bool, EmphasisError> {
        if !self.running {
            return Ok(false);
        }
        let frame = self.compute_frame()?;
        surface.render(&frame);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSurface {
        frames: Vec<FrameData>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self { frames: Vec::new() }
        }
    }

    impl RenderSurface for RecordingSurface {
        fn render(&mut self, frame: &FrameData) {
            self.frames.push(frame.clone());
        }
    }

    #[test]
    fn test_initial_snapshot_from_config_defaults() {
        let session = LabSession::default();
        let snap = session.snapshot();
        assert_eq!(snap.mode, CircuitMode::PreEmphasis);
        assert_eq!(snap.params.resistance_ohms, 1000.0);
        assert_eq!(snap.params.capacitance_uf, 1.0);
        assert_eq!(snap.drive.frequency_hz, 1000.0);
        assert_eq!(snap.drive.amplitude, 1.0);
        assert!(!session.is_running());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = LabConfig::default();
        config.controls.resistance_ohms.min = 0.0;
        assert!(LabSession::new(config).is_err());
    }

    #[test]
    fn test_start_stop() {
        let mut session = LabSession::default();
        session.start();
        assert!(session.is_running());
        session.stop();
        assert!(!session.is_running());
    }

    #[test]
    fn test_setters_accept_in_range() {
        let mut session = LabSession::default();
        session.set_resistance(4700.0).unwrap();
        session.set_capacitance(0.5).unwrap();
        session.set_frequency(2000.0).unwrap();
        session.set_amplitude(2.5).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.params.resistance_ohms, 4700.0);
        assert_eq!(snap.params.capacitance_uf, 0.5);
        assert_eq!(snap.drive.frequency_hz, 2000.0);
        assert_eq!(snap.drive.amplitude, 2.5);
    }

    #[test]
    fn test_setters_reject_out_of_range() {
        let mut session = LabSession::default();
        assert!(session.set_resistance(0.0).is_err());
        assert!(session.set_resistance(1e9).is_err());
        assert!(session.set_capacitance(-1.0).is_err());
        assert!(session.set_frequency(-5.0).is_err());
        assert!(session.set_amplitude(100.0).is_err());
        // State is untouched after rejections
        assert_eq!(session.snapshot().params.resistance_ohms, 1000.0);
    }

    #[test]
    fn test_toggle_mode() {
        let mut session = LabSession::default();
        session.toggle_mode();
        assert_eq!(session.snapshot().mode, CircuitMode::DeEmphasis);
        session.toggle_mode();
        assert_eq!(session.snapshot().mode, CircuitMode::PreEmphasis);
    }

    #[test]
    fn test_render_frame_respects_running_flag() {
        let mut session = LabSession::default();
        let mut surface = RecordingSurface::new();

        assert!(!session.render_frame(&mut surface).unwrap());
        assert!(surface.frames.is_empty());

        session.start();
        assert!(session.render_frame(&mut surface).unwrap());
        assert!(session.render_frame(&mut surface).unwrap());
        assert_eq!(surface.frames.len(), 2);

        session.stop();
        assert!(!session.render_frame(&mut surface).unwrap());
        assert_eq!(surface.frames.len(), 2);
    }

    #[test]
    fn test_frame_views_share_one_engine() {
        let mut session = LabSession::default();
        session.set_frequency(5000.0).unwrap();
        let frame = session.compute_frame().unwrap();

        // The trace was synthesized from the same transfer value
        assert_eq!(frame.trace.transfer, frame.transfer);
        // Sweep dimensions follow the config
        assert_eq!(frame.response.len(), session.config().sweep.points);
        assert_eq!(frame.trace.input.len(), session.config().trace.samples);
        // Corner for 1 kΩ / 1 µF
        assert!((frame.corner_hz - 159.1549).abs() < 1e-3);
        // The snapshot embedded in the frame is the one we configured
        assert_eq!(frame.snapshot.drive.frequency_hz, 5000.0);
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut session = LabSession::default();
        let before = session.snapshot();
        session.set_resistance(2000.0).unwrap();
        assert_eq!(before.params.resistance_ohms, 1000.0);
        assert_eq!(session.snapshot().params.resistance_ohms, 2000.0);
    }

    #[test]
    fn test_snapshot_serde_round_trip() {
        let session = LabSession::default();
        let yaml = serde_yaml::to_string(&session.snapshot()).unwrap();
        let parsed: LabSnapshot = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, session.snapshot());
    }
}
