//! Non-blocking temperature acquisition.
//!
//! The probe needs a fixed settle time between "start conversion" and
//! "read result". Instead of sleeping, the sequencer is ticked from the
//! control loop and advances at most one phase per tick:
//!
//! ```text
//!        interval elapsed                latency elapsed
//!  Idle ──────────────────▶ Pending ─────────────────────▶ Idle
//!        start_conversion()           read_last_result()
//!                                     → TemperatureReading
//! ```
//!
//! The sampling interval is measured from the previous conversion request,
//! so the sample period is stable regardless of the read latency. All time
//! arithmetic wraps with the `u32` millisecond counter.

use crate::app::ports::TemperatureProbe;
use crate::config::SystemConfig;

use super::TemperatureReading;

/// Where the sequencer is in its two-step cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionPhase {
    /// No conversion outstanding. `None` until the first request.
    Idle { last_request_ms: Option<u32> },
    /// A conversion was requested and has not been collected yet.
    ConversionPending { requested_at_ms: u32 },
}

pub struct Acquisition {
    phase: AcquisitionPhase,
    sample_interval_ms: u32,
    conversion_latency_ms: u32,
}

impl Acquisition {
    pub fn new(sample_interval_ms: u32, conversion_latency_ms: u32) -> Self {
        Self {
            phase: AcquisitionPhase::Idle {
                last_request_ms: None,
            },
            sample_interval_ms,
            conversion_latency_ms,
        }
    }

    pub fn from_config(config: &SystemConfig) -> Self {
        Self::new(config.sample_interval_ms, config.conversion_latency_ms)
    }

    /// Advance by at most one phase. Returns a reading only on the tick
    /// that collects a finished conversion.
    pub fn tick(
        &mut self,
        now_ms: u32,
        probe: &mut impl TemperatureProbe,
    ) -> Option<TemperatureReading> {
        match self.phase {
            AcquisitionPhase::Idle { last_request_ms } => {
                let due = match last_request_ms {
                    None => true,
                    Some(last) => now_ms.wrapping_sub(last) >= self.sample_interval_ms,
                };
                if due {
                    probe.start_conversion();
                    self.phase = AcquisitionPhase::ConversionPending {
                        requested_at_ms: now_ms,
                    };
                }
                None
            }
            AcquisitionPhase::ConversionPending { requested_at_ms } => {
                if now_ms.wrapping_sub(requested_at_ms) < self.conversion_latency_ms {
                    return None;
                }
                let raw = probe.read_last_result();
                self.phase = AcquisitionPhase::Idle {
                    last_request_ms: Some(requested_at_ms),
                };
                Some(TemperatureReading::from_raw(raw))
            }
        }
    }

    pub fn phase(&self) -> AcquisitionPhase {
        self.phase
    }
}
