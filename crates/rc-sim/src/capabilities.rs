//! Host capability flags and the settings forwarded to external subsystems.

use crate::error::{SimError, SimResult};
use rc_core::Real;

/// What the host was built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostCapabilities {
    /// A self-gravity solver is available.
    pub self_gravity: bool,
    /// A spectral-transform (FFT) subsystem is available.
    pub fft: bool,
}

impl HostCapabilities {
    /// Capabilities compiled into this build (`self-gravity`, `fft` features).
    pub fn from_build() -> Self {
        Self {
            self_gravity: cfg!(feature = "self-gravity"),
            fft: cfg!(feature = "fft"),
        }
    }
}

/// Parameters handed to the self-gravity solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravitySettings {
    /// 4πG in code units
    pub four_pi_g: Real,
    /// Softening threshold
    pub threshold: Real,
}

/// Turbulence driving mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurbulenceMode {
    #[default]
    Disabled,
    /// Driven once at start, then left to decay.
    Decaying,
    /// Driven impulsively at intervals.
    Impulsive,
    /// Driven every step.
    Continuous,
}

impl TurbulenceMode {
    pub fn from_flag(flag: i64) -> SimResult<Self> {
        match flag {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::Decaying),
            2 => Ok(Self::Impulsive),
            3 => Ok(Self::Continuous),
            _ => Err(SimError::InvalidArg {
                what: "turb_flag must be one of 0, 1, 2, 3",
            }),
        }
    }

    pub fn flag(self) -> i64 {
        match self {
            Self::Disabled => 0,
            Self::Decaying => 1,
            Self::Impulsive => 2,
            Self::Continuous => 3,
        }
    }

    /// Driving needs the spectral-transform subsystem.
    pub fn requires_fft(self) -> bool {
        self != Self::Disabled
    }
}
