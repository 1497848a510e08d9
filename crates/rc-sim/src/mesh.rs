//! The host mesh: block decomposition, capability-gated settings and the
//! explicit source slot.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::array::CellArray;
use crate::block::{BlockData, MeshBlock};
use crate::capabilities::{GravitySettings, HostCapabilities, TurbulenceMode};
use crate::eos::EquationOfState;
use crate::error::{SimError, SimResult};
use crate::source::ExplicitSource;
use rc_core::{BlockId, Real};

/// Shape of the mesh and its decomposition into blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeshSpec {
    /// Root-grid cells (x1, x2, x3)
    pub mesh_nx: [usize; 3],
    /// Cells per block (x1, x2, x3); must divide `mesh_nx`
    pub block_nx: [usize; 3],
    pub nghost: usize,
    pub nscalars: usize,
}

impl MeshSpec {
    pub fn validate(&self) -> SimResult<()> {
        for d in 0..3 {
            if self.mesh_nx[d] == 0 || self.block_nx[d] == 0 {
                return Err(SimError::InvalidArg {
                    what: "mesh and block sizes must be positive",
                });
            }
            if self.mesh_nx[d] % self.block_nx[d] != 0 {
                return Err(SimError::InvalidArg {
                    what: "block size must evenly divide mesh size",
                });
            }
        }
        if self.nghost == 0 {
            return Err(SimError::InvalidArg {
                what: "nghost must be positive",
            });
        }
        Ok(())
    }

    /// Number of blocks along each direction.
    pub fn nblocks(&self) -> [usize; 3] {
        [
            self.mesh_nx[0] / self.block_nx[0],
            self.mesh_nx[1] / self.block_nx[1],
            self.mesh_nx[2] / self.block_nx[2],
        ]
    }
}

pub struct Mesh {
    spec: MeshSpec,
    eos: EquationOfState,
    capabilities: HostCapabilities,
    blocks: Vec<BlockData>,
    four_pi_g: Option<Real>,
    grav_threshold: Real,
    turbulence: TurbulenceMode,
    explicit_source: Option<Arc<dyn ExplicitSource>>,
}

impl Mesh {
    pub fn new(
        spec: MeshSpec,
        eos: EquationOfState,
        capabilities: HostCapabilities,
    ) -> SimResult<Self> {
        spec.validate()?;
        let nb = spec.nblocks();
        let mut blocks = Vec::with_capacity(nb[0] * nb[1] * nb[2]);
        for b3 in 0..nb[2] {
            for b2 in 0..nb[1] {
                for b1 in 0..nb[0] {
                    let gid = BlockId::from_index(blocks.len() as u32);
                    let block = MeshBlock::new(gid, [b1, b2, b3], spec.block_nx, spec.nghost);
                    blocks.push(BlockData::new(block, &eos, spec.nscalars));
                }
            }
        }
        info!(
            nblocks = blocks.len(),
            mesh_nx = ?spec.mesh_nx,
            block_nx = ?spec.block_nx,
            "mesh constructed"
        );
        Ok(Self {
            spec,
            eos,
            capabilities,
            blocks,
            four_pi_g: None,
            grav_threshold: 0.0,
            turbulence: TurbulenceMode::Disabled,
            explicit_source: None,
        })
    }

    pub fn spec(&self) -> &MeshSpec {
        &self.spec
    }

    pub fn eos(&self) -> &EquationOfState {
        &self.eos
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.capabilities
    }

    pub fn blocks(&self) -> &[BlockData] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut [BlockData] {
        &mut self.blocks
    }

    pub fn total_owned_cells(&self) -> usize {
        self.blocks.iter().map(|b| b.block.owned_cells()).sum()
    }

    /// Forward 4πG to the gravity solver.
    pub fn set_four_pi_g(&mut self, four_pi_g: Real) -> SimResult<()> {
        if !self.capabilities.self_gravity {
            return Err(SimError::InvalidArg {
                what: "four_pi_G set on a host without self-gravity",
            });
        }
        if !(four_pi_g.is_finite() && four_pi_g > 0.0) {
            return Err(SimError::InvalidArg {
                what: "four_pi_G must be finite and positive",
            });
        }
        self.four_pi_g = Some(four_pi_g);
        Ok(())
    }

    /// Forward the gravity softening threshold to the gravity solver.
    pub fn set_gravity_threshold(&mut self, eps: Real) -> SimResult<()> {
        if !self.capabilities.self_gravity {
            return Err(SimError::InvalidArg {
                what: "gravity threshold set on a host without self-gravity",
            });
        }
        if !(eps.is_finite() && eps >= 0.0) {
            return Err(SimError::InvalidArg {
                what: "grav_eps must be finite and non-negative",
            });
        }
        self.grav_threshold = eps;
        Ok(())
    }

    /// Gravity parameters, present once 4πG has been forwarded.
    pub fn gravity(&self) -> Option<GravitySettings> {
        self.four_pi_g.map(|four_pi_g| GravitySettings {
            four_pi_g,
            threshold: self.grav_threshold,
        })
    }

    pub fn set_turbulence(&mut self, mode: TurbulenceMode) -> SimResult<()> {
        if mode.requires_fft() && !self.capabilities.fft {
            return Err(SimError::InvalidArg {
                what: "turbulence driving requires FFT",
            });
        }
        self.turbulence = mode;
        Ok(())
    }

    pub fn turbulence(&self) -> TurbulenceMode {
        self.turbulence
    }

    /// Put `source` in the explicit source slot. The slot holds one source.
    pub fn enroll_explicit_source(&mut self, source: Arc<dyn ExplicitSource>) -> SimResult<()> {
        if let Some(existing) = &self.explicit_source {
            return Err(SimError::SourceAlreadyEnrolled {
                existing: existing.name().to_string(),
            });
        }
        debug!(source = source.name(), "explicit source enrolled");
        self.explicit_source = Some(source);
        Ok(())
    }

    pub fn explicit_source(&self) -> Option<&dyn ExplicitSource> {
        self.explicit_source.as_deref()
    }

    pub(crate) fn explicit_source_handle(&self) -> Option<Arc<dyn ExplicitSource>> {
        self.explicit_source.clone()
    }

    /// Run a per-block problem generator over the conserved registers, then
    /// recover primitives so the first stage sees a consistent state.
    pub fn generate<F>(&mut self, pgen: F)
    where
        F: Fn(&MeshBlock, &EquationOfState, &mut CellArray) + Sync,
    {
        let eos = self.eos;
        self.blocks.par_iter_mut().for_each(|bd| {
            pgen(&bd.block, &eos, &mut bd.cons);
            eos.conserved_to_primitive(&bd.block, &bd.cons, &mut bd.prim);
        });
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("spec", &self.spec)
            .field("eos", &self.eos)
            .field("capabilities", &self.capabilities)
            .field("nblocks", &self.blocks.len())
            .field("gravity", &self.gravity())
            .field("turbulence", &self.turbulence)
            .field(
                "explicit_source",
                &self.explicit_source.as_ref().map(|s| s.name().to_string()),
            )
            .finish()
    }
}
