//! Support for the stereo FIR filter accelerator: an FPGA core that filters both audio
//! channels with one shared Q1.15 coefficient vector. The tap count is fixed when the
//! bitstream is synthesized, and must be supplied by the caller.
//!
//! The driver is not interrupt-safe: CTRL is updated with read-modify-writes. If an ISR
//! also touches this accelerator, wrap calls in a critical section, eg
//! `cortex_m::interrupt::free`.

use cfg_if::cfg_if;

use crate::{
    error::{Error, Result},
    mmio::Mmio,
    q15::Q15,
    regs::{self, Ctrl},
};

/// Accelerator state, as far as the driver can observe it. ENABLE is read live; whether
/// the delay line holds samples is tracked by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FirState {
    /// Disabled, with an empty delay line. The state after `init`.
    IdleClear,
    /// Enabled and processing samples.
    Running,
    /// Disabled, but the delay line may still hold samples from the last run.
    IdleDirty,
}

/// One FIR accelerator instance. Owns its bus handle and, by contract, its register
/// window.
pub struct FirStereo<M: Mmio> {
    mmio: M,
    base: usize,
    num_taps: u32,
    ready: bool,
    /// Set once the core has run since the last clear.
    dirty: bool,
}

/// Initialize an accelerator into `slot`. Fails only if no slot is provided. The base address
/// and tap count aren't validated; they come from the board's memory map and bitstream.
pub fn init<M: Mmio>(
    slot: Option<&mut Option<FirStereo<M>>>,
    mmio: M,
    base: usize,
    num_taps: u32,
) -> Result<()> {
    let slot = slot.ok_or(Error::NoDescriptor)?;
    *slot = Some(FirStereo::init(mmio, base, num_taps));
    Ok(())
}

impl<M: Mmio> FirStereo<M> {
    /// Bring up an accelerator at `base` with `num_taps` coefficient slots, and leave it
    /// disabled with its internal state cleared.
    pub fn init(mmio: M, base: usize, num_taps: u32) -> Self {
        let mut result = Self {
            mmio,
            base,
            num_taps,
            ready: false,
            dirty: false,
        };

        // One read: force ENABLE low, then pulse CLEAR around that same value.
        let quiescent = result.read_ctrl().for_rmw().with_enable(false);
        result.write_ctrl(quiescent);
        result.pulse_clear(quiescent);

        result.ready = true;
        result
    }

    /// True once `init` has put the hardware in a known state.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn base_address(&self) -> usize {
        self.base
    }

    pub fn num_taps(&self) -> u32 {
        self.num_taps
    }

    /// The bus handle this instance uses.
    pub fn mmio(&self) -> &M {
        &self.mmio
    }

    /// Give up the accelerator, returning the bus handle. No registers are written; call
    /// `enable(false)` or `soft_reset` first if the core should be left idle.
    pub fn release(self) -> M {
        self.mmio
    }

    /// Enable or disable stream processing. Other CTRL bits are preserved.
    pub fn enable(&mut self, on: bool) {
        let ctrl = self.read_ctrl().for_rmw();
        self.write_ctrl(ctrl.with_enable(on));

        if on {
            self.dirty = true;
        }
    }

    /// Read the live ENABLE bit.
    pub fn is_enabled(&mut self) -> bool {
        self.read_ctrl().enable()
    }

    /// Clear the delay line and accumulators with a single CLEAR pulse. Coefficients and
    /// the ENABLE state are untouched.
    pub fn soft_reset(&mut self) {
        let ctrl = self.read_ctrl().for_rmw();
        self.pulse_clear(ctrl);

        // A running core refills its delay line immediately.
        if !ctrl.enable() {
            self.dirty = false;
        }
    }

    /// Report the current state. Performs one CTRL read.
    pub fn state(&mut self) -> FirState {
        if self.is_enabled() {
            FirState::Running
        } else if self.dirty {
            FirState::IdleDirty
        } else {
            FirState::IdleClear
        }
    }

    cfg_if! {
        if #[cfg(feature = "strict-range")] {
            /// Write one tap, as Q1.15.
            pub fn set_coeff(&mut self, index: u32, value: i16) -> Result<()> {
                if index >= self.num_taps {
                    return Err(Error::TapIndex);
                }
                self.write_tap(index, value);
                Ok(())
            }

            /// Read back one tap, as Q1.15.
            pub fn get_coeff(&mut self, index: u32) -> Result<i16> {
                if index >= self.num_taps {
                    return Err(Error::TapIndex);
                }
                Ok(self.read_tap(index))
            }
        } else {
            /// Write one tap, as Q1.15. Out-of-range indices are ignored.
            pub fn set_coeff(&mut self, index: u32, value: i16) {
                if index < self.num_taps {
                    self.write_tap(index, value);
                }
            }

            /// Read back one tap, as Q1.15. Out-of-range indices read as 0, without touching
            /// the bus.
            pub fn get_coeff(&mut self, index: u32) -> i16 {
                if index >= self.num_taps {
                    return 0;
                }
                self.read_tap(index)
            }
        }
    }

    /// Load a full coefficient set without glitching the output. The core is disabled for
    /// the duration of the update, so it never filters with a mix of old and new taps.
    ///
    /// Taps past the end of `coeffs` are zeroed; values past the tap count are dropped.
    /// If the core was enabled it's re-enabled afterwards. The delay line is left alone:
    /// call `soft_reset` before or after if a clean restart is wanted.
    pub fn load_config(&mut self, coeffs: &[i16]) {
        let ctrl = self.read_ctrl().for_rmw();
        let was_enabled = ctrl.enable();

        self.write_ctrl(ctrl.with_enable(false));

        let limit = coeffs.len().min(self.num_taps as usize) as u32;

        // Zero the unused tail first, so stale taps can't leak into the new response.
        for i in limit..self.num_taps {
            self.write_tap(i, 0);
        }

        for (i, &coeff) in (0..limit).zip(coeffs) {
            self.write_tap(i, coeff);
        }

        if was_enabled {
            self.enable(true);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "FIR: loaded {=u32} of {=u32} taps, enabled: {=bool}",
            limit,
            self.num_taps,
            was_enabled
        );
    }

    /// Read back up to `out.len()` taps, starting at tap 0. Returns the number read.
    pub fn read_config(&mut self, out: &mut [i16]) -> usize {
        let limit = out.len().min(self.num_taps as usize);

        for (i, coeff) in out[..limit].iter_mut().enumerate() {
            *coeff = self.read_tap(i as u32);
        }

        limit
    }

    /// Absolute bus address of coefficient slot `index`, if it exists.
    pub fn coeff_addr(&self, index: u32) -> Option<usize> {
        (index < self.num_taps).then(|| self.base + regs::coeff_offset(index))
    }

    fn read_ctrl(&mut self) -> Ctrl {
        Ctrl::from_bits(self.mmio.read32(self.base + regs::CTRL_OFFSET))
    }

    fn write_ctrl(&mut self, ctrl: Ctrl) {
        self.mmio.write32(self.base + regs::CTRL_OFFSET, ctrl.bits());
    }

    /// Drive CLEAR high then low around `ctrl`. The two stores are back to back; the
    /// accelerator latches the rising edge within one store interval.
    fn pulse_clear(&mut self, ctrl: Ctrl) {
        self.write_ctrl(ctrl.with_clear(true));
        #[cfg(bus_barrier)]
        cortex_m::asm::dsb();
        self.write_ctrl(ctrl.with_clear(false));
    }

    fn write_tap(&mut self, index: u32, value: i16) {
        let addr = self.base + regs::coeff_offset(index);
        self.mmio.write32(addr, Q15(value).to_word());
    }

    fn read_tap(&mut self, index: u32) -> i16 {
        let addr = self.base + regs::coeff_offset(index);
        Q15::from_word(self.mmio.read32(addr)).into()
    }
}
