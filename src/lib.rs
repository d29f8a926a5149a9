//! Bare-metal driver for a memory-mapped stereo FIR filter accelerator.
//!
//! The accelerator sits on a 32-bit control bus and exposes one control register and one
//! coefficient slot per tap. This crate provides:
//!
//! - [`mmio`]: the bus abstraction. Supply your own [`Mmio`] implementation, or use
//!   [`VolatileMmio`] where the register window is directly addressable.
//! - [`regs`]: the register map.
//! - [`q15`]: Q1.15 coefficient encoding.
//! - [`fir`]: the driver itself; see [`FirStereo`].
//!
//! Example:
//!
//! ```ignore
//! use fir_stereo::{FirStereo, VolatileMmio};
//!
//! let mmio = unsafe { VolatileMmio::new() };
//! let mut fir = FirStereo::init(mmio, 0x4000_0000, 32);
//!
//! fir.load_config(&LOWPASS_TAPS);
//! fir.soft_reset();
//! fir.enable(true);
//! ```

#![no_std]

pub mod error;
pub mod fir;
pub mod mmio;
pub mod q15;
pub mod regs;

pub use error::{Error, Result};
pub use fir::{FirState, FirStereo};
pub use mmio::{Mmio, VolatileMmio};
pub use q15::Q15;
