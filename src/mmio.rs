//! Word-sized memory-mapped IO. The driver only ever talks to the accelerator through
//! this trait, so every register access is exactly one 32-bit load or store.

use core::ptr;

/// A 32-bit memory-mapped bus. Implementations must not elide, merge, cache or reorder
/// accesses: each call is one observable bus transaction, in program order.
pub trait Mmio {
    /// Load the 32-bit word at `addr`.
    fn read32(&mut self, addr: usize) -> u32;

    /// Store a 32-bit word to `addr`.
    fn write32(&mut self, addr: usize, value: u32);
}

impl<M: Mmio + ?Sized> Mmio for &mut M {
    #[inline(always)]
    fn read32(&mut self, addr: usize) -> u32 {
        (**self).read32(addr)
    }

    #[inline(always)]
    fn write32(&mut self, addr: usize, value: u32) {
        (**self).write32(addr, value)
    }
}

/// Direct volatile access to physical addresses. Use this on targets where the
/// accelerator's register window is identity-mapped, eg a Cortex-M soft core next to the
/// FPGA fabric.
pub struct VolatileMmio {
    _private: (),
}

impl VolatileMmio {
    /// Create the bus handle.
    ///
    /// # Safety
    ///
    /// Every address later passed to `read32` or `write32` must be a word-aligned,
    /// device-mapped location. A register window must be owned by at most one driver
    /// instance at a time.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Mmio for VolatileMmio {
    #[inline(always)]
    fn read32(&mut self, addr: usize) -> u32 {
        // SAFETY: address validity is the contract of `VolatileMmio::new`.
        unsafe { ptr::read_volatile(addr as *const u32) }
    }

    #[inline(always)]
    fn write32(&mut self, addr: usize, value: u32) {
        // SAFETY: address validity is the contract of `VolatileMmio::new`.
        unsafe { ptr::write_volatile(addr as *mut u32, value) }
    }
}
