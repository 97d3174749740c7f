// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Register access primitives for ROM drivers.
//!
//! ROM drivers never dereference peripheral addresses directly. Every access
//! goes through one of two interfaces:
//!
//! - [`AbsMmio`]: plain 32-bit loads and stores to an absolute address.
//! - [`SecMmio`]: accesses to redundancy-protected configuration registers.
//!   Shadowed writes are committed to both the primary and the shadow copy of
//!   the register and then verified.
//!
//! [`Mmio`] implements both against real hardware. Both traits take `&self`
//! so that a simulated register file with interior mutability can stand in
//! for the peripheral in host tests.
//!
//! ```rust
//! use rom_mmio::{AbsMmio, Mmio};
//!
//! fn enable(mmio: &impl AbsMmio, reg: u32) {
//!     mmio.write32(reg, 1);
//! }
//! # let _ = |mmio: &Mmio| enable(mmio, 0x4100_0018);
//! ```

#![no_std]

use core::ptr;

/// Plain 32-bit register access.
///
/// Accesses to FIFO ports may stall the bus while the hardware queue is full
/// (writes) or empty (reads). Implementations must not add buffering or retry
/// on top of that.
pub trait AbsMmio {
    /// Reads the 32-bit word at `addr`.
    fn read32(&self, addr: u32) -> u32;

    /// Writes `value` to the 32-bit word at `addr`.
    fn write32(&self, addr: u32, value: u32);
}

/// Access to redundancy-protected configuration registers.
pub trait SecMmio {
    /// Reads the 32-bit register at `addr`.
    fn sec_read32(&self, addr: u32) -> u32;

    /// Writes `value` to the register at `addr` and verifies the write.
    fn sec_write32(&self, addr: u32, value: u32);

    /// Writes `value` to the shadowed register at `addr`.
    ///
    /// Shadowed registers latch a value only after it has been written twice.
    /// A read-back mismatch is a fatal fault and never returns.
    fn sec_write32_shadowed(&self, addr: u32, value: u32);
}

/// Volatile access to the memory-mapped register space of the running chip.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mmio;

impl AbsMmio for Mmio {
    #[inline]
    fn read32(&self, addr: u32) -> u32 {
        // Safety: `addr` is a word-aligned register address of a peripheral
        // present on the chip.
        unsafe { ptr::read_volatile(addr as usize as *const u32) }
    }

    #[inline]
    fn write32(&self, addr: u32, value: u32) {
        // Safety: see `read32`.
        unsafe { ptr::write_volatile(addr as usize as *mut u32, value) }
    }
}

impl SecMmio for Mmio {
    #[inline]
    fn sec_read32(&self, addr: u32) -> u32 {
        self.read32(addr)
    }

    fn sec_write32(&self, addr: u32, value: u32) {
        self.write32(addr, value);
        verify(addr, value, self.read32(addr));
    }

    fn sec_write32_shadowed(&self, addr: u32, value: u32) {
        self.write32(addr, value);
        self.write32(addr, value);
        verify(addr, value, self.read32(addr));
    }
}

#[inline(never)]
fn verify(addr: u32, expected: u32, actual: u32) {
    if expected != actual {
        panic!(
            "register {:#010x} read back {:#010x}, expected {:#010x}",
            addr, actual, expected
        );
    }
}
