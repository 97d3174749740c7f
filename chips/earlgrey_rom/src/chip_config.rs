// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Chip specific configuration.
//!
//! Base addresses and flash geometry are compile-time properties of a chip.
//! They are collected into a [`FlashCtrlConfig`] value that is handed to the
//! driver at construction, so the driver itself holds no global addresses and
//! can run against a simulated register file with a reduced geometry.

use crate::registers::flash_ctrl_regs::{
    FLASH_CTRL_PARAM_BYTES_PER_BANK, FLASH_CTRL_PARAM_BYTES_PER_PAGE,
    FLASH_CTRL_PARAM_REG_BUS_PGM_RES_BYTES,
};

/// Base addresses and geometry of a flash controller instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlashCtrlConfig {
    /// Base address of the flash_ctrl register block.
    pub reg_base: u32,
    /// Base address of the flash memory.
    pub mem_base: u32,
    /// Size of one flash page in bytes.
    pub bytes_per_page: u32,
    /// Size of one flash bank in bytes.
    pub bytes_per_bank: u32,
    /// Size of the program window in bytes. A single program operation must
    /// not cross a window boundary.
    pub prog_window_bytes: u32,
}

impl FlashCtrlConfig {
    /// Number of 32-bit words in one program window.
    pub const fn window_word_count(&self) -> u32 {
        self.prog_window_bytes / (u32::BITS / 8)
    }

    /// Absolute address of the register at `offset`.
    pub(crate) const fn reg(&self, offset: u32) -> u32 {
        self.reg_base + offset
    }
}

/// Earlgrey configuration based on the target device.
pub trait EarlGreyConfig {
    /// Identifier for the platform. This is useful for debugging to confirm the
    /// correct configuration of the chip is being used.
    const NAME: &'static str;

    /// Flash controller addresses and geometry.
    const FLASH_CTRL: FlashCtrlConfig;
}

/// Earlgrey silicon.
pub enum EarlGrey {}

impl EarlGreyConfig for EarlGrey {
    const NAME: &'static str = "earlgrey";

    const FLASH_CTRL: FlashCtrlConfig = FlashCtrlConfig {
        reg_base: 0x4100_0000,
        mem_base: 0x2000_0000,
        bytes_per_page: FLASH_CTRL_PARAM_BYTES_PER_PAGE,
        bytes_per_bank: FLASH_CTRL_PARAM_BYTES_PER_BANK,
        prog_window_bytes: FLASH_CTRL_PARAM_REG_BUS_PGM_RES_BYTES,
    };
}
