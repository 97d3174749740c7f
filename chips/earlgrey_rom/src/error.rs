// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Flash controller error codes.

/// Errors reported by the flash controller driver.
///
/// Each variant means the controller raised `OP_STATUS.ERR` after the named
/// operation completed. Causes within an operation (access denied, ECC,
/// alignment) are not distinguished here; the controller's fault registers
/// hold the details.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum FlashCtrlError {
    /// Read from the data partition failed
    DataRead = 1,
    /// Read from an information partition failed
    InfoRead = 2,
    /// Program of the data partition failed
    DataWrite = 3,
    /// Program of an information partition failed
    InfoWrite = 4,
    /// Erase in the data partition failed
    DataErase = 5,
    /// Erase in an information partition failed
    InfoErase = 6,
}

impl From<FlashCtrlError> for u32 {
    fn from(err: FlashCtrlError) -> u32 {
        err as u32
    }
}
