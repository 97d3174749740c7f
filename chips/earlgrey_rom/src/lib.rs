// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Flash controller support for the EarlGrey boot ROM.

#![no_std]
#![crate_name = "earlgrey_rom"]
#![crate_type = "rlib"]

#[cfg(test)]
extern crate std;

#[macro_use]
mod logging;

pub mod chip_config;
pub mod error;
pub mod flash_ctrl;
pub mod registers;
