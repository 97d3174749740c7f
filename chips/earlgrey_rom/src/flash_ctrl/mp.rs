// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Memory protection settings for information pages.

use tock_registers::LocalRegisterCopy;

use crate::registers::flash_ctrl_regs::INFO_PAGE_CFG;

type PageCfg = LocalRegisterCopy<u32, INFO_PAGE_CFG::Register>;

/// Read, program and erase permissions of an information page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub erase: bool,
}

impl Permissions {
    /// Returns `reg` with the page enabled and the read, program and erase
    /// enables set from `self`.
    ///
    /// The scrambling, ECC and high endurance bits, and any bit outside the
    /// known fields, are carried over unchanged.
    pub fn apply(self, reg: u32) -> u32 {
        let mut cfg = PageCfg::new(reg);
        cfg.modify(
            INFO_PAGE_CFG::EN::SET
                + INFO_PAGE_CFG::RD_EN.val(u32::from(self.read))
                + INFO_PAGE_CFG::PROG_EN.val(u32::from(self.write))
                + INFO_PAGE_CFG::ERASE_EN.val(u32::from(self.erase)),
        );
        cfg.get()
    }
}
