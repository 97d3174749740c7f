// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Flash controller driver for the ROM.
//!
//! Every operation is a single hardware transaction, or for programs one
//! transaction per program window, and runs to completion before returning:
//!
//! 1. The address and then the CONTROL register are written. Writing CONTROL
//!    with `START` set launches the operation.
//! 2. For reads and programs, words are moved through the read or program
//!    FIFO one register access at a time. The bus stalls while the FIFO is
//!    empty (read) or full (program).
//! 3. `OP_STATUS` is polled until `DONE` is set, then cleared. `ERR` turns
//!    into the error code of the operation that was running.
//!
//! There is no timeout. A controller that never signals completion hangs the
//! caller. The driver keeps no state between calls and must only be used from
//! one execution context at a time.
//!
//! ```rust,ignore
//! use earlgrey_rom::chip_config::{EarlGrey, EarlGreyConfig};
//! use earlgrey_rom::flash_ctrl::{FlashCtrl, InfoPage};
//! use rom_mmio::Mmio;
//!
//! let flash = FlashCtrl::new(&Mmio, EarlGrey::FLASH_CTRL);
//! flash.init();
//! let mut boot_data = [0u32; 8];
//! flash.info_read(InfoPage::BOOT_DATA_0, 0, &mut boot_data)?;
//! ```

mod info_page;
mod mp;
mod transaction;

#[cfg(test)]
mod fake;

use rom_mmio::{AbsMmio, SecMmio};
use tock_registers::LocalRegisterCopy;

use crate::chip_config::FlashCtrlConfig;
use crate::error::FlashCtrlError;
use crate::registers::flash_ctrl_regs::{
    FLASH_CTRL_ADDR_REG_OFFSET, FLASH_CTRL_CONTROL_REG_OFFSET, FLASH_CTRL_EXEC_REG_OFFSET,
    FLASH_CTRL_INIT_REG_OFFSET, FLASH_CTRL_OP_STATUS_REG_OFFSET, FLASH_CTRL_PARAM_EXEC_EN,
    FLASH_CTRL_PROG_FIFO_REG_OFFSET, FLASH_CTRL_RD_FIFO_REG_OFFSET, FLASH_CTRL_STATUS_REG_OFFSET,
    INFO_REGWEN, INIT, OP_STATUS, STATUS,
};
use transaction::{Op, TransactionParams, MAX_WORD_COUNT, WORD_BYTES};

pub use info_page::{EraseType, InfoPage, Partition};
pub use mp::Permissions;
pub use transaction::{ProgramWindow, ProgramWindows};

/// Snapshot of the controller's STATUS register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// Read FIFO is full.
    pub rd_full: bool,
    /// Read FIFO is empty.
    pub rd_empty: bool,
    /// Program FIFO is full.
    pub prog_full: bool,
    /// Program FIFO is empty.
    pub prog_empty: bool,
    /// The controller is still initializing.
    pub init_wip: bool,
}

impl From<u32> for Status {
    fn from(value: u32) -> Status {
        let reg = LocalRegisterCopy::<u32, STATUS::Register>::new(value);
        Status {
            rd_full: reg.is_set(STATUS::RD_FULL),
            rd_empty: reg.is_set(STATUS::RD_EMPTY),
            prog_full: reg.is_set(STATUS::PROG_FULL),
            prog_empty: reg.is_set(STATUS::PROG_EMPTY),
            init_wip: reg.is_set(STATUS::INIT_WIP),
        }
    }
}

/// Flash controller driver.
///
/// Holds no state besides the register access primitives and the chip
/// configuration, every operation runs to completion before returning.
pub struct FlashCtrl<'a, M: AbsMmio + SecMmio> {
    mmio: &'a M,
    config: FlashCtrlConfig,
}

impl<'a, M: AbsMmio + SecMmio> FlashCtrl<'a, M> {
    /// Creates a driver for the controller described by `config`.
    pub const fn new(mmio: &'a M, config: FlashCtrlConfig) -> FlashCtrl<'a, M> {
        FlashCtrl { mmio, config }
    }

    /// Addresses and geometry the driver was created with.
    pub fn config(&self) -> &FlashCtrlConfig {
        &self.config
    }

    /// Kicks off controller initialization.
    pub fn init(&self) {
        debug!("flash_ctrl: init");
        let mut init = LocalRegisterCopy::<u32, INIT::Register>::new(0);
        init.write(INIT::VAL::SET);
        self.mmio
            .write32(self.config.reg(FLASH_CTRL_INIT_REG_OFFSET), init.get());
    }

    /// Reads the FIFO and initialization status of the controller.
    pub fn status(&self) -> Status {
        Status::from(self.mmio.read32(self.config.reg(FLASH_CTRL_STATUS_REG_OFFSET)))
    }

    /// Reads `data.len()` words starting at `addr` in the data partition.
    pub fn data_read(&self, addr: u32, data: &mut [u32]) -> Result<(), FlashCtrlError> {
        self.read(addr, Partition::Data, data, FlashCtrlError::DataRead)
    }

    /// Reads `data.len()` words starting `offset` bytes into `page`.
    pub fn info_read(
        &self,
        page: InfoPage,
        offset: u32,
        data: &mut [u32],
    ) -> Result<(), FlashCtrlError> {
        let addr = page.addr(&self.config) + offset;
        self.read(addr, page.partition(), data, FlashCtrlError::InfoRead)
    }

    /// Programs `data` starting at `addr` in the data partition.
    ///
    /// On failure, windows programmed before the failing one stay programmed.
    pub fn data_write(&self, addr: u32, data: &[u32]) -> Result<(), FlashCtrlError> {
        self.write(addr, Partition::Data, data, FlashCtrlError::DataWrite)
    }

    /// Programs `data` starting `offset` bytes into `page`.
    pub fn info_write(
        &self,
        page: InfoPage,
        offset: u32,
        data: &[u32],
    ) -> Result<(), FlashCtrlError> {
        let addr = page.addr(&self.config) + offset;
        self.write(addr, page.partition(), data, FlashCtrlError::InfoWrite)
    }

    /// Erases the page or bank containing `addr` in the data partition.
    pub fn data_erase(&self, addr: u32, erase_type: EraseType) -> Result<(), FlashCtrlError> {
        self.erase(addr, Partition::Data, erase_type, FlashCtrlError::DataErase)
    }

    /// Erases `page`, or with [`EraseType::Bank`] every page of its info
    /// partition in the same bank.
    pub fn info_erase(&self, page: InfoPage, erase_type: EraseType) -> Result<(), FlashCtrlError> {
        self.erase(
            page.addr(&self.config),
            page.partition(),
            erase_type,
            FlashCtrlError::InfoErase,
        )
    }

    /// Allows or forbids instruction fetches from the data partition.
    pub fn exec_enable(&self, enable: bool) {
        debug!("flash_ctrl: exec {}", enable);
        let value = if enable { FLASH_CTRL_PARAM_EXEC_EN } else { 0 };
        self.mmio
            .write32(self.config.reg(FLASH_CTRL_EXEC_REG_OFFSET), value);
    }

    /// Enables `page` and sets its read, program and erase permissions.
    ///
    /// Scrambling, ECC and high endurance settings of the page are kept.
    pub fn info_set_permissions(&self, page: InfoPage, perms: Permissions) {
        let addr = page.cfg_regs(&self.config).cfg_addr;
        let reg = perms.apply(self.mmio.sec_read32(addr));
        debug!("flash_ctrl: page {} cfg {:#x}", page, reg);
        self.mmio.sec_write32_shadowed(addr, reg);
    }

    /// Locks the configuration of `page` until the next reset.
    pub fn info_cfg_lock(&self, page: InfoPage) {
        let addr = page.cfg_regs(&self.config).cfg_wen_addr;
        let mut regwen = LocalRegisterCopy::<u32, INFO_REGWEN::Register>::new(0);
        regwen.write(INFO_REGWEN::EN::LOCKED);
        debug!("flash_ctrl: lock page {}", page);
        self.mmio.sec_write32(addr, regwen.get());
    }

    /// Reads `data`, one transaction per [`MAX_WORD_COUNT`] words.
    fn read(
        &self,
        addr: u32,
        partition: Partition,
        data: &mut [u32],
        error: FlashCtrlError,
    ) -> Result<(), FlashCtrlError> {
        let mut addr = addr;
        for chunk in data.chunks_mut(MAX_WORD_COUNT as usize) {
            self.transaction_start(TransactionParams {
                addr,
                op: Op::Read,
                partition,
                word_count: chunk.len() as u32,
                // Does not apply to read transactions.
                erase_type: EraseType::Page,
            });
            self.fifo_read(chunk);
            self.wait_for_done(error)?;
            addr += chunk.len() as u32 * WORD_BYTES;
        }
        Ok(())
    }

    /// Programs `data`, one transaction per program window.
    fn write(
        &self,
        addr: u32,
        partition: Partition,
        data: &[u32],
        error: FlashCtrlError,
    ) -> Result<(), FlashCtrlError> {
        let windows = ProgramWindows::new(addr, data.len() as u32, self.config.window_word_count());
        for window in windows {
            trace!(
                "flash_ctrl: program {:#x} words {}",
                window.addr,
                window.word_count()
            );
            self.transaction_start(TransactionParams {
                addr: window.addr,
                op: Op::Prog,
                partition,
                word_count: window.word_count(),
                // Does not apply to program transactions.
                erase_type: EraseType::Page,
            });
            self.fifo_write(&data[window.words]);
            self.wait_for_done(error)?;
        }
        Ok(())
    }

    fn erase(
        &self,
        addr: u32,
        partition: Partition,
        erase_type: EraseType,
        error: FlashCtrlError,
    ) -> Result<(), FlashCtrlError> {
        self.transaction_start(TransactionParams {
            addr,
            op: Op::Erase,
            erase_type,
            partition,
            // Does not apply to erase transactions.
            word_count: 1,
        });
        self.wait_for_done(error)
    }

    /// Writes the address, then starts the transaction by writing CONTROL.
    ///
    /// The previous transaction must have completed.
    fn transaction_start(&self, params: TransactionParams) {
        let control = params.control();
        trace!(
            "flash_ctrl: start {} addr {:#x} control {:#x}",
            params.op,
            params.addr,
            control
        );
        self.mmio
            .write32(self.config.reg(FLASH_CTRL_ADDR_REG_OFFSET), params.addr);
        self.mmio
            .write32(self.config.reg(FLASH_CTRL_CONTROL_REG_OFFSET), control);
    }

    fn fifo_read(&self, data: &mut [u32]) {
        let fifo = self.config.reg(FLASH_CTRL_RD_FIFO_REG_OFFSET);
        for word in data.iter_mut() {
            *word = self.mmio.read32(fifo);
        }
    }

    fn fifo_write(&self, data: &[u32]) {
        let fifo = self.config.reg(FLASH_CTRL_PROG_FIFO_REG_OFFSET);
        for &word in data {
            self.mmio.write32(fifo, word);
        }
    }

    /// Spins until the running transaction is done, then clears OP_STATUS.
    ///
    /// Returns `error` if the controller flagged an error.
    fn wait_for_done(&self, error: FlashCtrlError) -> Result<(), FlashCtrlError> {
        let op_status_addr = self.config.reg(FLASH_CTRL_OP_STATUS_REG_OFFSET);
        let op_status = loop {
            let op_status = LocalRegisterCopy::<u32, OP_STATUS::Register>::new(
                self.mmio.read32(op_status_addr),
            );
            if op_status.is_set(OP_STATUS::DONE) {
                break op_status;
            }
            core::hint::spin_loop();
        };
        self.mmio.write32(op_status_addr, 0);

        if op_status.is_set(OP_STATUS::ERR) {
            warn!("flash_ctrl: {} failed", error);
            return Err(error);
        }
        Ok(())
    }
}
