// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Simulated flash controller for host tests.

use core::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

use rom_mmio::{AbsMmio, SecMmio};
use tock_registers::LocalRegisterCopy;

use super::info_page::{EraseType, Partition};
use super::transaction::{Op, WORD_BYTES};
use crate::chip_config::FlashCtrlConfig;
use crate::registers::flash_ctrl_regs::{
    CONTROL, FLASH_CTRL_ADDR_REG_OFFSET, FLASH_CTRL_CONTROL_REG_OFFSET,
    FLASH_CTRL_INIT_REG_OFFSET, FLASH_CTRL_OP_STATUS_REG_OFFSET, FLASH_CTRL_PARAM_MAX_FIFO_DEPTH,
    FLASH_CTRL_PARAM_REG_NUM_BANKS, FLASH_CTRL_PROG_FIFO_REG_OFFSET,
    FLASH_CTRL_RD_FIFO_REG_OFFSET, FLASH_CTRL_STATUS_REG_OFFSET, OP_STATUS, STATUS,
};

pub(crate) const ERASED: u32 = 0xffff_ffff;

/// Small geometry: 16-word pages, 16 pages per bank and a 2-word program
/// window.
pub(crate) const TEST_CONFIG: FlashCtrlConfig = FlashCtrlConfig {
    reg_base: 0x4100_0000,
    mem_base: 0x2000_0000,
    bytes_per_page: 0x40,
    bytes_per_bank: 0x400,
    prog_window_bytes: 8,
};

/// A transaction decoded from a CONTROL write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub addr: u32,
    pub op: Op,
    pub partition: Partition,
    pub erase_type: EraseType,
    pub word_count: u32,
}

enum State {
    Idle,
    Program {
        partition: Partition,
        addr: u32,
        remaining: u32,
        err: bool,
    },
}

pub(crate) struct FakeFlashCtrl {
    config: FlashCtrlConfig,
    regs: RefCell<BTreeMap<u32, u32>>,
    /// Programmed words keyed by partition and byte offset. Missing words read
    /// as erased.
    flash: RefCell<BTreeMap<(u32, u32), u32>>,
    rd_fifo: RefCell<VecDeque<u32>>,
    state: RefCell<State>,
    op_status: Cell<u32>,
    busy_polls: Cell<u32>,
    polls_left: Cell<u32>,
    init_wip: Cell<bool>,
    fail_transaction: Cell<Option<usize>>,
    transactions: RefCell<Vec<Transaction>>,
    writes: RefCell<Vec<(u32, u32)>>,
    sec_writes: RefCell<Vec<(u32, u32)>>,
}

impl FakeFlashCtrl {
    pub fn new(config: FlashCtrlConfig) -> FakeFlashCtrl {
        FakeFlashCtrl {
            config,
            regs: RefCell::new(BTreeMap::new()),
            flash: RefCell::new(BTreeMap::new()),
            rd_fifo: RefCell::new(VecDeque::new()),
            state: RefCell::new(State::Idle),
            op_status: Cell::new(0),
            busy_polls: Cell::new(0),
            polls_left: Cell::new(0),
            init_wip: Cell::new(false),
            fail_transaction: Cell::new(None),
            transactions: RefCell::new(Vec::new()),
            writes: RefCell::new(Vec::new()),
            sec_writes: RefCell::new(Vec::new()),
        }
    }

    /// Number of OP_STATUS reads that report busy before DONE is visible.
    pub fn set_busy_polls(&self, polls: u32) {
        self.busy_polls.set(polls);
    }

    /// Flags an error on completion of the `index`th transaction.
    pub fn fail_transaction(&self, index: usize) {
        self.fail_transaction.set(Some(index));
    }

    pub fn set_reg(&self, addr: u32, value: u32) {
        self.regs.borrow_mut().insert(addr, value);
    }

    pub fn reg(&self, addr: u32) -> u32 {
        self.regs.borrow().get(&addr).copied().unwrap_or(0)
    }

    pub fn op_status(&self) -> u32 {
        self.op_status.get()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.borrow().clone()
    }

    /// Plain register writes in issue order.
    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.writes.borrow().clone()
    }

    /// Secure register writes in issue order.
    pub fn sec_writes(&self) -> Vec<(u32, u32)> {
        self.sec_writes.borrow().clone()
    }

    pub fn clear_logs(&self) {
        self.transactions.borrow_mut().clear();
        self.writes.borrow_mut().clear();
        self.sec_writes.borrow_mut().clear();
    }

    /// Word stored at `addr` in `partition`.
    pub fn word(&self, partition: Partition, addr: u32) -> u32 {
        let key = (partition as u32, self.offset(addr));
        self.flash.borrow().get(&key).copied().unwrap_or(ERASED)
    }

    /// ADDR only holds an offset into the flash, higher address bits are
    /// dropped.
    fn offset(&self, addr: u32) -> u32 {
        let size = FLASH_CTRL_PARAM_REG_NUM_BANKS * self.config.bytes_per_bank;
        (addr % size) & !(WORD_BYTES - 1)
    }

    fn complete(&self, err: bool) {
        let mut op_status = LocalRegisterCopy::<u32, OP_STATUS::Register>::new(0);
        op_status.write(OP_STATUS::DONE::SET + OP_STATUS::ERR.val(u32::from(err)));
        self.op_status.set(op_status.get());
        self.polls_left.set(self.busy_polls.get());
    }

    fn start(&self, control: u32) {
        let control = LocalRegisterCopy::<u32, CONTROL::Register>::new(control);
        if !control.is_set(CONTROL::START) {
            return;
        }
        assert!(
            matches!(*self.state.borrow(), State::Idle),
            "transaction started while another is running"
        );
        let op = match control.read(CONTROL::OP) {
            0 => Op::Read,
            1 => Op::Prog,
            2 => Op::Erase,
            op => panic!("invalid CONTROL.OP {}", op),
        };
        let partition = Partition::from_fields(
            control.is_set(CONTROL::PARTITION_SEL),
            control.read(CONTROL::INFO_SEL),
        )
        .expect("invalid partition");
        let erase_type = if control.is_set(CONTROL::ERASE_SEL) {
            EraseType::Bank
        } else {
            EraseType::Page
        };
        let transaction = Transaction {
            addr: self.reg(self.config.reg(FLASH_CTRL_ADDR_REG_OFFSET)),
            op,
            partition,
            erase_type,
            word_count: control.read(CONTROL::NUM) + 1,
        };
        let index = {
            let mut transactions = self.transactions.borrow_mut();
            transactions.push(transaction);
            transactions.len() - 1
        };
        let err = self.fail_transaction.get() == Some(index);

        match op {
            Op::Read => {
                let mut rd_fifo = self.rd_fifo.borrow_mut();
                for i in 0..transaction.word_count {
                    rd_fifo.push_back(self.word(partition, transaction.addr + i * WORD_BYTES));
                }
                self.complete(err);
            }
            Op::Prog => {
                let window_bytes = self.config.prog_window_bytes;
                let first = self.offset(transaction.addr);
                let last = first + (transaction.word_count - 1) * WORD_BYTES;
                *self.state.borrow_mut() = State::Program {
                    partition,
                    addr: transaction.addr,
                    remaining: transaction.word_count,
                    err: err || first / window_bytes != last / window_bytes,
                };
            }
            Op::Erase => {
                let size = match erase_type {
                    EraseType::Page => self.config.bytes_per_page,
                    EraseType::Bank => self.config.bytes_per_bank,
                };
                let start = self.offset(transaction.addr) / size * size;
                self.flash.borrow_mut().retain(|&(p, offset), _| {
                    p != partition as u32 || offset < start || offset >= start + size
                });
                self.complete(err);
            }
        }
    }

    fn program(&self, value: u32) {
        let mut state = self.state.borrow_mut();
        let State::Program {
            partition,
            addr,
            remaining,
            err,
        } = &mut *state
        else {
            panic!("program FIFO written without a program operation");
        };
        if !*err {
            let key = (*partition as u32, self.offset(*addr));
            let mut flash = self.flash.borrow_mut();
            let word = flash.entry(key).or_insert(ERASED);
            // Programming can only clear bits.
            *word &= value;
        }
        *addr += WORD_BYTES;
        *remaining -= 1;
        if *remaining == 0 {
            let err = *err;
            *state = State::Idle;
            drop(state);
            self.complete(err);
        }
    }

    fn status(&self) -> u32 {
        let rd_len = self.rd_fifo.borrow().len() as u32;
        let mut status = LocalRegisterCopy::<u32, STATUS::Register>::new(0);
        status.write(
            STATUS::RD_EMPTY.val(u32::from(rd_len == 0))
                + STATUS::RD_FULL.val(u32::from(rd_len >= FLASH_CTRL_PARAM_MAX_FIFO_DEPTH))
                + STATUS::PROG_EMPTY::SET
                + STATUS::INIT_WIP.val(u32::from(self.init_wip.replace(false))),
        );
        status.get()
    }
}

impl AbsMmio for FakeFlashCtrl {
    fn read32(&self, addr: u32) -> u32 {
        match addr - self.config.reg_base {
            FLASH_CTRL_RD_FIFO_REG_OFFSET => self
                .rd_fifo
                .borrow_mut()
                .pop_front()
                .expect("read FIFO underflow"),
            FLASH_CTRL_OP_STATUS_REG_OFFSET => {
                if self.polls_left.get() > 0 {
                    self.polls_left.set(self.polls_left.get() - 1);
                    0
                } else {
                    self.op_status.get()
                }
            }
            FLASH_CTRL_STATUS_REG_OFFSET => self.status(),
            _ => self.reg(addr),
        }
    }

    fn write32(&self, addr: u32, value: u32) {
        self.writes.borrow_mut().push((addr, value));
        match addr - self.config.reg_base {
            FLASH_CTRL_CONTROL_REG_OFFSET => self.start(value),
            FLASH_CTRL_PROG_FIFO_REG_OFFSET => self.program(value),
            FLASH_CTRL_OP_STATUS_REG_OFFSET => self.op_status.set(value),
            FLASH_CTRL_INIT_REG_OFFSET => {
                self.init_wip.set(true);
                self.set_reg(addr, value);
            }
            _ => self.set_reg(addr, value),
        }
    }
}

impl SecMmio for FakeFlashCtrl {
    fn sec_read32(&self, addr: u32) -> u32 {
        self.reg(addr)
    }

    fn sec_write32(&self, addr: u32, value: u32) {
        self.sec_writes.borrow_mut().push((addr, value));
        self.set_reg(addr, value);
    }

    fn sec_write32_shadowed(&self, addr: u32, value: u32) {
        self.sec_write32(addr, value);
    }
}
