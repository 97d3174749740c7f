// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Transaction descriptors and program window splitting.

use core::ops::Range;

use tock_registers::LocalRegisterCopy;

use super::info_page::{EraseType, Partition};
use crate::registers::flash_ctrl_regs::CONTROL;

pub(crate) const WORD_BYTES: u32 = u32::BITS / 8;

/// Largest word count a single read or program transaction can carry.
pub(crate) const MAX_WORD_COUNT: u32 = 1 << CONTROL::NUM.mask.count_ones();

/// Flash operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum Op {
    Read,
    Prog,
    Erase,
}

/// Parameters of a single flash transaction.
///
/// Built fresh for every transaction and consumed when it is started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TransactionParams {
    /// Full byte address. The controller truncates it to a word for reads and
    /// programs, to a page for page erases and to a bank for bank erases.
    pub addr: u32,
    pub op: Op,
    /// Only applies to erase operations.
    pub erase_type: EraseType,
    pub partition: Partition,
    /// Number of 32-bit words. Only applies to read and program operations.
    pub word_count: u32,
}

impl TransactionParams {
    /// CONTROL register value that starts this transaction.
    pub fn control(&self) -> u32 {
        debug_assert!(self.word_count > 0 && self.word_count <= MAX_WORD_COUNT);
        let op = match self.op {
            Op::Read => CONTROL::OP::READ,
            Op::Prog => CONTROL::OP::PROG,
            Op::Erase => CONTROL::OP::ERASE,
        };
        let erase_sel = match self.erase_type {
            EraseType::Page => CONTROL::ERASE_SEL::PAGE,
            EraseType::Bank => CONTROL::ERASE_SEL::BANK,
        };
        let mut reg = LocalRegisterCopy::<u32, CONTROL::Register>::new(0);
        // NUM holds the word count minus one.
        reg.write(
            CONTROL::START::SET
                + op
                + CONTROL::PARTITION_SEL.val(u32::from(self.partition.is_info()))
                + CONTROL::INFO_SEL.val(self.partition.info_type())
                + erase_sel
                + CONTROL::NUM.val(self.word_count - 1),
        );
        reg.get()
    }
}

/// One program operation produced by [`ProgramWindows`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramWindow {
    /// Byte address of the first word.
    pub addr: u32,
    /// Indices of the words to program, relative to the start of the request.
    pub words: Range<usize>,
}

impl ProgramWindow {
    pub fn word_count(&self) -> u32 {
        self.words.len() as u32
    }
}

/// Splits a program request so that no operation crosses a program window
/// boundary.
///
/// The first window holds the words between `addr` and the next boundary, or
/// the whole request if it is shorter. Every later window is full until the
/// request runs out.
#[derive(Clone, Debug)]
pub struct ProgramWindows {
    addr: u32,
    next_word: usize,
    remaining: u32,
    window_word_count: u32,
    available: u32,
}

impl ProgramWindows {
    pub fn new(addr: u32, word_count: u32, window_word_count: u32) -> ProgramWindows {
        ProgramWindows {
            addr,
            next_word: 0,
            remaining: word_count,
            window_word_count,
            available: window_word_count - (addr / WORD_BYTES) % window_word_count,
        }
    }
}

impl Iterator for ProgramWindows {
    type Item = ProgramWindow;

    fn next(&mut self) -> Option<ProgramWindow> {
        if self.remaining == 0 {
            return None;
        }
        let word_count = self.remaining.min(self.available);
        let window = ProgramWindow {
            addr: self.addr,
            words: self.next_word..self.next_word + word_count as usize,
        };
        self.addr += word_count * WORD_BYTES;
        self.next_word += word_count as usize;
        self.remaining -= word_count;
        self.available = self.window_word_count;
        Some(window)
    }
}
