// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Partitions, information pages and their addresses.

use tock_registers::{register_bitfields, LocalRegisterCopy};

use crate::chip_config::FlashCtrlConfig;
use crate::registers::flash_ctrl_regs::{
    FLASH_CTRL_BANK0_INFO0_PAGE_CFG_SHADOWED_0_REG_OFFSET,
    FLASH_CTRL_BANK0_INFO0_REGWEN_0_REG_OFFSET, FLASH_CTRL_BANK0_INFO1_PAGE_CFG_SHADOWED_REG_OFFSET,
    FLASH_CTRL_BANK0_INFO1_REGWEN_REG_OFFSET, FLASH_CTRL_BANK0_INFO2_PAGE_CFG_SHADOWED_0_REG_OFFSET,
    FLASH_CTRL_BANK0_INFO2_REGWEN_0_REG_OFFSET,
    FLASH_CTRL_BANK1_INFO0_PAGE_CFG_SHADOWED_0_REG_OFFSET,
    FLASH_CTRL_BANK1_INFO0_REGWEN_0_REG_OFFSET, FLASH_CTRL_PARAM_NUM_INFOS0,
    FLASH_CTRL_PARAM_NUM_INFOS1, FLASH_CTRL_PARAM_NUM_INFOS2,
};

// Software encoding of a partition. Bit 0 becomes CONTROL.PARTITION_SEL and
// the info type becomes CONTROL.INFO_SEL.
register_bitfields![u32,
    PARTITION [
        IS_INFO OFFSET(0) NUMBITS(1) [],
        INFO_TYPE OFFSET(1) NUMBITS(2) [],
    ],
];

/// A flash partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Partition {
    /// Data partition
    Data = 0b000,
    /// Information partition of type 0
    Info0 = 0b001,
    /// Information partition of type 1
    Info1 = 0b011,
    /// Information partition of type 2
    Info2 = 0b101,
}

// `Partition >> 1` must give the CONTROL.INFO_SEL value.
const _: () = assert!(Partition::Data as u32 == 0);
const _: () = assert!(Partition::Info0 as u32 >> 1 == 0);
const _: () = assert!(Partition::Info1 as u32 >> 1 == 1);
const _: () = assert!(Partition::Info2 as u32 >> 1 == 2);

impl Partition {
    fn fields(self) -> LocalRegisterCopy<u32, PARTITION::Register> {
        LocalRegisterCopy::new(self as u32)
    }

    /// Whether this is one of the information partitions.
    pub fn is_info(self) -> bool {
        self.fields().is_set(PARTITION::IS_INFO)
    }

    /// Info type of the partition. The hardware ignores it for the data
    /// partition.
    pub fn info_type(self) -> u32 {
        self.fields().read(PARTITION::INFO_TYPE)
    }

    /// Rebuilds a partition from its CONTROL.PARTITION_SEL and CONTROL.INFO_SEL
    /// values.
    pub fn from_fields(is_info: bool, info_type: u32) -> Option<Partition> {
        if !is_info {
            return Some(Partition::Data);
        }
        let mut fields = LocalRegisterCopy::<u32, PARTITION::Register>::new(0);
        fields.write(PARTITION::IS_INFO::SET + PARTITION::INFO_TYPE.val(info_type));
        if fields.read(PARTITION::INFO_TYPE) != info_type {
            return None;
        }
        Partition::try_from(fields.get()).ok()
    }
}

impl TryFrom<u32> for Partition {
    type Error = ();

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0b000 => Ok(Partition::Data),
            0b001 => Ok(Partition::Info0),
            0b011 => Ok(Partition::Info1),
            0b101 => Ok(Partition::Info2),
            _ => Err(()),
        }
    }
}

/// Erase granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EraseType {
    /// Erase a single page.
    Page,
    /// Erase an entire bank.
    Bank,
}

/// An information page: bank, page index within the bank and info partition.
///
/// Values are assumed well-formed. Out of range banks or indices are a
/// programming error and are not detected at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InfoPage {
    bank: u32,
    index: u32,
    partition: Partition,
}

impl InfoPage {
    pub const FACTORY_ID: InfoPage = InfoPage::new(0, 0, Partition::Info0);
    pub const CREATOR_SECRET: InfoPage = InfoPage::new(0, 1, Partition::Info0);
    pub const OWNER_SECRET: InfoPage = InfoPage::new(0, 2, Partition::Info0);
    pub const WAFER_AUTH_SECRET: InfoPage = InfoPage::new(0, 3, Partition::Info0);
    pub const BOOT_DATA_0: InfoPage = InfoPage::new(1, 0, Partition::Info0);
    pub const BOOT_DATA_1: InfoPage = InfoPage::new(1, 1, Partition::Info0);

    /// Panics if `partition` is the data partition.
    pub const fn new(bank: u32, index: u32, partition: Partition) -> InfoPage {
        assert!(
            !matches!(partition, Partition::Data),
            "information page in the data partition"
        );
        InfoPage {
            bank,
            index,
            partition,
        }
    }

    pub const fn bank(&self) -> u32 {
        self.bank
    }

    pub const fn index(&self) -> u32 {
        self.index
    }

    pub const fn partition(&self) -> Partition {
        self.partition
    }

    /// Base byte address of the page.
    pub fn addr(&self, config: &FlashCtrlConfig) -> u32 {
        config.mem_base + self.bank * config.bytes_per_bank + self.index * config.bytes_per_page
    }

    /// Config and config write-enable register addresses of the page.
    pub(crate) fn cfg_regs(&self, config: &FlashCtrlConfig) -> InfoCfgRegs {
        // For each bank and info type there are N REGWEN registers followed by
        // N PAGE_CFG registers, N being the number of pages of that type. The
        // blocks of bank 1 follow those of bank 0 with the same layout.
        const BANK_OFFSET: u32 = FLASH_CTRL_BANK1_INFO0_PAGE_CFG_SHADOWED_0_REG_OFFSET
            - FLASH_CTRL_BANK0_INFO0_PAGE_CFG_SHADOWED_0_REG_OFFSET;
        const PAGE_OFFSET: u32 = u32::BITS / 8;
        const _: () = assert!(
            FLASH_CTRL_BANK1_INFO0_REGWEN_0_REG_OFFSET - FLASH_CTRL_BANK0_INFO0_REGWEN_0_REG_OFFSET
                == BANK_OFFSET
        );
        const _: () = assert!(
            FLASH_CTRL_BANK0_INFO1_REGWEN_REG_OFFSET
                == FLASH_CTRL_BANK0_INFO0_PAGE_CFG_SHADOWED_0_REG_OFFSET
                    + FLASH_CTRL_PARAM_NUM_INFOS0 * PAGE_OFFSET
        );
        const _: () = assert!(
            FLASH_CTRL_BANK0_INFO2_REGWEN_0_REG_OFFSET
                == FLASH_CTRL_BANK0_INFO1_PAGE_CFG_SHADOWED_REG_OFFSET
                    + FLASH_CTRL_PARAM_NUM_INFOS1 * PAGE_OFFSET
        );
        const _: () = assert!(
            FLASH_CTRL_BANK1_INFO0_REGWEN_0_REG_OFFSET
                == FLASH_CTRL_BANK0_INFO2_PAGE_CFG_SHADOWED_0_REG_OFFSET
                    + FLASH_CTRL_PARAM_NUM_INFOS2 * PAGE_OFFSET
        );

        let (regwen, page_cfg) = match self.partition {
            Partition::Info1 => (
                FLASH_CTRL_BANK0_INFO1_REGWEN_REG_OFFSET,
                FLASH_CTRL_BANK0_INFO1_PAGE_CFG_SHADOWED_REG_OFFSET,
            ),
            Partition::Info2 => (
                FLASH_CTRL_BANK0_INFO2_REGWEN_0_REG_OFFSET,
                FLASH_CTRL_BANK0_INFO2_PAGE_CFG_SHADOWED_0_REG_OFFSET,
            ),
            // Unreachable for `Data`, `InfoPage::new` rejects it.
            Partition::Info0 | Partition::Data => (
                FLASH_CTRL_BANK0_INFO0_REGWEN_0_REG_OFFSET,
                FLASH_CTRL_BANK0_INFO0_PAGE_CFG_SHADOWED_0_REG_OFFSET,
            ),
        };
        let pre_addr = config.reg_base + self.bank * BANK_OFFSET + self.index * PAGE_OFFSET;
        InfoCfgRegs {
            cfg_wen_addr: pre_addr + regwen,
            cfg_addr: pre_addr + page_cfg,
        }
    }
}

/// Register addresses that control access to one information page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InfoCfgRegs {
    /// PAGE_CFG write-enable register.
    pub cfg_wen_addr: u32,
    /// PAGE_CFG register.
    pub cfg_addr: u32,
}
