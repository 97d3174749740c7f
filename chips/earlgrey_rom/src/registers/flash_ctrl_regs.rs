// Register constants for FLASH_CTRL.
// This file is licensed under either of:
//   Apache License, Version 2.0 (LICENSE-APACHE <http://www.apache.org/licenses/LICENSE-2.0>)
//   MIT License (LICENSE-MIT <http://opensource.org/licenses/MIT>)

// Original reference file: hw/ip/flash_ctrl/data/flash_ctrl.hjson
// Copyright information found in the reference file:
//   Copyright lowRISC contributors.
// Licensing information found in the reference file:
//   Licensed under the Apache License, Version 2.0, see LICENSE for details.
//   SPDX-License-Identifier: Apache-2.0

use tock_registers::register_bitfields;

// Number of flash banks
pub const FLASH_CTRL_PARAM_REG_NUM_BANKS: u32 = 2;
// Number of pages per bank
pub const FLASH_CTRL_PARAM_REG_PAGES_PER_BANK: u32 = 256;
// Program resolution window in bytes
pub const FLASH_CTRL_PARAM_REG_BUS_PGM_RES_BYTES: u32 = 512;
// Number of info partition types
pub const FLASH_CTRL_PARAM_NUM_INFO_TYPES: u32 = 3;
// Number of configurable flash info pages for info type 0
pub const FLASH_CTRL_PARAM_NUM_INFOS0: u32 = 10;
// Number of configurable flash info pages for info type 1
pub const FLASH_CTRL_PARAM_NUM_INFOS1: u32 = 1;
// Number of configurable flash info pages for info type 2
pub const FLASH_CTRL_PARAM_NUM_INFOS2: u32 = 2;
// Number of bytes per page
pub const FLASH_CTRL_PARAM_BYTES_PER_PAGE: u32 = 2048;
// Number of bytes per bank
pub const FLASH_CTRL_PARAM_BYTES_PER_BANK: u32 = 524288;
// Maximum depth for read / program fifos
pub const FLASH_CTRL_PARAM_MAX_FIFO_DEPTH: u32 = 16;
// Value of the EXEC register that allows instruction fetches from flash
pub const FLASH_CTRL_PARAM_EXEC_EN: u32 = 0xa26a_38f7;

// Controls whether flash can be used for code execution fetches
pub const FLASH_CTRL_EXEC_REG_OFFSET: u32 = 0x0014;
// Controller init register
pub const FLASH_CTRL_INIT_REG_OFFSET: u32 = 0x0018;
// Control register
pub const FLASH_CTRL_CONTROL_REG_OFFSET: u32 = 0x0020;
// Address for flash operation
pub const FLASH_CTRL_ADDR_REG_OFFSET: u32 = 0x0024;
// Memory region registers configuration enable, bank 0, info type 0, page 0
pub const FLASH_CTRL_BANK0_INFO0_REGWEN_0_REG_OFFSET: u32 = 0x0094;
// Memory property configuration, bank 0, info type 0, page 0
pub const FLASH_CTRL_BANK0_INFO0_PAGE_CFG_SHADOWED_0_REG_OFFSET: u32 = 0x00bc;
// Memory region registers configuration enable, bank 0, info type 1, page 0
pub const FLASH_CTRL_BANK0_INFO1_REGWEN_REG_OFFSET: u32 = 0x00e4;
// Memory property configuration, bank 0, info type 1, page 0
pub const FLASH_CTRL_BANK0_INFO1_PAGE_CFG_SHADOWED_REG_OFFSET: u32 = 0x00e8;
// Memory region registers configuration enable, bank 0, info type 2, page 0
pub const FLASH_CTRL_BANK0_INFO2_REGWEN_0_REG_OFFSET: u32 = 0x00ec;
// Memory property configuration, bank 0, info type 2, page 0
pub const FLASH_CTRL_BANK0_INFO2_PAGE_CFG_SHADOWED_0_REG_OFFSET: u32 = 0x00f4;
// Memory region registers configuration enable, bank 1, info type 0, page 0
pub const FLASH_CTRL_BANK1_INFO0_REGWEN_0_REG_OFFSET: u32 = 0x00fc;
// Memory property configuration, bank 1, info type 0, page 0
pub const FLASH_CTRL_BANK1_INFO0_PAGE_CFG_SHADOWED_0_REG_OFFSET: u32 = 0x0124;
// Flash Operation Status
pub const FLASH_CTRL_OP_STATUS_REG_OFFSET: u32 = 0x016c;
// Flash Controller Status
pub const FLASH_CTRL_STATUS_REG_OFFSET: u32 = 0x0170;
// Memory area: Flash program FIFO.
pub const FLASH_CTRL_PROG_FIFO_REG_OFFSET: u32 = 0x01a8;
// Memory area: Flash read FIFO.
pub const FLASH_CTRL_RD_FIFO_REG_OFFSET: u32 = 0x01ac;

register_bitfields![u32,
    pub INIT [
        VAL OFFSET(0) NUMBITS(1) [],
    ],
    pub CONTROL [
        START OFFSET(0) NUMBITS(1) [],
        OP OFFSET(4) NUMBITS(2) [
            READ = 0,
            PROG = 1,
            ERASE = 2,
        ],
        PROG_SEL OFFSET(6) NUMBITS(1) [
            NORMAL = 0,
            REPAIR = 1,
        ],
        ERASE_SEL OFFSET(7) NUMBITS(1) [
            PAGE = 0,
            BANK = 1,
        ],
        PARTITION_SEL OFFSET(8) NUMBITS(1) [],
        INFO_SEL OFFSET(9) NUMBITS(2) [],
        NUM OFFSET(16) NUMBITS(12) [],
    ],
    pub ADDR [
        START OFFSET(0) NUMBITS(20) [],
    ],
    pub INFO_REGWEN [
        EN OFFSET(0) NUMBITS(1) [
            LOCKED = 0,
            ENABLED = 1,
        ],
    ],
    pub INFO_PAGE_CFG [
        EN OFFSET(0) NUMBITS(1) [],
        RD_EN OFFSET(1) NUMBITS(1) [],
        PROG_EN OFFSET(2) NUMBITS(1) [],
        ERASE_EN OFFSET(3) NUMBITS(1) [],
        SCRAMBLE_EN OFFSET(4) NUMBITS(1) [],
        ECC_EN OFFSET(5) NUMBITS(1) [],
        HE_EN OFFSET(6) NUMBITS(1) [],
    ],
    pub OP_STATUS [
        DONE OFFSET(0) NUMBITS(1) [],
        ERR OFFSET(1) NUMBITS(1) [],
    ],
    pub STATUS [
        RD_FULL OFFSET(0) NUMBITS(1) [],
        RD_EMPTY OFFSET(1) NUMBITS(1) [],
        PROG_FULL OFFSET(2) NUMBITS(1) [],
        PROG_EMPTY OFFSET(3) NUMBITS(1) [],
        INIT_WIP OFFSET(4) NUMBITS(1) [],
    ],
];

// End register constants for FLASH_CTRL
