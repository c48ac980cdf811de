/*
Copyright (c) 2020 Todd Stellanova
LICENSE: BSD3 (see LICENSE file)
*/

//! Register lists applied during the streaming start sequence.
//!
//! These are opaque vendor settings. The common list is written once per
//! power cycle; exactly one mode list is written on every stream start.

use crate::modes::{reg, Reg};

/// Written once after power-up. Ends by releasing master mode (0x3002 = 0).
pub const COMMON_REGISTERS: &[Reg] = &[
    reg(0x3002, 0x01), reg(0x301A, 0x00), reg(0x301B, 0x00), reg(0x3024, 0x00),
    reg(0x3069, 0x00), reg(0x3074, 0x64), reg(0x30D5, 0x04), reg(0x3930, 0x0C),
    reg(0x3931, 0x01), reg(0x3A4C, 0x39), reg(0x3A4D, 0x01), reg(0x3A50, 0x48),
    reg(0x3A51, 0x01), reg(0x3E10, 0x10), reg(0x493C, 0x23), reg(0x4940, 0x41),
    reg(0x3014, 0x04), reg(0x3015, 0x02), reg(0x3030, 0x00), reg(0x3040, 0x03),
    reg(0x3023, 0x01), reg(0x30A6, 0x00), reg(0x3081, 0x00), reg(0x3460, 0x21),
    reg(0x3478, 0xA1), reg(0x347C, 0x01), reg(0x3480, 0x01), reg(0x3A4E, 0x14),
    reg(0x3A52, 0x14), reg(0x3A56, 0x00), reg(0x3A5A, 0x00), reg(0x3A5E, 0x00),
    reg(0x3A62, 0x00), reg(0x3A6A, 0x20), reg(0x3A6C, 0x42), reg(0x3A6E, 0xA0),
    reg(0x3B2C, 0x0C), reg(0x3B30, 0x1C), reg(0x3B34, 0x0C), reg(0x3B38, 0x1C),
    reg(0x3BA0, 0x0C), reg(0x3BA4, 0x1C), reg(0x3BA8, 0x0C), reg(0x3BAC, 0x1C),
    reg(0x3D3C, 0x11), reg(0x3D46, 0x0B), reg(0x3DE0, 0x3F), reg(0x3DE1, 0x08),
    reg(0x3E14, 0x87), reg(0x3E16, 0x91), reg(0x3E18, 0x91), reg(0x3E1A, 0x87),
    reg(0x3E1C, 0x78), reg(0x3E1E, 0x50), reg(0x3E20, 0x50), reg(0x3E22, 0x50),
    reg(0x3E24, 0x87), reg(0x3E26, 0x91), reg(0x3E28, 0x91), reg(0x3E2A, 0x87),
    reg(0x3E2C, 0x78), reg(0x3E2E, 0x50), reg(0x3E30, 0x50), reg(0x3E32, 0x50),
    reg(0x3E34, 0x87), reg(0x3E36, 0x91), reg(0x3E38, 0x91), reg(0x3E3A, 0x87),
    reg(0x3E3C, 0x78), reg(0x3E3E, 0x50), reg(0x3E40, 0x50), reg(0x3E42, 0x50),
    reg(0x4054, 0x64), reg(0x4148, 0xFE), reg(0x4149, 0x05), reg(0x414A, 0xFF),
    reg(0x414B, 0x05), reg(0x420A, 0x03), reg(0x4231, 0x08), reg(0x423D, 0x9C),
    reg(0x4242, 0xB4), reg(0x4246, 0xB4), reg(0x424E, 0xB4), reg(0x425C, 0xB4),
    reg(0x425E, 0xB6), reg(0x426C, 0xB4), reg(0x426E, 0xB6), reg(0x428C, 0xB4),
    reg(0x428E, 0xB6), reg(0x4708, 0x00), reg(0x4709, 0x00), reg(0x470A, 0xFF),
    reg(0x470B, 0x03), reg(0x470C, 0x00), reg(0x470D, 0x00), reg(0x470E, 0xFF),
    reg(0x470F, 0x03), reg(0x47EB, 0x1C), reg(0x47F0, 0xA6), reg(0x47F2, 0xA6),
    reg(0x47F4, 0xA0), reg(0x47F6, 0x96), reg(0x4808, 0xA6), reg(0x480A, 0xA6),
    reg(0x480C, 0xA0), reg(0x480E, 0x96), reg(0x492C, 0xB2), reg(0x4930, 0x03),
    reg(0x4932, 0x03), reg(0x4936, 0x5B), reg(0x4938, 0x82), reg(0x493E, 0x23),
    reg(0x4BA8, 0x1C), reg(0x4BA9, 0x03), reg(0x4BAC, 0x1C), reg(0x4BAD, 0x1C),
    reg(0x4BAE, 0x1C), reg(0x4BAF, 0x1C), reg(0x4BB0, 0x1C), reg(0x4BB1, 0x1C),
    reg(0x4BB2, 0x1C), reg(0x4BB3, 0x1C), reg(0x4BB4, 0x1C), reg(0x4BB8, 0x03),
    reg(0x4BB9, 0x03), reg(0x4BBA, 0x03), reg(0x4BBB, 0x03), reg(0x4BBC, 0x03),
    reg(0x4BBD, 0x03), reg(0x4BBE, 0x03), reg(0x4BBF, 0x03), reg(0x4BC0, 0x03),
    reg(0x4C14, 0x87), reg(0x4C16, 0x91), reg(0x4C18, 0x91), reg(0x4C1A, 0x87),
    reg(0x4C1C, 0x78), reg(0x4C1E, 0x50), reg(0x4C20, 0x50), reg(0x4C22, 0x50),
    reg(0x4C24, 0x87), reg(0x4C26, 0x91), reg(0x4C28, 0x91), reg(0x4C2A, 0x87),
    reg(0x4C2C, 0x78), reg(0x4C2E, 0x50), reg(0x4C30, 0x50), reg(0x4C32, 0x50),
    reg(0x4C34, 0x87), reg(0x4C36, 0x91), reg(0x4C38, 0x91), reg(0x4C3A, 0x87),
    reg(0x4C3C, 0x78), reg(0x4C3E, 0x50), reg(0x4C40, 0x50), reg(0x4C42, 0x50),
    reg(0x4D12, 0x1F), reg(0x4D13, 0x1E), reg(0x4D26, 0x33), reg(0x4E0E, 0x59),
    reg(0x4E14, 0x55), reg(0x4E16, 0x59), reg(0x4E1E, 0x3B), reg(0x4E20, 0x47),
    reg(0x4E22, 0x54), reg(0x4E26, 0x81), reg(0x4E2C, 0x7D), reg(0x4E2E, 0x81),
    reg(0x4E36, 0x63), reg(0x4E38, 0x6F), reg(0x4E3A, 0x7C), reg(0x4F3A, 0x3C),
    reg(0x4F3C, 0x46), reg(0x4F3E, 0x59), reg(0x4F42, 0x64), reg(0x4F44, 0x6E),
    reg(0x4F46, 0x81), reg(0x4F4A, 0x82), reg(0x4F5A, 0x81), reg(0x4F62, 0xAA),
    reg(0x4F72, 0xA9), reg(0x4F78, 0x36), reg(0x4F7A, 0x41), reg(0x4F7C, 0x61),
    reg(0x4F7D, 0x01), reg(0x4F7E, 0x7C), reg(0x4F7F, 0x01), reg(0x4F80, 0x77),
    reg(0x4F82, 0x7B), reg(0x4F88, 0x37), reg(0x4F8A, 0x40), reg(0x4F8C, 0x62),
    reg(0x4F8D, 0x01), reg(0x4F8E, 0x76), reg(0x4F8F, 0x01), reg(0x4F90, 0x5E),
    reg(0x4F91, 0x02), reg(0x4F92, 0x69), reg(0x4F93, 0x02), reg(0x4F94, 0x89),
    reg(0x4F95, 0x02), reg(0x4F96, 0xA4), reg(0x4F97, 0x02), reg(0x4F98, 0x9F),
    reg(0x4F99, 0x02), reg(0x4F9A, 0xA3), reg(0x4F9B, 0x02), reg(0x4FA0, 0x5F),
    reg(0x4FA1, 0x02), reg(0x4FA2, 0x68), reg(0x4FA3, 0x02), reg(0x4FA4, 0x8A),
    reg(0x4FA5, 0x02), reg(0x4FA6, 0x9E), reg(0x4FA7, 0x02), reg(0x519E, 0x79),
    reg(0x51A6, 0xA1), reg(0x51F0, 0xAC), reg(0x51F2, 0xAA), reg(0x51F4, 0xA5),
    reg(0x51F6, 0xA0), reg(0x5200, 0x9B), reg(0x5202, 0x91), reg(0x5204, 0x87),
    reg(0x5206, 0x82), reg(0x5208, 0xAC), reg(0x520A, 0xAA), reg(0x520C, 0xA5),
    reg(0x520E, 0xA0), reg(0x5210, 0x9B), reg(0x5212, 0x91), reg(0x5214, 0x87),
    reg(0x5216, 0x82), reg(0x5218, 0xAC), reg(0x521A, 0xAA), reg(0x521C, 0xA5),
    reg(0x521E, 0xA0), reg(0x5220, 0x9B), reg(0x5222, 0x91), reg(0x5224, 0x87),
    reg(0x5226, 0x82), reg(0x3002, 0x00),
];

/// All pixel, 12-bit, linear
pub const MODE_4K_REGISTERS: &[Reg] = &[
    reg(0x301A, 0x00), // WDMODE normal
    reg(0x301B, 0x00), // ADDMODE non-binning
    reg(0x3022, 0x02), // ADBIT 12-bit
    reg(0x3023, 0x01), // MDBIT 12-bit
    reg(0x3024, 0x00), // COMBI_EN off
    reg(0x36EF, 0x00), // CCMP_EN linear
    reg(0x3069, 0x00),
    reg(0x3074, 0x64),
    reg(0x30D5, 0x04), // DIG_CLP_VSTART non-binning
    reg(0x3930, 0x0C), // DUR
    reg(0x3931, 0x01),
    reg(0x3A4C, 0x39), // WAIT_ST0
    reg(0x3A4D, 0x01),
    reg(0x3A50, 0x48), // WAIT_ST1
    reg(0x3A51, 0x01),
    reg(0x3E10, 0x10), // ADTHEN
    reg(0x493C, 0x23),
    reg(0x4940, 0x41),
];

/// 2x2 binned, 12-bit, linear
pub const MODE_1080_REGISTERS: &[Reg] = &[
    reg(0x301A, 0x00), // WDMODE normal
    reg(0x301B, 0x01), // ADDMODE binning
    reg(0x3022, 0x00), // ADBIT 10-bit
    reg(0x3023, 0x01), // MDBIT 12-bit
    reg(0x3024, 0x00), // COMBI_EN off
    reg(0x36EF, 0x00), // CCMP_EN linear
    reg(0x3069, 0x00),
    reg(0x3074, 0x64),
    reg(0x30D5, 0x02), // DIG_CLP_VSTART binning
    reg(0x3930, 0x0C), // DUR
    reg(0x3931, 0x01),
    reg(0x3A4C, 0x39), // WAIT_ST0
    reg(0x3A4D, 0x01),
    reg(0x3A50, 0x48), // WAIT_ST1
    reg(0x3A51, 0x01),
    reg(0x3E10, 0x10), // ADTHEN
    reg(0x493C, 0x23),
    reg(0x4940, 0x41),
];

/// All pixel, 12-bit, Clear HDR with gradation compression
pub const MODE_4K_COMPRESSED_REGISTERS: &[Reg] = &[
    reg(0x301A, 0x10), // WDMODE Clear HDR
    reg(0x301B, 0x00), // ADDMODE non-binning
    reg(0x3022, 0x02), // ADBIT 12-bit
    reg(0x3023, 0x01), // MDBIT 12-bit
    reg(0x3024, 0x02), // COMBI_EN built-in combining
    reg(0x36EF, 0x01), // CCMP_EN gradation compression
    reg(0x3030, 0x00), // FDG_SEL0 LCG
    reg(0x3069, 0x02),
    reg(0x3074, 0x63),
    reg(0x3081, 0x02), // EXP_GAIN +12 dB
    reg(0x30D5, 0x02), // DIG_CLP_VSTART
    reg(0x3930, 0xE6), // DUR
    reg(0x3931, 0x00),
    reg(0x3A4C, 0x61), // WAIT_ST0
    reg(0x3A4D, 0x02),
    reg(0x3A50, 0x70), // WAIT_ST1
    reg(0x3A51, 0x02),
    reg(0x3E10, 0x17), // ADTHEN
    reg(0x493C, 0x41), // WAIT_10_SHF
    reg(0x4940, 0x41), // WAIT_12_SHF
];

/// All pixel, 16-bit, Clear HDR linear
pub const MODE_4K_16BIT_REGISTERS: &[Reg] = &[
    reg(0x301A, 0x10), // WDMODE Clear HDR
    reg(0x301B, 0x00), // ADDMODE non-binning
    reg(0x3022, 0x02), // ADBIT 12-bit
    reg(0x3023, 0x03), // MDBIT 16-bit
    reg(0x3024, 0x02), // COMBI_EN built-in combining
    reg(0x36EF, 0x00), // CCMP_EN linear
    reg(0x3030, 0x00), // FDG_SEL0 LCG
    reg(0x3069, 0x02),
    reg(0x3074, 0x63),
    reg(0x3081, 0x02), // EXP_GAIN +12 dB
    reg(0x30D5, 0x02), // DIG_CLP_VSTART
    reg(0x3930, 0xE6), // DUR
    reg(0x3931, 0x00),
    reg(0x3A4C, 0x61), // WAIT_ST0
    reg(0x3A4D, 0x02),
    reg(0x3A50, 0x70), // WAIT_ST1
    reg(0x3A51, 0x02),
    reg(0x3E10, 0x17), // ADTHEN
    reg(0x493C, 0x41), // WAIT_10_SHF
    reg(0x4940, 0x41), // WAIT_12_SHF
];

/// 2x2 binned, 16-bit, Clear HDR linear
pub const MODE_1080_16BIT_REGISTERS: &[Reg] = &[
    reg(0x301A, 0x10), // WDMODE Clear HDR
    reg(0x301B, 0x01), // ADDMODE binning
    reg(0x3022, 0x02), // ADBIT 12-bit
    reg(0x3023, 0x03), // MDBIT 16-bit
    reg(0x3024, 0x02), // COMBI_EN built-in combining
    reg(0x36EF, 0x00), // CCMP_EN linear
    reg(0x3030, 0x00), // FDG_SEL0 LCG
    reg(0x3069, 0x02),
    reg(0x3074, 0x63),
    reg(0x3081, 0x02), // EXP_GAIN +12 dB
    reg(0x30D5, 0x02), // DIG_CLP_VSTART
    reg(0x3930, 0xE6), // DUR
    reg(0x3931, 0x00),
    reg(0x3A4C, 0x61), // WAIT_ST0
    reg(0x3A4D, 0x02),
    reg(0x3A50, 0x70), // WAIT_ST1
    reg(0x3A51, 0x02),
    reg(0x3E10, 0x17), // ADTHEN
    reg(0x493C, 0x41), // WAIT_10_SHF
    reg(0x4940, 0x41), // WAIT_12_SHF
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_list_brackets_master_mode() {
        assert_eq!(COMMON_REGISTERS.len(), 242);
        assert_eq!(COMMON_REGISTERS[0], reg(0x3002, 0x01));
        assert_eq!(COMMON_REGISTERS[COMMON_REGISTERS.len() - 1], reg(0x3002, 0x00));
    }

    #[test]
    fn only_the_compressed_mode_enables_ccmp() {
        let ccmp = |list: &[Reg]| {
            list.iter()
                .find(|r| r.address == 0x36EF)
                .map(|r| r.value)
        };
        assert_eq!(ccmp(MODE_4K_REGISTERS), Some(0));
        assert_eq!(ccmp(MODE_1080_REGISTERS), Some(0));
        assert_eq!(ccmp(MODE_4K_COMPRESSED_REGISTERS), Some(1));
        assert_eq!(ccmp(MODE_4K_16BIT_REGISTERS), Some(0));
        assert_eq!(ccmp(MODE_1080_16BIT_REGISTERS), Some(0));
    }
}
