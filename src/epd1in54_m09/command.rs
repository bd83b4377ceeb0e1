//! SPI Commands for the GDEW0154M09 controller

use crate::traits;

use bit_field::BitField;

/// GDEW0154M09
///
/// The vendor registers have no public documentation, they are set to the values the
/// panel manufacturer uses.
#[allow(dead_code)]
#[derive(Copy, Clone)]
pub(crate) enum Command {
    /// Scan direction, LUT source and resolution
    PanelSetting = 0x00,
    PowerSetting = 0x01,
    /// Busy goes low until the analog circuits are off
    PowerOff = 0x02,
    /// Busy goes low until the analog circuits are on
    PowerOn = 0x04,
    BoosterSoftStart = 0x06,
    /// 0xA5 enters deep sleep, left by a hardware reset
    DeepSleep = 0x07,
    /// Old frame
    DataStartTransmission1 = 0x10,
    /// Starts the waveform. Busy stays low while it runs
    DisplayRefresh = 0x12,
    /// New frame
    DataStartTransmission2 = 0x13,
    LutVcom = 0x20,
    LutWhiteToWhite = 0x21,
    LutBlackToWhite = 0x22,
    LutWhiteToBlack = 0x23,
    LutBlackToBlack = 0x24,
    PllControl = 0x30,
    Vendor4D = 0x4D,
    VcomAndDataIntervalSetting = 0x50,
    TconSetting = 0x60,
    ResolutionSetting = 0x61,
    VcmDcSetting = 0x82,
    /// Window for the partial mode: horizontal start/end, vertical start/end, scan mode
    PartialWindow = 0x90,
    PartialIn = 0x91,
    PartialOut = 0x92,
    VendorAA = 0xAA,
    VendorB6 = 0xB6,
    PowerSaving = 0xE3,
    VendorE9 = 0xE9,
    VendorF3 = 0xF3,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}

/// Payload of [Command::PanelSetting]
///
/// Second byte:
/// [7|6|5|4|3|2|1|0]
///          | | | `--- soft reset off
///          | | `----- booster on
///          | `------- shift right (SHL)
///          `--------- scan up (UD)
pub(crate) struct PanelSetting {
    pub scan_up: bool,
    pub shift_right: bool,
}

impl PanelSetting {
    /// 200x200 resolution, LUTs from registers
    const RESOLUTION_AND_LUT: u8 = 0xFF;

    pub fn to_bytes(&self) -> [u8; 2] {
        [
            Self::RESOLUTION_AND_LUT,
            *0u8.set_bit(1, true)
                .set_bit(2, self.shift_right)
                .set_bit(3, self.scan_up),
        ]
    }
}

/// Payload of [Command::PartialWindow] in pixels, all bounds inclusive
pub(crate) struct PartialWindow {
    pub x: u16,
    pub x_end: u16,
    pub y: u16,
    pub y_end: u16,
}

impl PartialWindow {
    pub fn to_bytes(&self) -> [u8; 7] {
        [
            // horizontal bounds are byte aligned
            *(self.x as u8).set_bits(0..3, 0),
            *(self.x_end as u8).set_bits(0..3, 0b111),
            (self.y >> 8) as u8,
            self.y as u8,
            (self.y_end >> 8) as u8,
            self.y_end as u8,
            // gates only scan inside the window
            0x00,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Command as CommandTrait;

    #[test]
    fn command_addr() {
        assert_eq!(Command::PanelSetting.address(), 0x00);
        assert_eq!(Command::DataStartTransmission2.address(), 0x13);
        assert_eq!(Command::PartialWindow.address(), 0x90);
        assert_eq!(Command::VendorF3.address(), 0xF3);
    }

    #[test]
    fn panel_setting() {
        let normal = PanelSetting {
            scan_up: true,
            shift_right: true,
        };
        assert_eq!(normal.to_bytes(), [0xFF, 0x0E]);
        let inverted = PanelSetting {
            scan_up: false,
            shift_right: false,
        };
        assert_eq!(inverted.to_bytes(), [0xFF, 0x02]);
    }

    #[test]
    fn partial_window() {
        let window = PartialWindow {
            x: 13,
            x_end: 20,
            y: 5,
            y_end: 260,
        };
        assert_eq!(window.to_bytes(), [8, 23, 0, 5, 1, 4, 0]);
    }
}
