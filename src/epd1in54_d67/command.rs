//! SPI Commands for the GDEY0154D67 controller

use crate::traits;

use bit_field::BitField;

/// GDEY0154D67
///
/// Only the registers used by the driver are listed, the controller knows more.
#[allow(dead_code)]
#[derive(Copy, Clone)]
pub(crate) enum Command {
    /// Gate lines, scanning order
    DriverOutputControl = 0x01,
    /// 0x01 enters deep sleep mode 1, left by a hardware reset
    DeepSleepMode = 0x10,
    /// Address counter direction after each RAM write
    DataEntryModeSetting = 0x11,
    SwReset = 0x12,
    /// 0x80 selects the internal temperature sensor
    TemperatureSensorSelection = 0x18,
    /// Writes a temperature value into the sensor register
    TemperatureSensorControl = 0x1A,
    /// Runs the sequence selected with DisplayUpdateControl2. Busy stays high while it runs
    MasterActivation = 0x20,
    DisplayUpdateControl2 = 0x22,
    /// Black/white plane
    WriteRam = 0x24,
    /// Second plane, compared against for differential waveforms
    WriteRamRed = 0x26,
    BorderWaveformControl = 0x3C,
    SetRamXAddressStartEndPosition = 0x44,
    SetRamYAddressStartEndPosition = 0x45,
    SetRamXAddressCounter = 0x4E,
    SetRamYAddressCounter = 0x4F,
    /// Terminates a frame read/write
    Nop = 0xFF,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}

/// Payload of [Command::DriverOutputControl]
pub(crate) struct DriverOutput {
    /// Number of gate lines
    pub gates: u16,
    pub scan_interlaced: bool,
    pub scan_g1_first: bool,
    pub scan_bottom_up: bool,
}

impl DriverOutput {
    pub fn to_bytes(&self) -> [u8; 3] {
        let mux = self.gates - 1;
        [
            mux as u8,
            *0u8.set_bit(0, mux.get_bit(8)),
            *0u8.set_bit(0, self.scan_bottom_up)
                .set_bit(1, self.scan_interlaced)
                .set_bit(2, self.scan_g1_first),
        ]
    }
}

/// Payload of [Command::DataEntryModeSetting]
///
/// [7|6|5|4|3|2|1|0]
///            | `-+--- X increments, Y increments
///            `------- counter moves in Y direction first
pub(crate) struct DataEntryMode {
    pub x_increment: bool,
    pub y_increment: bool,
    pub y_first: bool,
}

impl DataEntryMode {
    /// Counters run left to right, top to bottom
    pub const INCREMENT: DataEntryMode = DataEntryMode {
        x_increment: true,
        y_increment: true,
        y_first: false,
    };

    /// Counters run right to left, bottom to top
    pub const DECREMENT: DataEntryMode = DataEntryMode {
        x_increment: false,
        y_increment: false,
        y_first: false,
    };

    pub fn to_byte(&self) -> u8 {
        *0u8.set_bit(0, self.x_increment)
            .set_bit(1, self.y_increment)
            .set_bit(2, self.y_first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Command as CommandTrait;

    #[test]
    fn command_addr() {
        assert_eq!(Command::DriverOutputControl.address(), 0x01);
        assert_eq!(Command::SetRamYAddressCounter.address(), 0x4F);
        assert_eq!(Command::Nop.address(), 0xFF);
    }

    #[test]
    fn driver_output() {
        let out = DriverOutput {
            gates: 200,
            scan_interlaced: false,
            scan_g1_first: false,
            scan_bottom_up: false,
        };
        assert_eq!(out.to_bytes(), [0xC7, 0x00, 0x00]);

        let out = DriverOutput {
            gates: 296,
            scan_interlaced: false,
            scan_g1_first: false,
            scan_bottom_up: true,
        };
        assert_eq!(out.to_bytes(), [0x27, 0x01, 0x01]);
    }

    #[test]
    fn data_entry_mode() {
        assert_eq!(DataEntryMode::INCREMENT.to_byte(), 0x03);
        assert_eq!(DataEntryMode::DECREMENT.to_byte(), 0x00);
        let y_down = DataEntryMode {
            x_increment: true,
            y_increment: false,
            y_first: false,
        };
        assert_eq!(y_down.to_byte(), 0x01);
    }
}
