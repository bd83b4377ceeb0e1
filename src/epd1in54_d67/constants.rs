use super::command::Command;
use crate::power::PowerProfile;
use crate::traits::CommandSequence;

/// DisplayUpdateControl2 values, each followed by a MasterActivation
pub(crate) const UPDATE_FULL: u8 = 0xF7;
pub(crate) const UPDATE_PARTIAL: u8 = 0xFF;
pub(crate) const UPDATE_FAST: u8 = 0xC7;

/// Busy waits after the activation of a display update, in ms
pub(crate) const FULL_UPDATE_TIMEOUT: u32 = 2200;
pub(crate) const PARTIAL_UPDATE_TIMEOUT: u32 = 300;
pub(crate) const FAST_UPDATE_TIMEOUT: u32 = 1100;

/// Busy wait between the steps of the fast init, in ms
pub(crate) const FAST_INIT_TIMEOUT: u32 = 50;

/// Reset pulse and the time the controller needs to come up, in ms
pub(crate) const RESET_LOW_MS: u32 = 200;
pub(crate) const RESET_SETTLE_MS: u32 = 20;

/// Busy line poll interval in us
pub(crate) const DEFAULT_POLL_US: u32 = 50_000;

pub(crate) static POWER_PROFILE: PowerProfile<Command> = PowerProfile {
    // enable clock and analog
    on: &[
        (Command::DisplayUpdateControl2, &[0xE0]),
        (Command::MasterActivation, &[]),
    ],
    on_settle_ms: 0,
    on_timeout_ms: 100,
    // disable analog and clock
    off: &[
        (Command::DisplayUpdateControl2, &[0x83]),
        (Command::MasterActivation, &[]),
    ],
    off_settle_ms: 0,
    off_timeout_ms: 150,
    deep_sleep: &[(Command::DeepSleepMode, &[0x01])],
    deep_sleep_settle_ms: 0,
    deep_sleep_timeout_ms: 0,
};

/// Sent after DriverOutputControl by the full init
pub(crate) const FULL_INIT: CommandSequence<Command> = &[
    // X increment, Y decrement
    (Command::DataEntryModeSetting, &[0x01]),
    (Command::SetRamXAddressStartEndPosition, &[0x00, 0x18]),
    (Command::SetRamYAddressStartEndPosition, &[0x00, 0x00, 0xC7, 0x00]),
    (Command::BorderWaveformControl, &[0x05]),
    (Command::TemperatureSensorSelection, &[0x80]),
    (Command::SetRamXAddressCounter, &[0x00]),
    (Command::SetRamYAddressCounter, &[0xC7, 0x00]),
    (Command::DataEntryModeSetting, &[0x03]),
];

/// Sent after DriverOutputControl by the partial init
pub(crate) const PARTIAL_INIT: CommandSequence<Command> = &[
    (Command::DataEntryModeSetting, &[0x01]),
    (Command::BorderWaveformControl, &[0x05]),
    (Command::TemperatureSensorSelection, &[0x80]),
    (Command::DataEntryModeSetting, &[0x03]),
];

/// Loads the temperature from the internal sensor
pub(crate) const FAST_LOAD_TEMPERATURE: CommandSequence<Command> = &[
    (Command::TemperatureSensorSelection, &[0x80]),
    (Command::DisplayUpdateControl2, &[0xB1]),
    (Command::MasterActivation, &[]),
];

/// Overrides the temperature to pick the shorter waveform from OTP
pub(crate) const FAST_LOAD_WAVEFORM: CommandSequence<Command> = &[
    (Command::TemperatureSensorControl, &[0x5A, 0x00]),
    (Command::DisplayUpdateControl2, &[0x91]),
    (Command::MasterActivation, &[]),
];

/// Border follows the waveform during partial updates
pub(crate) const PARTIAL_BORDER: u8 = 0x80;
