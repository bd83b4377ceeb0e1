use super::command::Command;
use crate::power::PowerProfile;
use crate::traits::CommandSequence;

/// Busy waits after starting a display refresh, in ms
pub(crate) const FULL_UPDATE_TIMEOUT: u32 = 1500;
pub(crate) const PARTIAL_UPDATE_TIMEOUT: u32 = 400;

/// Wait after DisplayRefresh before the busy line is valid, in ms
pub(crate) const REFRESH_SETTLE_MS: u32 = 10;

/// Reset pulse and the time the controller needs to come up, in ms
pub(crate) const RESET_LOW_MS: u32 = 100;
pub(crate) const RESET_SETTLE_MS: u32 = 100;

/// Busy line poll interval in us
pub(crate) const DEFAULT_POLL_US: u32 = 10_000;

pub(crate) static POWER_PROFILE: PowerProfile<Command> = PowerProfile {
    on: &[(Command::PowerOn, &[])],
    on_settle_ms: 10,
    on_timeout_ms: 100,
    off: &[(Command::PowerOff, &[])],
    off_settle_ms: 10,
    off_timeout_ms: 100,
    deep_sleep: &[(Command::DeepSleep, &[0xA5])],
    deep_sleep_settle_ms: 300,
    deep_sleep_timeout_ms: 200,
};

/// Registers set after the panel setting by every init
pub(crate) const BASE_INIT: CommandSequence<Command> = &[
    (Command::PowerSetting, &[0x03, 0x09, 0x39, 0x39]),
    (Command::Vendor4D, &[0x55]),
    (Command::VendorAA, &[0x0F]),
    (Command::VendorE9, &[0x02]),
    (Command::VendorB6, &[0x11]),
    (Command::VendorF3, &[0x0A]),
    (Command::BoosterSoftStart, &[0xC7, 0x0C, 0x0C]),
    // 200 x 200
    (Command::ResolutionSetting, &[0xC8, 0x00, 0xC8]),
    (Command::TconSetting, &[0x00]),
    (Command::VcmDcSetting, &[0x12]),
    // 50Hz
    (Command::PllControl, &[0x3C]),
    (Command::VcomAndDataIntervalSetting, &[0x97]),
    (Command::PowerSaving, &[0x00]),
];

pub(crate) const FULL_LUTS: CommandSequence<Command> = &[
    (Command::LutVcom, &LUT_VCOM_FULL),
    (Command::LutWhiteToWhite, &LUT_WW_FULL),
    (Command::LutBlackToWhite, &LUT_BW_FULL),
    (Command::LutWhiteToBlack, &LUT_WB_FULL),
    (Command::LutBlackToBlack, &LUT_BB_FULL),
];

pub(crate) const PARTIAL_LUTS: CommandSequence<Command> = &[
    (Command::LutVcom, &LUT_VCOM_PARTIAL),
    (Command::LutWhiteToWhite, &LUT_WW_PARTIAL),
    (Command::LutBlackToWhite, &LUT_BW_PARTIAL),
    (Command::LutWhiteToBlack, &LUT_WB_PARTIAL),
    (Command::LutBlackToBlack, &LUT_BB_PARTIAL),
];

#[rustfmt::skip]
pub(crate) const LUT_VCOM_FULL: [u8; 56] = [
    0x01, 0x05, 0x05, 0x05, 0x05, 0x01, 0x01, 0x01, 0x05, 0x05, 0x05, 0x05, 0x01, 0x01,
    0x01, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_WW_FULL: [u8; 42] = [
    0x01, 0x45, 0x45, 0x43, 0x44, 0x01, 0x01, 0x01, 0x87, 0x83, 0x87, 0x06, 0x01, 0x01,
    0x01, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_BW_FULL: [u8; 56] = [
    0x01, 0x05, 0x05, 0x45, 0x42, 0x01, 0x01, 0x01, 0x87, 0x85, 0x85, 0x85, 0x01, 0x01,
    0x01, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_WB_FULL: [u8; 56] = [
    0x01, 0x08, 0x08, 0x82, 0x42, 0x01, 0x01, 0x01, 0x45, 0x45, 0x45, 0x45, 0x01, 0x01,
    0x01, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_BB_FULL: [u8; 56] = [
    0x01, 0x85, 0x85, 0x85, 0x83, 0x01, 0x01, 0x01, 0x45, 0x45, 0x04, 0x48, 0x01, 0x01,
    0x01, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_VCOM_PARTIAL: [u8; 56] = [
    0x01, 0x04, 0x04, 0x03, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_WW_PARTIAL: [u8; 42] = [
    0x01, 0x04, 0x04, 0x03, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_BW_PARTIAL: [u8; 56] = [
    0x01, 0x84, 0x84, 0x83, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_WB_PARTIAL: [u8; 56] = [
    0x01, 0x44, 0x44, 0x43, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

#[rustfmt::skip]
pub(crate) const LUT_BB_PARTIAL: [u8; 56] = [
    0x01, 0x04, 0x04, 0x03, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];
