//! A simple Driver for the 1.54" 200x200 E-Ink Display via SPI
//!
//! GDEW0154M09 (UC81xx class controller). The waveforms are uploaded as LUTs by every
//! init. The controller keeps the previous frame (`DataStartTransmission1`) next to the new
//! one (`DataStartTransmission2`), so a frame write runs the refresh itself to get both
//! planes in sync. [display_frame](EpdDriver::display_frame) runs the waveform again on
//! what is in RAM.
//!
//! Full writes always cover the whole panel, only partial writes use the given window.
//! There is no fast waveform, [RefreshMode::Fast] refreshes like [RefreshMode::Full].
//!
//! The busy line is low while the controller works.

/// Width of the display
pub const WIDTH: u32 = 200;
/// Height of the display
pub const HEIGHT: u32 = 200;
/// Default Background Color
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::White;
const IS_BUSY_LOW: bool = true;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin, StatefulOutputPin},
    spi::SpiDevice,
};

mod command;
use self::command::{Command, PanelSetting, PartialWindow};

mod constants;
use self::constants::*;

use crate::color::Color;
use crate::interface::DisplayInterface;
use crate::log::{debug, warn_log};
use crate::power::PowerController;
use crate::ram::{DisplayGeometry, RamWindow};
use crate::rect::Rect;
use crate::traits::{EpdDriver, InitState, Orientation, PowerState, RefreshMode};

#[cfg(feature = "graphics")]
pub use crate::graphics::Display1in54;

const PANEL: DisplayGeometry = DisplayGeometry::new(WIDTH, HEIGHT);

/// Epd1in54M09 driver
pub struct Epd1in54M09<SPI, CS, BUSY, DC, RST, DELAY> {
    /// Connection Interface
    interface: DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY>,
    power: PowerController<Command>,
    mode: RefreshMode,
    orientation: Orientation,
    /// Waveform set currently loaded
    state: InitState,
    /// Scan direction in the panel setting lags behind `orientation`
    scan_stale: bool,
    /// The first refresh shows the whole frame, whatever region was asked for
    initial_refresh: bool,
}

impl<SPI, CS, BUSY, DC, RST, DELAY> Epd1in54M09<SPI, CS, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    CS: OutputPin,
    BUSY: InputPin,
    DC: OutputPin,
    RST: StatefulOutputPin,
    DELAY: DelayNs,
{
    /// Creates the driver. Nothing is sent to the controller yet.
    ///
    /// `delay_us` is the busy line poll interval (default 10ms).
    pub fn new(
        busy: Option<BUSY>,
        cs: Option<CS>,
        dc: DC,
        rst: RST,
        mode: RefreshMode,
        delay_us: Option<u32>,
    ) -> Self {
        if mode == RefreshMode::Fast {
            warn_log!("M09 has no fast waveform, using the full one");
        }
        let interface = DisplayInterface::new(
            busy,
            cs,
            dc,
            rst,
            IS_BUSY_LOW,
            delay_us.unwrap_or(DEFAULT_POLL_US),
        );
        Epd1in54M09 {
            interface,
            power: PowerController::new(&POWER_PROFILE),
            mode,
            orientation: Orientation::default(),
            state: InitState::default(),
            scan_stale: false,
            initial_refresh: true,
        }
    }

    /// Waveform set used for the bound mode
    fn waveform(&self) -> RefreshMode {
        match self.mode {
            RefreshMode::Partial => RefreshMode::Partial,
            RefreshMode::Full | RefreshMode::Fast => RefreshMode::Full,
        }
    }

    fn needs_init(&self, waveform: RefreshMode) -> bool {
        self.state.needs_init(waveform)
            || self.power.is_hibernating()
            || (waveform == RefreshMode::Partial && !self.power.partial_latch())
    }

    fn hw_reset(&mut self, delay: &mut DELAY) {
        self.interface.reset(delay, RESET_LOW_MS, RESET_SETTLE_MS);
        self.power.on_reset();
        self.state = InitState::Uninitialized;
    }

    fn panel_setting(&mut self, spi: &mut SPI) -> Result<(), SPI::Error> {
        let scan_forward = self.orientation == Orientation::Normal;
        let panel = PanelSetting {
            scan_up: scan_forward,
            shift_right: scan_forward,
        };
        self.scan_stale = false;
        self.interface
            .cmd_with_data(spi, Command::PanelSetting, &panel.to_bytes())
    }

    /// Applies an orientation change to an initialised controller, RAM is left alone
    fn sync_scan(&mut self, spi: &mut SPI) -> Result<(), SPI::Error> {
        if self.scan_stale {
            debug!("M09 scan direction {:?}", self.orientation);
            self.panel_setting(spi)?;
        }
        Ok(())
    }

    /// Reset and the register setup shared by both waveforms
    fn init_base(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.hw_reset(delay);
        self.panel_setting(spi)?;
        self.interface.cmd_sequence(spi, BASE_INIT)
    }

    fn init_full(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        debug!("M09 init full");
        self.init_base(spi, delay)?;
        self.interface.cmd_sequence(spi, FULL_LUTS)?;
        self.power.power_on(&mut self.interface, spi, delay)?;
        self.power.set_partial_latch(false);
        self.state = InitState::Initialized(RefreshMode::Full);
        Ok(())
    }

    /// Loads the partial waveforms and keeps the panel powered
    fn load_partial(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        debug!("M09 init partial");
        self.init_base(spi, delay)?;
        self.interface.cmd_sequence(spi, PARTIAL_LUTS)?;
        self.power.power_on(&mut self.interface, spi, delay)?;
        self.power.set_partial_latch(true);
        self.state = InitState::Initialized(RefreshMode::Partial);
        Ok(())
    }

    /// Loads the partial waveforms and starts from a white panel
    fn init_partial(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.load_partial(spi, delay)?;
        self.clear_planes(spi, delay, DEFAULT_BACKGROUND_COLOR.get_byte_value())
    }

    /// Starts the waveform and waits for it to finish
    fn activate(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        timeout: u32,
    ) -> Result<(), SPI::Error> {
        self.interface.cmd(spi, Command::DisplayRefresh)?;
        delay.delay_ms(REFRESH_SETTLE_MS);
        self.interface.wait_until_idle(delay, timeout);
        Ok(())
    }

    fn update_timeout(&self) -> u32 {
        match self.waveform() {
            RefreshMode::Partial => PARTIAL_UPDATE_TIMEOUT,
            _ => FULL_UPDATE_TIMEOUT,
        }
    }

    fn set_ram_area(&mut self, spi: &mut SPI, window: RamWindow) -> Result<(), SPI::Error> {
        let area = PANEL.map(window, self.orientation);
        let (col_start, col_end) = min_max(area.col_start, area.col_end);
        let (row_start, row_end) = min_max(area.row_start, area.row_end);
        let window = PartialWindow {
            x: (col_start * 8) as u16,
            x_end: (col_end * 8) as u16,
            y: row_start as u16,
            y_end: row_end as u16,
        };
        self.interface
            .cmd_with_data(spi, Command::PartialWindow, &window.to_bytes())
    }

    /// Fills old and new frame with `fill` and refreshes
    fn clear_planes(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        fill: u8,
    ) -> Result<(), SPI::Error> {
        self.power.power_on(&mut self.interface, spi, delay)?;
        self.interface.cmd(spi, Command::PartialIn)?;
        self.set_ram_area(spi, PANEL.full_window())?;
        self.interface.cmd(spi, Command::DataStartTransmission2)?;
        self.interface.data_x_times(spi, fill, PANEL.buffer_len())?;
        let timeout = self.update_timeout();
        self.activate(spi, delay, timeout)?;
        self.interface.cmd(spi, Command::DataStartTransmission1)?;
        self.interface.data_x_times(spi, fill, PANEL.buffer_len())?;
        self.interface.cmd(spi, Command::PartialOut)
    }

    fn write_full(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        buffer: &[u8],
    ) -> Result<(), SPI::Error> {
        if self.needs_init(RefreshMode::Full) {
            self.init_full(spi, delay)?;
        }
        self.sync_scan(spi)?;
        self.interface
            .cmd_with_data(spi, Command::DataStartTransmission2, buffer)?;
        self.power.power_on(&mut self.interface, spi, delay)?;
        self.activate(spi, delay, FULL_UPDATE_TIMEOUT)?;
        self.interface
            .cmd_with_data(spi, Command::DataStartTransmission1, buffer)?;
        self.power.power_off(&mut self.interface, spi, delay)
    }

    fn write_partial(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        buffer: &[u8],
        window: RamWindow,
    ) -> Result<(), SPI::Error> {
        if self.power.is_hibernating() {
            // the partial waveform needs a known old frame
            return self.write_full(spi, delay, buffer);
        }
        if self.needs_init(RefreshMode::Partial) {
            self.init_partial(spi, delay)?;
        }
        self.sync_scan(spi)?;
        self.interface.cmd(spi, Command::PartialIn)?;
        self.interface
            .cmd_with_data(spi, Command::DataStartTransmission2, buffer)?;
        self.set_ram_area(spi, window)?;
        self.activate(spi, delay, PARTIAL_UPDATE_TIMEOUT)?;
        self.interface
            .cmd_with_data(spi, Command::DataStartTransmission1, buffer)?;
        self.interface.cmd(spi, Command::PartialOut)
    }
}

fn min_max(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl<SPI, CS, BUSY, DC, RST, DELAY> EpdDriver<SPI, DELAY>
    for Epd1in54M09<SPI, CS, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    CS: OutputPin,
    BUSY: InputPin,
    DC: OutputPin,
    RST: StatefulOutputPin,
    DELAY: DelayNs,
{
    fn width(&self) -> u32 {
        WIDTH
    }

    fn height(&self) -> u32 {
        HEIGHT
    }

    fn update_mode(&self) -> RefreshMode {
        self.mode
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn power_state(&self) -> PowerState {
        self.power.state()
    }

    fn init(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        match self.waveform() {
            RefreshMode::Partial => self.init_partial(spi, delay),
            _ => self.init_full(spi, delay),
        }
    }

    fn reset(&mut self, delay: &mut DELAY) {
        self.hw_reset(delay);
    }

    fn set_update_mode(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        mode: RefreshMode,
    ) -> Result<(), SPI::Error> {
        if mode == self.mode {
            return Ok(());
        }
        debug!("M09 update mode {:?}", mode);
        if mode == RefreshMode::Fast {
            warn_log!("M09 has no fast waveform, using the full one");
        }
        self.power.power_off(&mut self.interface, spi, delay)?;
        self.state = InitState::Uninitialized;
        self.mode = mode;
        Ok(())
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        if orientation != self.orientation {
            // the scan direction is part of the panel setting, resent by the next write
            self.scan_stale = true;
            self.orientation = orientation;
        }
    }

    fn set_frame_memory(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        buffer: &[u8],
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), SPI::Error> {
        match self.waveform() {
            RefreshMode::Partial => {
                let window = PANEL.calc_coords(x, y, width, height);
                self.write_partial(spi, delay, buffer, window)
            }
            _ => self.write_full(spi, delay, buffer),
        }
    }

    fn clear_frame_memory(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        fill: u8,
    ) -> Result<(), SPI::Error> {
        let waveform = self.waveform();
        if self.needs_init(waveform) {
            match waveform {
                RefreshMode::Partial => self.load_partial(spi, delay)?,
                _ => self.init_full(spi, delay)?,
            }
        }
        self.sync_scan(spi)?;
        self.clear_planes(spi, delay, fill)
    }

    fn display_frame(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.power.power_on(&mut self.interface, spi, delay)?;
        let timeout = self.update_timeout();
        self.activate(spi, delay, timeout)?;
        if self.waveform() != RefreshMode::Partial {
            self.power.power_off(&mut self.interface, spi, delay)?;
        }
        Ok(())
    }

    fn refresh(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), SPI::Error> {
        if self.initial_refresh {
            self.initial_refresh = false;
            return self.display_frame(spi, delay);
        }

        let rect = Rect::new(x, y, width, height).clip(WIDTH as i32, HEIGHT as i32);
        if rect.is_empty() {
            return Ok(());
        }
        let window = rect.expand_to_bytes().to_window(&PANEL);
        self.sync_scan(spi)?;
        self.interface.cmd(spi, Command::PartialIn)?;
        self.set_ram_area(spi, window)?;
        self.display_frame(spi, delay)?;
        self.interface.cmd(spi, Command::PartialOut)
    }

    fn hibernate(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        debug!("M09 hibernate");
        self.power.hibernate(&mut self.interface, spi, delay)?;
        self.state = InitState::Uninitialized;
        Ok(())
    }

    fn sleep(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.hibernate(spi, delay)?;
        self.interface.wait_until_idle(delay, 10);
        Ok(())
    }

    fn wait_until_idle(&mut self, delay: &mut DELAY, timeout_ms: u32) {
        self.interface.wait_until_idle(delay, timeout_ms);
    }
}
