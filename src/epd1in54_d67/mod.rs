//! A simple Driver for the 1.54" 200x200 E-Ink Display via SPI
//!
//! GDEY0154D67 (SSD1681 class controller). Supports full, partial and fast refreshes,
//! the fast waveform is picked from OTP by overriding the temperature.
//!
//! The busy line is high while the controller works.

/// Width of the display
pub const WIDTH: u32 = 200;
/// Height of the display
pub const HEIGHT: u32 = 200;
/// Default Background Color
pub const DEFAULT_BACKGROUND_COLOR: Color = Color::White;
const IS_BUSY_LOW: bool = false;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin, StatefulOutputPin},
    spi::SpiDevice,
};

mod command;
use self::command::{Command, DataEntryMode, DriverOutput};

mod constants;
use self::constants::*;

use crate::color::Color;
use crate::interface::DisplayInterface;
use crate::log::debug;
use crate::power::PowerController;
use crate::ram::{DisplayGeometry, RamWindow};
use crate::rect::Rect;
use crate::traits::{EpdDriver, InitState, Orientation, PowerState, RefreshMode};

#[cfg(feature = "graphics")]
pub use crate::graphics::Display1in54;

const PANEL: DisplayGeometry = DisplayGeometry::new(WIDTH, HEIGHT);

/// Epd1in54D67 driver
pub struct Epd1in54D67<SPI, CS, BUSY, DC, RST, DELAY> {
    /// Connection Interface
    interface: DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY>,
    power: PowerController<Command>,
    mode: RefreshMode,
    orientation: Orientation,
    state: InitState,
    /// The first refresh shows the whole frame, whatever region was asked for
    initial_refresh: bool,
}

impl<SPI, CS, BUSY, DC, RST, DELAY> Epd1in54D67<SPI, CS, BUSY, DC, RST, DELAY>
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
    /// `delay_us` is the busy line poll interval (default 50ms).
    pub fn new(
        busy: Option<BUSY>,
        cs: Option<CS>,
        dc: DC,
        rst: RST,
        mode: RefreshMode,
        delay_us: Option<u32>,
    ) -> Self {
        let interface = DisplayInterface::new(
            busy,
            cs,
            dc,
            rst,
            IS_BUSY_LOW,
            delay_us.unwrap_or(DEFAULT_POLL_US),
        );
        Epd1in54D67 {
            interface,
            power: PowerController::new(&POWER_PROFILE),
            mode,
            orientation: Orientation::default(),
            state: InitState::default(),
            initial_refresh: true,
        }
    }

    fn hw_reset(&mut self, delay: &mut DELAY) {
        self.interface.reset(delay, RESET_LOW_MS, RESET_SETTLE_MS);
        self.power.on_reset();
        self.state = InitState::Uninitialized;
    }

    /// Reset, software reset and power on. Common start of every init.
    fn wake(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        sw_reset_ms: u32,
    ) -> Result<(), SPI::Error> {
        self.hw_reset(delay);
        delay.delay_ms(10);
        self.interface.cmd(spi, Command::SwReset)?;
        delay.delay_ms(sw_reset_ms);
        Ok(())
    }

    fn driver_output(&mut self, spi: &mut SPI) -> Result<(), SPI::Error> {
        let output = DriverOutput {
            gates: HEIGHT as u16,
            scan_interlaced: false,
            scan_g1_first: false,
            scan_bottom_up: false,
        };
        self.interface
            .cmd_with_data(spi, Command::DriverOutputControl, &output.to_bytes())
    }

    fn init_full(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.wake(spi, delay, 100)?;
        self.power.power_on(&mut self.interface, spi, delay)?;
        self.driver_output(spi)?;
        self.interface.cmd_sequence(spi, FULL_INIT)
    }

    fn init_partial(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.wake(spi, delay, 10)?;
        self.power.power_on(&mut self.interface, spi, delay)?;
        self.driver_output(spi)?;
        self.interface.cmd_sequence(spi, PARTIAL_INIT)
    }

    fn init_fast(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        self.wake(spi, delay, 10)?;
        self.interface.wait_until_idle(delay, FAST_INIT_TIMEOUT);
        self.power.power_on(&mut self.interface, spi, delay)?;

        self.interface.cmd_sequence(spi, FAST_LOAD_TEMPERATURE)?;
        self.interface.wait_until_idle(delay, FAST_INIT_TIMEOUT);
        self.interface.cmd_sequence(spi, FAST_LOAD_WAVEFORM)?;
        self.interface.wait_until_idle(delay, FAST_INIT_TIMEOUT);

        self.interface.cmd_with_data(
            spi,
            Command::DataEntryModeSetting,
            &[DataEntryMode::INCREMENT.to_byte()],
        )
    }

    /// Runs the init of the bound mode unless it already ran since the last reset
    fn ensure_init(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        if self.state.needs_init(self.mode) || self.power.is_hibernating() {
            self.init(spi, delay)?;
        }
        Ok(())
    }

    /// Programs the RAM window and moves the address counters to its first byte
    fn set_ram_area(&mut self, spi: &mut SPI, window: RamWindow) -> Result<(), SPI::Error> {
        let entry_mode = match self.orientation {
            Orientation::Normal => DataEntryMode::INCREMENT,
            Orientation::Inverted => DataEntryMode::DECREMENT,
        };
        let area = PANEL.map(window, self.orientation);

        self.interface.cmd_with_data(
            spi,
            Command::DataEntryModeSetting,
            &[entry_mode.to_byte()],
        )?;
        self.interface.cmd_with_data(
            spi,
            Command::SetRamXAddressStartEndPosition,
            &[area.col_start as u8, area.col_end as u8],
        )?;
        self.interface.cmd_with_data(
            spi,
            Command::SetRamYAddressStartEndPosition,
            &[
                area.row_start as u8,
                (area.row_start >> 8) as u8,
                area.row_end as u8,
                (area.row_end >> 8) as u8,
            ],
        )?;
        self.interface
            .cmd_with_data(spi, Command::SetRamXAddressCounter, &[area.col_start as u8])?;
        self.interface.cmd_with_data(
            spi,
            Command::SetRamYAddressCounter,
            &[area.row_start as u8, (area.row_start >> 8) as u8],
        )
    }
}

impl<SPI, CS, BUSY, DC, RST, DELAY> EpdDriver<SPI, DELAY>
    for Epd1in54D67<SPI, CS, BUSY, DC, RST, DELAY>
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
        debug!("D67 init {:?}", self.mode);
        match self.mode {
            RefreshMode::Full => self.init_full(spi, delay)?,
            RefreshMode::Partial => self.init_partial(spi, delay)?,
            RefreshMode::Fast => self.init_fast(spi, delay)?,
        }
        self.state = InitState::Initialized(self.mode);
        Ok(())
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
        debug!("D67 update mode {:?}", mode);
        self.power.power_off(&mut self.interface, spi, delay)?;
        self.state = InitState::Uninitialized;
        self.mode = mode;
        Ok(())
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
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
        self.ensure_init(spi, delay)?;
        let window = PANEL.calc_coords(x, y, width, height);

        if self.mode == RefreshMode::Partial {
            self.interface
                .cmd_with_data(spi, Command::BorderWaveformControl, &[PARTIAL_BORDER])?;
        }
        self.set_ram_area(spi, window)?;
        self.interface.cmd_with_data(spi, Command::WriteRam, buffer)?;

        if self.mode == RefreshMode::Fast {
            // the fast waveform compares against an all white previous frame
            self.interface.cmd(spi, Command::WriteRamRed)?;
            self.interface.data_x_times(spi, 0x00, buffer.len() as u32)?;
        }
        Ok(())
    }

    fn clear_frame_memory(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        fill: u8,
    ) -> Result<(), SPI::Error> {
        self.ensure_init(spi, delay)?;
        self.set_ram_area(spi, PANEL.full_window())?;
        self.interface.cmd(spi, Command::WriteRam)?;
        self.interface.data_x_times(spi, fill, PANEL.buffer_len())
    }

    fn display_frame(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        let (update, timeout) = match self.mode {
            RefreshMode::Full => (UPDATE_FULL, FULL_UPDATE_TIMEOUT),
            RefreshMode::Partial => (UPDATE_PARTIAL, PARTIAL_UPDATE_TIMEOUT),
            RefreshMode::Fast => (UPDATE_FAST, FAST_UPDATE_TIMEOUT),
        };
        self.interface
            .cmd_with_data(spi, Command::DisplayUpdateControl2, &[update])?;
        self.interface.cmd(spi, Command::MasterActivation)?;
        // MASTER Activation should not be interupted to avoid currption of panel images
        // therefore a terminate command is send
        self.interface.cmd(spi, Command::Nop)?;
        self.interface.wait_until_idle(delay, timeout);

        if self.mode == RefreshMode::Fast {
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
        self.set_ram_area(spi, window)?;
        self.display_frame(spi, delay)
    }

    fn hibernate(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error> {
        debug!("D67 hibernate");
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
