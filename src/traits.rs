use embedded_hal::{delay::DelayNs, spi::SpiDevice};

/// All commands need to have this trait which gives the address of the command
/// which needs to be send via SPI with activated CommandsPin (Data/Command Pin in CommandMode)
pub(crate) trait Command: Copy {
    fn address(self) -> u8;
}

/// An ordered list of commands and their payloads, sent back to back.
///
/// An empty payload means only the opcode is transmitted.
pub(crate) type CommandSequence<C> = &'static [(C, &'static [u8])];

/// Seperates the different waveforms/sequences used for a display update
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default)]
pub enum RefreshMode {
    /// Slow refresh with the full waveform, cleans up ghosting
    #[default]
    Full,
    /// Only changed pixels are driven. The controller stays powered between updates.
    ///
    /// A full refresh is needed after a certain amount of partial refreshes!
    Partial,
    /// Shortened full refresh. The controller is powered down after every update.
    Fast,
}

/// How pixel coordinates map onto the controller RAM
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default)]
pub enum Orientation {
    /// Column `x / 8` left to right, row `y` top to bottom
    #[default]
    Normal,
    /// Rotated by 180°: columns and rows are mirrored, the bitmap itself is sent unchanged
    Inverted,
}

/// Power state of the controller as tracked by the driver
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum PowerState {
    /// Analog circuits are off, RAM and registers are kept
    Off,
    /// Analog circuits are on and the activation wait has finished
    On,
    /// Deep sleep. Needs a hardware reset (done by every init) to recover
    Hibernating,
}

/// Initialisation state of the refresh mode state machine
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default)]
pub(crate) enum InitState {
    #[default]
    Uninitialized,
    Initialized(RefreshMode),
}

impl InitState {
    /// True unless the controller was already initialised for `mode`
    pub(crate) fn needs_init(self, mode: RefreshMode) -> bool {
        self != InitState::Initialized(mode)
    }
}

/// All the functions to interact with the EPDs
///
/// This trait includes all public functions shared by both controller revisions.
/// Every function talking to the controller borrows the SPI device and the delay
/// provider for the duration of the call.
///
/// There is no acknowledgement channel besides the busy line: busy timeouts are
/// swallowed and out of range coordinates are clamped. Only errors of the SPI
/// device itself are reported.
///
/// # Example
///
///```rust, no_run
///# use embedded_hal_mock::eh1::*;
///# fn main() -> Result<(), embedded_hal::spi::ErrorKind> {
///use epd154::{epd1in54_d67::*, prelude::*};
///#
///# let expectations = [];
///# let mut spi = spi::Mock::new(&expectations);
///# let expectations = [];
///# let busy_in = digital::Mock::new(&expectations);
///# let dc = digital::Mock::new(&expectations);
///# let rst = digital::Mock::new(&expectations);
///# let mut delay = delay::NoopDelay::new();
///
///// Setup EPD, no chip select line wired
///let mut epd = Epd1in54D67::new(Some(busy_in), None::<NoPin>, dc, rst, RefreshMode::Full, None);
///
///let buffer = [0xFFu8; (WIDTH / 8 * HEIGHT) as usize];
///epd.set_frame_memory(&mut spi, &mut delay, &buffer, 0, 0, WIDTH, HEIGHT)?;
///epd.display_frame(&mut spi, &mut delay)?;
///
///// Update a small region with partial refreshes
///epd.set_update_mode(&mut spi, &mut delay, RefreshMode::Partial)?;
///epd.set_frame_memory(&mut spi, &mut delay, &buffer[..8 * 16], 64, 64, 64, 16)?;
///epd.display_frame(&mut spi, &mut delay)?;
///
///// Set the EPD to sleep
///epd.sleep(&mut spi, &mut delay)?;
///# Ok(())
///# }
///```
pub trait EpdDriver<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    /// Get the width of the display
    fn width(&self) -> u32;

    /// Get the height of the display
    fn height(&self) -> u32;

    /// Currently bound refresh mode
    fn update_mode(&self) -> RefreshMode;

    /// Currently bound RAM orientation
    fn orientation(&self) -> Orientation;

    /// Power state as tracked by the driver
    fn power_state(&self) -> PowerState;

    /// Runs the initialisation sequence of the current refresh mode.
    ///
    /// This includes a hardware reset, so it also wakes the device from deep sleep.
    /// It is run lazily by the frame memory functions, so calling it is optional.
    fn init(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error>;

    /// Hardware reset. The next frame memory write reinitialises the controller.
    fn reset(&mut self, delay: &mut DELAY);

    /// Selects the refresh mode used by the following writes and updates.
    ///
    /// Changing the mode powers the controller down and forces a reinitialisation.
    fn set_update_mode(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        mode: RefreshMode,
    ) -> Result<(), SPI::Error>;

    /// Selects the RAM addressing used by the following writes.
    ///
    /// Frames already in the controller RAM are not touched.
    fn set_orientation(&mut self, orientation: Orientation);

    /// Transmits a bitmap into the given window of the controller RAM
    ///
    /// (x,y) is the top left corner. x and width are rounded down to multiples of 8,
    /// the window is clipped to the panel.
    ///
    /// BUFFER needs to be of size: width / 8 * height !
    #[allow(clippy::too_many_arguments)]
    fn set_frame_memory(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        buffer: &[u8],
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), SPI::Error>;

    /// Fills the whole controller RAM with `fill` (one byte = 8 pixels)
    fn clear_frame_memory(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        fill: u8,
    ) -> Result<(), SPI::Error>;

    /// Displays the frame data from RAM
    ///
    /// This function waits until the device isn`t busy anymore (or its timeout ran out)
    fn display_frame(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error>;

    /// Refreshes the region of the panel covering the given rectangle
    ///
    /// The very first call on a new driver always refreshes the whole panel. Later calls
    /// clip the rectangle to the panel and grow it to whole bytes; a rectangle without any
    /// visible pixel does nothing.
    #[allow(clippy::too_many_arguments)]
    fn refresh(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), SPI::Error>;

    /// Powers the controller down and lets it enter deep-sleep mode.
    ///
    /// The deep sleep mode returns to standby with a hardware reset, which every
    /// initialisation does.
    fn hibernate(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error>;

    /// Same as [hibernate](EpdDriver::hibernate), followed by a last short busy wait
    fn sleep(&mut self, spi: &mut SPI, delay: &mut DELAY) -> Result<(), SPI::Error>;

    /// Waits until the busy line reports idle or `timeout_ms` ran out.
    ///
    /// Without busy line the full timeout is slept.
    fn wait_until_idle(&mut self, delay: &mut DELAY, timeout_ms: u32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_state_only_skips_same_mode() {
        assert!(InitState::Uninitialized.needs_init(RefreshMode::Full));
        assert!(!InitState::Initialized(RefreshMode::Full).needs_init(RefreshMode::Full));
        assert!(InitState::Initialized(RefreshMode::Full).needs_init(RefreshMode::Partial));
        assert!(InitState::Initialized(RefreshMode::Fast).needs_init(RefreshMode::Full));
    }

    #[test]
    fn defaults() {
        assert_eq!(RefreshMode::default(), RefreshMode::Full);
        assert_eq!(Orientation::default(), Orientation::Normal);
    }
}
