//! Power state tracking of the controller
//!
//! The analog circuits (charge pump, gate and source drivers) have to be switched on
//! before a waveform can run. Both revisions do this with a short command sequence and
//! signal completion on the busy line; only the opcodes and timings differ, so they are
//! described by a [PowerProfile].

use crate::interface::DisplayInterface;
use crate::log::debug;
use crate::traits::{Command, CommandSequence, PowerState};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin, StatefulOutputPin},
    spi::SpiDevice,
};

/// Revision specific power sequences and their timings (all in ms)
pub(crate) struct PowerProfile<C: 'static> {
    pub(crate) on: CommandSequence<C>,
    pub(crate) on_settle_ms: u32,
    pub(crate) on_timeout_ms: u32,
    pub(crate) off: CommandSequence<C>,
    pub(crate) off_settle_ms: u32,
    pub(crate) off_timeout_ms: u32,
    pub(crate) deep_sleep: CommandSequence<C>,
    pub(crate) deep_sleep_settle_ms: u32,
    /// 0 skips the busy wait after entering deep sleep
    pub(crate) deep_sleep_timeout_ms: u32,
}

pub(crate) struct PowerController<C: 'static> {
    profile: &'static PowerProfile<C>,
    powered: bool,
    hibernating: bool,
    /// Set while the partial waveforms are loaded and the panel is kept powered
    partial_latch: bool,
}

impl<C: Command + 'static> PowerController<C> {
    /// The chip state is unknown until the first reset, so a new controller counts as
    /// hibernating.
    pub(crate) const fn new(profile: &'static PowerProfile<C>) -> Self {
        PowerController {
            profile,
            powered: false,
            hibernating: true,
            partial_latch: false,
        }
    }

    pub(crate) fn state(&self) -> PowerState {
        match (self.hibernating, self.powered) {
            (true, _) => PowerState::Hibernating,
            (false, true) => PowerState::On,
            (false, false) => PowerState::Off,
        }
    }

    pub(crate) fn is_on(&self) -> bool {
        self.powered
    }

    pub(crate) fn is_hibernating(&self) -> bool {
        self.hibernating
    }

    pub(crate) fn partial_latch(&self) -> bool {
        self.partial_latch
    }

    pub(crate) fn set_partial_latch(&mut self, latched: bool) {
        self.partial_latch = latched;
    }

    /// A hardware reset leaves the controller in standby with the analog circuits off
    pub(crate) fn on_reset(&mut self) {
        self.powered = false;
        self.hibernating = false;
    }

    /// Switches the analog circuits on. Does nothing if they already are.
    pub(crate) fn power_on<SPI, CS, BUSY, DC, RST, DELAY>(
        &mut self,
        interface: &mut DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY>,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), SPI::Error>
    where
        SPI: SpiDevice,
        CS: OutputPin,
        BUSY: InputPin,
        DC: OutputPin,
        RST: StatefulOutputPin,
        DELAY: DelayNs,
    {
        if self.powered {
            return Ok(());
        }
        debug!("EPD power on");
        interface.cmd_sequence(spi, self.profile.on)?;
        delay.delay_ms(self.profile.on_settle_ms);
        interface.wait_until_idle(delay, self.profile.on_timeout_ms);
        self.powered = true;
        Ok(())
    }

    /// Switches the analog circuits off. Does nothing on the bus if they already are,
    /// the partial latch is cleared either way.
    pub(crate) fn power_off<SPI, CS, BUSY, DC, RST, DELAY>(
        &mut self,
        interface: &mut DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY>,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), SPI::Error>
    where
        SPI: SpiDevice,
        CS: OutputPin,
        BUSY: InputPin,
        DC: OutputPin,
        RST: StatefulOutputPin,
        DELAY: DelayNs,
    {
        self.partial_latch = false;
        if !self.powered {
            return Ok(());
        }
        debug!("EPD power off");
        interface.cmd_sequence(spi, self.profile.off)?;
        delay.delay_ms(self.profile.off_settle_ms);
        interface.wait_until_idle(delay, self.profile.off_timeout_ms);
        self.powered = false;
        Ok(())
    }

    /// Powers off and enters deep sleep
    ///
    /// While the reset line is held low the controller can't take commands, so only the
    /// power off bookkeeping is done then.
    pub(crate) fn hibernate<SPI, CS, BUSY, DC, RST, DELAY>(
        &mut self,
        interface: &mut DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY>,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), SPI::Error>
    where
        SPI: SpiDevice,
        CS: OutputPin,
        BUSY: InputPin,
        DC: OutputPin,
        RST: StatefulOutputPin,
        DELAY: DelayNs,
    {
        self.power_off(interface, spi, delay)?;
        if interface.is_reset_held() {
            return Ok(());
        }
        debug!("EPD deep sleep");
        interface.cmd_sequence(spi, self.profile.deep_sleep)?;
        delay.delay_ms(self.profile.deep_sleep_settle_ms);
        if self.profile.deep_sleep_timeout_ms > 0 {
            interface.wait_until_idle(delay, self.profile.deep_sleep_timeout_ms);
        }
        self.hibernating = true;
        Ok(())
    }
}
