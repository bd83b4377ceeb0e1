use crate::log::{trace, warn_log};
use crate::traits::{Command, CommandSequence};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin},
    spi::SpiDevice,
};

/// Step used to sleep through a busy wait when no busy line is wired
const NO_BUSY_STEP_MS: u32 = 50;

/// Number of bytes of a repeated value sent per bus write
const REPEAT_CHUNK: usize = 64;

/// Placeholder for control lines that aren't wired (chip select, busy)
///
/// Use it to name the type of a `None`, e.g. `None::<NoPin>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// The Connection Interface of the EPD controllers
///
/// Frames commands and data on the bus, owns the control lines and implements the
/// bounded busy wait.
pub(crate) struct DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY> {
    /// SPI
    _spi: PhantomData<SPI>,
    /// DELAY
    _delay: PhantomData<DELAY>,
    /// Optional chip select, brackets every transaction when present
    cs: Option<CS>,
    /// Optional busy line, without it the busy waits sleep their whole timeout
    busy: Option<BUSY>,
    /// Level of the busy line while the controller works
    is_busy_low: bool,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
    /// number of us the idle loop should sleep on
    delay_us: u32,
}

impl<SPI, CS, BUSY, DC, RST, DELAY> DisplayInterface<SPI, CS, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    CS: OutputPin,
    BUSY: InputPin,
    DC: OutputPin,
    RST: StatefulOutputPin,
    DELAY: DelayNs,
{
    /// Creates a new `DisplayInterface` struct
    ///
    /// Drives the idle levels: reset released, chip select deasserted.
    pub(crate) fn new(
        busy: Option<BUSY>,
        cs: Option<CS>,
        dc: DC,
        rst: RST,
        is_busy_low: bool,
        delay_us: u32,
    ) -> Self {
        let mut interface = DisplayInterface {
            _spi: PhantomData,
            _delay: PhantomData,
            cs,
            busy,
            is_busy_low,
            dc,
            rst,
            delay_us,
        };
        let _ = interface.rst.set_high();
        if let Some(cs) = interface.cs.as_mut() {
            let _ = cs.set_high();
        }
        interface
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](DisplayInterface::data())
    pub(crate) fn cmd<T: Command>(&mut self, spi: &mut SPI, command: T) -> Result<(), SPI::Error> {
        trace!("EPD command {}", command.address());
        // low for commands
        let _ = self.dc.set_low();

        // Transfer the command over spi
        self.with_cs(spi, |spi| write(spi, &[command.address()]))
    }

    /// Basic function for sending an array of u8-values of data over spi
    ///
    /// Enables direct interaction with the device with the help of [command()](DisplayInterface::cmd())
    pub(crate) fn data(&mut self, spi: &mut SPI, data: &[u8]) -> Result<(), SPI::Error> {
        // high for data
        let _ = self.dc.set_high();

        self.with_cs(spi, |spi| write(spi, data))
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    ///
    /// The command transaction is finished before the data transaction starts.
    /// An empty payload only sends the command.
    pub(crate) fn cmd_with_data<T: Command>(
        &mut self,
        spi: &mut SPI,
        command: T,
        data: &[u8],
    ) -> Result<(), SPI::Error> {
        self.cmd(spi, command)?;
        if data.is_empty() {
            return Ok(());
        }
        self.data(spi, data)
    }

    /// Sends every command of a [CommandSequence] in order
    pub(crate) fn cmd_sequence<T: Command + 'static>(
        &mut self,
        spi: &mut SPI,
        sequence: CommandSequence<T>,
    ) -> Result<(), SPI::Error> {
        for &(command, data) in sequence {
            self.cmd_with_data(spi, command, data)?;
        }
        Ok(())
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    ///
    /// All repetitions belong to one data transaction.
    pub(crate) fn data_x_times(
        &mut self,
        spi: &mut SPI,
        val: u8,
        repetitions: u32,
    ) -> Result<(), SPI::Error> {
        // high for data
        let _ = self.dc.set_high();

        let chunk = [val; REPEAT_CHUNK];
        self.with_cs(spi, |spi| {
            let mut left = repetitions as usize;
            while left > 0 {
                let n = left.min(REPEAT_CHUNK);
                write(spi, &chunk[..n])?;
                left -= n;
            }
            Ok(())
        })
    }

    fn with_cs<F>(&mut self, spi: &mut SPI, f: F) -> Result<(), SPI::Error>
    where
        F: FnOnce(&mut SPI) -> Result<(), SPI::Error>,
    {
        if let Some(cs) = self.cs.as_mut() {
            let _ = cs.set_low();
        }
        let result = f(spi);
        if let Some(cs) = self.cs.as_mut() {
            let _ = cs.set_high();
        }
        result
    }

    /// Checks if device is still busy
    ///
    /// Normalises the busy polarity of the controller. A missing busy line or a failed read
    /// counts as idle.
    pub(crate) fn is_busy(&mut self) -> bool {
        let is_busy_low = self.is_busy_low;
        match self.busy.as_mut() {
            Some(busy) if is_busy_low => busy.is_low().unwrap_or(false),
            Some(busy) => busy.is_high().unwrap_or(false),
            None => false,
        }
    }

    /// Waits until device isn't busy anymore, at most `timeout_ms`
    ///
    /// With a busy line it is polled every `delay_us` until it reports idle. Without one
    /// the whole timeout is slept in steps of 50ms. Running out of time is not an error,
    /// the caller just carries on.
    pub(crate) fn wait_until_idle(&mut self, delay: &mut DELAY, timeout_ms: u32) {
        let (step_us, mut left_us) = if self.busy.is_some() {
            (self.delay_us.max(1), timeout_ms.saturating_mul(1_000))
        } else {
            (NO_BUSY_STEP_MS * 1_000, timeout_ms.saturating_mul(1_000))
        };

        while left_us > 0 {
            if self.busy.is_some() && !self.is_busy() {
                return;
            }
            let step = step_us.min(left_us);
            delay.delay_us(step);
            left_us -= step;
        }

        if self.is_busy() {
            warn_log!("EPD still busy after {} ms, carrying on", timeout_ms);
        }
    }

    /// Resets the device.
    ///
    /// Pulls the reset line low for `duration_ms`, releases it and waits `settle_ms`
    /// for the controller to come up.
    pub(crate) fn reset(&mut self, delay: &mut DELAY, duration_ms: u32, settle_ms: u32) {
        let _ = self.rst.set_low();
        delay.delay_ms(duration_ms);
        let _ = self.rst.set_high();
        delay.delay_ms(settle_ms);
    }

    /// True while the reset line is driven low. No command reaches the controller then.
    ///
    /// The level is read back from the pin, a line that can't report it counts as released.
    pub(crate) fn is_reset_held(&mut self) -> bool {
        self.rst.is_set_low().unwrap_or(false)
    }
}

// spi write helper/abstraction function
fn write<SPI: SpiDevice>(spi: &mut SPI, data: &[u8]) -> Result<(), SPI::Error> {
    // transfer spi data
    // Be careful!! Linux has a default limit of 4096 bytes per spi transfer
    // see https://raspberrypi.stackexchange.com/questions/65595/spi-transfer-fails-with-buffer-size-greater-than-4096
    if cfg!(target_os = "linux") {
        for data_chunk in data.chunks(4096) {
            spi.write(data_chunk)?;
        }
        Ok(())
    } else {
        spi.write(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Event, FakeBus};
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, State, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
    };

    #[derive(Clone, Copy)]
    struct Cmd(u8);

    impl Command for Cmd {
        fn address(self) -> u8 {
            self.0
        }
    }

    #[test]
    fn command_then_data_with_chip_select() {
        let mut spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x44]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x00, 0x18]),
            SpiTransaction::transaction_end(),
        ]);
        let mut cs = PinMock::new(&[
            // idle level on construction
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let mut dc = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let mut rst = PinMock::new(&[PinTransaction::set(State::High)]);

        let mut interface: DisplayInterface<_, _, NoPin, _, _, NoopDelay> =
            DisplayInterface::new(None, Some(cs.clone()), dc.clone(), rst.clone(), false, 1_000);
        interface
            .cmd_with_data(&mut spi, Cmd(0x44), &[0x00, 0x18])
            .unwrap();

        spi.done();
        cs.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn empty_payload_sends_only_the_command() {
        let mut spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x20]),
            SpiTransaction::transaction_end(),
        ]);
        let mut dc = PinMock::new(&[PinTransaction::set(State::Low)]);
        let mut rst = PinMock::new(&[PinTransaction::set(State::High)]);

        let mut interface: DisplayInterface<_, NoPin, NoPin, _, _, NoopDelay> =
            DisplayInterface::new(None, None, dc.clone(), rst.clone(), false, 1_000);
        interface.cmd_with_data(&mut spi, Cmd(0x20), &[]).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn repeated_data_is_one_data_phase() {
        let bus = FakeBus::new();
        let (mut spi, mut delay) = (bus.spi(), bus.delay());
        let mut interface = DisplayInterface::new(
            None::<NoPin>,
            Some(bus.pin("cs")),
            bus.dc(),
            bus.pin("rst"),
            false,
            1_000,
        );
        interface.cmd(&mut spi, Cmd(0x24)).unwrap();
        interface.data_x_times(&mut spi, 0xAA, 150).unwrap();
        interface.wait_until_idle(&mut delay, 0);

        assert_eq!(bus.commands(), vec![(0x24, vec![0xAA; 150])]);
        // one bracket for the command, one for all of the data
        assert_eq!(bus.count(&Event::Pin("cs", false)), 2);
    }

    #[test]
    fn busy_polarity_is_normalised() {
        let bus = FakeBus::new();
        bus.set_busy_levels(&[true, true, false]);
        let mut delay = bus.delay();
        let mut interface: DisplayInterface<crate::test_utils::FakeSpi, NoPin, _, _, _, _> =
            DisplayInterface::new(Some(bus.busy()), None, bus.dc(), bus.pin("rst"), false, 10_000);
        interface.wait_until_idle(&mut delay, 1_000);
        // busy high twice, then idle
        assert_eq!(bus.total_delay_ms(), 20);

        let bus = FakeBus::new();
        bus.set_busy_levels(&[false, true]);
        let mut delay = bus.delay();
        let mut interface: DisplayInterface<crate::test_utils::FakeSpi, NoPin, _, _, _, _> =
            DisplayInterface::new(Some(bus.busy()), None, bus.dc(), bus.pin("rst"), true, 10_000);
        interface.wait_until_idle(&mut delay, 1_000);
        // busy low once, then idle
        assert_eq!(bus.total_delay_ms(), 10);
    }

    #[test]
    fn busy_wait_is_bounded() {
        let bus = FakeBus::new();
        bus.set_busy_levels(&[]);
        bus.set_busy_default(true);
        let mut delay = bus.delay();
        let mut interface: DisplayInterface<crate::test_utils::FakeSpi, NoPin, _, _, _, _> =
            DisplayInterface::new(Some(bus.busy()), None, bus.dc(), bus.pin("rst"), false, 50_000);
        interface.wait_until_idle(&mut delay, 2_200);
        assert_eq!(bus.total_delay_ms(), 2_200);
    }

    #[test]
    fn missing_busy_line_sleeps_the_timeout() {
        let bus = FakeBus::new();
        let mut delay = bus.delay();
        let mut interface: DisplayInterface<crate::test_utils::FakeSpi, NoPin, NoPin, _, _, _> =
            DisplayInterface::new(None, None, bus.dc(), bus.pin("rst"), false, 10_000);
        interface.wait_until_idle(&mut delay, 300);
        assert_eq!(bus.total_delay_ms(), 300);
        // shorter than one step
        interface.wait_until_idle(&mut delay, 10);
        assert_eq!(bus.total_delay_ms(), 310);
    }

    #[test]
    fn reset_pulses_low() {
        let bus = FakeBus::new();
        let mut delay = bus.delay();
        let mut interface: DisplayInterface<crate::test_utils::FakeSpi, NoPin, NoPin, _, _, _> =
            DisplayInterface::new(None, None, bus.dc(), bus.pin("rst"), false, 10_000);
        assert!(!interface.is_reset_held());
        interface.reset(&mut delay, 200, 20);
        assert!(!interface.is_reset_held());
        bus.hold_level("rst", false);
        assert!(interface.is_reset_held());
        assert_eq!(
            bus.events_of(|e| matches!(e, Event::Pin("rst", _) | Event::Delay(_))),
            vec![
                Event::Pin("rst", true),
                Event::Pin("rst", false),
                Event::Delay(200_000),
                Event::Pin("rst", true),
                Event::Delay(20_000),
            ]
        );
    }
}
