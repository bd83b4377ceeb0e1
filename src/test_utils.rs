//! Recording stand-ins for the bus, the control lines and the delay provider.
//!
//! Everything shares one event log, so tests can assert on the exact order of
//! commands, payloads, pin changes and sleeps.

use core::convert::Infallible;
use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType as PinErrorType, InputPin, OutputPin, StatefulOutputPin},
    spi::{ErrorType as SpiErrorType, Operation, SpiDevice},
};
use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
    vec::Vec,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    /// Byte written while DC was low
    Cmd(u8),
    /// Bytes written in one bus write while DC was high
    Data(Vec<u8>),
    /// Level driven on a named line (dc is not recorded)
    Pin(&'static str, bool),
    /// Sleep in microseconds
    Delay(u32),
}

#[derive(Default)]
struct Log {
    events: Vec<Event>,
    dc_high: bool,
    busy_levels: VecDeque<bool>,
    busy_default: bool,
    /// Output level of every named line
    levels: HashMap<&'static str, bool>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeBus {
    log: Rc<RefCell<Log>>,
}

impl FakeBus {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn spi(&self) -> FakeSpi {
        FakeSpi {
            log: self.log.clone(),
        }
    }

    pub(crate) fn delay(&self) -> FakeDelay {
        FakeDelay {
            log: self.log.clone(),
        }
    }

    pub(crate) fn dc(&self) -> FakePin {
        self.pin("dc")
    }

    pub(crate) fn busy(&self) -> FakePin {
        self.pin("busy")
    }

    pub(crate) fn pin(&self, name: &'static str) -> FakePin {
        FakePin {
            log: self.log.clone(),
            name,
        }
    }

    /// Raw levels returned by the next reads of the busy line
    pub(crate) fn set_busy_levels(&self, levels: &[bool]) {
        self.log.borrow_mut().busy_levels = levels.iter().copied().collect();
    }

    /// Raw level returned once the scripted levels are used up
    pub(crate) fn set_busy_default(&self, level: bool) {
        self.log.borrow_mut().busy_default = level;
    }

    /// Forces the output level of a line without recording an event, as if
    /// something outside the driver drove it
    pub(crate) fn hold_level(&self, name: &'static str, level: bool) {
        self.log.borrow_mut().levels.insert(name, level);
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.log.borrow().events.clone()
    }

    pub(crate) fn events_of<F: Fn(&Event) -> bool>(&self, f: F) -> Vec<Event> {
        self.log
            .borrow()
            .events
            .iter()
            .filter(|e| f(e))
            .cloned()
            .collect()
    }

    pub(crate) fn count(&self, event: &Event) -> usize {
        self.log
            .borrow()
            .events
            .iter()
            .filter(|e| *e == event)
            .count()
    }

    pub(crate) fn clear(&self) {
        self.log.borrow_mut().events.clear();
    }

    /// Bus traffic grouped as (opcode, payload). Data written right after a command
    /// is appended to its payload, over as many writes as it took.
    pub(crate) fn commands(&self) -> Vec<(u8, Vec<u8>)> {
        let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
        for event in self.log.borrow().events.iter() {
            match event {
                Event::Cmd(c) => out.push((*c, Vec::new())),
                Event::Data(d) => match out.last_mut() {
                    Some((_, payload)) => payload.extend_from_slice(d),
                    None => panic!("data without a command"),
                },
                _ => {}
            }
        }
        out
    }

    /// Just the opcodes, in order
    pub(crate) fn opcodes(&self) -> Vec<u8> {
        self.commands().into_iter().map(|(c, _)| c).collect()
    }

    /// Payloads of every occurrence of `opcode`
    pub(crate) fn payloads(&self, opcode: u8) -> Vec<Vec<u8>> {
        self.commands()
            .into_iter()
            .filter(|(c, _)| *c == opcode)
            .map(|(_, d)| d)
            .collect()
    }

    pub(crate) fn total_delay_ms(&self) -> u32 {
        let us: u32 = self
            .log
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Delay(us) => Some(*us),
                _ => None,
            })
            .sum();
        us / 1_000
    }
}

pub(crate) struct FakeSpi {
    log: Rc<RefCell<Log>>,
}

impl SpiErrorType for FakeSpi {
    type Error = Infallible;
}

impl SpiDevice for FakeSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        let mut log = self.log.borrow_mut();
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                if log.dc_high {
                    log.events.push(Event::Data(bytes.to_vec()));
                } else {
                    for b in bytes.iter() {
                        log.events.push(Event::Cmd(*b));
                    }
                }
            }
        }
        Ok(())
    }
}

pub(crate) struct FakePin {
    log: Rc<RefCell<Log>>,
    name: &'static str,
}

impl FakePin {
    fn drive(&mut self, level: bool) {
        let mut log = self.log.borrow_mut();
        log.levels.insert(self.name, level);
        if self.name == "dc" {
            log.dc_high = level;
        } else {
            log.events.push(Event::Pin(self.name, level));
        }
    }
}

impl PinErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

impl StatefulOutputPin for FakePin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        let log = self.log.borrow();
        Ok(log.levels.get(self.name).copied().unwrap_or(false))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|level| !level)
    }
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut log = self.log.borrow_mut();
        let default = log.busy_default;
        Ok(log.busy_levels.pop_front().unwrap_or(default))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|level| !level)
    }
}

pub(crate) struct FakeDelay {
    log: Rc<RefCell<Log>>,
}

impl FakeDelay {
    fn record(&mut self, us: u32) {
        self.log.borrow_mut().events.push(Event::Delay(us));
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.record(ns / 1_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.record(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.record(ms.saturating_mul(1_000));
    }
}
