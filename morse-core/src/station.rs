//! Line-oriented transmitter station
//!
//! Accepts one command per line, the way the serial front end of a keyer
//! talks to it: plain text is encoded and queued as pulses, while `STOP`,
//! `RESET`, `TIMINGS`, `LAST` and `WPM <n>` control the station. A renderer
//! drains the queue with [`Station::next_pulse`] or [`Station::drain_into`].

use core::fmt;

use heapless::{Deque, String};

use crate::codec::{Codec, Outcome};
use crate::error::ConfigError;
use crate::render::{render, PulseSink};
use crate::table::SymbolTable;
use crate::time::Duration;
use crate::timing::TimingConfig;
use crate::types::{Element, Pulse};

/// Pulses the station can hold before refusing new messages
pub const PULSE_QUEUE_CAPACITY: usize = 1024;
/// Bytes of Morse text remembered for `LAST`
pub const LAST_CAPACITY: usize = 2048;

/// Station commands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// Encode and queue this text
    Transmit(&'a str),
    /// Drop every queued pulse
    Stop,
    /// Restore default timing
    Reset,
    /// Report current timing
    Timings,
    /// Report last transmitted message
    Last,
    /// Change speed in words per minute
    Speed(u32),
}

impl<'a> Command<'a> {
    /// Parse one protocol line; keywords are case-insensitive
    pub fn parse(line: &'a str) -> Result<Self, StationError> {
        let line = line.trim_end_matches(&['\r', '\n'][..]).trim();
        if line.is_empty() {
            return Err(StationError::EmptyMessage);
        }

        let mut words = line.split_whitespace();
        let (Some(keyword), argument, None) = (words.next(), words.next(), words.next()) else {
            return Ok(Command::Transmit(line));
        };

        let command = match argument {
            None if keyword.eq_ignore_ascii_case("STOP") => Command::Stop,
            None if keyword.eq_ignore_ascii_case("RESET") => Command::Reset,
            None if keyword.eq_ignore_ascii_case("TIMINGS") => Command::Timings,
            None if keyword.eq_ignore_ascii_case("LAST") => Command::Last,
            Some(value) if keyword.eq_ignore_ascii_case("WPM") => {
                let wpm = value.parse().map_err(|_| StationError::InvalidSpeed)?;
                Command::Speed(wpm)
            }
            _ => Command::Transmit(line),
        };
        Ok(command)
    }
}

/// Station-level failures, reported as `ERR` responses
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StationError {
    /// Blank line or whitespace-only text
    EmptyMessage,
    /// `WPM` argument is not a number
    InvalidSpeed,
    /// Timing rejected
    Config(ConfigError),
    /// Message does not fit the encode buffers
    TooLong,
    /// Not enough room left in the pulse queue
    QueueFull,
    /// No character of the message is supported
    Unsupported { errors: usize },
}

impl fmt::Display for StationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationError::EmptyMessage => write!(f, "empty message"),
            StationError::InvalidSpeed => write!(f, "invalid speed"),
            StationError::Config(error) => write!(f, "{}", error),
            StationError::TooLong => write!(f, "message too long"),
            StationError::QueueFull => write!(f, "transmit queue full"),
            StationError::Unsupported { errors } => {
                write!(f, "no supported characters ({} rejected)", errors)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StationError {}

/// Reply to one command line
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Response<'s> {
    Transmitted { morse: &'s str, skipped: usize },
    Stopped { cleared: usize },
    Reset(TimingConfig),
    Timings(TimingConfig),
    Last(Option<&'s str>),
    Speed(u32),
    Error(StationError),
}

impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Transmitted { morse, skipped: 0 } => write!(f, "TX {}", morse),
            Response::Transmitted { morse, skipped } => write!(f, "TX {} ({} skipped)", morse, skipped),
            Response::Stopped { .. } => write!(f, "STOPPED"),
            Response::Reset(timing) => write!(f, "RESET {}", timing),
            Response::Timings(timing) => write!(f, "TIMINGS {}", timing),
            Response::Last(Some(morse)) => write!(f, "LAST {}", morse),
            Response::Last(None) => write!(f, "LAST (none)"),
            Response::Speed(wpm) => write!(f, "WPM {}", wpm),
            Response::Error(error) => write!(f, "ERR {}", error),
        }
    }
}

/// Transmitter state: timing, pending pulses and the last message
pub struct Station<'t> {
    codec: Codec<'t>,
    timing: TimingConfig,
    queue: Deque<Pulse, PULSE_QUEUE_CAPACITY>,
    last: Option<String<LAST_CAPACITY>>,
}

impl<'t> Station<'t> {
    pub fn new(table: &'t SymbolTable, timing: TimingConfig) -> Self {
        Self {
            codec: Codec::new(table),
            timing,
            queue: Deque::new(),
            last: None,
        }
    }

    /// Parse and execute one protocol line
    pub fn handle(&mut self, line: &str) -> Response<'_> {
        match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(error) => Response::Error(error),
        }
    }

    pub fn execute(&mut self, command: Command<'_>) -> Response<'_> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Station command: {}", defmt::Debug2Format(&command));

        match command {
            Command::Transmit(text) => match self.transmit(text) {
                Ok(skipped) => Response::Transmitted {
                    morse: self.last().unwrap_or(""),
                    skipped,
                },
                Err(error) => Response::Error(error),
            },
            Command::Stop => Response::Stopped { cleared: self.stop() },
            Command::Reset => {
                self.reset();
                Response::Reset(self.timing)
            }
            Command::Timings => Response::Timings(self.timing),
            Command::Last => Response::Last(self.last()),
            Command::Speed(wpm) => match self.set_speed(wpm) {
                Ok(()) => Response::Speed(wpm),
                Err(error) => Response::Error(error),
            },
        }
    }

    /// Encode `text` and queue its pulses; returns the number of skipped characters
    ///
    /// A message queued behind another one is separated from it by a word gap.
    pub fn transmit(&mut self, text: &str) -> Result<usize, StationError> {
        let encoded = self.codec.encode(text).map_err(|_| StationError::TooLong)?;
        if let Outcome::Impossible { errors } = encoded.outcome() {
            return Err(StationError::Unsupported { errors });
        }
        let sequence = &encoded.output;
        if sequence.is_empty() {
            return Err(StationError::EmptyMessage);
        }

        let separator = !self.queue.is_empty();
        let needed = sequence.len() + separator as usize;
        if self.queue.capacity() - self.queue.len() < needed {
            return Err(StationError::QueueFull);
        }
        let morse: String<LAST_CAPACITY> = sequence.to_text().map_err(|_| StationError::TooLong)?;

        if separator {
            self.enqueue(Element::WordGap.to_pulse())?;
        }
        for pulse in sequence.pulses() {
            self.enqueue(pulse)?;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Queued {} letters, {} pulses pending", sequence.letter_count(), self.queue.len());

        self.last = Some(morse);
        Ok(encoded.issues.len())
    }

    fn enqueue(&mut self, pulse: Pulse) -> Result<(), StationError> {
        self.queue.push_back(pulse).map_err(|_| StationError::QueueFull)
    }

    /// Drop pending pulses; returns how many were dropped
    pub fn stop(&mut self) -> usize {
        let cleared = self.queue.len();
        self.queue.clear();

        #[cfg(feature = "defmt")]
        defmt::info!("Transmission stopped, {} pulses cleared", cleared);

        cleared
    }

    /// Restore default timing
    pub fn reset(&mut self) {
        self.timing = TimingConfig::default();
    }

    pub fn set_speed(&mut self, wpm: u32) -> Result<(), StationError> {
        self.timing = TimingConfig::from_wpm(wpm).map_err(StationError::Config)?;
        Ok(())
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Wire text of the last queued message
    pub fn last(&self) -> Option<&str> {
        self.last.as_ref().map(|morse| morse.as_str())
    }

    /// Pulses waiting for the renderer
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take the next pulse with its duration under the current timing
    pub fn next_pulse(&mut self) -> Option<(Pulse, Duration)> {
        let pulse = self.queue.pop_front()?;
        Some((pulse, self.timing.pulse_duration(pulse)))
    }

    /// Hand every pending pulse to `sink`; returns the units rendered
    pub fn drain_into<S: PulseSink + ?Sized>(&mut self, sink: &mut S) -> Result<u32, S::Error> {
        let timing = self.timing;
        let queue = &mut self.queue;
        render(core::iter::from_fn(|| queue.pop_front()), &timing, sink)
    }
}
