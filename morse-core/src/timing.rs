//! Timing model: unit duration and the 1/3/7 element ratios

use core::fmt;

use crate::error::ConfigError;
use crate::time::Duration;
use crate::types::{Element, Pulse};

/// Default speed used on reset
pub const DEFAULT_WPM: u32 = 20;

/// Timing configuration for rendering a sequence as pulses
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Basic timing unit (dot duration)
    pub unit: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            unit: Duration::from_millis(60), // 20 WPM
        }
    }
}

impl TimingConfig {
    /// Create a configuration from a speed in words per minute
    pub fn from_wpm(wpm: u32) -> Result<Self, ConfigError> {
        if wpm == 0 || wpm > 100 {
            return Err(ConfigError::SpeedOutOfRange(wpm));
        }

        // PARIS standard: 50 units per word
        Ok(Self {
            unit: Duration::from_millis(1200 / wpm as u64),
        })
    }

    /// Get Words Per Minute from current unit timing
    pub fn wpm(&self) -> u32 {
        let unit_ms = self.unit.as_millis().max(1);
        u32::try_from(1200 / unit_ms).unwrap_or(u32::MAX).max(1)
    }

    /// Duration of `units` timing units
    pub fn units(&self, units: u32) -> Duration {
        self.unit * units
    }

    pub fn dot(&self) -> Duration {
        self.units(1)
    }

    pub fn dash(&self) -> Duration {
        self.units(3)
    }

    /// Gap between symbols of one character
    pub fn symbol_gap(&self) -> Duration {
        self.units(1)
    }

    /// Gap between characters
    pub fn char_gap(&self) -> Duration {
        self.units(3)
    }

    pub fn word_gap(&self) -> Duration {
        self.units(7)
    }

    pub fn element_duration(&self, element: Element) -> Duration {
        self.units(element.duration_units())
    }

    pub fn pulse_duration(&self, pulse: Pulse) -> Duration {
        self.units(pulse.units)
    }
}

/// Protocol form: `unit=60ms dot=60ms dash=180ms gap=60ms char=180ms word=420ms`
impl fmt::Display for TimingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unit={}ms dot={}ms dash={}ms gap={}ms char={}ms word={}ms",
            self.unit.as_millis(),
            self.dot().as_millis(),
            self.dash().as_millis(),
            self.symbol_gap().as_millis(),
            self.char_gap().as_millis(),
            self.word_gap().as_millis(),
        )
    }
}
