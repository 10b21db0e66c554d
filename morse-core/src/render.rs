//! Seam for output renderers (LED, buzzer, radio keying)

use crate::time::Duration;
use crate::timing::TimingConfig;
use crate::types::Pulse;

/// Consumer of timed pulses, implemented by output drivers
pub trait PulseSink {
    type Error;

    /// Emit one key-down or key-up interval
    fn emit(&mut self, pulse: Pulse, duration: Duration) -> Result<(), Self::Error>;

    /// Called once after the last pulse of a batch
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: PulseSink + ?Sized> PulseSink for &mut S {
    type Error = S::Error;

    fn emit(&mut self, pulse: Pulse, duration: Duration) -> Result<(), Self::Error> {
        (**self).emit(pulse, duration)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (**self).finish()
    }
}

/// Feed pulses into a sink, returning the total length in units
pub fn render<I, S>(pulses: I, timing: &TimingConfig, sink: &mut S) -> Result<u32, S::Error>
where
    I: IntoIterator<Item = Pulse>,
    S: PulseSink + ?Sized,
{
    let mut total = 0;
    for pulse in pulses {
        sink.emit(pulse, timing.pulse_duration(pulse))?;
        total += pulse.units;
    }
    sink.finish()?;
    Ok(total)
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock sink for testing

    use super::*;
    use crate::error::CapacityError;
    use heapless::Vec;

    /// Records every pulse it receives
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pulses: Vec<(Pulse, Duration), 512>,
        finished: usize,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn pulses(&self) -> &[(Pulse, Duration)] {
            &self.pulses
        }

        /// Number of completed batches
        pub fn finished(&self) -> usize {
            self.finished
        }

        /// Sum of key-down time
        pub fn keyed_time(&self) -> Duration {
            self.pulses
                .iter()
                .filter(|(pulse, _)| pulse.signal_on)
                .fold(Duration::from_millis(0), |acc, (_, d)| acc + *d)
        }
    }

    impl PulseSink for RecordingSink {
        type Error = CapacityError;

        fn emit(&mut self, pulse: Pulse, duration: Duration) -> Result<(), Self::Error> {
            self.pulses.push((pulse, duration)).map_err(|_| CapacityError)
        }

        fn finish(&mut self) -> Result<(), Self::Error> {
            self.finished += 1;
            Ok(())
        }
    }
}
