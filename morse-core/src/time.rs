//! Time types used by the timing model

// Re-export the duration type based on feature
#[cfg(feature = "embassy-time")]
pub use embassy_time::Duration;

#[cfg(not(feature = "embassy-time"))]
pub use self::host_time::Duration;

#[cfg(not(feature = "embassy-time"))]
mod host_time {
    /// Millisecond duration for builds without embassy-time
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Duration(u64);

    impl Duration {
        pub const fn from_millis(ms: u64) -> Self {
            Self(ms)
        }

        pub const fn as_millis(&self) -> u64 {
            self.0
        }
    }

    impl core::ops::Mul<u32> for Duration {
        type Output = Duration;

        fn mul(self, rhs: u32) -> Duration {
            Duration(self.0 * rhs as u64)
        }
    }

    impl core::ops::Add for Duration {
        type Output = Duration;

        fn add(self, rhs: Duration) -> Duration {
            Duration(self.0 + rhs.0)
        }
    }
}
