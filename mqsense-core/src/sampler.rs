//! Averaged Voltage Sampling
//!
//! ## Capability Split
//!
//! The engine never touches ADC registers. Platform code provides two small
//! capabilities and the sampler composes them:
//!
//! - [`AdcChannel`]: one raw conversion, polled through `nb` so a HAL can
//!   report "conversion still running" without blocking inside the driver.
//! - [`DelayNs`]: the blocking inter-sample delay from `embedded-hal`.
//!
//! The driver itself only sees a [`VoltageSource`], so tests and host tools
//! can substitute a fixed or scripted source.
//!
//! ## Conversion
//!
//! ```text
//! V = mean(raw[0..retries]) × Vref / (2^bits - 1)
//! ```
//!
//! One sample blocks for `retries × retry_interval_ms`.
//!
//! ## Sampling Modes
//!
//! | Mode              | Touches hardware | Updates cache |
//! |-------------------|------------------|---------------|
//! | `Read`            | yes              | yes           |
//! | `Injected(code)`  | no               | yes           |
//! | `Cached`          | no               | no            |

use embedded_hal::delay::DelayNs;

use crate::config::SensorConfig;
use crate::errors::{SensorError, SensorResult};

/// One ADC channel wired to the sensor divider
///
/// Implement this over the platform HAL. `read_raw` starts or polls a single
/// conversion and returns `nb::Error::WouldBlock` until it completes.
pub trait AdcChannel {
    /// HAL-specific conversion error
    type Error: core::fmt::Debug;

    /// Raw conversion result in counts
    fn read_raw(&mut self) -> nb::Result<u16, Self::Error>;
}

impl<T: AdcChannel + ?Sized> AdcChannel for &mut T {
    type Error = T::Error;

    fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
        (**self).read_raw()
    }
}

/// How a voltage request is served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMode {
    /// Average fresh conversions from the ADC
    Read,
    /// Convert the given code without touching hardware
    Injected(u16),
    /// Return the last voltage without sampling
    Cached,
}

/// Source of the divider voltage
pub trait VoltageSource {
    /// Whether a hardware channel is attached
    fn is_bound(&self) -> bool;

    /// Average fresh conversions and cache the result
    fn sample(&mut self) -> SensorResult<f32>;

    /// Convert a raw code as if the ADC had produced it
    fn inject(&mut self, code: u16) -> f32;

    /// Store a voltage measured elsewhere (external ADC)
    fn store_voltage(&mut self, volts: f32);

    /// Last voltage produced by `sample`, `inject` or `store_voltage`
    fn cached(&self) -> f32;

    /// Last raw conversion result in counts
    fn last_raw(&self) -> f32;

    /// Serve a request in the given mode
    fn voltage(&mut self, mode: SampleMode) -> SensorResult<f32> {
        match mode {
            SampleMode::Read => self.sample(),
            SampleMode::Injected(code) => Ok(self.inject(code)),
            SampleMode::Cached => Ok(self.cached()),
        }
    }
}

/// ADC-backed voltage source
///
/// Holds the channel as an `Option` so a sensor can be constructed before
/// its hardware is wired; sampling an unbound sampler reports
/// [`SensorError::NoHardware`].
pub struct VoltageSampler<A, D> {
    adc: Option<A>,
    delay: D,
    vref: f32,
    full_scale: f32,
    retries: u8,
    retry_interval_ms: u32,
    last_raw: f32,
    last_voltage: f32,
}

impl<A: AdcChannel, D: DelayNs> VoltageSampler<A, D> {
    /// Sampler over a bound channel
    pub fn new(adc: A, delay: D, config: &SensorConfig) -> Self {
        Self::with_channel(Some(adc), delay, config)
    }

    /// Sampler with no hardware attached yet
    pub fn unbound(delay: D, config: &SensorConfig) -> Self {
        Self::with_channel(None, delay, config)
    }

    fn with_channel(adc: Option<A>, delay: D, config: &SensorConfig) -> Self {
        Self {
            adc,
            delay,
            vref: config.adc_vref,
            full_scale: config.full_scale_counts(),
            retries: config.retries.max(1),
            retry_interval_ms: config.retry_interval_ms,
            last_raw: 0.0,
            last_voltage: 0.0,
        }
    }

    /// Attach or replace the ADC channel
    pub fn bind(&mut self, adc: A) {
        self.adc = Some(adc);
    }

    /// Detach the ADC channel, returning it
    pub fn release(&mut self) -> Option<A> {
        self.adc.take()
    }

    /// Delay provider used between conversions
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// ADC reference voltage (V)
    pub fn vref(&self) -> f32 {
        self.vref
    }

    /// Largest code the ADC can produce
    pub fn full_scale(&self) -> f32 {
        self.full_scale
    }

    /// Convert counts to volts
    pub fn counts_to_volts(&self, counts: f32) -> f32 {
        counts * self.vref / self.full_scale
    }
}

impl<A: AdcChannel, D: DelayNs> VoltageSource for VoltageSampler<A, D> {
    fn is_bound(&self) -> bool {
        self.adc.is_some()
    }

    fn sample(&mut self) -> SensorResult<f32> {
        let adc = self.adc.as_mut().ok_or(SensorError::NoHardware)?;

        let mut sum = 0.0f32;
        for _ in 0..self.retries {
            let raw = nb::block!(adc.read_raw()).map_err(|_| {
                log_warn!("ADC conversion failed");
                SensorError::AdcRead
            })?;
            self.last_raw = raw as f32;
            sum += raw as f32;
            self.delay.delay_ms(self.retry_interval_ms);
        }

        let avg = sum / self.retries as f32;
        self.last_voltage = self.counts_to_volts(avg);
        Ok(self.last_voltage)
    }

    fn inject(&mut self, code: u16) -> f32 {
        self.last_raw = code as f32;
        self.last_voltage = self.counts_to_volts(code as f32);
        self.last_voltage
    }

    fn store_voltage(&mut self, volts: f32) {
        self.last_voltage = volts;
    }

    fn cached(&self) -> f32 {
        self.last_voltage
    }

    fn last_raw(&self) -> f32 {
        self.last_raw
    }
}

/// Host-side stand-ins for hardware
///
/// Used by the test suites and for bench-top runs without an ADC.
pub mod sim {
    use core::convert::Infallible;

    use embedded_hal::delay::DelayNs;

    use super::{AdcChannel, SampleMode, VoltageSource};
    use crate::errors::SensorResult;

    /// ADC that always converts to the same code
    #[derive(Debug, Clone, Copy)]
    pub struct FixedAdc {
        code: u16,
        conversions: u32,
    }

    impl FixedAdc {
        /// Channel that reads `code` on every conversion
        pub fn new(code: u16) -> Self {
            Self { code, conversions: 0 }
        }

        /// Change the code returned from now on
        pub fn set(&mut self, code: u16) {
            self.code = code;
        }

        /// Number of conversions performed so far
        pub fn conversions(&self) -> u32 {
            self.conversions
        }
    }

    impl AdcChannel for FixedAdc {
        type Error = Infallible;

        fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
            self.conversions += 1;
            Ok(self.code)
        }
    }

    /// Conversion error from a [`ScriptedAdc`] with no codes
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EmptyScript;

    /// ADC that cycles through a fixed sequence of codes
    ///
    /// An empty script fails every conversion with [`EmptyScript`].
    #[derive(Debug, Clone)]
    pub struct ScriptedAdc<const N: usize> {
        codes: [u16; N],
        next: usize,
    }

    impl<const N: usize> ScriptedAdc<N> {
        /// Channel returning `codes` in order, wrapping around
        pub fn new(codes: [u16; N]) -> Self {
            Self { codes, next: 0 }
        }
    }

    impl<const N: usize> AdcChannel for ScriptedAdc<N> {
        type Error = EmptyScript;

        fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
            let code = *self.codes.get(self.next).ok_or(nb::Error::Other(EmptyScript))?;
            self.next = if self.next + 1 < N { self.next + 1 } else { 0 };
            Ok(code)
        }
    }

    /// Delay that returns immediately and tallies the requested time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SimDelay {
        elapsed_ns: u64,
    }

    impl SimDelay {
        /// Delay with nothing elapsed
        pub fn new() -> Self {
            Self::default()
        }

        /// Total requested delay in milliseconds
        pub fn elapsed_ms(&self) -> u64 {
            self.elapsed_ns / 1_000_000
        }
    }

    impl DelayNs for SimDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.elapsed_ns += ns as u64;
        }
    }

    /// Voltage source pinned to a value, for bypassing the ADC entirely
    #[derive(Debug, Clone, Copy)]
    pub struct FixedVoltage {
        volts: f32,
        vref: f32,
        full_scale: f32,
    }

    impl FixedVoltage {
        /// Source that always reports `volts` against a 10-bit, 5 V converter
        pub fn new(volts: f32) -> Self {
            Self { volts, vref: 5.0, full_scale: 1023.0 }
        }

        /// Change the reported voltage
        pub fn set(&mut self, volts: f32) {
            self.volts = volts;
        }
    }

    impl VoltageSource for FixedVoltage {
        fn is_bound(&self) -> bool {
            true
        }

        fn sample(&mut self) -> SensorResult<f32> {
            Ok(self.volts)
        }

        fn inject(&mut self, code: u16) -> f32 {
            self.volts = code as f32 * self.vref / self.full_scale;
            self.volts
        }

        fn store_voltage(&mut self, volts: f32) {
            self.volts = volts;
        }

        fn cached(&self) -> f32 {
            self.volts
        }

        fn last_raw(&self) -> f32 {
            self.volts * self.full_scale / self.vref
        }

        fn voltage(&mut self, mode: SampleMode) -> SensorResult<f32> {
            match mode {
                SampleMode::Injected(code) => Ok(self.inject(code)),
                _ => Ok(self.volts),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::sim::{EmptyScript, FixedAdc, ScriptedAdc, SimDelay};
    use super::*;

    struct BrokenAdc;

    impl AdcChannel for BrokenAdc {
        type Error = ();

        fn read_raw(&mut self) -> nb::Result<u16, Self::Error> {
            Err(nb::Error::Other(()))
        }
    }

    fn config() -> SensorConfig {
        SensorConfig {
            adc_bits: 10,
            adc_vref: 5.0,
            retries: 4,
            retry_interval_ms: 20,
            ..SensorConfig::default()
        }
    }

    #[test]
    fn averages_and_converts() {
        let adc = ScriptedAdc::new([100, 200, 300, 400]);
        let mut sampler = VoltageSampler::new(adc, SimDelay::new(), &config());

        let v = sampler.sample().unwrap();
        // mean 250 counts of 1023 at 5 V
        assert!((v - 250.0 * 5.0 / 1023.0).abs() < 1e-5);
        assert_eq!(sampler.cached(), v);
        assert_eq!(sampler.last_raw(), 400.0);
    }

    #[test]
    fn sampling_blocks_for_retries_times_interval() {
        let mut sampler = VoltageSampler::new(FixedAdc::new(512), SimDelay::new(), &config());
        sampler.sample().unwrap();
        assert_eq!(sampler.delay.elapsed_ms(), 4 * 20);
    }

    #[test]
    fn injection_bypasses_hardware() {
        let mut sampler = VoltageSampler::new(FixedAdc::new(0), SimDelay::new(), &config());
        let v = sampler.voltage(SampleMode::Injected(1023)).unwrap();
        assert!((v - 5.0).abs() < 1e-6);
        assert_eq!(sampler.adc.as_ref().map(|a| a.conversions()), Some(0));
    }

    #[test]
    fn cached_mode_does_not_sample() {
        let mut sampler = VoltageSampler::new(FixedAdc::new(1023), SimDelay::new(), &config());
        assert_eq!(sampler.voltage(SampleMode::Cached).unwrap(), 0.0);

        sampler.sample().unwrap();
        let before = sampler.adc.as_ref().map(|a| a.conversions());
        let cached = sampler.voltage(SampleMode::Cached).unwrap();
        assert!((cached - 5.0).abs() < 1e-6);
        assert_eq!(sampler.adc.as_ref().map(|a| a.conversions()), before);
    }

    #[test]
    fn unbound_sampler_reports_no_hardware() {
        let mut sampler: VoltageSampler<FixedAdc, SimDelay> =
            VoltageSampler::unbound(SimDelay::new(), &config());
        assert!(!sampler.is_bound());
        assert_eq!(sampler.sample(), Err(SensorError::NoHardware));

        sampler.bind(FixedAdc::new(10));
        assert!(sampler.is_bound());
        assert!(sampler.sample().is_ok());
    }

    #[test]
    fn conversion_failure_surfaces() {
        let mut sampler = VoltageSampler::new(BrokenAdc, SimDelay::new(), &config());
        assert_eq!(sampler.sample(), Err(SensorError::AdcRead));
    }

    #[test]
    fn empty_script_fails_conversion() {
        let mut adc = ScriptedAdc::new([]);
        assert_eq!(adc.read_raw(), Err(nb::Error::Other(EmptyScript)));

        let mut sampler = VoltageSampler::new(ScriptedAdc::new([]), SimDelay::new(), &config());
        assert_eq!(sampler.sample(), Err(SensorError::AdcRead));
    }

    #[test]
    fn resolution_is_readable() {
        let config = SensorConfig { adc_bits: 12, adc_vref: 3.3, ..SensorConfig::default() };
        let sampler = VoltageSampler::new(FixedAdc::new(0), SimDelay::new(), &config);
        assert_eq!(sampler.vref(), 3.3);
        assert_eq!(sampler.full_scale(), 4095.0);
        assert!((sampler.counts_to_volts(4095.0) - 3.3).abs() < 1e-6);
    }
}
