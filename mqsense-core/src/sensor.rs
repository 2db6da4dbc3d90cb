//! MQ Sensor Driver
//!
//! ## Pipeline
//!
//! ```text
//! VoltageSource ──► Rs (divider) ──► ratio (family, floor) ──► ppm (regression)
//!                                                                 │
//!                                              compensation (optional) ◄┘
//! ```
//!
//! [`MqSensor`] owns one voltage source, the immutable [`SensorProfile`]
//! chosen at construction, a mutable working copy of the regression
//! coefficients and the [`MeasurementState`] of the last cycle. All
//! operations take `&mut self`; a sensor is driven from one context at a
//! time.
//!
//! ## Lifecycle
//!
//! 1. Construct with a sensor type (and optionally a gas)
//! 2. `initialize()` to confirm the ADC is bound
//! 3. Preheat for `profile().preheat_seconds`
//! 4. `calibrate_in_clean_air()` or restore a stored baseline with `set_r0()`
//! 5. `read_sensor()` as often as needed
//!
//! ```rust
//! use mqsense_core::{MqSensor, SensorConfig, SensorType};
//! use mqsense_core::sampler::sim::FixedVoltage;
//!
//! let mut sensor = MqSensor::new(SensorType::Mq2, FixedVoltage::new(1.0), SensorConfig::default())?;
//! sensor.initialize()?;
//! sensor.calibrate_in_clean_air(0.0)?;
//!
//! // Same voltage as during calibration: ratio equals the clean-air ratio
//! let ppm = sensor.read_sensor(0.0)?;
//! assert!((sensor.ratio() - 9.83).abs() < 1e-3);
//! assert!(ppm > 0.0);
//! # Ok::<(), mqsense_core::SensorError>(())
//! ```

use crate::calibration::{CalibrationManager, CalibrationReport};
use crate::compensation::{Ambient, CompensationEngine};
use crate::config::SensorConfig;
use crate::errors::{SensorError, SensorResult};
use crate::profile::{GasType, RatioFamily, RegressionMethod, SensorProfile, SensorType};
use crate::ratio::compute_ratio;
use crate::regression::RegressionModel;
use crate::resistance::read_path_resistance;
use crate::sampler::{SampleMode, VoltageSource};
use crate::state::{MeasurementState, SensorState};

/// Driver for one MQ-series sensor
pub struct MqSensor<V> {
    profile: SensorProfile,
    model: RegressionModel,
    source: V,
    state: MeasurementState,
    compensation: CompensationEngine,
    calibration: CalibrationManager,
}

impl<V: VoltageSource> MqSensor<V> {
    /// Sensor measuring the model's default gas
    pub fn new(sensor: SensorType, source: V, config: SensorConfig) -> SensorResult<Self> {
        Self::with_profile(SensorProfile::default_for(sensor), source, config)
    }

    /// Sensor measuring a specific gas
    ///
    /// Fails with [`SensorError::ProfileNotFound`] when the model has no
    /// curve for that gas.
    pub fn with_gas(
        sensor: SensorType,
        gas: GasType,
        source: V,
        config: SensorConfig,
    ) -> SensorResult<Self> {
        Self::with_profile(SensorProfile::lookup(sensor, gas)?, source, config)
    }

    /// Sensor built from an explicit profile
    pub fn with_profile(profile: SensorProfile, source: V, config: SensorConfig) -> SensorResult<Self> {
        config.validate()?;

        Ok(Self {
            model: RegressionModel::from_profile(&profile),
            compensation: CompensationEngine::from_profile(&profile),
            calibration: CalibrationManager::new(),
            state: MeasurementState::new(&config),
            profile,
            source,
        })
    }

    /// Use a different number of calibration samples
    pub fn with_calibration(mut self, calibration: CalibrationManager) -> Self {
        self.calibration = calibration;
        self
    }

    /// Confirm the hardware is bound
    pub fn initialize(&mut self) -> SensorResult<()> {
        if !self.source.is_bound() {
            log_warn!("{}: no ADC channel bound", self.profile.sensor.name());
            return Err(SensorError::NoHardware);
        }

        log_info!(
            "{} ({}) initialized, preheat {} s, heater {} V",
            self.profile.sensor.name(),
            self.profile.gas.name(),
            self.profile.preheat_seconds,
            self.profile.heater_voltage
        );
        Ok(())
    }

    // ---- Calibration ----

    /// Calibrate against a known clean-air ratio, returning the baseline
    pub fn calibrate(&mut self, clean_air_ratio: f32, correction: f32) -> SensorResult<f32> {
        self.calibrate_with_report(clean_air_ratio, correction)
            .map(|report| report.r0)
    }

    /// Calibrate against the profile's clean-air ratio
    pub fn calibrate_in_clean_air(&mut self, correction: f32) -> SensorResult<f32> {
        self.calibrate(self.profile.clean_air_ratio, correction)
    }

    /// Calibrate and keep the per-sample detail
    ///
    /// On failure the previous state and baseline are kept.
    pub fn calibrate_with_report(
        &mut self,
        clean_air_ratio: f32,
        correction: f32,
    ) -> SensorResult<CalibrationReport> {
        let previous = self.state.state;
        self.state.state = SensorState::Calibrating;

        // Calibration divides with the nominal supply for every model
        let result = self.calibration.run(
            &mut self.source,
            self.state.vcc,
            self.state.rl,
            clean_air_ratio,
            correction,
        );
        self.sync_sample();

        match result {
            Ok(report) => {
                self.state.r0 = Some(report.r0);
                self.state.state = SensorState::Ready;
                Ok(report)
            }
            Err(e) => {
                log_warn!("{}: calibration failed", self.profile.sensor.name());
                self.state.state = previous;
                Err(e)
            }
        }
    }

    /// Restore a previously stored baseline
    pub fn set_r0(&mut self, r0: f32) -> SensorResult<()> {
        if !(r0.is_finite() && r0 >= 0.0) {
            return Err(SensorError::InvalidConfig { reason: "baseline must be finite and non-negative" });
        }
        self.state.r0 = Some(r0);
        self.state.state = SensorState::Ready;
        log_debug!("{}: baseline restored to {}", self.profile.sensor.name(), r0);
        Ok(())
    }

    // ---- Reading ----

    /// Sample and convert to ppm
    pub fn read_sensor(&mut self, correction: f32) -> SensorResult<f32> {
        self.read_with(self.profile.sensor.ratio_family(), correction)
    }

    /// Sample and convert to ppm using the inverted ratio `R0 / Rs`
    pub fn read_sensor_r0_rs(&mut self, correction: f32) -> SensorResult<f32> {
        self.read_with(RatioFamily::Inverted, correction)
    }

    /// Evaluate the regression for a caller-supplied ratio
    ///
    /// No sampling and no floor: a non-positive ratio yields 0.
    pub fn set_ratio_and_get_ppm(&mut self, ratio: f32) -> f32 {
        self.convert(ratio)
    }

    fn read_with(&mut self, family: RatioFamily, correction: f32) -> SensorResult<f32> {
        let r0 = self.baseline()?;
        let rs = self.measure_resistance()?;
        let ratio = compute_ratio(family, r0, rs, correction);
        Ok(self.convert(ratio))
    }

    fn baseline(&self) -> SensorResult<f32> {
        match (self.state.state, self.state.r0) {
            (SensorState::Ready, Some(r0)) => Ok(r0),
            _ => Err(SensorError::NotCalibrated),
        }
    }

    fn convert(&mut self, ratio: f32) -> f32 {
        self.state.ratio = ratio;

        let raw = self.model.evaluate(ratio);
        let ppm = self.compensation.apply(raw);
        if !self.profile.in_rated_range(ppm) {
            log_debug!(
                "{}: {} ppm outside rated range {}-{}",
                self.profile.gas.name(),
                ppm,
                self.profile.min_ppm,
                self.profile.max_ppm
            );
        }

        self.state.ppm = ppm;
        ppm
    }

    // ---- Voltage and resistance ----

    /// Sample the divider voltage without converting
    pub fn update(&mut self) -> SensorResult<f32> {
        self.voltage(SampleMode::Read)
    }

    /// Feed a raw code from an ADC the driver does not own
    pub fn set_adc(&mut self, code: u16) -> f32 {
        let volts = self.source.inject(code);
        self.sync_sample();
        volts
    }

    /// Feed a voltage measured by an external converter
    pub fn external_adc_update(&mut self, volts: f32) {
        self.source.store_voltage(volts);
        self.sync_sample();
    }

    /// Divider voltage served in the given mode
    pub fn voltage(&mut self, mode: SampleMode) -> SensorResult<f32> {
        let volts = self.source.voltage(mode)?;
        self.sync_sample();
        Ok(volts)
    }

    /// Sample and compute the sensor resistance on the read path
    pub fn measure_resistance(&mut self) -> SensorResult<f32> {
        let volts = self.voltage(SampleMode::Read)?;
        let rs = read_path_resistance(self.profile.sensor, self.state.vcc, self.state.rl, volts);
        self.state.rs_calc = rs;
        Ok(rs)
    }

    fn sync_sample(&mut self) {
        self.state.last_voltage = self.source.cached();
        self.state.last_raw_adc = self.source.last_raw();
    }

    // ---- Coefficients and board parameters ----

    /// Override the `a` coefficient, clamped to ±1e30
    pub fn set_a(&mut self, a: f32) {
        self.model.set_a(a);
    }

    /// Override the `b` coefficient, clamped to ±100
    pub fn set_b(&mut self, b: f32) {
        self.model.set_b(b);
    }

    /// Switch between the power-law and log-linear forms
    pub fn set_regression_method(&mut self, method: RegressionMethod) {
        self.model.set_method(method);
    }

    /// Change the load resistance (kΩ)
    pub fn set_rl(&mut self, rl: f32) -> SensorResult<()> {
        if !(rl.is_finite() && rl > 0.0) {
            return Err(SensorError::InvalidConfig { reason: "load resistance must be positive" });
        }
        self.state.rl = rl;
        Ok(())
    }

    /// Change the nominal supply voltage (V)
    pub fn set_vcc(&mut self, vcc: f32) -> SensorResult<()> {
        if !(vcc.is_finite() && vcc > 0.0) {
            return Err(SensorError::InvalidConfig { reason: "supply voltage must be positive" });
        }
        self.state.vcc = vcc;
        Ok(())
    }

    // ---- Compensation ----

    /// Toggle temperature compensation
    pub fn set_temperature_compensation(&mut self, enabled: bool) {
        self.compensation.set_temperature_enabled(enabled);
    }

    /// Toggle humidity compensation
    pub fn set_humidity_compensation(&mut self, enabled: bool) {
        self.compensation.set_humidity_enabled(enabled);
    }

    /// Record ambient temperature (°C) and relative humidity (%RH)
    ///
    /// Non-finite values fail with [`SensorError::InvalidConfig`] and leave
    /// the previous conditions in place.
    pub fn set_ambient(&mut self, temperature_c: f32, humidity_pct: f32) -> SensorResult<()> {
        self.compensation.set_ambient(Ambient { temperature_c, humidity_pct })
    }

    /// Drop the recorded ambient conditions
    pub fn clear_ambient(&mut self) {
        self.compensation.clear_ambient();
    }

    /// Compensation settings and ambient conditions
    pub fn compensation(&self) -> &CompensationEngine {
        &self.compensation
    }

    // ---- Accessors ----

    /// Working `a` coefficient
    pub fn a(&self) -> f32 {
        self.model.a()
    }

    /// Working `b` coefficient
    pub fn b(&self) -> f32 {
        self.model.b()
    }

    /// Calibrated baseline, `None` before calibration
    pub fn r0(&self) -> Option<f32> {
        self.state.r0
    }

    /// Load resistance RL (kΩ)
    pub fn rl(&self) -> f32 {
        self.state.rl
    }

    /// Nominal supply voltage; never includes the diode offset
    pub fn vcc(&self) -> f32 {
        self.state.vcc
    }

    /// Last raw ADC code
    pub fn adc(&self) -> f32 {
        self.state.last_raw_adc
    }

    /// Last divider voltage, without sampling
    pub fn last_voltage(&self) -> f32 {
        self.state.last_voltage
    }

    /// Last computed sensor resistance
    pub fn rs(&self) -> f32 {
        self.state.rs_calc
    }

    /// Last ratio fed to the regression
    pub fn ratio(&self) -> f32 {
        self.state.ratio
    }

    /// Last concentration (ppm)
    pub fn ppm(&self) -> f32 {
        self.state.ppm
    }

    /// Calibration lifecycle state
    pub fn state(&self) -> SensorState {
        self.state.state
    }

    /// Sensor model
    pub fn sensor_type(&self) -> SensorType {
        self.profile.sensor
    }

    /// Gas the profile measures
    pub fn gas(&self) -> GasType {
        self.profile.gas
    }

    /// Active regression form
    pub fn regression_method(&self) -> RegressionMethod {
        self.model.method()
    }

    /// Profile chosen at construction
    pub fn profile(&self) -> &SensorProfile {
        &self.profile
    }

    /// Snapshot of the last measurement cycle
    pub fn measurement(&self) -> &MeasurementState {
        &self.state
    }

    /// Voltage source
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Voltage source, mutably (rebinding or simulating)
    pub fn source_mut(&mut self) -> &mut V {
        &mut self.source
    }

    /// Give back the voltage source
    pub fn release(self) -> V {
        self.source
    }

    /// Emit the full sensor state as one log line
    pub fn log_summary(&self) {
        log_info!(
            "{} {}: state={} vcc={} rl={} adc={} v={} r0={} rs={} ratio={} ppm={} a={} b={}",
            self.profile.sensor.name(),
            self.profile.gas.name(),
            self.state.state.name(),
            self.state.vcc,
            self.state.rl,
            self.state.last_raw_adc,
            self.state.last_voltage,
            self.state.r0.unwrap_or(0.0),
            self.state.rs_calc,
            self.state.ratio,
            self.state.ppm,
            self.model.a(),
            self.model.b()
        );
    }
}
