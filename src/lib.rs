//! This crate provides a platform agnostic no_std driver for the APDS-9960 digital proximity,
//! ambient light, RGB and gesture sensor.
//! The driver is compatible with the [`embedded-hal`](https://crates.io/crates/embedded-hal) traits.
//!
//! The datasheet of the sensor can be found [here](https://docs.broadcom.com/docs/AV02-4191EN).
//!
//! ## Supported features
//! * Gesture detection (up, down, left, right, near, far)
//! * Ambient light and RGB color readings
//! * Proximity readings
//! * Configurable gains, LED drive/boost, thresholds and interrupt enables
//! * Async (behind the `async` feature)
//!
//! ## Unsupported features
//! * Calibration of the photodiode offsets
//! * Power management beyond switching the engines on and off
//!
//! ## Usage
//!
//! ### Detecting gestures
//!
//! ```rust,no_run
//! use apds9960::{Direction, APDS9960};
//! use embedded_hal_mock::delay::MockNoop;
//! use embedded_hal_mock::i2c::Mock as I2cMock;
//!
//! let mut delay = MockNoop::new();
//! let mut i2c = I2cMock::new(&[]);
//! let mut sensor: APDS9960<I2cMock, MockNoop> = APDS9960::new();
//!
//! sensor.init(&mut i2c).unwrap();
//! sensor.enable_gesture_sensor(false, &mut i2c).unwrap();
//!
//! loop {
//!     if sensor.is_gesture_available(&mut i2c).unwrap() {
//!         // Blocks until the hand has left the sensor
//!         match sensor.read_gesture(&mut delay, &mut i2c).unwrap() {
//!             Direction::None => {}
//!             direction => println!("Gesture: {}", direction),
//!         }
//!     }
//! }
//! ```
//!
//! ### Bounding the gesture read
//!
//! A hand hovering over the sensor keeps the gesture engine busy. Use
//! `read_gesture_with_deadline` to give up after a given time:
//!
//! ```rust,no_run
//! use apds9960::{APDS9960Error, APDS9960};
//! use embedded_hal_mock::delay::MockNoop;
//! use embedded_hal_mock::i2c::Mock as I2cMock;
//!
//! let mut delay = MockNoop::new();
//! let mut i2c = I2cMock::new(&[]);
//! let mut sensor: APDS9960<I2cMock, MockNoop> = APDS9960::new();
//!
//! match sensor.read_gesture_with_deadline(&mut delay, &mut i2c, 2000) {
//!     Ok(direction) => println!("Gesture: {}", direction),
//!     Err(APDS9960Error::GestureTimeout) => println!("Gave up waiting"),
//!     Err(e) => println!("Error reading sensor: {:?}", e),
//! }
//! ```
//!
//! ### Reading light and proximity
//!
//! ```rust,no_run
//! use apds9960::APDS9960;
//! use embedded_hal_mock::delay::MockNoop;
//! use embedded_hal_mock::i2c::Mock as I2cMock;
//!
//! let mut i2c = I2cMock::new(&[]);
//! let mut sensor: APDS9960<I2cMock, MockNoop> = APDS9960::new();
//!
//! sensor.init(&mut i2c).unwrap();
//! sensor.enable_light_sensor(false, &mut i2c).unwrap();
//! sensor.enable_proximity_sensor(false, &mut i2c).unwrap();
//!
//! let color = sensor.read_color_data(&mut i2c).unwrap();
//! let proximity = sensor.read_proximity(&mut i2c).unwrap();
//! println!("{:?}, proximity {}", color, proximity);
//! ```

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "async")]
mod r#async;
pub mod gesture;
pub mod session;

pub use gesture::{Direction, GestureBuffer, Sample, SessionState, StableState};
pub use session::{GestureSession, SampleSource, SessionError, FIFO_PAUSE_TIME_MS};

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use gesture::GESTURE_FIFO_DEPTH;

/// I2C address for the APDS-9960 sensor.
pub const APDS9960_ADDR: u8 = 0x39;

/// Accepted values of the ID register.
const APDS9960_IDS: [u8; 2] = [0xAB, 0x9C];

// ENABLE register bits
const ENABLE_PON: u8 = 0b0000_0001;
const ENABLE_GEN: u8 = 0b0100_0000;

/// GVALID bit of the GSTATUS register.
const GSTATUS_GVALID: u8 = 0b0000_0001;

/// AVALID bit of the STATUS register.
const STATUS_AVALID: u8 = 0b0000_0001;

/// Largest FIFO burst in bytes (32 rows of U/D/L/R).
const FIFO_BURST_LEN: usize = GESTURE_FIFO_DEPTH * 4;

const DEFAULT_LED_DRIVE: LedDrive = LedDrive::Ma100;
const DEFAULT_PROXIMITY_GAIN: ProximityGain = ProximityGain::X4;
const DEFAULT_AMBIENT_LIGHT_GAIN: AmbientLightGain = AmbientLightGain::X4;

/// Register values programmed by `init`, in write order.
const DEFAULT_REGISTERS: [(Register, u8); 26] = [
    (Register::WTime, 246), // 27 ms
    (Register::PPulse, 0x87), // 16 us, 8 pulses
    (Register::POffsetUr, 0),
    (Register::POffsetDl, 0),
    (Register::Config1, 0x60), // no 12x wait factor
    (
        Register::Control,
        DEFAULT_LED_DRIVE.into_reg_value() << 6
            | DEFAULT_PROXIMITY_GAIN.into_reg_value() << 2
            | DEFAULT_AMBIENT_LIGHT_GAIN.into_reg_value(),
    ),
    (Register::PiLt, 0),
    (Register::PiHt, 50),
    // low threshold above high threshold forces an interrupt for calibration
    (Register::AiLtL, 0xFF),
    (Register::AiLtH, 0xFF),
    (Register::AiHtL, 0),
    (Register::AiHtH, 0),
    (Register::Pers, 0x11), // 2 consecutive proximity or ALS values for interrupt
    (Register::Config2, 0x01), // no saturation interrupts or LED boost
    (Register::Config3, 0), // all photodiodes enabled
    (Register::GPEnTh, 40),
    (Register::GExTh, 30),
    (Register::GConf1, 0x40), // 4 gesture events for interrupt, 1 for exit
    (
        Register::GConf2,
        GestureGain::X4.into_reg_value() << 5
            | LedDrive::Ma100.into_reg_value() << 3
            | GestureWaitTime::Ms2_8.into_reg_value(),
    ),
    (Register::GOffsetU, 0),
    (Register::GOffsetD, 0),
    (Register::GOffsetL, 0),
    (Register::GOffsetR, 0),
    (Register::GPulse, 0xC9), // 32 us, 10 pulses
    (Register::GConf3, 0), // all photodiodes active during gesture
    (Register::GConf4, 0), // gesture mode and interrupts off
];

/// Represents an I2C-connected APDS-9960 sensor.
#[derive(Clone, Debug)]
pub struct APDS9960<I2C, D> {
    /// Marker to satisfy the compiler.
    _delay: core::marker::PhantomData<D>,

    /// I2C Interface for communicating with the sensor.
    _i2c: core::marker::PhantomData<I2C>,

    /// Gesture session of this device, reused across gesture reads.
    session: GestureSession,
}

impl<I2C, D> Default for APDS9960<I2C, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I2C, D> APDS9960<I2C, D> {
    /// Creates a driver instance without talking to the sensor.
    ///
    /// Call `init` (or `init_async`) before using the sensor.
    pub fn new() -> Self {
        Self {
            _delay: core::marker::PhantomData,
            _i2c: core::marker::PhantomData,
            session: GestureSession::new(),
        }
    }

    /// Accumulated state of the gesture session.
    pub fn gesture_state(&self) -> &SessionState {
        self.session.state()
    }

    /// Discards all gesture data collected so far.
    pub fn reset_gesture_parameters(&mut self) {
        self.session.reset();
    }
}

impl<I2C, D> APDS9960<I2C, D>
where
    D: DelayMs<u32>,
    I2C: Write + WriteRead,
{
    /// Checks the device ID and programs the default configuration.
    ///
    /// All engines are switched off afterwards.
    pub fn init(&mut self, i2c: &mut I2C) -> Result<()> {
        let id = self.read_id(i2c)?;
        if !APDS9960_IDS.contains(&id) {
            log::error!("Unexpected device ID: 0x{:02X}", id);
            return Err(APDS9960Error::InvalidDeviceId);
        }
        log::info!("Device ID: 0x{:02X}", id);

        self.set_mode(Mode::All, false, i2c)?;
        for (register, value) in DEFAULT_REGISTERS {
            self.write_register(register, value, i2c)?;
        }

        Ok(())
    }

    /// Reads the device ID.
    pub fn read_id(&mut self, i2c: &mut I2C) -> Result<u8> {
        self.read_register(Register::ID, i2c)
    }

    /// Reads the raw ENABLE register.
    pub fn read_mode(&mut self, i2c: &mut I2C) -> Result<u8> {
        self.read_register(Register::Enable, i2c)
    }

    /// Enables or disables a single engine, or all of them with `Mode::All`.
    pub fn set_mode(&mut self, mode: Mode, enable: bool, i2c: &mut I2C) -> Result<()> {
        let enable_register_value = match mode {
            Mode::All => {
                if enable {
                    0x7F
                } else {
                    0x00
                }
            }
            _ => {
                let current = self.read_mode(i2c)?;
                let bit = 1 << mode.into_reg_value();
                if enable {
                    current | bit
                } else {
                    current & !bit
                }
            }
        };

        self.write_register(Register::Enable, enable_register_value, i2c)
    }

    /// Turns the sensor on.
    pub fn enable_power(&mut self, i2c: &mut I2C) -> Result<()> {
        self.set_mode(Mode::Power, true, i2c)
    }

    /// Turns the sensor off.
    pub fn disable_power(&mut self, i2c: &mut I2C) -> Result<()> {
        self.set_mode(Mode::Power, false, i2c)
    }

    /// Starts the ambient light and color engine.
    pub fn enable_light_sensor(&mut self, interrupts: bool, i2c: &mut I2C) -> Result<()> {
        self.set_ambient_light_gain(DEFAULT_AMBIENT_LIGHT_GAIN, i2c)?;
        self.set_ambient_light_interrupt_enable(interrupts, i2c)?;
        self.enable_power(i2c)?;
        self.set_mode(Mode::AmbientLight, true, i2c)
    }

    pub fn disable_light_sensor(&mut self, i2c: &mut I2C) -> Result<()> {
        self.set_ambient_light_interrupt_enable(false, i2c)?;
        self.set_mode(Mode::AmbientLight, false, i2c)
    }

    /// Starts the proximity engine.
    pub fn enable_proximity_sensor(&mut self, interrupts: bool, i2c: &mut I2C) -> Result<()> {
        self.set_proximity_gain(DEFAULT_PROXIMITY_GAIN, i2c)?;
        self.set_led_drive(DEFAULT_LED_DRIVE, i2c)?;
        self.set_proximity_interrupt_enable(interrupts, i2c)?;
        self.enable_power(i2c)?;
        self.set_mode(Mode::Proximity, true, i2c)
    }

    pub fn disable_proximity_sensor(&mut self, i2c: &mut I2C) -> Result<()> {
        self.set_proximity_interrupt_enable(false, i2c)?;
        self.set_mode(Mode::Proximity, false, i2c)
    }

    /// Starts the gesture engine.
    ///
    /// Gesture detection needs the proximity and wait engines as well, both are switched on.
    pub fn enable_gesture_sensor(&mut self, interrupts: bool, i2c: &mut I2C) -> Result<()> {
        self.reset_gesture_parameters();
        self.write_register(Register::WTime, 0xFF, i2c)?;
        self.set_led_boost(LedBoost::Percent300, i2c)?;
        self.set_gesture_interrupt_enable(interrupts, i2c)?;
        self.set_gesture_mode(true, i2c)?;
        self.enable_power(i2c)?;
        self.set_mode(Mode::Wait, true, i2c)?;
        self.set_mode(Mode::Proximity, true, i2c)?;
        self.set_mode(Mode::Gesture, true, i2c)
    }

    pub fn disable_gesture_sensor(&mut self, i2c: &mut I2C) -> Result<()> {
        self.reset_gesture_parameters();
        self.set_gesture_interrupt_enable(false, i2c)?;
        self.set_gesture_mode(false, i2c)?;
        self.set_mode(Mode::Gesture, false, i2c)
    }

    /// Reads the clear channel.
    pub fn read_ambient_light(&mut self, i2c: &mut I2C) -> Result<u16> {
        self.read_register_u16(Register::CDataL, i2c)
    }

    pub fn read_red_light(&mut self, i2c: &mut I2C) -> Result<u16> {
        self.read_register_u16(Register::RDataL, i2c)
    }

    pub fn read_green_light(&mut self, i2c: &mut I2C) -> Result<u16> {
        self.read_register_u16(Register::GDataL, i2c)
    }

    pub fn read_blue_light(&mut self, i2c: &mut I2C) -> Result<u16> {
        self.read_register_u16(Register::BDataL, i2c)
    }

    /// Reads all four color channels in one i2c write-then-read operation.
    ///
    /// Returns `APDS9960Error::NoDataAvailable` if the ALS engine has not completed a cycle yet.
    pub fn read_color_data(&mut self, i2c: &mut I2C) -> Result<ColorData> {
        if (self.read_register(Register::Status, i2c)? & STATUS_AVALID) == 0 {
            return Err(APDS9960Error::NoDataAvailable);
        }

        let mut read_data = [0; 8];
        self.read_registers(Register::CDataL, &mut read_data, i2c)?;

        log::info!("Read raw color values: {:?}", read_data);

        Ok(ColorData::from_le_bytes(read_data))
    }

    /// Reads the proximity value.
    pub fn read_proximity(&mut self, i2c: &mut I2C) -> Result<u8> {
        self.read_register(Register::PData, i2c)
    }

    pub fn set_led_drive(&mut self, drive: LedDrive, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::Control, 0b11, 6, drive.into_reg_value(), i2c)
    }

    pub fn read_led_drive(&mut self, i2c: &mut I2C) -> Result<LedDrive> {
        let value = self.read_bits(Register::Control, 0b11, 6, i2c)?;
        Ok(LedDrive::from_reg_value(value))
    }

    pub fn set_proximity_gain(&mut self, gain: ProximityGain, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::Control, 0b11, 2, gain.into_reg_value(), i2c)
    }

    pub fn read_proximity_gain(&mut self, i2c: &mut I2C) -> Result<ProximityGain> {
        let value = self.read_bits(Register::Control, 0b11, 2, i2c)?;
        Ok(ProximityGain::from_reg_value(value))
    }

    pub fn set_ambient_light_gain(&mut self, gain: AmbientLightGain, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::Control, 0b11, 0, gain.into_reg_value(), i2c)
    }

    pub fn read_ambient_light_gain(&mut self, i2c: &mut I2C) -> Result<AmbientLightGain> {
        let value = self.read_bits(Register::Control, 0b11, 0, i2c)?;
        Ok(AmbientLightGain::from_reg_value(value))
    }

    /// Set the additional LED current applied during proximity and gesture pulses.
    pub fn set_led_boost(&mut self, boost: LedBoost, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::Config2, 0b11, 4, boost.into_reg_value(), i2c)
    }

    pub fn read_led_boost(&mut self, i2c: &mut I2C) -> Result<LedBoost> {
        let value = self.read_bits(Register::Config2, 0b11, 4, i2c)?;
        Ok(LedBoost::from_reg_value(value))
    }

    pub fn set_proximity_gain_compensation(&mut self, enable: bool, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::Config3, 0b1, 5, enable as u8, i2c)
    }

    pub fn read_proximity_gain_compensation(&mut self, i2c: &mut I2C) -> Result<bool> {
        Ok(self.read_bits(Register::Config3, 0b1, 5, i2c)? == 1)
    }

    /// Set the photodiode mask for proximity (bits: up, down, left, right; set = disabled).
    pub fn set_proximity_photo_mask(&mut self, mask: u8, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::Config3, 0b1111, 0, mask, i2c)
    }

    pub fn read_proximity_photo_mask(&mut self, i2c: &mut I2C) -> Result<u8> {
        self.read_bits(Register::Config3, 0b1111, 0, i2c)
    }

    pub fn set_gesture_gain(&mut self, gain: GestureGain, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::GConf2, 0b11, 5, gain.into_reg_value(), i2c)
    }

    pub fn read_gesture_gain(&mut self, i2c: &mut I2C) -> Result<GestureGain> {
        let value = self.read_bits(Register::GConf2, 0b11, 5, i2c)?;
        Ok(GestureGain::from_reg_value(value))
    }

    pub fn set_gesture_led_drive(&mut self, drive: LedDrive, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::GConf2, 0b11, 3, drive.into_reg_value(), i2c)
    }

    pub fn read_gesture_led_drive(&mut self, i2c: &mut I2C) -> Result<LedDrive> {
        let value = self.read_bits(Register::GConf2, 0b11, 3, i2c)?;
        Ok(LedDrive::from_reg_value(value))
    }

    pub fn set_gesture_wait_time(&mut self, time: GestureWaitTime, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::GConf2, 0b111, 0, time.into_reg_value(), i2c)
    }

    pub fn read_gesture_wait_time(&mut self, i2c: &mut I2C) -> Result<GestureWaitTime> {
        let value = self.read_bits(Register::GConf2, 0b111, 0, i2c)?;
        Ok(GestureWaitTime::from_reg_value(value))
    }

    /// Set the proximity value above which the gesture engine starts.
    pub fn set_gesture_enter_threshold(&mut self, threshold: u8, i2c: &mut I2C) -> Result<()> {
        self.write_register(Register::GPEnTh, threshold, i2c)
    }

    pub fn read_gesture_enter_threshold(&mut self, i2c: &mut I2C) -> Result<u8> {
        self.read_register(Register::GPEnTh, i2c)
    }

    /// Set the proximity value below which the gesture engine stops.
    pub fn set_gesture_exit_threshold(&mut self, threshold: u8, i2c: &mut I2C) -> Result<()> {
        self.write_register(Register::GExTh, threshold, i2c)
    }

    pub fn read_gesture_exit_threshold(&mut self, i2c: &mut I2C) -> Result<u8> {
        self.read_register(Register::GExTh, i2c)
    }

    pub fn set_proximity_interrupt_low_threshold(
        &mut self,
        threshold: u8,
        i2c: &mut I2C,
    ) -> Result<()> {
        self.write_register(Register::PiLt, threshold, i2c)
    }

    pub fn read_proximity_interrupt_low_threshold(&mut self, i2c: &mut I2C) -> Result<u8> {
        self.read_register(Register::PiLt, i2c)
    }

    pub fn set_proximity_interrupt_high_threshold(
        &mut self,
        threshold: u8,
        i2c: &mut I2C,
    ) -> Result<()> {
        self.write_register(Register::PiHt, threshold, i2c)
    }

    pub fn read_proximity_interrupt_high_threshold(&mut self, i2c: &mut I2C) -> Result<u8> {
        self.read_register(Register::PiHt, i2c)
    }

    pub fn set_ambient_light_interrupt_low_threshold(
        &mut self,
        threshold: u16,
        i2c: &mut I2C,
    ) -> Result<()> {
        self.write_register_u16(Register::AiLtL, Register::AiLtH, threshold, i2c)
    }

    pub fn read_ambient_light_interrupt_low_threshold(&mut self, i2c: &mut I2C) -> Result<u16> {
        self.read_register_u16(Register::AiLtL, i2c)
    }

    pub fn set_ambient_light_interrupt_high_threshold(
        &mut self,
        threshold: u16,
        i2c: &mut I2C,
    ) -> Result<()> {
        self.write_register_u16(Register::AiHtL, Register::AiHtH, threshold, i2c)
    }

    pub fn read_ambient_light_interrupt_high_threshold(&mut self, i2c: &mut I2C) -> Result<u16> {
        self.read_register_u16(Register::AiHtL, i2c)
    }

    pub fn set_ambient_light_interrupt_enable(
        &mut self,
        enable: bool,
        i2c: &mut I2C,
    ) -> Result<()> {
        self.write_bits(Register::Enable, 0b1, 4, enable as u8, i2c)
    }

    pub fn read_ambient_light_interrupt_enable(&mut self, i2c: &mut I2C) -> Result<bool> {
        Ok(self.read_bits(Register::Enable, 0b1, 4, i2c)? == 1)
    }

    pub fn set_proximity_interrupt_enable(&mut self, enable: bool, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::Enable, 0b1, 5, enable as u8, i2c)
    }

    pub fn read_proximity_interrupt_enable(&mut self, i2c: &mut I2C) -> Result<bool> {
        Ok(self.read_bits(Register::Enable, 0b1, 5, i2c)? == 1)
    }

    pub fn set_gesture_interrupt_enable(&mut self, enable: bool, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::GConf4, 0b1, 1, enable as u8, i2c)
    }

    pub fn read_gesture_interrupt_enable(&mut self, i2c: &mut I2C) -> Result<bool> {
        Ok(self.read_bits(Register::GConf4, 0b1, 1, i2c)? == 1)
    }

    /// Forces the gesture state machine in or out of gesture mode (GMODE).
    pub fn set_gesture_mode(&mut self, enable: bool, i2c: &mut I2C) -> Result<()> {
        self.write_bits(Register::GConf4, 0b1, 0, enable as u8, i2c)
    }

    pub fn read_gesture_mode(&mut self, i2c: &mut I2C) -> Result<bool> {
        Ok(self.read_bits(Register::GConf4, 0b1, 0, i2c)? == 1)
    }

    pub fn clear_ambient_light_interrupt(&mut self, i2c: &mut I2C) -> Result<()> {
        self.write_command(Register::AiClear, i2c)
    }

    pub fn clear_proximity_interrupt(&mut self, i2c: &mut I2C) -> Result<()> {
        self.write_command(Register::PiClear, i2c)
    }

    /// Checks whether the gesture FIFO holds valid data.
    pub fn is_gesture_available(&mut self, i2c: &mut I2C) -> Result<bool> {
        gesture_valid(i2c)
    }

    /// Collects gesture data until the hand has left the sensor and returns the detected motion.
    ///
    /// Returns `Direction::None` right away if the sensor is not powered, the gesture engine is
    /// off or no gesture is pending. This blocks for as long as the sensor keeps reporting valid
    /// gesture data, see `read_gesture_with_deadline` for a bounded variant.
    pub fn read_gesture(&mut self, delay: &mut D, i2c: &mut I2C) -> Result<Direction> {
        self.read_gesture_within(delay, i2c, None)
    }

    /// Like `read_gesture`, but gives up with `APDS9960Error::GestureTimeout` once the pauses
    /// between FIFO polls add up to `deadline_ms`.
    pub fn read_gesture_with_deadline(
        &mut self,
        delay: &mut D,
        i2c: &mut I2C,
        deadline_ms: u32,
    ) -> Result<Direction> {
        self.read_gesture_within(delay, i2c, Some(deadline_ms))
    }

    fn read_gesture_within(
        &mut self,
        delay: &mut D,
        i2c: &mut I2C,
        deadline_ms: Option<u32>,
    ) -> Result<Direction> {
        let mode = self.read_mode(i2c)?;
        let available = self.is_gesture_available(i2c)?;
        if !gesture_engine_active(mode) || !available {
            return Ok(Direction::None);
        }

        let mut fifo = GestureFifo { i2c };
        let direction = self.session.run(&mut fifo, delay, deadline_ms)?;
        Ok(direction)
    }

    /// Writes a new value to a specific register
    pub fn write_register(&mut self, register: Register, data: u8, i2c: &mut I2C) -> Result<()> {
        write_register(i2c, register, data)
    }

    /// Reads the value of a specific register
    pub fn read_register(&mut self, register: Register, i2c: &mut I2C) -> Result<u8> {
        let mut read_data = [0; 1];
        self.read_registers(register, &mut read_data, i2c)?;
        Ok(read_data[0])
    }

    /// Reads consecutive registers starting at `register` in one i2c write-then-read operation
    pub fn read_registers(
        &mut self,
        register: Register,
        buffer: &mut [u8],
        i2c: &mut I2C,
    ) -> Result<()> {
        read_registers(i2c, register, buffer)
    }

    fn read_register_u16(&mut self, low: Register, i2c: &mut I2C) -> Result<u16> {
        let mut read_data = [0; 2];
        self.read_registers(low, &mut read_data, i2c)?;
        Ok(u16::from_le_bytes(read_data))
    }

    fn write_register_u16(
        &mut self,
        low: Register,
        high: Register,
        value: u16,
        i2c: &mut I2C,
    ) -> Result<()> {
        let [low_byte, high_byte] = value.to_le_bytes();
        self.write_register(low, low_byte, i2c)?;
        self.write_register(high, high_byte, i2c)
    }

    /// Replaces the `mask` wide field at `shift` with `value`, leaving the other bits untouched.
    fn write_bits(
        &mut self,
        register: Register,
        mask: u8,
        shift: u8,
        value: u8,
        i2c: &mut I2C,
    ) -> Result<()> {
        let current = self.read_register(register, i2c)?;
        let updated = (current & !(mask << shift)) | ((value & mask) << shift);
        self.write_register(register, updated, i2c)
    }

    fn read_bits(&mut self, register: Register, mask: u8, shift: u8, i2c: &mut I2C) -> Result<u8> {
        Ok((self.read_register(register, i2c)? >> shift) & mask)
    }

    /// Special function registers are triggered by addressing them without data.
    fn write_command(&mut self, register: Register, i2c: &mut I2C) -> Result<()> {
        i2c.write(APDS9960_ADDR, &[register as u8])
            .map_err(|_| APDS9960Error::WriteI2CError)
    }
}

/// Gesture FIFO of the sensor as seen by the gesture session.
struct GestureFifo<'a, I2C> {
    i2c: &'a mut I2C,
}

impl<I2C> SampleSource for GestureFifo<'_, I2C>
where
    I2C: WriteRead,
{
    type Error = APDS9960Error;

    fn gesture_valid(&mut self) -> Result<bool> {
        gesture_valid(&mut *self.i2c)
    }

    fn fifo_level(&mut self) -> Result<u8> {
        let mut read_data = [0; 1];
        read_registers(&mut *self.i2c, Register::GFlvl, &mut read_data)?;
        Ok(read_data[0])
    }

    fn read_fifo(&mut self, rows: u8, buffer: &mut GestureBuffer) -> Result<()> {
        let mut read_data = [0; FIFO_BURST_LEN];
        let read_data = &mut read_data[..fifo_burst_len(rows)];
        read_registers(&mut *self.i2c, Register::GFifoU, read_data)?;

        log::trace!("Read gesture FIFO: {:?}", read_data);

        buffer.extend_from_fifo(read_data);
        Ok(())
    }
}

fn write_register<I2C: Write>(i2c: &mut I2C, register: Register, data: u8) -> Result<()> {
    i2c.write(APDS9960_ADDR, &[register as u8, data])
        .map_err(|_| APDS9960Error::WriteI2CError)
}

fn read_registers<I2C: WriteRead>(
    i2c: &mut I2C,
    register: Register,
    buffer: &mut [u8],
) -> Result<()> {
    i2c.write_read(APDS9960_ADDR, &[register as u8], buffer)
        .map_err(|_| APDS9960Error::ReadI2CError)
}

fn gesture_valid<I2C: WriteRead>(i2c: &mut I2C) -> Result<bool> {
    let mut read_data = [0; 1];
    read_registers(i2c, Register::GStatus, &mut read_data)?;
    Ok((read_data[0] & GSTATUS_GVALID) != 0)
}

/// Power and gesture engine both have to be on for a gesture read.
pub(crate) fn gesture_engine_active(enable_register_value: u8) -> bool {
    let required = ENABLE_PON | ENABLE_GEN;
    (enable_register_value & required) == required
}

/// Number of FIFO bytes to read for `rows` pending rows, capped at the FIFO depth.
pub(crate) fn fifo_burst_len(rows: u8) -> usize {
    let rows = usize::from(rows);
    if rows > GESTURE_FIFO_DEPTH {
        log::warn!(
            "FIFO level {} exceeds FIFO depth, reading {} rows",
            rows,
            GESTURE_FIFO_DEPTH
        );
    }
    rows.min(GESTURE_FIFO_DEPTH) * 4
}

/// Shorthand for all functions returning an error in this module.
type Result<T> = core::result::Result<T, APDS9960Error>;

/// Represents any error that may happen during communication.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum APDS9960Error {
    /// An error occurred while reading from the sensor.
    ReadI2CError,
    /// An error occurred while writing to the sensor.
    WriteI2CError,
    /// The ID register does not identify an APDS-9960.
    InvalidDeviceId,
    /// The ALS engine has not completed an integration cycle yet.
    NoDataAvailable,
    /// The sensor kept reporting gesture data beyond the requested deadline.
    GestureTimeout,
}

impl From<SessionError<APDS9960Error>> for APDS9960Error {
    fn from(error: SessionError<APDS9960Error>) -> Self {
        match error {
            SessionError::Source(error) => error,
            SessionError::DeadlineExpired => APDS9960Error::GestureTimeout,
        }
    }
}

/// Raw readings of the four color channels.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ColorData {
    pub clear: u16,
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl ColorData {
    /// Decodes the CDATAL..BDATAH register block.
    fn from_le_bytes(data: [u8; 8]) -> Self {
        Self {
            clear: u16::from_le_bytes([data[0], data[1]]),
            red: u16::from_le_bytes([data[2], data[3]]),
            green: u16::from_le_bytes([data[4], data[5]]),
            blue: u16::from_le_bytes([data[6], data[7]]),
        }
    }
}

/// All registers of the APDS-9960 sensor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Register {
    /// Enable states and interrupts
    Enable = 0x80,
    /// ADC integration time
    ATime = 0x81,
    /// Wait time
    WTime = 0x83,
    /// ALS interrupt low threshold (low byte)
    AiLtL = 0x84,
    /// ALS interrupt low threshold (high byte)
    AiLtH = 0x85,
    /// ALS interrupt high threshold (low byte)
    AiHtL = 0x86,
    /// ALS interrupt high threshold (high byte)
    AiHtH = 0x87,
    /// Proximity interrupt low threshold
    PiLt = 0x89,
    /// Proximity interrupt high threshold
    PiHt = 0x8B,
    /// Interrupt persistence filters
    Pers = 0x8C,
    /// Configuration register one
    Config1 = 0x8D,
    /// Proximity pulse count and length
    PPulse = 0x8E,
    /// Gain control
    Control = 0x8F,
    /// Configuration register two
    Config2 = 0x90,
    /// Device ID
    ID = 0x92,
    /// Device status
    Status = 0x93,
    /// Clear channel data (low byte)
    CDataL = 0x94,
    CDataH = 0x95,
    /// Red channel data (low byte)
    RDataL = 0x96,
    RDataH = 0x97,
    /// Green channel data (low byte)
    GDataL = 0x98,
    GDataH = 0x99,
    /// Blue channel data (low byte)
    BDataL = 0x9A,
    BDataH = 0x9B,
    /// Proximity data
    PData = 0x9C,
    /// Proximity offset for UP and RIGHT photodiodes
    POffsetUr = 0x9D,
    /// Proximity offset for DOWN and LEFT photodiodes
    POffsetDl = 0x9E,
    /// Configuration register three
    Config3 = 0x9F,
    /// Gesture proximity enter threshold
    GPEnTh = 0xA0,
    /// Gesture exit threshold
    GExTh = 0xA1,
    /// Gesture configuration one
    GConf1 = 0xA2,
    /// Gesture configuration two
    GConf2 = 0xA3,
    /// Gesture UP offset
    GOffsetU = 0xA4,
    /// Gesture DOWN offset
    GOffsetD = 0xA5,
    /// Gesture pulse count and length
    GPulse = 0xA6,
    /// Gesture LEFT offset
    GOffsetL = 0xA7,
    /// Gesture RIGHT offset
    GOffsetR = 0xA9,
    /// Gesture configuration three
    GConf3 = 0xAA,
    /// Gesture configuration four
    GConf4 = 0xAB,
    /// Gesture FIFO level
    GFlvl = 0xAE,
    /// Gesture status
    GStatus = 0xAF,
    /// Force interrupt
    IForce = 0xE4,
    /// Proximity interrupt clear
    PiClear = 0xE5,
    /// ALS clear channel interrupt clear
    CiClear = 0xE6,
    /// All non-gesture interrupts clear
    AiClear = 0xE7,
    /// Gesture FIFO UP value, start of the U/D/L/R burst
    GFifoU = 0xFC,
    GFifoD = 0xFD,
    GFifoL = 0xFE,
    GFifoR = 0xFF,
}

/// Engines of the sensor, as bit positions in the ENABLE register.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Power = 0,
    AmbientLight = 1,
    Proximity = 2,
    Wait = 3,
    AmbientLightInterrupt = 4,
    ProximityInterrupt = 5,
    Gesture = 6,
    /// All of the above at once.
    All = 7,
}

impl Mode {
    pub const fn into_reg_value(self) -> u8 {
        self as u8
    }
}

/// LED drive strength, used for proximity and gesture pulses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum LedDrive {
    Ma100 = 0,
    Ma50 = 1,
    Ma25 = 2,
    Ma12_5 = 3,
}

impl LedDrive {
    /// Converts LedDrive value into the corresponding register value
    pub const fn into_reg_value(self) -> u8 {
        self as u8
    }

    /// Converts a two bit register field into a LedDrive value
    pub fn from_reg_value(value: u8) -> Self {
        match value & 0b11 {
            0 => LedDrive::Ma100,
            1 => LedDrive::Ma50,
            2 => LedDrive::Ma25,
            _ => LedDrive::Ma12_5,
        }
    }
}

/// The proximity gain of the APDS-9960 sensor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ProximityGain {
    X1 = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
}

impl ProximityGain {
    pub const fn into_reg_value(self) -> u8 {
        self as u8
    }

    pub fn from_reg_value(value: u8) -> Self {
        match value & 0b11 {
            0 => ProximityGain::X1,
            1 => ProximityGain::X2,
            2 => ProximityGain::X4,
            _ => ProximityGain::X8,
        }
    }
}

/// The ambient light and color gain of the APDS-9960 sensor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum AmbientLightGain {
    X1 = 0,
    X4 = 1,
    X16 = 2,
    X64 = 3,
}

impl AmbientLightGain {
    pub const fn into_reg_value(self) -> u8 {
        self as u8
    }

    pub fn from_reg_value(value: u8) -> Self {
        match value & 0b11 {
            0 => AmbientLightGain::X1,
            1 => AmbientLightGain::X4,
            2 => AmbientLightGain::X16,
            _ => AmbientLightGain::X64,
        }
    }
}

/// The gesture gain of the APDS-9960 sensor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum GestureGain {
    X1 = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
}

impl GestureGain {
    pub const fn into_reg_value(self) -> u8 {
        self as u8
    }

    pub fn from_reg_value(value: u8) -> Self {
        match value & 0b11 {
            0 => GestureGain::X1,
            1 => GestureGain::X2,
            2 => GestureGain::X4,
            _ => GestureGain::X8,
        }
    }
}

/// Additional LED current in percent of the LED drive.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum LedBoost {
    Percent100 = 0,
    Percent150 = 1,
    Percent200 = 2,
    Percent300 = 3,
}

impl LedBoost {
    pub const fn into_reg_value(self) -> u8 {
        self as u8
    }

    pub fn from_reg_value(value: u8) -> Self {
        match value & 0b11 {
            0 => LedBoost::Percent100,
            1 => LedBoost::Percent150,
            2 => LedBoost::Percent200,
            _ => LedBoost::Percent300,
        }
    }
}

/// Wait time between two gesture detection cycles.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum GestureWaitTime {
    Ms0 = 0,
    Ms2_8 = 1,
    Ms5_6 = 2,
    Ms8_4 = 3,
    Ms14_0 = 4,
    Ms22_4 = 5,
    Ms30_8 = 6,
    Ms39_2 = 7,
}

impl GestureWaitTime {
    pub const fn into_reg_value(self) -> u8 {
        self as u8
    }

    pub fn from_reg_value(value: u8) -> Self {
        match value & 0b111 {
            0 => GestureWaitTime::Ms0,
            1 => GestureWaitTime::Ms2_8,
            2 => GestureWaitTime::Ms5_6,
            3 => GestureWaitTime::Ms8_4,
            4 => GestureWaitTime::Ms14_0,
            5 => GestureWaitTime::Ms22_4,
            6 => GestureWaitTime::Ms30_8,
            _ => GestureWaitTime::Ms39_2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::i2c::Mock as I2cMock;
    use embedded_hal_mock::MockError;
    use embedded_hal_mock::{delay::MockNoop as DelayMock, i2c::Transaction as I2cTransaction};

    type Sensor = APDS9960<I2cMock, DelayMock>;

    fn read(register: u8, value: u8) -> I2cTransaction {
        I2cTransaction::write_read(APDS9960_ADDR, [register].to_vec(), [value].to_vec())
    }

    fn write(register: u8, value: u8) -> I2cTransaction {
        I2cTransaction::write(APDS9960_ADDR, [register, value].to_vec())
    }

    #[test]
    fn test_init() {
        let expectations = [
            read(0x92, 0xAB),
            write(0x80, 0x00),
            write(0x83, 246),
            write(0x8E, 0x87),
            write(0x9D, 0x00),
            write(0x9E, 0x00),
            write(0x8D, 0x60),
            write(0x8F, 0x09),
            write(0x89, 0x00),
            write(0x8B, 50),
            write(0x84, 0xFF),
            write(0x85, 0xFF),
            write(0x86, 0x00),
            write(0x87, 0x00),
            write(0x8C, 0x11),
            write(0x90, 0x01),
            write(0x9F, 0x00),
            write(0xA0, 40),
            write(0xA1, 30),
            write(0xA2, 0x40),
            write(0xA3, 0x41),
            write(0xA4, 0x00),
            write(0xA5, 0x00),
            write(0xA7, 0x00),
            write(0xA9, 0x00),
            write(0xA6, 0xC9),
            write(0xAA, 0x00),
            write(0xAB, 0x00),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        assert_eq!(sensor.init(&mut i2c_mock), Ok(()));

        i2c_mock.done();
    }

    #[test]
    fn test_init_rejects_unknown_id() {
        let expectations = [read(0x92, 0x12)];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        assert_eq!(
            sensor.init(&mut i2c_mock),
            Err(APDS9960Error::InvalidDeviceId)
        );

        i2c_mock.done();
    }

    #[test]
    fn test_enable_gesture_sensor() {
        let expectations = [
            write(0x83, 0xFF),
            // LED boost 300%
            read(0x90, 0x01),
            write(0x90, 0x31),
            // gesture interrupts off
            read(0xAB, 0x00),
            write(0xAB, 0x00),
            // gesture mode
            read(0xAB, 0x00),
            write(0xAB, 0x01),
            // power, wait, proximity, gesture
            read(0x80, 0x00),
            write(0x80, 0x01),
            read(0x80, 0x01),
            write(0x80, 0x09),
            read(0x80, 0x09),
            write(0x80, 0x0D),
            read(0x80, 0x0D),
            write(0x80, 0x4D),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        assert_eq!(sensor.enable_gesture_sensor(false, &mut i2c_mock), Ok(()));

        i2c_mock.done();
    }

    #[test]
    fn test_set_mode() {
        let expectations = [
            read(0x80, 0x4D),
            write(0x80, 0x49),
            write(0x80, 0x7F),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        sensor.set_mode(Mode::Proximity, false, &mut i2c_mock).unwrap();
        sensor.set_mode(Mode::All, true, &mut i2c_mock).unwrap();

        i2c_mock.done();
    }

    #[test]
    fn test_read_gesture() {
        let mut fifo = vec![40, 40, 50, 50];
        fifo.extend([0; 16]);
        fifo.extend([60, 20, 50, 50]);

        let expectations = [
            read(0x80, 0x41),
            read(0xAF, 0x01),
            // first poll, six rows pending
            read(0xAF, 0x01),
            read(0xAE, 0x06),
            I2cTransaction::write_read(APDS9960_ADDR, [0xFC].to_vec(), fifo),
            // second poll, the hand is gone
            read(0xAF, 0x00),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut delay_mock = DelayMock::new();
        let mut sensor = Sensor::new();

        let direction = sensor.read_gesture(&mut delay_mock, &mut i2c_mock);
        assert_eq!(direction, Ok(Direction::Down));
        assert_eq!(*sensor.gesture_state(), SessionState::default());

        i2c_mock.done();
    }

    #[test]
    fn test_read_gesture_engine_off() {
        let expectations = [read(0x80, 0x01), read(0xAF, 0x01)];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut delay_mock = DelayMock::new();
        let mut sensor = Sensor::new();

        let direction = sensor.read_gesture(&mut delay_mock, &mut i2c_mock);
        assert_eq!(direction, Ok(Direction::None));

        i2c_mock.done();
    }

    #[test]
    fn test_read_gesture_with_deadline() {
        let expectations = [
            read(0x80, 0x41),
            read(0xAF, 0x01),
            read(0xAF, 0x01),
            read(0xAE, 0x00),
            read(0xAF, 0x01),
            read(0xAE, 0x00),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut delay_mock = DelayMock::new();
        let mut sensor = Sensor::new();

        let result = sensor.read_gesture_with_deadline(&mut delay_mock, &mut i2c_mock, 60);
        assert_eq!(result, Err(APDS9960Error::GestureTimeout));

        i2c_mock.done();
    }

    #[test]
    fn test_read_gesture_bus_error() {
        let expectations = [
            read(0x80, 0x41),
            read(0xAF, 0x01),
            read(0xAF, 0x01),
            read(0xAE, 0x06).with_error(MockError::Io(std::io::ErrorKind::Other)),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut delay_mock = DelayMock::new();
        let mut sensor = Sensor::new();

        let result = sensor.read_gesture(&mut delay_mock, &mut i2c_mock);
        assert_eq!(result, Err(APDS9960Error::ReadI2CError));

        i2c_mock.done();
    }

    #[test]
    fn test_read_color_data() {
        let expectations = [
            read(0x93, 0x01),
            I2cTransaction::write_read(
                APDS9960_ADDR,
                [0x94].to_vec(),
                [0x10, 0x01, 0x20, 0x00, 0x30, 0x00, 0x40, 0x02].to_vec(),
            ),
            read(0x93, 0x00),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        let color = sensor.read_color_data(&mut i2c_mock);
        assert_eq!(
            color,
            Ok(ColorData {
                clear: 0x0110,
                red: 0x0020,
                green: 0x0030,
                blue: 0x0240,
            })
        );

        let result = sensor.read_color_data(&mut i2c_mock);
        assert_eq!(result, Err(APDS9960Error::NoDataAvailable));

        i2c_mock.done();
    }

    #[test]
    fn test_read_single_channels() {
        let expectations = [
            I2cTransaction::write_read(APDS9960_ADDR, [0x94].to_vec(), [0x34, 0x12].to_vec()),
            I2cTransaction::write_read(APDS9960_ADDR, [0x98].to_vec(), [0xFF, 0x00].to_vec()),
            read(0x9C, 0x80),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        assert_eq!(sensor.read_ambient_light(&mut i2c_mock), Ok(0x1234));
        assert_eq!(sensor.read_green_light(&mut i2c_mock), Ok(0x00FF));
        assert_eq!(sensor.read_proximity(&mut i2c_mock), Ok(0x80));

        i2c_mock.done();
    }

    #[test]
    fn test_bit_fields() {
        let expectations = [
            read(0x8F, 0xC1),
            write(0x8F, 0xCD),
            read(0x8F, 0x08),
            read(0xA3, 0x41),
            write(0xA3, 0x46),
            read(0xA3, 0x7F),
            read(0x9F, 0x0A),
            write(0x9F, 0x2A),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        sensor
            .set_proximity_gain(ProximityGain::X8, &mut i2c_mock)
            .unwrap();
        assert_eq!(
            sensor.read_proximity_gain(&mut i2c_mock),
            Ok(ProximityGain::X4)
        );
        sensor
            .set_gesture_wait_time(GestureWaitTime::Ms30_8, &mut i2c_mock)
            .unwrap();
        assert_eq!(
            sensor.read_gesture_gain(&mut i2c_mock),
            Ok(GestureGain::X8)
        );
        sensor
            .set_proximity_gain_compensation(true, &mut i2c_mock)
            .unwrap();

        i2c_mock.done();
    }

    #[test]
    fn test_ambient_light_thresholds() {
        let expectations = [
            write(0x86, 0x34),
            write(0x87, 0x12),
            I2cTransaction::write_read(APDS9960_ADDR, [0x84].to_vec(), [0xCD, 0xAB].to_vec()),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        sensor
            .set_ambient_light_interrupt_high_threshold(0x1234, &mut i2c_mock)
            .unwrap();
        assert_eq!(
            sensor.read_ambient_light_interrupt_low_threshold(&mut i2c_mock),
            Ok(0xABCD)
        );

        i2c_mock.done();
    }

    #[test]
    fn test_clear_interrupts() {
        let expectations = [
            I2cTransaction::write(APDS9960_ADDR, [0xE5].to_vec()),
            I2cTransaction::write(APDS9960_ADDR, [0xE7].to_vec()),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        sensor.clear_proximity_interrupt(&mut i2c_mock).unwrap();
        sensor.clear_ambient_light_interrupt(&mut i2c_mock).unwrap();

        i2c_mock.done();
    }

    #[test]
    fn test_write_error() {
        let expectations = [
            write(0x80, 0x00),
            write(0x80, 0x00).with_error(MockError::Io(std::io::ErrorKind::Other)),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        let result = sensor.write_register(Register::Enable, 0x00, &mut i2c_mock);
        assert_eq!(result, Ok(()));

        let result = sensor.write_register(Register::Enable, 0x00, &mut i2c_mock);
        assert_eq!(result, Err(APDS9960Error::WriteI2CError));

        i2c_mock.done();
    }

    #[test]
    fn test_read_error() {
        let expectations = [
            read(0x92, 0xAB),
            read(0x92, 0xAB).with_error(MockError::Io(std::io::ErrorKind::Other)),
        ];

        let mut i2c_mock = I2cMock::new(&expectations);
        let mut sensor = Sensor::new();

        assert_eq!(sensor.read_id(&mut i2c_mock), Ok(0xAB));
        assert_eq!(
            sensor.read_id(&mut i2c_mock),
            Err(APDS9960Error::ReadI2CError)
        );

        i2c_mock.done();
    }

    #[test]
    fn test_fifo_burst_len_is_capped() {
        assert_eq!(fifo_burst_len(6), 24);
        assert_eq!(fifo_burst_len(32), 128);
        assert_eq!(fifo_burst_len(0xFF), 128);
    }

    #[test]
    fn test_gesture_engine_active() {
        assert!(gesture_engine_active(0x4D));
        assert!(!gesture_engine_active(0x40));
        assert!(!gesture_engine_active(0x01));
    }
}
