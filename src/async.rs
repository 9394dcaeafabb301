//! Async API
//!
//! This module contains the async API for the APDS-9960 sensor, built on `embedded-hal-async`.
//! Gesture reads share the gesture session with the blocking API.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, SevenBitAddress};

use crate::{
    fifo_burst_len, gesture_engine_active, APDS9960Error, Direction, LedBoost, Mode, Register,
    Result, APDS9960, APDS9960_ADDR, APDS9960_IDS, DEFAULT_REGISTERS, FIFO_BURST_LEN,
    FIFO_PAUSE_TIME_MS, GSTATUS_GVALID,
};

impl<I2C, D> APDS9960<I2C, D>
where
    D: DelayNs,
    I2C: I2c<SevenBitAddress>,
{
    /// Checks the device ID and programs the default configuration.
    pub async fn init_async(&mut self, i2c: &mut I2C) -> Result<()> {
        let id = self.read_register_async(Register::ID, i2c).await?;
        if !APDS9960_IDS.contains(&id) {
            log::error!("Unexpected device ID: 0x{:02X}", id);
            return Err(APDS9960Error::InvalidDeviceId);
        }
        log::info!("Device ID: 0x{:02X}", id);

        self.set_mode_async(Mode::All, false, i2c).await?;
        for (register, value) in DEFAULT_REGISTERS {
            self.write_register_async(register, value, i2c).await?;
        }

        Ok(())
    }

    /// Enables or disables a single engine, or all of them with `Mode::All`.
    pub async fn set_mode_async(
        &mut self,
        mode: Mode,
        enable: bool,
        i2c: &mut I2C,
    ) -> Result<()> {
        let enable_register_value = match mode {
            Mode::All => {
                if enable {
                    0x7F
                } else {
                    0x00
                }
            }
            _ => {
                let current = self.read_register_async(Register::Enable, i2c).await?;
                let bit = 1 << mode.into_reg_value();
                if enable {
                    current | bit
                } else {
                    current & !bit
                }
            }
        };

        self.write_register_async(Register::Enable, enable_register_value, i2c)
            .await
    }

    /// Starts the gesture engine together with the proximity and wait engines.
    pub async fn enable_gesture_sensor_async(
        &mut self,
        interrupts: bool,
        i2c: &mut I2C,
    ) -> Result<()> {
        self.reset_gesture_parameters();
        self.write_register_async(Register::WTime, 0xFF, i2c).await?;
        let boost = LedBoost::Percent300.into_reg_value();
        self.write_bits_async(Register::Config2, 0b11, 4, boost, i2c)
            .await?;
        self.write_bits_async(Register::GConf4, 0b1, 1, interrupts as u8, i2c)
            .await?;
        // GMODE
        self.write_bits_async(Register::GConf4, 0b1, 0, 1, i2c).await?;
        for mode in [Mode::Power, Mode::Wait, Mode::Proximity, Mode::Gesture] {
            self.set_mode_async(mode, true, i2c).await?;
        }
        Ok(())
    }

    /// Reads the proximity value.
    pub async fn read_proximity_async(&mut self, i2c: &mut I2C) -> Result<u8> {
        self.read_register_async(Register::PData, i2c).await
    }

    /// Checks whether the gesture FIFO holds valid data.
    pub async fn is_gesture_available_async(&mut self, i2c: &mut I2C) -> Result<bool> {
        let gstatus = self.read_register_async(Register::GStatus, i2c).await?;
        Ok((gstatus & GSTATUS_GVALID) != 0)
    }

    /// Collects gesture data until the hand has left the sensor and returns the detected motion.
    pub async fn read_gesture_async(
        &mut self,
        delay: &mut D,
        i2c: &mut I2C,
    ) -> Result<Direction> {
        self.read_gesture_within_async(delay, i2c, None).await
    }

    /// Like `read_gesture_async`, but gives up with `APDS9960Error::GestureTimeout` once the
    /// pauses between FIFO polls add up to `deadline_ms`.
    pub async fn read_gesture_with_deadline_async(
        &mut self,
        delay: &mut D,
        i2c: &mut I2C,
        deadline_ms: u32,
    ) -> Result<Direction> {
        self.read_gesture_within_async(delay, i2c, Some(deadline_ms))
            .await
    }

    async fn read_gesture_within_async(
        &mut self,
        delay: &mut D,
        i2c: &mut I2C,
        deadline_ms: Option<u32>,
    ) -> Result<Direction> {
        let mode = self.read_register_async(Register::Enable, i2c).await?;
        let available = self.is_gesture_available_async(i2c).await?;
        if !gesture_engine_active(mode) || !available {
            return Ok(Direction::None);
        }

        self.session.reset();
        let mut elapsed_ms: u32 = 0;

        loop {
            if self.session.poll_expired(&mut elapsed_ms, deadline_ms) {
                return Err(APDS9960Error::GestureTimeout);
            }
            delay.delay_ms(FIFO_PAUSE_TIME_MS).await;

            if !self.is_gesture_available_async(i2c).await? {
                delay.delay_ms(FIFO_PAUSE_TIME_MS).await;
                return Ok(self.session.finish());
            }

            let rows = self.read_register_async(Register::GFlvl, i2c).await?;
            if rows > 0 {
                let mut read_data = [0; FIFO_BURST_LEN];
                let read_data = &mut read_data[..fifo_burst_len(rows)];
                self.read_registers_async(Register::GFifoU, read_data, i2c)
                    .await?;

                log::trace!("Read gesture FIFO: {:?}", read_data);

                self.session.buffer_mut().extend_from_fifo(read_data);
                self.session.process_batch();
            }
        }
    }

    /// Writes a new value to a specific register
    pub async fn write_register_async(
        &mut self,
        register: Register,
        data: u8,
        i2c: &mut I2C,
    ) -> Result<()> {
        i2c.write(APDS9960_ADDR, &[register as u8, data])
            .await
            .map_err(|_| APDS9960Error::WriteI2CError)
    }

    /// Reads the value of a specific register
    pub async fn read_register_async(
        &mut self,
        register: Register,
        i2c: &mut I2C,
    ) -> Result<u8> {
        let mut read_data = [0; 1];
        self.read_registers_async(register, &mut read_data, i2c)
            .await?;
        Ok(read_data[0])
    }

    /// Reads consecutive registers starting at `register` in one i2c write-then-read operation
    pub async fn read_registers_async(
        &mut self,
        register: Register,
        buffer: &mut [u8],
        i2c: &mut I2C,
    ) -> Result<()> {
        i2c.write_read(APDS9960_ADDR, &[register as u8], buffer)
            .await
            .map_err(|_| APDS9960Error::ReadI2CError)
    }

    async fn write_bits_async(
        &mut self,
        register: Register,
        mask: u8,
        shift: u8,
        value: u8,
        i2c: &mut I2C,
    ) -> Result<()> {
        let current = self.read_register_async(register, i2c).await?;
        let updated = (current & !(mask << shift)) | ((value & mask) << shift);
        self.write_register_async(register, updated, i2c).await
    }
}
