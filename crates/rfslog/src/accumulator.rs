//! Last-known value store for every tracked field.

use serde::Serialize;

use crate::fields::{self, low_byte, Scale, Slot, Target, Trigger};

/// Outcome of applying one frame to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A slot was updated and nothing fires.
    Stored(Slot),
    /// A trigger id arrived; any slot it maps to is already updated.
    Triggered(Trigger),
    /// Reserved id, ignored.
    Reserved,
    /// Id not in the field table. Nothing was changed.
    Unknown(u8),
}

/// Most recent decoded value of each field.
///
/// Every slot starts at zero, so records emitted before a field's first
/// frame carry zero for it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Accumulator {
    /// Barometric altitude.
    pub baro_altitude: f32,
    /// Vertical speed.
    pub speed: f32,
    /// Temperature.
    pub temperature: f32,
    /// Static pressure.
    pub pressure: f32,
    /// Ground-level reference pressure. Not part of any record.
    pub base_pressure: f32,
    /// Acceleration, X axis.
    pub accel_x: f32,
    /// Acceleration, Y axis.
    pub accel_y: f32,
    /// Acceleration, Z axis.
    pub accel_z: f32,
    /// Angular rate, X axis.
    pub gyro_x: f32,
    /// Angular rate, Y axis.
    pub gyro_y: f32,
    /// Angular rate, Z axis.
    pub gyro_z: f32,
    /// Latitude in degrees.
    pub latitude: f32,
    /// Longitude in degrees.
    pub longitude: f32,
    /// GPS altitude.
    pub gps_altitude: f32,
    /// Horizontal dilution of precision.
    pub hdop: f32,
    /// Satellites in view, low byte of the raw value.
    pub sats: u8,
}

impl Accumulator {
    /// Create an accumulator with every slot at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a raw value through the field table.
    ///
    /// Values are stored as-is after scaling; no range checks.
    pub fn apply(&mut self, field_id: u8, raw: i32) -> Applied {
        let Some(spec) = fields::lookup(field_id) else {
            return Applied::Unknown(field_id);
        };

        match spec.target {
            Target::Slot { slot, scale } => self.store(slot, scale, raw),
            Target::State => {}
            Target::Reserved => return Applied::Reserved,
        }

        match (spec.trigger, spec.target) {
            (Some(trigger), _) => Applied::Triggered(trigger),
            (None, Target::Slot { slot, .. }) => Applied::Stored(slot),
            (None, _) => Applied::Reserved,
        }
    }

    fn store(&mut self, slot: Slot, scale: Scale, raw: i32) {
        match self.float_slot_mut(slot) {
            Some(value) => *value = scale.apply(raw),
            None => self.sats = low_byte(raw),
        }
    }

    /// `None` for the byte-sized `Sats` slot.
    #[cfg(test)]
    fn float_slot(&self, slot: Slot) -> Option<&f32> {
        let value = match slot {
            Slot::BaroAltitude => &self.baro_altitude,
            Slot::Speed => &self.speed,
            Slot::Temperature => &self.temperature,
            Slot::Pressure => &self.pressure,
            Slot::BasePressure => &self.base_pressure,
            Slot::AccelX => &self.accel_x,
            Slot::AccelY => &self.accel_y,
            Slot::AccelZ => &self.accel_z,
            Slot::GyroX => &self.gyro_x,
            Slot::GyroY => &self.gyro_y,
            Slot::GyroZ => &self.gyro_z,
            Slot::Latitude => &self.latitude,
            Slot::Longitude => &self.longitude,
            Slot::GpsAltitude => &self.gps_altitude,
            Slot::Hdop => &self.hdop,
            Slot::Sats => return None,
        };
        Some(value)
    }

    fn float_slot_mut(&mut self, slot: Slot) -> Option<&mut f32> {
        let value = match slot {
            Slot::BaroAltitude => &mut self.baro_altitude,
            Slot::Speed => &mut self.speed,
            Slot::Temperature => &mut self.temperature,
            Slot::Pressure => &mut self.pressure,
            Slot::BasePressure => &mut self.base_pressure,
            Slot::AccelX => &mut self.accel_x,
            Slot::AccelY => &mut self.accel_y,
            Slot::AccelZ => &mut self.accel_z,
            Slot::GyroX => &mut self.gyro_x,
            Slot::GyroY => &mut self.gyro_y,
            Slot::GyroZ => &mut self.gyro_z,
            Slot::Latitude => &mut self.latitude,
            Slot::Longitude => &mut self.longitude,
            Slot::GpsAltitude => &mut self.gps_altitude,
            Slot::Hdop => &mut self.hdop,
            Slot::Sats => return None,
        };
        Some(value)
    }
}
