//! Field id routing and scaling.
//!
//! [`FIELD_TABLE`] maps every known field id to exactly one destination:
//! an accumulator slot, the state trigger, or nothing (reserved ids). Ids
//! missing from the table are unknown.

use serde::Serialize;

use crate::record::AvState;

/// Accumulator slot a field writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Barometric altitude.
    BaroAltitude,
    /// Vertical speed.
    Speed,
    /// Temperature.
    Temperature,
    /// Static pressure.
    Pressure,
    /// Ground-level reference pressure.
    BasePressure,
    /// Acceleration, X axis.
    AccelX,
    /// Acceleration, Y axis.
    AccelY,
    /// Acceleration, Z axis.
    AccelZ,
    /// Angular rate, X axis.
    GyroX,
    /// Angular rate, Y axis.
    GyroY,
    /// Angular rate, Z axis.
    GyroZ,
    /// GPS latitude in degrees.
    Latitude,
    /// GPS longitude in degrees.
    Longitude,
    /// GPS altitude.
    GpsAltitude,
    /// Horizontal dilution of precision.
    Hdop,
    /// Satellites in view.
    Sats,
}

/// How a raw value is converted before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    /// Divide the raw integer, yielding a float.
    Divide(f32),
    /// Keep only the low byte, read as an unsigned count.
    Byte,
}

/// Low byte of a raw value. The recorder's tooling kept satellite counts in
/// a single unsigned byte, so -1 reads as 255 and 265 as 9.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn low_byte(raw: i32) -> u8 {
    raw as u8
}

impl Scale {
    /// Apply this scale to a raw value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn apply(self, raw: i32) -> f32 {
        match self {
            Self::Divide(divisor) => raw as f32 / divisor,
            Self::Byte => f32::from(low_byte(raw)),
        }
    }
}

/// Where a field's value goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Store into an accumulator slot.
    Slot {
        /// Destination slot.
        slot: Slot,
        /// Conversion from the raw value.
        scale: Scale,
    },
    /// The raw value is a vehicle state, consumed by the state trigger.
    State,
    /// Reserved id; the frame is ignored.
    Reserved,
}

/// Record kind emitted when a trigger id arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Snapshot sensor slots into a telemetry record.
    Telemetry,
    /// Snapshot GPS slots into a GPS record.
    Gps,
    /// Emit a vehicle state record.
    State,
}

/// One row of the field table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Wire id.
    pub id: u8,
    /// Short name used in listings.
    pub name: &'static str,
    /// Unit of the scaled value, empty when dimensionless.
    pub unit: &'static str,
    /// Destination.
    pub target: Target,
    /// Record emitted after the update, if any.
    pub trigger: Option<Trigger>,
}

const fn slot(
    id: u8,
    name: &'static str,
    unit: &'static str,
    slot: Slot,
    scale: Scale,
    trigger: Option<Trigger>,
) -> FieldSpec {
    FieldSpec {
        id,
        name,
        unit,
        target: Target::Slot { slot, scale },
        trigger,
    }
}

const fn reserved(id: u8) -> FieldSpec {
    FieldSpec {
        id,
        name: "reserved",
        unit: "",
        target: Target::Reserved,
        trigger: None,
    }
}

const ONE: Scale = Scale::Divide(1.0);

/// Every field id the recorder emits, in id order.
pub const FIELD_TABLE: &[FieldSpec] = &[
    slot(0, "pressure", "hPa", Slot::Pressure, Scale::Divide(100.0), Some(Trigger::Telemetry)),
    slot(1, "accel_x", "", Slot::AccelX, ONE, None),
    slot(2, "accel_y", "", Slot::AccelY, ONE, None),
    slot(3, "accel_z", "", Slot::AccelZ, ONE, Some(Trigger::Telemetry)),
    slot(4, "gyro_x", "", Slot::GyroX, ONE, None),
    slot(5, "gyro_y", "", Slot::GyroY, ONE, None),
    slot(6, "gyro_z", "", Slot::GyroZ, ONE, None),
    slot(7, "hdop", "", Slot::Hdop, Scale::Divide(1_000.0), None),
    slot(8, "latitude", "deg", Slot::Latitude, Scale::Divide(1_000_000.0), None),
    slot(9, "longitude", "deg", Slot::Longitude, Scale::Divide(1_000_000.0), None),
    slot(10, "gps_altitude", "m", Slot::GpsAltitude, ONE, None),
    slot(11, "sats", "", Slot::Sats, Scale::Byte, Some(Trigger::Gps)),
    slot(12, "temperature", "degC", Slot::Temperature, Scale::Divide(100.0), None),
    // Stored but not part of any record.
    slot(13, "base_pressure", "hPa", Slot::BasePressure, Scale::Divide(100.0), None),
    reserved(38),
    slot(42, "baro_altitude", "m", Slot::BaroAltitude, ONE, None),
    slot(45, "speed", "m/s", Slot::Speed, ONE, None),
    FieldSpec {
        id: 50,
        name: "state",
        unit: "",
        target: Target::State,
        trigger: Some(Trigger::State),
    },
    reserved(255),
];

impl FieldSpec {
    /// Render a raw value the way this field is interpreted.
    #[must_use]
    pub fn format_value(&self, raw: i32) -> String {
        match self.target {
            Target::Slot {
                scale: Scale::Byte,
                ..
            } => low_byte(raw).to_string(),
            Target::Slot { scale, .. } => format!("{:.6}", scale.apply(raw)),
            Target::State => AvState::from_raw(raw)
                .map_or_else(|| format!("invalid ({raw})"), |s| s.name().to_string()),
            Target::Reserved => "-".to_string(),
        }
    }
}

/// Look up a field id. `None` means the id is unknown.
#[must_use]
pub fn lookup(id: u8) -> Option<&'static FieldSpec> {
    FIELD_TABLE.iter().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_and_sorted() {
        let ids: Vec<u8> = FIELD_TABLE.iter().map(|s| s.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_each_slot_has_one_source() {
        let mut seen = HashSet::new();
        for spec in FIELD_TABLE {
            if let Target::Slot { slot, .. } = spec.target {
                assert!(seen.insert(slot), "slot {slot:?} mapped twice");
            }
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_triggers() {
        let triggers: Vec<(u8, Trigger)> = FIELD_TABLE
            .iter()
            .filter_map(|s| s.trigger.map(|t| (s.id, t)))
            .collect();
        assert_eq!(
            triggers,
            vec![
                (0, Trigger::Telemetry),
                (3, Trigger::Telemetry),
                (11, Trigger::Gps),
                (50, Trigger::State),
            ]
        );
    }

    #[test]
    fn test_reserved_ids() {
        assert_eq!(lookup(38).unwrap().target, Target::Reserved);
        assert_eq!(lookup(255).unwrap().target, Target::Reserved);
    }

    #[test]
    fn test_unknown_ids() {
        for id in [14u8, 37, 39, 41, 43, 49, 51, 254] {
            assert!(lookup(id).is_none(), "id {id} should be unknown");
        }
    }

    #[test]
    fn test_pressure_scale() {
        let spec = lookup(0).unwrap();
        let Target::Slot { slot, scale } = spec.target else {
            panic!("pressure must target a slot");
        };
        assert_eq!(slot, Slot::Pressure);
        assert!((scale.apply(12345) - 123.45).abs() < 1e-4);
    }

    #[test]
    fn test_latitude_scale() {
        let Target::Slot { scale, .. } = lookup(8).unwrap().target else {
            panic!("latitude must target a slot");
        };
        assert!((scale.apply(1_234_567) - 1.234_567).abs() < 1e-6);
    }

    #[test]
    fn test_hdop_scale() {
        let Target::Slot { scale, .. } = lookup(7).unwrap().target else {
            panic!("hdop must target a slot");
        };
        assert!((scale.apply(1500) - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_byte_scale_wraps() {
        assert!((Scale::Byte.apply(-9) - 247.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(lookup(0).unwrap().format_value(12345), "123.449997");
        assert_eq!(lookup(11).unwrap().format_value(9), "9");
        assert_eq!(lookup(11).unwrap().format_value(-1), "255");
        assert_eq!(lookup(11).unwrap().format_value(265), "9");
        assert_eq!(lookup(50).unwrap().format_value(6), "PRIMARY EVENT");
        assert_eq!(lookup(50).unwrap().format_value(20), "invalid (20)");
        assert_eq!(lookup(38).unwrap().format_value(1), "-");
    }

    #[test]
    fn test_state_target() {
        let spec = lookup(50).unwrap();
        assert_eq!(spec.target, Target::State);
        assert_eq!(spec.trigger, Some(Trigger::State));
    }
}
