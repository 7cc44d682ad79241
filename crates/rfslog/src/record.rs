//! Record types emitted by the decoder.
//!
//! Each record's `Display` impl renders the tab-separated log line used by
//! the ground-station tooling, floats at fixed six-decimal precision.

use std::fmt;

use serde::Serialize;

/// Vehicle flight-phase state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvState {
    /// Powered down, waiting.
    Sleep,
    /// Sensor calibration.
    Calibration,
    /// Ready on the pad.
    Idle,
    /// Propellant loading.
    Filling,
    /// Engine ignition detected.
    Liftoff,
    /// Unpowered ascent.
    Coast,
    /// First recovery event.
    PrimaryEvent,
    /// Second recovery event.
    SecondaryEvent,
    /// Landed.
    TouchDown,
}

impl AvState {
    /// All states in wire order.
    pub const ALL: [Self; 9] = [
        Self::Sleep,
        Self::Calibration,
        Self::Idle,
        Self::Filling,
        Self::Liftoff,
        Self::Coast,
        Self::PrimaryEvent,
        Self::SecondaryEvent,
        Self::TouchDown,
    ];

    /// Map a raw state value. Anything outside `0..=8` is `None`.
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Name as written in the status log.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sleep => "SLEEP",
            Self::Calibration => "CALIBRATION",
            Self::Idle => "IDLE",
            Self::Filling => "FILLING",
            Self::Liftoff => "LIFTOFF",
            Self::Coast => "COAST",
            Self::PrimaryEvent => "PRIMARY EVENT",
            Self::SecondaryEvent => "SECONDARY EVENT",
            Self::TouchDown => "TOUCH DOWN",
        }
    }
}

impl fmt::Display for AvState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sensor snapshot, emitted on pressure or Z-acceleration frames.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TelemetryRecord {
    /// Timestamp of the triggering frame.
    pub timestamp: u32,
    /// Position in the shared telemetry/state sequence.
    pub sequence: u32,
    /// Barometric altitude.
    pub baro_altitude: f32,
    /// Vertical speed.
    pub speed: f32,
    /// Temperature.
    pub temperature: f32,
    /// Static pressure.
    pub pressure: f32,
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
}

/// GPS fix, emitted on satellite-count frames.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GpsRecord {
    /// Timestamp of the triggering frame.
    pub timestamp: u32,
    /// Position in the GPS sequence.
    pub sequence: u32,
    /// Horizontal dilution of precision.
    pub hdop: f32,
    /// GPS altitude.
    pub gps_altitude: f32,
    /// Latitude in degrees.
    pub latitude: f32,
    /// Longitude in degrees.
    pub longitude: f32,
    /// Satellites in view.
    pub sats: u8,
}

/// Vehicle state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateRecord {
    /// Timestamp of the triggering frame.
    pub timestamp: u32,
    /// Position in the shared telemetry/state sequence.
    pub sequence: u32,
    /// New state.
    pub state: AvState,
}

/// Any emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    /// Sensor snapshot.
    Telemetry(TelemetryRecord),
    /// GPS fix.
    Gps(GpsRecord),
    /// State transition.
    State(StateRecord),
}

impl Record {
    /// Timestamp of the frame that produced this record.
    #[must_use]
    pub fn timestamp(&self) -> u32 {
        match self {
            Self::Telemetry(r) => r.timestamp,
            Self::Gps(r) => r.timestamp,
            Self::State(r) => r.timestamp,
        }
    }

    /// Sequence number within this record's counter.
    #[must_use]
    pub fn sequence(&self) -> u32 {
        match self {
            Self::Telemetry(r) => r.sequence,
            Self::Gps(r) => r.sequence,
            Self::State(r) => r.sequence,
        }
    }
}

impl fmt::Display for TelemetryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "3\t{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            self.timestamp,
            self.sequence,
            self.baro_altitude,
            self.speed,
            self.temperature,
            self.pressure,
            self.accel_x,
            self.accel_y,
            self.accel_z,
            self.gyro_x,
            self.gyro_y,
            self.gyro_z,
        )
    }
}

impl fmt::Display for GpsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Repeated altitude column kept for compatibility with the recorder's log format.
        write!(
            f,
            "1\t{}\t{}\tGPS\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{:.6}\t{}",
            self.timestamp,
            self.sequence,
            self.hdop,
            self.gps_altitude,
            self.latitude,
            self.longitude,
            self.gps_altitude,
            self.sats,
        )
    }
}

impl fmt::Display for StateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The trailing column is a fixed placeholder.
        write!(
            f,
            "2\t{}\t{}\tAVState {}\t42.000000",
            self.timestamp, self.sequence, self.state
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telemetry(r) => r.fmt(f),
            Self::Gps(r) => r.fmt(f),
            Self::State(r) => r.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_raw() {
        assert_eq!(AvState::from_raw(0), Some(AvState::Sleep));
        assert_eq!(AvState::from_raw(4), Some(AvState::Liftoff));
        assert_eq!(AvState::from_raw(8), Some(AvState::TouchDown));
        assert_eq!(AvState::from_raw(9), None);
        assert_eq!(AvState::from_raw(20), None);
        assert_eq!(AvState::from_raw(-1), None);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(AvState::PrimaryEvent.to_string(), "PRIMARY EVENT");
        assert_eq!(AvState::SecondaryEvent.to_string(), "SECONDARY EVENT");
        assert_eq!(AvState::TouchDown.to_string(), "TOUCH DOWN");
        assert_eq!(AvState::Calibration.to_string(), "CALIBRATION");
    }

    #[test]
    fn test_telemetry_line() {
        let record = TelemetryRecord {
            timestamp: 1000,
            sequence: 7,
            baro_altitude: 120.0,
            speed: -3.0,
            temperature: 21.5,
            pressure: 1013.25,
            accel_x: 1.0,
            accel_y: 2.0,
            accel_z: 3.0,
            gyro_x: 4.0,
            gyro_y: 5.0,
            gyro_z: 6.0,
        };
        assert_eq!(
            record.to_string(),
            "3\t1000\t7\t120.000000\t-3.000000\t21.500000\t1013.250000\t1.000000\t2.000000\t3.000000\t4.000000\t5.000000\t6.000000"
        );
    }

    #[test]
    fn test_telemetry_line_defaults() {
        let line = TelemetryRecord::default().to_string();
        assert_eq!(line.split('\t').count(), 13);
        assert!(line.ends_with("\t0.000000"));
    }

    #[test]
    fn test_gps_line_repeats_altitude() {
        let record = GpsRecord {
            timestamp: 55,
            sequence: 2,
            hdop: 1.5,
            gps_altitude: 350.0,
            latitude: 0.5,
            longitude: -0.25,
            sats: 9,
        };
        assert_eq!(
            record.to_string(),
            "1\t55\t2\tGPS\t1.500000\t350.000000\t0.500000\t-0.250000\t350.000000\t9"
        );
    }

    #[test]
    fn test_state_line() {
        let record = StateRecord {
            timestamp: 16_777_215,
            sequence: 0,
            state: AvState::Liftoff,
        };
        assert_eq!(
            record.to_string(),
            "2\t16777215\t0\tAVState LIFTOFF\t42.000000"
        );
    }

    #[test]
    fn test_record_accessors() {
        let record = Record::State(StateRecord {
            timestamp: 9,
            sequence: 4,
            state: AvState::Coast,
        });
        assert_eq!(record.timestamp(), 9);
        assert_eq!(record.sequence(), 4);
        assert_eq!(record.to_string(), "2\t9\t4\tAVState COAST\t42.000000");
    }

    #[test]
    fn test_record_serialization_tag() {
        let record = Record::Gps(GpsRecord {
            sats: 6,
            ..GpsRecord::default()
        });
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["kind"], "gps");
        assert_eq!(json["sats"], 6);
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_string(&AvState::PrimaryEvent).unwrap();
        assert_eq!(json, "\"PRIMARY_EVENT\"");
    }
}
