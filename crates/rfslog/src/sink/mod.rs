//! Destinations for decoded records.
//!
//! A [`RecordSink`] receives each record kind through its own method so
//! implementations can keep telemetry, GPS and state output apart.
//!
//! - [`TextSink`]: tab-separated log lines, one writer per record kind.
//! - [`JsonLinesSink`]: one JSON object per line, one writer per record kind.
//! - `Vec<Record>`: collects records in memory.

mod json;
mod outputs;
mod text;

pub use json::JsonLinesSink;
pub use outputs::{OutputPaths, Outputs};
pub use text::TextSink;

use crate::error::Result;
use crate::record::{GpsRecord, Record, StateRecord, TelemetryRecord};

/// Receives records as the decoder emits them.
pub trait RecordSink {
    /// Write a telemetry record.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn telemetry(&mut self, record: &TelemetryRecord) -> Result<()>;

    /// Write a GPS record.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn gps(&mut self, record: &GpsRecord) -> Result<()>;

    /// Write a state record.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written.
    fn state(&mut self, record: &StateRecord) -> Result<()>;

    /// Flush buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if buffered data cannot be written out.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Route a record to the method for its kind.
    ///
    /// # Errors
    ///
    /// Propagates the error of the kind-specific method.
    fn write(&mut self, record: &Record) -> Result<()> {
        match record {
            Record::Telemetry(r) => self.telemetry(r),
            Record::Gps(r) => self.gps(r),
            Record::State(r) => self.state(r),
        }
    }
}

impl RecordSink for Vec<Record> {
    fn telemetry(&mut self, record: &TelemetryRecord) -> Result<()> {
        self.push(Record::Telemetry(*record));
        Ok(())
    }

    fn gps(&mut self, record: &GpsRecord) -> Result<()> {
        self.push(Record::Gps(*record));
        Ok(())
    }

    fn state(&mut self, record: &StateRecord) -> Result<()> {
        self.push(Record::State(*record));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::AvState;

    #[test]
    fn test_vec_sink_routes_by_kind() {
        let mut sink: Vec<Record> = Vec::new();
        sink.write(&Record::Gps(GpsRecord::default())).unwrap();
        sink.write(&Record::State(StateRecord {
            timestamp: 1,
            sequence: 0,
            state: AvState::Idle,
        }))
        .unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.len(), 2);
        assert!(matches!(sink[0], Record::Gps(_)));
        assert!(matches!(sink[1], Record::State(_)));
    }
}
