//! Tab-separated text logs.

use std::io::Write;

use crate::error::Result;
use crate::record::{GpsRecord, StateRecord, TelemetryRecord};

use super::{Outputs, RecordSink};

/// Writes each record's log line to the writer for its kind.
#[derive(Debug)]
pub struct TextSink<W> {
    outputs: Outputs<W>,
}

impl<W: Write> TextSink<W> {
    /// Wrap three writers.
    pub fn new(outputs: Outputs<W>) -> Self {
        Self { outputs }
    }

    /// Take the writers back.
    pub fn into_outputs(self) -> Outputs<W> {
        self.outputs
    }
}

impl<W: Write> RecordSink for TextSink<W> {
    fn telemetry(&mut self, record: &TelemetryRecord) -> Result<()> {
        writeln!(self.outputs.telemetry, "{record}")?;
        Ok(())
    }

    fn gps(&mut self, record: &GpsRecord) -> Result<()> {
        writeln!(self.outputs.gps, "{record}")?;
        Ok(())
    }

    fn state(&mut self, record: &StateRecord) -> Result<()> {
        writeln!(self.outputs.state, "{record}")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.outputs.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{AvState, Record};

    #[test]
    fn test_records_go_to_their_own_writer() {
        let mut sink = TextSink::new(Outputs::new(Vec::new(), Vec::new(), Vec::new()));
        sink.write(&Record::Telemetry(TelemetryRecord::default()))
            .unwrap();
        sink.write(&Record::State(StateRecord {
            timestamp: 3,
            sequence: 1,
            state: AvState::Filling,
        }))
        .unwrap();
        sink.flush().unwrap();

        let (telemetry, gps, state) = sink.into_outputs().into_inner();
        let telemetry = String::from_utf8(telemetry).unwrap();
        assert!(telemetry.starts_with("3\t0\t0\t"));
        assert!(telemetry.ends_with('\n'));
        assert_eq!(telemetry.lines().count(), 1);
        assert!(gps.is_empty());
        assert_eq!(
            String::from_utf8(state).unwrap(),
            "2\t3\t1\tAVState FILLING\t42.000000\n"
        );
    }
}
