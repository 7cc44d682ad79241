//! JSON-lines output, one object per record.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::record::{GpsRecord, Record, StateRecord, TelemetryRecord};

use super::{Outputs, RecordSink};

/// Writes each record as a `kind`-tagged JSON object on its own line.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    outputs: Outputs<W>,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap three writers.
    pub fn new(outputs: Outputs<W>) -> Self {
        Self { outputs }
    }

    /// Take the writers back.
    pub fn into_outputs(self) -> Outputs<W> {
        self.outputs
    }
}

fn write_line(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn telemetry(&mut self, record: &TelemetryRecord) -> Result<()> {
        write_line(&mut self.outputs.telemetry, &Record::Telemetry(*record))
    }

    fn gps(&mut self, record: &GpsRecord) -> Result<()> {
        write_line(&mut self.outputs.gps, &Record::Gps(*record))
    }

    fn state(&mut self, record: &StateRecord) -> Result<()> {
        write_line(&mut self.outputs.state, &Record::State(*record))
    }

    fn flush(&mut self) -> Result<()> {
        self.outputs.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::decoder::{decode_stream, DecodeOptions, Decoder};

    fn frame(field_id: u8, value: i32, timestamp: u32) -> [u8; 8] {
        let v = value.to_be_bytes();
        let t = timestamp.to_be_bytes();
        [v[0], v[1], v[2], v[3], field_id, t[1], t[2], t[3]]
    }

    fn json_lines(bytes: Vec<u8>) -> Vec<serde_json::Value> {
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_records_routed_to_own_writer() {
        let data = [frame(42, 300, 5), frame(3, 981, 6), frame(50, 4, 7)].concat();
        let mut sink = JsonLinesSink::new(Outputs::new(Vec::new(), Vec::new(), Vec::new()));
        let summary = decode_stream(
            Cursor::new(data),
            &mut Decoder::new(),
            &mut sink,
            DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(summary.telemetry_records, 1);
        assert_eq!(summary.state_records, 1);

        let (telemetry, gps, state) = sink.into_outputs().into_inner();
        assert!(gps.is_empty());

        let telemetry = json_lines(telemetry);
        assert_eq!(telemetry.len(), 1);
        assert_eq!(telemetry[0]["kind"], "telemetry");
        assert_eq!(telemetry[0]["timestamp"], 6);
        assert_eq!(telemetry[0]["sequence"], 0);
        assert_eq!(telemetry[0]["baro_altitude"], 300.0);

        let state = json_lines(state);
        assert_eq!(state.len(), 1);
        assert_eq!(state[0]["kind"], "state");
        assert_eq!(state[0]["timestamp"], 7);
        assert_eq!(state[0]["sequence"], 1);
        assert_eq!(state[0]["state"], "LIFTOFF");
    }

    #[test]
    fn test_gps_json_line() {
        let mut sink = JsonLinesSink::new(Outputs::new(Vec::new(), Vec::new(), Vec::new()));
        sink.gps(&GpsRecord {
            timestamp: 10,
            sequence: 3,
            sats: 7,
            ..GpsRecord::default()
        })
        .unwrap();

        let (telemetry, gps, state) = sink.into_outputs().into_inner();
        assert!(telemetry.is_empty());
        assert!(state.is_empty());

        let text = String::from_utf8(gps).unwrap();
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["kind"], "gps");
        assert_eq!(value["sequence"], 3);
        assert_eq!(value["sats"], 7);
    }
}
