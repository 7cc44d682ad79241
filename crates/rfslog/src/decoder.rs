//! Stateful frame decoder.
//!
//! [`Decoder`] owns the accumulator and both sequence counters for one
//! decode session. [`decode_stream`] drives it over a byte stream and
//! forwards every emitted record to a [`RecordSink`].

use std::collections::BTreeMap;
use std::io::Read;

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::accumulator::{Accumulator, Applied};
use crate::error::Result;
use crate::fields::{Slot, Trigger};
use crate::frame::{Frame, FrameReader};
use crate::record::{AvState, GpsRecord, Record, StateRecord, TelemetryRecord};
use crate::sink::RecordSink;

/// What a single frame did to the decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// A slot was updated, nothing emitted.
    Stored(Slot),
    /// A record was emitted.
    Record(Record),
    /// Reserved id, ignored.
    Reserved,
    /// Id not in the field table.
    Unknown(u8),
    /// State value outside the known range. The shared sequence number was
    /// still consumed.
    InvalidState {
        /// Raw value of the frame.
        value: i32,
        /// Sequence number that was skipped.
        sequence: u32,
    },
}

/// Decoder context for one session.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    accumulator: Accumulator,
    sensor_sequence: u32,
    gps_sequence: u32,
}

impl Decoder {
    /// Create a decoder with zeroed state and both counters at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current accumulator contents.
    #[must_use]
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Sequence number the next telemetry or state emission will get.
    #[must_use]
    pub fn next_sensor_sequence(&self) -> u32 {
        self.sensor_sequence
    }

    /// Sequence number the next GPS emission will get.
    #[must_use]
    pub fn next_gps_sequence(&self) -> u32 {
        self.gps_sequence
    }

    /// Apply one frame.
    pub fn process(&mut self, frame: &Frame) -> Event {
        match self.accumulator.apply(frame.field_id, frame.raw_value) {
            Applied::Stored(slot) => Event::Stored(slot),
            Applied::Reserved => Event::Reserved,
            Applied::Unknown(id) => Event::Unknown(id),
            Applied::Triggered(trigger) => self.emit(trigger, frame),
        }
    }

    fn emit(&mut self, trigger: Trigger, frame: &Frame) -> Event {
        let acc = &self.accumulator;
        match trigger {
            Trigger::Telemetry => Event::Record(Record::Telemetry(TelemetryRecord {
                timestamp: frame.timestamp,
                sequence: post_increment(&mut self.sensor_sequence),
                baro_altitude: acc.baro_altitude,
                speed: acc.speed,
                temperature: acc.temperature,
                pressure: acc.pressure,
                accel_x: acc.accel_x,
                accel_y: acc.accel_y,
                accel_z: acc.accel_z,
                gyro_x: acc.gyro_x,
                gyro_y: acc.gyro_y,
                gyro_z: acc.gyro_z,
            })),
            Trigger::Gps => Event::Record(Record::Gps(GpsRecord {
                timestamp: frame.timestamp,
                sequence: post_increment(&mut self.gps_sequence),
                hdop: acc.hdop,
                gps_altitude: acc.gps_altitude,
                latitude: acc.latitude,
                longitude: acc.longitude,
                sats: acc.sats,
            })),
            Trigger::State => {
                // The shared counter advances whether or not the value maps.
                let sequence = post_increment(&mut self.sensor_sequence);
                match AvState::from_raw(frame.raw_value) {
                    Some(state) => Event::Record(Record::State(StateRecord {
                        timestamp: frame.timestamp,
                        sequence,
                        state,
                    })),
                    None => Event::InvalidState {
                        value: frame.raw_value,
                        sequence,
                    },
                }
            }
        }
    }
}

fn post_increment(counter: &mut u32) -> u32 {
    let current = *counter;
    *counter = counter.wrapping_add(1);
    current
}

/// Diagnostic switches for [`decode_stream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Log unknown field ids at `warn` instead of `debug`.
    pub warn_unknown_ids: bool,
    /// Log out-of-range state values at `warn` instead of `debug`.
    pub warn_invalid_states: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            warn_unknown_ids: true,
            warn_invalid_states: true,
        }
    }
}

/// Counts gathered over one decode run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeSummary {
    /// Complete frames read.
    pub frames: u64,
    /// Bytes consumed from the stream.
    pub bytes: u64,
    /// Telemetry records emitted.
    pub telemetry_records: u64,
    /// GPS records emitted.
    pub gps_records: u64,
    /// State records emitted.
    pub state_records: u64,
    /// Frames with a reserved id.
    pub reserved_frames: u64,
    /// Frames with an id not in the field table.
    pub unknown_frames: u64,
    /// Occurrences of each unknown id.
    pub unknown_ids: BTreeMap<u8, u64>,
    /// State frames whose value did not map to a state.
    pub invalid_states: u64,
}

impl DecodeSummary {
    /// Total records emitted across all kinds.
    #[must_use]
    pub fn records(&self) -> u64 {
        self.telemetry_records + self.gps_records + self.state_records
    }

    fn count(&mut self, event: &Event) {
        match event {
            Event::Stored(_) => {}
            Event::Record(Record::Telemetry(_)) => self.telemetry_records += 1,
            Event::Record(Record::Gps(_)) => self.gps_records += 1,
            Event::Record(Record::State(_)) => self.state_records += 1,
            Event::Reserved => self.reserved_frames += 1,
            Event::Unknown(id) => {
                self.unknown_frames += 1;
                *self.unknown_ids.entry(*id).or_default() += 1;
            }
            Event::InvalidState { .. } => self.invalid_states += 1,
        }
    }
}

/// Decode every frame in `input`, writing records to `sink`.
///
/// Stops cleanly at the end of the stream. Unknown ids and invalid states
/// are logged and counted, never fatal.
///
/// # Errors
///
/// Returns the first stream error (truncated frame or read failure) or sink
/// write error. Records emitted before the error have already been written.
pub fn decode_stream<R, S>(
    input: R,
    decoder: &mut Decoder,
    sink: &mut S,
    options: DecodeOptions,
) -> Result<DecodeSummary>
where
    R: Read,
    S: RecordSink + ?Sized,
{
    let mut reader = FrameReader::new(input);
    let mut summary = DecodeSummary::default();

    while let Some(frame) = reader.next_frame()? {
        let offset = reader.offset() - crate::frame::FRAME_LEN as u64;
        let event = decoder.process(&frame);
        summary.count(&event);

        match event {
            Event::Record(record) => {
                trace!(%record, "emit");
                sink.write(&record)?;
            }
            Event::Unknown(id) => {
                if options.warn_unknown_ids {
                    warn!(id, offset, "unhandled field id");
                } else {
                    debug!(id, offset, "unhandled field id");
                }
            }
            Event::InvalidState { value, sequence } => {
                if options.warn_invalid_states {
                    warn!(value, sequence, offset, "state value out of range");
                } else {
                    debug!(value, sequence, offset, "state value out of range");
                }
            }
            Event::Stored(_) | Event::Reserved => {}
        }
    }

    sink.flush()?;
    summary.frames = reader.frames_read();
    summary.bytes = reader.offset();

    info!(
        frames = summary.frames,
        telemetry = summary.telemetry_records,
        gps = summary.gps_records,
        state = summary.state_records,
        unknown = summary.unknown_frames,
        "decode finished"
    );
    Ok(summary)
}
