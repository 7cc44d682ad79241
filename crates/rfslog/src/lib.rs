//! `rfslog` - Decoder for rocket flight-recorder flash dumps
//!
//! A dump is a flat sequence of 8-byte frames, each carrying one sensor
//! value tagged with a field id. The decoder keeps the last value of every
//! field and, when a trigger id arrives, emits a telemetry, GPS or vehicle
//! state record to a [`RecordSink`].
//!
//! ```no_run
//! use std::io::BufReader;
//! use rfslog::{decode_stream, DecodeOptions, Decoder, Record};
//!
//! let file = std::fs::File::open("FLASH.DMP")?;
//! let mut records: Vec<Record> = Vec::new();
//! let summary = decode_stream(
//!     BufReader::new(file),
//!     &mut Decoder::new(),
//!     &mut records,
//!     DecodeOptions::default(),
//! )?;
//! println!("{} records", summary.records());
//! # Ok::<(), rfslog::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod accumulator;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod fields;
pub mod frame;
pub mod logging;
pub mod record;
pub mod sink;

pub use accumulator::{Accumulator, Applied};
pub use config::Config;
pub use decoder::{decode_stream, DecodeOptions, DecodeSummary, Decoder, Event};
pub use error::{Error, Result};
pub use fields::{lookup, FieldSpec, Trigger, FIELD_TABLE};
pub use frame::{Frame, FrameReader, FRAME_LEN};
pub use logging::init_logging;
pub use record::{AvState, GpsRecord, Record, StateRecord, TelemetryRecord};
pub use sink::{JsonLinesSink, OutputPaths, Outputs, RecordSink, TextSink};
