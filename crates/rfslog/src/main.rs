//! `rfslog` - CLI for decoding flight-recorder dumps
//!
//! This binary decodes a flash dump into telemetry, GPS and state logs, and
//! offers a few inspection commands.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use rfslog::cli::{Cli, Command, ConfigCommand, DecodeCommand, FieldsCommand, FramesCommand};
use rfslog::config::OutputFormat;
use rfslog::{
    decode_stream, init_logging, Config, Decoder, Error, FrameReader, JsonLinesSink, Outputs,
    RecordSink, TextSink, FIELD_TABLE, FRAME_LEN,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Decode(cmd) => handle_decode(&config, cmd),
        Command::Frames(cmd) => handle_frames(&config, cmd),
        Command::Fields(cmd) => handle_fields(&cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_input(path: &Path) -> rfslog::Result<BufReader<File>> {
    let file = File::open(path).map_err(|source| Error::InputOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn handle_decode(config: &Config, cmd: DecodeCommand) -> anyhow::Result<()> {
    let input = cmd.input.unwrap_or_else(|| config.input.path.clone());
    let format = cmd.format.map_or(config.output.format, OutputFormat::from);
    let paths = config.output_paths(cmd.output_dir.as_deref());

    info!("Decoding {}", input.display());
    let reader = open_input(&input)?;
    let outputs = Outputs::create(&paths)?;

    let mut sink: Box<dyn RecordSink> = match format {
        OutputFormat::Text => Box::new(TextSink::new(outputs)),
        OutputFormat::Json => Box::new(JsonLinesSink::new(outputs)),
    };

    let summary = decode_stream(
        reader,
        &mut Decoder::new(),
        sink.as_mut(),
        config.decode_options(),
    )
    .with_context(|| format!("decoding {}", input.display()))?;

    if cmd.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn handle_frames(config: &Config, cmd: FramesCommand) -> anyhow::Result<()> {
    let input = cmd.input.unwrap_or_else(|| config.input.path.clone());
    let reader = FrameReader::new(open_input(&input)?);
    let limit = cmd.limit.unwrap_or(usize::MAX);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "offset\tid\tfield\traw\tvalue\ttimestamp")?;

    for (index, frame) in reader.take(limit).enumerate() {
        let frame = frame.with_context(|| format!("reading {}", input.display()))?;
        let offset = index * FRAME_LEN;
        let (name, value) = match rfslog::lookup(frame.field_id) {
            Some(spec) => (spec.name, spec.format_value(frame.raw_value)),
            None => ("UNKNOWN", "-".to_string()),
        };
        writeln!(
            out,
            "{offset}\t{}\t{name}\t{}\t{value}\t{}",
            frame.field_id, frame.raw_value, frame.timestamp
        )?;
    }
    Ok(())
}

fn handle_fields(cmd: &FieldsCommand) -> anyhow::Result<()> {
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(FIELD_TABLE)?);
        return Ok(());
    }

    println!("{:>4}  {:<14} {:<6} {:<14} trigger", "id", "field", "unit", "scale");
    for spec in FIELD_TABLE {
        let scale = match spec.target {
            rfslog::fields::Target::Slot { scale, .. } => match scale {
                rfslog::fields::Scale::Divide(d) => format!("/{d}"),
                rfslog::fields::Scale::Byte => "u8".to_string(),
            },
            rfslog::fields::Target::State => "state".to_string(),
            rfslog::fields::Target::Reserved => "-".to_string(),
        };
        let trigger = spec
            .trigger
            .map_or_else(|| "-".to_string(), |t| format!("{t:?}").to_lowercase());
        println!(
            "{:>4}  {:<14} {:<6} {:<14} {trigger}",
            spec.id, spec.name, spec.unit, scale
        );
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let paths = config.output_paths(None);
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Input]");
                println!("  Dump path:          {}", config.input.path.display());
                println!();
                println!("[Output]");
                println!("  Telemetry log:      {}", paths.telemetry.display());
                println!("  GPS log:            {}", paths.gps.display());
                println!("  State log:          {}", paths.state.display());
                println!("  Format:             {:?}", config.output.format);
                println!();
                println!("[Decode]");
                println!("  Warn unknown ids:   {}", config.decode.warn_unknown_ids);
                println!(
                    "  Warn invalid state: {}",
                    config.decode.warn_invalid_states
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path: PathBuf = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("validating configuration")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
