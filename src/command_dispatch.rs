//! Purpose: Hold top-level CLI command dispatch for `pagedecode`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Every decode goes through `api::decode_envelope` with an explicit shape.
//! Invariants: Output envelopes and exit code semantics stay stable across commands.

use super::*;

use super::envelope_json::{envelope_json, outcome_json};
use pagedecode::api::{Outcome, decode_envelope, decode_envelope_str};
use tracing::{debug, info};

pub(super) fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "pagedecode", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Repro { pretty } => {
            let envelope = decode_envelope_str(
                REPRO_DOCUMENT,
                &DecodeOptions::new(),
                shape::outcome(shape::string),
            )?;
            info!(values = envelope.values.len(), "reproduction document decoded");
            let report = envelope_json(&envelope, |outcome: &Outcome<String>| {
                outcome_json(outcome, |text: &String| Value::String(text.clone()))
            });
            emit_json(&report, pretty, color_mode);
            Ok(RunOutcome::ok())
        }
        Command::Decode(args) => {
            let options = decode_options(&args)?;
            let bytes = read_input(args.input.as_deref())?;
            debug!(bytes = bytes.len(), shape = ?args.shape, outcome = args.outcome, "decoding input");
            let element = element_shape(args.shape);

            let report = if args.outcome {
                let envelope = decode_envelope(&bytes, &options, shape::outcome(element))?;
                let failed = envelope.failures().count();
                if failed > 0 {
                    info!(failed, total = envelope.values.len(), "captured element failures");
                }
                envelope_json(&envelope, |outcome: &Outcome<Value>| {
                    outcome_json(outcome, Value::clone)
                })
            } else {
                let envelope = decode_envelope(&bytes, &options, element)?;
                envelope_json(&envelope, Value::clone)
            };
            emit_json(&report, args.pretty, color_mode);
            Ok(RunOutcome::ok())
        }
    }
}
