//! Purpose: Internal JSON parsing boundary shared by the decoder and the CLI.
//! Exports: `parse` module with decode helpers and parse-failure categorization.
//! Role: Single seam for parser implementation so callsites avoid ad hoc decode logic.
//! Invariants: Raw bytes are only ever parsed through this module.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
