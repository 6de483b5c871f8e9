//! Purpose: Library crate for decoding paginated JSON envelopes with per-element outcomes.
//! Exports: `api` (stable surface), `core` (decoder internals, errors, shapes).
//! Role: Backs the `pagedecode` CLI and is usable directly from Rust.
//! Invariants: Decoding is a pure function of (bytes, options, shape); no hidden state.
//! Invariants: Element decoders are explicit function values, never inferred from types.
pub mod api;
pub mod core;
mod json;
