// Core modules implementing the decode contract and error modeling.
pub mod context;
pub mod date;
pub mod envelope;
pub mod error;
pub mod outcome;
pub mod path;
pub mod shape;
