//! Storage repositories.
//!
//! One module per table. Repository functions take a borrowed connection and
//! never open or close connections themselves.

pub mod patients;
