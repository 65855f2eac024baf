//! The single-pass conversion engine.
//!
//! The scanner consumes the HTML character stream exactly once. Tag
//! boundaries switch it between content mode and tag mode; every completed
//! tag is dispatched through the behavior registry in [`tags`].

pub(crate) mod attributes;
pub(crate) mod cleanup;
mod main;
pub(crate) mod tags;

pub use main::Converter;
