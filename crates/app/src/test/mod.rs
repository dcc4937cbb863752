//! Shared test infrastructure

pub(crate) mod helpers;
