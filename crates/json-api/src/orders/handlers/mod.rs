//! Order Handlers

pub(crate) mod create;
pub(crate) mod status;
pub(crate) mod track;
