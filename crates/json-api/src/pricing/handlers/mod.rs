//! Pricing Handlers

pub(crate) mod badges;
pub(crate) mod quote;
