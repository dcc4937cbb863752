//! Admin authentication.

pub(crate) mod middleware;
