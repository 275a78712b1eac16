pub(crate) mod core;
pub(crate) mod diag;
pub(crate) mod error;
pub(crate) mod ids;
pub(crate) mod limits;
