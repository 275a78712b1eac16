pub(crate) mod blend;
pub(crate) mod boolean;
pub(crate) mod effects;
pub(crate) mod emitters;
pub(crate) mod filters;
pub(crate) mod registry;
pub(crate) mod section;
pub(crate) mod walker;
