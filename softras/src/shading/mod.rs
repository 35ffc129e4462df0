pub(crate) mod builtin;
pub(crate) mod program;
pub(crate) mod state;
pub(crate) mod texture;
pub(crate) mod varyings;
