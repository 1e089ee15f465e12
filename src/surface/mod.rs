pub(crate) mod blend;
pub(crate) mod buffer;
pub(crate) mod color;
pub(crate) mod pen;
