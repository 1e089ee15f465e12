pub(crate) mod backend;
pub(crate) mod software;
pub(crate) mod triangle;
