pub(crate) mod cache;
pub(crate) mod catalog;
pub(crate) mod data;
pub(crate) mod mesh;
