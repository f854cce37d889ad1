pub(crate) mod dashboard;
pub(crate) mod grid;
pub(crate) mod members;
