pub(crate) mod document;
pub(crate) mod host;
pub(crate) mod model;
pub(crate) mod selector;
