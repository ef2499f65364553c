pub(crate) mod intersection;
pub(crate) mod margin;
