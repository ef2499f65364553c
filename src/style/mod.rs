pub(crate) mod brightness;
pub(crate) mod color;
