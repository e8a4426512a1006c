pub mod date_format;
pub(crate) mod wire;
