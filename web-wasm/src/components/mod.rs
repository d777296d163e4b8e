pub mod carousel;
pub mod conditions;
pub mod geography;
pub mod header;
pub mod home;
pub(crate) mod panel;
