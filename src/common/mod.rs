mod display;
#[cfg(feature = "download")]
mod download;
mod fs;

pub(crate) use display::*;
#[cfg(feature = "download")]
pub(crate) use download::*;
pub(crate) use fs::*;
