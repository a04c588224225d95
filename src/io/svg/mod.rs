mod camera;
mod color;
mod legend;
mod proj;
mod writer;

pub(crate) use camera::*;
pub(crate) use color::*;
pub(crate) use legend::*;
pub(crate) use proj::*;
pub(crate) use writer::*;
