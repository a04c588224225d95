mod viewer;

pub(crate) use viewer::*;
