pub mod formatting;
pub mod lines;
pub mod scroll;

pub(crate) use formatting::*;
pub(crate) use lines::*;
pub(crate) use scroll::*;
