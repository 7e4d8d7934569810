extern crate nalgebra as na;

pub mod elements;
pub mod prelude;
pub mod tle;
