pub extern crate nalgebra as na;

pub mod ephemeris;
pub mod propagation;
