// Core helpers shared by engine and gameplay code

pub mod math;
