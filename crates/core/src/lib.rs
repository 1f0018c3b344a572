#![deny(warnings)]

pub mod analysis;
pub mod capture;
pub mod config;
pub mod detect;
pub mod emotion;
pub mod report;
pub mod session;
pub mod util;

pub use analysis::{analyze, SessionReport};
