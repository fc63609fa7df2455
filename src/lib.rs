//! Office Hiring Game Library
//!
//! The hiring game from the machine-learning bias exhibit. It can run
//! independently or with a Bevy UI.

pub mod assets;
pub mod ml;
pub mod office;

#[cfg(feature = "ui")]
pub mod ui;
