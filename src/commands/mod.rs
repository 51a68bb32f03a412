//! Command implementations for the depth chart CLI

pub mod common;
pub mod depth_chart;
pub mod import;


pub use common::CommandContext;
