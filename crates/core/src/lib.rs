mod assets;

pub mod config;
pub mod diagnostics;
pub mod guard;
pub mod initializer;
pub mod model;
pub mod platform;
pub mod storage;

#[cfg(test)]
mod test_utils;

pub use crate::assets::get_data_dir;
pub use crate::guard::{InitializationOutcome, ModelAvailabilityGuard, check_and_initialize};
pub use crate::initializer::get_initializer;
