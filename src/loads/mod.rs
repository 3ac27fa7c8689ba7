//! Loading modes and the reference-node loads that drive them

mod mode;
mod reference_load;

pub use mode::LoadingMode;
pub use reference_load::{neutral_axis_from, ReferenceLoad};
