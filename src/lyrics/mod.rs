pub mod convert;
pub mod core;
pub mod error;
pub mod instrumental;
pub mod match_filter;
pub mod model;
pub mod providers;
pub mod timestamp;
pub(crate) mod util;
