pub mod breaks;
pub mod cache;
pub mod limits;
pub mod status;
pub mod window;

pub use cache::HosStatusCache;
pub use limits::{HosLimits, HosRules, WindowMode};
pub use status::calculate_hos_status;
