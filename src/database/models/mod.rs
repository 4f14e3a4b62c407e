pub mod commons;
pub mod user_commons;

pub use commons::Commons;
pub use user_commons::UserCommons;
