pub mod application;
pub mod resume;

pub use application::{ApplicationRecord, Platform, Status};
pub use resume::TailoredResume;
