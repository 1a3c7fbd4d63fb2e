//! Domain entities.

mod course;
mod personal_courses;
mod price_record;

pub use course::*;
pub use personal_courses::*;
pub use price_record::*;
