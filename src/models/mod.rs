pub mod application;
pub mod company;
pub mod job;
pub mod student_profile;
pub mod user;

pub use application::*;
pub use company::*;
pub use job::*;
pub use student_profile::*;
pub use user::*;

use mongodb::bson::DateTime;

/// Renders a stored timestamp the way the web clients expect it
/// ("2025-07-17T12:00:00.000Z").
pub(crate) fn rfc3339(dt: DateTime) -> String {
    dt.to_chrono()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
