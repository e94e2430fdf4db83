pub mod assignments;

pub mod auth;

pub mod grades;

pub mod submissions;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use grades::configure_grades_routes;
pub use submissions::configure_submissions_routes;
