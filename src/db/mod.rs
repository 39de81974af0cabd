pub mod exercises;
pub mod history;
pub mod plans;
pub mod questionnaires;
pub mod sessions;
pub mod users;
