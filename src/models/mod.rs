mod exercise;
mod plan;
mod questionnaire;
mod recommendation;
mod session;
mod user;

pub use exercise::*;
pub use plan::*;
pub use questionnaire::*;
pub use recommendation::*;
pub use session::*;
pub use user::*;
