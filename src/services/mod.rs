mod plan_service;
mod progression_service;
mod questionnaire_service;
mod session_service;
mod swap_service;

pub use plan_service::PlanService;
pub use progression_service::ProgressionService;
pub use questionnaire_service::QuestionnaireService;
pub use session_service::SessionService;
pub use swap_service::SwapService;
