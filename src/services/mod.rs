pub mod error;
pub mod plan_detail_service;
pub mod plan_service;
pub mod user_service;

pub use error::ServiceError;
pub use plan_detail_service::PlanDetailService;
pub use plan_service::PlanService;
pub use user_service::UserService;
