pub mod plan;
pub mod plan_detail;
pub mod user;

pub use plan::Plan;
pub use plan_detail::PlanDetail;
pub use user::User;
