pub mod auth;
pub mod caller;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use caller::{load_caller_middleware, CurrentCaller};
pub use response::{ApiResponse, ApiResult};
