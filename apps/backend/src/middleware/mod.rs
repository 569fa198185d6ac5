pub mod authenticate;
pub mod request_trace;
pub mod require_role;
pub mod structured_logger;

pub use authenticate::Authenticate;
pub use request_trace::{RequestTrace, TraceId};
pub use require_role::RequireRole;
pub use structured_logger::StructuredLogger;
