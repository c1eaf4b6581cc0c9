//! Tool dispatch contracts for QuerySculptor: one async handler per
//! agent-facing operation (`start-session`, `select-field`,
//! `set-argument`, ...), each a thin `(ctx, input) -> ToolResult<Output>`
//! shim over [`querysculptor_model`], [`querysculptor_validator`],
//! [`querysculptor_builder`], [`querysculptor_schema`],
//! [`querysculptor_complexity`], [`querysculptor_session`], and
//! [`querysculptor_executor`]. This crate owns no transport — an MCP
//! server, an HTTP handler, or a test harness all call the same functions.

mod config;
mod context;
mod error;
mod handlers;
mod types;

pub use config::{AppConfig, ConfigError};
pub use context::AppContext;
pub use error::{ErrorKind, ToolError};
pub use handlers::*;
pub use types::{ToolOutcome, ToolResult};
