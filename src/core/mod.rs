pub mod config;
pub mod error;
pub mod types;

pub use config::{BudgetConfig, BudgetConfigProvider, BudgetConfigResolver};
pub use error::{BuildError, Result};
pub use types::{AllocationKey, AttributeKind, SkillId, SubjectId};
