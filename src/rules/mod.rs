mod corpus;
mod library;
mod model;

pub use corpus::{ABS_GM_FORMULA, builtin_rules};
pub use library::{RuleLibrary, default_library};
pub use model::{Framework, LimitType, RuleCategory, RuleReference, RuleRequirement};
