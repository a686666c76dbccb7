pub const UNSUPPORTED_LANGUAGE_MSG: &str = "execution not supported for this language";
pub const NOT_IMPLEMENTED_MSG: &str = "solution not implemented";

pub const CONSOLE_SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━";

/// Wall-clock budget for one test-case evaluation.
pub const DEFAULT_BUDGET_MS: u64 = 2000;
