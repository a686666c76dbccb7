use std::time::Duration;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExecFault {
    /// The submission itself is at fault: syntax error, thrown error, wrong
    /// arity, or the expected function is not defined.
    #[error("{msg}")]
    Fault { msg: String },
    #[error("execution exceeded the {budget_ms} ms budget")]
    TimedOut { budget_ms: u64 },
    /// Host-side failure (interpreter missing, work dir unwritable). Still
    /// reported against the test case, never raised to the caller.
    #[error("internal error: {msg}")]
    Internal { msg: String },
}

#[mockall::automock]
#[async_trait::async_trait]
pub trait ExecutionBackend: std::fmt::Debug + Send + Sync {
    /// Evaluates `source`, resolves the function named `function_name`, and
    /// invokes it with `args` under the given wall-clock budget. The returned
    /// value is whatever the function produced, untyped.
    async fn execute(
        &self,
        source: &str,
        function_name: &str,
        args: &[Value],
        budget: Duration,
    ) -> Result<Value, ExecFault>;
}
