use std::time::Duration;

use serde_json::Value;

use crate::core::traits::backend::{ExecFault, ExecutionBackend};

/// Backend that answers with a canned result after a fixed delay. Useful for
/// wiring and latency testing without an interpreter.
#[derive(Debug, Clone)]
pub struct BackendStub {
    result: Result<Value, ExecFault>,
    delay: Duration,
}

impl BackendStub {
    pub fn new(result: Result<Value, ExecFault>, delay: Duration) -> Self {
        Self { result, delay }
    }
}

#[async_trait::async_trait]
impl ExecutionBackend for BackendStub {
    #[tracing::instrument]
    async fn execute(
        &self,
        source: &str,
        function_name: &str,
        args: &[Value],
        budget: Duration,
    ) -> Result<Value, ExecFault> {
        tracing::debug!(
            "Start execution: source={:?}, function={:?}, args={:?}, budget={:?}",
            source,
            function_name,
            args,
            budget
        );
        tokio::time::sleep(self.delay).await;
        tracing::debug!("Execution result: {:?}", self.result);

        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_stub_returns_canned_result() {
        let stub = BackendStub::new(Ok(json!([0, 1])), Duration::from_millis(1));

        let result = stub
            .execute("function f() {}", "f", &[], Duration::from_secs(1))
            .await;

        assert_eq!(result.unwrap(), json!([0, 1]));
    }
}
