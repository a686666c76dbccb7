use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::{fs, time};
use uuid::Uuid;

use crate::core::traits::backend::{ExecFault, ExecutionBackend};

/// Script evaluated by the node subprocess. It reads `{ source, function,
/// args }` as JSON on stdin, materializes the solution function in an isolated
/// function scope, invokes it, and prints a single JSON reply as the final
/// stdout line (student code may print its own lines before it).
const HARNESS: &str = r#""use strict";
const chunks = [];
process.stdin.on("data", (c) => chunks.push(c));
process.stdin.on("end", () => {
    const payload = JSON.parse(Buffer.concat(chunks).toString("utf8"));
    let reply;
    try {
        const factory = new Function(
            payload.source +
            "\n;return typeof " + payload.function + " === \"function\" ? " + payload.function + " : undefined;"
        );
        const solution = factory();
        if (solution === undefined) {
            reply = { ok: false, error: payload.function + " is not defined" };
        } else {
            const value = solution.apply(null, payload.args);
            reply = { ok: true, value: value === undefined ? null : value };
        }
    } catch (err) {
        reply = { ok: false, error: String(err && err.message ? err.message : err) };
    }
    process.stdout.write(JSON.stringify(reply) + "\n");
});
"#;

#[derive(Debug, Serialize)]
struct HarnessPayload<'a> {
    source: &'a str,
    function: &'a str,
    args: &'a [Value],
}

#[derive(Debug, Deserialize)]
struct HarnessReply {
    ok: bool,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Runs JavaScript submissions in a node subprocess. Each invocation gets a
/// fresh process and a fresh evaluation of the source, so faults and side
/// effects cannot leak between test cases or into the host.
#[derive(Clone, Debug)]
pub struct NodeBackend {
    dir: PathBuf,
    node_path: PathBuf,
}

impl NodeBackend {
    pub fn new<T, U>(dir: T, node_path: U) -> Self
    where
        T: AsRef<Path>,
        U: AsRef<Path>,
    {
        NodeBackend {
            dir: dir.as_ref().into(),
            node_path: node_path.as_ref().into(),
        }
    }
}

#[async_trait::async_trait]
impl ExecutionBackend for NodeBackend {
    #[tracing::instrument(skip(source, args))]
    async fn execute(
        &self,
        source: &str,
        function_name: &str,
        args: &[Value],
        budget: Duration,
    ) -> Result<Value, ExecFault> {
        let script_path = self.dir.join(format!("{}.js", Uuid::new_v4()));

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ExecFault::Internal { msg: e.to_string() })?;
        fs::write(&script_path, HARNESS)
            .await
            .map_err(|e| ExecFault::Internal { msg: e.to_string() })?;

        let payload = serde_json::to_vec(&HarnessPayload {
            source,
            function: function_name,
            args,
        })
        .map_err(|e| ExecFault::Internal { msg: e.to_string() })?;

        let result = self.run_harness(&script_path, &payload, budget).await;
        let _ = fs::remove_file(&script_path).await;
        result
    }
}

impl NodeBackend {
    async fn run_harness(
        &self,
        script_path: &Path,
        payload: &[u8],
        budget: Duration,
    ) -> Result<Value, ExecFault> {
        let mut child = Command::new(&self.node_path)
            .arg(script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecFault::Internal { msg: e.to_string() })?;

        let mut stdin = child.stdin.take().ok_or_else(|| ExecFault::Internal {
            msg: "child stdin unavailable".to_string(),
        })?;
        stdin
            .write_all(payload)
            .await
            .map_err(|e| ExecFault::Internal { msg: e.to_string() })?;
        drop(stdin);

        // kill_on_drop reaps the subprocess if the budget elapses.
        let out = match time::timeout(budget, child.wait_with_output()).await {
            Ok(out) => out.map_err(|e| ExecFault::Internal { msg: e.to_string() })?,
            Err(_) => {
                return Err(ExecFault::TimedOut {
                    budget_ms: budget.as_millis() as u64,
                });
            }
        };

        tracing::debug!("node exited with {:?}", out.status);

        if !out.status.success() {
            return Err(ExecFault::Fault {
                msg: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&out.stdout);
        let reply_line = stdout.lines().last().unwrap_or("");
        let reply: HarnessReply =
            serde_json::from_str(reply_line).map_err(|_| ExecFault::Fault {
                msg: format!("solution produced unreadable output: {}", stdout.trim()),
            })?;

        if reply.ok {
            Ok(reply.value.unwrap_or(Value::Null))
        } else {
            Err(ExecFault::Fault {
                msg: reply.error.unwrap_or_else(|| "unknown execution fault".to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use serde_json::json;
    use uuid::Uuid;

    use crate::backends::node::NodeBackend;
    use crate::core::traits::backend::{ExecFault, ExecutionBackend};

    fn node_path() -> String {
        std::env::var("NODE_BIN").unwrap_or_else(|_| "node".to_string())
    }

    const CORRECT_CODE: &str = "
        function twoSum(nums, target) {
            const seen = new Map();
            for (let i = 0; i < nums.length; i++) {
                const complement = target - nums[i];
                if (seen.has(complement)) {
                    return [seen.get(complement), i];
                }
                seen.set(nums[i], i);
            }
            return [];
        }";

    const THROWING_CODE: &str = "
        function twoSum(nums, target) {
            throw new Error('not today');
        }";

    const LOOPING_CODE: &str = "
        function twoSum(nums, target) {
            while (true) {}
        }";

    #[tokio::test]
    async fn test_execute_node_not_found() {
        let dir = format!("/tmp/prisma_judge_{}", Uuid::new_v4());
        let backend = NodeBackend::new(Path::new(&dir), "/aboba");

        let result = backend
            .execute(CORRECT_CODE, "twoSum", &[], Duration::from_secs(5))
            .await;

        assert!(matches!(result, Err(ExecFault::Internal { .. })));
    }

    #[tokio::test]
    async fn test_execute_filesystem_error() {
        // /proc is a readonly dir
        let dir = format!("/proc/prisma_judge_{}", Uuid::new_v4());
        let backend = NodeBackend::new(Path::new(&dir), node_path());

        let result = backend
            .execute(CORRECT_CODE, "twoSum", &[], Duration::from_secs(5))
            .await;

        assert!(matches!(result, Err(ExecFault::Internal { .. })));
    }

    #[tokio::test]
    #[ignore = "requires a node interpreter"]
    async fn test_execute_correct_solution() {
        let dir = format!("/tmp/prisma_judge_{}", Uuid::new_v4());
        let backend = NodeBackend::new(Path::new(&dir), node_path());

        let args = [json!([2, 7, 11, 15]), json!(9)];
        let result = backend
            .execute(CORRECT_CODE, "twoSum", &args, Duration::from_secs(5))
            .await;

        assert_eq!(result.unwrap(), json!([0, 1]));
    }

    #[tokio::test]
    #[ignore = "requires a node interpreter"]
    async fn test_execute_throwing_solution() {
        let dir = format!("/tmp/prisma_judge_{}", Uuid::new_v4());
        let backend = NodeBackend::new(Path::new(&dir), node_path());

        let args = [json!([2, 7]), json!(9)];
        let result = backend
            .execute(THROWING_CODE, "twoSum", &args, Duration::from_secs(5))
            .await;

        assert!(matches!(
            result,
            Err(ExecFault::Fault { msg }) if msg.contains("not today")
        ));
    }

    #[tokio::test]
    #[ignore = "requires a node interpreter"]
    async fn test_execute_missing_function() {
        let dir = format!("/tmp/prisma_judge_{}", Uuid::new_v4());
        let backend = NodeBackend::new(Path::new(&dir), node_path());

        let result = backend
            .execute("const x = 1;", "twoSum", &[], Duration::from_secs(5))
            .await;

        assert!(matches!(
            result,
            Err(ExecFault::Fault { msg }) if msg.contains("twoSum is not defined")
        ));
    }

    #[tokio::test]
    #[ignore = "requires a node interpreter"]
    async fn test_execute_infinite_loop_times_out() {
        let dir = format!("/tmp/prisma_judge_{}", Uuid::new_v4());
        let backend = NodeBackend::new(Path::new(&dir), node_path());

        let args = [json!([2, 7]), json!(9)];
        let result = backend
            .execute(LOOPING_CODE, "twoSum", &args, Duration::from_millis(500))
            .await;

        assert!(matches!(result, Err(ExecFault::TimedOut { budget_ms: 500 })));
    }
}
