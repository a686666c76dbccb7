use std::time::Duration;

use serde_json::Value;

use crate::constants::{NOT_IMPLEMENTED_MSG, UNSUPPORTED_LANGUAGE_MSG};
use crate::core::compare::sequences_match;
use crate::core::domain::{
    GradeReport, Outcome, OutcomeStatus, Submission, TestCase, TestSuite,
};
use crate::core::registry::BackendRegistry;
use crate::core::traits::backend::ExecFault;

/// Grades submissions against fixed test suites. Every fault is caught at the
/// single test-case boundary and converted into an `Outcome`; the engine
/// itself never fails.
#[derive(Debug)]
pub struct GradingEngine {
    registry: BackendRegistry,
    budget: Duration,
}

impl GradingEngine {
    pub fn new(registry: BackendRegistry, budget: Duration) -> Self {
        Self { registry, budget }
    }

    /// Grades one test case of the suite.
    pub async fn run_single(
        &self,
        submission: &Submission,
        suite: &TestSuite,
        case_index: usize,
    ) -> Outcome {
        self.grade_case(submission, suite, case_index, &suite.cases[case_index])
            .await
    }

    /// Grades every test case of the suite, in order. Never short-circuits:
    /// a broken submission still yields a complete report.
    pub async fn run_all(&self, submission: &Submission, suite: &TestSuite) -> GradeReport {
        let mut outcomes = Vec::with_capacity(suite.cases.len());
        for (case_index, case) in suite.cases.iter().enumerate() {
            outcomes.push(self.grade_case(submission, suite, case_index, case).await);
        }

        let passed_count = outcomes
            .iter()
            .filter(|o| o.status == OutcomeStatus::Passed)
            .count();
        let report = GradeReport {
            passed_count,
            total_count: suite.cases.len(),
            outcomes,
        };
        tracing::info!(
            "Graded submission: {}/{} passed",
            report.passed_count,
            report.total_count
        );
        report
    }

    async fn grade_case(
        &self,
        submission: &Submission,
        suite: &TestSuite,
        test_index: usize,
        case: &TestCase,
    ) -> Outcome {
        let Some(backend) = self.registry.get(submission.language) else {
            return outcome(test_index, OutcomeStatus::Unsupported, UNSUPPORTED_LANGUAGE_MSG);
        };

        if submission.source_text.trim().is_empty() {
            return outcome(test_index, OutcomeStatus::RuntimeError, NOT_IMPLEMENTED_MSG);
        }

        // Each case re-evaluates the source independently: a fault or side
        // effect in one invocation must not leak into sibling cases.
        let args: Vec<Value> = case.input.iter().map(|arg| arg.value.clone()).collect();
        tracing::debug!(
            "Executing {} against test case {}",
            suite.function_name,
            test_index
        );
        let result = backend
            .execute(
                &submission.source_text,
                &suite.function_name,
                &args,
                self.budget,
            )
            .await;
        tracing::debug!("Execution result: {:?}", result);

        match result {
            Ok(Value::Array(actual)) => {
                if sequences_match(&actual, &case.expected, suite.comparison) {
                    Outcome {
                        test_index,
                        actual: Some(actual),
                        status: OutcomeStatus::Passed,
                        message: String::new(),
                    }
                } else {
                    Outcome {
                        test_index,
                        actual: Some(actual),
                        status: OutcomeStatus::Failed,
                        message: "output does not match the expected answer".to_string(),
                    }
                }
            }
            // A non-sequence return is a wrong answer, not a fault.
            Ok(other) => outcome(
                test_index,
                OutcomeStatus::Failed,
                &format!("expected a sequence, got {}", other),
            ),
            Err(fault @ ExecFault::TimedOut { .. }) => {
                outcome(test_index, OutcomeStatus::TimedOut, &fault.to_string())
            }
            Err(fault @ ExecFault::Fault { .. }) => {
                outcome(test_index, OutcomeStatus::RuntimeError, &fault.to_string())
            }
            Err(ExecFault::Internal { msg }) => {
                tracing::error!("Internal error while executing submission: {}", msg);
                outcome(test_index, OutcomeStatus::RuntimeError, &msg)
            }
        }
    }
}

fn outcome(test_index: usize, status: OutcomeStatus, message: &str) -> Outcome {
    Outcome {
        test_index,
        actual: None,
        status,
        message: message.to_string(),
    }
}
