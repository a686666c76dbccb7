use serde_json::Value;

/// A named argument of a solution function. Arguments are stored in declaration
/// order and passed positionally on invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedArg {
    pub name: String,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
    pub input: Vec<NamedArg>,
    pub expected: Vec<Value>,
}

/// Equality policy for comparing a solution's output against the expected
/// answer. `Unordered` accepts any permutation of the expected sequence, which
/// is the right leniency for problems where the answer's index order carries no
/// meaning (Two Sum). Order-sensitive problems use `Exact`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Unordered,
    Exact,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestSuite {
    pub function_name: String,
    pub comparison: Comparison,
    pub cases: Vec<TestCase>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    Javascript,
    Python,
    Java,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Javascript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub source_text: String,
    pub language: Language,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeStatus {
    Passed,
    Failed,
    RuntimeError,
    /// No execution backend is registered for the submission's language.
    Unsupported,
    /// Evaluation exceeded the wall-clock budget.
    TimedOut,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub test_index: usize,
    pub actual: Option<Vec<Value>>,
    pub status: OutcomeStatus,
    pub message: String,
}

/// Aggregate result of grading a submission against a full suite. Recomputed
/// on every run, never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct GradeReport {
    pub outcomes: Vec<Outcome>,
    pub passed_count: usize,
    pub total_count: usize,
}

impl GradeReport {
    pub fn accepted(&self) -> bool {
        self.passed_count == self.total_count
    }
}
