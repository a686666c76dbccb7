use itertools::Itertools;
use serde_json::Value;

use crate::constants::CONSOLE_SEPARATOR;
use crate::core::domain::{GradeReport, NamedArg, Outcome, OutcomeStatus, TestCase};

/// Presentation category of a console line. The console view itself is an
/// external collaborator; it only needs the text and the category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Plain,
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleLine {
    pub text: String,
    pub category: Category,
}

impl ConsoleLine {
    fn new(text: impl Into<String>, category: Category) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

fn format_sequence(values: &[Value]) -> String {
    Value::Array(values.to_vec()).to_string()
}

fn format_input(input: &[NamedArg]) -> String {
    input
        .iter()
        .map(|arg| format!("{} = {}", arg.name, arg.value))
        .join(", ")
}

/// Renders the transcript of a single-case run, including the literal input
/// and expected answer for display.
pub fn render_run(case: &TestCase, outcome: &Outcome) -> Vec<ConsoleLine> {
    let mut lines = vec![ConsoleLine::new(
        format!("Running test case {}...", outcome.test_index + 1),
        Category::Info,
    )];

    match outcome.status {
        OutcomeStatus::Unsupported => {
            lines.push(ConsoleLine::new(outcome.message.clone(), Category::Info));
        }
        OutcomeStatus::RuntimeError | OutcomeStatus::TimedOut => {
            lines.push(ConsoleLine::new(
                format!("Error: {}", outcome.message),
                Category::Error,
            ));
        }
        OutcomeStatus::Passed | OutcomeStatus::Failed => {
            lines.push(ConsoleLine::new(
                format!("Input: {}", format_input(&case.input)),
                Category::Plain,
            ));
            let output = match &outcome.actual {
                Some(actual) => format_sequence(actual),
                None => outcome.message.clone(),
            };
            lines.push(ConsoleLine::new(format!("Output: {}", output), Category::Plain));
            lines.push(ConsoleLine::new(
                format!("Expected: {}", format_sequence(&case.expected)),
                Category::Plain,
            ));
            lines.push(match outcome.status {
                OutcomeStatus::Passed => ConsoleLine::new("✓ Test passed!", Category::Success),
                _ => ConsoleLine::new("✗ Test failed!", Category::Error),
            });
        }
    }

    lines
}

/// Renders the transcript of a full-suite submission.
pub fn render_submit(report: &GradeReport) -> Vec<ConsoleLine> {
    let mut lines = vec![ConsoleLine::new("Running all test cases...", Category::Info)];

    // When no backend exists for the language, the whole suite collapses to a
    // single informational line, as the original portal did.
    if !report.outcomes.is_empty()
        && report
            .outcomes
            .iter()
            .all(|o| o.status == OutcomeStatus::Unsupported)
    {
        lines.push(ConsoleLine::new(
            report.outcomes[0].message.clone(),
            Category::Info,
        ));
        return lines;
    }

    for outcome in &report.outcomes {
        let (verdict, category) = match outcome.status {
            OutcomeStatus::Passed => ("✓ Passed".to_string(), Category::Success),
            OutcomeStatus::Failed => ("✗ Failed".to_string(), Category::Error),
            _ => (format!("✗ {}", outcome.message), Category::Error),
        };
        lines.push(ConsoleLine::new(
            format!("Test {}: {}", outcome.test_index + 1, verdict),
            category,
        ));
    }

    lines.push(ConsoleLine::new(CONSOLE_SEPARATOR, Category::Info));
    lines.push(ConsoleLine::new(
        format!(
            "{}/{} test cases passed",
            report.passed_count, report.total_count
        ),
        if report.accepted() {
            Category::Success
        } else {
            Category::Error
        },
    ));

    if report.accepted() {
        lines.push(ConsoleLine::new(
            "🎉 All tests passed! Submission accepted.",
            Category::Success,
        ));
    }

    lines
}
