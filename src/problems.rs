use serde_json::{Value, json};

use crate::core::domain::{Comparison, Language, NamedArg, TestCase, TestSuite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A problem as served to the portal: metadata, the grading suite, and the
/// per-language starter templates shown in the editor.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    pub id: &'static str,
    pub title: &'static str,
    pub difficulty: Difficulty,
    pub suite: TestSuite,
    templates: Vec<(Language, &'static str)>,
}

impl Problem {
    pub fn template(&self, language: Language) -> Option<&'static str> {
        self.templates
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, template)| *template)
    }
}

const JS_TEMPLATE: &str = "/**
 * @param {number[]} nums
 * @param {number} target
 * @return {number[]}
 */
function twoSum(nums, target) {
    // Write your code here

}";

const PYTHON_TEMPLATE: &str = "def twoSum(nums, target):
    \"\"\"
    :type nums: List[int]
    :type target: int
    :rtype: List[int]
    \"\"\"
    # Write your code here
    pass";

const JAVA_TEMPLATE: &str = "class Solution {
    public int[] twoSum(int[] nums, int target) {
        // Write your code here

    }
}";

fn arg(name: &str, value: Value) -> NamedArg {
    NamedArg {
        name: name.to_string(),
        value,
    }
}

pub fn all() -> Vec<Problem> {
    vec![two_sum()]
}

pub fn find(id: &str) -> Option<Problem> {
    all().into_iter().find(|problem| problem.id == id)
}

/// Index order in a Two Sum answer carries no meaning, so the suite uses the
/// unordered comparison policy.
pub fn two_sum() -> Problem {
    Problem {
        id: "two-sum",
        title: "Two Sum",
        difficulty: Difficulty::Easy,
        suite: TestSuite {
            function_name: "twoSum".to_string(),
            comparison: Comparison::Unordered,
            cases: vec![
                TestCase {
                    input: vec![arg("nums", json!([2, 7, 11, 15])), arg("target", json!(9))],
                    expected: vec![json!(0), json!(1)],
                },
                TestCase {
                    input: vec![arg("nums", json!([3, 2, 4])), arg("target", json!(6))],
                    expected: vec![json!(1), json!(2)],
                },
                TestCase {
                    input: vec![arg("nums", json!([3, 3])), arg("target", json!(6))],
                    expected: vec![json!(0), json!(1)],
                },
            ],
        },
        templates: vec![
            (Language::Javascript, JS_TEMPLATE),
            (Language::Python, PYTHON_TEMPLATE),
            (Language::Java, JAVA_TEMPLATE),
        ],
    }
}
