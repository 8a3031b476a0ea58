//! Assertion types and builders for verifying step results.

use nestset_core::{Node, NodeKey};

use crate::error::{ExampleError, ExampleResult};
use crate::runner::{StepContext, StepOutcome};

/// A custom check run against the table after a step.
pub type CustomCheck = Box<dyn Fn(&StepContext<'_>) -> bool + Send + Sync>;

/// A complete assertion for a step result.
#[derive(Default)]
pub struct Assertion {
    // Outcome assertions
    pub created: Option<usize>,
    pub removed: Option<u64>,

    // Table assertions
    pub rows: Option<usize>,
    pub bounds: Vec<(String, i64, i64)>,
    pub parents: Vec<(String, Option<String>)>,
    pub children: Vec<(String, Vec<String>)>,
    pub trees: Vec<(String, i64)>,
    pub gone: Vec<String>,

    // Error assertions
    pub error: Option<String>,
    pub error_pattern: Option<String>,

    // Custom assertion function
    pub custom: Option<CustomCheck>,
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assertion")
            .field("created", &self.created)
            .field("removed", &self.removed)
            .field("rows", &self.rows)
            .field("bounds", &self.bounds)
            .field("parents", &self.parents)
            .field("children", &self.children)
            .field("trees", &self.trees)
            .field("gone", &self.gone)
            .field("error", &self.error)
            .field("error_pattern", &self.error_pattern)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the step is expected to fail.
    pub fn expects_error(&self) -> bool {
        self.error.is_some() || self.error_pattern.is_some()
    }

    /// Verify the assertion against a step result and the table after it.
    pub fn verify(
        &self,
        step: &str,
        result: &Result<StepOutcome, String>,
        ctx: &StepContext<'_>,
    ) -> ExampleResult<()> {
        if let Some(ref expected_error) = self.error {
            match result {
                Err(msg) if msg.contains(expected_error) => {}
                Err(msg) => {
                    return Err(ExampleError::assertion_failed(
                        step,
                        format!(
                            "expected error containing '{}', got: {}",
                            expected_error, msg
                        ),
                    ))
                }
                Ok(_) => {
                    return Err(ExampleError::assertion_failed(
                        step,
                        format!(
                            "expected error containing '{}', but step succeeded",
                            expected_error
                        ),
                    ))
                }
            }
        }

        if let Some(ref pattern) = self.error_pattern {
            let re = regex_lite::Regex::new(pattern).map_err(|e| {
                ExampleError::assertion_failed(step, format!("invalid regex pattern: {}", e))
            })?;
            match result {
                Err(msg) if re.is_match(msg) => {}
                Err(msg) => {
                    return Err(ExampleError::assertion_failed(
                        step,
                        format!("expected error matching '{}', got: {}", pattern, msg),
                    ))
                }
                Ok(_) => {
                    return Err(ExampleError::assertion_failed(
                        step,
                        format!("expected error matching '{}', but step succeeded", pattern),
                    ))
                }
            }
        }

        match result {
            Ok(outcome) => self.verify_outcome(step, outcome)?,
            Err(msg) if !self.expects_error() => {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("step failed: {}", msg),
                ))
            }
            Err(_) => {}
        }

        // Table checks also run after an expected failure: a failed step
        // must leave the table as it was.
        self.verify_table(step, ctx)?;

        if let Some(ref custom) = self.custom {
            if !custom(ctx) {
                return Err(ExampleError::assertion_failed(
                    step,
                    "custom assertion failed",
                ));
            }
        }

        Ok(())
    }

    fn verify_outcome(&self, step: &str, outcome: &StepOutcome) -> ExampleResult<()> {
        if let Some(expected) = self.created {
            if outcome.created.len() != expected {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("expected {} created, got {}", expected, outcome.created.len()),
                ));
            }
        }

        if let Some(expected) = self.removed {
            if outcome.removed != expected {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("expected {} removed, got {}", expected, outcome.removed),
                ));
            }
        }

        Ok(())
    }

    fn verify_table(&self, step: &str, ctx: &StepContext<'_>) -> ExampleResult<()> {
        if let Some(expected) = self.rows {
            let actual = ctx.all_nodes(step)?.len();
            if actual != expected {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("expected {} rows, got {}", expected, actual),
                ));
            }
        }

        for (name, left, right) in &self.bounds {
            let node = ctx.require_node(step, name)?;
            if (node.left, node.right) != (*left, *right) {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!(
                        "bounds mismatch for {}:\n  expected: [{}, {}]\n  actual:   [{}, {}]",
                        name, left, right, node.left, node.right
                    ),
                ));
            }
        }

        for (name, parent) in &self.parents {
            let node = ctx.require_node(step, name)?;
            let expected = match parent {
                Some(parent) => Some(ctx.key(step, parent)?),
                None => None,
            };
            if node.parent != expected {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!(
                        "parent mismatch for {}:\n  expected: {}\n  actual:   {}",
                        name,
                        format_parent(ctx, expected),
                        format_parent(ctx, node.parent)
                    ),
                ));
            }
        }

        for (name, expected) in &self.children {
            let key = ctx.key(step, name)?;
            let children = ctx
                .set
                .get_children(key)
                .map_err(|e| ExampleError::step_execution(step, e.to_string()))?;
            let actual: Vec<String> = children.iter().map(|n| ctx.name_of(n.key)).collect();
            if &actual != expected {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!(
                        "children mismatch for {}:\n  expected: {:?}\n  actual:   {:?}",
                        name, expected, actual
                    ),
                ));
            }
        }

        for (name, tree) in &self.trees {
            let node = ctx.require_node(step, name)?;
            if node.tree.map(|t| t.raw()) != Some(*tree) {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!("expected {} in tree {}, found {:?}", name, tree, node.tree),
                ));
            }
        }

        for name in &self.gone {
            if let Some(node) = ctx.node(step, name)? {
                return Err(ExampleError::assertion_failed(
                    step,
                    format!(
                        "expected {} to be deleted, found it at [{}, {}]",
                        name, node.left, node.right
                    ),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for assertions.
pub struct AssertionBuilder {
    assertion: Assertion,
}

impl AssertionBuilder {
    /// Create a new assertion builder.
    pub fn new() -> Self {
        Self {
            assertion: Assertion::new(),
        }
    }

    /// Build the assertion.
    pub fn build(self) -> Assertion {
        self.assertion
    }

    // ========== Outcome assertions ==========

    /// Assert the number of nodes the step created.
    pub fn created(mut self, n: usize) -> Self {
        self.assertion.created = Some(n);
        self
    }

    /// Assert the number of rows the step's deletions removed.
    pub fn removed(mut self, n: u64) -> Self {
        self.assertion.removed = Some(n);
        self
    }

    // ========== Table assertions ==========

    /// Assert the number of rows in the table.
    pub fn rows(mut self, n: usize) -> Self {
        self.assertion.rows = Some(n);
        self
    }

    /// Assert a node's interval.
    pub fn bounds(mut self, name: &str, left: i64, right: i64) -> Self {
        self.assertion.bounds.push((name.to_string(), left, right));
        self
    }

    /// Assert a node's parent.
    pub fn parent(mut self, name: &str, parent: &str) -> Self {
        self.assertion
            .parents
            .push((name.to_string(), Some(parent.to_string())));
        self
    }

    /// Assert a node has no parent.
    pub fn root(mut self, name: &str) -> Self {
        self.assertion.parents.push((name.to_string(), None));
        self
    }

    /// Assert a node's children, in order.
    pub fn children(mut self, name: &str, children: &[&str]) -> Self {
        self.assertion.children.push((
            name.to_string(),
            children.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    /// Assert a node's partition.
    pub fn tree(mut self, name: &str, tree: i64) -> Self {
        self.assertion.trees.push((name.to_string(), tree));
        self
    }

    /// Assert a node no longer exists.
    pub fn gone(mut self, name: &str) -> Self {
        self.assertion.gone.push(name.to_string());
        self
    }

    // ========== Error assertions ==========

    /// Assert that the step fails with an error containing the given string.
    pub fn error(mut self, contains: impl Into<String>) -> Self {
        self.assertion.error = Some(contains.into());
        self
    }

    /// Assert that the step fails with an error matching the given regex.
    pub fn error_matches(mut self, pattern: impl Into<String>) -> Self {
        self.assertion.error_pattern = Some(pattern.into());
        self
    }

    // ========== Advanced ==========

    /// Custom assertion function.
    pub fn assert_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&StepContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.assertion.custom = Some(Box::new(f));
        self
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn format_parent(ctx: &StepContext<'_>, parent: Option<NodeKey>) -> String {
    match parent {
        Some(key) => ctx.name_of(key),
        None => "none".to_string(),
    }
}

/// Short form of a node for failure messages.
pub fn format_node(node: &Node) -> String {
    format!("{} [{}, {}]", node.key, node.left, node.right)
}
