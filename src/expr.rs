use std::path::Path;

use crate::config::PrinterConfig;
use crate::entry::FileEntry;
use crate::error::HfindError;
use crate::fs::FileSystem;
use crate::primary::{EvalContext, Primary};
use crate::printer::Printer;
use crate::walker::Walker;

// ---------------------------------------------------------------------------
// Operand
// ---------------------------------------------------------------------------

/// AND/OR combinator joining a primary's result with the rest of the
/// expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    And,
    Or,
}

impl Operand {
    /// Combine a computed left result with a lazily evaluated right side.
    ///
    /// The right subtree, and any side effect nested in it, is only touched
    /// when the left result does not already decide the outcome. This
    /// short-circuit is the central observable contract of the tool: a
    /// `-print` behind a failing AND link must never fire.
    pub fn evaluate(
        self,
        left: bool,
        right: &Expression,
        entry: &FileEntry,
        ctx: &mut EvalContext<'_>,
    ) -> bool {
        match self {
            Self::And => left && right.evaluate(entry, ctx),
            Self::Or => left || right.evaluate(entry, ctx),
        }
    }
}

// ---------------------------------------------------------------------------
// Expression
// ---------------------------------------------------------------------------

/// One node of the boolean expression: a primary, optionally followed by an
/// operand and the rest of the expression.
///
/// The translator builds the tree right-associative, so for primaries
/// `p0 op1 p1 op2 p2` the grouping is `p0 op1 (p1 op2 p2)`. A node with no
/// `rest` is terminal and evaluates to its primary alone.
#[derive(Debug, Clone)]
pub struct Expression {
    left: Primary,
    rest: Option<(Operand, Box<Expression>)>,
}

impl Expression {
    /// Terminal node: just a primary.
    pub fn terminal(left: Primary) -> Self {
        Self { left, rest: None }
    }

    pub fn new(left: Primary, operand: Operand, right: Expression) -> Self {
        Self {
            left,
            rest: Some((operand, Box::new(right))),
        }
    }

    /// Evaluate this (sub)expression for one entry, firing side effects in
    /// evaluation order.
    pub fn evaluate(&self, entry: &FileEntry, ctx: &mut EvalContext<'_>) -> bool {
        let left = self.left.evaluate(entry, ctx);
        match &self.rest {
            None => left,
            Some((operand, right)) => operand.evaluate(left, right, entry, ctx),
        }
    }

    /// Whether a `-depth` primary occurs anywhere in the tree.
    ///
    /// Depth mode applies to the whole run even when the primary itself
    /// would never be reached during evaluation.
    pub fn uses_depth(&self) -> bool {
        matches!(self.left, Primary::Depth)
            || self
                .rest
                .as_ref()
                .is_some_and(|(_, right)| right.uses_depth())
    }

    /// Walk `root` and evaluate this expression for every visited entry,
    /// printing matches to standard output.
    ///
    /// Entry point for the CLI layer; backing-store errors propagate to the
    /// caller for exit-code mapping.
    pub fn run(
        &self,
        root: &Path,
        fs: &dyn FileSystem,
        config: &PrinterConfig,
    ) -> Result<(), HfindError> {
        let mut printer = Printer::stdout(config);
        Walker::new(fs, self, config, &mut printer).run(root)
    }
}
