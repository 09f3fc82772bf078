use super::trade::Outcome;

/// One labelled line of a rendered result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl std::fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// Human-readable projection of a calculation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSummary {
    /// Nothing to show yet; the front-end displays [`EMPTY_RESULT_PROMPT`].
    Empty,
    Lines {
        lines: Vec<SummaryLine>,
        /// Only set for trade results.
        outcome: Option<Outcome>,
    },
}

/// Prompt shown while the form does not produce a result.
pub const EMPTY_RESULT_PROMPT: &str = "Fill in the form and the result appears automatically.";

impl std::fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultSummary::Empty => write!(f, "{EMPTY_RESULT_PROMPT}"),
            ResultSummary::Lines { lines, .. } => {
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{line}")?;
                }
                Ok(())
            }
        }
    }
}
