/// What the solver does when a constraint can not be satisfied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SolveMode {
    /// Stops at the first constraint that fails, in the order they were generated.
    #[default]
    FailFast,
    /// Skips failing constraints, recording one error for each of them.
    CollectAll,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    pub mode: SolveMode,
}

impl Config {
    pub const fn collect_all(self) -> Self {
        Self {
            mode: SolveMode::CollectAll,
        }
    }
}
