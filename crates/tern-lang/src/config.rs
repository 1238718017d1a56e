/// What to do with a construct the evaluator has no rule for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnimplementedPolicy {
    /// Log a warning and yield `undefined`, letting the program continue.
    #[default]
    Permissive,
    /// Fail with `RuntimeError::UnimplementedNodeKind`.
    Strict,
}

#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    pub unimplemented: UnimplementedPolicy,
    /// Maximum number of nested calls before `CallDepthExceeded`.
    pub max_call_depth: usize,
}

impl InterpreterConfig {
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

    pub fn strict() -> Self {
        Self { unimplemented: UnimplementedPolicy::Strict, ..Self::default() }
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            unimplemented: UnimplementedPolicy::default(),
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
