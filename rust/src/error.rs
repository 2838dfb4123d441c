//! Error handling and result types for CountedBTree operations.
//!
//! Absent keys are never errors: `search` and `remove` report them through
//! `Option`/`bool`. The variants below cover bad configuration and the
//! integrity failures that the validation layer can detect.

/// Error type for counted B-tree operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CountedTreeError {
    /// Invalid minimum degree specified at construction.
    InvalidDegree(String),
    /// Internal data structure integrity violation.
    DataIntegrityError(String),
    /// Arena bookkeeping disagrees with the reachable tree.
    ArenaError(String),
    /// Tree corruption detected.
    CorruptedTree(String),
}

impl CountedTreeError {
    /// Create an InvalidDegree error with context
    pub fn invalid_degree(degree: usize, min_required: usize) -> Self {
        Self::InvalidDegree(format!(
            "Degree {} is invalid (minimum required: {})",
            degree, min_required
        ))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create an ArenaError with context
    pub fn arena_error(operation: &str, details: &str) -> Self {
        Self::ArenaError(format!("{} failed: {}", operation, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Check if this error is a configuration error
    pub fn is_degree_error(&self) -> bool {
        matches!(self, Self::InvalidDegree(_))
    }
}

impl std::fmt::Display for CountedTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountedTreeError::InvalidDegree(msg) => write!(f, "Invalid degree: {}", msg),
            CountedTreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            CountedTreeError::ArenaError(msg) => write!(f, "Arena error: {}", msg),
            CountedTreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for CountedTreeError {}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, CountedTreeError>;

/// Public result type for tree operations that may fail
pub type BTreeResult<T> = Result<T, CountedTreeError>;

/// Result type for checked tree modification operations
pub type ModifyResult<T> = Result<T, CountedTreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, CountedTreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_degree_message() {
        let err = CountedTreeError::invalid_degree(1, 2);
        assert!(err.is_degree_error());
        assert_eq!(
            err.to_string(),
            "Invalid degree: Degree 1 is invalid (minimum required: 2)"
        );
    }

    #[test]
    fn test_context_constructors() {
        let err = CountedTreeError::data_integrity("remove", "underfull child");
        assert_eq!(err, CountedTreeError::DataIntegrityError("remove: underfull child".into()));
        assert!(!err.is_degree_error());

        let err = CountedTreeError::arena_error("Node consistency check", "3 vs 4");
        assert_eq!(err.to_string(), "Arena error: Node consistency check failed: 3 vs 4");
    }
}
