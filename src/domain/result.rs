//! Result type alias for drawio-batch

use super::errors::BatchError;

/// Result type alias for drawio-batch operations
///
/// # Examples
///
/// ```
/// use drawio_batch::domain::result::Result;
/// use drawio_batch::domain::errors::BatchError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(BatchError::ConfigValidation("Invalid scale value given".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<usize> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(BatchError::Interrupted);
        assert!(result.is_err());
    }
}
