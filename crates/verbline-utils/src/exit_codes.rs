//! Exit code constants for the verbline CLI.
//!
//! # Exit Code Table
//!
//! | Code | Constant | Description |
//! |------|----------|-------------|
//! | 0 | `SUCCESS` | Operation completed successfully |
//! | 1 | `INTERNAL` | General/internal failure |
//! | 2 | `CLI_ARGS` | Invalid CLI arguments, configuration or catalog |
//! | 3 | `VALIDATION_FAILED` | Validation suite reported issues |
//! | 4 | `UNKNOWN_VERB` | Requested verb is not in the catalog |

/// Exit codes matching the documented exit code table.
///
/// Use the named constants, or [`as_i32()`](Self::as_i32) to get the numeric
/// value for `std::process::exit()`.
///
/// # Example
///
/// ```rust
/// use verbline_utils::ExitCode;
///
/// assert_eq!(ExitCode::SUCCESS.as_i32(), 0);
/// assert_eq!(ExitCode::VALIDATION_FAILED, ExitCode::from_i32(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Success - operation completed successfully
    pub const SUCCESS: ExitCode = ExitCode(0);

    /// Internal error - general failure
    pub const INTERNAL: ExitCode = ExitCode(1);

    /// CLI arguments error - invalid arguments, configuration or catalog
    pub const CLI_ARGS: ExitCode = ExitCode(2);

    /// Validation failed - the validation suite reported at least one issue
    pub const VALIDATION_FAILED: ExitCode = ExitCode(3);

    /// Unknown verb - the requested verb name is not registered
    pub const UNKNOWN_VERB: ExitCode = ExitCode(4);

    /// Get the numeric exit code value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Create an ExitCode from a raw i32 value.
    ///
    /// Prefer using the named constants when possible.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        ExitCode(code)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}
