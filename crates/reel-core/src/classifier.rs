//! Classification of store failures and the recovery policy applied at the
//! shell boundary.
//!
//! | Class            | Operator log        | User sees         | Session      |
//! |------------------|---------------------|-------------------|--------------|
//! | `Fatal`          | error, full cause   | critical message  | terminates   |
//! | `QueryExecution` | error, operation    | "try another"     | continues    |
//! | `Unexpected`     | error, full detail  | "try another"     | continues    |

use std::error::Error;

use crate::{error::StoreError, logging::OperatorLog};

/// Shown when startup cannot reach a store.
pub const FATAL_MESSAGE: &str =
    "Sorry! Failed to connect to one or more databases. Please, try next time";

/// Shown for every recoverable failure.
pub const RETRY_MESSAGE: &str =
    "An error occurred while processing your request. Please try another search.";

/// Taxonomy of failures reaching the shell boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A required store could not be established
    Fatal,
    /// A single read or write failed after startup
    QueryExecution,
    /// Anything else
    Unexpected,
}

impl ErrorClass {
    /// Classifies a store error.
    pub fn of(err: &StoreError) -> Self {
        match err {
            StoreError::FatalConnection { .. } => ErrorClass::Fatal,
            StoreError::QueryExecution { .. } | StoreError::SessionClosed { .. } => {
                ErrorClass::QueryExecution
            }
            StoreError::InvalidConfig { .. }
            | StoreError::Database { .. }
            | StoreError::UnknownStore { .. }
            | StoreError::OperatorLog { .. } => ErrorClass::Unexpected,
        }
    }

    /// What the session does after an error of this class.
    pub fn recovery(self) -> Recovery {
        match self {
            ErrorClass::Fatal => Recovery::Terminate,
            ErrorClass::QueryExecution | ErrorClass::Unexpected => Recovery::Continue,
        }
    }

    /// Message shown to the user.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorClass::Fatal => FATAL_MESSAGE,
            ErrorClass::QueryExecution | ErrorClass::Unexpected => RETRY_MESSAGE,
        }
    }
}

/// Recovery action decided for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// End the process with a non-zero exit status
    Terminate,
    /// Report, yield no result, keep the session going
    Continue,
}

/// Result of passing a call through [`ErrorClassifier::guard`].
#[derive(Debug)]
pub enum Outcome<T> {
    /// The call succeeded
    Value(T),
    /// The call failed and was recovered; show the message and carry on
    Recovered(&'static str),
    /// The call failed fatally; the session must end
    Terminate(StoreError),
}

/// Applies the recovery policy and records every failure in the operator
/// log.
#[derive(Debug)]
pub struct ErrorClassifier {
    log: OperatorLog,
}

impl ErrorClassifier {
    pub fn new(log: OperatorLog) -> Self {
        Self { log }
    }

    /// Logs `err`, raised by `operation`, and returns its class.
    pub fn report(&self, operation: &str, err: &StoreError) -> ErrorClass {
        let class = ErrorClass::of(err);
        let detail = err.chain();

        match class {
            ErrorClass::Fatal => self
                .log
                .error(format_args!("Database connection error in {operation}: {detail}")),
            ErrorClass::QueryExecution => self
                .log
                .error(format_args!("Query execution error in {operation}: {detail}")),
            ErrorClass::Unexpected => self
                .log
                .error(format_args!("Unexpected error in {operation}: {detail} ({err:?})")),
        }
        class
    }

    /// Logs a failure that did not come from the store layer, such as a
    /// terminal read error. These are always `Unexpected`.
    pub fn report_unexpected(&self, operation: &str, err: &dyn Error) -> ErrorClass {
        let mut detail = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            detail.push_str(": ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }
        self.log
            .error(format_args!("Unexpected error in {operation}: {detail}"));
        ErrorClass::Unexpected
    }

    /// Runs the policy over the result of `operation`.
    pub fn guard<T>(&self, operation: &str, result: crate::Result<T>) -> Outcome<T> {
        match result {
            Ok(value) => Outcome::Value(value),
            Err(err) => {
                let class = self.report(operation, &err);
                match class.recovery() {
                    Recovery::Continue => Outcome::Recovered(class.user_message()),
                    Recovery::Terminate => Outcome::Terminate(err),
                }
            }
        }
    }

    /// Flushes the operator log.
    pub fn shutdown(&self) {
        self.log.flush();
    }
}
