//! Run result returned to triggers

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Result document of one stage run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// 200 on success, 400 on missing input, 500 on failure
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// Human-readable message
    #[serde(rename = "body")]
    pub message: String,
}

impl RunOutcome {
    /// Successful run
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            message: message.into(),
        }
    }

    /// Failed run, status taken from the error kind
    pub fn failure(err: &Error) -> Self {
        Self {
            status_code: err.status_code(),
            message: err.to_string(),
        }
    }

    /// Translate a stage result, logging failures once here
    pub fn from_result<T>(result: Result<T>, describe: impl FnOnce(&T) -> String) -> Self {
        match result {
            Ok(report) => Self::success(describe(&report)),
            Err(e) => {
                error!("Run failed: {e}");
                Self::failure(&e)
            }
        }
    }

    /// Check if the run succeeded
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_wire_format() {
        let outcome = RunOutcome::success("done");
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"statusCode": 200, "body": "done"})
        );
    }

    #[test]
    fn test_outcome_from_error() {
        let outcome: RunOutcome =
            RunOutcome::from_result(Err::<(), _>(Error::missing_input("Year")), |_| String::new());
        assert_eq!(outcome.status_code, 400);
        assert_eq!(outcome.message, "Year is required.");
        assert!(!outcome.is_success());

        let outcome = RunOutcome::from_result(Err::<(), _>(Error::missing_column("Genre")), |_| {
            String::new()
        });
        assert_eq!(outcome.status_code, 500);
        assert_eq!(outcome.message, "Missing required column: Genre");
    }

    #[test]
    fn test_outcome_from_success() {
        let outcome = RunOutcome::from_result(Ok(3), |n| format!("{n} charts"));
        assert!(outcome.is_success());
        assert_eq!(outcome.message, "3 charts");
    }
}
