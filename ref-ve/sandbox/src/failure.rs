//! Assertions on calls which are expected to fail
//!
//! Failures raised by the execution layer carry their outcome serialized as JSON in the
//! error message. The leaf message is located inside it by an [`ErrorPath`]; the default
//! one follows the RPC encoding of a function call failure:
//! `result.status.Failure.ActionError.kind.FunctionCallError.ExecutionError`.
//! Messages are only ever parsed as JSON documents.
use std::fmt;
use std::future::Future;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ERROR_PATH: [&str; 7] = [
    "result",
    "status",
    "Failure",
    "ActionError",
    "kind",
    "FunctionCallError",
    "ExecutionError",
];

/// Sequence of keys (or array indices) leading to a leaf error message
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorPath(Vec<String>);

impl Default for ErrorPath {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_PATH)
    }
}

impl fmt::Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedErrorShape {
    #[error("error message is not a JSON document ({reason}): {message}")]
    NotJson { message: String, reason: String },
    #[error("error message has no `{segment}` at `{path}`")]
    MissingSegment { segment: String, path: ErrorPath },
    #[error("error message leaf at `{path}` is not a string")]
    NotAString { path: ErrorPath },
}

impl ErrorPath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Walks `document` down the path, returning the string leaf
    pub fn extract<'a>(
        &self,
        document: &'a serde_json::Value,
    ) -> Result<&'a str, MalformedErrorShape> {
        let mut node = document;
        for segment in &self.0 {
            let next = match node {
                serde_json::Value::Object(map) => map.get(segment),
                serde_json::Value::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                _ => None,
            };
            node = next.ok_or_else(|| MalformedErrorShape::MissingSegment {
                segment: segment.clone(),
                path: self.clone(),
            })?;
        }
        node.as_str()
            .ok_or_else(|| MalformedErrorShape::NotAString { path: self.clone() })
    }

    /// Parses an error message as JSON and extracts the leaf from it
    pub fn extract_from_message(&self, message: &str) -> Result<String, MalformedErrorShape> {
        let document: serde_json::Value =
            serde_json::from_str(message).map_err(|e| MalformedErrorShape::NotJson {
                message: message.to_string(),
                reason: e.to_string(),
            })?;
        self.extract(&document).map(ToString::to_string)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FailureAssertion {
    #[error("Action didn't fail")]
    DidNotFail,
    #[error("Bad error message. expect: \"{expected}\", actual: \"{actual}\"")]
    MessageMismatch { expected: String, actual: String },
    #[error(transparent)]
    MalformedErrorShape(#[from] MalformedErrorShape),
}

/// Classifies an already awaited result which is expected to be an error
///
/// With `expected` set, the error's leaf message at `path` must contain it.
pub fn check_failure<T, E: fmt::Display>(
    result: &Result<T, E>,
    expected: Option<&str>,
    path: &ErrorPath,
) -> Result<(), FailureAssertion> {
    let Err(err) = result else {
        return Err(FailureAssertion::DidNotFail);
    };
    let Some(expected) = expected else {
        return Ok(());
    };

    let actual = path.extract_from_message(&err.to_string())?;
    if actual.contains(expected) {
        Ok(())
    } else {
        Err(FailureAssertion::MessageMismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}

/// Failure Asserter bound to the [`ErrorPath`] failures are read with
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailureAsserter {
    path: ErrorPath,
}

impl FailureAsserter {
    pub fn new(path: ErrorPath) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &ErrorPath {
        &self.path
    }

    /// Awaits `action` and checks it failed
    pub async fn expect_failure<F, T, E>(
        &self,
        action: F,
        expected: Option<&str>,
    ) -> Result<(), FailureAssertion>
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let result = action.await;
        let verdict = check_failure(&result, expected, &self.path);
        if let Err(err) = &verdict {
            tracing::debug!(error = %err, path = %self.path, "failure assertion did not hold");
        }
        verdict
    }

    /// Awaits `action` and panics unless it failed with a message containing `expected`
    pub async fn assert_failure<F, T, E>(&self, action: F, expected: Option<&str>)
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        if let Err(err) = self.expect_failure(action, expected).await {
            panic!("{err}");
        }
    }
}

/// [`FailureAsserter::expect_failure`] with the default [`ErrorPath`]
pub async fn expect_failure<F, T, E>(
    action: F,
    expected: Option<&str>,
) -> Result<(), FailureAssertion>
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    FailureAsserter::default()
        .expect_failure(action, expected)
        .await
}

/// [`FailureAsserter::assert_failure`] with the default [`ErrorPath`]
pub async fn assert_failure<F, T, E>(action: F, expected: Option<&str>)
where
    F: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    FailureAsserter::default()
        .assert_failure(action, expected)
        .await
}
