//! Deprecation marking for SDK operations
//!
//! Wrapping an operation with [`mark`] produces a [`Deprecated`] value with
//! the same call shape. Every call emits one [`DeprecationNotice`] to a
//! [`DiagnosticsSink`] and then delegates to the original operation, whose
//! result is returned untouched.
//!
//! ```
//! use vault_sdk::deprecation::{mark, Documented, OperationDoc};
//!
//! let replacement = OperationDoc::new("read_secret_version", "Read a versioned secret.");
//! let read_secret = mark("read_secret", |path: &str| path.len(), "2.0.0")
//!     .replacement_reference("client.kv.read_secret_version(path)")
//!     .replacement_operation(&replacement)
//!     .build();
//!
//! assert_eq!(read_secret.call("secret/app"), 10);
//! assert!(read_secret.doc().contains("Read a versioned secret."));
//! ```

mod sink;

pub use sink::{
    default_sink, CollectingSink, DiagnosticsError, DiagnosticsSink, LogSink, SilentSink,
    TracingSink, DEPRECATION_TARGET,
};
#[cfg(test)]
pub use sink::MockDiagnosticsSink;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Heading placed between the notice and the replacement's documentation
const REPLACEMENT_DOC_HEADING: &str = "Documentation from this operation's replacement copied below:";

/// An operation that can describe itself
pub trait Documented {
    /// Identifier of the operation
    fn name(&self) -> &str;

    /// Documentation text of the operation
    fn doc(&self) -> &str;
}

/// Name and documentation of an operation, detached from its implementation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDoc {
    name: String,
    doc: String,
}

impl OperationDoc {
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
        }
    }
}

impl Documented for OperationDoc {
    fn name(&self) -> &str {
        &self.name
    }

    fn doc(&self) -> &str {
        &self.doc
    }
}

/// One call to a deprecated operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeprecationNotice {
    /// Identifier of the deprecated operation
    pub subject_name: String,

    /// Version the operation will be removed in
    pub removal_version: String,

    /// Example call to use instead
    pub replacement_reference: Option<String>,

    /// Documentation of the replacement operation
    pub replacement_doc: Option<String>,

    /// When the call happened
    pub emitted_at: DateTime<Utc>,
}

impl DeprecationNotice {
    /// Human-readable notice text
    pub fn message(&self) -> String {
        notice_text(
            &self.subject_name,
            &self.removal_version,
            self.replacement_reference.as_deref(),
        )
    }
}

impl fmt::Display for DeprecationNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

fn notice_text(subject: &str, removal_version: &str, replacement: Option<&str>) -> String {
    let mut text = format!(
        "Call to deprecated operation '{}'. This operation is deprecated and will be removed in version '{}'.",
        subject, removal_version
    );
    if let Some(replacement) = replacement {
        text.push_str(&format!(" Please use `{}` instead.", replacement));
    }
    text
}

/// Start marking `operation` as deprecated
pub fn mark<F>(
    name: impl Into<String>,
    operation: F,
    removal_version: impl Into<String>,
) -> DeprecationBuilder<F> {
    DeprecationBuilder {
        name: name.into(),
        operation,
        removal_version: removal_version.into(),
        replacement_reference: None,
        replacement_doc: None,
        sink: None,
    }
}

/// Builder returned by [`mark`]
pub struct DeprecationBuilder<F> {
    name: String,
    operation: F,
    removal_version: String,
    replacement_reference: Option<String>,
    replacement_doc: Option<String>,
    sink: Option<Arc<dyn DiagnosticsSink>>,
}

impl<F> DeprecationBuilder<F> {
    /// Call path to suggest in the notice
    pub fn replacement_reference(mut self, reference: impl Into<String>) -> Self {
        self.replacement_reference = Some(reference.into());
        self
    }

    /// Operation replacing this one; its documentation is appended to ours
    pub fn replacement_operation(mut self, replacement: &impl Documented) -> Self {
        self.replacement_doc = Some(replacement.doc().to_string());
        self
    }

    /// Sink receiving notices. Defaults to [`default_sink`].
    pub fn sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Build the wrapped operation
    pub fn build(self) -> Deprecated<F> {
        let notice = notice_text(
            &self.name,
            &self.removal_version,
            self.replacement_reference.as_deref(),
        );

        let doc = match &self.replacement_doc {
            Some(replacement_doc) => format!(
                "{}\n{}\n{}\n",
                notice, REPLACEMENT_DOC_HEADING, replacement_doc
            ),
            None => notice,
        };

        Deprecated {
            name: self.name,
            removal_version: self.removal_version,
            replacement_reference: self.replacement_reference,
            replacement_doc: self.replacement_doc,
            doc,
            sink: self.sink.unwrap_or_else(default_sink),
            operation: self.operation,
        }
    }
}

/// An operation that reports a [`DeprecationNotice`] on every call
pub struct Deprecated<F> {
    name: String,
    removal_version: String,
    replacement_reference: Option<String>,
    replacement_doc: Option<String>,
    doc: String,
    sink: Arc<dyn DiagnosticsSink>,
    operation: F,
}

impl<F> Deprecated<F> {
    /// Invoke the operation.
    ///
    /// Multiple arguments are passed as a tuple. For async operations the
    /// notice is emitted when the future is created.
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
    {
        self.notify();
        (self.operation)(args)
    }

    /// Version the operation will be removed in
    pub fn removal_version(&self) -> &str {
        &self.removal_version
    }

    /// Suggested replacement call path, if any
    pub fn replacement_reference(&self) -> Option<&str> {
        self.replacement_reference.as_deref()
    }

    /// The unwrapped operation
    pub fn inner(&self) -> &F {
        &self.operation
    }

    fn notify(&self) {
        let notice = DeprecationNotice {
            subject_name: self.name.clone(),
            removal_version: self.removal_version.clone(),
            replacement_reference: self.replacement_reference.clone(),
            replacement_doc: self.replacement_doc.clone(),
            emitted_at: Utc::now(),
        };

        let sink = &self.sink;
        match panic::catch_unwind(AssertUnwindSafe(|| sink.emit(&notice))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                log::debug!("Dropped deprecation notice for '{}': {}", self.name, e);
            }
            Err(_) => {
                log::debug!("Diagnostics sink panicked while reporting '{}'", self.name);
            }
        }
    }
}

impl<F> Documented for Deprecated<F> {
    fn name(&self) -> &str {
        &self.name
    }

    fn doc(&self) -> &str {
        &self.doc
    }
}

impl<F> fmt::Debug for Deprecated<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deprecated")
            .field("name", &self.name)
            .field("removal_version", &self.removal_version)
            .field("replacement_reference", &self.replacement_reference)
            .finish_non_exhaustive()
    }
}
