//! Source-attached diagnostics.
//!
//! Resolver errors only carry spans. [`Report`] pairs such an error with the
//! text those spans index into, so miette's graphical handler can show the
//! offending code.

use std::{error::Error, fmt, sync::Arc};

use miette::{Diagnostic, Severity};

/// A report for rendering a diagnostic with source code context.
#[derive(Debug, Clone)]
pub struct Report {
    /// Name shown in the rendered header, usually a file name.
    pub name: String,
    pub source_code: Arc<miette::NamedSource<String>>,
    pub report: Arc<dyn OspreyError>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report.fmt(f)
    }
}

impl Error for Report {}

/// Delegates to the wrapped error, except for the source code which comes
/// from the report itself.
impl Diagnostic for Report {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.report.code()
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        self.report.diagnostic_source()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.report.help()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        self.report.labels()
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        self.report.related()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(self.source_code.as_ref())
    }

    fn url<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.report.url()
    }

    fn severity(&self) -> Option<Severity> {
        self.report.severity()
    }
}

/// Errors that can be reported with source context.
pub trait OspreyError: Diagnostic + Send + Sync + fmt::Display + Error + 'static {
    /// Attach `source` (named `name`) to this error.
    fn report(self, name: &str, source: &str) -> Report
    where
        Self: Sized;
}

impl<T: Diagnostic + Send + Sync + fmt::Display + Error + 'static> OspreyError for T {
    fn report(self, name: &str, source: &str) -> Report {
        Report {
            name: name.to_string(),
            source_code: Arc::new(miette::NamedSource::new(name, source.to_string())),
            report: Arc::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::SourceSpan;
    use thiserror::Error;

    #[derive(Debug, Error, Diagnostic)]
    #[error("oops")]
    #[diagnostic(code(osprey_source::test), help("try again"))]
    struct Oops {
        #[label("here")]
        span: SourceSpan,
    }

    #[test]
    fn report_delegates_to_the_wrapped_error() {
        let report = Oops { span: (4, 3).into() }.report("lib.osp", "fn foo() {}");
        assert_eq!(report.to_string(), "oops");
        assert_eq!(report.code().map(|c| c.to_string()).as_deref(), Some("osprey_source::test"));
        assert_eq!(report.help().map(|h| h.to_string()).as_deref(), Some("try again"));

        let labels: Vec<_> = report.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 4);
        assert!(report.source_code().is_some());
    }
}
