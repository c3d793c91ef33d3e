use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// An error that can occur when generating documentation.
#[derive(Diagnostic, Error)]
#[error(transparent)]
#[diagnostic(transparent)]
pub struct Error {
    kind: Box<ErrorKind>,
}

#[derive(Debug, Diagnostic, Error)]
pub(crate) enum ErrorKind {
    #[error("{kind} '{name}' in '{container}' has {kind_value} {value}, which is out of range")]
    #[diagnostic(help("field numbers and enum values must be between 0 and 255 to be documented"))]
    PositionOutOfRange {
        kind: PositionKind,
        kind_value: &'static str,
        container: String,
        name: String,
        value: i32,
    },
    #[cfg(feature = "render")]
    #[error("failed to render documentation")]
    Render {
        #[source]
        err: minijinja::Error,
    },
}

/// The kind of element whose position was out of range.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum PositionKind {
    Field,
    EnumValue,
}

impl Error {
    pub(crate) fn from_kind(kind: ErrorKind) -> Self {
        Error {
            kind: Box::new(kind),
        }
    }

    pub(crate) fn position_out_of_range(
        kind: PositionKind,
        container: &str,
        name: &str,
        value: i32,
    ) -> Self {
        let kind_value = match kind {
            PositionKind::Field => "number",
            PositionKind::EnumValue => "value",
        };
        Error::from_kind(ErrorKind::PositionOutOfRange {
            kind,
            kind_value,
            container: container.to_owned(),
            name: name.to_owned(),
            value,
        })
    }

    #[cfg(feature = "render")]
    pub(crate) fn render(err: minijinja::Error) -> Self {
        Error::from_kind(ErrorKind::Render { err })
    }

    #[cfg(test)]
    pub(crate) fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns true if a field number or enum value could not be represented in the model.
    pub fn is_position_out_of_range(&self) -> bool {
        matches!(&*self.kind, ErrorKind::PositionOutOfRange { .. })
    }

    /// The offending field number or enum value, if this is a range error.
    pub fn position(&self) -> Option<i32> {
        match &*self.kind {
            ErrorKind::PositionOutOfRange { value, .. } => Some(*value),
            #[cfg(feature = "render")]
            ErrorKind::Render { .. } => None,
        }
    }

    /// Returns true if the HTML template failed to render.
    pub fn is_render(&self) -> bool {
        match &*self.kind {
            #[cfg(feature = "render")]
            ErrorKind::Render { .. } => true,
            _ => false,
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.kind {
            ErrorKind::PositionOutOfRange { .. } => write!(f, "{}", self),
            #[cfg(feature = "render")]
            ErrorKind::Render { err } => write!(f, "{}: {:?}", self, err),
        }
    }
}

impl fmt::Display for PositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionKind::Field => f.write_str("field"),
            PositionKind::EnumValue => f.write_str("enum value"),
        }
    }
}
