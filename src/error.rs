use thiserror::Error;

use crate::model::MemberLocation;

macro_rules! frame_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::FrameStack {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::FrameStack {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type of this library.
///
/// Malformed softmap text and patterns that fail to bind are never reported through this type;
/// both end up as [`crate::diagnostics::Diagnostic`] entries so that parsing and application
/// always run to completion. An [`Error`] signals a broken engine invariant instead, such as an
/// unbalanced frame stack or a method of the program model that has no dispatch realm. Callers
/// are expected to propagate it and abort the current application.
///
/// # Examples
///
/// ```rust
/// use softmap::{Document, Error};
/// use softmap::model::ProgramModel;
///
/// let document = Document::parse("softmap 1\nmethod a/b.c?()V { RETURN }");
/// match document.apply(&ProgramModel::default()) {
///     Ok(result) => println!("{} rows", result.table().len()),
///     Err(Error::FrameStack { message, file, line }) => {
///         eprintln!("frame stack corrupted: {message} ({file}:{line})");
///     }
///     Err(e) => eprintln!("engine defect: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The mapping frame stack was used with an unexpected depth.
    ///
    /// Raised when merging with fewer than two frames, popping or discarding an empty stack,
    /// or when the application driver finds a depth other than the one its current stage
    /// requires. The error records the source location that detected the violation.
    #[error("Frame stack - {file}:{line}: {message}")]
    FrameStack {
        /// Description of the violated expectation
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A mapping was written while no frame was active.
    #[error("No active mapping frame to write into")]
    NoActiveFrame,

    /// A descriptor-shaped string was handed to the mapping store as a class name.
    ///
    /// Class names are internal names such as `java/lang/String`; `Ljava/lang/String;` and
    /// array descriptors like `[I` are rejected.
    #[error("Illegal class name for the mapping store: '{0}'")]
    IllegalClassName(String),

    /// A method declared by the program model has no dispatch realm.
    ///
    /// Every declared method receives a realm when the realm table is built, so this indicates
    /// that the realm table and the program model went out of sync.
    #[error("No dispatch realm was computed for declared method {0}")]
    MissingRealm(MemberLocation),
}
