/// Failure to attach the pipeline to the page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("no element with id {0:?}")]
    MissingElement(String),

    #[error("element {id:?} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },
}
