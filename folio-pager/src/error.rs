use thiserror::Error;

/// Errors returned by [`InfinitePager`](crate::InfinitePager).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PagerError {
    /// A fake drag step was requested without
    /// [`begin_fake_drag`](crate::InfinitePager::begin_fake_drag).
    #[error("no fake drag in progress, call begin_fake_drag first")]
    NoFakeDrag,
}
