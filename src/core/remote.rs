//! Fetch state of a remotely owned value

use std::fmt::Display;

/// Where the latest request for a value stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing requested yet
    Unset,
    /// A request is in flight
    Pending,
    /// The last request succeeded
    Ready,
    /// The last request failed; not retried automatically
    Failed(String),
}

/// A snapshot fetched from the backend plus the status of its last request.
///
/// A failed refresh keeps the previous snapshot so the view can keep showing
/// it next to the error.
#[derive(Debug, Clone)]
pub struct Remote<T> {
    value: Option<T>,
    status: FetchStatus,
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Self {
            value: None,
            status: FetchStatus::Unset,
        }
    }
}

impl<T> Remote<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.status = FetchStatus::Pending;
    }

    pub fn resolve<E: Display>(&mut self, result: Result<T, E>) {
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.status = FetchStatus::Ready;
            }
            Err(err) => {
                self.status = FetchStatus::Failed(err.to_string());
            }
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == FetchStatus::Pending
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}
