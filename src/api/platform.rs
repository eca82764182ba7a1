//! Host services the editor depends on but does not implement.
//!
//! Page navigation, dialogs, HTTP and environment probing are injected so the
//! store and layout engine run headless in tests.

use serde::{Deserialize, Serialize};

use crate::core::HostFacts;
use crate::error::ChartResult;

pub trait HostEnvironment {
    fn facts(&self) -> HostFacts;
}

impl HostEnvironment for HostFacts {
    fn facts(&self) -> HostFacts {
        *self
    }
}

/// Handle to a browsing context opened through a [`Navigator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(u64);

impl WindowHandle {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

pub trait Navigator {
    /// Navigates the current page.
    fn assign(&mut self, location: &str);

    /// Opens an empty browsing context synchronously.
    ///
    /// Called before a request is sent so popup blockers still attribute the
    /// open to the user gesture.
    fn open_blank(&mut self) -> WindowHandle;

    fn assign_window(&mut self, window: WindowHandle, location: &str);

    fn close_window(&mut self, window: WindowHandle);
}

impl<T: Navigator + ?Sized> Navigator for &mut T {
    fn assign(&mut self, location: &str) {
        (**self).assign(location);
    }

    fn open_blank(&mut self) -> WindowHandle {
        (**self).open_blank()
    }

    fn assign_window(&mut self, window: WindowHandle, location: &str) {
        (**self).assign_window(window, location);
    }

    fn close_window(&mut self, window: WindowHandle) {
        (**self).close_window(window);
    }
}

/// Confirmation the operator must accept before a publish-state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmPrompt {
    Publish { url: String },
    Unpublish,
}

impl ConfirmPrompt {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Publish { .. } => "Publish chart",
            Self::Unpublish => "Unpublish chart",
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Publish { url } => format!("This chart will be available at:\n{url}\nProceed?"),
            Self::Unpublish => "Really unpublish chart?".to_owned(),
        }
    }
}

pub trait DialogPresenter {
    fn show_error(&mut self, title: &str, message: &str);

    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool;
}

impl<T: DialogPresenter + ?Sized> DialogPresenter for &mut T {
    fn show_error(&mut self, title: &str, message: &str) {
        (**self).show_error(title, message);
    }

    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        (**self).confirm(prompt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Post,
    Put,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// Outgoing admin request with a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends admin requests. Transport-level failures map to `ChartError::Transport`;
/// HTTP error statuses are returned as responses.
pub trait ChartTransport {
    fn send(&mut self, request: &ChartRequest) -> ChartResult<TransportResponse>;
}

impl<T: ChartTransport + ?Sized> ChartTransport for &mut T {
    fn send(&mut self, request: &ChartRequest) -> ChartResult<TransportResponse> {
        (**self).send(request)
    }
}
