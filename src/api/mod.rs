mod chart_view;
mod config_store;
mod editor_data;
mod editor_settings;
mod invalidation;
mod layout_engine;
mod layout_policy;
mod platform;
mod request_coordinator;
mod resize_throttle;

pub use chart_view::ChartView;
pub use config_store::{
    ConfigStore, EditorState, RequestTicket, Rollback, SAVE_ERROR_TITLE, SaveOptions,
    SaveOutcome, SaveTarget, SaveTicket,
};
pub use editor_data::{EditorData, EditorVariable};
pub use editor_settings::{CHARTS_COLLECTION_PATH, EditorSettings};
pub use invalidation::{Memo, Revision, RevisionCounter};
pub use layout_engine::{ClassNames, RenderLayout, ResponsiveLayoutEngine, compute_layout};
pub use layout_policy::{AuthorSize, LayoutPolicy};
pub use platform::{
    ChartRequest, ChartTransport, ConfirmPrompt, DialogPresenter, HostEnvironment, HttpMethod,
    Navigator, TransportResponse, WindowHandle,
};
pub use request_coordinator::{
    PendingRequest, RequestCoordinator, RequestGeneration, RequestKind, Settlement,
};
pub use resize_throttle::ResizeThrottle;
