//! Tab selection and popup bookkeeping shared by the editor and the viewer.

mod popups;
mod tabs;

pub use popups::{Popup, PopupKind, PopupStack};
pub use tabs::{AvailableTabs, EditorTab, OverlayTab, TabStateMachine, available_editor_tabs};
