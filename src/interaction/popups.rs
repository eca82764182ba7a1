use serde::{Deserialize, Serialize};

use crate::core::LayoutBounds;

/// Kind tag used to address popups; popups of one kind are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopupKind {
    Tooltip,
    EntitySelector,
    ShareMenu,
    EmbedCode,
    Notice,
}

/// Transient, dismissible element drawn over the render surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub kind: PopupKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub anchor: Option<LayoutBounds>,
}

impl Popup {
    #[must_use]
    pub fn new(kind: PopupKind) -> Self {
        Self {
            kind,
            content: String::new(),
            anchor: None,
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: LayoutBounds) -> Self {
        self.anchor = Some(anchor);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopupStack {
    popups: Vec<Popup>,
}

impl PopupStack {
    pub fn add(&mut self, popup: Popup) {
        self.popups.push(popup);
    }

    pub fn remove_kind(&mut self, kind: PopupKind) -> usize {
        let before = self.popups.len();
        self.popups.retain(|popup| popup.kind != kind);
        before - self.popups.len()
    }

    pub fn clear(&mut self) {
        self.popups.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Popup] {
        &self.popups
    }

    pub fn iter(&self) -> impl Iterator<Item = &Popup> {
        self.popups.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.popups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }
}
