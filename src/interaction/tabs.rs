use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{ChartConfiguration, ChartType, ViewerTab};
use crate::error::{ChartError, ChartResult};

use super::{Popup, PopupKind, PopupStack};

/// Primary editor tab. Exactly one is selected at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    #[default]
    Basic,
    Data,
    Customize,
    Map,
    Scatter,
}

impl EditorTab {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Data => "data",
            Self::Customize => "customize",
            Self::Map => "map",
            Self::Scatter => "scatter",
        }
    }
}

impl std::fmt::Display for EditorTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary panel layered above the primary view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayTab {
    Sources,
    Data,
    Download,
}

impl OverlayTab {
    #[must_use]
    pub const fn from_viewer_tab(tab: ViewerTab) -> Option<Self> {
        match tab {
            ViewerTab::Sources => Some(Self::Sources),
            ViewerTab::Data => Some(Self::Data),
            ViewerTab::Download => Some(Self::Download),
            ViewerTab::Chart | ViewerTab::Map => None,
        }
    }
}

pub type AvailableTabs = SmallVec<[EditorTab; 5]>;

/// Editor tabs offered for `config`, in display order.
#[must_use]
pub fn available_editor_tabs(config: &ChartConfiguration) -> AvailableTabs {
    let mut tabs: AvailableTabs = SmallVec::new();
    tabs.extend([EditorTab::Basic, EditorTab::Data, EditorTab::Customize]);
    if config.has_map_tab() {
        tabs.push(EditorTab::Map);
    }
    if config.chart_type == ChartType::ScatterPlot {
        tabs.push(EditorTab::Scatter);
    }
    tabs
}

/// Selected editor tab, optional overlay and the transient popup list.
///
/// Availability is never stored; it is derived from the configuration on each
/// call so a configuration edit cannot leave a stale tab list behind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabStateMachine {
    editor_tab: EditorTab,
    overlay: Option<OverlayTab>,
    popups: PopupStack,
}

impl TabStateMachine {
    /// Starts with the overlay the chart declares as its default tab, if any.
    #[must_use]
    pub fn for_config(config: &ChartConfiguration) -> Self {
        Self {
            overlay: OverlayTab::from_viewer_tab(config.default_tab),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn available_tabs(&self, config: &ChartConfiguration) -> AvailableTabs {
        available_editor_tabs(config)
    }

    /// Selected tab, clamped to `basic` if the configuration no longer offers it.
    #[must_use]
    pub fn current_tab(&self, config: &ChartConfiguration) -> EditorTab {
        if available_editor_tabs(config).contains(&self.editor_tab) {
            self.editor_tab
        } else {
            EditorTab::Basic
        }
    }

    pub fn select_tab(&mut self, tab: EditorTab, config: &ChartConfiguration) -> ChartResult<()> {
        if !available_editor_tabs(config).contains(&tab) {
            return Err(ChartError::UnavailableTab { tab });
        }
        debug!(from = %self.editor_tab, to = %tab, "select editor tab");
        self.editor_tab = tab;
        Ok(())
    }

    #[must_use]
    pub fn overlay(&self) -> Option<OverlayTab> {
        self.overlay
    }

    pub fn open_overlay(&mut self, tab: OverlayTab) {
        self.overlay = Some(tab);
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    /// Opens `tab`, or closes it when it is already the open overlay.
    pub fn toggle_overlay(&mut self, tab: OverlayTab) {
        if self.overlay == Some(tab) {
            self.overlay = None;
        } else {
            self.overlay = Some(tab);
        }
    }

    #[must_use]
    pub fn popups(&self) -> &PopupStack {
        &self.popups
    }

    pub fn add_popup(&mut self, popup: Popup) {
        self.popups.add(popup);
    }

    /// Removes every popup of `kind`; returns how many were dropped.
    pub fn remove_popup(&mut self, kind: PopupKind) -> usize {
        self.popups.remove_kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorTab, OverlayTab, TabStateMachine};
    use crate::core::{ChartConfiguration, ViewerTab};

    #[test]
    fn default_overlay_follows_configured_tab() {
        let config = ChartConfiguration {
            default_tab: ViewerTab::Sources,
            ..ChartConfiguration::default()
        };
        let tabs = TabStateMachine::for_config(&config);
        assert_eq!(tabs.overlay(), Some(OverlayTab::Sources));
    }

    #[test]
    fn toggle_overlay_closes_open_tab() {
        let mut tabs = TabStateMachine::default();
        tabs.toggle_overlay(OverlayTab::Download);
        assert_eq!(tabs.overlay(), Some(OverlayTab::Download));
        tabs.toggle_overlay(OverlayTab::Data);
        assert_eq!(tabs.overlay(), Some(OverlayTab::Data));
        tabs.toggle_overlay(OverlayTab::Data);
        assert_eq!(tabs.overlay(), None);
    }

    #[test]
    fn editor_tab_display_matches_wire_name() {
        assert_eq!(EditorTab::Customize.to_string(), "customize");
    }
}
