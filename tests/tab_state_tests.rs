use chart_editor::core::{ChartConfiguration, ChartType, LayoutBounds, ViewerTab};
use chart_editor::error::ChartError;
use chart_editor::interaction::{
    EditorTab, OverlayTab, Popup, PopupKind, TabStateMachine, available_editor_tabs,
};

fn scatter_with_map() -> ChartConfiguration {
    ChartConfiguration {
        chart_type: ChartType::ScatterPlot,
        tabs: vec![ViewerTab::Chart, ViewerTab::Map, ViewerTab::Data],
        ..ChartConfiguration::default()
    }
}

#[test]
fn line_chart_offers_only_base_tabs() {
    let tabs = available_editor_tabs(&ChartConfiguration::default());
    assert_eq!(
        tabs.as_slice(),
        &[EditorTab::Basic, EditorTab::Data, EditorTab::Customize]
    );
}

#[test]
fn map_precedes_scatter_when_both_apply() {
    let tabs = available_editor_tabs(&scatter_with_map());
    assert_eq!(
        tabs.as_slice(),
        &[
            EditorTab::Basic,
            EditorTab::Data,
            EditorTab::Customize,
            EditorTab::Map,
            EditorTab::Scatter,
        ]
    );
}

#[test]
fn selection_clamps_to_basic_when_tab_disappears() {
    let mut config = scatter_with_map();
    let mut tabs = TabStateMachine::for_config(&config);
    assert_eq!(tabs.current_tab(&config), EditorTab::Basic);

    tabs.select_tab(EditorTab::Scatter, &config)
        .expect("scatter tab offered");
    assert_eq!(tabs.current_tab(&config), EditorTab::Scatter);

    config.chart_type = ChartType::LineChart;
    assert_eq!(tabs.current_tab(&config), EditorTab::Basic);

    config.chart_type = ChartType::ScatterPlot;
    assert_eq!(tabs.current_tab(&config), EditorTab::Scatter);
}

#[test]
fn selecting_unavailable_tab_reports_error() {
    let config = ChartConfiguration::default();
    let mut tabs = TabStateMachine::for_config(&config);

    let err = tabs
        .select_tab(EditorTab::Map, &config)
        .expect_err("map tab requires viewer map tab");
    assert!(matches!(err, ChartError::UnavailableTab { tab: EditorTab::Map }));
    assert!(format!("{err}").contains("editor tab `map` is not available"));
    assert_eq!(tabs.current_tab(&config), EditorTab::Basic);
}

#[test]
fn overlay_lifecycle() {
    let config = ChartConfiguration {
        default_tab: ViewerTab::Chart,
        ..ChartConfiguration::default()
    };
    let mut tabs = TabStateMachine::for_config(&config);
    assert_eq!(tabs.overlay(), None);

    tabs.open_overlay(OverlayTab::Sources);
    tabs.open_overlay(OverlayTab::Download);
    assert_eq!(tabs.overlay(), Some(OverlayTab::Download));

    tabs.close_overlay();
    assert_eq!(tabs.overlay(), None);
    assert_eq!(OverlayTab::from_viewer_tab(ViewerTab::Map), None);
}

#[test]
fn removing_popup_kind_drops_every_instance() {
    let mut tabs = TabStateMachine::default();
    tabs.add_popup(Popup::new(PopupKind::Tooltip).with_content("first"));
    tabs.add_popup(Popup::new(PopupKind::Tooltip).with_content("second"));
    tabs.add_popup(
        Popup::new(PopupKind::ShareMenu).with_anchor(LayoutBounds::new(10.0, 10.0, 120.0, 40.0)),
    );

    assert_eq!(tabs.remove_popup(PopupKind::Tooltip), 2);

    let remaining: Vec<PopupKind> = tabs.popups().iter().map(|popup| popup.kind).collect();
    assert_eq!(remaining, vec![PopupKind::ShareMenu]);
    assert_eq!(tabs.remove_popup(PopupKind::Notice), 0);
    assert_eq!(tabs.popups().len(), 1);
}

#[test]
fn popups_keep_insertion_order() {
    let mut tabs = TabStateMachine::default();
    for kind in [
        PopupKind::Notice,
        PopupKind::EmbedCode,
        PopupKind::EntitySelector,
    ] {
        tabs.add_popup(Popup::new(kind));
    }
    tabs.remove_popup(PopupKind::EmbedCode);

    let kinds: Vec<PopupKind> = tabs.popups().iter().map(|popup| popup.kind).collect();
    assert_eq!(kinds, vec![PopupKind::Notice, PopupKind::EntitySelector]);
}
