use approx::assert_relative_eq;
use chart_editor::api::{LayoutPolicy, RenderLayout, ResponsiveLayoutEngine, compute_layout};
use chart_editor::core::{
    ContainerSize, HostFacts, LayoutBounds, Orientation, RenderModeRequest, Viewport,
};

fn size(width: f64, height: f64) -> ContainerSize {
    ContainerSize::new(width, height).expect("valid size")
}

fn layout_for(width: f64, height: f64, request: RenderModeRequest) -> RenderLayout {
    compute_layout(
        &LayoutPolicy::default(),
        Viewport::resolve(size(width, height), request, HostFacts::default()),
    )
}

#[test]
fn roomy_standalone_page_keeps_authored_ratio() {
    let layout = layout_for(1000.0, 800.0, RenderModeRequest::page());

    assert_eq!(layout.orientation, Orientation::Landscape);
    assert!(!layout.fit_bounds);
    assert_relative_eq!(layout.scale_to_fit_ideal, 900.0 / 850.0, epsilon = 1e-9);
    assert_relative_eq!(layout.ideal_width, 900.0, epsilon = 1e-9);
    assert_relative_eq!(layout.ideal_height, 635.294_117_647, epsilon = 1e-6);
    assert_relative_eq!(layout.render_width, layout.ideal_width);
    assert_relative_eq!(layout.render_height, layout.ideal_height);
    assert_eq!(layout.base_font_size, 16.0);
}

#[test]
fn small_editor_view_still_preserves_ratio() {
    let layout = layout_for(300.0, 300.0, RenderModeRequest::editor());

    assert!(layout.viewport.is_embed);
    assert!(!layout.fit_bounds);
    assert_relative_eq!(layout.scale_to_fit_ideal, 270.0 / 850.0, epsilon = 1e-9);
    assert_relative_eq!(layout.render_width, 270.0, epsilon = 1e-9);
    assert_relative_eq!(layout.render_height, 600.0 * 270.0 / 850.0, epsilon = 1e-9);
    assert_eq!(layout.base_font_size, 14.0);
}

#[test]
fn embedded_view_fills_container_minus_margin() {
    let layout = layout_for(300.0, 300.0, RenderModeRequest::embed());

    assert!(layout.fit_bounds);
    assert_eq!(layout.render_width, 295.0);
    assert_eq!(layout.render_height, 295.0);
    assert_eq!(layout.svg_bounds, LayoutBounds::new(0.0, 0.0, 295.0, 255.0));
    assert_eq!(
        layout.inner_bounds,
        LayoutBounds::new(15.0, 15.0, 265.0, 225.0)
    );
    assert_eq!(
        layout.footer_bounds(),
        LayoutBounds::new(0.0, 255.0, 295.0, 40.0)
    );
}

#[test]
fn undersized_page_container_switches_to_fit() {
    let layout = layout_for(800.0, 700.0, RenderModeRequest::page());
    assert!(layout.fit_bounds);
    assert_eq!(layout.render_width, 795.0);

    let portrait = layout_for(380.0, 900.0, RenderModeRequest::page());
    assert_eq!(portrait.orientation, Orientation::Portrait);
    assert_eq!(portrait.author_size.width, 400.0);
    assert!(portrait.fit_bounds);
}

#[test]
fn export_uses_full_container_without_footer() {
    let layout = layout_for(1200.0, 900.0, RenderModeRequest::export());

    assert!(!layout.viewport.is_embed);
    assert!(layout.fit_bounds);
    assert_eq!(layout.svg_bounds, LayoutBounds::from_size(1200.0, 900.0));
    assert_eq!(layout.footer_bounds().height, 0.0);
    assert_eq!(layout.base_font_size, 18.0);
    assert_eq!(
        layout.class_names().as_slice(),
        &["chart", "export", "landscape"]
    );
}

#[test]
fn foreign_frame_makes_page_view_embedded() {
    let host = HostFacts {
        in_foreign_frame: true,
        is_mobile: true,
    };
    let engine = ResponsiveLayoutEngine::new(
        LayoutPolicy::default(),
        size(1000.0, 800.0),
        RenderModeRequest::page(),
        &host,
    )
    .expect("engine init");

    let viewport = engine.viewport();
    assert!(viewport.is_embed);
    assert!(viewport.is_mobile);
}

#[test]
fn tiny_container_never_produces_negative_extents() {
    let layout = layout_for(2.0, 2.0, RenderModeRequest::embed());

    assert_eq!(layout.render_width, 0.0);
    assert_eq!(layout.svg_bounds.height, 0.0);
    assert_eq!(layout.inner_bounds.width, 0.0);
    assert_eq!(layout.inner_bounds.height, 0.0);
}

#[test]
fn engine_recomputes_only_when_inputs_change() {
    let mut engine = ResponsiveLayoutEngine::new(
        LayoutPolicy::default(),
        size(1000.0, 800.0),
        RenderModeRequest::page(),
        &HostFacts::default(),
    )
    .expect("engine init");

    let initial = engine.revision();
    let first = engine.layout();
    assert_eq!(engine.layout(), first);
    assert_eq!(engine.revision(), initial);

    assert!(!engine.set_container(size(1000.0, 800.0)).expect("same size"));
    assert_eq!(engine.revision(), initial);

    assert!(engine.set_container(size(300.0, 300.0)).expect("resize"));
    assert!(engine.revision() > initial);
    assert!(engine.layout().fit_bounds);

    engine.set_mode_request(RenderModeRequest::editor());
    assert!(!engine.layout().fit_bounds);
}

#[test]
fn host_refresh_and_policy_swap_feed_layout() {
    let mut engine = ResponsiveLayoutEngine::new(
        LayoutPolicy::default(),
        size(1000.0, 800.0),
        RenderModeRequest::page(),
        &HostFacts::default(),
    )
    .expect("engine init");
    assert!(!engine.layout().fit_bounds);

    engine.refresh_host(&HostFacts {
        in_foreign_frame: true,
        is_mobile: false,
    });
    assert!(engine.layout().fit_bounds);

    engine
        .set_policy(LayoutPolicy::default().with_footer_height_px(60.0))
        .expect("valid policy");
    assert_eq!(engine.layout().svg_bounds.height, 795.0 - 60.0);
}

#[test]
fn invalid_inputs_are_rejected() {
    let err = ContainerSize::new(f64::NAN, 10.0).expect_err("nan width must fail");
    assert!(format!("{err}").contains("invalid viewport"));

    let mut engine = ResponsiveLayoutEngine::new(
        LayoutPolicy::default(),
        size(100.0, 100.0),
        RenderModeRequest::page(),
        &HostFacts::default(),
    )
    .expect("engine init");
    let err = engine
        .set_policy(LayoutPolicy::default().with_fit_margin_px(-1.0))
        .expect_err("negative margin must fail");
    assert!(format!("{err}").contains("fit margin"));
    assert_eq!(engine.policy(), &LayoutPolicy::default());
}
