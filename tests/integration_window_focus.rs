use geoview_wm::actions::UiAction;
use geoview_wm::registry::WidgetDescriptor;
use geoview_wm::window::{Limits, WindowEvent, WindowManager};

fn manager() -> WindowManager {
    let mut wm = WindowManager::new(Limits::container(400.0, 400.0));
    wm.dispatch(UiAction::SetInitialWidgets(vec![
        WidgetDescriptor::new("Buffer", "Buffer", 300.0, 200.0),
        WidgetDescriptor::new("Legend", "Legend", 150.0, 150.0),
    ]));
    wm
}

#[test]
fn new_window_is_focused() {
    let mut wm = manager();
    assert!(wm.show_window("w1", "Buffer", None));
    assert_eq!(wm.z_index("w1"), 1000);

    assert!(wm.show_window("w2", "Legend", None));
    assert_eq!(wm.z_index("w2"), 1000);
    assert_eq!(wm.z_index("w1"), 999);

    assert!(wm.handle_event(&WindowEvent::Focus { id: "w1".into() }));
    assert_eq!(wm.state().floating_windows_order(), ["w1", "w2"]);
}

#[test]
fn dragging_past_the_container_is_clamped() {
    let mut wm = manager();
    wm.show_window("w", "Buffer", Some((100.0, 100.0)));

    wm.handle_event(&WindowEvent::HeaderPointerDown {
        id: "w".into(),
        x: 150.0,
        y: 150.0,
    });
    let geometry = wm.geometry("w").expect("shown");
    assert_eq!(geometry.drag_start(), Some((50.0, 50.0)));

    wm.handle_event(&WindowEvent::PointerMove {
        x: 1000.0,
        y: 1000.0,
    });
    wm.handle_event(&WindowEvent::PointerUp);

    let geometry = wm.geometry("w").expect("shown");
    assert_eq!(geometry.x(), 100.0);
    assert_eq!(geometry.y(), 200.0);
    assert!(!geometry.is_dragging());
}
