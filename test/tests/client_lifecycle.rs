/// Connection handshake, canvas control messages and host events

use std::time::Duration;

use serde_json::json;

use glrelay_server::{Context, ProxyEvent, SurfaceGeometry};
use glrelay_shared::{InputKind, ServerMessage};
use glrelay_test::fake_browser::{SCREEN_HEIGHT, SCREEN_WIDTH};
use glrelay_test::TestProxy;

const TIMEOUT: Duration = Duration::from_secs(5);

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

#[test]
fn handshake_reports_the_screen() {
    init_logging();
    let proxy = TestProxy::start();
    let browser = proxy.connect_browser();

    let event = proxy.wait_for_event(|event| matches!(event, ProxyEvent::ClientConnected { .. }));
    let ProxyEvent::ClientConnected { client, screen } = event else {
        unreachable!();
    };
    assert_eq!(client, browser.client());
    assert_eq!(screen.width, SCREEN_WIDTH);
    assert_eq!(screen.height, SCREEN_HEIGHT);
    assert_eq!(
        proxy.registry().client_screen(client).map(|s| s.height),
        Some(SCREEN_HEIGHT)
    );
    assert_eq!(proxy.registry().clients(), vec![client]);
}

#[test]
fn canvas_control_messages() {
    init_logging();
    let proxy = TestProxy::start();
    let registry = proxy.registry();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);

    registry.set_title(surface, "renamed");
    assert_eq!(
        browser.next_control(TIMEOUT),
        Some(ServerMessage::ChangeTitle {
            win_id: surface,
            title: "renamed".to_string()
        })
    );
    assert_eq!(registry.surface_title(surface).as_deref(), Some("renamed"));

    registry.set_cursor(browser.client(), 3);
    assert_eq!(
        browser.next_control(TIMEOUT),
        Some(ServerMessage::ChangeCursor { cursor: 3 })
    );

    registry.open_url(browser.client(), "https://example.org/");
    assert_eq!(
        browser.next_control(TIMEOUT),
        Some(ServerMessage::OpenUrl {
            url: "https://example.org/".to_string()
        })
    );

    registry.destroy_surface(surface);
    assert_eq!(
        browser.next_control(TIMEOUT),
        Some(ServerMessage::DestroyCanvas { win_id: surface })
    );
    assert!(!registry.surface_exists(surface));
}

#[test]
fn resize_and_input_become_events() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);

    browser.send_json(json!({
        "type": "canvas_resize",
        "name": surface,
        "width": 800,
        "height": 600,
    }));
    let resized = proxy.wait_for_event(|event| matches!(event, ProxyEvent::CanvasResized { .. }));
    assert_eq!(
        resized,
        ProxyEvent::CanvasResized {
            surface,
            width: 800,
            height: 600
        }
    );
    assert_eq!(
        proxy.registry().surface_geometry(surface),
        Some(SurfaceGeometry::new(0, 0, 800, 600))
    );

    browser.send_json(json!({ "type": "keydown", "name": surface.to_string(), "key": "a" }));
    let input = proxy.wait_for_event(|event| matches!(event, ProxyEvent::Input { .. }));
    let ProxyEvent::Input {
        kind,
        surface: target,
        payload,
        ..
    } = input
    else {
        unreachable!();
    };
    assert_eq!(kind, InputKind::KeyDown);
    assert_eq!(target, Some(surface));
    assert_eq!(payload["key"], json!("a"));
}

#[test]
fn disconnect_tears_down_canvases() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let client = browser.client();
    let mut context = proxy.current_context(surface);

    browser.close();
    let event = proxy.wait_for_event(|event| matches!(event, ProxyEvent::ClientDisconnected { .. }));
    assert_eq!(event, ProxyEvent::ClientDisconnected { client });
    assert!(!proxy.registry().surface_exists(surface));
    assert!(proxy.registry().clients().is_empty());

    // a dead surface cannot be made current again
    context.done_current();
    assert!(!context.make_current(surface));
}

#[test]
fn make_current_waits_for_default_parameters() {
    init_logging();
    let proxy = TestProxy::start();
    let registry = proxy.registry();
    let mut browser = proxy.connect_browser();

    let surface = registry
        .create_surface(browser.client(), SurfaceGeometry::new(0, 0, 64, 64), "late")
        .unwrap();

    std::thread::scope(|scope| {
        let current = scope.spawn(|| {
            let mut context = Context::new(registry.clone());
            let made_current = context.make_current(surface);
            (made_current, context.state().has_snapshot())
        });

        // receiving create_canvas sends the parameters
        browser.next_control(TIMEOUT);
        assert_eq!(current.join().unwrap(), (true, true));
    });
}
