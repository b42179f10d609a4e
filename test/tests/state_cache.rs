/// Locally answered queries: the default parameter snapshot, tracked
/// bindings and the texture size ceiling

use std::time::Duration;

use serde_json::json;

use glrelay_server::{BindingSlot, ProxyConfig};
use glrelay_shared::{gl, Value};
use glrelay_test::helpers::{CANVAS_HEIGHT, CANVAS_WIDTH};
use glrelay_test::TestProxy;

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

#[test]
fn snapshot_answers_without_a_round_trip() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);

    let ledger = proxy.registry().ledger();
    let before = ledger.issued();

    assert_eq!(context.get_string(gl::VENDOR), "FakeVendor");
    assert_eq!(context.get_string(gl::VENDOR), "FakeVendor");
    assert_eq!(
        context.get_integerv(gl::VIEWPORT),
        vec![0, 0, CANVAS_WIDTH, CANVAS_HEIGHT]
    );
    assert_eq!(context.get_integerv(gl::MAX_VERTEX_ATTRIBS), vec![16]);
    assert!(context.get_booleanv(gl::DITHER));
    assert!(!context.is_enabled(gl::BLEND));

    assert_eq!(ledger.issued(), before);
}

#[test]
fn texture_size_is_capped_by_config() {
    init_logging();
    let proxy = TestProxy::with_config(ProxyConfig {
        max_texture_size: 2048,
        ..ProxyConfig::default()
    });
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);

    // the snapshot reports 16384
    assert_eq!(context.get_integerv(gl::MAX_TEXTURE_SIZE), vec![2048]);
}

#[test]
fn enable_and_disable_update_cached_flags() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let mut context = proxy.current_context(surface);
    browser.expect_call("makeCurrent");

    context.enable(gl::BLEND);
    context.enable(gl::DEPTH_TEST);
    context.disable(gl::DITHER);

    let before = proxy.registry().ledger().issued();
    assert!(context.is_enabled(gl::BLEND));
    assert!(context.is_enabled(gl::DEPTH_TEST));
    assert!(!context.is_enabled(gl::DITHER));
    assert_eq!(proxy.registry().ledger().issued(), before);

    let call = browser.expect_call("enable");
    assert_eq!(call.arguments, vec![Value::UInt(gl::BLEND)]);
    browser.expect_call("enable");
    browser.expect_call("disable");
}

#[test]
fn bindings_are_tracked_locally() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let mut context = proxy.current_context(surface);

    context.bind_buffer(gl::ARRAY_BUFFER, 5);
    context.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, 6);
    context.bind_texture(gl::TEXTURE_2D, 9);
    context.active_texture(gl::TEXTURE0 + 2);
    context.use_program(3);
    context.pixel_storei(gl::UNPACK_ALIGNMENT, 1);

    let before = proxy.registry().ledger().issued();
    assert_eq!(context.get_integerv(gl::ARRAY_BUFFER_BINDING), vec![5]);
    assert_eq!(context.get_integerv(gl::ELEMENT_ARRAY_BUFFER_BINDING), vec![6]);
    assert_eq!(context.get_integerv(gl::TEXTURE_BINDING_2D), vec![9]);
    assert_eq!(
        context.get_integerv(gl::ACTIVE_TEXTURE),
        vec![(gl::TEXTURE0 + 2) as i32]
    );
    assert_eq!(context.get_integerv(gl::CURRENT_PROGRAM), vec![3]);
    assert_eq!(proxy.registry().ledger().issued(), before);

    // snapshot entries follow later updates
    assert_eq!(context.get_integerv(gl::UNPACK_ALIGNMENT), vec![1]);
    assert_eq!(context.state().binding(BindingSlot::UnpackAlignment), 1);
}

#[test]
fn deleting_bound_objects_clears_bindings() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let mut context = proxy.current_context(surface);

    context.bind_buffer(gl::ARRAY_BUFFER, 5);
    context.bind_texture(gl::TEXTURE_2D, 9);
    context.bind_framebuffer(gl::FRAMEBUFFER, 2);
    context.delete_buffers(&[4, 5]);
    context.delete_textures(&[9]);
    context.delete_framebuffers(&[2]);

    let state = context.state();
    assert_eq!(state.binding(BindingSlot::ArrayBuffer), 0);
    assert_eq!(state.binding(BindingSlot::Texture2D), 0);
    assert_eq!(state.binding(BindingSlot::DrawFramebuffer), 0);

    browser.expect_call("makeCurrent");
    browser.expect_call("bindBuffer");
    browser.expect_call("bindTexture");
    browser.expect_call("bindFramebuffer");
    let call = browser.expect_call("deleteBuffers");
    assert_eq!(
        call.arguments,
        vec![Value::Int(2), Value::UInt(4), Value::UInt(5)]
    );
}

#[test]
fn viewport_updates_the_snapshot() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let mut context = proxy.current_context(surface);

    context.viewport(10, 20, 300, 200);
    assert_eq!(context.get_integerv(gl::VIEWPORT), vec![10, 20, 300, 200]);
}

#[test]
fn uncached_queries_go_to_the_renderer() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let served = browser.serve(|call| match call.function_name() {
        "getIntegerv" => json!(8),
        "getParameter" => json!(1.5),
        _ => json!(null),
    });
    let context = proxy.current_context(surface);

    assert_eq!(context.get_integerv(gl::STENCIL_TEST + 1), vec![8]);
    assert_eq!(context.get_floatv(0x0B21), 1.5);

    let mut browser = served.stop();
    assert!(browser.next_call(Duration::from_millis(50)).is_none());
}
