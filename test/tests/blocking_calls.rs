/// Blocking calls: correlation, concurrency and degradation when the
/// renderer is gone

use std::thread;
use std::time::{Duration, Instant};

use serde_json::json;

use glrelay_server::{Context, ProxyConfig, SurfaceGeometry};
use glrelay_shared::{gl, Value};
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
fn calls_without_a_surface_are_not_sent() {
    init_logging();
    let proxy = TestProxy::start();
    let context = Context::new(proxy.registry().clone());

    let started = Instant::now();
    context.clear(gl::COLOR_BUFFER_BIT);
    assert_eq!(context.get_error(), gl::NO_ERROR);
    assert_eq!(context.get_attrib_location(1, "position"), -1);
    assert!(!context.is_program(1));
    assert!(started.elapsed() < TIMEOUT);

    assert_eq!(proxy.registry().ledger().issued(), 0);
}

#[test]
fn query_returns_the_renderer_answer() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);
    browser.expect_call("makeCurrent");

    thread::scope(|scope| {
        let answer = scope.spawn(|| context.get_uniform_location(7, "u_color"));

        let call = browser.expect_call("getUniformLocation");
        assert_eq!(
            call.arguments,
            vec![Value::UInt(7), Value::String("u_color".to_string())]
        );
        let id = call.correlation_id.expect("blocking call without an id");
        browser.respond(id, json!(3));

        assert_eq!(answer.join().unwrap(), 3);
    });
    assert!(proxy.registry().ledger().is_empty());
}

#[test]
fn null_answer_yields_the_default() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);
    browser.expect_call("makeCurrent");

    thread::scope(|scope| {
        let answer = scope.spawn(|| context.get_programiv(2, gl::LINK_STATUS));
        let call = browser.expect_call("getProgramiv");
        browser.respond(call.correlation_id.unwrap(), json!(null));
        assert_eq!(answer.join().unwrap(), 0);
    });
}

#[test]
fn closing_the_connection_releases_waiters() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);
    browser.expect_call("makeCurrent");

    thread::scope(|scope| {
        let answer = scope.spawn(|| {
            let started = Instant::now();
            (context.get_shaderiv(4, gl::COMPILE_STATUS), started.elapsed())
        });
        browser.expect_call("getShaderiv");
        browser.close();

        let (value, elapsed) = answer.join().unwrap();
        assert_eq!(value, 0);
        assert!(elapsed < TIMEOUT);
    });
    assert!(proxy.registry().ledger().is_empty());

    // later calls are dropped without waiting
    assert_eq!(context.get_string(0x1234), "");
    assert_eq!(proxy.registry().ledger().issued(), 1);
}

#[test]
fn concurrent_queries_are_matched_by_id() {
    init_logging();
    const CALLERS: u32 = 6;

    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);
    browser.expect_call("makeCurrent");

    thread::scope(|scope| {
        let context = &context;
        let callers = (0..CALLERS)
            .map(|program| {
                scope.spawn(move || (program, context.get_programiv(program, gl::LINK_STATUS)))
            })
            .collect::<Vec<_>>();

        let mut calls = (0..CALLERS)
            .map(|_| browser.expect_call("getProgramiv"))
            .collect::<Vec<_>>();
        // answer in the opposite order to arrival
        calls.reverse();
        for call in calls {
            let program = call.arguments[0].get::<u32>().unwrap();
            browser.respond(call.correlation_id.unwrap(), json!(program * 10 + 1));
        }

        for caller in callers {
            let (program, status) = caller.join().unwrap();
            assert_eq!(status, (program * 10 + 1) as i32);
        }
    });
    assert!(proxy.registry().ledger().is_empty());
}

#[test]
fn gen_reports_how_many_names_arrived() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);
    browser.expect_call("makeCurrent");

    thread::scope(|scope| {
        let answer = scope.spawn(|| {
            let mut names = [99; 4];
            let filled = context.gen_textures(&mut names);
            (filled, names)
        });
        let call = browser.expect_call("genTextures");
        assert_eq!(call.arguments, vec![Value::Int(4)]);
        browser.respond(call.correlation_id.unwrap(), json!([11, 12, 13]));

        let (filled, names) = answer.join().unwrap();
        assert_eq!(filled, 3);
        assert_eq!(names, [11, 12, 13, 99]);
    });
}

#[test]
fn shutdown_releases_a_pending_query() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);
    browser.expect_call("makeCurrent");

    thread::scope(|scope| {
        let answer = scope.spawn(|| {
            let started = Instant::now();
            (context.get_error(), started.elapsed())
        });
        browser.expect_call("getError");
        proxy.registry().shutdown();

        let (value, elapsed) = answer.join().unwrap();
        assert_eq!(value, gl::NO_ERROR);
        assert!(elapsed < TIMEOUT);
    });
    assert!(proxy.registry().ledger().is_empty());
    assert!(!proxy.registry().is_surface_connected(surface));

    // nothing is issued once the bridge is gone
    let issued = proxy.registry().ledger().issued();
    assert!(!context.is_texture(1));
    assert_eq!(proxy.registry().ledger().issued(), issued);
}

#[test]
fn shutdown_releases_make_current_waiting_for_defaults() {
    init_logging();
    let proxy = TestProxy::start();
    let browser = proxy.connect_browser();
    let registry = proxy.registry();
    // the browser never reads create_canvas, so no defaults arrive
    let surface = registry
        .create_surface(browser.client(), SurfaceGeometry::new(0, 0, 32, 32), "stalled")
        .unwrap();

    thread::scope(|scope| {
        let current = scope.spawn(|| {
            let mut context = Context::new(registry.clone());
            let started = Instant::now();
            (context.make_current(surface), started.elapsed())
        });
        thread::sleep(Duration::from_millis(50));
        registry.shutdown();

        let (made_current, elapsed) = current.join().unwrap();
        assert!(!made_current);
        assert!(elapsed < TIMEOUT);
    });
}

#[test]
fn string_queries_fit_the_callers_buffer() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let served = browser.serve(|call| match call.function_name() {
        "getShaderInfoLog" | "getProgramInfoLog" => json!("ERROR: 0:1: syntax"),
        "getShaderSource" => json!("void main() {}"),
        _ => json!(null),
    });
    let context = proxy.current_context(surface);

    assert_eq!(context.get_shader_info_log(1, 6), "ERROR");
    assert_eq!(context.get_program_info_log(2, 1), "");
    assert_eq!(context.get_program_info_log(2, 256), "ERROR: 0:1: syntax");
    assert_eq!(context.get_shader_source(1, 5), "void");

    // lengths describe the whole string, whatever the buffer
    assert_eq!(context.get_shaderiv(1, gl::INFO_LOG_LENGTH), 18);
    assert_eq!(context.get_shaderiv(1, gl::SHADER_SOURCE_LENGTH), 14);
    assert!(served.call_names().contains(&"getShaderSource"));
}

#[test]
fn swap_buffers_waits_for_the_acknowledgement() {
    init_logging();
    let proxy = TestProxy::with_config(ProxyConfig {
        swap_timeout: Duration::from_millis(100),
        ..ProxyConfig::default()
    });
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);
    browser.expect_call("makeCurrent");

    thread::scope(|scope| {
        let swapped = scope.spawn(|| context.swap_buffers());
        let call = browser.expect_call("swapBuffers");
        browser.respond(call.correlation_id.unwrap(), json!(null));
        assert!(swapped.join().unwrap());
    });

    // no acknowledgement: gives up after the timeout
    let started = Instant::now();
    assert!(!context.swap_buffers());
    assert!(started.elapsed() >= Duration::from_millis(100));
    browser.expect_call("swapBuffers");
    assert!(proxy.registry().ledger().is_empty());
}
