/// Entry points resolved by name through the function table

use serde_json::json;

use glrelay_server::{Context, FunctionTable, ProxyError};
use glrelay_shared::{gl, Value, ValueKind, REMOTE_FUNCTIONS};
use glrelay_test::TestProxy;

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

#[test]
fn table_covers_every_remote_function() {
    let table = FunctionTable::standard();
    assert_eq!(table.len(), REMOTE_FUNCTIONS.len());
    let callable = table
        .entries()
        .iter()
        .filter(|entry| entry.trampoline.is_some())
        .count();
    // makeCurrent and swapBuffers are driven by the context itself
    assert_eq!(callable, REMOTE_FUNCTIONS.len() - 2);
}

#[test]
fn proc_address_resolves_local_names() {
    init_logging();
    let proxy = TestProxy::start();
    let context = Context::new(proxy.registry().clone());

    assert!(context.get_proc_address("glClear").is_some());
    assert!(context.get_proc_address("glGetFloatv").is_some());
    assert!(context.get_proc_address("glFrobnicate").is_none());
    assert!(context.get_proc_address("swapBuffers").is_none());
}

#[test]
fn invoke_forwards_and_returns_values() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let served = browser.serve(|call| match call.function_name() {
        "genBuffers" => json!([21, 22]),
        "getActiveUniform" => json!({ "rsize": 1, "rtype": 0x8B52, "rname": "u_transform" }),
        _ => json!(null),
    });
    let mut context = proxy.current_context(surface);

    assert_eq!(
        context.invoke(
            "glClearColor",
            vec![Value::Double(0.5), Value::Int(0), Value::Int(0), Value::Int(1)],
        ),
        Ok(Value::Null)
    );
    assert_eq!(
        context.invoke("glGenBuffers", vec![Value::Int(2)]),
        Ok(Value::List(vec![Value::UInt(21), Value::UInt(22)]))
    );

    let info = context
        .invoke(
            "glGetActiveUniform",
            vec![Value::UInt(1), Value::UInt(0), Value::Int(4)],
        )
        .unwrap();
    assert_eq!(
        info.get::<std::collections::BTreeMap<String, Value>>()
            .and_then(|map| map.get("rname").cloned()),
        Some(Value::String("u_t".to_string()))
    );

    context
        .invoke("glEnable", vec![Value::UInt(gl::BLEND)])
        .unwrap();
    assert_eq!(
        context.invoke("glIsEnabled", vec![Value::UInt(gl::BLEND)]),
        Ok(Value::Bool(true))
    );

    assert!(served.call_names().contains(&"clearColor"));
}

#[test]
fn invoke_reports_bad_arguments() {
    init_logging();
    let proxy = TestProxy::start();
    let mut context = Context::new(proxy.registry().clone());

    assert_eq!(
        context.invoke("glClear", vec![Value::String("all".to_string())]),
        Err(ProxyError::BadArgument {
            function: "glClear",
            index: 0,
            expected: "u32",
            found: ValueKind::String,
        })
    );
    assert_eq!(
        context.invoke("glViewport", vec![Value::Int(0), Value::Int(0)]),
        Err(ProxyError::MissingArgument {
            function: "glViewport",
            index: 2,
        })
    );
    assert_eq!(
        context.invoke("glFrobnicate", vec![]),
        Err(ProxyError::UnknownFunction {
            name: "glFrobnicate".to_string()
        })
    );
}
