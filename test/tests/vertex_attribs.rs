/// Vertex data: buffer-backed attributes are forwarded as pointers, client
/// memory travels with each draw

use glrelay_server::{IndexSource, VertexPointer, VertexSource};
use glrelay_shared::{gl, Value};
use glrelay_test::TestProxy;

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

fn floats(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|value| value.to_le_bytes()).collect()
}

#[test]
fn buffer_backed_pointer_is_forwarded() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let mut context = proxy.current_context(surface);

    context.bind_buffer(gl::ARRAY_BUFFER, 3);
    context.vertex_attrib_pointer(0, 3, gl::FLOAT, false, 12, VertexPointer::Offset(16));
    context.enable_vertex_attrib_array(0);
    context.draw_arrays(gl::TRIANGLES, 0, 3);

    assert_eq!(
        context.state().vertex_attrib(0).and_then(|a| a.source.clone()),
        Some(VertexSource::Buffer {
            buffer: 3,
            offset: 16
        })
    );

    browser.expect_call("makeCurrent");
    browser.expect_call("bindBuffer");
    let pointer = browser.expect_call("vertexAttribPointer");
    assert_eq!(
        pointer.arguments,
        vec![
            Value::UInt(0),
            Value::Int(3),
            Value::UInt(gl::FLOAT),
            Value::Bool(false),
            Value::Int(12),
            Value::UInt(16),
        ]
    );
    browser.expect_call("enableVertexAttribArray");
    let draw = browser.expect_call("drawArrays");
    assert_eq!(
        draw.arguments,
        vec![
            Value::UInt(gl::TRIANGLES),
            Value::Int(0),
            Value::Int(3),
            Value::Int(0),
        ]
    );
}

#[test]
fn client_side_data_travels_with_the_draw() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let mut context = proxy.current_context(surface);

    let positions = floats(&[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 9.0, 9.0]);
    let colors = floats(&[1.0; 12]);
    context.vertex_attrib_pointer(1, 2, gl::FLOAT, false, 0, VertexPointer::Client(&positions));
    context.vertex_attrib_pointer(2, 4, gl::FLOAT, true, 0, VertexPointer::Client(&colors));
    context.enable_vertex_attrib_array(1);
    context.draw_arrays(gl::TRIANGLES, 0, 3);

    browser.expect_call("makeCurrent");
    // only the enable is sent before the draw
    browser.expect_call("enableVertexAttribArray");
    let draw = browser.expect_call("drawArrays");
    assert_eq!(
        draw.arguments,
        vec![
            Value::UInt(gl::TRIANGLES),
            Value::Int(0),
            Value::Int(3),
            Value::Int(1),
            Value::UInt(1),
            Value::Int(2),
            Value::Int(gl::FLOAT as i32),
            Value::Int(0),
            Value::Int(0),
            Value::Bytes(positions[..24].to_vec()),
        ]
    );
}

#[test]
fn client_indices_are_embedded() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let context = proxy.current_context(surface);

    let indices: Vec<u8> = [0u16, 1, 2]
        .iter()
        .flat_map(|index| index.to_le_bytes())
        .collect();
    context.draw_elements(
        gl::TRIANGLES,
        3,
        gl::UNSIGNED_SHORT,
        IndexSource::Client(&indices),
    );

    browser.expect_call("makeCurrent");
    let draw = browser.expect_call("drawElements");
    assert_eq!(
        draw.arguments,
        vec![
            Value::UInt(gl::TRIANGLES),
            Value::Int(3),
            Value::UInt(gl::UNSIGNED_SHORT),
            Value::Int(0),
            Value::Int(0),
            Value::Bytes(indices),
        ]
    );
}

#[test]
fn bound_element_buffer_takes_an_offset() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let mut context = proxy.current_context(surface);

    context.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, 8);
    context.draw_elements(
        gl::TRIANGLES,
        6,
        gl::UNSIGNED_SHORT,
        IndexSource::Offset(12),
    );

    browser.expect_call("makeCurrent");
    browser.expect_call("bindBuffer");
    let draw = browser.expect_call("drawElements");
    assert_eq!(
        &draw.arguments[3..],
        &[Value::Int(0), Value::Int(1), Value::UInt(12)]
    );
}

#[test]
fn large_draws_are_chunked_and_reassembled() {
    init_logging();
    let proxy = TestProxy::start();
    let mut browser = proxy.connect_browser();
    let surface = proxy.open_canvas(&mut browser);
    let mut context = proxy.current_context(surface);

    let data = (0..5000u32).map(|i| (i % 251) as u8).collect::<Vec<_>>();
    context.buffer_data(gl::ARRAY_BUFFER, data.len() as i32, Some(&data), gl::STATIC_DRAW);

    browser.expect_call("makeCurrent");
    let call = browser.expect_call("bufferData");
    assert!(call.arguments.contains(&Value::Bytes(data)));
}
