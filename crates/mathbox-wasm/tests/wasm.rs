use js_sys::{Map, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

use mathbox_wasm::{MathboxOptions, Renderer};

fn options(entries: &[(&str, JsValue)]) -> MathboxOptions {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value).unwrap();
    }
    object.unchecked_into()
}

#[wasm_bindgen_test]
fn render_with_default_options() {
    let renderer = Renderer::new(&options(&[])).unwrap();
    let dump = renderer.render("x", false).unwrap().as_string().unwrap();
    assert!(dump.starts_with("row mord"), "{dump}");
    assert_eq!(renderer.render("", true).unwrap().as_string().unwrap(), "");
}

#[wasm_bindgen_test]
fn errors_have_utf16_offsets() {
    let renderer = Renderer::new(&options(&[])).unwrap();
    let error = renderer.render(r"αβ\foo", false).unwrap_err();
    assert_eq!(error.start, 2);
    assert_eq!(error.end, 6);
}

#[wasm_bindgen_test]
fn invalid_options() {
    let letter_shape = options(&[("letterShapeStyle", JsValue::from_str("gothic"))]);
    assert!(Renderer::new(&letter_shape).is_err());
    let font_size = options(&[("fontSize", JsValue::from(11))]);
    assert!(Renderer::new(&font_size).is_err());
}

#[wasm_bindgen_test]
fn register_overrides() {
    let registers = Map::new();
    registers.set(&JsValue::from_str("thinmuskip"), &JsValue::from_str("6mu"));
    let renderer = Renderer::new(&options(&[("registers", registers.into())])).unwrap();
    let dump = renderer.render(r"\sin x", false).unwrap().as_string().unwrap();
    assert!(dump.contains("kern w=0.333"), "{dump}");
}

#[wasm_bindgen_test]
fn snapshot_round_trip() {
    let renderer = Renderer::new(&options(&[])).unwrap();
    let json = renderer.snapshot(r"\sum_{k=1}^n k").unwrap().as_string().unwrap();
    let from_json = renderer.render_snapshot(&json, true).unwrap();
    let from_markup = renderer.render(r"\sum_{k=1}^n k", true).unwrap();
    assert_eq!(from_json.as_string(), from_markup.as_string());
    assert_eq!(
        renderer.normalize(r"\sum _{ k }").unwrap().as_string().unwrap(),
        r"\sum_k"
    );
}
