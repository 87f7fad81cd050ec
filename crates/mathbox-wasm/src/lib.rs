extern crate alloc;

#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

// SAFETY: This application is single threaded, so using AssumeSingleThreaded is allowed.
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

use js_sys::{Array, Map};
use mathbox::{
    AtomIdMode, LetterShapeStyle, MarkupError as CoreMarkupError, MathDisplay, MathboxConfig,
    SerializeOptions,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Debug)]
pub struct ConfigParseError {
    message: String,
}

#[wasm_bindgen]
impl ConfigParseError {
    #[wasm_bindgen(getter, unchecked_return_type = "string")]
    pub fn message(&self) -> JsValue {
        JsValue::from_str(&self.message)
    }
}

fn config_error(message: impl Into<String>) -> ConfigParseError {
    ConfigParseError {
        message: message.into(),
    }
}

#[wasm_bindgen(getter_with_clone)]
#[derive(Debug)]
pub struct MarkupError {
    message: JsValue,
    pub start: u32,
    pub end: u32,
    report: Option<JsValue>,
}

#[wasm_bindgen]
impl MarkupError {
    #[wasm_bindgen(getter, unchecked_return_type = "string")]
    pub fn message(&self) -> JsValue {
        self.message.clone()
    }

    #[wasm_bindgen(getter, unchecked_return_type = "string | undefined")]
    pub fn report(&self) -> Option<JsValue> {
        self.report.clone()
    }
}

#[cfg(feature = "ariadne")]
fn error_report(error: &CoreMarkupError, input: &str) -> Option<JsValue> {
    let report = error.to_report("input", false);
    let mut buf = Vec::new();
    report
        .write(("input", ariadne::Source::from(input)), &mut buf)
        .ok()?;
    String::from_utf8(buf)
        .ok()
        .map(|report| JsValue::from_str(&report))
}

#[cfg(not(feature = "ariadne"))]
fn error_report(_error: &CoreMarkupError, _input: &str) -> Option<JsValue> {
    None
}

fn markup_error(e: &CoreMarkupError, input: &str) -> MarkupError {
    // Convert the byte offsets to UTF-16 code unit offsets for JavaScript.
    let start = byte_offset_to_utf16_offset(input, e.0.start) as u32;
    let end = byte_offset_to_utf16_offset(input, e.0.end) as u32;
    MarkupError {
        message: JsValue::from_str(&e.error_message()),
        start,
        end,
        report: error_report(e, input),
    }
}

#[wasm_bindgen(typescript_custom_section)]
const MATHBOX_OPTIONS: &'static str = r#"
interface MathboxOptions {
    fontSize?: number;
    letterShapeStyle?: "tex" | "iso" | "french" | "upright";
    registers?: Map<string, string>;
    atomIds?: "off" | "counter" | "random";
    smallOperators?: string[];
    skipStyles?: boolean;
}
"#;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "MathboxOptions")]
    pub type MathboxOptions;

    #[wasm_bindgen(method, getter)]
    fn fontSize(this: &MathboxOptions) -> Option<u8>;

    #[wasm_bindgen(method, getter)]
    fn letterShapeStyle(this: &MathboxOptions) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn registers(this: &MathboxOptions) -> Option<Map>;

    #[wasm_bindgen(method, getter)]
    fn atomIds(this: &MathboxOptions) -> Option<String>;

    #[wasm_bindgen(method, getter)]
    fn smallOperators(this: &MathboxOptions) -> Option<Array>;

    #[wasm_bindgen(method, getter)]
    fn skipStyles(this: &MathboxOptions) -> Option<bool>;
}

/// Read a `Map<string, string>` into a list of pairs.
fn string_pairs(map: &Map) -> Option<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(map.size() as usize);
    let entries = map.entries();
    loop {
        let entry = entries.next().ok()?;
        if entry.done() {
            return Some(pairs);
        }
        let pair = entry.value().dyn_into::<Array>().ok()?;
        pairs.push((pair.get(0).as_string()?, pair.get(1).as_string()?));
    }
}

#[wasm_bindgen]
pub struct Renderer {
    inner: mathbox::Renderer,
    skip_styles: bool,
}

#[wasm_bindgen]
impl Renderer {
    #[wasm_bindgen(constructor)]
    pub fn new(js_config: &MathboxOptions) -> Result<Self, JsValue> {
        let defaults = MathboxConfig::default();
        // This is the poor man's `serde_wasm_bindgen::from_value`.
        let registers = match js_config.registers() {
            Some(map) => string_pairs(&map).ok_or_else(|| config_error("Invalid registers map"))?,
            None => defaults.registers,
        };
        let letter_shape_style = match js_config.letterShapeStyle() {
            Some(name) => name
                .parse::<LetterShapeStyle>()
                .map_err(|_| config_error("Invalid value for letterShapeStyle"))?,
            None => defaults.letter_shape_style,
        };
        let atom_ids = match js_config.atomIds().as_deref() {
            Some("off") | None => AtomIdMode::Off,
            Some("counter") => AtomIdMode::Counter,
            Some("random") => AtomIdMode::Random,
            Some(_) => return Err(config_error("Invalid value for atomIds").into()),
        };
        let small_operators = match js_config.smallOperators() {
            Some(array) => array
                .iter()
                .map(|value| value.as_string())
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| config_error("Invalid smallOperators list"))?,
            None => defaults.small_operators,
        };
        let config = MathboxConfig {
            font_size: js_config.fontSize().unwrap_or(defaults.font_size),
            letter_shape_style,
            registers,
            atom_ids,
            small_operators,
        };
        let inner = mathbox::Renderer::new(config).map_err(|e| config_error(e.to_string()))?;
        Ok(Renderer {
            inner,
            skip_styles: js_config.skipStyles().unwrap_or_default(),
        })
    }

    /// Render markup and return the dump of the box tree, or an empty string if the formula
    /// renders to nothing.
    #[wasm_bindgen(unchecked_return_type = "string")]
    pub fn render(&self, content: &str, displaystyle: bool) -> Result<JsValue, MarkupError> {
        let display = if displaystyle {
            MathDisplay::Block
        } else {
            MathDisplay::Inline
        };
        match self.inner.render(content, display) {
            Ok(Some(b)) => Ok(JsValue::from_str(b.dump().trim_start())),
            Ok(None) => Ok(JsValue::from_str("")),
            Err(e) => Err(markup_error(&e, content)),
        }
    }

    /// Parse markup and write it back in canonical form.
    #[wasm_bindgen(unchecked_return_type = "string")]
    pub fn normalize(&self, content: &str) -> Result<JsValue, MarkupError> {
        let atoms = self
            .inner
            .parse(content)
            .map_err(|e| markup_error(&e, content))?;
        let options = SerializeOptions {
            skip_styles: self.skip_styles,
        };
        Ok(JsValue::from_str(&mathbox::serialize_list(&atoms, options)))
    }

    /// Parse markup into a JSON snapshot of its atoms.
    #[wasm_bindgen(unchecked_return_type = "string")]
    pub fn snapshot(&self, content: &str) -> Result<JsValue, JsValue> {
        let atoms = self
            .inner
            .parse(content)
            .map_err(|e| JsValue::from(markup_error(&e, content)))?;
        mathbox::to_json_string(&atoms)
            .map(|json| JsValue::from_str(&json))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render a JSON snapshot of atoms and return the dump of the box tree.
    #[wasm_bindgen(unchecked_return_type = "string")]
    pub fn render_snapshot(&self, json: &str, displaystyle: bool) -> Result<JsValue, JsValue> {
        let display = if displaystyle {
            MathDisplay::Block
        } else {
            MathDisplay::Inline
        };
        let atoms = mathbox::from_json_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let dump = self
            .inner
            .render_atoms(&atoms, display)
            .map(|b| b.dump())
            .unwrap_or_default();
        Ok(JsValue::from_str(dump.trim_start()))
    }
}

/// Converts a byte offset in a UTF-8 string to a UTF-16 code unit offset.
/// This is useful for mapping error locations from Rust (which uses UTF-8) to
/// JavaScript (which uses UTF-16).
///
/// If the byte offset is not a valid character boundary, the original byte
/// offset is returned.
fn byte_offset_to_utf16_offset(s: &str, byte_offset: usize) -> usize {
    s.get(..byte_offset)
        .map(|s| s.chars().map(char::len_utf16).sum())
        .unwrap_or(byte_offset)
}

#[cfg(test)]
mod tests {
    use super::byte_offset_to_utf16_offset;

    #[test]
    fn utf16_offsets() {
        assert_eq!(byte_offset_to_utf16_offset(r"\alpha x", 6), 6);
        assert_eq!(byte_offset_to_utf16_offset("αβ x", 4), 2);
        assert_eq!(byte_offset_to_utf16_offset("𝑥^2", 4), 2);
        // Inside a character.
        assert_eq!(byte_offset_to_utf16_offset("αβ", 1), 1);
    }
}
