//! WASM bindings for txml-core.
//!
//! Exposes JSON-text ⇄ typed-XML-text conversion as `#[wasm_bindgen]`
//! functions callable from JavaScript/TypeScript. Strings crossing the
//! boundary are UTF-8, so output is always UTF-8 as well.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p txml-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/txml-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/txml_wasm.wasm
//! ```

use txml_core::{EncodeOptions, Value};
use wasm_bindgen::prelude::*;

/// Encode a JSON string as a typed XML document.
///
/// `pretty` selects indented output with an XML declaration; otherwise the
/// document is a single line without one. Throws a JS error if the input is
/// not valid JSON.
#[wasm_bindgen]
pub fn encode(json: &str, pretty: bool) -> std::result::Result<String, JsValue> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let options = if pretty {
        EncodeOptions::default()
    } else {
        EncodeOptions::compact()
    };
    Ok(txml_core::encode_to_string(&value, &options))
}

/// Decode a typed XML document into compact JSON.
///
/// Throws a JS error describing the offending node if the document is not
/// valid typed XML.
#[wasm_bindgen]
pub fn decode(xml: &str) -> std::result::Result<String, JsValue> {
    let value = txml_core::decode_from_str(xml).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&value).map_err(|e| JsValue::from_str(&e.to_string()))
}
