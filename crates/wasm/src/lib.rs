#![warn(clippy::pedantic)]

use coursesched_core::Settings;
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};

fn to_js(err: &coursesched_core::Error) -> JsValue {
	JsValue::from_str(&err.to_string())
}

/// Extracted and normalized courses as JSON. A page without the course table
/// gives an empty array.
#[wasm_bindgen]
pub fn from_html(html: &str) -> Result<String, JsValue> {
	coursesched_core::parse_from_str(html, &Settings::default())
		.and_then(|courses| coursesched_core::io::to_json(&courses))
		.map_err(|e| to_js(&e))
}

#[wasm_bindgen]
pub fn normalize(json: &str) -> Result<String, JsValue> {
	coursesched_core::normalize_json(json, &Settings::default()).map_err(|e| to_js(&e))
}

#[wasm_bindgen]
pub fn to_ics(json: &str) -> Result<String, JsValue> {
	coursesched_core::ics_from_json(json, &Settings::default()).map_err(|e| to_js(&e))
}
