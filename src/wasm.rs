//! Browser bindings.
//!
//! The page owns the file picker and the markup; it forwards the selected
//! file's `type` and bytes here and re-renders from the getters afterwards.

use js_sys::{Array, Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::classifier::Classification;
use crate::config::{ClassifierConfig, SmallImagePolicy};
use crate::swatches::Swatch;
use crate::widget::{AdvisorWidget, Completion, UploadTicket};
use crate::{Error, analyze_bytes};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialised when the module is instantiated twice.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn js_error(err: Error) -> JsValue {
    JsValue::from_str(&err.user_message())
}

fn swatches_to_js(swatches: &[Swatch]) -> Result<Array, JsValue> {
    let out = Array::new();
    for swatch in swatches {
        let entry = Object::new();
        Reflect::set(&entry, &JsValue::from_str("name"), &JsValue::from_str(swatch.name))?;
        Reflect::set(&entry, &JsValue::from_str("hex"), &JsValue::from_str(&swatch.hex()))?;
        out.push(&entry);
    }
    Ok(out)
}

fn classification_to_js(result: &Classification) -> Result<Object, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &JsValue::from_str("label"), &JsValue::from_str(result.label.as_str()))?;
    Reflect::set(&obj, &JsValue::from_str("title"), &JsValue::from_str(result.title))?;
    Reflect::set(&obj, &JsValue::from_str("warmth"), &JsValue::from_f64(result.warmth))?;
    Reflect::set(
        &obj,
        &JsValue::from_str("average"),
        &JsValue::from_str(&result.average.to_hex()),
    )?;
    Reflect::set(&obj, &JsValue::from_str("colors"), &swatches_to_js(result.palette)?)?;
    Ok(obj)
}

/// Stateless one-shot analysis: `{ label, title, warmth, average, colors }`.
#[wasm_bindgen]
pub fn analyze(media_type: &str, input: Vec<u8>) -> Result<Object, JsValue> {
    let result = analyze_bytes(media_type, input, &ClassifierConfig::default()).map_err(js_error)?;
    classification_to_js(&result)
}

/// Stateful widget backing the upload control.
#[wasm_bindgen]
pub struct SkinToneAnalyzer {
    inner: AdvisorWidget,
}

#[wasm_bindgen]
impl SkinToneAnalyzer {
    #[wasm_bindgen(constructor)]
    pub fn new(
        sample_size: Option<u32>,
        threshold: Option<f64>,
        reject_small: Option<bool>,
    ) -> Result<SkinToneAnalyzer, JsValue> {
        let defaults = ClassifierConfig::default();
        let config = ClassifierConfig {
            sample_size: sample_size.unwrap_or(defaults.sample_size),
            warmth_threshold: threshold.unwrap_or(defaults.warmth_threshold),
            small_image_policy: if reject_small.unwrap_or(false) {
                SmallImagePolicy::Reject
            } else {
                SmallImagePolicy::Clamp
            },
        };
        let inner = AdvisorWidget::new(config).map_err(js_error)?;
        Ok(Self { inner })
    }

    /// Returns a ticket for `completeUpload`; throws the user message for non-images.
    #[wasm_bindgen(js_name = beginUpload)]
    pub fn begin_upload(&mut self, media_type: &str) -> Result<f64, JsValue> {
        let ticket = self.inner.begin_upload(media_type).map_err(js_error)?;
        Ok(ticket.id() as f64)
    }

    /// `false` when a newer upload made this one irrelevant.
    #[wasm_bindgen(js_name = completeUpload)]
    pub fn complete_upload(&mut self, ticket: f64, bytes: Vec<u8>) -> Result<bool, JsValue> {
        let ticket = UploadTicket::from_id(ticket as u64);
        match self.inner.complete_upload(ticket, bytes).map_err(js_error)? {
            Completion::Applied => Ok(true),
            Completion::Superseded => Ok(false),
        }
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn loading(&self) -> bool {
        self.inner.state().loading
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.inner.state().error.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn label(&self) -> Option<String> {
        self.inner
            .state()
            .result
            .as_ref()
            .map(|r| r.label.as_str().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn title(&self) -> Option<String> {
        self.inner.state().result.as_ref().map(|r| r.title.to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn warmth(&self) -> Option<f64> {
        self.inner.state().result.as_ref().map(|r| r.warmth)
    }

    /// Suggested colors as `[{ name, hex }]`; empty before the first result.
    pub fn swatches(&self) -> Result<Array, JsValue> {
        match &self.inner.state().result {
            Some(result) => swatches_to_js(result.palette),
            None => Ok(Array::new()),
        }
    }

    #[wasm_bindgen(js_name = previewBytes)]
    pub fn preview_bytes(&self) -> Option<Uint8Array> {
        self.inner
            .state()
            .preview
            .as_ref()
            .map(|p| Uint8Array::from(&p.bytes[..]))
    }

    #[wasm_bindgen(js_name = previewMediaType)]
    pub fn preview_media_type(&self) -> Option<String> {
        self.inner
            .state()
            .preview
            .as_ref()
            .map(|p| p.media_type.clone())
    }
}
