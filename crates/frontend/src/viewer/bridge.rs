use contracts::shared::config::ViewerConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::layout::global_context::ViewerContext;

/// JS binding к обёртке над внешним вьюером (speckle_bridge.js)
#[wasm_bindgen]
extern "C" {
    /// Creates the viewer in `container`, loads the model and subscribes
    /// `on_progress(fraction)` and `on_click(rawMetadata | null)`.
    /// Resolves once every model resource is loaded.
    #[wasm_bindgen(js_namespace = speckleBridge, js_name = initViewer, catch)]
    async fn init_viewer(
        container: &web_sys::HtmlElement,
        params: JsValue,
        on_progress: &js_sys::Function,
        on_click: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;
}

/// Start the viewer and route its events into `ctx`.
pub async fn start_viewer(
    container: &web_sys::HtmlElement,
    config: &ViewerConfig,
    ctx: ViewerContext,
) -> Result<(), String> {
    let params = serde_wasm_bindgen::to_value(config)
        .map_err(|e| format!("Failed to convert viewer params: {}", e))?;

    let on_progress = Closure::<dyn FnMut(f64)>::new(move |fraction: f64| {
        ctx.report_progress(fraction);
    });
    let on_click = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        ctx.select(raw_metadata(&raw));
    });

    let result = init_viewer(
        container,
        params,
        on_progress.as_ref().unchecked_ref(),
        on_click.as_ref().unchecked_ref(),
    )
    .await;

    // Вьюер держит ссылки на обработчики до закрытия страницы
    on_progress.forget();
    on_click.forget();

    result
        .map(|_| ())
        .map_err(|e| format!("Viewer failed to start: {:?}", e))
}

/// Convert the metadata of a hit node to JSON.
///
/// Goes through `JSON.stringify`, which drops keys whose value is
/// `undefined` but keeps explicit `null`s. `None` means "nothing was hit".
pub fn raw_metadata(raw: &JsValue) -> Option<serde_json::Value> {
    if raw.is_null() || raw.is_undefined() {
        return None;
    }

    let json = match js_sys::JSON::stringify(raw) {
        Ok(s) => s.as_string()?,
        Err(e) => {
            log::warn!("Failed to serialize node metadata: {:?}", e);
            return None;
        }
    };

    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Node metadata is not valid JSON: {}", e);
            None
        }
    }
}
