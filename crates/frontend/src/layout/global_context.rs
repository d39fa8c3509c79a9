use contracts::shared::speckle::{LoadState, PanelEvent, PanelState};
use leptos::prelude::*;

/// Reactive state of the viewer page, provided via context.
///
/// Every viewer event goes through [`ViewerContext::dispatch`]; handlers
/// registered with the JS viewer read the current panel state at call time.
#[derive(Clone, Copy)]
pub struct ViewerContext {
    pub panel: RwSignal<PanelState>,
    pub load: RwSignal<LoadState>,
}

impl ViewerContext {
    pub fn new() -> Self {
        Self {
            panel: RwSignal::new(PanelState::new()),
            load: RwSignal::new(LoadState::default()),
        }
    }

    pub fn dispatch(&self, event: PanelEvent) {
        // Подписчики уведомляются только при реальном изменении состояния
        self.panel.maybe_update(|state| state.dispatch(event));
    }

    /// Object click from the viewer; `raw` is the metadata of the first hit
    pub fn select(&self, raw: Option<serde_json::Value>) {
        match &raw {
            Some(_) => log::debug!("Viewer: object clicked"),
            None => log::debug!("Viewer: click without hit"),
        }
        self.dispatch(PanelEvent::from_hit(raw.as_ref()));
    }

    pub fn report_progress(&self, fraction: f64) {
        self.load.update(|state| state.report(fraction));
    }

    pub fn finish_loading(&self) {
        log::info!("Model loaded");
        self.load.set(LoadState::Ready);
    }

    pub fn fail_loading(&self, message: String) {
        log::error!("Model loading failed: {}", message);
        self.load.set(LoadState::Failed(message));
    }
}

impl Default for ViewerContext {
    fn default() -> Self {
        Self::new()
    }
}
