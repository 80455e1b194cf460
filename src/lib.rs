#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use yard_core::{
    Camera, CameraPose, ConfigurationError, InputRouter, MarkerStore, OrbitController, Viewport,
    YardConfig,
};

mod dom;
mod events;
mod input;

use events::{LayoutCallbacks, LayoutOutbox, Session, ViewportWiring};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("yard-web starting");
    Ok(())
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Orbit camera and marker placement bound to one `<canvas>`.
///
/// The page's render loop calls `tick()` once per frame and then reads the
/// camera matrices and `markers_json()`.
#[wasm_bindgen]
pub struct YardViewport {
    session: Rc<RefCell<Session>>,
    outbox: LayoutOutbox,
    callbacks: LayoutCallbacks,
}

#[wasm_bindgen]
impl YardViewport {
    /// Bind to the canvas with id `canvas_id`. `config_json` may override any
    /// orbit or placement parameter.
    pub fn attach(canvas_id: &str, config_json: Option<String>) -> Result<YardViewport, JsValue> {
        attach_viewport(canvas_id, config_json.as_deref()).map_err(|e| {
            log::error!("[viewport] attach failed: {:?}", e);
            to_js(e)
        })
    }

    /// Fold this frame's input into the camera pose. Returns whether input was consumed.
    pub fn tick(&self) -> bool {
        self.session.borrow_mut().router.tick()
    }

    pub fn camera_position(&self) -> Vec<f32> {
        self.pose().position.to_array().to_vec()
    }

    pub fn camera_target(&self) -> Vec<f32> {
        self.pose().target.to_array().to_vec()
    }

    /// Column-major 4x4.
    pub fn view_matrix(&self) -> Vec<f32> {
        let s = self.session.borrow();
        s.router.controller().camera().view_matrix().to_cols_array().to_vec()
    }

    /// Column-major 4x4.
    pub fn projection_matrix(&self) -> Vec<f32> {
        let s = self.session.borrow();
        s.router
            .controller()
            .camera()
            .projection_matrix()
            .to_cols_array()
            .to_vec()
    }

    /// Select `"sprinkler"`, `"electrical"`, `"gas"`, or nothing.
    pub fn set_placement(&self, kind: Option<String>) -> Result<(), JsValue> {
        let kind = input::parse_placement(kind.as_deref()).map_err(to_js)?;
        self.session.borrow_mut().router.set_placement(kind);
        events::deliver_layout_events(&self.outbox, &self.callbacks);
        Ok(())
    }

    pub fn placement(&self) -> Option<String> {
        let s = self.session.borrow();
        s.router.placement().map(|k| k.as_str().to_string())
    }

    /// `[{type, x, z}, ...]` in placement order.
    pub fn markers_json(&self) -> Result<String, JsValue> {
        self.session.borrow().markers.to_json().map_err(to_js)
    }

    pub fn marker_count(&self) -> usize {
        self.session.borrow().markers.len()
    }

    /// Replace the markers with a saved layout. Returns how many were loaded.
    pub fn load_markers_json(&self, json: &str) -> Result<usize, JsValue> {
        let loaded = self
            .session
            .borrow_mut()
            .markers
            .load_json(json)
            .map_err(to_js)?;
        log::info!("[viewport] loaded {} markers", loaded);
        Ok(loaded)
    }

    pub fn clear_markers(&self) {
        self.session.borrow_mut().markers.clear();
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.session
            .borrow_mut()
            .router
            .controller_mut()
            .set_enabled(enabled);
    }

    /// Register `callback(message: string)` for layout events.
    pub fn on_layout_event(&self, callback: js_sys::Function) {
        self.callbacks.borrow_mut().push(callback);
    }

    /// Detach every DOM listener. Calling it again does nothing.
    pub fn dispose(&self) {
        self.session.borrow_mut().router.controller_mut().dispose();
        self.callbacks.borrow_mut().clear();
    }
}

impl YardViewport {
    fn pose(&self) -> CameraPose {
        self.session.borrow().router.controller().pose()
    }
}

fn attach_viewport(canvas_id: &str, config_json: Option<&str>) -> anyhow::Result<YardViewport> {
    let config = match config_json {
        Some(json) => YardConfig::from_json(json)?,
        None => YardConfig::default(),
    };
    let document = dom::window_document().ok_or(ConfigurationError::MissingViewport)?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    let size = dom::canvas_css_size(&canvas);
    let viewport = Viewport::new(size.x, size.y)?;

    let controller = OrbitController::builder()
        .camera(Camera::new(CameraPose::default(), viewport.aspect()))
        .viewport(viewport)
        .params(config.orbit)
        .build()?;
    let mut router = InputRouter::new(controller, config.placement)?;

    let outbox: LayoutOutbox = Rc::new(RefCell::new(Vec::new()));
    {
        let outbox = outbox.clone();
        router.subscribe(move |event| outbox.borrow_mut().push(*event));
    }

    let session = Rc::new(RefCell::new(Session {
        router,
        markers: MarkerStore::new(),
    }));
    let callbacks: LayoutCallbacks = Rc::new(RefCell::new(Vec::new()));

    let revokers = events::wire_viewport_handlers(&ViewportWiring {
        canvas,
        session: Rc::downgrade(&session),
        outbox: outbox.clone(),
        callbacks: callbacks.clone(),
    })?;
    {
        let mut s = session.borrow_mut();
        let controller = s.router.controller_mut();
        for revoke in revokers {
            controller.register_subscription(revoke);
        }
    }
    log::info!("[viewport] attached to #{}", canvas_id);

    Ok(YardViewport {
        session,
        outbox,
        callbacks,
    })
}
