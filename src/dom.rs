use glam::Vec2;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{} is not a canvas: {:?}", id, e))
}

/// CSS size of the canvas as laid out on the page.
#[inline]
pub fn canvas_css_size(canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

/// Pointer position in canvas CSS pixels.
#[inline]
pub fn mouse_event_local_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    crate::input::pointer_local_px(
        ev.client_x() as f32,
        ev.client_y() as f32,
        rect.left() as f32,
        rect.top() as f32,
    )
}

/// Attach `handler` to `target` and return a revoker that detaches it and
/// frees the closure.
pub fn listen<E>(
    target: &web::EventTarget,
    kind: &'static str,
    handler: impl FnMut(E) + 'static,
) -> anyhow::Result<impl FnOnce()>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", kind, e))?;
    let target = target.clone();
    Ok(move || {
        _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        drop(closure);
    })
}
