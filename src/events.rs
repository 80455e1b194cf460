use crate::dom;
use crate::input;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsValue;
use web_sys as web;
use yard_core::{InputRouter, LayoutEvent, MarkerStore, PointerButton, ViewportEvent};

/// Everything the DOM handlers mutate. Owned by the exported viewport handle;
/// handlers only hold weak references so dropping the handle frees it.
pub struct Session {
    pub router: InputRouter,
    pub markers: MarkerStore,
}

/// Layout events produced while the session is borrowed, delivered afterwards.
pub type LayoutOutbox = Rc<RefCell<Vec<LayoutEvent>>>;
pub type LayoutCallbacks = Rc<RefCell<Vec<js_sys::Function>>>;

#[derive(Clone)]
pub struct ViewportWiring {
    pub canvas: web::HtmlCanvasElement,
    pub session: Weak<RefCell<Session>>,
    pub outbox: LayoutOutbox,
    pub callbacks: LayoutCallbacks,
}

type Revoker = Box<dyn FnOnce()>;

/// Attach every viewport listener. The returned revokers detach them again.
pub fn wire_viewport_handlers(w: &ViewportWiring) -> anyhow::Result<Vec<Revoker>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let canvas_target: &web::EventTarget = w.canvas.as_ref();
    let window_target: &web::EventTarget = window.as_ref();

    let mut revokers: Vec<Revoker> = Vec::new();
    revokers.push(Box::new(wire_pointerdown(w, canvas_target)?));
    // move/up come from the window so a drag keeps working outside the canvas
    revokers.push(Box::new(wire_pointermove(w, window_target)?));
    revokers.push(Box::new(wire_pointerup(w, window_target)?));
    revokers.push(Box::new(wire_wheel(w, canvas_target)?));
    revokers.push(Box::new(wire_contextmenu(canvas_target)?));
    revokers.push(Box::new(wire_resize(w, window_target)?));
    log::info!("[viewport] wired {} listeners", revokers.len());
    Ok(revokers)
}

fn wire_pointerdown(
    w: &ViewportWiring,
    target: &web::EventTarget,
) -> anyhow::Result<impl FnOnce()> {
    let w = w.clone();
    dom::listen(target, "pointerdown", move |ev: web::PointerEvent| {
        let pos = dom::mouse_event_local_px(&ev, &w.canvas);
        let button = PointerButton::from_dom(ev.button());
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
        dispatch(
            &w,
            ViewportEvent::PointerDown {
                button,
                x: pos.x,
                y: pos.y,
            },
        );
    })
}

fn wire_pointermove(
    w: &ViewportWiring,
    target: &web::EventTarget,
) -> anyhow::Result<impl FnOnce()> {
    let w = w.clone();
    dom::listen(target, "pointermove", move |ev: web::PointerEvent| {
        if !w.canvas.is_connected() {
            return;
        }
        let pos = dom::mouse_event_local_px(&ev, &w.canvas);
        dispatch(&w, ViewportEvent::PointerMove { x: pos.x, y: pos.y });
    })
}

fn wire_pointerup(
    w: &ViewportWiring,
    target: &web::EventTarget,
) -> anyhow::Result<impl FnOnce()> {
    let w = w.clone();
    dom::listen(target, "pointerup", move |ev: web::PointerEvent| {
        let pos = dom::mouse_event_local_px(&ev, &w.canvas);
        let button = PointerButton::from_dom(ev.button());
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        dispatch(
            &w,
            ViewportEvent::PointerUp {
                button,
                x: pos.x,
                y: pos.y,
            },
        );
    })
}

fn wire_wheel(w: &ViewportWiring, target: &web::EventTarget) -> anyhow::Result<impl FnOnce()> {
    let w = w.clone();
    dom::listen(target, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        dispatch(
            &w,
            ViewportEvent::Wheel {
                delta_y: ev.delta_y() as f32,
            },
        );
    })
}

// Secondary-button drags pan, so the browser menu must stay out of the way.
fn wire_contextmenu(target: &web::EventTarget) -> anyhow::Result<impl FnOnce()> {
    dom::listen(target, "contextmenu", move |ev: web::MouseEvent| {
        ev.prevent_default();
    })
}

fn wire_resize(w: &ViewportWiring, target: &web::EventTarget) -> anyhow::Result<impl FnOnce()> {
    let w = w.clone();
    dom::listen(target, "resize", move |_ev: web::Event| {
        let size = dom::canvas_css_size(&w.canvas);
        dispatch(
            &w,
            ViewportEvent::Resize {
                width: size.x,
                height: size.y,
            },
        );
    })
}

fn dispatch(w: &ViewportWiring, event: ViewportEvent) {
    let Some(session) = w.session.upgrade() else {
        return;
    };
    {
        let Ok(mut s) = session.try_borrow_mut() else {
            log::warn!("[viewport] dropping re-entrant {:?}", event);
            return;
        };
        let Session { router, markers } = &mut *s;
        router.handle(event, markers);
    }
    deliver_layout_events(&w.outbox, &w.callbacks);
}

/// Drain queued layout events into the page callbacks as JSON strings.
pub fn deliver_layout_events(outbox: &LayoutOutbox, callbacks: &LayoutCallbacks) {
    let events = std::mem::take(&mut *outbox.borrow_mut());
    if events.is_empty() {
        return;
    }
    let callbacks = callbacks.borrow().clone();
    for event in &events {
        let message = JsValue::from_str(&input::layout_event_json(event));
        for cb in &callbacks {
            if let Err(e) = cb.call1(&JsValue::NULL, &message) {
                log::error!("[viewport] layout callback failed: {:?}", e);
            }
        }
    }
}
