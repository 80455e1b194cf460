//! Routes raw viewport events to the orbit controller and, for taps while a
//! placement type is selected, to ground picking and the marker store.

use crate::error::{finite_point, ConfigurationError};
use crate::markers::{Marker, MarkerKind, MarkerStore};
use crate::observers::{LayoutEvent, LayoutObservers, ObserverId};
use crate::orbit::{OrbitController, PointerButton};
use crate::params::PlacementParams;
use crate::picking::{pick, Plane};
use glam::Vec2;

/// Platform-neutral viewport input, coordinates in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportEvent {
    PointerDown { button: PointerButton, x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { button: PointerButton, x: f32, y: f32 },
    Wheel { delta_y: f32 },
    Resize { width: f32, height: f32 },
}

/// A primary press that may still turn out to be a tap.
#[derive(Clone, Copy, Debug)]
struct Press {
    start: Vec2,
    left_tap_radius: bool,
}

pub struct InputRouter {
    controller: OrbitController,
    params: PlacementParams,
    ground: Plane,
    placement: Option<MarkerKind>,
    press: Option<Press>,
    observers: LayoutObservers,
}

impl InputRouter {
    pub fn new(
        controller: OrbitController,
        params: PlacementParams,
    ) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self {
            controller,
            ground: Plane::horizontal(params.ground_height),
            params,
            placement: None,
            press: None,
            observers: LayoutObservers::new(),
        })
    }

    /// Apply one event. Returns the marker if this event placed one.
    pub fn handle(&mut self, event: ViewportEvent, store: &mut MarkerStore) -> Option<Marker> {
        match event {
            ViewportEvent::PointerDown { button, x, y } => {
                if button == PointerButton::Primary {
                    self.press = finite_point("pointer-down", x, y).ok().map(|start| Press {
                        start,
                        left_tap_radius: false,
                    });
                }
                self.controller.on_pointer_down(button, x, y);
                None
            }
            ViewportEvent::PointerMove { x, y } => {
                if !self.holds_for_tap(x, y) {
                    self.controller.on_pointer_move(x, y);
                }
                None
            }
            ViewportEvent::PointerUp { button, x, y } => {
                self.controller.on_pointer_up();
                let press = self.press.take()?;
                if button != PointerButton::Primary || !self.is_tap(press.start, x, y) {
                    return None;
                }
                self.place(x, y, store)
            }
            ViewportEvent::Wheel { delta_y } => {
                self.controller.on_wheel(delta_y);
                None
            }
            ViewportEvent::Resize { width, height } => {
                self.controller.set_viewport_size(width, height);
                None
            }
        }
    }

    /// While a marker type is selected, moves inside the tap radius are held
    /// back from the controller so a placement click leaves the camera still.
    /// Once the press leaves the radius the controller sees the full travel,
    /// because its last pointer is still the press start.
    fn holds_for_tap(&mut self, x: f32, y: f32) -> bool {
        if self.placement.is_none() {
            return false;
        }
        let threshold = self.params.click_threshold_px;
        let Some(press) = self.press.as_mut() else {
            return false;
        };
        if press.left_tap_radius {
            return false;
        }
        match finite_point("pointer-move", x, y) {
            Ok(pos) if pos.distance(press.start) <= threshold => true,
            Ok(_) => {
                press.left_tap_radius = true;
                false
            }
            Err(_) => false,
        }
    }

    fn is_tap(&self, start: Vec2, x: f32, y: f32) -> bool {
        match finite_point("pointer-up", x, y) {
            Ok(end) => end.distance(start) <= self.params.click_threshold_px,
            Err(e) => {
                log::warn!("[place] ignoring event: {}", e);
                false
            }
        }
    }

    fn place(&mut self, x: f32, y: f32, store: &mut MarkerStore) -> Option<Marker> {
        let kind = self.placement?;
        let viewport = self.controller.viewport();
        let Some(hit) = pick(
            x,
            y,
            viewport.width,
            viewport.height,
            self.controller.camera(),
            &self.ground,
        ) else {
            log::debug!("[pick] no ground hit at ({:.1}, {:.1})", x, y);
            return None;
        };
        if let Some(extent) = self.params.ground_half_extent {
            if hit.x.abs() > extent || hit.z.abs() > extent {
                log::debug!("[pick] hit ({:.2}, {:.2}) is off the yard", hit.x, hit.z);
                return None;
            }
        }

        let marker = Marker::new(kind, Vec2::new(hit.x, hit.z));
        let index = store.append(marker);
        log::info!(
            "[place] {} marker #{} at ({:.2}, {:.2})",
            kind,
            index,
            hit.x,
            hit.z
        );
        self.observers
            .notify(&LayoutEvent::MarkerPlaced { index, marker });
        Some(marker)
    }

    pub fn set_placement(&mut self, kind: Option<MarkerKind>) {
        if self.placement == kind {
            return;
        }
        self.placement = kind;
        self.observers.notify(&LayoutEvent::PlacementChanged(kind));
    }

    pub fn placement(&self) -> Option<MarkerKind> {
        self.placement
    }

    /// Once per render tick.
    pub fn tick(&mut self) -> bool {
        self.controller.update()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&LayoutEvent) + 'static) -> ObserverId {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn controller(&self) -> &OrbitController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut OrbitController {
        &mut self.controller
    }

    pub fn params(&self) -> &PlacementParams {
        &self.params
    }

    pub fn ground(&self) -> &Plane {
        &self.ground
    }
}
