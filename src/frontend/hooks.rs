use super::frame::TaskSlot;
use super::registry::{RevealAction, RevealRegistry};
use super::{dom, MotionContext};
use crate::config::MotionConfig;
use crate::device::DeviceClass;
use crate::motion::{magnetic_pull, MagneticMotion, Parallax, PointerState};
use crate::navigation::ScrollLock;
use crate::reveal::RevealTrigger;
use crate::scheduler::{FrameScheduler, TaskStatus};
use crate::scroll::{hero_transform, scroll_progress, SmoothScroll};
use gloo_events::{EventListener, EventListenerOptions};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

const LINE_HEIGHT_PX: f64 = 16.0;

fn current_device(breakpoint_px: f64) -> DeviceClass {
    DeviceClass::classify(dom::viewport_size().0, dom::has_touch(), breakpoint_px)
}

/// Device class, re-evaluated on every resize.
#[hook]
pub fn use_device_class(breakpoint_px: f64) -> DeviceClass {
    let device = use_state_eq(move || current_device(breakpoint_px));

    {
        let device = device.clone();
        use_effect_with(breakpoint_px, move |breakpoint_px| {
            let breakpoint_px = *breakpoint_px;
            device.set(current_device(breakpoint_px));
            let listener = window().map(|win| {
                EventListener::new(&win, "resize", move |_| {
                    device.set(current_device(breakpoint_px));
                })
            });
            move || drop(listener)
        });
    }

    use_effect_with(*device, |device| {
        log::info!("device class: {}", device.as_str());
        || ()
    });

    *device
}

/// Body overflow is hidden while `locked` and restored on unmount.
#[hook]
pub fn use_scroll_lock(locked: bool) {
    use_effect_with(locked, |locked| {
        let lock = if *locked {
            dom::body().map(|body| ScrollLock::engage(dom::BodyOverflow(body)))
        } else {
            None
        };
        move || drop(lock)
    });
}

/// Registers `node` for a one-shot reveal when it mounts.
#[hook]
pub fn use_reveal(node: NodeRef, trigger: RevealTrigger, action: RevealAction) {
    let motion = use_context::<MotionContext>();
    use_effect_with((), move |_| {
        let guard = motion.map(|motion| {
            let guard = motion.reveals.register(node, trigger, action);
            motion.reveals.request_sweep(&motion.frames);
            guard
        });
        move || drop(guard)
    });
}

/// Re-checks pending reveals on scroll and resize.
#[hook]
pub fn use_reveal_sweeps(reveals: RevealRegistry, frames: FrameScheduler) {
    use_effect_with((), move |_| {
        reveals.request_sweep(&frames);
        let listeners = window().map(|win| {
            ["scroll", "resize"].map(|kind| {
                let reveals = reveals.clone();
                let frames = frames.clone();
                EventListener::new(&win, kind, move |_| reveals.request_sweep(&frames))
            })
        });
        move || drop(listeners)
    });
}

struct MagneticBinding {
    element: HtmlElement,
    slot: TaskSlot,
    _listeners: [EventListener; 2],
}

impl MagneticBinding {
    fn attach(node: &NodeRef, motion: &MotionContext) -> Option<Self> {
        let element = node.cast::<HtmlElement>()?;
        let config = &motion.config;
        let strength = config.magnetic_strength;
        let state = Rc::new(RefCell::new(MagneticMotion::new(
            config.magnetic_attract_ms,
            config.magnetic_release_ms,
        )));
        let slot = TaskSlot::default();

        let animate = {
            let element = element.clone();
            let state = state.clone();
            let slot = slot.clone();
            let frames = motion.frames.clone();
            Rc::new(move || {
                let element = element.clone();
                let state = state.clone();
                slot.ensure(&frames, move |now| {
                    let (x, y) = state.borrow_mut().sample(now);
                    dom::set_style(&element, "translate", &format!("{x:.2}px {y:.2}px"));
                    if state.borrow().is_animating() {
                        TaskStatus::Continue
                    } else {
                        TaskStatus::Done
                    }
                });
            })
        };

        let on_move = {
            let target = element.clone();
            let state = state.clone();
            let animate = animate.clone();
            EventListener::new(&element, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let pointer = (f64::from(event.client_x()), f64::from(event.client_y()));
                let pull = magnetic_pull(pointer, dom::rect_of(&target), strength);
                state.borrow_mut().attract(pull, dom::now_ms());
                animate();
            })
        };

        let on_leave = EventListener::new(&element, "mouseleave", move |_| {
            state.borrow_mut().release(dom::now_ms());
            animate();
        });

        Some(Self {
            element,
            slot,
            _listeners: [on_move, on_leave],
        })
    }
}

impl Drop for MagneticBinding {
    fn drop(&mut self) {
        self.slot.cancel();
        dom::set_style(&self.element, "translate", "");
    }
}

/// Pulls `node` toward the pointer while hovered and springs it back on
/// leave. Desktop only.
#[hook]
pub fn use_magnetic(node: NodeRef) {
    let motion = use_context::<MotionContext>();
    let enabled = motion
        .as_ref()
        .is_some_and(MotionContext::pointer_effects_enabled);

    use_effect_with(enabled, move |enabled| {
        let binding = match motion {
            Some(motion) if *enabled => MagneticBinding::attach(&node, &motion),
            _ => None,
        };
        move || drop(binding)
    });
}

struct ParallaxBinding {
    node: NodeRef,
    slot: TaskSlot,
    _listener: EventListener,
}

impl ParallaxBinding {
    fn attach(node: NodeRef, motion: &MotionContext) -> Option<Self> {
        let win = window()?;
        let parallax = Rc::new(RefCell::new(Parallax::new(motion.config.parallax_range_px)));
        let slot = TaskSlot::default();

        let listener = {
            let node = node.clone();
            let slot = slot.clone();
            let frames = motion.frames.clone();
            EventListener::new(&win, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let pointer = PointerState::from_client(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    dom::viewport_size(),
                );
                parallax.borrow_mut().aim(pointer);

                let parallax = parallax.clone();
                let node = node.clone();
                let mut last_frame: Option<f64> = None;
                slot.ensure(&frames, move |now| {
                    let dt_s = last_frame.map_or(0.0, |last| (now - last) / 1000.0);
                    last_frame = Some(now);

                    let mut parallax = parallax.borrow_mut();
                    let moving = parallax.step(dt_s);
                    let (x, y) = parallax.offset();
                    dom::style_node(&node, "translate", &format!("{x:.2}px {y:.2}px"));
                    if moving {
                        TaskStatus::Continue
                    } else {
                        TaskStatus::Done
                    }
                });
            })
        };

        Some(Self {
            node,
            slot,
            _listener: listener,
        })
    }
}

impl Drop for ParallaxBinding {
    fn drop(&mut self) {
        self.slot.cancel();
        dom::style_node(&self.node, "translate", "");
    }
}

/// Spring-smoothed counter-movement of `node` against the pointer.
#[hook]
pub fn use_pointer_parallax(node: NodeRef) {
    let motion = use_context::<MotionContext>();
    let enabled = motion
        .as_ref()
        .is_some_and(MotionContext::pointer_effects_enabled);

    use_effect_with(enabled, move |enabled| {
        let binding = match motion {
            Some(motion) if *enabled => ParallaxBinding::attach(node, &motion),
            _ => None,
        };
        move || drop(binding)
    });
}

/// Shrinks and fades `node` as the page scrolls.
#[hook]
pub fn use_hero_scroll(node: NodeRef) {
    let motion = use_context::<MotionContext>();
    let enabled = motion.as_ref().is_some_and(|motion| !motion.reduced_motion);

    use_effect_with(enabled, move |enabled| {
        let listener = if *enabled {
            let apply = move || {
                let progress = scroll_progress(dom::scroll_y(), dom::scroll_limit());
                let (scale, opacity) = hero_transform(progress);
                dom::style_node(&node, "scale", &format!("{scale:.4}"));
                dom::style_node(&node, "opacity", &format!("{opacity:.3}"));
            };
            apply();
            window().map(|win| EventListener::new(&win, "scroll", move |_| apply()))
        } else {
            None
        };
        move || drop(listener)
    });
}

struct ScrollDriver {
    scroll: RefCell<Option<SmoothScroll>>,
    frames: FrameScheduler,
    slot: TaskSlot,
}

/// Handle to the page's smooth scroller; inert while smoothing is off.
#[derive(Clone)]
pub struct ScrollHandle(Rc<ScrollDriver>);

impl PartialEq for ScrollHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl ScrollHandle {
    fn new(frames: FrameScheduler) -> Self {
        Self(Rc::new(ScrollDriver {
            scroll: RefCell::new(None),
            frames,
            slot: TaskSlot::default(),
        }))
    }

    /// Glides to a document offset. Returns `false` when smoothing is off.
    pub fn glide_to(&self, y: f64) -> bool {
        self.drive(|scroll, now| scroll.scroll_to(y, now))
    }

    fn drive(&self, input: impl FnOnce(&mut SmoothScroll, f64)) -> bool {
        {
            let mut slot = self.0.scroll.borrow_mut();
            let Some(scroll) = slot.as_mut().filter(|scroll| !scroll.is_paused()) else {
                return false;
            };
            scroll.set_limit(dom::scroll_limit());
            input(scroll, dom::now_ms());
        }

        let driver = Rc::downgrade(&self.0);
        self.0.slot.ensure(&self.0.frames, move |now| {
            let Some(driver) = driver.upgrade() else {
                return TaskStatus::Done;
            };
            let (position, gliding) = match driver.scroll.borrow_mut().as_mut() {
                Some(scroll) => (scroll.frame(now), scroll.is_gliding()),
                None => (None, false),
            };
            if let Some(y) = position {
                dom::scroll_window_to(y);
            }
            if gliding {
                TaskStatus::Continue
            } else {
                TaskStatus::Done
            }
        });
        true
    }

    /// Holds the page still, e.g. under an open overlay. Paused input is left
    /// to the browser.
    pub fn set_paused(&self, paused: bool) {
        self.with_scroll(|scroll| scroll.set_paused(paused));
        if paused {
            self.0.slot.cancel();
        }
    }

    fn with_scroll(&self, update: impl FnOnce(&mut SmoothScroll)) {
        if let Some(scroll) = self.0.scroll.borrow_mut().as_mut() {
            update(scroll);
        }
    }

    fn attach(&self, scroll: SmoothScroll) {
        *self.0.scroll.borrow_mut() = Some(scroll);
    }

    fn detach(&self) {
        self.0.slot.cancel();
        let scroll = self.0.scroll.borrow_mut().take();
        drop(scroll);
    }
}

fn wheel_delta_px(event: &WheelEvent) -> f64 {
    match event.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => event.delta_y() * LINE_HEIGHT_PX,
        WheelEvent::DOM_DELTA_PAGE => event.delta_y() * dom::viewport_size().1,
        _ => event.delta_y(),
    }
}

fn first_touch_y(event: &TouchEvent) -> Option<f64> {
    event
        .touches()
        .get(0)
        .map(|touch| f64::from(touch.client_y()))
}

fn wire_scroll_input(handle: &ScrollHandle) -> Option<Vec<EventListener>> {
    let win = window()?;
    let last_touch_y = Rc::new(Cell::new(None::<f64>));

    let wheel = {
        let handle = handle.clone();
        EventListener::new_with_options(
            &win,
            "wheel",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(event) = event.dyn_ref::<WheelEvent>() else {
                    return;
                };
                // Pinch-zoom arrives as ctrl+wheel.
                if event.ctrl_key() {
                    return;
                }
                let delta = wheel_delta_px(event);
                if handle.drive(|scroll, now| scroll.on_wheel(delta, now)) {
                    event.prevent_default();
                }
            },
        )
    };

    let touch_start = {
        let last_touch_y = last_touch_y.clone();
        EventListener::new(&win, "touchstart", move |event| {
            let y = event.dyn_ref::<TouchEvent>().and_then(first_touch_y);
            last_touch_y.set(y);
        })
    };

    let touch_move = {
        let handle = handle.clone();
        let last_touch_y = last_touch_y.clone();
        EventListener::new_with_options(
            &win,
            "touchmove",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let Some(y) = first_touch_y(event) else {
                    return;
                };
                let Some(previous) = last_touch_y.replace(Some(y)) else {
                    return;
                };
                if handle.drive(|scroll, now| scroll.on_touch_move(y - previous, now)) {
                    event.prevent_default();
                }
            },
        )
    };

    let touch_end = EventListener::new(&win, "touchend", move |_| last_touch_y.set(None));

    let native_scroll = {
        let handle = handle.clone();
        EventListener::new(&win, "scroll", move |_| {
            handle.with_scroll(|scroll| scroll.sync_native(dom::scroll_y()));
        })
    };

    let resize = {
        let handle = handle.clone();
        EventListener::new(&win, "resize", move |_| {
            handle.with_scroll(|scroll| scroll.set_limit(dom::scroll_limit()));
        })
    };

    Some(vec![wheel, touch_start, touch_move, touch_end, native_scroll, resize])
}

/// Eased wheel and touch scrolling for the whole page. The returned handle
/// also drives programmatic glides.
#[hook]
pub fn use_smooth_scroll(
    frames: FrameScheduler,
    config: Rc<MotionConfig>,
    device: DeviceClass,
    enabled: bool,
) -> ScrollHandle {
    let handle = (*use_memo((), move |_| ScrollHandle::new(frames))).clone();

    {
        let handle = handle.clone();
        let config = config.clone();
        use_effect_with(enabled, move |enabled| {
            let listeners = if *enabled {
                let mut scroll = SmoothScroll::new(&config, device.touch_multiplier(&config));
                scroll.set_limit(dom::scroll_limit());
                scroll.sync_native(dom::scroll_y());
                handle.attach(scroll);
                log::debug!("smooth scrolling attached");
                wire_scroll_input(&handle)
            } else {
                None
            };
            move || {
                drop(listeners);
                handle.detach();
            }
        });
    }

    {
        let handle = handle.clone();
        use_effect_with(device, move |device| {
            let multiplier = device.touch_multiplier(&config);
            handle.with_scroll(|scroll| scroll.set_touch_multiplier(multiplier));
            || ()
        });
    }

    handle
}
