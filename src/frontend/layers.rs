//! Fixed decorative layers: the particle backdrop and the cursor overlay.

use super::{dom, MotionContext};
use crate::config::MotionConfig;
use crate::cursor::{translate_centered, Follower, RippleSet};
use crate::particles::{ParticleField, ParticleSchedule};
use crate::scheduler::{FrameTask, TaskStatus};
use gloo_events::EventListener;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{window, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ParticleLayerProps {
    pub colors: Vec<String>,
}

#[function_component(ParticleLayer)]
pub fn particle_layer(props: &ParticleLayerProps) -> Html {
    let motion = use_context::<MotionContext>();
    let field = use_mut_ref(|| None::<ParticleField<SmallRng>>);
    let redraw = use_force_update();
    let enabled = motion.as_ref().is_some_and(|motion| !motion.reduced_motion);

    {
        let field = field.clone();
        use_effect_with((enabled, props.colors.len()), move |(enabled, color_count)| {
            let task = match motion {
                Some(motion) if *enabled && *color_count > 0 => {
                    let schedule = ParticleSchedule::from_config(&motion.config);
                    log::debug!(
                        "particle field on, {} live at steady state, {} at most",
                        schedule.steady_state_count(),
                        schedule.max_live()
                    );
                    *field.borrow_mut() = Some(ParticleField::new(
                        schedule,
                        *color_count,
                        SmallRng::from_entropy(),
                    ));

                    let field = field.clone();
                    Some(motion.frames.register(move |now| {
                        let change = field
                            .borrow_mut()
                            .as_mut()
                            .map(|field| field.advance(now))
                            .unwrap_or_default();
                        if !change.is_empty() {
                            redraw.force_update();
                        }
                        TaskStatus::Continue
                    }))
                }
                _ => None,
            };

            move || {
                drop(task);
                field.borrow_mut().take();
            }
        });
    }

    let particles: Html = field
        .borrow()
        .as_ref()
        .map(|field| {
            field
                .live()
                .iter()
                .map(|particle| {
                    let color = props
                        .colors
                        .get(particle.color_index)
                        .map(String::as_str)
                        .unwrap_or_default();
                    html! {
                        <div key={particle.id.to_string()} class="particle" style={particle.style(color)} />
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    html! {
        <div class="space-bg" aria-hidden="true">
            <div class="gradient-orb orb-1" />
            <div class="gradient-orb orb-2" />
            <div class="gradient-orb orb-3" />
            <div class="grid-pattern" />
            <div class="particles">{particles}</div>
        </div>
    }
}

struct CursorBinding {
    _listeners: [EventListener; 2],
    _task: FrameTask,
}

impl CursorBinding {
    fn attach(
        tail: NodeRef,
        follower: NodeRef,
        ripples: Rc<RefCell<RippleSet>>,
        redraw: UseForceUpdateHandle,
        motion: &MotionContext,
    ) -> Option<Self> {
        let win = window()?;
        let pointer = Rc::new(Cell::new((0.0, 0.0)));

        let on_move = {
            let pointer = pointer.clone();
            EventListener::new(&win, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let (x, y) = (f64::from(event.client_x()), f64::from(event.client_y()));
                pointer.set((x, y));
                dom::style_node(&tail, "transform", &translate_centered(x, y));
            })
        };

        let on_click = {
            let ripples = ripples.clone();
            let redraw = redraw.clone();
            EventListener::new(&win, "click", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                ripples.borrow_mut().spawn(
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    dom::now_ms(),
                );
                redraw.force_update();
            })
        };

        let smoothing = motion.config.follower_smoothing;
        let mut trail = Follower::default();
        let task = motion.frames.register(move |now| {
            let (x, y) = trail.step(pointer.get(), smoothing);
            dom::style_node(&follower, "transform", &translate_centered(x, y));
            if ripples.borrow_mut().expire(now) {
                redraw.force_update();
            }
            TaskStatus::Continue
        });

        Some(Self {
            _listeners: [on_move, on_click],
            _task: task,
        })
    }
}

#[function_component(CursorLayer)]
pub fn cursor_layer() -> Html {
    let motion = use_context::<MotionContext>();
    let tail = use_node_ref();
    let follower = use_node_ref();
    let ripple_lifetime = motion
        .as_ref()
        .map_or(MotionConfig::default().ripple_lifetime_ms, |motion| {
            motion.config.ripple_lifetime_ms
        });
    let ripples = use_mut_ref(move || RippleSet::new(ripple_lifetime));
    let redraw = use_force_update();
    let enabled = motion
        .as_ref()
        .is_some_and(MotionContext::pointer_effects_enabled);
    let display = match motion.as_ref() {
        Some(motion) if !motion.reduced_motion => motion.device.cursor_display(),
        _ => "none",
    };

    {
        let tail = tail.clone();
        let follower = follower.clone();
        let ripples = ripples.clone();
        use_effect_with(enabled, move |enabled| {
            let binding = match motion {
                Some(motion) if *enabled => {
                    CursorBinding::attach(tail, follower, ripples, redraw, &motion)
                }
                _ => None,
            };
            move || drop(binding)
        });
    }

    let ripple_nodes: Html = ripples
        .borrow()
        .ripples()
        .iter()
        .map(|ripple| {
            html! {
                <div key={ripple.id.to_string()} class="click-ripple" style={ripple.style()} />
            }
        })
        .collect();
    let style = format!("display: {display};");

    html! {
        <div class="cursor-layer" aria-hidden="true">
            <div ref={tail} class="cursor-tail" style={style.clone()} />
            <div ref={follower} class="cursor-follower" style={style} />
            {ripple_nodes}
        </div>
    }
}
