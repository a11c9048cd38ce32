mod dom;
mod frame;
mod hooks;
mod layers;
mod registry;
mod sections;

use crate::config::{LogLevel, MotionConfig};
use crate::content::{ContentError, PageContent};
use crate::device::DeviceClass;
use crate::navigation::{MenuState, ProjectHover, Section};
use crate::scheduler::FrameScheduler;
use frame::FrameLoop;
use gloo_net::http::Request;
use hooks::{use_device_class, use_reveal_sweeps, use_scroll_lock, use_smooth_scroll, ScrollHandle};
use layers::{CursorLayer, ParticleLayer};
use registry::RevealRegistry;
use sections::{About, Contact, Footer, Hero, NavBar, Projects, Skills};
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Shared motion state every animated component reads.
#[derive(Clone, PartialEq)]
pub struct MotionContext {
    pub device: DeviceClass,
    pub config: Rc<MotionConfig>,
    pub frames: FrameScheduler,
    pub reveals: RevealRegistry,
    pub scroll: ScrollHandle,
    pub reduced_motion: bool,
}

impl MotionContext {
    pub fn pointer_effects_enabled(&self) -> bool {
        self.device.pointer_effects_enabled() && !self.reduced_motion
    }
}

pub enum MenuAction {
    Toggle,
    Close,
}

impl Reducible for MenuState {
    type Action = MenuAction;

    fn reduce(self: Rc<Self>, action: MenuAction) -> Rc<Self> {
        let next = match action {
            MenuAction::Toggle => self.toggled(),
            MenuAction::Close => self.closed(),
        };
        Rc::new(next)
    }
}

pub enum HoverAction {
    Enter(usize),
    Leave(usize),
}

impl Reducible for ProjectHover {
    type Action = HoverAction;

    fn reduce(self: Rc<Self>, action: HoverAction) -> Rc<Self> {
        let next = match action {
            HoverAction::Enter(index) => self.entered(index),
            HoverAction::Leave(index) => self.left(index),
        };
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    content: Rc<PageContent>,
}

fn scroll_to_section(node: &NodeRef, scroll: &ScrollHandle) -> bool {
    let Some(element) = node.cast::<web_sys::Element>() else {
        return false;
    };
    if !scroll.glide_to(dom::document_top(&element)) {
        dom::scroll_into_view(&element);
    }
    true
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let content = props.content.clone();
    let config = use_memo(content.clone(), |content| content.motion.clone());
    let frames = (*use_memo((), |_| FrameScheduler::new())).clone();
    let reveals = (*use_memo((), |_| RevealRegistry::default())).clone();
    let reduced_motion = *use_memo(config.clone(), |config| {
        config.respect_reduced_motion && dom::prefers_reduced_motion()
    });
    let device = use_device_class(config.mobile_breakpoint_px);
    let scroll = use_smooth_scroll(frames.clone(), config.clone(), device, !reduced_motion);
    let menu = use_reducer_eq(MenuState::default);
    let hover = use_reducer_eq(ProjectHover::default);
    // Indexed by `Section::index`.
    let sections: [NodeRef; 5] = [
        use_node_ref(),
        use_node_ref(),
        use_node_ref(),
        use_node_ref(),
        use_node_ref(),
    ];

    {
        let frames = frames.clone();
        use_effect_with((), move |_| {
            let frame_loop = FrameLoop::attach(frames);
            move || drop(frame_loop)
        });
    }
    use_reveal_sweeps(reveals.clone(), frames.clone());
    use_scroll_lock(menu.is_open());
    {
        let scroll = scroll.clone();
        use_effect_with(menu.is_open(), move |open| {
            scroll.set_paused(*open);
            || ()
        });
    }

    {
        use_effect_with(reduced_motion, |reduced_motion| {
            if *reduced_motion {
                log::info!("reduced motion requested; ambient animation is off");
            }
            || ()
        });
    }

    let on_toggle_menu = {
        let menu = menu.dispatcher();
        Callback::from(move |_: MouseEvent| menu.dispatch(MenuAction::Toggle))
    };

    let on_close_menu = {
        let menu = menu.dispatcher();
        Callback::from(move |_: MouseEvent| menu.dispatch(MenuAction::Close))
    };

    let on_navigate = {
        let menu = menu.dispatcher();
        let scroll = scroll.clone();
        let sections = sections.clone();
        Callback::from(move |section: Section| {
            menu.dispatch(MenuAction::Close);
            scroll.set_paused(false);
            let node = &sections[section.index()];
            if !scroll_to_section(node, &scroll) {
                log::warn!("section #{} is not mounted", section.anchor());
                dom::set_location_hash(section.anchor());
            }
        })
    };

    let on_project_enter = {
        let hover = hover.dispatcher();
        Callback::from(move |index: usize| hover.dispatch(HoverAction::Enter(index)))
    };

    let on_project_leave = {
        let hover = hover.dispatcher();
        Callback::from(move |index: usize| hover.dispatch(HoverAction::Leave(index)))
    };

    let motion = MotionContext {
        device,
        config: config.clone(),
        frames,
        reveals,
        scroll,
        reduced_motion,
    };

    html! {
        <ContextProvider<MotionContext> context={motion}>
            <main class={classes!("page", device.as_str(), device.hover_effects_enabled().then_some("hover-effects"))}>
                <ParticleLayer colors={content.palette.particles.clone()} />
                <CursorLayer />

                if menu.is_open() {
                    <div class="mobile-menu-overlay" onclick={on_close_menu} />
                }

                <NavBar
                    name={content.name.clone()}
                    initials={content.initials.clone()}
                    menu_open={menu.is_open()}
                    on_toggle={on_toggle_menu}
                    on_navigate={on_navigate.clone()}
                />
                <Hero node={sections[0].clone()} content={content.clone()} on_navigate={on_navigate} />
                <About node={sections[1].clone()} content={content.clone()} />
                <Skills node={sections[2].clone()} content={content.clone()} />
                <Projects
                    node={sections[3].clone()}
                    content={content.clone()}
                    active={hover.active()}
                    on_enter={on_project_enter}
                    on_leave={on_project_leave}
                />
                <Contact node={sections[4].clone()} content={content.clone()} />
                <Footer name={content.name.clone()} tagline={content.footer_tagline.clone()} />
            </main>
        </ContextProvider<MotionContext>>
    }
}

#[derive(Debug, Error)]
enum ContentLoadError {
    #[error("request failed: {0}")]
    Fetch(#[from] gloo_net::Error),
    #[error("server answered {0}")]
    Status(u16),
    #[error(transparent)]
    Content(#[from] ContentError),
}

async fn fetch_content(url: &str) -> Result<PageContent, ContentLoadError> {
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(ContentLoadError::Status(response.status()));
    }
    let raw = response.text().await?;
    Ok(PageContent::from_json(&raw)?)
}

/// The override named by `data-content-url` wins when it loads and
/// validates; anything else falls back to the embedded profile.
async fn load_content(override_url: Option<String>) -> Option<PageContent> {
    if let Some(url) = override_url.as_deref() {
        match fetch_content(url).await {
            Ok(content) => {
                log::info!("content loaded from {url}");
                return Some(content);
            }
            Err(err) => log::warn!("content override {url} rejected, using embedded profile: {err}"),
        }
    }

    match PageContent::builtin() {
        Ok(content) => Some(content),
        Err(err) => {
            log::error!("embedded profile is invalid: {err}");
            None
        }
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let Some(root) = dom::mount_point() else {
        let _ = console_log::init_with_level(log::Level::Info);
        log::error!("missing #app mount point");
        return;
    };

    let level = LogLevel::parse_or(root.get_attribute("data-log-level").as_deref(), LogLevel::Info);
    let _ = console_log::init_with_level(level.as_log_level());

    let override_url = root
        .get_attribute("data-content-url")
        .filter(|url| !url.trim().is_empty());

    spawn_local(async move {
        let Some(content) = load_content(override_url).await else {
            return;
        };

        dom::apply_palette(&content.palette);
        dom::mark_motion_ready();
        log::info!(
            "rendering {} with {} skills and {} projects",
            content.name,
            content.skills.len(),
            content.projects.len()
        );

        yew::Renderer::<App>::with_root_and_props(
            root,
            AppProps {
                content: Rc::new(content),
            },
        )
        .render();
    });
}
