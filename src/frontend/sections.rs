use super::frame::TaskSlot;
use super::hooks::{use_hero_scroll, use_magnetic, use_pointer_parallax, use_reveal};
use super::registry::RevealAction;
use super::MotionContext;
use crate::content::{ContactLink, PageContent, ProjectEntry, SkillEntry, Stat};
use crate::navigation::Section;
use crate::reveal::{arc_circumference, arc_dash_offset, RevealTrigger, SkillFill, SKILL_ARC_RADIUS};
use crate::scheduler::TaskStatus;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum RevealKind {
    Rise,
    SlideLeft,
    SlideRight,
    Pop,
    Spin,
    Fade,
}

impl RevealKind {
    fn class_name(self) -> &'static str {
        match self {
            Self::Rise => "reveal-rise",
            Self::SlideLeft => "reveal-slide-left",
            Self::SlideRight => "reveal-slide-right",
            Self::Pop => "reveal-pop",
            Self::Spin => "reveal-spin",
            Self::Fade => "reveal-fade",
        }
    }
}

/// How far inside the viewport an element must be before it reveals.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealMargin {
    #[default]
    Flush,
    Header,
    Card,
}

fn viewport_trigger(motion: Option<&MotionContext>, margin: RevealMargin) -> RevealTrigger {
    let margin_px = match (motion, margin) {
        (Some(motion), RevealMargin::Header) => motion.config.header_reveal_margin_px,
        (Some(motion), RevealMargin::Card) => motion.config.card_reveal_margin_px,
        _ => 0.0,
    };
    RevealTrigger::Viewport { margin_px }
}

fn reveal_classes(kind: RevealKind) -> Classes {
    classes!("reveal", kind.class_name())
}

fn delay_style(delay_ms: u32) -> String {
    format!("--reveal-delay: {delay_ms}ms;")
}

fn enter_style(delay_ms: u32) -> String {
    format!("--enter-delay: {delay_ms}ms;")
}

fn stagger(base_ms: u32, step_ms: u32, index: usize) -> u32 {
    base_ms + step_ms * index as u32
}

fn log_image_error(src: &str) -> Callback<Event> {
    let src = src.to_string();
    Callback::from(move |_: Event| log::warn!("image failed to load: {src}"))
}

fn navigate_to(on_navigate: &Callback<Section>, section: Section) -> Callback<MouseEvent> {
    let on_navigate = on_navigate.clone();
    Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        on_navigate.emit(section);
    })
}

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or(RevealKind::Rise)]
    pub kind: RevealKind,
    #[prop_or_default]
    pub margin: RevealMargin,
    #[prop_or_default]
    pub delay_ms: u32,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Block that stays hidden until first scrolled into view.
#[function_component(Reveal)]
pub fn reveal_block(props: &RevealProps) -> Html {
    let node = use_node_ref();
    let motion = use_context::<MotionContext>();
    use_reveal(
        node.clone(),
        viewport_trigger(motion.as_ref(), props.margin),
        RevealAction::Mark,
    );

    html! {
        <div
            ref={node}
            class={classes!(reveal_classes(props.kind), props.class.clone())}
            style={delay_style(props.delay_ms)}
        >
            { for props.children.iter() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NavLinkProps {
    section: Section,
    index: usize,
    on_navigate: Callback<Section>,
}

#[function_component(NavLink)]
fn nav_link(props: &NavLinkProps) -> Html {
    let node = use_node_ref();
    use_magnetic(node.clone());

    html! {
        <a
            ref={node}
            class="nav-link enter enter-drop"
            style={enter_style(stagger(300, 100, props.index))}
            href={props.section.href()}
            onclick={navigate_to(&props.on_navigate, props.section)}
        >
            {props.section.anchor()}
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    pub name: AttrValue,
    pub initials: AttrValue,
    pub menu_open: bool,
    pub on_toggle: Callback<MouseEvent>,
    pub on_navigate: Callback<Section>,
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    html! {
        <header class="navbar enter enter-drop">
            <div class="nav-container">
                <a
                    class="nav-left"
                    href={Section::Home.href()}
                    onclick={navigate_to(&props.on_navigate, Section::Home)}
                >
                    <span class="nav-logo-mark"><span>{props.initials.clone()}</span></span>
                    <span class="nav-logo-text">{props.name.clone()}</span>
                </a>
                <nav class={classes!("nav-links", props.menu_open.then_some("nav-links-open"))}>
                    { for Section::ALL.into_iter().enumerate().map(|(index, section)| html! {
                        <NavLink
                            key={section.anchor()}
                            section={section}
                            index={index}
                            on_navigate={props.on_navigate.clone()}
                        />
                    }) }
                </nav>
                <button
                    class={classes!("mobile-menu-toggle", props.menu_open.then_some("menu-open"))}
                    type="button"
                    aria-label="Toggle menu"
                    aria-expanded={props.menu_open.to_string()}
                    onclick={props.on_toggle.clone()}
                >
                    <span class="hamburger-line" />
                    <span class="hamburger-line" />
                    <span class="hamburger-line" />
                </button>
            </div>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct CtaLinkProps {
    section: Section,
    label: AttrValue,
    primary: bool,
    on_navigate: Callback<Section>,
}

#[function_component(CtaLink)]
fn cta_link(props: &CtaLinkProps) -> Html {
    let node = use_node_ref();
    use_magnetic(node.clone());
    let class = if props.primary { "btn-primary" } else { "btn-secondary" };

    html! {
        <a
            ref={node}
            class={class}
            href={props.section.href()}
            onclick={navigate_to(&props.on_navigate, props.section)}
        >
            {props.label.clone()}
            if props.primary {
                <span class="btn-arrow">{"→"}</span>
            }
        </a>
    }
}

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub node: NodeRef,
    pub content: Rc<PageContent>,
    pub on_navigate: Callback<Section>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let inner = use_node_ref();
    let portrait = use_node_ref();
    use_hero_scroll(inner.clone());
    use_pointer_parallax(portrait.clone());

    let content = &props.content;
    let headline = &content.headline;
    let stats = content.stats.iter().enumerate().map(|(index, stat)| {
        html! { <StatItem key={stat.label.clone()} index={index} stat={stat.clone()} /> }
    });

    html! {
        <section id={Section::Home.anchor()} class="hero section" ref={props.node.clone()}>
            <div class="hero-background-glow" />
            <div class="container hero-inner" ref={inner}>
                <div class="hero-content enter enter-rise">
                    <div class="hero-badge enter enter-pop" style={enter_style(200)}>
                        <span class="badge-dot" />
                        {content.badge.clone()}
                    </div>
                    <h1 class="hero-title enter enter-rise" style={enter_style(300)}>
                        {headline.lead.clone()}
                        <br />
                        <span class="gradient-text">{headline.highlight.clone()}</span>
                        {format!(" {}", headline.connector)}
                        <br />
                        <span class="gradient-text-alt">{headline.highlight_alt.clone()}</span>
                    </h1>
                    <p class="hero-subtitle enter enter-rise" style={enter_style(500)}>
                        {content.subtitle.clone()}
                    </p>
                    <div class="hero-cta enter enter-rise" style={enter_style(700)}>
                        <CtaLink
                            section={Section::Contact}
                            label="Get In Touch"
                            primary={true}
                            on_navigate={props.on_navigate.clone()}
                        />
                        <CtaLink
                            section={Section::Projects}
                            label="View Work"
                            primary={false}
                            on_navigate={props.on_navigate.clone()}
                        />
                    </div>
                    <div class="hero-stats enter enter-fade" style={enter_style(900)}>
                        { for stats }
                    </div>
                </div>

                <div class="hero-image-wrapper" ref={portrait}>
                    <div class="hero-image-entrance enter enter-zoom" style={enter_style(400)}>
                        <div class="hero-image-frame">
                            <div class="image-zoom">
                                <img
                                    src={content.hero_image.src.clone()}
                                    alt={content.hero_image.alt.clone()}
                                    class="hero-image"
                                    onerror={log_image_error(&content.hero_image.src)}
                                />
                            </div>
                            <div class="hero-image-glow" />
                            <div class="hero-image-border" />
                        </div>
                        <div class="floating-shapes">
                            <div class="shape shape-1" />
                            <div class="shape shape-2" />
                        </div>
                    </div>
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct StatItemProps {
    index: usize,
    stat: Stat,
}

#[function_component(StatItem)]
fn stat_item(props: &StatItemProps) -> Html {
    html! {
        <div class="stat-item enter enter-pop" style={enter_style(stagger(1000, 100, props.index))}>
            <div class="stat-number">{props.stat.number.clone()}</div>
            <div class="stat-label">{props.stat.label.clone()}</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SectionHeaderProps {
    label: AttrValue,
    #[prop_or_default]
    description: Option<AttrValue>,
    #[prop_or_default]
    margin: RevealMargin,
    children: Children,
}

#[function_component(SectionHeader)]
fn section_header(props: &SectionHeaderProps) -> Html {
    html! {
        <Reveal class="section-header" margin={props.margin}>
            <span class="section-label">{props.label.clone()}</span>
            <h2 class="section-title">{ for props.children.iter() }</h2>
            if let Some(description) = props.description.clone() {
                <p class="section-description">{description}</p>
            }
        </Reveal>
    }
}

#[derive(Properties, PartialEq)]
pub struct SectionProps {
    pub node: NodeRef,
    pub content: Rc<PageContent>,
}

#[function_component(About)]
pub fn about(props: &SectionProps) -> Html {
    let about = &props.content.about;

    html! {
        <section id={Section::About.anchor()} class="section about-section" ref={props.node.clone()}>
            <div class="container">
                <SectionHeader label="About Me" margin={RevealMargin::Header}>
                    {about.title_lead.clone()}
                    <br />
                    <span class="gradient-text">{about.title_highlight.clone()}</span>
                </SectionHeader>

                <div class="about-content">
                    <Reveal kind={RevealKind::SlideLeft} class="about-image-wrapper">
                        <div class="about-image-frame">
                            <div class="image-zoom">
                                <img
                                    src={about.image.src.clone()}
                                    alt={about.image.alt.clone()}
                                    class="about-image"
                                    onerror={log_image_error(&about.image.src)}
                                />
                            </div>
                            <div class="about-image-glow" />
                        </div>
                    </Reveal>

                    <Reveal kind={RevealKind::SlideRight} delay_ms={200} class="about-text-content">
                        { for about.paragraphs.iter().map(|paragraph| html! {
                            <p class="about-description">{paragraph.clone()}</p>
                        }) }
                        <div class="about-highlights">
                            { for about.highlights.iter().enumerate().map(|(index, highlight)| html! {
                                <Reveal
                                    key={highlight.clone()}
                                    kind={RevealKind::Pop}
                                    delay_ms={stagger(300, 100, index)}
                                    class="highlight-item"
                                >
                                    <span class="highlight-icon">{"✓"}</span>
                                    {highlight.clone()}
                                </Reveal>
                            }) }
                        </div>
                    </Reveal>
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SkillCardProps {
    index: usize,
    skill: SkillEntry,
}

#[function_component(SkillCard)]
fn skill_card(props: &SkillCardProps) -> Html {
    let card = use_node_ref();
    let arc = use_node_ref();
    let fill_task = (*use_memo((), |_| TaskSlot::default())).clone();
    let motion = use_context::<MotionContext>();
    let circumference = arc_circumference(SKILL_ARC_RADIUS);

    use_magnetic(card.clone());
    use_reveal(
        card.clone(),
        viewport_trigger(motion.as_ref(), RevealMargin::Card),
        RevealAction::Mark,
    );

    let on_arc_visible = {
        let arc = arc.clone();
        let slot = fill_task.clone();
        let motion = motion.clone();
        let target = props.skill.fill_fraction();
        let index = props.index;
        Callback::from(move |now: f64| {
            let Some(motion) = motion.as_ref() else {
                return;
            };
            if motion.reduced_motion {
                set_arc_offset(&arc, arc_dash_offset(SKILL_ARC_RADIUS, target));
                return;
            }

            let config = &motion.config;
            let delay_ms = config.skill_fill_stagger_ms * index as f64;
            let fill = SkillFill::start(target, now, delay_ms, config.skill_fill_duration_ms);
            let arc = arc.clone();
            slot.ensure(&motion.frames, move |now| {
                set_arc_offset(&arc, arc_dash_offset(SKILL_ARC_RADIUS, fill.fraction(now)));
                if fill.is_finished(now) {
                    TaskStatus::Done
                } else {
                    TaskStatus::Continue
                }
            });
        })
    };
    let trigger_fraction = motion
        .as_ref()
        .map_or(0.85, |motion| motion.config.skill_trigger_fraction);
    use_reveal(
        arc.clone(),
        RevealTrigger::TopAbove {
            fraction: trigger_fraction,
        },
        RevealAction::Notify(on_arc_visible),
    );

    {
        let fill_task = fill_task.clone();
        use_effect_with((), move |_| move || fill_task.cancel());
    }

    let gradient_id = format!("skill-gradient-{}", props.index);
    let dash = format!("{circumference:.2}");

    html! {
        <div
            ref={card}
            class={classes!("skill-circular-card", reveal_classes(RevealKind::Spin))}
            style={delay_style(stagger(0, 150, props.index))}
        >
            <div class="circular-progress-wrapper">
                <svg class="circular-progress" viewBox="0 0 120 120">
                    <defs>
                        <linearGradient id={gradient_id.clone()} x1="0%" y1="0%" x2="100%" y2="100%">
                            <stop offset="0%" stop-color="var(--accent-primary)" />
                            <stop offset="100%" stop-color="var(--accent-secondary)" />
                        </linearGradient>
                    </defs>
                    <circle class="circular-progress-bg" cx="60" cy="60" r="50" fill="none" stroke-width="8" />
                    <circle
                        ref={arc}
                        class="circular-progress-fill"
                        cx="60"
                        cy="60"
                        r="50"
                        fill="none"
                        stroke-width="8"
                        stroke-linecap="round"
                        stroke={format!("url(#{gradient_id})")}
                        stroke-dasharray={dash.clone()}
                        stroke-dashoffset={dash}
                    />
                </svg>
                <div class="circular-progress-content">
                    <div class="skill-icon-large">{props.skill.icon.clone()}</div>
                    <div class="skill-percentage-large">{format!("{}%", props.skill.level)}</div>
                </div>
            </div>
            <h3 class="skill-name-circular">{props.skill.name.clone()}</h3>
        </div>
    }
}

fn set_arc_offset(arc: &NodeRef, offset: f64) {
    if let Some(circle) = arc.cast::<web_sys::Element>() {
        let _ = circle.set_attribute("stroke-dashoffset", &format!("{offset:.2}"));
    }
}

#[derive(Properties, PartialEq)]
struct TechBadgeProps {
    index: usize,
    name: AttrValue,
}

#[function_component(TechBadge)]
fn tech_badge(props: &TechBadgeProps) -> Html {
    let node = use_node_ref();
    let motion = use_context::<MotionContext>();
    use_magnetic(node.clone());
    use_reveal(
        node.clone(),
        viewport_trigger(motion.as_ref(), RevealMargin::Flush),
        RevealAction::Mark,
    );

    html! {
        <div
            ref={node}
            class={classes!("hexagon-item", reveal_classes(RevealKind::Pop))}
            style={delay_style(stagger(400, 80, props.index))}
        >
            <div class="hexagon-content">
                <span class="hexagon-text">{props.name.clone()}</span>
                <div class="hexagon-glow" />
            </div>
        </div>
    }
}

#[function_component(Skills)]
pub fn skills(props: &SectionProps) -> Html {
    let content = &props.content;

    html! {
        <section id={Section::Skills.anchor()} class="section skills-section" ref={props.node.clone()}>
            <div class="container">
                <SectionHeader label="Skills & Expertise" margin={RevealMargin::Header}>
                    {"Technologies I "}
                    <span class="gradient-text">{"Master"}</span>
                </SectionHeader>

                <div class="skills-circular-grid">
                    { for content.skills.iter().enumerate().map(|(index, skill)| html! {
                        <SkillCard key={skill.name.clone()} index={index} skill={skill.clone()} />
                    }) }
                </div>

                <Reveal delay_ms={300} class="tech-stack-hexagonal">
                    <h3 class="tech-stack-title">{"Tools & Technologies"}</h3>
                    <div class="hexagonal-grid">
                        { for content.tech_stack.iter().enumerate().map(|(index, tech)| html! {
                            <TechBadge key={tech.clone()} index={index} name={tech.clone()} />
                        }) }
                    </div>
                </Reveal>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    index: usize,
    project: ProjectEntry,
    active: bool,
    on_enter: Callback<usize>,
    on_leave: Callback<usize>,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let node = use_node_ref();
    let motion = use_context::<MotionContext>();
    use_magnetic(node.clone());
    use_reveal(
        node.clone(),
        viewport_trigger(motion.as_ref(), RevealMargin::Card),
        RevealAction::Mark,
    );

    let onmouseenter = {
        let on_enter = props.on_enter.clone();
        let index = props.index;
        Callback::from(move |_: MouseEvent| on_enter.emit(index))
    };
    let onmouseleave = {
        let on_leave = props.on_leave.clone();
        let index = props.index;
        Callback::from(move |_: MouseEvent| on_leave.emit(index))
    };
    let project = &props.project;

    html! {
        <div
            ref={node}
            class={classes!("project-card", reveal_classes(RevealKind::Rise), props.active.then_some("is-active"))}
            style={delay_style(stagger(0, 200, props.index))}
            onmouseenter={onmouseenter}
            onmouseleave={onmouseleave}
        >
            <div class="project-image-wrapper">
                <img
                    src={project.image.clone()}
                    alt={project.title.clone()}
                    class="project-image"
                    onerror={log_image_error(&project.image)}
                />
                <div class="project-overlay" />
                if props.active {
                    <div class="project-hover-content">
                        <a href={project.link.clone()} class="project-link-btn">{"View Project →"}</a>
                    </div>
                }
            </div>
            <div class="project-content">
                <h3 class="project-title">{project.title.clone()}</h3>
                <p class="project-description">{project.description.clone()}</p>
                <div class="project-tech">
                    { for project.tech.iter().map(|tech| html! {
                        <span key={tech.clone()} class="project-tech-tag">{tech.clone()}</span>
                    }) }
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProjectsProps {
    pub node: NodeRef,
    pub content: Rc<PageContent>,
    pub active: Option<usize>,
    pub on_enter: Callback<usize>,
    pub on_leave: Callback<usize>,
}

#[function_component(Projects)]
pub fn projects(props: &ProjectsProps) -> Html {
    let content = &props.content;

    html! {
        <section id={Section::Projects.anchor()} class="section projects-section" ref={props.node.clone()}>
            <div class="container">
                <SectionHeader
                    label="Portfolio"
                    description={AttrValue::from(content.projects_intro.clone())}
                    margin={RevealMargin::Header}
                >
                    {"Featured "}
                    <span class="gradient-text">{"Projects"}</span>
                </SectionHeader>

                <div class="projects-grid">
                    { for content.projects.iter().enumerate().map(|(index, project)| html! {
                        <ProjectCard
                            key={project.title.clone()}
                            index={index}
                            project={project.clone()}
                            active={props.active == Some(index)}
                            on_enter={props.on_enter.clone()}
                            on_leave={props.on_leave.clone()}
                        />
                    }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ContactButtonProps {
    index: usize,
    link: ContactLink,
}

#[function_component(ContactButton)]
fn contact_button(props: &ContactButtonProps) -> Html {
    let node = use_node_ref();
    let motion = use_context::<MotionContext>();
    use_magnetic(node.clone());
    use_reveal(
        node.clone(),
        viewport_trigger(motion.as_ref(), RevealMargin::Flush),
        RevealAction::Mark,
    );
    let link = &props.link;

    html! {
        <a
            ref={node}
            href={link.href.clone()}
            class={classes!("contact-btn", link.kind.class_name(), reveal_classes(RevealKind::Pop))}
            style={format!(
                "{} --arrow-delay: {}ms;",
                delay_style(stagger(300, 100, props.index)),
                stagger(0, 200, props.index)
            )}
        >
            <span class="contact-btn-icon">{link.icon.clone()}</span>
            {link.label.clone()}
            <span class="contact-btn-arrow">{"→"}</span>
        </a>
    }
}

#[function_component(Contact)]
pub fn contact(props: &SectionProps) -> Html {
    let contact = &props.content.contact;

    html! {
        <section id={Section::Contact.anchor()} class="section contact-section" ref={props.node.clone()}>
            <div class="container">
                <Reveal class="contact-wrapper">
                    <div class="contact-content">
                        <SectionHeader
                            label="Get In Touch"
                            description={AttrValue::from(contact.intro.clone())}
                        >
                            {"Let's Build Something"}
                            <br />
                            <span class="gradient-text">{"Amazing Together"}</span>
                        </SectionHeader>

                        <Reveal delay_ms={200} class="contact-buttons">
                            { for contact.links.iter().enumerate().map(|(index, link)| html! {
                                <ContactButton key={link.label.clone()} index={index} link={link.clone()} />
                            }) }
                        </Reveal>
                    </div>
                </Reveal>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct FooterProps {
    pub name: AttrValue,
    pub tagline: AttrValue,
}

#[function_component(Footer)]
pub fn footer(props: &FooterProps) -> Html {
    let year = js_sys::Date::new_0().get_full_year();

    html! {
        <Reveal kind={RevealKind::Fade} class="footer">
            <div class="container">
                <p>{format!("© {year} {}. All rights reserved.", props.name)}</p>
                <p class="footer-tagline">{props.tagline.clone()}</p>
            </div>
        </Reveal>
    }
}
