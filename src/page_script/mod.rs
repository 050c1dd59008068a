//! Landing page behaviors.
//!
//! Four independent behaviors for the invitation landing page, started when
//! the document is ready:
//!
//! - **Invitee personalization**: `?name=Erlen+Masson` writes `Erlen Masson`
//!   into `.invitee` and shows it.
//! - **Scroll reset**: the page always opens at the top with scrolling
//!   locked until the envelope opens.
//! - **Anchor interception**: in-page `#fragment` links scroll smoothly to
//!   their target without changing the URL.
//! - **Envelope animation**: a one-shot timeline that drops the envelope,
//!   fades in the invitation and opens the lid.
//!
//! Everything goes through a [`Platform`], so the behaviors are plain Rust
//! and run against any host that can provide a DOM, a scheduler and an
//! animation engine.
//!
//! ## Page hooks
//!
//! | Hook                      | Used by                         |
//! |---------------------------|---------------------------------|
//! | `.invitee`                | personalization                 |
//! | `.page-wrapper`           | scroll reset                    |
//! | `.page-content`           | scroll reset                    |
//! | `.envelope-lid`           | envelope (required)             |
//! | `[data-envelope-wrapper]` | envelope drop                   |
//! | `[data-envelope-layer]`   | envelope drop, without wrapper  |
//! | `.invitation-wrapper`     | invitation fade                 |
//! | `.empty-space`            | spacer shrink                   |
//!
//! Every hook is optional. A missing hook skips only the work that needs it.

pub mod platform;
pub mod timeline;

pub use platform::{Deferred, Platform, Task};
pub use timeline::{Ease, Prop, Step, Timeline, Tween};

use std::time::Duration;
use url::form_urlencoded;

/// Console line written when the script starts.
pub const VERSION_LINE: &str = concat!("page script v", env!("CARGO_PKG_VERSION"));
pub const ENVELOPE_STARTED: &str = "Envelope animation started";

/// Body class that locks page scrolling.
pub const SCROLL_LOCK_CLASS: &str = "overflow-hidden";
/// Class that reveals the invitee name.
pub const SHOWN_CLASS: &str = "is-shown";
/// Query parameter carrying the invitee name.
pub const NAME_PARAM: &str = "name";

/// Extra drop below the viewport bottom, in pixels. Negative keeps the
/// envelope higher.
pub const ENVELOPE_DROP_OFFSET: f64 = 80.0;
/// Delay between the first and the late scroll reset.
pub const LATE_RESET_DELAY: Duration = Duration::from_millis(100);

const INVITEE: &str = ".invitee";
const ENVELOPE_LID: &str = ".envelope-lid";
const ENVELOPE_LAYER: &str = "[data-envelope-layer]";
const ENVELOPE_WRAPPER: &str = "[data-envelope-wrapper]";
const PAGE_CONTENT: &str = ".page-content";
const PAGE_WRAPPER: &str = ".page-wrapper";
const INVITATION_WRAPPER: &str = ".invitation-wrapper";
const EMPTY_SPACE: &str = ".empty-space";

// ============================================================================
// Page context
// ============================================================================

/// Page hooks, looked up once when the document is ready.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext<N> {
    pub body: N,
    pub document_element: N,
    pub invitee: Option<N>,
    pub page_wrapper: Option<N>,
    pub page_content: Option<N>,
    pub envelope_lid: Option<N>,
    pub envelope_wrapper: Option<N>,
    pub envelope_layers: Vec<N>,
    pub invitation_wrapper: Option<N>,
    pub empty_space: Option<N>,
}

impl<N> PageContext<N> {
    pub fn resolve<P: Platform<Node = N>>(platform: &P) -> Self {
        Self {
            body: platform.body(),
            document_element: platform.document_element(),
            invitee: platform.query(INVITEE),
            page_wrapper: platform.query(PAGE_WRAPPER),
            page_content: platform.query(PAGE_CONTENT),
            envelope_lid: platform.query(ENVELOPE_LID),
            envelope_wrapper: platform.query(ENVELOPE_WRAPPER),
            envelope_layers: platform.query_all(ENVELOPE_LAYER),
            invitation_wrapper: platform.query(INVITATION_WRAPPER),
            empty_space: platform.query(EMPTY_SPACE),
        }
    }
}

// ============================================================================
// Script
// ============================================================================

/// What the host should do with an activated link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Let the browser handle the click.
    PassThrough,
    /// The script scrolled to the target; prevent the default action and
    /// stop propagation so the URL does not change.
    Intercepted,
}

/// Page script state for one page load.
#[derive(Debug)]
pub struct PageScript<N> {
    context: Option<PageContext<N>>,
    envelope_played: bool,
}

impl<N> Default for PageScript<N> {
    fn default() -> Self {
        Self {
            context: None,
            envelope_played: false,
        }
    }
}

impl<N: Clone> PageScript<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> Option<&PageContext<N>> {
        self.context.as_ref()
    }

    /// Document-ready entry point.
    pub fn on_ready<P: Platform<Node = N>>(&mut self, platform: &mut P) {
        platform.log(VERSION_LINE);
        let context = PageContext::resolve(platform);

        platform.disable_scroll_restoration();
        platform.add_class(&context.body, SCROLL_LOCK_CLASS);
        reset_scroll(platform, &context);
        platform.schedule(Deferred::NextFrame, Task::ResetScrollFrame);

        personalize_invitee(platform, &context);

        if !self.envelope_played
            && let Some(timeline) = envelope_timeline(platform, &context)
        {
            platform.log(ENVELOPE_STARTED);
            platform.play(timeline);
            self.envelope_played = true;
        }

        self.context = Some(context);
    }

    /// Run a task previously handed to [`Platform::schedule`].
    pub fn run_task<P: Platform<Node = N>>(&mut self, platform: &mut P, task: Task) {
        let Some(context) = &self.context else {
            return;
        };
        reset_scroll(platform, context);
        if task == Task::ResetScrollFrame {
            platform.schedule(Deferred::After(LATE_RESET_DELAY), Task::ResetScrollLate);
        }
    }

    /// Capture-phase click on a link with the given `href`.
    pub fn on_click<P: Platform<Node = N>>(&self, platform: &mut P, href: &str) -> ClickOutcome {
        let Some(id) = fragment_id(href) else {
            return ClickOutcome::PassThrough;
        };
        match platform.element_by_id(id) {
            Some(target) => {
                platform.scroll_into_view(&target);
                ClickOutcome::Intercepted
            }
            None => ClickOutcome::PassThrough,
        }
    }
}

// ============================================================================
// Invitee personalization
// ============================================================================

/// Invitee name from a query string, form-decoded and trimmed.
///
/// A `+` that survives decoding (sent as `%2B`) also reads as a space.
pub fn invitee_name(search: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    let (_, raw) = form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == NAME_PARAM)?;
    let name = raw.replace('+', " ");
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn personalize_invitee<P: Platform>(platform: &mut P, context: &PageContext<P::Node>) {
    let Some(invitee) = &context.invitee else {
        return;
    };
    match invitee_name(&platform.location_search()) {
        Some(name) => {
            platform.set_text(invitee, &name);
            platform.add_class(invitee, SHOWN_CLASS);
        }
        None => platform.remove_class(invitee, SHOWN_CLASS),
    }
}

// ============================================================================
// Scroll reset
// ============================================================================

fn reset_scroll<P: Platform>(platform: &mut P, context: &PageContext<P::Node>) {
    platform.scroll_window_to(0.0, 0.0);
    platform.set_scroll_top(&context.document_element, 0.0);
    platform.set_scroll_top(&context.body, 0.0);
    for node in [&context.page_wrapper, &context.page_content].into_iter().flatten() {
        platform.set_scroll_top(node, 0.0);
    }
}

// ============================================================================
// Anchor interception
// ============================================================================

/// Element id an `href` points at: the text after the first `#`, cut at
/// `?` and trimmed. `None` for links without a fragment.
pub fn fragment_id(href: &str) -> Option<&str> {
    let (_, fragment) = href.split_once('#')?;
    let id = fragment.split('?').next().unwrap_or_default().trim();
    (!id.is_empty()).then_some(id)
}

// ============================================================================
// Envelope animation
// ============================================================================

/// The envelope-opening timeline, or `None` without an `.envelope-lid`.
pub fn envelope_timeline<P: Platform>(
    platform: &P,
    context: &PageContext<P::Node>,
) -> Option<Timeline<P::Node>> {
    let lid = context.envelope_lid.clone()?;
    let mut timeline = Timeline::new(Ease::Power2InOut);

    if let Some(invitation) = &context.invitation_wrapper {
        timeline.set(vec![invitation.clone()], vec![Prop::Opacity(0.0)]);
    }

    // The wrapper moves as one piece; without it every layer moves.
    let (movers, measured) = match &context.envelope_wrapper {
        Some(wrapper) => (vec![wrapper.clone()], Some(wrapper)),
        None => (
            context.envelope_layers.clone(),
            context.envelope_layers.first(),
        ),
    };
    if let Some(measured) = measured {
        let drop = platform.viewport_height() - platform.bottom_of(measured) + ENVELOPE_DROP_OFFSET;
        timeline.to(
            Tween::new(movers, vec![Prop::TranslateY(drop)])
                .duration(Duration::from_millis(1500))
                .delay(Duration::from_millis(500))
                .ease(Ease::SineInOut),
        );
    }

    if let Some(invitation) = &context.invitation_wrapper {
        timeline.to(Tween::new(vec![invitation.clone()], vec![Prop::Opacity(1.0)]));
    }

    timeline
        .remove_class(context.body.clone(), SCROLL_LOCK_CLASS)
        .to(Tween::new(vec![lid.clone()], vec![Prop::RotateX(-180.0)])
            .duration(Duration::from_millis(800))
            .ease(Ease::Power2InOut))
        .set(vec![lid], vec![Prop::ZIndex(-1)]);

    if let Some(space) = &context.empty_space {
        timeline.to(
            Tween::new(vec![space.clone()], vec![Prop::Height("10vh".to_string())])
                .duration(Duration::from_secs(1))
                .ease(Ease::SineInOut),
        );
    }

    Some(timeline)
}

#[cfg(test)]
mod tests {
    use super::platform::tests::{BODY, FakePage, HTML, NodeId};
    use super::*;

    fn ready(page: &mut FakePage) -> PageScript<NodeId> {
        let mut script = PageScript::new();
        script.on_ready(page);
        script
    }

    fn tween_props(timeline: &Timeline<NodeId>) -> Vec<&Prop> {
        timeline
            .steps
            .iter()
            .filter_map(|s| match s {
                Step::Tween(t) => Some(&t.props[0]),
                _ => None,
            })
            .collect()
    }

    // =========================================================================
    // Invitee
    // =========================================================================

    #[test]
    fn invitee_from_plus_encoded_name() {
        let mut page = FakePage::with_search("?name=Erlen+Masson");
        let invitee = page.add(INVITEE);
        ready(&mut page);

        assert_eq!(page.elements[invitee].text, "Erlen Masson");
        assert!(page.has_class(invitee, SHOWN_CLASS));
    }

    #[test]
    fn invitee_hidden_without_name() {
        let mut page = FakePage::with_search("?lang=en");
        let invitee = page.add(INVITEE);
        page.elements[invitee].classes.insert(SHOWN_CLASS.to_string());
        ready(&mut page);

        assert!(!page.has_class(invitee, SHOWN_CLASS));
        assert_eq!(page.elements[invitee].text, "");
    }

    #[test]
    fn invitee_name_decoding() {
        assert_eq!(invitee_name("?name=ALEX").as_deref(), Some("ALEX"));
        assert_eq!(invitee_name("?name=Jos%C3%A9").as_deref(), Some("José"));
        assert_eq!(invitee_name("?name=A%2BB").as_deref(), Some("A B"));
        assert_eq!(invitee_name("?name=++Sam++").as_deref(), Some("Sam"));
        assert_eq!(invitee_name("?name=%3Cb%3E").as_deref(), Some("<b>"));
        assert_eq!(invitee_name("?name=+++"), None);
        assert_eq!(invitee_name("?name="), None);
        assert_eq!(invitee_name(""), None);
    }

    #[test]
    fn first_name_param_wins() {
        assert_eq!(invitee_name("?name=A&name=B").as_deref(), Some("A"));
    }

    #[test]
    fn missing_invitee_is_noop() {
        let mut page = FakePage::with_search("?name=Erlen");
        ready(&mut page);
        assert!(page.elements.iter().all(|e| e.text.is_empty()));
    }

    // =========================================================================
    // Scroll reset
    // =========================================================================

    #[test]
    fn ready_locks_and_resets_scroll() {
        let mut page = FakePage::new();
        let wrapper = page.add(PAGE_WRAPPER);
        let content = page.add(PAGE_CONTENT);
        page.elements[wrapper].scroll_top = 120.0;
        page.elements[content].scroll_top = 40.0;
        page.elements[HTML].scroll_top = 300.0;
        ready(&mut page);

        assert!(page.scroll_restoration_disabled);
        assert!(page.has_class(BODY, SCROLL_LOCK_CLASS));
        assert_eq!(page.window_scroll, Some((0.0, 0.0)));
        assert_eq!(page.elements[wrapper].scroll_top, 0.0);
        assert_eq!(page.elements[content].scroll_top, 0.0);
        assert_eq!(page.elements[HTML].scroll_top, 0.0);
    }

    #[test]
    fn scroll_resets_on_frame_and_after_delay() {
        let mut page = FakePage::new();
        let mut script = ready(&mut page);

        assert_eq!(
            page.take_scheduled(),
            vec![(Deferred::NextFrame, Task::ResetScrollFrame)]
        );

        page.window_scroll = None;
        script.run_task(&mut page, Task::ResetScrollFrame);
        assert_eq!(page.window_scroll, Some((0.0, 0.0)));
        assert_eq!(
            page.take_scheduled(),
            vec![(Deferred::After(LATE_RESET_DELAY), Task::ResetScrollLate)]
        );

        page.window_scroll = None;
        script.run_task(&mut page, Task::ResetScrollLate);
        assert_eq!(page.window_scroll, Some((0.0, 0.0)));
        assert!(page.take_scheduled().is_empty());
    }

    #[test]
    fn tasks_before_ready_do_nothing() {
        let mut page = FakePage::new();
        let mut script: PageScript<NodeId> = PageScript::new();
        script.run_task(&mut page, Task::ResetScrollFrame);
        assert_eq!(page.window_scroll, None);
        assert!(page.scheduled.is_empty());
    }

    // =========================================================================
    // Anchors
    // =========================================================================

    #[test]
    fn fragment_link_to_existing_element_is_intercepted() {
        let mut page = FakePage::new();
        let section = page.add_with_id("section2");
        let script = ready(&mut page);

        assert_eq!(script.on_click(&mut page, "#section2"), ClickOutcome::Intercepted);
        assert_eq!(page.scrolled_into_view, vec![section]);
    }

    #[test]
    fn path_with_fragment_and_query() {
        let mut page = FakePage::new();
        let rsvp = page.add_with_id("rsvp");
        let script = ready(&mut page);

        assert_eq!(
            script.on_click(&mut page, "/page#rsvp?x=1"),
            ClickOutcome::Intercepted
        );
        assert_eq!(page.scrolled_into_view, vec![rsvp]);
    }

    #[test]
    fn unknown_or_empty_fragment_passes_through() {
        let mut page = FakePage::new();
        let script = ready(&mut page);

        assert_eq!(script.on_click(&mut page, "#missing"), ClickOutcome::PassThrough);
        assert_eq!(script.on_click(&mut page, "#"), ClickOutcome::PassThrough);
        assert_eq!(script.on_click(&mut page, "/about"), ClickOutcome::PassThrough);
        assert!(page.scrolled_into_view.is_empty());
    }

    #[test]
    fn fragment_ids() {
        assert_eq!(fragment_id("#a"), Some("a"));
        assert_eq!(fragment_id("/p#a#b"), Some("a#b"));
        assert_eq!(fragment_id("# spaced "), Some("spaced"));
        assert_eq!(fragment_id("#?q"), None);
        assert_eq!(fragment_id("plain"), None);
    }

    // =========================================================================
    // Envelope
    // =========================================================================

    fn envelope_page() -> (FakePage, [NodeId; 4]) {
        let mut page = FakePage::new();
        let lid = page.add(ENVELOPE_LID);
        let wrapper = page.add(ENVELOPE_WRAPPER);
        let invitation = page.add(INVITATION_WRAPPER);
        let space = page.add(EMPTY_SPACE);
        page.viewport_height = 900.0;
        page.elements[wrapper].bottom = 600.0;
        (page, [lid, wrapper, invitation, space])
    }

    #[test]
    fn full_envelope_timeline() {
        let (mut page, [lid, wrapper, invitation, space]) = envelope_page();
        ready(&mut page);

        assert_eq!(page.logs, vec![VERSION_LINE, ENVELOPE_STARTED]);
        assert_eq!(page.timelines.len(), 1);
        let timeline = &page.timelines[0];
        assert_eq!(timeline.default_ease, Ease::Power2InOut);

        let expected = vec![
            Step::Set {
                targets: vec![invitation],
                props: vec![Prop::Opacity(0.0)],
            },
            Step::Tween(
                Tween::new(vec![wrapper], vec![Prop::TranslateY(380.0)])
                    .duration(Duration::from_millis(1500))
                    .delay(Duration::from_millis(500))
                    .ease(Ease::SineInOut),
            ),
            Step::Tween(Tween::new(vec![invitation], vec![Prop::Opacity(1.0)])),
            Step::RemoveClass {
                target: BODY,
                class: SCROLL_LOCK_CLASS,
            },
            Step::Tween(
                Tween::new(vec![lid], vec![Prop::RotateX(-180.0)])
                    .duration(Duration::from_millis(800))
                    .ease(Ease::Power2InOut),
            ),
            Step::Set {
                targets: vec![lid],
                props: vec![Prop::ZIndex(-1)],
            },
            Step::Tween(
                Tween::new(vec![space], vec![Prop::Height("10vh".into())])
                    .duration(Duration::from_secs(1))
                    .ease(Ease::SineInOut),
            ),
        ];
        assert_eq!(timeline.steps, expected);
    }

    #[test]
    fn no_lid_no_animation() {
        let mut page = FakePage::new();
        page.add(ENVELOPE_WRAPPER);
        ready(&mut page);

        assert!(page.timelines.is_empty());
        assert_eq!(page.logs, vec![VERSION_LINE]);
        assert!(page.has_class(BODY, SCROLL_LOCK_CLASS));
    }

    #[test]
    fn layers_move_when_wrapper_missing() {
        let mut page = FakePage::new();
        page.add(ENVELOPE_LID);
        let back = page.add(ENVELOPE_LAYER);
        let front = page.add(ENVELOPE_LAYER);
        page.viewport_height = 700.0;
        page.elements[back].bottom = 500.0;
        page.elements[front].bottom = 650.0;
        ready(&mut page);

        let Step::Tween(drop) = &page.timelines[0].steps[0] else {
            panic!("expected drop tween first");
        };
        assert_eq!(drop.targets, vec![back, front]);
        assert_eq!(drop.props, vec![Prop::TranslateY(280.0)]);
    }

    #[test]
    fn missing_targets_skip_only_their_steps() {
        let mut page = FakePage::new();
        page.add(ENVELOPE_LID);
        ready(&mut page);

        let timeline = &page.timelines[0];
        assert_eq!(timeline.steps.len(), 3);
        assert_eq!(tween_props(timeline), vec![&Prop::RotateX(-180.0)]);
    }

    #[test]
    fn envelope_plays_once_per_page_load() {
        let (mut page, _) = envelope_page();
        let mut script = ready(&mut page);
        script.on_ready(&mut page);

        assert_eq!(page.timelines.len(), 1);
    }

    #[test]
    fn context_resolves_hooks_once() {
        let (mut page, [lid, wrapper, invitation, space]) = envelope_page();
        let script = ready(&mut page);
        let context = script.context().unwrap();

        assert_eq!(context.envelope_lid, Some(lid));
        assert_eq!(context.envelope_wrapper, Some(wrapper));
        assert_eq!(context.invitation_wrapper, Some(invitation));
        assert_eq!(context.empty_space, Some(space));
        assert_eq!(context.invitee, None);
        assert!(context.envelope_layers.is_empty());
    }
}
