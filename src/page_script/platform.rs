//! Host capabilities the page script runs against.
//!
//! The [`Platform`] trait is the only way the script touches the page: DOM
//! lookups and mutation, window scrolling, deferred callbacks and the
//! animation engine. A browser binding implements it over the real DOM; the
//! test suite implements it over an in-memory page.

use super::timeline::Timeline;
use std::fmt;
use std::time::Duration;

/// When a scheduled task should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Before the next repaint.
    NextFrame,
    After(Duration),
}

/// Work the script asks the host to run later via [`Platform::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Scroll reset on the first animation frame after ready.
    ResetScrollFrame,
    /// Scroll reset shortly after that frame.
    ResetScrollLate,
}

pub trait Platform {
    /// Handle to a page element.
    type Node: Clone + PartialEq + fmt::Debug;

    /// First element matching a CSS selector.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// All elements matching a CSS selector, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    fn body(&self) -> Self::Node;
    fn document_element(&self) -> Self::Node;

    /// Query string of the current URL, including the leading `?`.
    fn location_search(&self) -> String;

    fn set_text(&mut self, node: &Self::Node, text: &str);
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Stop the browser from restoring the previous scroll position.
    fn disable_scroll_restoration(&mut self);
    fn scroll_window_to(&mut self, x: f64, y: f64);
    fn set_scroll_top(&mut self, node: &Self::Node, top: f64);
    /// Smoothly scroll `node` into view.
    fn scroll_into_view(&mut self, node: &Self::Node);

    /// Inner height of the viewport in pixels.
    fn viewport_height(&self) -> f64;
    /// Bottom edge of `node` relative to the viewport, in pixels.
    fn bottom_of(&self, node: &Self::Node) -> f64;

    fn schedule(&mut self, when: Deferred, task: Task);
    /// Hand a timeline to the animation engine for playback.
    fn play(&mut self, timeline: Timeline<Self::Node>);

    /// Write a line to the console.
    fn log(&mut self, message: &str);
}
