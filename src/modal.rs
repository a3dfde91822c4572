//! The modal stack controller.
//!
//! A [`NodeKind::Modal`](crate::tree::node::NodeKind) container hosts a
//! stack of modal entries, each a full-extent backdrop wrapping a content
//! panel. Entries are keyed by a caller-chosen identity: showing an identity
//! already on the stack is a no-op, dismissing one fades it and every entry
//! stacked above it.
//!
//! Transitions are opacity fades driven by the host; the controller only
//! flips properties and schedules the two timed steps (the enter flip
//! shortly after insertion so the host registers the transition start, and
//! the removal once the fade-out has played).

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use crate::attr::config::{BackdropMode, NodeConfig};
use crate::attr::value::{Gravity, Value};
use crate::engine::EngineError;
use crate::layout;
use crate::surface::{Prop, Surface};
use crate::tree::node::{ModalState, NodeData, NodeId, NodeKind};
use crate::tree::Tree;

/// Delay before the enter fade is triggered, long enough for the host to
/// commit the entry's initial zero-opacity state.
pub const ENTER_DELAY: Duration = Duration::from_millis(10);

/// Fallback fade duration when the container declares none, or declares
/// something unparseable.
pub const DEFAULT_TRANSITION_MS: u64 = 300;

const DEFAULT_MODAL_BACKGROUND: &str = "white";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What goes inside a modal panel.
#[derive(Debug, Clone)]
pub enum ModalContent {
    /// Host markup rendered into the panel.
    Markup(String),
    /// A detached node adopted into the panel.
    Node(NodeId),
}

/// Panel placement inside the backdrop.
#[derive(Debug, Clone, Copy)]
pub enum GravitySpec {
    /// One gravity for both axes.
    Both(Gravity),
    /// Independent per-axis gravity; `None` keeps the default.
    Axes {
        horizontal: Option<Gravity>,
        vertical: Option<Gravity>,
    },
}

/// Panel margins inside the backdrop.
#[derive(Debug, Clone)]
pub enum MarginSpec {
    /// One value on all four sides.
    All(Value),
    /// Independent per-side margins; `None` keeps the default.
    Sides {
        left: Option<Value>,
        right: Option<Value>,
        top: Option<Value>,
        bottom: Option<Value>,
    },
}

/// Per-show overrides over the container's modal defaults.
#[derive(Debug, Clone)]
pub struct ModalOptions {
    pub width: Option<Value>,
    pub height: Option<Value>,
    pub gravity: Option<GravitySpec>,
    pub margins: Option<MarginSpec>,
    /// Whether clicking the backdrop dismisses the modal.
    pub cancelable: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        ModalOptions {
            width: None,
            height: None,
            gravity: None,
            margins: None,
            cancelable: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Timer queue
// ---------------------------------------------------------------------------

/// A deferred modal step.
#[derive(Debug, Clone)]
pub enum TimerAction {
    /// Flip an entering backdrop visible.
    EnterModal { container: NodeId, backdrop: NodeId },
    /// Remove faded-out entries from the stack.
    RemoveEntries { container: NodeId, entries: Vec<NodeId> },
    /// Remove every entry and release the container.
    ClearStack { container: NodeId },
}

#[derive(Debug)]
struct Scheduled {
    deadline: Instant,
    seq: u64,
    action: TimerAction,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}
impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the binary heap pops the earliest deadline first; `seq`
// breaks ties in scheduling order.
impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending deferred steps, ordered by deadline.
#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Scheduled>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        TimerQueue::default()
    }

    pub fn schedule(&mut self, deadline: Instant, action: TimerAction) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Scheduled { deadline, seq, action });
    }

    /// The earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|scheduled| scheduled.deadline)
    }

    /// Pop the next action whose deadline has passed.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerAction> {
        if self.next_deadline()? <= now {
            self.heap.pop().map(|scheduled| scheduled.action)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Stack operations
// ---------------------------------------------------------------------------

/// The container's declared fade duration in milliseconds.
fn transition_ms(config: &NodeConfig) -> u64 {
    config
        .transition_duration
        .as_deref()
        .and_then(|raw| raw.trim().trim_end_matches("ms").trim().parse::<f64>().ok())
        .filter(|ms| ms.is_finite() && *ms >= 0.0)
        .map(|ms| ms as u64)
        .unwrap_or(DEFAULT_TRANSITION_MS)
}

fn ensure_modal_container(tree: &Tree, container: NodeId) -> Result<NodeConfig, EngineError> {
    let data = tree.get(container).ok_or(EngineError::NodeNotFound)?;
    if data.kind() != NodeKind::Modal {
        return Err(EngineError::NotAModalContainer);
    }
    Ok(data.config.clone())
}

fn entry_with_id(tree: &Tree, container: NodeId, id: &str) -> Option<NodeId> {
    tree.children(container)
        .iter()
        .copied()
        .find(|&child| {
            tree.get(child)
                .map(|data| data.modal_id.as_deref() == Some(id))
                .unwrap_or(false)
        })
}

fn backdrop_config(container_config: &NodeConfig) -> NodeConfig {
    let mut config = NodeConfig {
        width: Some(Value::Percent(100.0)),
        height: Some(Value::Percent(100.0)),
        ..Default::default()
    };
    match container_config.backdrop_mode.unwrap_or(BackdropMode::Blur) {
        BackdropMode::Blur => config.background = Some("#00000033".to_owned()),
        BackdropMode::Dim => config.background = Some("#00000066".to_owned()),
        BackdropMode::None => {}
    }
    config
}

fn panel_config(container_config: &NodeConfig, options: &ModalOptions) -> NodeConfig {
    let mut config = NodeConfig {
        width: Some(options.width.clone().unwrap_or(Value::Percent(80.0))),
        height: Some(options.height.clone().unwrap_or(Value::Percent(80.0))),
        background: Some(
            container_config
                .modal_background
                .clone()
                .unwrap_or_else(|| DEFAULT_MODAL_BACKGROUND.to_owned()),
        ),
        elevation: Some(container_config.modal_elevation.unwrap_or(true)),
        ..Default::default()
    };
    config.corner.all =
        Some(container_config.modal_corner.clone().unwrap_or(Value::Px(5.0)));

    match options.gravity {
        Some(GravitySpec::Both(gravity)) => config.layout_gravity = Some(gravity),
        Some(GravitySpec::Axes { horizontal, vertical }) => {
            config.layout_gravity_h = Some(horizontal.unwrap_or(Gravity::Center));
            config.layout_gravity_v = Some(vertical.unwrap_or(Gravity::Center));
        }
        None => config.layout_gravity = Some(Gravity::Center),
    }

    match &options.margins {
        Some(MarginSpec::All(value)) => config.margin.all = Some(value.clone()),
        Some(MarginSpec::Sides { left, right, top, bottom }) => {
            config.margin.all = Some(Value::Percent(4.0));
            config.margin.left = left.clone();
            config.margin.right = right.clone();
            config.margin.top = top.clone();
            config.margin.bottom = bottom.clone();
        }
        None => config.margin.all = Some(Value::Percent(4.0)),
    }

    config
}

/// Push a modal onto the stack.
///
/// A no-op if the identity is already stacked. The entry is inserted fully
/// transparent; the enter timer flips it visible so the host plays the fade.
pub fn show(
    tree: &mut Tree,
    surface: &mut dyn Surface,
    timers: &mut TimerQueue,
    container: NodeId,
    id: &str,
    content: ModalContent,
    options: ModalOptions,
    now: Instant,
) -> Result<(), EngineError> {
    let container_config = ensure_modal_container(tree, container)?;
    if entry_with_id(tree, container, id).is_some() {
        return Ok(());
    }

    let ms = transition_ms(&container_config);

    // The backdrop entry: a free container covering the whole stack host.
    let mut backdrop_data =
        NodeData::with_config(NodeKind::Free, backdrop_config(&container_config));
    backdrop_data.modal_id = Some(id.to_owned());
    backdrop_data.modal_state = Some(ModalState::Entering);
    if options.cancelable {
        backdrop_data.cancel_dismisses = Some(id.to_owned());
    }
    let backdrop = tree.insert_child(container, backdrop_data);

    if container_config.backdrop_mode.unwrap_or(BackdropMode::Blur) == BackdropMode::Blur {
        surface.set(backdrop, Prop::BackdropFilter, "blur(10px)");
    }
    surface.set(backdrop, Prop::Opacity, "0");
    surface.set(backdrop, Prop::PointerEvents, "none");
    surface.set(backdrop, Prop::Transition, &format!("opacity {ms}ms ease-in-out"));

    // The panel inside it.
    let panel = tree.insert_child(
        backdrop,
        NodeData::with_config(NodeKind::Bound, panel_config(&container_config, &options)),
    );
    surface.set(panel, Prop::PointerEvents, "all");
    match content {
        ModalContent::Markup(markup) => surface.set_markup(panel, &markup),
        ModalContent::Node(node) => tree.attach(panel, node),
    }

    // The stack host intercepts input while anything is on it.
    surface.set(container, Prop::PointerEvents, "all");

    layout::bound::layout(tree, surface, container);
    layout::free::layout(tree, surface, backdrop);

    timers.schedule(
        now + ENTER_DELAY,
        TimerAction::EnterModal { container, backdrop },
    );
    Ok(())
}

/// Dismiss an identity and everything stacked above it.
///
/// Unknown identities are ignored. Affected entries fade out immediately
/// and are removed once the fade has played.
pub fn dismiss(
    tree: &mut Tree,
    surface: &mut dyn Surface,
    timers: &mut TimerQueue,
    container: NodeId,
    id: &str,
    now: Instant,
) -> Result<(), EngineError> {
    let container_config = ensure_modal_container(tree, container)?;
    let Some(target) = entry_with_id(tree, container, id) else {
        return Ok(());
    };
    let Some(index) = tree.index_of(container, target) else {
        return Ok(());
    };

    let entries: Vec<NodeId> = tree.children(container)[index..].to_vec();
    for &entry in &entries {
        fade_out(tree, surface, entry);
    }

    let ms = transition_ms(&container_config);
    timers.schedule(
        now + Duration::from_millis(ms),
        TimerAction::RemoveEntries { container, entries },
    );
    Ok(())
}

/// Dismiss the whole stack and release the container immediately.
pub fn dismiss_all(
    tree: &mut Tree,
    surface: &mut dyn Surface,
    timers: &mut TimerQueue,
    container: NodeId,
    now: Instant,
) -> Result<(), EngineError> {
    let container_config = ensure_modal_container(tree, container)?;
    let entries: Vec<NodeId> = tree.children(container).to_vec();
    for &entry in &entries {
        fade_out(tree, surface, entry);
    }
    surface.set(container, Prop::PointerEvents, "none");

    let ms = transition_ms(&container_config);
    timers.schedule(
        now + Duration::from_millis(ms),
        TimerAction::ClearStack { container },
    );
    Ok(())
}

fn fade_out(tree: &mut Tree, surface: &mut dyn Surface, entry: NodeId) {
    surface.set(entry, Prop::Opacity, "0");
    surface.set(entry, Prop::PointerEvents, "none");
    if let Some(data) = tree.get_mut(entry) {
        data.modal_state = Some(ModalState::Exiting);
    }
}

/// Run one expired timer action.
pub fn fire(tree: &mut Tree, surface: &mut dyn Surface, action: TimerAction) {
    match action {
        TimerAction::EnterModal { container: _, backdrop } => {
            if !tree.contains(backdrop) {
                return;
            }
            // A dismiss racing the enter timer wins.
            let exiting = tree
                .get(backdrop)
                .map(|data| data.modal_state == Some(ModalState::Exiting))
                .unwrap_or(true);
            if exiting {
                return;
            }
            surface.set(backdrop, Prop::Opacity, "1");
            surface.set(backdrop, Prop::PointerEvents, "all");
            if let Some(data) = tree.get_mut(backdrop) {
                data.modal_state = Some(ModalState::Shown);
            }
        }
        TimerAction::RemoveEntries { container, entries } => {
            for entry in entries {
                if tree.contains(entry) {
                    tree.remove(entry);
                }
            }
            if tree.children(container).is_empty() {
                surface.set(container, Prop::PointerEvents, "none");
            }
        }
        TimerAction::ClearStack { container } => {
            let entries: Vec<NodeId> = tree.children(container).to_vec();
            for entry in entries {
                tree.remove(entry);
            }
            surface.set(container, Prop::PointerEvents, "none");
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
