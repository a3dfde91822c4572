//! Fluent dialog builder over the modal stack.
//!
//! A dialog is a conventionalized modal: a header row (back button, title,
//! close button), a content region, and a footer row of action buttons. The
//! builder assembles that subtree out of ordinary layout nodes and pushes it
//! onto a named modal container, so dialogs get stacking, fades, and
//! backdrop cancelation for free.

use std::time::Instant;

use crate::attr::key::AttrKey;
use crate::attr::value::{Gravity, Value};
use crate::engine::{Engine, EngineError};
use crate::modal::{GravitySpec, MarginSpec, ModalContent, ModalOptions};
use crate::surface::Surface;
use crate::tree::node::{Callback, NodeData, NodeId, NodeKind};

// ---------------------------------------------------------------------------
// Specs
// ---------------------------------------------------------------------------

/// An icon-only button (header corners).
#[derive(Clone)]
pub struct IconButton {
    pub icon: String,
    pub on_click: Option<Callback>,
}

impl IconButton {
    pub fn new(icon: impl Into<String>) -> Self {
        IconButton { icon: icon.into(), on_click: None }
    }

    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click = Some(Callback::new(handler));
        self
    }
}

/// A labeled footer button, optionally with an icon.
#[derive(Clone)]
pub struct IconTextButton {
    pub text: String,
    pub icon: Option<String>,
    pub on_click: Option<Callback>,
}

impl IconTextButton {
    pub fn new(text: impl Into<String>) -> Self {
        IconTextButton { text: text.into(), icon: None, on_click: None }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn on_click(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_click = Some(Callback::new(handler));
        self
    }
}

/// The header row: optional corner buttons around an aligned title.
#[derive(Clone, Default)]
pub struct HeaderSpec {
    pub title: String,
    pub title_gravity: Option<Gravity>,
    pub back: Option<IconButton>,
    pub close: Option<IconButton>,
}

/// The footer row: a neutral action on the left, negative and positive
/// actions pushed to the right.
#[derive(Clone, Default)]
pub struct FooterSpec {
    pub neutral: Option<IconTextButton>,
    pub negative: Option<IconTextButton>,
    pub positive: Option<IconTextButton>,
}

/// What fills the dialog between header and footer.
#[derive(Clone, Default)]
pub enum DialogContent {
    #[default]
    None,
    /// External content loaded through the surface.
    Url(String),
    /// Host markup.
    Markup(String),
    /// A detached node adopted into the content region.
    Node(NodeId),
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builds and drives one dialog on a named modal container.
pub struct DialogBuilder {
    container_id: String,
    dialog_id: String,
    header: Option<HeaderSpec>,
    content: DialogContent,
    footer: Option<FooterSpec>,
    options: ModalOptions,
}

impl DialogBuilder {
    /// Target the modal container with element id `container_id`; the
    /// dialog itself is stacked under `dialog_id`.
    pub fn new(container_id: impl Into<String>, dialog_id: impl Into<String>) -> Self {
        DialogBuilder {
            container_id: container_id.into(),
            dialog_id: dialog_id.into(),
            header: None,
            content: DialogContent::None,
            footer: None,
            options: ModalOptions::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.header.get_or_insert_with(HeaderSpec::default).title = title.into();
        self
    }

    pub fn title_gravity(mut self, gravity: Gravity) -> Self {
        self.header.get_or_insert_with(HeaderSpec::default).title_gravity = Some(gravity);
        self
    }

    pub fn back_button(mut self, button: IconButton) -> Self {
        self.header.get_or_insert_with(HeaderSpec::default).back = Some(button);
        self
    }

    pub fn close_button(mut self, button: IconButton) -> Self {
        self.header.get_or_insert_with(HeaderSpec::default).close = Some(button);
        self
    }

    pub fn content(mut self, content: DialogContent) -> Self {
        self.content = content;
        self
    }

    pub fn neutral_button(mut self, button: IconTextButton) -> Self {
        self.footer.get_or_insert_with(FooterSpec::default).neutral = Some(button);
        self
    }

    pub fn negative_button(mut self, button: IconTextButton) -> Self {
        self.footer.get_or_insert_with(FooterSpec::default).negative = Some(button);
        self
    }

    pub fn positive_button(mut self, button: IconTextButton) -> Self {
        self.footer.get_or_insert_with(FooterSpec::default).positive = Some(button);
        self
    }

    /// Override the modal presentation wholesale.
    pub fn modal_options(mut self, options: ModalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn width(mut self, value: Value) -> Self {
        self.options.width = Some(value);
        self
    }

    pub fn height(mut self, value: Value) -> Self {
        self.options.height = Some(value);
        self
    }

    pub fn gravity(mut self, spec: GravitySpec) -> Self {
        self.options.gravity = Some(spec);
        self
    }

    pub fn margins(mut self, spec: MarginSpec) -> Self {
        self.options.margins = Some(spec);
        self
    }

    pub fn cancelable(mut self, cancelable: bool) -> Self {
        self.options.cancelable = cancelable;
        self
    }

    // ── Driving the stack ────────────────────────────────────────────

    /// Build the dialog subtree and push it onto the container's stack.
    pub fn show(
        &self,
        engine: &mut Engine,
        surface: &mut dyn Surface,
        now: Instant,
    ) -> Result<NodeId, EngineError> {
        let container = engine.node_by_id(&self.container_id)?;
        // Already stacked: hand back the live subtree instead of building a
        // duplicate the stack would refuse anyway.
        let already_stacked = engine.tree().children(container).iter().any(|&entry| {
            engine
                .tree()
                .get(entry)
                .map(|data| data.modal_id.as_deref() == Some(self.dialog_id.as_str()))
                .unwrap_or(false)
        });
        if already_stacked {
            return engine.node_by_id(&self.dialog_id);
        }
        let root = self.build(engine, surface);
        engine.show_modal(
            surface,
            container,
            &self.dialog_id,
            ModalContent::Node(root),
            self.options.clone(),
            now,
        )?;
        Ok(root)
    }

    /// Dismiss this dialog (and anything stacked above it).
    pub fn dismiss(
        &self,
        engine: &mut Engine,
        surface: &mut dyn Surface,
        now: Instant,
    ) -> Result<(), EngineError> {
        let container = engine.node_by_id(&self.container_id)?;
        engine.dismiss_modal(surface, container, &self.dialog_id, now)
    }

    /// Dismiss the whole stack on this dialog's container.
    pub fn dismiss_all(
        &self,
        engine: &mut Engine,
        surface: &mut dyn Surface,
        now: Instant,
    ) -> Result<(), EngineError> {
        let container = engine.node_by_id(&self.container_id)?;
        engine.dismiss_all_modals(surface, container, now)
    }

    // ── Assembly ─────────────────────────────────────────────────────

    /// Assemble the dialog subtree without stacking it. The returned root
    /// is detached; `show` is the usual entry point.
    pub fn build(&self, engine: &mut Engine, surface: &mut dyn Surface) -> NodeId {
        let root_config = config(&[
            (AttrKey::Width, "100%"),
            (AttrKey::Height, "100%"),
        ]);
        let mut root_data = NodeData::with_config(NodeKind::Linear, root_config);
        root_data.id = Some(self.dialog_id.clone());
        let root = engine.tree_mut().insert(root_data);

        if let Some(header) = &self.header {
            self.build_header(engine, surface, root, header);
        }
        self.build_content(engine, surface, root);
        if let Some(footer) = &self.footer {
            self.build_footer(engine, surface, root, footer);
        }
        root
    }

    fn build_header(
        &self,
        engine: &mut Engine,
        surface: &mut dyn Surface,
        root: NodeId,
        header: &HeaderSpec,
    ) {
        let row_config = config(&[
            (AttrKey::Orientation, "horizontal"),
            (AttrKey::Width, "100%"),
            (AttrKey::Padding, "8px"),
            (AttrKey::GravityVertical, "center"),
        ]);
        let row = engine
            .tree_mut()
            .insert_child(root, NodeData::with_config(NodeKind::Linear, row_config));

        if let Some(back) = &header.back {
            icon_button_node(engine, surface, row, back);
        }

        let title_gravity = match header.title_gravity {
            Some(Gravity::Center) => "center",
            Some(Gravity::End) => "end",
            _ => "start",
        };
        let title_config = config(&[
            (AttrKey::Orientation, "horizontal"),
            (AttrKey::Width, "100%"),
            (AttrKey::GravityHorizontal, title_gravity),
            (AttrKey::GravityVertical, "center"),
        ]);
        let title_row = engine
            .tree_mut()
            .insert_child(row, NodeData::with_config(NodeKind::Linear, title_config));
        let title = engine
            .tree_mut()
            .insert_child(title_row, NodeData::new(NodeKind::View));
        surface.set_markup(title, &header.title);

        if let Some(close) = &header.close {
            icon_button_node(engine, surface, row, close);
        }
    }

    fn build_content(&self, engine: &mut Engine, surface: &mut dyn Surface, root: NodeId) {
        let body_config = config(&[(AttrKey::Width, "100%"), (AttrKey::Height, "100%")]);
        match &self.content {
            DialogContent::Url(src) => {
                let mut cfg = body_config;
                cfg.src = Some(src.clone());
                let body = engine
                    .tree_mut()
                    .insert_child(root, NodeData::with_config(NodeKind::Content, cfg));
                surface.load_content(body, Some(src));
            }
            DialogContent::Markup(markup) => {
                let body = engine
                    .tree_mut()
                    .insert_child(root, NodeData::with_config(NodeKind::Bound, body_config));
                surface.set_markup(body, markup);
            }
            DialogContent::Node(node) => {
                let body = engine
                    .tree_mut()
                    .insert_child(root, NodeData::with_config(NodeKind::Bound, body_config));
                engine.tree_mut().attach(body, *node);
            }
            DialogContent::None => {
                engine
                    .tree_mut()
                    .insert_child(root, NodeData::with_config(NodeKind::Bound, body_config));
            }
        }
    }

    fn build_footer(
        &self,
        engine: &mut Engine,
        surface: &mut dyn Surface,
        root: NodeId,
        footer: &FooterSpec,
    ) {
        let row_config = config(&[
            (AttrKey::Orientation, "horizontal"),
            (AttrKey::Width, "100%"),
            (AttrKey::Padding, "8px"),
            (AttrKey::GravityVertical, "center"),
        ]);
        let row = engine
            .tree_mut()
            .insert_child(root, NodeData::with_config(NodeKind::Linear, row_config));

        if let Some(neutral) = &footer.neutral {
            text_button_node(engine, surface, row, neutral);
        }

        // Remaining actions sit flush right.
        let spacer_config = config(&[
            (AttrKey::Orientation, "horizontal"),
            (AttrKey::Width, "100%"),
            (AttrKey::GravityHorizontal, "end"),
            (AttrKey::GravityVertical, "center"),
        ]);
        let spacer = engine
            .tree_mut()
            .insert_child(row, NodeData::with_config(NodeKind::Linear, spacer_config));
        if let Some(negative) = &footer.negative {
            text_button_node(engine, surface, spacer, negative);
        }
        if let Some(positive) = &footer.positive {
            text_button_node(engine, surface, spacer, positive);
        }
    }
}

fn config(pairs: &[(AttrKey, &str)]) -> crate::attr::config::NodeConfig {
    pairs
        .iter()
        .fold(crate::attr::config::NodeConfig::default(), |cfg, (key, value)| {
            cfg.apply(*key, Some(value))
        })
}

fn icon_button_node(
    engine: &mut Engine,
    surface: &mut dyn Surface,
    parent: NodeId,
    button: &IconButton,
) -> NodeId {
    let cfg = config(&[
        (AttrKey::Width, "40px"),
        (AttrKey::Height, "40px"),
        (AttrKey::FocusMode, "button"),
        (AttrKey::Corner, "20px"),
    ]);
    let mut data = NodeData::with_config(NodeKind::View, cfg);
    data.on_click = button.on_click.clone();
    let node = engine.tree_mut().insert_child(parent, data);
    surface.set_markup(node, &button.icon);
    node
}

fn text_button_node(
    engine: &mut Engine,
    surface: &mut dyn Surface,
    parent: NodeId,
    button: &IconTextButton,
) -> NodeId {
    let cfg = config(&[
        (AttrKey::Height, "36px"),
        (AttrKey::Padding, "8px"),
        (AttrKey::Margin, "4px"),
        (AttrKey::FocusMode, "button"),
        (AttrKey::Corner, "4px"),
    ]);
    let mut data = NodeData::with_config(NodeKind::View, cfg);
    data.on_click = button.on_click.clone();
    let node = engine.tree_mut().insert_child(parent, data);
    match &button.icon {
        Some(icon) => surface.set_markup(node, &format!("{icon} {}", button.text)),
        None => surface.set_markup(node, &button.text),
    }
    node
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::ENTER_DELAY;
    use crate::testing::TestSurface;
    use std::cell::Cell;
    use std::rc::Rc;

    fn host() -> (Engine, NodeId, TestSurface) {
        let mut engine = Engine::new();
        let container = engine.insert_root(NodeData::with_id(NodeKind::Modal, "modals"));
        (engine, container, TestSurface::new(800.0, 600.0))
    }

    fn full_dialog() -> DialogBuilder {
        DialogBuilder::new("modals", "confirm")
            .title("Delete file?")
            .back_button(IconButton::new("arrow_back"))
            .close_button(IconButton::new("close"))
            .content(DialogContent::Markup("<p>This cannot be undone.</p>".into()))
            .neutral_button(IconTextButton::new("Help"))
            .negative_button(IconTextButton::new("Cancel"))
            .positive_button(IconTextButton::new("Delete").icon("delete"))
    }

    #[test]
    fn show_stacks_the_dialog_under_its_id() {
        let (mut engine, container, mut surface) = host();
        let now = Instant::now();
        full_dialog().show(&mut engine, &mut surface, now).unwrap();

        let backdrop = engine.tree().children(container)[0];
        assert_eq!(
            engine.tree().get(backdrop).and_then(|d| d.modal_id.clone()),
            Some("confirm".to_owned())
        );
        // Showing the same dialog again is absorbed by the stack.
        full_dialog().show(&mut engine, &mut surface, now).unwrap();
        assert_eq!(engine.tree().children(container).len(), 1);
    }

    #[test]
    fn the_subtree_has_header_content_and_footer() {
        let (mut engine, _, mut surface) = host();
        full_dialog()
            .show(&mut engine, &mut surface, Instant::now())
            .unwrap();

        let root = engine.node_by_id("confirm").unwrap();
        let rows = engine.tree().children(root).to_vec();
        assert_eq!(rows.len(), 3);

        // Header: back, title row, close.
        let header_kids = engine.tree().children(rows[0]).to_vec();
        assert_eq!(header_kids.len(), 3);
        assert_eq!(surface.markup(header_kids[0]), Some("arrow_back"));
        let title = engine.tree().children(header_kids[1])[0];
        assert_eq!(surface.markup(title), Some("Delete file?"));
        assert_eq!(surface.markup(header_kids[2]), Some("close"));

        // Content region carries the markup.
        assert_eq!(
            surface.markup(rows[1]),
            Some("<p>This cannot be undone.</p>")
        );

        // Footer: neutral, then the right-aligned pair.
        let footer_kids = engine.tree().children(rows[2]).to_vec();
        assert_eq!(footer_kids.len(), 2);
        assert_eq!(surface.markup(footer_kids[0]), Some("Help"));
        let actions = engine.tree().children(footer_kids[1]).to_vec();
        assert_eq!(surface.markup(actions[0]), Some("Cancel"));
        assert_eq!(surface.markup(actions[1]), Some("delete Delete"));
    }

    #[test]
    fn title_defaults_to_the_leading_edge() {
        let (mut engine, _, mut surface) = host();
        DialogBuilder::new("modals", "about")
            .title("About")
            .show(&mut engine, &mut surface, Instant::now())
            .unwrap();

        let root = engine.node_by_id("about").unwrap();
        let header = engine.tree().children(root)[0];
        let title_row = engine.tree().children(header)[0];
        let config = engine
            .tree()
            .get(title_row)
            .map(|d| d.config.clone())
            .unwrap_or_default();
        assert_eq!(config.effective_gravity_h(), Some(Gravity::Start));

        let (mut engine, _, mut surface) = host();
        DialogBuilder::new("modals", "about")
            .title("About")
            .title_gravity(Gravity::Center)
            .show(&mut engine, &mut surface, Instant::now())
            .unwrap();
        let root = engine.node_by_id("about").unwrap();
        let header = engine.tree().children(root)[0];
        let title_row = engine.tree().children(header)[0];
        let config = engine
            .tree()
            .get(title_row)
            .map(|d| d.config.clone())
            .unwrap_or_default();
        assert_eq!(config.effective_gravity_h(), Some(Gravity::Center));
    }

    #[test]
    fn header_only_dialog_skips_the_footer() {
        let (mut engine, _, mut surface) = host();
        DialogBuilder::new("modals", "plain")
            .title("About")
            .show(&mut engine, &mut surface, Instant::now())
            .unwrap();
        let root = engine.node_by_id("plain").unwrap();
        // Header row plus the empty content region.
        assert_eq!(engine.tree().children(root).len(), 2);
    }

    #[test]
    fn url_content_loads_through_the_surface() {
        let (mut engine, _, mut surface) = host();
        DialogBuilder::new("modals", "docs")
            .content(DialogContent::Url("pages/help".into()))
            .show(&mut engine, &mut surface, Instant::now())
            .unwrap();
        let root = engine.node_by_id("docs").unwrap();
        let body = engine.tree().children(root)[0];
        assert_eq!(surface.loaded_src(body), Some(Some("pages/help")));
        assert_eq!(
            engine.tree().get(body).map(|d| d.kind()),
            Some(NodeKind::Content)
        );
    }

    #[test]
    fn buttons_route_clicks() {
        let (mut engine, _, mut surface) = host();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        DialogBuilder::new("modals", "confirm")
            .positive_button(
                IconTextButton::new("OK").on_click(move || counter.set(counter.get() + 1)),
            )
            .show(&mut engine, &mut surface, Instant::now())
            .unwrap();

        let root = engine.node_by_id("confirm").unwrap();
        let footer = *engine.tree().children(root).last().unwrap();
        let spacer = engine.tree().children(footer)[0];
        let ok = engine.tree().children(spacer)[0];
        engine.click(&mut surface, ok, Instant::now()).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn presentation_setters_reach_the_stack() {
        use crate::attr::value::Value;

        let (mut engine, container, mut surface) = host();
        DialogBuilder::new("modals", "wide")
            .title("Wide")
            .width(Value::Percent(60.0))
            .cancelable(false)
            .show(&mut engine, &mut surface, Instant::now())
            .unwrap();

        let backdrop = engine.tree().children(container)[0];
        assert!(engine
            .tree()
            .get(backdrop)
            .map(|d| d.cancel_dismisses.is_none())
            .unwrap_or(false));
        let panel = engine.tree().children(backdrop)[0];
        assert_eq!(
            engine.tree().get(panel).and_then(|d| d.config.width.clone()),
            Some(Value::Percent(60.0))
        );
    }

    #[test]
    fn dismiss_tears_the_dialog_down() {
        let (mut engine, container, mut surface) = host();
        let now = Instant::now();
        let dialog = full_dialog();
        dialog.show(&mut engine, &mut surface, now).unwrap();
        engine.fire_due(&mut surface, now + ENTER_DELAY);

        dialog.dismiss(&mut engine, &mut surface, now).unwrap();
        engine.fire_due(&mut surface, now + std::time::Duration::from_millis(300));
        assert!(engine.tree().children(container).is_empty());
        assert!(engine.node_by_id("confirm").is_err());
    }

    #[test]
    fn unknown_container_id_errors() {
        let mut engine = Engine::new();
        let mut surface = TestSurface::new(800.0, 600.0);
        let result = DialogBuilder::new("nowhere", "x").show(
            &mut engine,
            &mut surface,
            Instant::now(),
        );
        assert_eq!(
            result,
            Err(EngineError::UnknownElementId("nowhere".to_owned()))
        );
    }
}
