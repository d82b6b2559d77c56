//! Per-node-kind formatting rules.
//!
//! Each rule feeds a node's content into the shared [`TextBuilder`],
//! recursing into children where the element's content is visible.

use tracing::warn;
use visible_text_core::{Mode, TextBuilder};

use crate::document::{NodeId, NodeRef};
use crate::host::Host;
use crate::kind::NodeKind;
use crate::options::SerializerOptions;
use crate::style::StyleProvider;
use crate::whitespace::WhitespaceResolver;
use crate::{Result, VisibleTextError};

pub(crate) struct Formatter<'a> {
    styles: &'a dyn StyleProvider,
    host: &'a dyn Host,
    options: &'a SerializerOptions,
    whitespace: WhitespaceResolver<'a>,
    builder: TextBuilder,
    depth: usize,
}

impl<'a> Formatter<'a> {
    pub(crate) fn new(
        styles: &'a dyn StyleProvider,
        host: &'a dyn Host,
        options: &'a SerializerOptions,
    ) -> Self {
        Self {
            styles,
            host,
            options,
            whitespace: WhitespaceResolver::new(styles, options.css_enabled),
            builder: TextBuilder::new(),
            depth: 0,
        }
    }

    pub(crate) fn whitespace(&self) -> WhitespaceResolver<'a> {
        self.whitespace
    }

    pub(crate) fn into_text(self) -> String {
        self.builder.into_text()
    }

    /// Format one node. Returns whether it emitted any content.
    pub(crate) fn append_node(&mut self, node: NodeRef<'_>, mode: Mode) -> Result<bool> {
        if self.depth >= self.options.max_depth {
            warn!(limit = self.options.max_depth, node = %node.id(), "node tree too deep");
            return Err(VisibleTextError::TreeTooDeep {
                limit: self.options.max_depth,
            });
        }

        let outer_content = self.builder.content_added();
        self.builder.reset_content_added();
        self.depth += 1;
        let result = self.dispatch(node, mode);
        self.depth -= 1;

        let emitted = self.builder.content_added();
        if outer_content {
            self.builder.mark_content_added();
        }
        result.map(|()| emitted)
    }

    fn dispatch(&mut self, node: NodeRef<'_>, mode: Mode) -> Result<()> {
        match node.kind() {
            NodeKind::Text => self.append_text(node, mode),
            NodeKind::Comment
            | NodeKind::Script
            | NodeKind::Style
            | NodeKind::NoFrames
            | NodeKind::HiddenInput
            | NodeKind::SubmitInput
            | NodeKind::ResetInput
            | NodeKind::CheckBoxInput
            | NodeKind::RadioInput
            | NodeKind::Title => {}
            NodeKind::Input => self.append_input(node, mode),
            NodeKind::Break => self.builder.append_break(mode),
            NodeKind::TextArea => self.append_text_area(node),
            NodeKind::TableRow => self.append_table_row(node, mode)?,
            NodeKind::Table => self.append_table(node, mode)?,
            NodeKind::Select | NodeKind::OrderedList | NodeKind::UnorderedList => {
                self.append_list(node, mode)?
            }
            NodeKind::Option => self.append_children(node, mode)?,
            NodeKind::Preformatted => self.append_preformatted(node)?,
            NodeKind::InlineFrame => self.append_inline_frame(node, mode),
            NodeKind::Menu => self.append_menu(node, mode)?,
            NodeKind::Details => self.append_details(node, mode)?,
            NodeKind::NoScript if self.options.javascript_enabled => {}
            NodeKind::NoScript
            | NodeKind::TableSection
            | NodeKind::TableCell
            | NodeKind::Caption
            | NodeKind::Summary
            | NodeKind::Body
            | NodeKind::Element
            | NodeKind::Other => self.append_dom_node(node, mode)?,
        }
        Ok(())
    }

    fn append_children(&mut self, node: NodeRef<'_>, mode: Mode) -> Result<()> {
        let child_mode = self.whitespace.resolve_for_child(node, mode);
        for child in node.children() {
            self.append_node(child, child_mode)?;
        }
        Ok(())
    }

    /// Generic rule: block-level elements are bracketed by separators.
    fn append_dom_node(&mut self, node: NodeRef<'_>, mode: Mode) -> Result<()> {
        let block = node.kind() != NodeKind::Body && node.is_element() && self.is_block(node);

        if block {
            self.builder.append_block_separator();
        }
        self.append_children(node, mode)?;
        if block {
            self.builder.append_block_separator();
        }
        Ok(())
    }

    fn is_block(&self, element: NodeRef<'_>) -> bool {
        self.styles
            .computed_value(element, "display")
            .is_some_and(|display| display.eq_ignore_ascii_case("block"))
    }

    fn append_text(&mut self, text: NodeRef<'_>, mode: Mode) {
        let data = text.data_text().unwrap_or_default();
        let parent = text.parent();
        let in_script_or_title = parent
            .is_some_and(|parent| matches!(parent.kind(), NodeKind::Script | NodeKind::Title));

        if in_script_or_title {
            self.builder.append(data, Mode::PreLine);
        }
        let visible = match parent {
            None => true,
            Some(parent) => in_script_or_title || self.host.is_displayed(parent),
        };
        if visible {
            self.builder.append(data, mode);
        }
    }

    fn append_input(&mut self, input: NodeRef<'_>, mode: Mode) {
        if let Some(value) = input.attr("value") {
            self.builder.append(value, mode);
        }
    }

    fn append_text_area(&mut self, text_area: NodeRef<'_>) {
        if self.host.is_displayed(text_area) {
            let mode = self.whitespace.resolve_initial(text_area, Mode::Pre);
            self.builder.append(&text_area.text_content(), mode);
            self.builder.trim_right(Mode::Pre);
        }
    }

    fn append_preformatted(&mut self, pre: NodeRef<'_>) -> Result<()> {
        if !self.host.is_displayed(pre) {
            return Ok(());
        }
        let mode = self.whitespace.resolve_initial(pre, Mode::Pre);
        self.builder.append_block_separator();
        self.append_children(pre, mode)?;
        // Interior blanks are kept verbatim, the last run is not.
        self.builder.drop_trailing_blank_run();
        self.builder.append_block_separator();
        Ok(())
    }

    fn append_table_row(&mut self, row: NodeRef<'_>, mode: Mode) -> Result<()> {
        for (index, cell) in row.row_cells().enumerate() {
            if index > 0 {
                self.builder.append_blank();
            }
            self.append_children(cell, mode)?;
        }
        Ok(())
    }

    fn append_table(&mut self, table: NodeRef<'_>, mode: Mode) -> Result<()> {
        self.builder.append_block_separator();
        if let Some(caption) = table.caption_text() {
            self.builder.append(&caption, mode);
            self.builder.append_block_separator();
        }

        // The first thead is shown first and the first tfoot last,
        // wherever they appear in source order.
        let header = table.table_header();
        let footer = table.table_footer();
        let rows = table.table_rows();
        let mut first = true;

        if let Some(header) = header {
            let header_rows: Vec<_> = header.section_rows().collect();
            first = self.append_table_rows(&header_rows, first, &[], mode)?;
        }

        let skip: Vec<NodeId> = header.into_iter().chain(footer).map(|group| group.id()).collect();
        first = self.append_table_rows(&rows, first, &skip, mode)?;

        if let Some(footer) = footer {
            let footer_rows: Vec<_> = footer.section_rows().collect();
            self.append_table_rows(&footer_rows, first, &[], mode)?;
        } else if rows.is_empty() {
            if let Some(first_child) = table.first_child() {
                self.append_node(first_child, mode)?;
            }
        }

        self.builder.append_block_separator();
        Ok(())
    }

    /// Rows are separated by block separators; rows whose parent is one of
    /// `skip_parents` are left out. Returns whether no row was written yet.
    fn append_table_rows(
        &mut self,
        rows: &[NodeRef<'_>],
        mut first: bool,
        skip_parents: &[NodeId],
        mode: Mode,
    ) -> Result<bool> {
        for row in rows {
            if row
                .parent()
                .is_some_and(|parent| skip_parents.contains(&parent.id()))
            {
                continue;
            }
            if !first {
                self.builder.append_block_separator();
            }
            first = false;
            self.append_table_row(*row, mode)?;
        }
        Ok(first)
    }

    /// `select`, `ol` and `ul`: items are separated by block separators,
    /// but only once an item actually produced content.
    fn append_list(&mut self, list: NodeRef<'_>, mode: Mode) -> Result<()> {
        self.builder.append_block_separator();
        let list_mode = self.whitespace.resolve_initial(list, mode);
        let mut separator_pending = false;

        for item in list.children() {
            if separator_pending {
                self.builder.append_block_separator();
                separator_pending = false;
            }
            let item_mode = self.whitespace.resolve_initial(item, list_mode);
            if self.append_node(item, item_mode)? {
                separator_pending = true;
            }
        }

        self.builder.append_block_separator();
        Ok(())
    }

    fn append_inline_frame(&mut self, frame: NodeRef<'_>, mode: Mode) {
        if !self.host.is_displayed(frame) {
            return;
        }
        self.builder.append_block_separator();
        if let Some(text) = self.host.embedded_document_text(frame) {
            self.builder.append(&text, mode);
        }
        self.builder.append_block_separator();
    }

    fn append_menu(&mut self, menu: NodeRef<'_>, mode: Mode) -> Result<()> {
        self.builder.append_block_separator();
        for (index, item) in menu.children().enumerate() {
            if index > 0 {
                self.builder.append_block_separator();
            }
            self.append_node(item, mode)?;
        }
        self.builder.append_block_separator();
        Ok(())
    }

    /// Closed details only show their summary.
    fn append_details(&mut self, details: NodeRef<'_>, mode: Mode) -> Result<()> {
        if details.has_attr("open") {
            return self.append_children(details, mode);
        }
        for summary in details
            .children()
            .filter(|child| child.kind() == NodeKind::Summary)
        {
            self.append_node(summary, mode)?;
        }
        Ok(())
    }
}
