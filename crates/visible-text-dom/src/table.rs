//! Structural table accessors.

use crate::document::NodeRef;
use crate::kind::NodeKind;

impl<'a> NodeRef<'a> {
    /// The first `<thead>` of a table
    pub fn table_header(&self) -> Option<NodeRef<'a>> {
        self.first_section("thead")
    }

    /// The first `<tfoot>` of a table
    pub fn table_footer(&self) -> Option<NodeRef<'a>> {
        self.first_section("tfoot")
    }

    fn first_section(&self, tag: &str) -> Option<NodeRef<'a>> {
        self.element_children().find(|child| child.tag_name() == tag)
    }

    /// Every row of a table in document order: direct `<tr>` children and
    /// the rows of direct row groups. Rows of nested tables are not included.
    pub fn table_rows(&self) -> Vec<NodeRef<'a>> {
        let mut rows = Vec::new();
        for child in self.element_children() {
            match child.kind() {
                NodeKind::TableRow => rows.push(child),
                NodeKind::TableSection => rows.extend(child.section_rows()),
                _ => {}
            }
        }
        rows
    }

    /// Direct `<tr>` children of a row group
    pub fn section_rows(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.element_children()
            .filter(|child| child.kind() == NodeKind::TableRow)
    }

    /// `<td>` and `<th>` children of a row
    pub fn row_cells(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.element_children()
            .filter(|child| child.kind() == NodeKind::TableCell)
    }

    /// Text of the first `<caption>`, if the table has one
    pub fn caption_text(&self) -> Option<String> {
        self.element_children()
            .find(|child| child.kind() == NodeKind::Caption)
            .map(|caption| caption.text_content())
    }
}
