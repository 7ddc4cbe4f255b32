//! Typed layout nodes describing the form.
//!
//! The tree mirrors the building blocks of a paginated visual document: a page holds rows and
//! columns, which in turn hold text leaves and vector graphics.  Like the rest of the model, the
//! types avoid referencing the rendering crate so the same tree can feed the PDF backend and the
//! preview surface.

use crate::graphic::VectorGraphic;

/// An sRGB colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Formats the colour as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Space around the four sides of a box, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub const ZERO: Edges = Edges {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Horizontal spacing only.
    pub fn horizontal(value: f64) -> Self {
        Self {
            left: value,
            right: value,
            ..Self::ZERO
        }
    }

    pub fn with_top(mut self, value: f64) -> Self {
        self.top = value;
        self
    }

    pub fn with_bottom(mut self, value: f64) -> Self {
        self.bottom = value;
        self
    }

    pub fn with_left(mut self, value: f64) -> Self {
        self.left = value;
        self
    }

    pub fn with_right(mut self, value: f64) -> Self {
        self.right = value;
        self
    }

    /// Sum of left and right.
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Independently toggleable hairline borders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BorderSides {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl BorderSides {
    pub const NONE: BorderSides = BorderSides {
        top: false,
        right: false,
        bottom: false,
        left: false,
    };

    pub const ALL: BorderSides = BorderSides {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn with_top(mut self, on: bool) -> Self {
        self.top = on;
        self
    }

    pub fn with_right(mut self, on: bool) -> Self {
        self.right = on;
        self
    }

    pub fn with_bottom(mut self, on: bool) -> Self {
        self.bottom = on;
        self
    }

    pub fn with_left(mut self, on: bool) -> Self {
        self.left = on;
        self
    }

    /// Returns whether at least one side is drawn.
    pub fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }
}

/// Main-axis size of a box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Length {
    /// Exact size in points.
    Fixed(f64),
    /// Takes whatever space the parent has left.
    #[default]
    Fill,
}

/// Placement of children along an axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Start,
    Center,
}

/// Horizontal alignment of a line of text inside its box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Box geometry shared by rows and columns.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoxStyle {
    pub width: Length,
    pub height: Option<f64>,
    pub padding: Edges,
    pub margin: Edges,
    pub border: BorderSides,
    /// Distribution of children along the container's own direction.
    pub justify: Alignment,
    /// Placement of children across the container's direction.
    pub align: Alignment,
}

impl BoxStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Length::Fixed(width);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    pub fn border(mut self, border: BorderSides) -> Self {
        self.border = border;
        self
    }

    pub fn justify(mut self, justify: Alignment) -> Self {
        self.justify = justify;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Centers children on both axes.
    pub fn centered(self) -> Self {
        self.justify(Alignment::Center).align(Alignment::Center)
    }
}

/// Typography of a text leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: u8,
    pub bold: bool,
    pub color: Rgb,
    pub align: TextAlign,
}

impl TextStyle {
    /// Regular black left-aligned text of the given size.
    pub fn new(font_size: u8) -> Self {
        Self {
            font_size,
            bold: false,
            color: Rgb::BLACK,
            align: TextAlign::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

/// A single line of non-wrapping text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLeaf {
    pub content: String,
    pub style: TextStyle,
    pub margin: Edges,
}

impl TextLeaf {
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
            margin: Edges::ZERO,
        }
    }

    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }
}

/// A row or column together with its children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Container {
    /// Optional region name, reported by the layout pass.
    pub name: Option<String>,
    pub style: BoxStyle,
    pub children: Vec<LayoutNode>,
}

impl Container {
    pub fn new(style: BoxStyle) -> Self {
        Self {
            name: None,
            style,
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn child(mut self, child: impl Into<LayoutNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = LayoutNode>,
    {
        self.children.extend(children);
        self
    }
}

/// Root page of the document.
#[derive(Clone, Debug, PartialEq)]
pub struct PageNode {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub base_font_size: u8,
    pub children: Vec<LayoutNode>,
}

/// Every kind of node that can appear in the tree.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutNode {
    Page(PageNode),
    /// Children laid out left to right.
    Row(Container),
    /// Children stacked top to bottom.
    Column(Container),
    Text(TextLeaf),
    Graphic(VectorGraphic),
}

impl LayoutNode {
    /// Direct children of the node.
    pub fn children(&self) -> &[LayoutNode] {
        match self {
            Self::Page(page) => &page.children,
            Self::Row(container) | Self::Column(container) => &container.children,
            Self::Text(_) | Self::Graphic(_) => &[],
        }
    }

    /// Region name of a row or column.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Row(container) | Self::Column(container) => container.name.as_deref(),
            _ => None,
        }
    }

    /// Box style of a row or column.
    pub fn box_style(&self) -> Option<&BoxStyle> {
        match self {
            Self::Row(container) | Self::Column(container) => Some(&container.style),
            _ => None,
        }
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of nodes in the subtree, including this one.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Finds the first row or column with the given region name.
    pub fn find(&self, name: &str) -> Option<&LayoutNode> {
        self.walk().find(|node| node.name() == Some(name))
    }

    /// Text content of every leaf in the subtree, in document order.
    pub fn texts(&self) -> Vec<&str> {
        self.walk()
            .filter_map(|node| match node {
                Self::Text(leaf) => Some(leaf.content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl From<TextLeaf> for LayoutNode {
    fn from(leaf: TextLeaf) -> Self {
        Self::Text(leaf)
    }
}

impl From<VectorGraphic> for LayoutNode {
    fn from(graphic: VectorGraphic) -> Self {
        Self::Graphic(graphic)
    }
}

/// Iterator returned by [`LayoutNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a LayoutNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a LayoutNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// A composed document ready to be handed to a rendering backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    title: String,
    file_name: String,
    root: LayoutNode,
}

impl Document {
    /// Wraps a page node into a document.
    pub fn new(title: impl Into<String>, file_name: impl Into<String>, page: PageNode) -> Self {
        Self {
            title: title.into(),
            file_name: file_name.into(),
            root: LayoutNode::Page(page),
        }
    }

    /// Title stored in the PDF metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Name under which the rendered byte stream is offered.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Root node of the tree; always a [`LayoutNode::Page`].
    pub fn root(&self) -> &LayoutNode {
        &self.root
    }

    /// The page node.
    pub fn page(&self) -> &PageNode {
        match &self.root {
            LayoutNode::Page(page) => page,
            _ => unreachable!("document root is always a page"),
        }
    }
}
