//! Vector graphics used inside the form and the icons drawn from them.
//!
//! Shapes are described with the same compact path syntax used by SVG.  Only straight segments are
//! supported (`M`, `L`, `H`, `V` and `Z`, absolute or relative), which covers every icon on the
//! form.  The parser reports malformed input with the byte offset where it gave up.

use thiserror::Error;

use crate::node::{Edges, Rgb};

/// A point in view-box coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Coordinate system of a graphic's path data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A single path together with its paint.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSpec {
    pub data: String,
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub stroke_width: f64,
}

impl PathSpec {
    /// A filled path without outline.
    pub fn filled(data: impl Into<String>, fill: Rgb) -> Self {
        Self {
            data: data.into(),
            fill: Some(fill),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    /// An outlined path without fill.
    pub fn stroked(data: impl Into<String>, stroke: Rgb, stroke_width: f64) -> Self {
        Self {
            data: data.into(),
            fill: None,
            stroke: Some(stroke),
            stroke_width,
        }
    }

    /// Parses the path data into subpaths.
    pub fn subpaths(&self) -> Result<Vec<Subpath>, PathError> {
        parse_path_data(&self.data)
    }
}

/// Fixed-size vector graphic made of one or more paths.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorGraphic {
    pub width: f64,
    pub height: f64,
    pub view_box: ViewBox,
    pub paths: Vec<PathSpec>,
    pub margin: Edges,
}

impl VectorGraphic {
    /// Creates an empty graphic whose view box matches its size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            view_box: ViewBox::new(0.0, 0.0, width, height),
            paths: Vec::new(),
            margin: Edges::ZERO,
        }
    }

    pub fn with_view_box(mut self, view_box: ViewBox) -> Self {
        self.view_box = view_box;
        self
    }

    pub fn with_path(mut self, path: PathSpec) -> Self {
        self.paths.push(path);
        self
    }

    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    /// Horizontal and vertical scale from view-box units to points.
    pub fn scale(&self) -> (f64, f64) {
        let sx = if self.view_box.width > f64::EPSILON {
            self.width / self.view_box.width
        } else {
            1.0
        };
        let sy = if self.view_box.height > f64::EPSILON {
            self.height / self.view_box.height
        } else {
            1.0
        };
        (sx, sy)
    }

    /// Maps a view-box point to an offset in points from the graphic's top-left corner.
    pub fn to_local(&self, point: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(
            (point.x - self.view_box.x) * sx,
            (point.y - self.view_box.y) * sy,
        )
    }
}

/// Connected run of straight segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subpath {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Subpath {
    fn starting_at(point: Point) -> Self {
        Self {
            points: vec![point],
            closed: false,
        }
    }

    /// Segments of the subpath, including the closing one when filling.
    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let count = self.points.len();
        (0..count).filter_map(move |index| {
            let next = (index + 1) % count;
            if count < 2 {
                None
            } else {
                Some((self.points[index], self.points[next]))
            }
        })
    }
}

/// Path data errors produced by [`parse_path_data`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{message} (at byte {index})")]
pub struct PathError {
    index: usize,
    message: String,
}

impl PathError {
    fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }

    /// Byte index in the path data where the error was detected.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Human-readable description of the error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

struct Cursor<'a> {
    input: &'a str,
    index: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.index..].chars().next()
    }

    fn skip_separators(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_whitespace() || ch == ',' {
                self.index += ch.len_utf8();
            } else {
                break;
            }
        }
    }

    fn number(&mut self) -> Result<f64, PathError> {
        self.skip_separators();
        let start = self.index;
        let bytes = self.input.as_bytes();
        let mut end = start;
        if end < bytes.len() && (bytes[end] == b'-' || bytes[end] == b'+') {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
            end += 1;
        }
        if end == digits_start {
            return Err(PathError::new(start, "expected a number"));
        }

        let value = self.input[start..end]
            .parse::<f64>()
            .map_err(|_| PathError::new(start, "malformed number"))?;
        self.index = end;
        Ok(value)
    }

    fn point(&mut self) -> Result<Point, PathError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(x, y))
    }
}

/// Parses SVG-style path data made of straight segments into subpaths.
pub fn parse_path_data(data: &str) -> Result<Vec<Subpath>, PathError> {
    let mut cursor = Cursor {
        input: data,
        index: 0,
    };
    let mut subpaths = Vec::new();
    let mut current: Option<Subpath> = None;
    let mut position = Point::default();
    let mut start = position;
    let mut command: Option<char> = None;

    loop {
        cursor.skip_separators();
        let Some(ch) = cursor.peek() else {
            break;
        };

        if ch.is_ascii_alphabetic() {
            cursor.index += 1;
            if matches!(ch, 'Z' | 'z') {
                if let Some(mut subpath) = current.take() {
                    subpath.closed = true;
                    subpaths.push(subpath);
                }
                position = start;
                command = None;
                continue;
            }
            command = Some(ch);
        }

        let Some(active) = command else {
            return Err(PathError::new(cursor.index, "expected a path command"));
        };
        let relative = active.is_ascii_lowercase();
        let base = if relative { position } else { Point::default() };

        match active.to_ascii_uppercase() {
            'M' => {
                let target = cursor.point()?;
                let target = Point::new(base.x + target.x, base.y + target.y);
                if let Some(subpath) = current.take() {
                    subpaths.push(subpath);
                }
                current = Some(Subpath::starting_at(target));
                position = target;
                start = target;
                // Coordinate pairs following a move are implicit line segments.
                command = Some(if relative { 'l' } else { 'L' });
            }
            'L' => {
                let target = cursor.point()?;
                let target = Point::new(base.x + target.x, base.y + target.y);
                current
                    .get_or_insert_with(|| Subpath::starting_at(position))
                    .points
                    .push(target);
                position = target;
            }
            'H' => {
                let x = cursor.number()?;
                let target = Point::new(base.x + x, position.y);
                current
                    .get_or_insert_with(|| Subpath::starting_at(position))
                    .points
                    .push(target);
                position = target;
            }
            'V' => {
                let y = cursor.number()?;
                let target = Point::new(position.x, base.y + y);
                current
                    .get_or_insert_with(|| Subpath::starting_at(position))
                    .points
                    .push(target);
                position = target;
            }
            _ => {
                return Err(PathError::new(
                    cursor.index.saturating_sub(1),
                    format!("unsupported path command `{}`", active),
                ));
            }
        }
    }

    if let Some(subpath) = current.take() {
        subpaths.push(subpath);
    }
    Ok(subpaths)
}

/// Horizontal spans covered by the filled subpaths at height `y`, using the even-odd rule.
pub fn scanline_spans(subpaths: &[Subpath], y: f64) -> Vec<(f64, f64)> {
    let mut crossings: Vec<f64> = subpaths
        .iter()
        .flat_map(Subpath::edges)
        .filter_map(|(a, b)| {
            if (a.y - b.y).abs() < f64::EPSILON {
                return None;
            }
            let (low, high) = if a.y < b.y { (a, b) } else { (b, a) };
            if y < low.y || y >= high.y {
                return None;
            }
            let t = (y - low.y) / (high.y - low.y);
            Some(low.x + t * (high.x - low.x))
        })
        .collect();
    crossings.sort_by(|a, b| a.total_cmp(b));

    crossings
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .filter(|(from, to)| to > from)
        .collect()
}

/// Brand drill bit: pointed black body crossed by three white back-slanted stripes.
pub fn drill_icon() -> VectorGraphic {
    VectorGraphic::new(60.0, 48.0)
        .with_view_box(ViewBox::new(0.0, 0.0, 60.0, 48.0))
        .with_margin(Edges::ZERO.with_right(10.0))
        .with_path(PathSpec::filled("M28 4 L36 4 L36 36 L32 44 L28 36 Z", Rgb::BLACK))
        .with_path(PathSpec::filled("M28 12 L36 13 L36 15 L28 14 Z", Rgb::WHITE))
        .with_path(PathSpec::filled("M28 22 L36 23 L36 25 L28 24 Z", Rgb::WHITE))
        .with_path(PathSpec::filled("M28 32 L36 33 L36 35 L28 34 Z", Rgb::WHITE))
}

/// Groundwater symbol: half-filled inverted triangle above two baseline strokes.
pub fn water_icon() -> VectorGraphic {
    VectorGraphic::new(16.0, 14.0)
        .with_view_box(ViewBox::new(0.0, 0.0, 16.0, 14.0))
        .with_margin(Edges::ZERO.with_right(10.0).with_top(-1.0))
        .with_path(PathSpec::filled("M1 2 L8 2 L8 10 Z", Rgb::BLACK))
        .with_path(PathSpec::filled("M8 2 L15 2 L8 10 Z", Rgb::WHITE))
        .with_path(PathSpec::stroked("M1 2 L15 2 L8 10 Z", Rgb::BLACK, 1.0))
        .with_path(PathSpec::stroked("M1 12 L15 12", Rgb::BLACK, 1.0))
        .with_path(PathSpec::stroked("M6 13 L10 13", Rgb::BLACK, 1.0))
}
