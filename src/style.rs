//! Node and edge styling.
//!
//! The style panels collect a flat set of parameters and apply them to every
//! node (or edge) of the loaded network at once. Styles live on the elements
//! only; they are not written to `.cynet` files.

use crate::constants::*;
use crate::types::Network;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for style values that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleParseError {
    /// Not a `#rrggbb` or `#rgb` hex color.
    #[error("invalid hex color: {0:?}")]
    Color(String),
    /// Unknown enum option.
    #[error("unknown {kind} option: {value:?}")]
    Option {
        /// Which setting was being parsed
        kind: &'static str,
        /// The rejected value
        value: String,
    },
}

/// An sRGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Red, green and blue components.
    pub fn components(self) -> [u8; 3] {
        self.0
    }
}

impl FromStr for Rgb {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || StyleParseError::Color(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Rgb([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?])),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Rgb([short(0)?, short(1)?, short(2)?]))
            }
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl TryFrom<String> for Rgb {
    type Error = StyleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Outline of a rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    /// ○
    #[default]
    Ellipse,
    /// □
    Rectangle,
    /// ◇
    Diamond,
    /// △
    Triangle,
}

impl NodeShape {
    /// All shapes in selector order.
    pub const ALL: [NodeShape; 4] = [
        NodeShape::Ellipse,
        NodeShape::Rectangle,
        NodeShape::Diamond,
        NodeShape::Triangle,
    ];

    /// Label shown in the shape selector.
    pub fn label(self) -> &'static str {
        match self {
            NodeShape::Ellipse => "○ (Ellipse)",
            NodeShape::Rectangle => "□ (Rectangle)",
            NodeShape::Diamond => "◇ (Diamond)",
            NodeShape::Triangle => "△ (Triangle)",
        }
    }
}

impl FromStr for NodeShape {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ellipse" => Ok(NodeShape::Ellipse),
            "rectangle" => Ok(NodeShape::Rectangle),
            "diamond" => Ok(NodeShape::Diamond),
            "triangle" => Ok(NodeShape::Triangle),
            other => Err(StyleParseError::Option {
                kind: "shape",
                value: other.to_string(),
            }),
        }
    }
}

/// Stroke pattern of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Continuous line
    #[default]
    Solid,
    /// Dashed line
    Dashed,
}

impl FromStr for LineStyle {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(LineStyle::Solid),
            "dashed" => Ok(LineStyle::Dashed),
            other => Err(StyleParseError::Option {
                kind: "line style",
                value: other.to_string(),
            }),
        }
    }
}

/// Decoration at the target end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowShape {
    /// Filled triangle arrow head
    #[default]
    Triangle,
    /// Plain line end
    None,
}

impl FromStr for ArrowShape {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "triangle" => Ok(ArrowShape::Triangle),
            "none" => Ok(ArrowShape::None),
            other => Err(StyleParseError::Option {
                kind: "arrow shape",
                value: other.to_string(),
            }),
        }
    }
}

/// Parameters of the node style panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeStyleParams {
    /// Label font size in px
    pub font_size: f32,
    /// Label text color
    pub label_color: Rgb,
    /// Node fill color
    pub fill_color: Rgb,
    /// Node outline
    pub shape: NodeShape,
    /// Width and height in px
    pub size: f32,
}

impl Default for NodeStyleParams {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_NODE_FONT_SIZE,
            label_color: Rgb(DEFAULT_NODE_LABEL_COLOR),
            fill_color: Rgb(DEFAULT_NODE_FILL_COLOR),
            shape: NodeShape::Ellipse,
            size: DEFAULT_NODE_SIZE,
        }
    }
}

/// Parameters of the edge style panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeStyleParams {
    /// Solid or dashed stroke
    pub line_style: LineStyle,
    /// Target arrow head
    pub arrow_shape: ArrowShape,
    /// Stroke width in px
    pub width: f32,
}

impl Default for EdgeStyleParams {
    fn default() -> Self {
        Self {
            line_style: LineStyle::Solid,
            arrow_shape: ArrowShape::Triangle,
            width: DEFAULT_EDGE_WIDTH,
        }
    }
}

fn clamp(value: f32, range: &std::ops::RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

/// Applies `params` to every node of `network`.
///
/// With no network loaded this is a logged no-op. Returns the number of
/// nodes styled.
pub fn apply_node_style(network: Option<&mut Network>, params: &NodeStyleParams) -> usize {
    let Some(network) = network else {
        log::warn!("No network loaded; node style not applied");
        return 0;
    };
    let font_size = clamp(params.font_size, &NODE_FONT_SIZE_RANGE);
    let size = clamp(params.size, &NODE_SIZE_RANGE);
    for node in network.nodes_mut() {
        node.visual.font_size = font_size;
        node.visual.label_color = params.label_color;
        node.visual.fill_color = params.fill_color;
        node.visual.shape = params.shape;
        node.visual.width = size;
        node.visual.height = size;
    }
    let count = network.nodes().len();
    log::info!("Node style applied to {} nodes: {:?}", count, params);
    count
}

/// Applies `params` to every edge of `network`.
///
/// With no network loaded this is a logged no-op. Returns the number of
/// edges styled.
pub fn apply_edge_style(network: Option<&mut Network>, params: &EdgeStyleParams) -> usize {
    let Some(network) = network else {
        log::warn!("No network loaded; edge style not applied");
        return 0;
    };
    let width = clamp(params.width, &EDGE_WIDTH_RANGE);
    for edge in network.edges_mut() {
        edge.visual.width = width;
        edge.visual.arrow_shape = params.arrow_shape;
        edge.visual.line_style = params.line_style;
    }
    let count = network.edges().len();
    log::info!("Edge style applied to {} edges: {:?}", count, params);
    count
}
