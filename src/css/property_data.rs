//! CSS property and keyword data
//!
//! A compact table of the properties the analyzer knows about. Anything not listed here is
//! reported as an unknown property (custom properties and vendor-prefixed names are never
//! checked against this table).

/// Static description of a CSS property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: &'static str,
    pub description: &'static str,
    /// Keyword values offered in completion
    pub keywords: &'static [&'static str],
    /// Whether the property accepts a color value
    pub accepts_color: bool,
}

const fn property(
    name: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
    accepts_color: bool,
) -> PropertyInfo {
    PropertyInfo {
        name,
        description,
        keywords,
        accepts_color,
    }
}

const BORDER_STYLES: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];
const GLOBAL: &[&str] = &["inherit", "initial", "unset"];
const AUTO: &[&str] = &["auto"];
const ALIGN: &[&str] = &[
    "normal", "stretch", "center", "flex-start", "flex-end", "start", "end", "baseline",
];
const JUSTIFY: &[&str] = &[
    "normal", "center", "flex-start", "flex-end", "start", "end", "space-between",
    "space-around", "space-evenly", "stretch",
];
const OVERFLOW: &[&str] = &["visible", "hidden", "clip", "scroll", "auto"];

#[rustfmt::skip]
pub const PROPERTIES: &[PropertyInfo] = &[
    property("align-content", "Aligns a flex container's lines within the flex container when there is extra space in the cross-axis.", JUSTIFY, false),
    property("align-items", "Aligns flex items of the current flex line.", ALIGN, false),
    property("align-self", "Allows the default alignment to be overridden for individual flex items.", ALIGN, false),
    property("animation", "Shorthand property combines six of the animation properties into a single property.", &["none", "infinite", "alternate", "linear", "ease", "ease-in", "ease-out", "ease-in-out"], false),
    property("background", "Shorthand property for setting most background properties at the same place in the style sheet.", &["none", "no-repeat", "repeat", "center", "fixed", "scroll"], true),
    property("background-color", "Sets the background color of an element.", &["transparent"], true),
    property("background-image", "Sets the background image(s) of an element.", &["none"], false),
    property("background-position", "Specifies the initial position of the background image(s).", &["top", "right", "bottom", "left", "center"], false),
    property("background-repeat", "Specifies how background images are tiled after they have been sized and positioned.", &["repeat", "repeat-x", "repeat-y", "no-repeat", "space", "round"], false),
    property("background-size", "Specifies the size of the background images.", &["auto", "cover", "contain"], false),
    property("border", "Shorthand property for setting border width, style, and color.", BORDER_STYLES, true),
    property("border-bottom", "Shorthand property for setting border width, style and color.", BORDER_STYLES, true),
    property("border-color", "The color of the border around all four edges of an element.", &["transparent"], true),
    property("border-left", "Shorthand property for setting border width, style and color.", BORDER_STYLES, true),
    property("border-radius", "Defines the radii of the outer border edge.", &[], false),
    property("border-right", "Shorthand property for setting border width, style and color.", BORDER_STYLES, true),
    property("border-style", "The style of the border around edges of an element.", BORDER_STYLES, false),
    property("border-top", "Shorthand property for setting border width, style and color.", BORDER_STYLES, true),
    property("border-width", "Shorthand that sets the four 'border-*-width' properties.", &["thin", "medium", "thick"], false),
    property("bottom", "Specifies how far an absolutely positioned box's bottom margin edge is offset above the bottom edge of the box's containing block.", AUTO, false),
    property("box-shadow", "Attaches one or more drop-shadows to the box.", &["none", "inset"], true),
    property("box-sizing", "Specifies the behavior of the 'width' and 'height' properties.", &["content-box", "border-box"], false),
    property("color", "Sets the color of an element's text.", &["currentColor"], true),
    property("column-gap", "Sets the gap between columns.", &["normal"], false),
    property("content", "Determines which page-based occurrence of a given element is applied to a counter or string value.", &["none", "normal", "open-quote", "close-quote"], false),
    property("cursor", "Allows control over cursor appearance in an element.", &["auto", "default", "pointer", "text", "move", "wait", "not-allowed", "grab", "crosshair", "help"], false),
    property("display", "In combination with 'float' and 'position', determines the type of box or boxes that are generated for an element.", &["none", "block", "inline", "inline-block", "flex", "inline-flex", "grid", "inline-grid", "contents", "table", "list-item"], false),
    property("fill", "Paints the interior of the given graphical element.", &["none"], true),
    property("filter", "Processes an element's rendering before it is displayed in the document.", &["none"], false),
    property("flex", "Specifies the components of a flexible length.", &["none", "auto"], false),
    property("flex-basis", "Sets the flex basis.", &["auto", "content"], false),
    property("flex-direction", "Specifies how flex items are placed in the flex container.", &["row", "row-reverse", "column", "column-reverse"], false),
    property("flex-grow", "Sets the flex grow factor.", &[], false),
    property("flex-shrink", "Sets the flex shrink factor.", &[], false),
    property("flex-wrap", "Controls whether the flex container is single-line or multi-line.", &["nowrap", "wrap", "wrap-reverse"], false),
    property("float", "Specifies how a box should be floated.", &["none", "left", "right"], false),
    property("font", "Shorthand property for setting font properties.", &["caption", "icon", "menu", "small-caption"], false),
    property("font-family", "Specifies a prioritized list of font family names or generic family names.", &["serif", "sans-serif", "monospace", "cursive", "fantasy", "system-ui"], false),
    property("font-size", "Indicates the desired height of glyphs from the font.", &["xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "smaller", "larger"], false),
    property("font-style", "Allows italic or oblique faces to be selected.", &["normal", "italic", "oblique"], false),
    property("font-weight", "Specifies weight of glyphs in the font, their degree of blackness or stroke thickness.", &["normal", "bold", "bolder", "lighter", "100", "200", "300", "400", "500", "600", "700", "800", "900"], false),
    property("gap", "Shorthand that specifies the gutters between grid rows and columns.", &["normal"], false),
    property("grid-area", "Determine a grid item's size and location within the grid.", AUTO, false),
    property("grid-template-columns", "Specifies the track sizing functions of the grid columns.", &["none", "subgrid"], false),
    property("grid-template-rows", "Specifies the track sizing functions of the grid rows.", &["none", "subgrid"], false),
    property("height", "Specifies the height of the content area, padding area or border area of certain boxes.", &["auto", "fit-content", "max-content", "min-content"], false),
    property("justify-content", "Aligns flex items along the main axis of the current line of the flex container.", JUSTIFY, false),
    property("left", "Specifies how far an absolutely positioned box's left margin edge is offset to the right of the left edge of the box's containing block.", AUTO, false),
    property("letter-spacing", "Specifies the minimum, maximum, and optimal spacing between grapheme clusters.", &["normal"], false),
    property("line-height", "Determines the block-progression dimension of the text content area of an inline box.", &["normal"], false),
    property("list-style", "Shorthand for setting 'list-style-type', 'list-style-position' and 'list-style-image'.", &["none", "disc", "circle", "square", "decimal", "inside", "outside"], false),
    property("margin", "Shorthand property to set values for the thickness of the margin area.", AUTO, false),
    property("margin-bottom", "Shorthand property to set values for the thickness of the margin area.", AUTO, false),
    property("margin-left", "Shorthand property to set values for the thickness of the margin area.", AUTO, false),
    property("margin-right", "Shorthand property to set values for the thickness of the margin area.", AUTO, false),
    property("margin-top", "Shorthand property to set values for the thickness of the margin area.", AUTO, false),
    property("max-height", "Allows authors to constrain content height to a certain range.", &["none", "fit-content", "max-content", "min-content"], false),
    property("max-width", "Allows authors to constrain content width to a certain range.", &["none", "fit-content", "max-content", "min-content"], false),
    property("min-height", "Allows authors to constrain content height to a certain range.", &["auto", "fit-content", "max-content", "min-content"], false),
    property("min-width", "Allows authors to constrain content width to a certain range.", &["auto", "fit-content", "max-content", "min-content"], false),
    property("object-fit", "Specifies how the contents of a replaced element should be scaled relative to the box established by its used height and width.", &["fill", "contain", "cover", "none", "scale-down"], false),
    property("opacity", "Opacity of an element's text, where 1 is opaque and 0 is entirely transparent.", &[], false),
    property("outline", "Shorthand property for 'outline-style', 'outline-width', and 'outline-color'.", BORDER_STYLES, true),
    property("outline-color", "The color of the outline.", &["invert"], true),
    property("overflow", "Shorthand for setting 'overflow-x' and 'overflow-y'.", OVERFLOW, false),
    property("overflow-x", "Specifies the handling of overflow in the horizontal direction.", OVERFLOW, false),
    property("overflow-y", "Specifies the handling of overflow in the vertical direction.", OVERFLOW, false),
    property("padding", "Shorthand property to set values for the thickness of the padding area.", &[], false),
    property("padding-bottom", "Shorthand property to set values for the thickness of the padding area.", &[], false),
    property("padding-left", "Shorthand property to set values for the thickness of the padding area.", &[], false),
    property("padding-right", "Shorthand property to set values for the thickness of the padding area.", &[], false),
    property("padding-top", "Shorthand property to set values for the thickness of the padding area.", &[], false),
    property("pointer-events", "Specifies under what circumstances a given element can be the target element for a pointer event.", &["auto", "none", "all", "visible", "painted", "fill", "stroke"], false),
    property("position", "The position CSS property sets how an element is positioned in a document.", &["static", "relative", "absolute", "fixed", "sticky"], false),
    property("right", "Specifies how far an absolutely positioned box's right margin edge is offset to the left of the right edge of the box's containing block.", AUTO, false),
    property("row-gap", "Sets the gap between rows.", &["normal"], false),
    property("stroke", "Paints along the outline of the given graphical element.", &["none"], true),
    property("text-align", "Describes how inline contents of a block are horizontally aligned if the contents do not completely fill the line box.", &["left", "right", "center", "justify", "start", "end"], false),
    property("text-decoration", "Decorations applied to font used for an element's text.", &["none", "underline", "overline", "line-through"], true),
    property("text-overflow", "Text can overflow for example when it is prevented from wrapping.", &["clip", "ellipsis"], false),
    property("text-shadow", "Enables shadow effects to be applied to the text of the element.", &["none"], true),
    property("text-transform", "Controls capitalization effects of an element's text.", &["none", "capitalize", "uppercase", "lowercase"], false),
    property("top", "Specifies how far an absolutely positioned box's top margin edge is offset below the top edge of the box's containing block.", AUTO, false),
    property("transform", "A two-dimensional transformation is applied to an element through the 'transform' property.", &["none"], false),
    property("transition", "Shorthand property combines four of the transition properties into a single property.", &["none", "all", "linear", "ease", "ease-in", "ease-out", "ease-in-out"], false),
    property("user-select", "Controls the appearance of selection.", &["auto", "none", "text", "all", "contain"], false),
    property("vertical-align", "Affects the vertical positioning of the inline boxes generated by an inline-level element inside a line box.", &["baseline", "sub", "super", "text-top", "text-bottom", "middle", "top", "bottom"], false),
    property("visibility", "Specifies whether the boxes generated by an element are rendered.", &["visible", "hidden", "collapse"], false),
    property("white-space", "Shorthand property for the 'white-space-collapsing' and 'text-wrap' properties.", &["normal", "pre", "nowrap", "pre-wrap", "pre-line", "break-spaces"], false),
    property("width", "Specifies the width of the content area, padding area or border area of certain boxes.", &["auto", "fit-content", "max-content", "min-content"], false),
    property("word-break", "Specifies line break opportunities for non-CJK scripts.", &["normal", "break-all", "keep-all", "break-word"], false),
    property("z-index", "For a positioned box, the 'z-index' property specifies the stack level of the box in the current stacking context.", AUTO, false),
];

/// Look up a property by name (case-insensitive)
pub fn find_property(name: &str) -> Option<&'static PropertyInfo> {
    let name = name.to_ascii_lowercase();
    PROPERTIES.iter().find(|property| property.name == name)
}

/// Keywords every property accepts
pub fn global_keywords() -> &'static [&'static str] {
    GLOBAL
}

/// Custom properties and vendor-prefixed names are outside the known-property check
pub fn is_unchecked_property(name: &str) -> bool {
    name.starts_with('-')
}

/// Named colors offered in completion and recognized as color values
pub const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("aqua", (0, 255, 255)),
    ("black", (0, 0, 0)),
    ("blue", (0, 0, 255)),
    ("brown", (165, 42, 42)),
    ("coral", (255, 127, 80)),
    ("crimson", (220, 20, 60)),
    ("cyan", (0, 255, 255)),
    ("darkblue", (0, 0, 139)),
    ("darkgray", (169, 169, 169)),
    ("darkgreen", (0, 100, 0)),
    ("darkred", (139, 0, 0)),
    ("dimgray", (105, 105, 105)),
    ("fuchsia", (255, 0, 255)),
    ("gold", (255, 215, 0)),
    ("gray", (128, 128, 128)),
    ("green", (0, 128, 0)),
    ("grey", (128, 128, 128)),
    ("hotpink", (255, 105, 180)),
    ("indigo", (75, 0, 130)),
    ("ivory", (255, 255, 240)),
    ("khaki", (240, 230, 140)),
    ("lavender", (230, 230, 250)),
    ("lightblue", (173, 216, 230)),
    ("lightgray", (211, 211, 211)),
    ("lightgreen", (144, 238, 144)),
    ("lime", (0, 255, 0)),
    ("magenta", (255, 0, 255)),
    ("maroon", (128, 0, 0)),
    ("navy", (0, 0, 128)),
    ("olive", (128, 128, 0)),
    ("orange", (255, 165, 0)),
    ("orchid", (218, 112, 214)),
    ("pink", (255, 192, 203)),
    ("plum", (221, 160, 221)),
    ("purple", (128, 0, 128)),
    ("rebeccapurple", (102, 51, 153)),
    ("red", (255, 0, 0)),
    ("salmon", (250, 128, 114)),
    ("silver", (192, 192, 192)),
    ("skyblue", (135, 206, 235)),
    ("slategray", (112, 128, 144)),
    ("tan", (210, 180, 140)),
    ("teal", (0, 128, 128)),
    ("tomato", (255, 99, 71)),
    ("turquoise", (64, 224, 208)),
    ("violet", (238, 130, 238)),
    ("wheat", (245, 222, 179)),
    ("white", (255, 255, 255)),
    ("whitesmoke", (245, 245, 245)),
    ("yellow", (255, 255, 0)),
];

/// RGB of a named color (case-insensitive)
pub fn named_color(name: &str) -> Option<(u8, u8, u8)> {
    let name = name.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(color, _)| *color == name)
        .map(|(_, rgb)| *rgb)
}
