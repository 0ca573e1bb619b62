//! Property type registry
//!
//! A fixed table from property identity (`B`, `SZ`, `AB`, ...) to what the format says about
//! that property: a description, the category it belongs to, the grammar of its values and how
//! many values it takes. Identities missing from the table resolve to [PropertyType::unknown],
//! whose values are always valid and whose arity is unconstrained.
//!
//! The table is process-wide immutable data, built on first use.

use crate::sgf::validation::ValueShape;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Which part of a game record a property belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Root,
    GameInfo,
    Setup,
    Move,
    /// Markup, annotations and other properties with no positional category
    Null,
    Unknown,
}

/// How many values a property takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    /// Exactly one value
    One,
    /// One or more values
    List,
    /// Zero or more values
    EList,
    /// Not in the registry, anything goes
    Unknown,
}

impl Cardinality {
    pub fn allows_many(&self) -> bool {
        !matches!(self, Cardinality::One)
    }

    pub fn allows_none(&self) -> bool {
        matches!(self, Cardinality::EList | Cardinality::Unknown)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::One => write!(f, "one"),
            Cardinality::List => write!(f, "list"),
            Cardinality::EList => write!(f, "elist"),
            Cardinality::Unknown => write!(f, "unknown"),
        }
    }
}

/// Everything the registry knows about one property identity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyType {
    pub description: &'static str,
    pub category: Category,
    pub grammar: &'static str,
    pub cardinality: Cardinality,
    #[serde(skip)]
    shape: ValueShape,
}

impl PropertyType {
    fn new(
        description: &'static str,
        category: Category,
        grammar: &'static str,
        cardinality: Cardinality,
    ) -> Self {
        PropertyType {
            description,
            category,
            grammar,
            cardinality,
            shape: ValueShape::parse(grammar).expect("registry grammars are well formed"),
        }
    }

    /// The type of identities the registry has no entry for
    pub fn unknown() -> &'static PropertyType {
        &UNKNOWN
    }

    pub fn is_unknown(&self) -> bool {
        self.category == Category::Unknown
    }

    /// The parsed form of [PropertyType::grammar]
    pub fn shape(&self) -> &ValueShape {
        &self.shape
    }
}

use Cardinality::{EList, List, One};
use Category::{GameInfo, Move, Null, Root, Setup};

/// identity, description, category, grammar, cardinality
#[rustfmt::skip]
const PROPERTY_TABLE: &[(&str, &str, Category, &str, Cardinality)] = &[
    // Move properties
    ("B",  "Black",              Move,     "move",                       One),
    ("BL", "Black time left",    Move,     "real",                       One),
    ("BM", "Bad move",           Move,     "double",                     One),
    ("DO", "Doubtful",           Move,     "none",                       One),
    ("IT", "Interesting",        Move,     "none",                       One),
    ("KO", "Ko",                 Move,     "none",                       One),
    ("MN", "set MoveNumber",     Move,     "number",                     One),
    ("OB", "OtStones Black",     Move,     "number",                     One),
    ("OW", "OtStones White",     Move,     "number",                     One),
    ("TE", "Tesuji",             Move,     "double",                     One),
    ("W",  "White",              Move,     "move",                       One),
    ("WL", "White time left",    Move,     "real",                       One),
    // Setup properties
    ("AB", "Add Black",          Setup,    "stone",                      List),
    ("AE", "Add Empty",          Setup,    "point",                      List),
    ("AW", "Add White",          Setup,    "stone",                      List),
    ("PL", "Player to play",     Setup,    "color",                      One),
    // Markup and annotation properties
    ("AR", "Arrow",              Null,     "point : point",              List),
    ("C",  "Comment",            Null,     "text",                       One),
    ("CR", "Circle",             Null,     "point",                      List),
    ("DD", "Dim points",         Null,     "point",                      EList),
    ("DM", "Even position",      Null,     "double",                     One),
    ("FG", "Figure",             Null,     "none | number : simpletext", One),
    ("GB", "Good for Black",     Null,     "double",                     One),
    ("GW", "Good for White",     Null,     "double",                     One),
    ("HO", "Hotspot",            Null,     "double",                     One),
    ("LB", "Label",              Null,     "point : simpletext",         List),
    ("LN", "Line",               Null,     "point : point",              List),
    ("MA", "Mark",               Null,     "point",                      List),
    ("N",  "Nodename",           Null,     "simpletext",                 One),
    ("PM", "Print move mode",    Null,     "number",                     One),
    ("SL", "Selected",           Null,     "point",                      List),
    ("SQ", "Square",             Null,     "point",                      List),
    ("TR", "Triangle",           Null,     "point",                      List),
    ("UC", "Unclear pos",        Null,     "double",                     One),
    ("V",  "Value",              Null,     "real",                       One),
    ("VW", "View",               Null,     "point",                      EList),
    // Root properties
    ("AP", "Application",        Root,     "simpletext : number",        One),
    ("CA", "Charset",            Root,     "simpletext",                 One),
    ("FF", "Fileformat",         Root,     "number",                     One),
    ("GM", "Game",               Root,     "number",                     One),
    ("ST", "Style",              Root,     "number",                     One),
    ("SZ", "Size",               Root,     "number | number : number",   One),
    // Game info properties
    ("AN", "Annotation",         GameInfo, "simpletext",                 One),
    ("BR", "Black rank",         GameInfo, "simpletext",                 One),
    ("BT", "Black team",         GameInfo, "simpletext",                 One),
    ("CP", "Copyright",          GameInfo, "simpletext",                 One),
    ("DT", "Date",               GameInfo, "simpletext",                 One),
    ("EV", "Event",              GameInfo, "simpletext",                 One),
    ("GC", "Game comment",       GameInfo, "text",                       One),
    ("GN", "Game name",          GameInfo, "simpletext",                 One),
    ("ON", "Opening",            GameInfo, "simpletext",                 One),
    ("OT", "Overtime",           GameInfo, "simpletext",                 One),
    ("PB", "Player Black",       GameInfo, "simpletext",                 One),
    ("PC", "Place",              GameInfo, "simpletext",                 One),
    ("PW", "Player White",       GameInfo, "simpletext",                 One),
    ("RE", "Result",             GameInfo, "simpletext",                 One),
    ("RO", "Round",              GameInfo, "simpletext",                 One),
    ("RU", "Rules",              GameInfo, "simpletext",                 One),
    ("SO", "Source",             GameInfo, "simpletext",                 One),
    ("TM", "Timelimit",          GameInfo, "real",                       One),
    ("US", "User",               GameInfo, "simpletext",                 One),
    ("WR", "White rank",         GameInfo, "simpletext",                 One),
    ("WT", "White team",         GameInfo, "simpletext",                 One),
    // Go (GM[1])
    ("HA", "Handicap",           GameInfo, "number",                     One),
    ("KM", "Komi",               GameInfo, "real",                       One),
    ("TB", "Territory Black",    Null,     "point",                      EList),
    ("TW", "Territory White",    Null,     "point",                      EList),
    // Lines of Action (GM[9])
    ("AS", "Who adds stones",    Null,     "simpletext",                 One),
    ("IP", "Initial pos.",       GameInfo, "simpletext",                 One),
    ("IY", "Invert Y-axis",      GameInfo, "simpletext",                 One),
    ("SE", "Markup",             Null,     "point",                      One),
    ("SU", "Setup type",         GameInfo, "simpletext",                 One),
];

static PROPERTY_TYPES: Lazy<HashMap<&'static str, PropertyType>> = Lazy::new(|| {
    PROPERTY_TABLE
        .iter()
        .map(|&(identity, description, category, grammar, cardinality)| {
            (
                identity,
                PropertyType::new(description, category, grammar, cardinality),
            )
        })
        .collect()
});

static UNKNOWN: Lazy<PropertyType> = Lazy::new(|| {
    PropertyType::new("unknown", Category::Unknown, "unknown", Cardinality::Unknown)
});

/// Registry entry for an identity, if it has one
pub fn get(identity: &str) -> Option<&'static PropertyType> {
    PROPERTY_TYPES.get(identity)
}

/// Registry entry for an identity, falling back to the unknown type
pub fn lookup(identity: &str) -> &'static PropertyType {
    get(identity).unwrap_or_else(PropertyType::unknown)
}

/// All registered identities (sorted)
pub fn identities() -> Vec<&'static str> {
    let mut identities: Vec<_> = PROPERTY_TYPES.keys().copied().collect();
    identities.sort();
    identities
}
