//! JSON formatter

use super::registry::{FormatError, Formatter};
use crate::sgf::parsing::Collection;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn serialize(&self, collection: &Collection) -> Result<String, FormatError> {
        serde_json::to_string_pretty(collection).map_err(|e| FormatError::Encode {
            format: self.name().to_string(),
            message: e.to_string(),
        })
    }

    fn description(&self) -> &str {
        "Game trees and warnings as JSON"
    }

    fn carries_warnings(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgf::parse;
    use serde_json::Value;

    #[test]
    fn test_structure() {
        let collection = parse("(;SZ[19]DEF[x];B[aa])").unwrap();
        let output = JsonFormatter.serialize(&collection).unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();

        let node = &json["game_trees"][0]["sequence"][0];
        let size = &node["properties"][0];
        assert_eq!(size["identity"], "SZ");
        assert_eq!(size["status"], "valid");
        assert_eq!(size["type"]["category"], "root");
        assert_eq!(size["type"]["cardinality"], "one");
        assert_eq!(size["values"][0]["raw"], "19");
        assert_eq!(size["values"][0]["type"], "number | number : number");

        let unknown = &node["properties"][1];
        assert_eq!(unknown["type"]["category"], "unknown");

        let black = &json["game_trees"][0]["sequence"][1]["properties"][0];
        assert_eq!(black["status"], "deferred");

        assert_eq!(json["warnings"][0]["kind"], "lexical");
        assert_eq!(json["warnings"][0]["offset"], 8);
    }
}
