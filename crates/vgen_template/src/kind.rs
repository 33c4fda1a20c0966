//! What a template generates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of text the generator produces from a module signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    /// An instantiation of the module, to paste into a parent design.
    Instance,
    /// A testbench module wrapping one instance.
    Testbench,
}

impl GenerationKind {
    /// Both kinds, instance first.
    pub const ALL: [GenerationKind; 2] = [GenerationKind::Instance, GenerationKind::Testbench];

    /// Lowercase name, as used in configuration sections and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationKind::Instance => "instance",
            GenerationKind::Testbench => "testbench",
        }
    }

    /// Suffix appended to a template name to form its file stem.
    pub fn suffix(self) -> &'static str {
        match self {
            GenerationKind::Instance => "_instance",
            GenerationKind::Testbench => "_testbench",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes() {
        assert_eq!(GenerationKind::Instance.suffix(), "_instance");
        assert_eq!(GenerationKind::Testbench.suffix(), "_testbench");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&GenerationKind::Testbench).unwrap();
        assert_eq!(json, "\"testbench\"");
        let back: GenerationKind = serde_json::from_str("\"instance\"").unwrap();
        assert_eq!(back, GenerationKind::Instance);
    }

    #[test]
    fn display_matches_as_str() {
        for kind in GenerationKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
