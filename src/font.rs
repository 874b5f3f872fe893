/// The four built-in Type1 families available to `text`. Callers address
/// them by the symbolic aliases `sans`, `serif`, `mono`, and `symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFont {
    Sans,
    Serif,
    Mono,
    Symbol,
}

pub const BUILTIN_FONTS: [BuiltinFont; 4] = [
    BuiltinFont::Sans,
    BuiltinFont::Serif,
    BuiltinFont::Mono,
    BuiltinFont::Symbol,
];

impl BuiltinFont {
    pub fn base_name(self) -> &'static str {
        match self {
            BuiltinFont::Sans => "Helvetica",
            BuiltinFont::Serif => "Times-Roman",
            BuiltinFont::Mono => "Courier",
            BuiltinFont::Symbol => "Zapf-Dingbats",
        }
    }

    pub fn from_alias(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sans" => Some(BuiltinFont::Sans),
            "serif" => Some(BuiltinFont::Serif),
            "mono" => Some(BuiltinFont::Mono),
            "symbol" => Some(BuiltinFont::Symbol),
            _ => None,
        }
    }
}

/// Resolves an alias to a base font name. Unknown aliases resolve to the
/// empty name, which viewers treat as an undefined font reference; this is
/// non-fatal by design since it affects only visual fidelity.
pub(crate) fn base_font(alias: &str) -> &'static str {
    match BuiltinFont::from_alias(alias) {
        Some(font) => font.base_name(),
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_map_to_base_names() {
        assert_eq!(base_font("sans"), "Helvetica");
        assert_eq!(base_font("serif"), "Times-Roman");
        assert_eq!(base_font("mono"), "Courier");
        assert_eq!(base_font("symbol"), "Zapf-Dingbats");
    }

    #[test]
    fn aliases_are_case_insensitive() {
        assert_eq!(base_font("Sans"), "Helvetica");
        assert_eq!(base_font(" MONO "), "Courier");
    }

    #[test]
    fn unknown_alias_resolves_to_empty_name() {
        assert_eq!(base_font("comic"), "");
        assert_eq!(base_font(""), "");
    }
}
