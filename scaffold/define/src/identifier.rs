//! Identifier checks for names that end up in generated source.

use crate::errors::DefineError;

/// C# reserved keywords. Contextual keywords (`value`, `var`, ...) are legal
/// identifiers and are not listed.
pub const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Returns `true` when `name` is a C# reserved keyword. Matching is case-sensitive.
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Checks that `name` can be used verbatim as a type, property or member name.
///
/// Names must start with an ASCII letter or underscore and continue with
/// ASCII letters, digits or underscores, and must not be a reserved keyword.
///
/// ## Examples
///
/// ```
/// use scaffold_define::validate_identifier;
///
/// assert!(validate_identifier("Country").is_ok());
/// assert!(validate_identifier("_legacy2").is_ok());
/// assert!(validate_identifier("2ndCountry").is_err());
/// assert!(validate_identifier("Country Name").is_err());
/// assert!(validate_identifier("").is_err());
/// assert!(validate_identifier("class").is_err());
/// assert!(validate_identifier("Class").is_ok());
/// ```
pub fn validate_identifier(name: &str) -> Result<(), DefineError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(DefineError::EmptyName);
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(DefineError::InvalidIdentifier {
            name: name.to_string(),
            reason: "must start with a letter or underscore",
        });
    }

    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(DefineError::InvalidIdentifier {
            name: name.to_string(),
            reason: "may only contain letters, digits and underscores",
        });
    }

    if is_reserved_keyword(name) {
        return Err(DefineError::InvalidIdentifier {
            name: name.to_string(),
            reason: "is a reserved keyword",
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_rejected_as_invalid() {
        assert!(matches!(
            validate_identifier(" "),
            Err(DefineError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn keywords_are_rejected() {
        for keyword in ["class", "string", "event", "namespace"] {
            let err = validate_identifier(keyword).unwrap_err();
            assert_eq!(
                err,
                DefineError::InvalidIdentifier {
                    name: keyword.to_string(),
                    reason: "is a reserved keyword",
                }
            );
        }
        assert!(validate_identifier("value").is_ok());
        assert!(validate_identifier("String").is_ok());
    }

    #[test]
    fn empty_name_is_reported_as_empty() {
        assert_eq!(validate_identifier(""), Err(DefineError::EmptyName));
    }
}
