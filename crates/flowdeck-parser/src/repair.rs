//! Repair of doubled attribute quotes.
//!
//! Upstream producers of BPMN (language models in particular) are known to
//! emit attributes such as `id=""Task_1""`. That text is not well-formed XML,
//! so it is rewritten to `id="Task_1"` before parsing.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

/// `=""value""` where the value holds no quote and does not end in `=`,
/// or the empty `=""""`.
///
/// A value ending in `=` would be the gap between two empty attributes
/// (`a="" b=""`), which is already well-formed.
static DOUBLED_QUOTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"=""(?:""|([^"]*[^"=])"")"#).expect("doubled quote pattern is a valid regex")
});

/// Rewrites every `=""value""` attribute to `="value"`.
///
/// Returns the input unchanged (borrowed) when nothing needed repair.
///
/// # Examples
///
/// ```
/// use flowdeck_parser::repair_attribute_quotes;
///
/// assert_eq!(
///     repair_attribute_quotes(r#"<task id=""N1"" name=""Check""/>"#),
///     r#"<task id="N1" name="Check"/>"#
/// );
/// ```
pub fn repair_attribute_quotes(source: &str) -> Cow<'_, str> {
    DOUBLED_QUOTES.replace_all(source, r#"="${1}""#)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_input_is_borrowed() {
        let source = r#"<task id="N1" name="Check"/>"#;
        assert!(matches!(repair_attribute_quotes(source), Cow::Borrowed(_)));
    }

    #[test]
    fn test_repairs_doubled_quotes() {
        let source = r#"<task id=""N1"" name="Check"/>"#;
        assert_eq!(
            repair_attribute_quotes(source),
            r#"<task id="N1" name="Check"/>"#
        );
    }

    #[test]
    fn test_repairs_values_with_spaces() {
        let source = r#"<task name=""Check the load""/>"#;
        assert_eq!(
            repair_attribute_quotes(source),
            r#"<task name="Check the load"/>"#
        );
    }

    #[test]
    fn test_repairs_non_ascii_values() {
        let source = r#"<task name=""荷下ろし後の確認""/>"#;
        assert_eq!(
            repair_attribute_quotes(source),
            r#"<task name="荷下ろし後の確認"/>"#
        );
    }

    #[test]
    fn test_repairs_values_with_comparisons() {
        let source = r#"<exclusiveGateway id=""G1"" name=""Amount > 1000?""/>"#;
        assert_eq!(
            repair_attribute_quotes(source),
            r#"<exclusiveGateway id="G1" name="Amount > 1000?"/>"#
        );

        let source = r#"<task name=""x = y"" id=""T""/><task name=""a < b""/>"#;
        assert_eq!(
            repair_attribute_quotes(source),
            r#"<task name="x = y" id="T"/><task name="a < b"/>"#
        );
    }

    #[test]
    fn test_repairs_empty_doubled_value() {
        let source = r#"<task id=""T1"" name=""""/>"#;
        assert_eq!(
            repair_attribute_quotes(source),
            r#"<task id="T1" name=""/>"#
        );
    }

    #[test]
    fn test_adjacent_empty_attributes_untouched() {
        let source = r#"<task name="" id=""/>"#;
        assert_eq!(repair_attribute_quotes(source), source);
    }

    #[test]
    fn test_empty_attribute_before_tag_end_untouched() {
        let source = r#"<task id="T1" name=""></task><task id="T2" name=""/>"#;
        assert_eq!(repair_attribute_quotes(source), source);
    }
}
