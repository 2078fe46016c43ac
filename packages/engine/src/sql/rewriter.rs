use crate::sql::classifier::{ClassifiedMarker, Role};
use crate::sql::literal::quote_value;
use crate::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Rewritten {
    pub sql: String,
    pub params: Vec<Value>,
    /// Number of projection markers replaced by literals.
    pub inlined: usize,
}

/// Splices literal values over projection markers and drops their parameters.
///
/// `markers` must be the classification of `sql`, and `params` must hold one
/// value per marker. Predicate markers and their values are kept in order.
///
/// # Panics
///
/// In debug builds, when `params` and `markers` differ in length.
/// `rewrite_statement` checks the count before calling this.
pub fn rewrite(sql: &str, params: &[Value], markers: &[ClassifiedMarker]) -> Rewritten {
    debug_assert_eq!(
        markers.len(),
        params.len(),
        "one parameter per marker is required"
    );
    let mut text = sql.to_string();
    let mut inlined = 0;

    for marker in markers.iter().rev() {
        if marker.role != Role::Projection {
            continue;
        }
        let Some(value) = params.get(marker.index) else {
            continue;
        };
        let mut literal = quote_value(value);
        // `--5` would open a line comment.
        if literal.starts_with('-') && sql[..marker.offset].ends_with('-') {
            literal.insert(0, ' ');
        }
        text.replace_range(marker.offset..marker.offset + 1, &literal);
        inlined += 1;
    }

    let params = markers
        .iter()
        .filter(|marker| marker.role == Role::Predicate)
        .filter_map(|marker| params.get(marker.index).cloned())
        .collect();

    Rewritten {
        sql: text,
        params,
        inlined,
    }
}

#[cfg(test)]
mod tests {
    use super::rewrite;
    use crate::sql::classifier::{classify, ClassifiedMarker};
    use crate::sql::scanner::scan;
    use crate::Value;

    fn markers(sql: &str) -> Vec<ClassifiedMarker> {
        let spans = scan(sql).expect("scan should succeed");
        classify(sql, &spans)
            .expect("classify should succeed")
            .markers
    }

    #[test]
    fn inlines_projection_markers_and_keeps_predicates_in_order() {
        let sql = "SELECT ?, ? AS label FROM t WHERE a = ? AND b = ?";
        let params = vec![
            Value::Integer(7),
            Value::Text("x'y".to_string()),
            Value::Integer(1),
            Value::Text("b".to_string()),
        ];
        let rewritten = rewrite(sql, &params, &markers(sql));
        assert_eq!(
            rewritten.sql,
            "SELECT 7, 'x''y' AS label FROM t WHERE a = ? AND b = ?"
        );
        assert_eq!(
            rewritten.params,
            vec![Value::Integer(1), Value::Text("b".to_string())]
        );
        assert_eq!(rewritten.inlined, 2);
    }

    #[test]
    fn statement_without_projection_markers_is_unchanged() {
        let sql = "SELECT a FROM t WHERE a = ? OR b LIKE ?";
        let params = vec![Value::Integer(1), Value::Text("%?%".to_string())];
        let rewritten = rewrite(sql, &params, &markers(sql));
        assert_eq!(rewritten.sql, sql);
        assert_eq!(rewritten.params, params);
        assert_eq!(rewritten.inlined, 0);
    }

    #[test]
    fn inlined_text_containing_markers_is_not_rebound() {
        let sql = "SELECT ?, ? FROM t WHERE a = ?";
        let params = vec![
            Value::Text("why?".to_string()),
            Value::Text("?".to_string()),
            Value::Integer(3),
        ];
        let first = rewrite(sql, &params, &markers(sql));
        assert_eq!(first.sql, "SELECT 'why?', '?' FROM t WHERE a = ?");

        let second = rewrite(&first.sql, &first.params, &markers(&first.sql));
        assert_eq!(second.sql, first.sql);
        assert_eq!(second.params, vec![Value::Integer(3)]);
    }

    #[test]
    fn negative_literal_after_minus_does_not_open_a_comment() {
        let sql = "SELECT 10-? FROM t";
        let rewritten = rewrite(sql, &[Value::Integer(-4)], &markers(sql));
        assert_eq!(rewritten.sql, "SELECT 10- -4 FROM t");
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "one parameter per marker is required")]
    fn missing_parameters_are_caught_in_debug_builds() {
        let sql = "SELECT ?, ? FROM t";
        rewrite(sql, &[Value::Integer(1)], &markers(sql));
    }

    #[test]
    fn multibyte_text_around_markers_is_preserved() {
        let sql = "SELECT 'München', ? FROM t WHERE note = ?";
        let params = vec![Value::Text("é🙂".to_string()), Value::Text("名字".to_string())];
        let rewritten = rewrite(sql, &params, &markers(sql));
        assert_eq!(
            rewritten.sql,
            "SELECT 'München', 'é🙂' FROM t WHERE note = ?"
        );
        assert_eq!(rewritten.params, vec![Value::Text("名字".to_string())]);
    }
}
