use std::collections::HashSet;

use indexmap::IndexMap;
use querysculptor_model::{ArgValue, FieldNode, FragmentDef, InlineFragment, QueryStructure};
use querysculptor_validator::{coerce_to_integer, PAGINATION_ARG_NAMES};

use crate::error::ComplexityError;

pub const MAX_DEPTH: usize = 12;
pub const MAX_FIELD_COUNT: usize = 200;
pub const MAX_SCORE: f64 = 2500.0;

const DEPTH_WARNING_RATIO: f64 = 0.8;
const SCORE_WARNING_RATIO: f64 = 0.7;
const FRAGMENT_SPREAD_SCORE: f64 = 2.0;

/// The outcome of walking a `QueryStructure`: aggregate depth/count/score,
/// any limit violations (each subtree that trips a limit is pruned from
/// further descent, so later siblings are still scored), and warnings for
/// approaching a limit without crossing it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ComplexityReport {
    pub max_depth: usize,
    pub field_count: usize,
    pub total_score: f64,
    pub errors: Vec<ComplexityError>,
    pub warnings: Vec<String>,
}

impl ComplexityReport {
    pub fn is_within_limits(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Walks `structure`'s fields, fragment spreads, and inline fragments,
/// resolving spreads against `fragments`. A per-path visited set guards
/// against a fragment (directly or transitively) spreading itself: the
/// first re-entry into a fragment already on the walk stack is skipped
/// rather than expanded again.
pub fn analyze(structure: &QueryStructure, fragments: &IndexMap<String, FragmentDef>) -> ComplexityReport {
    let mut report = ComplexityReport::default();
    let mut visiting = HashSet::new();

    for field in structure.fields.values() {
        walk_field(field, 1, fragments, &mut visiting, &mut report);
    }
    for spread in &structure.fragment_spreads {
        walk_spread(spread, 1, fragments, &mut visiting, &mut report);
    }
    for inline in &structure.inline_fragments {
        walk_inline(inline, 1, fragments, &mut visiting, &mut report);
    }

    append_threshold_warnings(&mut report);
    report
}

fn walk_field(
    field: &FieldNode,
    depth: usize,
    fragments: &IndexMap<String, FragmentDef>,
    visiting: &mut HashSet<String>,
    report: &mut ComplexityReport,
) {
    report.max_depth = report.max_depth.max(depth);
    if depth > MAX_DEPTH {
        push_once(report, ComplexityError::DepthExceeded { depth, limit: MAX_DEPTH });
        return;
    }

    report.field_count += 1;
    if report.field_count > MAX_FIELD_COUNT {
        push_once(
            report,
            ComplexityError::FieldCountExceeded {
                count: report.field_count,
                limit: MAX_FIELD_COUNT,
            },
        );
        return;
    }

    report.total_score += local_score(field, depth);
    if report.total_score > MAX_SCORE {
        push_once(
            report,
            ComplexityError::ScoreExceeded {
                score: report.total_score,
                limit: MAX_SCORE,
            },
        );
        return;
    }

    for child in field.fields.values() {
        walk_field(child, depth + 1, fragments, visiting, report);
    }
    for spread in &field.fragment_spreads {
        walk_spread(spread, depth + 1, fragments, visiting, report);
    }
    for inline in &field.inline_fragments {
        walk_inline(inline, depth + 1, fragments, visiting, report);
    }
}

fn walk_spread(
    name: &str,
    depth: usize,
    fragments: &IndexMap<String, FragmentDef>,
    visiting: &mut HashSet<String>,
    report: &mut ComplexityReport,
) {
    report.max_depth = report.max_depth.max(depth);
    if depth > MAX_DEPTH {
        push_once(report, ComplexityError::DepthExceeded { depth, limit: MAX_DEPTH });
        return;
    }

    report.field_count += 1;
    if report.field_count > MAX_FIELD_COUNT {
        push_once(
            report,
            ComplexityError::FieldCountExceeded {
                count: report.field_count,
                limit: MAX_FIELD_COUNT,
            },
        );
        return;
    }

    report.total_score += FRAGMENT_SPREAD_SCORE;
    if report.total_score > MAX_SCORE {
        push_once(
            report,
            ComplexityError::ScoreExceeded {
                score: report.total_score,
                limit: MAX_SCORE,
            },
        );
        return;
    }

    if visiting.contains(name) {
        return;
    }
    let Some(fragment) = fragments.get(name) else {
        return;
    };
    visiting.insert(name.to_string());
    for child in fragment.fields.values() {
        walk_field(child, depth + 1, fragments, visiting, report);
    }
    visiting.remove(name);
}

fn walk_inline(
    inline: &InlineFragment,
    depth: usize,
    fragments: &IndexMap<String, FragmentDef>,
    visiting: &mut HashSet<String>,
    report: &mut ComplexityReport,
) {
    for child in inline.selections.values() {
        walk_field(child, depth + 1, fragments, visiting, report);
    }
}

fn local_score(field: &FieldNode, depth: usize) -> f64 {
    let mut score = 1.0 + 0.5 * field.args.len() as f64;
    for (name, value) in &field.args {
        if PAGINATION_ARG_NAMES.contains(&name.as_str()) {
            if let Some(n) = numeric_arg_value(value) {
                if n > 100 {
                    score += (n as f64).log10() * 2.0;
                }
            }
        }
    }
    score += 0.3 * field.directives.len() as f64;
    score * 1.2f64.powi(depth as i32)
}

fn numeric_arg_value(value: &ArgValue) -> Option<i64> {
    match value {
        ArgValue::Typed { value, .. } | ArgValue::Raw { value } => coerce_to_integer(value),
        _ => None,
    }
}

fn push_once(report: &mut ComplexityReport, error: ComplexityError) {
    let already_reported = report.errors.iter().any(|existing| {
        std::mem::discriminant(existing) == std::mem::discriminant(&error)
    });
    if !already_reported {
        report.errors.push(error);
    }
}

fn append_threshold_warnings(report: &mut ComplexityReport) {
    let depth_ratio = report.max_depth as f64 / MAX_DEPTH as f64;
    if depth_ratio > DEPTH_WARNING_RATIO && report.max_depth <= MAX_DEPTH {
        report.warnings.push(format!(
            "Query depth {} is approaching the limit of {}.",
            report.max_depth, MAX_DEPTH
        ));
    }
    let score_ratio = report.total_score / MAX_SCORE;
    if score_ratio > SCORE_WARNING_RATIO && report.total_score <= MAX_SCORE {
        report.warnings.push(format!(
            "Query complexity score {:.1} is approaching the limit of {:.1}.",
            report.total_score, MAX_SCORE
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use querysculptor_model::Path;
    use querysculptor_model::QueryState;
    use querysculptor_model::OperationType;
    use serde_json::json;

    fn structure_from(state: &QueryState) -> &QueryStructure {
        &state.query_structure
    }

    #[test]
    fn single_field_scores_base_one_at_depth_one() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        state
            .insert_field(&Path::new(""), FieldNode::new("pokemons", None))
            .unwrap();
        let report = analyze(structure_from(&state), &state.fragments);
        assert_eq!(report.field_count, 1);
        assert_eq!(report.max_depth, 1);
        assert!((report.total_score - 1.2).abs() < 1e-9);
        assert!(report.is_within_limits());
    }

    #[test]
    fn s6_structure_thirteen_levels_deep_fails_depth_limit() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        let mut current = FieldNode::new("level0", None);
        for i in 1..13 {
            let mut child = FieldNode::new(format!("level{i}"), None);
            std::mem::swap(&mut current, &mut child);
            current.insert_child(child).unwrap();
        }
        state.insert_field(&Path::new(""), current).unwrap();

        let report = analyze(structure_from(&state), &state.fragments);
        assert!(!report.is_within_limits());
        assert!(report
            .errors
            .iter()
            .any(|e| matches!(e, ComplexityError::DepthExceeded { depth, limit } if *depth == 13 && *limit == 12)));
    }

    #[test]
    fn pagination_argument_above_hundred_adds_log_bonus() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        let mut pokemons = FieldNode::new("pokemons", None);
        pokemons.args.insert(
            "first".to_string(),
            ArgValue::Typed {
                value: json!(1000),
                type_name: "Int".to_string(),
            },
        );
        state.insert_field(&Path::new(""), pokemons).unwrap();
        let report = analyze(structure_from(&state), &state.fragments);
        // base (1 + 0.5) + log10(1000)*2 = 1.5 + 6 = 7.5, * 1.2^1 = 9.0
        assert!((report.total_score - 9.0).abs() < 1e-9);
    }

    #[test]
    fn self_spreading_fragment_does_not_infinite_loop() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        state.spread_fragment(&Path::new(""), "cyclical").unwrap();
        let mut fragment = FragmentDef::new("Query");
        // a fragment whose own field set spreads itself again
        let mut inner = FieldNode::new("self", None);
        inner.fragment_spreads.push("cyclical".to_string());
        fragment.fields.insert("self".to_string(), inner);
        state.fragments.insert("cyclical".to_string(), fragment);

        let report = analyze(structure_from(&state), &state.fragments);
        assert!(report.field_count < 1000);
    }

    #[test]
    fn score_is_monotone_non_decreasing_as_fields_are_added() {
        let mut state = QueryState::new(OperationType::Query, "Query");
        state
            .insert_field(&Path::new(""), FieldNode::new("pokemons", None))
            .unwrap();
        let before = analyze(structure_from(&state), &state.fragments).total_score;
        state
            .insert_field(&Path::new("pokemons"), FieldNode::new("name", None))
            .unwrap();
        let after = analyze(structure_from(&state), &state.fragments).total_score;
        assert!(after >= before);
    }
}
