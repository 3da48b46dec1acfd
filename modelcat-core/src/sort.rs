//! Column sorting for the model table.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::ModelRecord;

/// Table columns in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Provider,
    ReleaseDate,
    ParameterCount,
    ContextSize,
    License,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Name,
        SortColumn::Provider,
        SortColumn::ReleaseDate,
        SortColumn::ParameterCount,
        SortColumn::ContextSize,
        SortColumn::License,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Provider => "Provider",
            SortColumn::ReleaseDate => "Released",
            SortColumn::ParameterCount => "Params",
            SortColumn::ContextSize => "Context",
            SortColumn::License => "License",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SortColumn::Name => SortColumn::Provider,
            SortColumn::Provider => SortColumn::ReleaseDate,
            SortColumn::ReleaseDate => SortColumn::ParameterCount,
            SortColumn::ParameterCount => SortColumn::ContextSize,
            SortColumn::ContextSize => SortColumn::License,
            SortColumn::License => SortColumn::Name,
        }
    }

    /// The value a row is ordered by in this column.
    pub fn key<'a>(&self, model: &'a ModelRecord) -> SortKey<'a> {
        let text = |value: Option<&'a str>| value.map_or(SortKey::NotApplicable, SortKey::Text);
        let number = |value: Option<u64>| value.map_or(SortKey::NotApplicable, SortKey::Number);
        match self {
            SortColumn::Name => SortKey::Text(&model.name),
            SortColumn::Provider => SortKey::Text(&model.provider_name),
            SortColumn::ReleaseDate => text(model.release_date_text()),
            SortColumn::ParameterCount => number(model.parameter_count),
            SortColumn::ContextSize => number(model.context_size),
            SortColumn::License => text(model.license_name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column '{0}' (expected name, provider, released, params, context or license)")]
pub struct ParseSortColumnError(String);

impl FromStr for SortColumn {
    type Err = ParseSortColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "model" => Ok(SortColumn::Name),
            "provider" => Ok(SortColumn::Provider),
            "released" | "release" | "release_date" | "date" => Ok(SortColumn::ReleaseDate),
            "params" | "parameters" | "parameter_count" | "size" => Ok(SortColumn::ParameterCount),
            "context" | "ctx" | "context_size" => Ok(SortColumn::ContextSize),
            "license" => Ok(SortColumn::License),
            other => Err(ParseSortColumnError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(u64),
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Compare two keys. "Not applicable" sorts after every comparable value
/// in both directions; two N/A keys are equal.
pub fn compare_keys(a: &SortKey, b: &SortKey, direction: Direction) -> Ordering {
    let ordering = match (a, b) {
        (SortKey::NotApplicable, SortKey::NotApplicable) => return Ordering::Equal,
        (SortKey::NotApplicable, _) => return Ordering::Greater,
        (_, SortKey::NotApplicable) => return Ordering::Less,
        (SortKey::Number(x), SortKey::Number(y)) => x.cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => locale_cmp(x, y),
        // Mixed kinds never occur within one column; keep the order total anyway.
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    };
    match direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    }
}

/// Case-insensitive ordering with lowercase before uppercase on ties.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Stable ascending sort of table rows by `column`.
pub fn sort_models(rows: &mut [&ModelRecord], column: SortColumn) {
    rows.sort_by(|a, b| compare_keys(&column.key(a), &column.key(b), Direction::Ascending));
}

/// Stable sort of positions into `models`, ordered by `column`.
pub fn sort_indices(
    indices: &mut [usize],
    models: &[ModelRecord],
    column: SortColumn,
    direction: Direction,
) {
    indices.sort_by(|&a, &b| {
        compare_keys(&column.key(&models[a]), &column.key(&models[b]), direction)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{model, sized};

    #[test]
    fn test_parameter_count_not_applicable_last() {
        let models = vec![
            sized(1, "A", Some(7000), None, None),
            sized(2, "A", Some(13), None, None),
            sized(3, "A", None, None, None),
        ];
        let mut rows: Vec<&ModelRecord> = models.iter().collect();
        sort_models(&mut rows, SortColumn::ParameterCount);
        let params: Vec<Option<u64>> = rows.iter().map(|m| m.parameter_count).collect();
        assert_eq!(params, vec![Some(13), Some(7000), None]);
    }

    #[test]
    fn test_sort_uses_magnitude_not_rendered_text() {
        // "1B" vs "999M": string order would put 1B first.
        let models = vec![
            sized(1, "A", Some(1500), None, None),
            sized(2, "A", Some(999), None, None),
            sized(3, "A", Some(1000), None, None),
        ];
        let mut rows: Vec<&ModelRecord> = models.iter().collect();
        sort_models(&mut rows, SortColumn::ParameterCount);
        let ids: Vec<u64> = rows.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_context_size_numeric() {
        let models = vec![
            sized(1, "A", None, Some(128000), None),
            sized(2, "A", None, None, None),
            sized(3, "A", None, Some(8192), None),
        ];
        let mut rows: Vec<&ModelRecord> = models.iter().collect();
        sort_models(&mut rows, SortColumn::ContextSize);
        let ids: Vec<u64> = rows.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_text_column_not_applicable_last() {
        let models = vec![
            sized(1, "A", None, None, None),
            sized(2, "A", None, None, Some("MIT")),
            sized(3, "A", None, None, Some("Apache-2.0")),
        ];
        let mut rows: Vec<&ModelRecord> = models.iter().collect();
        sort_models(&mut rows, SortColumn::License);
        let ids: Vec<u64> = rows.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_not_applicable_last_when_descending() {
        let models = vec![
            sized(1, "A", None, None, None),
            sized(2, "A", Some(5), None, None),
            sized(3, "A", Some(50), None, None),
        ];
        let mut indices = vec![0, 1, 2];
        sort_indices(&mut indices, &models, SortColumn::ParameterCount, Direction::Descending);
        assert_eq!(indices, vec![2, 1, 0]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let models = vec![
            model(1, "same", "Zeta"),
            model(2, "same", "Alpha"),
            model(3, "other", "Mid"),
            model(4, "same", "Beta"),
        ];
        let mut rows: Vec<&ModelRecord> = models.iter().collect();
        sort_models(&mut rows, SortColumn::Name);
        let ids: Vec<u64> = rows.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("GPT-4", "GPT-4"), Ordering::Equal);
    }

    #[test]
    fn test_release_date_lexicographic() {
        let mut a = model(1, "a", "p");
        a.release_date = Some("2024-05-13".to_string());
        let mut b = model(2, "b", "p");
        b.release_date = Some("2023-03-14".to_string());
        let c = model(3, "c", "p");
        let models = vec![a, b, c];
        let mut rows: Vec<&ModelRecord> = models.iter().collect();
        sort_models(&mut rows, SortColumn::ReleaseDate);
        let ids: Vec<u64> = rows.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_column_cycle_and_parse() {
        let mut column = SortColumn::Name;
        for expected in SortColumn::ALL.iter().skip(1) {
            column = column.next();
            assert_eq!(column, *expected);
        }
        assert_eq!(column.next(), SortColumn::Name);
        assert_eq!("Params".parse::<SortColumn>(), Ok(SortColumn::ParameterCount));
        assert_eq!("ctx".parse::<SortColumn>(), Ok(SortColumn::ContextSize));
        assert!("score".parse::<SortColumn>().is_err());
    }

    #[test]
    fn test_unknown_column_error_names_the_input() {
        let err = " Score ".parse::<SortColumn>().unwrap_err();
        assert_eq!(err, ParseSortColumnError("score".to_string()));
        assert_eq!(
            err.to_string(),
            "unknown column 'score' (expected name, provider, released, params, context or license)"
        );
    }
}
