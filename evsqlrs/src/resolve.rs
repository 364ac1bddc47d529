//! Result-value resolution against option sets and legend sets.
//!
//! Raw cell values coming out of an analytics query are codes, uids or
//! display names. This module rewrites them into the representation the
//! caller asked for via [`OutputIdScheme`], using read-only reference data
//! supplied alongside the query. Lookup misses are not errors: the raw value
//! stays unresolved.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Separator between an item's short name and its resolved value.
const ITEM_NAME_SEP: &str = ": ";

/// Placeholder for an absent or empty raw value.
const NA: &str = "[N/A]";

/// Caller-selected representation for resolved reference values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputIdScheme {
    #[default]
    Uid,
    Code,
    Name,
    Id,
}

/// One entry of an option set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ItemOption {
    pub id: i64,
    pub uid: String,
    pub code: String,
    pub name: String,
    pub display_name: String,
}

/// One banded/range label of a legend set. Same shape as [`ItemOption`] but
/// keyed differently during resolution (by uid instead of code).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Legend {
    pub id: i64,
    pub uid: String,
    pub code: String,
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OptionSet {
    pub options: Vec<ItemOption>,
}

impl OptionSet {
    pub fn option_by_code(&self, code: &str) -> Option<&ItemOption> {
        self.options.iter().find(|option| option.code == code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LegendSet {
    pub legends: Vec<Legend>,
}

impl LegendSet {
    pub fn legend_by_uid(&self, uid: &str) -> Option<&Legend> {
        self.legends.iter().find(|legend| legend.uid == uid)
    }
}

/// Equality/IN-style filter attached to a query item; `filter` holds the
/// matched codes, semicolon-separated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueryFilter {
    pub filter: String,
}

/// A dimension item of the originating query, with its optional reference
/// data attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QueryItem {
    pub short_name: String,
    pub legend_set: Option<LegendSet>,
    pub option_set: Option<OptionSet>,
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
}

/// Header of one grid column, optionally backed by an option set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GridHeader {
    pub name: String,
    pub option_set: Option<OptionSet>,
}

/// Read-only tabular query result: ordered headers plus fixed-width rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Grid {
    pub headers: Vec<GridHeader>,
    pub rows: Vec<Vec<Value>>,
}

trait RefItem {
    fn id(&self) -> i64;
    fn uid(&self) -> &str;
    fn code(&self) -> &str;
    fn name(&self) -> &str;
    fn display_name(&self) -> &str;
}

impl RefItem for ItemOption {
    fn id(&self) -> i64 {
        self.id
    }
    fn uid(&self) -> &str {
        &self.uid
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl RefItem for Legend {
    fn id(&self) -> i64 {
        self.id
    }
    fn uid(&self) -> &str {
        &self.uid
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn display_name(&self) -> &str {
        &self.display_name
    }
}

fn scheme_value<T: RefItem>(item: &T, scheme: OutputIdScheme) -> String {
    match scheme {
        OutputIdScheme::Uid => item.uid().to_string(),
        OutputIdScheme::Code => item.code().to_string(),
        OutputIdScheme::Name => item.name().to_string(),
        OutputIdScheme::Id => item.id().to_string(),
    }
}

fn find_by_display_name<'a, T: RefItem>(items: &'a [T], display_name: &str) -> Option<&'a T> {
    items
        .iter()
        .find(|item| item.display_name().eq_ignore_ascii_case(display_name))
}

/// Resolve a display name against a collection of options. `None` when no
/// option matches (case-insensitive).
pub fn item_option_value(
    item_value: &str,
    options: &[ItemOption],
    scheme: OutputIdScheme,
) -> Option<String> {
    find_by_display_name(options, item_value).map(|option| scheme_value(option, scheme))
}

/// Resolve a display name against a collection of legends. `None` when no
/// legend matches (case-insensitive).
pub fn item_legend_value(
    item_value: &str,
    legends: &[Legend],
    scheme: OutputIdScheme,
) -> Option<String> {
    find_by_display_name(legends, item_value).map(|legend| scheme_value(legend, scheme))
}

/// Render a collapsed `"<short name>: <value>"` pair for one query item.
///
/// The raw value is treated as a legend uid first, then an option code; when
/// neither matches it is emitted verbatim, or as `[N/A]` when absent/empty.
pub fn collapsed_item_value(item: &QueryItem, item_value: Option<&str>) -> String {
    let prefix = format!("{}{ITEM_NAME_SEP}", item.short_name);

    if let (Some(legend_set), Some(value)) = (&item.legend_set, item_value) {
        if let Some(legend) = legend_set.legend_by_uid(value) {
            return format!("{prefix}{}", legend.display_name);
        }
    }

    if let (Some(option_set), Some(value)) = (&item.option_set, item_value) {
        if let Some(option) = option_set.option_by_code(value) {
            return format!("{prefix}{}", option.display_name);
        }
    }

    match item_value {
        Some(value) if !value.is_empty() => format!("{prefix}{value}"),
        _ => format!("{prefix}{NA}"),
    }
}

/// Collect the options actually used by a result grid.
///
/// For each header backed by an option set: when the grid has rows, the
/// options whose code matches some cell value of that column
/// (case-insensitive); when it has none, the options referenced by the query
/// items' filter codes instead. De-duplicated by option uid; order follows
/// first appearance.
pub fn used_options(grid: &Grid, items: &[QueryItem]) -> Vec<ItemOption> {
    let mut options = Vec::new();

    for (column_index, header) in grid.headers.iter().enumerate() {
        let Some(option_set) = &header.option_set else {
            continue;
        };

        if grid.rows.is_empty() {
            options.extend(filter_options(items));
        } else {
            options.extend(row_matching_options(grid, column_index, option_set));
        }
    }

    dedup_by_uid(options)
}

/// Options whose code matches a cell value in the given column.
fn row_matching_options(
    grid: &Grid,
    column_index: usize,
    option_set: &OptionSet,
) -> Vec<ItemOption> {
    option_set
        .options
        .iter()
        .filter(|option| {
            grid.rows.iter().any(|row| match row.get(column_index) {
                Some(Value::String(cell)) => cell.eq_ignore_ascii_case(&option.code),
                _ => false,
            })
        })
        .cloned()
        .collect()
}

/// Options referenced by the items' semicolon-separated filter codes.
fn filter_options(items: &[QueryItem]) -> Vec<ItemOption> {
    let mut options = Vec::new();

    for item in items {
        let Some(option_set) = &item.option_set else {
            continue;
        };
        if option_set.options.is_empty() || item.filters.is_empty() {
            continue;
        }

        for option in &option_set.options {
            let referenced = item.filters.iter().any(|filter| {
                filter
                    .filter
                    .split(';')
                    .map(str::trim)
                    .any(|code| code == option.code.trim())
            });
            if referenced {
                options.push(option.clone());
            }
        }
    }

    options
}

fn dedup_by_uid(options: Vec<ItemOption>) -> Vec<ItemOption> {
    let mut seen = std::collections::HashSet::new();
    options
        .into_iter()
        .filter(|option| seen.insert(option.uid.clone()))
        .collect()
}
