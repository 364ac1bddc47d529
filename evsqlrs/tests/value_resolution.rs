//! Integration tests for option/legend value resolution.

use serde_json::json;

use evsql::resolve::{
    collapsed_item_value, item_legend_value, item_option_value, used_options, Grid, GridHeader,
    ItemOption, Legend, LegendSet, OptionSet, QueryFilter, QueryItem,
};
use evsql::OutputIdScheme;

fn option(id: i64, uid: &str, code: &str, name: &str, display_name: &str) -> ItemOption {
    ItemOption {
        id,
        uid: uid.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        display_name: display_name.to_string(),
    }
}

fn legend(id: i64, uid: &str, code: &str, name: &str, display_name: &str) -> Legend {
    Legend {
        id,
        uid: uid.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        display_name: display_name.to_string(),
    }
}

#[test]
fn option_lookup_is_case_insensitive_and_scheme_driven() {
    let options = vec![option(11, "U1", "C1", "N1", "Pos")];

    assert_eq!(
        item_option_value("pos", &options, OutputIdScheme::Uid),
        Some("U1".to_string())
    );
    assert_eq!(
        item_option_value("POS", &options, OutputIdScheme::Code),
        Some("C1".to_string())
    );
    assert_eq!(
        item_option_value("Pos", &options, OutputIdScheme::Name),
        Some("N1".to_string())
    );
    assert_eq!(
        item_option_value("Pos", &options, OutputIdScheme::Id),
        Some("11".to_string())
    );
    assert_eq!(item_option_value("Neg", &options, OutputIdScheme::Uid), None);
}

#[test]
fn legend_lookup_mirrors_option_lookup() {
    let legends = vec![legend(7, "L1", "LOW", "Low band", "Low")];

    assert_eq!(
        item_legend_value("low", &legends, OutputIdScheme::Uid),
        Some("L1".to_string())
    );
    assert_eq!(
        item_legend_value("High", &legends, OutputIdScheme::Uid),
        None
    );
}

#[test]
fn collapsed_value_prefers_legend_then_option_then_raw() {
    let item = QueryItem {
        short_name: "BP".to_string(),
        legend_set: Some(LegendSet {
            legends: vec![legend(1, "LG1", "", "", "Normal range")],
        }),
        option_set: Some(OptionSet {
            options: vec![option(2, "OP1", "HIGH", "", "High reading")],
        }),
        filters: vec![],
    };

    assert_eq!(collapsed_item_value(&item, Some("LG1")), "BP: Normal range");
    assert_eq!(collapsed_item_value(&item, Some("HIGH")), "BP: High reading");
    assert_eq!(collapsed_item_value(&item, Some("120/80")), "BP: 120/80");
}

#[test]
fn collapsed_value_falls_back_to_placeholder() {
    let item = QueryItem {
        short_name: "BP".to_string(),
        ..Default::default()
    };

    assert_eq!(collapsed_item_value(&item, None), "BP: [N/A]");
    assert_eq!(collapsed_item_value(&item, Some("")), "BP: [N/A]");
}

#[test]
fn used_options_match_row_cells_case_insensitively() {
    let set = OptionSet {
        options: vec![
            option(1, "U1", "A03", "", "Birth"),
            option(2, "U2", "B01", "", "Death"),
        ],
    };
    let grid = Grid {
        headers: vec![
            GridHeader {
                name: "event".to_string(),
                option_set: None,
            },
            GridHeader {
                name: "cause".to_string(),
                option_set: Some(set),
            },
        ],
        rows: vec![
            vec![json!("e1"), json!("a03")],
            vec![json!("e2"), json!(42)],
        ],
    };

    let used = used_options(&grid, &[]);

    assert_eq!(used.len(), 1);
    assert_eq!(used[0].uid, "U1");
}

#[test]
fn used_options_fall_back_to_filter_codes_when_grid_is_empty() {
    let set = OptionSet {
        options: vec![
            option(1, "U1", "A03", "", "Birth"),
            option(2, "U2", "B01", "", "Death"),
            option(3, "U3", "C02", "", "Other"),
        ],
    };
    let grid = Grid {
        headers: vec![GridHeader {
            name: "cause".to_string(),
            option_set: Some(set.clone()),
        }],
        rows: vec![],
    };
    let items = vec![QueryItem {
        short_name: "cause".to_string(),
        option_set: Some(set),
        filters: vec![QueryFilter {
            filter: "A03;B01".to_string(),
        }],
        ..Default::default()
    }];

    let used = used_options(&grid, &items);

    let uids: Vec<_> = used.iter().map(|o| o.uid.as_str()).collect();
    assert_eq!(uids, vec!["U1", "U2"]);
}

#[test]
fn used_options_are_deduplicated_by_uid() {
    let set = OptionSet {
        options: vec![option(1, "U1", "A03", "", "Birth")],
    };
    let grid = Grid {
        headers: vec![
            GridHeader {
                name: "first".to_string(),
                option_set: Some(set.clone()),
            },
            GridHeader {
                name: "second".to_string(),
                option_set: Some(set),
            },
        ],
        rows: vec![vec![json!("A03"), json!("A03")]],
    };

    let used = used_options(&grid, &[]);
    assert_eq!(used.len(), 1);
}
