//! Base data sources and the helpers that extend them.

use crate::constants::{FILTERED_TABLE, MARK_ID, SERIES_ID, TABLE};
use chartspec_vega::data::{Data, Transform};
use chartspec_vega::Expr;

/// `table` holds the raw rows; every mark reads from `filteredTable`
pub fn base_data() -> Vec<Data> {
    vec![
        Data::with_values(TABLE, Vec::new()).with_transforms([Transform::identifier(MARK_ID)]),
        Data::derived(FILTERED_TABLE, TABLE),
    ]
}

/// The `table` data source, inserting the base data first if it is missing
pub fn table_data_mut(data: &mut Vec<Data>) -> &mut Data {
    let index = match data.iter().position(|d| d.name == TABLE) {
        Some(index) => index,
        None => {
            tracing::debug!("base data missing, inserting `{TABLE}` and `{FILTERED_TABLE}`");
            let missing = base_data()
                .into_iter()
                .filter(|base| data.iter().all(|d| d.name != base.name))
                .collect::<Vec<_>>();
            for (i, base) in missing.into_iter().enumerate() {
                data.insert(i, base);
            }
            0
        }
    };
    &mut data[index]
}

/// Whether any transform in the list already writes `field`
pub fn has_output_field(transforms: &[Transform], field: &str) -> bool {
    transforms.iter().any(|t| t.output_field() == Some(field))
}

/// Formula writing a series id built from the facet fields, `None` without facets
pub fn series_id_transform(facets: &[String]) -> Option<Transform> {
    let mut terms = Vec::with_capacity(facets.len() * 2);
    for (i, facet) in facets.iter().enumerate() {
        if i > 0 {
            terms.push(Expr::str(" | "));
        }
        terms.push(Expr::datum(facet.as_str()));
    }
    Expr::sum(terms).map(|expr| Transform::formula(expr, SERIES_ID))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_series_id_transform() {
        assert_eq!(series_id_transform(&[]), None);

        let transform = series_id_transform(&["series".to_string(), "period".to_string()]).unwrap();
        assert_eq!(
            serde_json::to_value(transform).unwrap(),
            json!({
                "type": "formula",
                "expr": "datum.series + ' | ' + datum.period",
                "as": "rscSeriesId"
            })
        );
    }

    #[test]
    fn test_table_data_inserted_when_missing() {
        let mut data = vec![Data::derived("other", "somewhere")];
        let table = table_data_mut(&mut data);
        assert_eq!(table.name, TABLE);
        let names = data.iter().map(|d| d.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec![TABLE, FILTERED_TABLE, "other"]);
    }

    #[test]
    fn test_table_data_found() {
        let mut data = base_data();
        table_data_mut(&mut data).transform.clear();
        assert!(data[0].transform.is_empty());
        assert_eq!(data.len(), 2);
    }
}
