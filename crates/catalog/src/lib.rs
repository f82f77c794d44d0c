// Rust guideline compliant 2026-10-19

//! Immutable food catalog with load-time column alias resolution.
//!
//! Entry points: [`Catalog::from_table`], [`Catalog::from_items`].
//! Column names are resolved once against [`NUTRIENT_ALIASES`],
//! [`NAME_ALIASES`] and [`CATEGORY_ALIASES`]; the resulting [`ColumnMap`] is
//! kept on the catalog so no request ever probes aliases again.

use domain::{FoodItem, NUTRIENT_LEN, Nutrients};

// ---------------------------------------------------------------------------
// Alias tables
// ---------------------------------------------------------------------------

/// Canonical nutrient name paired with its accepted source columns, in model
/// order. Within one entry the first alias present in the table wins.
pub const NUTRIENT_ALIASES: [(&str, &[&str]); NUTRIENT_LEN] = [
    ("energy", &["energy(kcal)", "energy", "에너지(kcal)", "에너지"]),
    ("carbohydrate", &["carbohydrate(g)", "carbohydrate", "탄수화물(g)", "탄수화물"]),
    ("protein", &["protein(g)", "protein", "단백질(g)", "단백질"]),
    ("fat", &["fat(g)", "fat", "지방(g)", "지방"]),
    ("sugar", &["sugar(g)", "sugar", "당류(g)", "당류"]),
    ("sodium", &["sodium(mg)", "sodium", "나트륨(mg)", "나트륨"]),
];

/// Accepted name columns; falls back to the first column.
pub const NAME_ALIASES: &[&str] = &["food_name", "name", "음식명"];

/// Accepted category columns; falls back to the second column.
pub const CATEGORY_ALIASES: &[&str] = &["category", "representative_food", "대표식품명"];

// ---------------------------------------------------------------------------
// RawTable
// ---------------------------------------------------------------------------

/// Tabular catalog data as handed over by a loader (spreadsheet, CSV, ...).
///
/// Rows may be shorter than `columns`; missing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column headers, unnormalized.
    pub columns: Vec<String>,
    /// Row-major string cells.
    pub rows: Vec<Vec<String>>,
}

/// Remove every whitespace character from a column header.
#[must_use]
pub fn normalize_column(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

// ---------------------------------------------------------------------------
// ColumnMap
// ---------------------------------------------------------------------------

/// Column indices resolved once at load time. `None` means "fill with zero"
/// for nutrients and "empty string" for name/category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    /// Index of the display-name column.
    pub name: Option<usize>,
    /// Index of the category column.
    pub category: Option<usize>,
    /// Index of each nutrient column, in model order.
    pub nutrients: [Option<usize>; NUTRIENT_LEN],
}

impl ColumnMap {
    /// Resolve all aliases against already-normalized `columns`.
    #[must_use]
    pub fn resolve(columns: &[String]) -> Self {
        let nutrients = NUTRIENT_ALIASES.map(|(_, aliases)| find_column(columns, aliases));
        let name = find_column(columns, NAME_ALIASES).or_else(|| (!columns.is_empty()).then_some(0));
        let category = find_column(columns, CATEGORY_ALIASES).or_else(|| (columns.len() > 1).then_some(1));
        Self { name, category, nutrients }
    }

    /// Canonical nutrient names that no alias matched.
    #[must_use]
    pub fn unresolved_nutrients(&self) -> Vec<&'static str> {
        NUTRIENT_ALIASES
            .iter()
            .zip(self.nutrients)
            .filter(|(_, idx)| idx.is_none())
            .map(|((canonical, _), _)| *canonical)
            .collect()
    }
}

/// First alias (in alias order) that names a column.
fn find_column(columns: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| columns.iter().position(|c| c == alias))
}

fn cell(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map_or("", String::as_str)
}

/// Numeric cell; empty, unparseable or non-finite cells read as `0.0`.
fn numeric_cell(row: &[String], idx: Option<usize>) -> f64 {
    cell(row, idx)
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The read-only food catalog, loaded once at process start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<FoodItem>,
    columns: Option<ColumnMap>,
}

impl Catalog {
    /// Build a catalog from loader output.
    ///
    /// Normalizes column headers, resolves aliases once, and converts each
    /// row into a [`FoodItem`]. Total: missing columns degrade to defaults.
    #[must_use]
    pub fn from_table(table: &RawTable) -> Self {
        let columns: Vec<String> = table.columns.iter().map(|c| normalize_column(c)).collect();
        let map = ColumnMap::resolve(&columns);

        let unresolved = map.unresolved_nutrients();
        if !unresolved.is_empty() {
            tracing::warn!(?unresolved, "catalog.columns.unresolved: filling with zero");
        }

        let items: Vec<FoodItem> = table
            .rows
            .iter()
            .map(|row| FoodItem {
                name: cell(row, map.name).trim().to_owned(),
                category: cell(row, map.category).trim().to_owned(),
                nutrients: Nutrients::from_array(map.nutrients.map(|idx| numeric_cell(row, idx))),
            })
            .collect();

        tracing::info!(rows = items.len(), "catalog.loaded");
        Self { items, columns: Some(map) }
    }

    /// Build a catalog from already-resolved items. No column mapping applies.
    #[must_use]
    pub fn from_items(items: Vec<FoodItem>) -> Self {
        Self { items, columns: None }
    }

    /// All rows, in catalog order.
    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Row at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FoodItem> {
        self.items.get(index)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when the catalog has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The column mapping resolved at load time; `None` for catalogs built
    /// with [`Catalog::from_items`].
    #[must_use]
    pub fn columns(&self) -> Option<&ColumnMap> {
        self.columns.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_owned()).collect()
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable { columns: strings(columns), rows: rows.iter().map(|r| strings(r)).collect() }
    }

    // ------------------------------------------------------------------
    // Column normalization and alias resolution
    // ------------------------------------------------------------------

    #[test]
    fn normalize_removes_all_whitespace() {
        assert_eq!(normalize_column(" energy (kcal) "), "energy(kcal)");
        assert_eq!(normalize_column("에너지\t(kcal)"), "에너지(kcal)");
    }

    #[test]
    fn unit_alias_wins_over_bare_alias() {
        let columns = strings(&["energy", "energy(kcal)"]);
        let map = ColumnMap::resolve(&columns);
        assert_eq!(map.nutrients[0], Some(1));
    }

    #[test]
    fn bare_alias_used_when_unit_alias_absent() {
        let columns = strings(&["name", "category", "protein"]);
        let map = ColumnMap::resolve(&columns);
        assert_eq!(map.nutrients[2], Some(2));
        assert_eq!(map.unresolved_nutrients(), vec!["energy", "carbohydrate", "fat", "sugar", "sodium"]);
    }

    #[test]
    fn korean_headers_resolve() {
        let columns = strings(&["음식명", "대표식품명", "에너지(kcal)", "탄수화물(g)", "단백질(g)", "지방(g)", "당류(g)", "나트륨(mg)"]);
        let map = ColumnMap::resolve(&columns);
        assert_eq!(map.name, Some(0));
        assert_eq!(map.category, Some(1));
        assert_eq!(map.nutrients, [Some(2), Some(3), Some(4), Some(5), Some(6), Some(7)]);
        assert!(map.unresolved_nutrients().is_empty());
    }

    #[test]
    fn name_and_category_fall_back_to_leading_columns() {
        let columns = strings(&["dish", "group", "energy"]);
        let map = ColumnMap::resolve(&columns);
        assert_eq!(map.name, Some(0));
        assert_eq!(map.category, Some(1));
    }

    #[test]
    fn single_column_table_has_no_category() {
        let map = ColumnMap::resolve(&strings(&["dish"]));
        assert_eq!(map.name, Some(0));
        assert_eq!(map.category, None);
        assert_eq!(ColumnMap::resolve(&[]), ColumnMap::default());
    }

    // ------------------------------------------------------------------
    // Catalog::from_table
    // ------------------------------------------------------------------

    #[test]
    #[expect(clippy::float_cmp, reason = "exact literals parsed from text")]
    fn from_table_parses_rows() {
        let t = table(
            &["food_name", "category", "energy (kcal)", "sodium(mg)"],
            &[&["Bibimbap", "rice", "560", "850.5"], &["Doenjang stew", "stew", "180", "1200"]],
        );
        let catalog = Catalog::from_table(&t);
        assert_eq!(catalog.len(), 2);
        let first = catalog.get(0).unwrap();
        assert_eq!(first.name, "Bibimbap");
        assert_eq!(first.category, "rice");
        assert_eq!(first.nutrients.energy, 560.0);
        assert_eq!(first.nutrients.sodium, 850.5);
        assert_eq!(first.nutrients.protein, 0.0);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "exact literals")]
    fn missing_and_bad_cells_default_to_zero() {
        let t = table(
            &["name", "category", "energy", "fat"],
            &[&["Porridge", "rice", "", "NaN"], &["Toast"]],
        );
        let catalog = Catalog::from_table(&t);
        let porridge = catalog.get(0).unwrap();
        assert_eq!(porridge.nutrients.energy, 0.0);
        assert_eq!(porridge.nutrients.fat, 0.0);
        let toast = catalog.get(1).unwrap();
        assert_eq!(toast.name, "Toast");
        assert_eq!(toast.category, "");
        assert_eq!(toast.nutrients, Nutrients::default());
    }

    #[test]
    fn column_map_is_kept_on_catalog() {
        let t = table(&["name", "category", "sugar(g)"], &[]);
        let catalog = Catalog::from_table(&t);
        assert!(catalog.is_empty());
        assert_eq!(catalog.columns().unwrap().nutrients[4], Some(2));
    }

    #[test]
    fn from_items_preserves_order() {
        let items = vec![
            FoodItem { name: "A".to_owned(), category: "soup".to_owned(), nutrients: Nutrients::default() },
            FoodItem { name: "B".to_owned(), category: "rice".to_owned(), nutrients: Nutrients::default() },
        ];
        let catalog = Catalog::from_items(items.clone());
        assert_eq!(catalog.items(), items.as_slice());
        assert!(catalog.columns().is_none());
    }

    #[test]
    fn default_catalog_has_no_column_map() {
        assert!(Catalog::default().columns().is_none());
    }
}
