// Rust guideline compliant 2026-10-19

//! Built-in demo catalog standing in for the spreadsheet loader.
//!
//! Headers deliberately use the spaced, Korean-labelled form of the source
//! spreadsheet so the load-time normalization and alias resolution are
//! exercised on every run.

use catalog::RawTable;

/// Header row as exported by the source spreadsheet.
const COLUMNS: &[&str] = &[
    "음식명",
    "대표식품명",
    "에너지 (kcal)",
    "탄수화물 (g)",
    "단백질 (g)",
    "지방 (g)",
    "당류 (g)",
    "나트륨 (mg)",
];

/// name, category, kcal, carbohydrate, protein, fat, sugar, sodium.
const ROWS: &[[&str; 8]] = &[
    ["Bibimbap", "rice", "560", "85", "18", "16", "6", "850"],
    ["Kimchi fried rice", "rice", "620", "90", "15", "20", "5", "1300"],
    ["Kimchi stew", "stew", "250", "12", "17", "14", "4", "1900"],
    ["Soybean paste stew", "stew", "180", "14", "13", "7", "3", "1700"],
    ["Beef radish soup", "soup", "150", "6", "14", "7", "2", "1100"],
    ["Seaweed soup", "soup", "110", "5", "8", "6", "1", "950"],
    ["Cold noodles", "noodle", "480", "92", "16", "5", "9", "2100"],
    ["Glass noodles", "noodle", "300", "48", "7", "9", "11", "650"],
    ["Bulgogi", "meat", "400", "18", "30", "22", "14", "900"],
    ["Grilled mackerel", "fish", "320", "0", "28", "23", "0", "480"],
    ["Steamed egg", "side", "90", "2", "8", "6", "1", "380"],
    ["Tofu salad", "side", "150", "9", "11", "8", "4", "320"],
    ["Chicken breast salad", "salad", "230", "10", "32", "7", "5", "410"],
    ["Sweet potato", "snack", "130", "30", "2", "0", "6", "40"],
    ["Greek yogurt", "dairy", "120", "8", "15", "3", "6", "60"],
];

/// The demo catalog as a loader would hand it over.
#[must_use]
pub fn table() -> RawTable {
    RawTable {
        columns: COLUMNS.iter().map(|c| (*c).to_owned()).collect(),
        rows: ROWS.iter().map(|row| row.iter().map(|c| (*c).to_owned()).collect()).collect(),
    }
}
