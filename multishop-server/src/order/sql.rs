//! Statement text derived from `Entity` metadata
//!
//! Only identifiers from compile-time constants are interpolated; every
//! value goes through a numbered placeholder.

use super::repository::{Column, Entity};

/// `Key AS key, Col AS col, ...` so `FromRow` sees struct field names.
pub fn select_list<E: Entity>() -> String {
    std::iter::once(&E::KEY)
        .chain(E::COLUMNS.iter())
        .map(|c| format!("{} AS {}", c.name, c.field))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn select_all<E: Entity>() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_list::<E>(),
        E::TABLE,
        E::KEY.name
    )
}

pub fn select_by_id<E: Entity>() -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_list::<E>(),
        E::TABLE,
        E::KEY.name
    )
}

pub fn insert<E: Entity>() -> String {
    let names = column_names(E::COLUMNS);
    let placeholders = (1..=E::COLUMNS.len())
        .map(|i| format!("${}", i))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        E::TABLE,
        names,
        placeholders,
        select_list::<E>()
    )
}

/// Full overwrite; the key is the last placeholder.
pub fn update<E: Entity>() -> String {
    let assignments = E::COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ${}", c.name, i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        E::TABLE,
        assignments,
        E::KEY.name,
        E::COLUMNS.len() + 1
    )
}

pub fn delete<E: Entity>() -> String {
    format!("DELETE FROM {} WHERE {} = $1", E::TABLE, E::KEY.name)
}

fn column_names(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}
