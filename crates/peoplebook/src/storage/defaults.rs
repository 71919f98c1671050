//! Default dataset for peoplebook.
//!
//! Written to the people file whenever it is missing or cannot be parsed.

use crate::record::{Gender, Record};

/// Name, gender and height of every default record, in file order.
pub const DEFAULT_PEOPLE: &[(&str, Gender, f64)] = &[
    ("Ivan Petrenko", Gender::Male, 180.0),
    ("Oleh Shevchenko", Gender::Male, 172.0),
    ("Maksym Bondar", Gender::Male, 190.0),
    ("Serhii Kovalenko", Gender::Male, 175.0),
    ("Yurii Melnyk", Gender::Male, 185.0),
    ("Anna Ivanova", Gender::Female, 165.0),
    ("Olha Sydorenko", Gender::Female, 160.0),
    ("Iryna Tkachenko", Gender::Female, 170.0),
    ("Kateryna Hrytsenko", Gender::Female, 167.0),
    ("Tetiana Marchenko", Gender::Female, 162.0),
];

/// Build the default collection.
#[must_use]
pub fn default_records() -> Vec<Record> {
    DEFAULT_PEOPLE
        .iter()
        .map(|&(name, gender, height)| Record::new(name, gender, height))
        .collect()
}
