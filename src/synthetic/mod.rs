//! Synthetic household/person records for exercising the graph export.
//!
//! Each household draws a size from [`HOUSEHOLD_SIZES`], one shared address and a
//! surname pool, then one `{forename, surname, address}` row per member.

pub mod corpus;

use std::io::Write;

use lazy_static::lazy_static;
use log::debug;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

pub use corpus::{collapse_whitespace, CorpusFaker, PersonFaker};

use crate::graph_catalog::Result;
use crate::graph_export::write_rows;
use crate::utils::Row;

/// `(household size, relative weight)`; small households dominate.
pub const HOUSEHOLD_SIZES: [(usize, u32); 6] = [(1, 10), (2, 10), (3, 6), (4, 2), (5, 1), (6, 1)];

/// Every member of a household shares one surname.
pub const SURNAMES_PER_HOUSEHOLD: usize = 1;

pub const FORENAME_FIELD: &str = "forename";
pub const SURNAME_FIELD: &str = "surname";
pub const ADDRESS_FIELD: &str = "address";

lazy_static! {
    static ref HOUSEHOLD_SIZE_DIST: WeightedIndex<u32> =
        WeightedIndex::new(HOUSEHOLD_SIZES.iter().map(|(_, weight)| *weight))
            .expect("household size weights are positive");
}

/// Draw a household size in `1..=6`.
pub fn household_size<R: Rng + ?Sized>(rng: &mut R) -> usize {
    HOUSEHOLD_SIZES[HOUSEHOLD_SIZE_DIST.sample(rng)].0
}

/// People sharing one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Household {
    pub surnames: Vec<String>,
    pub address: String,
    pub members: Vec<Row>,
}

/// Generate one household.
pub fn household<R, F>(rng: &mut R, faker: &F) -> Household
where
    R: Rng + ?Sized,
    F: PersonFaker,
{
    let surnames: Vec<String> = (0..SURNAMES_PER_HOUSEHOLD)
        .map(|_| faker.last_name(rng))
        .collect();
    let address = collapse_whitespace(&faker.address(rng));
    let size = household_size(rng);

    let members = (0..size)
        .map(|_| {
            let mut person = Row::with_capacity(3);
            person.insert(FORENAME_FIELD.to_string(), faker.first_name(rng));
            person.insert(
                SURNAME_FIELD.to_string(),
                surnames.choose(rng).cloned().unwrap_or_default(),
            );
            person.insert(ADDRESS_FIELD.to_string(), address.clone());
            person
        })
        .collect();

    Household {
        surnames,
        address,
        members,
    }
}

/// Lazily generated people from a fixed number of households.
///
/// Finite and single-pass: once exhausted, build a new one to generate more.
pub struct People<R, F> {
    rng: R,
    faker: F,
    remaining_households: usize,
    current: std::vec::IntoIter<Row>,
}

impl<R: Rng, F: PersonFaker> Iterator for People<R, F> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        loop {
            if let Some(person) = self.current.next() {
                return Some(person);
            }
            if self.remaining_households == 0 {
                return None;
            }
            self.remaining_households -= 1;
            let home = household(&mut self.rng, &self.faker);
            debug!("Household of {} at {}", home.members.len(), home.address);
            self.current = home.members.into_iter();
        }
    }
}

/// People from `households` households. Yields between `households` and
/// `6 * households` rows.
///
/// Pass `&mut rng` to keep using the generator afterwards.
pub fn generate_people<R, F>(rng: R, faker: F, households: usize) -> People<R, F>
where
    R: Rng,
    F: PersonFaker,
{
    People {
        rng,
        faker,
        remaining_households: households,
        current: Vec::new().into_iter(),
    }
}

/// Write generated people as delimited text, returning the row count.
pub fn write_people<W: Write, I: IntoIterator<Item = Row>>(
    writer: W,
    people: I,
    delimiter: u8,
) -> Result<usize> {
    write_rows(writer, people, delimiter, "synthetic people")
}
