//! Names and addresses for synthetic people.
//!
//! The generator only needs three things from a corpus, captured by
//! [`PersonFaker`]. [`CorpusFaker`] is a small built-in en-GB flavoured word list.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

lazy_static::lazy_static! {
    static ref WHITESPACES: Regex = Regex::new(r"\s+").expect("static regex");
}

/// Source of random names and addresses. The RNG is always passed in so callers
/// control seeding.
pub trait PersonFaker {
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String;
    fn last_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String;
    /// May span several lines; callers normalize whitespace.
    fn address<R: Rng + ?Sized>(&self, rng: &mut R) -> String;
}

/// Collapse every run of whitespace (including newlines) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACES.replace_all(text.trim(), " ").into_owned()
}

const FIRST_NAMES: &[&str] = &[
    "Abigail", "Adam", "Aidan", "Alice", "Amelia", "Amy", "Andrew", "Ava", "Ben", "Bethany",
    "Callum", "Charlie", "Charlotte", "Chloe", "Connor", "Daniel", "Eleanor", "Ella", "Emily",
    "Ethan", "Evie", "Finley", "Freya", "George", "Grace", "Hannah", "Harry", "Isabella", "Isla",
    "Jack", "Jacob", "James", "Jessica", "Joshua", "Katie", "Leah", "Liam", "Lily", "Lucy",
    "Megan", "Mia", "Noah", "Oliver", "Olivia", "Oscar", "Poppy", "Rebecca", "Rhys", "Samuel",
    "Sophie", "Thomas", "William",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Bailey", "Baker", "Bell", "Brown", "Clarke", "Cooper", "Davies", "Edwards",
    "Evans", "Green", "Hall", "Harris", "Hill", "Hughes", "Jackson", "James", "Johnson", "Jones",
    "King", "Lewis", "Martin", "Moore", "Morgan", "Morris", "Patel", "Phillips", "Roberts",
    "Robinson", "Scott", "Smith", "Taylor", "Thomas", "Thompson", "Turner", "Walker", "Ward",
    "Watson", "White", "Williams", "Wilson", "Wood", "Wright", "Young",
];

const STREET_NAMES: &[&str] = &[
    "Abbey", "Albert", "Ash", "Beech", "Bridge", "Castle", "Chapel", "Church", "Elm", "Green",
    "High", "Highfield", "Kings", "Manor", "Mill", "New", "North", "Oak", "Park", "Queens",
    "School", "Station", "Victoria", "West", "Windsor",
];

const STREET_SUFFIXES: &[&str] = &[
    "Avenue", "Close", "Court", "Crescent", "Drive", "Gardens", "Lane", "Road", "Street", "Way",
];

const TOWNS: &[&str] = &[
    "Bath", "Bristol", "Cambridge", "Cardiff", "Chester", "Derby", "Durham", "Exeter", "Leeds",
    "Leicester", "Lincoln", "Norwich", "Nottingham", "Oxford", "Plymouth", "Reading", "Sheffield",
    "York",
];

const POSTCODE_AREAS: &[&str] = &[
    "BA", "BS", "CB", "CF", "CH", "DE", "DH", "EX", "LS", "LE", "LN", "NR", "NG", "OX", "PL",
    "RG", "S", "YO",
];

const POSTCODE_UNIT_LETTERS: &[u8] = b"ABDEFGHJLNPQRSTUWXYZ";

fn pick<R: Rng + ?Sized>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// Built-in name and address corpus.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorpusFaker;

impl CorpusFaker {
    fn postcode<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let unit: String = (0..2)
            .map(|_| {
                let i = rng.gen_range(0..POSTCODE_UNIT_LETTERS.len());
                POSTCODE_UNIT_LETTERS[i] as char
            })
            .collect();
        format!(
            "{}{} {}{}",
            pick(rng, POSTCODE_AREAS),
            rng.gen_range(1..=20),
            rng.gen_range(0..=9),
            unit
        )
    }
}

impl PersonFaker for CorpusFaker {
    fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        pick(rng, FIRST_NAMES).to_string()
    }

    fn last_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        pick(rng, LAST_NAMES).to_string()
    }

    fn address<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let flat = if rng.gen_bool(0.2) {
            format!("Flat {}\n", rng.gen_range(1..=40))
        } else {
            String::new()
        };
        format!(
            "{}{} {} {}\n{}\n{}",
            flat,
            rng.gen_range(1..=250),
            pick(rng, STREET_NAMES),
            pick(rng, STREET_SUFFIXES),
            pick(rng, TOWNS),
            self.postcode(rng)
        )
    }
}
