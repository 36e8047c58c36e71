use serde::{Deserialize, Serialize};
use std::fmt;

/// Field a table is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    Username,
    Phone,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Username => write!(f, "username"),
            KeyKind::Phone => write!(f, "phone"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub username: String,
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
}

impl Record {
    pub fn new(
        username: impl Into<String>,
        phone_number: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            phone_number: phone_number.into(),
            address: address.into(),
        }
    }

    pub fn key(&self, kind: KeyKind) -> &str {
        match kind {
            KeyKind::Username => &self.username,
            KeyKind::Phone => &self.phone_number,
        }
    }

    /// True when either identifying field equals `key`.
    pub fn matches(&self, key: &str) -> bool {
        self.username == key || self.phone_number == key
    }

    /// True when this record shares an identifying field with `other`.
    pub fn shares_identity(&self, other: &Record) -> bool {
        self.username == other.username || self.phone_number == other.phone_number
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {}", self.username, self.phone_number, self.address)
    }
}

pub const SAMPLE_RECORDS: [(&str, &str, &str); 30] = [
    ("alice_smith", "555-0101", "123 Maple Street, Springfield"),
    ("bob_jones", "555-0102", "456 Oak Avenue, Riverside"),
    ("charlie_brown", "555-0103", "789 Pine Road, Lakewood"),
    ("diana_prince", "555-0104", "321 Elm Drive, Hilltown"),
    ("edward_norton", "555-0105", "654 Cedar Lane, Brookfield"),
    ("fiona_apple", "555-0106", "987 Birch Court, Meadowview"),
    ("george_martin", "555-0107", "147 Willow Way, Parkside"),
    ("hannah_montana", "555-0108", "258 Aspen Place, Riverside"),
    ("ian_malcolm", "555-0109", "369 Cherry Street, Hillcrest"),
    ("julia_roberts", "555-0110", "741 Walnut Avenue, Lakeside"),
    ("kevin_hart", "555-0111", "852 Spruce Road, Greenfield"),
    ("laura_palmer", "555-0112", "963 Poplar Drive, Fairview"),
    ("michael_scott", "555-0113", "159 Sycamore Lane, Oakdale"),
    ("nancy_drew", "555-0114", "357 Hickory Court, Maplewood"),
    ("oliver_twist", "555-0115", "468 Magnolia Way, Pineville"),
    ("peter_parker", "555-0116", "579 Chestnut Place, Cedartown"),
    ("quinn_fabray", "555-0117", "681 Beech Street, Elmwood"),
    ("rachel_green", "555-0118", "792 Ash Avenue, Birchfield"),
    ("sam_wilson", "555-0119", "813 Fir Road, Willowbrook"),
    ("tina_fey", "555-0120", "924 Redwood Drive, Aspendale"),
    ("ursula_burns", "555-0121", "135 Cypress Lane, Cherryvale"),
    ("victor_hugo", "555-0122", "246 Sequoia Court, Walnutville"),
    ("wendy_williams", "555-0123", "357 Dogwood Way, Sprucetown"),
    ("xavier_woods", "555-0124", "468 Juniper Place, Poplarcity"),
    ("yvonne_strahovski", "555-0125", "579 Hemlock Street, Sycamore"),
    ("zachary_levi", "555-0126", "681 Laurel Avenue, Hickoryhill"),
    ("amy_adams", "555-0127", "792 Acacia Road, Magnoliapark"),
    ("bruce_wayne", "555-0128", "813 Cottonwood Drive, Chestnutgrove"),
    ("clark_kent", "555-0129", "924 Alder Lane, Beechwood"),
    ("david_lynch", "555-0130", "135 Boxwood Court, Ashville"),
];

pub fn sample_records() -> Vec<Record> {
    SAMPLE_RECORDS
        .iter()
        .map(|(user, phone, addr)| Record::new(*user, *phone, *addr))
        .collect()
}
