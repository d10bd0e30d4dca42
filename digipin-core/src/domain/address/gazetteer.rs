// digipin-core/src/domain/address/gazetteer.rs

use std::sync::LazyLock;

use serde::Serialize;

use crate::domain::address::AddressParts;
use crate::domain::geo::{Coordinate, GridCoder};

/// A known reference address used as the offline matching corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GazetteerEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    pub address_parts: AddressParts,
    pub coordinate: Coordinate,
    pub grid_code: String,
}

/// Read-only catalog of reference addresses. Never mutated after it is built.
#[derive(Debug)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
}

static OFFLINE: LazyLock<Gazetteer> = LazyLock::new(Gazetteer::build_offline);

struct Seed {
    id: &'static str,
    display_name: &'static str,
    house_no: Option<&'static str>,
    street: &'static str,
    area: &'static str,
    district: &'static str,
    pincode: &'static str,
    coordinate: Coordinate,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "1",
        display_name: "Connaught Place, New Delhi",
        house_no: Some("Block A"),
        street: "Inner Circle",
        area: "Connaught Place",
        district: "New Delhi",
        pincode: "110001",
        coordinate: Coordinate::new(28.6315, 77.2167),
    },
    Seed {
        id: "2",
        display_name: "India Gate, New Delhi",
        house_no: None,
        street: "Rajpath",
        area: "India Gate",
        district: "New Delhi",
        pincode: "110001",
        coordinate: Coordinate::new(28.6129, 77.2295),
    },
    Seed {
        id: "3",
        display_name: "Gateway of India, Mumbai",
        house_no: None,
        street: "Apollo Bandar",
        area: "Colaba",
        district: "Mumbai",
        pincode: "400001",
        coordinate: Coordinate::new(18.922, 72.8347),
    },
];

impl Gazetteer {
    /// The built-in catalog, available without any network access.
    pub fn offline() -> &'static Gazetteer {
        &OFFLINE
    }

    pub fn from_entries(entries: Vec<GazetteerEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn build_offline() -> Self {
        let entries = SEEDS
            .iter()
            .map(|seed| GazetteerEntry {
                id: seed.id,
                display_name: seed.display_name,
                address_parts: AddressParts {
                    house_no: seed.house_no.map(str::to_string),
                    street: Some(seed.street.to_string()),
                    area: Some(seed.area.to_string()),
                    district: Some(seed.district.to_string()),
                    pincode: Some(seed.pincode.to_string()),
                    landmark: None,
                },
                coordinate: seed.coordinate,
                // Seeds are in range, so encoding cannot fail.
                grid_code: GridCoder::encode(seed.coordinate)
                    .map(|cell| cell.code)
                    .unwrap_or_default(),
            })
            .collect();
        Self { entries }
    }
}
