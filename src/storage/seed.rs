// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Reference campground data
//!
//! Pitches are laid out in rows ("allées") O through A; rows closer to the
//! beach are priced higher. Cottages are grouped in five named villages.

use tracing::info;

use super::database::Database;
use super::error::StorageResult;
use super::{bookings, stays, supplements};
use crate::booking::types::{Stay, Supplement};

/// (row, pitch count, category)
const PITCH_ROWS: &[(&str, u32, &str)] = &[
    ("O", 16, "Standard"),
    ("N", 16, "Standard"),
    ("M", 18, "Confort"),
    ("L", 18, "Confort"),
    ("K", 20, "Grand Confort"),
    ("J", 20, "Grand Confort"),
    ("I", 20, "Premium"),
    ("H", 22, "Premium"),
    ("G", 22, "Premium"),
    ("F", 22, "Standard"),
    ("E", 24, "Standard"),
    ("D", 24, "Standard"),
    ("C", 24, "Plage"),
    ("B", 24, "Plage"),
    ("A", 24, "Plage"),
];

/// (village id, name, cottage count)
const VILLAGES: &[(&str, &str, u32)] = &[
    ("V1", "Hestia", 8),
    ("V2", "Horus", 8),
    ("V3", "Osiris", 8),
    ("V4", "Zeus", 6),
    ("V5", "Neptune", 6),
];

const COTTAGE_PRICE: f64 = 120.0;

/// Nightly price of a pitch category
pub fn pitch_price(category: &str) -> f64 {
    match category {
        "Confort" => 55.0,
        "Grand Confort" => 65.0,
        "Premium" => 75.0,
        "Plage" => 85.0,
        _ => 45.0,
    }
}

pub fn reference_supplements() -> Vec<Supplement> {
    vec![
        Supplement {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Draps (paire)".to_string(),
            price: 12.0,
            supplement_type: "Sheet".to_string(),
        },
        Supplement {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Ménage fin de séjour".to_string(),
            price: 60.0,
            supplement_type: "Cleaning".to_string(),
        },
    ]
}

pub fn reference_stays() -> Vec<Stay> {
    let mut stays = Vec::new();

    for (row, count, category) in PITCH_ROWS {
        let label = format!("Allée {}", row);
        for i in 1..=*count {
            stays.push(Stay {
                id: uuid::Uuid::new_v4().to_string(),
                name: format!("{} - Emplacement {}", label, i),
                stay_type: category.to_string(),
                capacity: 6,
                surface: 90,
                rooms: 0,
                bathrooms: 0,
                description: format!("Emplacement {} avec électricité 10A, Eau, Wifi.", category),
                base_price: pitch_price(category),
                images: vec!["/images/emplacement.jpg".to_string()],
                zone_id: Some(row.to_string()),
                number: Some(i),
            });
        }
    }

    for (id, name, count) in VILLAGES {
        let label = format!("Village {}", name);
        for i in 1..=*count {
            stays.push(Stay {
                id: uuid::Uuid::new_v4().to_string(),
                name: format!("{} - Cottage {}", label, i),
                stay_type: "Cottage".to_string(),
                capacity: 4,
                surface: 35,
                rooms: 2,
                bathrooms: 1,
                description: "Cottage tout équipé avec climatisation, TV, terrasse et Wifi Premium."
                    .to_string(),
                base_price: COTTAGE_PRICE,
                images: vec!["/images/mobilhome-confort.jpg".to_string()],
                zone_id: Some(id.to_string()),
                number: Some(i),
            });
        }
    }

    stays
}

/// Counts of rows written by [`seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub supplements: usize,
    pub stays: usize,
}

/// Wipe bookings and replace the catalogue with the reference campground
pub fn seed(db: &Database) -> StorageResult<SeedSummary> {
    let supplement_rows = reference_supplements();
    let stay_rows = reference_stays();

    db.with_tx(|tx| -> StorageResult<()> {
        let removed = bookings::delete_all(tx)?;
        supplements::delete_all(tx)?;
        stays::delete_all(tx)?;
        if removed > 0 {
            info!("Seeding removed {} existing bookings", removed);
        }

        for supplement in &supplement_rows {
            supplements::insert(tx, supplement)?;
        }
        for stay in &stay_rows {
            stays::insert(tx, stay)?;
        }
        Ok(())
    })?;

    info!(
        "Seeded {} supplements and {} stays",
        supplement_rows.len(),
        stay_rows.len()
    );
    Ok(SeedSummary {
        supplements: supplement_rows.len(),
        stays: stay_rows.len(),
    })
}

/// Seed only when the catalogue is empty
pub fn seed_if_empty(db: &Database) -> StorageResult<Option<SeedSummary>> {
    if db.with_conn(stays::count)? > 0 {
        return Ok(None);
    }
    seed(db).map(Some)
}
