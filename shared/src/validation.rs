//! Validation utilities for Seed Production Management
//!
//! Includes the Moroccan administrative divisions used by seed needs.

use chrono::NaiveDate;
use rust_decimal::Decimal;

// ============================================================================
// Seed Quality Validations
// ============================================================================

/// Validate a percentage measurement (germination rate, purity)
pub fn validate_percentage(value: Decimal) -> Result<(), &'static str> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate moisture content is in acceptable range
pub fn validate_moisture_content(moisture: Decimal) -> Result<(), &'static str> {
    if moisture < Decimal::ZERO || moisture > Decimal::ONE_HUNDRED {
        return Err("Moisture content must be between 0 and 100%");
    }
    Ok(())
}

/// Check if moisture content is safe for storing orthodox seed (4-10%)
pub fn is_storable_moisture(moisture: Decimal) -> bool {
    moisture >= Decimal::from(4) && moisture <= Decimal::from(10)
}

/// Validate a thousand-seed weight in grams
pub fn validate_thousand_seed_weight(grams: Decimal) -> Result<(), &'static str> {
    if grams <= Decimal::ZERO {
        return Err("Thousand-seed weight must be greater than zero");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Largest seed mass a single record may hold (1000 t)
pub const MAX_QUANTITY_KG: i64 = 1_000_000;

/// Largest seeding coefficient, in kg per 1000 plants
pub const MAX_SEEDING_COEFFICIENT: i64 = 1_000;

/// Largest number of plants a single seed need may request
pub const MAX_NUMBER_OF_PLANTS: u64 = 100_000_000;

/// Validate a seed mass that must be strictly positive
pub fn validate_positive_quantity(kg: Decimal) -> Result<(), &'static str> {
    if kg <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    if kg > Decimal::from(MAX_QUANTITY_KG) {
        return Err("Quantity cannot exceed 1 000 000 kg");
    }
    Ok(())
}

/// Validate a seed mass that may be zero
pub fn validate_quantity(kg: Decimal) -> Result<(), &'static str> {
    if kg < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    if kg > Decimal::from(MAX_QUANTITY_KG) {
        return Err("Quantity cannot exceed 1 000 000 kg");
    }
    Ok(())
}

/// Validate a species seeding coefficient (kg per 1000 plants)
pub fn validate_seeding_coefficient(kg_per_1000: Decimal) -> Result<(), &'static str> {
    if kg_per_1000 < Decimal::ZERO {
        return Err("Seeding coefficient cannot be negative");
    }
    if kg_per_1000 > Decimal::from(MAX_SEEDING_COEFFICIENT) {
        return Err("Seeding coefficient cannot exceed 1000 kg per 1000 plants");
    }
    Ok(())
}

pub fn validate_number_of_plants(plants: u64) -> Result<(), &'static str> {
    if plants > MAX_NUMBER_OF_PLANTS {
        return Err("Number of plants cannot exceed 100 000 000");
    }
    Ok(())
}

/// Validate a forest region code (1-6 uppercase alphanumeric, e.g. "I3", "VIII")
pub fn validate_region_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() {
        return Err("Region code is required");
    }
    if code.len() > 6 {
        return Err("Region code must be at most 6 characters");
    }
    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err("Region code must be uppercase alphanumeric only");
    }
    Ok(())
}

/// Validate that `end` does not come before `start`
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if end < start {
        return Err("End date cannot be before start date");
    }
    Ok(())
}

/// Validate a harvest year
pub fn validate_harvest_year(year: i32) -> Result<(), &'static str> {
    if !(1900..=2999).contains(&year) {
        return Err("Harvest year must be a four-digit year");
    }
    Ok(())
}

// ============================================================================
// Morocco-Specific Validations
// ============================================================================

/// Validate Moroccan phone number format
/// Accepts: 0537000001, 05 37 00 00 01, +212537000001
pub fn validate_moroccan_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // National format: 10 digits starting with 05, 06, 07 or 08
    if digits.len() == 10 && digits.starts_with('0') && matches!(&digits[1..2], "5" | "6" | "7" | "8") {
        return Ok(());
    }
    // International format with country code: 12 digits starting with 212
    if digits.len() == 12 && digits.starts_with("212") {
        return Ok(());
    }

    Err("Invalid Moroccan phone number format")
}

/// Regional forestry directorates (DRANEF) and their provinces
pub const DRANEF_PROVINCES: &[(&str, &[&str])] = &[
    (
        "ORIENTAL",
        &["Oujda", "Taourirt", "Figuig", "Jerada", "Driouch", "Nador", "Berkane", "Guercif"],
    ),
    (
        "TANGER TETOAUEN EL HOUCELIMA",
        &[
            "Tanger-Assilah",
            "Tétouan",
            "Al Hoceima",
            "Chefchaouen",
            "Larache",
            "M'diq-Fnideq",
            "Ouezzane",
            "Fahs-Anjra",
        ],
    ),
    (
        "MERRAKECH SAFI",
        &[
            "Marrakech",
            "Safi",
            "Essaouira",
            "Chichaoua",
            "Al Haouz",
            "Kelaat Sraghna",
            "Rehamna",
            "Youssoufia",
        ],
    ),
    (
        "RABAT SALE KENITRA",
        &[
            "Rabat",
            "Salé",
            "Kénitra",
            "Skhirat-Témara",
            "Khemisset",
            "Sidi Kacem",
            "Sidi Slimane",
        ],
    ),
    (
        "FES MEKNES",
        &[
            "Fès",
            "Meknès",
            "Ifrane",
            "El Hajeb",
            "Sefrou",
            "Moulay Yacoub",
            "Boulemane",
            "Taza",
            "Taounate",
        ],
    ),
    (
        "SOUS MASSA",
        &[
            "Agadir-Ida Ou Tanane",
            "Inezgane-Aït Melloul",
            "Chtouka-Aït Baha",
            "Taroudant",
            "Tiznit",
            "Tata",
        ],
    ),
    (
        "GUELMIM OUED NOUN",
        &["Guelmim", "Assa-Zag", "Sidi Ifni", "Tan-Tan"],
    ),
    (
        "LAAYOUNE SAKIA LHAMRA",
        &["Laâyoune", "Boujdour", "Tarfaya", "Es-Semara"],
    ),
    ("DAKHELA OUED DAHAB", &["Oued Ed-Dahab", "Aousserd"]),
    (
        "BENI MELAL KHENIFRA",
        &["Beni Mellal", "Khénifra", "Khouribga", "Azilal", "Fquih Ben Salah"],
    ),
];

/// Provinces of a DRANEF, if it is known
pub fn provinces_of(dranef: &str) -> Option<&'static [&'static str]> {
    DRANEF_PROVINCES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(dranef.trim()))
        .map(|(_, provinces)| *provinces)
}

/// Validate DRANEF is known
pub fn validate_dranef(dranef: &str) -> Result<(), &'static str> {
    provinces_of(dranef)
        .map(|_| ())
        .ok_or("DRANEF is not a recognized regional directorate")
}

/// Validate province belongs to the given DRANEF
pub fn validate_dranef_province(dranef: &str, province: &str) -> Result<(), &'static str> {
    let provinces =
        provinces_of(dranef).ok_or("DRANEF is not a recognized regional directorate")?;
    let province_lower = province.trim().to_lowercase();
    if provinces.iter().any(|p| p.to_lowercase() == province_lower) {
        Ok(())
    } else {
        Err("Province does not belong to the selected DRANEF")
    }
}
