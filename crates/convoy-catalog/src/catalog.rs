//! The `VehicleCatalog` — an indexed, read-only descriptor collection.
//!
//! The original game reads descriptors from binary pak data; here the
//! host supplies them programmatically via [`VehicleCatalog::push`] or as a
//! CSV file (the test/demo-friendly equivalent).  Rows are handled manually
//! record-by-record so a malformed line reports its line number and field.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rustc_hash::FxHashMap;

use crate::{CatalogError, CatalogResult, VehicleDesc};

/// Required CSV header columns, in no particular order.
const COLUMNS: [&str; 12] = [
    "name",
    "way",
    "length_units",
    "weight_kg",
    "max_speed_kmh",
    "power_kw",
    "tractive_force_kn",
    "gear",
    "brake_force_kn",
    "capacity",
    "min_unit_weight_kg",
    "max_unit_weight_kg",
];

/// Ordered descriptor list plus a name index.
///
/// Descriptors are immutable once pushed; the physics layer borrows them
/// for the lifetime of a convoy composition.
#[derive(Default)]
pub struct VehicleCatalog {
    descs: Vec<VehicleDesc>,
    by_name: FxHashMap<String, usize>,
}

impl VehicleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor.  Names are unique catalog-wide.
    pub fn push(&mut self, desc: VehicleDesc) -> CatalogResult<()> {
        if self.by_name.contains_key(&desc.name) {
            return Err(CatalogError::DuplicateVehicle(desc.name.clone()));
        }
        self.by_name.insert(desc.name.clone(), self.descs.len());
        self.descs.push(desc);
        Ok(())
    }

    /// Look up a descriptor by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&VehicleDesc> {
        self.by_name.get(name).map(|&i| &self.descs[i])
    }

    /// Like [`get`](Self::get) but an unknown name is an error.
    pub fn require(&self, name: &str) -> CatalogResult<&VehicleDesc> {
        self.get(name)
            .ok_or_else(|| CatalogError::UnknownVehicle(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.descs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descs.is_empty()
    }

    /// Descriptors in insertion (catalog) order.
    pub fn iter(&self) -> impl Iterator<Item = &VehicleDesc> {
        self.descs.iter()
    }

    // ── CSV loading ──────────────────────────────────────────────────────

    /// Parse a catalog from CSV bytes (any `Read` source).
    pub fn from_reader<R: Read>(reader: R) -> CatalogResult<Self> {
        let mut rdr = csv::Reader::from_reader(reader);

        // Resolve column positions once from the header row.
        let headers = rdr.headers()?.clone();
        let col = |name: &'static str| -> CatalogResult<usize> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(CatalogError::MissingColumn(name))
        };
        let mut cols = [0usize; COLUMNS.len()];
        for (i, name) in COLUMNS.iter().enumerate() {
            cols[i] = col(name)?;
        }
        let [c_name, c_way, c_len, c_weight, c_speed, c_power, c_force, c_gear, c_brake, c_cap, c_min, c_max] =
            cols;

        let mut catalog = VehicleCatalog::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let desc = VehicleDesc {
                name: field(&record, c_name).to_string(),
                way: parse_way(&record, c_way, line)?,
                length_units: parse_num(&record, c_len, line, "length_units")?,
                weight_kg: parse_num(&record, c_weight, line, "weight_kg")?,
                max_speed_kmh: parse_num(&record, c_speed, line, "max_speed_kmh")?,
                power_kw: parse_num(&record, c_power, line, "power_kw")?,
                tractive_force_kn: parse_num(&record, c_force, line, "tractive_force_kn")?,
                gear: parse_num(&record, c_gear, line, "gear")?,
                brake_force_kn: parse_opt(&record, c_brake, line, "brake_force_kn")?,
                capacity: parse_num(&record, c_cap, line, "capacity")?,
                min_unit_weight_kg: parse_num(&record, c_min, line, "min_unit_weight_kg")?,
                max_unit_weight_kg: parse_num(&record, c_max, line, "max_unit_weight_kg")?,
            };
            catalog.push(desc)?;
        }
        Ok(catalog)
    }

    /// Load a catalog CSV from disk.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        Self::from_reader(File::open(path)?)
    }
}

// ── Field parsing helpers ─────────────────────────────────────────────────────

fn field<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("").trim()
}

fn parse_num<T: std::str::FromStr>(
    record: &StringRecord,
    idx: usize,
    line: u64,
    name: &'static str,
) -> CatalogResult<T> {
    let raw = field(record, idx);
    raw.parse().map_err(|_| CatalogError::Parse {
        line,
        field: name,
        value: raw.to_string(),
    })
}

/// Empty cell means "no data" (used for the brake-force column).
fn parse_opt<T: std::str::FromStr>(
    record: &StringRecord,
    idx: usize,
    line: u64,
    name: &'static str,
) -> CatalogResult<Option<T>> {
    let raw = field(record, idx);
    if raw.is_empty() {
        return Ok(None);
    }
    parse_num(record, idx, line, name).map(Some)
}

fn parse_way(record: &StringRecord, idx: usize, line: u64) -> CatalogResult<convoy_core::WayType> {
    let raw = field(record, idx);
    raw.parse().map_err(|_| CatalogError::Parse {
        line,
        field: "way",
        value: raw.to_string(),
    })
}
