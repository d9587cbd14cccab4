//! Static move and species data, loaded once at startup from RON files.
//!
//! The catalog backs demo battles and opponent generation; battles created
//! from roster snapshots never touch it.

use crate::combatant::{Combatant, MoveData};
use crate::errors::CombatantDataError;
use schema::{MoveCategory, PokemonType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{LazyLock, RwLock};

// Global catalog storage - loaded once at startup
static MOVE_CATALOG: LazyLock<RwLock<HashMap<String, CatalogMove>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));
static SPECIES_CATALOG: LazyLock<RwLock<HashMap<String, SpeciesData>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMove {
    pub name: String,
    pub move_type: PokemonType,
    pub power: Option<u16>,
    pub category: Option<MoveCategory>,
    /// Percent in 1..=100; None for sure-hit moves.
    pub accuracy: Option<u8>,
    pub max_pp: u8,
}

impl CatalogMove {
    pub fn to_move_data(&self) -> MoveData {
        MoveData {
            name: self.name.clone(),
            power: self.power,
            accuracy: self
                .accuracy
                .map(|percent| f64::from(percent) / 100.0)
                .unwrap_or(1.0),
            move_type: self.move_type,
            category: self.category,
            max_pp: self.max_pp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub special_attack: u8,
    pub special_defense: u8,
    pub speed: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub pokedex_number: u32,
    pub name: String,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    /// Default moveset for catalog-built combatants, by move name.
    pub moveset: Vec<String>,
}

/// Initialize the global catalog by loading RON files from disk.
/// Expects `moves/` and `species/` subdirectories under `data_path`.
pub fn initialize_catalog(data_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let moves = load_dir::<CatalogMove>(&data_path.join("moves"))?
        .into_iter()
        .map(|(_, m)| (m.name.to_lowercase(), m))
        .collect();
    let species = load_dir::<SpeciesData>(&data_path.join("species"))?
        .into_iter()
        .map(|(_, s)| (s.name.to_lowercase(), s))
        .collect();

    *MOVE_CATALOG.write().unwrap() = moves;
    *SPECIES_CATALOG.write().unwrap() = species;
    Ok(())
}

fn load_dir<T: serde::de::DeserializeOwned>(
    dir: &Path,
) -> Result<Vec<(String, T)>, Box<dyn std::error::Error>> {
    if !dir.exists() {
        return Err(format!("Catalog data directory not found: {}", dir.display()).into());
    }

    let mut items = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                let content = fs::read_to_string(&path)?;
                let item: T = ron::from_str(&content)?;
                items.push((stem.to_string(), item));
            }
        }
    }
    Ok(items)
}

/// Get move data by name from the global catalog.
pub fn get_move_data(name: &str) -> Option<CatalogMove> {
    MOVE_CATALOG.read().unwrap().get(&name.to_lowercase()).cloned()
}

/// Get species data by name from the global catalog.
pub fn get_species_data(name: &str) -> Option<SpeciesData> {
    SPECIES_CATALOG
        .read()
        .unwrap()
        .get(&name.to_lowercase())
        .cloned()
}

pub fn species_names() -> Vec<String> {
    let mut names: Vec<String> = SPECIES_CATALOG
        .read()
        .unwrap()
        .values()
        .map(|s| s.name.clone())
        .collect();
    names.sort();
    names
}

/// Build a battle-ready combatant of the given species at the given level,
/// with stats scaled from its base stats.
pub fn build_combatant(species_name: &str, level: u8) -> Result<Combatant, CombatantDataError> {
    let species = get_species_data(species_name).ok_or_else(|| {
        CombatantDataError::MissingStat {
            combatant: species_name.to_string(),
            stat: "base_stats",
        }
    })?;

    let hp = scale_hp(species.base_stats.hp, level);
    let moves = species
        .moveset
        .iter()
        .filter_map(|name| get_move_data(name))
        .map(|m| m.to_move_data())
        .collect();

    Combatant::new(
        species.pokedex_number,
        species.name.clone(),
        level,
        hp,
        hp,
        scale_stat(species.base_stats.attack, level),
        scale_stat(species.base_stats.defense, level),
        scale_stat(species.base_stats.special_attack, level),
        scale_stat(species.base_stats.special_defense, level),
        scale_stat(species.base_stats.speed, level),
        species.types,
        moves,
    )
}

fn scale_hp(base: u8, level: u8) -> u16 {
    (2 * u16::from(base) * u16::from(level)) / 100 + u16::from(level) + 10
}

fn scale_stat(base: u8, level: u8) -> u16 {
    (2 * u16::from(base) * u16::from(level)) / 100 + 5
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    // The catalog is process-global; tests that load it serialize through
    // this lock so parallel test threads do not clobber each other.
    fn catalog_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[test]
    fn loads_shipped_data_files() {
        let _guard = catalog_lock().lock().unwrap();
        initialize_catalog(&data_dir()).unwrap();

        let tackle = get_move_data("Tackle").unwrap();
        assert_eq!(tackle.power, Some(40));
        assert_eq!(tackle.move_type, PokemonType::Normal);

        let charmander = get_species_data("charmander").unwrap();
        assert_eq!(charmander.pokedex_number, 4);
        assert_eq!(charmander.types, vec![PokemonType::Fire]);
    }

    #[test]
    fn builds_combatants_with_level_scaled_stats() {
        let _guard = catalog_lock().lock().unwrap();
        initialize_catalog(&data_dir()).unwrap();

        let low = build_combatant("pikachu", 5).unwrap();
        let high = build_combatant("pikachu", 50).unwrap();

        assert!(low.move_count() > 0);
        assert!(high.max_hp > low.max_hp);
        assert!(high.attack > low.attack);
        assert!(!low.is_fainted());
    }

    #[test]
    fn unknown_species_is_an_error() {
        let _guard = catalog_lock().lock().unwrap();
        initialize_catalog(&data_dir()).unwrap();
        assert!(build_combatant("missingno", 5).is_err());
    }
}
