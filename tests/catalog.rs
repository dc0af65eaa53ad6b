use std::collections::BTreeMap;
use std::io::Write;

use deltav_planner::catalog::{
    self, CatalogError, load_engine_presets, load_unit_mass_table, stock_engines,
    stock_unit_masses,
};
use deltav_planner::{Engine, MassBudget, ResourceKind, Ship, ShipError};

#[test]
fn version_is_exposed_for_smoke_tests() {
    assert!(!deltav_planner::version().is_empty());
}

#[test]
fn shipped_engine_catalog_matches_the_stock_presets() {
    let loaded = load_engine_presets("data/presets/engines.yaml").expect("engines yaml");
    let stock = stock_engines();
    assert_eq!(loaded.len(), stock.len());
    for (loaded, stock) in loaded.iter().zip(&stock) {
        assert_eq!(loaded.name, stock.name);
        assert_eq!(loaded.engine, stock.engine);
    }
}

#[test]
fn shipped_resource_catalog_matches_the_stock_table() {
    let loaded = load_unit_mass_table("data/presets/resources.yaml").expect("resources yaml");
    let stock = stock_unit_masses();
    for kind in [
        ResourceKind::LiquidFuel,
        ResourceKind::Oxidizer,
        ResourceKind::Monopropellant,
        ResourceKind::XenonGas,
        ResourceKind::Ore,
    ] {
        assert_eq!(loaded.kg_per_unit(kind), stock.kg_per_unit(kind));
    }
}

#[test]
fn stock_presets_are_internally_consistent() {
    // thrust ≈ g0 × Isp × mass flow for a chemical or nuclear engine.
    for preset in stock_engines() {
        let isp = preset.engine.isp_seconds().unwrap();
        let mass_flow = preset.engine.mass_flow_tons_s().unwrap();
        let implied_thrust_kn = deltav_planner::constants::G0 * isp * mass_flow;
        assert!(
            (implied_thrust_kn - preset.engine.thrust_kn()).abs() < 0.1,
            "{}: implied {} kN",
            preset.name,
            implied_thrust_kn
        );
    }
}

#[test]
fn presets_load_from_single_toml_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ion.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        "name = \"Dawn\"\nisp_vacuum_seconds = 4200.0\nthrust_kn = 2.0\n\n[flow_rates_tons_s]\nxenon_gas = 0.0000486"
    )
    .unwrap();
    drop(file);

    let presets = load_engine_presets(&path).unwrap();
    assert_eq!(presets.len(), 1);
    assert_eq!(presets[0].name, "Dawn");
    assert_eq!(presets[0].engine.isp_seconds().unwrap(), 4200.0);
    let rates = presets[0].engine.flow_rates().unwrap();
    assert!((rates.amount(ResourceKind::XenonGas) - 0.0000486).abs() < 1e-12);
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engines.yaml");
    std::fs::write(&path, "- name: [unterminated").unwrap();
    assert!(matches!(
        load_engine_presets(&path),
        Err(CatalogError::Config(_))
    ));
}

#[test]
fn unknown_resource_names_are_rejected_during_conversion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resources.yaml");
    std::fs::write(&path, "- resource: unobtainium\n  kg_per_unit: 1.0\n").unwrap();
    assert!(matches!(
        load_unit_mass_table(&path),
        Err(CatalogError::Resource(_))
    ));
}

#[test]
fn ships_commission_from_unit_counts() {
    let table = stock_unit_masses();
    let mut counts = BTreeMap::new();
    counts.insert(ResourceKind::LiquidFuel, 400.0); // 2 t
    counts.insert(ResourceKind::Ore, 100.0); // 2 t
    let ship = Ship::from_unit_counts(&counts, &table, MassBudget::DryTons(6.0)).unwrap();
    assert!((ship.mass_tons() - 10.0).abs() < 1e-9);
    assert!((ship.resource_tons().amount(ResourceKind::LiquidFuel) - 2.0).abs() < 1e-12);
}

#[test]
fn total_mass_budgets_derive_dry_mass() {
    let tanks = [(ResourceKind::LiquidFuel, 2.0)].into_iter().collect();
    let ship = Ship::new(tanks, MassBudget::TotalTons(10.0)).unwrap();
    assert_eq!(ship.dry_mass_tons(), 8.0);
    assert_eq!(ship.mass_tons(), 10.0);
}

#[test]
fn a_total_below_the_carried_resources_is_rejected() {
    let tanks = [(ResourceKind::LiquidFuel, 2.0)].into_iter().collect();
    assert!(matches!(
        Ship::new(tanks, MassBudget::TotalTons(1.0)),
        Err(ShipError::InvalidAmount { .. })
    ));
}

#[test]
fn negative_initial_resources_are_rejected() {
    let tanks = [(ResourceKind::LiquidFuel, -2.0)].into_iter().collect();
    assert!(matches!(
        Ship::new(tanks, MassBudget::DryTons(1.0)),
        Err(ShipError::Vector(_))
    ));
}

#[test]
fn stock_catalog_lookup_finds_engines_by_name() {
    let nerv = catalog::stock_engine("Nerv").unwrap();
    assert!(matches!(nerv.engine, Engine::Simple(_)));
    assert!(catalog::stock_engine("Mainsail").is_none());
}
