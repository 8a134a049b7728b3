//! haulage — smallest example for the rust_convoy physics engine.
//!
//! Rates the vehicles of a small embedded catalog, assembles a freight
//! train, prints its advisory numbers, and drives it over a 10 km block
//! to a scheduled stop, writing the speed trace to CSV.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use convoy_catalog::VehicleCatalog;
use convoy_core::{
    KG_UNLIMITED, Real, WayType, YARDS_PER_STEP_SHIFT, kmh_to_speed, speed_to_kmh, speed_to_v,
};
use convoy_physics::{Convoy, MoveResult, WeightSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const TICK_MS: i32 = 1_000; // 1 tick = 1 simulated second
const ROUTE_M: i64 = 10_000;
const MAX_TICKS: usize = 1_000;
const WAGON_COUNT: usize = 8;

const YARDS_PER_M: f64 = 2_359_296.0 / 800.0;

// ── Vehicle catalog ───────────────────────────────────────────────────────────

const CATALOG_CSV: &str = "\
name,way,length_units,weight_kg,max_speed_kmh,power_kw,tractive_force_kn,gear,brake_force_kn,capacity,min_unit_weight_kg,max_unit_weight_kg\n\
e_loco,rail,8,84000,140,2000,200,64,60,0,0,0\n\
boxcar,rail,8,24000,120,0,0,64,,40,500,1500\n\
flatcar,rail,8,20000,100,0,0,64,,30,1000,2000\n\
truck,road,4,12000,90,300,20,64,15,16,500,1000\n\
";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== haulage — rust_convoy physics ===");
    println!();

    // 1. Load the catalog.
    let catalog = VehicleCatalog::from_reader(CATALOG_CSV.as_bytes())?;
    println!("Catalog: {} vehicles", catalog.len());
    println!();

    // 2. Rate each vehicle as a convoy of its own.
    println!(
        "{:<10} {:<6} {:>10} {:>12} {:>14}",
        "Vehicle", "Way", "Empty km/h", "Loaded km/h", "Max tow t"
    );
    println!("{}", "-".repeat(56));
    for desc in catalog.iter() {
        let mut solo = Convoy::of_vehicle(desc);
        let tow = match solo.calc_max_weight(0) {
            KG_UNLIMITED => "unlimited".to_string(),
            kg => format!("{}", kg / 1000),
        };
        println!(
            "{:<10} {:<6} {:>10} {:>12} {:>14}",
            desc.name,
            desc.way.as_str(),
            solo.max_speed_empty(),
            solo.max_speed_loaded(),
            tow,
        );
    }
    println!();

    // 3. Assemble the freight train.
    let loco = catalog.require("e_loco")?;
    let boxcar = catalog.require("boxcar")?;
    let mut train = Convoy::on_way(WayType::Rail);
    train.push_vehicle(loco);
    for _ in 0..WAGON_COUNT {
        train.push_vehicle(boxcar);
    }

    let unladen_kg = train.vehicle_summary().weight_kg;
    let freight_kg = train.freight_summary().max_freight_kg;
    let loaded = WeightSummary::from_weight(unladen_kg + freight_kg, 0);
    println!(
        "Train: e_loco + {WAGON_COUNT} boxcars, {} t unladen, {} t fully loaded, {} tiles",
        unladen_kg / 1000,
        loaded.weight_kg / 1000,
        train.vehicle_summary().tiles,
    );

    // 4. Advisory numbers at full load.
    let top_kmh = train.calc_max_speed(&loaded);
    let top_speed = kmh_to_speed(top_kmh);
    let brake_m = train.calc_min_braking_distance_m(&loaded, speed_to_v(top_speed));
    println!("  top speed          : {top_kmh} km/h");
    println!("  max tow (flat)     : {} t", train.calc_max_weight(0) / 1000);
    println!("  max tow (25 mille) : {} t", train.calc_max_weight(25) / 1000);
    println!(
        "  starting limit     : {} t",
        train.calc_max_starting_weight(0) / 1000
    );
    println!("  braking from top   : {brake_m} m");
    println!();

    // 5. Drive the block: accelerate to top speed, stop at the far end.
    std::fs::create_dir_all("output/haulage")?;
    let mut trace = csv::Writer::from_path(Path::new("output/haulage/speed_trace.csv"))?;
    trace.write_record(["time_s", "speed_kmh", "position_m"])?;

    let route_yards = (ROUTE_M as f64 * YARDS_PER_M) as i32;
    let mut state = MoveResult { speed: 0, remaining_yards: route_yards };
    let mut ticks = 0usize;

    let t0 = Instant::now();
    while state.remaining_yards > 0 && ticks < MAX_TICKS {
        let steps_to_brake =
            train.calc_min_braking_distance_steps(Real::ONE, &loaded, state.speed);
        let steps_to_stop = state.remaining_yards >> YARDS_PER_STEP_SHIFT;
        state = train.calc_move(
            TICK_MS,
            Real::ONE,
            &loaded,
            top_speed,
            0, // full stop at the end of the block
            steps_to_stop,
            steps_to_brake,
            state.speed,
            state.remaining_yards,
        );
        ticks += 1;

        let position_m = (route_yards - state.remaining_yards) as f64 / YARDS_PER_M;
        trace.write_record([
            format!("{ticks}"),
            format!("{}", speed_to_kmh(state.speed)),
            format!("{position_m:.1}"),
        ])?;
    }
    trace.flush()?;
    let elapsed = t0.elapsed();

    // 6. Summary.
    println!("Block run: {ROUTE_M} m in {ticks} simulated s");
    println!("  final speed : {} km/h", speed_to_kmh(state.speed));
    println!("  trace rows  : {ticks} (output/haulage/speed_trace.csv)");
    println!("  wall time   : {:.3} s", elapsed.as_secs_f64());

    Ok(())
}
