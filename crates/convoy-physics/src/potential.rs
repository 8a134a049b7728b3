//! Hypothetical convoys assembled from catalog descriptors.
//!
//! A [`PotentialConvoy`] does not exist in any world: it borrows descriptor
//! data, sits on flat ground, and answers planning questions ("how fast
//! would this consist go fully loaded?") for depot and purchase UIs.

use convoy_catalog::VehicleDesc;
use convoy_core::WayType;

use crate::convoy::Convoy;
use crate::model::ConvoyModel;
use crate::summary::{AdverseSummary, FreightSummary, VehicleSummary, WeightSummary};

/// A planned vehicle list on a given way class, borrowed from a catalog.
pub struct PotentialConvoy<'a> {
    vehicles: Vec<&'a VehicleDesc>,
    way: WayType,
}

impl<'a> PotentialConvoy<'a> {
    pub fn new(way: WayType) -> Self {
        Self { vehicles: Vec::new(), way }
    }

    /// A single vehicle treated as a one-car convoy, as the purchase UI
    /// rates vehicles before they join anything.
    pub fn single(desc: &'a VehicleDesc) -> Self {
        Self { vehicles: vec![desc], way: desc.way }
    }

    pub fn way(&self) -> WayType {
        self.way
    }

    pub fn vehicles(&self) -> &[&'a VehicleDesc] {
        &self.vehicles
    }
}

impl ConvoyModel for PotentialConvoy<'_> {
    fn update_vehicle_summary(&self, out: &mut VehicleSummary) {
        *out = VehicleSummary::new();
        for desc in &self.vehicles {
            out.add(desc);
        }
        if let Some(tail) = self.vehicles.last() {
            out.finalize(tail.length_units);
        }
    }

    fn update_adverse_summary(&self, out: &mut AdverseSummary) {
        *out = AdverseSummary::for_way(self.way);
    }

    fn update_freight_summary(&self, out: &mut FreightSummary) {
        *out = FreightSummary::new();
        for desc in &self.vehicles {
            out.add(desc);
        }
    }

    // Hypothetical convoys sit on flat ground.
    fn current_friction(&self) -> i16 {
        0
    }

    fn force_kn(&self, v_ms: i32) -> i64 {
        self.vehicles.iter().map(|d| d.force_kn(v_ms)).sum()
    }

    fn power_kw(&self, v_ms: i32) -> i64 {
        self.vehicles.iter().map(|d| d.power_kw(v_ms)).sum()
    }

    fn brake_kn(&self, _v_ms: i32) -> i64 {
        let br = self.way.brake_factor();
        self.vehicles.iter().map(|d| d.brake_kn(br)).sum()
    }
}

// ── Composition and planning queries ──────────────────────────────────────────

impl<'a> Convoy<PotentialConvoy<'a>> {
    /// Empty consist on a way class.
    pub fn on_way(way: WayType) -> Self {
        Convoy::new(PotentialConvoy::new(way))
    }

    /// Rate a single vehicle as a convoy of its own.
    pub fn of_vehicle(desc: &'a VehicleDesc) -> Self {
        Convoy::new(PotentialConvoy::single(desc))
    }

    /// Append a vehicle to the plan.
    pub fn push_vehicle(&mut self, desc: &'a VehicleDesc) {
        self.model.vehicles.push(desc);
        self.invalidate_vehicle_summary();
        self.invalidate_freight_summary();
    }

    /// Remove the last vehicle from the plan.
    pub fn pop_vehicle(&mut self) -> Option<&'a VehicleDesc> {
        let desc = self.model.vehicles.pop()?;
        self.invalidate_vehicle_summary();
        self.invalidate_freight_summary();
        Some(desc)
    }

    /// Drop the whole vehicle list.
    pub fn clear_vehicles(&mut self) {
        self.model.vehicles.clear();
        self.invalidate_vehicle_summary();
        self.invalidate_freight_summary();
    }

    /// Re-plan the same consist for a different way class.
    pub fn set_way(&mut self, way: WayType) {
        self.model.way = way;
        self.invalidate_adverse_summary();
    }

    /// Weight decomposition at a chosen freight load on flat ground.
    pub fn weight_with_freight(&mut self, freight_kg: i64) -> WeightSummary {
        let unladen = self.vehicle_summary().weight_kg;
        WeightSummary::from_weight(unladen + freight_kg, 0)
    }

    /// Top speed with no freight aboard, km/h.
    pub fn max_speed_empty(&mut self) -> i32 {
        let weight = self.weight_with_freight(0);
        self.calc_max_speed(&weight)
    }

    /// Top speed at the heaviest possible load, km/h.
    pub fn max_speed_loaded(&mut self) -> i32 {
        let freight = self.freight_summary().max_freight_kg;
        let weight = self.weight_with_freight(freight);
        self.calc_max_speed(&weight)
    }
}
