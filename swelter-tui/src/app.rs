use std::sync::Arc;

use swelter_core::{
    budget::AllocationOrder,
    model::{CityAnalysis, CityMeta, MitigationPlan},
    service::SwelterService,
};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Screen {
    CitySelect,
    PlanSetup,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlanField {
    GreenCover,
    CoolRoof,
    GreenRoof,
    WaterBodies,
    CoolPavement,
    Budget,
    Order,
}

/// Plan screen rows, top to bottom.
pub(crate) const PLAN_FIELDS: [PlanField; 7] = [
    PlanField::GreenCover,
    PlanField::CoolRoof,
    PlanField::GreenRoof,
    PlanField::WaterBodies,
    PlanField::CoolPavement,
    PlanField::Budget,
    PlanField::Order,
];

const GREEN_COVER_STEP: f64 = 5.0;
const GREEN_COVER_MAX: f64 = 50.0;
const BUDGET_STEP: f64 = 0.5;
const BUDGET_MAX: f64 = 20.0;

pub(crate) struct App {
    pub service: Arc<SwelterService>,

    pub screen: Screen,
    pub cities: Vec<CityMeta>,
    pub city_list_index: usize,
    pub selected_city: Option<CityMeta>,

    pub plan: MitigationPlan,
    pub order: AllocationOrder,
    pub plan_cursor: usize,

    pub analysis: Option<CityAnalysis>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<SwelterService>) -> Self {
        let mut cities = service.cities();
        cities.sort_by(|lhs, rhs| lhs.name.cmp(&rhs.name));
        Self {
            service,
            screen: Screen::CitySelect,
            cities,
            city_list_index: 0,
            selected_city: None,
            plan: MitigationPlan::default(),
            order: AllocationOrder::default(),
            plan_cursor: 0,
            analysis: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn select_current_city(&mut self) {
        if let Some(meta) = self.cities.get(self.city_list_index) {
            self.selected_city = Some(meta.clone());
            self.screen = Screen::PlanSetup;
        }
    }

    pub(crate) fn current_field(&self) -> PlanField {
        PLAN_FIELDS
            .get(self.plan_cursor)
            .copied()
            .unwrap_or(PlanField::GreenCover)
    }

    /// Flip the boolean under the cursor, or cycle the allocation order.
    pub(crate) fn toggle_current_field(&mut self) {
        match self.current_field() {
            PlanField::CoolRoof => self.plan.cool_roof = !self.plan.cool_roof,
            PlanField::GreenRoof => self.plan.green_roof = !self.plan.green_roof,
            PlanField::WaterBodies => self.plan.water_bodies = !self.plan.water_bodies,
            PlanField::CoolPavement => self.plan.cool_pavement = !self.plan.cool_pavement,
            PlanField::Order => {
                self.order = match self.order {
                    AllocationOrder::Declaration => AllocationOrder::ImpactPerCost,
                    AllocationOrder::ImpactPerCost => AllocationOrder::Declaration,
                };
            }
            PlanField::GreenCover | PlanField::Budget => {}
        }
    }

    /// Step the numeric field under the cursor up or down.
    pub(crate) fn adjust_current_field(&mut self, up: bool) {
        let direction = if up { 1.0 } else { -1.0 };
        match self.current_field() {
            PlanField::GreenCover => {
                self.plan.green_cover_pct = (self.plan.green_cover_pct
                    + direction * GREEN_COVER_STEP)
                    .clamp(0.0, GREEN_COVER_MAX);
            }
            PlanField::Budget => {
                self.plan.budget_cap =
                    (self.plan.budget_cap + direction * BUDGET_STEP).clamp(0.0, BUDGET_MAX);
            }
            _ => self.toggle_current_field(),
        }
    }
}
