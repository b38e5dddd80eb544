//! The closed set of prioritisation functions. Each maps `(latency, risk) -> score`
//! and is applied wherever a coordinator needs to weight a strike's arrival time by
//! how dangerous it is, both inside feasibility projection and again in the objective.

use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum PrioritisationChoice {
    Time,
    Product,
    PSquared,
    PCubed,
    Threshold,
}

impl PrioritisationChoice {
    #[must_use]
    pub fn apply(self, latency: f64, risk: f64) -> f64 {
        match self {
            PrioritisationChoice::Time => latency,
            PrioritisationChoice::Product => latency * risk,
            PrioritisationChoice::PSquared => latency * risk * risk,
            PrioritisationChoice::PCubed => latency * risk * risk * risk,
            PrioritisationChoice::Threshold => {
                if risk > 0.8 { latency * 100.0 } else { latency }
            }
        }
    }

    /// A boxed closure suitable for passing into the feasibility/objective machinery,
    /// which is written against `&dyn Fn(f64, f64) -> f64` rather than against this
    /// enum directly so it composes with any future prioritisation function.
    #[must_use]
    pub fn as_fn(self) -> impl Fn(f64, f64) -> f64 {
        move |latency, risk| self.apply(latency, risk)
    }
}
