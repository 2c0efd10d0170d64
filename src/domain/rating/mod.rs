//! Rating module - Sorting actions into quantile performance categories.
//!
//! Profiles q0..qm are added to the tableau as fictitious actions; every
//! real action is then sorted among them through the outranking relation
//! and the resulting category intervals form the rating classes.

mod profiles;
mod sorting;

pub use profiles::QuantileProfiles;
pub use sorting::{
    ActionSorting, CategoryCharacteristic, IntraClassOrder, RatingBySorting, RatingClass,
    SortingMode, SortingSettings,
};
