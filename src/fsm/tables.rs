//! Transition and decision tables for each device variant.
//!
//! ```text
//!  Full:         OFF ──heat──▶ HEATING ──off──▶ OFF
//!                OFF ──cool──▶ COOLING ──off──▶ OFF
//!
//!  HeaterOnly:   OFF ──heat──▶ HEATING ──off──▶ OFF
//!                OFF ──cool──▶ OFF   (absorbed)
//! ```

use core::hash::Hash;

use heapless::FnvIndexMap;
use log::error;

use super::{ClimateAction, ClimateState, DeviceVariant};
use crate::control::comparator::TemperatureVerdict;

/// Row capacity of every table (must be a power of two).
pub const TABLE_CAPACITY: usize = 4;

pub type TransitionTable = FnvIndexMap<(ClimateState, ClimateAction), ClimateState, TABLE_CAPACITY>;
pub type DecisionTable =
    FnvIndexMap<(TemperatureVerdict, ClimateState), ClimateAction, TABLE_CAPACITY>;

use super::ClimateAction as A;
use super::ClimateState as S;
use crate::control::comparator::TemperatureVerdict as V;

const FULL_TRANSITIONS: [((ClimateState, ClimateAction), ClimateState); 4] = [
    ((S::Off, A::Heat), S::Heating),
    ((S::Off, A::Cool), S::Cooling),
    ((S::Heating, A::Off), S::Off),
    ((S::Cooling, A::Off), S::Off),
];

const FULL_DECISIONS: [((TemperatureVerdict, ClimateState), ClimateAction); 4] = [
    ((V::High, S::Off), A::Cool),
    ((V::High, S::Heating), A::Off),
    ((V::Low, S::Off), A::Heat),
    ((V::Low, S::Cooling), A::Off),
];

const HEATER_TRANSITIONS: [((ClimateState, ClimateAction), ClimateState); 3] = [
    ((S::Off, A::Heat), S::Heating),
    ((S::Off, A::Cool), S::Off),
    ((S::Heating, A::Off), S::Off),
];

const HEATER_DECISIONS: [((TemperatureVerdict, ClimateState), ClimateAction); 3] = [
    ((V::Low, S::Off), A::Heat),
    ((V::Normal, S::Heating), A::Off),
    ((V::High, S::Heating), A::Off),
];

/// Build the `(state, action) -> next` table for `variant`.
pub fn build_transition_table(variant: DeviceVariant) -> TransitionTable {
    match variant {
        DeviceVariant::Full => build(&FULL_TRANSITIONS),
        DeviceVariant::HeaterOnly => build(&HEATER_TRANSITIONS),
    }
}

/// Build the `(verdict, state) -> action` table for `variant`.
pub fn build_decision_table(variant: DeviceVariant) -> DecisionTable {
    match variant {
        DeviceVariant::Full => build(&FULL_DECISIONS),
        DeviceVariant::HeaterOnly => build(&HEATER_DECISIONS),
    }
}

fn build<K, V2>(rows: &[(K, V2)]) -> FnvIndexMap<K, V2, TABLE_CAPACITY>
where
    K: Hash + Eq + Copy + core::fmt::Debug,
    V2: Copy,
{
    let mut table = FnvIndexMap::new();
    for &(key, value) in rows {
        if table.insert(key, value).is_err() {
            error!("climate table full, dropping row {:?}", key);
            debug_assert!(false, "climate table capacity exceeded");
        }
    }
    table
}
