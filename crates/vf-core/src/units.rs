// vf-core/src/units.rs

use uom::si::f64::{
    MassRate as UomMassRate, ThermodynamicTemperature as UomThermodynamicTemperature,
    Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type MassRate = UomMassRate;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn kelvin_of(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[inline]
pub fn kgps_of(mdot: MassRate) -> f64 {
    use uom::si::mass_rate::kilogram_per_second;
    mdot.get::<kilogram_per_second>()
}

#[inline]
pub fn minutes_of(t: Time) -> f64 {
    use uom::si::time::minute;
    t.get::<minute>()
}

/// Raw log seconds expressed on the minute axis used for comparison charts.
#[inline]
pub fn seconds_to_minutes(seconds: f64) -> f64 {
    minutes_of(s(seconds))
}

pub mod constants {
    /// Molar gas constant (J/mol/K).
    pub const R_J_PER_MOL_K: f64 = 8.314;

    /// Molar mass of CO2 (kg/mol).
    pub const M_CO2_KG_PER_MOL: f64 = 44.01e-3;
}
