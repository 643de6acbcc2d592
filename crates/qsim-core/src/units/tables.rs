//! SI unit lookup tables.
//!
//! Each entry is (symbol, base exponents, descriptive name) with exponents
//! ordered (mass, length, time, current, temperature, amount, luminous
//! intensity). The usual table lists compound symbols preferred for
//! display over a derived-unit decomposition.

/// The seven SI base units, in exponent order.
pub const BASE_UNITS: [(&str, [i32; 7], &str); 7] = [
    ("kg", [1, 0, 0, 0, 0, 0, 0], "mass"),
    ("m", [0, 1, 0, 0, 0, 0, 0], "length"),
    ("s", [0, 0, 1, 0, 0, 0, 0], "time"),
    ("A", [0, 0, 0, 1, 0, 0, 0], "electric current"),
    ("K", [0, 0, 0, 0, 1, 0, 0], "temperature"),
    ("mol", [0, 0, 0, 0, 0, 1, 0], "amount of substance"),
    ("cd", [0, 0, 0, 0, 0, 0, 1], "luminous intensity"),
];

/// Derived units with a named symbol, used for greedy decomposition.
pub const DERIVED_UNITS: [(&str, [i32; 7], &str); 12] = [
    ("C", [0, 0, 1, 1, 0, 0, 0], "electric charge"),
    ("F", [-1, -2, 4, 2, 0, 0, 0], "electrical capacitance"),
    ("H", [1, 2, -2, -2, 0, 0, 0], "electrical inductance"),
    ("J", [1, 2, -2, 0, 0, 0, 0], "energy"),
    ("lx", [0, -2, 0, 0, 0, 0, 1], "illuminance"),
    ("N", [1, 1, -2, 0, 0, 0, 0], "force"),
    ("Pa", [1, -1, -2, 0, 0, 0, 0], "pressure"),
    ("S", [-1, -2, 3, 2, 0, 0, 0], "electrical conductance"),
    ("T", [1, 0, -2, -1, 0, 0, 0], "magnetic field"),
    ("V", [1, 2, -3, -1, 0, 0, 0], "voltage"),
    ("W", [1, 2, -3, 0, 0, 0, 0], "power"),
    ("Wb", [1, 2, -2, -1, 0, 0, 0], "magnetic flux"),
];

/// Convenience units preferred when rendering.
pub const USUAL_UNITS: [(&str, [i32; 7], &str); 25] = [
    ("", [0, 0, 0, 0, 0, 0, 0], "dimensionless"),
    ("V.m-1", [1, 1, -3, -1, 0, 0, 0], "electric field"),
    ("C.m-1", [0, -1, 1, 1, 0, 0, 0], "linear charge"),
    ("C.m-2", [0, -2, 1, 1, 0, 0, 0], "surface charge"),
    ("C.m-3", [0, -3, 1, 1, 0, 0, 0], "volume charge"),
    ("F.m-1", [-1, -3, 4, 2, 0, 0, 0], "permittivity"),
    ("H.m-1", [1, 1, -2, -2, 0, 0, 0], "permeability"),
    ("A.m-1", [0, -1, 0, 1, 0, 0, 0], "magnetization"),
    ("A.m-2", [0, -2, 0, 1, 0, 0, 0], "current density"),
    ("m-1", [0, -1, 0, 0, 0, 0, 0], "wavenumber"),
    ("m2", [0, 2, 0, 0, 0, 0, 0], "area"),
    ("m3", [0, 3, 0, 0, 0, 0, 0], "volume"),
    ("kg.m-1", [1, -1, 0, 0, 0, 0, 0], "linear mass"),
    ("kg.m-2", [1, -2, 0, 0, 0, 0, 0], "surface mass"),
    ("kg.m-3", [1, -3, 0, 0, 0, 0, 0], "volume mass"),
    ("S.m-1", [-1, -3, 3, 2, 0, 0, 0], "conductivity"),
    ("m.s-1", [0, 1, -1, 0, 0, 0, 0], "speed"),
    ("m.s-2", [0, 1, -2, 0, 0, 0, 0], "acceleration"),
    ("m.s-3", [0, 1, -3, 0, 0, 0, 0], "jerk"),
    ("m.s-4", [0, 1, -4, 0, 0, 0, 0], "jounce"),
    ("N.s", [1, 1, -1, 0, 0, 0, 0], "momentum"),
    ("N.m.s", [1, 2, -1, 0, 0, 0, 0], "angular momentum"),
    ("kg.m2", [1, 2, 0, 0, 0, 0, 0], "moment of inertia"),
    ("J.K-1", [1, 2, -2, 0, -1, 0, 0], "heat capacity"),
    ("K.W-1", [-1, -2, 3, 0, 1, 0, 0], "thermal resistance"),
];
