//! # Constants and type definitions for lodestone
//!
//! This module centralizes the **conversion factors**, **model bounds**, and **common type
//! definitions** used throughout the `lodestone` crate.
//!
//! ## Overview
//!
//! - Unit conversions (feet/meters per kilometer)
//! - Altitude and epoch windows supported by the field models
//! - Core type aliases used across the crate
//! - Container types for raw query records
//!
//! These definitions are used by the literal recognizers, the query assembler,
//! the validator and the batch driver.

use smallvec::SmallVec;

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Feet per kilometer
pub const FEET_PER_KILOMETER: f64 = 3280.839895;

/// Meters per kilometer
pub const METERS_PER_KILOMETER: f64 = 1000.0;

// -------------------------------------------------------------------------------------------------
// Model bounds
// -------------------------------------------------------------------------------------------------

/// Lowest altitude supported by the field models, in kilometers
pub const MIN_ALTITUDE_KM: f64 = -10.0;

/// Highest altitude supported by the field models, in kilometers
pub const MAX_ALTITUDE_KM: f64 = 1000.0;

/// Years past its epoch for which a field model stays valid
pub const MODEL_VALIDITY_YEARS: f64 = 5.0;

// -------------------------------------------------------------------------------------------------
// Record geometry
// -------------------------------------------------------------------------------------------------

/// Number of positional fields in a complete query record
pub const RECORD_FIELDS: usize = 5;

/// Upper bound on the length of a single input token, in bytes
pub const MAX_TOKEN_LEN: usize = 93;

// -------------------------------------------------------------------------------------------------
// Earth geometry
// -------------------------------------------------------------------------------------------------

/// Earth equatorial radius in meters (WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3142;

/// Geomagnetic reference sphere radius in kilometers
pub const GEOMAGNETIC_REFERENCE_RADIUS_KM: f64 = 6371.2;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in decimal degrees
pub type Degree = f64;

/// Date expressed as a year plus a fractional-year offset
pub type DecimalYear = f64;

/// Altitude in kilometers
pub type Kilometers = f64;

/// Raw tokens of one query record, at most [`RECORD_FIELDS`] of them
pub type RawTokens = SmallVec<[String; RECORD_FIELDS]>;
