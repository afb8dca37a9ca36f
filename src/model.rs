//! # Field model seam
//!
//! The batch front end treats the physical magnetic model as an opaque
//! collaborator: a [`FieldModel`] maps a [`NormalizedQuery`] to the magnetic
//! [`FieldElements`] at that place and time. Coefficient files, spherical
//! harmonic synthesis beyond degree 1, and geoid grids all live behind this
//! trait.
//!
//! [`DipoleModel`] is the built-in collaborator: a tilted centered dipole with
//! linear secular variation, good enough to exercise the front end and to make
//! the binary usable without external data files. Its numbers are plausible,
//! not survey-grade.

use crate::constants::{
    DecimalYear, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, GEOMAGNETIC_REFERENCE_RADIUS_KM,
    METERS_PER_KILOMETER,
};
use crate::query::NormalizedQuery;

/// Magnetic field elements at one place and time, with their annual rates.
///
/// Angles are in degrees, intensities in nanoteslas, rates per year. Any
/// element may be NaN where it is mathematically undefined, which happens to
/// the declination (and its rate) over the geomagnetic poles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldElements {
    pub decl: f64,
    pub incl: f64,
    pub h: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub f: f64,
    pub decl_dot: f64,
    pub incl_dot: f64,
    pub h_dot: f64,
    pub x_dot: f64,
    pub y_dot: f64,
    pub z_dot: f64,
    pub f_dot: f64,
}

/// An opaque provider of magnetic field elements.
pub trait FieldModel {
    /// Epoch the model's coefficients are referenced to, as a decimal year.
    fn epoch(&self) -> DecimalYear;

    /// Compute the field elements for a normalized query.
    fn field_at(&self, query: &NormalizedQuery) -> FieldElements;
}

/// Degree-1 (dipole) field with linear secular variation.
///
/// Heights above mean sea level are treated as heights above the ellipsoid;
/// the geoid undulation (tens of meters) is far below this model's accuracy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipoleModel {
    epoch: DecimalYear,
    g10: f64,
    g11: f64,
    h11: f64,
    g10_dot: f64,
    g11_dot: f64,
    h11_dot: f64,
}

impl DipoleModel {
    /// Dipole terms of the 2010 reference field (epoch 2010.0, valid to 2015.0).
    pub fn wmm2010() -> Self {
        DipoleModel {
            epoch: 2010.0,
            g10: -29496.5,
            g11: -1585.9,
            h11: 4945.1,
            g10_dot: 11.4,
            g11_dot: 16.7,
            h11_dot: -28.8,
        }
    }

    /// Geocentric latitude (radians) and radius (km) of a geodetic position.
    fn geodetic_to_geocentric(latitude_rad: f64, altitude_km: f64) -> (f64, f64) {
        let a = EARTH_MAJOR_AXIS / METERS_PER_KILOMETER;
        let b = EARTH_MINOR_AXIS / METERS_PER_KILOMETER;
        let eps_sq = 1.0 - (b / a) * (b / a);

        let (sin_lat, cos_lat) = latitude_rad.sin_cos();
        // radius of curvature in the prime vertical
        let rc = a / (1.0 - eps_sq * sin_lat * sin_lat).sqrt();

        let xp = (rc + altitude_km) * cos_lat;
        let zp = (rc * (1.0 - eps_sq) + altitude_km) * sin_lat;

        let r = xp.hypot(zp);
        ((zp / r).asin(), r)
    }

    /// North/east/down components of the degree-1 field in the geocentric
    /// frame, for the given coefficients.
    fn synthesize(
        g10: f64,
        g11: f64,
        h11: f64,
        colat_rad: f64,
        lon_rad: f64,
        radius_km: f64,
    ) -> (f64, f64, f64) {
        let (sin_t, cos_t) = colat_rad.sin_cos();
        let (sin_p, cos_p) = lon_rad.sin_cos();
        let ar = (GEOMAGNETIC_REFERENCE_RADIUS_KM / radius_km).powi(3);

        let sectoral = g11 * cos_p + h11 * sin_p;

        let b_r = 2.0 * ar * (g10 * cos_t + sectoral * sin_t);
        let b_t = ar * (g10 * sin_t - sectoral * cos_t);
        let b_p = ar * (g11 * sin_p - h11 * cos_p);

        (-b_t, b_p, -b_r)
    }
}

impl FieldModel for DipoleModel {
    fn epoch(&self) -> DecimalYear {
        self.epoch
    }

    fn field_at(&self, query: &NormalizedQuery) -> FieldElements {
        let lat_rad = query.latitude.to_radians();
        let lon_rad = query.longitude.to_radians();

        let (geocentric_lat, radius_km) =
            Self::geodetic_to_geocentric(lat_rad, query.altitude_km);
        let colat = std::f64::consts::FRAC_PI_2 - geocentric_lat;

        let years = query.year - self.epoch;
        let g10 = self.g10 + years * self.g10_dot;
        let g11 = self.g11 + years * self.g11_dot;
        let h11 = self.h11 + years * self.h11_dot;

        let (xs, ys, zs) = Self::synthesize(g10, g11, h11, colat, lon_rad, radius_km);
        let (xs_dot, ys_dot, zs_dot) = Self::synthesize(
            self.g10_dot,
            self.g11_dot,
            self.h11_dot,
            colat,
            lon_rad,
            radius_km,
        );

        // rotate from the geocentric to the geodetic frame
        let psi = geocentric_lat - lat_rad;
        let (sin_psi, cos_psi) = psi.sin_cos();
        let x = xs * cos_psi - zs * sin_psi;
        let y = ys;
        let z = xs * sin_psi + zs * cos_psi;
        let x_dot = xs_dot * cos_psi - zs_dot * sin_psi;
        let y_dot = ys_dot;
        let z_dot = xs_dot * sin_psi + zs_dot * cos_psi;

        let h = x.hypot(y);
        let f = h.hypot(z);
        let incl = z.atan2(h).to_degrees();

        let h_dot = if h == 0.0 { f64::NAN } else { (x * x_dot + y * y_dot) / h };
        let f_dot = (x * x_dot + y * y_dot + z * z_dot) / f;
        let incl_dot = ((h * z_dot - z * h_dot) / (f * f)).to_degrees();

        // the declination loses meaning where the horizontal field vanishes
        let (decl, decl_dot) = if h == 0.0 {
            (f64::NAN, f64::NAN)
        } else {
            (
                y.atan2(x).to_degrees(),
                ((x * y_dot - y * x_dot) / (h * h)).to_degrees(),
            )
        };

        FieldElements {
            decl,
            incl,
            h,
            x,
            y,
            z,
            f,
            decl_dot,
            incl_dot,
            h_dot,
            x_dot,
            y_dot,
            z_dot,
            f_dot,
        }
    }
}

#[cfg(test)]
mod model_test {
    use super::*;
    use crate::literals::ReferenceFrame;

    fn query(year: f64, latitude: f64, longitude: f64, altitude_km: f64) -> NormalizedQuery {
        NormalizedQuery {
            year,
            latitude,
            longitude,
            altitude_km,
            frame: ReferenceFrame::AboveEllipsoid,
        }
    }

    #[test]
    fn test_equatorial_field_points_north_and_up_is_weak() {
        let model = DipoleModel::wmm2010();
        let elements = model.field_at(&query(2010.0, 0.0, 0.0, 0.0));

        // near the magnetic equator the field is mostly horizontal
        assert!(elements.x > 20_000.0);
        assert!(elements.h > elements.z.abs());
        assert!(elements.f > 20_000.0 && elements.f < 70_000.0);
        assert!(elements.incl.abs() < 45.0);
    }

    #[test]
    fn test_polar_field_is_mostly_vertical() {
        let model = DipoleModel::wmm2010();
        let elements = model.field_at(&query(2010.0, 85.0, 0.0, 0.0));

        assert!(elements.z > 40_000.0);
        assert!(elements.incl > 60.0);
    }

    #[test]
    fn test_field_weakens_with_altitude() {
        let model = DipoleModel::wmm2010();
        let low = model.field_at(&query(2010.0, -30.8, -70.3, 0.0));
        let high = model.field_at(&query(2010.0, -30.8, -70.3, 500.0));

        assert!(high.f < low.f);
    }

    #[test]
    fn test_elements_are_consistent() {
        let model = DipoleModel::wmm2010();
        let e = model.field_at(&query(2013.7, -70.3, -30.8, 9.144));

        assert!((e.h - e.x.hypot(e.y)).abs() < 1e-9);
        assert!((e.f - e.h.hypot(e.z)).abs() < 1e-9);
        assert!((e.incl - e.z.atan2(e.h).to_degrees()).abs() < 1e-12);
        assert!((e.decl - e.y.atan2(e.x).to_degrees()).abs() < 1e-12);
    }

    #[test]
    fn test_secular_variation_moves_the_field() {
        let model = DipoleModel::wmm2010();
        let now = model.field_at(&query(2010.0, 40.0, -105.2, 0.0));
        let later = model.field_at(&query(2011.0, 40.0, -105.2, 0.0));

        // one year of linear secular variation shows up in the elements
        assert!((later.f - now.f).abs() > 1e-6);
        assert!(((later.f - now.f) - now.f_dot).abs() < 1.0);
    }
}
