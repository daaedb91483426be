#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use crxs_core::{CmPoint, InvariantBackend, Nucleus, Parametrization};

/// Backend answering a fixed value everywhere.
pub struct ConstantBackend {
    pub value: f64,
    pub isospin_excess: f64,
    pub hyperon_fraction: f64,
    pub sigma_tot: f64,
}

impl ConstantBackend {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            isospin_excess: 0.0,
            hyperon_fraction: 0.0,
            sigma_tot: 40.0,
        }
    }
}

impl InvariantBackend for ConstantBackend {
    fn inv_pbar(&self, _: Parametrization, _: &CmPoint, _: Nucleus, _: Nucleus) -> f64 {
        self.value
    }

    fn isospin_excess(&self, _: Parametrization, _: f64, _: Nucleus, _: Nucleus) -> f64 {
        self.isospin_excess
    }

    fn hyperon_fraction(&self, _: Parametrization, _: f64) -> f64 {
        self.hyperon_fraction
    }

    fn sigma_tot(&self, _: f64, _: Nucleus, _: Nucleus) -> f64 {
        self.sigma_tot
    }
}

/// Wraps a backend and counts the spectrum evaluations it serves.
pub struct CountingBackend<B> {
    pub inner: B,
    pub calls: AtomicUsize,
}

impl<B> CountingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<B: InvariantBackend> InvariantBackend for CountingBackend<B> {
    fn inv_pbar(&self, param: Parametrization, point: &CmPoint, p: Nucleus, t: Nucleus) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.inv_pbar(param, point, p, t)
    }

    fn inv_nbar(&self, param: Parametrization, point: &CmPoint, p: Nucleus, t: Nucleus) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.inv_nbar(param, point, p, t)
    }

    fn isospin_excess(&self, param: Parametrization, s: f64, p: Nucleus, t: Nucleus) -> f64 {
        self.inner.isospin_excess(param, s, p, t)
    }

    fn hyperon_fraction(&self, param: Parametrization, s: f64) -> f64 {
        self.inner.hyperon_fraction(param, s)
    }

    fn sigma_tot(&self, s: f64, p: Nucleus, t: Nucleus) -> f64 {
        self.inner.sigma_tot(s, p, t)
    }
}

/// Smooth spectrum falling in p_T and radial scaling, with distinct
/// antineutron and antiproton shapes.
pub struct SmoothBackend;

impl SmoothBackend {
    fn shape(point: &CmPoint, slope: f64) -> f64 {
        let x_f = point.x_f();
        10.0 * (-slope * point.p_t()).exp() * (1.0 - x_f * x_f).powi(3)
    }
}

impl InvariantBackend for SmoothBackend {
    fn inv_pbar(&self, _: Parametrization, point: &CmPoint, _: Nucleus, _: Nucleus) -> f64 {
        Self::shape(point, 4.0)
    }

    fn inv_nbar(&self, _: Parametrization, point: &CmPoint, _: Nucleus, _: Nucleus) -> f64 {
        1.3 * Self::shape(point, 3.0)
    }

    fn isospin_excess(&self, _: Parametrization, _: f64, _: Nucleus, _: Nucleus) -> f64 {
        0.3
    }

    fn hyperon_fraction(&self, _: Parametrization, _: f64) -> f64 {
        0.1
    }
}

pub fn relative_diff(a: f64, b: f64) -> f64 {
    (a - b).abs() / a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
}
