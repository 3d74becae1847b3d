use fdheat_core::{Profile, Scheme, SimConfig, Simulation, Snapshot, StabilityCurves};
use wasm_bindgen::prelude::*;

/// Browser handle on a simulation. A JS timer calls `tick()` to animate.
#[wasm_bindgen]
pub struct Solver {
    inner: Simulation,
}

#[wasm_bindgen]
impl Solver {
    #[wasm_bindgen(constructor)]
    pub fn new(cells: usize, nt: usize, profile: &str, scheme: &str) -> Result<Solver, JsValue> {
        let profile: Profile = profile.parse().map_err(to_js)?;
        let scheme: Scheme = scheme.parse().map_err(to_js)?;
        let inner = Simulation::new(SimConfig::from_cells(cells, nt, profile), scheme).map_err(to_js)?;
        Ok(Solver { inner })
    }

    // Configuration; rejected while running
    pub fn configure(&mut self, cells: usize, nt: usize, profile: &str) -> Result<(), JsValue> {
        let profile: Profile = profile.parse().map_err(to_js)?;
        self.inner
            .configure(SimConfig::from_cells(cells, nt, profile))
            .map_err(to_js)?;
        Ok(())
    }

    pub fn set_scheme(&mut self, scheme: &str) -> Result<(), JsValue> {
        let scheme: Scheme = scheme.parse().map_err(to_js)?;
        self.inner.set_scheme(scheme).map_err(to_js)
    }

    pub fn nx(&self) -> usize { self.inner.grid().nx() }
    pub fn get_dx(&self) -> f64 { self.inner.grid().dx() }
    pub fn get_dt(&self) -> f64 { self.inner.grid().dt() }
    pub fn get_alpha(&self) -> f64 { self.inner.grid().alpha() }
    pub fn elapsed(&self) -> f64 { self.inner.elapsed() }
    pub fn is_running(&self) -> bool { self.inner.is_running() }

    /// "completed", "diverged", "cancelled", or empty while idle/running.
    pub fn outcome(&self) -> String {
        self.inner
            .outcome()
            .map(|o| o.as_str().to_string())
            .unwrap_or_default()
    }

    // Copy-based JS access (reliable)
    pub fn get_coordinates(&self) -> Vec<f64> {
        self.inner.grid().coordinates()
    }

    pub fn get_field(&self) -> Vec<f64> {
        self.inner.state().to_vec()
    }

    pub fn curves(&self) -> Curves {
        Curves { inner: self.inner.stability_curves() }
    }

    // Run control
    pub fn start(&mut self) -> Frame {
        Frame::from_snapshot(self.inner.start(), 0.0)
    }

    /// One time step; a frame comes back only when there is something to draw.
    pub fn tick(&mut self) -> Option<Frame> {
        let t0 = now_ms();
        let snapshot = self.inner.tick();
        let t1 = now_ms();
        snapshot.map(|s| Frame::from_snapshot(s, t1 - t0))
    }

    pub fn cancel(&mut self) { self.inner.cancel(); }
}

#[wasm_bindgen]
pub struct Frame {
    time: f64,
    kind: String,
    values: Vec<f64>,
    compute_ms: f64,
}

impl Frame {
    fn from_snapshot(s: Snapshot, compute_ms: f64) -> Frame {
        Frame {
            time: s.time,
            kind: s.kind.as_str().to_string(),
            values: s.values,
            compute_ms,
        }
    }
}

#[wasm_bindgen]
impl Frame {
    pub fn time(&self) -> f64 { self.time }
    pub fn kind(&self) -> String { self.kind.clone() }
    pub fn values(&self) -> Vec<f64> { self.values.clone() }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
}

#[wasm_bindgen]
pub struct Curves {
    inner: StabilityCurves,
}

#[wasm_bindgen]
impl Curves {
    pub fn xi(&self) -> Vec<f64> { self.inner.xi.clone() }
    pub fn ideal(&self) -> Vec<f64> { self.inner.ideal.clone() }
    pub fn dispersion(&self) -> Vec<f64> { self.inner.dispersion.clone() }
    pub fn dissipation(&self) -> Vec<f64> { self.inner.dissipation.clone() }
}

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
