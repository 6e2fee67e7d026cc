//! Classical fixed-step fourth-order Runge-Kutta for scalar ODEs
//!
//! ```text
//! k1 = f(t,        y)
//! k2 = f(t + dt/2, y + k1·dt/2)
//! k3 = f(t + dt/2, y + k2·dt/2)
//! k4 = f(t + dt,   y + k3·dt)
//! y' = y + dt/6·(k1 + 2k2 + 2k3 + k4)
//! ```

/// Integrator state carried from one step to the next
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4State {
    pub t: f64,
    pub y: f64,
}

impl Rk4State {
    pub fn new(t: f64, y: f64) -> Self {
        Self { t, y }
    }

    /// State one step of size `dt` later. Time advances by plain addition,
    /// so after n steps `t` carries the accumulated rounding of n additions.
    pub fn advance<F>(self, f: &F, dt: f64) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        Self {
            t: self.t + dt,
            y: rk4_step(f, self.t, self.y, dt),
        }
    }
}

/// One RK4 step of `dy/dt = f(t, y)` from `(t, y)`
pub fn rk4_step<F>(f: &F, t: f64, y: f64, dt: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let k1 = f(t, y);
    let k2 = f(t + dt / 2.0, y + k1 * dt / 2.0);
    let k3 = f(t + dt / 2.0, y + k2 * dt / 2.0);
    let k4 = f(t + dt, y + k3 * dt);
    y + (dt / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
}
