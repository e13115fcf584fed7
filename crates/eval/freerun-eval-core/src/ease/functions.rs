//! Closed-form easing curves over normalized time t in [0,1], plus the two
//! wrapping helpers callers apply before sampling a curve.
//!
//! Formulas are the production set: sine/quad/cubic/quart/quint/expo/circ
//! families, amplitude-decaying elastic (7.5π oscillation), the sine-based
//! back family, and the 7.5625/2.75 piecewise bounce.

use std::f32::consts::PI;

/// Wrap t into [0,1) with period 1.
#[inline]
pub fn apply_loop(t: f32) -> f32 {
    t - t.floor()
}

/// Wrap t into [0,1], mirroring every other integer period.
#[inline]
pub fn apply_ping_pong(t: f32) -> f32 {
    let wrapped = apply_loop(t);
    if (t.floor() as i32) % 2 == 0 {
        wrapped
    } else {
        1.0 - wrapped
    }
}

#[inline]
pub fn in_sine(t: f32) -> f32 {
    1.0 - (t * PI * 0.5).cos()
}

#[inline]
pub fn out_sine(t: f32) -> f32 {
    (t * PI * 0.5).sin()
}

#[inline]
pub fn in_out_sine(t: f32) -> f32 {
    -((t * PI).cos() - 1.0) * 0.5
}

#[inline]
pub fn in_quad(t: f32) -> f32 {
    t * t
}

#[inline]
pub fn out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) * 0.5
    }
}

#[inline]
pub fn in_cubic(t: f32) -> f32 {
    t * t * t
}

#[inline]
pub fn out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[inline]
pub fn in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) * 0.5
    }
}

#[inline]
pub fn in_quart(t: f32) -> f32 {
    t * t * t * t
}

#[inline]
pub fn out_quart(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(4)
}

#[inline]
pub fn in_out_quart(t: f32) -> f32 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) * 0.5
    }
}

#[inline]
pub fn in_quint(t: f32) -> f32 {
    t * t * t * t * t
}

#[inline]
pub fn out_quint(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(5)
}

#[inline]
pub fn in_out_quint(t: f32) -> f32 {
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(5) * 0.5
    }
}

#[inline]
pub fn in_expo(t: f32) -> f32 {
    if t == 0.0 {
        0.0
    } else {
        (10.0 * (t - 1.0)).exp2()
    }
}

#[inline]
pub fn out_expo(t: f32) -> f32 {
    if (t - 1.0).abs() < f32::EPSILON {
        1.0
    } else {
        1.0 - (-10.0 * t).exp2()
    }
}

#[inline]
pub fn in_out_expo(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if (t - 1.0).abs() < f32::EPSILON {
        return 1.0;
    }
    if t < 0.5 {
        (20.0 * t - 10.0).exp2() * 0.5
    } else {
        (2.0 - (-20.0 * t + 10.0).exp2()) * 0.5
    }
}

#[inline]
pub fn in_circ(t: f32) -> f32 {
    1.0 - (1.0 - t * t).sqrt()
}

#[inline]
pub fn out_circ(t: f32) -> f32 {
    (1.0 - (t - 1.0).powi(2)).sqrt()
}

#[inline]
pub fn in_out_circ(t: f32) -> f32 {
    if t < 0.5 {
        (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) * 0.5
    } else {
        ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) * 0.5
    }
}

#[inline]
pub fn in_elastic(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if (t - 1.0).abs() < f32::EPSILON {
        return 1.0;
    }
    -(7.5 * PI * t).sin() * (10.0 * (t - 1.0)).exp2()
}

#[inline]
pub fn out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if (t - 1.0).abs() < f32::EPSILON {
        return 1.0;
    }
    (-7.5 * PI * (t + 1.0)).sin() * (-10.0 * t).exp2() + 1.0
}

#[inline]
pub fn in_out_elastic(t: f32) -> f32 {
    if t == 0.0 {
        return 0.0;
    }
    if (t - 1.0).abs() < f32::EPSILON {
        return 1.0;
    }
    if t < 0.5 {
        0.5 * (7.5 * PI * (2.0 * t)).sin() * (10.0 * (2.0 * t - 1.0)).exp2()
    } else {
        0.5 * ((-7.5 * PI * (2.0 * t)).sin() * (-10.0 * (2.0 * t - 1.0)).exp2() + 2.0)
    }
}

#[inline]
pub fn in_back(t: f32) -> f32 {
    t * t * t - t * (t * PI).sin()
}

#[inline]
pub fn out_back(t: f32) -> f32 {
    let u = 1.0 - t;
    1.0 - (u * u * u - u * (u * PI).sin())
}

#[inline]
pub fn in_out_back(t: f32) -> f32 {
    if t < 0.5 {
        let f = 2.0 * t;
        0.5 * (f * f * f - f * (f * PI).sin())
    } else {
        let f = 1.0 - (2.0 * t - 1.0);
        0.5 * (1.0 - (f * f * f - f * (f * PI).sin())) + 0.5
    }
}

#[inline]
pub fn in_bounce(t: f32) -> f32 {
    1.0 - out_bounce(1.0 - t)
}

#[inline]
pub fn out_bounce(t: f32) -> f32 {
    if t < 1.0 / 2.75 {
        7.5625 * t * t
    } else if t < 2.0 / 2.75 {
        let t = t - 1.5 / 2.75;
        7.5625 * t * t + 0.75
    } else if t < 2.5 / 2.75 {
        let t = t - 2.25 / 2.75;
        7.5625 * t * t + 0.9375
    } else {
        let t = t - 2.625 / 2.75;
        7.5625 * t * t + 0.984375
    }
}

#[inline]
pub fn in_out_bounce(t: f32) -> f32 {
    if t < 0.5 {
        in_bounce(t * 2.0) * 0.5
    } else {
        out_bounce(t * 2.0 - 1.0) * 0.5 + 0.5
    }
}
