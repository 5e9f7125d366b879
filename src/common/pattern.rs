use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::common::math::{Point3, Transform};
use crate::common::scene::{BLACK, Color, Object};

/// Points closer than this to the center of their unit cell get the spot color.
const SPOT_RADIUS: f64 = 0.6;

/// A surface color function, either a fixed color or a rule combining child patterns.
///
/// Children are evaluated at the same point, after mapping it through their own transform,
/// so patterns can be nested to any depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Solid(Color),
    Composite {
        rule: Rule,
        children: Vec<Pattern>,
        transform: Transform,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Rule {
    /// Cycle through the children along x
    Stripe,
    /// Cycle through the children by distance from the y-axis
    Ring,
    /// Cycle through the children in a 3D checkerboard
    Checkers,
    /// Blend the first child into the second along x, repeating every unit
    Gradient,
    /// Blend the first child into the second by distance from the y-axis, repeating every unit
    RadialGradient,
    /// First child near the center of each unit cell, the second elsewhere
    Spotted,
    /// The average of all children
    Blended,
    /// A child picked at random, reproducible for a given seed and point
    Random { seed: u64 },
}

impl Pattern {
    pub fn solid(color: Color) -> Pattern {
        Pattern::Solid(color)
    }

    pub fn composite(rule: Rule, children: Vec<Pattern>) -> Pattern {
        assert!(!children.is_empty(), "{:?} pattern needs at least one child", rule);
        Pattern::Composite {
            rule,
            children,
            transform: Transform::identity(),
        }
    }

    pub fn stripe(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Pattern {
        Self::composite(Rule::Stripe, vec![a.into(), b.into()])
    }

    pub fn ring(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Pattern {
        Self::composite(Rule::Ring, vec![a.into(), b.into()])
    }

    pub fn checkers(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Pattern {
        Self::composite(Rule::Checkers, vec![a.into(), b.into()])
    }

    pub fn gradient(from: impl Into<Pattern>, to: impl Into<Pattern>) -> Pattern {
        Self::composite(Rule::Gradient, vec![from.into(), to.into()])
    }

    pub fn radial_gradient(from: impl Into<Pattern>, to: impl Into<Pattern>) -> Pattern {
        Self::composite(Rule::RadialGradient, vec![from.into(), to.into()])
    }

    pub fn spotted(spot: impl Into<Pattern>, background: impl Into<Pattern>) -> Pattern {
        Self::composite(Rule::Spotted, vec![spot.into(), background.into()])
    }

    pub fn blended(children: Vec<Pattern>) -> Pattern {
        Self::composite(Rule::Blended, children)
    }

    pub fn random(children: Vec<Pattern>, seed: u64) -> Pattern {
        Self::composite(Rule::Random { seed }, children)
    }

    /// Set the pattern transform, a solid color looks the same everywhere so it is left as is.
    pub fn with_transform(self, transform: Transform) -> Pattern {
        match self {
            Pattern::Solid(color) => Pattern::Solid(color),
            Pattern::Composite { rule, children, .. } => Pattern::Composite { rule, children, transform },
        }
    }

    pub fn transform(&self) -> Transform {
        match self {
            Pattern::Solid(_) => Transform::identity(),
            Pattern::Composite { transform, .. } => *transform,
        }
    }

    /// The color at `point`, given in the space of this pattern.
    pub fn color_at(&self, point: Point3) -> Color {
        match self {
            Pattern::Solid(color) => *color,
            Pattern::Composite { rule, children, .. } => rule.apply(children, point),
        }
    }

    /// The color at `point` given in the space of the enclosing pattern.
    fn color_at_parent(&self, point: Point3) -> Color {
        self.color_at(self.transform().inv() * point)
    }

    /// The color of this pattern on `object` at a world-space point.
    pub fn color_at_object(&self, object: &Object, world_point: Point3) -> Color {
        let object_point = object.transform.inv() * world_point;
        self.color_at_parent(object_point)
    }
}

impl From<Color> for Pattern {
    fn from(color: Color) -> Self {
        Pattern::Solid(color)
    }
}

impl Rule {
    fn apply(self, children: &[Pattern], p: Point3) -> Color {
        let n = children.len();
        let child = |i: usize| children[i].color_at_parent(p);

        match self {
            Rule::Stripe => child(cycle(p.x.floor(), n)),
            Rule::Ring => child(cycle(radius(p).floor(), n)),
            Rule::Checkers => child(cycle(p.x.floor() + p.y.floor() + p.z.floor(), n)),
            Rule::Gradient => lerp_color(child(0), child(1 % n), fract(p.x)),
            Rule::RadialGradient => lerp_color(child(0), child(1 % n), fract(radius(p))),
            Rule::Spotted => {
                let center = Point3::new(p.x.floor() + 0.5, p.y.floor() + 0.5, p.z.floor() + 0.5);
                if p.distance_to(center) < SPOT_RADIUS {
                    child(0)
                } else {
                    child(1 % n)
                }
            }
            Rule::Blended => {
                let total = children.iter().fold(BLACK, |acc, c| acc + c.color_at_parent(p));
                total / (n as f64)
            }
            Rule::Random { seed } => child(random_index(seed, p, n)),
        }
    }
}

fn cycle(x: f64, n: usize) -> usize {
    (x as i64).rem_euclid(n as i64) as usize
}

fn radius(p: Point3) -> f64 {
    (p.x * p.x + p.z * p.z).sqrt()
}

fn fract(x: f64) -> f64 {
    x - x.floor()
}

fn lerp_color(from: Color, to: Color, t: f64) -> Color {
    from + (to - from) * t
}

fn random_index(seed: u64, p: Point3, n: usize) -> usize {
    let mut hash = seed;
    for x in [p.x, p.y, p.z] {
        hash = (hash.rotate_left(21) ^ x.to_bits()).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    }
    SmallRng::seed_from_u64(hash).gen_range(0..n)
}
