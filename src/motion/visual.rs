//! Visual descriptors: the style values the engine animates.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

/// Complete visual state of one element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    pub opacity: f64,
    /// Horizontal offset in pixels
    pub x: f64,
    /// Vertical offset in pixels
    pub y: f64,
    /// Vertical offset in viewport-height units, added to `y`
    pub y_vh: f64,
    pub scale: f64,
    pub scale_y: f64,
    /// Degrees
    pub rotate_x: f64,
    /// Degrees
    pub rotate_y: f64,
}

impl VisualState {
    pub const NEUTRAL: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        y_vh: 0.0,
        scale: 1.0,
        scale_y: 1.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
    };

    /// Fully transparent elements are also hidden from hit-testing and focus.
    pub fn visibility_hidden(&self) -> bool {
        self.opacity <= 0.0
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::NEUTRAL
    }

    pub fn transform(&self) -> String {
        let mut out = String::new();
        if self.rotate_x != 0.0 || self.rotate_y != 0.0 {
            out.push_str("perspective(1000px) ");
        }
        if self.y_vh != 0.0 {
            out.push_str(&format!(
                "translate3d({}px, calc({}px + {}vh), 0px)",
                self.x, self.y, self.y_vh
            ));
        } else {
            out.push_str(&format!("translate3d({}px, {}px, 0px)", self.x, self.y));
        }
        if self.scale != 1.0 {
            out.push_str(&format!(" scale({})", self.scale));
        }
        if self.scale_y != 1.0 {
            out.push_str(&format!(" scaleY({})", self.scale_y));
        }
        if self.rotate_x != 0.0 {
            out.push_str(&format!(" rotateX({}deg)", self.rotate_x));
        }
        if self.rotate_y != 0.0 {
            out.push_str(&format!(" rotateY({}deg)", self.rotate_y));
        }
        out
    }

    /// The same properties a stage writes, as an inline `style` value.
    pub fn inline_style(&self) -> String {
        let visibility = if self.visibility_hidden() {
            "hidden"
        } else {
            "inherit"
        };
        format!(
            "opacity: {}; visibility: {visibility}; transform: {}",
            self.opacity,
            self.transform()
        )
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A partial descriptor. Tweens only ever touch the fields that are set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Props {
    pub opacity: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub y_vh: Option<f64>,
    pub scale: Option<f64>,
    pub scale_y: Option<f64>,
    pub rotate_x: Option<f64>,
    pub rotate_y: Option<f64>,
}

macro_rules! builder {
    ($($field:ident),*) => {
        $(
            pub fn $field(mut self, v: f64) -> Self {
                self.$field = Some(v);
                self
            }
        )*
    };
}

macro_rules! for_each_field {
    ($m:ident) => {
        $m!(opacity);
        $m!(x);
        $m!(y);
        $m!(y_vh);
        $m!(scale);
        $m!(scale_y);
        $m!(rotate_x);
        $m!(rotate_y);
    };
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    builder!(opacity, x, y, y_vh, scale, scale_y, rotate_x, rotate_y);

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, state: &mut VisualState) {
        macro_rules! set {
            ($f:ident) => {
                if let Some(v) = self.$f {
                    state.$f = v;
                }
            };
        }
        for_each_field!(set);
    }

    /// Current values of `state` for exactly the fields set in `self`.
    pub fn read_from(&self, state: &VisualState) -> Props {
        let mut out = Props::default();
        macro_rules! read {
            ($f:ident) => {
                if self.$f.is_some() {
                    out.$f = Some(state.$f);
                }
            };
        }
        for_each_field!(read);
        out
    }

    /// Writes `from + (to - from) * t` for every field set in `to`.
    /// Fields missing from `from` start at the value already in `state`.
    pub fn lerp_into(state: &mut VisualState, from: &Props, to: &Props, t: f64) {
        macro_rules! lerp {
            ($f:ident) => {
                if let Some(end) = to.$f {
                    let start = from.$f.unwrap_or(state.$f);
                    state.$f = if t == 0.0 {
                        start
                    } else if t == 1.0 {
                        end
                    } else {
                        start + (end - start) * t
                    };
                }
            };
        }
        for_each_field!(lerp);
    }

    /// Fields of `self` overridden by those set in `other`.
    pub fn merged(&self, other: &Props) -> Props {
        let mut out = *self;
        macro_rules! merge {
            ($f:ident) => {
                if other.$f.is_some() {
                    out.$f = other.$f;
                }
            };
        }
        for_each_field!(merge);
        out
    }
}
