//! Scroll triggers: where an animation's scroll range starts and ends.
//!
//! Thresholds are written the same way designers talk about them,
//! `"<element edge> <viewport edge>"`:
//!
//! - `"top 85%"`: when the element's top reaches 85% down the viewport
//! - `"top top+=80"`: when the element's top is 80px below the viewport's top
//! - `"bottom+=200 bottom"`: when 200px past the element's bottom reaches the viewport's bottom
//!
//! Ends may also be relative to the start: `"+=300%"` (three viewport heights)
//! or `"+=500"` (pixels).

use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdParseError {
    #[error("empty threshold")]
    Empty,
    #[error("threshold needs an element edge and a viewport edge: {0}")]
    MissingViewportEdge(String),
    #[error("too many parts in threshold: {0}")]
    TooManyParts(String),
    #[error("unknown edge: {0}")]
    UnknownEdge(String),
    #[error("bad offset: {0}")]
    BadOffset(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToggleActionsParseError {
    #[error("toggle actions need exactly four words: {0}")]
    WrongCount(String),
    #[error("unknown toggle action: {0}")]
    UnknownAction(String),
}

/// A point on an element or on the viewport: a fraction of its height plus pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub fraction: f64,
    pub offset: f64,
}

impl Edge {
    pub const TOP: Self = Self {
        fraction: 0.0,
        offset: 0.0,
    };
    pub const BOTTOM: Self = Self {
        fraction: 1.0,
        offset: 0.0,
    };

    fn resolve(&self, length: f64) -> f64 {
        self.fraction * length + self.offset
    }
}

impl FromStr for Edge {
    type Err = ThresholdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, offset) = split_offset(s)?;
        let fraction = match name {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            pct if pct.ends_with('%') => pct[..pct.len() - 1]
                .parse::<f64>()
                .map(|p| p / 100.0)
                .map_err(|_| ThresholdParseError::UnknownEdge(s.to_string()))?,
            _ => return Err(ThresholdParseError::UnknownEdge(s.to_string())),
        };
        Ok(Self { fraction, offset })
    }
}

fn split_offset(s: &str) -> Result<(&str, f64), ThresholdParseError> {
    let (name, sign, rest) = if let Some(i) = s.find("+=") {
        (&s[..i], 1.0, &s[i + 2..])
    } else if let Some(i) = s.find("-=") {
        (&s[..i], -1.0, &s[i + 2..])
    } else {
        return Ok((s, 0.0));
    };
    let rest = rest.strip_suffix("px").unwrap_or(rest);
    let value = rest
        .parse::<f64>()
        .map_err(|_| ThresholdParseError::BadOffset(s.to_string()))?;
    Ok((name, sign * value))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    pub element: Edge,
    pub viewport: Edge,
}

impl Threshold {
    /// Scroll position at which the two edges line up.
    pub fn scroll_position(&self, layout: &Layout) -> f64 {
        layout.top + self.element.resolve(layout.height)
            - self.viewport.resolve(layout.viewport_height)
    }
}

impl FromStr for Threshold {
    type Err = ThresholdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let element = parts.next().ok_or(ThresholdParseError::Empty)?;
        let viewport = parts
            .next()
            .ok_or_else(|| ThresholdParseError::MissingViewportEdge(s.to_string()))?;
        if parts.next().is_some() {
            return Err(ThresholdParseError::TooManyParts(s.to_string()));
        }
        Ok(Self {
            element: element.parse()?,
            viewport: viewport.parse()?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EndThreshold {
    Absolute(Threshold),
    /// Distance past the start: pixels plus a multiple of the viewport height
    Relative { px: f64, viewports: f64 },
}

impl Default for EndThreshold {
    fn default() -> Self {
        Self::Absolute(Threshold {
            element: Edge::BOTTOM,
            viewport: Edge::TOP,
        })
    }
}

impl FromStr for EndThreshold {
    type Err = ThresholdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some(rest) = trimmed.strip_prefix("+=") else {
            return Ok(Self::Absolute(trimmed.parse()?));
        };
        if let Some(pct) = rest.strip_suffix('%') {
            let viewports = pct
                .parse::<f64>()
                .map_err(|_| ThresholdParseError::BadOffset(s.to_string()))?
                / 100.0;
            return Ok(Self::Relative { px: 0.0, viewports });
        }
        let px = rest
            .strip_suffix("px")
            .unwrap_or(rest)
            .parse::<f64>()
            .map_err(|_| ThresholdParseError::BadOffset(s.to_string()))?;
        Ok(Self::Relative { px, viewports: 0.0 })
    }
}

/// Document-space geometry of a trigger element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerSpec {
    pub start: Threshold,
    pub end: EndThreshold,
}

impl TriggerSpec {
    pub fn new(start: &str, end: Option<&str>) -> Result<Self, ThresholdParseError> {
        Ok(Self {
            start: start.parse()?,
            end: match end {
                Some(e) => e.parse()?,
                None => EndThreshold::default(),
            },
        })
    }

    pub fn range(&self, layout: &Layout) -> ScrollRange {
        let start = self.start.scroll_position(layout);
        let end = match self.end {
            EndThreshold::Absolute(t) => t.scroll_position(layout),
            EndThreshold::Relative { px, viewports } => {
                start + px + viewports * layout.viewport_height
            }
        };
        ScrollRange {
            start,
            end: end.max(start),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    pub start: f64,
    pub end: f64,
}

impl ScrollRange {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn progress(&self, scroll: f64) -> f64 {
        let len = self.length();
        if len <= 0.0 {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / len).clamp(0.0, 1.0)
    }

    pub fn zone(&self, scroll: f64) -> Zone {
        if scroll < self.start {
            Zone::Before
        } else if scroll > self.end {
            Zone::After
        } else {
            Zone::Inside
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Before,
    Inside,
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

/// Turns a stream of scroll positions into enter/leave events.
#[derive(Clone, Debug, Default)]
pub struct ScrollObserver {
    zone: Zone,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn is_active(&self) -> bool {
        self.zone == Zone::Inside
    }

    /// Events fired by moving to `scroll`, in the order they happen.
    pub fn update(&mut self, range: &ScrollRange, scroll: f64) -> Vec<TriggerEvent> {
        use TriggerEvent::*;
        use Zone::*;
        let next = range.zone(scroll);
        let events = match (self.zone, next) {
            (Before, Inside) => vec![Enter],
            (Before, After) => vec![Enter, Leave],
            (Inside, After) => vec![Leave],
            (After, Inside) => vec![EnterBack],
            (After, Before) => vec![EnterBack, LeaveBack],
            (Inside, Before) => vec![LeaveBack],
            _ => vec![],
        };
        self.zone = next;
        events
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    None,
}

impl FromStr for ToggleAction {
    type Err = ToggleActionsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "reverse" => Self::Reverse,
            "restart" => Self::Restart,
            "reset" => Self::Reset,
            "complete" => Self::Complete,
            "none" => Self::None,
            other => return Err(ToggleActionsParseError::UnknownAction(other.to_string())),
        })
    }
}

/// What to do on enter, leave, enter-back and leave-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    pub fn action(&self, event: TriggerEvent) -> ToggleAction {
        match event {
            TriggerEvent::Enter => self.on_enter,
            TriggerEvent::Leave => self.on_leave,
            TriggerEvent::EnterBack => self.on_enter_back,
            TriggerEvent::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = ToggleActionsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words = s.split_whitespace().collect::<Vec<_>>();
        let &[enter, leave, enter_back, leave_back] = words.as_slice() else {
            return Err(ToggleActionsParseError::WrongCount(s.to_string()));
        };
        Ok(Self {
            on_enter: enter.parse()?,
            on_leave: leave.parse()?,
            on_enter_back: enter_back.parse()?,
            on_leave_back: leave_back.parse()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: Layout = Layout {
        top: 1000.0,
        height: 600.0,
        viewport_height: 800.0,
    };

    #[test]
    fn test_threshold_parsing() {
        let t: Threshold = "top 85%".parse().unwrap();
        assert_eq!(t.element, Edge::TOP);
        assert!((t.viewport.fraction - 0.85).abs() < 1e-12);

        let t: Threshold = "top top+=80".parse().unwrap();
        assert_eq!(t.viewport.offset, 80.0);

        let t: Threshold = "bottom+=200 bottom".parse().unwrap();
        assert_eq!(t.element.fraction, 1.0);
        assert_eq!(t.element.offset, 200.0);

        let t: Threshold = "center-=10px center".parse().unwrap();
        assert_eq!(t.element.offset, -10.0);
    }

    #[test]
    fn test_threshold_errors() {
        assert_eq!("".parse::<Threshold>(), Err(ThresholdParseError::Empty));
        assert!(matches!(
            "top".parse::<Threshold>(),
            Err(ThresholdParseError::MissingViewportEdge(_))
        ));
        assert!(matches!(
            "top middle".parse::<Threshold>(),
            Err(ThresholdParseError::UnknownEdge(_))
        ));
        assert!(matches!(
            "top top+=abc".parse::<Threshold>(),
            Err(ThresholdParseError::BadOffset(_))
        ));
        assert!(matches!(
            "top top top".parse::<Threshold>(),
            Err(ThresholdParseError::TooManyParts(_))
        ));
    }

    #[test]
    fn test_ranges() {
        let spec = TriggerSpec::new("top 85%", Some("top 60%")).unwrap();
        let range = spec.range(&LAYOUT);
        assert!((range.start - 320.0).abs() < 1e-9);
        assert!((range.end - 520.0).abs() < 1e-9);

        let spec = TriggerSpec::new("top top", Some("+=300%")).unwrap();
        let range = spec.range(&LAYOUT);
        assert_eq!(range.start, 1000.0);
        assert_eq!(range.end, 3400.0);

        let spec = TriggerSpec::new("top top+=80", Some("bottom+=200 bottom")).unwrap();
        let range = spec.range(&LAYOUT);
        assert_eq!(range.start, 920.0);
        assert_eq!(range.end, 1000.0);

        // default end is "bottom top"
        let spec = TriggerSpec::new("top 82%", None).unwrap();
        assert_eq!(spec.range(&LAYOUT).end, 1600.0);
    }

    #[test]
    fn test_progress_clamps() {
        let range = ScrollRange {
            start: 100.0,
            end: 300.0,
        };
        assert_eq!(range.progress(0.0), 0.0);
        assert_eq!(range.progress(200.0), 0.5);
        assert_eq!(range.progress(900.0), 1.0);
        let flat = ScrollRange {
            start: 100.0,
            end: 100.0,
        };
        assert_eq!(flat.progress(99.0), 0.0);
        assert_eq!(flat.progress(100.0), 1.0);
    }

    #[test]
    fn test_observer_events() {
        let range = ScrollRange {
            start: 100.0,
            end: 300.0,
        };
        let mut obs = ScrollObserver::new();
        assert!(obs.update(&range, 50.0).is_empty());
        assert_eq!(obs.update(&range, 150.0), vec![TriggerEvent::Enter]);
        assert!(obs.is_active());
        assert_eq!(obs.update(&range, 400.0), vec![TriggerEvent::Leave]);
        assert_eq!(obs.update(&range, 200.0), vec![TriggerEvent::EnterBack]);
        assert_eq!(obs.update(&range, 0.0), vec![TriggerEvent::LeaveBack]);
        assert_eq!(
            obs.update(&range, 1000.0),
            vec![TriggerEvent::Enter, TriggerEvent::Leave]
        );
        assert_eq!(
            obs.update(&range, 0.0),
            vec![TriggerEvent::EnterBack, TriggerEvent::LeaveBack]
        );
    }

    #[test]
    fn test_toggle_actions() {
        let actions: ToggleActions = "restart none none reverse".parse().unwrap();
        assert_eq!(actions.action(TriggerEvent::Enter), ToggleAction::Restart);
        assert_eq!(actions.action(TriggerEvent::LeaveBack), ToggleAction::Reverse);
        assert_eq!(actions.action(TriggerEvent::Leave), ToggleAction::None);
        assert!(matches!(
            "play none".parse::<ToggleActions>(),
            Err(ToggleActionsParseError::WrongCount(_))
        ));
        assert!(matches!(
            "play none none rewind".parse::<ToggleActions>(),
            Err(ToggleActionsParseError::UnknownAction(_))
        ));
    }
}
