use std::str::FromStr;

use meadow_core::MeadowError;
use meadow_world::MovementIntent;

/// One segment of a plan: hold `intent` for `ticks` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveStep {
    pub intent: MovementIntent,
    pub ticks: u32,
}

/// Scripted viewer input, written as comma-separated steps of direction
/// letters followed by a tick count: `R120,D60,UL30`. A step with no letters
/// (`"45"`) idles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovePlan {
    steps: Vec<MoveStep>,
}

impl MovePlan {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[MoveStep] {
        &self.steps
    }

    pub fn total_ticks(&self) -> u32 {
        self.steps.iter().map(|s| s.ticks).sum()
    }

    /// Intent for frame `tick`. Past the end of the plan the viewer idles.
    pub fn intent_at(&self, tick: u32) -> MovementIntent {
        let mut remaining = tick;
        for step in &self.steps {
            if remaining < step.ticks {
                return step.intent;
            }
            remaining -= step.ticks;
        }
        MovementIntent::IDLE
    }

    fn parse_step(text: &str) -> Result<MoveStep, MeadowError> {
        let invalid = |reason: &str| MeadowError::InvalidMoveStep {
            step: text.to_string(),
            reason: reason.to_string(),
        };
        let split = text
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| invalid("missing tick count"))?;
        let (letters, count) = text.split_at(split);
        let intent =
            MovementIntent::from_letters(letters).map_err(|_| invalid("unknown direction"))?;
        let ticks = count
            .parse::<u32>()
            .map_err(|_| invalid("tick count is not a number"))?;
        if ticks == 0 {
            return Err(invalid("tick count must be at least 1"));
        }
        Ok(MoveStep { intent, ticks })
    }
}

impl FromStr for MovePlan {
    type Err = MeadowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let steps = s
            .split(',')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .map(Self::parse_step)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan() {
        let plan: MovePlan = "R120, d60,UL30,15".parse().unwrap();
        assert_eq!(plan.steps().len(), 4);
        assert_eq!(plan.total_ticks(), 225);
        assert!(plan.steps()[0].intent.right);
        assert!(plan.steps()[1].intent.down);
        let ul = plan.steps()[2].intent;
        assert!(ul.up && ul.left && !ul.right);
        assert!(plan.steps()[3].intent.is_idle());
    }

    #[test]
    fn test_intent_at_walks_segments() {
        let plan: MovePlan = "R2,D1".parse().unwrap();
        assert!(plan.intent_at(0).right);
        assert!(plan.intent_at(1).right);
        assert!(plan.intent_at(2).down);
        assert!(plan.intent_at(3).is_idle());
        assert!(plan.intent_at(1000).is_idle());
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["R", "X10", "R0", "R1x", "R99999999999"] {
            let err = bad.parse::<MovePlan>().unwrap_err();
            assert!(
                matches!(err, MeadowError::InvalidMoveStep { ref step, .. } if step == bad),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn test_empty_plan_is_idle() {
        let plan: MovePlan = "".parse().unwrap();
        assert_eq!(plan, MovePlan::idle());
        assert_eq!(plan.total_ticks(), 0);
    }
}
