//! Matching candidate journeys against the lines a traveller named.
//!
//! Only legs with a line name take part: walks and transfer connectors are
//! skipped. A journey matches when its lined legs, in order, are exactly the
//! expected lines.

use crate::domain::LineName;

use super::types::{Journey, Leg};

/// A journey that passed the matcher, with the legs to keep.
#[derive(Debug)]
pub struct JourneyMatch<'a> {
    pub legs: Vec<&'a Leg>,
    /// The journey had no lined legs and was accepted as-is.
    pub pass_through: bool,
}

/// Why a candidate was turned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NoLegs,
    NoLinedLegs,
    /// The lined leg at `position` is on a different line.
    LineMismatch { position: usize, found: String },
    /// The journey has more lined legs than lines were expected.
    ExtraLeg { found: String },
    /// The journey ran out of lined legs before all lines were matched.
    TooFewLegs { matched: usize },
}

/// Check one candidate journey.
///
/// `accept_unlined` controls whether a journey made only of connector legs
/// is accepted. Such a journey keeps all of its legs.
pub fn match_journey<'a>(
    journey: &'a Journey,
    expected: &[LineName],
    accept_unlined: bool,
) -> Result<JourneyMatch<'a>, Rejection> {
    if journey.legs.is_empty() {
        return Err(Rejection::NoLegs);
    }

    let lined: Vec<(&Leg, &str)> = journey
        .legs
        .iter()
        .filter_map(|leg| {
            let name = leg.line.as_ref()?.name.as_deref()?;
            (!name.trim().is_empty()).then_some((leg, name))
        })
        .collect();

    if lined.is_empty() {
        return if accept_unlined {
            Ok(JourneyMatch {
                legs: journey.legs.iter().collect(),
                pass_through: true,
            })
        } else {
            Err(Rejection::NoLinedLegs)
        };
    }

    let mut expected_lines = expected.iter();
    for (position, (_, name)) in lined.iter().enumerate() {
        match expected_lines.next() {
            Some(line) if line.matches(name) => {}
            Some(_) => {
                return Err(Rejection::LineMismatch {
                    position,
                    found: name.to_string(),
                });
            }
            None => {
                return Err(Rejection::ExtraLeg {
                    found: name.to_string(),
                });
            }
        }
    }

    if lined.len() < expected.len() {
        return Err(Rejection::TooFewLegs {
            matched: lined.len(),
        });
    }

    Ok(JourneyMatch {
        legs: lined.into_iter().map(|(leg, _)| leg).collect(),
        pass_through: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trains::types::Line;
    use proptest::prelude::*;

    fn lined(name: &str) -> Leg {
        Leg {
            line: Some(Line {
                name: Some(name.to_string()),
                operator: None,
            }),
            ..Leg::default()
        }
    }

    fn walk() -> Leg {
        Leg {
            walking: Some(true),
            ..Leg::default()
        }
    }

    fn journey(legs: Vec<Leg>) -> Journey {
        Journey {
            legs,
            refresh_token: Some("token".to_string()),
        }
    }

    fn lines(names: &[&str]) -> Vec<LineName> {
        names.iter().map(|n| LineName::new(n)).collect()
    }

    #[test]
    fn matches_ignoring_spacing_and_case() {
        let j = journey(vec![lined("ICE707")]);
        let m = match_journey(&j, &lines(&["ice 707"]), true).unwrap();
        assert_eq!(m.legs.len(), 1);
        assert!(!m.pass_through);
    }

    #[test]
    fn connector_legs_skipped_and_dropped() {
        let j = journey(vec![lined("ICE 707"), walk(), lined("S 1")]);
        let m = match_journey(&j, &lines(&["ICE 707", "S1"]), true).unwrap();
        assert_eq!(m.legs.len(), 2);
        assert!(m.legs.iter().all(|l| l.line.is_some()));
    }

    #[test]
    fn mismatch_rejects() {
        let j = journey(vec![lined("ICE 707"), lined("RE 5")]);
        assert_eq!(
            match_journey(&j, &lines(&["ICE 707", "S 1"]), true).unwrap_err(),
            Rejection::LineMismatch {
                position: 1,
                found: "RE 5".to_string()
            }
        );
    }

    #[test]
    fn extra_and_missing_legs_reject() {
        let j = journey(vec![lined("ICE 707"), lined("S 1")]);
        assert!(matches!(
            match_journey(&j, &lines(&["ICE 707"]), true),
            Err(Rejection::ExtraLeg { .. })
        ));

        let j = journey(vec![lined("ICE 707")]);
        assert_eq!(
            match_journey(&j, &lines(&["ICE 707", "S 1"]), true).unwrap_err(),
            Rejection::TooFewLegs { matched: 1 }
        );
    }

    #[test]
    fn unlined_journey_is_configurable() {
        let j = journey(vec![walk()]);

        let m = match_journey(&j, &lines(&["ICE 707"]), true).unwrap();
        assert!(m.pass_through);
        assert_eq!(m.legs.len(), 1);

        assert_eq!(
            match_journey(&j, &lines(&["ICE 707"]), false).unwrap_err(),
            Rejection::NoLinedLegs
        );
    }

    #[test]
    fn empty_journey_rejected() {
        let j = journey(vec![]);
        assert_eq!(
            match_journey(&j, &lines(&["ICE 707"]), true).unwrap_err(),
            Rejection::NoLegs
        );
    }

    proptest! {
        #[test]
        fn walks_never_change_the_outcome(
            names in prop::collection::vec("[A-Z]{1,3} [0-9]{1,4}", 1..4),
            walk_mask in prop::collection::vec(any::<bool>(), 4),
        ) {
            let mut legs = Vec::new();
            for (i, name) in names.iter().enumerate() {
                if walk_mask[i] {
                    legs.push(walk());
                }
                legs.push(lined(name));
            }
            let j = journey(legs);
            let expected: Vec<LineName> = names.iter().map(|n| LineName::new(&n.replace(' ', ""))).collect();

            let m = match_journey(&j, &expected, false).unwrap();
            prop_assert_eq!(m.legs.len(), names.len());
        }
    }
}
