//! The fixed rule set deciding which wires may be cut, and when the game is won.
//!
//! Every rule is a pure predicate over the current wire state and the position
//! being cut. A cut is legal when at least one rule allows it. The thresholds
//! and colors below define which puzzles are solvable, so changing any of them
//! changes every classification.

use crate::wires::{Color, WireState};

/// One cutting rule
pub struct Rule {
    /// 1-based rule number, as printed to players
    pub number: usize,
    pub description: &'static str,
    pub applies: fn(&WireState, usize) -> bool,
}

/// All cutting rules, in evaluation order
pub static RULES: [Rule; 11] = [
    Rule {
        number: 1,
        description: "Cut a red wire if the previous wire is green or if there is no previous \
                      wire, and if the next wire is blue or if there is no next wire.",
        applies: red_between_green_and_blue,
    },
    Rule {
        number: 2,
        description: "Cut a red wire with exactly two wires before it if the first wire after \
                      is also red and the second wire after is not red.",
        applies: red_third_before_red,
    },
    Rule {
        number: 3,
        description: "Cut a green wire if the next wire is yellow and there is an odd number \
                      of green wires.",
        applies: green_before_yellow_odd_greens,
    },
    Rule {
        number: 4,
        description: "Cut a green wire if there is exactly one yellow wire and exactly one \
                      green wire.",
        applies: lone_green_with_lone_yellow,
    },
    Rule {
        number: 5,
        description: "Cut a green wire if the last wire is blue and there is an even number \
                      of green wires.",
        applies: green_with_blue_last_even_greens,
    },
    Rule {
        number: 6,
        description: "Cut a blue wire if there are exactly four wires.",
        applies: blue_with_four_wires,
    },
    Rule {
        number: 7,
        description: "Cut a blue wire if there are as many red wires as there are blue and \
                      yellow wires combined.",
        applies: blue_balancing_red,
    },
    Rule {
        number: 8,
        description: "Cut a yellow wire if the first wire is green and there is an even number \
                      of yellow wires.",
        applies: yellow_green_first_even_yellows,
    },
    Rule {
        number: 9,
        description: "Cut a yellow wire if the first wire is blue and there is an odd number \
                      of yellow wires.",
        applies: yellow_blue_first_odd_yellows,
    },
    Rule {
        number: 10,
        description: "Cut a yellow wire if the next wire is red and the previous wire is not \
                      yellow.",
        applies: yellow_before_red,
    },
    Rule {
        number: 11,
        description: "Cut any wire that is not red or green if it is between two green wires \
                      with no other colors in between.",
        applies: between_two_greens,
    },
];

/// The game is won once no danger-colored wire remains
pub fn victory(state: &WireState) -> bool {
    !state.slots().iter().flatten().any(|wire| wire.is_danger())
}

/// Check whether any rule allows cutting `position`.
///
/// Positions that are already cut are never legal.
pub fn is_legal_cut(state: &WireState, position: usize) -> bool {
    !state.is_cut(position) && RULES.iter().any(|rule| (rule.applies)(state, position))
}

/// All rules that allow cutting `position`
pub fn legal_rules(state: &WireState, position: usize) -> Vec<&'static Rule> {
    if state.is_cut(position) {
        return Vec::new();
    }
    RULES
        .iter()
        .filter(|rule| (rule.applies)(state, position))
        .collect()
}

pub fn red_between_green_and_blue(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Red)
        && matches!(state.prev(cut), None | Some(Color::Green))
        && matches!(state.first(cut + 1), None | Some(Color::Blue))
}

// "second wire after" is the first wire at or after raw position cut + 2
pub fn red_third_before_red(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Red)
        && state.count_before(cut) == 2
        && state.first(cut + 1) == Some(Color::Red)
        && state.first(cut + 2) != Some(Color::Red)
}

pub fn green_before_yellow_odd_greens(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Green)
        && state.first(cut + 1) == Some(Color::Yellow)
        && state.count_color(Color::Green) % 2 == 1
}

pub fn lone_green_with_lone_yellow(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Green)
        && state.count_color(Color::Green) == 1
        && state.count_color(Color::Yellow) == 1
}

pub fn green_with_blue_last_even_greens(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Green)
        && state.last_wire() == Some(Color::Blue)
        && state.count_color(Color::Green) % 2 == 0
}

pub fn blue_with_four_wires(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Blue) && state.count() == 4
}

pub fn blue_balancing_red(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Blue)
        && state.count_color(Color::Blue) + state.count_color(Color::Yellow)
            == state.count_color(Color::Red)
}

pub fn yellow_green_first_even_yellows(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Yellow)
        && state.first_wire() == Some(Color::Green)
        && state.count_color(Color::Yellow) % 2 == 0
}

pub fn yellow_blue_first_odd_yellows(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Yellow)
        && state.first_wire() == Some(Color::Blue)
        && state.count_color(Color::Yellow) % 2 == 1
}

pub fn yellow_before_red(state: &WireState, cut: usize) -> bool {
    state.get(cut) == Some(Color::Yellow)
        && state.prev(cut) != Some(Color::Yellow)
        && state.first(cut + 1) == Some(Color::Red)
}

pub fn between_two_greens(state: &WireState, cut: usize) -> bool {
    matches!(state.get(cut), Some(Color::Blue | Color::Yellow))
        && state.prev(cut) == Some(Color::Green)
        && state.first(cut + 1) == Some(Color::Green)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wires::{Configuration, NUM_WIRES};
    use Color::*;

    fn state(colors: &[Color]) -> WireState {
        let slots: Vec<Option<Color>> = colors.iter().map(|&c| Some(c)).collect();
        WireState::from_slots(&slots)
    }

    fn numbers(rules: Vec<&Rule>) -> Vec<usize> {
        rules.iter().map(|rule| rule.number).collect()
    }

    #[test]
    fn test_rule_table_is_numbered_in_order() {
        for (i, rule) in RULES.iter().enumerate() {
            assert_eq!(rule.number, i + 1);
        }
    }

    #[test]
    fn test_victory() {
        assert!(!victory(&state(&[Green, Red, Blue, Yellow])));
        assert!(victory(&WireState::from_slots(&[None, Some(Green), Some(Blue), Some(Yellow)])));
        assert!(victory(&WireState::from_slots(&[None, None])));
    }

    #[test]
    fn test_red_between_green_and_blue() {
        assert!(red_between_green_and_blue(&state(&[Green, Red, Blue, Yellow]), 1));
        assert!(red_between_green_and_blue(&state(&[Red, Blue, Green, Yellow]), 0));
        assert!(red_between_green_and_blue(&state(&[Yellow, Blue, Green, Red]), 3));
        assert!(!red_between_green_and_blue(&state(&[Yellow, Red, Blue, Green]), 1));
        assert!(!red_between_green_and_blue(
            &WireState::from_slots(&[Some(Green), Some(Yellow), None, Some(Red), None]),
            3
        ));
        assert!(red_between_green_and_blue(
            &WireState::from_slots(&[Some(Green), None, Some(Red), None]),
            2
        ));
    }

    #[test]
    fn test_red_third_before_red() {
        assert!(red_third_before_red(&state(&[Green, Blue, Red, Red, Yellow]), 2));
        assert!(!red_third_before_red(&state(&[Green, Blue, Red, Red, Red]), 2));
        assert!(!red_third_before_red(&state(&[Green, Red, Red, Yellow]), 1));
        // The wire two positions after may already be cut, the next remaining one counts
        assert!(!red_third_before_red(
            &WireState::from_slots(&[
                Some(Green),
                Some(Blue),
                Some(Red),
                None,
                Some(Red),
                Some(Yellow),
            ]),
            2
        ));
    }

    #[test]
    fn test_green_rules() {
        assert!(green_before_yellow_odd_greens(&state(&[Green, Yellow, Red, Blue]), 0));
        assert!(!green_before_yellow_odd_greens(&state(&[Green, Yellow, Green, Red, Blue]), 0));

        assert!(lone_green_with_lone_yellow(&state(&[Red, Green, Blue, Yellow]), 1));
        assert!(!lone_green_with_lone_yellow(&state(&[Red, Green, Yellow, Yellow]), 1));

        assert!(green_with_blue_last_even_greens(&state(&[Green, Red, Green, Blue]), 0));
        assert!(green_with_blue_last_even_greens(
            &WireState::from_slots(&[Some(Green), Some(Red), Some(Green), Some(Blue), None]),
            2
        ));
        assert!(!green_with_blue_last_even_greens(&state(&[Green, Red, Blue, Green]), 0));
    }

    #[test]
    fn test_blue_rules() {
        let four_left = WireState::from_slots(&[
            Some(Blue),
            Some(Red),
            None,
            None,
            Some(Green),
            None,
            Some(Yellow),
            None,
        ]);
        assert!(blue_with_four_wires(&four_left, 0));
        assert!(!blue_with_four_wires(&state(&[Blue, Red, Green, Yellow, Red]), 0));

        assert!(blue_balancing_red(&state(&[Blue, Red, Red, Yellow, Green]), 0));
        assert!(!blue_balancing_red(&state(&[Blue, Red, Blue, Yellow, Green]), 0));
    }

    #[test]
    fn test_yellow_rules() {
        assert!(yellow_green_first_even_yellows(&state(&[Green, Yellow, Yellow, Red, Blue]), 1));
        assert!(!yellow_green_first_even_yellows(&state(&[Green, Yellow, Red, Blue]), 1));

        assert!(yellow_blue_first_odd_yellows(&state(&[Blue, Yellow, Red, Green]), 1));
        assert!(!yellow_blue_first_odd_yellows(&state(&[Blue, Yellow, Yellow, Red, Green]), 1));

        assert!(yellow_before_red(&state(&[Green, Yellow, Red, Blue]), 1));
        assert!(yellow_before_red(&state(&[Yellow, Red, Green, Blue]), 0));
        assert!(!yellow_before_red(&state(&[Yellow, Yellow, Red, Green, Blue]), 1));
    }

    #[test]
    fn test_between_two_greens() {
        assert!(between_two_greens(&state(&[Red, Green, Blue, Green, Yellow]), 2));
        assert!(between_two_greens(
            &WireState::from_slots(&[
                Some(Green),
                None,
                Some(Yellow),
                None,
                Some(Green),
                Some(Red),
                Some(Blue),
            ]),
            2
        ));
        assert!(!between_two_greens(&state(&[Green, Green, Green, Red, Blue, Yellow]), 1));
        assert!(!between_two_greens(&state(&[Green, Red, Green, Blue, Yellow]), 1));
    }

    #[test]
    fn test_cut_wires_are_never_legal() {
        let state = WireState::from_slots(&[
            Some(Green),
            None,
            Some(Green),
            Some(Red),
            Some(Blue),
            Some(Yellow),
        ]);
        assert!(!is_legal_cut(&state, 1));
        assert!(legal_rules(&state, 1).is_empty());
    }

    #[test]
    fn test_legal_rules_for_example_configuration() {
        let config = Configuration::new(
            &[Green, Red, Red, Blue, Yellow, Red, Green, Blue],
            NUM_WIRES,
        )
        .unwrap();
        let state = WireState::from_configuration(&config);

        assert_eq!(numbers(legal_rules(&state, 0)), vec![5]);
        assert_eq!(numbers(legal_rules(&state, 1)), Vec::<usize>::new());
        assert_eq!(numbers(legal_rules(&state, 2)), Vec::<usize>::new());
        assert_eq!(numbers(legal_rules(&state, 3)), vec![7]);
        assert_eq!(numbers(legal_rules(&state, 4)), vec![10]);
        assert_eq!(numbers(legal_rules(&state, 5)), Vec::<usize>::new());
        assert!(!is_legal_cut(&state, 1));
        assert!(is_legal_cut(&state, 4));
    }

    #[test]
    fn test_predicates_are_pure() {
        let state = state(&[Green, Red, Red, Blue, Yellow, Red, Green, Blue]);
        let before = state.clone();
        for position in 0..state.len() {
            assert_eq!(is_legal_cut(&state, position), is_legal_cut(&state, position));
        }
        assert_eq!(victory(&state), victory(&state));
        assert_eq!(state, before);
    }
}
