//! Nondeterministic finite automaton over single-character labels
//!
//! An [`Automaton`] is configured once (states and transitions) and then
//! driven by the lexer: [`Automaton::reset`] moves the working set back to
//! the start states, [`Automaton::apply`] consumes one character across all
//! live states in parallel, and [`Automaton::accepts`] reports whether any
//! live state is accepting. [`Automaton::has_transitions`] lets a caller
//! test a character without disturbing the working set.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// State identifier. Small non-negative integers by convention.
pub type StateId = u32;

#[derive(Debug, Clone, Default)]
pub struct Automaton {
    states: HashSet<StateId>,
    start: HashSet<StateId>,
    accept: HashSet<StateId>,
    transitions: HashMap<(StateId, char), HashSet<StateId>>,
    current: HashSet<StateId>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a state. Repeated calls are additive: a flag set by an
    /// earlier call is never cleared by a later one.
    pub fn add_state(&mut self, id: StateId, is_start: bool, is_accept: bool) -> &mut Self {
        self.states.insert(id);
        if is_start {
            self.start.insert(id);
        }
        if is_accept {
            self.accept.insert(id);
        }
        self
    }

    /// Add `to` to the destination set of `(from, label)`. Both endpoints
    /// become known states.
    pub fn add_transition(&mut self, from: StateId, label: char, to: StateId) -> &mut Self {
        self.states.insert(from);
        self.states.insert(to);
        self.transitions.entry((from, label)).or_default().insert(to);
        self
    }

    /// Add the same transition for every label in `labels`
    pub fn add_transitions<I>(&mut self, from: StateId, labels: I, to: StateId) -> &mut Self
    where
        I: IntoIterator<Item = char>,
    {
        for label in labels {
            self.add_transition(from, label, to);
        }
        self
    }

    /// Start a fresh recognition attempt
    pub fn reset(&mut self) {
        self.current.clone_from(&self.start);
    }

    /// Consume `label` from every live state. With no matching transition
    /// the working set becomes empty and the automaton is dead.
    pub fn apply(&mut self, label: char) {
        let next: HashSet<StateId> = self
            .current
            .iter()
            .filter_map(|&state| self.transitions.get(&(state, label)))
            .flatten()
            .copied()
            .collect();
        self.current = next;
    }

    /// True iff some live state is accepting
    pub fn accepts(&self) -> bool {
        self.current.iter().any(|state| self.accept.contains(state))
    }

    /// True iff some live state has an outgoing transition on `label`.
    /// Never mutates the working set.
    pub fn has_transitions(&self, label: char) -> bool {
        self.current
            .iter()
            .any(|&state| self.transitions.contains_key(&(state, label)))
    }

    /// True once the working set is empty
    pub fn is_dead(&self) -> bool {
        self.current.is_empty()
    }

    /// Reset, feed every character of `input`, and report acceptance
    pub fn matches(&mut self, input: &str) -> bool {
        self.reset();
        for ch in input.chars() {
            self.apply(ch);
            if self.is_dead() {
                return false;
            }
        }
        self.accepts()
    }

    /// Live states, sorted for stable output
    pub fn current_states(&self) -> Vec<StateId> {
        self.current.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Number of `(state, label) -> state` edges
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(HashSet::len).sum()
    }

    /// An automaton with no start state can never match anything
    pub fn has_start_state(&self) -> bool {
        !self.start.is_empty()
    }

    pub fn is_start(&self, id: StateId) -> bool {
        self.start.contains(&id)
    }

    pub fn is_accept(&self, id: StateId) -> bool {
        self.accept.contains(&id)
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sorted = |set: &HashSet<StateId>| set.iter().copied().collect::<BTreeSet<_>>();
        write!(
            f,
            "Automaton(states={:?}, start={:?}, accept={:?}, transitions={})",
            sorted(&self.states),
            sorted(&self.start),
            sorted(&self.accept),
            self.transition_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_char(ch: char) -> Automaton {
        let mut automaton = Automaton::new();
        automaton
            .add_state(0, true, false)
            .add_state(1, false, true)
            .add_transition(0, ch, 1);
        automaton
    }

    #[test]
    fn test_single_character_automaton() {
        let mut plus = single_char('+');

        assert!(plus.matches("+"));
        assert!(!plus.matches(""));
        assert!(!plus.matches("++"));
        assert!(!plus.matches("-"));
    }

    #[test]
    fn test_add_state_is_additive() {
        let mut automaton = Automaton::new();
        automaton.add_state(0, true, false);
        automaton.add_state(0, false, true);
        automaton.add_state(0, false, false);

        assert!(automaton.is_start(0));
        assert!(automaton.is_accept(0));
        assert_eq!(automaton.state_count(), 1);

        automaton.reset();
        assert!(automaton.accepts());
    }

    #[test]
    fn test_transitions_accumulate_destinations() {
        let mut automaton = Automaton::new();
        automaton
            .add_state(0, true, false)
            .add_state(2, false, true)
            .add_transition(0, 'a', 1)
            .add_transition(0, 'a', 2)
            .add_transition(0, 'a', 2);

        assert_eq!(automaton.transition_count(), 2);

        automaton.reset();
        automaton.apply('a');
        assert_eq!(automaton.current_states(), vec![1, 2]);
        assert!(automaton.accepts());
    }

    #[test]
    fn test_apply_without_transition_kills_automaton() {
        let mut automaton = single_char('(');
        automaton.reset();
        automaton.apply(')');

        assert!(automaton.is_dead());
        assert!(!automaton.accepts());
        assert!(!automaton.has_transitions('('));
    }

    #[test]
    fn test_has_transitions_does_not_mutate() {
        let mut automaton = single_char('*');
        automaton.reset();

        assert!(automaton.has_transitions('*'));
        assert!(!automaton.has_transitions('/'));
        assert_eq!(automaton.current_states(), vec![0]);
    }

    #[test]
    fn test_multiple_start_states_step_in_parallel() {
        // a+ | b+ with two independent starts
        let mut automaton = Automaton::new();
        automaton
            .add_state(0, true, false)
            .add_state(1, false, true)
            .add_state(10, true, false)
            .add_state(11, false, true)
            .add_transitions(0, ['a'], 1)
            .add_transitions(1, ['a'], 1)
            .add_transitions(10, ['b'], 11)
            .add_transitions(11, ['b'], 11);

        assert!(automaton.matches("aaa"));
        assert!(automaton.matches("bb"));
        assert!(!automaton.matches("ab"));
    }

    #[test]
    fn test_reset_restores_start_set() {
        let mut automaton = single_char('-');
        automaton.reset();
        automaton.apply('-');
        assert_eq!(automaton.current_states(), vec![1]);

        automaton.reset();
        assert_eq!(automaton.current_states(), vec![0]);
    }

    #[test]
    fn test_unconfigured_automaton() {
        let mut automaton = Automaton::new();
        assert!(!automaton.has_start_state());

        automaton.reset();
        assert!(automaton.is_dead());
        assert!(!automaton.matches(""));
    }
}
