use std::fmt::Debug;

use super::{GlobalTransitions, State, Transition, TransitionRecord};
use crate::error::{FsmError, Result};

/// Owns the registered states, the active state, the global layer and the
/// shared context.
pub struct StateMachine<K, C, P = ()> {
    context: C,
    states: Vec<Box<dyn State<K, C, P>>>,
    initial: Option<usize>,
    current: Option<usize>,
    global: Option<Box<dyn GlobalTransitions<K, C, P>>>,
}

impl<K, C, P> StateMachine<K, C, P>
where
    K: Copy + Eq + Debug,
    P: Debug,
{
    pub fn new(context: C) -> Self {
        Self { context, states: Vec::new(), initial: None, current: None, global: None }
    }

    /// Register a state. Ids must be unique and at most one state may be
    /// initial.
    pub fn add_state<S>(&mut self, state: S, is_initial: bool) -> Result<()>
    where
        S: State<K, C, P> + 'static,
    {
        let id = state.id();
        if self.index_of(id).is_some() {
            return Err(FsmError::DuplicateState { state: format!("{:?}", id) });
        }
        if is_initial {
            if let Some(existing) = self.initial {
                return Err(FsmError::MultipleInitialStates {
                    existing: format!("{:?}", self.states[existing].id()),
                    rejected: format!("{:?}", id),
                });
            }
            self.initial = Some(self.states.len());
        }
        self.states.push(Box::new(state));
        Ok(())
    }

    /// Install the global transition layer, replacing any previous one
    pub fn set_global_transitions<G>(&mut self, global: G)
    where
        G: GlobalTransitions<K, C, P> + 'static,
    {
        self.global = Some(Box::new(global));
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Active state, `None` before the first update
    pub fn current_state(&self) -> Option<K> {
        self.current.map(|i| self.states[i].id())
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Run one tick.
    ///
    /// The first call only enters the initial state, without polling the
    /// global layer, so a global switch that already holds fires one tick
    /// later. Returns the switch applied this tick, if any.
    pub fn update(&mut self) -> Result<Option<TransitionRecord<K>>> {
        let Some(current) = self.current else {
            let initial = self.initial.ok_or(FsmError::MissingInitialState)?;
            self.check_payload(initial, None)?;
            self.states[initial].enter(&self.context, None);
            self.current = Some(initial);
            log::trace!("entered initial state {:?}", self.states[initial].id());
            return Ok(None);
        };

        let active = self.states[current].id();

        if let Some(global) = self.global.as_mut() {
            if let Some(request) = global.evaluate(&self.context, active) {
                return self.switch(current, request.global()).map(Some);
            }
        }

        match self.states[current].update(&self.context) {
            Some(mut request) => {
                request.is_global = false;
                self.switch(current, request).map(Some)
            }
            None => Ok(None),
        }
    }

    fn index_of(&self, id: K) -> Option<usize> {
        self.states.iter().position(|s| s.id() == id)
    }

    fn check_payload(&self, index: usize, payload: Option<&P>) -> Result<()> {
        let state = &self.states[index];
        if state.accepts(payload) {
            Ok(())
        } else {
            Err(FsmError::PayloadMismatch {
                state: format!("{:?}", state.id()),
                payload: format!("{:?}", payload),
            })
        }
    }

    fn switch(&mut self, from: usize, request: Transition<K, P>) -> Result<TransitionRecord<K>> {
        let Transition { target, payload, is_global } = request;

        let to = self
            .index_of(target)
            .ok_or_else(|| FsmError::UnknownState { state: format!("{:?}", target) })?;
        self.check_payload(to, payload.as_ref())?;

        let from_id = self.states[from].id();
        self.states[from].exit(&self.context, is_global);
        self.states[to].enter(&self.context, payload);
        self.current = Some(to);

        log::debug!("{:?} -> {:?}{}", from_id, target, if is_global { " (global)" } else { "" });
        Ok(TransitionRecord { from: from_id, to: target, global: is_global })
    }
}
